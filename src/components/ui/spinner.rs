use icons::LoaderCircle;
use leptos::prelude::*;
use tw_merge::tw_merge;

#[component]
pub fn Spinner(#[prop(into, optional)] class: String) -> impl IntoView {
    let merged_class = tw_merge!("size-4 animate-spin", class);

    view! { <LoaderCircle class=merged_class attr:role="status" attr:aria-label="Saving" /> }
}

/// Three bouncing dots, shown while the assistant is "typing".
#[component]
pub fn TypingDots() -> impl IntoView {
    view! {
        <div class="flex space-x-1" role="status" aria-label="Assistant is typing">
            <div class="h-2 w-2 animate-bounce rounded-full bg-muted-foreground/60"></div>
            <div class="h-2 w-2 animate-bounce rounded-full bg-muted-foreground/60 [animation-delay:0.1s]"></div>
            <div class="h-2 w-2 animate-bounce rounded-full bg-muted-foreground/60 [animation-delay:0.2s]"></div>
        </div>
    }
}
