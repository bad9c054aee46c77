use crate::api::Backend;
use crate::assistant::{AssistantSession, QuickAction};
use crate::components::ui::{Button, ButtonSize, ButtonVariant, Textarea, TypingDots};
use crate::models::ChatRole;
use crate::state::DocumentContext;
use crate::util::format_clock_time;
use chrono::Utc;
use icons::{Bot, Send as SendIcon, X};
use leptos::prelude::*;
use leptos::task::spawn_local;
use strum::IntoEnumIterator;

/// Enter sends; Shift+Enter falls through to the textarea as a newline.
pub(crate) fn is_send_key(key: &str, shift: bool) -> bool {
    key == "Enter" && !shift
}

#[component]
pub fn AssistantPanel() -> impl IntoView {
    let ctx = expect_context::<DocumentContext>();

    let session: RwSignal<AssistantSession> = RwSignal::new(AssistantSession::new(Utc::now()));
    let input: RwSignal<String> = RwSignal::new(String::new());

    let typing = Memo::new(move |_| session.with(|s| s.is_typing()));
    let blank = Memo::new(move |_| input.with(|v| v.trim().is_empty()));

    let send = move || {
        let text = input.get_untracked();
        let Some(prompt) = session.try_update(|s| s.submit(&text, Utc::now())).flatten() else {
            return;
        };
        input.set(String::new());

        let backend = ctx.backend();
        spawn_local(async move {
            match backend.assistant_reply(&prompt).await {
                Ok(reply) => session.update(|s| s.receive_reply(reply, Utc::now())),
                Err(e) => {
                    leptos::logging::error!("assistant reply failed: {e}");
                    session.update(|s| s.abandon_reply());
                }
            }
        });
    };

    let on_keydown = Callback::new(move |ev: web_sys::KeyboardEvent| {
        if is_send_key(&ev.key(), ev.shift_key()) {
            ev.prevent_default();
            send();
        }
    });

    let messages = move || {
        session.with(|s| {
            s.messages()
                .iter()
                .map(|m| {
                    let (row, bubble) = match m.role {
                        ChatRole::User => ("justify-end", "bg-primary text-primary-foreground"),
                        ChatRole::Assistant => ("justify-start", "bg-muted text-foreground"),
                    };
                    let time = format_clock_time(m.timestamp);
                    let content = m.content.clone();
                    view! {
                        <div class=format!("flex {row}")>
                            <div class=format!("max-w-[85%] rounded-lg px-3 py-2 text-sm {bubble}")>
                                <p class="whitespace-pre-wrap break-words">{content}</p>
                                <p class="mt-1 text-[10px] opacity-70">{time}</p>
                            </div>
                        </div>
                    }
                })
                .collect_view()
        })
    };

    view! {
        <aside class="flex w-80 shrink-0 flex-col border-l border-border">
            <div class="flex items-center gap-2 border-b border-border px-3 py-2">
                <Bot class="text-muted-foreground" />
                <span class="text-sm font-medium">"AI Assistant"</span>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="ml-auto size-7"
                    attr:title="Close assistant"
                    on:click=move |_| ctx.toggle_ai_sidebar()
                >
                    <X />
                </Button>
            </div>

            <div class="flex flex-wrap gap-1.5 border-b border-border p-3">
                {QuickAction::iter()
                    .map(|action| {
                        view! {
                            <Button
                                variant=ButtonVariant::Outline
                                size=ButtonSize::Xs
                                attr:data-action=action.to_string()
                                on:click=move |_| input.set(action.prompt().to_string())
                            >
                                {action.label()}
                            </Button>
                        }
                    })
                    .collect_view()}
            </div>

            <div class="flex flex-1 flex-col gap-3 overflow-y-auto p-3">
                {messages}
                <Show when=move || typing.get() fallback=|| ().into_view()>
                    <div class="flex justify-start">
                        <div class="rounded-lg bg-muted px-3 py-3">
                            <TypingDots />
                        </div>
                    </div>
                </Show>
            </div>

            <div class="flex items-end gap-2 border-t border-border p-3">
                <Textarea
                    class="min-h-[2.5rem] flex-1"
                    placeholder="Ask the assistant..."
                    rows=2
                    value=Signal::derive(move || input.get())
                    on_change=Callback::new(move |v: String| input.set(v))
                    on_keydown=on_keydown
                />
                <Button
                    size=ButtonSize::Icon
                    attr:title="Send"
                    attr:disabled=move || blank.get()
                    on:click=move |_| send()
                >
                    <SendIcon />
                </Button>
            </div>
        </aside>
    }
}
