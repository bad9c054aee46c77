mod assistant_panel;
mod sidebar;

pub use assistant_panel::AssistantPanel;
pub use sidebar::Sidebar;

use crate::components::ui::{Button, ButtonSize, ButtonVariant};
use crate::editor::DocumentEditor;
use icons::{Bot, PanelLeft};
use crate::models::ViewMode;
use crate::state::DocumentContext;
use leptos::prelude::*;
use sidebar::display_title;

const PRESSED_CLASS: &str = "aria-pressed:bg-accent aria-pressed:text-accent-foreground";

/// Top bar, both sidebars and the editor. Focus mode hides everything but
/// the editor.
#[component]
pub fn AppLayout() -> impl IntoView {
    let ctx = expect_context::<DocumentContext>();

    let focus = Memo::new(move |_| ctx.state(|s| s.view_mode == ViewMode::Focus));
    let sidebar_open = Memo::new(move |_| ctx.state(|s| s.sidebar_open));
    let ai_open = Memo::new(move |_| ctx.state(|s| s.ai_sidebar_open));
    let unsaved = Memo::new(move |_| ctx.with(|s| s.has_unsaved_changes()));
    let title = Memo::new(move |_| {
        ctx.with(|s| s.active_document().map(|d| display_title(&d.title).to_string()))
    });

    let top_bar = move || {
        view! {
            <header class="flex h-12 shrink-0 items-center gap-2 border-b border-border px-3">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class=PRESSED_CLASS
                    attr:aria-pressed=move || sidebar_open.get().to_string()
                    attr:title="Toggle sidebar"
                    on:click=move |_| ctx.toggle_sidebar()
                >
                    <PanelLeft />
                </Button>

                <span class="text-sm font-semibold">"Inkpad"</span>
                <span class="text-muted-foreground">"/"</span>
                <span class="min-w-0 truncate text-sm">
                    {move || title.get().unwrap_or_default()}
                </span>
                <Show when=move || unsaved.get() fallback=|| ().into_view()>
                    <span class="size-2 shrink-0 rounded-full bg-amber-500" title="Unsaved changes"></span>
                </Show>

                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Sm
                    class=format!("ml-auto {PRESSED_CLASS}")
                    attr:aria-pressed=move || ai_open.get().to_string()
                    attr:title="Toggle AI assistant"
                    on:click=move |_| ctx.toggle_ai_sidebar()
                >
                    <Bot />
                    "Assistant"
                </Button>
            </header>
        }
    };

    view! {
        <div class="flex h-screen flex-col bg-background text-foreground">
            <Show when=move || !focus.get() fallback=|| ().into_view()>
                {top_bar}
            </Show>

            <div class="flex min-h-0 flex-1">
                <Show when=move || sidebar_open.get() && !focus.get() fallback=|| ().into_view()>
                    <Sidebar />
                </Show>

                <main class="min-w-0 flex-1">
                    <DocumentEditor />
                </main>

                <Show when=move || ai_open.get() && !focus.get() fallback=|| ().into_view()>
                    <AssistantPanel />
                </Show>
            </div>
        </div>
    }
}
