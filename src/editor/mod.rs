use crate::components::ui::{
    Alert, AlertDescription, Button, ButtonSize, ButtonVariant, Input, Spinner, Textarea,
};
use crate::models::{DocumentDraft, DocumentPatch, ViewMode};
use crate::state::DocumentContext;
use crate::util::{content_stats, format_clock_time};
use icons::{File, Plus, X};
use leptos::prelude::*;
use strum::IntoEnumIterator;

/// Status bar label for the save state.
pub(crate) fn save_status(unsaved: bool, saving: bool) -> &'static str {
    match (saving, unsaved) {
        (true, _) => "Saving...",
        (false, true) => "Unsaved changes",
        (false, false) => "All changes saved",
    }
}

fn view_mode_label(mode: ViewMode) -> &'static str {
    match mode {
        ViewMode::Edit => "Edit",
        ViewMode::Preview => "Preview",
        ViewMode::Focus => "Focus",
    }
}

#[component]
fn EmptyEditor() -> impl IntoView {
    let ctx = expect_context::<DocumentContext>();

    view! {
        <div class="flex h-full flex-col items-center justify-center gap-3 text-center">
            <File class="size-10 text-muted-foreground/60" />
            <div class="text-sm font-medium">"No document selected"</div>
            <div class="text-xs text-muted-foreground">
                "Pick a document from the sidebar or start a new one."
            </div>
            <Button
                size=ButtonSize::Sm
                on:click=move |_| {
                    let _ = ctx.create_document(DocumentDraft::default());
                }
            >
                <Plus />
                "New document"
            </Button>
        </div>
    }
}

#[component]
fn ErrorBanner() -> impl IntoView {
    let ctx = expect_context::<DocumentContext>();
    let error = Memo::new(move |_| ctx.state(|s| s.error.clone()));

    view! {
        <Show when=move || error.get().is_some() fallback=|| ().into_view()>
            <Alert class="border-destructive/50 text-destructive">
                <AlertDescription>{move || error.get().unwrap_or_default()}</AlertDescription>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    attr:aria-label="Dismiss"
                    on:click=move |_| ctx.clear_error()
                >
                    <X />
                </Button>
            </Alert>
        </Show>
    }
}

/// Editing surface for the active document.
#[component]
pub fn DocumentEditor() -> impl IntoView {
    let ctx = expect_context::<DocumentContext>();

    let active_id = Memo::new(move |_| ctx.state(|s| s.active_document().map(|d| d.id.clone())));
    let title = Signal::derive(move || {
        ctx.with(|s| s.active_document().map(|d| d.title.clone()).unwrap_or_default())
    });
    let content = Signal::derive(move || {
        ctx.with(|s| s.active_document().map(|d| d.content.clone()).unwrap_or_default())
    });
    let updated_at = Memo::new(move |_| ctx.with(|s| s.active_document().map(|d| d.updated_at)));

    let view_mode = Memo::new(move |_| ctx.state(|s| s.view_mode));
    let unsaved = Memo::new(move |_| ctx.with(|s| s.has_unsaved_changes()));
    let saving = Memo::new(move |_| ctx.state(|s| s.loading));
    let stats = Memo::new(move |_| content.with(|c| content_stats(c)));

    let on_title = Callback::new(move |t: String| {
        if let Some(id) = active_id.get_untracked() {
            ctx.update_document(DocumentPatch::new(id).title(t));
        }
    });
    let on_content = Callback::new(move |c: String| ctx.update_document_content(c));

    let toolbar = move || {
        view! {
            <div class="flex items-center gap-2 border-b border-border px-4 py-2">
                <Input
                    class="h-8 flex-1 border-transparent text-base font-semibold shadow-none focus-visible:border-ring"
                    placeholder="Untitled"
                    value=title
                    on_change=on_title
                />

                <div class="flex items-center rounded-md border border-border p-0.5">
                    {move || {
                        let current = view_mode.get();
                        ViewMode::iter()
                            .map(|mode| {
                                let variant = if mode == current {
                                    ButtonVariant::Active
                                } else {
                                    ButtonVariant::Ghost
                                };
                                view! {
                                    <Button
                                        size=ButtonSize::Xs
                                        variant=variant
                                        attr:data-mode=mode.to_string()
                                        on:click=move |_| ctx.set_view_mode(mode)
                                    >
                                        {view_mode_label(mode)}
                                    </Button>
                                }
                            })
                            .collect_view()
                    }}
                </div>

                <Button
                    size=ButtonSize::Sm
                    attr:disabled=move || !unsaved.get() || saving.get()
                    on:click=move |_| ctx.save_document()
                >
                    <Show when=move || saving.get() fallback=|| ().into_view()>
                        <Spinner />
                    </Show>
                    "Save"
                </Button>
            </div>
        }
    };

    let status_bar = move || {
        view! {
            <div class="flex items-center gap-4 border-t border-border px-4 py-1.5 text-xs text-muted-foreground">
                <span>{move || format!("{} characters", stats.get().characters)}</span>
                <span>{move || format!("{} words", stats.get().words)}</span>
                <span class="ml-auto">{move || save_status(unsaved.get(), saving.get())}</span>
                <span>
                    {move || {
                        updated_at
                            .get()
                            .map(|at| format!("Last edited {}", format_clock_time(at)))
                            .unwrap_or_default()
                    }}
                </span>
            </div>
        }
    };

    let body = move || match view_mode.get() {
        ViewMode::Preview => view! {
            <div
                class="prose prose-sm dark:prose-invert max-w-none flex-1 overflow-y-auto whitespace-pre-wrap px-6 py-4"
                inner_html=move || content.get()
            ></div>
        }
        .into_any(),
        mode => {
            let class = if mode == ViewMode::Focus {
                "mx-auto h-full max-w-3xl border-none px-6 py-8 text-base leading-relaxed shadow-none focus-visible:ring-0"
            } else {
                "h-full rounded-none border-none px-6 py-4 leading-relaxed shadow-none focus-visible:ring-0"
            };
            view! {
                <div class="flex-1 overflow-hidden">
                    <Textarea
                        class=class
                        placeholder="Start writing..."
                        value=content
                        on_change=on_content
                    />
                </div>
            }
            .into_any()
        }
    };

    view! {
        <Show when=move || active_id.get().is_some() fallback=|| view! { <EmptyEditor /> }>
            <div class="flex h-full min-h-0 flex-col">
                <Show
                    when=move || view_mode.get() != ViewMode::Focus
                    fallback=move || {
                        view! {
                            <div class="flex justify-end px-4 pt-2">
                                <Button
                                    variant=ButtonVariant::Ghost
                                    size=ButtonSize::Xs
                                    on:click=move |_| ctx.set_view_mode(ViewMode::Edit)
                                >
                                    "Exit focus"
                                </Button>
                            </div>
                        }
                    }
                >
                    {toolbar}
                </Show>
                <div class="px-4 pt-2 empty:hidden">
                    <ErrorBanner />
                </div>
                {body}
                <Show when=move || view_mode.get() != ViewMode::Focus fallback=|| ().into_view()>
                    {status_bar}
                </Show>
            </div>
        </Show>
    }
}
