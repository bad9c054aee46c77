use crate::components::ui::{Button, ButtonSize, ButtonVariant, Input};
use crate::models::{Document, DocumentDraft, DocumentPatch, DEFAULT_TITLE};
use crate::state::DocumentContext;
use icons::{Archive, ChevronDown, ChevronLeft, ChevronRight, Plus, Search, Star, Trash2};
use leptos::prelude::*;

/// How many documents the "Last edited" section lists.
const LAST_EDITED_LIMIT: usize = 5;

/// Blank titles render as the default title.
pub(crate) fn display_title(title: &str) -> &str {
    if title.trim().is_empty() {
        DEFAULT_TITLE
    } else {
        title
    }
}

/// Owned snapshot of the fields a sidebar row renders.
#[derive(Clone, Debug, PartialEq, Eq)]
struct RowItem {
    id: String,
    title: String,
    is_favorite: bool,
    is_archived: bool,
}

impl From<&Document> for RowItem {
    fn from(d: &Document) -> Self {
        Self {
            id: d.id.clone(),
            title: display_title(&d.title).to_string(),
            is_favorite: d.is_favorite,
            is_archived: d.is_archived,
        }
    }
}

fn rows(docs: Vec<&Document>) -> Vec<RowItem> {
    docs.into_iter().map(RowItem::from).collect()
}

#[component]
fn DocumentRow(item: RowItem) -> impl IntoView {
    let ctx = expect_context::<DocumentContext>();

    let id = item.id.clone();
    let is_active = Memo::new(move |_| ctx.state(|s| s.active_id.as_deref() == Some(id.as_str())));

    let id_select = item.id.clone();
    let id_favorite = item.id.clone();
    let id_archive = item.id.clone();
    let id_delete = item.id.clone();
    let is_favorite = item.is_favorite;
    let is_archived = item.is_archived;
    let star_class = if is_favorite { "size-3.5 fill-current text-amber-500" } else { "size-3.5" };

    view! {
        <div class="group flex min-w-0 items-center gap-1">
            <Button
                variant=ButtonVariant::Ghost
                size=ButtonSize::Sm
                class="min-w-0 flex-1 justify-start aria-[current=page]:bg-accent aria-[current=page]:text-accent-foreground"
                attr:aria-current=move || if is_active.get() { Some("page") } else { None }
                on:click=move |_| ctx.set_active_document(Some(id_select.clone()))
            >
                <span class="min-w-0 flex-1 truncate text-left">{item.title}</span>
            </Button>

            <div class="hidden shrink-0 items-center group-hover:flex">
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="size-7"
                    attr:title=if is_favorite { "Remove from favorites" } else { "Add to favorites" }
                    on:click=move |_| {
                        ctx.update_document(DocumentPatch::new(id_favorite.clone()).favorite(!is_favorite))
                    }
                >
                    <Star class=star_class />
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="size-7"
                    attr:title=if is_archived { "Unarchive" } else { "Archive" }
                    on:click=move |_| {
                        ctx.update_document(DocumentPatch::new(id_archive.clone()).archived(!is_archived))
                    }
                >
                    <Archive class="size-3.5" />
                </Button>
                <Button
                    variant=ButtonVariant::Ghost
                    size=ButtonSize::Icon
                    class="size-7 hover:text-destructive"
                    attr:title="Delete"
                    on:click=move |_| ctx.delete_document(&id_delete)
                >
                    <Trash2 class="size-3.5" />
                </Button>
            </div>
        </div>
    }
}

#[component]
fn DocumentList(items: Vec<RowItem>, #[prop(into)] empty: String) -> impl IntoView {
    if items.is_empty() {
        return view! { <div class="px-2 py-1 text-xs text-muted-foreground">{empty}</div> }.into_any();
    }

    view! {
        <div class="flex flex-col gap-0.5">
            {items.into_iter().map(|item| view! { <DocumentRow item=item /> }).collect_view()}
        </div>
    }
    .into_any()
}

/// Collapsible sidebar group. `items` is re-read whenever the store changes.
#[component]
fn SidebarSection(
    #[prop(into)] label: String,
    #[prop(default = true)] initially_open: bool,
    items: Memo<Vec<RowItem>>,
    #[prop(into)] empty: String,
) -> impl IntoView {
    let open = RwSignal::new(initially_open);
    let empty = StoredValue::new(empty);

    view! {
        <div class="flex flex-col gap-1">
            <button
                type="button"
                class="flex items-center gap-1 px-2 text-xs font-medium uppercase tracking-wide text-muted-foreground hover:text-foreground"
                on:click=move |_| open.update(|v| *v = !*v)
            >
                <Show when=move || open.get() fallback=|| view! { <ChevronRight class="size-3" /> }>
                    <ChevronDown class="size-3" />
                </Show>
                <span>{label}</span>
                <span class="ml-auto tabular-nums">{move || items.with(|v| v.len())}</span>
            </button>

            <Show when=move || open.get() fallback=|| ().into_view()>
                {move || view! { <DocumentList items=items.get() empty=empty.get_value() /> }}
            </Show>
        </div>
    }
}

#[component]
pub fn Sidebar() -> impl IntoView {
    let ctx = expect_context::<DocumentContext>();

    let collapsed: RwSignal<bool> = RwSignal::new(false);

    let query = Signal::derive(move || ctx.state(|s| s.search_query.clone()));
    let searching = Memo::new(move |_| ctx.state(|s| !s.search_query.trim().is_empty()));

    let results = Memo::new(move |_| ctx.with(|s| rows(s.filtered_documents())));
    let recent = Memo::new(move |_| ctx.with(|s| rows(s.recent_documents())));
    let last_edited = Memo::new(move |_| ctx.with(|s| rows(s.recently_edited(LAST_EDITED_LIMIT))));
    let favorites = Memo::new(move |_| ctx.with(|s| rows(s.favorite_documents())));
    let archived = Memo::new(move |_| ctx.with(|s| rows(s.archived_documents())));
    let total = Memo::new(move |_| ctx.with(|s| s.documents().len()));

    let on_new = move |_: web_sys::MouseEvent| {
        let _ = ctx.create_document(DocumentDraft::default());
    };

    view! {
        <aside class=move || {
            if collapsed.get() {
                "flex w-14 shrink-0 flex-col items-center gap-2 border-r border-border py-3"
            } else {
                "flex w-64 shrink-0 flex-col gap-3 overflow-y-auto border-r border-border p-3"
            }
        }>
            <Show
                when=move || !collapsed.get()
                fallback=move || {
                    view! {
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:title="Expand sidebar"
                            on:click=move |_| collapsed.set(false)
                        >
                            <ChevronRight />
                        </Button>
                        <Button
                            variant=ButtonVariant::Ghost
                            size=ButtonSize::Icon
                            attr:title="New document"
                            on:click=on_new
                        >
                            <Plus />
                        </Button>
                    }
                }
            >
                <div class="flex items-center justify-between gap-2">
                    <span class="text-xs text-muted-foreground">
                        {move || format!("{} documents", total.get())}
                    </span>
                    <Button
                        variant=ButtonVariant::Ghost
                        size=ButtonSize::Icon
                        class="size-7"
                        attr:title="Collapse sidebar"
                        on:click=move |_| collapsed.set(true)
                    >
                        <ChevronLeft class="size-4 text-muted-foreground" />
                    </Button>
                </div>

                <div class="relative">
                    <Search class="pointer-events-none absolute left-2.5 top-1/2 size-3.5 -translate-y-1/2 text-muted-foreground" />
                    <Input
                        class="h-8 pl-8"
                        r#type="search"
                        placeholder="Search documents"
                        value=query
                        on_change=Callback::new(move |q: String| ctx.set_search_query(q))
                    />
                </div>

                <Button variant=ButtonVariant::Outline size=ButtonSize::Sm class="w-full" on:click=on_new>
                    <Plus />
                    "New document"
                </Button>

                <Show
                    when=move || searching.get()
                    fallback=move || {
                        view! {
                            <SidebarSection label="Recent" items=recent empty="Nothing opened yet" />
                            <SidebarSection label="Last edited" items=last_edited empty="No documents" />
                            <SidebarSection label="Favorites" items=favorites empty="No favorites" />
                            <SidebarSection
                                label="Archived"
                                initially_open=false
                                items=archived
                                empty="Nothing archived"
                            />
                        }
                    }
                >
                    <SidebarSection label="Results" items=results empty="No matching documents" />
                </Show>
            </Show>
        </aside>
    }
}
