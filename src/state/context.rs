use super::{DocumentStore, EditorState};
use crate::api::{Backend, LocalBackend};
use crate::config::EnvConfig;
use crate::models::{DocumentDraft, DocumentPatch, ViewMode};
use crate::storage::BrowserStorage;
use crate::util::SystemClock;
use leptos::ev;
use leptos::prelude::*;
use leptos::task::spawn_local;
use leptos_dom::helpers::{window_event_listener, WindowListenerHandle};

pub(crate) type BrowserDocumentStore = DocumentStore<BrowserStorage, SystemClock>;

/// Reactive handle to the document store, provided once at the app root.
///
/// Reads through [`DocumentContext::with`] are tracked; every action method
/// goes through the store so persistence rules apply uniformly.
#[derive(Clone, Copy)]
pub struct DocumentContext {
    store: RwSignal<BrowserDocumentStore>,
    backend: StoredValue<LocalBackend>,

    /// Global listeners (keep handles alive).
    _pagehide_handle: StoredValue<Option<WindowListenerHandle>>,
    _keydown_handle: StoredValue<Option<WindowListenerHandle>>,
}

impl DocumentContext {
    pub fn new(config: &EnvConfig) -> Self {
        let store = DocumentStore::open(BrowserStorage, SystemClock, config);

        let ctx = Self {
            store: RwSignal::new(store),
            backend: StoredValue::new(LocalBackend::new(config)),
            _pagehide_handle: StoredValue::new(None),
            _keydown_handle: StoredValue::new(None),
        };
        ctx.start_global_listeners();
        ctx
    }

    /// Build from `window.ENV` and register as context.
    pub fn provide() -> Self {
        let ctx = Self::new(&EnvConfig::from_window());
        provide_context(ctx);
        ctx
    }

    fn start_global_listeners(&self) {
        // Every change is already written through; this catches anything a
        // failed write left behind before the tab goes away.
        let s = *self;
        let pagehide =
            window_event_listener(ev::pagehide, move |_ev: web_sys::PageTransitionEvent| {
                s.flush();
            });
        self._pagehide_handle.set_value(Some(pagehide));

        // Cmd/Ctrl+S saves, including while typing in the editor.
        let s = *self;
        let keydown = window_event_listener(ev::keydown, move |ev: web_sys::KeyboardEvent| {
            let is_meta = ev.meta_key() || ev.ctrl_key();
            if is_meta && ev.key().to_lowercase() == "s" {
                ev.prevent_default();
                s.save_document();
            }
        });
        self._keydown_handle.set_value(Some(keydown));
    }

    pub fn with<R>(&self, f: impl FnOnce(&BrowserDocumentStore) -> R) -> R {
        self.store.with(f)
    }

    pub fn state<R>(&self, f: impl FnOnce(&EditorState) -> R) -> R {
        self.store.with(|s| f(s.state()))
    }

    pub fn backend(&self) -> LocalBackend {
        self.backend.get_value()
    }

    /// No-op once the owning scope has been disposed; the window listeners
    /// outlive it.
    pub fn flush(&self) {
        let _ = self.store.try_with_untracked(|s| s.flush());
    }

    // ---- actions ----

    pub fn set_active_document(&self, id: Option<String>) {
        self.store.update(|s| s.set_active_document(id.as_deref()));
    }

    pub fn update_document(&self, patch: DocumentPatch) {
        self.store.update(|s| s.update_document(patch));
    }

    pub fn create_document(&self, draft: DocumentDraft) -> Option<String> {
        self.store.try_update(|s| s.create_document(draft))
    }

    pub fn delete_document(&self, id: &str) {
        self.store.update(|s| s.delete_document(id));
    }

    pub fn update_document_content(&self, content: String) {
        self.store.update(|s| s.update_document_content(content));
    }

    /// Start a save in the background. The store is only borrowed before and
    /// after the backend call, so edits keep flowing while it runs.
    pub fn save_document(&self) {
        let Some(pending) = self.store.try_update(|s| s.begin_save()).flatten() else {
            return;
        };

        let store = self.store;
        let backend = self.backend();
        spawn_local(async move {
            let result = backend.save_document(&pending.document).await;
            let _ = store.try_update(|s| s.finish_save(pending, result));
        });
    }

    pub fn toggle_sidebar(&self) {
        self.store.update(|s| s.toggle_sidebar());
    }

    pub fn toggle_ai_sidebar(&self) {
        self.store.update(|s| s.toggle_ai_sidebar());
    }

    pub fn set_search_query(&self, query: String) {
        self.store.update(|s| s.set_search_query(query));
    }

    pub fn set_view_mode(&self, mode: ViewMode) {
        self.store.update(|s| s.set_view_mode(mode));
    }

    pub fn clear_error(&self) {
        self.store.update(|s| s.clear_error());
    }
}
