use super::{reduce, Action, EditorState};
use crate::api::{ApiResult, Backend};
use crate::config::EnvConfig;
use crate::models::{Document, DocumentDraft, DocumentPatch, ViewMode, DEFAULT_TITLE};
use crate::storage::{load_json, save_json, KeyValueStorage};
use crate::util::{next_document_id, Clock, SystemClock};
use leptos::logging::{error, warn};
use std::collections::HashSet;

pub const SAVE_FAILED_MESSAGE: &str = "Failed to save document";

/// A save that has been started but not yet acknowledged by the backend.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PendingSave {
    pub document: Document,
}

/// Owner of the editor state.
///
/// The action methods are the only mutators. Each one is applied through
/// [`reduce`]; afterwards the document list and the recent list are written
/// to storage if they changed. Writes are best-effort: a failed write is
/// logged and the in-memory change stands.
#[derive(Debug)]
pub struct DocumentStore<S, C = SystemClock> {
    state: EditorState,
    storage: S,
    clock: C,
    documents_key: String,
    recent_key: String,
}

impl<S: KeyValueStorage, C: Clock> DocumentStore<S, C> {
    /// Build the store and hydrate it from `storage`. Missing or malformed
    /// values start out empty.
    pub fn open(storage: S, clock: C, config: &EnvConfig) -> Self {
        let mut store = Self {
            state: EditorState::default(),
            storage,
            clock,
            documents_key: config.documents_key.clone(),
            recent_key: config.recent_documents_key.clone(),
        };
        store.hydrate();
        store
    }

    fn hydrate(&mut self) {
        let entries: Vec<serde_json::Value> =
            load_json(&self.storage, &self.documents_key).unwrap_or_default();
        let stored: Vec<Document> = entries
            .into_iter()
            .filter_map(|entry| match serde_json::from_value::<Document>(entry) {
                Ok(doc) => Some(doc),
                Err(e) => {
                    warn!("skipping unreadable stored document: {e}");
                    None
                }
            })
            .collect();
        let recent: Vec<String> = load_json(&self.storage, &self.recent_key).unwrap_or_default();

        let mut seen = HashSet::new();
        let before = stored.len();
        let documents: Vec<Document> = stored
            .into_iter()
            .filter(|d| seen.insert(d.id.clone()))
            .collect();
        if documents.len() != before {
            warn!(
                "dropped {} stored documents with duplicate ids",
                before - documents.len()
            );
        }

        // Hydration mirrors what is already stored; no write-back.
        self.state = reduce(&self.state, Action::SetDocuments(documents));
        self.state = reduce(&self.state, Action::RestoreRecentDocuments(recent));
    }

    pub fn dispatch(&mut self, action: Action) {
        let next = reduce(&self.state, action);
        let documents_changed = next.documents != self.state.documents;
        let recent_changed = next.recent_ids != self.state.recent_ids;
        self.state = next;

        if documents_changed {
            self.persist_documents();
        }
        if recent_changed {
            self.persist_recent();
        }
    }

    fn persist_documents(&self) {
        if let Err(e) = save_json(&self.storage, &self.documents_key, &self.state.documents) {
            warn!("failed to persist documents: {e}");
        }
    }

    fn persist_recent(&self) {
        if let Err(e) = save_json(&self.storage, &self.recent_key, &self.state.recent_ids) {
            warn!("failed to persist recent documents: {e}");
        }
    }

    /// Write both persisted values regardless of whether they changed.
    pub fn flush(&self) {
        self.persist_documents();
        self.persist_recent();
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    // ---- actions ----

    pub fn set_documents(&mut self, documents: Vec<Document>) {
        self.dispatch(Action::SetDocuments(documents));
    }

    pub fn set_active_document(&mut self, id: Option<&str>) {
        let Some(id) = id else {
            self.dispatch(Action::SetActiveDocument(None));
            return;
        };

        if self.state.document(id).is_none() {
            warn!("ignoring selection of unknown document {id}");
            return;
        }

        self.dispatch(Action::SetActiveDocument(Some(id.to_string())));
        self.dispatch(Action::AddRecentDocument(id.to_string()));
    }

    pub fn update_document(&mut self, patch: DocumentPatch) {
        self.dispatch(Action::UpdateDocument(patch));
    }

    /// Create, prepend and activate a document. Returns its id.
    pub fn create_document(&mut self, draft: DocumentDraft) -> String {
        let now = self.clock.now();

        let requested = draft.id.filter(|id| !id.trim().is_empty());
        let id = match requested {
            Some(id) if self.state.document(&id).is_none() => id,
            other => {
                if let Some(taken) = other {
                    warn!("document id {taken} already exists; assigning a new one");
                }
                next_document_id(now, |id| self.state.document(id).is_some())
            }
        };

        let doc = Document {
            id: id.clone(),
            title: draft.title.unwrap_or_else(|| DEFAULT_TITLE.to_string()),
            content: draft.content.unwrap_or_default(),
            created_at: now,
            updated_at: now,
            is_favorite: draft.is_favorite.unwrap_or(false),
            is_archived: draft.is_archived.unwrap_or(false),
        };

        self.dispatch(Action::CreateDocument(doc));
        id
    }

    pub fn delete_document(&mut self, id: &str) {
        self.dispatch(Action::DeleteDocument(id.to_string()));
    }

    /// Replace the active document's content. Without an active document
    /// this does nothing.
    pub fn update_document_content(&mut self, content: impl Into<String>) {
        if self.state.active_id.is_none() {
            return;
        }
        let updated_at = self.clock.now();
        self.dispatch(Action::UpdateDocumentContent {
            content: content.into(),
            updated_at,
        });
    }

    /// First half of a save: snapshot the active document and mark loading.
    /// `None` when there is nothing to save.
    pub fn begin_save(&mut self) -> Option<PendingSave> {
        if !self.state.unsaved_changes {
            return None;
        }
        let document = self.state.active_document()?.clone();
        self.dispatch(Action::SetLoading(true));
        Some(PendingSave { document })
    }

    /// Second half of a save.
    ///
    /// On success the saved document's `updated_at` is refreshed. The unsaved
    /// flag is cleared only if the saved document is still active with the
    /// same content; edits made while the save was in flight stay unsaved.
    pub fn finish_save(&mut self, pending: PendingSave, result: ApiResult<()>) {
        match result {
            Ok(()) => {
                let still_current = self
                    .state
                    .active_document()
                    .is_some_and(|d| d.id == pending.document.id && d.content == pending.document.content);
                let keep_unsaved = self.state.unsaved_changes && !still_current;

                let now = self.clock.now();
                self.dispatch(Action::UpdateDocument(
                    DocumentPatch::new(pending.document.id.clone()).updated_at(now),
                ));
                self.dispatch(Action::SetUnsavedChanges(keep_unsaved));
            }
            Err(e) => {
                error!("failed to save document {}: {e}", pending.document.id);
                self.dispatch(Action::SetError(Some(SAVE_FAILED_MESSAGE.to_string())));
            }
        }
        self.dispatch(Action::SetLoading(false));
    }

    pub async fn save_document<B: Backend>(&mut self, backend: &B) {
        let Some(pending) = self.begin_save() else {
            return;
        };
        let result = backend.save_document(&pending.document).await;
        self.finish_save(pending, result);
    }

    pub fn toggle_sidebar(&mut self) {
        let open = !self.state.sidebar_open;
        self.dispatch(Action::SetSidebarOpen(open));
    }

    pub fn toggle_ai_sidebar(&mut self) {
        let open = !self.state.ai_sidebar_open;
        self.dispatch(Action::SetAiSidebarOpen(open));
    }

    pub fn set_search_query(&mut self, query: impl Into<String>) {
        self.dispatch(Action::SetSearchQuery(query.into()));
    }

    pub fn set_view_mode(&mut self, mode: ViewMode) {
        self.dispatch(Action::SetViewMode(mode));
    }

    pub fn clear_error(&mut self) {
        self.dispatch(Action::SetError(None));
    }

    // ---- derived ----

    pub fn documents(&self) -> &[Document] {
        &self.state.documents
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.state.active_document()
    }

    pub fn has_unsaved_changes(&self) -> bool {
        self.state.unsaved_changes
    }

    /// Documents whose title or content contains the search query,
    /// ignoring case.
    pub fn filtered_documents(&self) -> Vec<&Document> {
        let q = self.state.search_query.to_lowercase();
        self.state
            .documents
            .iter()
            .filter(|d| d.matches_query(&q))
            .collect()
    }

    /// The recent ids resolved to documents; ids that no longer resolve are
    /// skipped.
    pub fn recent_documents(&self) -> Vec<&Document> {
        self.state
            .recent_ids
            .iter()
            .filter_map(|id| self.state.document(id))
            .collect()
    }

    /// Non-archived documents, last edited first.
    pub fn recently_edited(&self, limit: usize) -> Vec<&Document> {
        let mut docs: Vec<&Document> = self
            .state
            .documents
            .iter()
            .filter(|d| !d.is_archived)
            .collect();
        docs.sort_by(|a, b| b.updated_at.cmp(&a.updated_at));
        docs.truncate(limit);
        docs
    }

    pub fn favorite_documents(&self) -> Vec<&Document> {
        self.state
            .documents
            .iter()
            .filter(|d| d.is_favorite && !d.is_archived)
            .collect()
    }

    pub fn archived_documents(&self) -> Vec<&Document> {
        self.state.documents.iter().filter(|d| d.is_archived).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiErrorKind, LocalBackend};
    use crate::storage::{MemoryStorage, RECENT_LIMIT};
    use chrono::{DateTime, TimeZone, Utc};
    use futures::executor::block_on;
    use std::future::Future;
    use std::sync::atomic::{AtomicI64, Ordering};

    /// Starts at a fixed instant and moves one second forward per reading.
    struct TickingClock(AtomicI64);

    impl TickingClock {
        fn new() -> Self {
            Self(AtomicI64::new(1_718_000_000_000))
        }
    }

    impl Clock for TickingClock {
        fn now(&self) -> DateTime<Utc> {
            let ms = self.0.fetch_add(1_000, Ordering::SeqCst);
            Utc.timestamp_millis_opt(ms).unwrap()
        }
    }

    /// Always reads the same instant, to force id collisions.
    struct FrozenClock;

    impl Clock for FrozenClock {
        fn now(&self) -> DateTime<Utc> {
            Utc.timestamp_millis_opt(1_000).unwrap()
        }
    }

    struct FailingBackend;

    impl Backend for FailingBackend {
        async fn save_document(&self, _document: &Document) -> ApiResult<()> {
            Err(ApiError::new(ApiErrorKind::Network, "connection refused"))
        }

        fn assistant_reply(&self, _prompt: &str) -> impl Future<Output = ApiResult<String>> {
            std::future::ready(Err(ApiError::new(ApiErrorKind::Unavailable, "no assistant")))
        }
    }

    fn open(storage: &MemoryStorage) -> DocumentStore<MemoryStorage, TickingClock> {
        DocumentStore::open(storage.clone(), TickingClock::new(), &EnvConfig::default())
    }

    #[test]
    fn test_open_empty_storage() {
        let store = open(&MemoryStorage::new());
        assert!(store.documents().is_empty());
        assert!(store.active_document().is_none());
        assert!(store.recent_documents().is_empty());
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_open_malformed_storage_reads_as_empty() {
        let storage = MemoryStorage::new();
        storage.set_item("documents", "[{broken").expect("memory write");
        storage.set_item("recentDocuments", "42").expect("memory write");
        let store = open(&storage);
        assert!(store.documents().is_empty());
        assert!(store.state().recent_ids.is_empty());
    }

    #[test]
    fn test_create_yields_unique_active_prepended() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        let b = store.create_document(DocumentDraft::titled("Second"));
        assert_ne!(a, b);
        assert_eq!(store.documents().len(), 2);
        assert_eq!(store.documents()[0].id, b);
        assert_eq!(store.active_document().map(|d| d.id.as_str()), Some(b.as_str()));

        let first = store.state().document(&a).expect("first document");
        assert_eq!(first.title, "Untitled");
        assert_eq!(first.content, "");
        assert!(!first.is_favorite && !first.is_archived);
        assert_eq!(first.created_at, first.updated_at);
    }

    #[test]
    fn test_create_in_same_millisecond_still_unique() {
        let mut store =
            DocumentStore::open(MemoryStorage::new(), FrozenClock, &EnvConfig::default());
        let ids: Vec<String> = (0..4)
            .map(|_| store.create_document(DocumentDraft::default()))
            .collect();
        let unique: HashSet<&String> = ids.iter().collect();
        assert_eq!(unique.len(), 4);
        assert_eq!(ids[0], "1000");
        assert_eq!(ids[1], "1001");
    }

    #[test]
    fn test_create_with_colliding_caller_id_gets_fresh_id() {
        let mut store = open(&MemoryStorage::new());
        let requested = DocumentDraft {
            id: Some("fixed".to_string()),
            ..Default::default()
        };
        let first = store.create_document(requested.clone());
        assert_eq!(first, "fixed");
        let second = store.create_document(requested);
        assert_ne!(second, "fixed");
        assert_eq!(store.documents().len(), 2);
    }

    #[test]
    fn test_delete_active_clears_active() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        store.delete_document(&a);
        assert!(store.active_document().is_none());
        assert!(store.documents().is_empty());
    }

    #[test]
    fn test_delete_other_keeps_active() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        let b = store.create_document(DocumentDraft::default());
        store.delete_document(&a);
        assert_eq!(store.active_document().map(|d| d.id.clone()), Some(b));
        assert_eq!(store.documents().len(), 1);
    }

    #[test]
    fn test_content_update_keeps_active_and_list_identical() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        let created = store.active_document().cloned().expect("active");
        store.update_document_content("Hello world");

        let active = store.active_document().expect("active");
        let listed = store.state().document(&a).expect("listed");
        assert_eq!(active.content, listed.content);
        assert_eq!(active.updated_at, listed.updated_at);
        assert!(listed.updated_at > created.updated_at);
        assert!(store.has_unsaved_changes());
    }

    #[test]
    fn test_content_update_without_active_is_noop() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.create_document(DocumentDraft::default());
        store.set_active_document(None);
        let before = store.state().clone();
        store.update_document_content("ignored");
        assert_eq!(store.state(), &before);
    }

    #[test]
    fn test_recent_list_bounded_and_unique() {
        let mut store = open(&MemoryStorage::new());
        let ids: Vec<String> = (0..7)
            .map(|_| store.create_document(DocumentDraft::default()))
            .collect();
        for id in &ids {
            store.set_active_document(Some(id.as_str()));
        }
        assert_eq!(store.state().recent_ids.len(), RECENT_LIMIT);

        // Re-selecting an id already in the list moves it without growing it.
        store.set_active_document(Some(ids[4].as_str()));
        let recent = &store.state().recent_ids;
        assert_eq!(recent.len(), RECENT_LIMIT);
        assert_eq!(recent[0], ids[4]);
        let unique: HashSet<&String> = recent.iter().collect();
        assert_eq!(unique.len(), recent.len());
    }

    #[test]
    fn test_six_selections_keep_last_five() {
        let mut store = open(&MemoryStorage::new());
        let ids: Vec<String> = (0..6)
            .map(|_| store.create_document(DocumentDraft::default()))
            .collect();
        for id in &ids {
            store.set_active_document(Some(id.as_str()));
        }
        let expected: Vec<String> = ids.iter().rev().take(5).cloned().collect();
        assert_eq!(store.state().recent_ids, expected);
        let resolved: Vec<&str> = store
            .recent_documents()
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(resolved, expected);
    }

    #[test]
    fn test_select_unknown_id_is_ignored() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        store.set_active_document(Some("missing"));
        assert_eq!(store.active_document().map(|d| d.id.clone()), Some(a));
        assert!(store.state().recent_ids.is_empty());
    }

    #[test]
    fn test_select_clears_unsaved_flag() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        store.update_document_content("draft");
        assert!(store.has_unsaved_changes());
        store.set_active_document(Some(a.as_str()));
        assert!(!store.has_unsaved_changes());
    }

    #[test]
    fn test_recent_resolution_skips_deleted() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        let b = store.create_document(DocumentDraft::default());
        store.set_active_document(Some(a.as_str()));
        store.set_active_document(Some(b.as_str()));

        // Simulate a stale id that survived in the recent list.
        let remaining: Vec<Document> =
            store.documents().iter().filter(|d| d.id != a).cloned().collect();
        store.set_documents(remaining);
        assert_eq!(store.state().recent_ids.len(), 2);
        let resolved: Vec<&str> = store
            .recent_documents()
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(resolved, vec![b.as_str()]);
    }

    #[test]
    fn test_persist_and_reopen_round_trip() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        let a = store.create_document(DocumentDraft::titled("Alpha"));
        store.update_document_content("first body");
        let b = store.create_document(DocumentDraft::titled("Beta"));
        store.update_document(DocumentPatch::new(b.clone()).favorite(true));
        store.set_active_document(Some(a.as_str()));

        let reopened = open(&storage);
        let key = |d: &Document| (d.id.clone(), d.title.clone(), d.content.clone());
        let before: Vec<_> = store.documents().iter().map(key).collect();
        let after: Vec<_> = reopened.documents().iter().map(key).collect();
        assert_eq!(before, after);
        assert_eq!(reopened.documents(), store.documents());
        assert_eq!(reopened.state().recent_ids, vec![a]);

        // Nothing is active after a reload.
        assert!(reopened.active_document().is_none());
    }

    #[test]
    fn test_deleting_last_document_persists_empty_list() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        let a = store.create_document(DocumentDraft::default());
        store.delete_document(&a);
        assert_eq!(storage.raw("documents").as_deref(), Some("[]"));
        assert!(open(&storage).documents().is_empty());
    }

    #[test]
    fn test_ui_only_actions_do_not_write() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.toggle_sidebar();
        store.set_search_query("x");
        assert!(storage.raw("documents").is_none());
        assert!(storage.raw("recentDocuments").is_none());
    }

    #[test]
    fn test_failed_writes_keep_in_memory_change() {
        let storage = MemoryStorage::new();
        storage.set_fail_writes(true);
        let mut store = open(&storage);
        let a = store.create_document(DocumentDraft::default());
        assert_eq!(store.documents().len(), 1);
        assert!(storage.raw("documents").is_none());

        // The next successful change writes the whole list.
        storage.set_fail_writes(false);
        store.update_document(DocumentPatch::new(a).title("Kept"));
        let reopened = open(&storage);
        assert_eq!(reopened.documents()[0].title, "Kept");
    }

    #[test]
    fn test_flush_writes_both_values() {
        let storage = MemoryStorage::new();
        let mut store = open(&storage);
        store.create_document(DocumentDraft::default());
        storage.remove_item("documents").expect("memory remove");
        store.flush();
        assert!(storage.raw("documents").is_some());
        assert_eq!(storage.raw("recentDocuments").as_deref(), Some("[]"));
    }

    #[test]
    fn test_custom_storage_keys() {
        let storage = MemoryStorage::new();
        let config = EnvConfig {
            documents_key: "inkpad_documents".to_string(),
            ..Default::default()
        };
        let mut store = DocumentStore::open(storage.clone(), TickingClock::new(), &config);
        store.create_document(DocumentDraft::default());
        assert!(storage.raw("inkpad_documents").is_some());
        assert!(storage.raw("documents").is_none());
    }

    #[test]
    fn test_unreadable_entry_does_not_drop_the_list() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                "documents",
                r#"[
                    {"id":"1","title":"Keep me","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"},
                    {"id":"2","title":null,"createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"},
                    "not a document"
                ]"#,
            )
            .expect("memory write");

        let mut store = open(&storage);
        assert_eq!(store.documents().len(), 1);
        assert_eq!(store.documents()[0].title, "Keep me");

        store.create_document(DocumentDraft::default());
        let reopened = open(&storage);
        assert_eq!(reopened.documents().len(), 2);
        assert!(reopened.state().document("1").is_some());
    }

    #[test]
    fn test_duplicate_stored_ids_are_dropped() {
        let storage = MemoryStorage::new();
        storage
            .set_item(
                "documents",
                r#"[
                    {"id":"1","title":"A","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"},
                    {"id":"1","title":"B","createdAt":"2024-01-01T00:00:00Z","updatedAt":"2024-01-01T00:00:00Z"}
                ]"#,
            )
            .expect("memory write");
        let store = open(&storage);
        assert_eq!(store.documents().len(), 1);
        assert_eq!(store.documents()[0].title, "A");
    }

    #[test]
    fn test_search_and_save_scenario() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::default());
        store.update_document_content("Hello world");
        assert!(store.has_unsaved_changes());

        store.set_search_query("hello");
        let hits: Vec<&str> = store
            .filtered_documents()
            .iter()
            .map(|d| d.id.as_str())
            .collect();
        assert_eq!(hits, vec![a.as_str()]);

        store.set_search_query("goodbye");
        assert!(store.filtered_documents().is_empty());

        let before = store.active_document().map(|d| d.updated_at).expect("active");
        block_on(store.save_document(&LocalBackend::immediate()));
        assert!(!store.has_unsaved_changes());
        assert!(!store.state().loading);
        let after = store.active_document().map(|d| d.updated_at).expect("active");
        assert!(after > before);
    }

    #[test]
    fn test_search_matches_title_and_ignores_case() {
        let mut store = open(&MemoryStorage::new());
        store.create_document(DocumentDraft::titled("Project PLAN"));
        store.create_document(DocumentDraft::titled("Groceries"));
        store.set_search_query("plan");
        assert_eq!(store.filtered_documents().len(), 1);
        store.set_search_query("");
        assert_eq!(store.filtered_documents().len(), 2);
    }

    #[test]
    fn test_save_without_changes_is_noop() {
        let mut store = open(&MemoryStorage::new());
        assert!(store.begin_save().is_none());
        store.create_document(DocumentDraft::default());
        assert!(store.begin_save().is_none());
        assert!(!store.state().loading);
    }

    #[test]
    fn test_save_failure_sets_error() {
        let mut store = open(&MemoryStorage::new());
        store.create_document(DocumentDraft::default());
        store.update_document_content("text");
        block_on(store.save_document(&FailingBackend));
        assert_eq!(store.state().error.as_deref(), Some(SAVE_FAILED_MESSAGE));
        assert!(store.has_unsaved_changes());
        assert!(!store.state().loading);

        store.clear_error();
        assert!(store.state().error.is_none());
    }

    #[test]
    fn test_edits_during_save_stay_unsaved() {
        let mut store = open(&MemoryStorage::new());
        store.create_document(DocumentDraft::default());
        store.update_document_content("v1");

        let pending = store.begin_save().expect("save should start");
        assert!(store.state().loading);
        store.update_document_content("v2");
        store.finish_save(pending, Ok(()));

        assert!(store.has_unsaved_changes());
        assert_eq!(store.active_document().map(|d| d.content.as_str()), Some("v2"));
    }

    #[test]
    fn test_overlapping_saves_both_complete() {
        let mut store = open(&MemoryStorage::new());
        store.create_document(DocumentDraft::default());
        store.update_document_content("v1");
        let first = store.begin_save().expect("first save");
        let second = store.begin_save().expect("second save");
        store.finish_save(first, Ok(()));
        store.finish_save(second, Ok(()));
        assert!(!store.has_unsaved_changes());
        assert!(!store.state().loading);
    }

    #[test]
    fn test_sidebar_sections() {
        let mut store = open(&MemoryStorage::new());
        let a = store.create_document(DocumentDraft::titled("A"));
        let b = store.create_document(DocumentDraft::titled("B"));
        let c = store.create_document(DocumentDraft::titled("C"));
        store.update_document(DocumentPatch::new(a.clone()).favorite(true));
        store.update_document(DocumentPatch::new(b.clone()).favorite(true).archived(true));
        store.set_active_document(Some(a.as_str()));
        store.update_document_content("touched last");

        let ids = |docs: Vec<&Document>| docs.iter().map(|d| d.id.clone()).collect::<Vec<_>>();
        assert_eq!(ids(store.recently_edited(5)), vec![a.clone(), c.clone()]);
        assert_eq!(ids(store.recently_edited(1)), vec![a.clone()]);
        assert_eq!(ids(store.favorite_documents()), vec![a]);
        assert_eq!(ids(store.archived_documents()), vec![b]);
    }

    #[test]
    fn test_toggles_and_view_mode() {
        let mut store = open(&MemoryStorage::new());
        store.toggle_sidebar();
        store.toggle_ai_sidebar();
        store.set_view_mode(ViewMode::Preview);
        assert!(!store.state().sidebar_open);
        assert!(store.state().ai_sidebar_open);
        assert_eq!(store.state().view_mode, ViewMode::Preview);
        store.toggle_sidebar();
        assert!(store.state().sidebar_open);
    }
}
