mod context;
mod store;

pub use context::DocumentContext;
pub use store::{DocumentStore, PendingSave, SAVE_FAILED_MESSAGE};

use crate::models::{Document, DocumentPatch, ViewMode};
use crate::storage::{upsert_lru, RECENT_LIMIT};
use chrono::{DateTime, Utc};

/// Everything the editor shell renders from.
///
/// Documents live in one ordered list (newest first); the active document is
/// an id into that list, never a copy of it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EditorState {
    pub documents: Vec<Document>,
    pub active_id: Option<String>,

    /// Most-recent-first, unique, at most `RECENT_LIMIT` ids.
    pub recent_ids: Vec<String>,

    pub loading: bool,
    pub error: Option<String>,
    pub unsaved_changes: bool,

    pub sidebar_open: bool,
    pub ai_sidebar_open: bool,
    pub search_query: String,
    pub view_mode: ViewMode,
}

impl Default for EditorState {
    fn default() -> Self {
        Self {
            documents: vec![],
            active_id: None,
            recent_ids: vec![],
            loading: false,
            error: None,
            unsaved_changes: false,
            sidebar_open: true,
            ai_sidebar_open: false,
            search_query: String::new(),
            view_mode: ViewMode::Edit,
        }
    }
}

impl EditorState {
    pub fn document(&self, id: &str) -> Option<&Document> {
        self.documents.iter().find(|d| d.id == id)
    }

    pub fn active_document(&self) -> Option<&Document> {
        self.active_id.as_deref().and_then(|id| self.document(id))
    }
}

/// The closed set of state transitions. Ids and timestamps are resolved by
/// the caller so `reduce` stays deterministic.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Action {
    SetDocuments(Vec<Document>),
    SetActiveDocument(Option<String>),
    UpdateDocument(DocumentPatch),
    CreateDocument(Document),
    DeleteDocument(String),
    UpdateDocumentContent {
        content: String,
        updated_at: DateTime<Utc>,
    },
    SetLoading(bool),
    SetError(Option<String>),
    SetSidebarOpen(bool),
    SetAiSidebarOpen(bool),
    SetUnsavedChanges(bool),
    AddRecentDocument(String),
    RestoreRecentDocuments(Vec<String>),
    SetSearchQuery(String),
    SetViewMode(ViewMode),
}

pub fn reduce(state: &EditorState, action: Action) -> EditorState {
    let mut next = state.clone();

    match action {
        Action::SetDocuments(documents) => {
            next.documents = documents;
            next.loading = false;
            next.error = None;
        }

        Action::SetActiveDocument(id) => {
            if let Some(id) = &id {
                if state.document(id).is_none() {
                    return next;
                }
            }
            next.active_id = id;
            next.unsaved_changes = false;
            next.error = None;
        }

        Action::UpdateDocument(patch) => {
            let Some(doc) = next.documents.iter_mut().find(|d| d.id == patch.id) else {
                return next;
            };
            patch.apply_to(doc);
            next.unsaved_changes = false;
        }

        Action::CreateDocument(doc) => {
            next.active_id = Some(doc.id.clone());
            next.documents.insert(0, doc);
            next.unsaved_changes = false;
        }

        Action::DeleteDocument(id) => {
            next.documents.retain(|d| d.id != id);
            next.recent_ids.retain(|r| *r != id);
            if next.active_id.as_deref() == Some(id.as_str()) {
                next.active_id = None;
            }
        }

        Action::UpdateDocumentContent {
            content,
            updated_at,
        } => {
            let Some(active_id) = next.active_id.clone() else {
                return next;
            };
            let Some(doc) = next.documents.iter_mut().find(|d| d.id == active_id) else {
                return next;
            };
            doc.content = content;
            doc.updated_at = updated_at;
            next.unsaved_changes = true;
        }

        Action::SetLoading(v) => next.loading = v,

        Action::SetError(e) => {
            next.error = e;
            next.loading = false;
        }

        Action::SetSidebarOpen(v) => next.sidebar_open = v,
        Action::SetAiSidebarOpen(v) => next.ai_sidebar_open = v,
        Action::SetUnsavedChanges(v) => next.unsaved_changes = v,

        Action::AddRecentDocument(id) => {
            next.recent_ids = upsert_lru(&state.recent_ids, id, RECENT_LIMIT);
        }

        Action::RestoreRecentDocuments(ids) => {
            let mut restored: Vec<String> = Vec::with_capacity(RECENT_LIMIT);
            for id in ids {
                if restored.len() == RECENT_LIMIT {
                    break;
                }
                if !id.trim().is_empty() && !restored.contains(&id) {
                    restored.push(id);
                }
            }
            next.recent_ids = restored;
        }

        Action::SetSearchQuery(q) => next.search_query = q,
        Action::SetViewMode(mode) => next.view_mode = mode,
    }

    next
}
