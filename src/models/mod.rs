use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{AsRefStr, Display, EnumIter, EnumString};

pub const DEFAULT_TITLE: &str = "Untitled";

fn default_title() -> String {
    DEFAULT_TITLE.to_string()
}

/// A persisted, editable document.
///
/// Field names follow the camelCase layout stored under the `documents` key.
/// Missing optional fields take their defaults; a stored entry that still
/// does not fit is skipped on load.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    pub id: String,

    #[serde(default = "default_title")]
    pub title: String,

    /// Plain text or an HTML fragment, depending on which view wrote it.
    #[serde(default)]
    pub content: String,

    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,

    #[serde(default)]
    pub is_favorite: bool,
    #[serde(default)]
    pub is_archived: bool,
}

impl Document {
    pub fn matches_query(&self, query_lower: &str) -> bool {
        query_lower.is_empty()
            || self.title.to_lowercase().contains(query_lower)
            || self.content.to_lowercase().contains(query_lower)
    }
}

/// Caller-supplied fields for a new document. Anything left `None` falls back
/// to the document defaults.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct DocumentDraft {
    /// Honoured only when non-blank and not already taken.
    pub id: Option<String>,
    pub title: Option<String>,
    pub content: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_archived: Option<bool>,
}

impl DocumentDraft {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            title: Some(title.into()),
            ..Default::default()
        }
    }
}

/// Partial update merged into the document with the same `id`.
///
/// Content is not patchable: edits go through the content update so the
/// unsaved flag is set.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DocumentPatch {
    pub id: String,
    pub title: Option<String>,
    pub is_favorite: Option<bool>,
    pub is_archived: Option<bool>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl DocumentPatch {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: None,
            is_favorite: None,
            is_archived: None,
            updated_at: None,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn favorite(mut self, value: bool) -> Self {
        self.is_favorite = Some(value);
        self
    }

    pub fn archived(mut self, value: bool) -> Self {
        self.is_archived = Some(value);
        self
    }

    pub fn updated_at(mut self, at: DateTime<Utc>) -> Self {
        self.updated_at = Some(at);
        self
    }

    pub(crate) fn apply_to(&self, doc: &mut Document) {
        if let Some(title) = &self.title {
            doc.title = title.clone();
        }
        if let Some(v) = self.is_favorite {
            doc.is_favorite = v;
        }
        if let Some(v) = self.is_archived {
            doc.is_archived = v;
        }
        if let Some(at) = self.updated_at {
            doc.updated_at = at;
        }
    }
}

#[derive(
    Serialize,
    Deserialize,
    Clone,
    Copy,
    Debug,
    Default,
    PartialEq,
    Eq,
    Display,
    AsRefStr,
    EnumString,
    EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase", ascii_case_insensitive)]
pub enum ViewMode {
    #[default]
    Edit,
    Preview,
    Focus,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ChatRole {
    User,
    Assistant,
}

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct ChatMessage {
    pub id: u64,
    pub role: ChatRole,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}
