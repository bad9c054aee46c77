use crate::config::EnvConfig;
use crate::models::Document;
use crate::util::sleep;
use std::future::Future;
use std::time::Duration;

pub(crate) const PLACEHOLDER_REPLY: &str = "I understand you'd like help with that. This is a placeholder response - in a real implementation, this would connect to an AI service to provide intelligent assistance with your document.";

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ApiErrorKind {
    Network,
    Unavailable,
}

#[derive(Clone, Debug)]
pub struct ApiError {
    pub kind: ApiErrorKind,
    pub message: String,
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl std::error::Error for ApiError {}

impl ApiError {
    pub fn new(kind: ApiErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Remote collaborator of the editor: document saves and assistant replies.
pub trait Backend {
    fn save_document(&self, document: &Document) -> impl Future<Output = ApiResult<()>>;
    fn assistant_reply(&self, prompt: &str) -> impl Future<Output = ApiResult<String>>;
}

/// Stand-in backend: waits a fixed delay, then succeeds.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LocalBackend {
    pub save_delay: Duration,
    pub reply_delay: Duration,
}

impl LocalBackend {
    pub fn new(config: &EnvConfig) -> Self {
        Self {
            save_delay: config.save_delay(),
            reply_delay: config.reply_delay(),
        }
    }

    /// No delays; completes on first poll.
    pub fn immediate() -> Self {
        Self {
            save_delay: Duration::ZERO,
            reply_delay: Duration::ZERO,
        }
    }
}

impl Backend for LocalBackend {
    async fn save_document(&self, _document: &Document) -> ApiResult<()> {
        sleep(self.save_delay).await;
        Ok(())
    }

    async fn assistant_reply(&self, _prompt: &str) -> ApiResult<String> {
        sleep(self.reply_delay).await;
        Ok(PLACEHOLDER_REPLY.to_string())
    }
}
