use crate::models::{ChatMessage, ChatRole};
use chrono::{DateTime, Utc};
use strum::{AsRefStr, Display, EnumIter};

pub(crate) const GREETING: &str = "Hello! I'm your AI writing assistant. I can help you improve your document, generate content, fix grammar, and much more. What would you like me to help you with?";

#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, AsRefStr, EnumIter)]
#[strum(serialize_all = "lowercase")]
pub enum QuickAction {
    Improve,
    Code,
    Ideas,
    Summarize,
}

impl QuickAction {
    pub fn label(self) -> &'static str {
        match self {
            QuickAction::Improve => "Improve writing",
            QuickAction::Code => "Add code example",
            QuickAction::Ideas => "Generate ideas",
            QuickAction::Summarize => "Summarize",
        }
    }

    /// Text placed in the input box; the user still has to send it.
    pub fn prompt(self) -> &'static str {
        match self {
            QuickAction::Improve => "Please improve the writing in my current selection",
            QuickAction::Code => "Add a relevant code example to illustrate this concept",
            QuickAction::Ideas => "Generate some ideas to expand on this topic",
            QuickAction::Summarize => "Summarize the main points in this document",
        }
    }
}

/// Chat history of the assistant panel. Lives only as long as the page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AssistantSession {
    messages: Vec<ChatMessage>,
    pending_replies: usize,
    next_id: u64,
}

impl AssistantSession {
    pub fn new(now: DateTime<Utc>) -> Self {
        let mut s = Self {
            messages: vec![],
            pending_replies: 0,
            next_id: 1,
        };
        s.push(ChatRole::Assistant, GREETING.to_string(), now);
        s
    }

    fn push(&mut self, role: ChatRole, content: String, now: DateTime<Utc>) {
        self.messages.push(ChatMessage {
            id: self.next_id,
            role,
            content,
            timestamp: now,
        });
        self.next_id += 1;
    }

    pub fn messages(&self) -> &[ChatMessage] {
        &self.messages
    }

    /// True while at least one reply is outstanding.
    pub fn is_typing(&self) -> bool {
        self.pending_replies > 0
    }

    /// Record a user message. Returns the prompt to send, or `None` for
    /// blank input.
    pub fn submit(&mut self, input: &str, now: DateTime<Utc>) -> Option<String> {
        if input.trim().is_empty() {
            return None;
        }
        self.push(ChatRole::User, input.to_string(), now);
        self.pending_replies += 1;
        Some(input.to_string())
    }

    pub fn receive_reply(&mut self, content: String, now: DateTime<Utc>) {
        self.push(ChatRole::Assistant, content, now);
        self.pending_replies = self.pending_replies.saturating_sub(1);
    }

    /// A reply that never arrived; stops the typing indicator for it.
    pub fn abandon_reply(&mut self) {
        self.pending_replies = self.pending_replies.saturating_sub(1);
    }
}
