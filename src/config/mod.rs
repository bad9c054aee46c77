use crate::storage::{DOCUMENTS_KEY, RECENT_DOCUMENTS_KEY};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const DEFAULT_SAVE_DELAY_MS: u64 = 500;
const DEFAULT_REPLY_DELAY_MS: u64 = 1500;

#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct EnvConfig {
    pub documents_key: String,
    pub recent_documents_key: String,
    pub save_delay_ms: u64,
    pub reply_delay_ms: u64,
}

impl Default for EnvConfig {
    fn default() -> Self {
        Self {
            documents_key: DOCUMENTS_KEY.to_string(),
            recent_documents_key: RECENT_DOCUMENTS_KEY.to_string(),
            save_delay_ms: DEFAULT_SAVE_DELAY_MS,
            reply_delay_ms: DEFAULT_REPLY_DELAY_MS,
        }
    }
}

impl EnvConfig {
    /// Defaults overridden by `window.ENV`, when the page defines it.
    ///
    /// Each key is looked up in README style (`SAVE_DELAY_MS`) first and in
    /// lowercase (`save_delay_ms`) second.
    pub fn from_window() -> Self {
        let Some(env) = web_sys::window()
            .and_then(|w| w.get("ENV"))
            .filter(|env| !env.is_undefined() && env.is_object())
        else {
            return Self::default();
        };

        let lookup = |key: &str| {
            js_sys::Reflect::get(&env, &key.into())
                .ok()
                .and_then(|v| v.as_string().or_else(|| v.as_f64().map(|n| n.to_string())))
        };

        Self::default().with_overrides(|key| lookup(key).or_else(|| lookup(&key.to_lowercase())))
    }

    pub fn with_overrides(mut self, lookup: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(v) = lookup("DOCUMENTS_KEY").filter(|v| !v.trim().is_empty()) {
            self.documents_key = v;
        }
        if let Some(v) = lookup("RECENT_DOCUMENTS_KEY").filter(|v| !v.trim().is_empty()) {
            self.recent_documents_key = v;
        }
        if let Some(ms) = lookup("SAVE_DELAY_MS").and_then(|v| parse_ms(&v)) {
            self.save_delay_ms = ms;
        }
        if let Some(ms) = lookup("REPLY_DELAY_MS").and_then(|v| parse_ms(&v)) {
            self.reply_delay_ms = ms;
        }
        self
    }

    pub fn save_delay(&self) -> Duration {
        Duration::from_millis(self.save_delay_ms)
    }

    pub fn reply_delay(&self) -> Duration {
        Duration::from_millis(self.reply_delay_ms)
    }
}

// JS numbers arrive as f64 strings ("500" or "500.0").
fn parse_ms(v: &str) -> Option<u64> {
    let v = v.trim();
    v.parse::<u64>().ok().or_else(|| {
        v.parse::<f64>()
            .ok()
            .filter(|n| n.is_finite() && *n >= 0.0)
            .map(|n| n.round() as u64)
    })
}
