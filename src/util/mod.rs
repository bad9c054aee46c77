use chrono::{DateTime, Utc};
use std::time::Duration;

/// Source of "now" for timestamps and ids.
pub trait Clock {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall clock; in the browser this is `Date.now()` via chrono's `wasmbind`.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// Millisecond-timestamp id, bumped until it does not collide with `taken`.
pub(crate) fn next_document_id(now: DateTime<Utc>, taken: impl Fn(&str) -> bool) -> String {
    let mut ms = now.timestamp_millis();
    loop {
        let id = ms.to_string();
        if !taken(&id) {
            return id;
        }
        ms += 1;
    }
}

/// Drop `<...>` tags from an HTML fragment. Entities are left as-is.
pub(crate) fn strip_tags(html: &str) -> String {
    let mut out = String::with_capacity(html.len());
    let mut in_tag = false;
    for ch in html.chars() {
        match ch {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    out
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ContentStats {
    pub characters: usize,
    pub words: usize,
}

/// Status-bar counts: characters exclude markup, words are whitespace
/// separated runs of the raw content.
pub fn content_stats(content: &str) -> ContentStats {
    ContentStats {
        characters: strip_tags(content).chars().count(),
        words: content.split_whitespace().count(),
    }
}

pub(crate) fn format_clock_time(at: DateTime<Utc>) -> String {
    at.with_timezone(&chrono::Local).format("%H:%M").to_string()
}

/// Resolve after `delay`. A zero delay resolves immediately without touching
/// the browser timer, which keeps native callers usable.
pub(crate) async fn sleep(delay: Duration) {
    if delay.is_zero() {
        return;
    }

    let (tx, rx) = futures::channel::oneshot::channel::<()>();
    leptos_dom::helpers::set_timeout(
        move || {
            let _ = tx.send(());
        },
        delay,
    );
    let _ = rx.await;
}
