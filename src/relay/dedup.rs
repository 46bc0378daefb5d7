//! Recent-activity cache for deduplicated traffic logging.
//!
//! The web UI polls the same state query several times a second, which
//! would flood the log with identical lines. This cache remembers the last
//! command phrase and the last reply so callers can skip repeats. It is
//! best-effort only: a lost update under concurrency costs at most one
//! extra log line, never request correctness.

use std::sync::Mutex;

#[derive(Debug, Default)]
struct Inner {
    last_phrase: String,
    last_reply: String,
}

/// Last observed command phrase and reply text, process-wide.
#[derive(Debug, Default)]
pub struct RecentActivity {
    inner: Mutex<Inner>,
}

impl RecentActivity {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a command phrase. Returns true if it differs from the last one.
    pub fn note_phrase(&self, phrase: &str) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return true;
        };
        if inner.last_phrase == phrase {
            false
        } else {
            inner.last_phrase = phrase.to_string();
            true
        }
    }

    /// Record a reply. Returns true if it differs from the last one.
    pub fn note_reply(&self, reply: &str) -> bool {
        let Ok(mut inner) = self.inner.lock() else {
            return true;
        };
        if inner.last_reply == reply {
            false
        } else {
            inner.last_reply = reply.to_string();
            true
        }
    }
}

/// Truncate long reply text for log lines.
pub fn preview(text: &str) -> &str {
    if text.len() > 40 {
        let mut end = 40;
        while !text.is_char_boundary(end) {
            end -= 1;
        }
        &text[..end]
    } else {
        text
    }
}
