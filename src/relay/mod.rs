//! Command relay subsystem.
//!
//! # Data Flow
//! ```text
//! command phrase (from dispatch)
//!     → router.rs (pick backend port + deadline tier)
//!     → session.rs (one ephemeral session per request)
//!     → connector.rs (TCP connect → write line → one read → close)
//!     → Outcome {Reply | Timeout | ConnectionError}
//!     → HTTP response
//! ```
//!
//! # Design Decisions
//! - One transient TCP connection per command, never pooled or reused
//! - One-shot protocol: the first readable chunk is the whole answer
//! - Deterministic routing: port and deadline are pure functions of the phrase
//! - No retries: backend failures surface upward once

pub mod connector;
pub mod dedup;
pub mod router;
pub mod session;

pub use connector::Outcome;
pub use dedup::RecentActivity;
pub use router::{CommandRouter, RouteDecision};
pub use session::RelaySession;

use std::time::Duration;

/// The backend control service address, resolved once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BackendTarget {
    /// Host name or IP address.
    pub host: String,
    /// Primary command port.
    pub primary_port: u16,
    /// Auxiliary control port, always primary + 1.
    pub control_port: u16,
}

impl BackendTarget {
    pub fn new(host: impl Into<String>, primary_port: u16) -> Self {
        Self {
            host: host.into(),
            primary_port,
            control_port: primary_port + 1,
        }
    }
}

/// The two reply-deadline tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DeadlineTiers {
    /// Applied to ordinary commands.
    pub default: Duration,
    /// Applied to long-running `player*` commands.
    pub extended: Duration,
}

impl Default for DeadlineTiers {
    fn default() -> Self {
        Self {
            default: Duration::from_millis(250),
            extended: Duration::from_millis(500),
        }
    }
}
