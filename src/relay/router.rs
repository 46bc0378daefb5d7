//! Command routing: port and deadline selection.
//!
//! # Responsibilities
//! - Divert restart/amplifier commands to the auxiliary control port
//! - Grant `player*` commands the extended reply deadline
//!
//! # Design Decisions
//! - Both axes are decided independently from the phrase alone; no state
//! - Substring/prefix markers, no regex (the phrase is otherwise opaque)
//! - Thresholds are policy constants from config, not protocol requirements

use std::time::Duration;

use crate::relay::{BackendTarget, DeadlineTiers};

/// Commands diverted to the control port, by substring marker.
const CONTROL_MARKERS: [&str; 2] = ["restart_", "amp_"];

/// Prefix of commands granted the extended deadline.
const EXTENDED_PREFIX: &str = "player";

/// The resolved target port and reply deadline for one command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDecision {
    pub port: u16,
    pub deadline: Duration,
}

/// Maps a command phrase to a backend port and a reply deadline.
///
/// Immutable after construction; shared across sessions without locks.
#[derive(Debug, Clone)]
pub struct CommandRouter {
    target: BackendTarget,
    deadlines: DeadlineTiers,
}

impl CommandRouter {
    pub fn new(target: BackendTarget, deadlines: DeadlineTiers) -> Self {
        Self { target, deadlines }
    }

    pub fn target(&self) -> &BackendTarget {
        &self.target
    }

    /// Decide port and deadline for a command phrase.
    pub fn route(&self, phrase: &str) -> RouteDecision {
        let port = if CONTROL_MARKERS.iter().any(|m| phrase.contains(m)) {
            self.target.control_port
        } else {
            self.target.primary_port
        };

        // Some heavy commands (e.g. `player get_all_info`) take a while.
        let deadline = if phrase.starts_with(EXTENDED_PREFIX) {
            self.deadlines.extended
        } else {
            self.deadlines.default
        };

        RouteDecision { port, deadline }
    }
}
