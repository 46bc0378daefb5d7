//! Relay session: one ephemeral unit of work per command request.
//!
//! # Responsibilities
//! - Resolve the command's port and deadline via the router
//! - Drive one backend connector round trip
//! - Translate the outcome into an HTTP response
//! - Feed the recent-activity cache for deduplicated logging
//!
//! # Design Decisions
//! - A session owns nothing shared except the dedup cache; two sessions
//!   never observe each other
//! - Timeout and connection errors terminate the response with explicit
//!   status codes (504 / 502) instead of leaving the request hanging

use std::sync::Arc;
use std::time::Instant;

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};

use crate::relay::{connector, CommandRouter, Outcome, RecentActivity, RouteDecision};

/// Per-request relay state: the phrase plus its resolved routing decision.
#[derive(Debug)]
pub struct RelaySession {
    phrase: String,
    decision: RouteDecision,
}

impl RelaySession {
    /// Create a session for one command request.
    pub fn new(router: &CommandRouter, phrase: String) -> Self {
        let decision = router.route(&phrase);
        Self { phrase, decision }
    }

    /// Run the session to completion and produce the HTTP response.
    pub async fn run(self, router: &CommandRouter, activity: &Arc<RecentActivity>) -> Response {
        let target = router.target();
        let RouteDecision { port, deadline } = self.decision;

        if activity.note_phrase(&self.phrase) {
            tracing::debug!(
                host = %target.host,
                port,
                command = %self.phrase,
                "TX to control service"
            );
        }

        let start = Instant::now();
        let outcome = connector::send(target, port, &self.phrase, deadline).await;
        let elapsed = start.elapsed();

        match outcome {
            Outcome::Reply(bytes) => {
                let text = String::from_utf8_lossy(&bytes);
                if activity.note_reply(&text) {
                    tracing::debug!(
                        host = %target.host,
                        port,
                        reply = %super::dedup::preview(&text),
                        elapsed_ms = elapsed.as_millis() as u64,
                        "RX from control service"
                    );
                }
                (
                    StatusCode::OK,
                    [(header::CONTENT_TYPE, "text/plain")],
                    bytes,
                )
                    .into_response()
            }
            Outcome::Timeout => StatusCode::GATEWAY_TIMEOUT.into_response(),
            Outcome::ConnectionError => StatusCode::BAD_GATEWAY.into_response(),
        }
    }
}
