//! Observability subsystem.
//!
//! Structured logging only: every relay line carries the command phrase,
//! the target host/port, and the outcome, so a failure can be diagnosed
//! without reproducing it. Repeated identical traffic is deduplicated by
//! `relay::dedup` to keep polling noise out of the log.

pub mod logging;
