//! Lifecycle management.
//!
//! The gateway is a long-running process: startup is config-then-listener,
//! shutdown is a broadcast signal the server loop subscribes to. No error
//! after startup is fatal; failures are scoped to single requests.

pub mod shutdown;

pub use shutdown::Shutdown;
