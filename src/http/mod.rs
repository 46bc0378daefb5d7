//! HTTP protocol handling subsystem.
//!
//! # Data Flow
//! ```text
//! TCP connection
//!     → server.rs (Axum setup, middleware, catch-all handler)
//!     → dispatch::classify (asset | command | unrecognized)
//!     → assets::AssetServer  or  relay::RelaySession
//!     → HTTP response
//! ```

pub mod server;

pub use server::HttpServer;
