//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML)
//!     → loader.rs (parse & deserialize)
//!     → semantic checks (ports, deadlines)
//!     → GatewayConfig (validated, immutable)
//!     → shared via Arc to all subsystems
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded; the backend target never changes
//!   for the life of the process
//! - All fields have defaults so a missing file is recoverable
//! - A broken config file logs a warning and falls back to defaults

pub mod loader;
pub mod schema;

pub use loader::{default_config_path, load_config, ConfigError};
pub use schema::GatewayConfig;
