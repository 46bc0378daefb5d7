//! Logging initialization.
//!
//! # Design Decisions
//! - Verbosity flags pick the base filter: info by default, debug with -v
//!   (command/reply traffic), trace with -vv (every request and asset hit)
//! - `RUST_LOG` overrides the flags when set

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize the tracing subscriber from the CLI verbosity count.
pub fn init(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "command_gateway=info",
        1 => "command_gateway=debug",
        _ => "command_gateway=trace,tower_http=debug",
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}
