//! HTTP server setup and request handling.
//!
//! # Responsibilities
//! - Create the Axum router with the catch-all dispatch handler
//! - Wire up middleware (tracing, outer timeout, server header)
//! - Serve with graceful shutdown
//! - Hand classified requests to the asset server or a relay session
//!
//! # Design Decisions
//! - One catch-all handler: the URL grammar is too irregular for per-route
//!   handlers (extension matches, substring matches, query-only commands)
//! - An outer request timeout guarantees no HTTP request can hang, whatever
//!   the relay or the filesystem do

use std::sync::Arc;
use std::time::Duration;

use axum::{
    body::Body,
    extract::State,
    http::{header, HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{
    set_header::SetResponseHeaderLayer,
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::assets::AssetServer;
use crate::config::GatewayConfig;
use crate::dispatch::{self, RequestClass};
use crate::relay::{CommandRouter, RecentActivity, RelaySession};

/// Outer guard: no request may outlive this, whatever the relay does.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Body sent for unrecognized requests.
const NACK_BODY: &str = "NACK\n";

/// Application state injected into the dispatch handler.
#[derive(Clone)]
pub struct AppState {
    pub router: Arc<CommandRouter>,
    pub assets: Arc<AssetServer>,
    pub activity: Arc<RecentActivity>,
}

/// The gateway's HTTP server.
pub struct HttpServer {
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    pub fn new(config: GatewayConfig) -> Self {
        let state = AppState {
            router: Arc::new(CommandRouter::new(
                config.backend.target(),
                config.deadlines.tiers(),
            )),
            assets: Arc::new(AssetServer::new(config.assets.doc_root.clone())),
            activity: Arc::new(RecentActivity::new()),
        };

        Self {
            router: Self::build_router(state),
        }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(state: AppState) -> Router {
        Router::new()
            .route("/{*path}", any(dispatch_handler))
            .route("/", any(dispatch_handler))
            .with_state(state)
            .layer(TimeoutLayer::new(REQUEST_TIMEOUT))
            .layer(SetResponseHeaderLayer::overriding(
                header::SERVER,
                HeaderValue::from_static(concat!("command-gateway/", env!("CARGO_PKG_VERSION"))),
            ))
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server until the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(address = %addr, "HTTP server starting");

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}

/// Catch-all handler: classify the URL and route to assets or the relay.
async fn dispatch_handler(
    State(state): State<AppState>,
    request: Request<Body>,
) -> Response {
    let path = request.uri().path();
    let query = request.uri().query();

    tracing::trace!(path, query, "RX");

    match dispatch::classify(path, query) {
        RequestClass::Asset(descriptor) => state.assets.serve(&descriptor).await,
        RequestClass::Command(phrase) => {
            let session = RelaySession::new(&state.router, phrase);
            session.run(&state.router, &state.activity).await
        }
        RequestClass::Unrecognized => {
            tracing::debug!(path, "Unrecognized request, answering NACK");
            (
                StatusCode::OK,
                [(header::CONTENT_TYPE, "text/plain")],
                NACK_BODY,
            )
                .into_response()
        }
    }
}
