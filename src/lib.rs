//! Relay server for cloud-hosted live-room plugins.
//!
//! The hosting platform delivers live-room events (likes, comments, gifts,
//! fan-club joins) to this service as HTTP callbacks, and exposes two
//! upstream services over the cloud-internal network: a task API that opens
//! per-category event push for a room, and a websocket gateway that pushes
//! data down to the client running on the anchor's device. This crate wires
//! the three together:
//!
//! - `POST /start_game` opens a push task for every event category of the
//!   calling room.
//! - `POST /live_data_callback` receives pushed live-room data and relays it
//!   through the websocket gateway to the anchor's client.
//! - `POST|GET /websocket_callback` receives client connection lifecycle
//!   events and hands them to a pluggable
//!   [`ConnectionLifecycle`](lifecycle::ConnectionLifecycle) implementation.
//! - `POST /finish_game` closes a session (integrator-supplied logic).
//!
//! Identifiers (app id, room id, anchor open id) are injected by the hosting
//! platform as trusted request headers and are modeled as the
//! [`api::context::AnchorContext`] extractor, so handlers and tests share one
//! verifiable context object instead of ad hoc header reads.
//!
//! The relay is stateless: every callback is handled independently, and
//! upstream failures are logged rather than surfaced to the platform, which
//! expects a success envelope from these endpoints.
//!
//! ## Quick Start
//!
//! ```no_run
//! use clap::Parser;
//! use liverelay::{Application, Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let args = liverelay::config::Args::parse();
//!     let config = Config::load(&args)?;
//!
//!     liverelay::telemetry::init_telemetry()?;
//!
//!     Application::new(config)
//!         .serve(async {
//!             tokio::signal::ctrl_c().await.expect("Failed to listen for Ctrl+C");
//!         })
//!         .await
//! }
//! ```

pub mod api;
pub mod config;
pub mod errors;
pub mod lifecycle;
pub mod telemetry;
pub mod upstream;

#[cfg(test)]
pub(crate) mod test_utils;

use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use bon::Builder;
use tokio::net::TcpListener;
use tower_http::trace::{DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, TraceLayer};
use tracing::{info, Level};

pub use config::Config;
use lifecycle::{ConnectionLifecycle, NoopLifecycle};
use upstream::{GatewayClient, TaskClient};

/// Application state shared across all request handlers.
///
/// Holds the configuration, the two upstream clients, and the integrator's
/// connection lifecycle implementation. Cheap to clone: the clients share a
/// single connection pool.
#[derive(Clone, Builder)]
pub struct AppState {
    pub config: Config,
    pub task_client: TaskClient,
    pub gateway_client: GatewayClient,
    pub lifecycle: Arc<dyn ConnectionLifecycle>,
}

/// Build the application router with all callback endpoints and middleware.
///
/// The paths are fixed by the hosting platform and must not be remapped.
/// `/websocket_callback` accepts GET as well as POST because the gateway
/// probes the endpoint on both methods.
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/healthz", get(|| async { "OK" }))
        .route("/start_game", post(api::handlers::live::start_game))
        .route("/finish_game", post(api::handlers::live::finish_game))
        .route("/live_data_callback", post(api::handlers::live::live_data_callback))
        .route(
            "/websocket_callback",
            post(api::handlers::websocket::websocket_callback).get(api::handlers::websocket::websocket_callback),
        )
        .with_state(state)
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
}

/// Main application struct that owns the router and serving lifecycle.
pub struct Application {
    router: Router,
    config: Config,
}

impl Application {
    /// Create an application with the default no-op connection lifecycle.
    pub fn new(config: Config) -> Self {
        Self::with_lifecycle(config, Arc::new(NoopLifecycle))
    }

    /// Create an application with an integrator-supplied connection
    /// lifecycle implementation.
    pub fn with_lifecycle(config: Config, lifecycle: Arc<dyn ConnectionLifecycle>) -> Self {
        let http = reqwest::Client::new();
        let task_client = TaskClient::new(http.clone(), config.upstream.task_start_url.clone());
        let gateway_client = GatewayClient::new(http, config.upstream.push_url.clone());

        let state = AppState::builder()
            .config(config.clone())
            .task_client(task_client)
            .gateway_client(gateway_client)
            .lifecycle(lifecycle)
            .build();

        Self {
            router: build_router(state),
            config,
        }
    }

    /// Convert application into a test server (for tests)
    #[cfg(test)]
    pub fn into_test_server(self) -> axum_test::TestServer {
        axum_test::TestServer::new(self.router).expect("Failed to create test server")
    }

    /// Start serving the application
    pub async fn serve<F>(self, shutdown: F) -> anyhow::Result<()>
    where
        F: std::future::Future<Output = ()> + Send + 'static,
    {
        let bind_addr = self.config.bind_address();
        let listener = TcpListener::bind(&bind_addr).await?;
        info!("Relay listening on http://{}", bind_addr);

        axum::serve(listener, self.router.into_make_service())
            .with_graceful_shutdown(shutdown)
            .await?;

        Ok(())
    }
}
