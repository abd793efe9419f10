//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create the Axum router with all handlers
//! - Wire up middleware (tracing, timeout, request ID, metrics)
//! - Share the contract accessor with handlers via application state
//! - Serve with graceful shutdown

use std::future::Future;
use std::sync::Arc;
use std::time::{Duration, Instant};

use axum::extract::{MatchedPath, Request};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{get, post};
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use crate::config::GatewayConfig;
use crate::contract::accessor::{RegistryAccessor, RegistryHandle};
use crate::error::{GatewayError, GatewayResult};
use crate::http::handlers;
use crate::http::request::RequestIdLayer;
use crate::observability::metrics;

/// Application state injected into handlers.
#[derive(Clone)]
pub struct AppState {
    /// Singleton contract accessor.
    pub accessor: Arc<RegistryAccessor>,
    /// Loaded configuration.
    pub config: Arc<GatewayConfig>,
}

impl AppState {
    /// Run one contract operation against the current handle.
    ///
    /// Acquires the handle with the accessor's lazy policy. If the
    /// operation fails at the transport layer the handle is discarded so
    /// the next request forces re-initialization; the failure itself still
    /// propagates to this request's envelope.
    pub async fn with_registry<T, F, Fut>(&self, op: F) -> GatewayResult<T>
    where
        F: FnOnce(Arc<RegistryHandle>) -> Fut,
        Fut: Future<Output = GatewayResult<T>>,
    {
        let handle = self.accessor.acquire().await?;
        let result = op(handle).await;
        if let Err(GatewayError::Connection(_)) = &result {
            self.accessor.invalidate();
        }
        result
    }
}

/// HTTP server for the gateway.
pub struct HttpServer {
    router: Router,
    config: GatewayConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration and accessor.
    pub fn new(config: GatewayConfig, accessor: Arc<RegistryAccessor>) -> Self {
        let state = AppState {
            accessor,
            config: Arc::new(config.clone()),
        };

        let router = Self::build_router(&config, state);
        Self { router, config }
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &GatewayConfig, state: AppState) -> Router {
        Router::new()
            .route("/health", get(handlers::health))
            .route("/api/v1/status", get(handlers::get_status))
            .route("/api/v1/supply", get(handlers::get_supply))
            .route("/api/v1/lands", post(handlers::register_land))
            .route("/api/v1/lands/{id}", get(handlers::get_land))
            .route("/api/v1/lands/{id}/owner", get(handlers::get_land_owner))
            .route("/api/v1/lands/{id}/deed", get(handlers::get_deed))
            .route(
                "/api/v1/owners/{address}/balance",
                get(handlers::get_owner_balance),
            )
            .fallback(handlers::not_found)
            .with_state(state)
            .layer(middleware::from_fn(track_metrics))
            .layer(TimeoutLayer::new(Duration::from_secs(
                config.timeouts.request_secs,
            )))
            .layer(RequestIdLayer)
            .layer(TraceLayer::new_for_http())
    }

    /// Run the server, accepting connections on the given listener until
    /// the shutdown signal fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            request_timeout_secs = self.config.timeouts.request_secs,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move {
                let _ = shutdown_rx.recv().await;
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Get a reference to the config.
    pub fn config(&self) -> &GatewayConfig {
        &self.config
    }
}

/// Record one metrics sample per request, labeled by route template.
async fn track_metrics(req: Request, next: Next) -> Response {
    let start = Instant::now();
    let method = req.method().to_string();
    let route = req
        .extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned());

    let response = next.run(req).await;

    metrics::record_request(&method, &route, response.status().as_u16(), start);
    response
}
