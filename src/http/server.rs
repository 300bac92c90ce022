//! HTTP server setup.
//!
//! # Responsibilities
//! - Host the router as the fallback service of an Axum app
//! - Wire up middleware (tracing, timeout, request ID)
//! - Bind server to listener
//! - Stop gracefully on the shutdown signal
//!
//! The router itself never sees sockets; everything here is the listener's
//! side of the contract.

use std::sync::Arc;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio::sync::broadcast;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};

use crate::config::ServerConfig;
use crate::http::request::{propagate_request_id_layer, set_request_id_layer};
use crate::http::service::DispatchService;
use crate::routing::Router;

/// HTTP server for a fully registered [`Router`].
pub struct HttpServer {
    app: axum::Router,
    request_timeout: Duration,
    route_count: usize,
    middleware_count: usize,
}

impl HttpServer {
    /// Create a new HTTP server. The router is frozen from here on.
    pub fn new(config: ServerConfig, router: Router) -> Self {
        let route_count = router.route_count();
        let middleware_count = router.middleware_count();
        let service = DispatchService::new(Arc::new(router));
        let request_timeout = Duration::from_secs(config.timeouts.request_secs);
        let app = Self::build_app(request_timeout, service);
        Self {
            app,
            request_timeout,
            route_count,
            middleware_count,
        }
    }

    /// Build the Axum app with all middleware layers.
    #[allow(deprecated)]
    fn build_app(request_timeout: Duration, service: DispatchService) -> axum::Router {
        axum::Router::new()
            .fallback_service(service)
            .layer(TimeoutLayer::new(request_timeout))
            .layer(propagate_request_id_layer())
            .layer(TraceLayer::new_for_http())
            .layer(set_request_id_layer())
    }

    /// The assembled app, for hosting it elsewhere or driving it in-process.
    pub fn app(&self) -> axum::Router {
        self.app.clone()
    }

    /// Run the server, accepting connections on the given listener until
    /// `shutdown` fires.
    pub async fn run(
        self,
        listener: TcpListener,
        mut shutdown: broadcast::Receiver<()>,
    ) -> Result<(), std::io::Error> {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            routes = self.route_count,
            middlewares = self.middleware_count,
            request_timeout_secs = self.request_timeout.as_secs(),
            "HTTP server starting"
        );

        axum::serve(listener, self.app)
            .with_graceful_shutdown(async move {
                let _ = shutdown.recv().await;
                tracing::info!("Shutdown signal received");
            })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }

    /// Per-request deadline applied in front of the router.
    pub fn request_timeout(&self) -> Duration {
        self.request_timeout
    }
}
