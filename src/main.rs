//! path-router demo server.
//!
//! ```text
//!   Client ──▶ axum/hyper ──▶ request ID / trace / timeout layers
//!                                   │
//!                                   ▼
//!                            routing::Router
//!                    middlewares (in order) ─ Respond ──▶ response
//!                                   │ Continue
//!                                   ▼
//!                    first route matching method + path
//!                                   │ none
//!                                   ▼
//!                            404 Not Found
//! ```

use std::net::SocketAddr;
use std::path::PathBuf;

use axum::extract::Request;
use axum::Json;
use clap::Parser;
use serde_json::{json, Value};
use tokio::net::TcpListener;

use path_router::config::validation::validate_config;
use path_router::config::{load_config, ConfigError, ServerConfig};
use path_router::hooks::log_requests;
use path_router::http::HttpServer;
use path_router::lifecycle::{signals, Shutdown};
use path_router::observability::{logging, metrics};
use path_router::routing::{RouteContext, Router};
use path_router::RouterError;

#[derive(Parser, Debug)]
#[command(name = "path-router")]
#[command(about = "Minimal HTTP request router", long_about = None)]
struct Cli {
    /// TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Override the listener bind address
    #[arg(short, long)]
    bind: Option<String>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServerConfig::default(),
    };
    if let Some(bind) = cli.bind {
        config.listener.bind_address = bind;
    }
    validate_config(&config).map_err(ConfigError::Validation)?;

    logging::init(&config.observability);
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "path-router starting");

    if config.observability.metrics_enabled {
        let addr: SocketAddr = config.observability.metrics_address.parse()?;
        metrics::init_metrics(addr)?;
    }

    let router = build_router()?;

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    let shutdown = Shutdown::new();
    tokio::spawn(signals::shutdown_on_ctrl_c(shutdown.clone()));

    let server = HttpServer::new(config, router);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}

fn build_router() -> Result<Router, RouterError> {
    let mut router = Router::new();
    router.middleware(log_requests());
    router.get("/books/:id", book)?.get("/health", health)?;
    Ok(router)
}

async fn book(_req: Request, ctx: RouteContext) -> String {
    format!("this is book {}", ctx.param("id").unwrap_or_default())
}

async fn health(_req: Request, _ctx: RouteContext) -> Json<Value> {
    Json(json!({ "status": "ok" }))
}
