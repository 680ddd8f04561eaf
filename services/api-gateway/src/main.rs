use anyhow::{Context, Result};
use axum::{
    extract::DefaultBodyLimit,
    http::{header, HeaderName, Method},
    response::Json,
    routing::get,
    serve, Router,
};
use packtally_utils::{init_logging, AppConfig, LeftoverCalculator, SheetFlattener};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::info;

mod error;
mod handlers;
mod middleware;
mod routes;
mod session;

use middleware::*;
use session::{SharedWorkspace, Workspace};

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration
    let config = AppConfig::load_validated().context("Failed to load configuration")?;

    // Initialize logging
    init_logging(&config.logging)?;
    info!("Starting Packtally API Gateway");

    let app = create_app(&config);

    // Start server
    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port)
        .parse()
        .with_context(|| format!("Invalid listen address {}:{}", config.server.host, config.server.port))?;
    let listener = TcpListener::bind(&addr).await?;
    info!("API Gateway listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn create_app(config: &AppConfig) -> Router {
    let state = AppState::new(config.clone());

    Router::new()
        // Health check endpoint
        .route("/health", get(health_check))

        // API routes
        .nest("/api/v1", routes::create_api_routes())

        // Middleware stack
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static(REQUEST_ID_HEADER)]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware))
                .layer(axum::middleware::from_fn(error_handling_middleware)),
        )

        // Application state
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    pub config: AppConfig,
    pub workspace: SharedWorkspace,
    pub packing: Arc<SheetFlattener>,
    pub leftovers: Arc<LeftoverCalculator>,
}

impl AppState {
    pub fn new(config: AppConfig) -> Self {
        let scan_rows = config.sheet.header_scan_rows;
        let leftovers = LeftoverCalculator::new(scan_rows);
        Self {
            packing: Arc::new(leftovers.purchase_flattener().clone()),
            leftovers: Arc::new(leftovers),
            workspace: Workspace::shared(),
            config,
        }
    }
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "packtally-api-gateway",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}
