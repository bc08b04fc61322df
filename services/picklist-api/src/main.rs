use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    http::{header, Method},
    response::Json,
    routing::get,
    serve, Router,
};
use picklist_database::{initialize_databases, MongoBomRepository, MongoClient, PgCatalogRepository, PostgresPool};
use picklist_utils::{init_logging, AppConfig, PickListGenerator};
use serde_json::json;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::info;

mod error;
mod handlers;
mod inventory_client;
mod metrics;
mod middleware;
mod routes;

use inventory_client::HttpInventoryClient;
use metrics::Metrics;
use middleware::*;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::load().unwrap_or_else(|_| {
        eprintln!("Failed to load configuration, using defaults");
        AppConfig::default()
    });

    init_logging(&config.logging)?;
    info!("Starting pick-list API");

    let (postgres_pool, mongo_client) = initialize_databases(&config.database).await?;
    info!("Database connections established");

    let state = build_state(postgres_pool, mongo_client, &config)?;
    let app = create_app(state, &config);

    let addr: SocketAddr = format!("{}:{}", config.server.host, config.server.port).parse()?;
    let listener = TcpListener::bind(&addr).await?;
    info!("Pick-list API listening on {}", addr);

    serve(listener, app).await?;

    Ok(())
}

fn build_state(postgres_pool: PostgresPool, mongo_client: MongoClient, config: &AppConfig) -> Result<AppState> {
    let bom = Arc::new(MongoBomRepository::new(&mongo_client, &config.database));
    let catalog = Arc::new(PgCatalogRepository::new(postgres_pool.clone()));
    let inventory = Arc::new(HttpInventoryClient::new(&config.inventory)?);

    let generator = PickListGenerator::new(bom, catalog.clone(), catalog, inventory, config.engine.clone());

    Ok(AppState {
        generator,
        postgres_pool,
        mongo_client,
        metrics: Arc::new(Metrics::new()?),
    })
}

fn create_app(state: AppState, config: &AppConfig) -> Router {
    Router::new()
        .route("/health", get(health_check))
        .route("/metrics", get(metrics_handler))
        .nest("/api/v1", routes::create_api_routes())
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(TimeoutLayer::new(Duration::from_secs(config.server.timeout_seconds)))
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods([Method::GET, Method::POST])
                        .allow_headers([header::CONTENT_TYPE]),
                )
                .layer(DefaultBodyLimit::max(config.server.max_request_size))
                .layer(axum::middleware::from_fn(request_id_middleware)),
        )
        .with_state(state)
}

#[derive(Clone)]
pub struct AppState {
    pub generator: PickListGenerator,
    pub postgres_pool: PostgresPool,
    pub mongo_client: MongoClient,
    pub metrics: Arc<Metrics>,
}

async fn health_check() -> Json<serde_json::Value> {
    Json(json!({
        "status": "healthy",
        "service": "picklist-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION")
    }))
}

async fn metrics_handler(State(state): State<AppState>) -> String {
    state.metrics.render()
}
