use axum::{extract::State, response::Json};
use picklist_database::{mongo_health_check, postgres_health_check};
use serde_json::{json, Value};

use crate::AppState;

pub async fn detailed_health_check(State(state): State<AppState>) -> Json<Value> {
    let mut health_status = json!({
        "status": "healthy",
        "service": "picklist-api",
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "version": env!("CARGO_PKG_VERSION"),
        "checks": {}
    });

    // Make/buy and grouping catalogs
    let postgres_status = match postgres_health_check(&state.postgres_pool).await {
        Ok(_) => json!({"status": "healthy", "message": "Connected"}),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    health_status["checks"]["postgres"] = postgres_status;

    // BOM store
    let mongo_status = match mongo_health_check(&state.mongo_client).await {
        Ok(_) => json!({"status": "healthy", "message": "Connected"}),
        Err(e) => json!({"status": "unhealthy", "message": e.to_string()}),
    };
    health_status["checks"]["mongodb"] = mongo_status;

    let all_healthy = health_status["checks"]
        .as_object()
        .map_or(false, |checks| checks.values().all(|check| check["status"] == "healthy"));

    if !all_healthy {
        health_status["status"] = json!("degraded");
    }

    Json(health_status)
}
