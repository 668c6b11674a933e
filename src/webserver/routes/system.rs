use std::sync::Arc;

use axum::{extract::State, response::Response, routing::get, Json, Router};
use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
    shipments::database::get_global_database,
    webserver::{state::AppState, utils::success_response},
};

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health))
        .route("/system/status", get(system_status))
}

/// Simple health check response
#[derive(Debug, Serialize)]
struct HealthResponse {
    status: String,
    timestamp: DateTime<Utc>,
    version: String,
}

/// GET /api/health
async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        timestamp: Utc::now(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

#[derive(Debug, Serialize)]
struct SystemStatusResponse {
    uptime_seconds: u64,
    timestamp: DateTime<Utc>,
    store_ready: bool,
    total_shipments: u64,
    total_companies: u64,
}

/// GET /api/system/status
async fn system_status(State(state): State<Arc<AppState>>) -> Response {
    let (store_ready, total_shipments, total_companies) = match get_global_database() {
        Ok(db) => match db.get_stats().await {
            Ok(stats) => (true, stats.total_shipments, stats.total_companies),
            Err(_) => (false, 0, 0),
        },
        Err(_) => (false, 0, 0),
    };

    success_response(SystemStatusResponse {
        uptime_seconds: state.uptime_seconds(),
        timestamp: Utc::now(),
        store_ready,
        total_shipments,
        total_companies,
    })
}
