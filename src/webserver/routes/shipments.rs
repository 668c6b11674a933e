use std::sync::Arc;

use axum::{http::StatusCode, response::Response, routing::get, routing::post, Json, Router};
use serde_json::json;

use crate::{
    core::IntelError,
    logger::{self, LogTag},
    shipments::database::get_global_database,
    shipments::types::{CompanyRecord, ShipmentRecord},
    webserver::{
        state::AppState,
        utils::{error_response, success_response},
    },
};

/// Ingest and store-administration routes. The search pipeline itself is
/// read-only; these are the door records come in through.
pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/shipments/import", post(import_shipments))
        .route("/shipments/stats", get(get_store_stats))
        .route("/companies/import", post(import_companies))
}

/// POST /api/shipments/import
async fn import_shipments(Json(records): Json<Vec<ShipmentRecord>>) -> Response {
    let db = match get_global_database() {
        Ok(db) => db,
        Err(err) => return store_unavailable(err),
    };

    let count = records.len();
    match db.add_shipments(records).await {
        Ok(imported) => {
            logger::info(
                LogTag::Shipments,
                &format!("Imported {} shipment records", imported),
            );
            success_response(json!({ "imported": imported }))
        }
        Err(IntelError::InvalidInput(reason)) => error_response(
            StatusCode::BAD_REQUEST,
            "INVALID_SHIPMENT",
            &reason,
            None,
        ),
        Err(err) => {
            logger::error(
                LogTag::Shipments,
                &format!("Failed to import {} shipments: {}", count, err),
            );
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "SHIPMENT_IMPORT_FAILED",
                &format!("Import failed: {}", err),
                None,
            )
        }
    }
}

/// POST /api/companies/import
async fn import_companies(Json(records): Json<Vec<CompanyRecord>>) -> Response {
    let db = match get_global_database() {
        Ok(db) => db,
        Err(err) => return store_unavailable(err),
    };

    match db.add_companies(records).await {
        Ok(imported) => {
            logger::info(
                LogTag::Shipments,
                &format!("Imported {} company records", imported),
            );
            success_response(json!({ "imported": imported }))
        }
        Err(err) => {
            logger::error(LogTag::Shipments, &format!("Company import failed: {}", err));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMPANY_IMPORT_FAILED",
                &format!("Import failed: {}", err),
                None,
            )
        }
    }
}

/// GET /api/shipments/stats
async fn get_store_stats() -> Response {
    let db = match get_global_database() {
        Ok(db) => db,
        Err(err) => return store_unavailable(err),
    };

    match db.get_stats().await {
        Ok(stats) => success_response(stats),
        Err(err) => {
            logger::warning(LogTag::Shipments, &format!("Stats query failed: {}", err));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "STATS_FAILED",
                &format!("Stats query failed: {}", err),
                None,
            )
        }
    }
}

fn store_unavailable(err: IntelError) -> Response {
    logger::error(LogTag::Shipments, &format!("Store unavailable: {}", err));
    error_response(
        StatusCode::SERVICE_UNAVAILABLE,
        "STORE_UNAVAILABLE",
        "Record store is not initialized",
        None,
    )
}
