use std::sync::Arc;

use axum::{extract::Query, http::StatusCode, routing::get, Json, Router};
use chrono::NaiveDate;
use serde::Deserialize;

use crate::{
    config::with_config,
    logger::{self, LogTag},
    search::{self, SearchCriteria, SearchResponse},
    shipments::database::get_global_database,
    webserver::{
        state::AppState,
        utils::{error_response, success_response},
    },
};

// =============================================================================
// ROUTE REGISTRATION
// =============================================================================

pub fn routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/search", get(run_search_get).post(run_search_post))
        .route("/search/companies", get(lookup_companies))
        .route("/search/countries", get(list_countries))
}

// =============================================================================
// REQUEST TYPES
// =============================================================================

/// GET /api/search query parameters. Dates arrive as strings and are parsed
/// here so a malformed date produces the uniform failure shape instead of a
/// transport-level rejection.
#[derive(Debug, Deserialize)]
pub struct SearchParams {
    #[serde(alias = "query")]
    pub q: Option<String>,
    pub mode: Option<String>,
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
    pub destination_city: Option<String>,
    pub hs_code: Option<String>,
    pub carrier: Option<String>,
    pub date_from: Option<String>,
    pub date_to: Option<String>,
    pub min_value: Option<f64>,
    pub max_value: Option<f64>,
    pub air_shipper: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl SearchParams {
    fn into_criteria(self) -> Result<SearchCriteria, String> {
        Ok(SearchCriteria {
            query: self.q,
            mode: self.mode,
            origin_country: self.origin_country,
            destination_country: self.destination_country,
            destination_city: self.destination_city,
            hs_code: self.hs_code,
            carrier: self.carrier,
            date_from: parse_date_param("date_from", self.date_from)?,
            date_to: parse_date_param("date_to", self.date_to)?,
            min_value: self.min_value,
            max_value: self.max_value,
            air_shipper: self.air_shipper,
            limit: self.limit,
            offset: self.offset,
        })
    }
}

fn parse_date_param(name: &str, value: Option<String>) -> Result<Option<NaiveDate>, String> {
    match value {
        None => Ok(None),
        Some(raw) => {
            let trimmed = raw.trim();
            if trimmed.is_empty() {
                return Ok(None);
            }
            NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
                .map(Some)
                .map_err(|_| format!("invalid {} '{}', expected YYYY-MM-DD", name, raw))
        }
    }
}

/// Resolve the page window a failure response should echo
fn effective_window(limit: Option<usize>, offset: Option<usize>) -> (usize, usize) {
    let options = with_config(|cfg| cfg.search.clone());
    let limit = limit
        .unwrap_or(options.default_page_size)
        .clamp(1, options.max_page_size.max(1));
    (limit, offset.unwrap_or(0))
}

// =============================================================================
// HANDLERS
// =============================================================================

/// GET /api/search
///
/// Always answers HTTP 200 with the stable search response shape; callers
/// inspect the `success` flag.
async fn run_search_get(Query(params): Query<SearchParams>) -> Json<SearchResponse> {
    let window = effective_window(params.limit, params.offset);

    match params.into_criteria() {
        Ok(criteria) => dispatch_search(criteria).await,
        Err(err) => {
            logger::warning(LogTag::Webserver, &format!("Rejected search request: {}", err));
            Json(SearchResponse::failed(window.0, window.1))
        }
    }
}

/// POST /api/search with the criteria as a JSON body
async fn run_search_post(Json(criteria): Json<SearchCriteria>) -> Json<SearchResponse> {
    dispatch_search(criteria).await
}

async fn dispatch_search(criteria: SearchCriteria) -> Json<SearchResponse> {
    let window = effective_window(criteria.limit, criteria.offset);

    match get_global_database() {
        Ok(db) => Json(search::execute_search(&db, &criteria).await),
        Err(err) => {
            logger::error(LogTag::Webserver, &format!("Search unavailable: {}", err));
            Json(SearchResponse::failed(window.0, window.1))
        }
    }
}

#[derive(Debug, Deserialize)]
struct CompanyLookupParams {
    q: Option<String>,
    limit: Option<usize>,
}

/// GET /api/search/companies
async fn lookup_companies(Query(params): Query<CompanyLookupParams>) -> axum::response::Response {
    let needle = params.q.unwrap_or_default();

    let db = match get_global_database() {
        Ok(db) => db,
        Err(err) => {
            logger::error(LogTag::Webserver, &format!("Company lookup unavailable: {}", err));
            return error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "Record store is not initialized",
                None,
            );
        }
    };

    match search::lookup_companies(&db, &needle, params.limit).await {
        Ok(companies) => success_response(companies),
        Err(err) => {
            logger::warning(LogTag::Webserver, &format!("Company lookup failed: {}", err));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "COMPANY_LOOKUP_FAILED",
                &format!("Company lookup failed: {}", err),
                None,
            )
        }
    }
}

/// GET /api/search/countries
async fn list_countries() -> axum::response::Response {
    let db = match get_global_database() {
        Ok(db) => db,
        Err(err) => {
            logger::error(LogTag::Webserver, &format!("Country lookup unavailable: {}", err));
            return error_response(
                StatusCode::SERVICE_UNAVAILABLE,
                "STORE_UNAVAILABLE",
                "Record store is not initialized",
                None,
            );
        }
    };

    match search::list_countries(&db).await {
        Ok(countries) => success_response(countries),
        Err(err) => {
            logger::warning(LogTag::Webserver, &format!("Country lookup failed: {}", err));
            error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "COUNTRY_LOOKUP_FAILED",
                &format!("Country lookup failed: {}", err),
                None,
            )
        }
    }
}
