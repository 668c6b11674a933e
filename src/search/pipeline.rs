//! Search pipeline: primary filtered query, summary aggregation, and
//! response assembly.
//!
//! The public entry point never returns an error. Every failure path ends
//! in the uniform zeroed response shape with the cause logged; callers
//! inspect the `success` flag. Aggregation failures degrade to a zeroed
//! summary without blocking the primary page.

use crate::config::{with_config, SearchConfig};
use crate::core::IntelResult;
use crate::logger::{self, LogTag};
use crate::search::compiler;
use crate::search::types::{SearchCriteria, SearchResponse, SearchSummary};
use crate::shipments::database::ShipmentDatabase;
use crate::shipments::types::CompanyRecord;

/// Run a search with the globally configured options
pub async fn execute_search(db: &ShipmentDatabase, criteria: &SearchCriteria) -> SearchResponse {
    let options = with_config(|cfg| cfg.search.clone());
    execute_search_with(db, criteria, &options).await
}

/// Run a search with explicit options
///
/// Resolves the page window (absent limit/offset default to the configured
/// page size and zero; limit is clamped to the maximum), then executes the
/// primary and summary queries.
pub async fn execute_search_with(
    db: &ShipmentDatabase,
    criteria: &SearchCriteria,
    options: &SearchConfig,
) -> SearchResponse {
    let limit = criteria
        .limit
        .unwrap_or(options.default_page_size)
        .clamp(1, options.max_page_size.max(1));
    let offset = criteria.offset.unwrap_or(0);

    match run_search(db, criteria, options, limit, offset).await {
        Ok(response) => response,
        Err(err) => {
            logger::error(LogTag::Search, &format!("Search pipeline failed: {}", err));
            SearchResponse::failed(limit, offset)
        }
    }
}

async fn run_search(
    db: &ShipmentDatabase,
    criteria: &SearchCriteria,
    options: &SearchConfig,
    limit: usize,
    offset: usize,
) -> IntelResult<SearchResponse> {
    let predicates = compiler::compile(criteria);
    let (where_sql, params) = compiler::where_clause(&predicates);

    let data = db
        .query_page(where_sql.clone(), params.clone(), limit, offset)
        .await?;
    let total = db.count_matching(where_sql, params).await?;

    // Summary failure never blocks the primary page: degrade to zeros
    let summary = match summarize(db, criteria, &predicates, options).await {
        Ok(summary) => summary,
        Err(err) => {
            logger::warning(
                LogTag::Search,
                &format!("Summary aggregation failed, returning zeros: {}", err),
            );
            SearchSummary::zero()
        }
    };

    logger::debug(
        LogTag::Search,
        &format!(
            "search returned {}/{} rows (limit={} offset={})",
            data.len(),
            total,
            limit,
            offset
        ),
    );

    Ok(SearchResponse::ok(data, total, summary, limit, offset))
}

/// Aggregate over the summary population.
///
/// Scope is configurable: the default reapplies only the free-text filter
/// (historical behavior, broader population than the page); with
/// `summary_matches_filters` the summary reuses the full predicate list.
async fn summarize(
    db: &ShipmentDatabase,
    criteria: &SearchCriteria,
    full_predicates: &[compiler::Predicate],
    options: &SearchConfig,
) -> IntelResult<SearchSummary> {
    let scope = if options.summary_matches_filters {
        full_predicates.to_vec()
    } else {
        compiler::summary_predicates(criteria)
    };

    let (where_sql, params) = compiler::where_clause(&scope);
    let (air_count, ocean_count, total_value) = db.summarize_matching(where_sql, params).await?;

    Ok(SearchSummary {
        air_count,
        ocean_count,
        total_value,
    })
}

/// Company-name lookup: case-insensitive substring, store-native ordering
pub async fn lookup_companies(
    db: &ShipmentDatabase,
    query: &str,
    limit: Option<usize>,
) -> IntelResult<Vec<CompanyRecord>> {
    let default_limit = with_config(|cfg| cfg.search.company_lookup_limit);
    db.find_companies(query.to_string(), limit.unwrap_or(default_limit))
        .await
}

/// Distinct countries across origins and destinations, sorted
pub async fn list_countries(db: &ShipmentDatabase) -> IntelResult<Vec<String>> {
    db.distinct_countries().await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shipments::types::{ShipmentRecord, TransportMode};
    use chrono::NaiveDate;

    fn options() -> SearchConfig {
        SearchConfig::default()
    }

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    fn shipment(
        id: &str,
        day: &str,
        mode: TransportMode,
        value: Option<f64>,
    ) -> ShipmentRecord {
        ShipmentRecord {
            id: id.to_string(),
            mode: Some(mode),
            shipment_date: Some(date(day)),
            company_name: format!("Shipper {}", id),
            origin_country: Some("China".to_string()),
            destination_country: Some("USA".to_string()),
            destination_city: Some("Long Beach".to_string()),
            hs_code: Some("850440".to_string()),
            carrier: Some("Maersk".to_string()),
            value_usd: value,
            weight_kg: Some(100.0),
            description: Some("converters".to_string()),
            commodity_description: None,
            is_likely_air_shipper: matches!(mode, TransportMode::Air),
        }
    }

    async fn seeded_db(records: Vec<ShipmentRecord>) -> (tempfile::TempDir, ShipmentDatabase) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("pipeline.db");
        let db = ShipmentDatabase::open(path.to_str().unwrap()).unwrap();
        db.add_shipments(records).await.unwrap();
        (dir, db)
    }

    #[tokio::test]
    async fn test_empty_criteria_returns_most_recent_page() {
        let (_dir, db) = seeded_db(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean, Some(100.0)),
            shipment("b", "2024-03-05", TransportMode::Air, Some(200.0)),
            shipment("c", "2024-02-20", TransportMode::Ocean, Some(300.0)),
        ])
        .await;

        let response = execute_search_with(&db, &SearchCriteria::default(), &options()).await;
        assert!(response.success);
        assert_eq!(response.total, 3);
        let ids: Vec<&str> = response.data.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);
        assert!(!response.pagination.has_more);
        assert_eq!(response.pagination.limit, 25);
        assert_eq!(response.pagination.offset, 0);
    }

    #[tokio::test]
    async fn test_mode_filter_returns_only_air() {
        let (_dir, db) = seeded_db(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean, Some(100.0)),
            shipment("b", "2024-03-05", TransportMode::Air, Some(200.0)),
            shipment("c", "2024-02-20", TransportMode::Air, Some(300.0)),
        ])
        .await;

        let criteria = SearchCriteria {
            mode: Some("air".to_string()),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;
        assert!(response.success);
        assert_eq!(response.total, 2);
        assert!(response
            .data
            .iter()
            .all(|r| r.mode == Some(TransportMode::Air)));
    }

    #[tokio::test]
    async fn test_date_range_is_inclusive() {
        let (_dir, db) = seeded_db(vec![
            shipment("early", "2024-01-01", TransportMode::Ocean, None),
            shipment("lower", "2024-02-01", TransportMode::Ocean, None),
            shipment("upper", "2024-02-29", TransportMode::Ocean, None),
            shipment("late", "2024-03-01", TransportMode::Ocean, None),
        ])
        .await;

        let criteria = SearchCriteria {
            date_from: Some(date("2024-02-01")),
            date_to: Some(date("2024-02-29")),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;
        assert_eq!(response.total, 2);
        for record in &response.data {
            let d = record.shipment_date.unwrap();
            assert!(d >= date("2024-02-01") && d <= date("2024-02-29"));
        }
    }

    #[tokio::test]
    async fn test_has_more_pagination_window() {
        let records = (0..7)
            .map(|i| {
                shipment(
                    &format!("s{}", i),
                    &format!("2024-01-0{}", i + 1),
                    TransportMode::Ocean,
                    Some(10.0),
                )
            })
            .collect();
        let (_dir, db) = seeded_db(records).await;

        let criteria = SearchCriteria {
            limit: Some(3),
            offset: Some(0),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;
        assert_eq!(response.data.len(), 3);
        assert_eq!(response.total, 7);
        assert!(response.pagination.has_more);

        // Boundary: offset + len == total => hasMore is false
        let criteria = SearchCriteria {
            limit: Some(3),
            offset: Some(4),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;
        assert_eq!(response.data.len(), 3);
        assert!(!response.pagination.has_more);
    }

    #[tokio::test]
    async fn test_offset_beyond_total_is_success_with_empty_page() {
        let (_dir, db) = seeded_db(vec![shipment(
            "only",
            "2024-01-01",
            TransportMode::Air,
            Some(1.0),
        )])
        .await;

        let criteria = SearchCriteria {
            offset: Some(100),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;
        assert!(response.success);
        assert!(response.data.is_empty());
        assert_eq!(response.total, 1);
        assert!(!response.pagination.has_more);
    }

    #[tokio::test]
    async fn test_ocean_min_value_scenario() {
        // 3 ocean records at/above $10k, 5 below
        let mut records = vec![
            shipment("q1", "2024-05-01", TransportMode::Ocean, Some(10_000.0)),
            shipment("q2", "2024-05-02", TransportMode::Ocean, Some(25_000.0)),
            shipment("q3", "2024-05-03", TransportMode::Ocean, Some(90_000.0)),
        ];
        for i in 0..5 {
            records.push(shipment(
                &format!("cheap{}", i),
                "2024-04-01",
                TransportMode::Ocean,
                Some(500.0),
            ));
        }
        let (_dir, db) = seeded_db(records).await;

        let criteria = SearchCriteria {
            mode: Some("ocean".to_string()),
            min_value: Some(10_000.0),
            limit: Some(10),
            offset: Some(0),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;
        assert!(response.success);
        assert_eq!(response.total, 3);
        assert_eq!(response.data.len(), 3);
        assert!(!response.pagination.has_more);
        for record in &response.data {
            assert_eq!(record.mode, Some(TransportMode::Ocean));
            assert!(record.value_usd.unwrap() >= 10_000.0);
        }
    }

    #[tokio::test]
    async fn test_idempotent_against_unchanged_store() {
        let (_dir, db) = seeded_db(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean, Some(100.0)),
            shipment("b", "2024-03-05", TransportMode::Air, Some(200.0)),
        ])
        .await;

        let criteria = SearchCriteria {
            mode: Some("all".to_string()),
            ..Default::default()
        };
        let first = execute_search_with(&db, &criteria, &options()).await;
        let second = execute_search_with(&db, &criteria, &options()).await;
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_primary_query_failure_returns_zeroed_shape() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.db");
        let db = ShipmentDatabase::open(path.to_str().unwrap()).unwrap();

        // Break the store out from under the pipeline
        let raw = rusqlite::Connection::open(&path).unwrap();
        raw.execute("DROP TABLE shipments", []).unwrap();

        let response = execute_search_with(&db, &SearchCriteria::default(), &options()).await;
        assert!(!response.success);
        assert!(response.data.is_empty());
        assert_eq!(response.total, 0);
        assert_eq!(response.summary, SearchSummary::zero());
        assert!(!response.pagination.has_more);
        assert_eq!(response.pagination.limit, 25);
    }

    #[tokio::test]
    async fn test_summary_legacy_scope_ignores_non_text_filters() {
        let (_dir, db) = seeded_db(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean, Some(100.0)),
            shipment("b", "2024-03-05", TransportMode::Air, Some(200.0)),
        ])
        .await;

        let criteria = SearchCriteria {
            mode: Some("ocean".to_string()),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;

        // Page is ocean-only but the legacy summary spans both modes
        assert_eq!(response.total, 1);
        assert_eq!(response.summary.air_count, 1);
        assert_eq!(response.summary.ocean_count, 1);
        assert!((response.summary.total_value - 300.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_summary_full_scope_matches_page_population() {
        let (_dir, db) = seeded_db(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean, Some(100.0)),
            shipment("b", "2024-03-05", TransportMode::Air, Some(200.0)),
        ])
        .await;

        let criteria = SearchCriteria {
            mode: Some("ocean".to_string()),
            ..Default::default()
        };
        let mut opts = options();
        opts.summary_matches_filters = true;
        let response = execute_search_with(&db, &criteria, &opts).await;

        assert_eq!(response.summary.air_count, 0);
        assert_eq!(response.summary.ocean_count, 1);
        assert!((response.summary.total_value - 100.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_limit_clamped_to_maximum() {
        let (_dir, db) = seeded_db(vec![shipment(
            "a",
            "2024-01-10",
            TransportMode::Ocean,
            Some(100.0),
        )])
        .await;

        let criteria = SearchCriteria {
            limit: Some(100_000),
            ..Default::default()
        };
        let response = execute_search_with(&db, &criteria, &options()).await;
        assert_eq!(response.pagination.limit, options().max_page_size);
    }
}
