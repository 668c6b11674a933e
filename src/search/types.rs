use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::shipments::types::ShipmentRecord;

/// Sentinel mode value meaning "do not filter by mode"
pub const MODE_ALL: &str = "all";

/// The sparse set of optional search parameters a caller supplies.
///
/// Every field is optional; absent limit/offset default to the configured
/// page size (25) and zero when the pipeline resolves them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SearchCriteria {
    /// Free-text query matched against company name and descriptions
    pub query: Option<String>,
    /// "air" | "ocean" | "all" (sentinel, skipped)
    pub mode: Option<String>,
    pub origin_country: Option<String>,
    pub destination_country: Option<String>,
    /// Case-insensitive substring match
    pub destination_city: Option<String>,
    /// Case-insensitive prefix match (HS codes are hierarchical)
    pub hs_code: Option<String>,
    /// Case-insensitive substring match
    pub carrier: Option<String>,
    /// Inclusive lower bound on shipment date
    pub date_from: Option<NaiveDate>,
    /// Inclusive upper bound on shipment date
    pub date_to: Option<NaiveDate>,
    /// Inclusive lower bound on monetary value
    pub min_value: Option<f64>,
    /// Inclusive upper bound on monetary value
    pub max_value: Option<f64>,
    /// Filter on the derived likely-air-shipper flag, only when present
    pub air_shipper: Option<bool>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

/// Aggregate counts/sums describing the filtered population
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchSummary {
    pub air_count: u64,
    pub ocean_count: u64,
    pub total_value: f64,
}

impl SearchSummary {
    pub fn zero() -> Self {
        Self {
            air_count: 0,
            ocean_count: 0,
            total_value: 0.0,
        }
    }
}

/// Pagination metadata echoing the effective page window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaginationInfo {
    #[serde(rename = "hasMore")]
    pub has_more: bool,
    pub limit: usize,
    pub offset: usize,
}

/// The stable caller-facing search result shape.
///
/// Produced on every path: callers must inspect `success` rather than rely
/// on transport-level errors. On failure the shape is fully zeroed; "no
/// results" and "infrastructure failure" are distinguished only by the flag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SearchResponse {
    pub success: bool,
    pub data: Vec<ShipmentRecord>,
    pub total: u64,
    pub summary: SearchSummary,
    pub pagination: PaginationInfo,
}

impl SearchResponse {
    pub fn ok(
        data: Vec<ShipmentRecord>,
        total: u64,
        summary: SearchSummary,
        limit: usize,
        offset: usize,
    ) -> Self {
        let has_more = total > (offset as u64).saturating_add(data.len() as u64);
        Self {
            success: true,
            data,
            total,
            summary,
            pagination: PaginationInfo {
                has_more,
                limit,
                offset,
            },
        }
    }

    /// The uniform failure shape: empty data, zero total, zeroed summary.
    pub fn failed(limit: usize, offset: usize) -> Self {
        Self {
            success: false,
            data: Vec::new(),
            total: 0,
            summary: SearchSummary::zero(),
            pagination: PaginationInfo {
                has_more: false,
                limit,
                offset,
            },
        }
    }
}
