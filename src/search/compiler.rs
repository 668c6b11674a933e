//! Filter compiler: turns a sparse `SearchCriteria` into predicate
//! descriptors, then folds them into a parameterized SQL WHERE clause.
//!
//! Filters are a small, fixed, flat surface, so each one compiles to an
//! independent predicate joined conjunctively; there is no expression tree.
//! Keeping the descriptor list as plain data keeps the filter logic pure and
//! testable without a live store.

use rusqlite::types::Value as SqlValue;

use crate::search::types::{SearchCriteria, MODE_ALL};

/// Columns searched by the free-text query (logical OR across them)
const TEXT_SEARCH_COLUMNS: &[&str] = &["company_name", "description", "commodity_description"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    /// Exact equality
    Eq,
    /// Inclusive lower bound
    Ge,
    /// Inclusive upper bound
    Le,
    /// Case-insensitive prefix match
    Prefix,
    /// Case-insensitive substring match
    Contains,
}

/// One discrete filter condition against a named store column
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    Compare {
        column: &'static str,
        op: CompareOp,
        value: SqlValue,
    },
    /// Free-text search: case-insensitive substring OR-ed across columns
    TextSearch {
        columns: &'static [&'static str],
        needle: String,
    },
}

/// Compile criteria into the full predicate list applied by the primary
/// query. Absent fields compile to nothing; the mode sentinel "all" is
/// skipped.
pub fn compile(criteria: &SearchCriteria) -> Vec<Predicate> {
    let mut predicates = Vec::new();

    if let Some(needle) = non_empty(&criteria.query) {
        predicates.push(Predicate::TextSearch {
            columns: TEXT_SEARCH_COLUMNS,
            needle: needle.to_lowercase(),
        });
    }

    if let Some(mode) = non_empty(&criteria.mode) {
        let mode = mode.to_lowercase();
        if mode != MODE_ALL {
            predicates.push(Predicate::Compare {
                column: "mode",
                op: CompareOp::Eq,
                value: SqlValue::Text(mode),
            });
        }
    }

    if let Some(country) = non_empty(&criteria.origin_country) {
        predicates.push(Predicate::Compare {
            column: "origin_country",
            op: CompareOp::Eq,
            value: SqlValue::Text(country),
        });
    }

    if let Some(country) = non_empty(&criteria.destination_country) {
        predicates.push(Predicate::Compare {
            column: "destination_country",
            op: CompareOp::Eq,
            value: SqlValue::Text(country),
        });
    }

    if let Some(city) = non_empty(&criteria.destination_city) {
        predicates.push(Predicate::Compare {
            column: "destination_city",
            op: CompareOp::Contains,
            value: SqlValue::Text(city.to_lowercase()),
        });
    }

    if let Some(code) = non_empty(&criteria.hs_code) {
        predicates.push(Predicate::Compare {
            column: "hs_code",
            op: CompareOp::Prefix,
            value: SqlValue::Text(code.to_lowercase()),
        });
    }

    if let Some(carrier) = non_empty(&criteria.carrier) {
        predicates.push(Predicate::Compare {
            column: "carrier",
            op: CompareOp::Contains,
            value: SqlValue::Text(carrier.to_lowercase()),
        });
    }

    if let Some(from) = criteria.date_from {
        predicates.push(Predicate::Compare {
            column: "shipment_date",
            op: CompareOp::Ge,
            value: SqlValue::Text(from.to_string()),
        });
    }

    if let Some(to) = criteria.date_to {
        predicates.push(Predicate::Compare {
            column: "shipment_date",
            op: CompareOp::Le,
            value: SqlValue::Text(to.to_string()),
        });
    }

    if let Some(min) = criteria.min_value {
        predicates.push(Predicate::Compare {
            column: "value_usd",
            op: CompareOp::Ge,
            value: SqlValue::Real(min),
        });
    }

    if let Some(max) = criteria.max_value {
        predicates.push(Predicate::Compare {
            column: "value_usd",
            op: CompareOp::Le,
            value: SqlValue::Real(max),
        });
    }

    if let Some(flag) = criteria.air_shipper {
        predicates.push(Predicate::Compare {
            column: "is_likely_air_shipper",
            op: CompareOp::Eq,
            value: SqlValue::Integer(flag as i64),
        });
    }

    predicates
}

/// Predicate list for the legacy summary scope: only the free-text filter
/// is reapplied, so the summary describes a broader population than the
/// page when other filters are set.
pub fn summary_predicates(criteria: &SearchCriteria) -> Vec<Predicate> {
    match non_empty(&criteria.query) {
        Some(needle) => vec![Predicate::TextSearch {
            columns: TEXT_SEARCH_COLUMNS,
            needle: needle.to_lowercase(),
        }],
        None => Vec::new(),
    }
}

/// Fold predicates into a WHERE clause (leading space included) plus the
/// positional parameter list. An empty predicate list folds to an empty
/// string.
pub fn where_clause(predicates: &[Predicate]) -> (String, Vec<SqlValue>) {
    if predicates.is_empty() {
        return (String::new(), Vec::new());
    }

    let mut fragments = Vec::with_capacity(predicates.len());
    let mut params = Vec::new();

    for predicate in predicates {
        match predicate {
            Predicate::Compare { column, op, value } => {
                let fragment = match op {
                    CompareOp::Eq => format!("{} = ?", column),
                    CompareOp::Ge => format!("{} >= ?", column),
                    CompareOp::Le => format!("{} <= ?", column),
                    CompareOp::Prefix => format!("LOWER({}) LIKE ?", column),
                    CompareOp::Contains => format!("LOWER({}) LIKE ?", column),
                };
                fragments.push(fragment);
                params.push(like_param(op, value));
            }
            Predicate::TextSearch { columns, needle } => {
                let ors: Vec<String> = columns
                    .iter()
                    .map(|column| format!("LOWER({}) LIKE ?", column))
                    .collect();
                fragments.push(format!("({})", ors.join(" OR ")));
                let pattern = format!("%{}%", needle);
                for _ in columns.iter() {
                    params.push(SqlValue::Text(pattern.clone()));
                }
            }
        }
    }

    (format!(" WHERE {}", fragments.join(" AND ")), params)
}

/// Wrap LIKE operands in their wildcard pattern; pass others through
fn like_param(op: &CompareOp, value: &SqlValue) -> SqlValue {
    match (op, value) {
        (CompareOp::Prefix, SqlValue::Text(text)) => SqlValue::Text(format!("{}%", text)),
        (CompareOp::Contains, SqlValue::Text(text)) => SqlValue::Text(format!("%{}%", text)),
        _ => value.clone(),
    }
}

fn non_empty(field: &Option<String>) -> Option<String> {
    field
        .as_ref()
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}
