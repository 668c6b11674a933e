// Shipment store persistence module.
//
// SQLite-backed record store for shipments and companies. The search
// pipeline treats this as a read-only query service; writes happen through
// the ingest surface only.
use std::sync::{Arc, Mutex};

use chrono::NaiveDate;
use once_cell::sync::OnceCell;
use rusqlite::{params, params_from_iter, types::Value as SqlValue, Connection, Row};

use crate::config::with_config;
use crate::core::{IntelError, IntelResult};
use crate::logger::{self, LogTag};
use crate::shipments::types::{CompanyRecord, ShipmentRecord, StoreStats, TransportMode};

/// Column list shared by every shipment SELECT so row projection stays in
/// one place.
const SHIPMENT_COLUMNS: &str = "id, mode, shipment_date, company_name, origin_country, \
     destination_country, destination_city, hs_code, carrier, value_usd, weight_kg, \
     description, commodity_description, is_likely_air_shipper";

/// SQLite database for shipment and company storage
#[derive(Clone)]
pub struct ShipmentDatabase {
    connection: Arc<Mutex<Connection>>,
}

/// Configure database connection for performance and concurrency
fn configure_database_connection(connection: &Connection) -> Result<(), rusqlite::Error> {
    // Write-Ahead Logging for concurrent readers
    connection.pragma_update(None, "journal_mode", "WAL")?;
    connection.pragma_update(None, "synchronous", "NORMAL")?;
    connection.pragma_update(None, "temp_store", "memory")?;
    connection.busy_timeout(std::time::Duration::from_millis(30_000))?;
    Ok(())
}

impl ShipmentDatabase {
    /// Open (creating if necessary) the store at the given path
    pub fn open(path: &str) -> IntelResult<Self> {
        let connection = Connection::open(path)?;
        configure_database_connection(&connection)?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS shipments (
                id TEXT PRIMARY KEY,
                mode TEXT,
                shipment_date TEXT,
                company_name TEXT NOT NULL,
                origin_country TEXT,
                destination_country TEXT,
                destination_city TEXT,
                hs_code TEXT,
                carrier TEXT,
                value_usd REAL,
                weight_kg REAL,
                description TEXT,
                commodity_description TEXT,
                is_likely_air_shipper INTEGER NOT NULL DEFAULT 0
            )",
            [],
        )?;

        connection.execute(
            "CREATE TABLE IF NOT EXISTS companies (
                id TEXT PRIMARY KEY,
                name TEXT NOT NULL,
                country TEXT,
                industry TEXT
            )",
            [],
        )?;

        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_shipments_date ON shipments (shipment_date DESC)",
            [],
        )?;
        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_shipments_company ON shipments (company_name)",
            [],
        )?;
        connection.execute(
            "CREATE INDEX IF NOT EXISTS idx_shipments_mode ON shipments (mode)",
            [],
        )?;

        Ok(Self {
            connection: Arc::new(Mutex::new(connection)),
        })
    }

    /// Insert or replace a batch of shipment records
    ///
    /// Rejects records violating store invariants (negative value/weight)
    /// before touching the store.
    pub async fn add_shipments(&self, records: Vec<ShipmentRecord>) -> IntelResult<usize> {
        for record in &records {
            if record.value_usd.map(|v| v < 0.0).unwrap_or(false) {
                return Err(IntelError::InvalidInput(format!(
                    "shipment {} has negative value_usd",
                    record.id
                )));
            }
            if record.weight_kg.map(|w| w < 0.0).unwrap_or(false) {
                return Err(IntelError::InvalidInput(format!(
                    "shipment {} has negative weight_kg",
                    record.id
                )));
            }
        }

        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = db.lock_connection()?;
            let tx = connection
                .transaction()
                .map_err(|e| IntelError::Query(format!("Failed to open transaction: {}", e)))?;

            let mut inserted = 0usize;
            {
                let mut stmt = tx
                    .prepare(
                        "INSERT OR REPLACE INTO shipments (
                            id, mode, shipment_date, company_name, origin_country,
                            destination_country, destination_city, hs_code, carrier,
                            value_usd, weight_kg, description, commodity_description,
                            is_likely_air_shipper
                        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
                    )
                    .map_err(|e| IntelError::Query(format!("Failed to prepare insert: {}", e)))?;

                for record in &records {
                    stmt.execute(params![
                        record.id,
                        record.mode.map(|m| m.as_str()),
                        record.shipment_date.map(|d| d.to_string()),
                        record.company_name,
                        record.origin_country,
                        record.destination_country,
                        record.destination_city,
                        record.hs_code,
                        record.carrier,
                        record.value_usd,
                        record.weight_kg,
                        record.description,
                        record.commodity_description,
                        record.is_likely_air_shipper as i64,
                    ])
                    .map_err(|e| IntelError::Query(format!("Failed to insert shipment: {}", e)))?;
                    inserted += 1;
                }
            }

            tx.commit()
                .map_err(|e| IntelError::Query(format!("Failed to commit insert: {}", e)))?;
            Ok(inserted)
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    /// Insert or replace a batch of company records
    pub async fn add_companies(&self, records: Vec<CompanyRecord>) -> IntelResult<usize> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let mut connection = db.lock_connection()?;
            let tx = connection
                .transaction()
                .map_err(|e| IntelError::Query(format!("Failed to open transaction: {}", e)))?;

            let mut inserted = 0usize;
            {
                let mut stmt = tx
                    .prepare(
                        "INSERT OR REPLACE INTO companies (id, name, country, industry)
                         VALUES (?1, ?2, ?3, ?4)",
                    )
                    .map_err(|e| IntelError::Query(format!("Failed to prepare insert: {}", e)))?;

                for record in &records {
                    stmt.execute(params![
                        record.id,
                        record.name,
                        record.country,
                        record.industry,
                    ])
                    .map_err(|e| IntelError::Query(format!("Failed to insert company: {}", e)))?;
                    inserted += 1;
                }
            }

            tx.commit()
                .map_err(|e| IntelError::Query(format!("Failed to commit insert: {}", e)))?;
            Ok(inserted)
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    /// Fetch one page of shipments matching a compiled WHERE clause,
    /// ordered by shipment date descending. Sub-date order is unspecified.
    pub async fn query_page(
        &self,
        where_sql: String,
        params: Vec<SqlValue>,
        limit: usize,
        offset: usize,
    ) -> IntelResult<Vec<ShipmentRecord>> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let connection = db.lock_connection()?;

            let sql = format!(
                "SELECT {} FROM shipments{} ORDER BY shipment_date DESC LIMIT ? OFFSET ?",
                SHIPMENT_COLUMNS, where_sql
            );

            let mut stmt = connection
                .prepare(&sql)
                .map_err(|e| IntelError::Query(format!("Failed to prepare page query: {}", e)))?;

            let mut all_params = params;
            all_params.push(SqlValue::Integer(limit as i64));
            all_params.push(SqlValue::Integer(offset as i64));

            let mut rows = stmt
                .query(params_from_iter(all_params))
                .map_err(|e| IntelError::Query(format!("Failed to execute page query: {}", e)))?;

            let mut records = Vec::new();
            while let Some(row) = rows
                .next()
                .map_err(|e| IntelError::Query(format!("Failed to read row: {}", e)))?
            {
                records.push(row_to_shipment(row)?);
            }
            Ok(records)
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    /// Exact count of all rows matching a compiled WHERE clause,
    /// independent of the page window.
    pub async fn count_matching(
        &self,
        where_sql: String,
        params: Vec<SqlValue>,
    ) -> IntelResult<u64> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let connection = db.lock_connection()?;

            let sql = format!("SELECT COUNT(*) FROM shipments{}", where_sql);
            let mut stmt = connection
                .prepare(&sql)
                .map_err(|e| IntelError::Query(format!("Failed to prepare count query: {}", e)))?;

            let total: i64 = stmt
                .query_row(params_from_iter(params), |row| row.get(0))
                .map_err(|e| IntelError::Query(format!("Failed to execute count query: {}", e)))?;

            Ok(total.max(0) as u64)
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    /// Aggregate mode counts and value sum over all rows matching a compiled
    /// WHERE clause. Missing values count as zero.
    pub async fn summarize_matching(
        &self,
        where_sql: String,
        params: Vec<SqlValue>,
    ) -> IntelResult<(u64, u64, f64)> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let connection = db.lock_connection()?;

            let sql = format!(
                "SELECT \
                     COALESCE(SUM(CASE WHEN mode = 'air' THEN 1 ELSE 0 END), 0), \
                     COALESCE(SUM(CASE WHEN mode = 'ocean' THEN 1 ELSE 0 END), 0), \
                     COALESCE(SUM(COALESCE(value_usd, 0.0)), 0.0) \
                 FROM shipments{}",
                where_sql
            );

            let mut stmt = connection.prepare(&sql).map_err(|e| {
                IntelError::Aggregation(format!("Failed to prepare summary query: {}", e))
            })?;

            let (air, ocean, value): (i64, i64, f64) = stmt
                .query_row(params_from_iter(params), |row| {
                    Ok((row.get(0)?, row.get(1)?, row.get(2)?))
                })
                .map_err(|e| {
                    IntelError::Aggregation(format!("Failed to execute summary query: {}", e))
                })?;

            Ok((air.max(0) as u64, ocean.max(0) as u64, value))
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    /// Case-insensitive substring lookup over company names. Results keep
    /// store-native ordering; callers get at most `limit` rows.
    pub async fn find_companies(
        &self,
        needle: String,
        limit: usize,
    ) -> IntelResult<Vec<CompanyRecord>> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let connection = db.lock_connection()?;

            let pattern = format!("%{}%", needle.trim().to_lowercase());
            let mut stmt = connection
                .prepare(
                    "SELECT id, name, country, industry FROM companies \
                     WHERE LOWER(name) LIKE ?1 LIMIT ?2",
                )
                .map_err(|e| {
                    IntelError::Query(format!("Failed to prepare company lookup: {}", e))
                })?;

            let mut rows = stmt
                .query(params![pattern, limit as i64])
                .map_err(|e| IntelError::Query(format!("Failed to execute company lookup: {}", e)))?;

            let mut records = Vec::new();
            while let Some(row) = rows
                .next()
                .map_err(|e| IntelError::Query(format!("Failed to read row: {}", e)))?
            {
                records.push(CompanyRecord {
                    id: row.get(0)?,
                    name: row.get(1)?,
                    country: row.get(2)?,
                    industry: row.get(3)?,
                });
            }
            Ok(records)
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    /// Deduplicated, alphabetically sorted union of origin and destination
    /// countries across all shipments. Full scan on every call; no cache.
    pub async fn distinct_countries(&self) -> IntelResult<Vec<String>> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let connection = db.lock_connection()?;

            let mut stmt = connection
                .prepare(
                    "SELECT origin_country AS country FROM shipments \
                     WHERE origin_country IS NOT NULL AND origin_country != '' \
                     UNION \
                     SELECT destination_country FROM shipments \
                     WHERE destination_country IS NOT NULL AND destination_country != '' \
                     ORDER BY country",
                )
                .map_err(|e| {
                    IntelError::Query(format!("Failed to prepare countries query: {}", e))
                })?;

            let mut rows = stmt
                .query([])
                .map_err(|e| IntelError::Query(format!("Failed to execute countries query: {}", e)))?;

            let mut countries = Vec::new();
            while let Some(row) = rows
                .next()
                .map_err(|e| IntelError::Query(format!("Failed to read row: {}", e)))?
            {
                countries.push(row.get(0)?);
            }
            Ok(countries)
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    /// Store-wide counts for the admin surface
    pub async fn get_stats(&self) -> IntelResult<StoreStats> {
        let db = self.clone();
        tokio::task::spawn_blocking(move || {
            let connection = db.lock_connection()?;

            let (total, air, ocean, latest): (i64, i64, i64, Option<String>) = connection
                .query_row(
                    "SELECT COUNT(*), \
                         COALESCE(SUM(CASE WHEN mode = 'air' THEN 1 ELSE 0 END), 0), \
                         COALESCE(SUM(CASE WHEN mode = 'ocean' THEN 1 ELSE 0 END), 0), \
                         MAX(shipment_date) \
                     FROM shipments",
                    [],
                    |row| Ok((row.get(0)?, row.get(1)?, row.get(2)?, row.get(3)?)),
                )
                .map_err(|e| IntelError::Query(format!("Failed to query stats: {}", e)))?;

            let companies: i64 = connection
                .query_row("SELECT COUNT(*) FROM companies", [], |row| row.get(0))
                .map_err(|e| IntelError::Query(format!("Failed to count companies: {}", e)))?;

            Ok(StoreStats {
                total_shipments: total.max(0) as u64,
                air_shipments: air.max(0) as u64,
                ocean_shipments: ocean.max(0) as u64,
                total_companies: companies.max(0) as u64,
                latest_shipment_date: latest.and_then(|s| parse_stored_date(&s)),
            })
        })
        .await
        .map_err(|e| IntelError::Task(e.to_string()))?
    }

    fn lock_connection(&self) -> IntelResult<std::sync::MutexGuard<'_, Connection>> {
        self.connection
            .lock()
            .map_err(|e| IntelError::Query(format!("Database lock error: {}", e)))
    }
}

/// Normalization step: project a raw store row into the canonical record
/// shape. Every expected field is present in the result even if the store
/// omits or mangles it.
fn row_to_shipment(row: &Row<'_>) -> IntelResult<ShipmentRecord> {
    let mode: Option<String> = row.get(1)?;
    let date: Option<String> = row.get(2)?;
    let air_flag: Option<i64> = row.get(13)?;

    Ok(ShipmentRecord {
        id: row.get(0)?,
        mode: mode.as_deref().and_then(TransportMode::from_str),
        shipment_date: date.as_deref().and_then(parse_stored_date),
        company_name: row.get::<_, Option<String>>(3)?.unwrap_or_default(),
        origin_country: row.get(4)?,
        destination_country: row.get(5)?,
        destination_city: row.get(6)?,
        hs_code: row.get(7)?,
        carrier: row.get(8)?,
        value_usd: row.get(9)?,
        weight_kg: row.get(10)?,
        description: row.get(11)?,
        commodity_description: row.get(12)?,
        is_likely_air_shipper: air_flag.map(|v| v != 0).unwrap_or(false),
    })
}

fn parse_stored_date(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").ok()
}

// =============================================================================
// GLOBAL DATABASE HANDLE
// =============================================================================

static GLOBAL_DATABASE: OnceCell<ShipmentDatabase> = OnceCell::new();

/// Open the store at the configured path and install the global handle
pub fn init_global_database() -> IntelResult<()> {
    let path = with_config(|cfg| cfg.database.path.clone());
    let database = ShipmentDatabase::open(&path)?;

    logger::info(
        LogTag::Database,
        &format!("Shipment store opened at '{}'", path),
    );

    GLOBAL_DATABASE
        .set(database)
        .map_err(|_| IntelError::Config("Database already initialized".to_string()))
}

/// Get a handle to the global store
pub fn get_global_database() -> IntelResult<ShipmentDatabase> {
    GLOBAL_DATABASE
        .get()
        .cloned()
        .ok_or_else(|| IntelError::Config("Database not initialized".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_db() -> (tempfile::TempDir, ShipmentDatabase) {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.db");
        let db = ShipmentDatabase::open(path.to_str().unwrap()).unwrap();
        (dir, db)
    }

    fn shipment(id: &str, date: &str, mode: TransportMode) -> ShipmentRecord {
        ShipmentRecord {
            id: id.to_string(),
            mode: Some(mode),
            shipment_date: NaiveDate::parse_from_str(date, "%Y-%m-%d").ok(),
            company_name: format!("Company {}", id),
            origin_country: Some("China".to_string()),
            destination_country: Some("USA".to_string()),
            destination_city: Some("Los Angeles".to_string()),
            hs_code: Some("850440".to_string()),
            carrier: Some("Maersk".to_string()),
            value_usd: Some(1000.0),
            weight_kg: Some(250.0),
            description: Some("power supplies".to_string()),
            commodity_description: Some("static converters".to_string()),
            is_likely_air_shipper: matches!(mode, TransportMode::Air),
        }
    }

    #[tokio::test]
    async fn test_insert_and_page_ordering() {
        let (_dir, db) = test_db();
        db.add_shipments(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean),
            shipment("b", "2024-03-05", TransportMode::Air),
            shipment("c", "2024-02-20", TransportMode::Ocean),
        ])
        .await
        .unwrap();

        let page = db
            .query_page(String::new(), Vec::new(), 25, 0)
            .await
            .unwrap();
        let ids: Vec<&str> = page.iter().map(|r| r.id.as_str()).collect();
        assert_eq!(ids, vec!["b", "c", "a"]);

        let total = db.count_matching(String::new(), Vec::new()).await.unwrap();
        assert_eq!(total, 3);
    }

    #[tokio::test]
    async fn test_summarize_counts_and_value() {
        let (_dir, db) = test_db();
        let mut no_value = shipment("n", "2024-01-01", TransportMode::Air);
        no_value.value_usd = None;
        db.add_shipments(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean),
            shipment("b", "2024-03-05", TransportMode::Air),
            no_value,
        ])
        .await
        .unwrap();

        let (air, ocean, value) = db
            .summarize_matching(String::new(), Vec::new())
            .await
            .unwrap();
        assert_eq!(air, 2);
        assert_eq!(ocean, 1);
        assert!((value - 2000.0).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn test_negative_value_rejected() {
        let (_dir, db) = test_db();
        let mut bad = shipment("bad", "2024-01-01", TransportMode::Ocean);
        bad.value_usd = Some(-5.0);

        let err = db.add_shipments(vec![bad]).await.unwrap_err();
        assert!(matches!(err, IntelError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn test_company_lookup_substring() {
        let (_dir, db) = test_db();
        db.add_companies(vec![
            CompanyRecord {
                id: "c1".to_string(),
                name: "Global Freight Solutions".to_string(),
                country: Some("USA".to_string()),
                industry: Some("Logistics".to_string()),
            },
            CompanyRecord {
                id: "c2".to_string(),
                name: "Pacific Imports".to_string(),
                country: None,
                industry: None,
            },
        ])
        .await
        .unwrap();

        let hits = db.find_companies("freight".to_string(), 25).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].name, "Global Freight Solutions");

        let all = db.find_companies("".to_string(), 25).await.unwrap();
        assert_eq!(all.len(), 2);
    }

    #[tokio::test]
    async fn test_distinct_countries_sorted_deduplicated() {
        let (_dir, db) = test_db();
        let mut a = shipment("a", "2024-01-10", TransportMode::Ocean);
        a.origin_country = Some("China".to_string());
        a.destination_country = Some("USA".to_string());
        let mut b = shipment("b", "2024-01-11", TransportMode::Air);
        b.origin_country = Some("USA".to_string());
        b.destination_country = Some("Germany".to_string());
        db.add_shipments(vec![a, b]).await.unwrap();

        let countries = db.distinct_countries().await.unwrap();
        assert_eq!(countries, vec!["China", "Germany", "USA"]);
    }

    #[tokio::test]
    async fn test_stats() {
        let (_dir, db) = test_db();
        db.add_shipments(vec![
            shipment("a", "2024-01-10", TransportMode::Ocean),
            shipment("b", "2024-03-05", TransportMode::Air),
        ])
        .await
        .unwrap();

        let stats = db.get_stats().await.unwrap();
        assert_eq!(stats.total_shipments, 2);
        assert_eq!(stats.air_shipments, 1);
        assert_eq!(stats.ocean_shipments, 1);
        assert_eq!(
            stats.latest_shipment_date,
            NaiveDate::parse_from_str("2024-03-05", "%Y-%m-%d").ok()
        );
    }

    #[tokio::test]
    async fn test_normalization_defaults_missing_fields() {
        let (_dir, db) = test_db();
        let mut sparse = shipment("s", "2024-01-01", TransportMode::Ocean);
        sparse.carrier = None;
        sparse.value_usd = None;
        sparse.description = None;
        db.add_shipments(vec![sparse]).await.unwrap();

        let page = db
            .query_page(String::new(), Vec::new(), 25, 0)
            .await
            .unwrap();
        assert_eq!(page[0].carrier, None);
        assert_eq!(page[0].value_usd, None);
        assert_eq!(page[0].mode, Some(TransportMode::Ocean));
    }
}
