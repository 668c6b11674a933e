// Database configuration schema

use crate::config_struct;

config_struct! {
    /// Record store configuration
    pub struct DatabaseConfig {
        /// Path to the SQLite shipment store
        path: String = "data/shipments.db".to_string(),
    }
}
