/// Shared application state for the webserver
///
/// Holds configuration and process metadata route handlers need. The
/// shipment store itself is reached through its global handle, matching the
/// rest of the codebase.
use std::sync::Arc;

use crate::config::WebserverConfig;

#[derive(Clone)]
pub struct AppState {
    /// Webserver configuration
    pub config: Arc<WebserverConfig>,

    /// Server startup time
    pub startup_time: chrono::DateTime<chrono::Utc>,
}

impl AppState {
    pub fn new(config: WebserverConfig) -> Self {
        Self {
            config: Arc::new(config),
            startup_time: chrono::Utc::now(),
        }
    }

    /// Server uptime in seconds
    pub fn uptime_seconds(&self) -> u64 {
        (chrono::Utc::now() - self.startup_time)
            .num_seconds()
            .max(0) as u64
    }
}
