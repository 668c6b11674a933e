// Webserver configuration schema

use crate::config_struct;

config_struct! {
    /// Webserver configuration for API access
    pub struct WebserverConfig {
        /// Host/IP address to bind. 127.0.0.1 = localhost only,
        /// 0.0.0.0 = all interfaces. Requires restart.
        host: String = "127.0.0.1".to_string(),

        /// Port to bind the webserver. Requires restart.
        port: u16 = 8080,

        /// Allow cross-origin requests (dashboard served elsewhere)
        cors_enabled: bool = true,
    }
}
