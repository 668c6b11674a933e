// Config schema submodule - one file per subsystem

use crate::config_struct;

mod database;
mod search;
mod webserver;

pub use database::*;
pub use search::*;
pub use webserver::*;

// ============================================================================
// ROOT CONFIGURATION
// ============================================================================

config_struct! {
    /// Root configuration structure containing all sub-configurations
    pub struct Config {
        /// Database configuration
        database: DatabaseConfig = DatabaseConfig::default(),

        /// Search pipeline configuration
        search: SearchConfig = SearchConfig::default(),

        /// Webserver configuration
        webserver: WebserverConfig = WebserverConfig::default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.search.default_page_size, 25);
        assert_eq!(config.search.max_page_size, 200);
        assert!(!config.search.summary_matches_filters);
        assert_eq!(config.webserver.port, 8080);
        assert_eq!(config.database.path, "data/shipments.db");
    }

    #[test]
    fn test_config_serialization() {
        let config = Config::default();
        let toml_str = toml::to_string_pretty(&config).unwrap();
        assert!(toml_str.contains("[database]"));
        assert!(toml_str.contains("[search]"));
        assert!(toml_str.contains("[webserver]"));
    }

    #[test]
    fn test_partial_file_falls_back_to_defaults() {
        let config: Config = toml::from_str("[webserver]\nport = 9000\n").unwrap();
        assert_eq!(config.webserver.port, 9000);
        assert_eq!(config.search.default_page_size, 25);
    }
}
