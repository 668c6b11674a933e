/// Configuration utilities - loading, reloading, and access helpers
///
/// - Loading configuration from disk (TOML)
/// - Hot-reloading configuration at runtime
/// - Thread-safe access helpers
use std::sync::RwLock;

use once_cell::sync::OnceCell;

use super::schemas::Config;
use crate::arguments;
use crate::logger::{self, LogTag};

/// Global configuration instance
///
/// Single source of truth for all configuration values. Access it through
/// `with_config` below.
pub static CONFIG: OnceCell<RwLock<Config>> = OnceCell::new();

/// Default configuration file path
pub const CONFIG_FILE_PATH: &str = "data/config.toml";

/// Load configuration from disk and initialize the global CONFIG
///
/// Called once at startup. Honors `--config <path>`; if the file doesn't
/// exist, schema defaults are used.
pub fn load_config() -> Result<(), String> {
    let path = arguments::get_arg_value("--config").unwrap_or_else(|| CONFIG_FILE_PATH.to_string());
    load_config_from_path(&path)
}

/// Load configuration from a specific file path
pub fn load_config_from_path(path: &str) -> Result<(), String> {
    let config = read_config_file(path)?;

    CONFIG
        .set(RwLock::new(config))
        .map_err(|_| "Config already initialized".to_string())?;

    logger::debug(LogTag::Config, &format!("Configuration loaded from '{}'", path));
    Ok(())
}

/// Reload configuration from disk without restarting
///
/// The configuration is atomically replaced, so reads are always consistent.
pub fn reload_config_from_path(path: &str) -> Result<(), String> {
    if !std::path::Path::new(path).exists() {
        return Err(format!("Config file '{}' not found", path));
    }
    let new_config = read_config_file(path)?;

    if let Some(config_lock) = CONFIG.get() {
        let mut config = config_lock
            .write()
            .map_err(|e| format!("Failed to acquire config write lock: {}", e))?;
        *config = new_config;
        Ok(())
    } else {
        Err("Config not initialized. Call load_config() first.".to_string())
    }
}

/// Run a closure against the current configuration
///
/// Falls back to schema defaults if the global config was never initialized
/// (unit tests exercise subsystems without a bootstrap).
pub fn with_config<T>(f: impl FnOnce(&Config) -> T) -> T {
    if let Some(lock) = CONFIG.get() {
        if let Ok(config) = lock.read() {
            return f(&config);
        }
    }
    f(&Config::default())
}

fn read_config_file(path: &str) -> Result<Config, String> {
    if std::path::Path::new(path).exists() {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| format!("Failed to read config file '{}': {}", path, e))?;

        toml::from_str::<Config>(&contents)
            .map_err(|e| format!("Failed to parse config file '{}': {}", path, e))
    } else {
        eprintln!("Config file '{}' not found, using default values", path);
        Ok(Config::default())
    }
}
