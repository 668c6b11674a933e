/// Centralized argument handling.
///
/// Consolidates command-line argument parsing and debug flag checking so the
/// rest of the codebase never touches `std::env::args` directly.
///
/// Features:
/// - Centralized CMD_ARGS storage with thread-safe access
/// - Debug flag checking functions for all modules
/// - Unified argument parsing utilities
use once_cell::sync::Lazy;
use std::env;
use std::sync::Mutex;

/// Global command-line arguments storage
pub static CMD_ARGS: Lazy<Mutex<Vec<String>>> = Lazy::new(|| Mutex::new(env::args().collect()));

/// Sets the global command-line arguments
/// Used by tests to override the default env::args() collection
pub fn set_cmd_args(args: Vec<String>) {
    if let Ok(mut cmd_args) = CMD_ARGS.lock() {
        *cmd_args = args;
    }
}

/// Gets a copy of the current command-line arguments
pub fn get_cmd_args() -> Vec<String> {
    match CMD_ARGS.lock() {
        Ok(args) => args.clone(),
        Err(_) => env::args().collect(),
    }
}

/// Checks if a specific argument is present in the command line
pub fn has_arg(arg: &str) -> bool {
    get_cmd_args().iter().any(|a| a == arg)
}

/// Gets the value of a command-line argument that follows a flag
/// Returns None if the flag is not found or has no value
pub fn get_arg_value(flag: &str) -> Option<String> {
    let args = get_cmd_args();
    for (i, arg) in args.iter().enumerate() {
        if arg == flag && i + 1 < args.len() {
            return Some(args[i + 1].clone());
        }
    }
    None
}

// =============================================================================
// DEBUG FLAG CHECKING FUNCTIONS
// =============================================================================

/// Search pipeline debug mode
pub fn is_debug_search_enabled() -> bool {
    has_arg("--debug-search")
}

/// Database layer debug mode
pub fn is_debug_database_enabled() -> bool {
    has_arg("--debug-database")
}

/// Webserver debug mode
pub fn is_debug_webserver_enabled() -> bool {
    has_arg("--debug-webserver")
}

/// Config system debug mode
pub fn is_debug_config_enabled() -> bool {
    has_arg("--debug-config")
}

/// Global verbose mode
pub fn is_verbose_enabled() -> bool {
    has_arg("--verbose")
}

/// Quiet mode (warnings and errors only)
pub fn is_quiet_enabled() -> bool {
    has_arg("--quiet")
}

pub mod patterns {
    use super::has_arg;

    pub fn is_help_requested() -> bool {
        has_arg("--help") || has_arg("-h")
    }
}

/// Print usage information for the service binary
pub fn print_help() {
    println!("tradeintel - trade-intelligence shipment search service");
    println!();
    println!("USAGE:");
    println!("  tradeintel [FLAGS]");
    println!();
    println!("FLAGS:");
    println!("  -h, --help            Print this help and exit");
    println!("  --config <path>       Load configuration from <path> (default: data/config.toml)");
    println!("  --quiet               Only show warnings and errors");
    println!("  --verbose             Show verbose trace output");
    println!("  --debug-search        Debug logs for the search pipeline");
    println!("  --debug-database      Debug logs for the database layer");
    println!("  --debug-webserver     Debug logs for the webserver");
    println!("  --debug-config        Debug logs for the config system");
}

/// Print active debug modes at startup so operators can confirm flags took
pub fn print_debug_info() {
    let mut active = Vec::new();
    if is_debug_search_enabled() {
        active.push("search");
    }
    if is_debug_database_enabled() {
        active.push("database");
    }
    if is_debug_webserver_enabled() {
        active.push("webserver");
    }
    if is_debug_config_enabled() {
        active.push("config");
    }
    if !active.is_empty() {
        println!("Debug modes enabled: {}", active.join(", "));
    }
}
