/// Filesystem layout for runtime data.
///
/// All paths are relative to the working directory. Directories must exist
/// before the logger is initialized (the file sink opens eagerly).
use std::fs;
use std::path::PathBuf;

pub const DATA_DIR: &str = "data";
pub const LOGS_DIR: &str = "logs";

pub fn get_logs_dir() -> PathBuf {
    PathBuf::from(LOGS_DIR)
}

/// Create every directory the service writes into. Called once at startup,
/// before logger initialization.
pub fn ensure_all_directories() -> Result<(), String> {
    for dir in [DATA_DIR, LOGS_DIR] {
        fs::create_dir_all(dir)
            .map_err(|e| format!("Failed to create directory '{}': {}", dir, e))?;
    }
    Ok(())
}
