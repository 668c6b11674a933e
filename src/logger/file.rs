/// File persistence for log output
///
/// Mirrors every accepted log line into a date-stamped file under logs/.
/// Writes are buffered; `flush_file_logging` must be called on shutdown.
use std::fs::OpenOptions;
use std::io::{BufWriter, Write};
use std::sync::Mutex;

use chrono::Local;
use once_cell::sync::Lazy;

use crate::paths;

static LOG_FILE: Lazy<Mutex<Option<BufWriter<std::fs::File>>>> = Lazy::new(|| Mutex::new(None));

/// Open the log file sink. Failure to open is reported to stderr and file
/// logging is disabled; console logging continues.
pub fn init_file_logging() {
    let file_name = format!("tradeintel-{}.log", Local::now().format("%Y-%m-%d"));
    let path = paths::get_logs_dir().join(file_name);

    match OpenOptions::new().create(true).append(true).open(&path) {
        Ok(file) => {
            if let Ok(mut guard) = LOG_FILE.lock() {
                *guard = Some(BufWriter::new(file));
            }
        }
        Err(e) => {
            eprintln!("Failed to open log file {}: {}", path.display(), e);
        }
    }
}

pub fn write_to_file(line: &str) {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writeln!(writer, "{}", line);
        }
    }
}

pub fn flush_file_logging() {
    if let Ok(mut guard) = LOG_FILE.lock() {
        if let Some(writer) = guard.as_mut() {
            let _ = writer.flush();
        }
    }
}
