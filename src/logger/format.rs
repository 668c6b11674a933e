//! Log formatting and output with ANSI colors
//!
//! Handles colorized console output plus plain-text mirroring to the log
//! file. Broken pipes (e.g. `tradeintel | head`) are swallowed rather than
//! panicking.

use chrono::Local;
use colored::*;
use std::io::{stdout, ErrorKind, Write};

use super::file::write_to_file;
use super::tags::LogTag;

/// Column widths for aligned output
const TAG_WIDTH: usize = 10;

/// Format and output a log message to console and file
pub fn format_and_log(tag: LogTag, level: &str, message: &str) {
    let now = Local::now();
    let time = now.format("%H:%M:%S").to_string();

    let console_line = format!(
        "{} [{}] [{}] {}",
        time.dimmed(),
        format_tag(&tag),
        format_level(level),
        message
    );
    print_stdout_safe(&console_line);

    let timestamp = now.format("%Y-%m-%d %H:%M:%S").to_string();
    let file_line = format!(
        "{} [{}] [{}] {}",
        timestamp,
        tag.to_plain_string(),
        level,
        message
    );
    write_to_file(&file_line);
}

/// Format a tag with its subsystem color
fn format_tag(tag: &LogTag) -> ColoredString {
    let padded = format!("{:<width$}", tag.to_plain_string(), width = TAG_WIDTH);
    match tag {
        LogTag::System => padded.bright_yellow().bold(),
        LogTag::Config => padded.bright_magenta().bold(),
        LogTag::Database => padded.bright_blue().bold(),
        LogTag::Search => padded.bright_green().bold(),
        LogTag::Shipments => padded.bright_cyan().bold(),
        LogTag::Webserver => padded.bright_white().bold(),
    }
}

/// Format a level string with severity color
fn format_level(level: &str) -> ColoredString {
    match level {
        "ERROR" => level.bright_red().bold(),
        "WARNING" => level.yellow(),
        "DEBUG" => level.dimmed(),
        "VERBOSE" => level.dimmed(),
        _ => level.normal(),
    }
}

/// Print to stdout, ignoring broken pipe errors
fn print_stdout_safe(line: &str) {
    let mut out = stdout();
    if let Err(e) = writeln!(out, "{}", line) {
        if e.kind() != ErrorKind::BrokenPipe {
            eprintln!("{}", line);
        }
    }
}
