/// Core logging implementation with automatic filtering
///
/// Decides whether a message should be displayed, then delegates to the
/// format module for output.
use super::config::{get_logger_config, is_debug_enabled_for_tag};
use super::levels::LogLevel;
use super::tags::LogTag;

/// Check if a log message should be displayed
///
/// Filtering rules:
/// 1. Errors are always shown
/// 2. Check against minimum log level threshold
/// 3. Debug level additionally requires --debug-<module> for that tag
pub fn should_log(tag: &LogTag, level: LogLevel) -> bool {
    let config = get_logger_config();

    if level == LogLevel::Error {
        return true;
    }

    if level > config.min_level {
        return false;
    }

    if level == LogLevel::Debug {
        return is_debug_enabled_for_tag(tag) || config.min_level == LogLevel::Verbose;
    }

    true
}

pub fn log_internal(tag: LogTag, level: LogLevel, message: &str) {
    if !should_log(&tag, level) {
        return;
    }

    super::format::format_and_log(tag, level.as_str(), message);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::logger::config::{set_logger_config, LoggerConfig};

    // Single test: the logger config is process-global, so the rules are
    // exercised sequentially to avoid cross-test interference.
    #[test]
    fn test_filtering_rules() {
        set_logger_config(LoggerConfig::default());
        assert!(should_log(&LogTag::System, LogLevel::Error));
        assert!(should_log(&LogTag::Search, LogLevel::Info));
        assert!(!should_log(&LogTag::Search, LogLevel::Debug));
        assert!(!should_log(&LogTag::Search, LogLevel::Verbose));

        let mut config = LoggerConfig::default();
        config.min_level = LogLevel::Debug;
        config.debug_tags.insert("search".to_string());
        set_logger_config(config);
        assert!(should_log(&LogTag::Search, LogLevel::Debug));
        assert!(!should_log(&LogTag::Database, LogLevel::Debug));

        set_logger_config(LoggerConfig::default());
    }
}
