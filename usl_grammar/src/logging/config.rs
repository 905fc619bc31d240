//! Runtime logging preferences, bounded by compile-time constants
//!
//! Preferences are set once at startup; absent any, the defaults apply.

use crate::config::compile_time::logging::MAX_LOG_MESSAGE_LENGTH;
use crate::logging::events::LogLevel;
use std::sync::OnceLock;

/// User-selectable logging preferences
#[derive(Debug, Clone)]
pub struct LoggingPreferences {
    pub min_log_level: LogLevel,
    pub use_structured_logging: bool,
    pub enable_console_logging: bool,
}

impl Default for LoggingPreferences {
    fn default() -> Self {
        Self {
            min_log_level: LogLevel::Warning,
            use_structured_logging: false,
            enable_console_logging: true,
        }
    }
}

static RUNTIME_PREFERENCES: OnceLock<LoggingPreferences> = OnceLock::new();

/// Initialize runtime preferences
///
/// Any minimum level is valid: parse failures are logged at Error, the
/// lowest level, so they stay observable under every preference.
pub fn init_runtime_preferences(preferences: LoggingPreferences) -> Result<(), String> {
    RUNTIME_PREFERENCES
        .set(preferences)
        .map_err(|_| "Runtime preferences already initialized".to_string())?;

    Ok(())
}

fn get_runtime_preferences() -> LoggingPreferences {
    RUNTIME_PREFERENCES.get().cloned().unwrap_or_default()
}

/// Get minimum log level (user preference within compile-time bounds)
pub fn get_min_log_level() -> LogLevel {
    get_runtime_preferences().min_log_level
}

/// Check if structured logging is enabled (user preference)
pub fn use_structured_logging() -> bool {
    get_runtime_preferences().use_structured_logging
}

/// Check if console logging is enabled (user preference)
pub fn use_console_logging() -> bool {
    get_runtime_preferences().enable_console_logging
}

/// Validate current configuration settings
pub fn validate_config() -> Result<(), String> {
    if MAX_LOG_MESSAGE_LENGTH < 80 {
        return Err(format!(
            "Log message limit too small: {}",
            MAX_LOG_MESSAGE_LENGTH
        ));
    }

    Ok(())
}

/// Recommended configuration for development
pub fn get_development_preferences() -> LoggingPreferences {
    LoggingPreferences {
        min_log_level: LogLevel::Debug,
        use_structured_logging: false,
        enable_console_logging: true,
    }
}

/// Recommended configuration for production
pub fn get_production_preferences() -> LoggingPreferences {
    LoggingPreferences {
        min_log_level: LogLevel::Warning,
        use_structured_logging: true,
        enable_console_logging: false,
    }
}
