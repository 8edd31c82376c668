//! Structured logging system with visual formatting.
//!
//! Level-prefixed lines plus box drawing helpers that give falbak's console
//! output its shape. Logging can be switched off at runtime; the interactive
//! screen does this while it owns the terminal so log lines cannot tear the
//! layout. Debug lines are only printed once `--debug` enabled them.

use std::sync::atomic::{AtomicBool, Ordering};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);
static DEBUG_ENABLED: AtomicBool = AtomicBool::new(false);

/// Log level enumeration for categorizing message importance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogLevel {
    Log,  // Debug/operational logs
    Warn, // Warning messages (non-fatal issues)
    Err,  // Error messages (recoverable failures)
    Crit, // Critical errors (may require user intervention)
    Info, // Informational messages (status updates)
}

impl LogLevel {
    /// Prefix printed in front of every line of this level.
    pub fn prefix(&self) -> &'static str {
        match self {
            LogLevel::Log => "[LOG] ",
            LogLevel::Warn => "[WARN] ",
            LogLevel::Err => "[ERR] ",
            LogLevel::Crit => "[CRIT] ",
            LogLevel::Info => "[INFO] ",
        }
    }
}

/// Main logging interface providing structured output formatting.
pub struct Log;

impl Log {
    /// Enable or disable logging temporarily.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Check if logging is currently enabled.
    pub fn is_enabled() -> bool {
        LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Enable or disable `[LOG]` level output.
    pub fn set_debug(enabled: bool) {
        DEBUG_ENABLED.store(enabled, Ordering::SeqCst);
    }

    pub fn is_debug() -> bool {
        DEBUG_ENABLED.load(Ordering::SeqCst)
    }

    /// Format a message the way [`Log::log`] prints it, without printing.
    pub fn format(level: LogLevel, message: &str) -> String {
        format!("{}{}", level.prefix(), message)
    }

    /// Main log function with level-based prefixes.
    ///
    /// # Arguments
    /// * `level` - LogLevel indicating message importance
    /// * `message` - Text content to log
    pub fn log(level: LogLevel, message: &str) {
        if !Self::is_enabled() {
            return;
        }
        if level == LogLevel::Log && !Self::is_debug() {
            return;
        }

        println!("{}", Self::format(level, message));
    }

    // ═══ Convenience Methods for Common Log Levels ═══

    /// Log an error message.
    pub fn log_error(message: &str) {
        Self::log(LogLevel::Err, message);
    }

    /// Log a warning message.
    pub fn log_warning(message: &str) {
        Self::log(LogLevel::Warn, message);
    }

    /// Log an informational message.
    pub fn log_info(message: &str) {
        Self::log(LogLevel::Info, message);
    }

    /// Log a debug/operational message.
    pub fn log_debug(message: &str) {
        Self::log(LogLevel::Log, message);
    }

    /// Log a critical error message.
    pub fn log_critical(message: &str) {
        Self::log(LogLevel::Crit, message);
    }

    // ═══ Visual Formatting Functions ═══

    /// Log a decorated message with visual branching indicator.
    pub fn log_decorated(message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("┣ {}", message);
    }

    /// Log an indented message for sub-items or details.
    pub fn log_indented(message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("┃   {}", message);
    }

    /// Log a visual pipe separator.
    pub fn log_pipe() {
        if !Self::is_enabled() {
            return;
        }
        println!("┃");
    }

    /// Log a block start message with visual separation.
    pub fn log_block_start(message: &str) {
        if !Self::is_enabled() {
            return;
        }
        println!("┃");
        println!("┣ {}", message);
    }

    /// Log the application version header.
    pub fn log_version() {
        if !Self::is_enabled() {
            return;
        }
        println!("┏ falbak v{} ━━╸", env!("CARGO_PKG_VERSION"));
        println!("┃");
    }

    /// Log the final termination marker.
    pub fn log_end() {
        if !Self::is_enabled() {
            return;
        }
        println!("╹");
    }
}
