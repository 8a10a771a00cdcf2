//! Pluggable leveled logging.
//!
//! The store never talks to a logging backend directly. It holds an
//! `Arc<dyn Logger>` and emits informational messages through it. The
//! default [`TracingLogger`] forwards to `tracing`, so console output is
//! whatever subscriber the host process installed.

use std::fmt;

/// Severity of a log message, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LogLevel {
    /// Unrecoverable condition.
    Fatal,
    /// Operation failed.
    Error,
    /// Suspicious but recoverable.
    Warn,
    /// Lifecycle events.
    Info,
    /// Diagnostic detail.
    Debug,
    /// Per-operation detail.
    Trace,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::Fatal => "FATAL",
            Self::Error => "ERROR",
            Self::Warn => "WARN",
            Self::Info => "INFO",
            Self::Debug => "DEBUG",
            Self::Trace => "TRACE",
        };
        f.write_str(name)
    }
}

/// A sink for leveled log messages.
///
/// Implementors only provide [`Logger::log`]; the leveled helpers are
/// provided.
pub trait Logger: Send + Sync + fmt::Debug {
    /// Records `message` at `level`.
    fn log(&self, level: LogLevel, message: &str);

    /// Logs at [`LogLevel::Fatal`]. Does not abort the process.
    fn fatal(&self, message: &str) {
        self.log(LogLevel::Fatal, message);
    }

    /// Logs at [`LogLevel::Error`].
    fn error(&self, message: &str) {
        self.log(LogLevel::Error, message);
    }

    /// Logs at [`LogLevel::Warn`].
    fn warn(&self, message: &str) {
        self.log(LogLevel::Warn, message);
    }

    /// Logs at [`LogLevel::Info`].
    fn info(&self, message: &str) {
        self.log(LogLevel::Info, message);
    }

    /// Logs at [`LogLevel::Debug`].
    fn debug(&self, message: &str) {
        self.log(LogLevel::Debug, message);
    }

    /// Logs at [`LogLevel::Trace`].
    fn trace(&self, message: &str) {
        self.log(LogLevel::Trace, message);
    }
}

/// Default logger: forwards messages at or above `max_level` to `tracing`.
#[derive(Debug, Clone, Copy)]
pub struct TracingLogger {
    max_level: LogLevel,
}

impl TracingLogger {
    /// Creates a logger that drops messages less severe than `max_level`.
    #[must_use]
    pub const fn new(max_level: LogLevel) -> Self {
        Self { max_level }
    }

    /// Returns the configured level.
    #[must_use]
    pub const fn max_level(&self) -> LogLevel {
        self.max_level
    }

    /// Returns true if a message at `level` would be forwarded.
    #[must_use]
    pub fn enabled(&self, level: LogLevel) -> bool {
        level <= self.max_level
    }
}

impl Default for TracingLogger {
    fn default() -> Self {
        Self::new(LogLevel::Info)
    }
}

impl Logger for TracingLogger {
    fn log(&self, level: LogLevel, message: &str) {
        if !self.enabled(level) {
            return;
        }
        match level {
            LogLevel::Fatal => tracing::error!(target: "jsondb", fatal = true, "{message}"),
            LogLevel::Error => tracing::error!(target: "jsondb", "{message}"),
            LogLevel::Warn => tracing::warn!(target: "jsondb", "{message}"),
            LogLevel::Info => tracing::info!(target: "jsondb", "{message}"),
            LogLevel::Debug => tracing::debug!(target: "jsondb", "{message}"),
            LogLevel::Trace => tracing::trace!(target: "jsondb", "{message}"),
        }
    }
}
