//! Store configuration.

use crate::logger::{LogLevel, Logger, TracingLogger};
use std::sync::Arc;

/// Configuration for opening a [`RecordStore`](crate::RecordStore).
#[derive(Debug, Clone)]
pub struct Config {
    /// Sink for store log messages. `None` selects an info-level
    /// [`TracingLogger`].
    pub logger: Option<Arc<dyn Logger>>,

    /// Whether to create the root directory if it doesn't exist.
    pub create_if_missing: bool,

    /// Whether to fsync each document before publishing it, and the
    /// collection directory after the rename.
    pub sync_writes: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            logger: None,
            create_if_missing: true,
            sync_writes: true,
        }
    }
}

impl Config {
    /// Creates a new configuration with default values.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the logger.
    #[must_use]
    pub fn logger(mut self, logger: Arc<dyn Logger>) -> Self {
        self.logger = Some(logger);
        self
    }

    /// Sets whether to create the root directory if missing.
    #[must_use]
    pub const fn create_if_missing(mut self, value: bool) -> Self {
        self.create_if_missing = value;
        self
    }

    /// Sets whether writes are fsynced before being published.
    #[must_use]
    pub const fn sync_writes(mut self, value: bool) -> Self {
        self.sync_writes = value;
        self
    }

    /// Returns the configured logger, or the default one.
    pub(crate) fn resolve_logger(&self) -> Arc<dyn Logger> {
        match &self.logger {
            Some(logger) => Arc::clone(logger),
            None => Arc::new(TracingLogger::new(LogLevel::Info)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config() {
        let config = Config::default();
        assert!(config.logger.is_none());
        assert!(config.create_if_missing);
        assert!(config.sync_writes);
    }

    #[test]
    fn builder_pattern() {
        let config = Config::new()
            .create_if_missing(false)
            .sync_writes(false)
            .logger(Arc::new(TracingLogger::new(LogLevel::Trace)));

        assert!(!config.create_if_missing);
        assert!(!config.sync_writes);
        assert!(config.logger.is_some());
    }

    #[test]
    fn debug_output_includes_flags() {
        let rendered = format!("{:?}", Config::default());
        assert!(rendered.contains("create_if_missing: true"));
    }
}
