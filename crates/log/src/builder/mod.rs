//! Logger builder implementation

#[macro_use]
mod format;

use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::{EnvFilter, Registry, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format, WriterConfig};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard returned by initialization.
///
/// Keep it alive for as long as logging is needed. A no-op guard is
/// returned when another subscriber was already installed.
#[derive(Debug)]
#[must_use = "dropping the guard immediately is almost never intended"]
pub struct LoggerGuard {
    installed: bool,
}

impl LoggerGuard {
    pub(crate) const fn noop() -> Self {
        Self { installed: false }
    }

    /// Whether this call installed the global subscriber
    pub const fn is_installed(&self) -> bool {
        self.installed
    }
}

/// Helper macro to build and init the subscriber for a given format layer.
macro_rules! init_subscriber {
    ($filter:expr, $fmt_layer:expr) => {
        Registry::default()
            .with($filter)
            .with($fmt_layer)
            .try_init()
            .map_err(|e| LogError::Init(e.to_string()))
    };
}

fn make_writer(writer: WriterConfig) -> BoxMakeWriter {
    match writer {
        WriterConfig::Stderr => BoxMakeWriter::new(std::io::stderr),
        WriterConfig::Stdout => BoxMakeWriter::new(std::io::stdout),
        WriterConfig::Test => BoxMakeWriter::new(tracing_subscriber::fmt::TestWriter::new()),
    }
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub const fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Build and install the global logger
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = EnvFilter::try_new(&self.config.level)
            .map_err(|e| LogError::filter(&self.config.level, e))?;
        let writer = make_writer(self.config.writer);
        let display = &self.config.display;

        match self.config.format {
            Format::Pretty => {
                init_subscriber!(filter, create_fmt_layer!(pretty, display, writer))?;
            }
            Format::Compact => {
                init_subscriber!(filter, create_fmt_layer!(compact, display, writer))?;
            }
            Format::Json => {
                init_subscriber!(filter, create_json_layer!(display, writer))?;
            }
        }

        tracing::debug!(level = %self.config.level, format = ?self.config.format, "logger installed");
        Ok(LoggerGuard { installed: true })
    }
}
