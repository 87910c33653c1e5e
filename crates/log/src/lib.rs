//! # coerce-log
//!
//! Logging bootstrap for hosts embedding the conversion engine, and for the
//! engine's own test suites.
//!
//! The engine itself only emits `tracing` events; this crate installs the
//! subscriber that renders them.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! fn main() -> coerce_log::LogResult<()> {
//!     let _guard = coerce_log::init_with(coerce_log::Config::from_env())?;
//!
//!     coerce_log::info!(target_type = "i32", "converter ready");
//!     Ok(())
//! }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs, rust_2018_idioms)]

mod builder;
mod config;
mod error;

// Public API
pub use builder::{LoggerBuilder, LoggerGuard};
pub use config::{Config, DisplayConfig, Format, WriterConfig};
pub use error::{LogError, LogResult};

/// Prelude for common imports
pub mod prelude {
    pub use crate::{
        Config, Format, LogResult, debug, error, info, init, init_test, init_with, trace, warn,
    };
}

// Re-export tracing macros
pub use tracing::{debug, error, info, trace, warn};

// ============================================================================
// Initialization Functions
// ============================================================================

/// Initialize with default configuration
pub fn init() -> LogResult<LoggerGuard> {
    init_with(Config::default())
}

/// Initialize with custom configuration
pub fn init_with(config: Config) -> LogResult<LoggerGuard> {
    LoggerBuilder::from_config(config).build()
}

/// Initialize for tests.
///
/// Safe to call from every test: once any global subscriber is installed,
/// later calls return a no-op guard.
pub fn init_test() -> LoggerGuard {
    if tracing::dispatcher::has_been_set() {
        return LoggerGuard::noop();
    }
    // a concurrent test may win the race to install; that is fine
    init_with(Config::test()).unwrap_or_else(|_| LoggerGuard::noop())
}
