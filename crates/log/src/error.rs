//! Error handling for coerce-log

use thiserror::Error;

/// Errors raised while installing the logger
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LogError {
    /// The level directive could not be parsed
    #[error("Invalid filter '{filter}': {reason}")]
    Filter {
        /// The rejected directive
        filter: String,
        /// Parser message
        reason: String,
    },

    /// A global subscriber was already installed
    #[error("Logger initialization failed: {0}")]
    Init(String),
}

impl LogError {
    /// Create a filter parsing error
    pub fn filter(filter: impl Into<String>, reason: impl ToString) -> Self {
        Self::Filter {
            filter: filter.into(),
            reason: reason.to_string(),
        }
    }

    /// Stable error code
    pub const fn code(&self) -> &'static str {
        match self {
            Self::Filter { .. } => "LOG_FILTER_ERROR",
            Self::Init(_) => "LOG_INIT_ERROR",
        }
    }
}

/// Result type for logging operations
pub type LogResult<T> = Result<T, LogError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error() {
        let error = LogError::filter("debug,[", "unbalanced bracket");
        assert_eq!(error.code(), "LOG_FILTER_ERROR");
        assert!(error.to_string().contains("Invalid filter 'debug,['"));
    }
}
