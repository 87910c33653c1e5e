//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format, WriterConfig};

impl Config {
    /// Create configuration from environment variables
    ///
    /// Reads `COERCE_LOG` (falling back to `RUST_LOG`), `COERCE_LOG_FORMAT`,
    /// `COERCE_LOG_SOURCE` and `COERCE_LOG_COLORS`.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// [`Config::from_env`] over an arbitrary variable source
    #[must_use]
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = lookup("COERCE_LOG").or_else(|| lookup("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = lookup("COERCE_LOG_FORMAT") {
            config.format = match format.to_lowercase().as_str() {
                "pretty" => Format::Pretty,
                "json" => Format::Json,
                _ => Format::Compact,
            };
        }

        config.display.parse_env(&lookup);

        config
    }

    /// Development configuration (pretty, debug level)
    #[must_use]
    pub fn development() -> Self {
        Self {
            level: "debug".to_string(),
            format: Format::Pretty,
            display: DisplayConfig {
                colors: true,
                source: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Production configuration (JSON, info level)
    #[must_use]
    pub fn production() -> Self {
        Self {
            level: "info".to_string(),
            format: Format::Json,
            display: DisplayConfig {
                colors: false,
                source: false,
                flatten: true,
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }

    /// Test configuration: every engine event, captured by the test harness
    #[must_use]
    pub fn test() -> Self {
        Self {
            level: "trace".to_string(),
            format: Format::Compact,
            writer: WriterConfig::Test,
            display: DisplayConfig {
                colors: false,
                ..DisplayConfig::default()
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(Config::development().format, Format::Pretty);
        assert_eq!(Config::production().format, Format::Json);
        let test = Config::test();
        assert_eq!(test.level, "trace");
        assert_eq!(test.writer, WriterConfig::Test);
        assert!(!test.display.colors);
    }

    #[test]
    fn test_from_lookup() {
        let vars = |key: &str| match key {
            "RUST_LOG" => Some("warn".to_string()),
            "COERCE_LOG_FORMAT" => Some("JSON".to_string()),
            "COERCE_LOG_SOURCE" => Some("false".to_string()),
            "COERCE_LOG_COLORS" => Some("1".to_string()),
            _ => None,
        };
        let config = Config::from_lookup(vars);
        assert_eq!(config.level, "warn");
        assert_eq!(config.format, Format::Json);
        assert!(!config.display.source);
        assert!(config.display.colors);

        let own_level = Config::from_lookup(|key| match key {
            "COERCE_LOG" => Some("coerce_convert=trace".to_string()),
            "RUST_LOG" => Some("warn".to_string()),
            "COERCE_LOG_FORMAT" => Some("yaml".to_string()),
            _ => None,
        });
        assert_eq!(own_level.level, "coerce_convert=trace");
        assert_eq!(own_level.format, Format::Compact);
    }

    #[test]
    fn test_from_lookup_keeps_defaults() {
        let config = Config::from_lookup(|_| None);
        let default = Config::default();
        assert_eq!(config.level, default.level);
        assert_eq!(config.format, default.format);
    }
}
