//! Configuration presets for common scenarios

use super::{Config, DisplayConfig, Format};

impl Config {
    /// Create configuration from environment variables
    ///
    /// `TOLLGATE_LOG` wins over `RUST_LOG`; an unknown `TOLLGATE_LOG_FORMAT`
    /// falls back to compact.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    pub(crate) fn from_vars(var: impl Fn(&str) -> Option<String>) -> Self {
        let mut config = Self::default();

        if let Some(level) = var("TOLLGATE_LOG").or_else(|| var("RUST_LOG")) {
            config.level = level;
        }

        if let Some(format) = var("TOLLGATE_LOG_FORMAT") {
            config.format = format.parse().unwrap_or_default();
        }

        if config.format == Format::Json {
            config.display.colors = false;
        }

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
                ..DisplayConfig::default()
            },
            ..Self::default()
        }
    }
}
