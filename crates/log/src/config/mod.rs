//! Logger configuration.

mod presets;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::LogError;

/// Output format of the fmt layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// Multi-line, human oriented.
    Pretty,
    /// Single line per event.
    #[default]
    Compact,
    /// One JSON object per event.
    Json,
}

impl FromStr for Format {
    type Err = LogError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "pretty" => Ok(Self::Pretty),
            "compact" => Ok(Self::Compact),
            "json" => Ok(Self::Json),
            other => Err(LogError::UnknownFormat(other.to_owned())),
        }
    }
}

impl fmt::Display for Format {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Pretty => write!(f, "pretty"),
            Self::Compact => write!(f, "compact"),
            Self::Json => write!(f, "json"),
        }
    }
}

/// What each event line shows besides the message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[allow(clippy::struct_excessive_bools)]
pub struct DisplayConfig {
    /// ANSI colours.
    pub colors: bool,
    /// Event target (module path).
    pub target: bool,
    /// Source file and line.
    pub source: bool,
    /// Timestamp.
    pub time: bool,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            colors: true,
            target: true,
            source: false,
            time: true,
        }
    }
}

/// Logger configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// `EnvFilter` directive string, e.g. `"info,tollgate_runtime=debug"`.
    pub level: String,
    /// Output format.
    pub format: Format,
    /// Per-line decorations.
    pub display: DisplayConfig,
    /// Service name attached to a root span, if set.
    pub service: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            level: "info".to_owned(),
            format: Format::default(),
            display: DisplayConfig::default(),
            service: None,
        }
    }
}

impl Config {
    /// Set the filter directive.
    #[must_use]
    pub fn with_level(mut self, level: impl Into<String>) -> Self {
        self.level = level.into();
        self
    }

    /// Set the output format.
    #[must_use]
    pub fn with_format(mut self, format: Format) -> Self {
        self.format = format;
        self
    }

    /// Attach a service name to every event.
    #[must_use]
    pub fn with_service(mut self, service: impl Into<String>) -> Self {
        self.service = Some(service.into());
        self
    }
}
