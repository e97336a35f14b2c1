//! Logger builder implementation

use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Config, Format};
use crate::error::{LogError, LogResult};

/// Logger builder
#[derive(Debug)]
pub struct LoggerBuilder {
    config: Config,
}

/// Guard that keeps the logger's root span entered
///
/// Hold it for the lifetime of `main`.
#[derive(Debug)]
pub struct LoggerGuard {
    _root_span: Option<tracing::span::EnteredSpan>,
}

/// Build a stderr fmt layer in one of the line styles, applying display options.
macro_rules! fmt_layer {
    ($style:ident, $display:expr) => {{
        let display = $display;
        fmt::layer()
            .$style()
            .with_writer(std::io::stderr)
            .with_ansi(display.colors)
            .with_target(display.target)
            .with_file(display.source)
            .with_line_number(display.source)
    }};
}

/// Install the registry with the given filter and fmt layer.
macro_rules! try_init_subscriber {
    ($filter:expr, $layer:expr, $time:expr) => {{
        if $time {
            Registry::default().with($filter).with($layer).try_init()
        } else {
            Registry::default()
                .with($filter)
                .with($layer.without_time())
                .try_init()
        }
    }};
}

impl LoggerBuilder {
    /// Create builder from config
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self { config }
    }

    /// Parse the configured filter without installing anything.
    pub fn filter(&self) -> LogResult<EnvFilter> {
        EnvFilter::try_new(&self.config.level).map_err(|e| LogError::Filter {
            directive: self.config.level.clone(),
            reason: e.to_string(),
        })
    }

    /// Build and initialize the logger
    ///
    /// # Errors
    ///
    /// Returns error if:
    /// - Filter string cannot be parsed
    /// - A global subscriber is already installed
    pub fn build(self) -> LogResult<LoggerGuard> {
        let filter = self.filter()?;
        let display = self.config.display;

        let installed = match self.config.format {
            Format::Pretty => {
                try_init_subscriber!(filter, fmt_layer!(pretty, display), display.time)
            }
            Format::Compact => {
                try_init_subscriber!(filter, fmt_layer!(compact, display), display.time)
            }
            Format::Json => try_init_subscriber!(
                filter,
                fmt_layer!(json, display).flatten_event(true),
                display.time
            ),
        };
        installed.map_err(|e| LogError::AlreadyInitialized(e.to_string()))?;

        let root_span = self
            .config
            .service
            .as_deref()
            .map(|service| tracing::info_span!("app", service).entered());

        Ok(LoggerGuard {
            _root_span: root_span,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn filter_accepts_directives() {
        let builder =
            LoggerBuilder::from_config(Config::default().with_level("info,tollgate_runtime=debug"));
        assert!(builder.filter().is_ok());
    }

    #[test]
    fn filter_rejects_garbage() {
        let builder = LoggerBuilder::from_config(Config::default().with_level("tollgate=loud"));
        assert!(matches!(builder.filter(), Err(LogError::Filter { .. })));
    }

    #[test]
    fn second_init_fails() {
        // Only one test in this binary installs a subscriber.
        let first = LoggerBuilder::from_config(Config::default().with_level("warn")).build();
        assert!(first.is_ok());
        let second = LoggerBuilder::from_config(Config::production()).build();
        assert!(matches!(second, Err(LogError::AlreadyInitialized(_))));
    }
}
