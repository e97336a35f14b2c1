//! Layered CLI configuration: defaults → `tollgate.toml` → `TOLLGATE_*` env → flags.

use std::path::Path;

use figment::Figment;
use figment::providers::{Env, Format as _, Serialized, Toml};
use serde::{Deserialize, Serialize};
use tollgate_log::Format;
use tollgate_runtime::config::DEFAULT_PUBLIC_URL;
use url::Url;

/// Environment keys read with the `TOLLGATE_` prefix.
const ENV_KEYS: &[&str] = &[
    "public_url",
    "account_id",
    "notify_endpoint",
    "log_level",
    "log_format",
];

/// Resolved CLI settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CliConfig {
    /// Base URL callback addresses are rooted at.
    pub public_url: String,
    /// Sending account id handed to the node as a credential.
    pub account_id: String,
    /// When set, requests are POSTed here instead of printed.
    pub notify_endpoint: Option<Url>,
    /// `tracing` filter directive.
    pub log_level: String,
    /// `pretty`, `compact` or `json`.
    pub log_format: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            public_url: DEFAULT_PUBLIC_URL.to_owned(),
            account_id: String::new(),
            notify_endpoint: None,
            log_level: "warn".to_owned(),
            log_format: Format::Compact.to_string(),
        }
    }
}

/// Values given on the command line. Unset flags leave lower layers alone.
#[derive(Debug, Default, Serialize)]
pub struct Overrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub public_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub account_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log_level: Option<String>,
}

impl CliConfig {
    /// The provider stack, lowest precedence first. A missing file is skipped.
    pub fn figment(file: &Path, overrides: &Overrides) -> Figment {
        Figment::from(Serialized::defaults(Self::default()))
            .merge(Toml::file(file))
            .merge(Env::prefixed("TOLLGATE_").only(ENV_KEYS))
            .merge(Serialized::defaults(overrides))
    }

    /// Resolve the configuration.
    pub fn load(file: &Path, overrides: &Overrides) -> anyhow::Result<Self> {
        Ok(Self::figment(file, overrides).extract()?)
    }

    /// Logger settings for `tollgate-log`.
    pub fn log_config(&self) -> anyhow::Result<tollgate_log::Config> {
        let format: Format = self.log_format.parse()?;
        Ok(tollgate_log::Config::default()
            .with_level(self.log_level.clone())
            .with_format(format))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn toml_file(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    fn load(file: &Path, overrides: &Overrides) -> CliConfig {
        // Extract without the env layer so ambient TOLLGATE_* vars cannot leak in.
        Figment::from(Serialized::defaults(CliConfig::default()))
            .merge(Toml::file(file))
            .merge(Serialized::defaults(overrides))
            .extract()
            .unwrap()
    }

    #[test]
    fn defaults_without_file() {
        let config = load(Path::new("/nonexistent/tollgate.toml"), &Overrides::default());
        assert_eq!(config, CliConfig::default());
        assert_eq!(config.public_url, "http://localhost:5678");
    }

    #[test]
    fn file_overrides_defaults() {
        let file = toml_file(
            r#"
            public_url = "https://hooks.example.com"
            account_id = "acct-7"
            notify_endpoint = "https://mail.example.com/send"
            "#,
        );
        let config = load(file.path(), &Overrides::default());
        assert_eq!(config.public_url, "https://hooks.example.com");
        assert_eq!(config.account_id, "acct-7");
        assert_eq!(
            config.notify_endpoint.as_ref().map(Url::as_str),
            Some("https://mail.example.com/send")
        );
        assert_eq!(config.log_level, "warn");
    }

    #[test]
    fn flags_override_file() {
        let file = toml_file(r#"account_id = "from-file""#);
        let overrides = Overrides {
            account_id: Some("from-flag".into()),
            ..Overrides::default()
        };
        assert_eq!(load(file.path(), &overrides).account_id, "from-flag");
    }

    #[test]
    fn log_config_rejects_unknown_format() {
        let config = CliConfig {
            log_format: "xml".into(),
            ..CliConfig::default()
        };
        assert!(config.log_config().is_err());
    }

    #[test]
    fn log_config_carries_level() {
        let config = CliConfig {
            log_level: "debug".into(),
            log_format: "json".into(),
            ..CliConfig::default()
        };
        let log = config.log_config().unwrap();
        assert_eq!(log.level, "debug");
        assert_eq!(log.format, Format::Json);
    }
}
