//! Application configuration: a RON file, then environment overrides.
//!
//! Lookup order is defaults, then `--config <path>` (or `./linklet.ron` when
//! present), then `LINKLET_*` variables. `.env` is loaded before variables
//! are read.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use linklet_engine::{ClientSettings, DEFAULT_API_BASE_URL};
use linklet_logging::linklet_info;
use serde::Deserialize;
use url::Url;

pub const DEFAULT_CONFIG_FILE: &str = "linklet.ron";
pub const DEFAULT_SHORT_LINK_BASE_URL: &str = "http://localhost:3001";

const ENV_API_URL: &str = "LINKLET_API_URL";
const ENV_SHORT_LINK_BASE_URL: &str = "LINKLET_SHORT_LINK_BASE_URL";
const ENV_REQUEST_TIMEOUT_SECS: &str = "LINKLET_REQUEST_TIMEOUT_SECS";

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Root of the link API, e.g. `http://localhost:3001/api`.
    pub api_base_url: String,
    /// Origin that short codes are appended to for display.
    pub short_link_base_url: String,
    pub request_timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for AppConfig {
    fn default() -> Self {
        let transport = ClientSettings::default();
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            short_link_base_url: DEFAULT_SHORT_LINK_BASE_URL.to_string(),
            request_timeout_secs: transport.request_timeout.as_secs(),
            connect_timeout_secs: transport.connect_timeout.as_secs(),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("could not read {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("could not parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
    #[error("{field} is not an absolute http(s) url: {value:?}")]
    InvalidUrl { field: &'static str, value: String },
    #[error("{key} must be a positive whole number of seconds, got {value:?}")]
    InvalidNumber { key: &'static str, value: String },
}

impl AppConfig {
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let mut config = match explicit {
            Some(path) => Self::from_file(path)?,
            None => {
                let default_path = Path::new(DEFAULT_CONFIG_FILE);
                if default_path.is_file() {
                    Self::from_file(default_path)?
                } else {
                    Self::default()
                }
            }
        };
        config.apply_overrides(|key| std::env::var(key).ok())?;
        config.validate()?;

        linklet_info!(
            "Config api_base_url={} short_link_base_url={} request_timeout_secs={}",
            config.api_base_url,
            config.short_link_base_url,
            config.request_timeout_secs
        );
        Ok(config)
    }

    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Applies `LINKLET_*` overrides read through `lookup`. Blank values are ignored.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> Result<(), ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let read = |key: &str| lookup(key).filter(|value| !value.trim().is_empty());

        if let Some(value) = read(ENV_API_URL) {
            self.api_base_url = value.trim().to_string();
        }
        if let Some(value) = read(ENV_SHORT_LINK_BASE_URL) {
            self.short_link_base_url = value.trim().to_string();
        }
        if let Some(value) = read(ENV_REQUEST_TIMEOUT_SECS) {
            self.request_timeout_secs =
                value
                    .trim()
                    .parse()
                    .map_err(|_| ConfigError::InvalidNumber {
                        key: ENV_REQUEST_TIMEOUT_SECS,
                        value,
                    })?;
        }
        Ok(())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        check_url("api_base_url", &self.api_base_url)?;
        check_url("short_link_base_url", &self.short_link_base_url)?;
        check_timeout("request_timeout_secs", self.request_timeout_secs)?;
        check_timeout("connect_timeout_secs", self.connect_timeout_secs)?;
        Ok(())
    }

    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            ..ClientSettings::new(self.api_base_url.clone())
        }
    }
}

fn check_url(field: &'static str, value: &str) -> Result<(), ConfigError> {
    let valid = Url::parse(value)
        .map(|url| matches!(url.scheme(), "http" | "https") && url.has_host())
        .unwrap_or(false);
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidUrl {
            field,
            value: value.to_string(),
        })
    }
}

/// A zero timeout would fail every request before it is sent.
fn check_timeout(key: &'static str, secs: u64) -> Result<(), ConfigError> {
    if secs == 0 {
        return Err(ConfigError::InvalidNumber {
            key,
            value: secs.to_string(),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::io::Write;

    use tempfile::NamedTempFile;

    use super::*;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_point_at_local_service() {
        let config = AppConfig::default();
        assert_eq!(config.api_base_url, "http://localhost:3001/api");
        assert_eq!(config.short_link_base_url, "http://localhost:3001");
        assert!(config.validate().is_ok());
    }

    #[test]
    fn file_values_fill_missing_fields_with_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"(api_base_url: "https://links.example.com/api", request_timeout_secs: 5)"#
        )
        .unwrap();

        let config = AppConfig::from_file(file.path()).unwrap();
        assert_eq!(config.api_base_url, "https://links.example.com/api");
        assert_eq!(config.request_timeout_secs, 5);
        assert_eq!(config.short_link_base_url, DEFAULT_SHORT_LINK_BASE_URL);
    }

    #[test]
    fn malformed_file_reports_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "(api_base_url: ").unwrap();

        let err = AppConfig::from_file(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse { .. }));
    }

    #[test]
    fn missing_explicit_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = AppConfig::from_file(&dir.path().join("absent.ron")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn environment_overrides_file_values() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[
                (ENV_API_URL, " https://api.example.com/v1 "),
                (ENV_SHORT_LINK_BASE_URL, "https://sho.rt"),
                (ENV_REQUEST_TIMEOUT_SECS, "12"),
            ]))
            .unwrap();

        assert_eq!(config.api_base_url, "https://api.example.com/v1");
        assert_eq!(config.short_link_base_url, "https://sho.rt");
        assert_eq!(config.request_timeout_secs, 12);
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[(ENV_API_URL, "   ")]))
            .unwrap();
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .apply_overrides(lookup_from(&[(ENV_REQUEST_TIMEOUT_SECS, "soon")]))
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidNumber { .. }));
    }

    #[test]
    fn relative_or_non_http_urls_fail_validation() {
        let config = AppConfig {
            api_base_url: "localhost:3001/api".to_string(),
            ..AppConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidUrl {
                field: "api_base_url",
                ..
            })
        ));

        let config = AppConfig {
            short_link_base_url: "ftp://files.example.com".to_string(),
            ..AppConfig::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn zero_timeouts_fail_validation() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(lookup_from(&[(ENV_REQUEST_TIMEOUT_SECS, "0")]))
            .unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNumber {
                key: "request_timeout_secs",
                ..
            })
        ));

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "(connect_timeout_secs: 0)").unwrap();
        let config = AppConfig::from_file(file.path()).unwrap();
        assert!(matches!(
            config.validate(),
            Err(ConfigError::InvalidNumber {
                key: "connect_timeout_secs",
                ..
            })
        ));
    }

    #[test]
    fn client_settings_carry_timeouts() {
        let config = AppConfig {
            request_timeout_secs: 7,
            connect_timeout_secs: 2,
            ..AppConfig::default()
        };
        let settings = config.client_settings();
        assert_eq!(settings.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(settings.request_timeout, Duration::from_secs(7));
        assert_eq!(settings.connect_timeout, Duration::from_secs(2));
    }
}
