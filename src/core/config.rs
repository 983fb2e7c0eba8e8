//! core::config
//!
//! Configuration file loading.
//!
//! # Overview
//!
//! vtix reads a single optional TOML file, `.vtix.toml`, from the resolved
//! home directory:
//!
//! ```toml
//! [login]
//! host = "https://vtiger.example.com"
//! username = "me"
//! access_key = "abc123"
//! ```
//!
//! An absent file is not an error; the CLI prints a first-run hint and
//! prompts for credentials instead. CLI flags override config values.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::vtiger::Scheme;

/// Config file name inside the home directory.
pub const CONFIG_FILE: &str = ".vtix.toml";

/// Errors from configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config file '{path}': {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("failed to parse config file '{path}': {message}")]
    Parse { path: PathBuf, message: String },
}

/// Root of the config file.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub login: LoginConfig,
}

/// The `[login]` table: connection and credential defaults.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoginConfig {
    /// Host, optionally with an `http://` or `https://` prefix.
    pub host: Option<String>,
    pub username: Option<String>,
    pub access_key: Option<String>,
}

impl Config {
    /// Load `.vtix.toml` from `home`. Returns `Ok(None)` when the file
    /// does not exist.
    pub fn load(home: &Path) -> Result<Option<Self>, ConfigError> {
        let path = home.join(CONFIG_FILE);
        if !path.exists() {
            return Ok(None);
        }

        let raw = fs::read_to_string(&path).map_err(|source| ConfigError::Read {
            path: path.clone(),
            source,
        })?;
        let config = toml::from_str(&raw).map_err(|e| ConfigError::Parse {
            path,
            message: e.to_string(),
        })?;
        Ok(Some(config))
    }
}

/// Split an optional scheme prefix off a configured host value.
///
/// `https://vtiger.example.com` becomes `(Https, "vtiger.example.com")`;
/// a bare host defaults to HTTPS.
pub fn split_host(value: &str) -> (Scheme, String) {
    if let Some(host) = value.strip_prefix("https://") {
        (Scheme::Https, host.to_string())
    } else if let Some(host) = value.strip_prefix("http://") {
        (Scheme::Http, host.to_string())
    } else {
        (Scheme::Https, value.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_host_parses_schemes() {
        assert_eq!(
            split_host("https://vtiger.example.com"),
            (Scheme::Https, "vtiger.example.com".to_string())
        );
        assert_eq!(
            split_host("http://localhost:8080"),
            (Scheme::Http, "localhost:8080".to_string())
        );
        assert_eq!(
            split_host("vtiger.example.com"),
            (Scheme::Https, "vtiger.example.com".to_string())
        );
    }

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        assert!(Config::load(dir.path()).unwrap().is_none());
    }

    #[test]
    fn load_parses_login_table() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "[login]\nhost = \"https://vtiger.example.com\"\nusername = \"me\"\naccess_key = \"k\"\n",
        )
        .unwrap();

        let config = Config::load(dir.path()).unwrap().unwrap();
        assert_eq!(
            config.login.host.as_deref(),
            Some("https://vtiger.example.com")
        );
        assert_eq!(config.login.username.as_deref(), Some("me"));
        assert_eq!(config.login.access_key.as_deref(), Some("k"));
    }

    #[test]
    fn malformed_file_is_a_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join(CONFIG_FILE), "[login\n").unwrap();
        assert!(matches!(
            Config::load(dir.path()),
            Err(ConfigError::Parse { .. })
        ));
    }
}
