//! # Persisted configuration file.
//!
//! [`FileConfig`] mirrors the TOML file (default `~/.sharif-net.toml`). Every
//! key is optional; absent keys fall through to built-in defaults during
//! [`Settings::resolve`](crate::Settings::resolve).
//!
//! ```toml
//! username = "alice"
//! password = "secret"
//! alive = true
//! host_ip = "https://172.17.1.214"
//! host_domain = "https://net2.sharif.edu"
//! login_endpoint = "/login"
//! status_endpoint = "/status"
//! logout_endpoint = "/logout"
//! ```

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// File name looked up in the home directory.
pub const CONFIG_FILE_NAME: &str = ".sharif-net.toml";

pub const DEFAULT_HOST_IP: &str = "https://172.17.1.214";
pub const DEFAULT_HOST_DOMAIN: &str = "https://net2.sharif.edu";
pub const DEFAULT_LOGIN_ENDPOINT: &str = "/login";
pub const DEFAULT_STATUS_ENDPOINT: &str = "/status";
pub const DEFAULT_LOGOUT_ENDPOINT: &str = "/logout";

/// Contents of the config file.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FileConfig {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub password: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub alive: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_ip: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub host_domain: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub login_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub status_endpoint: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub logout_endpoint: Option<String>,
}

impl FileConfig {
    /// Built-in portal hosts and endpoint paths (no credentials).
    pub fn defaults() -> Self {
        Self {
            host_ip: Some(DEFAULT_HOST_IP.to_string()),
            host_domain: Some(DEFAULT_HOST_DOMAIN.to_string()),
            login_endpoint: Some(DEFAULT_LOGIN_ENDPOINT.to_string()),
            status_endpoint: Some(DEFAULT_STATUS_ENDPOINT.to_string()),
            logout_endpoint: Some(DEFAULT_LOGOUT_ENDPOINT.to_string()),
            ..Self::default()
        }
    }

    /// Reads the file at `path`; `Ok(None)` when it does not exist.
    pub fn load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ConfigError::Read {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };
        toml::from_str(&text)
            .map(Some)
            .map_err(|source| ConfigError::Malformed {
                path: path.to_path_buf(),
                source,
            })
    }

    /// Writes the file to `path`, refusing to overwrite an existing one.
    pub fn write_new(&self, path: &Path) -> Result<(), ConfigError> {
        let write_err = |reason: String| ConfigError::Write {
            path: path.to_path_buf(),
            reason,
        };
        let text = toml::to_string_pretty(self).map_err(|e| write_err(e.to_string()))?;
        fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(path)
            .and_then(|mut file| std::io::Write::write_all(&mut file, text.as_bytes()))
            .map_err(|e| write_err(e.to_string()))
    }
}

/// `$HOME/.sharif-net.toml`, when a home directory is known.
pub fn default_config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|home| home.join(CONFIG_FILE_NAME))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let loaded = FileConfig::load(&dir.path().join("absent.toml")).unwrap();
        assert!(loaded.is_none());
    }

    #[test]
    fn defaults_round_trip_through_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        FileConfig::defaults().write_new(&path).unwrap();

        let loaded = FileConfig::load(&path).unwrap().unwrap();
        assert_eq!(loaded, FileConfig::defaults());
        assert!(loaded.username.is_none());
    }

    #[test]
    fn write_new_does_not_overwrite() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(CONFIG_FILE_NAME);
        fs::write(&path, "username = \"bob\"\n").unwrap();

        let err = FileConfig::defaults().write_new(&path).unwrap_err();
        assert_eq!(err.as_label(), "config_write");
        let kept = FileConfig::load(&path).unwrap().unwrap();
        assert_eq!(kept.username.as_deref(), Some("bob"));
    }

    #[test]
    fn partial_file_parses() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.toml");
        fs::write(&path, "username = \"alice\"\nalive = true\n").unwrap();

        let loaded = FileConfig::load(&path).unwrap().unwrap();
        assert_eq!(loaded.username.as_deref(), Some("alice"));
        assert_eq!(loaded.alive, Some(true));
        assert!(loaded.host_domain.is_none());
    }

    #[test]
    fn unknown_keys_are_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bad.toml");
        fs::write(&path, "usernme = \"typo\"\n").unwrap();

        let err = FileConfig::load(&path).unwrap_err();
        assert_eq!(err.as_label(), "config_malformed");
    }
}
