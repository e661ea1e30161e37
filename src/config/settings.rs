//! # Resolved settings.
//!
//! [`Settings`] is the immutable result of layering, per key:
//!
//! ```text
//! explicit flag / environment  >  config file  >  built-in default
//! ```
//!
//! It is constructed once in `main` and passed by reference into the portal
//! client; nothing downstream looks configuration up on its own.
//!
//! ## Rules
//! - `use_ip` selects `host_ip` over `host_domain` and turns on lenient TLS.
//! - An endpoint whose host or path resolves to an empty string is left
//!   unresolved (`None`); requests needing it fail with `MissingEndpoint`.
//! - Credentials are only demanded by operations that need them.

use std::fmt;

use reqwest::Url;

use crate::config::file::{
    DEFAULT_HOST_DOMAIN, DEFAULT_HOST_IP, DEFAULT_LOGIN_ENDPOINT, DEFAULT_LOGOUT_ENDPOINT,
    DEFAULT_STATUS_ENDPOINT, FileConfig,
};
use crate::error::ConfigError;

/// Values given explicitly on the command line (or via environment).
#[derive(Clone, Debug, Default)]
pub struct Overrides {
    pub username: Option<String>,
    pub password: Option<String>,
    pub use_ip: bool,
    pub alive: bool,
}

/// Login credentials. `Debug` never prints the password.
#[derive(Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

/// Fully resolved portal endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Endpoints {
    pub login: Option<Url>,
    pub status: Option<Url>,
    pub logout: Option<Url>,
}

/// Immutable configuration value for one process run.
#[derive(Clone)]
pub struct Settings {
    username: Option<String>,
    password: Option<String>,
    /// Use the portal IP instead of its domain (and accept invalid certificates).
    pub use_ip: bool,
    /// Stay in monitoring mode after the first login.
    pub alive: bool,
    pub endpoints: Endpoints,
}

impl fmt::Debug for Settings {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Settings")
            .field("username", &self.username)
            .field("password", &self.password.as_ref().map(|_| "***"))
            .field("use_ip", &self.use_ip)
            .field("alive", &self.alive)
            .field("endpoints", &self.endpoints)
            .finish()
    }
}

impl Settings {
    /// Layers `overrides` over `file` over built-in defaults.
    pub fn resolve(overrides: Overrides, file: Option<FileConfig>) -> Result<Self, ConfigError> {
        let file = file.unwrap_or_default();
        let non_empty = |v: Option<String>| v.filter(|s| !s.is_empty());

        let host = if overrides.use_ip {
            file.host_ip.unwrap_or_else(|| DEFAULT_HOST_IP.to_string())
        } else {
            file.host_domain
                .unwrap_or_else(|| DEFAULT_HOST_DOMAIN.to_string())
        };
        let path = |value: Option<String>, default: &str| value.unwrap_or_else(|| default.to_string());

        let endpoints = Endpoints {
            login: endpoint("login", &host, &path(file.login_endpoint, DEFAULT_LOGIN_ENDPOINT))?,
            status: endpoint("status", &host, &path(file.status_endpoint, DEFAULT_STATUS_ENDPOINT))?,
            logout: endpoint("logout", &host, &path(file.logout_endpoint, DEFAULT_LOGOUT_ENDPOINT))?,
        };

        Ok(Self {
            username: non_empty(overrides.username).or_else(|| non_empty(file.username)),
            password: non_empty(overrides.password).or_else(|| non_empty(file.password)),
            use_ip: overrides.use_ip,
            alive: overrides.alive || file.alive.unwrap_or(false),
            endpoints,
        })
    }

    /// Credentials required for login, or the first missing field.
    pub fn credentials(&self) -> Result<Credentials, ConfigError> {
        let username = self
            .username
            .clone()
            .ok_or(ConfigError::MissingCredential { field: "username" })?;
        let password = self
            .password
            .clone()
            .ok_or(ConfigError::MissingCredential { field: "password" })?;
        Ok(Credentials { username, password })
    }
}

fn endpoint(name: &'static str, host: &str, path: &str) -> Result<Option<Url>, ConfigError> {
    if host.is_empty() || path.is_empty() {
        return Ok(None);
    }
    let url = format!("{host}{path}");
    Url::parse(&url)
        .map(Some)
        .map_err(|e| ConfigError::InvalidEndpoint {
            name,
            url,
            reason: e.to_string(),
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_resolve_to_domain_endpoints() {
        let settings = Settings::resolve(Overrides::default(), None).unwrap();
        assert_eq!(
            settings.endpoints.status.as_ref().map(Url::as_str),
            Some("https://net2.sharif.edu/status")
        );
        assert!(!settings.alive);
        assert!(matches!(
            settings.credentials(),
            Err(ConfigError::MissingCredential { field: "username" })
        ));
    }

    #[test]
    fn use_ip_selects_host_ip() {
        let overrides = Overrides {
            use_ip: true,
            ..Overrides::default()
        };
        let settings = Settings::resolve(overrides, None).unwrap();
        assert_eq!(
            settings.endpoints.login.as_ref().map(Url::as_str),
            Some("https://172.17.1.214/login")
        );
        assert!(settings.use_ip);
    }

    #[test]
    fn flags_override_file_which_overrides_defaults() {
        let file = FileConfig {
            username: Some("file-user".into()),
            password: Some("file-pass".into()),
            alive: Some(true),
            host_domain: Some("https://portal.example".into()),
            status_endpoint: Some("/me".into()),
            ..FileConfig::default()
        };
        let overrides = Overrides {
            username: Some("flag-user".into()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(overrides, Some(file)).unwrap();

        let creds = settings.credentials().unwrap();
        assert_eq!(creds.username, "flag-user");
        assert_eq!(creds.password, "file-pass");
        assert!(settings.alive);
        assert_eq!(
            settings.endpoints.status.as_ref().map(Url::as_str),
            Some("https://portal.example/me")
        );
        assert_eq!(
            settings.endpoints.logout.as_ref().map(Url::as_str),
            Some("https://portal.example/logout")
        );
    }

    #[test]
    fn empty_values_do_not_count() {
        let file = FileConfig {
            password: Some(String::new()),
            status_endpoint: Some(String::new()),
            ..FileConfig::default()
        };
        let overrides = Overrides {
            username: Some("u".into()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(overrides, Some(file)).unwrap();
        assert!(settings.endpoints.status.is_none());
        assert!(matches!(
            settings.credentials(),
            Err(ConfigError::MissingCredential { field: "password" })
        ));
    }

    #[test]
    fn invalid_endpoint_is_rejected() {
        let file = FileConfig {
            host_domain: Some("not a url".into()),
            ..FileConfig::default()
        };
        let err = Settings::resolve(Overrides::default(), Some(file)).unwrap_err();
        assert_eq!(err.as_label(), "config_invalid_endpoint");
    }

    #[test]
    fn debug_redacts_password() {
        let creds = Credentials {
            username: "alice".into(),
            password: "hunter2".into(),
        };
        let printed = format!("{creds:?}");
        assert!(printed.contains("alice"));
        assert!(!printed.contains("hunter2"));

        let overrides = Overrides {
            username: Some("alice".into()),
            password: Some("hunter2".into()),
            ..Overrides::default()
        };
        let settings = Settings::resolve(overrides, None).unwrap();
        assert!(!format!("{settings:?}").contains("hunter2"));
    }
}
