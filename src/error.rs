//! Error types used by the portal client, the monitoring activities and the supervisor.
//!
//! - [`ConfigError`]: settings could not be resolved (startup only, never retried).
//! - [`ParseError`]: the status page did not contain a usable session table.
//! - [`PortalError`]: one login/status/logout exchange failed.
//! - [`ActivityError`]: a prober/poller stopped for a reason other than cancellation.
//! - [`SupervisorError`]: the liveness supervisor terminated fatally.
//!
//! Every enum provides `as_label` (stable snake_case label for logs).

use std::path::PathBuf;

use thiserror::Error;

/// # Errors raised while resolving settings.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Username or password missing from flags, environment and config file.
    #[error("missing required {field} (not specified nor found in the config)")]
    MissingCredential {
        /// Name of the missing field.
        field: &'static str,
    },

    /// An endpoint resolved to a string that is not a valid URL.
    #[error("invalid {name} endpoint {url:?}: {reason}")]
    InvalidEndpoint {
        name: &'static str,
        url: String,
        reason: String,
    },

    /// Config file exists but could not be read.
    #[error("cannot read config file {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Config file is not valid TOML for the expected schema.
    #[error("malformed config file {path:?}: {source}")]
    Malformed {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },

    /// Default config could not be persisted.
    #[error("cannot write config file {path:?}: {reason}")]
    Write { path: PathBuf, reason: String },
}

impl ConfigError {
    pub fn as_label(&self) -> &'static str {
        match self {
            ConfigError::MissingCredential { .. } => "config_missing_credential",
            ConfigError::InvalidEndpoint { .. } => "config_invalid_endpoint",
            ConfigError::Read { .. } => "config_read",
            ConfigError::Malformed { .. } => "config_malformed",
            ConfigError::Write { .. } => "config_write",
        }
    }
}

/// # Errors raised by the status page parser.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// The session table ended before this field.
    #[error("status page has no {0} field")]
    MissingField(&'static str),

    /// The page rendered without a time-left value (missing or garbled page).
    #[error("failed to parse the session status from HTML: empty time left")]
    EmptyTimeLeft,
}

/// # Errors raised by one portal exchange.
///
/// Transport, status and parse failures are transient from the poller's point
/// of view; a missing endpoint is a configuration problem.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum PortalError {
    /// The endpoint needed for this request is not configured.
    #[error("no {0} url found (not configured nor specified)")]
    MissingEndpoint(&'static str),

    /// Login was requested without a username and password.
    #[error("missing credentials (not specified nor found in the config)")]
    MissingCredentials,

    /// HTTP client could not be constructed.
    #[error("cannot build http client: {0}")]
    Client(#[source] reqwest::Error),

    /// Request did not complete (DNS, TLS, connect, timeout, body read).
    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Portal answered with a non-200 status.
    #[error("portal answered with status {0}")]
    Status(u16),

    /// Status page body could not be parsed.
    #[error(transparent)]
    Parse(#[from] ParseError),
}

impl PortalError {
    pub fn as_label(&self) -> &'static str {
        match self {
            PortalError::MissingEndpoint(_) => "portal_missing_endpoint",
            PortalError::MissingCredentials => "portal_missing_credentials",
            PortalError::Client(_) => "portal_client",
            PortalError::Transport(_) => "portal_transport",
            PortalError::Status(_) => "portal_status",
            PortalError::Parse(_) => "portal_parse",
        }
    }

    /// Whether a later attempt of the same request may succeed.
    ///
    /// # Example
    /// ```
    /// use sharif_net::PortalError;
    ///
    /// assert!(PortalError::Status(500).is_transient());
    /// assert!(!PortalError::MissingEndpoint("status").is_transient());
    /// ```
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            PortalError::Transport(_) | PortalError::Status(_) | PortalError::Parse(_)
        )
    }
}

/// # Errors that stop a monitoring activity.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum ActivityError {
    /// The activity cannot continue (e.g. no status source configured).
    #[error("{activity}: fatal error (no retry): {error}")]
    Fatal {
        activity: &'static str,
        error: String,
    },

    /// The activity task panicked or was aborted.
    #[error("{activity}: terminated abnormally: {error}")]
    Aborted {
        activity: &'static str,
        error: String,
    },
}

impl ActivityError {
    pub fn as_label(&self) -> &'static str {
        match self {
            ActivityError::Fatal { .. } => "activity_fatal",
            ActivityError::Aborted { .. } => "activity_aborted",
        }
    }
}

/// # Fatal supervisor outcomes.
///
/// Each variant ends the process with a non-zero exit code.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum SupervisorError {
    /// The first login failed; bad credentials or configuration are not retried.
    #[error("failed to login: {0}")]
    InitialLogin(#[source] PortalError),

    /// Re-authentication after a connectivity loss failed.
    #[error("failed to login again after connectivity loss: {0}")]
    Relogin(#[source] PortalError),

    /// A monitoring activity stopped fatally.
    #[error(transparent)]
    Activity(#[from] ActivityError),
}

impl SupervisorError {
    pub fn as_label(&self) -> &'static str {
        match self {
            SupervisorError::InitialLogin(_) => "supervisor_initial_login",
            SupervisorError::Relogin(_) => "supervisor_relogin",
            SupervisorError::Activity(_) => "supervisor_activity",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_errors_are_transient_portal_errors() {
        let err = PortalError::from(ParseError::EmptyTimeLeft);
        assert!(err.is_transient());
        assert_eq!(err.as_label(), "portal_parse");
    }

    #[test]
    fn supervisor_labels_are_stable() {
        let err = SupervisorError::Relogin(PortalError::Status(401));
        assert_eq!(err.as_label(), "supervisor_relogin");
        assert!(err.to_string().contains("401"));

        let err = SupervisorError::from(ActivityError::Fatal {
            activity: "status-poller",
            error: "no status url".into(),
        });
        assert_eq!(err.as_label(), "supervisor_activity");
        assert!(err.to_string().starts_with("status-poller"));
    }

    #[test]
    fn missing_credential_names_the_field() {
        let err = ConfigError::MissingCredential { field: "password" };
        assert!(err.to_string().contains("password"));
        assert_eq!(err.as_label(), "config_missing_credential");
    }
}
