//! # HTTP client for the captive portal.
//!
//! [`PortalClient`] issues the three portal requests:
//!
//! ```text
//! login   POST <login>   form: username, password   → 200 = accepted
//! status  GET  <status>                             → 200 + HTML session table
//! logout  POST <logout>                             → 200 = session closed
//! ```
//!
//! Every request is bounded by [`REQUEST_TIMEOUT`]. With `use_ip` the portal
//! is addressed by IP, so certificate validation is disabled for that client.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, StatusCode, Url};

use crate::config::{Credentials, Settings};
use crate::error::PortalError;
use crate::model::{SessionSnapshot, parse_status_page};
use crate::portal::{Authenticator, StatusSource};

/// Upper bound on a single portal request.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Portal client bound to one resolved [`Settings`].
#[derive(Clone, Debug)]
pub struct PortalClient {
    http: Client,
    credentials: Option<Credentials>,
    login_url: Option<Url>,
    status_url: Option<Url>,
    logout_url: Option<Url>,
}

impl PortalClient {
    /// Builds a client for the endpoints and credentials in `settings`.
    ///
    /// Missing credentials or endpoints are not an error here; the request
    /// that needs them fails instead.
    pub fn new(settings: &Settings) -> Result<Self, PortalError> {
        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .danger_accept_invalid_certs(settings.use_ip)
            .build()
            .map_err(PortalError::Client)?;

        Ok(Self {
            http,
            credentials: settings.credentials().ok(),
            login_url: settings.endpoints.login.clone(),
            status_url: settings.endpoints.status.clone(),
            logout_url: settings.endpoints.logout.clone(),
        })
    }

    /// Closes the current portal session.
    pub async fn logout(&self) -> Result<(), PortalError> {
        let url = self
            .logout_url
            .clone()
            .ok_or(PortalError::MissingEndpoint("logout"))?;
        let res = self
            .http
            .post(url)
            .send()
            .await
            .map_err(PortalError::Transport)?;
        expect_ok(res.status())
    }
}

#[async_trait]
impl Authenticator for PortalClient {
    async fn login(&self) -> Result<(), PortalError> {
        let url = self
            .login_url
            .clone()
            .ok_or(PortalError::MissingEndpoint("login"))?;
        let creds = self
            .credentials
            .as_ref()
            .ok_or(PortalError::MissingCredentials)?;

        let res = self
            .http
            .post(url)
            .form(&[
                ("username", creds.username.as_str()),
                ("password", creds.password.as_str()),
            ])
            .send()
            .await
            .map_err(PortalError::Transport)?;
        log::debug!("login answered {}", res.status());
        expect_ok(res.status())
    }
}

#[async_trait]
impl StatusSource for PortalClient {
    fn ensure_configured(&self) -> Result<(), PortalError> {
        match self.status_url {
            Some(_) => Ok(()),
            None => Err(PortalError::MissingEndpoint("session status")),
        }
    }

    async fn fetch_status(&self) -> Result<SessionSnapshot, PortalError> {
        let url = self
            .status_url
            .clone()
            .ok_or(PortalError::MissingEndpoint("session status"))?;
        let res = self
            .http
            .get(url)
            .send()
            .await
            .map_err(PortalError::Transport)?;
        expect_ok(res.status())?;

        let body = res.text().await.map_err(PortalError::Transport)?;
        Ok(parse_status_page(&body)?)
    }
}

fn expect_ok(status: StatusCode) -> Result<(), PortalError> {
    if status == StatusCode::OK {
        Ok(())
    } else {
        Err(PortalError::Status(status.as_u16()))
    }
}
