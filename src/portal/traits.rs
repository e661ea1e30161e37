//! Seams between the liveness supervisor and the captive portal.
//!
//! The supervisor only needs to (re)authenticate, the status poller only
//! needs to fetch snapshots; both are trait objects so tests can script them.

use async_trait::async_trait;

use crate::error::PortalError;
use crate::model::SessionSnapshot;

/// Performs a portal login.
#[async_trait]
pub trait Authenticator: Send + Sync + 'static {
    /// Submits credentials; `Ok` only when the portal accepted them.
    async fn login(&self) -> Result<(), PortalError>;
}

/// Produces session snapshots.
#[async_trait]
pub trait StatusSource: Send + Sync + 'static {
    /// Checks that a status request can be issued at all.
    ///
    /// Called once per cycle before the first fetch; an error here is fatal
    /// for the cycle, whereas [`fetch_status`](Self::fetch_status) errors are not.
    fn ensure_configured(&self) -> Result<(), PortalError> {
        Ok(())
    }

    /// Fetches and parses the current session status.
    async fn fetch_status(&self) -> Result<SessionSnapshot, PortalError>;
}
