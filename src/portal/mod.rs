//! Captive portal access: the HTTP client and the traits the supervisor uses.

mod client;
mod traits;

pub use client::PortalClient;
pub use traits::{Authenticator, StatusSource};
