//! Session data model: byte sizes, snapshots, history, and the status page parser.
//!
//! ## Contents
//! - [`ByteSize`] binary-prefixed magnitude with a stable text form
//! - [`SessionSnapshot`] one reading of the portal status page
//! - [`SessionHistory`], [`ByteDelta`] bounded history of one liveness cycle
//! - [`parse_status_page`] HTML body → snapshot

mod byte_size;
mod history;
mod parse;
mod snapshot;

pub use byte_size::ByteSize;
pub use history::{ByteDelta, SessionHistory};
pub use parse::parse_status_page;
pub use snapshot::SessionSnapshot;
