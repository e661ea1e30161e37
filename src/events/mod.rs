//! Observation events: types and broadcast bus.
//!
//! This module groups the event **data model** and the **bus** used to
//! publish events from the supervisor and the active liveness cycle.
//!
//! ## Contents
//! - [`EventKind`], [`Severity`], [`Event`] event classification and payload
//! - [`Bus`] thin wrapper over `tokio::sync::broadcast`
//!
//! ## Quick reference
//! - **Publishers**: `Supervisor` (login/countdown lines), `StatusPoller`
//!   (status updates, relayed probe lines).
//! - **Consumer**: the supervisor's sink listener, which fans out to the `SinkSet`.

mod bus;
mod event;

pub use bus::Bus;
pub use event::{Event, EventKind, Severity};
