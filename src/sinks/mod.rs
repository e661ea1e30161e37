//! # Observation sinks.
//!
//! The monitoring core never talks to a presentation layer directly; it
//! publishes [`Event`](crate::Event)s that a [`SinkSet`] fans out to every
//! configured [`Sink`].
//!
//! ## Architecture
//! ```text
//! Bus ──► sink_listener ──► SinkSet::emit(event)
//!                               │
//!                          ┌────┴────┬─────────┐
//!                          ▼         ▼         ▼
//!                       LogSink   Custom     ...
//! ```

mod log;
mod sink;
mod sink_set;

pub use self::log::{LogSink, render_line};
pub use sink::Sink;
pub use sink_set::SinkSet;
