//! # Observation events emitted by the supervisor and its activities.
//!
//! The [`EventKind`] enum classifies the three things a sink can be asked to show:
//! - **Log**: a supervisor/lifecycle line with a [`Severity`]
//! - **Ping**: a connectivity probe outcome relayed by the status poller
//! - **StatusUpdate**: a fresh [`SessionSnapshot`] and, when available, its [`ByteDelta`]
//!
//! The [`Event`] struct carries the payload plus ordering metadata.
//!
//! ## Ordering guarantees
//! Each event has a globally unique sequence number (`seq`) that increases monotonically,
//! and the `cycle` number of the liveness cycle that produced it (`0` = supervisor itself).
//!
//! ## Example
//! ```rust
//! use sharif_net::{Event, EventKind, Severity};
//!
//! let ev = Event::log("Successfully logged in", Severity::Success).with_cycle(2);
//!
//! assert_eq!(ev.kind, EventKind::Log);
//! assert_eq!(ev.text.as_deref(), Some("Successfully logged in"));
//! assert_eq!(ev.cycle, 2);
//! ```

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering as AtomicOrdering};
use std::time::SystemTime;

use crate::model::{ByteDelta, SessionSnapshot};

/// Global sequence counter for event ordering.
static EVENT_SEQ: AtomicU64 = AtomicU64::new(0);

/// Classification of observation events.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventKind {
    /// Log line.
    ///
    /// Sets:
    /// - `text`: the line
    /// - `severity`: info / error / success
    Log,

    /// Probe outcome line (always informational).
    ///
    /// Sets:
    /// - `text`: rendered probe outcome
    Ping,

    /// New session snapshot from the status poller.
    ///
    /// Sets:
    /// - `snapshot`: parsed status page
    /// - `delta`: transfer since the previous snapshot of the same cycle (optional)
    StatusUpdate,
}

/// How a log line should be presented.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Severity {
    #[default]
    Info,
    Error,
    Success,
}

/// Observation event with optional payload.
///
/// - `seq`: monotonic global sequence for ordering
/// - `at`: wall-clock timestamp
/// - `cycle`: liveness cycle that produced the event
#[derive(Clone, Debug)]
pub struct Event {
    /// Globally unique, monotonically increasing sequence number.
    pub seq: u64,
    /// Wall-clock timestamp.
    pub at: SystemTime,
    /// Event classification.
    pub kind: EventKind,
    /// Presentation hint (meaningful for `Log`).
    pub severity: Severity,
    /// Liveness cycle number (`0` for supervisor-level lines).
    pub cycle: u64,
    /// Line text for `Log` / `Ping`.
    pub text: Option<Arc<str>>,
    /// Snapshot for `StatusUpdate`.
    pub snapshot: Option<Arc<SessionSnapshot>>,
    /// Byte delta for `StatusUpdate`, when the history has two entries.
    pub delta: Option<ByteDelta>,
}

impl Event {
    /// Creates a new event of the given kind with current timestamp and next sequence number.
    pub fn new(kind: EventKind) -> Self {
        Self {
            seq: EVENT_SEQ.fetch_add(1, AtomicOrdering::Relaxed),
            at: SystemTime::now(),
            kind,
            severity: Severity::Info,
            cycle: 0,
            text: None,
            snapshot: None,
            delta: None,
        }
    }

    /// Creates a log line.
    #[inline]
    pub fn log(text: impl Into<Arc<str>>, severity: Severity) -> Self {
        Event::new(EventKind::Log)
            .with_text(text)
            .with_severity(severity)
    }

    /// Creates a probe outcome line.
    #[inline]
    pub fn ping(text: impl Into<Arc<str>>) -> Self {
        Event::new(EventKind::Ping).with_text(text)
    }

    /// Creates a status update.
    #[inline]
    pub fn status(snapshot: SessionSnapshot, delta: Option<ByteDelta>) -> Self {
        let mut ev = Event::new(EventKind::StatusUpdate);
        ev.snapshot = Some(Arc::new(snapshot));
        ev.delta = delta;
        ev
    }

    /// Attaches line text.
    #[inline]
    pub fn with_text(mut self, text: impl Into<Arc<str>>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Sets the severity.
    #[inline]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Tags the event with the producing liveness cycle.
    #[inline]
    pub fn with_cycle(mut self, cycle: u64) -> Self {
        self.cycle = cycle;
        self
    }

    #[inline]
    pub fn is_status_update(&self) -> bool {
        matches!(self.kind, EventKind::StatusUpdate)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sequence_numbers_increase() {
        let a = Event::ping("a");
        let b = Event::ping("b");
        assert!(b.seq > a.seq);
    }

    #[test]
    fn status_event_carries_payload() {
        let snapshot = SessionSnapshot {
            username: "alice".into(),
            time_left: "1h".into(),
            ..SessionSnapshot::default()
        };
        let ev = Event::status(snapshot, None).with_cycle(3);
        assert!(ev.is_status_update());
        assert_eq!(ev.snapshot.as_ref().unwrap().username, "alice");
        assert!(ev.delta.is_none());
        assert_eq!(ev.cycle, 3);
        assert_eq!(ev.severity, Severity::Info);
    }
}
