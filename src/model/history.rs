//! # Bounded snapshot history and byte deltas.
//!
//! [`SessionHistory`] keeps the most recent snapshots of one liveness cycle.
//! It exists only to compute [`ByteDelta`] between the two newest entries and
//! is owned by a single status poller; a relogin starts a fresh history.
//!
//! ## Rules
//! - Append-only; the oldest entry is evicted once `capacity` is reached.
//! - `delta()` is `None` until at least two snapshots were recorded.
//! - Deltas are plain differences and may be negative.

use std::collections::VecDeque;

use crate::model::{ByteSize, SessionSnapshot};

/// Transfer since the previous snapshot.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ByteDelta {
    pub bytes_up: ByteSize,
    pub bytes_down: ByteSize,
}

/// Capacity-bounded, ordered snapshot log.
#[derive(Debug)]
pub struct SessionHistory {
    entries: VecDeque<SessionSnapshot>,
    capacity: usize,
}

impl SessionHistory {
    /// Creates an empty history. Capacity is clamped to a minimum of 2 so a
    /// delta stays computable.
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(2);
        Self {
            entries: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    /// Appends a snapshot, evicting the oldest one when full.
    pub fn push(&mut self, snapshot: SessionSnapshot) {
        if self.entries.len() == self.capacity {
            self.entries.pop_front();
        }
        self.entries.push_back(snapshot);
    }

    /// Difference between the two most recent snapshots.
    pub fn delta(&self) -> Option<ByteDelta> {
        let mut newest = self.entries.iter().rev();
        let (last, prev) = (newest.next()?, newest.next()?);
        Some(ByteDelta {
            bytes_up: last.bytes_up - prev.bytes_up,
            bytes_down: last.bytes_down - prev.bytes_down,
        })
    }

    #[cfg(test)]
    fn len(&self) -> usize {
        self.entries.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snap(up: i64, down: i64) -> SessionSnapshot {
        SessionSnapshot {
            time_left: "1h".into(),
            bytes_up: ByteSize::from_bytes(up),
            bytes_down: ByteSize::from_bytes(down),
            ..SessionSnapshot::default()
        }
    }

    #[test]
    fn delta_requires_two_entries() {
        let mut history = SessionHistory::new(10);
        assert!(history.delta().is_none());
        history.push(snap(100, 1000));
        assert!(history.delta().is_none());
        history.push(snap(150, 1800));
        let delta = history.delta().unwrap();
        assert_eq!(delta.bytes_up.bytes(), 50);
        assert_eq!(delta.bytes_down.bytes(), 800);
    }

    #[test]
    fn delta_uses_two_most_recent() {
        let mut history = SessionHistory::new(10);
        for (up, down) in [(0, 0), (10, 20), (15, 50)] {
            history.push(snap(up, down));
        }
        let delta = history.delta().unwrap();
        assert_eq!(delta.bytes_up.bytes(), 5);
        assert_eq!(delta.bytes_down.bytes(), 30);
    }

    #[test]
    fn counter_reset_gives_negative_delta() {
        let mut history = SessionHistory::new(10);
        history.push(snap(5000, 9000));
        history.push(snap(10, 20));
        let delta = history.delta().unwrap();
        assert_eq!(delta.bytes_up.bytes(), -4990);
        assert_eq!(delta.bytes_down.bytes(), -8980);
    }

    #[test]
    fn evicts_oldest_at_capacity() {
        let mut history = SessionHistory::new(3);
        for i in 0..5 {
            history.push(snap(i, i));
        }
        assert_eq!(history.len(), 3);
        assert_eq!(history.entries.back().unwrap().bytes_up.bytes(), 4);
        assert_eq!(history.delta().unwrap().bytes_up.bytes(), 1);
    }

    #[test]
    fn capacity_is_clamped_to_two() {
        let mut history = SessionHistory::new(0);
        history.push(snap(1, 1));
        history.push(snap(3, 3));
        assert_eq!(history.len(), 2);
        assert_eq!(history.delta().unwrap().bytes_up.bytes(), 2);
    }
}
