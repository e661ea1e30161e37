//! # Event bus for observation events.
//!
//! [`Bus`] is a thin wrapper around [`tokio::sync::broadcast`] that provides
//! non-blocking publishing from every concurrent source (prober relay, poller, supervisor).
//!
//! ## Architecture
//! ```text
//! Publishers (many):                 Receiver (one):
//!   Supervisor ──┐
//!   Poller     ──┼──────► Bus ───────► sink_listener ────► SinkSet
//!   (cycle N)    │  (broadcast chan)   (in Supervisor)
//! ```
//!
//! The prober never publishes directly: its outcomes go through the poller's
//! ping channel, so each cycle feeds the bus from one place.
//!
//! ## Rules
//! - **Non-blocking publish**: `publish()` never blocks; it calls `broadcast::Sender::send`.
//! - **Bounded capacity**: a single ring buffer stores recent events for all receivers.
//! - **Lag handling**: slow receivers get `RecvError::Lagged(n)` and skip `n` oldest items.
//! - **Close on drop**: once every `Bus` clone is dropped the receiver drains and sees `Closed`.

use tokio::sync::broadcast;

use super::event::Event;

/// Broadcast channel for observation events.
///
/// Cheap to clone; every liveness cycle holds its own clone.
#[derive(Clone, Debug)]
pub struct Bus {
    tx: broadcast::Sender<Event>,
}

impl Bus {
    /// Creates a new bus with the given channel capacity (clamped to 1).
    pub fn new(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        let (tx, _rx) = broadcast::channel::<Event>(capacity);
        Self { tx }
    }

    /// Publishes an event to all active receivers.
    ///
    /// If there are no receivers, the event is dropped.
    pub fn publish(&self, ev: Event) {
        let _ = self.tx.send(ev);
    }

    /// Creates a new receiver that will observe subsequent events.
    pub fn subscribe(&self) -> broadcast::Receiver<Event> {
        self.tx.subscribe()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventKind;

    #[tokio::test]
    async fn receiver_drains_then_sees_closed() {
        let bus = Bus::new(8);
        let mut rx = bus.subscribe();
        bus.publish(Event::ping("one"));
        bus.clone().publish(Event::ping("two"));
        drop(bus);

        assert_eq!(rx.recv().await.unwrap().text.as_deref(), Some("one"));
        let second = rx.recv().await.unwrap();
        assert_eq!(second.kind, EventKind::Ping);
        assert_eq!(second.text.as_deref(), Some("two"));
        assert!(matches!(
            rx.recv().await,
            Err(broadcast::error::RecvError::Closed)
        ));
    }
}
