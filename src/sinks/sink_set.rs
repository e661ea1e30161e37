//! # Non-blocking event fan-out to multiple sinks.
//!
//! [`SinkSet`] distributes events to every configured [`Sink`]
//! without blocking the publisher, while serializing delivery per sink.
//!
//! ## Architecture
//! ```text
//! emit(event)
//!     │
//!     ├──► [queue 1] ──► worker 1 ──► sink1.on_event()
//!     │    (bounded)         └──────► panic → log::error!
//!     └──► [queue N] ──► worker N ──► sinkN.on_event()
//!          (bounded)
//! ```
//!
//! ## Rules
//! - **Per-sink FIFO**: each sink sees events in receipt order
//! - **Overflow**: event dropped for that sink only, warning logged
//! - **Non-blocking**: `emit()` returns immediately (uses `try_send`)
//! - **Isolation**: a slow or panicking sink doesn't affect the others

use std::sync::Arc;

use futures::FutureExt;
use log::{error, warn};
use tokio::{sync::mpsc, task::JoinHandle};

use crate::events::Event;
use crate::sinks::Sink;

/// Per-sink channel metadata.
struct SinkChannel {
    name: &'static str,
    sender: mpsc::Sender<Arc<Event>>,
}

/// Fan-out coordinator for observation sinks.
pub struct SinkSet {
    channels: Vec<SinkChannel>,
    workers: Vec<JoinHandle<()>>,
}

impl SinkSet {
    /// Creates a new set and spawns one worker task per sink.
    ///
    /// Must be called from within a tokio runtime.
    #[must_use]
    pub fn new(sinks: Vec<Arc<dyn Sink>>) -> Self {
        let mut channels = Vec::with_capacity(sinks.len());
        let mut workers = Vec::with_capacity(sinks.len());

        for sink in sinks {
            let cap = sink.queue_capacity().max(1);
            let name = sink.name();
            let (tx, mut rx) = mpsc::channel::<Arc<Event>>(cap);

            let handle = tokio::spawn(async move {
                while let Some(ev) = rx.recv().await {
                    let fut = sink.on_event(ev.as_ref());
                    if let Err(panic_err) = std::panic::AssertUnwindSafe(fut).catch_unwind().await {
                        let any = &*panic_err;
                        let info = if let Some(msg) = any.downcast_ref::<&'static str>() {
                            (*msg).to_string()
                        } else if let Some(msg) = any.downcast_ref::<String>() {
                            msg.clone()
                        } else {
                            "unknown panic".to_string()
                        };
                        error!("sink {} panicked on event seq={}: {info}", sink.name(), ev.seq);
                    }
                }
            });
            channels.push(SinkChannel { name, sender: tx });
            workers.push(handle);
        }
        Self { channels, workers }
    }

    /// Emits an event to all sinks without waiting for delivery.
    pub fn emit(&self, event: Event) {
        let event = Arc::new(event);
        for channel in &self.channels {
            match channel.sender.try_send(Arc::clone(&event)) {
                Ok(()) => {}
                Err(mpsc::error::TrySendError::Full(_)) => {
                    warn!("sink {} queue full, dropped event seq={}", channel.name, event.seq);
                }
                Err(mpsc::error::TrySendError::Closed(_)) => {
                    warn!("sink {} closed, dropped event seq={}", channel.name, event.seq);
                }
            }
        }
    }

    /// Number of sinks in the set.
    pub fn len(&self) -> usize {
        self.channels.len()
    }

    pub fn is_empty(&self) -> bool {
        self.channels.is_empty()
    }

    /// Drains and stops all sink workers.
    ///
    /// 1. Drops all channel senders (workers see channel closed after the backlog)
    /// 2. Awaits all worker tasks to finish
    pub async fn shutdown(self) {
        drop(self.channels);

        for h in self.workers {
            let _ = h.await;
        }
    }
}
