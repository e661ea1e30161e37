//! # Observation sink trait.
//!
//! Provides [`Sink`], the single narrow capability the monitoring core needs
//! from a presentation layer: accept [`Event`]s in order.
//!
//! Each sink gets:
//! - **Dedicated worker task** (runs independently)
//! - **Per-sink bounded queue** (capacity via [`Sink::queue_capacity`])
//! - **Panic isolation** (panics are caught and logged)
//!
//! ## Architecture
//! ```text
//! SinkSet ──► [bounded queue] ──► worker task ──► sink.on_event()
//!                              └─► panic caught → log::error!
//! ```
//!
//! ## Rules
//! - A slow sink only affects its own queue.
//! - Queue overflow drops the event **for this sink only** and logs a warning.
//! - Events are applied sequentially (FIFO) per sink, in receipt order.
//!
//! ## Example
//! ```rust
//! use async_trait::async_trait;
//! use sharif_net::{Event, EventKind, Sink};
//!
//! struct Counter(std::sync::atomic::AtomicUsize);
//!
//! #[async_trait]
//! impl Sink for Counter {
//!     async fn on_event(&self, ev: &Event) {
//!         if matches!(ev.kind, EventKind::StatusUpdate) {
//!             self.0.fetch_add(1, std::sync::atomic::Ordering::Relaxed);
//!         }
//!     }
//!
//!     fn name(&self) -> &'static str { "counter" }
//! }
//! ```

use async_trait::async_trait;

use crate::events::Event;

/// Append-only, possibly slow consumer of observation events.
///
/// ### Implementation requirements
/// - Use async I/O; avoid blocking the executor.
/// - Handle errors internally; do not panic.
#[async_trait]
pub trait Sink: Send + Sync + 'static {
    /// Applies a single event. Called from the sink's worker task, in FIFO order.
    async fn on_event(&self, event: &Event);

    /// Returns the sink name used in overflow/panic diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }

    /// Returns the preferred queue capacity for this sink (clamped to 1).
    ///
    /// Default: 1024.
    fn queue_capacity(&self) -> usize {
        1024
    }
}
