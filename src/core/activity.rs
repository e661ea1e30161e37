//! # Monitoring activity abstraction.
//!
//! An [`Activity`] is one of the two long-running halves of a liveness cycle
//! (connectivity prober, status poller). It owns its state, consumes itself
//! when run, and stops cooperatively once its cycle token is cancelled.
//!
//! ## Rules
//! - `Ok(())` means "stopped"; cancellation is not an error.
//! - `Err(ActivityError::Fatal)` ends the whole supervisor.
//! - An activity never outlives its cycle: the token it receives is never reused.

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::error::ActivityError;

/// Long-running, cancelable unit of a liveness cycle.
#[async_trait]
pub trait Activity: Send + 'static {
    /// Stable name used in diagnostics and errors.
    fn name(&self) -> &'static str;

    /// Runs until `token` is cancelled or a fatal condition occurs.
    async fn run(self: Box<Self>, token: CancellationToken) -> Result<(), ActivityError>;
}
