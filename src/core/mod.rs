//! Liveness supervision: the monitoring activities and their coordinator.
//!
//! The public API from this module is [`Supervisor`] plus the two activities
//! it runs, which are exposed so they can be driven on their own.
//!
//! Internal modules:
//! - [`activity`]: the cancelable unit a cycle runs;
//! - [`prober`]: connectivity probe with a failure budget;
//! - [`poller`]: status fetches and probe-line relay;
//! - [`cycle`]: one generation of prober + poller with a fresh token;
//! - [`supervisor`]: login / monitoring / re-authentication state loop;
//! - [`shutdown`]: quit signal handling.

mod activity;
mod builder;
mod cycle;
mod poller;
mod prober;
mod shutdown;
mod supervisor;

pub use activity::Activity;
pub use builder::SupervisorBuilder;
pub use cycle::LivenessCycle;
pub use poller::StatusPoller;
pub use prober::Prober;
pub use shutdown::wait_for_quit_signal;
pub use supervisor::Supervisor;
