//! Connectivity probing primitives: the [`Pinger`] seam, its system-backed
//! implementation, and the [`RetryBudget`] that decides when connectivity is lost.

mod budget;
mod pinger;

pub use budget::RetryBudget;
pub use pinger::{Pinger, ProbeOutcome, SystemPinger};
