//! # Connectivity prober.
//!
//! Probes one target host on a fixed interval and escalates sustained loss
//! to the cycle's cancellation token, which is the only way probing talks
//! back to the supervisor.
//!
//! ```text
//! every probe_interval:
//!   ping(target) ─► Success ─► budget.reset()
//!                └► Failure ─► budget.record_failure()
//!   forward describe(outcome) ─► pings channel ─► status poller ─► bus
//!   budget exhausted?  ─► token.cancel()   ("connectivity lost")
//! ```
//!
//! ## Rules
//! - The outcome line is forwarded before the cancellation fires.
//! - Exhaustion fires once per cycle; the prober stops right after.
//! - A closed pings channel is ignored (the poller may have stopped first).

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::core::activity::Activity;
use crate::error::ActivityError;
use crate::probe::{Pinger, RetryBudget};

/// Periodic liveness probe with a consecutive-failure budget.
pub struct Prober {
    pinger: Arc<dyn Pinger>,
    target: String,
    interval: Duration,
    budget: RetryBudget,
    pings: mpsc::Sender<String>,
}

impl Prober {
    pub fn new(cfg: &MonitorConfig, pinger: Arc<dyn Pinger>, pings: mpsc::Sender<String>) -> Self {
        Self {
            pinger,
            target: cfg.probe_target.clone(),
            interval: cfg.probe_interval,
            budget: RetryBudget::new(cfg.probe_budget),
            pings,
        }
    }
}

#[async_trait]
impl Activity for Prober {
    fn name(&self) -> &'static str {
        "prober"
    }

    async fn run(self: Box<Self>, token: CancellationToken) -> Result<(), ActivityError> {
        let Prober {
            pinger,
            target,
            interval,
            mut budget,
            pings,
        } = *self;

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => return Ok(()),
                _ = ticker.tick() => {}
            }

            let outcome = tokio::select! {
                biased;
                _ = token.cancelled() => return Ok(()),
                outcome = pinger.ping(&target) => outcome,
            };

            let exhausted = if outcome.is_success() {
                budget.reset();
                false
            } else {
                budget.record_failure()
            };

            tokio::select! {
                biased;
                _ = token.cancelled() => return Ok(()),
                _ = pings.send(outcome.describe(&target)) => {}
            }

            if exhausted {
                log::debug!("probe budget exhausted for {target}, signalling connectivity loss");
                token.cancel();
                return Ok(());
            }
        }
    }
}
