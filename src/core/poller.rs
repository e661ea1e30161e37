//! # Status poller.
//!
//! Fetches the session status on a fixed interval and relays probe lines,
//! so the sink sees a single stream per cycle:
//!
//! ```text
//! pings channel ──► Event::ping ───────────┐
//! ticker ─► fetch_status ─► history.push ──┴─► Bus (tagged with the cycle id)
//!                       └─► Err: skipped (debug! only)
//! ```
//!
//! ## Rules
//! - An unconfigured status source is fatal before the first tick.
//! - Failed fetches never touch the history and publish nothing.
//! - No status update is published once the cycle token is cancelled.
//! - Probe lines already queued when the token is cancelled are still
//!   relayed; the line that triggered the cancellation is one of them.
//! - A probe line does not trigger an extra fetch.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;
use tokio::time::{self, Instant, MissedTickBehavior};
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::core::activity::Activity;
use crate::error::ActivityError;
use crate::events::{Bus, Event, Severity};
use crate::model::SessionHistory;
use crate::portal::StatusSource;

/// Periodic status fetcher owning the cycle's [`SessionHistory`].
pub struct StatusPoller {
    source: Arc<dyn StatusSource>,
    pings: mpsc::Receiver<String>,
    history: SessionHistory,
    bus: Bus,
    cycle: u64,
    interval: Duration,
}

impl StatusPoller {
    /// Creates a poller for cycle `cycle` with an empty history.
    pub fn new(
        cfg: &MonitorConfig,
        source: Arc<dyn StatusSource>,
        pings: mpsc::Receiver<String>,
        bus: Bus,
        cycle: u64,
    ) -> Self {
        Self {
            source,
            pings,
            history: SessionHistory::new(cfg.history_capacity),
            bus,
            cycle,
            interval: cfg.status_interval,
        }
    }
}

#[async_trait]
impl Activity for StatusPoller {
    fn name(&self) -> &'static str {
        "status-poller"
    }

    async fn run(self: Box<Self>, token: CancellationToken) -> Result<(), ActivityError> {
        let name = self.name();
        let StatusPoller {
            source,
            mut pings,
            mut history,
            bus,
            cycle,
            interval,
        } = *self;

        if let Err(e) = source.ensure_configured() {
            bus.publish(Event::log(e.to_string(), Severity::Error).with_cycle(cycle));
            return Err(ActivityError::Fatal {
                activity: name,
                error: e.to_string(),
            });
        }

        let mut ticker = time::interval_at(Instant::now() + interval, interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        let mut pings_open = true;

        loop {
            tokio::select! {
                biased;
                _ = token.cancelled() => {
                    relay_queued(&mut pings, &bus, cycle);
                    return Ok(());
                }
                line = pings.recv(), if pings_open => match line {
                    Some(line) => bus.publish(Event::ping(line).with_cycle(cycle)),
                    None => pings_open = false,
                },
                _ = ticker.tick() => {
                    let fetched = tokio::select! {
                        biased;
                        _ = token.cancelled() => {
                            relay_queued(&mut pings, &bus, cycle);
                            return Ok(());
                        }
                        fetched = source.fetch_status() => fetched,
                    };
                    match fetched {
                        Ok(snapshot) => {
                            history.push(snapshot.clone());
                            let delta = history.delta();
                            if !token.is_cancelled() {
                                bus.publish(Event::status(snapshot, delta).with_cycle(cycle));
                            }
                        }
                        Err(e) => log::debug!("cycle {cycle}: status fetch skipped: {e}"),
                    }
                }
            }
        }
    }
}

/// Publishes the probe lines sitting in the channel without waiting for more.
fn relay_queued(pings: &mut mpsc::Receiver<String>, bus: &Bus, cycle: u64) {
    while let Ok(line) = pings.try_recv() {
        bus.publish(Event::ping(line).with_cycle(cycle));
    }
}
