//! # Liveness cycle: one generation of monitoring activities.
//!
//! A [`LivenessCycle`] pairs a fresh [`Prober`] and [`StatusPoller`] with a
//! fresh cancellation token and ping channel. The supervisor builds one per
//! successful login and retires it before anything else runs, so at most one
//! cycle publishes at a time.
//!
//! ```text
//! start(id) ─► token(new), pings(new), history(new)
//!           └► JoinSet { prober.run(token), poller.run(token) }
//!
//! retire() ─► token.cancel() ─► join all within grace ─► abort stragglers
//! ```

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::mpsc;
use tokio::task::{Id, JoinSet};
use tokio_util::sync::CancellationToken;

use crate::config::MonitorConfig;
use crate::core::activity::Activity;
use crate::core::{Prober, StatusPoller};
use crate::error::ActivityError;
use crate::events::Bus;
use crate::portal::StatusSource;
use crate::probe::Pinger;

/// Running activities of one cycle plus their shared token.
pub struct LivenessCycle {
    id: u64,
    token: CancellationToken,
    set: JoinSet<Result<(), ActivityError>>,
    names: HashMap<Id, &'static str>,
}

impl LivenessCycle {
    /// Spawns the prober and the poller of cycle `id`.
    ///
    /// Must be called from within a tokio runtime.
    pub fn start(
        id: u64,
        cfg: &MonitorConfig,
        bus: &Bus,
        pinger: Arc<dyn Pinger>,
        source: Arc<dyn StatusSource>,
    ) -> Self {
        let token = CancellationToken::new();
        let (tx, rx) = mpsc::channel(cfg.ping_buffer_clamped());
        let activities: [Box<dyn Activity>; 2] = [
            Box::new(Prober::new(cfg, pinger, tx)),
            Box::new(StatusPoller::new(cfg, source, rx, bus.clone(), id)),
        ];

        let mut set = JoinSet::new();
        let mut names = HashMap::with_capacity(activities.len());
        for activity in activities {
            let name = activity.name();
            let child = token.clone();
            let handle = set.spawn(async move {
                let res = activity.run(child).await;
                log::debug!("cycle {id}: {name} stopped");
                res
            });
            names.insert(handle.id(), name);
        }
        log::debug!("cycle {id}: started");

        Self {
            id,
            token,
            set,
            names,
        }
    }

    /// Clone of the cycle token; cancelled on connectivity loss.
    #[inline]
    pub fn token(&self) -> CancellationToken {
        self.token.clone()
    }

    /// Resolves with the first activity that stopped abnormally.
    ///
    /// Pends forever if every activity stops cleanly.
    pub async fn fatal(&mut self) -> ActivityError {
        while let Some(joined) = self.set.join_next_with_id().await {
            match joined {
                Ok((_, Ok(()))) => continue,
                Ok((_, Err(e))) => return e,
                Err(e) => {
                    let activity = self.names.get(&e.id()).copied().unwrap_or("activity");
                    return ActivityError::Aborted {
                        activity,
                        error: e.to_string(),
                    };
                }
            }
        }
        std::future::pending().await
    }

    /// Cancels the cycle and waits up to `grace` for its activities; the rest are aborted.
    pub async fn retire(mut self, grace: Duration) {
        self.token.cancel();
        let drained = tokio::time::timeout(grace, async {
            while self.set.join_next().await.is_some() {}
        })
        .await;

        if drained.is_err() {
            log::warn!(
                "cycle {}: {} activities still running after {grace:?}, aborting",
                self.id,
                self.set.len()
            );
            self.set.abort_all();
            while self.set.join_next().await.is_some() {}
        }
        log::debug!("cycle {}: retired", self.id);
    }
}
