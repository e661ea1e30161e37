//! # Liveness supervisor: login, monitoring cycles and re-authentication.
//!
//! The [`Supervisor`] owns the event bus, the sink fan-out and the portal
//! seams. [`Supervisor::run`] is an explicit state loop; each pass through
//! `Monitoring` builds a brand-new [`LivenessCycle`] and retires it before
//! the next state runs.
//!
//! ## State machine
//! ```text
//!                 login ok                      token cancelled
//! Authenticating ─────────► Monitoring(cycle N) ───────────────► Reauthenticating
//!       │ login err              │    ▲                               │
//!       ▼                        │    └── login ok, settle ───────────┤
//!  Err(InitialLogin)             │        (cycle N+1)                 │ login err
//!                                │ quit                               ▼
//!                                ▼                               Err(Relogin)
//!                            Ok(())  (no further output)
//!
//! Monitoring also ends with Err(Activity) when an activity stops fatally.
//! ```
//!
//! ## Event flow
//! ```text
//! Supervisor ─┐
//! Poller ─────┴─ publish(Event) ─► Bus ─► listener ─► SinkSet::emit ─► [queue S1] ─► S1.on_event
//!                                                                   └► [queue SN] ─► SN.on_event
//! ```
//!
//! ## Rules
//! - The initial login is never retried.
//! - One relogin attempt per detected outage, preceded by a countdown.
//! - The quit future is honoured in every waiting state; quitting publishes nothing.
//! - When `run` returns, every published event has been handed to the sinks.
//!
//! ## Example
//! ```no_run
//! use std::sync::Arc;
//! use sharif_net::{LogSink, MonitorConfig, Overrides, PortalClient, Settings, Sink, Supervisor};
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() -> anyhow::Result<()> {
//!     let settings = Settings::resolve(Overrides::default(), None)?;
//!     let portal = Arc::new(PortalClient::new(&settings)?);
//!
//!     let sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(LogSink::new())];
//!     let sup = Supervisor::builder(MonitorConfig::default(), portal.clone(), portal)
//!         .with_sinks(sinks)
//!         .build();
//!
//!     sup.run(sharif_net::wait_for_quit_signal()).await?;
//!     Ok(())
//! }
//! ```

use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;

use tokio::task::JoinHandle;

use crate::config::MonitorConfig;
use crate::core::builder::SupervisorBuilder;
use crate::core::cycle::LivenessCycle;
use crate::error::{ActivityError, SupervisorError};
use crate::events::{Bus, Event, Severity};
use crate::portal::{Authenticator, StatusSource};
use crate::probe::Pinger;

/// How a monitoring phase ended.
enum CycleExit {
    Quit,
    ConnectivityLost,
    Fatal(ActivityError),
}

enum Phase {
    Monitoring,
    Reauthenticating,
}

/// Drives login, monitoring cycles and re-authentication until quit or a fatal condition.
pub struct Supervisor {
    pub(crate) cfg: MonitorConfig,
    pub(crate) bus: Bus,
    pub(crate) authenticator: Arc<dyn Authenticator>,
    pub(crate) source: Arc<dyn StatusSource>,
    pub(crate) pinger: Arc<dyn Pinger>,
    pub(crate) listener: JoinHandle<()>,
}

impl Supervisor {
    /// Starts building a supervisor around the given portal seams.
    pub fn builder(
        cfg: MonitorConfig,
        authenticator: Arc<dyn Authenticator>,
        source: Arc<dyn StatusSource>,
    ) -> SupervisorBuilder {
        SupervisorBuilder::new(cfg, authenticator, source)
    }

    /// Runs until `quit` resolves (`Ok`) or a fatal condition occurs (`Err`).
    pub async fn run<Q>(self, quit: Q) -> Result<(), SupervisorError>
    where
        Q: Future<Output = ()> + Send,
    {
        let mut quit = std::pin::pin!(quit);
        let outcome = self.drive(quit.as_mut()).await;

        match &outcome {
            Ok(()) => log::debug!("supervisor stopped on quit"),
            Err(e) => log::debug!("supervisor stopped: {}", e.as_label()),
        }

        // Dropping the last bus sender lets the listener drain and stop the sinks.
        let Supervisor { bus, listener, .. } = self;
        drop(bus);
        if let Err(e) = listener.await {
            log::warn!("sink listener ended abnormally: {e}");
        }
        outcome
    }

    async fn drive<Q>(&self, mut quit: Pin<&mut Q>) -> Result<(), SupervisorError>
    where
        Q: Future<Output = ()> + Send,
    {
        let login = tokio::select! {
            biased;
            _ = &mut quit => return Ok(()),
            res = self.authenticator.login() => res,
        };
        if let Err(e) = login {
            self.fail(format!("Failed to login: {e}")).await;
            return Err(SupervisorError::InitialLogin(e));
        }
        self.say("Successfully logged in", Severity::Success);

        let mut cycle_id = 0u64;
        let mut phase = Phase::Monitoring;
        loop {
            phase = match phase {
                Phase::Monitoring => {
                    cycle_id += 1;
                    match self.monitor(cycle_id, quit.as_mut()).await {
                        CycleExit::Quit => return Ok(()),
                        CycleExit::ConnectivityLost => Phase::Reauthenticating,
                        CycleExit::Fatal(e) => {
                            self.fail(e.to_string()).await;
                            return Err(e.into());
                        }
                    }
                }
                Phase::Reauthenticating => {
                    for left in (1..=self.cfg.countdown_steps).rev() {
                        self.say(
                            format!("Internet connection lost, retrying in {left}s"),
                            Severity::Error,
                        );
                        tokio::select! {
                            biased;
                            _ = &mut quit => return Ok(()),
                            _ = tokio::time::sleep(self.cfg.countdown_step) => {}
                        }
                    }

                    let login = tokio::select! {
                        biased;
                        _ = &mut quit => return Ok(()),
                        res = self.authenticator.login() => res,
                    };
                    if let Err(e) = login {
                        self.fail(format!("Failed to login: {e}")).await;
                        return Err(SupervisorError::Relogin(e));
                    }
                    self.say("Successfully logged in again", Severity::Success);

                    tokio::select! {
                        biased;
                        _ = &mut quit => return Ok(()),
                        _ = tokio::time::sleep(self.cfg.settle) => {}
                    }
                    Phase::Monitoring
                }
            };
        }
    }

    /// Runs one cycle until quit, connectivity loss or a fatal activity, then retires it.
    async fn monitor<Q>(&self, id: u64, mut quit: Pin<&mut Q>) -> CycleExit
    where
        Q: Future<Output = ()> + Send,
    {
        let mut cycle = LivenessCycle::start(
            id,
            &self.cfg,
            &self.bus,
            Arc::clone(&self.pinger),
            Arc::clone(&self.source),
        );
        let token = cycle.token();

        let exit = tokio::select! {
            biased;
            _ = &mut quit => CycleExit::Quit,
            _ = token.cancelled() => CycleExit::ConnectivityLost,
            e = cycle.fatal() => CycleExit::Fatal(e),
        };
        cycle.retire(self.cfg.grace).await;
        exit
    }

    fn say(&self, text: impl Into<Arc<str>>, severity: Severity) {
        self.bus.publish(Event::log(text, severity));
    }

    /// Publishes a fatal line and pauses so it reaches the sinks before exit.
    async fn fail(&self, text: String) {
        log::debug!("fatal: {text}");
        self.say(text, Severity::Error);
        tokio::time::sleep(self.cfg.fatal_pause).await;
    }
}
