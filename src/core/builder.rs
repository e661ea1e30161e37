use std::sync::Arc;

use tokio::sync::broadcast::error::RecvError;

use super::supervisor::Supervisor;
use crate::{
    config::MonitorConfig,
    events::Bus,
    portal::{Authenticator, StatusSource},
    probe::{Pinger, SystemPinger},
    sinks::{Sink, SinkSet},
};

/// Builder for constructing a [`Supervisor`] with optional collaborators.
pub struct SupervisorBuilder {
    cfg: MonitorConfig,
    authenticator: Arc<dyn Authenticator>,
    source: Arc<dyn StatusSource>,
    pinger: Option<Arc<dyn Pinger>>,
    sinks: Vec<Arc<dyn Sink>>,
}

impl SupervisorBuilder {
    /// Creates a new builder with the given configuration and portal seams.
    pub fn new(
        cfg: MonitorConfig,
        authenticator: Arc<dyn Authenticator>,
        source: Arc<dyn StatusSource>,
    ) -> Self {
        Self {
            cfg,
            authenticator,
            source,
            pinger: None,
            sinks: Vec::new(),
        }
    }

    /// Replaces the system `ping` based prober backend.
    pub fn with_pinger(mut self, pinger: Arc<dyn Pinger>) -> Self {
        self.pinger = Some(pinger);
        self
    }

    /// Sets the observation sinks.
    ///
    /// Sinks receive events through dedicated workers with bounded queues.
    pub fn with_sinks(mut self, sinks: Vec<Arc<dyn Sink>>) -> Self {
        self.sinks = sinks;
        self
    }

    /// Builds the supervisor and starts the sink listener.
    ///
    /// Must be called from within a tokio runtime.
    pub fn build(self) -> Supervisor {
        let bus = Bus::new(self.cfg.bus_capacity_clamped());
        let pinger: Arc<dyn Pinger> = match self.pinger {
            Some(pinger) => pinger,
            None => Arc::new(SystemPinger::new(self.cfg.probe_timeout)),
        };

        let sinks = SinkSet::new(self.sinks);
        let mut rx = bus.subscribe();
        let listener = tokio::spawn(async move {
            loop {
                match rx.recv().await {
                    Ok(ev) => sinks.emit(ev),
                    Err(RecvError::Lagged(skipped)) => {
                        log::warn!("sink listener lagged, skipped {skipped} events");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            sinks.shutdown().await;
        });

        Supervisor {
            cfg: self.cfg,
            bus,
            authenticator: self.authenticator,
            source: self.source,
            pinger,
            listener,
        }
    }
}
