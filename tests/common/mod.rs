//! In-memory fakes for the portal, the pinger and the sink.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use sharif_net::{
    Authenticator, ByteSize, Event, EventKind, Pinger, PortalError, ProbeOutcome,
    SessionSnapshot, Sink, StatusSource,
};

pub fn ok() -> ProbeOutcome {
    ProbeOutcome::Success {
        rtt: Duration::from_millis(12),
    }
}

pub fn lost() -> ProbeOutcome {
    ProbeOutcome::Failure {
        reason: "no reply".into(),
    }
}

pub fn snapshot(up: i64, down: i64) -> SessionSnapshot {
    SessionSnapshot {
        username: "alice".into(),
        ip_address: "10.0.0.7".into(),
        session_time: "00:10:00".into(),
        time_left: "02:50:00".into(),
        bytes_up: ByteSize::from_bytes(up),
        bytes_down: ByteSize::from_bytes(down),
    }
}

/// Replays scripted outcomes, then keeps answering with `fallback`.
pub struct ScriptedPinger {
    script: Mutex<VecDeque<ProbeOutcome>>,
    fallback: ProbeOutcome,
    calls: AtomicUsize,
}

impl ScriptedPinger {
    pub fn new(script: impl IntoIterator<Item = ProbeOutcome>, fallback: ProbeOutcome) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            fallback,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Pinger for ScriptedPinger {
    async fn ping(&self, _target: &str) -> ProbeOutcome {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| self.fallback.clone())
    }
}

/// Replays scripted fetch results, then reports steadily growing counters.
pub struct ScriptedStatus {
    script: Mutex<VecDeque<Result<SessionSnapshot, PortalError>>>,
    configured: bool,
    fetches: AtomicUsize,
}

impl ScriptedStatus {
    pub fn new(script: impl IntoIterator<Item = Result<SessionSnapshot, PortalError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            configured: true,
            fetches: AtomicUsize::new(0),
        }
    }

    pub fn steady() -> Self {
        Self::new([])
    }

    pub fn unconfigured() -> Self {
        Self {
            configured: false,
            ..Self::steady()
        }
    }

    pub fn fetches(&self) -> usize {
        self.fetches.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl StatusSource for ScriptedStatus {
    fn ensure_configured(&self) -> Result<(), PortalError> {
        if self.configured {
            Ok(())
        } else {
            Err(PortalError::MissingEndpoint("session status"))
        }
    }

    async fn fetch_status(&self) -> Result<SessionSnapshot, PortalError> {
        let n = self.fetches.fetch_add(1, Ordering::SeqCst) as i64;
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or_else(|| Ok(snapshot(1024 * n, 4096 * n)))
    }
}

/// Replays scripted login results, then accepts every login.
pub struct ScriptedLogin {
    script: Mutex<VecDeque<Result<(), PortalError>>>,
    calls: AtomicUsize,
}

impl ScriptedLogin {
    pub fn new(script: impl IntoIterator<Item = Result<(), PortalError>>) -> Self {
        Self {
            script: Mutex::new(script.into_iter().collect()),
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Authenticator for ScriptedLogin {
    async fn login(&self) -> Result<(), PortalError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let next = self.script.lock().unwrap().pop_front();
        next.unwrap_or(Ok(()))
    }
}

/// Sink that keeps every event it receives.
#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<Event>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<Event> {
        self.events.lock().unwrap().clone()
    }

    /// Text of every `Log` event, in order.
    pub fn log_lines(&self) -> Vec<String> {
        self.events()
            .iter()
            .filter(|e| e.kind == EventKind::Log)
            .filter_map(|e| e.text.as_deref().map(str::to_string))
            .collect()
    }

    pub fn count(&self, kind: EventKind) -> usize {
        self.events().iter().filter(|e| e.kind == kind).count()
    }
}

#[async_trait]
impl Sink for RecordingSink {
    async fn on_event(&self, event: &Event) {
        self.events.lock().unwrap().push(event.clone());
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}
