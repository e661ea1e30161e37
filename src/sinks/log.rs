//! # LogSink: line-oriented event printer
//!
//! Renders every [`Event`] as one line through the [`log`] facade. This is the
//! default presentation of the `login --alive` monitor.
//!
//! ## Example output
//! ```text
//! [success] Successfully logged in
//! [ping] cycle=1 Pinged 8.8.8.8 in RTT 12.4ms
//! [status] cycle=1 user=alice ip=10.0.0.7 session=01:02:03 left=5 days up=1.5 MiB down=2 GiB Δup=12 KiB Δdown=1.2 MiB
//! [error] Internet connection lost, retrying in 3s
//! ```

use async_trait::async_trait;
use log::{error, info};

use crate::events::{Event, EventKind, Severity};
use crate::sinks::Sink;

/// Event writer sink.
#[derive(Default)]
pub struct LogSink;

impl LogSink {
    /// Construct a new [`LogSink`].
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

/// Formats an event the way [`LogSink`] prints it.
pub fn render_line(e: &Event) -> String {
    let text = e.text.as_deref().unwrap_or("");
    match e.kind {
        EventKind::Log => {
            let tag = match e.severity {
                Severity::Info => "info",
                Severity::Error => "error",
                Severity::Success => "success",
            };
            format!("[{tag}] {text}")
        }
        EventKind::Ping => format!("[ping] cycle={} {text}", e.cycle),
        EventKind::StatusUpdate => {
            let Some(s) = e.snapshot.as_deref() else {
                return format!("[status] cycle={} <empty>", e.cycle);
            };
            let mut line = format!(
                "[status] cycle={} user={} ip={} session={} left={} up={} down={}",
                e.cycle,
                s.username,
                s.ip_address,
                s.session_time,
                s.time_left,
                s.bytes_up,
                s.bytes_down
            );
            if let Some(d) = e.delta {
                line.push_str(&format!(" Δup={} Δdown={}", d.bytes_up, d.bytes_down));
            }
            line
        }
    }
}

#[async_trait]
impl Sink for LogSink {
    async fn on_event(&self, e: &Event) {
        let line = render_line(e);
        match e.severity {
            Severity::Error => error!("{line}"),
            Severity::Info | Severity::Success => info!("{line}"),
        }
    }

    fn name(&self) -> &'static str {
        "LogSink"
    }
}
