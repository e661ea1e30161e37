//! # Liveness probe primitive.
//!
//! [`Pinger`] is the black-box "ping" the connectivity prober relies on: one
//! call, one [`ProbeOutcome`]. [`SystemPinger`] implements it with the
//! platform `ping` utility so no raw-socket privileges are needed in-process;
//! a missing binary or a denied spawn is reported as a failure outcome.

use std::process::Stdio;
use std::sync::LazyLock;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use regex::Regex;
use tokio::process::Command;

static RTT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"time[=<]\s*([0-9]+(?:\.[0-9]+)?)\s*ms").expect("static regex"));

/// Result of a single liveness probe.
#[derive(Debug, Clone, PartialEq)]
pub enum ProbeOutcome {
    Success { rtt: Duration },
    Failure { reason: String },
}

impl ProbeOutcome {
    #[inline]
    pub fn is_success(&self) -> bool {
        matches!(self, ProbeOutcome::Success { .. })
    }

    /// Human-readable line for the observation sink.
    pub fn describe(&self, target: &str) -> String {
        match self {
            ProbeOutcome::Success { rtt } => format!("Pinged {target} in RTT {rtt:?}"),
            ProbeOutcome::Failure { reason } => {
                format!("Failed to ping address {target}: {reason}")
            }
        }
    }
}

/// One-shot reachability check against a host.
#[async_trait]
pub trait Pinger: Send + Sync + 'static {
    async fn ping(&self, target: &str) -> ProbeOutcome;
}

/// [`Pinger`] backed by the system `ping` command.
#[derive(Debug, Clone)]
pub struct SystemPinger {
    timeout: Duration,
}

impl SystemPinger {
    /// Creates a pinger that waits at most `timeout` for an echo reply.
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout: timeout.max(Duration::from_secs(1)),
        }
    }

    fn command(&self, target: &str) -> Command {
        let mut cmd = Command::new("ping");

        #[cfg(windows)]
        cmd.args(["-n", "1", "-w", &self.timeout.as_millis().to_string()]);

        #[cfg(target_os = "macos")]
        cmd.args(["-c", "1", "-W", &self.timeout.as_millis().to_string()]);

        #[cfg(all(unix, not(target_os = "macos")))]
        cmd.args(["-c", "1", "-W", &self.timeout.as_secs().to_string()]);

        cmd.arg(target)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        cmd
    }
}

#[async_trait]
impl Pinger for SystemPinger {
    async fn ping(&self, target: &str) -> ProbeOutcome {
        let started = Instant::now();
        // The utility enforces its own reply timeout; this bounds a hung process.
        let deadline = self.timeout + Duration::from_secs(1);
        let output = match tokio::time::timeout(deadline, self.command(target).output()).await {
            Ok(Ok(output)) => output,
            Ok(Err(e)) => {
                return ProbeOutcome::Failure {
                    reason: format!("cannot run ping: {e}"),
                };
            }
            Err(_) => {
                return ProbeOutcome::Failure {
                    reason: format!("no reply within {deadline:?}"),
                };
            }
        };

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            let reason = match stderr.trim() {
                "" => format!("no reply ({})", output.status),
                msg => msg.to_string(),
            };
            return ProbeOutcome::Failure { reason };
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let rtt = parse_rtt(&stdout).unwrap_or_else(|| started.elapsed());
        ProbeOutcome::Success { rtt }
    }
}

/// Extracts the round-trip time from `ping` output (`time=12.3 ms`, `time<1ms`).
pub(crate) fn parse_rtt(output: &str) -> Option<Duration> {
    let caps = RTT.captures(output)?;
    let millis: f64 = caps.get(1)?.as_str().parse().ok()?;
    Some(Duration::from_micros((millis * 1000.0).round() as u64))
}
