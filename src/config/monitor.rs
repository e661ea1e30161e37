//! # Monitoring runtime configuration.
//!
//! Provides [`MonitorConfig`], the timing and sizing constants of the
//! liveness supervisor. It is built once at startup and handed to the
//! supervisor by value; activities read the fields they need from it.
//!
//! # Example
//! ```
//! use std::time::Duration;
//! use sharif_net::MonitorConfig;
//!
//! let mut cfg = MonitorConfig::default();
//! cfg.probe_target = "1.1.1.1".into();
//! cfg.settle = Duration::from_secs(1);
//!
//! assert_eq!(cfg.probe_budget, 5);
//! assert_eq!(cfg.countdown_steps, 3);
//! ```

use std::time::Duration;

/// Timing and sizing of one supervised monitoring session.
///
/// ## Field semantics
/// - `probe_*`: connectivity prober cadence and escalation budget
/// - `status_interval`, `history_capacity`: status poller cadence and history bound
/// - `countdown_*`, `settle`, `fatal_pause`: supervisor delays around re-authentication
/// - `grace`: bound on tearing down a retired cycle
/// - `bus_capacity`, `ping_buffer`: channel sizes
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    /// Host probed for liveness.
    pub probe_target: String,
    /// Delay between probes.
    pub probe_interval: Duration,
    /// Consecutive probe failures that mean "connectivity lost".
    pub probe_budget: u32,
    /// Reply timeout handed to the system pinger.
    pub probe_timeout: Duration,

    /// Delay between status fetches.
    pub status_interval: Duration,
    /// Snapshots kept per cycle.
    pub history_capacity: usize,

    /// Number of countdown lines before a relogin attempt.
    pub countdown_steps: u32,
    /// Delay between countdown lines.
    pub countdown_step: Duration,
    /// Pause after a successful relogin before monitoring resumes.
    pub settle: Duration,
    /// Pause after a fatal condition so the last line reaches the sinks.
    pub fatal_pause: Duration,
    /// Maximum wait for a retired cycle's activities to stop.
    ///
    /// Activities still running after `grace` are aborted.
    pub grace: Duration,

    /// Capacity of the event bus ring buffer (min 1; clamped by `Bus`).
    pub bus_capacity: usize,
    /// Capacity of the prober → poller ping channel.
    pub ping_buffer: usize,
}

impl MonitorConfig {
    /// Returns a bus capacity clamped to a minimum of 1.
    #[inline]
    pub fn bus_capacity_clamped(&self) -> usize {
        self.bus_capacity.max(1)
    }

    /// Returns the ping channel capacity clamped to a minimum of 1.
    #[inline]
    pub fn ping_buffer_clamped(&self) -> usize {
        self.ping_buffer.max(1)
    }
}

impl Default for MonitorConfig {
    /// Default configuration:
    ///
    /// - probe `8.8.8.8` every 1s, budget 5, reply timeout 1s
    /// - status every 1s, history of 100 snapshots
    /// - countdown 3 × 1s, settle 500ms, fatal pause 1s, grace 5s
    /// - `bus_capacity = 1024`, `ping_buffer = 16`
    fn default() -> Self {
        Self {
            probe_target: "8.8.8.8".to_string(),
            probe_interval: Duration::from_secs(1),
            probe_budget: 5,
            probe_timeout: Duration::from_secs(1),
            status_interval: Duration::from_secs(1),
            history_capacity: 100,
            countdown_steps: 3,
            countdown_step: Duration::from_secs(1),
            settle: Duration::from_millis(500),
            fatal_pause: Duration::from_secs(1),
            grace: Duration::from_secs(5),
            bus_capacity: 1024,
            ping_buffer: 16,
        }
    }
}
