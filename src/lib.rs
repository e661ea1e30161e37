//! # sharif-net
//!
//! **sharif-net** logs in to the Sharif University captive portal and, in
//! `--alive` mode, keeps the session alive: it probes connectivity, polls
//! the portal's session status, and re-authenticates once per detected
//! outage.
//!
//! ## Architecture
//! ### Overview
//! ```text
//!                       ┌───────────────────────────────┐
//!                       │  Supervisor (state loop)      │
//!                       │  Authenticating → Monitoring  │
//!                       │  → Reauthenticating → ...     │
//!                       └──────┬─────────────────┬──────┘
//!                 login/relogin│                 │ one LivenessCycle at a time
//!                              ▼                 ▼
//!                      ┌──────────────┐  ┌─────────────────────────────────┐
//!                      │ Authenticator│  │ LivenessCycle N                 │
//!                      │ (PortalClient│  │  token (fresh)                  │
//!                      └──────────────┘  │  Prober ──pings──► StatusPoller │
//!                                        │    │                  │         │
//!                                        │    │ budget spent     │ fetch   │
//!                                        │    ▼                  ▼         │
//!                                        │  token.cancel()   StatusSource  │
//!                                        └───────────────────────┬─────────┘
//!                                                                │ Event (cycle N)
//!                                                                ▼
//! ┌───────────────────────────────────────────────────────────────────┐
//! │                        Bus (broadcast channel)                    │
//! │               (capacity: MonitorConfig::bus_capacity)             │
//! └─────────────────────────────────┬─────────────────────────────────┘
//!                                   ▼
//!                          ┌──────────────────┐
//!                          │ sink listener    │
//!                          └────────┬─────────┘
//!                                   ▼
//!                               SinkSet (per-sink queues)
//!                          ┌────────┼─────────┐
//!                          ▼        ▼         ▼
//!                       LogSink   sink2 ... sinkN
//! ```
//!
//! ### Cycle lifecycle
//! ```text
//! login ok ──► LivenessCycle::start(N)
//!
//! select {
//!   quit                 ─► retire(N) ─► Ok(())
//!   token cancelled      ─► retire(N) ─► countdown 3,2,1 ─► login
//!                                          ├─ ok  ─► settle ─► start(N+1)
//!                                          └─ err ─► Err(Relogin)
//!   activity fatal       ─► retire(N) ─► Err(Activity)
//! }
//! ```
//!
//! ## Features
//! | Area              | Description                                              | Key types / traits                         |
//! |-------------------|----------------------------------------------------------|--------------------------------------------|
//! | **Supervision**   | Login, monitoring cycles, re-authentication.             | [`Supervisor`], [`LivenessCycle`]          |
//! | **Activities**    | Connectivity probe and status polling.                   | [`Prober`], [`StatusPoller`], [`Activity`] |
//! | **Portal**        | Login, status and logout requests; status page parsing.  | [`PortalClient`], [`parse_status_page`]    |
//! | **Observation**   | Events fanned out to sinks.                              | [`Event`], [`Sink`], [`LogSink`]           |
//! | **Configuration** | Layered settings and monitor timings.                    | [`Settings`], [`MonitorConfig`]            |
//! | **Errors**        | Typed errors with stable labels.                         | [`SupervisorError`], [`PortalError`]       |
//!
//! ## Example
//! ```rust
//! use sharif_net::{ByteSize, parse_status_page};
//!
//! let html = "<table>\
//!     <tr><td>Username</td><td>alice</td></tr>\
//!     <tr><td>IP</td><td>10.0.0.7</td></tr>\
//!     <tr><td>Session time</td><td>00:12:00</td></tr>\
//!     <tr><td>Time left</td><td>02:48:00</td></tr>\
//!     <tr><td>Bytes up</td><td>1.5 MiB</td></tr>\
//!     <tr><td>Bytes down</td><td>20 MiB</td></tr>\
//!     </table>";
//!
//! let snapshot = parse_status_page(html).unwrap();
//! assert_eq!(snapshot.username, "alice");
//! assert_eq!(snapshot.bytes_up, ByteSize::parse("1536 KiB"));
//! ```
mod config;
mod core;
mod error;
mod events;
mod model;
mod portal;
mod probe;
mod sinks;

// ---- Public re-exports ----

pub use crate::core::{
    Activity, LivenessCycle, Prober, StatusPoller, Supervisor, SupervisorBuilder,
    wait_for_quit_signal,
};
pub use config::{
    CONFIG_FILE_NAME, Credentials, Endpoints, FileConfig, MonitorConfig, Overrides, Settings,
    default_config_path,
};
pub use error::{ActivityError, ConfigError, ParseError, PortalError, SupervisorError};
pub use events::{Bus, Event, EventKind, Severity};
pub use model::{ByteDelta, ByteSize, SessionHistory, SessionSnapshot, parse_status_page};
pub use portal::{Authenticator, PortalClient, StatusSource};
pub use probe::{Pinger, ProbeOutcome, RetryBudget, SystemPinger};
pub use sinks::{LogSink, Sink, SinkSet, render_line};
