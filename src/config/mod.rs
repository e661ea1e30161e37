//! Configuration: runtime constants of the monitor and the layered portal settings.
//!
//! - [`MonitorConfig`]: intervals, budgets and delays of the liveness supervisor;
//! - [`Settings`]: credentials and endpoints resolved from flags, file and defaults;
//! - [`FileConfig`]: the persisted TOML file.

mod file;
mod monitor;
mod settings;

pub use file::{CONFIG_FILE_NAME, FileConfig, default_config_path};
pub use monitor::MonitorConfig;
pub use settings::{Credentials, Endpoints, Overrides, Settings};
