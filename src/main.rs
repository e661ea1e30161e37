mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;

use sharif_net::{
    Authenticator, FileConfig, LogSink, MonitorConfig, PortalClient, Settings, Sink,
    StatusSource, Supervisor, default_config_path, wait_for_quit_signal,
};

use cli::{Cli, Command};

#[tokio::main]
async fn main() -> ExitCode {
    init_logging();
    match run(Cli::parse()).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("error: {err}");
            for cause in err.chain().skip(1) {
                eprintln!("  caused by: {cause}");
            }
            ExitCode::FAILURE
        }
    }
}

fn init_logging() {
    let _ = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"))
        .format_timestamp_millis()
        .format_target(false)
        .try_init();
}

async fn run(cli: Cli) -> Result<()> {
    let file = load_config(cli.config.as_deref())?;
    let settings = Settings::resolve(cli.overrides(), file)?;
    let portal = PortalClient::new(&settings)?;

    match cli.command {
        Command::Login(_) if settings.alive => {
            settings.credentials()?;
            let portal = Arc::new(portal);
            let sinks: Vec<Arc<dyn Sink>> = vec![Arc::new(LogSink::new())];
            let sup = Supervisor::builder(MonitorConfig::default(), portal.clone(), portal)
                .with_sinks(sinks)
                .build();
            sup.run(wait_for_quit_signal()).await?;
        }
        Command::Login(_) => {
            settings.credentials()?;
            portal.login().await.context("failed to login")?;
            log::info!("Successfully logged in");
        }
        Command::Status => {
            let snapshot = portal
                .fetch_status()
                .await
                .context("failed to fetch session status")?;
            println!("{snapshot}");
        }
        Command::Logout => {
            portal.logout().await.context("failed to logout")?;
            log::info!("Successfully logged out");
        }
    }
    Ok(())
}

/// Loads the explicit config file, or the default one (written with defaults when absent).
fn load_config(explicit: Option<&Path>) -> Result<Option<FileConfig>> {
    if let Some(path) = explicit {
        let file = FileConfig::load(path)?
            .with_context(|| format!("config file {} not found", path.display()))?;
        return Ok(Some(file));
    }

    let Some(path) = default_config_path() else {
        log::warn!("no home directory found, using built-in defaults");
        return Ok(None);
    };
    match FileConfig::load(&path)? {
        Some(file) => Ok(Some(file)),
        None => {
            write_defaults(&path);
            Ok(None)
        }
    }
}

fn write_defaults(path: &Path) {
    match FileConfig::defaults().write_new(path) {
        Ok(()) => log::info!("wrote default config to {}", path.display()),
        Err(e) => log::warn!("{e}"),
    }
}
