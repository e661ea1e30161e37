//! # User quit signal.
//!
//! [`wait_for_quit_signal`] is the quit future `main` hands to
//! [`Supervisor::run`](crate::Supervisor::run); tests pass their own future
//! instead.
//!
//! ```text
//! SIGINT | SIGTERM | SIGQUIT (unix), Ctrl-C (elsewhere) ─► resolves
//! handlers cannot be installed                         ─► warn!, never resolves
//! ```
//!
//! A monitor that cannot hear quit requests keeps running until a fatal
//! condition ends it, so a registration failure never looks like a quit.

use std::io;

/// Resolves when the user asks the monitor to stop.
pub async fn wait_for_quit_signal() {
    if let Err(e) = listen().await {
        log::warn!("cannot listen for quit signals: {e}");
        std::future::pending::<()>().await;
    }
}

#[cfg(unix)]
async fn listen() -> io::Result<()> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;
    let mut sigquit = signal(SignalKind::quit())?;

    tokio::select! {
        _ = sigint.recv()  => log::debug!("quit requested: SIGINT"),
        _ = sigterm.recv() => log::debug!("quit requested: SIGTERM"),
        _ = sigquit.recv() => log::debug!("quit requested: SIGQUIT"),
    }
    Ok(())
}

#[cfg(not(unix))]
async fn listen() -> io::Result<()> {
    tokio::signal::ctrl_c().await?;
    log::debug!("quit requested: Ctrl-C");
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    #[tokio::test]
    async fn pends_until_a_signal_arrives() {
        let waited = tokio::time::timeout(Duration::from_millis(50), wait_for_quit_signal()).await;
        assert!(waited.is_err());
    }
}
