//! Process Shutdown Signals
//!
//! Sessions have no timeouts or cancellation of their own. Stopping the
//! process is the only way to end them all, so `main` races the server
//! against these signals and exits when one arrives.

use tokio::signal;
use tracing::info;

use crate::Result;

/// Wait for SIGTERM, SIGINT or Ctrl+C
pub async fn wait_for_signal() -> Result<()> {
    #[cfg(unix)]
    {
        let mut sigterm = signal::unix::signal(signal::unix::SignalKind::terminate())?;
        let mut sigint = signal::unix::signal(signal::unix::SignalKind::interrupt())?;

        tokio::select! {
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down");
            }
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down");
            }
        }
    }

    #[cfg(not(unix))]
    {
        signal::ctrl_c().await?;
        info!("Received Ctrl+C, shutting down");
    }

    Ok(())
}
