// src/signal.rs

//! Shutdown signal handling.

use std::future::Future;

use tracing::info;

use crate::errors::Result;

/// Register for SIGINT and SIGTERM and return a future that resolves on the
/// first of them.
///
/// Registration happens before this function returns, so a signal delivered
/// while the first test cycle is still running is not lost.
#[cfg(unix)]
pub fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    use tokio::signal::unix::{SignalKind, signal};

    let mut interrupt = signal(SignalKind::interrupt())?;
    let mut terminate = signal(SignalKind::terminate())?;

    Ok(async move {
        tokio::select! {
            _ = interrupt.recv() => info!("received SIGINT"),
            _ = terminate.recv() => info!("received SIGTERM"),
        }
    })
}

/// Ctrl-C only on platforms without Unix signals.
#[cfg(not(unix))]
pub fn shutdown_signal() -> Result<impl Future<Output = ()> + Send + 'static> {
    use tracing::warn;

    Ok(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => info!("received Ctrl-C"),
            Err(err) => {
                warn!(error = %err, "failed to listen for Ctrl-C");
                std::future::pending::<()>().await;
            }
        }
    })
}
