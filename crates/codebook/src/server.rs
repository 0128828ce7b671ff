//! HTTP server lifecycle.

use std::sync::Arc;

use tokio::net::TcpListener;
use tracing::{info, warn};

use crate::api::{self, AppState};
use crate::config::Config;
use crate::error::{Error, Result};
use crate::store::Store;

/// Bind the configured address and serve the API until shutdown.
///
/// # Errors
///
/// Returns [`Error::Bind`] if the address cannot be bound, or an I/O error
/// if the server fails while running.
pub async fn run(config: &Config, store: Store) -> Result<()> {
    let address = config.listen_address();
    let listener = TcpListener::bind(&address)
        .await
        .map_err(|source| Error::Bind {
            address: address.clone(),
            source,
        })?;

    info!("Server running at http://{}", listener.local_addr()?);
    serve(listener, Arc::new(store)).await
}

/// Serve the API on an already bound listener until Ctrl-C or SIGTERM.
///
/// # Errors
///
/// Returns an I/O error if the server fails while running.
pub async fn serve(listener: TcpListener, state: AppState) -> Result<()> {
    axum::serve(listener, api::router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    info!("Shutdown signal received");
}
