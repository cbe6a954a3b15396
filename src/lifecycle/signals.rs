//! OS signal handling.
//!
//! Translates SIGTERM and SIGINT into the graceful drain. Both signals
//! get the same treatment: stop accepting, finish in-flight work, exit.

/// Resolves when a termination signal is received.
pub async fn termination_signal() {
    let interrupt = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = interrupt => tracing::info!("Interrupt received, shutting down gracefully"),
        _ = terminate => tracing::info!("Termination signal received, shutting down gracefully"),
    }
}
