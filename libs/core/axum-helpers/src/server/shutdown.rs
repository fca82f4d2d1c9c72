use tokio::signal;
use tokio::sync::watch;
use tracing::{error, info};

/// Shared stop flag for the server and its cleanup task.
///
/// Receivers observe a single `false -> true` transition.
#[derive(Clone)]
pub struct ShutdownCoordinator {
    stopped: watch::Sender<bool>,
}

impl ShutdownCoordinator {
    /// Returns the coordinator and a first receiver.
    pub fn new() -> (Self, watch::Receiver<bool>) {
        let (stopped, rx) = watch::channel(false);
        (Self { stopped }, rx)
    }

    /// Flip the flag. Later calls are no-ops.
    pub fn shutdown(&self) {
        let flipped = self.stopped.send_if_modified(|stopped| !std::mem::replace(stopped, true));
        if flipped {
            info!("Initiating graceful shutdown");
        }
    }

    /// Wait for SIGINT or SIGTERM, then trigger [`Self::shutdown`].
    pub async fn wait_for_signal(&self) {
        shutdown_signal().await;
        self.shutdown();
    }
}

/// Resolves on SIGINT (Ctrl+C) or SIGTERM.
///
/// If a handler cannot be installed that branch never resolves, so the
/// other signal still works.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            error!("Failed to install Ctrl+C handler: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
            }
            Err(e) => {
                error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => info!("Received SIGINT, shutting down gracefully"),
        _ = terminate => info!("Received SIGTERM, shutting down gracefully"),
    }
}
