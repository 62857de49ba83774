//! Shutdown coordination for health evaluations.

use tokio_util::sync::CancellationToken;
use tracing::info;

/// Coordinator for cancelling in-flight health evaluations.
///
/// Every evaluation receives a child of the root token, so triggering the
/// coordinator cancels all of them at once.
#[derive(Debug, Clone, Default)]
pub struct Shutdown {
    token: CancellationToken,
}

impl Shutdown {
    pub fn new() -> Self {
        Self::default()
    }

    /// Token to hand to a single evaluation.
    pub fn token(&self) -> CancellationToken {
        self.token.child_token()
    }

    /// Trigger the shutdown signal.
    pub fn trigger(&self) {
        self.token.cancel();
    }

    pub fn is_triggered(&self) -> bool {
        self.token.is_cancelled()
    }

    /// Resolves once shutdown has been triggered.
    pub async fn triggered(&self) {
        self.token.cancelled().await;
    }

    /// Trigger shutdown on Ctrl-C. The returned task ends with the first signal.
    pub fn listen_for_ctrl_c(&self) -> tokio::task::JoinHandle<()> {
        let shutdown = self.clone();
        tokio::spawn(async move {
            tokio::select! {
                result = tokio::signal::ctrl_c() => {
                    if result.is_ok() {
                        info!("Ctrl-C received, cancelling health evaluations");
                        shutdown.trigger();
                    }
                }
                _ = shutdown.triggered() => {}
            }
        })
    }
}
