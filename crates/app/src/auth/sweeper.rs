//! Periodic removal of expired sessions.

use std::{sync::Arc, time::Duration};

use tokio::{
    task::{JoinError, JoinHandle},
    time::{MissedTickBehavior, interval},
};
use tokio_util::sync::CancellationToken;

use crate::auth::TokenRegistry;

/// Default sweep period.
pub const DEFAULT_SWEEP_INTERVAL: Duration = Duration::from_secs(60 * 60);

/// Shortest period accepted; anything below is raised to this.
pub const MIN_SWEEP_INTERVAL: Duration = Duration::from_secs(1);

/// Handle to the background sweep task.
#[derive(Debug)]
pub struct SessionSweeper {
    cancel: CancellationToken,
    handle: JoinHandle<()>,
}

impl SessionSweeper {
    /// Start sweeping `registry` every `period`. The first sweep runs one period after start.
    ///
    /// A `period` shorter than [`MIN_SWEEP_INTERVAL`] is raised to it.
    #[must_use]
    pub fn spawn(registry: Arc<TokenRegistry>, period: Duration) -> Self {
        let period = period.max(MIN_SWEEP_INTERVAL);
        let cancel = CancellationToken::new();
        let handle = tokio::spawn(run(registry, period, cancel.clone()));

        Self { cancel, handle }
    }

    /// Stop the task and wait for it to finish.
    ///
    /// # Errors
    ///
    /// Returns an error if the task panicked.
    pub async fn shutdown(self) -> Result<(), JoinError> {
        self.cancel.cancel();
        self.handle.await
    }
}

async fn run(registry: Arc<TokenRegistry>, period: Duration, cancel: CancellationToken) {
    let mut ticker = interval(period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    // The first tick completes immediately.
    ticker.tick().await;

    loop {
        tokio::select! {
            () = cancel.cancelled() => break,
            _ = ticker.tick() => {
                let removed = registry.purge_expired().await;
                let active = registry.active_count().await;

                tracing::info!(removed, active, "expired sessions purged");
            }
        }
    }

    tracing::debug!("session sweeper stopped");
}
