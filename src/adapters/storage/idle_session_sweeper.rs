//! IdleSessionSweeper - background service that drops abandoned sessions.
//!
//! Conversations that stop mid-intake would otherwise hold their session
//! forever. The sweeper periodically evicts every session untouched for
//! longer than the idle timeout.
//!
//! ## Configuration
//!
//! | Setting | Default | Description |
//! |---------|---------|-------------|
//! | `idle_timeout` | 30m | Age after which an untouched session is evicted |
//! | `sweep_interval` | 60s | How often to scan the store |

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tokio::time;

use crate::domain::foundation::Timestamp;
use crate::ports::{SessionStore, SessionStoreError};

/// Configuration for the IdleSessionSweeper.
#[derive(Debug, Clone)]
pub struct IdleSweeperConfig {
    pub idle_timeout: Duration,
    pub sweep_interval: Duration,
}

impl Default for IdleSweeperConfig {
    fn default() -> Self {
        Self {
            idle_timeout: Duration::from_secs(30 * 60),
            sweep_interval: Duration::from_secs(60),
        }
    }
}

/// Periodically evicts idle sessions from a [`SessionStore`].
pub struct IdleSessionSweeper {
    store: Arc<dyn SessionStore>,
    config: IdleSweeperConfig,
}

impl IdleSessionSweeper {
    pub fn new(store: Arc<dyn SessionStore>, config: IdleSweeperConfig) -> Self {
        Self { store, config }
    }

    /// Run the sweep loop until the shutdown signal flips to `true`.
    ///
    /// Store failures are logged and the loop keeps going.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        let mut interval = time::interval(self.config.sweep_interval);

        loop {
            tokio::select! {
                _ = shutdown.changed() => {
                    if *shutdown.borrow() {
                        tracing::debug!("Idle session sweeper stopping");
                        return;
                    }
                }

                _ = interval.tick() => {
                    if let Err(e) = self.sweep_once().await {
                        tracing::warn!(error = %e, "Idle session sweep failed");
                    }
                }
            }
        }
    }

    /// Evict every session idle for longer than the timeout.
    ///
    /// # Returns
    /// The number of sessions evicted
    pub async fn sweep_once(&self) -> Result<usize, SessionStoreError> {
        let cutoff = Timestamp::now().minus_secs(self.config.idle_timeout.as_secs());
        let evicted = self.store.evict_idle(cutoff).await?;
        if evicted > 0 {
            tracing::info!(evicted, "Evicted idle intake sessions");
        }
        Ok(evicted)
    }
}
