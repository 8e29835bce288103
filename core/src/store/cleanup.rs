//! Background sweeping of expired entries
//!
//! Lazy expiry already hides expired entries from every read; the sweeper only
//! bounds memory by physically dropping them at a regular interval.

use std::sync::Arc;
use std::time::Duration;
use tokio::task::JoinHandle;
use tracing::{debug, info, warn};

use st_shared::CleanupConfig;

use super::timed_store::TimedStore;

/// A store whose expired entries can be physically removed
pub trait Sweepable: Send + Sync {
    /// Drops expired entries and returns how many were dropped
    fn purge_expired(&self) -> usize;

    /// Number of entries physically held, expired ones included
    fn len_hint(&self) -> usize;
}

impl<V: Clone + Send> Sweepable for TimedStore<V> {
    fn purge_expired(&self) -> usize {
        TimedStore::purge_expired(self)
    }

    fn len_hint(&self) -> usize {
        TimedStore::len_hint(self)
    }
}

/// Configuration for the expiry cleanup service
#[derive(Debug, Clone)]
pub struct ExpiryCleanupConfig {
    /// How often to sweep (in seconds)
    pub interval_seconds: u64,
    /// Whether to enable automatic cleanup
    pub enabled: bool,
}

impl Default for ExpiryCleanupConfig {
    fn default() -> Self {
        Self {
            interval_seconds: 60,
            enabled: true,
        }
    }
}

impl From<&CleanupConfig> for ExpiryCleanupConfig {
    fn from(config: &CleanupConfig) -> Self {
        Self {
            interval_seconds: config.interval.max(1),
            enabled: config.enabled,
        }
    }
}

/// Periodically drops expired entries from a store
pub struct ExpiryCleanupService<S: Sweepable> {
    store: Arc<S>,
    config: ExpiryCleanupConfig,
}

impl<S: Sweepable + 'static> ExpiryCleanupService<S> {
    /// Create a new cleanup service over `store`
    pub fn new(store: Arc<S>, config: ExpiryCleanupConfig) -> Self {
        Self { store, config }
    }

    /// Run a single sweep
    pub fn run_cleanup(&self) -> CleanupResult {
        if !self.config.enabled {
            return CleanupResult::default();
        }

        let expired_entries_removed = self.store.purge_expired();
        let result = CleanupResult {
            expired_entries_removed,
            remaining_entries: self.store.len_hint(),
        };

        debug!(
            "Expiry sweep completed - Removed: {}, Remaining: {}",
            result.expired_entries_removed, result.remaining_entries
        );

        result
    }

    /// Start the cleanup service as a background task.
    ///
    /// Must be called from within a tokio runtime. Returns `None` when the
    /// service is disabled.
    pub fn start_background_task(self: Arc<Self>) -> Option<JoinHandle<()>> {
        if !self.config.enabled {
            warn!("Expiry cleanup service is disabled");
            return None;
        }

        let interval = Duration::from_secs(self.config.interval_seconds.max(1));

        Some(tokio::spawn(async move {
            info!(
                "Expiry cleanup service started - will run every {} seconds",
                self.config.interval_seconds
            );

            let mut interval_timer = tokio::time::interval(interval);

            loop {
                interval_timer.tick().await;

                let result = self.run_cleanup();
                if result.expired_entries_removed > 0 {
                    info!("Removed {} expired entries", result.expired_entries_removed);
                }
            }
        }))
    }
}

/// Result of a sweep
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct CleanupResult {
    /// Number of expired entries dropped
    pub expired_entries_removed: usize,
    /// Entries still held after the sweep
    pub remaining_entries: usize,
}
