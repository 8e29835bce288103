//! Expired-entry sweeping configuration

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Background sweeper configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct CleanupConfig {
    /// Enable the background sweeper
    #[serde(default = "default_enabled")]
    pub enabled: bool,

    /// Sweep interval in seconds
    #[serde(default = "default_cleanup_interval")]
    pub interval: u64,
}

impl Default for CleanupConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            interval: default_cleanup_interval(),
        }
    }
}

impl CleanupConfig {
    /// Disabled sweeper; expiry is then enforced on access only
    pub fn disabled() -> Self {
        Self {
            enabled: false,
            ..Default::default()
        }
    }

    /// Set the sweep interval in seconds
    pub fn with_interval(mut self, seconds: u64) -> Self {
        self.interval = seconds.max(1);
        self
    }

    /// Sweep interval as a duration
    pub fn interval_duration(&self) -> Duration {
        Duration::from_secs(self.interval)
    }
}

fn default_enabled() -> bool {
    true
}

fn default_cleanup_interval() -> u64 {
    60  // 1 minute
}
