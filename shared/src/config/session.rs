//! Session token lifetime configuration

use serde::{Deserialize, Serialize};
use std::env;
use std::time::Duration;

/// Seed used when none is configured; never use it in production
pub const DEFAULT_SEED_SECRET: &str = "development-seed-please-change-in-production";

/// Lifetimes and seed used by the token store
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SessionConfig {
    /// Lifetime of an unauthenticated session in seconds
    pub no_auth_timeout: u64,

    /// Lifetime of an authenticated session in seconds
    pub auth_timeout: u64,

    /// Seed used to derive the initial token salt.
    /// Keep it out of source control.
    #[serde(default = "default_seed_secret")]
    pub seed_secret: String,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            no_auth_timeout: 900,     // 15 minutes
            auth_timeout: 604800,     // 7 days
            seed_secret: default_seed_secret(),
        }
    }
}

impl SessionConfig {
    /// Create a new session configuration with a seed secret
    pub fn new(seed_secret: impl Into<String>) -> Self {
        Self {
            seed_secret: seed_secret.into(),
            ..Default::default()
        }
    }

    /// Create from environment variables
    pub fn from_env() -> Self {
        let defaults = Self::default();
        let no_auth_timeout = env::var("SESSION_NOAUTH_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.no_auth_timeout);
        let auth_timeout = env::var("SESSION_AUTH_TIMEOUT")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(defaults.auth_timeout);
        let seed_secret = env::var("SESSION_SEED_SECRET")
            .unwrap_or_else(|_| default_seed_secret());

        Self {
            no_auth_timeout,
            auth_timeout,
            seed_secret,
        }
    }

    /// Set unauthenticated session lifetime in minutes
    pub fn with_no_auth_minutes(mut self, minutes: u64) -> Self {
        self.no_auth_timeout = minutes.saturating_mul(60);
        self
    }

    /// Set authenticated session lifetime in days
    pub fn with_auth_days(mut self, days: u64) -> Self {
        self.auth_timeout = days.saturating_mul(86400);
        self
    }

    /// Unauthenticated session lifetime
    pub fn no_auth_duration(&self) -> Duration {
        Duration::from_secs(self.no_auth_timeout)
    }

    /// Authenticated session lifetime
    pub fn auth_duration(&self) -> Duration {
        Duration::from_secs(self.auth_timeout)
    }

    /// Check if using default seed (security warning)
    pub fn is_using_default_seed(&self) -> bool {
        self.seed_secret == DEFAULT_SEED_SECRET
    }
}

fn default_seed_secret() -> String {
    String::from(DEFAULT_SEED_SECRET)
}
