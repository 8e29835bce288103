//! Configuration module with sub-modules per concern
//!
//! - `session` - Session lifetimes and the token seed secret
//! - `cleanup` - Background sweeping of expired entries
//! - `environment` - Deployment environment detection

pub mod cleanup;
pub mod environment;
pub mod session;

use serde::{Deserialize, Serialize};

// Re-export commonly used types
pub use cleanup::CleanupConfig;
pub use environment::Environment;
pub use session::SessionConfig;

/// Complete configuration combining all sub-configurations
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AppConfig {
    /// Environment configuration
    pub environment: Environment,

    /// Session token configuration
    pub session: SessionConfig,

    /// Expired-entry sweeper configuration
    #[serde(default)]
    pub cleanup: CleanupConfig,
}

impl AppConfig {
    /// Create configuration for development environment
    pub fn development() -> Self {
        Self::default()
    }

    /// Create configuration for production environment.
    /// The seed secret comes from `SESSION_SEED_SECRET`.
    pub fn production() -> Self {
        Self {
            environment: Environment::Production,
            session: SessionConfig::from_env(),
            cleanup: CleanupConfig::default().with_interval(300),
        }
    }

    /// Load configuration from environment
    pub fn from_env() -> Self {
        match Environment::from_env() {
            Environment::Development => Self {
                session: SessionConfig::from_env(),
                ..Self::development()
            },
            Environment::Production => Self::production(),
            Environment::Staging => Self {
                environment: Environment::Staging,
                session: SessionConfig::from_env(),
                cleanup: CleanupConfig::default(),
            },
        }
    }

    /// Load the environment's `.env` file (if any) and then read the
    /// configuration from the process environment
    pub fn load() -> Self {
        let env = Environment::from_env();
        // A missing file is fine; variables may come from the process itself.
        let _ = dotenvy::from_filename(env.env_file());
        Self::from_env()
    }
}
