//! Shared configuration for the session token store
//!
//! This crate provides the configuration types a host application uses to
//! build a token service:
//! - Session lifetimes and the seed secret
//! - Background sweeper settings
//! - Deployment environment detection

pub mod config;

// Re-export commonly used items at crate root
pub use config::{AppConfig, CleanupConfig, Environment, SessionConfig};
