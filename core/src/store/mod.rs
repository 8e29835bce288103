//! Expiring in-memory key-value store
//!
//! - `TimedStore` keeps values with per-entry deadlines and treats expired
//!   entries as absent on access
//! - `ExpiryCleanupService` optionally sweeps expired entries in the background

mod cleanup;
mod entry;
mod timed_store;


pub use cleanup::{CleanupResult, ExpiryCleanupConfig, ExpiryCleanupService, Sweepable};
pub use entry::Entry;
pub use timed_store::TimedStore;
