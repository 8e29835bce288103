//! Thread-safe key-value store whose entries expire after a duration

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard, PoisonError};
use std::time::Duration;
use tokio::time::Instant;

use crate::errors::StoreError;

use super::entry::Entry;

/// In-memory store mapping string keys to values with expiration deadlines.
///
/// Expiry is evaluated lazily on every access: an entry whose deadline has
/// passed behaves exactly like a missing one, whether or not it has been
/// physically removed yet. All operations take a single lock over the map.
#[derive(Debug)]
pub struct TimedStore<V> {
    entries: Mutex<HashMap<String, Entry<V>>>,
    default_duration: Duration,
}

impl<V: Clone> TimedStore<V> {
    /// Creates an empty store whose entries live for `default_duration`
    /// unless inserted with an explicit lifetime
    pub fn new(default_duration: Duration) -> Self {
        Self {
            entries: Mutex::new(HashMap::new()),
            default_duration,
        }
    }

    /// Lifetime applied by [`TimedStore::add_value`]
    pub fn default_duration(&self) -> Duration {
        self.default_duration
    }

    /// Number of entries that have not expired yet.
    ///
    /// Expired entries are swept before counting.
    pub fn count(&self) -> usize {
        let mut entries = self.lock();
        let now = Instant::now();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        entries.len()
    }

    /// Inserts `value` under `key` with the default lifetime
    pub fn add_value(&self, key: &str, value: V) -> Result<(), StoreError> {
        self.add_value_with_duration(key, value, self.default_duration)
    }

    /// Inserts `value` under `key`, expiring `duration` from now.
    ///
    /// # Errors
    ///
    /// * `StoreError::DuplicateKey` - a live entry already uses `key`
    ///   (an expired one is overwritten)
    pub fn add_value_with_duration(
        &self,
        key: &str,
        value: V,
        duration: Duration,
    ) -> Result<(), StoreError> {
        let mut entries = self.lock();
        let now = Instant::now();

        if entries.get(key).is_some_and(|entry| !entry.is_expired_at(now)) {
            return Err(StoreError::DuplicateKey {
                key: key.to_string(),
            });
        }

        entries.insert(key.to_string(), Entry::new(value, now, duration));
        Ok(())
    }

    /// Returns a copy of the value stored under `key`
    pub fn get_value(&self, key: &str) -> Result<V, StoreError> {
        let mut entries = self.lock();
        let now = Instant::now();
        live_entry(&mut entries, key, now).map(|entry| entry.value.clone())
    }

    /// Replaces the value under `key`, keeping its deadline
    pub fn set_value(&self, key: &str, value: V) -> Result<(), StoreError> {
        let mut entries = self.lock();
        let now = Instant::now();
        live_entry(&mut entries, key, now)?.value = value;
        Ok(())
    }

    /// Restarts the expiry clock of `key` with `duration`, keeping its value
    pub fn set_value_duration(&self, key: &str, duration: Duration) -> Result<(), StoreError> {
        let mut entries = self.lock();
        let now = Instant::now();
        live_entry(&mut entries, key, now)?.extend(now, duration);
        Ok(())
    }

    /// Time left before `key` expires
    pub fn time_to_live(&self, key: &str) -> Result<Duration, StoreError> {
        let mut entries = self.lock();
        let now = Instant::now();
        live_entry(&mut entries, key, now).map(|entry| entry.remaining(now))
    }

    /// Deletes `key` whether or not it has expired.
    ///
    /// An expired entry is dropped but reported as `NotFound`, so the result
    /// does not depend on whether a sweep already removed it.
    pub fn remove_value(&self, key: &str) -> Result<(), StoreError> {
        let now = Instant::now();
        match self.lock().remove(key) {
            Some(entry) if !entry.is_expired_at(now) => Ok(()),
            _ => Err(StoreError::NotFound {
                key: key.to_string(),
            }),
        }
    }

    /// Physically drops every expired entry, returning how many were dropped
    pub fn purge_expired(&self) -> usize {
        let mut entries = self.lock();
        let now = Instant::now();
        let before = entries.len();
        entries.retain(|_, entry| !entry.is_expired_at(now));
        before - entries.len()
    }

    /// Number of physically held entries, expired ones included
    pub fn len_hint(&self) -> usize {
        self.lock().len()
    }

    // Critical sections never leave the map half-updated, so a poisoned
    // lock still guards a consistent map.
    fn lock(&self) -> MutexGuard<'_, HashMap<String, Entry<V>>> {
        self.entries.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Looks up a live entry, dropping it if it has expired
fn live_entry<'a, V>(
    entries: &'a mut HashMap<String, Entry<V>>,
    key: &str,
    now: Instant,
) -> Result<&'a mut Entry<V>, StoreError> {
    if entries.get(key).is_some_and(|entry| entry.is_expired_at(now)) {
        entries.remove(key);
    }

    entries.get_mut(key).ok_or_else(|| StoreError::NotFound {
        key: key.to_string(),
    })
}
