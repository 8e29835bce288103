//! Stored value with its expiration deadline

use std::time::Duration;
use tokio::time::Instant;

/// Deadline used when `now + duration` does not fit in an `Instant`
const FAR_FUTURE: Duration = Duration::from_secs(60 * 60 * 24 * 365 * 30);

/// A value held by the store until `expires_at`
#[derive(Debug, Clone)]
pub struct Entry<V> {
    /// The stored value
    pub value: V,
    /// Deadline after which the entry is treated as absent
    pub expires_at: Instant,
}

impl<V> Entry<V> {
    /// Create an entry that expires `duration` after `now`
    pub fn new(value: V, now: Instant, duration: Duration) -> Self {
        Self {
            value,
            expires_at: deadline(now, duration),
        }
    }

    /// An entry is valid strictly before its deadline
    pub fn is_expired_at(&self, now: Instant) -> bool {
        now >= self.expires_at
    }

    /// Check expiry against the current time
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Instant::now())
    }

    /// Restart the expiry clock with a new lifetime
    pub fn extend(&mut self, now: Instant, duration: Duration) {
        self.expires_at = deadline(now, duration);
    }

    /// Time left before expiry, zero once expired
    pub fn remaining(&self, now: Instant) -> Duration {
        self.expires_at.saturating_duration_since(now)
    }
}

/// `now + duration`, clamped to a far-future instant on overflow
fn deadline(now: Instant, duration: Duration) -> Instant {
    now.checked_add(duration)
        .or_else(|| now.checked_add(FAR_FUTURE))
        .unwrap_or(now)
}
