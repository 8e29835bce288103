//! Main token service implementation

use std::sync::{Arc, Mutex, PoisonError};
use std::time::Duration;

use chrono::{DateTime, Utc};
use tracing::{debug, error, warn};

use crate::errors::TokenError;
use crate::store::{ExpiryCleanupConfig, ExpiryCleanupService, TimedStore};

use super::config::TokenServiceConfig;
use super::entropy::{EntropySource, OsEntropy};
use super::generator::TokenGenerator;

/// Issues session tokens and tracks their lifetime.
///
/// Fresh tokens live for the unauthenticated duration; once the caller has
/// authenticated the session, [`TokenService::set_token_as_authenticated`]
/// extends it to the authenticated duration. Every token carries an optional
/// payload of type `V`.
///
/// Operations addressed by token never distinguish an unknown token from an
/// expired one: both fail with `TokenError::InvalidOrExpiredToken`.
pub struct TokenService<V> {
    store: Arc<TimedStore<Option<V>>>,
    generator: Mutex<TokenGenerator>,
    auth_duration: Duration,
}

impl<V: Clone> TokenService<V> {
    /// Creates a token service backed by the operating system random generator
    pub fn new(config: TokenServiceConfig) -> Self {
        Self::with_entropy(config, OsEntropy)
    }

    /// Creates a token service with an explicit entropy source
    pub fn with_entropy(config: TokenServiceConfig, entropy: impl EntropySource + 'static) -> Self {
        if config.is_using_default_seed() {
            warn!("Token service is using the default seed secret");
        }

        Self {
            store: Arc::new(TimedStore::new(config.no_auth_duration)),
            generator: Mutex::new(TokenGenerator::new(&config.seed_secret, Box::new(entropy))),
            auth_duration: config.auth_duration,
        }
    }

    /// Number of live tokens
    pub fn count(&self) -> usize {
        self.store.count()
    }

    /// Lifetime applied to authenticated sessions
    pub fn auth_duration(&self) -> Duration {
        self.auth_duration
    }

    /// Issues a new token with an empty payload and the unauthenticated lifetime.
    ///
    /// Issuance is serialized so that no two tokens derive from the same salt.
    ///
    /// # Returns
    ///
    /// * `Ok(String)` - The new token
    /// * `Err(TokenError::RandomSourceUnavailable)` - Fatal; see [`TokenError::is_fatal`]
    ///
    /// # Panics
    ///
    /// Panics if the generated token collides with a live one. With a 256-bit
    /// token space this only happens when the entropy source is compromised.
    pub fn new_token(&self) -> Result<String, TokenError> {
        self.issue_at(Utc::now())
    }

    /// Issues a token using `now` as the generator's timestamp input
    pub(crate) fn issue_at(&self, now: DateTime<Utc>) -> Result<String, TokenError> {
        let mut generator = self.generator.lock().unwrap_or_else(PoisonError::into_inner);

        let token = generator.next_token_at(now).map_err(|e| {
            error!("Could not access secure random generator: {}", e);
            e
        })?;

        if self.store.add_value(&token, None).is_err() {
            error!("Duplicate session token generated, entropy source may be compromised");
            panic!("Something is seriously wrong, a duplicated token was generated");
        }
        drop(generator);

        debug!("Issued session token, {} tokens held", self.store.len_hint());
        Ok(token)
    }

    /// Extends the token's lifetime to the authenticated duration
    pub fn set_token_as_authenticated(&self, token: &str) -> Result<(), TokenError> {
        self.store
            .set_value_duration(token, self.auth_duration)
            .map_err(|e| invalid_token(e.into()))?;

        debug!(
            "Session token promoted to authenticated lifetime of {}s",
            self.auth_duration.as_secs()
        );
        Ok(())
    }

    /// Gets the payload stored with the token, `None` if nothing was stored yet
    pub fn get_value(&self, token: &str) -> Result<Option<V>, TokenError> {
        self.store.get_value(token).map_err(|e| invalid_token(e.into()))
    }

    /// Stores a payload with the token, keeping its lifetime
    pub fn set_value(&self, token: &str, value: V) -> Result<(), TokenError> {
        self.store
            .set_value(token, Some(value))
            .map_err(|e| invalid_token(e.into()))
    }

    /// Time left before the token expires
    pub fn time_remaining(&self, token: &str) -> Result<Duration, TokenError> {
        self.store.time_to_live(token).map_err(|e| invalid_token(e.into()))
    }

    /// Revokes the token
    pub fn remove_token(&self, token: &str) -> Result<(), TokenError> {
        self.store
            .remove_value(token)
            .map_err(|e| invalid_token(e.into()))?;

        debug!("Session token removed");
        Ok(())
    }

    /// Shared handle to the underlying store
    pub fn store(&self) -> Arc<TimedStore<Option<V>>> {
        Arc::clone(&self.store)
    }
}

impl<V: Clone + Send + 'static> TokenService<V> {
    /// Builds a sweeper over this service's store
    pub fn cleanup_service(
        &self,
        config: ExpiryCleanupConfig,
    ) -> ExpiryCleanupService<TimedStore<Option<V>>> {
        ExpiryCleanupService::new(self.store(), config)
    }
}

fn invalid_token(error: TokenError) -> TokenError {
    debug!("Rejected invalid or expired session token");
    error
}
