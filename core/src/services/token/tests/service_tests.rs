//! Unit tests for token service

use std::collections::HashSet;
use std::time::Duration;

use chrono::{TimeZone, Utc};
use tokio::time::advance;

use st_shared::SessionConfig;

use crate::errors::TokenError;
use crate::services::token::{EntropySource, TokenService, TokenServiceConfig};
use crate::store::ExpiryCleanupConfig;

const UNIT: Duration = Duration::from_secs(1);

#[derive(Debug, Clone, PartialEq)]
struct Profile {
    user: String,
}

fn service(no_auth: Duration, auth: Duration) -> TokenService<Profile> {
    TokenService::new(TokenServiceConfig::new(no_auth, auth, "test-seed"))
}

/// Same bytes on every call, so issuance depends only on salt and time
struct ConstantEntropy;

impl EntropySource for ConstantEntropy {
    fn fill(&self, dest: &mut [u8]) -> Result<(), TokenError> {
        dest.fill(0x5A);
        Ok(())
    }
}

struct FailingEntropy;

impl EntropySource for FailingEntropy {
    fn fill(&self, _dest: &mut [u8]) -> Result<(), TokenError> {
        Err(TokenError::RandomSourceUnavailable {
            reason: "no entropy".to_string(),
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_new_token_starts_with_empty_payload() {
    let service = service(UNIT * 10, UNIT * 100);
    let token = service.new_token().unwrap();

    assert_eq!(service.get_value(&token), Ok(None));
    assert_eq!(service.count(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_unauthenticated_token_expires_after_default_duration() {
    let service = service(UNIT * 10, UNIT * 100);
    let token = service.new_token().unwrap();

    assert_eq!(service.time_remaining(&token), Ok(UNIT * 10));

    advance(UNIT * 10).await;

    assert_eq!(service.get_value(&token), Err(TokenError::InvalidOrExpiredToken));
    assert_eq!(service.count(), 0);
}

#[tokio::test(start_paused = true)]
async fn test_promotion_overrides_shorter_deadline() {
    let service = service(UNIT, UNIT * 100);
    let token = service.new_token().unwrap();
    service
        .set_value(&token, Profile { user: "alice".to_string() })
        .unwrap();

    service.set_token_as_authenticated(&token).unwrap();

    advance(UNIT).await;
    assert_eq!(
        service.get_value(&token),
        Ok(Some(Profile { user: "alice".to_string() }))
    );

    advance(UNIT * 99).await;
    assert_eq!(service.get_value(&token), Err(TokenError::InvalidOrExpiredToken));
}

#[tokio::test(start_paused = true)]
async fn test_promotion_of_expired_token_fails() {
    let service = service(UNIT, UNIT * 100);
    let token = service.new_token().unwrap();

    advance(UNIT * 2).await;

    assert_eq!(
        service.set_token_as_authenticated(&token),
        Err(TokenError::InvalidOrExpiredToken)
    );
}

#[tokio::test(start_paused = true)]
async fn test_unknown_and_expired_tokens_yield_identical_error() {
    let service = service(UNIT, UNIT * 100);
    let expired = service.new_token().unwrap();
    advance(UNIT * 2).await;

    let never_issued = service.get_value("never-issued");
    let timed_out = service.get_value(&expired);

    assert_eq!(never_issued, Err(TokenError::InvalidOrExpiredToken));
    assert_eq!(never_issued, timed_out);
    assert_eq!(
        never_issued.unwrap_err().to_string(),
        timed_out.unwrap_err().to_string()
    );
}

#[tokio::test(start_paused = true)]
async fn test_set_value_keeps_lifetime() {
    let service = service(UNIT * 5, UNIT * 100);
    let token = service.new_token().unwrap();

    advance(UNIT * 3).await;
    service
        .set_value(&token, Profile { user: "bob".to_string() })
        .unwrap();

    advance(UNIT * 2).await;
    assert_eq!(service.get_value(&token), Err(TokenError::InvalidOrExpiredToken));
    assert_eq!(
        service.set_value(&token, Profile { user: "bob".to_string() }),
        Err(TokenError::InvalidOrExpiredToken)
    );
}

#[tokio::test(start_paused = true)]
async fn test_remove_token_revokes_it() {
    let service = service(UNIT * 5, UNIT * 100);
    let token = service.new_token().unwrap();

    assert_eq!(service.remove_token(&token), Ok(()));
    assert_eq!(service.get_value(&token), Err(TokenError::InvalidOrExpiredToken));
    assert_eq!(service.remove_token(&token), Err(TokenError::InvalidOrExpiredToken));
    assert_eq!(service.count(), 0);
}

#[test]
fn test_issued_tokens_are_unique() {
    let service = service(Duration::from_secs(3600), Duration::from_secs(7200));
    let tokens: HashSet<String> = (0..10_000).map(|_| service.new_token().unwrap()).collect();

    assert_eq!(tokens.len(), 10_000);
    assert_eq!(service.count(), 10_000);
}

#[test]
fn test_failing_entropy_surfaces_fatal_error_and_registers_nothing() {
    let config = TokenServiceConfig::new(UNIT * 10, UNIT * 100, "test-seed");
    let service: TokenService<Profile> = TokenService::with_entropy(config, FailingEntropy);

    let result = service.new_token();

    assert!(matches!(result, Err(TokenError::RandomSourceUnavailable { .. })));
    assert!(result.unwrap_err().is_fatal());
    assert_eq!(service.count(), 0);
}

#[test]
fn test_config_from_session_config() {
    let session = SessionConfig::new("from-env").with_no_auth_minutes(5).with_auth_days(1);
    let config = TokenServiceConfig::from(&session);

    assert_eq!(config.no_auth_duration, Duration::from_secs(300));
    assert_eq!(config.auth_duration, Duration::from_secs(86400));
    assert!(!config.is_using_default_seed());
    assert!(TokenServiceConfig::default().is_using_default_seed());
}

#[test]
fn test_config_debug_hides_seed() {
    let config = TokenServiceConfig::new(UNIT, UNIT, "super-secret-seed");
    assert!(!format!("{:?}", config).contains("super-secret-seed"));
}

#[tokio::test(start_paused = true)]
async fn test_cleanup_service_sweeps_expired_tokens() {
    let service = service(UNIT, UNIT * 100);
    let short = service.new_token().unwrap();
    let long = service.new_token().unwrap();
    service.set_token_as_authenticated(&long).unwrap();

    advance(UNIT * 2).await;

    let result = service.cleanup_service(ExpiryCleanupConfig::default()).run_cleanup();
    assert_eq!(result.expired_entries_removed, 1);
    assert_eq!(result.remaining_entries, 1);
    assert_eq!(service.get_value(&short), Err(TokenError::InvalidOrExpiredToken));
    assert_eq!(service.get_value(&long), Ok(None));
}

#[tokio::test(start_paused = true)]
async fn test_unbounded_auth_duration_does_not_overflow() {
    let service = service(UNIT, Duration::from_secs(u64::MAX));
    let token = service.new_token().unwrap();

    assert_eq!(service.set_token_as_authenticated(&token), Ok(()));

    advance(Duration::from_secs(60 * 60 * 24 * 365)).await;
    assert_eq!(service.get_value(&token), Ok(None));
}

#[tokio::test(start_paused = true)]
async fn test_remove_expired_token_fails_whether_or_not_swept() {
    let service = service(UNIT, UNIT * 100);
    let unswept = service.new_token().unwrap();
    let swept = service.new_token().unwrap();

    advance(UNIT * 2).await;

    assert_eq!(service.remove_token(&unswept), Err(TokenError::InvalidOrExpiredToken));

    // count() purges the remaining expired token
    assert_eq!(service.count(), 0);
    assert_eq!(service.remove_token(&swept), Err(TokenError::InvalidOrExpiredToken));
    assert_eq!(service.remove_token("never-issued"), Err(TokenError::InvalidOrExpiredToken));
}

#[test]
#[should_panic(expected = "duplicated token")]
fn test_duplicate_token_panics() {
    let at = Utc.with_ymd_and_hms(2026, 3, 1, 12, 30, 45).unwrap();
    let config = TokenServiceConfig::new(UNIT * 10, UNIT * 100, "test-seed");
    let first: TokenService<Profile> = TokenService::with_entropy(config.clone(), ConstantEntropy);
    let second: TokenService<Profile> = TokenService::with_entropy(config, ConstantEntropy);

    let token = first.issue_at(at).unwrap();
    second.store().add_value(&token, None).unwrap();

    let _ = second.issue_at(at);
}

#[test]
fn test_default_config_matches_session_defaults() {
    let session = SessionConfig::default();
    let config = TokenServiceConfig::default();

    assert_eq!(config.no_auth_duration, session.no_auth_duration());
    assert_eq!(config.auth_duration, session.auth_duration());
    assert_eq!(config.seed_secret, session.seed_secret);
    assert!(config.is_using_default_seed());
}
