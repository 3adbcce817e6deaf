//! Validation pipeline.

use crate::claims::Claims;
use crate::errors::TokenError;
use ring::digest;
use std::collections::HashSet;
use time::{Duration, OffsetDateTime};

/// Caller-supplied replay cache. Implementors
/// must be safe to share across threads: handlers are stateless and may be
/// invoked concurrently.
pub trait ReplayCache: Send + Sync {
    fn contains(&self, hash: &[u8; 32]) -> bool;
    fn insert(&self, hash: [u8; 32], expires_at: Option<i64>);
}

/// Resolves candidate decryption/verification key material for a token,
/// given its unvalidated `kid`-less identity (issuer, if the caller wants
/// to look one up out-of-band). Lets callers defer key lookup to a key
/// vault or rotation store instead of handing every key up front.
pub trait KeyResolver: Send + Sync {
    fn resolve(&self, unvalidated_claims_hint: Option<&str>) -> Vec<crate::keys::KeyMaterial>;
}

/// Configuration for [`crate::handlers::BrancaHandler::validate`] and
/// [`crate::handlers::PasetoHandler::validate`].
pub struct ValidationParameters<'a> {
    pub validate_lifetime: bool,
    pub clock_skew: Duration,
    pub require_expiration_time: bool,
    pub validate_audience: bool,
    pub valid_audience: Option<String>,
    pub valid_audiences: HashSet<String>,
    pub validate_issuer: bool,
    pub valid_issuer: Option<String>,
    pub valid_issuers: HashSet<String>,
    pub save_sign_in_token: bool,
    pub token_replay_cache: Option<&'a dyn ReplayCache>,
    pub keys: Vec<crate::keys::KeyMaterial>,
    pub key_resolver: Option<&'a dyn KeyResolver>,
    pub clock: fn() -> OffsetDateTime,
}

impl Default for ValidationParameters<'_> {
    fn default() -> Self {
        Self {
            validate_lifetime: true,
            clock_skew: Duration::ZERO,
            require_expiration_time: false,
            validate_audience: false,
            valid_audience: None,
            valid_audiences: HashSet::new(),
            validate_issuer: false,
            valid_issuer: None,
            valid_issuers: HashSet::new(),
            save_sign_in_token: false,
            token_replay_cache: None,
            keys: Vec::new(),
            key_resolver: None,
            clock: OffsetDateTime::now_utc,
        }
    }
}

impl ValidationParameters<'_> {
    /// All key material available for this validation attempt: the
    /// statically configured keys plus whatever the resolver contributes.
    pub fn resolve_keys(&self) -> Vec<crate::keys::KeyMaterial> {
        let mut keys = self.keys.clone();
        if let Some(resolver) = self.key_resolver {
            keys.extend(resolver.resolve(None));
        }
        keys
    }
}

/// The outcome of `Validate`.
#[derive(Debug)]
pub enum ValidationResult {
    Valid {
        claims: Claims,
        raw_token: Option<String>,
    },
    Invalid {
        error: TokenError,
    },
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid { .. })
    }
}

/// Runs the lifetime/audience/issuer/replay pipeline against
/// already-decoded `claims`. Handlers call this after the AEAD
/// open/signature verify step succeeds.
pub fn validate_claims(claims: Claims, raw_token: &str, params: &ValidationParameters) -> ValidationResult {
    if let Err(error) = check_lifetime(&claims, params) {
        return ValidationResult::Invalid { error };
    }
    if let Err(error) = check_audience(&claims, params) {
        return ValidationResult::Invalid { error };
    }
    if let Err(error) = check_issuer(&claims, params) {
        return ValidationResult::Invalid { error };
    }
    if let Err(error) = check_replay(raw_token, params) {
        return ValidationResult::Invalid { error };
    }

    ValidationResult::Valid {
        claims,
        raw_token: params.save_sign_in_token.then(|| raw_token.to_string()),
    }
}

fn check_lifetime(claims: &Claims, params: &ValidationParameters) -> Result<(), TokenError> {
    if !params.validate_lifetime {
        return Ok(());
    }
    let now = (params.clock)();

    if let Some(nbf) = claims.nbf {
        let nbf = OffsetDateTime::from_unix_timestamp(nbf).map_err(|_| TokenError::MalformedClaims)?;
        if now + params.clock_skew < nbf {
            return Err(TokenError::TokenNotYetValid);
        }
    }

    match claims.exp {
        Some(exp) => {
            let exp = OffsetDateTime::from_unix_timestamp(exp).map_err(|_| TokenError::MalformedClaims)?;
            if now - params.clock_skew >= exp {
                return Err(TokenError::TokenExpired);
            }
        }
        None if params.require_expiration_time => return Err(TokenError::NoExpiration),
        None => {}
    }

    Ok(())
}

fn check_audience(claims: &Claims, params: &ValidationParameters) -> Result<(), TokenError> {
    if !params.validate_audience {
        return Ok(());
    }
    let Some(aud) = &claims.aud else {
        return Err(TokenError::InvalidAudience);
    };
    let matches_single = params.valid_audience.as_deref().is_some_and(|v| aud.contains(v));
    let matches_many = params.valid_audiences.iter().any(|v| aud.contains(v));
    if matches_single || matches_many {
        Ok(())
    } else {
        Err(TokenError::InvalidAudience)
    }
}

fn check_issuer(claims: &Claims, params: &ValidationParameters) -> Result<(), TokenError> {
    if !params.validate_issuer {
        return Ok(());
    }
    let Some(iss) = &claims.iss else {
        return Err(TokenError::InvalidIssuer);
    };
    let matches_single = params.valid_issuer.as_deref().is_some_and(|v| v == iss);
    let matches_many = params.valid_issuers.contains(iss);
    if matches_single || matches_many {
        Ok(())
    } else {
        Err(TokenError::InvalidIssuer)
    }
}

fn check_replay(raw_token: &str, params: &ValidationParameters) -> Result<(), TokenError> {
    let Some(cache) = params.token_replay_cache else {
        return Ok(());
    };
    let hash = sha256(raw_token.as_bytes());
    if cache.contains(&hash) {
        return Err(TokenError::TokenReplayed);
    }
    Ok(())
}

/// Registers `raw_token` in the replay cache, keyed on `exp`. Separate from [`check_replay`] so callers only pay the
/// insertion cost after every other check has already passed.
pub fn record_replay(raw_token: &str, exp: Option<i64>, params: &ValidationParameters) {
    if let Some(cache) = params.token_replay_cache {
        let hash = sha256(raw_token.as_bytes());
        cache.insert(hash, exp);
    }
}

fn sha256(data: &[u8]) -> [u8; 32] {
    let digest = digest::digest(&digest::SHA256, data);
    let mut out = [0u8; 32];
    out.copy_from_slice(digest.as_ref());
    out
}

/// A simple in-process [`ReplayCache`] backed by a mutex-guarded hash set.
/// Expired entries are not proactively evicted; callers with long-lived
/// processes should prefer a cache with TTL support.
#[derive(Default)]
pub struct InMemoryReplayCache {
    seen: std::sync::Mutex<HashSet<[u8; 32]>>,
}

impl InMemoryReplayCache {
    pub fn new() -> Self {
        Self::default()
    }
}

impl ReplayCache for InMemoryReplayCache {
    fn contains(&self, hash: &[u8; 32]) -> bool {
        self.seen.lock().is_ok_and(|guard| guard.contains(hash))
    }

    fn insert(&self, hash: [u8; 32], _expires_at: Option<i64>) {
        if let Ok(mut guard) = self.seen.lock() {
            guard.insert(hash);
        }
    }
}
