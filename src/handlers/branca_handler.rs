//! Branca token handler.

use super::TokenDescriptor;
use crate::branca;
use crate::claims::Claims;
use crate::errors::{CodecError, TokenError};
use crate::keys::SymmetricKey;
use crate::validation::{validate_claims, ValidationParameters, ValidationResult};

pub struct BrancaHandler;

impl BrancaHandler {
    /// `CanRead`: a cheap structural check before attempting a
    /// full decrypt, so a dispatcher can try Branca and PASETO handlers in
    /// sequence without paying for failed AEAD opens.
    pub fn can_read(token: &str) -> bool {
        branca::can_read(token, branca::DEFAULT_MAX_TOKEN_SIZE)
    }

    /// `CreateToken`: serializes `descriptor`'s claims to JSON and
    /// seals it with `key`.
    pub fn create(descriptor: &TokenDescriptor, key: &SymmetricKey) -> Result<String, CodecError> {
        let payload = descriptor.to_json()?;
        branca::create(&payload, None, key)
    }

    /// `Validate`: decrypts with the first matching key, parses
    /// the claims, then runs the lifetime/audience/issuer/replay pipeline.
    /// Never returns an `Err`: codec failures are folded into
    /// `ValidationResult::Invalid`, same as validation failures.
    pub fn validate(token: &str, params: &ValidationParameters) -> ValidationResult {
        let keys = params.resolve_keys();
        let symmetric: Vec<SymmetricKey> = keys.iter().filter_map(|k| k.as_symmetric().cloned()).collect();
        if symmetric.is_empty() {
            return ValidationResult::Invalid {
                error: TokenError::NoValidDecryptionKey,
            };
        }

        let mut last_err = TokenError::NoValidDecryptionKey;
        for key in &symmetric {
            match branca::decrypt(token, key) {
                Ok(decrypted) => {
                    let claims = match Claims::parse(&decrypted.payload) {
                        Ok(c) => c,
                        Err(e) => return ValidationResult::Invalid { error: e },
                    };
                    let exp = claims.exp;
                    let result = validate_claims(claims, token, params);
                    if result.is_valid() {
                        crate::validation::record_replay(token, exp, params);
                    }
                    return result;
                }
                Err(e) => last_err = e,
            }
        }
        ValidationResult::Invalid { error: last_err }
    }
}
