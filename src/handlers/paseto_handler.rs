//! PASETO token handler.

use super::TokenDescriptor;
use crate::claims::Claims;
use crate::errors::{CodecError, TokenError};
use crate::keys::KeyMaterial;
use crate::paseto::{self, PasetoFrame, Purpose, Version};
use crate::validation::{validate_claims, ValidationParameters, ValidationResult};

pub struct PasetoHandler;

impl PasetoHandler {
    /// `CanRead`.
    pub fn can_read(token: &str) -> bool {
        PasetoFrame::can_read(token, crate::paseto::frame::DEFAULT_MAX_TOKEN_SIZE)
    }

    /// `CreateToken` for the given `(version, purpose)` pair.
    pub fn create(descriptor: &TokenDescriptor, version: Version, purpose: Purpose, key: &KeyMaterial) -> Result<String, CodecError> {
        let payload = descriptor.to_json()?;
        paseto::create(version, purpose, &payload, &descriptor.footer, key)
    }

    /// `Validate`: parses, decrypts/verifies against configured
    /// key material, parses the resulting claims, then runs the same
    /// lifetime/audience/issuer/replay pipeline as [`super::BrancaHandler`].
    pub fn validate(token: &str, params: &ValidationParameters) -> ValidationResult {
        let keys = params.resolve_keys();
        let (claims_json, _frame) = match paseto::decrypt_or_verify(token, &keys) {
            Ok(v) => v,
            Err(e) => return ValidationResult::Invalid { error: e },
        };

        let claims = match Claims::parse(&claims_json) {
            Ok(c) => c,
            Err(e) => return ValidationResult::Invalid { error: e },
        };

        let exp = claims.exp;
        let result = validate_claims(claims, token, params);
        if result.is_valid() {
            crate::validation::record_replay(token, exp, params);
        }
        result
    }
}
