//! Public token handlers: the `Create`/`Validate`
//! surface consumers actually call, wiring together the codec (Branca or
//! PASETO), the claims model, and the validation pipeline.

pub mod branca_handler;
pub mod paseto_handler;

pub use branca_handler::BrancaHandler;
pub use paseto_handler::PasetoHandler;

use crate::claims::{Claims, JwtDateTimeFormat};
use crate::errors::CodecError;
use serde_json::Value;
use std::collections::BTreeMap;

/// Caller-facing description of the token to mint.
/// Unknown-to-this-crate claims travel in `claims` alongside the reserved
/// ones, same as on the decode side.
#[derive(Debug, Clone, Default)]
pub struct TokenDescriptor {
    pub issuer: Option<String>,
    pub audience: Option<crate::claims::Audience>,
    pub subject: Option<String>,
    pub expires: Option<i64>,
    pub not_before: Option<i64>,
    pub issued_at: Option<i64>,
    pub jti: Option<String>,
    pub claims: BTreeMap<String, Value>,
    pub date_format: JwtDateTimeFormat,
    /// Unencrypted, unsigned side-channel data attached to PASETO tokens.
    /// Ignored by [`crate::handlers::BrancaHandler`], which has no footer
    /// slot.
    pub footer: Vec<u8>,
}

impl TokenDescriptor {
    fn to_claims(&self) -> Claims {
        Claims {
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: self.subject.clone(),
            exp: self.expires,
            nbf: self.not_before,
            iat: self.issued_at,
            jti: self.jti.clone(),
            extra: self.claims.clone(),
        }
    }

    fn to_json(&self) -> Result<Vec<u8>, CodecError> {
        self.to_claims().to_json(self.date_format).map_err(|_| CodecError::ArgumentMissing)
    }
}
