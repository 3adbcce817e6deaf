//! PASETO v2.public: Ed25519 detached signature.

use crate::crypto::{ed25519_sign, ed25519_verify};
use crate::errors::{CodecError, TokenError};
use crate::keys::{Ed25519KeyPair, Ed25519PublicKey};
use crate::paseto::frame::{assemble, header_str, Purpose, Version};
use crate::paseto::pae::pae;

const SIG_LEN: usize = 64;

pub fn sign(claims_json: &[u8], footer: &[u8], key: &Ed25519KeyPair) -> Result<String, CodecError> {
    let header = header_str(Version::V2, Purpose::Public);
    let signed = pae(&[header.as_bytes(), claims_json, footer]);
    let sig = ed25519_sign(key.as_ref(), &signed)?;

    let mut body = Vec::with_capacity(claims_json.len() + SIG_LEN);
    body.extend_from_slice(claims_json);
    body.extend_from_slice(&sig);

    Ok(assemble(Version::V2, Purpose::Public, &body, footer))
}

/// Verifies `body` against each key in `keys` in turn; returns the verified message on the first
/// match.
pub fn verify<'a>(body: &'a [u8], footer: &[u8], keys: &[Ed25519PublicKey]) -> Result<&'a [u8], TokenError> {
    if body.len() < SIG_LEN {
        return Err(TokenError::BadSignature);
    }
    let (message, sig_bytes) = body.split_at(body.len() - SIG_LEN);
    let sig: &[u8; SIG_LEN] = sig_bytes.try_into().map_err(|_| TokenError::MalformedToken)?;

    let header = header_str(Version::V2, Purpose::Public);
    let signed = pae(&[header.as_bytes(), message, footer]);

    for key in keys {
        let pk: &[u8; 32] = match key.as_ref().try_into() {
            Ok(pk) => pk,
            Err(_) => continue,
        };
        if ed25519_verify(pk, &signed, sig) {
            return Ok(message);
        }
    }
    Err(TokenError::BadSignature)
}
