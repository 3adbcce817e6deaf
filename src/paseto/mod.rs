//! PASETO frame, PAE, and version strategies.

pub mod frame;
pub mod pae;
pub mod strategy;

use crate::errors::{CodecError, TokenError};
use crate::keys::KeyMaterial;
pub use frame::{PasetoFrame, Purpose, Version};

/// Encrypts or signs `claims_json` into a complete PASETO token for the
/// requested `(version, purpose)`. Unsupported combinations (there are
/// none left in this closed set, but a caller could still hand the wrong
/// key type) reject as `UnsupportedPurpose`/`InvalidKey`.
pub fn create(version: Version, purpose: Purpose, claims_json: &[u8], footer: &[u8], key: &KeyMaterial) -> Result<String, CodecError> {
    match (version, purpose, key) {
        (Version::V2, Purpose::Local, KeyMaterial::Symmetric(k)) => strategy::v2_local::encrypt(claims_json, footer, k),
        (Version::V2, Purpose::Public, KeyMaterial::Ed25519Private(k)) => strategy::v2_public::sign(claims_json, footer, k),
        (Version::V1, Purpose::Local, KeyMaterial::Symmetric(k)) => strategy::v1_local::encrypt(claims_json, footer, k),
        (Version::V1, Purpose::Public, KeyMaterial::RsaPrivate(k)) => strategy::v1_public::sign(claims_json, footer, k),
        _ => Err(CodecError::InvalidKey),
    }
}

/// Parses `token`, then decrypts (`local`) or verifies (`public`) it
/// against the first matching key in `keys`. Returns the raw claims JSON
/// bytes and the frame (callers need the frame's footer for validation
/// contexts that compare against an expected footer).
pub fn decrypt_or_verify(token: &str, keys: &[KeyMaterial]) -> Result<(Vec<u8>, PasetoFrame), TokenError> {
    let frame = PasetoFrame::parse(token)?;
    let body = frame.decode_payload()?;
    let footer = frame.decode_footer()?;

    let claims = match (frame.version, frame.purpose) {
        (Version::V2, Purpose::Local) => {
            let symmetric = filter_symmetric(keys);
            if symmetric.is_empty() {
                return Err(TokenError::NoValidDecryptionKey);
            }
            decrypt_with_any(&symmetric, |k| strategy::v2_local::decrypt(&body, &footer, k))?
        }
        (Version::V2, Purpose::Public) => {
            let public_keys = filter_ed25519_public(keys);
            if public_keys.is_empty() {
                return Err(TokenError::NoValidDecryptionKey);
            }
            strategy::v2_public::verify(&body, &footer, &public_keys)?.to_vec()
        }
        (Version::V1, Purpose::Local) => {
            let symmetric = filter_symmetric(keys);
            if symmetric.is_empty() {
                return Err(TokenError::NoValidDecryptionKey);
            }
            decrypt_with_any(&symmetric, |k| strategy::v1_local::decrypt(&body, &footer, k))?
        }
        (Version::V1, Purpose::Public) => {
            let public_keys = filter_rsa_public(keys);
            if public_keys.is_empty() {
                return Err(TokenError::NoValidDecryptionKey);
            }
            strategy::v1_public::verify(&body, &footer, &public_keys)?.to_vec()
        }
    };

    Ok((claims, frame))
}

fn filter_symmetric(keys: &[KeyMaterial]) -> Vec<crate::keys::SymmetricKey> {
    keys.iter().filter_map(|k| k.as_symmetric().cloned()).collect()
}

fn filter_ed25519_public(keys: &[KeyMaterial]) -> Vec<crate::keys::Ed25519PublicKey> {
    keys.iter().filter_map(|k| k.as_ed25519_public().copied()).collect()
}

fn filter_rsa_public(keys: &[KeyMaterial]) -> Vec<crate::keys::RsaPublicKey> {
    keys.iter().filter_map(|k| k.as_rsa_public().cloned()).collect()
}

/// `local` purposes authenticate with a single symmetric key at a time
/// (unlike `public`'s multi-key signature fan-out); try each candidate key
/// in turn and keep the first that authenticates.
fn decrypt_with_any<F>(keys: &[crate::keys::SymmetricKey], mut attempt: F) -> Result<Vec<u8>, TokenError>
where
    F: FnMut(&crate::keys::SymmetricKey) -> Result<Vec<u8>, TokenError>,
{
    let mut last_err = TokenError::NoValidDecryptionKey;
    for key in keys {
        match attempt(key) {
            Ok(claims) => return Ok(claims),
            Err(e) => last_err = e,
        }
    }
    Err(last_err)
}
