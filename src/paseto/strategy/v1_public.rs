//! PASETO v1.public: RSA-PSS/SHA-384 detached signature.

use crate::crypto::{rsa_pss_sign, rsa_pss_verify};
use crate::errors::{CodecError, TokenError};
use crate::keys::{RsaPrivateKey, RsaPublicKey};
use crate::paseto::frame::{assemble, header_str, Purpose, Version};
use crate::paseto::pae::pae;

const SIG_LEN: usize = 256;

pub fn sign(claims_json: &[u8], footer: &[u8], key: &RsaPrivateKey) -> Result<String, CodecError> {
    let header = header_str(Version::V1, Purpose::Public);
    let signed = pae(&[header.as_bytes(), claims_json, footer]);
    let sig = rsa_pss_sign(key.as_ref(), &signed)?;

    let mut body = Vec::with_capacity(claims_json.len() + SIG_LEN);
    body.extend_from_slice(claims_json);
    body.extend_from_slice(&sig);

    Ok(assemble(Version::V1, Purpose::Public, &body, footer))
}

pub fn verify<'a>(body: &'a [u8], footer: &[u8], keys: &[RsaPublicKey]) -> Result<&'a [u8], TokenError> {
    if body.len() < SIG_LEN {
        return Err(TokenError::BadSignature);
    }
    let (message, sig) = body.split_at(body.len() - SIG_LEN);

    let header = header_str(Version::V1, Purpose::Public);
    let signed = pae(&[header.as_bytes(), message, footer]);

    for key in keys {
        if rsa_pss_verify(key.as_ref(), &signed, sig) {
            return Ok(message);
        }
    }
    Err(TokenError::BadSignature)
}
