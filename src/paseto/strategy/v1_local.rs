//! PASETO v1.local: AES-256-CTR + HMAC-SHA-384, key-split with
//! HKDF-SHA-384.

use crate::crypto::{aes256_ctr, csprng_bytes, hkdf_sha384_extract_and_expand, hmac_sha384};
use crate::errors::{CodecError, TokenError};
use crate::keys::SymmetricKey;
use crate::paseto::frame::{assemble, header_str, Purpose, Version};
use crate::paseto::pae::pae;
use subtle::ConstantTimeEq;

const SALT_LEN: usize = 16;
const IV_LEN: usize = 16;
const NONCE_LEN: usize = SALT_LEN + IV_LEN;
const MAC_LEN: usize = 48;

const ENCRYPTION_INFO: &[u8] = b"paseto-encryption-key";
const AUTHENTICATION_INFO: &[u8] = b"paseto-auth-key-for-aead";

fn split_keys(key: &SymmetricKey, salt: &[u8]) -> Result<([u8; 32], [u8; 32]), CodecError> {
    let ek = hkdf_sha384_extract_and_expand(key.as_ref(), salt, ENCRYPTION_INFO, 32)?;
    let ak = hkdf_sha384_extract_and_expand(key.as_ref(), salt, AUTHENTICATION_INFO, 32)?;
    let mut enc = [0u8; 32];
    let mut auth = [0u8; 32];
    enc.copy_from_slice(&ek);
    auth.copy_from_slice(&ak);
    Ok((enc, auth))
}

pub fn encrypt(claims_json: &[u8], footer: &[u8], key: &SymmetricKey) -> Result<String, CodecError> {
    let nonce_bytes = csprng_bytes(NONCE_LEN)?;
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&nonce_bytes);

    let (enc_key, auth_key) = split_keys(key, &nonce[..SALT_LEN])?;
    let iv: &[u8; IV_LEN] = nonce[SALT_LEN..].try_into().map_err(|_| CodecError::Internal)?;
    let ciphertext = aes256_ctr(&enc_key, iv, claims_json);

    let header = header_str(Version::V1, Purpose::Local);
    let signed = pae(&[header.as_bytes(), &nonce, &ciphertext, footer]);
    let mac = hmac_sha384(&auth_key, &signed)?;

    let mut body = Vec::with_capacity(NONCE_LEN + ciphertext.len() + MAC_LEN);
    body.extend_from_slice(&nonce);
    body.extend_from_slice(&ciphertext);
    body.extend_from_slice(&mac);

    Ok(assemble(Version::V1, Purpose::Local, &body, footer))
}

pub fn decrypt(body: &[u8], footer: &[u8], key: &SymmetricKey) -> Result<Vec<u8>, TokenError> {
    if body.len() < NONCE_LEN + MAC_LEN {
        return Err(TokenError::MalformedToken);
    }
    let nonce = &body[..NONCE_LEN];
    let ciphertext = &body[NONCE_LEN..body.len() - MAC_LEN];
    let mac = &body[body.len() - MAC_LEN..];

    let (enc_key, auth_key) = split_keys(key, &nonce[..SALT_LEN]).map_err(TokenError::Codec)?;

    let header = header_str(Version::V1, Purpose::Local);
    let signed = pae(&[header.as_bytes(), nonce, ciphertext, footer]);
    let expected_mac = hmac_sha384(&auth_key, &signed).map_err(TokenError::Codec)?;

    if expected_mac.ct_eq(mac).unwrap_u8() != 1 {
        return Err(TokenError::DecryptionFailed);
    }

    let iv: &[u8; IV_LEN] = nonce[SALT_LEN..].try_into().map_err(|_| TokenError::MalformedToken)?;
    Ok(aes256_ctr(&enc_key, iv, ciphertext))
}
