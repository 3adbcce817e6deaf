//! PASETO v2.local: XChaCha20-Poly1305 with a BLAKE2b-derived nonce.

use crate::crypto::{aead_open, aead_seal, csprng_bytes};
use crate::errors::{CodecError, TokenError};
use crate::keys::SymmetricKey;
use crate::paseto::frame::{assemble, header_str, Purpose, Version};
use crate::paseto::pae::pae;
use blake2::digest::{FixedOutput, Mac, Update};
use blake2::Blake2bMac;

const NONCE_LEN: usize = 24;
const TAG_LEN: usize = 16;

pub fn encrypt(claims_json: &[u8], footer: &[u8], key: &SymmetricKey) -> Result<String, CodecError> {
    let nonce_key = csprng_bytes(NONCE_LEN)?;
    let mut mac = Blake2bMac::<blake2::digest::consts::U24>::new_from_slice(&nonce_key).map_err(|_| CodecError::Internal)?;
    mac.update(claims_json);
    let mut nonce = [0u8; NONCE_LEN];
    mac.finalize_into((&mut nonce).into());

    let header = header_str(Version::V2, Purpose::Local);
    let aad = pae(&[header.as_bytes(), &nonce, footer]);

    let key_bytes: &[u8; 32] = key.as_ref().try_into().map_err(|_| CodecError::InvalidKey)?;
    let (ciphertext, tag) = aead_seal(key_bytes, &nonce, claims_json, &aad)?;

    let mut body = Vec::with_capacity(NONCE_LEN + ciphertext.len() + TAG_LEN);
    body.extend_from_slice(&nonce);
    body.extend_from_slice(&ciphertext);
    body.extend_from_slice(&tag);

    Ok(assemble(Version::V2, Purpose::Local, &body, footer))
}

pub fn decrypt(body: &[u8], footer: &[u8], key: &SymmetricKey) -> Result<Vec<u8>, TokenError> {
    if body.len() < NONCE_LEN + TAG_LEN {
        return Err(TokenError::MalformedToken);
    }
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&body[..NONCE_LEN]);
    let ciphertext = &body[NONCE_LEN..body.len() - TAG_LEN];
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&body[body.len() - TAG_LEN..]);

    let header = header_str(Version::V2, Purpose::Local);
    let aad = pae(&[header.as_bytes(), &nonce, footer]);

    let key_bytes: &[u8; 32] = key
        .as_ref()
        .try_into()
        .map_err(|_| TokenError::Codec(CodecError::InvalidKey))?;
    aead_open(key_bytes, &nonce, ciphertext, &tag, &aad)
}

#[cfg(test)]
mod unit_tests {
    use super::*;
    use crate::paseto::frame::PasetoFrame;

    fn key() -> SymmetricKey {
        SymmetricKey::try_from([0x42u8; 32].as_slice()).expect("32 bytes")
    }

    #[test]
    fn round_trips_without_footer() {
        let claims = br#"{"sub":"1234"}"#;
        let token = encrypt(claims, b"", &key()).expect("encrypt");
        let frame = PasetoFrame::parse(&token).expect("parse");
        let body = frame.decode_payload().expect("decode");
        let decrypted = decrypt(&body, b"", &key()).expect("decrypt");
        assert_eq!(decrypted, claims);
    }

    #[test]
    fn round_trips_with_footer() {
        let claims = br#"{"sub":"1234"}"#;
        let token = encrypt(claims, b"kid-1", &key()).expect("encrypt");
        let frame = PasetoFrame::parse(&token).expect("parse");
        let body = frame.decode_payload().expect("decode");
        let footer = frame.decode_footer().expect("decode");
        assert_eq!(footer, b"kid-1");
        let decrypted = decrypt(&body, &footer, &key()).expect("decrypt");
        assert_eq!(decrypted, claims);
    }

    #[test]
    fn wrong_key_fails() {
        let claims = br#"{"sub":"1234"}"#;
        let token = encrypt(claims, b"", &key()).expect("encrypt");
        let frame = PasetoFrame::parse(&token).expect("parse");
        let body = frame.decode_payload().expect("decode");
        let other = SymmetricKey::try_from([0x01u8; 32].as_slice()).expect("32 bytes");
        assert!(matches!(decrypt(&body, b"", &other), Err(TokenError::DecryptionFailed)));
    }

    #[test]
    fn bit_flip_fails() {
        let claims = br#"{"sub":"1234"}"#;
        let token = encrypt(claims, b"", &key()).expect("encrypt");
        let frame = PasetoFrame::parse(&token).expect("parse");
        let mut body = frame.decode_payload().expect("decode");
        let last = body.len() - 1;
        body[last] ^= 1;
        assert!(matches!(decrypt(&body, b"", &key()), Err(TokenError::DecryptionFailed)));
    }
}
