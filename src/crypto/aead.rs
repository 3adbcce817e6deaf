use crate::errors::{CodecError, TokenError};
use chacha20poly1305::aead::{Aead, Payload as AeadPayload};
use chacha20poly1305::{KeyInit, XChaCha20Poly1305, XNonce};

/// XChaCha20-Poly1305 (IETF variant).
///
/// Returns `(ciphertext, tag)` with the tag split out as its own 16-byte
/// buffer, matching the Branca and PASETO v2.local wire layouts,
/// which both place the tag immediately after the ciphertext rather than
/// letting the AEAD crate's combined output dictate the frame shape.
pub fn aead_seal(key: &[u8; 32], nonce: &[u8; 24], plaintext: &[u8], aad: &[u8]) -> Result<(Vec<u8>, [u8; 16]), CodecError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CodecError::InvalidKey)?;
    let nonce = XNonce::from_slice(nonce);
    let mut combined = cipher
        .encrypt(nonce, AeadPayload { msg: plaintext, aad })
        .map_err(|_| CodecError::Internal)?;
    let tag_start = combined.len().saturating_sub(16);
    let tag_bytes = combined.split_off(tag_start);
    let mut tag = [0u8; 16];
    tag.copy_from_slice(&tag_bytes);
    Ok((combined, tag))
}

/// Authenticates `aad` and decrypts `ciphertext`, verifying `tag` in
/// constant time as part of the AEAD's own Poly1305 check.
pub fn aead_open(key: &[u8; 32], nonce: &[u8; 24], ciphertext: &[u8], tag: &[u8; 16], aad: &[u8]) -> Result<Vec<u8>, TokenError> {
    let cipher = XChaCha20Poly1305::new_from_slice(key).map_err(|_| CodecError::InvalidKey)?;
    let nonce = XNonce::from_slice(nonce);
    let mut combined = Vec::with_capacity(ciphertext.len() + 16);
    combined.extend_from_slice(ciphertext);
    combined.extend_from_slice(tag);
    cipher
        .decrypt(nonce, AeadPayload { msg: &combined, aad })
        .map_err(|_| TokenError::DecryptionFailed)
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn round_trips() {
        let key = [7u8; 32];
        let nonce = [9u8; 24];
        let (ct, tag) = aead_seal(&key, &nonce, b"hello world", b"aad").expect("seal");
        let pt = aead_open(&key, &nonce, &ct, &tag, b"aad").expect("open");
        assert_eq!(pt, b"hello world");
    }

    #[test]
    fn rejects_tampered_aad() {
        let key = [7u8; 32];
        let nonce = [9u8; 24];
        let (ct, tag) = aead_seal(&key, &nonce, b"hello world", b"aad").expect("seal");
        let result = aead_open(&key, &nonce, &ct, &tag, b"different-aad");
        assert!(matches!(result, Err(TokenError::DecryptionFailed)));
    }

    #[test]
    fn rejects_bit_flip_in_ciphertext() {
        let key = [7u8; 32];
        let nonce = [9u8; 24];
        let (mut ct, tag) = aead_seal(&key, &nonce, b"hello world", b"aad").expect("seal");
        ct[0] ^= 0x01;
        let result = aead_open(&key, &nonce, &ct, &tag, b"aad");
        assert!(matches!(result, Err(TokenError::DecryptionFailed)));
    }
}
