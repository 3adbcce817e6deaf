//! Branca codec.

use crate::base62;
use crate::crypto::{aead_open, aead_seal, csprng_bytes};
use crate::errors::{CodecError, TokenError};
use crate::keys::SymmetricKey;
use time::OffsetDateTime;

pub const VERSION_BYTE: u8 = 0xBA;
const HEADER_LEN: usize = 29;
const TAG_LEN: usize = 16;
const NONCE_LEN: usize = 24;

/// Default maximum accepted token length, post-base62.
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 32 * 1024;

/// A successfully decrypted Branca token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecryptedBranca {
    pub payload: Vec<u8>,
    pub branca_timestamp: u32,
    pub timestamp_utc: OffsetDateTime,
}

/// `true` iff `token` could plausibly be a Branca token worth attempting to
/// decrypt: non-empty, within `max_len`, base62-alphabet-only, and not
/// JWT/PASETO-shaped.
pub fn can_read(token: &str, max_len: usize) -> bool {
    let trimmed = token.trim();
    if trimmed.is_empty() {
        return false;
    }
    if trimmed.len() > max_len {
        return false;
    }
    if trimmed.contains('.') {
        return false;
    }
    base62::is_base62(trimmed)
}

/// Builds a Branca token.
///
/// `timestamp` defaults to the current UTC second if `None`; callers
/// wanting a deterministic test vector can pass an explicit value.
pub fn create(payload: &[u8], timestamp: Option<u32>, key: &SymmetricKey) -> Result<String, CodecError> {
    let timestamp = match timestamp {
        Some(ts) => ts,
        None => {
            let now = OffsetDateTime::now_utc().unix_timestamp();
            u32::try_from(now).map_err(|_| CodecError::Internal)?
        }
    };

    let nonce_bytes = csprng_bytes(NONCE_LEN)?;
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&nonce_bytes);

    let mut header = [0u8; HEADER_LEN];
    header[0] = VERSION_BYTE;
    header[1..5].copy_from_slice(&timestamp.to_be_bytes());
    header[5..].copy_from_slice(&nonce);

    let key_bytes: &[u8; 32] = key.as_ref().try_into().map_err(|_| CodecError::InvalidKey)?;
    let (ciphertext, tag) = aead_seal(key_bytes, &nonce, payload, &header)?;

    let mut frame = Vec::with_capacity(HEADER_LEN + ciphertext.len() + TAG_LEN);
    frame.extend_from_slice(&header);
    frame.extend_from_slice(&ciphertext);
    frame.extend_from_slice(&tag);

    Ok(base62::encode(&frame))
}

/// Decrypts and authenticates a Branca token.
pub fn decrypt(token: &str, key: &SymmetricKey) -> Result<DecryptedBranca, TokenError> {
    let frame = base62::decode(token).ok_or(TokenError::MalformedToken)?;
    if frame.len() < HEADER_LEN + TAG_LEN {
        return Err(TokenError::MalformedToken);
    }

    let version = frame[0];
    if version != VERSION_BYTE {
        return Err(TokenError::Codec(CodecError::UnsupportedVersion));
    }

    let header = &frame[..HEADER_LEN];
    let timestamp = u32::from_be_bytes(frame[1..5].try_into().map_err(|_| TokenError::MalformedToken)?);
    let mut nonce = [0u8; NONCE_LEN];
    nonce.copy_from_slice(&frame[5..HEADER_LEN]);

    let ciphertext = &frame[HEADER_LEN..frame.len() - TAG_LEN];
    let mut tag = [0u8; TAG_LEN];
    tag.copy_from_slice(&frame[frame.len() - TAG_LEN..]);

    let key_bytes: &[u8; 32] = key
        .as_ref()
        .try_into()
        .map_err(|_| TokenError::Codec(CodecError::InvalidKey))?;
    let payload = aead_open(key_bytes, &nonce, ciphertext, &tag, header)?;

    let timestamp_utc = OffsetDateTime::from_unix_timestamp(i64::from(timestamp)).map_err(|_| TokenError::MalformedToken)?;

    Ok(DecryptedBranca {
        payload,
        branca_timestamp: timestamp,
        timestamp_utc,
    })
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    fn key() -> SymmetricKey {
        SymmetricKey::try_from(b"supersecretkeyyoushouldnotcommit".as_slice()).expect("32 bytes")
    }

    /// Canonical Branca test vector from the published spec.
    #[test]
    fn decrypts_canonical_vector() {
        let token = "5K6fDIqRhrSuqGE3FbuxAPd19P2toAsbBxOn4bgSame9ti6QZUQJkrggCypBJIEXF6tvhgjeMZTV76UkiqXNSvqHebeplccFrhepHkxU1SlSSFoAMKs5TUomcg6ZgDhiaYDs3IlypSxafP4uvKmu0VD";
        let decrypted = decrypt(token, &key()).expect("decrypt");
        assert_eq!(
            decrypted.payload,
            br#"{"user":"scott@scottbrady91.com","scope":["read","write","delete"]}"#
        );
    }

    #[test]
    fn round_trips() {
        let k = key();
        let token = create(b"hello", None, &k).expect("create");
        let decrypted = decrypt(&token, &k).expect("decrypt");
        assert_eq!(decrypted.payload, b"hello");
        let now = OffsetDateTime::now_utc().unix_timestamp();
        assert!((i64::from(decrypted.branca_timestamp) - now).abs() <= 1);
    }

    #[test]
    fn explicit_timestamp_zero_round_trips() {
        let k = key();
        let token = create(b"payload", Some(0), &k).expect("create");
        let decrypted = decrypt(&token, &k).expect("decrypt");
        assert_eq!(decrypted.branca_timestamp, 0);
        assert_eq!(decrypted.timestamp_utc, OffsetDateTime::UNIX_EPOCH);
    }

    #[test]
    fn wrong_key_fails() {
        let token = create(b"hello", None, &key()).expect("create");
        let other = SymmetricKey::try_from([1u8; 32].as_slice()).expect("32 bytes");
        let result = decrypt(&token, &other);
        assert!(matches!(result, Err(TokenError::DecryptionFailed)));
    }

    #[test]
    fn wrong_version_byte_is_rejected() {
        let token = "5K6fDIqRhrSuqGE3FbuxAPd19P2toAsbBxOn4bgSame9ti6QZUQJkrggCypBJIEXF6tvhgjeMZTV76UkiqXNSvqHebeplccFrhepHkxU1SlSSFoAMKs5TUomcg6ZgDhiaYDs3IlypSxafP4uvKmu0VD";
        let mut frame = base62::decode(token).expect("decode");
        frame[0] = 0x00;
        let tampered = base62::encode(&frame);
        assert_eq!(tampered.len(), 120);
        let result = decrypt(&tampered, &key());
        assert!(matches!(result, Err(TokenError::Codec(CodecError::UnsupportedVersion))));
    }

    #[test]
    fn bit_flip_in_body_is_rejected() {
        let k = key();
        let token = create(b"hello world", None, &k).expect("create");
        let mut frame = base62::decode(&token).expect("decode");
        let last = frame.len() - 1;
        frame[last] ^= 0x01;
        let tampered = base62::encode(&frame);
        let result = decrypt(&tampered, &k);
        assert!(matches!(result, Err(TokenError::DecryptionFailed)));
    }

    #[test]
    fn can_read_rejects_blank_jwt_shaped_and_oversized() {
        assert!(!can_read("", DEFAULT_MAX_TOKEN_SIZE));
        assert!(!can_read("   ", DEFAULT_MAX_TOKEN_SIZE));
        assert!(!can_read("v2.local.abc", DEFAULT_MAX_TOKEN_SIZE));
        assert!(!can_read("not-base62!", DEFAULT_MAX_TOKEN_SIZE));
        assert!(!can_read(&"0".repeat(40), 10));
        assert!(can_read("0123456789", DEFAULT_MAX_TOKEN_SIZE));
    }
}
