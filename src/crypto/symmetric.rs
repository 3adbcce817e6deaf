use crate::errors::CodecError;
use aes::Aes256;
use ctr::cipher::generic_array::GenericArray;
use ctr::cipher::{KeyIvInit, StreamCipher};
use ctr::Ctr128BE;
use hmac::{Hmac, Mac};
use ring::hkdf;
use sha2::Sha384;

type Aes256Ctr = Ctr128BE<Aes256>;
type HmacSha384 = Hmac<Sha384>;

/// AES-256-CTR keystream xor. Used only by PASETO v1.local.
pub fn aes256_ctr(key: &[u8; 32], iv: &[u8; 16], data: &[u8]) -> Vec<u8> {
    let key = GenericArray::from_slice(key);
    let nonce = GenericArray::from_slice(iv);
    let mut cipher = Aes256Ctr::new(key, nonce);
    let mut out = data.to_vec();
    cipher.apply_keystream(&mut out);
    out
}

/// HMAC-SHA-384, used as the MAC half of PASETO v1.local's encrypt-then-MAC construction.
pub fn hmac_sha384(key: &[u8], data: &[u8]) -> Result<[u8; 48], CodecError> {
    let mut mac = HmacSha384::new_from_slice(key).map_err(|_| CodecError::InvalidKey)?;
    mac.update(data);
    let out = mac.finalize().into_bytes();
    let mut mac_bytes = [0u8; 48];
    mac_bytes.copy_from_slice(&out);
    Ok(mac_bytes)
}

/// HKDF-SHA-384 extract-and-expand, used to split PASETO v1.local key
/// material. `salt` is the first 16 bytes of the v1.local nonce.
pub fn hkdf_sha384_extract_and_expand(ikm: &[u8], salt: &[u8], info: &[u8], out_len: usize) -> Result<Vec<u8>, CodecError> {
    struct OutLen(usize);
    impl hkdf::KeyType for OutLen {
        fn len(&self) -> usize {
            self.0
        }
    }

    let salt = hkdf::Salt::new(hkdf::HKDF_SHA384, salt);
    let prk = salt.extract(ikm);
    let okm = prk
        .expand(&[info], OutLen(out_len))
        .map_err(|_| CodecError::Internal)?;
    let mut out = vec![0u8; out_len];
    okm.fill(&mut out).map_err(|_| CodecError::Internal)?;
    Ok(out)
}
