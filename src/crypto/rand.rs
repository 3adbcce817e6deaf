use crate::errors::CodecError;
use ring::rand::{SecureRandom, SystemRandom};

/// Cryptographically strong random bytes.
pub fn csprng_bytes(n: usize) -> Result<Vec<u8>, CodecError> {
    let rng = SystemRandom::new();
    let mut buf = vec![0u8; n];
    rng.fill(&mut buf).map_err(|_| CodecError::Internal)?;
    Ok(buf)
}
