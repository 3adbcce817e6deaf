//! The crypto boundary.
//!
//! Every primitive here is a pure function over byte buffers: no traits, no
//! state, calling straight into `ring`/`chacha20poly1305`/`ed25519-dalek`
//! rather than routing through an abstract provider. Implementations are
//! constant-time for tag/mac comparison and signature verification,
//! delegated to `ring`/`subtle`/the underlying crates' own constant-time
//! guarantees.

mod aead;
mod rand;
mod signature;
mod symmetric;

pub use aead::{aead_open, aead_seal};
pub use rand::csprng_bytes;
pub use signature::{ed25519_sign, ed25519_verify, rsa_pss_sign, rsa_pss_verify};
pub use symmetric::{aes256_ctr, hkdf_sha384_extract_and_expand, hmac_sha384};
