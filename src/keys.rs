//! Key material wrappers.
//!
//! A [`Key`] is a fixed-size secret byte buffer that zeroes itself on drop.
//! Higher-level wrappers (`SymmetricKey`, `Ed25519PublicKey`, ...) exist so
//! the handlers in [`crate::handlers`] can filter a heterogeneous list of
//! caller-supplied key material down to the type a given operation needs.

use crate::errors::CodecError;
use ring::rand::{SecureRandom, SystemRandom};
use std::fmt;
use std::ops::Deref;
use zeroize::Zeroize;

/// A fixed-size secret byte buffer. Zeroed on drop.
#[derive(Zeroize, Clone)]
#[zeroize(drop)]
pub struct Key<const N: usize>([u8; N]);

impl<const N: usize> Key<N> {
    pub fn try_new_random() -> Result<Self, CodecError> {
        let rng = SystemRandom::new();
        let mut buf = [0u8; N];
        rng.fill(&mut buf).map_err(|_| CodecError::Internal)?;
        Ok(Self(buf))
    }
}

impl<const N: usize> Default for Key<N> {
    fn default() -> Self {
        Self([0u8; N])
    }
}

impl<const N: usize> AsRef<[u8]> for Key<N> {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl<const N: usize> Deref for Key<N> {
    type Target = [u8; N];
    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl<const N: usize> From<[u8; N]> for Key<N> {
    fn from(key: [u8; N]) -> Self {
        Self(key)
    }
}

impl<const N: usize> TryFrom<&[u8]> for Key<N> {
    type Error = CodecError;
    fn try_from(value: &[u8]) -> Result<Self, Self::Error> {
        if value.len() != N {
            return Err(CodecError::InvalidKey);
        }
        let mut me = Self::default();
        me.0.copy_from_slice(value);
        Ok(me)
    }
}

impl<const N: usize> fmt::Debug for Key<N> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Key<{N}>(REDACTED)")
    }
}

/// 32-byte symmetric key: Branca, PASETO v2.local, and the HKDF input
/// keying material for PASETO v1.local.
pub type SymmetricKey = Key<32>;

/// An Ed25519 key pair, stored as the 64-byte `seed || public` keypair
/// encoding `ed25519-dalek` expects from `SigningKey::from_keypair_bytes`.
#[derive(Clone)]
pub struct Ed25519KeyPair(Key<64>);

impl Ed25519KeyPair {
    pub fn from_keypair_bytes(bytes: [u8; 64]) -> Self {
        Self(Key::from(bytes))
    }
}

impl AsRef<[u8]> for Ed25519KeyPair {
    fn as_ref(&self) -> &[u8] {
        self.0.as_ref()
    }
}

/// A 32-byte Ed25519 public key.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Ed25519PublicKey([u8; 32]);

impl Ed25519PublicKey {
    pub fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Ed25519PublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An RSA private key in PKCS#8 DER form (what `ring::signature::RsaKeyPair`
/// consumes), for PASETO v1.public signing.
#[derive(Clone)]
pub struct RsaPrivateKey(Vec<u8>);

impl RsaPrivateKey {
    pub fn from_pkcs8_der(der: Vec<u8>) -> Self {
        Self(der)
    }
}

impl AsRef<[u8]> for RsaPrivateKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// An RSA public key, SubjectPublicKeyInfo DER or raw modulus/exponent as
/// accepted by `ring::signature::UnparsedPublicKey`.
#[derive(Clone)]
pub struct RsaPublicKey(Vec<u8>);

impl RsaPublicKey {
    pub fn from_der(der: Vec<u8>) -> Self {
        Self(der)
    }
}

impl AsRef<[u8]> for RsaPublicKey {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// Heterogeneous key material as handed to a handler by the caller or a
/// [`crate::validation::KeyResolver`]. Handlers filter this down to the
/// type appropriate for the operation being performed.
#[derive(Clone)]
pub enum KeyMaterial {
    Symmetric(SymmetricKey),
    Ed25519Public(Ed25519PublicKey),
    Ed25519Private(Ed25519KeyPair),
    RsaPublic(RsaPublicKey),
    RsaPrivate(RsaPrivateKey),
}

impl KeyMaterial {
    pub fn as_symmetric(&self) -> Option<&SymmetricKey> {
        match self {
            KeyMaterial::Symmetric(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_ed25519_public(&self) -> Option<&Ed25519PublicKey> {
        match self {
            KeyMaterial::Ed25519Public(k) => Some(k),
            _ => None,
        }
    }

    pub fn as_rsa_public(&self) -> Option<&RsaPublicKey> {
        match self {
            KeyMaterial::RsaPublic(k) => Some(k),
            _ => None,
        }
    }
}
