use crate::errors::CodecError;
use ed25519_dalek::{Signature, Signer, SigningKey, Verifier, VerifyingKey};
use ring::rand::SystemRandom;
use ring::signature::{RsaKeyPair, RSA_PSS_2048_8192_SHA384, RSA_PSS_SHA384};

/// `sk` is the 64-byte `ed25519-dalek` keypair encoding (seed || public key).
pub fn ed25519_sign(sk: &[u8], msg: &[u8]) -> Result<[u8; 64], CodecError> {
    let bytes: &[u8; 64] = sk.try_into().map_err(|_| CodecError::InvalidKey)?;
    let signing_key = SigningKey::from_keypair_bytes(bytes).map_err(|_| CodecError::InvalidKey)?;
    Ok(signing_key.sign(msg).to_bytes())
}

pub fn ed25519_verify(pk: &[u8; 32], msg: &[u8], sig: &[u8; 64]) -> bool {
    let Ok(verifying_key) = VerifyingKey::from_bytes(pk) else {
        return false;
    };
    let Ok(signature) = Signature::try_from(sig.as_slice()) else {
        return false;
    };
    verifying_key.verify(msg, &signature).is_ok()
}

/// `sk` must be a PKCS#8-encoded RSA private key (2048-bit or larger).
/// RSASSA-PSS with SHA-384/MGF1-SHA-384, 48-byte salt.
pub fn rsa_pss_sign(sk: &[u8], msg: &[u8]) -> Result<[u8; 256], CodecError> {
    let key_pair = RsaKeyPair::from_pkcs8(sk).map_err(|_| CodecError::InvalidKey)?;
    let random = SystemRandom::new();
    let mut signature = [0u8; 256];
    key_pair
        .sign(&RSA_PSS_SHA384, &random, msg, &mut signature)
        .map_err(|_| CodecError::Internal)?;
    Ok(signature)
}

pub fn rsa_pss_verify(pk: &[u8], msg: &[u8], sig: &[u8]) -> bool {
    let public_key = ring::signature::UnparsedPublicKey::new(&RSA_PSS_2048_8192_SHA384, pk);
    public_key.verify(msg, sig).is_ok()
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn ed25519_round_trips() {
        let signing_key = SigningKey::from_bytes(&[3u8; 32]);
        let sk_bytes = signing_key.to_keypair_bytes();
        let pk_bytes = signing_key.verifying_key().to_bytes();

        let sig = ed25519_sign(&sk_bytes, b"hello").expect("sign");
        assert!(ed25519_verify(&pk_bytes, b"hello", &sig));
    }

    #[test]
    fn ed25519_rejects_wrong_key() {
        let signing_key = SigningKey::from_bytes(&[3u8; 32]);
        let sk_bytes = signing_key.to_keypair_bytes();
        let other_pk = SigningKey::from_bytes(&[4u8; 32]).verifying_key().to_bytes();

        let sig = ed25519_sign(&sk_bytes, b"hello").expect("sign");
        assert!(!ed25519_verify(&other_pk, b"hello", &sig));
    }

    #[test]
    fn ed25519_rejects_flipped_message() {
        let signing_key = SigningKey::from_bytes(&[3u8; 32]);
        let sk_bytes = signing_key.to_keypair_bytes();
        let pk_bytes = signing_key.verifying_key().to_bytes();

        let sig = ed25519_sign(&sk_bytes, b"hello").expect("sign");
        assert!(!ed25519_verify(&pk_bytes, b"hellp", &sig));
    }
}
