use tokenware::claims::Audience;
use tokenware::handlers::{PasetoHandler, TokenDescriptor};
use tokenware::keys::{Ed25519KeyPair, Ed25519PublicKey, KeyMaterial, SymmetricKey};
use tokenware::validation::ValidationParameters;
use tokenware::{Purpose, TokenError, Version};

use ed25519_dalek::SigningKey;

fn keypair() -> (KeyMaterial, KeyMaterial) {
    let signing_key = SigningKey::from_bytes(&[42u8; 32]);
    let sk = KeyMaterial::Ed25519Private(Ed25519KeyPair::from_keypair_bytes(signing_key.to_keypair_bytes()));
    let pk = KeyMaterial::Ed25519Public(Ed25519PublicKey::from_bytes(signing_key.verifying_key().to_bytes()));
    (sk, pk)
}

fn descriptor_with_future_expiry() -> TokenDescriptor {
    let mut descriptor = TokenDescriptor::default();
    descriptor.subject = Some("123".to_string());
    descriptor.issuer = Some("me".to_string());
    descriptor.audience = Some(Audience::Single("you".to_string()));
    descriptor.expires = Some(time::OffsetDateTime::now_utc().unix_timestamp() + 86_400);
    descriptor
}

#[test]
fn v2_public_round_trip_verifies_with_matching_key() {
    let (sk, pk) = keypair();
    let token = PasetoHandler::create(&descriptor_with_future_expiry(), Version::V2, Purpose::Public, &sk).expect("sign");

    let mut params = ValidationParameters::default();
    params.keys = vec![pk];
    let result = PasetoHandler::validate(&token, &params);
    assert!(result.is_valid());
}

#[test]
fn v2_public_round_trip_rejects_mismatched_key() {
    let (sk, _pk) = keypair();
    let token = PasetoHandler::create(&descriptor_with_future_expiry(), Version::V2, Purpose::Public, &sk).expect("sign");

    let other_signing = SigningKey::from_bytes(&[7u8; 32]);
    let other_pk = KeyMaterial::Ed25519Public(Ed25519PublicKey::from_bytes(other_signing.verifying_key().to_bytes()));

    let mut params = ValidationParameters::default();
    params.keys = vec![other_pk];
    let result = PasetoHandler::validate(&token, &params);
    assert!(matches!(result, tokenware::ValidationResult::Invalid { error: TokenError::BadSignature }));
}

#[test]
fn v2_local_round_trip_through_the_handler() {
    let key = KeyMaterial::Symmetric(SymmetricKey::try_from([5u8; 32].as_slice()).expect("32 bytes"));
    let token = PasetoHandler::create(&TokenDescriptor::default(), Version::V2, Purpose::Local, &key).expect("encrypt");

    let mut params = ValidationParameters::default();
    params.keys = vec![key];
    let result = PasetoHandler::validate(&token, &params);
    assert!(result.is_valid());
}

/// Signs `{"sub":"123","iss":"me","aud":"you","exp":<now+1d>}` and validates
/// it end to end with issuer/audience checks turned on.
#[test]
fn v2_public_end_to_end_scenario() -> anyhow::Result<()> {
    let (sk, pk) = keypair();
    let token = PasetoHandler::create(&descriptor_with_future_expiry(), Version::V2, Purpose::Public, &sk)?;

    let mut params = ValidationParameters::default();
    params.keys = vec![pk];
    params.validate_issuer = true;
    params.valid_issuer = Some("me".to_string());
    params.validate_audience = true;
    params.valid_audience = Some("you".to_string());

    let result = PasetoHandler::validate(&token, &params);
    assert!(result.is_valid());
    Ok(())
}
