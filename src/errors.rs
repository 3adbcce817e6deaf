use thiserror::Error;

/// Errors raised immediately on the `Create` path.
///
/// These are programmer-error inputs (missing payload, wrong key length,
/// an algorithm combination that doesn't exist) and are expected to be
/// caught in development, not handled at runtime on untrusted input.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("a required argument was missing or empty")]
    ArgumentMissing,
    #[error("the key was not valid for this operation")]
    InvalidKey,
    #[error("this (version, purpose) combination is not supported")]
    UnsupportedPurpose,
    #[error("the requested token version is not supported")]
    UnsupportedVersion,
    #[error("the payload could not be serialized to JSON")]
    ClaimsSerialization {
        #[from]
        source: serde_json::Error,
    },
    #[error("an internal cryptographic primitive failed")]
    Internal,
}

/// Errors surfaced while parsing or cryptographically opening a token.
///
/// `Validate` never propagates these as a Rust `Err`; they are folded into
/// a [`crate::validation::ValidationResult::Invalid`] instead. They're kept
/// as a normal `Result` type internally because most of the parsing/crypto
/// pipeline is naturally expressed with `?`.
#[derive(Debug, Error)]
pub enum TokenError {
    #[error(transparent)]
    Codec(#[from] CodecError),
    #[error("the token is malformed and could not be parsed")]
    MalformedToken,
    #[error("decryption failed: the authentication tag did not verify")]
    DecryptionFailed,
    #[error("signature verification failed against all candidate keys")]
    BadSignature,
    #[error("the decoded payload was not a JSON object")]
    MalformedClaims,
    #[error("no key of the required type/length was available for this operation")]
    NoValidDecryptionKey,
    #[error("the token has expired")]
    TokenExpired,
    #[error("the token is not yet valid")]
    TokenNotYetValid,
    #[error("the token is required to carry an expiration claim but has none")]
    NoExpiration,
    #[error("the audience claim did not match any configured valid audience")]
    InvalidAudience,
    #[error("the issuer claim did not match any configured valid issuer")]
    InvalidIssuer,
    #[error("this token has already been seen and was rejected as a replay")]
    TokenReplayed,
}

impl From<base64::DecodeError> for TokenError {
    fn from(_: base64::DecodeError) -> Self {
        TokenError::MalformedToken
    }
}

impl From<std::str::Utf8Error> for TokenError {
    fn from(_: std::str::Utf8Error) -> Self {
        TokenError::MalformedClaims
    }
}

impl From<std::string::FromUtf8Error> for TokenError {
    fn from(_: std::string::FromUtf8Error) -> Self {
        TokenError::MalformedClaims
    }
}

impl From<serde_json::Error> for TokenError {
    fn from(_: serde_json::Error) -> Self {
        TokenError::MalformedClaims
    }
}
