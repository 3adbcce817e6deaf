//! Branca and PASETO v1/v2 token codec and validator.
//!
//! Two independent wire formats share one crate because they occupy the
//! same niche (compact authenticated tokens, no `alg` confusion) and the
//! same consumer workflow: [`mint a token -> hand it to a caller -> later
//! validate it`]. [`BrancaHandler`] and [`PasetoHandler`] expose that
//! workflow; [`validation`] holds the shared claims pipeline both call
//! into after their respective AEAD open / signature verify succeeds.
//!
//! ```
//! use tokenware::claims::Audience;
//! use tokenware::handlers::{BrancaHandler, TokenDescriptor};
//! use tokenware::keys::SymmetricKey;
//! use tokenware::validation::ValidationParameters;
//!
//! let key = SymmetricKey::try_from(b"supersecretkeyyoushouldnotcommit".as_slice())?;
//! let mut descriptor = TokenDescriptor::default();
//! descriptor.subject = Some("alice".to_string());
//! descriptor.audience = Some(Audience::Single("my-api".to_string()));
//!
//! let token = BrancaHandler::create(&descriptor, &key)?;
//!
//! let mut params = ValidationParameters::default();
//! params.keys = vec![tokenware::keys::KeyMaterial::Symmetric(key)];
//! let result = BrancaHandler::validate(&token, &params);
//! assert!(result.is_valid());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod base62;
pub mod branca;
pub mod claims;
pub mod crypto;
pub mod errors;
pub mod handlers;
pub mod keys;
pub mod paseto;
pub mod validation;

pub use errors::{CodecError, TokenError};
pub use handlers::{BrancaHandler, PasetoHandler, TokenDescriptor};
pub use keys::KeyMaterial;
pub use paseto::{Purpose, Version};
pub use validation::{ValidationParameters, ValidationResult};
