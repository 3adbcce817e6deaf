//! PASETO frame: dotted header split/assemble.

use crate::errors::TokenError;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine;
use std::fmt;

/// Default maximum accepted token length.
pub const DEFAULT_MAX_TOKEN_SIZE: usize = 32 * 1024;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Version {
    V1,
    V2,
}

impl Version {
    fn as_str(self) -> &'static str {
        match self {
            Version::V1 => "v1",
            Version::V2 => "v2",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "v1" => Some(Version::V1),
            "v2" => Some(Version::V2),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Purpose {
    Local,
    Public,
}

impl Purpose {
    fn as_str(self) -> &'static str {
        match self {
            Purpose::Local => "local",
            Purpose::Public => "public",
        }
    }

    fn parse(s: &str) -> Option<Self> {
        match s {
            "local" => Some(Purpose::Local),
            "public" => Some(Purpose::Public),
            _ => None,
        }
    }
}

/// The dotted ASCII header used both as the wire prefix and as the first
/// PAE piece.
pub fn header_str(version: Version, purpose: Purpose) -> String {
    format!("{}.{}.", version.as_str(), purpose.as_str())
}

/// A structurally parsed PASETO token: version/purpose tag plus the raw
/// (still base64url-encoded) payload and optional footer.
#[derive(Debug, Clone)]
pub struct PasetoFrame {
    pub version: Version,
    pub purpose: Purpose,
    encoded_payload: String,
    encoded_footer: Option<String>,
}

impl PasetoFrame {
    /// `CanRead`: 3 or 4 dot-separated non-empty parts, within `max_len`.
    pub fn can_read(token: &str, max_len: usize) -> bool {
        let trimmed = token.trim();
        if trimmed.is_empty() || trimmed.len() > max_len {
            return false;
        }
        let parts: Vec<&str> = trimmed.split('.').collect();
        if !(3..=4).contains(&parts.len()) {
            return false;
        }
        if parts.iter().any(|p| p.is_empty()) {
            return false;
        }
        Version::parse(parts[0]).is_some() && Purpose::parse(parts[1]).is_some()
    }

    pub fn parse(token: &str) -> Result<Self, TokenError> {
        let parts: Vec<&str> = token.split('.').collect();
        if !(3..=4).contains(&parts.len()) || parts.iter().any(|p| p.is_empty()) {
            return Err(TokenError::MalformedToken);
        }
        let version = Version::parse(parts[0]).ok_or(TokenError::MalformedToken)?;
        let purpose = Purpose::parse(parts[1]).ok_or(TokenError::MalformedToken)?;
        let encoded_footer = parts.get(3).map(|s| s.to_string());

        Ok(Self {
            version,
            purpose,
            encoded_payload: parts[2].to_string(),
            encoded_footer,
        })
    }

    pub fn decode_payload(&self) -> Result<Vec<u8>, TokenError> {
        URL_SAFE_NO_PAD.decode(&self.encoded_payload).map_err(|_| TokenError::MalformedToken)
    }

    pub fn decode_footer(&self) -> Result<Vec<u8>, TokenError> {
        match &self.encoded_footer {
            Some(f) => URL_SAFE_NO_PAD.decode(f).map_err(|_| TokenError::MalformedToken),
            None => Ok(Vec::new()),
        }
    }

    pub fn has_footer(&self) -> bool {
        self.encoded_footer.is_some()
    }
}

impl fmt::Display for PasetoFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", header_str(self.version, self.purpose), self.encoded_payload)?;
        if let Some(footer) = &self.encoded_footer {
            write!(f, ".{footer}")?;
        }
        Ok(())
    }
}

/// Assembles a complete PASETO token string from its raw body and an
/// optional footer.
pub fn assemble(version: Version, purpose: Purpose, body: &[u8], footer: &[u8]) -> String {
    let mut token = header_str(version, purpose);
    token.push_str(&URL_SAFE_NO_PAD.encode(body));
    if !footer.is_empty() {
        token.push('.');
        token.push_str(&URL_SAFE_NO_PAD.encode(footer));
    }
    token
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn parses_token_without_footer() {
        let frame = PasetoFrame::parse("v2.local.cGF5bG9hZA").expect("parse");
        assert_eq!(frame.version, Version::V2);
        assert_eq!(frame.purpose, Purpose::Local);
        assert!(!frame.has_footer());
    }

    #[test]
    fn parses_token_with_footer() {
        let frame = PasetoFrame::parse("v2.public.cGF5bG9hZA.Zm9vdGVy").expect("parse");
        assert!(frame.has_footer());
        assert_eq!(frame.decode_footer().expect("decode"), b"footer");
    }

    #[test]
    fn rejects_wrong_part_count() {
        assert!(PasetoFrame::parse("v2.local").is_err());
        assert!(PasetoFrame::parse("v2.local.a.b.c").is_err());
    }

    #[test]
    fn can_read_matches_parse_success() {
        assert!(PasetoFrame::can_read("v2.local.cGF5bG9hZA", DEFAULT_MAX_TOKEN_SIZE));
        assert!(!PasetoFrame::can_read("", DEFAULT_MAX_TOKEN_SIZE));
        assert!(!PasetoFrame::can_read("v9.local.abc", DEFAULT_MAX_TOKEN_SIZE));
        assert!(!PasetoFrame::can_read(&"v2.local.".repeat(100), 10));
    }

    #[test]
    fn assemble_round_trips_through_parse() {
        let token = assemble(Version::V2, Purpose::Local, b"body", b"footer");
        let frame = PasetoFrame::parse(&token).expect("parse");
        assert_eq!(frame.decode_payload().expect("decode"), b"body");
        assert_eq!(frame.decode_footer().expect("decode"), b"footer");
    }
}
