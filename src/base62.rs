//! Base62 codec.
//!
//! The underlying big-integer base conversion is treated as an external
//! collaborator, used only through `encode(bytes) -> string` /
//! `decode(string) -> bytes`; this wraps the `base-x` crate, the idiomatic
//! arbitrary-alphabet big-integer codec in the same family as `bs58`.

pub const ALPHABET: &str = "0123456789ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz";

/// Encodes `bytes` as base62, preserving leading zero bytes as leading `'0'`
/// characters.
pub fn encode(bytes: &[u8]) -> String {
    base_x::encode(ALPHABET, bytes)
}

/// Decodes a base62 string back to bytes. Rejects any character outside the
/// alphabet. The empty string decodes to the empty byte string, matching
/// `encode`'s own handling of an empty input.
pub fn decode(s: &str) -> Option<Vec<u8>> {
    if s.is_empty() {
        return Some(Vec::new());
    }
    if !is_base62(s) {
        return None;
    }
    base_x::decode(ALPHABET, s).ok()
}

/// `true` iff every character of `s` is in the base62 alphabet and `s` is
/// non-empty. Used by `CanRead`, which treats an empty token as unreadable;
/// `decode` handles the empty string itself rather than through this
/// predicate.
pub fn is_base62(s: &str) -> bool {
    !s.is_empty() && s.bytes().all(|b| ALPHABET.as_bytes().contains(&b))
}
