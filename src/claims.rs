//! Claims model.

use crate::errors::TokenError;
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use time::OffsetDateTime;

/// How an issuer encodes date claims (`exp`/`nbf`/`iat`) when creating a
/// token. Decoding accepts either representation regardless of this
/// setting; it only governs what [`Claims::to_json`] emits.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum JwtDateTimeFormat {
    #[default]
    Unix,
    Iso,
}

/// The audience claim: either a single string or an array of strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Audience {
    Single(String),
    Multiple(Vec<String>),
}

impl Audience {
    pub fn contains(&self, candidate: &str) -> bool {
        match self {
            Audience::Single(s) => s == candidate,
            Audience::Multiple(v) => v.iter().any(|a| a == candidate),
        }
    }

    fn to_value(&self) -> Value {
        match self {
            Audience::Single(s) => Value::String(s.clone()),
            Audience::Multiple(v) => Value::Array(v.iter().cloned().map(Value::String).collect()),
        }
    }
}

/// A parsed claims payload: the reserved claim names broken out, plus
/// everything else retained verbatim.
#[derive(Debug, Clone, Default)]
pub struct Claims {
    pub iss: Option<String>,
    pub aud: Option<Audience>,
    pub sub: Option<String>,
    pub exp: Option<i64>,
    pub nbf: Option<i64>,
    pub iat: Option<i64>,
    pub jti: Option<String>,
    pub extra: BTreeMap<String, Value>,
}

impl Claims {
    pub fn parse(bytes: &[u8]) -> Result<Self, TokenError> {
        let value: Value = serde_json::from_slice(bytes)?;
        let Value::Object(map) = value else {
            return Err(TokenError::MalformedClaims);
        };

        let mut claims = Claims::default();
        for (key, value) in map {
            match key.as_str() {
                "iss" => claims.iss = value.as_str().map(str::to_owned),
                "sub" => claims.sub = value.as_str().map(str::to_owned),
                "jti" => claims.jti = value.as_str().map(str::to_owned),
                "aud" => claims.aud = parse_audience(&value),
                "exp" => claims.exp = parse_date_claim(&value),
                "nbf" => claims.nbf = parse_date_claim(&value),
                "iat" => claims.iat = parse_date_claim(&value),
                other => {
                    claims.extra.insert(other.to_string(), value);
                }
            }
        }
        Ok(claims)
    }

    /// Serializes back to a JSON claims object, per `format`'s date
    /// encoding.
    pub fn to_json(&self, format: JwtDateTimeFormat) -> Result<Vec<u8>, TokenError> {
        let mut map = Map::new();
        if let Some(iss) = &self.iss {
            map.insert("iss".to_string(), Value::String(iss.clone()));
        }
        if let Some(sub) = &self.sub {
            map.insert("sub".to_string(), Value::String(sub.clone()));
        }
        if let Some(jti) = &self.jti {
            map.insert("jti".to_string(), Value::String(jti.clone()));
        }
        if let Some(aud) = &self.aud {
            map.insert("aud".to_string(), aud.to_value());
        }
        if let Some(exp) = self.exp {
            map.insert("exp".to_string(), encode_date_claim(exp, format)?);
        }
        if let Some(nbf) = self.nbf {
            map.insert("nbf".to_string(), encode_date_claim(nbf, format)?);
        }
        if let Some(iat) = self.iat {
            map.insert("iat".to_string(), encode_date_claim(iat, format)?);
        }
        for (key, value) in &self.extra {
            map.insert(key.clone(), value.clone());
        }
        Ok(serde_json::to_vec(&Value::Object(map))?)
    }
}

fn parse_audience(value: &Value) -> Option<Audience> {
    match value {
        Value::String(s) => Some(Audience::Single(s.clone())),
        Value::Array(items) => {
            let strings: Option<Vec<String>> = items.iter().map(|v| v.as_str().map(str::to_owned)).collect();
            strings.map(Audience::Multiple)
        }
        _ => None,
    }
}

/// Date claims accept either numeric epoch seconds or an ISO-8601 string,
/// independent of the issuer's configured encoding format.
fn parse_date_claim(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => iso8601::datetime(s).ok().and_then(iso8601_to_unix),
        _ => None,
    }
}

fn iso8601_to_unix(dt: iso8601::DateTime) -> Option<i64> {
    use time::{Date, Month, Time};

    let iso8601::Date::YMD { year, month, day } = dt.date else {
        // Week-date and ordinal-date forms are vanishingly rare for token
        // claims; every issuer observed in practice emits calendar dates.
        return None;
    };

    let month = Month::try_from(month as u8).ok()?;
    let date = Date::from_calendar_date(year, month, day as u8).ok()?;
    let time = Time::from_hms_milli(
        dt.time.hour as u8,
        dt.time.minute as u8,
        dt.time.second as u8,
        dt.time.millisecond as u16,
    )
    .ok()?;
    let offset_seconds = dt.time.tz_offset_hours * 3600 + dt.time.tz_offset_minutes * 60;
    let offset = time::UtcOffset::from_whole_seconds(offset_seconds).ok()?;
    let odt = date.with_time(time).assume_offset(offset);
    Some(odt.unix_timestamp())
}

fn encode_date_claim(unix_seconds: i64, format: JwtDateTimeFormat) -> Result<Value, TokenError> {
    match format {
        JwtDateTimeFormat::Unix => Ok(Value::from(unix_seconds)),
        JwtDateTimeFormat::Iso => {
            let dt = OffsetDateTime::from_unix_timestamp(unix_seconds).map_err(|_| TokenError::MalformedClaims)?;
            let formatted = dt
                .format(&time::format_description::well_known::Rfc3339)
                .map_err(|_| TokenError::MalformedClaims)?;
            Ok(Value::String(formatted))
        }
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    #[test]
    fn parses_reserved_and_retains_unknown_claims() {
        let json = br#"{"iss":"me","aud":"you","sub":"123","exp":1700000000,"custom":"value"}"#;
        let claims = Claims::parse(json).expect("parse");
        assert_eq!(claims.iss.as_deref(), Some("me"));
        assert_eq!(claims.sub.as_deref(), Some("123"));
        assert_eq!(claims.exp, Some(1700000000));
        assert!(claims.aud.as_ref().expect("aud").contains("you"));
        assert_eq!(claims.extra.get("custom"), Some(&Value::String("value".to_string())));
    }

    #[test]
    fn parses_audience_array() {
        let json = br#"{"aud":["a","b"]}"#;
        let claims = Claims::parse(json).expect("parse");
        let aud = claims.aud.expect("aud");
        assert!(aud.contains("a"));
        assert!(aud.contains("b"));
        assert!(!aud.contains("c"));
    }

    #[test]
    fn parses_iso8601_date_claim() {
        let json = br#"{"exp":"2019-01-01T00:00:00+00:00"}"#;
        let claims = Claims::parse(json).expect("parse");
        assert_eq!(claims.exp, Some(1546300800));
    }

    #[test]
    fn rejects_non_object_payload() {
        let result = Claims::parse(br#"["not", "an", "object"]"#);
        assert!(matches!(result, Err(TokenError::MalformedClaims)));
    }

    #[test]
    fn round_trips_through_json_unix_format() {
        let mut claims = Claims::default();
        claims.iss = Some("me".to_string());
        claims.exp = Some(1700000000);
        let json = claims.to_json(JwtDateTimeFormat::Unix).expect("to_json");
        let reparsed = Claims::parse(&json).expect("parse");
        assert_eq!(reparsed.iss.as_deref(), Some("me"));
        assert_eq!(reparsed.exp, Some(1700000000));
    }

    #[test]
    fn round_trips_through_json_iso_format() {
        let mut claims = Claims::default();
        claims.exp = Some(1546300800);
        let json = claims.to_json(JwtDateTimeFormat::Iso).expect("to_json");
        let reparsed = Claims::parse(&json).expect("parse");
        assert_eq!(reparsed.exp, Some(1546300800));
    }
}
