//! Header and claim values, and the names of the registered claims

use indexmap::IndexMap;
use serde_json::Value;
use time::OffsetDateTime;

use crate::encoding::date;
use crate::prelude::*;

/// Names of the claims registered in [RFC 7519 Section 4.1][1]
///
/// [1]: https://www.rfc-editor.org/rfc/rfc7519#section-4.1
pub struct RegisteredClaims;

impl RegisteredClaims {
    /// Recipients the token is intended for
    pub const AUDIENCE: &'static str = "aud";
    /// Instant after which the token must be rejected
    pub const EXPIRATION_TIME: &'static str = "exp";
    /// Unique identifier of the token
    pub const ID: &'static str = "jti";
    /// Instant the token was issued at
    pub const ISSUED_AT: &'static str = "iat";
    /// Principal which issued the token
    pub const ISSUER: &'static str = "iss";
    /// Instant before which the token must be rejected
    pub const NOT_BEFORE: &'static str = "nbf";
    /// Principal the token is about
    pub const SUBJECT: &'static str = "sub";

    /// Every registered claim
    pub const ALL: [&'static str; 7] = [
        Self::AUDIENCE,
        Self::EXPIRATION_TIME,
        Self::ID,
        Self::ISSUED_AT,
        Self::ISSUER,
        Self::NOT_BEFORE,
        Self::SUBJECT,
    ];

    /// Registered claims holding an instant
    pub const DATE_CLAIMS: [&'static str; 3] = [Self::ISSUED_AT, Self::NOT_BEFORE, Self::EXPIRATION_TIME];

    /// Whether `name` is one of the seven registered claims
    pub fn contains(name: &str) -> bool {
        Self::ALL.contains(&name)
    }
}

/// A header or claim value
///
/// Closed over what JSON can carry plus [ClaimValue::Timestamp] which registered date claims are
/// normalized into.
#[derive(Debug, Clone, PartialEq)]
pub enum ClaimValue {
    /// JSON `null`
    Null,
    /// JSON boolean
    Bool(bool),
    /// JSON number without fraction
    Integer(i64),
    /// JSON number with a fraction
    Float(f64),
    /// JSON number an `f64` cannot hold exactly, kept as written
    Decimal(String),
    /// JSON string
    String(String),
    /// Instant with microsecond precision
    Timestamp(OffsetDateTime),
    /// JSON array
    List(Vec<ClaimValue>),
    /// JSON object, in insertion order
    Map(IndexMap<String, ClaimValue>),
}

impl ClaimValue {
    /// The string, if this is one
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    /// The instant, if this is one
    pub fn as_timestamp(&self) -> Option<&OffsetDateTime> {
        match self {
            Self::Timestamp(t) => Some(t),
            _ => None,
        }
    }

    /// The elements, if this is a list
    pub fn as_list(&self) -> Option<&[ClaimValue]> {
        match self {
            Self::List(l) => Some(l),
            _ => None,
        }
    }

    /// The entries, if this is a map
    pub fn as_map(&self) -> Option<&IndexMap<String, ClaimValue>> {
        match self {
            Self::Map(m) => Some(m),
            _ => None,
        }
    }

    /// Converts into a JSON value. Timestamps are rendered like the default claims formatter does.
    ///
    /// # Errors
    /// When a float is not finite since JSON has no representation for it
    pub fn to_json(&self) -> RustyJwtResult<Value> {
        Ok(match self {
            Self::Null => Value::Null,
            Self::Bool(b) => Value::Bool(*b),
            Self::Integer(i) => Value::from(*i),
            Self::Float(f) => serde_json::Number::from_f64(*f)
                .map(Value::Number)
                .ok_or_else(|| RustyJwtError::CannotEncodeContent(format!("{f} is not a finite number")))?,
            Self::Decimal(d) => d
                .parse::<serde_json::Number>()
                .map(Value::Number)
                .map_err(|_| RustyJwtError::CannotEncodeContent(format!("{d} is not a JSON number")))?,
            Self::String(s) => Value::String(s.clone()),
            Self::Timestamp(t) => date::microsecond_value(t).to_json()?,
            Self::List(l) => Value::Array(l.iter().map(Self::to_json).collect::<RustyJwtResult<_>>()?),
            Self::Map(m) => Value::Object(
                m.iter()
                    .map(|(k, v)| Ok((k.clone(), v.to_json()?)))
                    .collect::<RustyJwtResult<_>>()?,
            ),
        })
    }
}

impl serde::Serialize for ClaimValue {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let json = self.to_json().map_err(serde::ser::Error::custom)?;
        serde::Serialize::serialize(&json, serializer)
    }
}

impl<'de> serde::Deserialize<'de> for ClaimValue {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        <Value as serde::Deserialize>::deserialize(deserializer).map(Self::from)
    }
}

impl From<Value> for ClaimValue {
    fn from(value: Value) -> Self {
        match value {
            Value::Null => Self::Null,
            Value::Bool(b) => Self::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Self::Integer(i),
                None => Self::from_number_text(n.to_string()),
            },
            Value::String(s) => Self::String(s),
            Value::Array(a) => Self::List(a.into_iter().map(Self::from).collect()),
            Value::Object(o) => Self::Map(o.into_iter().map(|(k, v)| (k, Self::from(v))).collect()),
        }
    }
}

impl ClaimValue {
    /// A float when it renders back to the very same text, the text itself otherwise
    fn from_number_text(text: String) -> Self {
        match text.parse::<f64>() {
            Ok(f) if serde_json::Number::from_f64(f).is_some_and(|n| n.to_string() == text) => Self::Float(f),
            _ => Self::Decimal(text),
        }
    }
}

impl From<&str> for ClaimValue {
    fn from(s: &str) -> Self {
        Self::String(s.to_string())
    }
}

impl From<String> for ClaimValue {
    fn from(s: String) -> Self {
        Self::String(s)
    }
}

impl From<bool> for ClaimValue {
    fn from(b: bool) -> Self {
        Self::Bool(b)
    }
}

impl From<i32> for ClaimValue {
    fn from(i: i32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<i64> for ClaimValue {
    fn from(i: i64) -> Self {
        Self::Integer(i)
    }
}

impl From<u32> for ClaimValue {
    fn from(i: u32) -> Self {
        Self::Integer(i.into())
    }
}

impl From<f64> for ClaimValue {
    fn from(f: f64) -> Self {
        Self::Float(f)
    }
}

impl From<OffsetDateTime> for ClaimValue {
    fn from(t: OffsetDateTime) -> Self {
        Self::Timestamp(t)
    }
}

impl<T: Into<ClaimValue>> From<Vec<T>> for ClaimValue {
    fn from(l: Vec<T>) -> Self {
        Self::List(l.into_iter().map(Into::into).collect())
    }
}

impl From<IndexMap<String, ClaimValue>> for ClaimValue {
    fn from(m: IndexMap<String, ClaimValue>) -> Self {
        Self::Map(m)
    }
}

impl<T: Into<ClaimValue>> From<Option<T>> for ClaimValue {
    fn from(o: Option<T>) -> Self {
        o.map_or(Self::Null, Into::into)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn should_convert_from_json_preserving_order() {
        let value = ClaimValue::from(json!({"b": 1, "a": [true, null, "x"], "c": {"d": 1.5}}));
        let map = value.as_map().unwrap();
        assert_eq!(map.keys().collect::<Vec<_>>(), vec!["b", "a", "c"]);
        assert_eq!(map["b"], ClaimValue::Integer(1));
        assert_eq!(
            map["a"],
            ClaimValue::List(vec![ClaimValue::Bool(true), ClaimValue::Null, "x".into()])
        );
        assert_eq!(map["c"].as_map().unwrap()["d"], ClaimValue::Float(1.5));
    }

    #[test]
    fn should_fail_converting_non_finite_float_to_json() {
        let result = ClaimValue::List(vec![ClaimValue::Float(f64::INFINITY)]).to_json();
        assert!(matches!(result.unwrap_err(), RustyJwtError::CannotEncodeContent(_)));
        assert!(ClaimValue::Float(f64::NAN).to_json().is_err());
    }

    #[test]
    fn should_render_timestamps_as_numbers() {
        let whole = OffsetDateTime::from_unix_timestamp(1_613_938_511).unwrap();
        assert_eq!(ClaimValue::from(whole).to_json().unwrap(), json!(1_613_938_511));
        let fractional = whole + time::Duration::microseconds(17_448);
        assert_eq!(
            ClaimValue::from(fractional).to_json().unwrap().to_string(),
            "1613938511.017448"
        );
    }

    #[test]
    fn should_keep_numbers_floats_cannot_hold() {
        let value: ClaimValue = serde_json::from_str("[1.5, 253402300799.999999, 18446744073709551615]").unwrap();
        assert_eq!(
            value,
            ClaimValue::List(vec![
                ClaimValue::Float(1.5),
                ClaimValue::Decimal("253402300799.999999".into()),
                ClaimValue::Decimal("18446744073709551615".into()),
            ])
        );
        assert_eq!(
            serde_json::to_string(&value).unwrap(),
            "[1.5,253402300799.999999,18446744073709551615]"
        );
    }

    #[test]
    fn should_fail_encoding_malformed_decimal() {
        let result = ClaimValue::Decimal("twelve".into()).to_json();
        assert!(matches!(result.unwrap_err(), RustyJwtError::CannotEncodeContent(_)));
    }

    #[test]
    fn should_go_through_serde() {
        let value = ClaimValue::from(vec![ClaimValue::from("a"), ClaimValue::Integer(1)]);
        assert_eq!(serde_json::to_string(&value).unwrap(), r#"["a",1]"#);
        let back: ClaimValue = serde_json::from_str(r#"{"x":[1.5,null]}"#).unwrap();
        assert_eq!(back.as_map().unwrap()["x"], ClaimValue::List(vec![ClaimValue::Float(1.5), ClaimValue::Null]));
        assert!(serde_json::to_string(&ClaimValue::Float(f64::NAN)).is_err());
    }

    #[test]
    fn should_know_registered_claims() {
        for claim in ["aud", "exp", "jti", "iat", "iss", "nbf", "sub"] {
            assert!(RegisteredClaims::contains(claim));
        }
        assert!(!RegisteredClaims::contains("scope"));
        assert!(!RegisteredClaims::contains("AUD"));
    }
}
