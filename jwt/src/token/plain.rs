use std::fmt::{Display, Formatter};

use time::OffsetDateTime;

use crate::prelude::*;

/// A signed (or unsecured) JWT, as built or parsed
///
/// Immutable. Its compact serialization is rebuilt from the encoded segments it keeps, never
/// re-encoded.
#[derive(Debug, Clone, PartialEq)]
pub struct Plain {
    headers: DataSet,
    claims: DataSet,
    signature: Signature,
}

impl Plain {
    /// Assembles a token from its three parts
    pub fn new(headers: DataSet, claims: DataSet, signature: Signature) -> Self {
        Self {
            headers,
            claims,
            signature,
        }
    }

    /// JOSE header
    pub fn headers(&self) -> &DataSet {
        &self.headers
    }

    /// Claims set
    pub fn claims(&self) -> &DataSet {
        &self.claims
    }

    /// Signature, empty for unsecured tokens
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Signing input: encoded header and encoded claims joined by a dot
    pub fn payload(&self) -> String {
        format!("{}.{}", self.headers, self.claims)
    }

    /// Value of the `alg` header, if it is a string
    pub fn header_algorithm(&self) -> Option<&str> {
        self.headers.get_str("alg")
    }

    /// Whether `audience` is one of the values of `aud`
    pub fn is_permitted_for(&self, audience: &str) -> bool {
        self.claims
            .get(RegisteredClaims::AUDIENCE)
            .and_then(ClaimValue::as_list)
            .is_some_and(|audiences| audiences.iter().any(|aud| aud.as_str() == Some(audience)))
    }

    /// Whether `jti` equals `id`
    pub fn is_identified_by(&self, id: &str) -> bool {
        self.claims.get_str(RegisteredClaims::ID) == Some(id)
    }

    /// Whether `sub` equals `subject`
    pub fn is_related_to(&self, subject: &str) -> bool {
        self.claims.get_str(RegisteredClaims::SUBJECT) == Some(subject)
    }

    /// Whether `iss` is one of `issuers`
    pub fn has_been_issued_by<S: AsRef<str>>(&self, issuers: &[S]) -> bool {
        self.claims
            .get_str(RegisteredClaims::ISSUER)
            .is_some_and(|iss| issuers.iter().any(|issuer| issuer.as_ref() == iss))
    }

    /// Whether `iat` is not after `now`. Holds when there is no `iat`.
    pub fn has_been_issued_before(&self, now: &OffsetDateTime) -> bool {
        self.date_claim(RegisteredClaims::ISSUED_AT).is_none_or(|iat| iat <= now)
    }

    /// Whether `nbf` is not after `now`. Holds when there is no `nbf`.
    pub fn is_minimum_time_before(&self, now: &OffsetDateTime) -> bool {
        self.date_claim(RegisteredClaims::NOT_BEFORE).is_none_or(|nbf| nbf <= now)
    }

    /// Whether `now` is strictly after `exp`. Tokens without `exp` never expire.
    pub fn is_expired(&self, now: &OffsetDateTime) -> bool {
        self.date_claim(RegisteredClaims::EXPIRATION_TIME).is_some_and(|exp| now > exp)
    }

    fn date_claim(&self, name: &str) -> Option<&OffsetDateTime> {
        self.claims.get(name).and_then(ClaimValue::as_timestamp)
    }
}

impl Display for Plain {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}.{}.{}", self.headers, self.claims, self.signature)
    }
}
