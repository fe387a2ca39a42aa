use std::sync::Arc;

use indexmap::IndexMap;
use time::OffsetDateTime;

use crate::encoding::date::truncate_to_micros;
use crate::encoding::formatter::{ChainedFormatter, ClaimsFormatter};
use crate::encoding::{Encoder, JoseEncoder};
use crate::prelude::*;

/// Fluent API accumulating headers and claims before signing them into a [Plain] token
pub trait Builder: Sized {
    /// Appends audiences to `aud`, skipping the ones already there
    fn permitted_for<I, S>(self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>;

    /// Sets `exp`
    fn expires_at(self, at: OffsetDateTime) -> Self;

    /// Sets `iat`
    fn issued_at(self, at: OffsetDateTime) -> Self;

    /// Sets `nbf`
    fn can_only_be_used_after(self, at: OffsetDateTime) -> Self;

    /// Sets `iss`
    fn issued_by(self, issuer: impl Into<String>) -> Self;

    /// Sets `sub`
    fn related_to(self, subject: impl Into<String>) -> Self;

    /// Sets `jti`
    fn identified_by(self, id: impl Into<String>) -> Self;

    /// Sets any header. `alg` gets overwritten when signing.
    fn with_header(self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self;

    /// Sets a private claim
    ///
    /// # Errors
    /// [RustyJwtError::RegisteredClaimGiven] when `name` is a registered claim, those have their
    /// own method
    fn with_claim(self, name: impl Into<String>, value: impl Into<ClaimValue>) -> RustyJwtResult<Self>;

    /// Encodes headers and claims then signs them
    ///
    /// # Errors
    /// When a value cannot be encoded or the signer refuses the key
    fn get_token(self, signer: &dyn Signer, key: &dyn Key) -> RustyJwtResult<Plain>;
}

/// Default [Builder]
#[derive(Clone)]
pub struct TokenBuilder {
    encoder: Arc<dyn Encoder>,
    formatter: Arc<dyn ClaimsFormatter>,
    headers: IndexMap<String, ClaimValue>,
    claims: IndexMap<String, ClaimValue>,
}

impl TokenBuilder {
    /// Builder encoding with `encoder` and shaping claims with `formatter`
    pub fn new(encoder: Arc<dyn Encoder>, formatter: Arc<dyn ClaimsFormatter>) -> Self {
        Self {
            encoder,
            formatter,
            headers: IndexMap::from([("typ".to_string(), ClaimValue::from("JWT"))]),
            claims: IndexMap::new(),
        }
    }

    fn set_registered(mut self, name: &str, value: impl Into<ClaimValue>) -> Self {
        self.claims.insert(name.to_string(), value.into());
        self
    }

    fn encode(&self, data: IndexMap<String, ClaimValue>, part: &str) -> RustyJwtResult<String> {
        if data.contains_key("") {
            return Err(RustyJwtError::CannotEncodeContent(format!("{part} cannot have an empty name")));
        }
        let json = self.encoder.json_encode(&ClaimValue::Map(data))?;
        Ok(self.encoder.base64_url_encode(json.as_bytes()))
    }
}

impl Default for TokenBuilder {
    fn default() -> Self {
        Self::new(Arc::new(JoseEncoder), Arc::new(ChainedFormatter::default()))
    }
}

impl std::fmt::Debug for TokenBuilder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenBuilder")
            .field("formatter", &self.formatter)
            .field("headers", &self.headers)
            .field("claims", &self.claims)
            .finish_non_exhaustive()
    }
}

impl Builder for TokenBuilder {
    fn permitted_for<I, S>(mut self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let aud = self
            .claims
            .entry(RegisteredClaims::AUDIENCE.to_string())
            .or_insert_with(|| ClaimValue::List(vec![]));
        if !matches!(aud, ClaimValue::List(_)) {
            let single = std::mem::replace(aud, ClaimValue::Null);
            *aud = ClaimValue::List(vec![single]);
        }
        if let ClaimValue::List(current) = aud {
            for audience in audiences {
                let audience = ClaimValue::String(audience.into());
                if !current.contains(&audience) {
                    current.push(audience);
                }
            }
        }
        self
    }

    fn expires_at(self, at: OffsetDateTime) -> Self {
        self.set_registered(RegisteredClaims::EXPIRATION_TIME, truncate_to_micros(at))
    }

    fn issued_at(self, at: OffsetDateTime) -> Self {
        self.set_registered(RegisteredClaims::ISSUED_AT, truncate_to_micros(at))
    }

    fn can_only_be_used_after(self, at: OffsetDateTime) -> Self {
        self.set_registered(RegisteredClaims::NOT_BEFORE, truncate_to_micros(at))
    }

    fn issued_by(self, issuer: impl Into<String>) -> Self {
        self.set_registered(RegisteredClaims::ISSUER, issuer.into())
    }

    fn related_to(self, subject: impl Into<String>) -> Self {
        self.set_registered(RegisteredClaims::SUBJECT, subject.into())
    }

    fn identified_by(self, id: impl Into<String>) -> Self {
        self.set_registered(RegisteredClaims::ID, id.into())
    }

    fn with_header(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.headers.insert(name.into(), value.into());
        self
    }

    fn with_claim(mut self, name: impl Into<String>, value: impl Into<ClaimValue>) -> RustyJwtResult<Self> {
        let name = name.into();
        if RegisteredClaims::contains(&name) {
            return Err(RustyJwtError::RegisteredClaimGiven(name));
        }
        self.claims.insert(name, value.into());
        Ok(self)
    }

    fn get_token(self, signer: &dyn Signer, key: &dyn Key) -> RustyJwtResult<Plain> {
        let mut headers = self.headers.clone();
        headers.insert("alg".to_string(), signer.algorithm_id().into());
        let mut wire_claims = self.claims.clone();
        self.formatter.format_claims(&mut wire_claims);

        let encoded_headers = self.encode(headers.clone(), "headers")?;
        let encoded_claims = self.encode(wire_claims, "claims")?;

        let hash = signer.sign(format!("{encoded_headers}.{encoded_claims}").as_bytes(), key)?;
        let encoded_signature = self.encoder.base64_url_encode(&hash);
        tracing::trace!(alg = signer.algorithm_id(), claims = self.claims.len(), "token issued");

        Ok(Plain::new(
            DataSet::new(headers, encoded_headers),
            DataSet::new(self.claims, encoded_claims),
            Signature::new(hash, encoded_signature),
        ))
    }
}
