use std::sync::Arc;

use indexmap::IndexMap;

use crate::encoding::date::convert_to_date;
use crate::encoding::{Decoder, JoseEncoder};
use crate::prelude::*;

/// Turns a compact serialization back into a [Plain] token
///
/// Only checks the structure: signature and claims are left to [crate::validation::Validator].
#[derive(Clone)]
pub struct Parser {
    decoder: Arc<dyn Decoder>,
}

impl Parser {
    /// Parser decoding with `decoder`
    pub fn new(decoder: Arc<dyn Decoder>) -> Self {
        Self { decoder }
    }

    /// Parses a JWS compact serialization
    ///
    /// An empty signature segment is only accepted for unsecured tokens, i.e. when the header has no
    /// `alg` or `alg` is `none`. Their signature segment is ignored altogether.
    ///
    /// # Errors
    /// * [InvalidTokenStructure] when segments are missing, are not JSON objects or date claims are
    ///   not numeric
    /// * [RustyJwtError::UnsupportedHeaderFound] for encrypted tokens (JWE)
    /// * [RustyJwtError::InvalidBase64Url] or [RustyJwtError::CannotDecodeContent] when a segment
    ///   cannot be decoded
    pub fn parse(&self, jwt: &str) -> RustyJwtResult<Plain> {
        let (encoded_headers, encoded_claims, encoded_signature) = split(jwt)?;

        let headers = self.parse_headers(encoded_headers)?;
        let claims = self.parse_claims(encoded_claims)?;
        let signature = self.parse_signature(&headers, encoded_signature)?;

        let token = Plain::new(
            DataSet::new(headers, encoded_headers),
            DataSet::new(claims, encoded_claims),
            signature,
        );
        tracing::trace!(alg = token.header_algorithm(), "token parsed");
        Ok(token)
    }

    fn parse_headers(&self, encoded: &str) -> RustyJwtResult<IndexMap<String, ClaimValue>> {
        let mut headers = self.decode_object(encoded, "headers")?;
        if headers.contains_key("enc") {
            return Err(RustyJwtError::UnsupportedHeaderFound);
        }
        headers.entry("typ".to_string()).or_insert_with(|| "JWT".into());
        Ok(headers)
    }

    fn parse_claims(&self, encoded: &str) -> RustyJwtResult<IndexMap<String, ClaimValue>> {
        let mut claims = self.decode_object(encoded, "claims")?;
        if let Some(aud) = claims.get_mut(RegisteredClaims::AUDIENCE) {
            if !matches!(aud, ClaimValue::List(_)) {
                let single = std::mem::replace(aud, ClaimValue::Null);
                *aud = ClaimValue::List(vec![single]);
            }
        }
        for name in RegisteredClaims::DATE_CLAIMS {
            if let Some(value) = claims.get_mut(name) {
                *value = ClaimValue::Timestamp(convert_to_date(value)?);
            }
        }
        Ok(claims)
    }

    fn parse_signature(&self, headers: &IndexMap<String, ClaimValue>, encoded: &str) -> RustyJwtResult<Signature> {
        let unsecured = match headers.get("alg") {
            None => true,
            Some(alg) => alg.as_str() == Some(Unsecured.algorithm_id()),
        };
        if unsecured {
            return Ok(Signature::empty());
        }
        if encoded.is_empty() {
            return Err(InvalidTokenStructure::MissingSignaturePart.into());
        }
        let hash = self.decoder.base64_url_decode(encoded)?;
        Ok(Signature::new(hash, encoded))
    }

    fn decode_object(&self, encoded: &str, part: &'static str) -> RustyJwtResult<IndexMap<String, ClaimValue>> {
        let json = self.decoder.base64_url_decode(encoded)?;
        match self.decoder.json_decode(&json)? {
            ClaimValue::Map(map) if !map.contains_key("") => Ok(map),
            _ => Err(InvalidTokenStructure::ArrayExpected(part).into()),
        }
    }
}

impl Default for Parser {
    fn default() -> Self {
        Self::new(Arc::new(JoseEncoder))
    }
}

impl std::fmt::Debug for Parser {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Parser").finish_non_exhaustive()
    }
}

fn split(jwt: &str) -> RustyJwtResult<(&str, &str, &str)> {
    let mut parts = jwt.split('.');
    let (Some(headers), Some(claims), Some(signature), None) = (parts.next(), parts.next(), parts.next(), parts.next())
    else {
        return Err(InvalidTokenStructure::MissingDots.into());
    };
    if headers.is_empty() {
        return Err(InvalidTokenStructure::MissingHeaderPart.into());
    }
    if claims.is_empty() {
        return Err(InvalidTokenStructure::MissingClaimsPart.into());
    }
    Ok((headers, claims, signature))
}
