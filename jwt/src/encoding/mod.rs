//! base64url and JSON primitives tokens are serialized with

use base64::Engine;
use base64::alphabet::URL_SAFE;
use base64::engine::general_purpose::{GeneralPurpose, GeneralPurposeConfig};
use base64::engine::DecodePaddingMode;

use crate::prelude::*;

pub mod date;
pub mod formatter;

/// Turns values into the text and bytes found in a compact serialization
pub trait Encoder: Send + Sync {
    /// Encodes into JSON, keeping maps in insertion order
    ///
    /// # Errors
    /// When the value has no JSON representation
    fn json_encode(&self, data: &ClaimValue) -> RustyJwtResult<String>;

    /// Encodes according to [RFC 4648 Section 5][1], without padding
    ///
    /// [1]: https://www.rfc-editor.org/rfc/rfc4648#section-5
    fn base64_url_encode(&self, data: &[u8]) -> String;
}

/// Reverses what an [Encoder] does
pub trait Decoder: Send + Sync {
    /// Decodes JSON text
    ///
    /// # Errors
    /// When the input is not JSON
    fn json_decode(&self, json: &[u8]) -> RustyJwtResult<ClaimValue>;

    /// Decodes base64url, padded or not
    ///
    /// # Errors
    /// When the input contains characters out of the base64url alphabet or is wrongly padded
    fn base64_url_decode(&self, data: &str) -> RustyJwtResult<Vec<u8>>;
}

/// Default [Encoder] and [Decoder] backed by `serde_json` and `base64`
#[derive(Debug, Default, Copy, Clone)]
pub struct JoseEncoder;

impl JoseEncoder {
    const BASE64_URL: GeneralPurpose = GeneralPurpose::new(
        &URL_SAFE,
        GeneralPurposeConfig::new()
            .with_encode_padding(false)
            .with_decode_padding_mode(DecodePaddingMode::Indifferent),
    );
}

impl Encoder for JoseEncoder {
    fn json_encode(&self, data: &ClaimValue) -> RustyJwtResult<String> {
        serde_json::to_string(&data.to_json()?).map_err(|e| RustyJwtError::CannotEncodeContent(e.to_string()))
    }

    fn base64_url_encode(&self, data: &[u8]) -> String {
        Self::BASE64_URL.encode(data)
    }
}

impl Decoder for JoseEncoder {
    fn json_decode(&self, json: &[u8]) -> RustyJwtResult<ClaimValue> {
        let value = serde_json::from_slice::<serde_json::Value>(json).map_err(RustyJwtError::CannotDecodeContent)?;
        Ok(value.into())
    }

    fn base64_url_decode(&self, data: &str) -> RustyJwtResult<Vec<u8>> {
        Ok(Self::BASE64_URL.decode(data)?)
    }
}

#[cfg(test)]
mod tests {
    use indexmap::IndexMap;

    use super::*;

    #[test]
    fn should_encode_base64_url_without_padding() {
        // bytes chosen to hit both url-safe characters
        assert_eq!(JoseEncoder.base64_url_encode(&[0xfb, 0xff]), "-_8");
        assert_eq!(JoseEncoder.base64_url_encode(b"testing"), "dGVzdGluZw");
        assert_eq!(JoseEncoder.base64_url_encode(b""), "");
    }

    #[test]
    fn should_decode_base64_url_padded_or_not() {
        assert_eq!(JoseEncoder.base64_url_decode("dGVzdGluZw").unwrap(), b"testing");
        assert_eq!(JoseEncoder.base64_url_decode("dGVzdGluZw==").unwrap(), b"testing");
        assert_eq!(JoseEncoder.base64_url_decode("-_8").unwrap(), vec![0xfb, 0xff]);
    }

    #[test]
    fn should_fail_decoding_out_of_alphabet() {
        for invalid in ["dGVz+GluZw", "dGVz/GluZw", "dGVz dGluZw", "dGVzdGluZw=a", "ab$c"] {
            let result = JoseEncoder.base64_url_decode(invalid);
            assert!(matches!(result.unwrap_err(), RustyJwtError::InvalidBase64Url(_)), "{invalid}");
        }
    }

    #[test]
    fn should_encode_json_in_insertion_order() {
        let data = IndexMap::from([
            ("typ".to_string(), ClaimValue::from("JWT")),
            ("alg".to_string(), ClaimValue::from("HS256")),
            ("url".to_string(), ClaimValue::from("http://a.b/c")),
        ]);
        let json = JoseEncoder.json_encode(&data.into()).unwrap();
        assert_eq!(json, r#"{"typ":"JWT","alg":"HS256","url":"http://a.b/c"}"#);
    }

    #[test]
    fn should_keep_unicode_unescaped() {
        let json = JoseEncoder.json_encode(&"ça marche".into()).unwrap();
        assert_eq!(json, "\"ça marche\"");
    }

    #[test]
    fn should_fail_encoding_non_finite_numbers() {
        let result = JoseEncoder.json_encode(&ClaimValue::Float(f64::NAN));
        assert!(matches!(result.unwrap_err(), RustyJwtError::CannotEncodeContent(_)));
    }

    #[test]
    fn should_fail_decoding_malformed_json() {
        let result = JoseEncoder.json_decode(b"{\"typ\":");
        assert!(matches!(result.unwrap_err(), RustyJwtError::CannotDecodeContent(_)));
    }

    #[test]
    fn should_decode_json() {
        let value = JoseEncoder.json_decode(br#"{"a":1,"b":"c"}"#).unwrap();
        let map = value.as_map().unwrap();
        assert_eq!(map["a"], ClaimValue::Integer(1));
        assert_eq!(map["b"], ClaimValue::from("c"));
    }
}
