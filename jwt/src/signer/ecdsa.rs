//! ECDSA as defined in [RFC 7518 Section 3.4][1]
//!
//! Tokens carry the fixed-length `r || s` form of the signature. Crypto libraries outside of JOSE
//! usually speak ASN.1 DER instead, so each signer also converts between both forms.
//!
//! Private keys are read from PKCS#8 or SEC1 PEM, public keys from SPKI PEM.
//!
//! [1]: https://www.rfc-editor.org/rfc/rfc7518#section-3.4

use p256::pkcs8::{DecodePrivateKey as _, DecodePublicKey as _};
use signature::{Signer as _, Verifier as _};

use super::{pem_contents, unusable_pem};
use crate::prelude::*;

macro_rules! ecdsa_signer {
    ($(#[$doc:meta])* $name:ident, $curve:ident, $alg:literal, $key_type:literal, $point_len:literal) => {
        $(#[$doc])*
        #[derive(Debug, Default, Copy, Clone)]
        pub struct $name;

        impl $name {
            /// Length in bytes of `r` and of `s`
            pub const POINT_LENGTH: usize = $point_len;

            /// Converts an ASN.1 DER signature to the fixed-length `r || s` form used in tokens
            ///
            /// # Errors
            /// When `der` is not a valid DER encoded signature on this curve
            pub fn from_der(der: &[u8]) -> RustyJwtResult<Vec<u8>> {
                let signature = $curve::ecdsa::Signature::from_der(der)
                    .map_err(|e| RustyJwtError::ConversionFailed(e.to_string()))?;
                Ok(signature.to_bytes().to_vec())
            }

            /// Converts a fixed-length `r || s` signature to ASN.1 DER
            ///
            /// # Errors
            /// When `raw` is not `2 * POINT_LENGTH` bytes long or holds an invalid scalar
            pub fn to_der(raw: &[u8]) -> RustyJwtResult<Vec<u8>> {
                let signature = $curve::ecdsa::Signature::from_slice(raw)
                    .map_err(|e| RustyJwtError::ConversionFailed(e.to_string()))?;
                Ok(signature.to_der().as_bytes().to_vec())
            }

            fn signing_key(key: &dyn Key) -> RustyJwtResult<$curve::ecdsa::SigningKey> {
                let pem = pem_contents(key)?;
                $curve::ecdsa::SigningKey::from_pkcs8_pem(pem)
                    .or_else(|_| $curve::SecretKey::from_sec1_pem(pem).map($curve::ecdsa::SigningKey::from))
                    .map_err(|e| unusable_pem(pem, $key_type, e))
            }

            fn verifying_key(key: &dyn Key) -> RustyJwtResult<$curve::ecdsa::VerifyingKey> {
                let pem = pem_contents(key)?;
                $curve::ecdsa::VerifyingKey::from_public_key_pem(pem).map_err(|e| unusable_pem(pem, $key_type, e))
            }
        }

        impl Signer for $name {
            fn algorithm_id(&self) -> &'static str {
                $alg
            }

            fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
                let signature: $curve::ecdsa::Signature = Self::signing_key(key)?
                    .try_sign(payload)
                    .map_err(|e| RustyJwtError::SigningFailed(e.to_string()))?;
                Ok(signature.to_bytes().to_vec())
            }

            fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
                let verifying_key = Self::verifying_key(key)?;
                let Ok(signature) = $curve::ecdsa::Signature::from_slice(expected) else {
                    return Ok(false);
                };
                Ok(verifying_key.verify(payload, &signature).is_ok())
            }
        }
    };
}

ecdsa_signer!(
    /// ECDSA using P-256 and SHA-256
    EcdsaSha256,
    p256,
    "ES256",
    "EC P-256",
    32
);

ecdsa_signer!(
    /// ECDSA using P-384 and SHA-384
    EcdsaSha384,
    p384,
    "ES384",
    "EC P-384",
    48
);
