//! Signature algorithms and the keys they consume

pub use self::ecdsa::{EcdsaSha256, EcdsaSha384};
pub use self::eddsa::Eddsa;
pub use self::hmac::{HmacSha256, HmacSha384, HmacSha512};
pub use self::key::InMemory;
pub use self::none::Unsecured;
pub use self::rsa::{RsaSha256, RsaSha384, RsaSha512};

use crate::prelude::*;

pub mod ecdsa;
pub mod eddsa;
pub mod hmac;
pub mod key;
pub mod none;
pub mod rsa;

/// A JWS algorithm as defined in [RFC 7518 Section 3][1]
///
/// [1]: https://www.rfc-editor.org/rfc/rfc7518#section-3
pub trait Signer: Send + Sync {
    /// Value of the `alg` header of tokens this signer produces
    fn algorithm_id(&self) -> &'static str;

    /// Signs `payload`
    ///
    /// # Errors
    /// When the key does not suit this algorithm or the primitive fails
    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>>;

    /// Whether `expected` is a signature of `payload` made with the counterpart of `key`
    ///
    /// # Errors
    /// When the key does not suit this algorithm
    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool>;
}

impl<S: Signer + ?Sized> Signer for std::sync::Arc<S> {
    fn algorithm_id(&self) -> &'static str {
        (**self).algorithm_id()
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        (**self).sign(payload, key)
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        (**self).verify(expected, payload, key)
    }
}

/// Key material handed over to a [Signer]
pub trait Key: Send + Sync {
    /// Raw key bytes: a secret, a PEM document or raw curve points depending on the algorithm
    fn contents(&self) -> &[u8];

    /// Passphrase protecting the contents, empty when there is none
    fn passphrase(&self) -> &str;
}

/// Key contents as a PEM document
fn pem_contents(key: &dyn Key) -> RustyJwtResult<&str> {
    if key.contents().is_empty() {
        return Err(InvalidKeyProvided::CannotBeEmpty.into());
    }
    core::str::from_utf8(key.contents())
        .map_err(|e| InvalidKeyProvided::CannotBeParsed(e.to_string()).into())
}

/// Names the family of a PEM key, used to explain why a signer refused it
fn key_type_of(pem: &str) -> Option<&'static str> {
    use ::rsa::pkcs1::{DecodeRsaPrivateKey as _, DecodeRsaPublicKey as _};
    use ::rsa::pkcs8::{DecodePrivateKey as _, DecodePublicKey as _};

    if ::rsa::RsaPrivateKey::from_pkcs8_pem(pem).is_ok()
        || ::rsa::RsaPrivateKey::from_pkcs1_pem(pem).is_ok()
        || ::rsa::RsaPublicKey::from_public_key_pem(pem).is_ok()
        || ::rsa::RsaPublicKey::from_pkcs1_pem(pem).is_ok()
    {
        return Some("RSA");
    }
    if p256::SecretKey::from_pkcs8_pem(pem).is_ok() || p256::PublicKey::from_public_key_pem(pem).is_ok() {
        return Some("EC P-256");
    }
    if p384::SecretKey::from_pkcs8_pem(pem).is_ok() || p384::PublicKey::from_public_key_pem(pem).is_ok() {
        return Some("EC P-384");
    }
    None
}

/// Error for a PEM key the signer could not read
fn unusable_pem(pem: &str, expected: &'static str, reason: impl ToString) -> RustyJwtError {
    match key_type_of(pem) {
        Some(actual) if actual != expected => InvalidKeyProvided::IncompatibleKeyType {
            expected,
            actual: actual.to_string(),
        }
        .into(),
        _ => InvalidKeyProvided::CannotBeParsed(reason.to_string()).into(),
    }
}
