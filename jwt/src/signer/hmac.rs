//! HMAC with SHA-2 as defined in [RFC 7518 Section 3.2][1]
//!
//! Any non-empty secret is accepted so existing short secrets keep working. Verification compares
//! in constant time.
//!
//! [1]: https://www.rfc-editor.org/rfc/rfc7518#section-3.2

use hmac::digest::KeyInit;
use hmac::{Hmac, Mac};
use sha2::{Sha256, Sha384, Sha512};

use crate::prelude::*;

/// HMAC using SHA-256
#[derive(Debug, Default, Copy, Clone)]
pub struct HmacSha256;

/// HMAC using SHA-384
#[derive(Debug, Default, Copy, Clone)]
pub struct HmacSha384;

/// HMAC using SHA-512
#[derive(Debug, Default, Copy, Clone)]
pub struct HmacSha512;

impl Signer for HmacSha256 {
    fn algorithm_id(&self) -> &'static str {
        "HS256"
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        Ok(mac::<Hmac<Sha256>>(payload, key)?.finalize().into_bytes().to_vec())
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        Ok(mac::<Hmac<Sha256>>(payload, key)?.verify_slice(expected).is_ok())
    }
}

impl Signer for HmacSha384 {
    fn algorithm_id(&self) -> &'static str {
        "HS384"
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        Ok(mac::<Hmac<Sha384>>(payload, key)?.finalize().into_bytes().to_vec())
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        Ok(mac::<Hmac<Sha384>>(payload, key)?.verify_slice(expected).is_ok())
    }
}

impl Signer for HmacSha512 {
    fn algorithm_id(&self) -> &'static str {
        "HS512"
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        Ok(mac::<Hmac<Sha512>>(payload, key)?.finalize().into_bytes().to_vec())
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        Ok(mac::<Hmac<Sha512>>(payload, key)?.verify_slice(expected).is_ok())
    }
}

fn mac<M: Mac + KeyInit>(payload: &[u8], key: &dyn Key) -> RustyJwtResult<M> {
    if key.contents().is_empty() {
        return Err(InvalidKeyProvided::CannotBeEmpty.into());
    }
    let mut mac =
        <M as KeyInit>::new_from_slice(key.contents()).map_err(|e| InvalidKeyProvided::CannotBeParsed(e.to_string()))?;
    mac.update(payload);
    Ok(mac)
}
