//! RSASSA-PKCS1-v1_5 as defined in [RFC 7518 Section 3.3][1]
//!
//! Private keys are read from PKCS#8 or PKCS#1 PEM, public keys from SPKI or PKCS#1 PEM. Moduli
//! below 2048 bits are refused.
//!
//! [1]: https://www.rfc-editor.org/rfc/rfc7518#section-3.3

use ::rsa::pkcs1::{DecodeRsaPrivateKey as _, DecodeRsaPublicKey as _};
use ::rsa::pkcs1v15::{Signature as RsaSignature, SigningKey, VerifyingKey};
use ::rsa::pkcs8::{DecodePrivateKey as _, DecodePublicKey as _};
use ::rsa::signature::{SignatureEncoding as _, Signer as _, Verifier as _};
use ::rsa::traits::PublicKeyParts as _;
use ::rsa::{RsaPrivateKey, RsaPublicKey};
use sha2::digest::const_oid::AssociatedOid;
use sha2::{Digest, Sha256, Sha384, Sha512};

use super::{pem_contents, unusable_pem};
use crate::prelude::*;

const KEY_TYPE: &str = "RSA";
const MIN_KEY_BITS: usize = 2048;

/// RSASSA-PKCS1-v1_5 using SHA-256
#[derive(Debug, Default, Copy, Clone)]
pub struct RsaSha256;

/// RSASSA-PKCS1-v1_5 using SHA-384
#[derive(Debug, Default, Copy, Clone)]
pub struct RsaSha384;

/// RSASSA-PKCS1-v1_5 using SHA-512
#[derive(Debug, Default, Copy, Clone)]
pub struct RsaSha512;

impl Signer for RsaSha256 {
    fn algorithm_id(&self) -> &'static str {
        "RS256"
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        sign::<Sha256>(payload, key)
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        verify::<Sha256>(expected, payload, key)
    }
}

impl Signer for RsaSha384 {
    fn algorithm_id(&self) -> &'static str {
        "RS384"
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        sign::<Sha384>(payload, key)
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        verify::<Sha384>(expected, payload, key)
    }
}

impl Signer for RsaSha512 {
    fn algorithm_id(&self) -> &'static str {
        "RS512"
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        sign::<Sha512>(payload, key)
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        verify::<Sha512>(expected, payload, key)
    }
}

fn sign<D: Digest + AssociatedOid>(payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
    let private_key = private_key(key)?;
    let signature = SigningKey::<D>::new(private_key)
        .try_sign(payload)
        .map_err(|e| RustyJwtError::SigningFailed(e.to_string()))?;
    Ok(signature.to_vec())
}

fn verify<D: Digest + AssociatedOid>(expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
    let public_key = public_key(key)?;
    let Ok(signature) = RsaSignature::try_from(expected) else {
        return Ok(false);
    };
    Ok(VerifyingKey::<D>::new(public_key).verify(payload, &signature).is_ok())
}

fn private_key(key: &dyn Key) -> RustyJwtResult<RsaPrivateKey> {
    let pem = pem_contents(key)?;
    let private_key = RsaPrivateKey::from_pkcs8_pem(pem)
        .or_else(|_| RsaPrivateKey::from_pkcs1_pem(pem))
        .map_err(|e| unusable_pem(pem, KEY_TYPE, e))?;
    ensure_length(private_key.size())?;
    Ok(private_key)
}

fn public_key(key: &dyn Key) -> RustyJwtResult<RsaPublicKey> {
    let pem = pem_contents(key)?;
    let public_key = RsaPublicKey::from_public_key_pem(pem)
        .or_else(|_| RsaPublicKey::from_pkcs1_pem(pem))
        .map_err(|e| unusable_pem(pem, KEY_TYPE, e))?;
    ensure_length(public_key.size())?;
    Ok(public_key)
}

fn ensure_length(modulus_bytes: usize) -> RustyJwtResult<()> {
    let actual = modulus_bytes * 8;
    if actual < MIN_KEY_BITS {
        return Err(InvalidKeyProvided::TooShort {
            expected: MIN_KEY_BITS,
            actual,
        }
        .into());
    }
    Ok(())
}
