#![allow(missing_docs)]

pub use rstest::*;
pub use rstest_reuse::{self, *};

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use crate::prelude::*;

const RSA_PRIVATE: &str = include_str!("../../tests/resources/rsa_private.pem");
const RSA_PUBLIC: &str = include_str!("../../tests/resources/rsa_public.pem");
const RSA_OTHER_PUBLIC: &str = include_str!("../../tests/resources/rsa_other_public.pem");
const P256_PRIVATE: &str = include_str!("../../tests/resources/p256_private.pem");
const P256_PUBLIC: &str = include_str!("../../tests/resources/p256_public.pem");
const P256_OTHER_PUBLIC: &str = include_str!("../../tests/resources/p256_other_public.pem");
const P384_PRIVATE: &str = include_str!("../../tests/resources/p384_private.pem");
const P384_PUBLIC: &str = include_str!("../../tests/resources/p384_public.pem");
const P384_OTHER_PUBLIC: &str = include_str!("../../tests/resources/p384_other_public.pem");
// RFC 8032 section 7.1, tests 1 and 2
const ED25519_SEED: &str = "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A=";
const ED25519_PUBLIC: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";
const ED25519_OTHER_PUBLIC: &str = "PUAXw+hDiVqStwqnTRt+vJyYLM8uxJaMwM1V8Sr0Zgw=";

#[template]
#[export]
#[rstest]
#[case::hs256($crate::test_utils::SignerCase::hs256())]
#[case::hs384($crate::test_utils::SignerCase::hs384())]
#[case::hs512($crate::test_utils::SignerCase::hs512())]
#[case::rs256($crate::test_utils::SignerCase::rs256())]
#[case::rs512($crate::test_utils::SignerCase::rs512())]
#[case::es256($crate::test_utils::SignerCase::es256())]
#[case::es384($crate::test_utils::SignerCase::es384())]
#[case::eddsa($crate::test_utils::SignerCase::eddsa())]
pub fn all_signers(#[case] case: SignerCase) {}

/// A signer with a key pair to sign and verify, and an unrelated key which must not verify
#[derive(Clone)]
pub struct SignerCase {
    pub signer: Arc<dyn Signer>,
    pub signing_key: InMemory,
    pub verification_key: InMemory,
    pub foreign_verification_key: InMemory,
}

impl SignerCase {
    fn symmetric(signer: impl Signer + 'static, secret: &str) -> Self {
        let key = InMemory::plain_text(secret).unwrap();
        Self {
            signer: Arc::new(signer),
            signing_key: key.clone(),
            verification_key: key,
            foreign_verification_key: InMemory::plain_text("a completely different secret").unwrap(),
        }
    }

    fn pem(signer: impl Signer + 'static, private: &str, public: &str, other_public: &str) -> Self {
        Self {
            signer: Arc::new(signer),
            signing_key: InMemory::plain_text(private).unwrap(),
            verification_key: InMemory::plain_text(public).unwrap(),
            foreign_verification_key: InMemory::plain_text(other_public).unwrap(),
        }
    }

    pub fn hs256() -> Self {
        Self::symmetric(HmacSha256, "testing")
    }

    pub fn hs384() -> Self {
        Self::symmetric(HmacSha384, "a secret long enough for sha-384 hmac")
    }

    pub fn hs512() -> Self {
        Self::symmetric(HmacSha512, "a secret long enough for sha-512 hmac, or close to it")
    }

    pub fn rs256() -> Self {
        Self::pem(RsaSha256, RSA_PRIVATE, RSA_PUBLIC, RSA_OTHER_PUBLIC)
    }

    pub fn rs512() -> Self {
        Self::pem(RsaSha512, RSA_PRIVATE, RSA_PUBLIC, RSA_OTHER_PUBLIC)
    }

    pub fn es256() -> Self {
        Self::pem(EcdsaSha256, P256_PRIVATE, P256_PUBLIC, P256_OTHER_PUBLIC)
    }

    pub fn es384() -> Self {
        Self::pem(EcdsaSha384, P384_PRIVATE, P384_PUBLIC, P384_OTHER_PUBLIC)
    }

    pub fn eddsa() -> Self {
        Self {
            signer: Arc::new(Eddsa),
            signing_key: InMemory::base64_encoded(ED25519_SEED).unwrap(),
            verification_key: InMemory::base64_encoded(ED25519_PUBLIC).unwrap(),
            foreign_verification_key: InMemory::base64_encoded(ED25519_OTHER_PUBLIC).unwrap(),
        }
    }

    /// Signs what `builder` holds
    pub fn token(&self, builder: TokenBuilder) -> Plain {
        builder.get_token(self.signer.as_ref(), &self.signing_key).unwrap()
    }

    pub fn configuration(&self) -> Configuration {
        Configuration::for_asymmetric_signer(
            self.signer.clone(),
            self.signing_key.clone(),
            self.verification_key.clone(),
        )
    }
}

impl std::fmt::Debug for SignerCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "SignerCase({})", self.signer.algorithm_id())
    }
}

/// Claims any algorithm and counts how many times it was asked to verify. Never verifies.
pub struct SpySigner {
    alg: &'static str,
    verifications: AtomicUsize,
}

impl SpySigner {
    pub fn new(alg: &'static str) -> Arc<Self> {
        Arc::new(Self {
            alg,
            verifications: AtomicUsize::new(0),
        })
    }

    pub fn verifications(&self) -> usize {
        self.verifications.load(Ordering::SeqCst)
    }
}

impl Signer for SpySigner {
    fn algorithm_id(&self) -> &'static str {
        self.alg
    }

    fn sign(&self, _payload: &[u8], _key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        Ok(vec![0; 32])
    }

    fn verify(&self, _expected: &[u8], _payload: &[u8], _key: &dyn Key) -> RustyJwtResult<bool> {
        self.verifications.fetch_add(1, Ordering::SeqCst);
        Ok(false)
    }
}
