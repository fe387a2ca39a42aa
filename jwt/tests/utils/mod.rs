#![allow(dead_code)]

use std::sync::Arc;

use rusty_jwt::prelude::*;

pub const P256_PRIVATE: &str = include_str!("../resources/p256_private.pem");
pub const P256_PUBLIC: &str = include_str!("../resources/p256_public.pem");
pub const P384_PRIVATE: &str = include_str!("../resources/p384_private.pem");
pub const P384_PUBLIC: &str = include_str!("../resources/p384_public.pem");
pub const RSA_PRIVATE: &str = include_str!("../resources/rsa_private.pem");
pub const RSA_PUBLIC: &str = include_str!("../resources/rsa_public.pem");
pub const ED25519_SEED: &str = "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A=";
pub const ED25519_PUBLIC: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";

/// Signer alongside the key it signs with and the key it verifies with
pub struct Algorithm {
    pub signer: Arc<dyn Signer>,
    pub signing_key: InMemory,
    pub verification_key: InMemory,
}

impl Algorithm {
    pub fn symmetric(signer: impl Signer + 'static, secret: &str) -> Self {
        let key = InMemory::plain_text(secret).unwrap();
        Self {
            signer: Arc::new(signer),
            signing_key: key.clone(),
            verification_key: key,
        }
    }

    pub fn pem(signer: impl Signer + 'static, private: &str, public: &str) -> Self {
        Self {
            signer: Arc::new(signer),
            signing_key: InMemory::plain_text(private).unwrap(),
            verification_key: InMemory::plain_text(public).unwrap(),
        }
    }

    pub fn eddsa() -> Self {
        Self {
            signer: Arc::new(Eddsa),
            signing_key: InMemory::base64_encoded(ED25519_SEED).unwrap(),
            verification_key: InMemory::base64_encoded(ED25519_PUBLIC).unwrap(),
        }
    }

    pub fn unsecured() -> Self {
        Self {
            signer: Arc::new(Unsecured),
            signing_key: InMemory::empty(),
            verification_key: InMemory::empty(),
        }
    }

    pub fn sign(&self, builder: impl Builder) -> Plain {
        builder.get_token(self.signer.as_ref(), &self.signing_key).unwrap()
    }

    pub fn signed_with(&self) -> SignedWith {
        SignedWith::from_shared(self.signer.clone(), Arc::new(self.verification_key.clone()))
    }
}

impl std::fmt::Debug for Algorithm {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.signer.algorithm_id())
    }
}
