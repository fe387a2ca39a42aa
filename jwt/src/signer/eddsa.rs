//! EdDSA over Ed25519

use ed25519_dalek::Signer as _;

use crate::prelude::*;

/// EdDSA over Ed25519 as defined in [RFC 8037][1]
///
/// Keys are raw bytes rather than PEM: a 32 bytes seed or a 64 bytes `seed || public` keypair to
/// sign, a 32 bytes public key to verify.
///
/// [1]: https://www.rfc-editor.org/rfc/rfc8037
#[derive(Debug, Default, Copy, Clone)]
pub struct Eddsa;

impl Eddsa {
    fn signing_key(key: &dyn Key) -> RustyJwtResult<ed25519_dalek::SigningKey> {
        let contents = key.contents();
        if contents.is_empty() {
            return Err(InvalidKeyProvided::CannotBeEmpty.into());
        }
        if let Ok(seed) = <&ed25519_dalek::SecretKey>::try_from(contents) {
            return Ok(ed25519_dalek::SigningKey::from_bytes(seed));
        }
        let keypair = <&[u8; ed25519_dalek::KEYPAIR_LENGTH]>::try_from(contents).map_err(|_| {
            InvalidKeyProvided::CannotBeParsed(format!(
                "an Ed25519 private key is 32 or 64 bytes long, got {}",
                contents.len()
            ))
        })?;
        ed25519_dalek::SigningKey::from_keypair_bytes(keypair)
            .map_err(|e| InvalidKeyProvided::CannotBeParsed(e.to_string()).into())
    }

    fn verifying_key(key: &dyn Key) -> RustyJwtResult<ed25519_dalek::VerifyingKey> {
        let contents = key.contents();
        if contents.is_empty() {
            return Err(InvalidKeyProvided::CannotBeEmpty.into());
        }
        let bytes = <&[u8; ed25519_dalek::PUBLIC_KEY_LENGTH]>::try_from(contents).map_err(|_| {
            InvalidKeyProvided::CannotBeParsed(format!(
                "an Ed25519 public key is 32 bytes long, got {}",
                contents.len()
            ))
        })?;
        ed25519_dalek::VerifyingKey::from_bytes(bytes)
            .map_err(|e| InvalidKeyProvided::CannotBeParsed(e.to_string()).into())
    }
}

impl Signer for Eddsa {
    fn algorithm_id(&self) -> &'static str {
        "EdDSA"
    }

    fn sign(&self, payload: &[u8], key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        Ok(Self::signing_key(key)?.sign(payload).to_bytes().to_vec())
    }

    fn verify(&self, expected: &[u8], payload: &[u8], key: &dyn Key) -> RustyJwtResult<bool> {
        let verifying_key = Self::verifying_key(key)?;
        let Ok(signature) = ed25519_dalek::Signature::from_slice(expected) else {
            return Ok(false);
        };
        Ok(verifying_key.verify_strict(payload, &signature).is_ok())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // RFC 8032 section 7.1, tests 1 and 2
    const SEED: &str = "nWGxne/9WmC6hEr0kuwsxERJxWl7MmkZcDusAxyuf2A=";
    const PUBLIC: &str = "11qYAYKxCrfVS/7TyWQHOg7hcvPapiMlrwIaaPcHURo=";
    const OTHER_PUBLIC: &str = "PUAXw+hDiVqStwqnTRt+vJyYLM8uxJaMwM1V8Sr0Zgw=";

    fn key(b64: &str) -> InMemory {
        InMemory::base64_encoded(b64).unwrap()
    }

    #[test]
    fn should_match_rfc_8032_empty_message_vector() {
        let signature = Eddsa.sign(b"", &key(SEED)).unwrap();
        let hex: String = signature.iter().map(|b| format!("{b:02x}")).collect();
        assert_eq!(
            hex,
            "e5564300c360ac729086e2cc806e828a84877f1eb8e5d974d873e065224901555fb8821590a33bacc61e39701cf9b46bd25bf5f0595bbe24655141438e7a100b"
        );
    }

    #[test]
    fn should_sign_and_verify() {
        let signature = Eddsa.sign(b"payload", &key(SEED)).unwrap();
        assert_eq!(signature.len(), 64);
        assert!(Eddsa.verify(&signature, b"payload", &key(PUBLIC)).unwrap());
        assert!(!Eddsa.verify(&signature, b"tampered", &key(PUBLIC)).unwrap());
        assert!(!Eddsa.verify(&signature, b"payload", &key(OTHER_PUBLIC)).unwrap());
        assert!(!Eddsa.verify(&signature[..10], b"payload", &key(PUBLIC)).unwrap());
    }

    #[test]
    fn should_accept_keypair_bytes() {
        use base64::Engine as _;

        let seed = key(SEED);
        let mut bytes = seed.contents().to_vec();
        bytes.extend_from_slice(key(PUBLIC).contents());
        let keypair = InMemory::base64_encoded(&base64::prelude::BASE64_STANDARD.encode(bytes)).unwrap();
        assert_eq!(
            Eddsa.sign(b"payload", &keypair).unwrap(),
            Eddsa.sign(b"payload", &seed).unwrap()
        );
    }

    #[test]
    fn should_refuse_wrong_key_length() {
        let result = Eddsa.sign(b"payload", &InMemory::plain_text("too short").unwrap());
        assert!(matches!(
            result.unwrap_err(),
            RustyJwtError::InvalidKeyProvided(InvalidKeyProvided::CannotBeParsed(_))
        ));
        let result = Eddsa.verify(&[0; 64], b"payload", &InMemory::empty());
        assert!(matches!(
            result.unwrap_err(),
            RustyJwtError::InvalidKeyProvided(InvalidKeyProvided::CannotBeEmpty)
        ));
    }
}
