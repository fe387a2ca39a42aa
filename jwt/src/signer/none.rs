//! Unsecured tokens

use crate::prelude::*;

/// Unsecured JWS (`alg: none`) as defined in [RFC 7518 Section 3.6][1]
///
/// [1]: https://www.rfc-editor.org/rfc/rfc7518#section-3.6
#[derive(Debug, Default, Copy, Clone)]
pub struct Unsecured;

impl Signer for Unsecured {
    fn algorithm_id(&self) -> &'static str {
        "none"
    }

    fn sign(&self, _payload: &[u8], _key: &dyn Key) -> RustyJwtResult<Vec<u8>> {
        Ok(vec![])
    }

    fn verify(&self, expected: &[u8], _payload: &[u8], _key: &dyn Key) -> RustyJwtResult<bool> {
        Ok(expected.is_empty())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_only_accept_empty_signatures() {
        let key = InMemory::empty();
        let signature = Unsecured.sign(b"payload", &key).unwrap();
        assert!(signature.is_empty());
        assert!(Unsecured.verify(&signature, b"payload", &key).unwrap());
        assert!(!Unsecured.verify(b"forged", b"payload", &key).unwrap());
    }
}
