//! Token signature

use std::fmt::{Display, Formatter};

/// Raw signature bytes of a token alongside their base64url encoding
///
/// The empty signature stands for unsecured tokens (`alg: none`).
#[derive(Debug, Clone, Default, Eq, PartialEq)]
pub struct Signature {
    hash: Vec<u8>,
    encoded: String,
}

impl Signature {
    /// Pairs the bytes a signer produced with their encoded form
    pub fn new(hash: Vec<u8>, encoded: impl Into<String>) -> Self {
        Self {
            hash,
            encoded: encoded.into(),
        }
    }

    /// Signature of an unsecured token
    pub fn empty() -> Self {
        Self::default()
    }

    /// Raw signature bytes
    pub fn hash(&self) -> &[u8] {
        &self.hash
    }

    /// Whether this is the signature of an unsecured token
    pub fn is_empty(&self) -> bool {
        self.hash.is_empty() && self.encoded.is_empty()
    }
}

impl Display for Signature {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encoded)
    }
}
