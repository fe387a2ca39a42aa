//! Key material loaded in memory

use std::path::Path;

use base64::Engine;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::prelude::*;

/// Key material held in memory, wiped on drop
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct InMemory {
    contents: Vec<u8>,
    passphrase: String,
}

impl InMemory {
    /// Key for the unsecured signer, which never looks at it
    pub fn empty() -> Self {
        Self {
            contents: vec![],
            passphrase: String::new(),
        }
    }

    /// Key given as text, e.g. a shared secret or a PEM document
    ///
    /// # Errors
    /// When `contents` is empty
    pub fn plain_text(contents: impl Into<String>) -> RustyJwtResult<Self> {
        Self::from_bytes(contents.into().into_bytes())
    }

    /// Key given as raw bytes, e.g. a binary shared secret
    ///
    /// # Errors
    /// When `contents` is empty
    pub fn raw(contents: impl Into<Vec<u8>>) -> RustyJwtResult<Self> {
        Self::from_bytes(contents.into())
    }

    /// Key given as standard (padded) base64, e.g. a raw Ed25519 key
    ///
    /// # Errors
    /// When `contents` is not base64 or decodes to nothing
    pub fn base64_encoded(contents: &str) -> RustyJwtResult<Self> {
        let decoded = base64::prelude::BASE64_STANDARD.decode(contents)?;
        Self::from_bytes(decoded)
    }

    /// Key read from a file
    ///
    /// # Errors
    /// When the file cannot be read or is empty
    pub fn file(path: impl AsRef<Path>) -> RustyJwtResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read(path).map_err(|source| RustyJwtError::FileCouldNotBeRead {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_bytes(contents)
    }

    /// Attaches the passphrase protecting the contents
    pub fn with_passphrase(mut self, passphrase: impl Into<String>) -> Self {
        self.passphrase.zeroize();
        self.passphrase = passphrase.into();
        self
    }

    fn from_bytes(contents: Vec<u8>) -> RustyJwtResult<Self> {
        if contents.is_empty() {
            return Err(InvalidKeyProvided::CannotBeEmpty.into());
        }
        Ok(Self {
            contents,
            passphrase: String::new(),
        })
    }
}

impl Key for InMemory {
    fn contents(&self) -> &[u8] {
        &self.contents
    }

    fn passphrase(&self) -> &str {
        &self.passphrase
    }
}

impl std::fmt::Debug for InMemory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InMemory")
            .field("contents", &format_args!("[{} bytes]", self.contents.len()))
            .field("passphrase", &format_args!("[redacted]"))
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_keep_plain_text() {
        let key = InMemory::plain_text("testing").unwrap();
        assert_eq!(key.contents(), b"testing");
        assert_eq!(key.passphrase(), "");
        let key = key.with_passphrase("secret");
        assert_eq!(key.passphrase(), "secret");
    }

    #[test]
    fn should_keep_raw_bytes() {
        let key = InMemory::raw([0xff, 0x00, 0xfe]).unwrap();
        assert_eq!(key.contents(), &[0xff, 0x00, 0xfe]);
        assert!(InMemory::raw(Vec::<u8>::new()).is_err());
    }

    #[test]
    fn should_decode_base64() {
        let key = InMemory::base64_encoded("dGVzdGluZw==").unwrap();
        assert_eq!(key.contents(), b"testing");
        let result = InMemory::base64_encoded("dGVz!GluZw");
        assert!(matches!(result.unwrap_err(), RustyJwtError::InvalidBase64Url(_)));
    }

    #[test]
    fn should_reject_empty_contents() {
        let result = InMemory::plain_text("");
        assert!(matches!(
            result.unwrap_err(),
            RustyJwtError::InvalidKeyProvided(InvalidKeyProvided::CannotBeEmpty)
        ));
        let result = InMemory::base64_encoded("");
        assert!(matches!(
            result.unwrap_err(),
            RustyJwtError::InvalidKeyProvided(InvalidKeyProvided::CannotBeEmpty)
        ));
        assert!(InMemory::empty().contents().is_empty());
    }

    #[test]
    fn should_read_file() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/tests/resources/rsa_public.pem");
        let key = InMemory::file(path).unwrap();
        assert!(key.contents().starts_with(b"-----BEGIN PUBLIC KEY-----"));
    }

    #[test]
    fn should_fail_reading_missing_file() {
        let error = InMemory::file("/this/path/does/not/exist.pem").unwrap_err();
        assert_eq!(
            error.to_string(),
            "The path \"/this/path/does/not/exist.pem\" does not contain a valid key file"
        );
        assert!(matches!(error, RustyJwtError::FileCouldNotBeRead { .. }));
    }

    #[test]
    fn debug_should_not_leak_contents() {
        let key = InMemory::plain_text("super-secret").unwrap();
        let debug = format!("{key:?}");
        assert!(!debug.contains("super-secret"));
        assert!(debug.contains("12 bytes"));
    }
}
