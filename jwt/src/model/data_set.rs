//! Headers or claims of a token with the segment they were encoded to

use std::fmt::{Display, Formatter};

use indexmap::IndexMap;

use crate::prelude::*;

/// Immutable headers or claims of a token alongside the segment they were encoded into
///
/// Dereferences to the underlying ordered map for lookups.
#[derive(Debug, Clone, PartialEq, derive_more::Deref)]
pub struct DataSet {
    #[deref]
    data: IndexMap<String, ClaimValue>,
    encoded: String,
}

impl DataSet {
    /// Pairs decoded entries with the base64url segment they come from
    pub fn new(data: IndexMap<String, ClaimValue>, encoded: impl Into<String>) -> Self {
        Self {
            data,
            encoded: encoded.into(),
        }
    }

    /// Whether an entry named `name` is present, even if it holds `null`
    pub fn has(&self, name: &str) -> bool {
        self.data.contains_key(name)
    }

    /// Every entry in insertion order
    pub fn all(&self) -> &IndexMap<String, ClaimValue> {
        &self.data
    }

    /// Reads every entry into `T`, e.g. a struct describing private claims
    ///
    /// Date claims are seen as numbers, the way they were encoded.
    ///
    /// # Errors
    /// When the entries do not fit `T`
    pub fn deserialize_into<T: serde::de::DeserializeOwned>(&self) -> RustyJwtResult<T> {
        let json = ClaimValue::Map(self.data.clone()).to_json()?;
        serde_json::from_value(json).map_err(RustyJwtError::CannotDecodeContent)
    }

    /// String value of entry `name`, if it is a string
    pub fn get_str(&self, name: &str) -> Option<&str> {
        self.data.get(name).and_then(ClaimValue::as_str)
    }
}

impl Display for DataSet {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.encoded)
    }
}
