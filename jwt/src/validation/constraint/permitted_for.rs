use super::ensure;
use crate::prelude::*;

/// `aud` contains the given audience
#[derive(Debug, Clone)]
pub struct PermittedFor(String);

/// Former name of [PermittedFor]
pub type AllowedTo = PermittedFor;

impl PermittedFor {
    /// Requires `audience` to be in `aud`
    pub fn new(audience: impl Into<String>) -> Self {
        Self(audience.into())
    }
}

impl Constraint for PermittedFor {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        ensure(
            token.is_permitted_for(&self.0),
            "The token is not allowed to be used by this audience",
            "PermittedFor",
        )
    }
}
