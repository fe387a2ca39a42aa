use super::ensure;
use crate::prelude::*;

/// `iss` is one of the given issuers
#[derive(Debug, Clone)]
pub struct IssuedBy(Vec<String>);

impl IssuedBy {
    /// Accepts any of `issuers`
    pub fn new<I, S>(issuers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(issuers.into_iter().map(Into::into).collect())
    }
}

impl Constraint for IssuedBy {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        ensure(
            token.has_been_issued_by(self.0.as_slice()),
            "The token was not issued by the given issuers",
            "IssuedBy",
        )
    }
}
