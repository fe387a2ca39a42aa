use super::ensure;
use crate::prelude::*;

/// `sub` equals the given subject
#[derive(Debug, Clone)]
pub struct RelatedTo(String);

impl RelatedTo {
    /// Requires `sub` to be `subject`
    pub fn new(subject: impl Into<String>) -> Self {
        Self(subject.into())
    }
}

impl Constraint for RelatedTo {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        ensure(
            token.is_related_to(&self.0),
            "The token is not related to the expected subject",
            "RelatedTo",
        )
    }
}
