use super::ensure;
use crate::prelude::*;

/// `jti` equals the given identifier
#[derive(Debug, Clone)]
pub struct IdentifiedBy(String);

impl IdentifiedBy {
    /// Requires `jti` to be `id`
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }
}

impl Constraint for IdentifiedBy {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        ensure(
            token.is_identified_by(&self.0),
            "The token is not identified with the expected ID",
            "IdentifiedBy",
        )
    }
}

#[cfg(test)]
mod tests {
    use super::super::violation_message;
    use super::*;

    #[test]
    fn should_match_identifier() {
        let token = TokenBuilder::default()
            .identified_by("1")
            .get_token(&Unsecured, &InMemory::empty())
            .unwrap();
        IdentifiedBy::new("1").assert(&token).unwrap();
        assert_eq!(
            violation_message(IdentifiedBy::new("2").assert(&token)),
            "The token is not identified with the expected ID"
        );
    }
}
