use super::violation;
use crate::prelude::*;

/// The token carries a private claim, whatever its value
#[derive(Debug, Clone)]
pub struct HasClaim(String);

impl HasClaim {
    /// Requires claim `name`
    ///
    /// # Errors
    /// [RustyJwtError::CannotValidateARegisteredClaim] when `name` is a registered claim
    pub fn new(name: impl Into<String>) -> RustyJwtResult<Self> {
        Ok(Self(private_claim(name)?))
    }
}

impl Constraint for HasClaim {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        if !token.claims().has(&self.0) {
            return violation(missing(&self.0), "HasClaim");
        }
        Ok(())
    }
}

/// The token carries a private claim holding exactly the given value
#[derive(Debug, Clone)]
pub struct HasClaimWithValue {
    name: String,
    expected: ClaimValue,
}

impl HasClaimWithValue {
    /// Requires claim `name` to equal `expected`
    ///
    /// # Errors
    /// [RustyJwtError::CannotValidateARegisteredClaim] when `name` is a registered claim
    pub fn new(name: impl Into<String>, expected: impl Into<ClaimValue>) -> RustyJwtResult<Self> {
        Ok(Self {
            name: private_claim(name)?,
            expected: expected.into(),
        })
    }
}

impl Constraint for HasClaimWithValue {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        const NAME: &str = "HasClaimWithValue";
        match token.claims().get(&self.name) {
            None => violation(missing(&self.name), NAME),
            Some(actual) if actual != &self.expected => violation(
                format!("The claim \"{}\" does not have the expected value", self.name),
                NAME,
            ),
            Some(_) => Ok(()),
        }
    }
}

fn private_claim(name: impl Into<String>) -> RustyJwtResult<String> {
    let name = name.into();
    if RegisteredClaims::contains(&name) {
        return Err(RustyJwtError::CannotValidateARegisteredClaim(name));
    }
    Ok(name)
}

fn missing(name: &str) -> String {
    format!("The token does not have the claim \"{name}\"")
}
