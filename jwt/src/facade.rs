//! One-call issuing and parsing with sensible defaults

use time::{Duration, OffsetDateTime};

use crate::clock::{Clock, SystemClock};
use crate::prelude::*;

/// Parses a token and rejects it unless it was signed as expected and is currently usable
#[derive(Debug, Default, Clone)]
pub struct SecureParser {
    parser: Parser,
    validator: Validator,
}

impl SecureParser {
    /// Secure parser built on `parser`
    pub fn new(parser: Parser) -> Self {
        Self {
            parser,
            validator: Validator,
        }
    }

    /// Parses `jwt` then asserts `signed_with`, `valid_at` and every extra constraint
    ///
    /// # Errors
    /// * anything [Parser::parse] fails with
    /// * [RustyJwtError::RequiredConstraintsViolated] listing every violated constraint
    pub fn parse<V: ValidAt>(
        &self,
        jwt: &str,
        signed_with: &SignedWith,
        valid_at: &V,
        constraints: &[&dyn Constraint],
    ) -> RustyJwtResult<Plain> {
        let token = self.parser.parse(jwt)?;
        let mut all: Vec<&dyn Constraint> = Vec::with_capacity(constraints.len() + 2);
        all.push(signed_with);
        all.push(valid_at);
        all.extend_from_slice(constraints);
        self.validator.assert(&token, &all)?;
        Ok(token)
    }
}

/// Issues short-lived tokens and parses them back securely
pub struct JwtFacade {
    parser: SecureParser,
    clock: Box<dyn Clock>,
}

impl JwtFacade {
    /// Lifetime of issued tokens, unless customized
    pub const DEFAULT_LIFETIME: Duration = Duration::minutes(5);

    /// Facade reading time from `clock`
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            parser: SecureParser::default(),
            clock: Box::new(clock),
        }
    }

    /// Issues a token valid from now until [Self::DEFAULT_LIFETIME] later
    ///
    /// `customize` receives the builder with `iat`, `nbf` and `exp` already set, and the instant
    /// used for them.
    ///
    /// # Errors
    /// Whatever `customize` or signing fails with
    pub fn issue<F>(&self, signer: &dyn Signer, key: &dyn Key, customize: F) -> RustyJwtResult<Plain>
    where
        F: FnOnce(TokenBuilder, OffsetDateTime) -> RustyJwtResult<TokenBuilder>,
    {
        let now = self.clock.now();
        let builder = TokenBuilder::default()
            .issued_at(now)
            .can_only_be_used_after(now)
            .expires_at(now + Self::DEFAULT_LIFETIME);
        customize(builder, now)?.get_token(signer, key)
    }

    /// See [SecureParser::parse]
    ///
    /// # Errors
    /// See [SecureParser::parse]
    pub fn parse<V: ValidAt>(
        &self,
        jwt: &str,
        signed_with: &SignedWith,
        valid_at: &V,
        constraints: &[&dyn Constraint],
    ) -> RustyJwtResult<Plain> {
        self.parser.parse(jwt, signed_with, valid_at, constraints)
    }
}

impl Default for JwtFacade {
    fn default() -> Self {
        Self::new(SystemClock)
    }
}

impl std::fmt::Debug for JwtFacade {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("JwtFacade").field("parser", &self.parser).finish_non_exhaustive()
    }
}
