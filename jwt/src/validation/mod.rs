//! Deciding whether a parsed token is acceptable

pub use constraint::{
    AllowedTo, HasClaim, HasClaimWithValue, IdentifiedBy, IssuedBy, LooseValidAt, PermittedFor, RelatedTo, SignedWith,
    StrictValidAt, ValidAt,
};

use crate::prelude::*;

pub mod constraint;

/// A single rule a token must follow
pub trait Constraint: Send + Sync {
    /// Passes when `token` follows the rule
    ///
    /// # Errors
    /// [RustyJwtError::ConstraintViolation] when it does not. Any other error means the rule could
    /// not be evaluated, e.g. the verification key is unusable.
    fn assert(&self, token: &Plain) -> RustyJwtResult<()>;
}

/// Why a token does not follow a [Constraint]
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ConstraintViolation {
    message: String,
    constraint: &'static str,
}

impl ConstraintViolation {
    /// Violation of `constraint` explained by `message`
    pub fn error(message: impl Into<String>, constraint: &'static str) -> Self {
        Self {
            message: message.into(),
            constraint,
        }
    }

    /// Human readable reason
    pub fn message(&self) -> &str {
        &self.message
    }

    /// Name of the violated constraint
    pub fn constraint(&self) -> &'static str {
        self.constraint
    }
}

/// Runs constraints against a token
#[derive(Debug, Default, Copy, Clone)]
pub struct Validator;

impl Validator {
    /// Evaluates every constraint and reports all of their violations at once
    ///
    /// # Errors
    /// * [RustyJwtError::NoConstraintsGiven] when `constraints` is empty
    /// * [RustyJwtError::RequiredConstraintsViolated] listing every violation
    /// * whatever a constraint failed with when it could not be evaluated
    pub fn assert(&self, token: &Plain, constraints: &[&dyn Constraint]) -> RustyJwtResult<()> {
        if constraints.is_empty() {
            return Err(RustyJwtError::NoConstraintsGiven);
        }
        let mut violations = vec![];
        for constraint in constraints {
            match constraint.assert(token) {
                Ok(()) => {}
                Err(RustyJwtError::ConstraintViolation(violation)) => violations.push(violation),
                Err(e) => return Err(e),
            }
        }
        tracing::debug!(
            constraints = constraints.len(),
            violations = violations.len(),
            "token validated"
        );
        if violations.is_empty() {
            Ok(())
        } else {
            Err(RustyJwtError::RequiredConstraintsViolated(violations))
        }
    }

    /// Whether the token follows every constraint
    ///
    /// Every constraint is evaluated, even after a violation, so a constraint which cannot be
    /// evaluated is never hidden behind `false`.
    ///
    /// # Errors
    /// * [RustyJwtError::NoConstraintsGiven] when `constraints` is empty
    /// * whatever a constraint failed with when it could not be evaluated
    pub fn validate(&self, token: &Plain, constraints: &[&dyn Constraint]) -> RustyJwtResult<bool> {
        if constraints.is_empty() {
            return Err(RustyJwtError::NoConstraintsGiven);
        }
        let mut valid = true;
        for constraint in constraints {
            match constraint.assert(token) {
                Ok(()) => {}
                Err(RustyJwtError::ConstraintViolation(violation)) => {
                    tracing::debug!(constraint = violation.constraint(), "token rejected");
                    valid = false;
                }
                Err(e) => return Err(e),
            }
        }
        Ok(valid)
    }
}
