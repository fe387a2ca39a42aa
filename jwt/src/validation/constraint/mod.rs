//! Built-in constraints

pub use has_claim::{HasClaim, HasClaimWithValue};
pub use identified_by::IdentifiedBy;
pub use issued_by::IssuedBy;
pub use permitted_for::{AllowedTo, PermittedFor};
pub use related_to::RelatedTo;
pub use signed_with::SignedWith;
pub use valid_at::{LooseValidAt, StrictValidAt, ValidAt};

use crate::prelude::*;

mod has_claim;
mod identified_by;
mod issued_by;
mod permitted_for;
mod related_to;
mod signed_with;
mod valid_at;

fn violation(message: impl Into<String>, constraint: &'static str) -> RustyJwtResult<()> {
    Err(ConstraintViolation::error(message, constraint).into())
}

fn ensure(holds: bool, message: &str, constraint: &'static str) -> RustyJwtResult<()> {
    if holds { Ok(()) } else { violation(message, constraint) }
}

#[cfg(test)]
fn violation_message(result: RustyJwtResult<()>) -> String {
    match result {
        Err(RustyJwtError::ConstraintViolation(v)) => v.message().to_string(),
        other => panic!("expected a violation, got {other:?}"),
    }
}
