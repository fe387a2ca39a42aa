use time::{Duration, OffsetDateTime};

use super::violation;
use crate::clock::Clock;
use crate::prelude::*;

/// A [Constraint] checking the token is usable at the current instant
pub trait ValidAt: Constraint {}

/// Checks `iat`, `nbf` and `exp` against the clock, treating the missing ones as satisfied
pub struct LooseValidAt {
    clock: Box<dyn Clock>,
    leeway: Duration,
}

/// Checks `iat`, `nbf` and `exp` against the clock, all three being mandatory
pub struct StrictValidAt {
    clock: Box<dyn Clock>,
    leeway: Duration,
}

impl LooseValidAt {
    const NAME: &'static str = "LooseValidAt";

    /// Compares with `clock` without tolerance
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            leeway: Duration::ZERO,
        }
    }

    /// Compares with `clock`, widening the validity window by `leeway` on both ends
    ///
    /// # Errors
    /// [RustyJwtError::LeewayCannotBeNegative]
    pub fn with_leeway(clock: impl Clock + 'static, leeway: Duration) -> RustyJwtResult<Self> {
        Ok(Self {
            clock: Box::new(clock),
            leeway: non_negative(leeway)?,
        })
    }
}

impl StrictValidAt {
    const NAME: &'static str = "StrictValidAt";

    /// Compares with `clock` without tolerance
    pub fn new(clock: impl Clock + 'static) -> Self {
        Self {
            clock: Box::new(clock),
            leeway: Duration::ZERO,
        }
    }

    /// Compares with `clock`, widening the validity window by `leeway` on both ends
    ///
    /// # Errors
    /// [RustyJwtError::LeewayCannotBeNegative]
    pub fn with_leeway(clock: impl Clock + 'static, leeway: Duration) -> RustyJwtResult<Self> {
        Ok(Self {
            clock: Box::new(clock),
            leeway: non_negative(leeway)?,
        })
    }
}

impl Constraint for LooseValidAt {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        assert_window(token, self.clock.now(), self.leeway, Self::NAME)
    }
}

impl ValidAt for LooseValidAt {}

impl Constraint for StrictValidAt {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        let now = self.clock.now();
        let claims = token.claims();
        if !claims.has(RegisteredClaims::ISSUED_AT) {
            return violation("\"Issued At\" claim missing", Self::NAME);
        }
        if !claims.has(RegisteredClaims::NOT_BEFORE) {
            return violation("\"Not Before\" claim missing", Self::NAME);
        }
        if !claims.has(RegisteredClaims::EXPIRATION_TIME) {
            return violation("\"Expiration Time\" claim missing", Self::NAME);
        }
        assert_window(token, now, self.leeway, Self::NAME)
    }
}

impl ValidAt for StrictValidAt {}

/// A bound pushed past the representable instants by the leeway never rejects anything
fn assert_window(token: &Plain, now: OffsetDateTime, leeway: Duration, name: &'static str) -> RustyJwtResult<()> {
    if let Some(latest) = now.checked_add(leeway) {
        if !token.has_been_issued_before(&latest) {
            return violation("The token was issued in the future", name);
        }
        if !token.is_minimum_time_before(&latest) {
            return violation("The token cannot be used yet", name);
        }
    }
    if let Some(earliest) = now.checked_sub(leeway) {
        if token.is_expired(&earliest) {
            return violation("The token is expired", name);
        }
    }
    Ok(())
}

fn non_negative(leeway: Duration) -> RustyJwtResult<Duration> {
    if leeway.is_negative() {
        return Err(RustyJwtError::LeewayCannotBeNegative);
    }
    Ok(leeway)
}

impl std::fmt::Debug for LooseValidAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(Self::NAME).field("leeway", &self.leeway).finish_non_exhaustive()
    }
}

impl std::fmt::Debug for StrictValidAt {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct(Self::NAME).field("leeway", &self.leeway).finish_non_exhaustive()
    }
}
