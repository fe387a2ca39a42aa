//! Source of the current instant for issuing and validating time claims

use time::OffsetDateTime;

/// Tells what time it is
pub trait Clock: Send + Sync {
    /// Current instant
    fn now(&self) -> OffsetDateTime;
}

/// Reads the system clock, in UTC
#[derive(Debug, Default, Copy, Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}

/// Always answers the same instant
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct FrozenClock(OffsetDateTime);

impl FrozenClock {
    /// Clock stuck at `at`
    pub fn new(at: OffsetDateTime) -> Self {
        Self(at)
    }
}

impl Clock for FrozenClock {
    fn now(&self) -> OffsetDateTime {
        self.0
    }
}

impl<C: Clock + ?Sized> Clock for std::sync::Arc<C> {
    fn now(&self) -> OffsetDateTime {
        (**self).now()
    }
}
