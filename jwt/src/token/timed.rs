use time::OffsetDateTime;

use crate::prelude::*;

/// Wraps a [Builder] and refuses to sign until `exp`, `iat` and `nbf` were all set
#[derive(Debug, Clone)]
pub struct TimedRequiringBuilder<B: Builder> {
    inner: B,
    expires_at: bool,
    issued_at: bool,
    can_only_be_used_after: bool,
}

impl<B: Builder> TimedRequiringBuilder<B> {
    /// Decorates `inner`
    pub fn new(inner: B) -> Self {
        Self {
            inner,
            expires_at: false,
            issued_at: false,
            can_only_be_used_after: false,
        }
    }

    fn map(self, f: impl FnOnce(B) -> B) -> Self {
        Self {
            inner: f(self.inner),
            ..self
        }
    }
}

impl<B: Builder> Builder for TimedRequiringBuilder<B> {
    fn permitted_for<I, S>(self, audiences: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.map(|b| b.permitted_for(audiences))
    }

    fn expires_at(self, at: OffsetDateTime) -> Self {
        Self {
            expires_at: true,
            ..self.map(|b| b.expires_at(at))
        }
    }

    fn issued_at(self, at: OffsetDateTime) -> Self {
        Self {
            issued_at: true,
            ..self.map(|b| b.issued_at(at))
        }
    }

    fn can_only_be_used_after(self, at: OffsetDateTime) -> Self {
        Self {
            can_only_be_used_after: true,
            ..self.map(|b| b.can_only_be_used_after(at))
        }
    }

    fn issued_by(self, issuer: impl Into<String>) -> Self {
        self.map(|b| b.issued_by(issuer))
    }

    fn related_to(self, subject: impl Into<String>) -> Self {
        self.map(|b| b.related_to(subject))
    }

    fn identified_by(self, id: impl Into<String>) -> Self {
        self.map(|b| b.identified_by(id))
    }

    fn with_header(self, name: impl Into<String>, value: impl Into<ClaimValue>) -> Self {
        self.map(|b| b.with_header(name, value))
    }

    fn with_claim(self, name: impl Into<String>, value: impl Into<ClaimValue>) -> RustyJwtResult<Self> {
        Ok(Self {
            inner: self.inner.with_claim(name, value)?,
            ..self
        })
    }

    fn get_token(self, signer: &dyn Signer, key: &dyn Key) -> RustyJwtResult<Plain> {
        if !self.expires_at {
            return Err(TimeRequired::ExpiresAt.into());
        }
        if !self.issued_at {
            return Err(TimeRequired::IssuedAt.into());
        }
        if !self.can_only_be_used_after {
            return Err(TimeRequired::CanOnlyBeUsedAfter.into());
        }
        self.inner.get_token(signer, key)
    }
}
