use std::sync::Arc;

use super::violation;
use crate::prelude::*;

const NAME: &str = "SignedWith";

/// The token was signed by `signer` with the counterpart of `key`
///
/// The `alg` header must name `signer` exactly. The signature is not even looked at otherwise,
/// which pins the algorithm and stops tokens re-signed with another one.
#[derive(Clone)]
pub struct SignedWith {
    signer: Arc<dyn Signer>,
    key: Arc<dyn Key>,
}

impl SignedWith {
    /// Verifies with `signer` and `key`
    pub fn new(signer: impl Signer + 'static, key: impl Key + 'static) -> Self {
        Self::from_shared(Arc::new(signer), Arc::new(key))
    }

    /// Verifies with a signer and key shared with something else, e.g. a configuration
    pub fn from_shared(signer: Arc<dyn Signer>, key: Arc<dyn Key>) -> Self {
        Self { signer, key }
    }
}

impl Constraint for SignedWith {
    fn assert(&self, token: &Plain) -> RustyJwtResult<()> {
        if token.header_algorithm() != Some(self.signer.algorithm_id()) {
            return violation("Token signer mismatch", NAME);
        }
        let payload = token.payload();
        if !self
            .signer
            .verify(token.signature().hash(), payload.as_bytes(), self.key.as_ref())?
        {
            return violation("Token signature mismatch", NAME);
        }
        Ok(())
    }
}

impl std::fmt::Debug for SignedWith {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignedWith")
            .field("alg", &self.signer.algorithm_id())
            .finish_non_exhaustive()
    }
}
