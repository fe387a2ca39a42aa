//! Wires a signer, its keys, the codec and the validation rules together

use std::sync::Arc;

use crate::encoding::formatter::{ChainedFormatter, ClaimsFormatter};
use crate::encoding::{Decoder, Encoder, JoseEncoder};
use crate::prelude::*;

/// Everything needed to issue, parse and validate tokens of one kind
#[derive(Clone)]
pub struct Configuration {
    signer: Arc<dyn Signer>,
    signing_key: Arc<dyn Key>,
    verification_key: Arc<dyn Key>,
    encoder: Arc<dyn Encoder>,
    decoder: Arc<dyn Decoder>,
    formatter: Arc<dyn ClaimsFormatter>,
    validator: Validator,
    constraints: Vec<Arc<dyn Constraint>>,
}

impl Configuration {
    /// Same secret signs and verifies, e.g. HMAC
    pub fn for_symmetric_signer(signer: impl Signer + 'static, key: impl Key + 'static) -> Self {
        let key: Arc<dyn Key> = Arc::new(key);
        Self::new(Arc::new(signer), key.clone(), key)
    }

    /// Private key signs, public key verifies, e.g. RSA, ECDSA or EdDSA
    pub fn for_asymmetric_signer(
        signer: impl Signer + 'static,
        signing_key: impl Key + 'static,
        verification_key: impl Key + 'static,
    ) -> Self {
        Self::new(Arc::new(signer), Arc::new(signing_key), Arc::new(verification_key))
    }

    /// Tokens carry no signature at all
    pub fn for_unsecured_signer() -> Self {
        Self::for_symmetric_signer(Unsecured, InMemory::empty())
    }

    fn new(signer: Arc<dyn Signer>, signing_key: Arc<dyn Key>, verification_key: Arc<dyn Key>) -> Self {
        let codec = Arc::new(JoseEncoder);
        Self {
            signer,
            signing_key,
            verification_key,
            encoder: codec.clone(),
            decoder: codec,
            formatter: Arc::new(ChainedFormatter::default()),
            validator: Validator,
            constraints: vec![],
        }
    }

    /// Replaces the JSON and base64url codec
    pub fn with_encoding<C: Encoder + Decoder + 'static>(mut self, codec: C) -> Self {
        let codec = Arc::new(codec);
        self.encoder = codec.clone();
        self.decoder = codec;
        self
    }

    /// Replaces how claims are shaped before being encoded
    pub fn with_claims_formatter(mut self, formatter: impl ClaimsFormatter + 'static) -> Self {
        self.formatter = Arc::new(formatter);
        self
    }

    /// Sets the constraints [Self::validate_token] asserts
    pub fn with_validation_constraints(mut self, constraints: Vec<Arc<dyn Constraint>>) -> Self {
        self.constraints = constraints;
        self
    }

    /// Fresh builder sharing this configuration's codec and claims formatter
    pub fn builder(&self) -> TokenBuilder {
        TokenBuilder::new(self.encoder.clone(), self.formatter.clone())
    }

    /// Parser sharing this configuration's codec
    pub fn parser(&self) -> Parser {
        Parser::new(self.decoder.clone())
    }

    /// Validator
    pub fn validator(&self) -> &Validator {
        &self.validator
    }

    /// Signer
    pub fn signer(&self) -> &dyn Signer {
        self.signer.as_ref()
    }

    /// Key used when issuing
    pub fn signing_key(&self) -> &dyn Key {
        self.signing_key.as_ref()
    }

    /// Key used when verifying
    pub fn verification_key(&self) -> &dyn Key {
        self.verification_key.as_ref()
    }

    /// Constraints [Self::validate_token] asserts
    pub fn validation_constraints(&self) -> Vec<&dyn Constraint> {
        self.constraints.iter().map(|c| c.as_ref() as &dyn Constraint).collect()
    }

    /// Constraint verifying signatures with this configuration's signer and verification key
    pub fn signed_with(&self) -> SignedWith {
        SignedWith::from_shared(self.signer.clone(), self.verification_key.clone())
    }

    /// Builds a token with `customize` then signs it with the signing key
    ///
    /// # Errors
    /// Whatever `customize` or signing fails with
    pub fn issue<F>(&self, customize: F) -> RustyJwtResult<Plain>
    where
        F: FnOnce(TokenBuilder) -> RustyJwtResult<TokenBuilder>,
    {
        customize(self.builder())?.get_token(self.signer(), self.signing_key())
    }

    /// Parses `jwt` then asserts the configured constraints against it
    ///
    /// # Errors
    /// * anything [Parser::parse] fails with
    /// * [RustyJwtError::NoConstraintsGiven] when no constraint was configured
    /// * [RustyJwtError::RequiredConstraintsViolated] listing every violated constraint
    pub fn parse_and_validate(&self, jwt: &str) -> RustyJwtResult<Plain> {
        let token = self.parser().parse(jwt)?;
        self.validate_token(&token)?;
        Ok(token)
    }

    /// Asserts the configured constraints against `token`
    ///
    /// # Errors
    /// * [RustyJwtError::NoConstraintsGiven] when no constraint was configured
    /// * [RustyJwtError::RequiredConstraintsViolated] listing every violated constraint
    pub fn validate_token(&self, token: &Plain) -> RustyJwtResult<()> {
        self.validator.assert(token, &self.validation_constraints())
    }
}

impl std::fmt::Debug for Configuration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Configuration")
            .field("alg", &self.signer.algorithm_id())
            .field("formatter", &self.formatter)
            .field("constraints", &self.constraints.len())
            .finish_non_exhaustive()
    }
}
