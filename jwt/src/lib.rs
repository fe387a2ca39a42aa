#![doc = include_str ! ("../../README.md")]
#![deny(missing_docs)]
#![allow(clippy::single_component_path_imports)]

#[cfg(test)]
use rstest_reuse;

#[cfg(test)]
#[macro_use]
pub mod test_utils;
// both imports above have to be defined at the beginning of the crate for rstest to work

pub mod clock;
pub mod configuration;
pub mod encoding;
mod error;
pub mod facade;
pub mod model;
pub mod signer;
pub mod token;
pub mod validation;

/// Prelude
pub mod prelude {
    pub use crate::clock::{Clock, FrozenClock, SystemClock};
    pub use crate::configuration::Configuration;
    pub use crate::error::{InvalidKeyProvided, InvalidTokenStructure, RustyJwtError, RustyJwtResult, TimeRequired};
    pub use crate::facade::{JwtFacade, SecureParser};
    pub use crate::model::{
        claim::{ClaimValue, RegisteredClaims},
        data_set::DataSet,
        signature::Signature,
    };
    pub use crate::signer::{
        EcdsaSha256, EcdsaSha384, Eddsa, HmacSha256, HmacSha384, HmacSha512, InMemory, Key, RsaSha256, RsaSha384,
        RsaSha512, Signer, Unsecured,
    };
    pub use crate::token::{Builder, Parser, Plain, TimedRequiringBuilder, TokenBuilder};
    pub use crate::validation::{
        AllowedTo, Constraint, ConstraintViolation, HasClaim, HasClaimWithValue, IdentifiedBy, IssuedBy, LooseValidAt,
        PermittedFor, RelatedTo, SignedWith, StrictValidAt, ValidAt, Validator,
    };
}
