use crate::validation::ConstraintViolation;

/// Wrapper over a [Result] with a [RustyJwtError] error
pub type RustyJwtResult<T> = Result<T, RustyJwtError>;

/// All errors which issuing, parsing or validating a token might throw
#[derive(Debug, thiserror::Error)]
pub enum RustyJwtError {
    /// The compact serialization is malformed
    #[error(transparent)]
    InvalidTokenStructure(#[from] InvalidTokenStructure),
    /// The token header declares something this crate refuses to handle
    #[error("Encryption is not supported yet")]
    UnsupportedHeaderFound,
    /// A segment was not valid base64url
    #[error("Error while decoding from Base64Url, invalid base64 characters detected")]
    InvalidBase64Url(#[from] base64::DecodeError),
    /// A segment was not valid JSON
    #[error("Error while decoding from JSON")]
    CannotDecodeContent(#[source] serde_json::Error),
    /// A header or claim cannot be represented in JSON
    #[error("Error while encoding to JSON because {0}")]
    CannotEncodeContent(String),
    /// Registered claims have dedicated builder methods
    #[error("Builder::with_claim() is meant to be used for non-registered claims, check the documentation on how to set claim \"{0}\"")]
    RegisteredClaimGiven(String),
    /// A time claim was never set on a [crate::token::TimedRequiringBuilder]
    #[error(transparent)]
    TimeRequired(#[from] TimeRequired),
    /// Registered claims have dedicated constraints
    #[error("The claim \"{0}\" is a registered claim, another constraint must be used to validate its value")]
    CannotValidateARegisteredClaim(String),
    /// Time based constraints only widen the validity window
    #[error("Leeway cannot be negative")]
    LeewayCannotBeNegative,
    /// The validator needs something to validate against
    #[error("No constraint given.")]
    NoConstraintsGiven,
    /// A single constraint rejected the token
    #[error(transparent)]
    ConstraintViolation(#[from] ConstraintViolation),
    /// At least one constraint rejected the token
    #[error("The token violates some mandatory constraints, details:{}", list_violations(.0))]
    RequiredConstraintsViolated(Vec<ConstraintViolation>),
    /// The signer rejected the supplied key
    #[error(transparent)]
    InvalidKeyProvided(#[from] InvalidKeyProvided),
    /// Key material could not be loaded from disk
    #[error("The path \"{}\" does not contain a valid key file", path.display())]
    FileCouldNotBeRead {
        /// Path of the key file
        path: std::path::PathBuf,
        /// Underlying I/O failure
        #[source]
        source: std::io::Error,
    },
    /// The signing primitive failed
    #[error("Signing failed because {0}")]
    SigningFailed(String),
    /// An ECDSA signature could not be moved between its DER and fixed-length forms
    #[error("Signature conversion failed because {0}")]
    ConversionFailed(String),
}

fn list_violations(violations: &[ConstraintViolation]) -> String {
    violations.iter().map(|v| format!("\n- {v}")).collect()
}

/// Why a compact serialization could not be turned into a token
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidTokenStructure {
    /// Not exactly three segments
    #[error("The JWT string must have two dots")]
    MissingDots,
    /// First segment is empty
    #[error("The JWT string is missing the Header part")]
    MissingHeaderPart,
    /// Second segment is empty
    #[error("The JWT string is missing the Claim part")]
    MissingClaimsPart,
    /// Third segment is empty although the header declares an algorithm
    #[error("The JWT string is missing the Signature part")]
    MissingSignaturePart,
    /// Headers or claims are not a key/value structure
    #[error("{0} must be an array")]
    ArrayExpected(&'static str),
    /// A registered date claim holds something which is not a timestamp
    #[error("Value is not in the allowed date format: {0}")]
    DateIsNotParseable(String),
}

/// Which time claim is missing on a [crate::token::TimedRequiringBuilder]
#[derive(Debug, Copy, Clone, Eq, PartialEq, thiserror::Error)]
pub enum TimeRequired {
    /// `exp` was never set
    #[error("Expiration time is required, call expires_at()")]
    ExpiresAt,
    /// `iat` was never set
    #[error("Issue time is required, call issued_at()")]
    IssuedAt,
    /// `nbf` was never set
    #[error("Not before time is required, call can_only_be_used_after()")]
    CanOnlyBeUsedAfter,
}

/// Why a signer refused a key
#[derive(Debug, Clone, Eq, PartialEq, thiserror::Error)]
pub enum InvalidKeyProvided {
    /// No key material at all
    #[error("Key cannot be empty")]
    CannotBeEmpty,
    /// Key is weaker than the algorithm requires
    #[error("Key provided is shorter than {expected} bits, only {actual} bits provided")]
    TooShort {
        /// Minimum length in bits
        expected: usize,
        /// Supplied length in bits
        actual: usize,
    },
    /// Key material is not in a supported encoding
    #[error("It was not possible to parse your key, reason: {0}")]
    CannotBeParsed(String),
    /// Key is valid but belongs to another algorithm family or curve
    #[error("The type of the provided key is not \"{expected}\", \"{actual}\" provided")]
    IncompatibleKeyType {
        /// Key type the signer requires
        expected: &'static str,
        /// Key type which was supplied
        actual: String,
    },
}
