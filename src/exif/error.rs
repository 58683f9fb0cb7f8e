//! Error types for the value decoder.

use thiserror::Error;

use super::record::TypeTag;

/// Result type alias for decode operations.
pub type Result<T> = std::result::Result<T, DecodeError>;

/// Reasons a single property record could not be decoded.
///
/// These never escape a collection build: the builder logs them and leaves
/// the affected tag with an empty value.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DecodeError {
    /// Payload shorter than the declared type requires
    #[error("{kind} payload too short: need {needed} bytes, got {actual}")]
    Truncated {
        kind: TypeTag,
        needed: usize,
        actual: usize,
    },

    /// Rational with a zero denominator
    #[error("rational {numerator}/0 has no finite value")]
    ZeroDenominator { numerator: i64 },

    /// Type code outside the supported TIFF set
    #[error("unsupported TIFF type code {0}")]
    UnknownType(u16),
}
