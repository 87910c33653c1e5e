//! Conversion failure taxonomy.
//!
//! Every failed conversion produces exactly one [`ConversionError`]. The
//! variant carries the structured data a caller needs to report the failure;
//! [`ConversionError::kind`] collapses it to a plain tag for callers that
//! only need to branch on the failure class.

use thiserror::Error;

use crate::types::TypeDescriptor;

// ============================================================================
// MAIN ERROR TYPE
// ============================================================================

/// Why a conversion could not produce a value.
#[non_exhaustive]
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// No rule exists for the (source, target) category pair
    #[error("No conversion from {from} to {to}")]
    UnsupportedPairing { from: String, to: String },

    /// The value does not fit the target's representable domain
    #[error("Value {value} is out of range for {to}")]
    OutOfRange { value: String, to: String },

    /// A numeric value other than the two canonical booleans
    #[error("Value {value} is not a canonical boolean (expected 0 or 1)")]
    AmbiguousBoolean { value: String },

    /// Text could not be parsed into the target
    #[error("Cannot parse '{input}' as {to}: {reason}")]
    MalformedText {
        input: String,
        to: String,
        reason: String,
    },

    /// One side of the conversion is an opaque reference type
    #[error("Incompatible reference types: {from} cannot be converted to {to}")]
    IncompatibleReference { from: String, to: String },

    /// The context's format string does not apply to the rendered value
    #[error("Invalid format '{format}' for {target}")]
    InvalidFormat { format: String, target: String },
}

/// Failure class of a [`ConversionError`], without the payload.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConversionErrorKind {
    UnsupportedPairing,
    OutOfRange,
    AmbiguousBoolean,
    MalformedText,
    IncompatibleReference,
    InvalidFormat,
}

// ============================================================================
// CONVENIENCE CONSTRUCTORS
// ============================================================================

impl ConversionError {
    /// Create an unsupported pairing error
    pub fn unsupported(from: &TypeDescriptor, to: &TypeDescriptor) -> Self {
        Self::UnsupportedPairing {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an out of range error
    pub fn out_of_range(value: impl ToString, to: &TypeDescriptor) -> Self {
        Self::OutOfRange {
            value: value.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an ambiguous boolean error
    pub fn ambiguous_boolean(value: impl ToString) -> Self {
        Self::AmbiguousBoolean {
            value: value.to_string(),
        }
    }

    /// Create a malformed text error
    pub fn malformed(
        input: impl Into<String>,
        to: &TypeDescriptor,
        reason: impl ToString,
    ) -> Self {
        Self::MalformedText {
            input: input.into(),
            to: to.to_string(),
            reason: reason.to_string(),
        }
    }

    /// Create an incompatible reference error
    pub fn incompatible(from: &TypeDescriptor, to: &TypeDescriptor) -> Self {
        Self::IncompatibleReference {
            from: from.to_string(),
            to: to.to_string(),
        }
    }

    /// Create an invalid format error
    pub fn invalid_format(format: impl Into<String>, target: impl ToString) -> Self {
        Self::InvalidFormat {
            format: format.into(),
            target: target.to_string(),
        }
    }
}

// ============================================================================
// ERROR CLASSIFICATION
// ============================================================================

impl ConversionError {
    /// Failure class without payload
    pub const fn kind(&self) -> ConversionErrorKind {
        match self {
            Self::UnsupportedPairing { .. } => ConversionErrorKind::UnsupportedPairing,
            Self::OutOfRange { .. } => ConversionErrorKind::OutOfRange,
            Self::AmbiguousBoolean { .. } => ConversionErrorKind::AmbiguousBoolean,
            Self::MalformedText { .. } => ConversionErrorKind::MalformedText,
            Self::IncompatibleReference { .. } => ConversionErrorKind::IncompatibleReference,
            Self::InvalidFormat { .. } => ConversionErrorKind::InvalidFormat,
        }
    }

    /// Get error code for monitoring
    pub const fn code(&self) -> &'static str {
        self.kind().code()
    }

    /// Whether the failure depends on the value rather than only on the types.
    ///
    /// Pairing and reference failures are decided before any value is
    /// inspected; every other kind is raised by a rule after looking at it.
    pub const fn is_value_dependent(&self) -> bool {
        !matches!(
            self,
            Self::UnsupportedPairing { .. } | Self::IncompatibleReference { .. }
        )
    }
}

impl ConversionErrorKind {
    /// Stable error code
    pub const fn code(self) -> &'static str {
        match self {
            Self::UnsupportedPairing => "CONVERT_UNSUPPORTED_PAIRING",
            Self::OutOfRange => "CONVERT_OUT_OF_RANGE",
            Self::AmbiguousBoolean => "CONVERT_AMBIGUOUS_BOOLEAN",
            Self::MalformedText => "CONVERT_MALFORMED_TEXT",
            Self::IncompatibleReference => "CONVERT_INCOMPATIBLE_REFERENCE",
            Self::InvalidFormat => "CONVERT_INVALID_FORMAT",
        }
    }
}

impl std::fmt::Display for ConversionErrorKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.code())
    }
}

// ============================================================================
// RESULT TYPE
// ============================================================================

/// Outcome of one conversion attempt
pub type ConversionResult<T> = Result<T, ConversionError>;

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::IntegerKind;

    #[test]
    fn test_out_of_range() {
        let err = ConversionError::out_of_range(i64::MAX, &TypeDescriptor::Integer(IntegerKind::I8));
        assert_eq!(err.kind(), ConversionErrorKind::OutOfRange);
        assert_eq!(err.code(), "CONVERT_OUT_OF_RANGE");
        assert!(err.to_string().contains("9223372036854775807"));
        assert!(err.to_string().contains("i8"));
        assert!(err.is_value_dependent());
    }

    #[test]
    fn test_unsupported_is_type_level() {
        let err = ConversionError::unsupported(&TypeDescriptor::Guid, &TypeDescriptor::Bool);
        assert_eq!(err.kind(), ConversionErrorKind::UnsupportedPairing);
        assert!(!err.is_value_dependent());
        assert_eq!(err.to_string(), "No conversion from guid to bool");
    }

    #[test]
    fn test_malformed() {
        let err = ConversionError::malformed("not-a-guid", &TypeDescriptor::Guid, "bad length");
        assert_eq!(err.code(), "CONVERT_MALFORMED_TEXT");
        assert!(err.to_string().contains("not-a-guid"));
    }

    #[test]
    fn test_kind_display_is_code() {
        assert_eq!(
            ConversionErrorKind::IncompatibleReference.to_string(),
            "CONVERT_INCOMPATIBLE_REFERENCE"
        );
    }
}
