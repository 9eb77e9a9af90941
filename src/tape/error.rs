//! Error types for tape layout generation.

use thiserror::Error;

/// Result type for tape operations.
pub type TapeResult<T> = Result<T, TapeError>;

/// Errors that can occur while validating or laying out a tape.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum TapeError {
    /// A tape parameter is out of range.
    #[error("Invalid parameter '{name}': {message}")]
    InvalidParameter {
        /// Parameter name.
        name: String,
        /// Description of what's wrong.
        message: String,
    },

    /// No EIA-481 sprocket-hole data exists for this tape width.
    #[error("Unsupported tape width: {width} mm (EIA-481 widths are 8, 12, 16, 24, 32, 44, 56 mm)")]
    UnsupportedTapeWidth {
        /// Requested tape width in mm.
        width: f64,
    },

    /// A chip size code could not be decoded.
    #[error("Invalid chip size code '{code}': expected four digits such as 0805")]
    InvalidChipCode {
        /// The offending code.
        code: String,
    },
}

impl TapeError {
    /// Creates an invalid parameter error.
    pub fn invalid_parameter(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name: name.into(),
            message: message.into(),
        }
    }

    /// Creates an unsupported tape width error.
    #[must_use]
    pub const fn unsupported_width(width: f64) -> Self {
        Self::UnsupportedTapeWidth { width }
    }

    /// Creates an invalid chip code error.
    pub fn invalid_chip_code(code: impl Into<String>) -> Self {
        Self::InvalidChipCode { code: code.into() }
    }

    /// Returns the offending parameter name for [`TapeError::InvalidParameter`].
    #[must_use]
    pub fn parameter(&self) -> Option<&str> {
        match self {
            Self::InvalidParameter { name, .. } => Some(name),
            _ => None,
        }
    }
}
