// ABOUTME: Error types for CBOR decoding.
// ABOUTME: Variants classify into InvalidFormat / NotImplemented / LimitExceeded kinds.

use std::fmt;

/// The result type for decode operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Broad classification of a decode failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A byte pattern with no defined meaning under this engine.
    InvalidFormat,
    /// A recognized encoding this engine does not support.
    NotImplemented,
    /// A configured resource limit was exceeded.
    LimitExceeded,
}

/// Errors that can occur during decoding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// Unrecognized length/argument marker (low 5 bits in 28..=31).
    UnknownArgument(u8),

    /// Half-, single-, or double-precision float header (simple values 25-27).
    UnsupportedFloat(u8),

    /// The indefinite-length break marker (simple value 31).
    IndefiniteLength,

    /// Reserved simple-value form (simple values 28-30).
    UnsupportedSimple(u8),

    /// Negative integer below the representable 64-bit range.
    IntegerOverflow,

    /// Container/tag nesting too deep.
    MaxDepthExceeded,

    /// Container declares more elements than allowed.
    MaxContainerSizeExceeded,
}

impl Error {
    /// Returns the broad kind of this error.
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Error::UnknownArgument(_) => ErrorKind::InvalidFormat,
            Error::UnsupportedFloat(_)
            | Error::IndefiniteLength
            | Error::UnsupportedSimple(_)
            | Error::IntegerOverflow => ErrorKind::NotImplemented,
            Error::MaxDepthExceeded | Error::MaxContainerSizeExceeded => ErrorKind::LimitExceeded,
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::UnknownArgument(marker) => write!(f, "unknown length/argument marker {marker}"),
            Error::UnsupportedFloat(code) => {
                write!(f, "floating-point simple value {code} is not supported")
            }
            Error::IndefiniteLength => write!(f, "indefinite-length items are not supported"),
            Error::UnsupportedSimple(code) => write!(f, "simple value {code} is not supported"),
            Error::IntegerOverflow => write!(f, "negative integer does not fit in 64 bits"),
            Error::MaxDepthExceeded => write!(f, "maximum container depth exceeded"),
            Error::MaxContainerSizeExceeded => write!(f, "maximum container size exceeded"),
        }
    }
}

impl std::error::Error for Error {}
