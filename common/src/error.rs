//! Error types for the RLP codec.
//!
//! `RlpError` covers structural failures of the wire format and of the
//! `Item` accessors. `TypedDecodeError` is what typed decoders return when a
//! well-formed item cannot be projected into the requested type.

use core::{error::Error, fmt};
use num_derive::{FromPrimitive, ToPrimitive};
use num_traits::FromPrimitive;

/// Structural RLP errors.
///
/// Each variant carries a stable numeric code so that callers crossing a
/// process or FFI boundary can report them as scalars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, FromPrimitive, ToPrimitive)]
#[repr(u32)]
pub enum RlpError {
    /// Input is empty when an item was expected.
    EmptyInput = 0x01,

    /// Declared length exceeds the remaining bytes.
    TruncatedInput = 0x02,

    /// A value was not encoded in its unique canonical form.
    NonCanonicalEncoding = 0x03,

    /// A child item overruns the span declared by its enclosing list.
    MalformedLengthPrefix = 0x04,

    /// Unconsumed bytes after a complete top-level item.
    TrailingBytes = 0x05,

    /// Length field does not fit in a `usize`.
    LengthOverflow = 0x06,

    /// Exceeded the configured nesting depth.
    TooDeep = 0x07,

    /// Input exceeds the configured maximum size.
    InputTooLarge = 0x08,

    /// Expected a list but found a byte string.
    ExpectedList = 0x09,

    /// Expected a byte string but found a list.
    ExpectedString = 0x0A,

    /// Integer does not fit in the requested width.
    IntegerOverflow = 0x0B,
}

impl RlpError {
    /// Returns the error code as a u32.
    #[inline]
    pub fn code(self) -> u32 {
        self as u32
    }

    /// Looks up an error by its numeric code.
    pub fn from_code(code: u32) -> Option<Self> {
        Self::from_u32(code)
    }

    /// Returns true for errors raised while parsing bytes, as opposed to
    /// errors raised by item accessors.
    #[inline]
    pub fn is_wire_error(self) -> bool {
        !matches!(
            self,
            RlpError::ExpectedList | RlpError::ExpectedString | RlpError::IntegerOverflow
        )
    }
}

impl fmt::Display for RlpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RlpError::EmptyInput => write!(f, "Empty input"),
            RlpError::TruncatedInput => write!(f, "Truncated input"),
            RlpError::NonCanonicalEncoding => write!(f, "Non-canonical encoding"),
            RlpError::MalformedLengthPrefix => write!(f, "Malformed length prefix"),
            RlpError::TrailingBytes => write!(f, "Trailing bytes after item"),
            RlpError::LengthOverflow => write!(f, "Length overflow"),
            RlpError::TooDeep => write!(f, "Nesting too deep"),
            RlpError::InputTooLarge => write!(f, "Input too large"),
            RlpError::ExpectedList => write!(f, "Expected list"),
            RlpError::ExpectedString => write!(f, "Expected byte string"),
            RlpError::IntegerOverflow => write!(f, "Integer overflow"),
        }
    }
}

impl Error for RlpError {}

/// Errors raised when projecting an item into a typed value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypedDecodeError {
    /// Underlying structural error.
    Rlp(RlpError),
    /// Expected a list node.
    ExpectedList,
    /// Expected a byte-string node.
    ExpectedByteString,
    /// List has the wrong number of children.
    ArityMismatch { expected: usize, found: usize },
    /// Byte string has the wrong length for a fixed-size value.
    InvalidLength { expected: usize, found: usize },
    /// A list element decoded to an absent value.
    MissingElement { index: usize },
    /// Byte string is not valid UTF-8.
    InvalidUtf8,
    /// Domain-specific failure.
    Custom(&'static str),
}

impl From<RlpError> for TypedDecodeError {
    fn from(e: RlpError) -> Self {
        match e {
            RlpError::ExpectedList => TypedDecodeError::ExpectedList,
            RlpError::ExpectedString => TypedDecodeError::ExpectedByteString,
            other => TypedDecodeError::Rlp(other),
        }
    }
}

impl fmt::Display for TypedDecodeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypedDecodeError::Rlp(e) => write!(f, "RLP error: {}", e),
            TypedDecodeError::ExpectedList => write!(f, "Expected list"),
            TypedDecodeError::ExpectedByteString => write!(f, "Expected byte string"),
            TypedDecodeError::ArityMismatch { expected, found } => {
                write!(f, "Expected {} list elements, found {}", expected, found)
            }
            TypedDecodeError::InvalidLength { expected, found } => {
                write!(f, "Expected {} bytes, found {}", expected, found)
            }
            TypedDecodeError::MissingElement { index } => {
                write!(f, "Missing list element at index {}", index)
            }
            TypedDecodeError::InvalidUtf8 => write!(f, "Invalid UTF-8"),
            TypedDecodeError::Custom(msg) => write!(f, "{}", msg),
        }
    }
}

impl Error for TypedDecodeError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            TypedDecodeError::Rlp(e) => Some(e),
            _ => None,
        }
    }
}
