use thiserror::Error;

use crate::device::Attribute;
use crate::protocol::{EncodingError, ParseError};

/// Everything that can go wrong between a status frame and a set command.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// A mode or direction value that isn't one of the fixed table entries.
    #[error("invalid value for attribute {attribute}")]
    InvalidEnumValue { attribute: Attribute },

    /// The device reported a raw value with no table entry.
    #[error("raw value {raw} out of range for attribute {attribute}")]
    IndexOutOfRange { attribute: Attribute, raw: i32 },

    /// A set command was requested before any status frame was decoded.
    #[error("no status frame decoded yet")]
    UninitializedState,

    #[error("field bag is full")]
    FieldBagFull,

    #[error("could not parse status frame")]
    Parse,

    #[error("could not serialize request")]
    Encoding,

    #[error("serial write failed")]
    Transport,
}

impl From<EncodingError> for Error {
    fn from(_: EncodingError) -> Self {
        Error::Encoding
    }
}

impl From<ParseError> for Error {
    fn from(_: ParseError) -> Self {
        Error::Parse
    }
}
