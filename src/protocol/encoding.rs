//! Byte-level helpers for `MessageCodec` implementations.
//!
//! `Mode`, `Direction`, `MessageType` and `ProtocolVersion` all encode to a
//! single byte, so a codec can drop them straight into its frame body with
//! `value.encode(&mut body[offset..offset + 1])` instead of repeating the
//! table lookups.

/// The target buffer doesn't match the size of the value being written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodingError;

pub trait Encodable {
    fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], EncodingError>;
}

#[macro_export]
macro_rules! one_byte_encodable {
    ( $( $ty:ty ),* ) => {
        $(
            impl $crate::protocol::Encodable for $ty where $ty: $crate::protocol::OneByteEncodable {
                fn encode<'a>(&self, into: &'a mut [u8]) -> Result<&'a [u8], $crate::protocol::EncodingError> {
                    if into.len() != 1 { return Err($crate::protocol::EncodingError); }
                    into[0] = self.encoded_as_byte();
                    Ok(into)
                }
            }
        )*
    }
}

/// Values whose wire form is exactly one byte.
pub trait OneByteEncodable {
    fn encoded_as_byte(&self) -> u8;
}
