use super::encoding::{EncodingError, OneByteEncodable};
use super::fields::FieldBag;
use super::request::Request;

/// Appliance type byte for ceiling fan / bath heater units.
pub const DEVICE_TYPE: u8 = 0x40;

#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum MessageType {
    Set = 0x02,
    Query = 0x03,
    Notify1 = 0x04,
    Notify2 = 0x05,
    Exception = 0x06,

    Unknown = 0xff,
}

impl From<u8> for MessageType {
    fn from(byte: u8) -> Self {
        match byte {
            0x02 => MessageType::Set,
            0x03 => MessageType::Query,
            0x04 => MessageType::Notify1,
            0x05 => MessageType::Notify2,
            0x06 => MessageType::Exception,

            _ => MessageType::Unknown,
        }
    }
}

impl OneByteEncodable for MessageType {
    fn encoded_as_byte(&self) -> u8 {
        *self as u8
    }
}

/// Protocol revision the appliance negotiated at connect time. Every outbound
/// request carries it so the builder can pick the matching frame layout.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct ProtocolVersion(pub u8);

impl OneByteEncodable for ProtocolVersion {
    fn encoded_as_byte(&self) -> u8 {
        self.0
    }
}

one_byte_encodable!(MessageType, ProtocolVersion);

/// The frame wasn't a status frame this codec understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParseError;

/// The message component: knows where each field lives inside a frame for a
/// given firmware, and nothing about what the values mean.
pub trait MessageCodec {
    /// Extracts every field present in a status frame.
    fn parse(&mut self, frame: &[u8]) -> Result<FieldBag, ParseError>;

    /// Serializes `request` into the front of `into`, returning the written
    /// slice.
    fn build<'a>(&mut self, request: &Request, into: &'a mut [u8]) -> Result<&'a [u8], EncodingError>;
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::protocol::Encodable;

    #[test]
    fn message_type_test() {
        assert_eq!(MessageType::from(0x02), MessageType::Set);
        assert_eq!(MessageType::from(0x03), MessageType::Query);
        assert_eq!(MessageType::from(0x05), MessageType::Notify2);
        assert_eq!(MessageType::from(0x42), MessageType::Unknown);
    }

    #[test]
    fn encode_header_bytes_test() {
        let mut buf = [0u8; 1];
        assert_eq!(MessageType::Query.encode(&mut buf), Ok(&[0x03u8][..]));
        assert_eq!(ProtocolVersion(3).encode(&mut buf), Ok(&[0x03u8][..]));
        assert_eq!(ProtocolVersion(3).encode(&mut []), Err(EncodingError));
    }
}
