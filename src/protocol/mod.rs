#[macro_use]
pub mod encoding;
pub mod fields;
pub mod message;
pub mod request;
pub mod types;

pub use encoding::{Encodable, EncodingError, OneByteEncodable};
pub use fields::{FieldBag, FieldName, FieldValue};
pub use message::{MessageCodec, MessageType, ParseError, ProtocolVersion, DEVICE_TYPE};
pub use request::{QueryRequest, Request, SetRequest};
pub use types::*;
