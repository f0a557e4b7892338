use embedded_hal::serial;
use heapless::Vec;
use log::{debug, trace, warn};

use crate::device::{Attribute, AttributeDiff, AttributeValue, Attributes, StateMachine};
use crate::error::Error;
use crate::protocol::{Direction, MessageCodec, Mode, ProtocolVersion, QueryRequest, Request, SetRequest};

/// Largest serialized request the device will write.
pub const MAX_FRAME_LEN: usize = 256;

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
pub struct DeviceConfig {
    pub device_id: u64,
    pub protocol: ProtocolVersion,
}

/// Current attributes plus the value tables a UI can offer.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Snapshot {
    pub attributes: Attributes,
    pub preset_modes: &'static [Mode],
    pub directions: &'static [Direction],
}

/// A single appliance on a serial line.
///
/// Callers must not interleave calls from several tasks; wrap the device in
/// whatever mutex or command queue the runtime provides.
pub struct MideaX40Device<S, M> where S: serial::Write<u8>, M: MessageCodec {
    config: DeviceConfig,
    serial: S,
    codec: M,
    state: StateMachine,
    tx_buffer: Vec<u8, MAX_FRAME_LEN>,
}

impl<S, M> MideaX40Device<S, M> where S: serial::Write<u8>, M: MessageCodec {
    pub fn new(config: DeviceConfig, serial: S, codec: M) -> Self {
        MideaX40Device { config, serial, codec, state: StateMachine::new(), tx_buffer: Vec::new() }
    }

    pub fn config(&self) -> &DeviceConfig {
        &self.config
    }

    pub fn attributes(&self) -> &Attributes {
        self.state.attributes()
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            attributes: *self.state.attributes(),
            preset_modes: &Mode::ALL,
            directions: &Direction::ALL,
        }
    }

    /// The requests that poll the appliance for its full status.
    pub fn query(&self) -> [Request; 1] {
        [Request::Query(QueryRequest::new(self.config.protocol))]
    }

    pub fn send_query(&mut self) -> Result<(), Error> {
        for request in self.query().iter() {
            self.send(request)?;
        }
        Ok(())
    }

    /// Parses a status frame and applies it.
    ///
    /// Fields that parse but don't decode are logged and reported through
    /// `AttributeDiff::errors`; they don't fail the frame. A frame with too
    /// many fields to rebuild a set command from fails with `FieldBagFull`.
    pub fn on_frame(&mut self, frame: &[u8]) -> Result<AttributeDiff, Error> {
        let fields = self.codec.parse(frame)?;
        debug!("[{}] Received: {:?}", self.config.device_id, fields);

        let diff = self.state.decode(fields)?;
        for error in diff.errors() {
            warn!("[{}] Ignoring field: {}", self.config.device_id, error);
        }
        Ok(diff)
    }

    /// Commands `attribute` to `value`.
    ///
    /// Read-only attributes are ignored. Nothing is stored or sent when the
    /// value can't be encoded.
    pub fn set(&mut self, attribute: Attribute, value: AttributeValue) -> Result<(), Error> {
        let fields = match self.state.encode(attribute, value)? {
            Some(fields) => fields,
            None => {
                trace!("[{}] Ignoring write to {}", self.config.device_id, attribute);
                return Ok(());
            }
        };
        self.state.store(attribute, value)?;

        let request = Request::Set(SetRequest::new(self.config.protocol, fields));
        self.send(&request)
    }

    /// Like `set`, with the attribute and value given by name.
    ///
    /// Unknown attribute names are ignored.
    pub fn set_str(&mut self, name: &str, value: &str) -> Result<(), Error> {
        let attribute = match name.parse::<Attribute>() {
            Ok(attribute) => attribute,
            Err(_) => {
                trace!("[{}] Ignoring write to unknown attribute {}", self.config.device_id, name);
                return Ok(());
            }
        };
        if !attribute.is_settable() {
            trace!("[{}] Ignoring write to {}", self.config.device_id, attribute);
            return Ok(());
        }
        self.set(attribute, AttributeValue::parse(attribute, value)?)
    }

    /// Gives back the serial port and codec.
    pub fn release(self) -> (S, M) {
        (self.serial, self.codec)
    }

    fn send(&mut self, request: &Request) -> Result<(), Error> {
        self.tx_buffer.clear();
        self.tx_buffer
            .resize_default(MAX_FRAME_LEN)
            .map_err(|_| Error::Encoding)?;

        let frame = self.codec.build(request, &mut self.tx_buffer)?;
        debug!("[{}] Sending {:?}: {:02x?}", self.config.device_id, request.message_type(), frame);

        for byte in frame.iter() {
            nb::block!(self.serial.write(*byte)).map_err(|_| Error::Transport)?;
        }
        nb::block!(self.serial.flush()).map_err(|_| Error::Transport)
    }
}
