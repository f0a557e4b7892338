//! Attribute state for a single appliance.
//!
//! [`Attributes`] is the decoded, human-meaningful view of the device;
//! [`StateMachine`] pairs it with the raw [`FieldBag`] of the last status
//! frame so a set command can be rebuilt without losing fields this crate
//! doesn't model.

use core::fmt;
use core::str::FromStr;

use heapless::Vec;

use crate::error::Error;
use crate::protocol::{decode_direction, decode_mode, encode_direction, encode_mode};
use crate::protocol::fields::MAX_FIELDS;
use crate::protocol::{Direction, FieldBag, FieldValue, Mode, DIRECTION_OSCILLATE};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Attribute {
    Light,
    Mode,
    Direction,
    Ventilation,
    CurrentTemperature,
}

impl Attribute {
    pub const ALL: [Attribute; 5] = [
        Attribute::Light,
        Attribute::Mode,
        Attribute::Direction,
        Attribute::Ventilation,
        Attribute::CurrentTemperature,
    ];

    /// Attribute name, which is also the name of its wire field.
    pub fn name(&self) -> &'static str {
        match self {
            Attribute::Light => "light",
            Attribute::Mode => "mode",
            Attribute::Direction => "direction",
            Attribute::Ventilation => "ventilation",
            Attribute::CurrentTemperature => "current_temperature",
        }
    }

    /// Whether a set command may change this attribute.
    pub fn is_settable(&self) -> bool {
        match self {
            Attribute::Light | Attribute::Mode | Attribute::Direction | Attribute::Ventilation => true,
            Attribute::CurrentTemperature => false,
        }
    }
}

impl fmt::Display for Attribute {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Unknown attribute name.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UnknownAttribute;

impl FromStr for Attribute {
    type Err = UnknownAttribute;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Attribute::ALL
            .iter()
            .copied()
            .find(|attribute| attribute.name() == s)
            .ok_or(UnknownAttribute)
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize), serde(untagged))]
pub enum AttributeValue {
    Bool(bool),
    Mode(Mode),
    Direction(Direction),
    Number(i32),
}

impl AttributeValue {
    /// Parses `s` as a value for `attribute`.
    ///
    /// Booleans accept `true`/`false`, `on`/`off` and `1`/`0`. Direction names
    /// outside the table become `Oscillate`, the same fallback the wire
    /// encoding uses.
    pub fn parse(attribute: Attribute, s: &str) -> Result<Self, Error> {
        match attribute {
            Attribute::Light | Attribute::Ventilation => match s {
                "true" | "on" | "1" => Ok(AttributeValue::Bool(true)),
                "false" | "off" | "0" => Ok(AttributeValue::Bool(false)),
                _ => Err(Error::InvalidEnumValue { attribute }),
            },
            Attribute::Mode => s.parse().map(AttributeValue::Mode),
            Attribute::Direction => Ok(AttributeValue::Direction(
                s.parse().unwrap_or(Direction::Oscillate),
            )),
            Attribute::CurrentTemperature => s
                .parse()
                .map(AttributeValue::Number)
                .map_err(|_| Error::InvalidEnumValue { attribute }),
        }
    }
}

impl From<bool> for AttributeValue {
    fn from(b: bool) -> Self {
        AttributeValue::Bool(b)
    }
}

impl From<Mode> for AttributeValue {
    fn from(mode: Mode) -> Self {
        AttributeValue::Mode(mode)
    }
}

impl From<Direction> for AttributeValue {
    fn from(direction: Direction) -> Self {
        AttributeValue::Direction(direction)
    }
}

/// The externally visible device state.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct Attributes {
    pub light: bool,
    pub mode: Option<Mode>,
    pub direction: Option<Direction>,
    pub ventilation: bool,
    pub current_temperature: Option<i32>,
}

impl Attributes {
    pub fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        match attribute {
            Attribute::Light => Some(AttributeValue::Bool(self.light)),
            Attribute::Mode => self.mode.map(AttributeValue::Mode),
            Attribute::Direction => self.direction.map(AttributeValue::Direction),
            Attribute::Ventilation => Some(AttributeValue::Bool(self.ventilation)),
            Attribute::CurrentTemperature => self.current_temperature.map(AttributeValue::Number),
        }
    }

    /// Stores `value` into `attribute`.
    ///
    /// The value has to be of the attribute's kind; a `Mode` can't be stored
    /// into `light` and so on.
    pub fn store(&mut self, attribute: Attribute, value: AttributeValue) -> Result<(), Error> {
        match (attribute, value) {
            (Attribute::Light, AttributeValue::Bool(b)) => self.light = b,
            (Attribute::Ventilation, AttributeValue::Bool(b)) => self.ventilation = b,
            (Attribute::Mode, AttributeValue::Mode(m)) => self.mode = Some(m),
            (Attribute::Direction, AttributeValue::Direction(d)) => self.direction = Some(d),
            (Attribute::CurrentTemperature, AttributeValue::Number(t)) => self.current_temperature = Some(t),
            (attribute, _) => return Err(Error::InvalidEnumValue { attribute }),
        }
        Ok(())
    }

    /// Converts one raw field into its attribute value.
    fn decode_field(attribute: Attribute, raw: FieldValue) -> Result<AttributeValue, Error> {
        Ok(match attribute {
            Attribute::Light | Attribute::Ventilation => AttributeValue::Bool(raw.as_bool()),
            Attribute::Mode => AttributeValue::Mode(decode_mode(raw.as_int())?),
            Attribute::Direction => AttributeValue::Direction(
                u8::try_from(raw.as_int())
                    .map(decode_direction)
                    .unwrap_or(Direction::Oscillate),
            ),
            Attribute::CurrentTemperature => AttributeValue::Number(raw.as_int()),
        })
    }

    /// Applies every modeled field present in `fields`.
    ///
    /// Fields that fail to decode are reported in the diff and leave their
    /// attribute untouched; the rest of the frame still applies.
    pub fn decode(&mut self, fields: &FieldBag) -> AttributeDiff {
        let mut diff = AttributeDiff::default();
        for attribute in Attribute::ALL.iter().copied() {
            let raw = match fields.get(attribute.name()) {
                Some(raw) => raw,
                None => continue,
            };
            let decoded = Self::decode_field(attribute, raw)
                .and_then(|value| self.store(attribute, value).map(|_| value));
            match decoded {
                Ok(value) => diff.push_change(attribute, value),
                Err(e) => diff.push_error(e),
            }
        }
        diff
    }

    /// Number of fields in a set command built over `baseline`: read-only
    /// modeled fields are dropped and missing writable ones added.
    fn outbound_len(baseline: &FieldBag) -> usize {
        Attribute::ALL.iter().fold(baseline.len(), |len, attribute| {
            match (attribute.is_settable(), baseline.contains(attribute.name())) {
                (true, false) => len + 1,
                (false, true) => len - 1,
                _ => len,
            }
        })
    }

    /// Writes the settable attributes over `baseline`, then applies `change`.
    ///
    /// Read-only modeled fields are dropped from the baseline; every other
    /// field is carried over verbatim. A stored direction that was never set
    /// encodes as a sweep, but an unset mode can't be encoded and fails
    /// unless `change` provides one.
    pub fn encode(
        &self,
        mut baseline: FieldBag,
        change: (Attribute, AttributeValue),
    ) -> Result<FieldBag, Error> {
        for attribute in Attribute::ALL.iter().filter(|a| !a.is_settable()) {
            baseline.remove(attribute.name());
        }

        let (changed, value) = change;
        let mut attributes = *self;
        attributes.store(changed, value)?;

        let mode = match attributes.mode {
            Some(mode) => encode_mode(mode),
            None => return Err(Error::InvalidEnumValue { attribute: Attribute::Mode }),
        };
        let direction = attributes.direction.map_or(DIRECTION_OSCILLATE, encode_direction);

        baseline.insert(Attribute::Light.name(), attributes.light)?;
        baseline.insert(Attribute::Ventilation.name(), attributes.ventilation)?;
        baseline.insert(Attribute::Mode.name(), mode)?;
        baseline.insert(Attribute::Direction.name(), direction)?;
        Ok(baseline)
    }
}

/// The attributes a single status frame updated.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AttributeDiff {
    changes: Vec<(Attribute, AttributeValue), 5>,
    errors: Vec<Error, 5>,
}

impl AttributeDiff {
    // One slot per attribute, and each attribute is visited once per frame.
    fn push_change(&mut self, attribute: Attribute, value: AttributeValue) {
        let pushed = self.changes.push((attribute, value));
        debug_assert!(pushed.is_ok());
    }

    fn push_error(&mut self, error: Error) {
        let pushed = self.errors.push(error);
        debug_assert!(pushed.is_ok());
    }

    pub fn changes(&self) -> &[(Attribute, AttributeValue)] {
        &self.changes
    }

    /// Fields present in the frame that couldn't be decoded.
    pub fn errors(&self) -> &[Error] {
        &self.errors
    }

    pub fn get(&self, attribute: Attribute) -> Option<AttributeValue> {
        self.changes
            .iter()
            .find(|(a, _)| *a == attribute)
            .map(|(_, value)| *value)
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }
}

/// Whether a status frame has been seen yet.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SyncState {
    #[default]
    Uninitialized,
    /// Holds the field bag of the most recent status frame.
    Synced(FieldBag),
}

/// Attribute state plus the raw fields needed to build set commands.
///
/// Starts `Uninitialized`; the first `decode` moves it to `Synced` for good.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StateMachine {
    attributes: Attributes,
    state: SyncState,
}

impl StateMachine {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attributes(&self) -> &Attributes {
        &self.attributes
    }

    pub fn state(&self) -> &SyncState {
        &self.state
    }

    pub fn is_synced(&self) -> bool {
        matches!(self.state, SyncState::Synced(_))
    }

    /// Takes `fields` as the new baseline and updates the attributes it
    /// carries.
    ///
    /// A bag too full to take the missing writable fields later is rejected
    /// with `FieldBagFull` and leaves the state untouched, so a synced machine
    /// can always build a set command.
    pub fn decode(&mut self, fields: FieldBag) -> Result<AttributeDiff, Error> {
        if Attributes::outbound_len(&fields) > MAX_FIELDS {
            return Err(Error::FieldBagFull);
        }
        let diff = self.attributes.decode(&fields);
        self.state = SyncState::Synced(fields);
        Ok(diff)
    }

    /// Builds the outbound field bag for changing `attribute` to `value`.
    ///
    /// Returns `Ok(None)` for attributes the device won't accept writes to.
    /// The stored attributes are not modified.
    pub fn encode(
        &self,
        attribute: Attribute,
        value: AttributeValue,
    ) -> Result<Option<FieldBag>, Error> {
        if !attribute.is_settable() {
            return Ok(None);
        }
        match &self.state {
            SyncState::Uninitialized => Err(Error::UninitializedState),
            SyncState::Synced(fields) => self
                .attributes
                .encode(fields.clone(), (attribute, value))
                .map(Some),
        }
    }

    /// Records a value the caller has just commanded.
    pub fn store(&mut self, attribute: Attribute, value: AttributeValue) -> Result<(), Error> {
        self.attributes.store(attribute, value)
    }
}
