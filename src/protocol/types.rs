use core::fmt;
use core::str::FromStr;

use super::encoding::*;
use crate::device::Attribute;
use crate::error::Error;

/// Wire value for an oscillating louver.
pub const DIRECTION_OSCILLATE: u8 = 0xfd;

const DIRECTION_MIN: u8 = 60;
const DIRECTION_MAX: u8 = 100;
const DIRECTION_STEP: u8 = 10;

one_byte_encodable!(Mode, Direction);

/// Ventilation fan preset. The wire value is the position in `Mode::ALL`.
#[repr(u8)]
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Mode {
    Off  = 0,
    Low  = 1,
    High = 2,
}

impl Mode {
    pub const ALL: [Mode; 3] = [Mode::Off, Mode::Low, Mode::High];

    pub fn as_str(&self) -> &'static str {
        match self {
            Mode::Off => "Off",
            Mode::Low => "Low",
            Mode::High => "High",
        }
    }
}

impl OneByteEncodable for Mode {
    fn encoded_as_byte(&self) -> u8 {
        *self as u8
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Mode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Mode::ALL
            .iter()
            .copied()
            .find(|mode| mode.as_str() == s)
            .ok_or(Error::InvalidEnumValue { attribute: Attribute::Mode })
    }
}

/// Louver angle in degrees, or continuous sweep.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum Direction {
    #[cfg_attr(feature = "serde", serde(rename = "60"))]
    Deg60,
    #[cfg_attr(feature = "serde", serde(rename = "70"))]
    Deg70,
    #[cfg_attr(feature = "serde", serde(rename = "80"))]
    Deg80,
    #[cfg_attr(feature = "serde", serde(rename = "90"))]
    Deg90,
    #[cfg_attr(feature = "serde", serde(rename = "100"))]
    Deg100,
    Oscillate,
}

impl Direction {
    pub const ALL: [Direction; 6] = [
        Direction::Deg60,
        Direction::Deg70,
        Direction::Deg80,
        Direction::Deg90,
        Direction::Deg100,
        Direction::Oscillate,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Deg60 => "60",
            Direction::Deg70 => "70",
            Direction::Deg80 => "80",
            Direction::Deg90 => "90",
            Direction::Deg100 => "100",
            Direction::Oscillate => "Oscillate",
        }
    }

    fn from_index(index: u8) -> Self {
        match index {
            0 => Direction::Deg60,
            1 => Direction::Deg70,
            2 => Direction::Deg80,
            3 => Direction::Deg90,
            4 => Direction::Deg100,
            _ => Direction::Oscillate,
        }
    }
}

impl OneByteEncodable for Direction {
    fn encoded_as_byte(&self) -> u8 {
        match self {
            Direction::Deg60 => DIRECTION_MIN,
            Direction::Deg70 => DIRECTION_MIN + DIRECTION_STEP,
            Direction::Deg80 => DIRECTION_MIN + 2 * DIRECTION_STEP,
            Direction::Deg90 => DIRECTION_MIN + 3 * DIRECTION_STEP,
            Direction::Deg100 => DIRECTION_MIN + 4 * DIRECTION_STEP,
            Direction::Oscillate => DIRECTION_OSCILLATE,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Direction {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Direction::ALL
            .iter()
            .copied()
            .find(|direction| direction.as_str() == s)
            .ok_or(Error::InvalidEnumValue { attribute: Attribute::Direction })
    }
}

pub fn encode_mode(value: Mode) -> u8 {
    value.encoded_as_byte()
}

/// Raw values outside `0..=2` mean the firmware speaks a different dialect.
pub fn decode_mode(raw: i32) -> Result<Mode, Error> {
    match raw {
        0 => Ok(Mode::Off),
        1 => Ok(Mode::Low),
        2 => Ok(Mode::High),
        _ => Err(Error::IndexOutOfRange { attribute: Attribute::Mode, raw }),
    }
}

pub fn encode_direction(value: Direction) -> u8 {
    value.encoded_as_byte()
}

/// Table lookup by name. Names outside the table encode as a sweep.
pub fn encode_direction_name(name: &str) -> u8 {
    name.parse::<Direction>().map_or(DIRECTION_OSCILLATE, encode_direction)
}

/// Quantizes a raw angle into the direction table.
///
/// Values in `60..=100` round to the nearest 10 degree step
/// (`(raw - 60 + 5) / 10`), so 64 reads as 60 and 65 as 70. Anything outside
/// that range, including the 0xfd sweep marker, reads as `Oscillate`.
pub fn decode_direction(raw: u8) -> Direction {
    if raw > DIRECTION_MAX || raw < DIRECTION_MIN {
        Direction::Oscillate
    } else {
        Direction::from_index((raw - DIRECTION_MIN + DIRECTION_STEP / 2) / DIRECTION_STEP)
    }
}
