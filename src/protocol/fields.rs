//! The generic field bag exchanged with the message component.
//!
//! A status frame parses into a `FieldBag` holding every field the firmware
//! reported, modeled or not. The same bag, with the modeled fields rewritten,
//! goes back out as the body of a set command, so fields this crate knows
//! nothing about survive the round trip untouched.

use heapless::{FnvIndexMap, String};

use crate::error::Error;

pub const MAX_FIELD_NAME_LEN: usize = 32;
pub const MAX_FIELDS: usize = 32;

pub type FieldName = String<MAX_FIELD_NAME_LEN>;

#[derive(Copy, Clone, Debug, Eq, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub enum FieldValue {
    Bool(bool),
    Int(i32),
}

impl FieldValue {
    /// Non-zero integers read as `true`.
    pub fn as_bool(&self) -> bool {
        match *self {
            FieldValue::Bool(b) => b,
            FieldValue::Int(i) => i != 0,
        }
    }

    pub fn as_int(&self) -> i32 {
        match *self {
            FieldValue::Bool(b) => b as i32,
            FieldValue::Int(i) => i,
        }
    }
}

impl From<bool> for FieldValue {
    fn from(b: bool) -> Self {
        FieldValue::Bool(b)
    }
}

impl From<i32> for FieldValue {
    fn from(i: i32) -> Self {
        FieldValue::Int(i)
    }
}

impl From<u8> for FieldValue {
    fn from(byte: u8) -> Self {
        FieldValue::Int(byte as i32)
    }
}

/// Insertion-ordered map of raw protocol fields.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct FieldBag {
    fields: FnvIndexMap<FieldName, FieldValue, MAX_FIELDS>,
}

fn field_name(name: &str) -> Result<FieldName, Error> {
    let mut key = FieldName::new();
    key.push_str(name).map_err(|_| Error::FieldBagFull)?;
    Ok(key)
}

impl FieldBag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a bag from `(name, value)` pairs, later duplicates winning.
    pub fn from_pairs<I, V>(pairs: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = (&'static str, V)>,
        V: Into<FieldValue>,
    {
        let mut bag = Self::new();
        for (name, value) in pairs {
            bag.insert(name, value)?;
        }
        Ok(bag)
    }

    /// Sets `name`, replacing any previous value in place.
    ///
    /// Fails when the name is too long to store or the bag has no room for
    /// another field.
    pub fn insert<V: Into<FieldValue>>(&mut self, name: &str, value: V) -> Result<(), Error> {
        let key = field_name(name)?;
        self.fields
            .insert(key, value.into())
            .map(|_| ())
            .map_err(|_| Error::FieldBagFull)
    }

    pub fn get(&self, name: &str) -> Option<FieldValue> {
        let key = field_name(name).ok()?;
        self.fields.get(&key).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn remove(&mut self, name: &str) -> Option<FieldValue> {
        let key = field_name(name).ok()?;
        self.fields.remove(&key)
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, FieldValue)> + '_ {
        self.fields.iter().map(|(name, value)| (name.as_str(), *value))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_and_get_test() {
        let mut bag = FieldBag::new();
        assert!(bag.is_empty());

        bag.insert("light", true).unwrap();
        bag.insert("mode", 2i32).unwrap();
        bag.insert("direction", 0xfdu8).unwrap();

        assert_eq!(bag.len(), 3);
        assert_eq!(bag.get("light"), Some(FieldValue::Bool(true)));
        assert_eq!(bag.get("mode"), Some(FieldValue::Int(2)));
        assert_eq!(bag.get("direction"), Some(FieldValue::Int(0xfd)));
        assert_eq!(bag.get("ventilation"), None);
    }

    #[test]
    fn overwrite_keeps_order_test() {
        let mut bag = FieldBag::from_pairs([("a", 1), ("b", 2), ("c", 3)]).unwrap();
        bag.insert("b", 7).unwrap();

        let mut names = bag.iter().map(|(name, _)| name);
        assert_eq!(names.next(), Some("a"));
        assert_eq!(names.next(), Some("b"));
        assert_eq!(names.next(), Some("c"));
        assert_eq!(names.next(), None);
        assert_eq!(bag.get("b"), Some(FieldValue::Int(7)));
    }

    #[test]
    fn remove_test() {
        let mut bag = FieldBag::from_pairs([("current_temperature", 24), ("extra_field", 7)]).unwrap();
        assert_eq!(bag.remove("current_temperature"), Some(FieldValue::Int(24)));
        assert_eq!(bag.remove("current_temperature"), None);
        assert!(!bag.contains("current_temperature"));
        assert!(bag.contains("extra_field"));
    }

    #[test]
    fn name_too_long_test() {
        let mut bag = FieldBag::new();
        let long = "a_field_name_that_does_not_fit_in_32_bytes";
        assert_eq!(bag.insert(long, 1), Err(Error::FieldBagFull));
        assert_eq!(bag.get(long), None);
    }

    #[test]
    fn full_bag_test() {
        const NAMES: [&str; MAX_FIELDS] = [
            "f00", "f01", "f02", "f03", "f04", "f05", "f06", "f07",
            "f08", "f09", "f10", "f11", "f12", "f13", "f14", "f15",
            "f16", "f17", "f18", "f19", "f20", "f21", "f22", "f23",
            "f24", "f25", "f26", "f27", "f28", "f29", "f30", "f31",
        ];
        let mut bag = FieldBag::new();
        for name in NAMES.iter() {
            bag.insert(name, 0).unwrap();
        }
        assert_eq!(bag.insert("one_more", 0), Err(Error::FieldBagFull));
        // Existing keys can still be updated.
        assert_eq!(bag.insert("f00", 1), Ok(()));
    }

    #[test]
    fn value_conversion_test() {
        assert!(FieldValue::Int(1).as_bool());
        assert!(!FieldValue::Int(0).as_bool());
        assert_eq!(FieldValue::Bool(true).as_int(), 1);
        assert_eq!(FieldValue::from(0xfdu8), FieldValue::Int(253));
    }
}
