//! Companion sync data layer
//!
//! The paired phone pushes versioned key-value payloads addressed by a
//! hierarchical path. Only the event shape is modelled here; transport and
//! pairing belong to the platform.

use std::collections::HashMap;

/// Path carrying weather payloads.
pub const WEATHER_PATH: &str = "/sundial/weather";

pub const KEY_MAX_TEMP: &str = "sundial.max_temp";
pub const KEY_MIN_TEMP: &str = "sundial.min_temp";
pub const KEY_CONDITION_ID: &str = "sundial.condition_id";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventType {
    Changed,
    Deleted,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    F64(f64),
    I32(i32),
}

/// Key-value payload of one data item.
///
/// Typed getters are tolerant: a missing key and a value of the wrong type
/// both read as absent.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DataMap {
    entries: HashMap<String, Value>,
}

impl DataMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert_f64(&mut self, key: &str, value: f64) {
        self.entries.insert(key.to_owned(), Value::F64(value));
    }

    pub fn insert_i32(&mut self, key: &str, value: i32) {
        self.entries.insert(key.to_owned(), Value::I32(value));
    }

    pub fn get_f64(&self, key: &str) -> Option<f64> {
        match self.entries.get(key) {
            Some(Value::F64(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn get_i32(&self, key: &str) -> Option<i32> {
        match self.entries.get(key) {
            Some(Value::I32(v)) => Some(*v),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// One change notification from the sync layer.
#[derive(Debug, Clone, PartialEq)]
pub struct DataEvent {
    pub event_type: EventType,
    pub path: String,
    pub map: DataMap,
}

impl DataEvent {
    pub fn changed(path: &str, map: DataMap) -> Self {
        Self {
            event_type: EventType::Changed,
            path: path.to_owned(),
            map,
        }
    }

    pub fn deleted(path: &str) -> Self {
        Self {
            event_type: EventType::Deleted,
            path: path.to_owned(),
            map: DataMap::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn typed_getters_return_inserted_values() {
        let mut map = DataMap::new();
        map.insert_f64(KEY_MAX_TEMP, 25.0);
        map.insert_i32(KEY_CONDITION_ID, 800);

        assert_eq!(map.get_f64(KEY_MAX_TEMP), Some(25.0));
        assert_eq!(map.get_i32(KEY_CONDITION_ID), Some(800));
    }

    #[test]
    fn missing_key_reads_as_absent() {
        let map = DataMap::new();
        assert_eq!(map.get_f64(KEY_MAX_TEMP), None);
        assert_eq!(map.get_i32(KEY_CONDITION_ID), None);
    }

    #[test]
    fn wrong_type_reads_as_absent() {
        let mut map = DataMap::new();
        map.insert_i32(KEY_MAX_TEMP, 25);

        assert_eq!(map.get_f64(KEY_MAX_TEMP), None);
        assert_eq!(map.get_i32(KEY_MAX_TEMP), Some(25));
    }

    #[test]
    fn deleted_event_carries_empty_map() {
        let event = DataEvent::deleted(WEATHER_PATH);
        assert_eq!(event.event_type, EventType::Deleted);
        assert!(event.map.is_empty());
    }
}
