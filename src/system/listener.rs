//! Update listener
//!
//! Filters data-change events from the sync layer and republishes weather
//! payloads on the local broadcast bus. Events at other paths, and anything
//! that is not a change, are dropped without comment. There is no retry and
//! no acknowledgement; the engine only ever keeps the latest values, so
//! duplicate or reordered delivery is harmless.

use crate::broadcast::WeatherUpdate;
use crate::system::sync::{
    DataEvent, EventType, KEY_CONDITION_ID, KEY_MAX_TEMP, KEY_MIN_TEMP, WEATHER_PATH,
};

/// Extract the weather extras from one data event.
///
/// Returns `Some` only for `Changed` events at [`WEATHER_PATH`]. Each field
/// is read independently; a missing or mistyped entry is simply absent from
/// the update.
pub fn weather_update(event: &DataEvent) -> Option<WeatherUpdate> {
    if event.event_type != EventType::Changed || event.path != WEATHER_PATH {
        return None;
    }

    let condition_id = event
        .map
        .get_i32(KEY_CONDITION_ID)
        .and_then(|id| u32::try_from(id).ok());

    Some(WeatherUpdate {
        max_temp: event.map.get_f64(KEY_MAX_TEMP),
        min_temp: event.map.get_f64(KEY_MIN_TEMP),
        condition_id,
    })
}
