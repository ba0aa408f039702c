//! Watch face UI definitions

pub(crate) mod engine;
pub(crate) mod icons;
pub(crate) mod watchface;

use crate::broadcast::WeatherUpdate;
use crate::resources::{Dimens, ScreenShape};
use self::icons::WeatherIcon;

/// Temperature rendered for the weather row, e.g. `25°`.
pub fn format_temperature(value: f64) -> String {
    format!("{value:.0}°")
}

/// Latest weather received from the phone. Never persisted; survives only
/// as long as the engine instance.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct WeatherSnapshot {
    pub max_temp: String,
    pub min_temp: String,
    pub icon: Option<WeatherIcon>,
    pub synced: bool,
}

impl WeatherSnapshot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold a broadcast into the snapshot. Fields update independently;
    /// absent fields keep their previous values. An unknown condition id is
    /// treated like a malformed field and skipped. Any non-empty update
    /// marks the snapshot synced.
    pub fn apply(&mut self, update: &WeatherUpdate) {
        if update.is_empty() {
            return;
        }

        if let Some(max) = update.max_temp {
            self.max_temp = format_temperature(max);
        }
        if let Some(min) = update.min_temp {
            self.min_temp = format_temperature(min);
        }
        if let Some(id) = update.condition_id {
            match WeatherIcon::for_condition(id) {
                Some(icon) => self.icon = Some(icon),
                None => log::debug!("no icon for condition {id}, keeping previous"),
            }
        }
        self.synced = true;
    }
}

/// Low-bit-ambient capability reported by the platform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DeviceProperties {
    pub low_bit_ambient: bool,
}

/// Mutable render mode, owned by the engine and driven entirely by platform
/// lifecycle callbacks.
pub struct RenderState {
    pub visible: bool,
    pub ambient: bool,
    pub low_bit_ambient: bool,
    pub shape: ScreenShape,
}

impl RenderState {
    pub fn new(shape: ScreenShape) -> Self {
        Self {
            visible: false,
            ambient: false,
            low_bit_ambient: false,
            shape,
        }
    }

    pub fn dimens(&self) -> &'static Dimens {
        self.shape.dimens()
    }
}

/// Platform lifecycle callbacks, in the order the host delivers them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LifecycleEvent {
    VisibilityChanged(bool),
    AmbientChanged(bool),
    PropertiesChanged(DeviceProperties),
    InsetsApplied { round: bool },
    TimeTick,
    Destroy,
}

/// The lifecycle surface of a watch face engine.
pub trait WatchFace {
    fn on_visibility_changed(&mut self, visible: bool);
    fn on_ambient_mode_changed(&mut self, ambient: bool);
    fn on_properties_changed(&mut self, properties: DeviceProperties);
    fn on_apply_insets(&mut self, round: bool);
    fn on_time_tick(&mut self);
    fn on_destroy(&mut self);
}

/// Route one platform callback to the face.
pub fn dispatch<F: WatchFace>(face: &mut F, event: LifecycleEvent) {
    match event {
        LifecycleEvent::VisibilityChanged(visible) => face.on_visibility_changed(visible),
        LifecycleEvent::AmbientChanged(ambient) => face.on_ambient_mode_changed(ambient),
        LifecycleEvent::PropertiesChanged(properties) => face.on_properties_changed(properties),
        LifecycleEvent::InsetsApplied { round } => face.on_apply_insets(round),
        LifecycleEvent::TimeTick => face.on_time_tick(),
        LifecycleEvent::Destroy => face.on_destroy(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_update_fills_the_snapshot() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.apply(&WeatherUpdate {
            max_temp: Some(25.0),
            min_temp: Some(14.0),
            condition_id: Some(800),
        });

        assert_eq!(snapshot.max_temp, "25°");
        assert_eq!(snapshot.min_temp, "14°");
        assert_eq!(snapshot.icon, Some(WeatherIcon::Clear));
        assert!(snapshot.synced);
    }

    #[test]
    fn partial_update_keeps_other_fields() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.apply(&WeatherUpdate {
            max_temp: Some(25.0),
            min_temp: Some(14.0),
            condition_id: Some(800),
        });
        snapshot.apply(&WeatherUpdate {
            min_temp: Some(9.0),
            ..WeatherUpdate::default()
        });

        assert_eq!(snapshot.max_temp, "25°");
        assert_eq!(snapshot.min_temp, "9°");
        assert_eq!(snapshot.icon, Some(WeatherIcon::Clear));
    }

    #[test]
    fn empty_update_does_not_mark_synced() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.apply(&WeatherUpdate::default());
        assert!(!snapshot.synced);
        assert_eq!(snapshot, WeatherSnapshot::new());
    }

    #[test]
    fn unknown_condition_keeps_previous_icon() {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.apply(&WeatherUpdate {
            condition_id: Some(601),
            ..WeatherUpdate::default()
        });
        snapshot.apply(&WeatherUpdate {
            condition_id: Some(999),
            ..WeatherUpdate::default()
        });

        assert_eq!(snapshot.icon, Some(WeatherIcon::Snow));
        assert!(snapshot.synced);
    }

    #[test]
    fn negative_temperature_formats_with_sign() {
        assert_eq!(format_temperature(-3.0), "-3°");
        assert_eq!(format_temperature(0.0), "0°");
    }
}
