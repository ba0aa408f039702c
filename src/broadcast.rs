//! Local broadcast bus
//!
//! Typed replacement for stringly-keyed system broadcasts: one channel per
//! action, subscribed while the face is visible and dropped on teardown.
//! Publishing is lossy by design; an unsubscribed engine simply misses the
//! event and catches up with the next one.

use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::pubsub::{ImmediatePublisher, PubSubChannel, Subscriber};

const CAP: usize = 4;
const SUBS: usize = 2;
const PUBS: usize = 2;

type Bus<T> = PubSubChannel<CriticalSectionRawMutex, T, CAP, SUBS, PUBS>;

pub type WeatherReceiver<'a> =
    Subscriber<'a, CriticalSectionRawMutex, WeatherUpdate, CAP, SUBS, PUBS>;
pub type TimezoneReceiver<'a> =
    Subscriber<'a, CriticalSectionRawMutex, TimezoneChange, CAP, SUBS, PUBS>;

/// Weather extras republished by the update listener. Each field is optional;
/// absent fields leave the consumer's previous value untouched.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct WeatherUpdate {
    pub max_temp: Option<f64>,
    pub min_temp: Option<f64>,
    pub condition_id: Option<u32>,
}

impl WeatherUpdate {
    pub fn is_empty(&self) -> bool {
        self.max_temp.is_none() && self.min_temp.is_none() && self.condition_id.is_none()
    }
}

/// Timezone-changed notification, carrying the new UTC offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimezoneChange {
    pub offset_secs: i32,
}

/// The broadcast channels of one watch process.
pub struct Broadcasts {
    weather: Bus<WeatherUpdate>,
    timezone: Bus<TimezoneChange>,
}

impl Broadcasts {
    pub const fn new() -> Self {
        Self {
            weather: PubSubChannel::new(),
            timezone: PubSubChannel::new(),
        }
    }

    pub fn weather_publisher(&self) -> ImmediatePublisher<'_, CriticalSectionRawMutex, WeatherUpdate, CAP, SUBS, PUBS> {
        self.weather.immediate_publisher()
    }

    pub fn timezone_publisher(&self) -> ImmediatePublisher<'_, CriticalSectionRawMutex, TimezoneChange, CAP, SUBS, PUBS> {
        self.timezone.immediate_publisher()
    }

    /// Register a weather receiver. `None` when the subscriber table is full.
    pub fn subscribe_weather(&self) -> Option<WeatherReceiver<'_>> {
        self.weather.subscriber().ok()
    }

    /// Register a timezone receiver. `None` when the subscriber table is full.
    pub fn subscribe_timezone(&self) -> Option<TimezoneReceiver<'_>> {
        self.timezone.subscriber().ok()
    }
}
