//! Watch face engine
//!
//! A plain state-holding object behind the [`WatchFace`] lifecycle trait.
//! It owns every piece of mutable face state (render mode, weather snapshot,
//! clock, redraw timer, broadcast registrations) and is only ever touched by
//! the engine task, so there is no locking anywhere.

use embassy_time::Instant;

use crate::broadcast::{Broadcasts, TimezoneChange, TimezoneReceiver, WeatherReceiver, WeatherUpdate};
use crate::display::{new_frame, DisplayCanvas};
use crate::resources::ScreenShape;
use crate::system::time::Clock;
use crate::timer::RedrawTimer;
use crate::ui::{watchface, DeviceProperties, RenderState, WatchFace, WeatherSnapshot};

pub struct Engine<'a> {
    broadcasts: &'a Broadcasts,
    pub(crate) state: RenderState,
    pub(crate) snapshot: WeatherSnapshot,
    pub(crate) clock: Clock,
    pub(crate) timer: RedrawTimer,
    pub(crate) weather_rx: Option<WeatherReceiver<'a>>,
    pub(crate) timezone_rx: Option<TimezoneReceiver<'a>>,
    invalidated: bool,
}

impl<'a> Engine<'a> {
    pub fn new(broadcasts: &'a Broadcasts) -> Self {
        Self {
            broadcasts,
            state: RenderState::new(ScreenShape::Square),
            snapshot: WeatherSnapshot::new(),
            clock: Clock::system(),
            timer: RedrawTimer::new(),
            weather_rx: None,
            timezone_rx: None,
            invalidated: false,
        }
    }

    /// Periodic redraws run only while the face is visible and interactive.
    pub fn should_run_timer(&self) -> bool {
        self.state.visible && !self.state.ambient
    }

    pub fn is_registered(&self) -> bool {
        self.weather_rx.is_some() || self.timezone_rx.is_some()
    }

    /// Mark the face dirty. The engine task renders once per taken mark.
    fn invalidate(&mut self) {
        self.invalidated = true;
    }

    pub fn take_invalidated(&mut self) -> bool {
        core::mem::take(&mut self.invalidated)
    }

    /// Fold a weather broadcast into the snapshot. No redraw is requested;
    /// the next scheduled render picks the new values up.
    pub fn on_weather_update(&mut self, update: &WeatherUpdate) {
        log::debug!("weather update: {update:?}");
        self.snapshot.apply(update);
    }

    pub fn on_timezone_change(&mut self, change: TimezoneChange) {
        self.clock.set_offset(change.offset_secs);
    }

    /// An expired redraw deadline: repaint and re-arm on the next second
    /// boundary while still interactive.
    pub fn on_timer_fired(&mut self) {
        self.invalidate();
        let subsec_ms = self.clock.now().and_utc().timestamp_subsec_millis();
        self.timer
            .realign(Instant::now(), subsec_ms, self.should_run_timer());
    }

    /// Render the current state into a fresh frame. Draw failures are logged
    /// and never escape.
    pub fn render_frame(&self) -> DisplayCanvas {
        let mut frame = new_frame();
        if let Err(e) = watchface::draw(&mut frame, &self.state, &self.snapshot, self.clock.now()) {
            log::debug!("draw failed: {e:?}");
        }
        frame
    }

    fn register(&mut self) {
        if self.weather_rx.is_none() {
            self.weather_rx = self.broadcasts.subscribe_weather();
            if self.weather_rx.is_none() {
                log::warn!("weather subscriber table full");
            }
        }
        if self.timezone_rx.is_none() {
            self.timezone_rx = self.broadcasts.subscribe_timezone();
            if self.timezone_rx.is_none() {
                log::warn!("timezone subscriber table full");
            }
        }
    }

    fn unregister(&mut self) {
        self.weather_rx = None;
        self.timezone_rx = None;
    }

    /// Start or stop the redraw timer to match the current mode. Clears any
    /// pending deadline first, so at most one is ever outstanding.
    fn update_timer(&mut self) {
        self.timer.stop();
        if self.should_run_timer() {
            self.timer.restart(Instant::now());
        }
    }
}

impl WatchFace for Engine<'_> {
    fn on_visibility_changed(&mut self, visible: bool) {
        self.state.visible = visible;
        if visible {
            self.register();
            // The timezone may have changed while we were not watching.
            self.clock.sync_system_timezone();
        } else {
            self.unregister();
        }
        self.update_timer();
    }

    fn on_ambient_mode_changed(&mut self, ambient: bool) {
        if self.state.ambient != ambient {
            self.state.ambient = ambient;
            self.invalidate();
        }
        self.update_timer();
    }

    fn on_properties_changed(&mut self, properties: DeviceProperties) {
        self.state.low_bit_ambient = properties.low_bit_ambient;
    }

    fn on_apply_insets(&mut self, round: bool) {
        self.state.shape = if round {
            ScreenShape::Round
        } else {
            ScreenShape::Square
        };
    }

    fn on_time_tick(&mut self) {
        self.invalidate();
    }

    fn on_destroy(&mut self) {
        self.timer.stop();
        self.unregister();
    }
}
