//! sundial: a digital watch face with companion weather sync, run as a host
//! simulation.
//!
//! The platform pieces a real watch would provide (lifecycle callbacks, the
//! companion data layer) are tasks feeding the same channels a port would,
//! so the listener and engine run unchanged.

mod broadcast;
mod config;
mod display;
mod resources;
mod system;
mod timer;
mod ui;

use embassy_executor::Executor;
use embassy_futures::select::{select, select3, select4, Either, Either3, Either4};
use embassy_sync::blocking_mutex::raw::CriticalSectionRawMutex;
use embassy_sync::channel::Channel;
use embassy_time::{Duration, Ticker, Timer};
use static_cell::StaticCell;

use broadcast::{Broadcasts, TimezoneChange, WeatherUpdate};
use config::Config;
use display::Screen;
use resources::ScreenShape;
use system::listener;
use system::sync::{DataEvent, DataMap, KEY_CONDITION_ID, KEY_MAX_TEMP, KEY_MIN_TEMP, WEATHER_PATH};
use ui::engine::Engine;
use ui::{dispatch, DeviceProperties, LifecycleEvent};

// Communication channels
static DATA_EVENTS: Channel<CriticalSectionRawMutex, DataEvent, 8> = Channel::new();
static LIFECYCLE: Channel<CriticalSectionRawMutex, LifecycleEvent, 8> = Channel::new();
static BROADCASTS: Broadcasts = Broadcasts::new();

static EXECUTOR: StaticCell<Executor> = StaticCell::new();

/// Conditions the simulated phone cycles through.
const DEMO_CONDITIONS: [i32; 8] = [800, 801, 802, 500, 300, 211, 600, 741];

/// When a configured timezone shift is broadcast, in seconds after start.
const TIMEZONE_SHIFT_AT_SECS: u64 = 90;

/// Simulated phone: pushes a weather data item every sync period, plus the
/// occasional unrelated item the listener must ignore.
#[embassy_executor::task]
async fn companion_feed(period_secs: u64) {
    let mut ticker = Ticker::every(Duration::from_secs(period_secs.max(1)));
    let mut push: u64 = 0;
    loop {
        let swing = (push % 9) as f64;
        let condition = DEMO_CONDITIONS[(push as usize) % DEMO_CONDITIONS.len()];

        let mut map = DataMap::new();
        map.insert_f64(KEY_MAX_TEMP, 18.0 + swing);
        map.insert_f64(KEY_MIN_TEMP, 11.0 + swing / 2.0);
        map.insert_i32(KEY_CONDITION_ID, condition);
        DATA_EVENTS.send(DataEvent::changed(WEATHER_PATH, map)).await;

        if push % 4 == 3 {
            let mut settings = DataMap::new();
            settings.insert_i32("sundial.brightness", 3);
            DATA_EVENTS
                .send(DataEvent::changed("/sundial/settings", settings))
                .await;
        }
        if push % 6 == 5 {
            DATA_EVENTS.send(DataEvent::deleted(WEATHER_PATH)).await;
        }

        push += 1;
        ticker.next().await;
    }
}

/// Update listener: filters data events and republishes weather payloads on
/// the local broadcast bus.
#[embassy_executor::task]
async fn sync_listener() {
    let publisher = BROADCASTS.weather_publisher();
    loop {
        let event = DATA_EVENTS.receive().await;
        match listener::weather_update(&event) {
            Some(update) => {
                log::info!("weather changed at {}", event.path);
                publisher.publish_immediate(update);
            }
            None => log::debug!("ignoring {:?} at {}", event.event_type, event.path),
        }
    }
}

/// Simulated platform: delivers the lifecycle callbacks a watch host would.
#[embassy_executor::task]
async fn platform_script(cfg: Config) {
    LIFECYCLE
        .send(LifecycleEvent::InsetsApplied {
            round: cfg.screen_shape == ScreenShape::Round,
        })
        .await;
    LIFECYCLE
        .send(LifecycleEvent::PropertiesChanged(DeviceProperties {
            low_bit_ambient: cfg.low_bit_ambient,
        }))
        .await;
    LIFECYCLE.send(LifecycleEvent::VisibilityChanged(true)).await;

    let mut ambient = false;
    let mut elapsed: u64 = 0;
    let mut ticker = Ticker::every(Duration::from_secs(1));
    loop {
        ticker.next().await;
        elapsed += 1;

        if elapsed % 60 == 0 {
            LIFECYCLE.send(LifecycleEvent::TimeTick).await;
        }
        if cfg.ambient_toggle_secs > 0 && elapsed % cfg.ambient_toggle_secs == 0 {
            ambient = !ambient;
            log::info!("ambient mode {}", if ambient { "on" } else { "off" });
            LIFECYCLE.send(LifecycleEvent::AmbientChanged(ambient)).await;
        }
        if let Some(offset_secs) = cfg.timezone_shift_secs {
            if elapsed == TIMEZONE_SHIFT_AT_SECS {
                log::info!("broadcasting timezone change");
                BROADCASTS
                    .timezone_publisher()
                    .publish_immediate(TimezoneChange { offset_secs });
            }
        }
        if Some(elapsed) == cfg.run_secs {
            LIFECYCLE.send(LifecycleEvent::VisibilityChanged(false)).await;
            LIFECYCLE.send(LifecycleEvent::Destroy).await;
            break;
        }
    }
}

enum Wake {
    Lifecycle(LifecycleEvent),
    Weather(WeatherUpdate),
    Timezone(TimezoneChange),
    TimerFired,
}

/// Wait for whatever should wake the engine next. The selectable sources
/// depend on engine state: broadcast receivers exist only while visible and
/// the redraw deadline only while interactive.
async fn next_wake(engine: &mut Engine<'static>) -> Wake {
    let deadline = engine.timer.deadline();
    match (&mut engine.weather_rx, &mut engine.timezone_rx) {
        (Some(weather), Some(timezone)) => match deadline {
            Some(at) => match select4(
                LIFECYCLE.receive(),
                weather.next_message_pure(),
                timezone.next_message_pure(),
                Timer::at(at),
            )
            .await
            {
                Either4::First(event) => Wake::Lifecycle(event),
                Either4::Second(update) => Wake::Weather(update),
                Either4::Third(change) => Wake::Timezone(change),
                Either4::Fourth(()) => Wake::TimerFired,
            },
            None => match select3(
                LIFECYCLE.receive(),
                weather.next_message_pure(),
                timezone.next_message_pure(),
            )
            .await
            {
                Either3::First(event) => Wake::Lifecycle(event),
                Either3::Second(update) => Wake::Weather(update),
                Either3::Third(change) => Wake::Timezone(change),
            },
        },
        _ => match deadline {
            Some(at) => match select(LIFECYCLE.receive(), Timer::at(at)).await {
                Either::First(event) => Wake::Lifecycle(event),
                Either::Second(()) => Wake::TimerFired,
            },
            None => Wake::Lifecycle(LIFECYCLE.receive().await),
        },
    }
}

#[embassy_executor::task]
async fn watch_engine() {
    let mut engine = Engine::new(&BROADCASTS);
    let mut screen = Screen::new();
    log::info!("watch face engine up");

    loop {
        let wake = next_wake(&mut engine).await;
        let destroyed = matches!(wake, Wake::Lifecycle(LifecycleEvent::Destroy));
        match wake {
            Wake::Lifecycle(event) => dispatch(&mut engine, event),
            Wake::Weather(update) => engine.on_weather_update(&update),
            Wake::Timezone(change) => engine.on_timezone_change(change),
            Wake::TimerFired => engine.on_timer_fired(),
        }
        if engine.take_invalidated() {
            screen.present(engine.render_frame());
        }
        if destroyed {
            log::info!("engine destroyed after {} frames", screen.frames());
            std::process::exit(0);
        }
    }
}

fn main() {
    env_logger::builder()
        .filter_level(log::LevelFilter::Info)
        .parse_default_env()
        .init();

    let cfg = config::load_or_default();
    log::info!("starting sundial ({:?} panel)", cfg.screen_shape);

    let executor = EXECUTOR.init(Executor::new());
    executor.run(|spawner| {
        spawner.spawn(companion_feed(cfg.sync_period_secs)).unwrap();
        spawner.spawn(sync_listener()).unwrap();
        spawner.spawn(platform_script(cfg.clone())).unwrap();
        spawner.spawn(watch_engine()).unwrap();
    });
}
