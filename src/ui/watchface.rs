//! Watch face drawing
//!
//! Draw order: background, centered time, centered date, separator, weather
//! row. The weather row only appears once a snapshot has synced, and its
//! horizontal layout is computed from the measured text and icon widths so
//! it stays centered as the strings change length.

use chrono::{NaiveDateTime, Timelike};
use embedded_graphics::{
    mono_font::MonoTextStyle,
    prelude::*,
    primitives::{Line, PrimitiveStyle},
    text::{renderer::TextRenderer, Baseline, Text},
};

use crate::display::ColorMode;
use crate::resources::{self, Dimens};
use crate::ui::icons::{IconPalette, ICON_SIZE};
use crate::ui::{RenderState, WeatherSnapshot};

/// `H:MM`, 24-hour, no leading zero on the hour.
pub fn format_time(now: NaiveDateTime) -> String {
    format!("{}:{:02}", now.hour(), now.minute())
}

/// `<Weekday>, <Month> <day> <year>`.
pub fn format_date(now: NaiveDateTime) -> String {
    now.format("%A, %B %-d %Y").to_string()
}

/// Computed weather row positions. Text origins are vertical centers
/// (drawn with [`Baseline::Middle`]).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WeatherRow {
    pub icon_origin: Option<Point>,
    pub high_origin: Point,
    pub low_origin: Point,
}

/// Lay out icon, high and low temperature left to right, centered as a
/// whole on the row at 3/4 screen height.
pub fn weather_row_layout(
    bounds: Size,
    dimens: &Dimens,
    has_icon: bool,
    high_width: u32,
    low_width: u32,
) -> WeatherRow {
    let y = bounds.height as i32 * 3 / 4 + dimens.weather_y_offset;
    let icon_span = if has_icon {
        ICON_SIZE as i32 + dimens.icon_padding
    } else {
        0
    };
    let total = icon_span + high_width as i32 + dimens.temperature_padding + low_width as i32;
    let x0 = (bounds.width as i32 - total) / 2;

    WeatherRow {
        icon_origin: has_icon.then(|| Point::new(x0, y - ICON_SIZE as i32 / 2)),
        high_origin: Point::new(x0 + icon_span, y),
        low_origin: Point::new(
            x0 + icon_span + high_width as i32 + dimens.temperature_padding,
            y,
        ),
    }
}

/// Render the complete face for `now`.
pub fn draw<D>(
    target: &mut D,
    state: &RenderState,
    snapshot: &WeatherSnapshot,
    now: NaiveDateTime,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let dimens = state.dimens();
    let bounds = target.bounding_box().size;

    if state.ambient {
        target.clear(ColorMode::BLACK)?;
    } else {
        target.clear(resources::BACKGROUND)?;
    }

    // Date and low temperature drop to plain white in ambient mode.
    let secondary = if state.ambient {
        resources::TEXT_PRIMARY
    } else {
        resources::TEXT_SECONDARY
    };

    let time_style = MonoTextStyle::new(dimens.time_font, resources::TEXT_PRIMARY);
    draw_centered(target, &format_time(now), time_style, dimens.time_y_offset)?;

    let date_style = MonoTextStyle::new(dimens.date_font, secondary);
    draw_centered(target, &format_date(now), date_style, dimens.date_y_offset)?;

    let mid_y = bounds.height as i32 / 2;
    Line::new(
        Point::new(bounds.width as i32 * 2 / 5, mid_y),
        Point::new(bounds.width as i32 * 3 / 5, mid_y),
    )
    .into_styled(PrimitiveStyle::with_stroke(secondary, 1))
    .draw(target)?;

    if snapshot.synced {
        draw_weather_row(target, state, snapshot, bounds, secondary)?;
    }

    Ok(())
}

fn draw_weather_row<D>(
    target: &mut D,
    state: &RenderState,
    snapshot: &WeatherSnapshot,
    bounds: Size,
    secondary: ColorMode,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let dimens = state.dimens();
    let high_style = MonoTextStyle::new(dimens.temperature_font, resources::TEXT_PRIMARY);
    let low_style = MonoTextStyle::new(dimens.temperature_font, secondary);

    let row = weather_row_layout(
        bounds,
        dimens,
        snapshot.icon.is_some(),
        text_width(&high_style, &snapshot.max_temp),
        text_width(&low_style, &snapshot.min_temp),
    );

    if let (Some(icon), Some(origin)) = (snapshot.icon, row.icon_origin) {
        icon.draw(target, origin, &icon_palette(state))?;
    }
    Text::with_baseline(&snapshot.max_temp, row.high_origin, high_style, Baseline::Middle)
        .draw(target)?;
    Text::with_baseline(&snapshot.min_temp, row.low_origin, low_style, Baseline::Middle)
        .draw(target)?;

    Ok(())
}

fn icon_palette(state: &RenderState) -> IconPalette {
    if !state.ambient {
        IconPalette::color()
    } else if state.low_bit_ambient {
        IconPalette::outline()
    } else {
        IconPalette::grayscale()
    }
}

fn text_width(style: &MonoTextStyle<'_, ColorMode>, text: &str) -> u32 {
    style
        .measure_string(text, Point::zero(), Baseline::Middle)
        .bounding_box
        .size
        .width
}

fn draw_centered<D>(
    target: &mut D,
    text: &str,
    style: MonoTextStyle<'_, ColorMode>,
    y_offset: i32,
) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let bounds = target.bounding_box().size;
    let width = text_width(&style, text) as i32;
    let origin = Point::new(
        (bounds.width as i32 - width) / 2,
        bounds.height as i32 / 2 + y_offset,
    );
    Text::with_baseline(text, origin, style, Baseline::Middle).draw(target)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::broadcast::WeatherUpdate;
    use crate::display::new_frame;
    use crate::resources::ScreenShape;
    use chrono::NaiveDate;

    fn at(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2026, 8, 6)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    fn synced_snapshot() -> WeatherSnapshot {
        let mut snapshot = WeatherSnapshot::new();
        snapshot.apply(&WeatherUpdate {
            max_temp: Some(25.0),
            min_temp: Some(14.0),
            condition_id: Some(800),
        });
        snapshot
    }

    #[test]
    fn time_has_no_leading_hour_zero() {
        assert_eq!(format_time(at(9, 5)), "9:05");
        assert_eq!(format_time(at(0, 7)), "0:07");
        assert_eq!(format_time(at(23, 59)), "23:59");
    }

    #[test]
    fn date_spells_out_weekday_and_month() {
        assert_eq!(format_date(at(12, 0)), "Thursday, August 6 2026");
    }

    #[test]
    fn weather_row_is_centered() {
        let dimens = ScreenShape::Round.dimens();
        let bounds = Size::new(240, 240);
        let row = weather_row_layout(bounds, dimens, true, 33, 33);

        let left = row.icon_origin.unwrap().x;
        let right = row.low_origin.x + 33;
        let slack = (left + right) - bounds.width as i32;
        assert!(slack.abs() <= 1, "row off-center by {slack}");
    }

    #[test]
    fn weather_row_orders_icon_high_low() {
        let dimens = ScreenShape::Round.dimens();
        let row = weather_row_layout(Size::new(240, 240), dimens, true, 30, 30);

        let icon_x = row.icon_origin.unwrap().x;
        assert!(icon_x < row.high_origin.x);
        assert!(row.high_origin.x < row.low_origin.x);
        assert_eq!(
            row.high_origin.x,
            icon_x + ICON_SIZE as i32 + dimens.icon_padding
        );
    }

    #[test]
    fn layout_adapts_to_text_width() {
        let dimens = ScreenShape::Round.dimens();
        let narrow = weather_row_layout(Size::new(240, 240), dimens, true, 20, 20);
        let wide = weather_row_layout(Size::new(240, 240), dimens, true, 44, 20);

        assert!(wide.icon_origin.unwrap().x < narrow.icon_origin.unwrap().x);
        assert!(wide.low_origin.x > narrow.low_origin.x);
        assert_eq!(
            wide.low_origin.x - wide.high_origin.x,
            44 + dimens.temperature_padding
        );
    }

    #[test]
    fn missing_icon_tightens_the_row() {
        let dimens = ScreenShape::Round.dimens();
        let with_icon = weather_row_layout(Size::new(240, 240), dimens, true, 30, 30);
        let without = weather_row_layout(Size::new(240, 240), dimens, false, 30, 30);

        assert_eq!(without.icon_origin, None);
        // The shorter row re-centers: text starts further left of where it
        // sat when the icon led the row.
        assert!(without.high_origin.x < with_icon.high_origin.x);
        assert!(without.high_origin.x > with_icon.icon_origin.unwrap().x);
    }

    #[test]
    fn draws_every_mode_without_error() {
        let snapshot = synced_snapshot();
        for shape in [ScreenShape::Round, ScreenShape::Square] {
            for (ambient, low_bit) in [(false, false), (true, false), (true, true)] {
                let mut state = RenderState::new(shape);
                state.ambient = ambient;
                state.low_bit_ambient = low_bit;

                let mut frame = new_frame();
                draw(&mut frame, &state, &snapshot, at(9, 41)).unwrap();
            }
        }
    }

    #[test]
    fn draws_before_first_sync_without_weather_row() {
        let mut frame = new_frame();
        let state = RenderState::new(ScreenShape::Round);
        draw(&mut frame, &state, &WeatherSnapshot::new(), at(9, 41)).unwrap();
    }
}
