//! Theme colors and shape-dependent layout metrics
//!
//! Round and rectangular panels get different offsets and fonts, selected
//! when the platform reports the window shape.

use embedded_graphics::{
    mono_font::{
        iso_8859_1::{FONT_10X20, FONT_8X13},
        MonoFont,
    },
    pixelcolor::{Rgb565, RgbColor, WebColors},
};
use profont::{PROFONT_18_POINT, PROFONT_24_POINT};
use serde::Deserialize;

/// Interactive-mode background.
pub const BACKGROUND: Rgb565 = Rgb565::CSS_MIDNIGHT_BLUE;
/// Primary text (time, high temperature).
pub const TEXT_PRIMARY: Rgb565 = Rgb565::WHITE;
/// Secondary text (date, low temperature) in interactive mode.
pub const TEXT_SECONDARY: Rgb565 = Rgb565::CSS_LIGHT_STEEL_BLUE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ScreenShape {
    Round,
    Square,
}

/// Layout metrics for one screen shape.
///
/// Vertical offsets are relative to the panel center, matching the draw
/// helpers in `ui::watchface`.
pub struct Dimens {
    pub time_font: &'static MonoFont<'static>,
    pub date_font: &'static MonoFont<'static>,
    pub temperature_font: &'static MonoFont<'static>,
    pub time_y_offset: i32,
    pub date_y_offset: i32,
    pub weather_y_offset: i32,
    pub icon_padding: i32,
    pub temperature_padding: i32,
}

const DIMENS_ROUND: Dimens = Dimens {
    time_font: &PROFONT_24_POINT,
    date_font: &FONT_8X13,
    temperature_font: &FONT_10X20,
    time_y_offset: -70,
    date_y_offset: -25,
    weather_y_offset: -30,
    icon_padding: 8,
    temperature_padding: 10,
};

// Rectangular panels lose corner clearance, so the face is drawn tighter.
const DIMENS_SQUARE: Dimens = Dimens {
    time_font: &PROFONT_18_POINT,
    date_font: &FONT_8X13,
    temperature_font: &FONT_10X20,
    time_y_offset: -64,
    date_y_offset: -22,
    weather_y_offset: -28,
    icon_padding: 6,
    temperature_padding: 8,
};

impl ScreenShape {
    pub fn dimens(self) -> &'static Dimens {
        match self {
            ScreenShape::Round => &DIMENS_ROUND,
            ScreenShape::Square => &DIMENS_SQUARE,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shapes_select_distinct_metrics() {
        let round = ScreenShape::Round.dimens();
        let square = ScreenShape::Square.dimens();
        assert_ne!(round.time_y_offset, square.time_y_offset);
        assert_ne!(
            round.time_font.character_size,
            square.time_font.character_size
        );
    }
}
