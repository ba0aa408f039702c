//! Weather condition icons
//!
//! Condition ids follow the OpenWeatherMap numbering pushed by the phone.
//! Icons are drawn from primitives so the same artwork can render in color,
//! grayscale (ambient) or plain outline (low-bit ambient).

use embedded_graphics::{
    pixelcolor::{RgbColor, WebColors},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle, RoundedRectangle, Triangle},
};

use crate::display::ColorMode;

/// Icon bounding box edge, in pixels.
pub const ICON_SIZE: u32 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WeatherIcon {
    Storm,
    LightRain,
    Rain,
    Snow,
    Fog,
    Clear,
    LightClouds,
    Clouds,
}

impl WeatherIcon {
    /// Map a condition id to an icon. Unknown ids map to `None`.
    pub fn for_condition(id: u32) -> Option<Self> {
        match id {
            200..=232 => Some(Self::Storm),
            300..=321 => Some(Self::LightRain),
            500..=504 | 520..=531 => Some(Self::Rain),
            511 | 600..=622 => Some(Self::Snow),
            701..=761 => Some(Self::Fog),
            781 => Some(Self::Storm),
            800 => Some(Self::Clear),
            801 => Some(Self::LightClouds),
            802..=804 => Some(Self::Clouds),
            _ => None,
        }
    }

    /// Draw the icon into its [`ICON_SIZE`] box at `top_left`.
    pub fn draw<D>(self, target: &mut D, top_left: Point, palette: &IconPalette) -> Result<(), D::Error>
    where
        D: DrawTarget<Color = ColorMode>,
    {
        match self {
            Self::Clear => sun(target, top_left + Point::new(16, 16), 14, palette),
            Self::LightClouds => {
                sun(target, top_left + Point::new(11, 11), 10, palette)?;
                cloud(target, top_left + Point::new(8, 12), palette.cloud, palette)
            }
            Self::Clouds => {
                cloud(target, top_left + Point::new(2, 4), palette.shade, palette)?;
                cloud(target, top_left + Point::new(8, 12), palette.cloud, palette)
            }
            Self::LightRain => {
                cloud(target, top_left + Point::new(4, 4), palette.cloud, palette)?;
                drops(target, top_left, &[6, 18], palette)
            }
            Self::Rain => {
                cloud(target, top_left + Point::new(4, 4), palette.cloud, palette)?;
                drops(target, top_left, &[4, 12, 20], palette)
            }
            Self::Storm => {
                cloud(target, top_left + Point::new(4, 4), palette.shade, palette)?;
                bolt(target, top_left, palette)
            }
            Self::Snow => {
                cloud(target, top_left + Point::new(4, 4), palette.cloud, palette)?;
                flakes(target, top_left, &[5, 13, 21], palette)
            }
            Self::Fog => haze(target, top_left, palette),
        }
    }
}

/// Colors for one rendering mode.
pub struct IconPalette {
    sun: ColorMode,
    cloud: ColorMode,
    shade: ColorMode,
    drop: ColorMode,
    flake: ColorMode,
    haze: ColorMode,
    bolt: ColorMode,
    outline: bool,
}

impl IconPalette {
    /// Full-color interactive rendering.
    pub fn color() -> Self {
        Self {
            sun: ColorMode::CSS_GOLD,
            cloud: ColorMode::CSS_GAINSBORO,
            shade: ColorMode::CSS_SLATE_GRAY,
            drop: ColorMode::CSS_DEEP_SKY_BLUE,
            flake: ColorMode::WHITE,
            haze: ColorMode::CSS_LIGHT_GRAY,
            bolt: ColorMode::CSS_GOLD,
            outline: false,
        }
    }

    /// Desaturated ambient rendering.
    pub fn grayscale() -> Self {
        let c = Self::color();
        Self {
            sun: grayscale(c.sun),
            cloud: grayscale(c.cloud),
            shade: grayscale(c.shade),
            drop: grayscale(c.drop),
            flake: grayscale(c.flake),
            haze: grayscale(c.haze),
            bolt: grayscale(c.bolt),
            outline: false,
        }
    }

    /// Binary-safe rendering for low-bit ambient panels: white strokes, no
    /// fills or shading.
    pub fn outline() -> Self {
        Self {
            sun: ColorMode::WHITE,
            cloud: ColorMode::WHITE,
            shade: ColorMode::WHITE,
            drop: ColorMode::WHITE,
            flake: ColorMode::WHITE,
            haze: ColorMode::WHITE,
            bolt: ColorMode::WHITE,
            outline: true,
        }
    }

    fn style(&self, color: ColorMode) -> PrimitiveStyle<ColorMode> {
        if self.outline {
            PrimitiveStyle::with_stroke(color, 1)
        } else {
            PrimitiveStyle::with_fill(color)
        }
    }
}

/// Drop color saturation, keeping luma.
pub fn grayscale(color: ColorMode) -> ColorMode {
    let r = u32::from(color.r()) * 255 / 31;
    let g = u32::from(color.g()) * 255 / 63;
    let b = u32::from(color.b()) * 255 / 31;
    let y = (299 * r + 587 * g + 114 * b) / 1000;
    ColorMode::new(
        (y * 31 / 255) as u8,
        (y * 63 / 255) as u8,
        (y * 31 / 255) as u8,
    )
}

fn sun<D>(target: &mut D, center: Point, diameter: u32, palette: &IconPalette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let ray = PrimitiveStyle::with_stroke(palette.sun, 1);
    let reach = diameter as i32 / 2 + 4;
    for (dx, dy) in [(1, 0), (-1, 0), (0, 1), (0, -1), (1, 1), (1, -1), (-1, 1), (-1, -1)] {
        Line::new(center, center + Point::new(dx * reach, dy * reach))
            .into_styled(ray)
            .draw(target)?;
    }
    Circle::with_center(center, diameter)
        .into_styled(palette.style(palette.sun))
        .draw(target)
}

fn cloud<D>(target: &mut D, top_left: Point, color: ColorMode, palette: &IconPalette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let style = palette.style(color);
    Circle::new(top_left + Point::new(2, 0), 12)
        .into_styled(style)
        .draw(target)?;
    Circle::new(top_left + Point::new(10, 2), 10)
        .into_styled(style)
        .draw(target)?;
    RoundedRectangle::with_equal_corners(
        Rectangle::new(top_left + Point::new(0, 6), Size::new(20, 8)),
        Size::new(3, 3),
    )
    .into_styled(style)
    .draw(target)
}

fn drops<D>(target: &mut D, top_left: Point, xs: &[i32], palette: &IconPalette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let style = PrimitiveStyle::with_stroke(palette.drop, 1);
    for &x in xs {
        Line::new(
            top_left + Point::new(x + 4, 22),
            top_left + Point::new(x, 30),
        )
        .into_styled(style)
        .draw(target)?;
    }
    Ok(())
}

fn flakes<D>(target: &mut D, top_left: Point, xs: &[i32], palette: &IconPalette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let style = PrimitiveStyle::with_stroke(palette.flake, 1);
    for &x in xs {
        let center = top_left + Point::new(x, 26);
        Line::new(center + Point::new(-2, 0), center + Point::new(2, 0))
            .into_styled(style)
            .draw(target)?;
        Line::new(center + Point::new(0, -2), center + Point::new(0, 2))
            .into_styled(style)
            .draw(target)?;
    }
    Ok(())
}

fn bolt<D>(target: &mut D, top_left: Point, palette: &IconPalette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let style = palette.style(palette.bolt);
    Triangle::new(
        top_left + Point::new(17, 16),
        top_left + Point::new(11, 25),
        top_left + Point::new(16, 25),
    )
    .into_styled(style)
    .draw(target)?;
    Triangle::new(
        top_left + Point::new(19, 21),
        top_left + Point::new(13, 21),
        top_left + Point::new(14, 31),
    )
    .into_styled(style)
    .draw(target)
}

fn haze<D>(target: &mut D, top_left: Point, palette: &IconPalette) -> Result<(), D::Error>
where
    D: DrawTarget<Color = ColorMode>,
{
    let style = PrimitiveStyle::with_stroke(palette.haze, 2);
    for y in [8, 14, 20, 26] {
        Line::new(
            top_left + Point::new(3, y),
            top_left + Point::new(ICON_SIZE as i32 - 3, y),
        )
        .into_styled(style)
        .draw(target)?;
    }
    Ok(())
}
