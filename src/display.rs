//! Simulated watch panel
//!
//! Frames are rendered into an in-memory canvas and handed to the `Screen`,
//! which stands in for the LCD flush path.

use embedded_canvas::Canvas;
use embedded_graphics::{geometry::Size, pixelcolor::Rgb565, prelude::*};

pub const LCD_W: u32 = 240;
pub const LCD_H: u32 = 240;

pub type ColorMode = Rgb565;
pub type DisplayCanvas = Canvas<ColorMode>;

/// Allocate a blank full-screen frame.
pub fn new_frame() -> DisplayCanvas {
    Canvas::new(Size::new(LCD_W, LCD_H))
}

/// Receives presented frames.
#[derive(Default)]
pub struct Screen {
    frames: u64,
}

impl Screen {
    pub fn new() -> Self {
        Self::default()
    }

    /// Accept a finished frame.
    pub fn present(&mut self, frame: DisplayCanvas) {
        self.frames += 1;
        let size = frame.bounding_box().size;
        log::debug!(
            "presented frame {} ({}x{})",
            self.frames,
            size.width,
            size.height
        );
        if self.frames % 60 == 0 {
            log::info!("{} frames presented", self.frames);
        }
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn present_counts_frames() {
        let mut screen = Screen::new();
        screen.present(new_frame());
        screen.present(new_frame());
        assert_eq!(screen.frames(), 2);
    }
}
