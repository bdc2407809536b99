//! `embedded-graphics` adapter
//!
//! Wraps any RGB565 draw target (an ST7789/ILI9341 driver, a framebuffer,
//! the mock display in tests) so the game view can draw on it.

use embedded_graphics::{
    mono_font::{
        MonoTextStyle,
        ascii::{FONT_6X10, FONT_10X20},
    },
    pixelcolor::{Rgb565, WebColors},
    prelude::*,
    primitives::{Circle, Line, PrimitiveStyle, Rectangle},
    text::{Baseline, Text},
};

use super::{Color, Display, TextSize};

impl From<Color> for Rgb565 {
    fn from(color: Color) -> Self {
        match color {
            Color::Black => Rgb565::BLACK,
            Color::White => Rgb565::WHITE,
            Color::Red => Rgb565::RED,
            Color::Orange => Rgb565::CSS_ORANGE,
            Color::Yellow => Rgb565::YELLOW,
            Color::Green => Rgb565::GREEN,
            Color::Blue => Rgb565::BLUE,
            Color::Gray => Rgb565::CSS_GRAY,
        }
    }
}

/// Game display over an `embedded-graphics` draw target.
///
/// Draw errors are logged and latch the display as unresponsive, which the
/// next level load reports.
pub struct EgDisplay<D> {
    target: D,
    faulted: bool,
}

impl<D> EgDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    pub fn new(target: D) -> Self {
        Self {
            target,
            faulted: false,
        }
    }

    pub fn target(&self) -> &D {
        &self.target
    }

    pub fn into_inner(self) -> D {
        self.target
    }

    fn check<T>(&mut self, what: &str, result: Result<T, D::Error>) {
        if let Err(e) = result {
            if !self.faulted {
                log::warn!("display {} failed: {:?}", what, e);
            }
            self.faulted = true;
        }
    }
}

impl<D> Display for EgDisplay<D>
where
    D: DrawTarget<Color = Rgb565>,
    D::Error: core::fmt::Debug,
{
    fn fill_screen(&mut self, color: Color) {
        let result = self.target.clear(color.into());
        self.check("clear", result);
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        if w <= 0 || h <= 0 {
            return;
        }
        let result = Rectangle::new(Point::new(x, y), Size::new(w as u32, h as u32))
            .into_styled(PrimitiveStyle::with_fill(color.into()))
            .draw(&mut self.target);
        self.check("rect", result);
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        if radius < 0 {
            return;
        }
        let diameter = (2 * radius + 1) as u32;
        let result = Circle::with_center(Point::new(cx, cy), diameter)
            .into_styled(PrimitiveStyle::with_fill(color.into()))
            .draw(&mut self.target);
        self.check("circle", result);
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        let result = Line::new(Point::new(x0, y0), Point::new(x1, y1))
            .into_styled(PrimitiveStyle::with_stroke(color.into(), 1))
            .draw(&mut self.target);
        self.check("line", result);
    }

    fn text(&mut self, text: &str, x: i32, y: i32, size: TextSize, color: Color) {
        let font = match size {
            TextSize::Small => &FONT_6X10,
            TextSize::Large => &FONT_10X20,
        };
        let style = MonoTextStyle::new(font, color.into());
        let result = Text::with_baseline(text, Point::new(x, y), style, Baseline::Top).draw(&mut self.target);
        self.check("text", result);
    }

    fn is_responsive(&mut self) -> bool {
        !self.faulted
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_graphics::mock_display::MockDisplay;

    fn mock() -> EgDisplay<MockDisplay<Rgb565>> {
        let mut target = MockDisplay::new();
        target.set_allow_out_of_bounds_drawing(true);
        target.set_allow_overdraw(true);
        EgDisplay::new(target)
    }

    #[test]
    fn test_fill_rect_paints_pixels() {
        let mut display = mock();
        display.fill_rect(2, 3, 4, 2, Color::Red);
        let target = display.target();
        assert_eq!(target.get_pixel(Point::new(2, 3)), Some(Rgb565::RED));
        assert_eq!(target.get_pixel(Point::new(5, 4)), Some(Rgb565::RED));
        assert_eq!(target.get_pixel(Point::new(6, 3)), None);
    }

    #[test]
    fn test_circle_centered() {
        let mut display = mock();
        display.fill_circle(10, 10, 3, Color::White);
        assert_eq!(display.target().get_pixel(Point::new(10, 10)), Some(Rgb565::WHITE));
        assert_eq!(display.target().get_pixel(Point::new(10, 12)), Some(Rgb565::WHITE));
        assert!(display.is_responsive());
    }

    #[test]
    fn test_empty_rect_is_ignored() {
        let mut display = mock();
        display.fill_rect(0, 0, 0, 5, Color::Green);
        assert_eq!(display.target().get_pixel(Point::new(0, 0)), None);
    }
}
