//! Display collaborator
//!
//! The simulation draws through a handful of primitives addressed in
//! absolute pixel coordinates. How they are rasterized is up to the
//! implementation: the SPI panel goes through [`eg::EgDisplay`], tests use
//! [`RecordingDisplay`].

pub mod eg;
pub mod render;

pub use eg::EgDisplay;

/// Palette used by the game view
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Black,
    White,
    Red,
    Orange,
    Yellow,
    Green,
    Blue,
    Gray,
}

/// Text scale
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextSize {
    /// 6x10 glyphs
    Small,
    /// 10x20 glyphs
    Large,
}

impl TextSize {
    /// Glyph cell (width, height) in pixels
    pub fn glyph(&self) -> (i32, i32) {
        match self {
            TextSize::Small => (6, 10),
            TextSize::Large => (10, 20),
        }
    }
}

/// Drawing primitives the core relies on
pub trait Display {
    fn fill_screen(&mut self, color: Color);
    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color);
    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color);
    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color);
    /// `(x, y)` is the top-left corner of the first glyph
    fn text(&mut self, text: &str, x: i32, y: i32, size: TextSize, color: Color);

    /// Coarse liveness check, queried at level load
    fn is_responsive(&mut self) -> bool {
        true
    }
}

/// Discards everything
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDisplay;

impl Display for NullDisplay {
    fn fill_screen(&mut self, _color: Color) {}
    fn fill_rect(&mut self, _x: i32, _y: i32, _w: i32, _h: i32, _color: Color) {}
    fn fill_circle(&mut self, _cx: i32, _cy: i32, _radius: i32, _color: Color) {}
    fn line(&mut self, _x0: i32, _y0: i32, _x1: i32, _y1: i32, _color: Color) {}
    fn text(&mut self, _text: &str, _x: i32, _y: i32, _size: TextSize, _color: Color) {}
}

/// A recorded primitive call
#[derive(Debug, Clone, PartialEq)]
pub enum DrawCall {
    Screen(Color),
    Rect { x: i32, y: i32, w: i32, h: i32, color: Color },
    Circle { cx: i32, cy: i32, radius: i32, color: Color },
    Line { x0: i32, y0: i32, x1: i32, y1: i32, color: Color },
    Text { text: String, x: i32, y: i32, color: Color },
}

/// Keeps every call for inspection; can be told to fail its status check
#[derive(Debug, Clone)]
pub struct RecordingDisplay {
    pub calls: Vec<DrawCall>,
    pub responsive: bool,
}

impl Default for RecordingDisplay {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingDisplay {
    pub fn new() -> Self {
        Self {
            calls: Vec::new(),
            responsive: true,
        }
    }

    pub fn clear(&mut self) {
        self.calls.clear();
    }

    /// True if any recorded text call contains `needle`
    pub fn has_text(&self, needle: &str) -> bool {
        self.calls
            .iter()
            .any(|c| matches!(c, DrawCall::Text { text, .. } if text.contains(needle)))
    }
}

impl Display for RecordingDisplay {
    fn fill_screen(&mut self, color: Color) {
        self.calls.push(DrawCall::Screen(color));
    }

    fn fill_rect(&mut self, x: i32, y: i32, w: i32, h: i32, color: Color) {
        self.calls.push(DrawCall::Rect { x, y, w, h, color });
    }

    fn fill_circle(&mut self, cx: i32, cy: i32, radius: i32, color: Color) {
        self.calls.push(DrawCall::Circle { cx, cy, radius, color });
    }

    fn line(&mut self, x0: i32, y0: i32, x1: i32, y1: i32, color: Color) {
        self.calls.push(DrawCall::Line { x0, y0, x1, y1, color });
    }

    fn text(&mut self, text: &str, x: i32, y: i32, _size: TextSize, color: Color) {
        self.calls.push(DrawCall::Text {
            text: text.to_string(),
            x,
            y,
            color,
        });
    }

    fn is_responsive(&mut self) -> bool {
        self.responsive
    }
}
