use serde::{Deserialize, Serialize};

/// Bounds for the user-adjustable stroke width, in logical units.
pub const MIN_STROKE_WIDTH: f32 = 1.0;
pub const MAX_STROKE_WIDTH: f32 = 10.0;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
    pub a: u8,
}

impl Color {
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::rgba(r, g, b, 255)
    }

    pub fn to_rgba_array(self) -> [u8; 4] {
        [self.r, self.g, self.b, self.a]
    }

    pub fn from_rgba_array(color: [u8; 4]) -> Self {
        Self::rgba(color[0], color[1], color[2], color[3])
    }
}

/// A position in logical (layout) units, relative to the surface origin.
/// Conversion to backing-store pixels happens inside the surface's draw
/// calls and nowhere else.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LogicalPoint {
    pub x: f32,
    pub y: f32,
}

impl LogicalPoint {
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }
}

/// Current pen configuration, shared by every stroke drawn after it is set.
/// Rendering reads this at the moment each dot or segment is produced, so a
/// change applies from the next primitive onward.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ToolState {
    pub width: f32,
    pub color: Color,
}

impl Default for ToolState {
    fn default() -> Self {
        Self {
            width: 3.0,
            color: Color::rgb(255, 255, 255),
        }
    }
}

impl ToolState {
    pub fn new(width: f32, color: Color) -> Self {
        Self {
            width: clamp_stroke_width(width),
            color,
        }
    }

    pub fn set_width(&mut self, width: f32) {
        self.width = clamp_stroke_width(width);
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

pub fn clamp_stroke_width(width: f32) -> f32 {
    width.clamp(MIN_STROKE_WIDTH, MAX_STROKE_WIDTH)
}
