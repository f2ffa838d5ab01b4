//! Math utilities and types
//!
//! Provides the fundamental math types for 2D positioning, hit-testing, and
//! blit destinations.

pub use nalgebra::Vector2;

/// 2D vector type
pub type Vec2 = Vector2<f32>;

/// Axis-aligned integer rectangle in window coordinates.
///
/// `x`/`y` is the top-left corner; width and height are in pixels. Used for
/// blit destinations and input hit-testing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Rect {
    /// Left edge in pixels
    pub x: i32,
    /// Top edge in pixels
    pub y: i32,
    /// Width in pixels
    pub w: u32,
    /// Height in pixels
    pub h: u32,
}

impl Rect {
    /// Create a new rectangle
    pub const fn new(x: i32, y: i32, w: u32, h: u32) -> Self {
        Self { x, y, w, h }
    }

    /// Exclusive right edge
    pub const fn right(&self) -> i32 {
        self.x + self.w as i32
    }

    /// Exclusive bottom edge
    pub const fn bottom(&self) -> i32 {
        self.y + self.h as i32
    }

    /// Whether the point lies inside the rectangle (right/bottom exclusive)
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Whether the rectangle covers zero pixels
    pub const fn is_empty(&self) -> bool {
        self.w == 0 || self.h == 0
    }
}
