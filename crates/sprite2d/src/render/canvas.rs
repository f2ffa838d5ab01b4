//! Software canvas
//!
//! A plain `u32` framebuffer with the handful of drawing primitives the demo
//! family needs: clear, filled/outlined rectangles, and clipped image blits.
//! The canvas is the "renderer" half of the app context; presentation is the
//! window backend's job.

use crate::assets::ImageData;
use crate::foundation::math::Rect;
use crate::render::ContextError;

/// Pixels above this count are rejected at creation time.
const MAX_PIXELS: u64 = 1 << 26;

/// Row-major `0xAARRGGBB` framebuffer
pub struct Canvas {
    width: u32,
    height: u32,
    pixels: Vec<u32>,
}

impl Canvas {
    /// Allocate a canvas for the given drawable size.
    ///
    /// Fails with [`ContextError::Renderer`] on degenerate or oversized
    /// dimensions.
    pub fn new(width: u32, height: u32) -> Result<Self, ContextError> {
        if width == 0 || height == 0 {
            return Err(ContextError::Renderer(format!(
                "drawable size {}x{} has zero area",
                width, height
            )));
        }
        let area = u64::from(width) * u64::from(height);
        if area > MAX_PIXELS {
            return Err(ContextError::Renderer(format!(
                "drawable size {}x{} exceeds the framebuffer limit",
                width, height
            )));
        }

        Ok(Self {
            width,
            height,
            pixels: vec![0; area as usize],
        })
    }

    /// Drawable width in pixels
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Drawable height in pixels
    pub fn height(&self) -> u32 {
        self.height
    }

    /// The full drawable as a rectangle at the origin
    pub fn bounds(&self) -> Rect {
        Rect::new(0, 0, self.width, self.height)
    }

    /// The packed pixel rows, for presentation
    pub fn buffer(&self) -> &[u32] {
        &self.pixels
    }

    /// Fill the whole drawable with one color
    pub fn clear(&mut self, color: u32) {
        self.pixels.fill(color);
    }

    /// Fill a rectangle, clipped to the drawable
    pub fn fill_rect(&mut self, rect: &Rect, color: u32) {
        let Some((x0, y0, x1, y1)) = self.clip(rect) else {
            return;
        };
        for y in y0..y1 {
            let row = (y * self.width as usize + x0)..(y * self.width as usize + x1);
            self.pixels[row].fill(color);
        }
    }

    /// Draw a one-pixel rectangle outline, clipped to the drawable
    pub fn draw_rect(&mut self, rect: &Rect, color: u32) {
        if rect.is_empty() {
            return;
        }
        let top = Rect::new(rect.x, rect.y, rect.w, 1);
        let bottom = Rect::new(rect.x, rect.bottom() - 1, rect.w, 1);
        let left = Rect::new(rect.x, rect.y, 1, rect.h);
        let right = Rect::new(rect.right() - 1, rect.y, 1, rect.h);
        self.fill_rect(&top, color);
        self.fill_rect(&bottom, color);
        self.fill_rect(&left, color);
        self.fill_rect(&right, color);
    }

    /// Blit an image with its top-left corner at (dx, dy), clipped to the
    /// drawable. Fully transparent pixels are skipped.
    pub fn blit(&mut self, image: &ImageData, dx: i32, dy: i32) {
        let dest = Rect::new(dx, dy, image.width, image.height);
        let Some((x0, y0, x1, y1)) = self.clip(&dest) else {
            return;
        };

        for y in y0..y1 {
            let sy = (y as i32 - dy) as u32;
            for x in x0..x1 {
                let sx = (x as i32 - dx) as u32;
                let pixel = image.pixels[(sy * image.width + sx) as usize];
                if pixel >> 24 != 0 {
                    self.pixels[y * self.width as usize + x] = pixel;
                }
            }
        }
    }

    /// Pixel at (x, y), or `None` outside the drawable
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }

    /// Intersect a rectangle with the drawable, as usize spans.
    fn clip(&self, rect: &Rect) -> Option<(usize, usize, usize, usize)> {
        let x0 = rect.x.max(0);
        let y0 = rect.y.max(0);
        let x1 = rect.right().min(self.width as i32);
        let y1 = rect.bottom().min(self.height as i32);
        if x0 >= x1 || y0 >= y1 {
            return None;
        }
        Some((x0 as usize, y0 as usize, x1 as usize, y1 as usize))
    }
}
