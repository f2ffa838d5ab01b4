//! Image loading utilities for framebuffer blitting
//!
//! Decodes PNG, BMP, and other supported formats into packed `0xAARRGGBB`
//! pixel rows ready for the software canvas.

use crate::assets::AssetError;
use std::path::Path;

/// Decoded image data ready for blitting
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImageData {
    /// Packed `0xAARRGGBB` pixels, row-major
    pub pixels: Vec<u32>,
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
}

impl ImageData {
    /// Load an image from a file path
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, AssetError> {
        let path_ref = path.as_ref();

        log::debug!("Loading image from: {:?}", path_ref);

        let img = image::open(path_ref).map_err(|e| AssetError::LoadFailed {
            source_id: path_ref.display().to_string(),
            reason: e.to_string(),
        })?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::info!("Loaded image {}x{} from {:?}", width, height, path_ref);

        Ok(Self::from_rgba(width, height, rgba_img.as_raw()))
    }

    /// Load an image from memory (useful for embedded resources)
    pub fn from_bytes(source_id: &str, bytes: &[u8]) -> Result<Self, AssetError> {
        let img = image::load_from_memory(bytes).map_err(|e| AssetError::LoadFailed {
            source_id: source_id.to_string(),
            reason: e.to_string(),
        })?;

        let rgba_img = img.to_rgba8();
        let (width, height) = rgba_img.dimensions();

        log::debug!("Loaded image {}x{} from memory ({})", width, height, source_id);

        Ok(Self::from_rgba(width, height, rgba_img.as_raw()))
    }

    /// Create a solid color image (useful for testing and placeholder art)
    pub fn solid_color(width: u32, height: u32, rgba: [u8; 4]) -> Self {
        let pixel = pack_rgba(rgba[0], rgba[1], rgba[2], rgba[3]);
        Self {
            pixels: vec![pixel; (width * height) as usize],
            width,
            height,
        }
    }

    /// Pack raw RGBA bytes into `0xAARRGGBB` rows
    fn from_rgba(width: u32, height: u32, rgba: &[u8]) -> Self {
        let pixels = rgba
            .chunks_exact(4)
            .map(|px| pack_rgba(px[0], px[1], px[2], px[3]))
            .collect();
        Self {
            pixels,
            width,
            height,
        }
    }

    /// Pixel at (x, y), or `None` outside the image
    pub fn pixel(&self, x: u32, y: u32) -> Option<u32> {
        if x < self.width && y < self.height {
            Some(self.pixels[(y * self.width + x) as usize])
        } else {
            None
        }
    }
}

/// Pack RGBA components into the canvas pixel format
pub const fn pack_rgba(r: u8, g: u8, b: u8, a: u8) -> u32 {
    ((a as u32) << 24) | ((r as u32) << 16) | ((g as u32) << 8) | (b as u32)
}

/// Pack opaque RGB components into the canvas pixel format
pub const fn pack_rgb(r: u8, g: u8, b: u8) -> u32 {
    pack_rgba(r, g, b, 0xFF)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_color_image() {
        let img = ImageData::solid_color(4, 4, [255, 0, 0, 255]);
        assert_eq!(img.width, 4);
        assert_eq!(img.height, 4);
        assert_eq!(img.pixels.len(), 16);

        // Check first pixel is opaque red
        assert_eq!(img.pixels[0], 0xFF_FF_00_00);
    }

    #[test]
    fn test_pixel_lookup_bounds() {
        let img = ImageData::solid_color(2, 3, [0, 255, 0, 255]);
        assert_eq!(img.pixel(1, 2), Some(0xFF_00_FF_00));
        assert_eq!(img.pixel(2, 0), None);
        assert_eq!(img.pixel(0, 3), None);
    }

    #[test]
    fn test_from_bytes_rejects_garbage() {
        let err = ImageData::from_bytes("garbage", &[0, 1, 2, 3]).unwrap_err();
        match err {
            AssetError::LoadFailed { source_id, .. } => assert_eq!(source_id, "garbage"),
            other => panic!("expected LoadFailed, got {other:?}"),
        }
    }

    #[test]
    fn test_pack_rgba() {
        assert_eq!(pack_rgba(0x11, 0x22, 0x33, 0x44), 0x44_11_22_33);
        assert_eq!(pack_rgb(0xE6, 0x2A, 0x2A), 0xFF_E6_2A_2A);
    }
}
