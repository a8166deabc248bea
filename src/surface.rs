//! CPU pixel surface that every primitive draws into

use crate::color::Rgba;
use crate::error::{Error, Result};

pub const DEFAULT_WIDTH: u32 = 800;
pub const DEFAULT_HEIGHT: u32 = 600;

const BYTES_PER_PIXEL: usize = 4;

/// Write a color as RGBA8888 little-endian (A, B, G, R byte order)
#[inline]
fn write_pixel(dest: &mut [u8], color: Rgba) {
    dest.copy_from_slice(&color.to_native().to_le_bytes());
}

#[inline]
fn read_pixel(src: &[u8]) -> Rgba {
    Rgba::from_native(u32::from_le_bytes([src[0], src[1], src[2], src[3]]))
}

// ============================================================================
// PixelBuffer
// ============================================================================

/// RGBA8888 pixel buffer for software rendering.
///
/// Rows are tightly packed, so the stride is always `width * 4` bytes.
/// Every accessor takes signed coordinates and ignores anything outside
/// `[0, width) x [0, height)`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PixelBuffer {
    pixels: Vec<u8>,
    width: u32,
    height: u32,
}

impl PixelBuffer {
    /// Create a new pixel buffer with default resolution (800x600)
    pub fn new() -> Self {
        Self::with_size(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }

    /// Create a new pixel buffer with custom resolution, cleared to transparent black
    pub fn with_size(width: u32, height: u32) -> Self {
        Self {
            pixels: vec![0; width as usize * height as usize * BYTES_PER_PIXEL],
            width,
            height,
        }
    }

    /// Like [`with_size`](Self::with_size) but rejects empty surfaces
    pub fn try_new(width: u32, height: u32) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidDimensions { width, height });
        }
        Ok(Self::with_size(width, height))
    }

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Bytes per row
    #[inline]
    pub fn stride(&self) -> usize {
        self.width as usize * BYTES_PER_PIXEL
    }

    /// Check if coordinates are within bounds
    #[inline]
    pub fn in_bounds(&self, x: i32, y: i32) -> bool {
        x >= 0 && x < self.width as i32 && y >= 0 && y < self.height as i32
    }

    /// Calculate byte offset for pixel at (x, y)
    #[inline]
    fn pixel_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.stride() + x as usize * BYTES_PER_PIXEL
    }

    /// Fill the whole surface with one color
    pub fn fill(&mut self, color: Rgba) {
        let bytes = color.to_native().to_le_bytes();
        for chunk in self.pixels.chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&bytes);
        }
    }

    /// Set a single pixel (bounds checked)
    #[inline]
    pub fn set_pixel(&mut self, x: i32, y: i32, color: Rgba) {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + BYTES_PER_PIXEL], color);
        }
    }

    /// Read a pixel from the buffer (bounds checked)
    /// Returns None if coordinates are out of bounds
    #[inline]
    pub fn get_pixel(&self, x: i32, y: i32) -> Option<Rgba> {
        if self.in_bounds(x, y) {
            let idx = self.pixel_index(x as u32, y as u32);
            Some(read_pixel(&self.pixels[idx..idx + BYTES_PER_PIXEL]))
        } else {
            None
        }
    }

    /// Blend `color` over the existing pixel by `coverage` in [0, 1].
    /// The written pixel is always opaque.
    #[inline]
    pub fn blend_pixel(&mut self, x: i32, y: i32, color: Rgba, coverage: f32) {
        if let Some(background) = self.get_pixel(x, y) {
            self.set_pixel(x, y, color.blend_over(background, coverage));
        }
    }

    /// Horizontal span, both ends inclusive, clipped to the surface
    pub fn hline(&mut self, x1: i32, x2: i32, y: i32, color: Rgba) {
        if y < 0 || y >= self.height as i32 {
            return;
        }
        let (x1, x2) = if x1 <= x2 { (x1, x2) } else { (x2, x1) };
        let start = x1.max(0);
        let end = x2.min(self.width as i32 - 1);
        if start > end {
            return;
        }

        let bytes = color.to_native().to_le_bytes();
        let from = self.pixel_index(start as u32, y as u32);
        let to = self.pixel_index(end as u32, y as u32) + BYTES_PER_PIXEL;
        for chunk in self.pixels[from..to].chunks_exact_mut(BYTES_PER_PIXEL) {
            chunk.copy_from_slice(&bytes);
        }
    }

    /// Vertical span, both ends inclusive, clipped to the surface
    pub fn vline(&mut self, x: i32, y1: i32, y2: i32, color: Rgba) {
        if x < 0 || x >= self.width as i32 {
            return;
        }
        let (y1, y2) = if y1 <= y2 { (y1, y2) } else { (y2, y1) };
        let start = y1.max(0);
        let end = y2.min(self.height as i32 - 1);
        for y in start..=end {
            let idx = self.pixel_index(x as u32, y as u32);
            write_pixel(&mut self.pixels[idx..idx + BYTES_PER_PIXEL], color);
        }
    }

    // ========================================================================
    // Buffer Operations
    // ========================================================================

    /// Copy another buffer onto this one at position (x, y)
    pub fn blit(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            let dy = y + sy;
            if dy < 0 || dy >= self.height as i32 {
                continue;
            }
            for sx in 0..src.width as i32 {
                if let Some(color) = src.get_pixel(sx, sy) {
                    self.set_pixel(x + sx, dy, color);
                }
            }
        }
    }

    /// Blit honouring each source pixel's alpha (glyph bitmaps)
    pub fn blit_blend(&mut self, src: &PixelBuffer, x: i32, y: i32) {
        for sy in 0..src.height as i32 {
            for sx in 0..src.width as i32 {
                if let Some(color) = src.get_pixel(sx, sy) {
                    if color.a > 0 {
                        self.blend_pixel(x + sx, y + sy, color, 1.0);
                    }
                }
            }
        }
    }

    /// Raw bytes for SDL texture upload
    pub fn as_bytes(&self) -> &[u8] {
        &self.pixels
    }
}

impl Default for PixelBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_buffer_is_zeroed() {
        let buf = PixelBuffer::with_size(4, 3);
        assert_eq!(buf.as_bytes().len(), 4 * 3 * 4);
        assert_eq!(buf.stride(), 16);
        assert_eq!(buf.get_pixel(0, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_try_new_rejects_empty() {
        assert!(matches!(
            PixelBuffer::try_new(0, 10),
            Err(Error::InvalidDimensions { width: 0, height: 10 })
        ));
        assert!(PixelBuffer::try_new(1, 1).is_ok());
    }

    #[test]
    fn test_byte_layout_is_rgba8888_le() {
        let mut buf = PixelBuffer::with_size(1, 1);
        buf.set_pixel(0, 0, Rgba::new(1, 2, 3, 4));
        assert_eq!(buf.as_bytes(), &[4, 3, 2, 1]);
    }

    #[test]
    fn test_set_get_roundtrip() {
        let mut buf = PixelBuffer::with_size(10, 10);
        buf.set_pixel(3, 7, Rgba::RED);
        assert_eq!(buf.get_pixel(3, 7), Some(Rgba::RED));
        assert_eq!(buf.get_pixel(7, 3), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_out_of_bounds_ignored() {
        let mut buf = PixelBuffer::with_size(5, 5);
        let before = buf.clone();
        buf.set_pixel(-1, 0, Rgba::RED);
        buf.set_pixel(5, 0, Rgba::RED);
        buf.set_pixel(0, 5, Rgba::RED);
        buf.blend_pixel(0, -1, Rgba::RED, 1.0);
        assert_eq!(buf, before);
        assert_eq!(buf.get_pixel(-1, -1), None);
    }

    #[test]
    fn test_fill() {
        let mut buf = PixelBuffer::with_size(3, 2);
        buf.fill(Rgba::WHITE);
        for y in 0..2 {
            for x in 0..3 {
                assert_eq!(buf.get_pixel(x, y), Some(Rgba::WHITE));
            }
        }
    }

    #[test]
    fn test_hline_inclusive_and_clipped() {
        let mut buf = PixelBuffer::with_size(10, 3);
        buf.hline(8, -4, 1, Rgba::BLUE);
        for x in 0..=8 {
            assert_eq!(buf.get_pixel(x, 1), Some(Rgba::BLUE));
        }
        assert_eq!(buf.get_pixel(9, 1), Some(Rgba::TRANSPARENT));
        buf.hline(0, 9, 5, Rgba::RED);
    }

    #[test]
    fn test_vline_inclusive() {
        let mut buf = PixelBuffer::with_size(3, 10);
        buf.vline(2, 6, 2, Rgba::GREEN);
        assert_eq!(buf.get_pixel(2, 2), Some(Rgba::GREEN));
        assert_eq!(buf.get_pixel(2, 6), Some(Rgba::GREEN));
        assert_eq!(buf.get_pixel(2, 7), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_clips() {
        let mut src = PixelBuffer::with_size(4, 4);
        src.fill(Rgba::RED);
        let mut dst = PixelBuffer::with_size(5, 5);
        dst.blit(&src, 3, -2);
        assert_eq!(dst.get_pixel(3, 0), Some(Rgba::RED));
        assert_eq!(dst.get_pixel(4, 1), Some(Rgba::RED));
        assert_eq!(dst.get_pixel(2, 0), Some(Rgba::TRANSPARENT));
        assert_eq!(dst.get_pixel(3, 2), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_blit_blend_skips_transparent() {
        let mut src = PixelBuffer::with_size(2, 1);
        src.set_pixel(1, 0, Rgba::BLACK);
        let mut dst = PixelBuffer::with_size(2, 1);
        dst.fill(Rgba::WHITE);
        dst.blit_blend(&src, 0, 0);
        assert_eq!(dst.get_pixel(0, 0), Some(Rgba::WHITE));
        assert_eq!(dst.get_pixel(1, 0), Some(Rgba::BLACK));
    }
}
