use crate::color::Rgba;
use crate::surface::PixelBuffer;

/// Anything that can turn a string into a glyph bitmap.
///
/// The returned buffer is blitted with its per-pixel alpha, so untouched
/// background pixels should be fully transparent.
pub trait GlyphSource {
    /// Render `text`; `None` when there is nothing to draw
    fn render(&self, text: &str, color: Rgba) -> Option<PixelBuffer>;
}

/// Render `text` through `glyphs` and blit the bitmap with its top-left at (x, y).
/// A missing glyph source or an empty bitmap draws nothing.
pub fn draw_text(
    surface: &mut PixelBuffer,
    glyphs: Option<&dyn GlyphSource>,
    text: &str,
    x: i32,
    y: i32,
    color: Rgba,
) {
    let Some(glyphs) = glyphs else {
        return;
    };
    if let Some(bitmap) = glyphs.render(text, color) {
        surface.blit_blend(&bitmap, x, y);
    }
}

// ============================================================================
// Built-in 5x7 bitmap font
// ============================================================================

pub const GLYPH_WIDTH: u32 = 5;
pub const GLYPH_HEIGHT: u32 = 7;
/// Horizontal advance per character, including the gap column
const ADVANCE: u32 = GLYPH_WIDTH + 1;

/// Fixed-size pixel font; lowercase renders as uppercase
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BitmapFont {
    scale: u32,
}

impl BitmapFont {
    pub fn new(scale: u32) -> Self {
        Self {
            scale: scale.max(1),
        }
    }

    /// Pixel width of `text` at this scale
    pub fn text_width(&self, text: &str) -> u32 {
        let chars = text.chars().count() as u32;
        if chars == 0 {
            0
        } else {
            (chars * ADVANCE - 1) * self.scale
        }
    }

    pub fn line_height(&self) -> u32 {
        GLYPH_HEIGHT * self.scale
    }
}

impl Default for BitmapFont {
    fn default() -> Self {
        Self::new(1)
    }
}

impl GlyphSource for BitmapFont {
    fn render(&self, text: &str, color: Rgba) -> Option<PixelBuffer> {
        let width = self.text_width(text);
        if width == 0 {
            return None;
        }
        let mut bitmap = PixelBuffer::with_size(width, self.line_height());
        let s = self.scale as i32;

        for (i, ch) in text.chars().enumerate() {
            let origin_x = (i as u32 * ADVANCE * self.scale) as i32;
            for (row, bits) in glyph(ch).iter().enumerate() {
                for col in 0..GLYPH_WIDTH {
                    if bits & (0x10 >> col) == 0 {
                        continue;
                    }
                    let px = origin_x + col as i32 * s;
                    let py = row as i32 * s;
                    for dy in 0..s {
                        bitmap.hline(px, px + s - 1, py + dy, color);
                    }
                }
            }
        }
        Some(bitmap)
    }
}

fn glyph(ch: char) -> [u8; 7] {
    match ch.to_ascii_uppercase() {
        ' ' => [0; 7],
        '0' => [0x0E, 0x11, 0x13, 0x15, 0x19, 0x11, 0x0E],
        '1' => [0x04, 0x0C, 0x04, 0x04, 0x04, 0x04, 0x0E],
        '2' => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x08, 0x1F],
        '3' => [0x1F, 0x02, 0x04, 0x02, 0x01, 0x11, 0x0E],
        '4' => [0x02, 0x06, 0x0A, 0x12, 0x1F, 0x02, 0x02],
        '5' => [0x1F, 0x10, 0x1E, 0x01, 0x01, 0x11, 0x0E],
        '6' => [0x06, 0x08, 0x10, 0x1E, 0x11, 0x11, 0x0E],
        '7' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x08, 0x08],
        '8' => [0x0E, 0x11, 0x11, 0x0E, 0x11, 0x11, 0x0E],
        '9' => [0x0E, 0x11, 0x11, 0x0F, 0x01, 0x02, 0x0C],
        'A' => [0x0E, 0x11, 0x11, 0x11, 0x1F, 0x11, 0x11],
        'B' => [0x1E, 0x11, 0x11, 0x1E, 0x11, 0x11, 0x1E],
        'C' => [0x0E, 0x11, 0x10, 0x10, 0x10, 0x11, 0x0E],
        'D' => [0x1C, 0x12, 0x11, 0x11, 0x11, 0x12, 0x1C],
        'E' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x1F],
        'F' => [0x1F, 0x10, 0x10, 0x1E, 0x10, 0x10, 0x10],
        'G' => [0x0E, 0x11, 0x10, 0x17, 0x11, 0x11, 0x0F],
        'H' => [0x11, 0x11, 0x11, 0x1F, 0x11, 0x11, 0x11],
        'I' => [0x0E, 0x04, 0x04, 0x04, 0x04, 0x04, 0x0E],
        'J' => [0x07, 0x02, 0x02, 0x02, 0x02, 0x12, 0x0C],
        'K' => [0x11, 0x12, 0x14, 0x18, 0x14, 0x12, 0x11],
        'L' => [0x10, 0x10, 0x10, 0x10, 0x10, 0x10, 0x1F],
        'M' => [0x11, 0x1B, 0x15, 0x15, 0x11, 0x11, 0x11],
        'N' => [0x11, 0x11, 0x19, 0x15, 0x13, 0x11, 0x11],
        'O' => [0x0E, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'P' => [0x1E, 0x11, 0x11, 0x1E, 0x10, 0x10, 0x10],
        'Q' => [0x0E, 0x11, 0x11, 0x11, 0x15, 0x12, 0x0D],
        'R' => [0x1E, 0x11, 0x11, 0x1E, 0x14, 0x12, 0x11],
        'S' => [0x0F, 0x10, 0x10, 0x0E, 0x01, 0x01, 0x1E],
        'T' => [0x1F, 0x04, 0x04, 0x04, 0x04, 0x04, 0x04],
        'U' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x11, 0x0E],
        'V' => [0x11, 0x11, 0x11, 0x11, 0x11, 0x0A, 0x04],
        'W' => [0x11, 0x11, 0x11, 0x15, 0x15, 0x15, 0x0A],
        'X' => [0x11, 0x11, 0x0A, 0x04, 0x0A, 0x11, 0x11],
        'Y' => [0x11, 0x11, 0x11, 0x0A, 0x04, 0x04, 0x04],
        'Z' => [0x1F, 0x01, 0x02, 0x04, 0x08, 0x10, 0x1F],
        ':' => [0x00, 0x0C, 0x0C, 0x00, 0x0C, 0x0C, 0x00],
        '.' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x0C, 0x0C],
        ',' => [0x00, 0x00, 0x00, 0x00, 0x0C, 0x04, 0x08],
        '-' => [0x00, 0x00, 0x00, 0x1F, 0x00, 0x00, 0x00],
        '+' => [0x00, 0x04, 0x04, 0x1F, 0x04, 0x04, 0x00],
        '=' => [0x00, 0x00, 0x1F, 0x00, 0x1F, 0x00, 0x00],
        '/' => [0x00, 0x01, 0x02, 0x04, 0x08, 0x10, 0x00],
        '(' => [0x02, 0x04, 0x08, 0x08, 0x08, 0x04, 0x02],
        ')' => [0x08, 0x04, 0x02, 0x02, 0x02, 0x04, 0x08],
        '[' => [0x0E, 0x08, 0x08, 0x08, 0x08, 0x08, 0x0E],
        ']' => [0x0E, 0x02, 0x02, 0x02, 0x02, 0x02, 0x0E],
        '<' => [0x02, 0x04, 0x08, 0x10, 0x08, 0x04, 0x02],
        '>' => [0x08, 0x04, 0x02, 0x01, 0x02, 0x04, 0x08],
        '!' => [0x04, 0x04, 0x04, 0x04, 0x04, 0x00, 0x04],
        '%' => [0x18, 0x19, 0x02, 0x04, 0x08, 0x13, 0x03],
        '_' => [0x00, 0x00, 0x00, 0x00, 0x00, 0x00, 0x1F],
        _ => [0x0E, 0x11, 0x01, 0x02, 0x04, 0x00, 0x04], // '?'
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NoBitmap;

    impl GlyphSource for NoBitmap {
        fn render(&self, _text: &str, _color: Rgba) -> Option<PixelBuffer> {
            None
        }
    }

    fn blank(w: u32, h: u32) -> PixelBuffer {
        let mut surface = PixelBuffer::with_size(w, h);
        surface.fill(Rgba::WHITE);
        surface
    }

    #[test]
    fn test_text_width() {
        let font = BitmapFont::new(2);
        assert_eq!(font.text_width(""), 0);
        assert_eq!(font.text_width("A"), 10);
        assert_eq!(font.text_width("AB"), 22);
        assert_eq!(font.line_height(), 14);
    }

    #[test]
    fn test_render_empty_is_none() {
        assert!(BitmapFont::default().render("", Rgba::BLACK).is_none());
    }

    #[test]
    fn test_render_glyph_pixels() {
        let bitmap = BitmapFont::default()
            .render("L", Rgba::RED)
            .unwrap_or_default();
        // 'L' is a left column plus a bottom row
        assert_eq!(bitmap.get_pixel(0, 0), Some(Rgba::RED));
        assert_eq!(bitmap.get_pixel(4, 6), Some(Rgba::RED));
        assert_eq!(bitmap.get_pixel(4, 0), Some(Rgba::TRANSPARENT));
    }

    #[test]
    fn test_draw_text_blits_only_ink() {
        let mut surface = blank(20, 10);
        let font = BitmapFont::default();
        draw_text(&mut surface, Some(&font), "L", 2, 1, Rgba::BLACK);
        assert_eq!(surface.get_pixel(2, 1), Some(Rgba::BLACK));
        assert_eq!(surface.get_pixel(6, 1), Some(Rgba::WHITE));
        assert_eq!(surface.get_pixel(6, 7), Some(Rgba::BLACK));
    }

    #[test]
    fn test_missing_font_or_bitmap_noop() {
        let mut surface = blank(10, 10);
        let before = surface.clone();
        draw_text(&mut surface, None, "HELLO", 0, 0, Rgba::BLACK);
        draw_text(&mut surface, Some(&NoBitmap), "HELLO", 0, 0, Rgba::BLACK);
        assert_eq!(surface, before);
    }

    #[test]
    fn test_lowercase_matches_uppercase() {
        let font = BitmapFont::default();
        assert_eq!(
            font.render("abc", Rgba::BLACK),
            font.render("ABC", Rgba::BLACK)
        );
    }
}
