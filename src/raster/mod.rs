//! Stateless rasterization primitives.
//!
//! Every function draws into a [`PixelBuffer`] in canvas pixel coordinates
//! (origin top-left, y down). Coordinates outside the surface are clipped
//! at the pixel level, so callers never bounds-check.

mod curve;
mod ellipse;
mod fill;
mod line;
mod text;

pub use curve::{draw_curve, draw_curve_with, flatness, CurveFlattening};
pub use ellipse::{draw_circle, draw_ellipse, draw_rotated_ellipse};
pub use fill::{draw_rectangle, draw_triangle, fill_polygon, flood_fill};
pub use line::{draw_line, draw_polyline, draw_polygon_outline};
pub use text::{draw_text, BitmapFont, GlyphSource};

use crate::color::Rgba;
use crate::surface::PixelBuffer;

/// Write one pixel; no-op outside the surface
#[inline]
pub fn set_pixel(surface: &mut PixelBuffer, x: i32, y: i32, color: Rgba) {
    surface.set_pixel(x, y, color);
}

/// Read one pixel; [`Rgba::TRANSPARENT`] (native 0) outside the surface
#[inline]
pub fn get_pixel(surface: &PixelBuffer, x: i32, y: i32) -> Rgba {
    surface.get_pixel(x, y).unwrap_or(Rgba::TRANSPARENT)
}

/// Blend toward `color` by `coverage * color.a / 255`, writing an opaque pixel
#[inline]
pub fn blend_pixel(surface: &mut PixelBuffer, x: i32, y: i32, color: Rgba, coverage: f32) {
    surface.blend_pixel(x, y, color, coverage);
}
