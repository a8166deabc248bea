//! Conversions between window, canvas and universe coordinates.
//!
//! Canvas space is pixel indices with y growing down. Universe space is the
//! logical drawing area shapes live in, with y growing up; its size does
//! not depend on the window resolution.

use serde::{Deserialize, Serialize};

use crate::geometry::Point2D;
use crate::raster::CurveFlattening;
use crate::surface::PixelBuffer;

/// Axis-aligned rectangle in universe units with non-negative size
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct UniverseRect {
    pub x: f64,
    pub y: f64,
    pub w: f64,
    pub h: f64,
}

/// Where the canvas sits inside the window, in window pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CanvasRect {
    pub x: i32,
    pub y: i32,
    pub w: u32,
    pub h: u32,
}

impl CanvasRect {
    /// Canvas of `canvas` size centred in a window of `window` size
    pub fn centered(window: (u32, u32), canvas: (u32, u32)) -> Self {
        Self {
            x: (window.0 as i32 - canvas.0 as i32) / 2,
            y: (window.1 as i32 - canvas.1 as i32) / 2,
            w: canvas.0,
            h: canvas.1,
        }
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= self.x && y >= self.y && x < self.x + self.w as i32 && y < self.y + self.h as i32
    }
}

/// Window position to canvas position
pub fn screen_to_canvas(mx: i32, my: i32, canvas: &CanvasRect) -> (i32, i32) {
    (mx - canvas.x, my - canvas.y)
}

/// Canvas pixel to universe point: scale per axis and flip y
pub fn canvas_to_universe(
    point: (i32, i32),
    canvas_w: u32,
    canvas_h: u32,
    universe_w: f64,
    universe_h: f64,
) -> (f64, f64) {
    if canvas_w == 0 || canvas_h == 0 {
        return (0.0, 0.0);
    }
    let (cw, ch) = (f64::from(canvas_w), f64::from(canvas_h));
    let ux = f64::from(point.0) * universe_w / cw;
    let uy = (ch - f64::from(point.1)) * universe_h / ch;
    (ux, uy)
}

/// Universe point to canvas pixel. Both axes are floored then clamped into
/// `[0, dim - 1]`, so points on or past the universe edge stay addressable.
pub fn universe_to_canvas(
    point: (f64, f64),
    canvas_w: u32,
    canvas_h: u32,
    universe_w: f64,
    universe_h: f64,
) -> (i32, i32) {
    if canvas_w == 0 || canvas_h == 0 || universe_w <= 0.0 || universe_h <= 0.0 {
        return (0, 0);
    }
    let (cw, ch) = (f64::from(canvas_w), f64::from(canvas_h));
    let max_x = canvas_w as i32 - 1;
    let max_y = canvas_h as i32 - 1;

    // Casts saturate, so huge or NaN inputs still land inside the clamp
    let x = (point.0 * cw / universe_w).floor() as i32;
    let y = max_y.saturating_sub((point.1 * ch / universe_h).floor() as i32);
    (x.clamp(0, max_x), y.clamp(0, max_y))
}

/// Map both drag endpoints to universe space and return their bounding box
pub fn canvas_drag_to_universe(
    a: (i32, i32),
    b: (i32, i32),
    canvas_w: u32,
    canvas_h: u32,
    universe_w: f64,
    universe_h: f64,
) -> UniverseRect {
    let (ax, ay) = canvas_to_universe(a, canvas_w, canvas_h, universe_w, universe_h);
    let (bx, by) = canvas_to_universe(b, canvas_w, canvas_h, universe_w, universe_h);
    UniverseRect {
        x: ax.min(bx),
        y: ay.min(by),
        w: (bx - ax).abs(),
        h: (by - ay).abs(),
    }
}

// ============================================================================
// RenderContext
// ============================================================================

/// Canvas and universe sizes for one frame, passed to every shape draw
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderContext {
    pub canvas_width: u32,
    pub canvas_height: u32,
    pub universe_width: f64,
    pub universe_height: f64,
    /// Flattening used for curved shape edges
    pub curve: CurveFlattening,
}

impl RenderContext {
    pub fn new(canvas_width: u32, canvas_height: u32, universe_width: f64, universe_height: f64) -> Self {
        Self {
            canvas_width,
            canvas_height,
            universe_width,
            universe_height,
            curve: CurveFlattening::default(),
        }
    }

    pub fn with_curve(mut self, curve: CurveFlattening) -> Self {
        self.curve = curve;
        self
    }

    /// Context matching the surface a frame is drawn into
    pub fn for_surface(surface: &PixelBuffer, universe_width: f64, universe_height: f64) -> Self {
        Self::new(surface.width(), surface.height(), universe_width, universe_height)
    }

    pub fn to_canvas(&self, p: &Point2D) -> (i32, i32) {
        self.to_canvas_xy(p.x, p.y)
    }

    pub fn to_canvas_xy(&self, x: f64, y: f64) -> (i32, i32) {
        universe_to_canvas(
            (x, y),
            self.canvas_width,
            self.canvas_height,
            self.universe_width,
            self.universe_height,
        )
    }

    pub fn to_universe(&self, point: (i32, i32)) -> Point2D {
        canvas_to_universe(
            point,
            self.canvas_width,
            self.canvas_height,
            self.universe_width,
            self.universe_height,
        )
        .into()
    }

    pub fn drag_to_universe(&self, a: (i32, i32), b: (i32, i32)) -> UniverseRect {
        canvas_drag_to_universe(
            a,
            b,
            self.canvas_width,
            self.canvas_height,
            self.universe_width,
            self.universe_height,
        )
    }

    /// Canvas pixels per universe unit along x
    pub fn scale_x(&self) -> f64 {
        if self.universe_width > 0.0 {
            f64::from(self.canvas_width) / self.universe_width
        } else {
            0.0
        }
    }
}
