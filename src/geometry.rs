//! Points and small vector helpers shared by the raster and shape layers

use serde::{Deserialize, Serialize};

use crate::color::Rgba;

/// A 2D point. Free-hand samples remember the paint color active when they
/// were recorded; shape anchors leave it empty.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point2D {
    pub x: f64,
    pub y: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub color: Option<Rgba>,
}

impl Point2D {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y, color: None }
    }

    pub const fn with_color(x: f64, y: f64, color: Rgba) -> Self {
        Self {
            x,
            y,
            color: Some(color),
        }
    }

    pub fn set(&mut self, x: f64, y: f64) {
        self.x = x;
        self.y = y;
    }

    pub fn as_tuple(&self) -> (f64, f64) {
        (self.x, self.y)
    }
}

impl From<(f64, f64)> for Point2D {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

/// Perpendicular distance from `p` to the infinite line through `a` and `b`.
/// Falls back to the distance to `a` when `a == b`.
pub fn perp_dist(p: (f64, f64), a: (f64, f64), b: (f64, f64)) -> f64 {
    let dx = b.0 - a.0;
    let dy = b.1 - a.1;
    let len = dx.hypot(dy);
    if len == 0.0 {
        return (p.0 - a.0).hypot(p.1 - a.1);
    }
    ((p.0 - a.0) * dy - (p.1 - a.1) * dx).abs() / len
}
