//! Composite figures authored in universe space.
//!
//! Every shape owns a [`Figure`]: one contiguous buffer of anchor points
//! generated from `origin + fraction * (width, height)`. Transforms mutate
//! the buffer in place; drawing maps each anchor to canvas pixels through a
//! [`RenderContext`] and issues raster calls.

mod fence;
mod house;
mod polygon;
mod sun;
mod tree;

pub use fence::Fence;
pub use house::House;
pub use polygon::OutlinePolygon;
pub use sun::Sun;
pub use tree::Tree;

use std::f64::consts::TAU;
use std::fmt;

use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::geometry::Point2D;
use crate::surface::PixelBuffer;
use crate::transform::Affine2D;

/// Trait for every figure that can live in a scene
pub trait Shape: fmt::Debug {
    /// Short name for UI/debugging
    fn kind(&self) -> &'static str;

    fn figure(&self) -> &Figure;

    fn figure_mut(&mut self) -> &mut Figure;

    /// Paint colors in declaration order
    fn colors(&self) -> Vec<Rgba>;

    /// Rasterize into `surface`, mapping anchors through `ctx`
    fn draw(&self, surface: &mut PixelBuffer, ctx: &RenderContext);

    fn anchors(&self) -> &[Point2D] {
        self.figure().points()
    }

    /// Accumulated rotation in radians, in `[0, 2π)`
    fn rotation(&self) -> f64 {
        self.figure().rotation()
    }

    fn width(&self) -> f64 {
        self.figure().width()
    }

    fn height(&self) -> f64 {
        self.figure().height()
    }

    fn translate(&mut self, dx: f64, dy: f64) {
        self.figure_mut().translate(dx, dy);
    }

    /// Rotate about the pivot; positive is counter-clockwise
    fn rotate_figure(&mut self, degrees: f64) {
        self.figure_mut().rotate(degrees);
    }

    /// Scale along the shape's own (possibly rotated) axes
    fn scale(&mut self, sx: f64, sy: f64) {
        self.figure_mut().scale(sx, sy);
    }

    fn set_width(&mut self, width: f64) {
        self.figure_mut().set_width(width);
    }

    fn set_height(&mut self, height: f64) {
        self.figure_mut().set_height(height);
    }

    fn set_origin(&mut self, x: f64, y: f64) {
        self.figure_mut().set_origin(x, y);
    }
}

// ============================================================================
// Figure: anchor buffer + transform state
// ============================================================================

/// Anchor points of one shape plus the state needed to regenerate and
/// transform them.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    width: f64,
    height: f64,
    origin: (f64, f64),
    rotation: f64,
    layout: Vec<(f64, f64)>,
    pivot: usize,
    points: Vec<Point2D>,
}

impl Figure {
    /// `layout` holds one (fx, fy) fraction of the frame per anchor;
    /// `pivot` indexes the anchor held fixed by rotate and scale.
    pub fn new(width: f64, height: f64, origin: (f64, f64), layout: &[(f64, f64)], pivot: usize) -> Self {
        let mut figure = Self {
            width: width.max(0.0),
            height: height.max(0.0),
            origin,
            rotation: 0.0,
            layout: layout.to_vec(),
            pivot: pivot.min(layout.len().saturating_sub(1)),
            points: Vec::with_capacity(layout.len()),
        };
        figure.generate_points();
        figure
    }

    /// Figure whose anchors are exactly `points`; the frame is their
    /// bounding box so later resizes keep the outline's proportions.
    pub fn from_points(points: &[(f64, f64)], pivot: usize) -> Self {
        let (min_x, min_y, max_x, max_y) = points.iter().fold(
            (f64::MAX, f64::MAX, f64::MIN, f64::MIN),
            |(lx, ly, hx, hy), &(x, y)| (lx.min(x), ly.min(y), hx.max(x), hy.max(y)),
        );
        if points.is_empty() {
            return Self::new(0.0, 0.0, (0.0, 0.0), &[], 0);
        }
        let (w, h) = (max_x - min_x, max_y - min_y);
        let frac = |v: f64, lo: f64, span: f64| if span > 0.0 { (v - lo) / span } else { 0.0 };
        let layout: Vec<(f64, f64)> = points
            .iter()
            .map(|&(x, y)| (frac(x, min_x, w), frac(y, min_y, h)))
            .collect();

        let mut figure = Self::new(w, h, (min_x, min_y), &layout, pivot);
        // Keep the caller's exact coordinates rather than the rebuilt ones
        for (p, &(x, y)) in figure.points.iter_mut().zip(points) {
            p.set(x, y);
        }
        figure
    }

    /// Recompute every anchor from the frame. Regenerated anchors are
    /// axis-aligned, so the accumulated rotation resets.
    pub fn generate_points(&mut self) {
        let (ox, oy) = self.origin;
        let (w, h) = (self.width, self.height);
        self.points.clear();
        self.points
            .extend(self.layout.iter().map(|&(fx, fy)| Point2D::new(ox + fx * w, oy + fy * h)));
        self.rotation = 0.0;
    }

    pub fn points(&self) -> &[Point2D] {
        &self.points
    }

    /// Anchor `index`; the origin when the index is out of range
    pub fn point(&self, index: usize) -> Point2D {
        self.points.get(index).copied().unwrap_or_default()
    }

    pub fn pivot(&self) -> (f64, f64) {
        self.point(self.pivot).as_tuple()
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn origin(&self) -> (f64, f64) {
        self.origin
    }

    pub fn rotation(&self) -> f64 {
        self.rotation
    }

    pub fn set_width(&mut self, width: f64) {
        self.width = width.max(0.0);
        self.generate_points();
    }

    pub fn set_height(&mut self, height: f64) {
        self.height = height.max(0.0);
        self.generate_points();
    }

    pub fn set_origin(&mut self, x: f64, y: f64) {
        self.origin = (x, y);
        self.generate_points();
    }

    /// Apply `m` to every anchor
    pub fn transform(&mut self, m: &Affine2D) {
        for p in &mut self.points {
            m.apply_point(p);
        }
    }

    pub fn translate(&mut self, dx: f64, dy: f64) {
        for p in &mut self.points {
            p.set(p.x + dx, p.y + dy);
        }
    }

    pub fn rotate(&mut self, degrees: f64) {
        let radians = degrees.to_radians();
        let m = Affine2D::about(self.pivot(), Affine2D::rotation_rad(radians));
        self.transform(&m);
        self.rotation = normalize_angle(self.rotation + radians);
    }

    /// De-rotate into the local frame, scale, re-rotate. Width and height
    /// follow the same factors, rounded to whole units.
    pub fn scale(&mut self, sx: f64, sy: f64) {
        let local = Affine2D::rotation_rad(-self.rotation)
            .then(Affine2D::scaling(sx, sy))
            .then(Affine2D::rotation_rad(self.rotation));
        let m = Affine2D::about(self.pivot(), local);
        self.transform(&m);
        self.width = (self.width * sx).round().max(0.0);
        self.height = (self.height * sy).round().max(0.0);
    }

    /// Universe point at local frame offset (lx, ly) from `anchor`,
    /// following the accumulated rotation
    pub fn local_offset(&self, anchor: usize, lx: f64, ly: f64) -> (f64, f64) {
        let c = self.point(anchor);
        let (dx, dy) = Affine2D::rotation_rad(self.rotation).apply(lx, ly);
        (c.x + dx, c.y + dy)
    }
}

/// Wrap an angle into `[0, 2π)`
pub fn normalize_angle(radians: f64) -> f64 {
    let r = radians.rem_euclid(TAU);
    if r >= TAU {
        0.0
    } else {
        r
    }
}

/// Map an anchor of `figure` to canvas pixels
fn canvas(figure: &Figure, ctx: &RenderContext, index: usize) -> (i32, i32) {
    ctx.to_canvas(&figure.point(index))
}

/// Pixel radii and canvas angle of a local-frame ellipse centred on
/// `anchor`, measured by mapping the ends of both semi-axes
fn ellipse_on_canvas(
    figure: &Figure,
    ctx: &RenderContext,
    anchor: usize,
    rx: f64,
    ry: f64,
) -> (i32, i32, f64) {
    let (cx, cy) = canvas(figure, ctx, anchor);
    let (ax, ay) = figure.local_offset(anchor, rx, 0.0);
    let (bx, by) = figure.local_offset(anchor, 0.0, ry);
    let (ax, ay) = ctx.to_canvas_xy(ax, ay);
    let (bx, by) = ctx.to_canvas_xy(bx, by);

    let (adx, ady) = (f64::from(ax - cx), f64::from(ay - cy));
    let (bdx, bdy) = (f64::from(bx - cx), f64::from(by - cy));
    let rx_px = adx.hypot(ady).round() as i32;
    let ry_px = bdx.hypot(bdy).round() as i32;
    (rx_px, ry_px, ady.atan2(adx))
}
