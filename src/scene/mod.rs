//! Everything the user has drawn, kept as ordered collections and
//! re-rasterized from scratch every frame.

mod loader;

pub use loader::{load_scene, parse_scene, LoadedScene, SceneHeader};

use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::geometry::Point2D;
use crate::raster::{draw_circle, draw_line, draw_polyline, flood_fill};
use crate::shapes::Shape;
use crate::surface::PixelBuffer;

pub const DEFAULT_ERASER_RADIUS: i32 = 8;

/// Straight segment in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineSegment {
    pub start: (i32, i32),
    pub end: (i32, i32),
    pub color: Rgba,
    pub anti_aliased: bool,
}

/// Flood-fill seed in canvas pixels
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BucketSeed {
    pub x: i32,
    pub y: i32,
    pub color: Rgba,
}

/// All drawn content. Within each collection insertion order is paint order.
#[derive(Debug)]
pub struct Scene {
    pub background: Rgba,
    /// Free-hand strokes; each sample remembers its paint color
    pub pencil: Vec<Vec<Point2D>>,
    pub eraser: Vec<Point2D>,
    pub eraser_radius: i32,
    pub bucket: Vec<BucketSeed>,
    pub lines: Vec<LineSegment>,
    pub shapes: Vec<Box<dyn Shape>>,
}

impl Scene {
    pub fn new(background: Rgba) -> Self {
        Self {
            background,
            pencil: Vec::new(),
            eraser: Vec::new(),
            eraser_radius: DEFAULT_ERASER_RADIUS,
            bucket: Vec::new(),
            lines: Vec::new(),
            shapes: Vec::new(),
        }
    }

    /// Start a new free-hand stroke
    pub fn begin_stroke(&mut self) {
        if !matches!(self.pencil.last(), Some(s) if s.is_empty()) {
            self.pencil.push(Vec::new());
        }
    }

    /// Append a sample to the current stroke
    pub fn add_pencil_point(&mut self, x: i32, y: i32, color: Rgba) {
        if self.pencil.is_empty() {
            self.pencil.push(Vec::new());
        }
        if let Some(stroke) = self.pencil.last_mut() {
            stroke.push(Point2D::with_color(f64::from(x), f64::from(y), color));
        }
    }

    pub fn add_eraser_point(&mut self, x: i32, y: i32) {
        self.eraser.push(Point2D::new(f64::from(x), f64::from(y)));
    }

    pub fn add_bucket(&mut self, x: i32, y: i32, color: Rgba) {
        self.bucket.push(BucketSeed { x, y, color });
    }

    pub fn add_line(&mut self, line: LineSegment) {
        self.lines.push(line);
    }

    pub fn add_shape(&mut self, shape: Box<dyn Shape>) {
        log::debug!("Added {} ({} shapes)", shape.kind(), self.shapes.len() + 1);
        self.shapes.push(shape);
    }

    pub fn last_shape_mut(&mut self) -> Option<&mut (dyn Shape + 'static)> {
        self.shapes.last_mut().map(|s| s.as_mut())
    }

    pub fn remove_last_shape(&mut self) -> Option<Box<dyn Shape>> {
        self.shapes.pop()
    }

    pub fn is_empty(&self) -> bool {
        self.pencil.iter().all(Vec::is_empty)
            && self.eraser.is_empty()
            && self.bucket.is_empty()
            && self.lines.is_empty()
            && self.shapes.is_empty()
    }

    /// Drop every collection; the background is kept
    pub fn clear(&mut self) {
        self.pencil.clear();
        self.eraser.clear();
        self.bucket.clear();
        self.lines.clear();
        self.shapes.clear();
    }

    /// Paint the whole scene: background, pencil, lines, shapes, eraser,
    /// then bucket fills
    pub fn render(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        surface.fill(self.background);

        for stroke in &self.pencil {
            render_stroke(surface, stroke);
        }

        for line in &self.lines {
            let ((x1, y1), (x2, y2)) = (line.start, line.end);
            draw_line(surface, x1, y1, x2, y2, line.color, line.anti_aliased);
        }

        for shape in &self.shapes {
            shape.draw(surface, ctx);
        }

        for p in &self.eraser {
            let (x, y) = (p.x as i32, p.y as i32);
            draw_circle(surface, x, y, self.eraser_radius, self.background, false, true);
        }

        for seed in &self.bucket {
            flood_fill(surface, seed.x, seed.y, seed.color);
        }
    }
}

impl Default for Scene {
    fn default() -> Self {
        Self::new(Rgba::WHITE)
    }
}

/// Join consecutive samples, switching color where the recorded color does
fn render_stroke(surface: &mut PixelBuffer, stroke: &[Point2D]) {
    let pixel = |p: &Point2D| (p.x as i32, p.y as i32);
    if let [only] = stroke {
        draw_polyline(surface, &[pixel(only)], only.color.unwrap_or(Rgba::BLACK), false);
        return;
    }
    for pair in stroke.windows(2) {
        let ((x1, y1), (x2, y2)) = (pixel(&pair[0]), pixel(&pair[1]));
        let color = pair[1].color.unwrap_or(Rgba::BLACK);
        draw_line(surface, x1, y1, x2, y2, color, false);
    }
}
