use super::{canvas, Figure, Shape};
use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::raster::{draw_polygon_outline, flood_fill};
use crate::surface::PixelBuffer;

/// Free-form closed outline, optionally flood-filled from a seed point.
/// The seed is stored as the last anchor so it follows every transform.
/// Rotates about the first vertex.
#[derive(Debug, Clone, PartialEq)]
pub struct OutlinePolygon {
    figure: Figure,
    vertex_count: usize,
    border: Rgba,
    anti_aliased: bool,
    fill: Option<Rgba>,
}

impl OutlinePolygon {
    pub fn new(vertices: Vec<(f64, f64)>, border: Rgba, anti_aliased: bool) -> Self {
        Self {
            figure: Figure::from_points(&vertices, 0),
            vertex_count: vertices.len(),
            border,
            anti_aliased,
            fill: None,
        }
    }

    /// Fill the region around `seed` after the outline is drawn; no color
    /// means black
    pub fn with_fill(mut self, color: Option<Rgba>, seed: (f64, f64)) -> Self {
        let mut points: Vec<(f64, f64)> = self.vertices().collect();
        points.push(seed);
        self.figure = Figure::from_points(&points, 0);
        self.fill = Some(color.unwrap_or(Rgba::BLACK));
        self
    }

    pub fn vertices(&self) -> impl Iterator<Item = (f64, f64)> + '_ {
        self.figure.points()[..self.vertex_count].iter().map(|p| p.as_tuple())
    }

    pub fn is_filled(&self) -> bool {
        self.fill.is_some()
    }
}

impl Shape for OutlinePolygon {
    fn kind(&self) -> &'static str {
        "polygon"
    }

    fn figure(&self) -> &Figure {
        &self.figure
    }

    fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    fn colors(&self) -> Vec<Rgba> {
        let mut colors = vec![self.border];
        colors.extend(self.fill);
        colors
    }

    fn draw(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        let outline: Vec<(i32, i32)> = (0..self.vertex_count)
            .map(|i| canvas(&self.figure, ctx, i))
            .collect();
        draw_polygon_outline(surface, &outline, self.border, self.anti_aliased);

        if let Some(color) = self.fill {
            let (x, y) = canvas(&self.figure, ctx, self.vertex_count);
            flood_fill(surface, x, y, color);
        }
    }
}
