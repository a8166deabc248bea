use super::{canvas, Figure, Shape};
use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::raster::{draw_line, flood_fill};
use crate::surface::PixelBuffer;

const WALL_TOP_LEFT: usize = 0;
const WALL_BOTTOM_RIGHT: usize = 1;
const WALL_TOP_RIGHT: usize = 2;
const WALL_BOTTOM_LEFT: usize = 3;
const DOOR_TOP_LEFT: usize = 4;
const DOOR_TOP_RIGHT: usize = 5;
const DOOR_BOTTOM_LEFT: usize = 6;
const DOOR_BOTTOM_RIGHT: usize = 7;
const ROOF_PEAK: usize = 8;
const WALL_FILL: usize = 9;
const DOOR_FILL: usize = 10;
const ROOF_FILL: usize = 11;

const LAYOUT: [(f64, f64); 12] = [
    (0.0, 0.5),
    (1.0, 0.0),
    (1.0, 0.5),
    (0.0, 0.0),
    (0.4, 0.25),
    (0.6, 0.25),
    (0.4, 0.0),
    (0.6, 0.0),
    (0.5, 1.0),
    (0.1, 0.4),
    (0.5, 0.22),
    (0.5, 0.65),
];

/// Walls with a centred door under a triangular roof. Rotates about the
/// bottom-left wall corner.
#[derive(Debug, Clone, PartialEq)]
pub struct House {
    figure: Figure,
    walls: Rgba,
    door: Rgba,
    roof: Rgba,
}

impl House {
    pub fn new(width: f64, height: f64, x: f64, y: f64, walls: Rgba, door: Rgba, roof: Rgba) -> Self {
        Self {
            figure: Figure::new(width, height, (x, y), &LAYOUT, WALL_BOTTOM_LEFT),
            walls,
            door,
            roof,
        }
    }
}

impl Shape for House {
    fn kind(&self) -> &'static str {
        "house"
    }

    fn figure(&self) -> &Figure {
        &self.figure
    }

    fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    fn colors(&self) -> Vec<Rgba> {
        vec![self.walls, self.door, self.roof]
    }

    fn draw(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        let at = |i| canvas(&self.figure, ctx, i);
        let edge = |surface: &mut PixelBuffer, a: usize, b: usize, color: Rgba, aa: bool| {
            let ((x1, y1), (x2, y2)) = (at(a), at(b));
            draw_line(surface, x1, y1, x2, y2, color, aa);
        };

        edge(surface, WALL_BOTTOM_LEFT, WALL_TOP_LEFT, self.walls, false);
        edge(surface, WALL_TOP_LEFT, WALL_TOP_RIGHT, self.walls, false);
        edge(surface, WALL_TOP_RIGHT, WALL_BOTTOM_RIGHT, self.walls, false);
        edge(surface, WALL_BOTTOM_RIGHT, WALL_BOTTOM_LEFT, self.walls, false);

        edge(surface, WALL_TOP_LEFT, ROOF_PEAK, self.roof, true);
        edge(surface, WALL_TOP_RIGHT, ROOF_PEAK, self.roof, true);

        edge(surface, DOOR_BOTTOM_LEFT, DOOR_TOP_LEFT, self.door, false);
        edge(surface, DOOR_TOP_LEFT, DOOR_TOP_RIGHT, self.door, false);
        edge(surface, DOOR_TOP_RIGHT, DOOR_BOTTOM_RIGHT, self.door, false);
        edge(surface, DOOR_BOTTOM_RIGHT, DOOR_BOTTOM_LEFT, self.door, false);

        for (seed, color) in [(WALL_FILL, self.walls), (DOOR_FILL, self.door), (ROOF_FILL, self.roof)] {
            let (x, y) = at(seed);
            flood_fill(surface, x, y, color);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(house: &House) -> PixelBuffer {
        let mut surface = PixelBuffer::with_size(800, 600);
        surface.fill(Rgba::WHITE);
        house.draw(&mut surface, &RenderContext::new(800, 600, 100.0, 75.0));
        surface
    }

    #[test]
    fn test_anchor_layout() {
        let house = House::new(30.0, 20.0, 50.0, 35.0, Rgba::RED, Rgba::BLUE, Rgba::GREEN);
        let peak = house.figure().point(ROOF_PEAK);
        assert_eq!((peak.x, peak.y), (65.0, 55.0));
        assert_eq!(house.figure().pivot(), (50.0, 35.0));
        assert_eq!(house.colors(), vec![Rgba::RED, Rgba::BLUE, Rgba::GREEN]);
    }

    #[test]
    fn test_regions_filled_with_their_colors() {
        let house = House::new(30.0, 20.0, 50.0, 35.0, Rgba::RED, Rgba::BLUE, Rgba::GREEN);
        let surface = render(&house);
        let ctx = RenderContext::new(800, 600, 100.0, 75.0);

        // Wall body left of the door
        let (x, y) = ctx.to_canvas_xy(54.0, 40.0);
        assert_eq!(surface.get_pixel(x, y), Some(Rgba::RED));
        // Door interior
        let (x, y) = ctx.to_canvas_xy(65.0, 38.0);
        assert_eq!(surface.get_pixel(x, y), Some(Rgba::BLUE));
        // Roof interior
        let (x, y) = ctx.to_canvas_xy(65.0, 50.0);
        assert_eq!(surface.get_pixel(x, y), Some(Rgba::GREEN));
        // Outside
        let (x, y) = ctx.to_canvas_xy(20.0, 20.0);
        assert_eq!(surface.get_pixel(x, y), Some(Rgba::WHITE));
    }

    #[test]
    fn test_peak_stays_centred_after_uniform_scale() {
        let mut house = House::new(30.0, 20.0, 50.0, 35.0, Rgba::RED, Rgba::BLUE, Rgba::GREEN);
        house.scale(2.0, 2.0);
        let f = house.figure();
        let mid = (f.point(WALL_TOP_LEFT).x + f.point(WALL_TOP_RIGHT).x) / 2.0;
        assert!((f.point(ROOF_PEAK).x - mid).abs() < 1e-9);
        assert_eq!((house.width(), house.height()), (60.0, 40.0));
    }
}
