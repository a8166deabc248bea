use super::{canvas, ellipse_on_canvas, Figure, Shape};
use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::raster::{draw_circle, draw_curve_with, draw_line, draw_rotated_ellipse, flood_fill};
use crate::surface::PixelBuffer;

const TRUNK_BOTTOM_LEFT: usize = 0;
const TRUNK_BOTTOM_RIGHT: usize = 1;
const TRUNK_TOP_RIGHT: usize = 2;
const TRUNK_TOP_LEFT: usize = 3;
/// Control points pulling each trunk side inward
const TRUNK_RIGHT_BEND: usize = 4;
const TRUNK_LEFT_BEND: usize = 5;
const CROWN_CENTER: usize = 6;
const CROWN_LEFT: usize = 7;
const CROWN_RIGHT: usize = 8;
const FRUIT_A: usize = 9;
const FRUIT_B: usize = 10;
const TRUNK_FILL: usize = 11;

const LAYOUT: [(f64, f64); 12] = [
    (0.0, 0.0),
    (1.0, 0.0),
    (0.8, 0.75),
    (0.2, 0.75),
    (0.7, 0.25),
    (0.3, 0.25),
    (0.5, 0.85),
    (0.25, 0.72),
    (0.75, 0.72),
    (0.64, 0.69),
    (0.32, 0.86),
    (0.5, 0.375),
];

/// Semi-axes of the leaf ellipses as fractions of (width, height)
const CROWN_CENTER_RADII: (f64, f64) = (0.38, 0.22);
const CROWN_SIDE_RADII: (f64, f64) = (0.235, 0.18);
/// Fruit radius as a fraction of width
const FRUIT_RADIUS: f64 = 0.06;

/// A trunk with curved sides under three leaf ellipses and two fruits.
/// Rotates about the bottom-left trunk corner.
#[derive(Debug, Clone, PartialEq)]
pub struct Tree {
    figure: Figure,
    trunk: Rgba,
    leaves: Rgba,
    fruit: Rgba,
}

impl Tree {
    pub fn new(width: f64, height: f64, x: f64, y: f64, trunk: Rgba, leaves: Rgba, fruit: Rgba) -> Self {
        Self {
            figure: Figure::new(width, height, (x, y), &LAYOUT, TRUNK_BOTTOM_LEFT),
            trunk,
            leaves,
            fruit,
        }
    }

    fn draw_trunk(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        let at = |i| canvas(&self.figure, ctx, i);
        let (bl, br, tr, tl) = (
            at(TRUNK_BOTTOM_LEFT),
            at(TRUNK_BOTTOM_RIGHT),
            at(TRUNK_TOP_RIGHT),
            at(TRUNK_TOP_LEFT),
        );
        let (left_bend, right_bend) = (at(TRUNK_LEFT_BEND), at(TRUNK_RIGHT_BEND));

        draw_line(surface, bl.0, bl.1, br.0, br.1, self.trunk, false);
        draw_line(surface, tl.0, tl.1, tr.0, tr.1, self.trunk, false);
        draw_curve_with(surface, [bl, left_bend, left_bend, tl], self.trunk, false, &ctx.curve);
        draw_curve_with(surface, [br, right_bend, right_bend, tr], self.trunk, false, &ctx.curve);

        let (x, y) = at(TRUNK_FILL);
        flood_fill(surface, x, y, self.trunk);
    }

    fn draw_crown(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        let (w, h) = (self.figure.width(), self.figure.height());
        let crowns = [
            (CROWN_CENTER, CROWN_CENTER_RADII),
            (CROWN_LEFT, CROWN_SIDE_RADII),
            (CROWN_RIGHT, CROWN_SIDE_RADII),
        ];
        for (anchor, (fx, fy)) in crowns {
            let (cx, cy) = canvas(&self.figure, ctx, anchor);
            let (rx, ry, angle) = ellipse_on_canvas(&self.figure, ctx, anchor, fx * w, fy * h);
            draw_rotated_ellipse(surface, cx, cy, rx, ry, angle, self.leaves, true, true);
        }

        let radius = (FRUIT_RADIUS * w * ctx.scale_x()).round() as i32;
        for anchor in [FRUIT_A, FRUIT_B] {
            let (cx, cy) = canvas(&self.figure, ctx, anchor);
            draw_circle(surface, cx, cy, radius, self.fruit, true, true);
        }
    }
}

impl Shape for Tree {
    fn kind(&self) -> &'static str {
        "tree"
    }

    fn figure(&self) -> &Figure {
        &self.figure
    }

    fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    fn colors(&self) -> Vec<Rgba> {
        vec![self.trunk, self.leaves, self.fruit]
    }

    fn draw(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        self.draw_trunk(surface, ctx);
        self.draw_crown(surface, ctx);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROWN: Rgba = Rgba::rgb(139, 69, 19);

    fn setup() -> (Tree, RenderContext, PixelBuffer) {
        let tree = Tree::new(20.0, 30.0, 10.0, 5.0, BROWN, Rgba::GREEN, Rgba::RED);
        let ctx = RenderContext::new(400, 300, 100.0, 75.0);
        let mut surface = PixelBuffer::with_size(400, 300);
        surface.fill(Rgba::WHITE);
        (tree, ctx, surface)
    }

    #[test]
    fn test_trunk_filled() {
        let (tree, ctx, mut surface) = setup();
        tree.draw(&mut surface, &ctx);
        let (x, y) = ctx.to_canvas_xy(20.0, 8.0);
        assert_eq!(surface.get_pixel(x, y), Some(BROWN));
    }

    #[test]
    fn test_crown_and_fruit_drawn_on_top() {
        let (tree, ctx, mut surface) = setup();
        tree.draw(&mut surface, &ctx);
        let (x, y) = canvas(tree.figure(), &ctx, CROWN_CENTER);
        assert_eq!(surface.get_pixel(x, y), Some(Rgba::GREEN));
        let (x, y) = canvas(tree.figure(), &ctx, FRUIT_A);
        assert_eq!(surface.get_pixel(x, y), Some(Rgba::RED));
    }

    #[test]
    fn test_leaf_radii_follow_rotation() {
        let (_, ctx, _) = setup();
        let mut tree = Tree::new(20.0, 30.0, 40.0, 5.0, BROWN, Rgba::GREEN, Rgba::RED);
        let (rx, ry, angle) = ellipse_on_canvas(tree.figure(), &ctx, CROWN_CENTER, 7.6, 6.6);
        assert!((rx - 30).abs() <= 1 && (ry - 26).abs() <= 1);
        assert!(angle.abs() < 1e-9);

        tree.rotate_figure(90.0);
        let (rx, ry, angle) = ellipse_on_canvas(tree.figure(), &ctx, CROWN_CENTER, 7.6, 6.6);
        assert!((rx - 30).abs() <= 1 && (ry - 26).abs() <= 1);
        // Counter-clockwise in the universe is upward on the canvas
        assert!((angle + std::f64::consts::FRAC_PI_2).abs() < 0.05);
    }

    #[test]
    fn test_trunk_bends_sit_on_their_own_side() {
        let (tree, ctx, _) = setup();
        let left = tree.figure().point(TRUNK_LEFT_BEND);
        let right = tree.figure().point(TRUNK_RIGHT_BEND);
        let centre = tree.figure().point(TRUNK_FILL);
        assert!(left.x < centre.x && centre.x < right.x);

        // Each side curve stays on its own half of the trunk
        let mut surface = PixelBuffer::with_size(400, 300);
        surface.fill(Rgba::WHITE);
        let (lx, ly) = canvas(tree.figure(), &ctx, TRUNK_LEFT_BEND);
        let (rx, _) = canvas(tree.figure(), &ctx, TRUNK_RIGHT_BEND);
        assert!(lx < rx);
        tree.draw_trunk(&mut surface, &ctx);
        let (cx, _) = canvas(tree.figure(), &ctx, TRUNK_FILL);
        let row: Vec<i32> = (0..400).filter(|&x| surface.get_pixel(x, ly) == Some(BROWN)).collect();
        assert!(row.first().is_some_and(|&x| x < cx));
        assert!(row.last().is_some_and(|&x| x > cx));
    }

    #[test]
    fn test_colors_order() {
        let (tree, _, _) = setup();
        assert_eq!(tree.colors(), vec![BROWN, Rgba::GREEN, Rgba::RED]);
        assert_eq!(tree.kind(), "tree");
    }
}
