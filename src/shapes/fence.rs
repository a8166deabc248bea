use super::{canvas, Figure, Shape};
use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::raster::{draw_rectangle, draw_triangle};
use crate::surface::PixelBuffer;

/// Corners of one plank, listed bottom-left, bottom-right, top-right, top-left
const POSTS: [[usize; 4]; 2] = [[0, 1, 2, 3], [4, 5, 6, 7]];
const RAILS: [[usize; 4]; 2] = [[8, 9, 10, 11], [12, 13, 14, 15]];
/// Pointed cap above each post
const CAPS: [usize; 2] = [16, 17];

const LAYOUT: [(f64, f64); 18] = [
    // posts
    (0.15, 0.0),
    (0.45, 0.0),
    (0.45, 0.85),
    (0.15, 0.85),
    (0.55, 0.0),
    (0.85, 0.0),
    (0.85, 0.85),
    (0.55, 0.85),
    // rails
    (0.0, 0.466),
    (1.0, 0.466),
    (1.0, 0.766),
    (0.0, 0.766),
    (0.0, 0.083),
    (1.0, 0.083),
    (1.0, 0.383),
    (0.0, 0.383),
    // caps
    (0.3, 1.0),
    (0.7, 1.0),
];

/// Two pointed posts joined by two rails, all filled. Rotates about the
/// bottom-left corner of the first post.
#[derive(Debug, Clone, PartialEq)]
pub struct Fence {
    figure: Figure,
    planks: Rgba,
    caps: Rgba,
}

impl Fence {
    pub fn new(width: f64, height: f64, x: f64, y: f64, planks: Rgba, caps: Rgba) -> Self {
        Self {
            figure: Figure::new(width, height, (x, y), &LAYOUT, POSTS[0][0]),
            planks,
            caps,
        }
    }
}

impl Shape for Fence {
    fn kind(&self) -> &'static str {
        "fence"
    }

    fn figure(&self) -> &Figure {
        &self.figure
    }

    fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    fn colors(&self) -> Vec<Rgba> {
        vec![self.planks, self.caps]
    }

    fn draw(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        let at = |i| canvas(&self.figure, ctx, i);

        for plank in POSTS.iter().chain(&RAILS) {
            draw_rectangle(surface, plank.map(at), self.planks);
        }
        for (post, cap) in POSTS.iter().zip(CAPS) {
            draw_triangle(surface, [at(post[3]), at(post[2]), at(cap)], self.caps);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const BROWN: Rgba = Rgba::rgb(139, 69, 19);
    const WHEAT: Rgba = Rgba::rgb(245, 222, 179);

    fn render(fence: &Fence) -> (PixelBuffer, RenderContext) {
        let ctx = RenderContext::new(800, 600, 100.0, 75.0);
        let mut surface = PixelBuffer::with_size(800, 600);
        surface.fill(Rgba::WHITE);
        fence.draw(&mut surface, &ctx);
        (surface, ctx)
    }

    #[test]
    fn test_planks_and_caps_colored() {
        let fence = Fence::new(40.0, 20.0, 10.0, 10.0, BROWN, WHEAT);
        let (surface, ctx) = render(&fence);

        // Middle of the first post, below the rails
        let (x, y) = ctx.to_canvas_xy(22.0, 11.0);
        assert_eq!(surface.get_pixel(x, y), Some(BROWN));
        // Rail between the posts
        let (x, y) = ctx.to_canvas_xy(30.0, 22.0);
        assert_eq!(surface.get_pixel(x, y), Some(BROWN));
        // Just under the first cap's tip
        let (x, y) = ctx.to_canvas_xy(22.0, 29.0);
        assert_eq!(surface.get_pixel(x, y), Some(WHEAT));
        // Gap between posts, above the top rail
        let (x, y) = ctx.to_canvas_xy(30.0, 27.0);
        assert_eq!(surface.get_pixel(x, y), Some(Rgba::WHITE));
    }

    #[test]
    fn test_full_turn_restores_anchors() {
        let mut fence = Fence::new(40.0, 20.0, 10.0, 10.0, BROWN, WHEAT);
        let before: Vec<_> = fence.anchors().to_vec();
        for _ in 0..24 {
            fence.rotate_figure(15.0);
        }
        for (a, b) in before.iter().zip(fence.anchors()) {
            assert!((a.x - b.x).abs() < 1e-6 && (a.y - b.y).abs() < 1e-6);
        }
        let r = fence.rotation();
        assert!(r < 1e-9 || std::f64::consts::TAU - r < 1e-9);
    }

    #[test]
    fn test_pivot_is_first_post_corner() {
        let fence = Fence::new(40.0, 20.0, 10.0, 10.0, BROWN, WHEAT);
        assert_eq!(fence.figure().pivot(), (16.0, 10.0));
        assert_eq!(fence.colors(), vec![BROWN, WHEAT]);
    }
}
