use std::f64::consts::{FRAC_PI_2, TAU};

use super::{canvas, ellipse_on_canvas, Figure, Shape};
use crate::color::Rgba;
use crate::coords::RenderContext;
use crate::raster::{draw_rotated_ellipse, draw_triangle};
use crate::surface::PixelBuffer;

const CENTER: usize = 0;
const LAYOUT: [(f64, f64); 1] = [(0.5, 0.5)];

pub const RAY_COUNT: usize = 16;
/// Disk semi-axes as a fraction of (width, height)
const DISK_RADIUS: f64 = 0.28;
/// Ray base and length, relative to the disk radius
const RAY_BASE: f64 = 0.96;
const RAY_LENGTH: f64 = 0.85;
const RAY_HALF_ANGLE_DEG: f64 = 12.0;

/// A disk ringed by triangular rays. Rotates about its center, so
/// rotation only turns the rays.
#[derive(Debug, Clone, PartialEq)]
pub struct Sun {
    figure: Figure,
    disk: Rgba,
    rays: Rgba,
}

impl Sun {
    pub fn new(width: f64, height: f64, x: f64, y: f64, disk: Rgba, rays: Rgba) -> Self {
        Self {
            figure: Figure::new(width, height, (x, y), &LAYOUT, CENTER),
            disk,
            rays,
        }
    }

    /// Canvas triangles (base, base, tip) for every ray
    fn ray_triangles(&self, ctx: &RenderContext) -> Vec<[(i32, i32); 3]> {
        let rx = DISK_RADIUS * self.figure.width();
        let ry = DISK_RADIUS * self.figure.height();
        let half = RAY_HALF_ANGLE_DEG.to_radians();
        let local = |angle: f64, scale: f64| {
            let (x, y) = self
                .figure
                .local_offset(CENTER, scale * rx * angle.cos(), scale * ry * angle.sin());
            ctx.to_canvas_xy(x, y)
        };

        (0..RAY_COUNT)
            .map(|i| {
                let theta = -FRAC_PI_2 + TAU * i as f64 / RAY_COUNT as f64;
                [
                    local(theta - half, RAY_BASE),
                    local(theta + half, RAY_BASE),
                    local(theta, RAY_BASE + RAY_LENGTH),
                ]
            })
            .collect()
    }
}

impl Shape for Sun {
    fn kind(&self) -> &'static str {
        "sun"
    }

    fn figure(&self) -> &Figure {
        &self.figure
    }

    fn figure_mut(&mut self) -> &mut Figure {
        &mut self.figure
    }

    fn colors(&self) -> Vec<Rgba> {
        vec![self.disk, self.rays]
    }

    fn draw(&self, surface: &mut PixelBuffer, ctx: &RenderContext) {
        for triangle in self.ray_triangles(ctx) {
            draw_triangle(surface, triangle, self.rays);
        }

        let (cx, cy) = canvas(&self.figure, ctx, CENTER);
        let (rx, ry, angle) = ellipse_on_canvas(
            &self.figure,
            ctx,
            CENTER,
            DISK_RADIUS * self.figure.width(),
            DISK_RADIUS * self.figure.height(),
        );
        draw_rotated_ellipse(surface, cx, cy, rx, ry, angle, self.disk, false, true);
    }
}
