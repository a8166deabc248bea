use serde::{Deserialize, Serialize};

use super::line::draw_line;
use crate::color::Rgba;
use crate::geometry::perp_dist;
use crate::surface::PixelBuffer;

/// Tuning for the two-tier cubic Bézier policy.
///
/// Curves flatter than the resolution-scaled threshold are sampled
/// directly; the rest are subdivided until each piece is within
/// `tolerance` pixels of its chord or `max_depth` is reached.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CurveFlattening {
    /// Surface size the base threshold was tuned against
    pub reference_width: f64,
    pub reference_height: f64,
    /// Threshold in pixels at the reference size
    pub base_threshold: f64,
    pub min_threshold: f64,
    pub max_threshold: f64,
    /// Max chord distance of a subdivided piece, in pixels
    pub tolerance: f64,
    pub max_depth: u32,
}

impl Default for CurveFlattening {
    fn default() -> Self {
        Self {
            reference_width: 895.0,
            reference_height: 503.0,
            base_threshold: 10.0,
            min_threshold: 3.0,
            max_threshold: 24.0,
            tolerance: 0.5,
            max_depth: 16,
        }
    }
}

impl CurveFlattening {
    /// Direct-sampling threshold for a surface of the given size
    pub fn threshold(&self, width: u32, height: u32) -> f64 {
        let reference = self.reference_width.hypot(self.reference_height);
        if reference <= 0.0 {
            return self.base_threshold.clamp(self.min_threshold, self.max_threshold);
        }
        let diagonal = f64::from(width).hypot(f64::from(height));
        (self.base_threshold * diagonal / reference).clamp(self.min_threshold, self.max_threshold)
    }
}

type Ctrl = [(f64, f64); 4];

/// Max perpendicular distance of the inner control points from the chord
pub fn flatness(ctrl: &[(f64, f64); 4]) -> f64 {
    let [p0, p1, p2, p3] = *ctrl;
    perp_dist(p1, p0, p3).max(perp_dist(p2, p0, p3))
}

/// Cubic Bézier with the default flattening constants
pub fn draw_curve(surface: &mut PixelBuffer, ctrl: [(i32, i32); 4], color: Rgba, anti_aliased: bool) {
    draw_curve_with(surface, ctrl, color, anti_aliased, &CurveFlattening::default());
}

pub fn draw_curve_with(
    surface: &mut PixelBuffer,
    ctrl: [(i32, i32); 4],
    color: Rgba,
    anti_aliased: bool,
    params: &CurveFlattening,
) {
    let ctrl: Ctrl = ctrl.map(|(x, y)| (f64::from(x), f64::from(y)));
    if hull_misses(surface, &ctrl) {
        return;
    }
    let threshold = params.threshold(surface.width(), surface.height());

    if flatness(&ctrl) < threshold && endpoint_span(&ctrl) <= direct_span_limit(surface) {
        sample_direct(surface, &ctrl, color, anti_aliased);
    } else {
        subdivide(surface, &ctrl, color, anti_aliased, params, 0);
    }
}

fn bezier_point(ctrl: &Ctrl, u: f64) -> (f64, f64) {
    let [p0, p1, p2, p3] = *ctrl;
    let v = 1.0 - u;
    let b0 = v * v * v;
    let b1 = 3.0 * u * v * v;
    let b2 = 3.0 * u * u * v;
    let b3 = u * u * u;
    (
        b0 * p0.0 + b1 * p1.0 + b2 * p2.0 + b3 * p3.0,
        b0 * p0.1 + b1 * p1.1 + b2 * p2.1 + b3 * p3.1,
    )
}

/// Control hull entirely off the surface (plus a one pixel margin). The
/// curve stays inside its hull, so nothing would be drawn.
fn hull_misses(surface: &PixelBuffer, ctrl: &Ctrl) -> bool {
    let (w, h) = (f64::from(surface.width()), f64::from(surface.height()));
    ctrl.iter().all(|p| p.0 < -1.0)
        || ctrl.iter().all(|p| p.1 < -1.0)
        || ctrl.iter().all(|p| p.0 > w)
        || ctrl.iter().all(|p| p.1 > h)
}

fn endpoint_span(ctrl: &Ctrl) -> f64 {
    let (p0, p3) = (ctrl[0], ctrl[3]);
    (p3.0 - p0.0).abs().max((p3.1 - p0.1).abs())
}

/// Longest endpoint span sampled directly; longer curves are subdivided so
/// off-surface pieces can be dropped
fn direct_span_limit(surface: &PixelBuffer) -> f64 {
    4.0 * (f64::from(surface.width()) + f64::from(surface.height()))
}

/// Fixed-step parametric sampling, three samples per pixel of endpoint span
fn sample_direct(surface: &mut PixelBuffer, ctrl: &Ctrl, color: Rgba, anti_aliased: bool) {
    let steps = ((endpoint_span(ctrl) * 3.0) as u32).max(1);

    for i in 0..=steps {
        let u = f64::from(i) / f64::from(steps);
        let (xu, yu) = bezier_point(ctrl, u);
        let x = xu.floor();
        let y = yu.floor();
        let (xi, yi) = (x as i32, y as i32);

        if anti_aliased {
            let fx = (xu - x) as f32;
            let fy = (yu - y) as f32;
            surface.blend_pixel(xi, yi, color, (1.0 - fx) * (1.0 - fy));
            surface.blend_pixel(xi + 1, yi, color, fx * (1.0 - fy));
            surface.blend_pixel(xi, yi + 1, color, (1.0 - fx) * fy);
            surface.blend_pixel(xi + 1, yi + 1, color, fx * fy);
        } else {
            surface.set_pixel(xi, yi, color);
        }
    }
}

fn midpoint(a: (f64, f64), b: (f64, f64)) -> (f64, f64) {
    ((a.0 + b.0) * 0.5, (a.1 + b.1) * 0.5)
}

/// De Casteljau split at t = 0.5
fn split(ctrl: &Ctrl) -> (Ctrl, Ctrl) {
    let [p0, p1, p2, p3] = *ctrl;
    let p01 = midpoint(p0, p1);
    let p12 = midpoint(p1, p2);
    let p23 = midpoint(p2, p3);
    let p012 = midpoint(p01, p12);
    let p123 = midpoint(p12, p23);
    let mid = midpoint(p012, p123);
    ([p0, p01, p012, mid], [mid, p123, p23, p3])
}

fn subdivide(
    surface: &mut PixelBuffer,
    ctrl: &Ctrl,
    color: Rgba,
    anti_aliased: bool,
    params: &CurveFlattening,
    depth: u32,
) {
    if hull_misses(surface, ctrl) {
        return;
    }
    if depth >= params.max_depth || flatness(ctrl) <= params.tolerance {
        let (a, b) = (ctrl[0], ctrl[3]);
        draw_line(
            surface,
            a.0.round() as i32,
            a.1.round() as i32,
            b.0.round() as i32,
            b.1.round() as i32,
            color,
            anti_aliased,
        );
        return;
    }
    let (left, right) = split(ctrl);
    subdivide(surface, &left, color, anti_aliased, params, depth + 1);
    subdivide(surface, &right, color, anti_aliased, params, depth + 1);
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn blank(w: u32, h: u32) -> PixelBuffer {
        let mut surface = PixelBuffer::with_size(w, h);
        surface.fill(Rgba::WHITE);
        surface
    }

    #[test]
    fn test_default_threshold_at_reference_size() {
        let params = CurveFlattening::default();
        assert_relative_eq!(params.threshold(895, 503), 10.0, epsilon = 1e-9);
    }

    #[test]
    fn test_threshold_clamped() {
        let params = CurveFlattening::default();
        assert_relative_eq!(params.threshold(10, 10), 3.0);
        assert_relative_eq!(params.threshold(10_000, 10_000), 24.0);
    }

    #[test]
    fn test_flatness_collinear_is_zero() {
        let ctrl = [(0.0, 0.0), (10.0, 0.0), (20.0, 0.0), (30.0, 0.0)];
        assert_relative_eq!(flatness(&ctrl), 0.0);
    }

    #[test]
    fn test_flatness_measures_inner_points() {
        let ctrl = [(0.0, 0.0), (10.0, 5.0), (20.0, -8.0), (30.0, 0.0)];
        assert_relative_eq!(flatness(&ctrl), 8.0, epsilon = 1e-9);
    }

    #[test]
    fn test_split_meets_at_curve_midpoint() {
        let ctrl = [(0.0, 0.0), (0.0, 40.0), (40.0, 40.0), (40.0, 0.0)];
        let (left, right) = split(&ctrl);
        let mid = bezier_point(&ctrl, 0.5);
        assert_relative_eq!(left[3].0, mid.0);
        assert_relative_eq!(left[3].1, mid.1);
        assert_eq!(left[3], right[0]);
    }

    #[test]
    fn test_curve_endpoints_drawn() {
        for ctrl in [
            [(2, 2), (10, 30), (30, 30), (38, 2)],
            [(5, 5), (6, 5), (7, 6), (8, 8)],
        ] {
            let mut surface = blank(40, 40);
            draw_curve(&mut surface, ctrl, Rgba::RED, false);
            assert_eq!(surface.get_pixel(ctrl[0].0, ctrl[0].1), Some(Rgba::RED));
            assert_eq!(surface.get_pixel(ctrl[3].0, ctrl[3].1), Some(Rgba::RED));
        }
    }

    #[test]
    fn test_steep_curve_is_connected() {
        // Flatness well above the threshold: goes through subdivision
        let mut surface = blank(60, 60);
        draw_curve(&mut surface, [(5, 50), (5, 0), (55, 0), (55, 50)], Rgba::RED, false);
        // 8-connected lines leave no empty row between the apex and the base
        let apex = (0..60)
            .find(|&y| (0..60).any(|x| surface.get_pixel(x, y) == Some(Rgba::RED)))
            .unwrap_or(60);
        for y in apex..=50 {
            assert!(
                (0..60).any(|x| surface.get_pixel(x, y) == Some(Rgba::RED)),
                "gap at row {}",
                y
            );
        }
    }

    #[test]
    fn test_degenerate_curve_single_point() {
        let mut surface = blank(10, 10);
        draw_curve(&mut surface, [(4, 4); 4], Rgba::BLUE, false);
        assert_eq!(surface.get_pixel(4, 4), Some(Rgba::BLUE));
    }

    #[test]
    fn test_anti_aliased_curve_blends() {
        let mut surface = blank(40, 40);
        draw_curve(&mut surface, [(2, 20), (12, 18), (24, 22), (36, 20)], Rgba::BLACK, true);
        let touched = (0..40)
            .flat_map(|y| (0..40).map(move |x| (x, y)))
            .filter(|&(x, y)| surface.get_pixel(x, y) != Some(Rgba::WHITE))
            .count();
        assert!(touched > 30);
    }

    #[test]
    fn test_curve_with_extreme_control_points_clips() {
        let mut surface = blank(20, 20);
        draw_curve(
            &mut surface,
            [(i32::MIN, 10), (0, i32::MAX), (20, i32::MIN), (i32::MAX, 10)],
            Rgba::RED,
            false,
        );
        let mut flat = blank(20, 20);
        draw_curve(
            &mut flat,
            [(-2_000_000_000, 5), (-1_000_000_000, 5), (1_000_000_000, 5), (2_000_000_000, 5)],
            Rgba::RED,
            true,
        );
        // A collinear curve through the surface paints the whole row
        assert!((0..20).all(|x| flat.get_pixel(x, 5) == Some(Rgba::RED)));
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_curve_accepts_any_control_points(
            pts in proptest::array::uniform4((any::<i32>(), any::<i32>())),
            aa in any::<bool>(),
        ) {
            let mut surface = blank(24, 16);
            surface.fill(Rgba::BLACK);
            draw_curve(&mut surface, pts, Rgba::RED, aa);
            prop_assert_eq!(surface.as_bytes().len(), 24 * 16 * 4);
            for y in 0..16 {
                for x in 0..24 {
                    let c = surface.get_pixel(x, y).unwrap_or_default();
                    prop_assert!(c.g == 0 && c.b == 0);
                }
            }
        }
    }
}
