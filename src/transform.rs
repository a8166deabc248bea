//! 3x3 homogeneous affine transforms in universe space

use std::ops::Mul;

use crate::geometry::Point2D;

/// Row-major 3x3 matrix. Every constructor and product keeps the bottom
/// row at (0, 0, 1).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Affine2D {
    pub m: [f64; 9],
}

impl Affine2D {
    pub const IDENTITY: Self = Self {
        m: [1.0, 0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0],
    };

    pub fn identity() -> Self {
        Self::IDENTITY
    }

    pub fn translation(dx: f64, dy: f64) -> Self {
        Self {
            m: [1.0, 0.0, dx, 0.0, 1.0, dy, 0.0, 0.0, 1.0],
        }
    }

    /// Counter-clockwise rotation about the origin (y up)
    pub fn rotation_rad(radians: f64) -> Self {
        let (s, c) = radians.sin_cos();
        Self {
            m: [c, -s, 0.0, s, c, 0.0, 0.0, 0.0, 1.0],
        }
    }

    pub fn rotation_deg(degrees: f64) -> Self {
        Self::rotation_rad(degrees.to_radians())
    }

    pub fn scaling(sx: f64, sy: f64) -> Self {
        Self {
            m: [sx, 0.0, 0.0, 0.0, sy, 0.0, 0.0, 0.0, 1.0],
        }
    }

    /// `self` applied first, then `next`
    pub fn then(self, next: Self) -> Self {
        next * self
    }

    /// Apply `m` with `pivot` as the origin: T(p) * m * T(-p)
    pub fn about(pivot: (f64, f64), m: Self) -> Self {
        Self::translation(pivot.0, pivot.1) * m * Self::translation(-pivot.0, -pivot.1)
    }

    pub fn apply(&self, x: f64, y: f64) -> (f64, f64) {
        let m = &self.m;
        (m[0] * x + m[1] * y + m[2], m[3] * x + m[4] * y + m[5])
    }

    /// Transform a point in place, keeping its color tag
    pub fn apply_point(&self, p: &mut Point2D) {
        let (x, y) = self.apply(p.x, p.y);
        p.set(x, y);
    }

    pub fn determinant(&self) -> f64 {
        self.m[0] * self.m[4] - self.m[1] * self.m[3]
    }

    /// Inverse of the affine map; `None` when the linear part is singular
    pub fn inverse(&self) -> Option<Self> {
        let det = self.determinant();
        if det.abs() < f64::EPSILON {
            return None;
        }
        let [a, b, tx, c, d, ty, ..] = self.m;
        let inv = 1.0 / det;
        let (ia, ib, ic, id) = (d * inv, -b * inv, -c * inv, a * inv);
        Some(Self {
            m: [
                ia,
                ib,
                -(ia * tx + ib * ty),
                ic,
                id,
                -(ic * tx + id * ty),
                0.0,
                0.0,
                1.0,
            ],
        })
    }
}

impl Default for Affine2D {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Mul for Affine2D {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self {
        let a = &self.m;
        let b = &rhs.m;
        let mut m = [0.0; 9];
        for row in 0..3 {
            for col in 0..3 {
                m[row * 3 + col] = (0..3).map(|k| a[row * 3 + k] * b[k * 3 + col]).sum();
            }
        }
        Self { m }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    fn assert_point(actual: (f64, f64), expected: (f64, f64)) {
        assert_abs_diff_eq!(actual.0, expected.0, epsilon = 1e-9);
        assert_abs_diff_eq!(actual.1, expected.1, epsilon = 1e-9);
    }

    #[test]
    fn test_identity_leaves_points() {
        assert_point(Affine2D::identity().apply(3.5, -2.0), (3.5, -2.0));
    }

    #[test]
    fn test_translation() {
        assert_point(Affine2D::translation(2.0, -1.0).apply(1.0, 1.0), (3.0, 0.0));
    }

    #[test]
    fn test_rotation_is_counter_clockwise() {
        assert_point(Affine2D::rotation_deg(90.0).apply(1.0, 0.0), (0.0, 1.0));
    }

    #[test]
    fn test_then_order() {
        // Scale first, then translate
        let m = Affine2D::scaling(2.0, 3.0).then(Affine2D::translation(1.0, 1.0));
        assert_point(m.apply(1.0, 1.0), (3.0, 4.0));
    }

    #[test]
    fn test_about_pivot_fixes_pivot() {
        let m = Affine2D::about((5.0, 5.0), Affine2D::rotation_deg(37.0));
        assert_point(m.apply(5.0, 5.0), (5.0, 5.0));
        assert_point(
            Affine2D::about((1.0, 1.0), Affine2D::rotation_deg(90.0)).apply(2.0, 1.0),
            (1.0, 2.0),
        );
    }

    #[test]
    fn test_bottom_row_preserved() {
        let m = Affine2D::about((3.0, -2.0), Affine2D::rotation_deg(12.0))
            * Affine2D::scaling(2.0, 0.5)
            * Affine2D::translation(4.0, 4.0);
        assert_eq!(&m.m[6..], &[0.0, 0.0, 1.0]);
    }

    #[test]
    fn test_inverse_roundtrip() {
        let m = Affine2D::about((3.0, -2.0), Affine2D::rotation_deg(33.0)) * Affine2D::scaling(2.0, 0.5);
        let inv = m.inverse().unwrap_or_default();
        let (x, y) = m.apply(7.0, 11.0);
        assert_point(inv.apply(x, y), (7.0, 11.0));
        assert!(Affine2D::scaling(0.0, 1.0).inverse().is_none());
    }

    #[test]
    fn test_apply_point_keeps_color() {
        let mut p = Point2D::with_color(1.0, 0.0, crate::color::Rgba::RED);
        Affine2D::translation(1.0, 2.0).apply_point(&mut p);
        assert_point((p.x, p.y), (2.0, 2.0));
        assert_eq!(p.color, Some(crate::color::Rgba::RED));
    }
}
