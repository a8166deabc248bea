use crate::color::Rgba;
use crate::surface::PixelBuffer;

/// Sub-samples per axis for supersampled ellipses (4x4 per pixel)
const SAMPLES: i32 = 4;
/// Width of the outline band around `value == 1`
const OUTLINE_TOLERANCE: f32 = 0.07 / SAMPLES as f32;

/// Circle centred on a pixel. Radius <= 0 draws nothing.
pub fn draw_circle(
    surface: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    radius: i32,
    color: Rgba,
    anti_aliased: bool,
    filled: bool,
) {
    if radius <= 0 || misses_surface(surface, cx, cy, radius, radius) {
        return;
    }
    if anti_aliased {
        circle_aa(surface, cx, cy, radius, color, filled);
    } else if i64::from(radius) > row_span_limit(surface) {
        ellipse_rows(surface, cx, cy, radius, radius, color, filled);
    } else if filled {
        fill_circle(surface, cx, cy, radius, color);
    } else {
        circle_outline(surface, cx, cy, radius, color);
    }
}

/// Axis-aligned ellipse. Either radius <= 0 draws nothing.
pub fn draw_ellipse(
    surface: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    color: Rgba,
    anti_aliased: bool,
    filled: bool,
) {
    if rx <= 0 || ry <= 0 || misses_surface(surface, cx, cy, rx, ry) {
        return;
    }
    if anti_aliased {
        ellipse_supersampled(surface, cx, cy, rx, ry, color, filled);
    } else if i64::from(rx.max(ry)) > row_span_limit(surface) {
        ellipse_rows(surface, cx, cy, rx, ry, color, filled);
    } else {
        ellipse_midpoint(surface, cx, cy, rx, ry, color, filled);
    }
}

/// Ellipse rotated by `angle` radians (canvas orientation, y down).
///
/// Samples are moved into the ellipse's own frame before the implicit
/// test. Anti-aliased output uses a 4x4 grid per pixel; the solid path
/// tests the pixel position only.
pub fn draw_rotated_ellipse(
    surface: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    angle: f64,
    color: Rgba,
    anti_aliased: bool,
    filled: bool,
) {
    if rx <= 0 || ry <= 0 {
        return;
    }

    let (sin, cos) = (angle.sin(), angle.cos());
    let (rxf, ryf) = (f64::from(rx), f64::from(ry));
    let (rx2, ry2) = (rxf * rxf, ryf * ryf);

    // Half extents of the rotated ellipse's bounding box
    let ex = (rx2 * cos * cos + ry2 * sin * sin).sqrt().ceil() as i64 + 2;
    let ey = (rx2 * sin * sin + ry2 * cos * cos).sqrt().ceil() as i64 + 2;
    let (cx, cy) = (i64::from(cx), i64::from(cy));

    let implicit = |px: f64, py: f64| -> f64 {
        let lx = px * cos + py * sin;
        let ly = -px * sin + py * cos;
        lx * lx / rx2 + ly * ly / ry2
    };
    let hit = |value: f64| -> bool {
        if filled {
            value <= 1.0
        } else {
            (value - 1.0).abs() <= f64::from(OUTLINE_TOLERANCE)
        }
    };

    let (y_min, y_max) = clip_range(cy - ey, cy + ey, surface.height());
    let (x_min, x_max) = clip_range(cx - ex, cx + ex, surface.width());

    for y in y_min..=y_max {
        let dy = (i64::from(y) - cy) as f64;
        for x in x_min..=x_max {
            let dx = (i64::from(x) - cx) as f64;
            if anti_aliased {
                let count = subsample_count(dx, dy, |px, py| hit(implicit(px, py)));
                if count > 0 {
                    let coverage = count as f32 / (SAMPLES * SAMPLES) as f32;
                    surface.blend_pixel(x, y, color, coverage);
                }
            } else if hit(implicit(dx, dy)) {
                surface.set_pixel(x, y, color);
            }
        }
    }
}

/// Clamp an inclusive pixel range to `[0, size)`; empty ranges come back with min > max
fn clip_range(min: i64, max: i64, size: u32) -> (i32, i32) {
    let lo = min.max(0);
    let hi = max.min(i64::from(size) - 1);
    if lo > hi {
        (0, -1)
    } else {
        (lo as i32, hi as i32)
    }
}

/// Bounding box of the ellipse lies entirely off the surface
fn misses_surface(surface: &PixelBuffer, cx: i32, cy: i32, rx: i32, ry: i32) -> bool {
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let (rx, ry) = (i64::from(rx) + 1, i64::from(ry) + 1);
    cx + rx < 0
        || cy + ry < 0
        || cx - rx >= i64::from(surface.width())
        || cy - ry >= i64::from(surface.height())
}

/// Radii above this switch from the midpoint walk to per-row spans, so the
/// work stays bounded by the surface instead of the radius
fn row_span_limit(surface: &PixelBuffer) -> i64 {
    2 * (i64::from(surface.width()) + i64::from(surface.height()))
}

/// Horizontal span in i64 space, clipped before it reaches the surface
fn span(surface: &mut PixelBuffer, x1: i64, x2: i64, y: i64, color: Rgba) {
    if y < 0 || y >= i64::from(surface.height()) {
        return;
    }
    let (x1, x2) = (x1.min(x2), x1.max(x2));
    let (x1, x2) = clip_range(x1, x2, surface.width());
    if x1 <= x2 {
        surface.hline(x1, x2, y as i32, color);
    }
}

fn plot(surface: &mut PixelBuffer, x: i64, y: i64, color: Rgba) {
    if let (Ok(x), Ok(y)) = (i32::try_from(x), i32::try_from(y)) {
        surface.set_pixel(x, y, color);
    }
}

/// Count the 4x4 sub-samples of pixel offset (dx, dy) that satisfy `inside`
fn subsample_count(dx: f64, dy: f64, inside: impl Fn(f64, f64) -> bool) -> i32 {
    let mut count = 0;
    for sy in 0..SAMPLES {
        for sx in 0..SAMPLES {
            let px = dx + (f64::from(sx) + 0.5) / f64::from(SAMPLES);
            let py = dy + (f64::from(sy) + 0.5) / f64::from(SAMPLES);
            if inside(px, py) {
                count += 1;
            }
        }
    }
    count
}

// ============================================================================
// Circles
// ============================================================================

/// Midpoint circle with horizontal span filling
fn fill_circle(surface: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let mut x = i64::from(radius);
    let mut y: i64 = 0;
    let mut err = 1 - x;

    while x >= y {
        span(surface, cx - x, cx + x, cy + y, color);
        if y != 0 {
            span(surface, cx - x, cx + x, cy - y, color);
        }
        if x != y {
            span(surface, cx - y, cx + y, cy + x, color);
            if y != 0 {
                span(surface, cx - y, cx + y, cy - x, color);
            }
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// 1px midpoint circle outline
fn circle_outline(surface: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Rgba) {
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let mut x = i64::from(radius);
    let mut y: i64 = 0;
    let mut err = 1 - x;

    while x >= y {
        for (px, py) in [
            (x, y),
            (y, x),
            (-y, x),
            (-x, y),
            (-x, -y),
            (-y, -x),
            (y, -x),
            (x, -y),
        ] {
            plot(surface, cx + px, cy + py, color);
        }

        y += 1;
        if err < 0 {
            err += 2 * y + 1;
        } else {
            x -= 1;
            err += 2 * (y - x) + 1;
        }
    }
}

/// Distance-based coverage: `r + 0.5 - dist`, clamped to [0, 1]
fn circle_aa(surface: &mut PixelBuffer, cx: i32, cy: i32, radius: i32, color: Rgba, filled: bool) {
    let r = f64::from(radius);
    let (cx, cy, radius) = (i64::from(cx), i64::from(cy), i64::from(radius));
    let (y_min, y_max) = clip_range(cy - radius - 1, cy + radius + 1, surface.height());
    let (x_min, x_max) = clip_range(cx - radius - 1, cx + radius + 1, surface.width());

    for py in y_min..=y_max {
        for px in x_min..=x_max {
            let dx = (i64::from(px) - cx) as f64;
            let dy = (i64::from(py) - cy) as f64;
            let dist = dx.hypot(dy);

            let coverage = if filled {
                (r + 0.5 - dist).clamp(0.0, 1.0)
            } else if (dist - r).abs() <= 1.0 {
                (1.0 - (dist - r).abs()).clamp(0.0, 1.0)
            } else {
                0.0
            };
            if coverage > 0.0 {
                surface.blend_pixel(px, py, color, coverage as f32);
            }
        }
    }
}

// ============================================================================
// Ellipses
// ============================================================================

/// Two-region midpoint ellipse; filled mode spans each row pair
fn ellipse_midpoint(
    surface: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    color: Rgba,
    filled: bool,
) {
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let rx2 = i64::from(rx) * i64::from(rx);
    let ry2 = i64::from(ry) * i64::from(ry);
    let two_rx2 = 2 * rx2;
    let two_ry2 = 2 * ry2;

    let mut x: i64 = 0;
    let mut y: i64 = i64::from(ry);
    let mut px: i64 = 0;
    let mut py: i64 = two_rx2 * y;

    let quad = |surface: &mut PixelBuffer, x: i64, y: i64| {
        if filled {
            span(surface, cx - x, cx + x, cy + y, color);
            span(surface, cx - x, cx + x, cy - y, color);
        } else {
            plot(surface, cx + x, cy + y, color);
            plot(surface, cx - x, cy + y, color);
            plot(surface, cx - x, cy - y, color);
            plot(surface, cx + x, cy - y, color);
        }
    };

    // Region 1: slope shallower than -1
    let mut p = (ry2 as f64 - (rx2 * i64::from(ry)) as f64 + 0.25 * rx2 as f64) as i64;
    while px < py {
        quad(surface, x, y);
        x += 1;
        px += two_ry2;
        if p < 0 {
            p += ry2 + px;
        } else {
            y -= 1;
            py -= two_rx2;
            p += ry2 + px - py;
        }
    }

    // Region 2: steeper part down to the horizontal axis
    let xf = x as f64 + 0.5;
    let yf = (y - 1) as f64;
    let mut p = (ry2 as f64 * xf * xf + rx2 as f64 * yf * yf - (rx2 * ry2) as f64) as i64;
    while y >= 0 {
        quad(surface, x, y);
        y -= 1;
        py -= two_rx2;
        if p > 0 {
            p += rx2 - py;
        } else {
            x += 1;
            px += two_ry2;
            p += rx2 - py + px;
        }
    }
}

/// Per-row spans straight from the implicit equation, visiting only rows
/// on the surface. The outline keeps, on each row, the pixels whose
/// outward neighbour row falls outside.
fn ellipse_rows(
    surface: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    color: Rgba,
    filled: bool,
) {
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let (rx, ry) = (i64::from(rx), i64::from(ry));
    let half_width = |dy: i64| -> i64 {
        if dy.abs() > ry {
            return -1;
        }
        let t = dy as f64 / ry as f64;
        (rx as f64 * (1.0 - t * t).max(0.0).sqrt()).floor() as i64
    };

    let (y_min, y_max) = clip_range(cy - ry, cy + ry, surface.height());
    for y in y_min..=y_max {
        let row = i64::from(y);
        let dy = row - cy;
        let outer = half_width(dy);
        if outer < 0 {
            continue;
        }
        if filled {
            span(surface, cx - outer, cx + outer, row, color);
        } else {
            let inner = (half_width(dy.abs() + 1) + 1).min(outer);
            span(surface, cx + inner, cx + outer, row, color);
            span(surface, cx - outer, cx - inner, row, color);
        }
    }
}

/// 4x4 supersampled implicit-equation ellipse
fn ellipse_supersampled(
    surface: &mut PixelBuffer,
    cx: i32,
    cy: i32,
    rx: i32,
    ry: i32,
    color: Rgba,
    filled: bool,
) {
    let rx2 = f64::from(rx) * f64::from(rx);
    let ry2 = f64::from(ry) * f64::from(ry);
    let (cx, cy) = (i64::from(cx), i64::from(cy));
    let (rx, ry) = (i64::from(rx), i64::from(ry));
    let margin_x = rx / i64::from(SAMPLES) + 2;
    let margin_y = ry / i64::from(SAMPLES) + 2;
    let tolerance = f64::from(OUTLINE_TOLERANCE);

    let (y_min, y_max) = clip_range(cy - ry - margin_y, cy + ry + margin_y, surface.height());
    let (x_min, x_max) = clip_range(cx - rx - margin_x, cx + rx + margin_x, surface.width());

    for y in y_min..=y_max {
        let dy = (i64::from(y) - cy) as f64;
        for x in x_min..=x_max {
            let dx = (i64::from(x) - cx) as f64;
            let count = subsample_count(dx, dy, |px, py| {
                let value = px * px / rx2 + py * py / ry2;
                if filled {
                    value <= 1.0
                } else {
                    (value - 1.0).abs() <= tolerance
                }
            });
            if count > 0 {
                let coverage = count as f32 / (SAMPLES * SAMPLES) as f32;
                surface.blend_pixel(x, y, color, coverage);
            }
        }
    }
}
