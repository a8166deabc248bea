use crate::color::Rgba;
use crate::surface::PixelBuffer;

/// Draw a line between two pixel positions, both endpoints included.
///
/// Degenerate lines plot one pixel. Axis-aligned lines take the span fast
/// path; everything else goes through Bresenham or, when `anti_aliased`,
/// Xiaolin Wu.
pub fn draw_line(
    surface: &mut PixelBuffer,
    x1: i32,
    y1: i32,
    x2: i32,
    y2: i32,
    color: Rgba,
    anti_aliased: bool,
) {
    if x1 == x2 && y1 == y2 {
        surface.set_pixel(x1, y1, color);
    } else if x1 == x2 {
        surface.vline(x1, y1, y2, color);
    } else if y1 == y2 {
        surface.hline(x1, x2, y1, color);
    } else if anti_aliased {
        wu_line(surface, x1, y1, x2, y2, color);
    } else {
        bresenham_line(surface, x1, y1, x2, y2, color);
    }
}

/// Connect consecutive points with lines
pub fn draw_polyline(surface: &mut PixelBuffer, points: &[(i32, i32)], color: Rgba, anti_aliased: bool) {
    if let [(x, y)] = points {
        surface.set_pixel(*x, *y, color);
        return;
    }
    for pair in points.windows(2) {
        let ((x1, y1), (x2, y2)) = (pair[0], pair[1]);
        draw_line(surface, x1, y1, x2, y2, color, anti_aliased);
    }
}

/// Closed outline: polyline plus the edge from the last point back to the first
pub fn draw_polygon_outline(
    surface: &mut PixelBuffer,
    points: &[(i32, i32)],
    color: Rgba,
    anti_aliased: bool,
) {
    draw_polyline(surface, points, color, anti_aliased);
    if let (Some(&(fx, fy)), Some(&(lx, ly))) = (points.first(), points.last()) {
        if points.len() > 2 {
            draw_line(surface, lx, ly, fx, fy, color, anti_aliased);
        }
    }
}

/// Clip the segment to the surface grown by one pixel on every side
/// (Liang-Barsky in f64). Segments already inside come back untouched so
/// their traced path does not change; `None` when nothing is visible.
fn clip_to_surface(surface: &PixelBuffer, x1: i32, y1: i32, x2: i32, y2: i32) -> Option<(i32, i32, i32, i32)> {
    let (min_x, min_y) = (-1.0, -1.0);
    let max_x = f64::from(surface.width());
    let max_y = f64::from(surface.height());
    let inside = |x: i32, y: i32| {
        let (x, y) = (f64::from(x), f64::from(y));
        x >= min_x && x <= max_x && y >= min_y && y <= max_y
    };
    if inside(x1, y1) && inside(x2, y2) {
        return Some((x1, y1, x2, y2));
    }

    let (fx1, fy1) = (f64::from(x1), f64::from(y1));
    let dx = f64::from(x2) - fx1;
    let dy = f64::from(y2) - fy1;
    let (mut t0, mut t1) = (0.0_f64, 1.0_f64);
    for (p, q) in [
        (-dx, fx1 - min_x),
        (dx, max_x - fx1),
        (-dy, fy1 - min_y),
        (dy, max_y - fy1),
    ] {
        if p == 0.0 {
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let t = q / p;
        if p < 0.0 {
            t0 = t0.max(t);
        } else {
            t1 = t1.min(t);
        }
        if t0 > t1 {
            return None;
        }
    }

    let at = |t: f64| ((fx1 + t * dx).round() as i32, (fy1 + t * dy).round() as i32);
    let (a, b) = (at(t0), at(t1));
    Some((a.0, a.1, b.0, b.1))
}

/// Integer Bresenham on the clipped segment, error terms in i64
fn bresenham_line(surface: &mut PixelBuffer, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
    let Some((x1, y1, x2, y2)) = clip_to_surface(surface, x1, y1, x2, y2) else {
        return;
    };
    let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));

    let dx = (x2 - x1).abs();
    let dy = -(y2 - y1).abs();
    let sx = if x1 < x2 { 1 } else { -1 };
    let sy = if y1 < y2 { 1 } else { -1 };
    let mut err = dx + dy;
    let (mut x, mut y) = (x1, y1);

    loop {
        surface.set_pixel(x as i32, y as i32, color);
        if x == x2 && y == y2 {
            break;
        }
        let e2 = 2 * err;
        if e2 >= dy {
            err += dy;
            x += sx;
        }
        if e2 <= dx {
            err += dx;
            y += sy;
        }
    }
}

/// Xiaolin Wu anti-aliased line.
/// Walks the major axis one pixel at a time and splits coverage between the
/// two pixels straddling the exact minor-axis position.
fn wu_line(surface: &mut PixelBuffer, x1: i32, y1: i32, x2: i32, y2: i32, color: Rgba) {
    let Some((x1, y1, x2, y2)) = clip_to_surface(surface, x1, y1, x2, y2) else {
        return;
    };
    let (x1, y1, x2, y2) = (i64::from(x1), i64::from(y1), i64::from(x2), i64::from(y2));

    let steep = (y2 - y1).abs() > (x2 - x1).abs();
    let (mut x1, mut y1, mut x2, mut y2) = if steep {
        (y1, x1, y2, x2)
    } else {
        (x1, y1, x2, y2)
    };
    if x1 > x2 {
        std::mem::swap(&mut x1, &mut x2);
        std::mem::swap(&mut y1, &mut y2);
    }

    let dx = (x2 - x1) as f32;
    let dy = (y2 - y1) as f32;
    let gradient = if dx == 0.0 { 1.0 } else { dy / dx };

    let mut intersect_y = y1 as f32;
    for x in x1..=x2 {
        let y = intersect_y.floor();
        let f = intersect_y - y;
        let (x, y) = (x as i32, y as i32);
        if steep {
            surface.blend_pixel(y, x, color, 1.0 - f);
            surface.blend_pixel(y + 1, x, color, f);
        } else {
            surface.blend_pixel(x, y, color, 1.0 - f);
            surface.blend_pixel(x, y + 1, color, f);
        }
        intersect_y += gradient;
    }
}
