use super::line::draw_line;
use crate::color::Rgba;
use crate::surface::PixelBuffer;

/// Scanline polygon fill with the even-odd rule.
///
/// Edges are intersected at pixel-row centres (`y + 0.5`) and a pixel is
/// filled when its centre lies in `[x_enter, x_exit)`, so polygons sharing
/// an edge never overlap.
pub fn fill_polygon(surface: &mut PixelBuffer, vertices: &[(f64, f64)], color: Rgba) {
    if vertices.len() < 3 {
        return;
    }

    let (min_y, max_y) = vertices
        .iter()
        .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, y)| (lo.min(y), hi.max(y)));
    if !min_y.is_finite() || !max_y.is_finite() {
        return;
    }
    let min_y = (min_y.floor() as i32).max(0);
    let max_y = (max_y.ceil() as i32).min(surface.height() as i32 - 1);

    // Preallocate intersection buffer (reused per scanline)
    let mut intersections: Vec<f64> = Vec::with_capacity(vertices.len());
    let n = vertices.len();

    for y in min_y..=max_y {
        intersections.clear();
        let yf = f64::from(y) + 0.5;

        for i in 0..n {
            let (x1, y1) = vertices[i];
            let (x2, y2) = vertices[(i + 1) % n];

            // Horizontal edges never satisfy this, so no division by zero
            if (y1 <= yf && y2 > yf) || (y2 <= yf && y1 > yf) {
                intersections.push(x1 + (yf - y1) / (y2 - y1) * (x2 - x1));
            }
        }

        intersections.sort_unstable_by(f64::total_cmp);
        for pair in intersections.chunks_exact(2) {
            let start = (pair[0] - 0.5).ceil() as i32;
            let end = (pair[1] - 0.5).ceil() as i32 - 1;
            if start <= end {
                surface.hline(start, end, y, color);
            }
        }
    }
}

/// Edge function: positive when `p` is clockwise (on screen) of `a -> b`
#[inline]
fn edge(a: (f64, f64), b: (f64, f64), p: (f64, f64)) -> f64 {
    (b.0 - a.0) * (p.1 - a.1) - (b.1 - a.1) * (p.0 - a.0)
}

/// Top-left rule for a triangle wound clockwise on screen (y down):
/// a top edge is horizontal running right, a left edge runs up.
#[inline]
fn is_top_left(a: (f64, f64), b: (f64, f64)) -> bool {
    let (dx, dy) = (b.0 - a.0, b.1 - a.1);
    (dy == 0.0 && dx > 0.0) || dy < 0.0
}

/// Filled triangle by half-space tests at pixel centres.
///
/// Pixels exactly on an edge belong to the triangle only when that edge is
/// a top or left edge, so triangles sharing an edge cover it once. A
/// zero-area triangle is drawn as its three edges.
pub fn draw_triangle(surface: &mut PixelBuffer, vertices: [(i32, i32); 3], color: Rgba) {
    let [v0, v1, v2] = vertices.map(|(x, y)| (f64::from(x), f64::from(y)));

    let area = edge(v0, v1, v2);
    if area == 0.0 {
        for (a, b) in [(0, 1), (1, 2), (2, 0)] {
            let ((x1, y1), (x2, y2)) = (vertices[a], vertices[b]);
            draw_line(surface, x1, y1, x2, y2, color, false);
        }
        return;
    }
    let (v1, v2) = if area < 0.0 { (v2, v1) } else { (v1, v2) };

    let min_x = v0.0.min(v1.0).min(v2.0).floor().max(0.0) as i32;
    let max_x = v0.0.max(v1.0).max(v2.0).ceil().min(f64::from(surface.width()) - 1.0) as i32;
    let min_y = v0.1.min(v1.1).min(v2.1).floor().max(0.0) as i32;
    let max_y = v0.1.max(v1.1).max(v2.1).ceil().min(f64::from(surface.height()) - 1.0) as i32;

    let edges = [(v1, v2), (v2, v0), (v0, v1)];
    let top_left = edges.map(|(a, b)| is_top_left(a, b));

    for y in min_y..=max_y {
        let mut span: Option<(i32, i32)> = None;
        for x in min_x..=max_x {
            let p = (f64::from(x) + 0.5, f64::from(y) + 0.5);
            let inside = edges.iter().zip(top_left).all(|(&(a, b), tl)| {
                let w = edge(a, b, p);
                w > 0.0 || (w == 0.0 && tl)
            });
            if inside {
                span = Some(span.map_or((x, x), |(s, _)| (s, x)));
            }
        }
        if let Some((start, end)) = span {
            surface.hline(start, end, y, color);
        }
    }
}

/// Filled quadrilateral from four corners in any order.
///
/// The pair of corners farthest apart is taken as the diagonal and the
/// quad is drawn as the two triangles sharing it.
pub fn draw_rectangle(surface: &mut PixelBuffer, corners: [(i32, i32); 4], color: Rgba) {
    let dist2 = |a: (i32, i32), b: (i32, i32)| {
        let dx = i64::from(b.0) - i64::from(a.0);
        let dy = i64::from(b.1) - i64::from(a.1);
        dx * dx + dy * dy
    };

    let mut diagonal = (0, 1);
    let mut best = -1;
    for i in 0..4 {
        for j in (i + 1)..4 {
            let d = dist2(corners[i], corners[j]);
            if d > best {
                best = d;
                diagonal = (i, j);
            }
        }
    }

    let (i, j) = diagonal;
    let mut others = (0..4).filter(|&k| k != i && k != j);
    let (Some(k), Some(l)) = (others.next(), others.next()) else {
        return;
    };

    draw_triangle(surface, [corners[i], corners[k], corners[j]], color);
    draw_triangle(surface, [corners[i], corners[l], corners[j]], color);
}

/// 4-connected flood fill from a seed pixel.
///
/// The seed's current color is the target; the fill replaces every pixel
/// reachable through target-colored neighbours. Seeds outside the surface
/// or already holding `fill_color` are no-ops. The work stack grows as
/// needed, so large regions are filled completely.
pub fn flood_fill(surface: &mut PixelBuffer, x: i32, y: i32, fill_color: Rgba) {
    let Some(target) = surface.get_pixel(x, y) else {
        return;
    };
    if target == fill_color {
        return;
    }

    let mut stack = vec![(x, y)];
    while let Some((px, py)) = stack.pop() {
        if surface.get_pixel(px, py) != Some(target) {
            continue;
        }
        surface.set_pixel(px, py, fill_color);

        stack.push((px + 1, py));
        stack.push((px - 1, py));
        stack.push((px, py + 1));
        stack.push((px, py - 1));
    }
}
