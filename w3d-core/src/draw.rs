/// Software rasterizer for edge and polygon buffers
use nalgebra::{Vector3, Vector4};

use crate::buffer::EdgeBuffer;
use crate::screen::{Color, Screen};

/// Share of the color every front face keeps regardless of its angle
const AMBIENT: f64 = 0.35;

/// Draw every consecutive point pair of `edges` as a line.
///
/// Segments are clipped to the screen before they reach integer space, so
/// off-screen and non-finite geometry costs nothing.
pub fn draw_lines(edges: &EdgeBuffer, screen: &mut Screen, color: Color) {
    if screen.width() == 0 || screen.height() == 0 {
        return;
    }
    let max = ((screen.width() - 1) as f64, (screen.height() - 1) as f64);

    for (p0, p1) in edges.edges() {
        let Some((from, to)) = clip_segment((p0.x, p0.y), (p1.x, p1.y), max) else {
            continue;
        };
        draw_line(
            screen,
            (from.0.round() as i64, from.1.round() as i64),
            (to.0.round() as i64, to.1.round() as i64),
            color,
        );
    }
}

/// Liang-Barsky clip of a segment against `[0, max.0] x [0, max.1]`.
///
/// Returns `None` when nothing of the segment is inside. Endpoints already
/// inside come back unchanged.
fn clip_segment(
    from: (f64, f64),
    to: (f64, f64),
    max: (f64, f64),
) -> Option<((f64, f64), (f64, f64))> {
    let dx = to.0 - from.0;
    let dy = to.1 - from.1;
    if !(dx.is_finite() && dy.is_finite()) {
        return None;
    }

    let mut t0 = 0.0_f64;
    let mut t1 = 1.0_f64;
    let bounds = [
        (-dx, from.0),
        (dx, max.0 - from.0),
        (-dy, from.1),
        (dy, max.1 - from.1),
    ];
    for (p, q) in bounds {
        if p == 0.0 {
            // Parallel to this edge: entirely outside or irrelevant.
            if q < 0.0 {
                return None;
            }
            continue;
        }
        let r = q / p;
        if p < 0.0 {
            if r > t1 {
                return None;
            }
            t0 = t0.max(r);
        } else {
            if r < t0 {
                return None;
            }
            t1 = t1.min(r);
        }
    }

    let at = |t: f64| (from.0 + t * dx, from.1 + t * dy);
    let start = if t0 > 0.0 { at(t0) } else { from };
    let end = if t1 < 1.0 { at(t1) } else { to };
    Some((start, end))
}

/// Bresenham line over all octants, endpoints inclusive
pub fn draw_line(screen: &mut Screen, from: (i64, i64), to: (i64, i64), color: Color) {
    let (mut x, mut y) = from;
    let (x1, y1) = to;
    let dx = (x1 - x).abs();
    let dy = -(y1 - y).abs();
    let sx = if x < x1 { 1 } else { -1 };
    let sy = if y < y1 { 1 } else { -1 };
    let mut err = dx + dy;

    loop {
        screen.plot(x, y, color);
        if x == x1 && y == y1 {
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

/// Fill every front-facing triangle of `polygons`, flat shaded by its normal
pub fn draw_polygons(polygons: &EdgeBuffer, screen: &mut Screen, color: Color) {
    for triangle in polygons.polygons() {
        let normal = surface_normal(triangle);
        // Faces pointing away from the viewer (looking down -z) are culled.
        if normal.z <= 0.0 {
            continue;
        }

        let light_dir = Vector3::new(0.0, 0.0, 1.0);
        let brightness = normal.normalize().dot(&light_dir).max(0.0);
        let shade = color.shade(AMBIENT + (1.0 - AMBIENT) * brightness);

        let coords = triangle.map(|p| (p.x, p.y, p.z));
        rasterize_triangle(screen, &coords, shade);
    }
}

fn surface_normal(triangle: [&Vector4<f64>; 3]) -> Vector3<f64> {
    let [a, b, c] = triangle.map(|p| Vector3::new(p.x, p.y, p.z));
    (b - a).cross(&(c - a))
}

fn rasterize_triangle(screen: &mut Screen, coords: &[(f64, f64, f64); 3], color: Color) {
    let [v0, v1, v2] = *coords;

    // Bounding box
    let min_x = v0.0.min(v1.0).min(v2.0).floor() as i64;
    let max_x = v0.0.max(v1.0).max(v2.0).ceil() as i64;
    let min_y = v0.1.min(v1.1).min(v2.1).floor() as i64;
    let max_y = v0.1.max(v1.1).max(v2.1).ceil() as i64;

    // Clip to screen bounds
    let min_x = min_x.max(0);
    let max_x = max_x.min(screen.width() as i64 - 1);
    let min_y = min_y.max(0);
    let max_y = max_y.min(screen.height() as i64 - 1);

    for y in min_y..=max_y {
        for x in min_x..=max_x {
            let px = x as f64 + 0.5;
            let py = y as f64 + 0.5;

            if let Some((w0, w1, w2)) =
                barycentric((v0.0, v0.1), (v1.0, v1.1), (v2.0, v2.1), (px, py))
            {
                if w0 >= 0.0 && w1 >= 0.0 && w2 >= 0.0 {
                    let depth = w0 * v0.2 + w1 * v1.2 + w2 * v2.2;
                    screen.plot_depth(x, y, depth, color);
                }
            }
        }
    }
}

/// Barycentric coordinates of `p` in the triangle; `None` when degenerate
fn barycentric(
    v0: (f64, f64),
    v1: (f64, f64),
    v2: (f64, f64),
    p: (f64, f64),
) -> Option<(f64, f64, f64)> {
    let denom = (v1.1 - v2.1) * (v0.0 - v2.0) + (v2.0 - v1.0) * (v0.1 - v2.1);

    if denom.abs() < 1e-12 {
        return None;
    }

    let w0 = ((v1.1 - v2.1) * (p.0 - v2.0) + (v2.0 - v1.0) * (p.1 - v2.1)) / denom;
    let w1 = ((v2.1 - v0.1) * (p.0 - v2.0) + (v0.0 - v2.0) * (p.1 - v2.1)) / denom;
    let w2 = 1.0 - w0 - w1;

    Some((w0, w1, w2))
}
