/// Geometry generators that append edges and triangles to an [`EdgeBuffer`]
use std::f64::consts::{PI, TAU};

use nalgebra::{Matrix4, Vector4};

use crate::buffer::EdgeBuffer;

/// Parametric cubic basis
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CurveKind {
    /// Endpoints `p0`, `p1` and tangents `r0`, `r1`
    Hermite,
    /// Endpoints `p0`, `p3` and control points `p1`, `p2`
    Bezier,
}

impl CurveKind {
    fn basis(self) -> Matrix4<f64> {
        match self {
            CurveKind::Hermite => Matrix4::new(
                2.0, -2.0, 1.0, 1.0, //
                -3.0, 3.0, -2.0, -1.0, //
                0.0, 0.0, 1.0, 0.0, //
                1.0, 0.0, 0.0, 0.0,
            ),
            CurveKind::Bezier => Matrix4::new(
                -1.0, 3.0, -3.0, 1.0, //
                3.0, -6.0, 3.0, 0.0, //
                -3.0, 3.0, 0.0, 0.0, //
                1.0, 0.0, 0.0, 0.0,
            ),
        }
    }

    /// Cubic coefficients `(a, b, c, d)` of `a t^3 + b t^2 + c t + d` for one axis
    pub fn coefficients(self, p0: f64, p1: f64, p2: f64, p3: f64) -> Vector4<f64> {
        self.basis() * Vector4::new(p0, p1, p2, p3)
    }
}

/// Append a circle in the `z = cz` plane as `segments` edges
pub fn add_circle(buffer: &mut EdgeBuffer, cx: f64, cy: f64, cz: f64, r: f64, segments: usize) {
    let segments = segments.max(3);
    let at = |i: usize| {
        let t = TAU * i as f64 / segments as f64;
        (cx + r * t.cos(), cy + r * t.sin())
    };

    let (mut x0, mut y0) = at(0);
    for i in 1..=segments {
        let (x1, y1) = at(i);
        buffer.add_edge(x0, y0, cz, x1, y1, cz);
        (x0, y0) = (x1, y1);
    }
}

/// Append a planar cubic curve as `segments` edges.
///
/// The four points are interpreted according to `kind`; see [`CurveKind`].
pub fn add_curve(
    buffer: &mut EdgeBuffer,
    points: [(f64, f64); 4],
    segments: usize,
    kind: CurveKind,
) {
    let segments = segments.max(1);
    let [(x0, y0), (x1, y1), (x2, y2), (x3, y3)] = points;
    let xc = kind.coefficients(x0, x1, x2, x3);
    let yc = kind.coefficients(y0, y1, y2, y3);
    let eval = |c: &Vector4<f64>, t: f64| ((c[0] * t + c[1]) * t + c[2]) * t + c[3];

    let (mut px, mut py) = (eval(&xc, 0.0), eval(&yc, 0.0));
    for i in 1..=segments {
        let t = i as f64 / segments as f64;
        let (nx, ny) = (eval(&xc, t), eval(&yc, t));
        buffer.add_edge(px, py, 0.0, nx, ny, 0.0);
        (px, py) = (nx, ny);
    }
}

/// Append a quad as two triangles; corners counter-clockwise from outside
fn add_quad(buffer: &mut EdgeBuffer, a: [f64; 3], b: [f64; 3], c: [f64; 3], d: [f64; 3]) {
    buffer.add_polygon(a, b, c);
    buffer.add_polygon(a, c, d);
}

/// Append a rectangular prism whose front top-left corner is `(x, y, z)`.
///
/// The box extends `width` along +x, `height` along -y and `depth` along -z.
pub fn add_box(
    buffer: &mut EdgeBuffer,
    x: f64,
    y: f64,
    z: f64,
    width: f64,
    height: f64,
    depth: f64,
) {
    let (xl, xh) = (x, x + width);
    let (yl, yh) = (y - height, y);
    let (zl, zh) = (z - depth, z);

    // Front (+z) and back (-z)
    add_quad(buffer, [xl, yl, zh], [xh, yl, zh], [xh, yh, zh], [xl, yh, zh]);
    add_quad(buffer, [xh, yl, zl], [xl, yl, zl], [xl, yh, zl], [xh, yh, zl]);

    // Right (+x) and left (-x)
    add_quad(buffer, [xh, yl, zh], [xh, yl, zl], [xh, yh, zl], [xh, yh, zh]);
    add_quad(buffer, [xl, yl, zl], [xl, yl, zh], [xl, yh, zh], [xl, yh, zl]);

    // Top (+y) and bottom (-y)
    add_quad(buffer, [xl, yh, zh], [xh, yh, zh], [xh, yh, zl], [xl, yh, zl]);
    add_quad(buffer, [xl, yl, zl], [xh, yl, zl], [xh, yl, zh], [xl, yl, zh]);
}

/// Surface points of a sphere centred at `(cx, cy, 0)`.
///
/// A semicircle in the xy plane is swept once around the x axis. Returns
/// `resolution` meridians of `resolution + 1` points each, pole to pole.
fn sphere_points(cx: f64, cy: f64, r: f64, resolution: usize) -> Vec<[f64; 3]> {
    let mut points = Vec::with_capacity(resolution * (resolution + 1));
    for rot in 0..resolution {
        let theta = TAU * rot as f64 / resolution as f64;
        for circ in 0..=resolution {
            let phi = PI * circ as f64 / resolution as f64;
            points.push([
                cx + r * phi.cos(),
                cy + r * phi.sin() * theta.cos(),
                r * phi.sin() * theta.sin(),
            ]);
        }
    }
    points
}

/// Append a tessellated sphere centred at `(cx, cy, 0)`
pub fn add_sphere(buffer: &mut EdgeBuffer, cx: f64, cy: f64, r: f64, resolution: usize) {
    let n = resolution.max(3);
    let points = sphere_points(cx, cy, r, n);
    let at = |rot: usize, circ: usize| points[(rot % n) * (n + 1) + circ];

    for rot in 0..n {
        for circ in 0..n {
            let a = at(rot, circ);
            let b = at(rot, circ + 1);
            let c = at(rot + 1, circ + 1);
            let d = at(rot + 1, circ);

            // `a`/`d` coincide at the first pole and `b`/`c` at the last.
            if circ != n - 1 {
                buffer.add_polygon(a, b, c);
            }
            if circ != 0 {
                buffer.add_polygon(a, c, d);
            }
        }
    }
}

/// Surface points of a torus centred at `(cx, cy, 0)`.
///
/// A circle of radius `r1` centred `r2` from the origin is swept around the
/// y axis. Returns `resolution` rings of `resolution` points each.
fn torus_points(cx: f64, cy: f64, r1: f64, r2: f64, resolution: usize) -> Vec<[f64; 3]> {
    let mut points = Vec::with_capacity(resolution * resolution);
    for rot in 0..resolution {
        let theta = TAU * rot as f64 / resolution as f64;
        for circ in 0..resolution {
            let phi = TAU * circ as f64 / resolution as f64;
            let ring = r2 + r1 * phi.cos();
            points.push([
                cx + theta.cos() * ring,
                cy + r1 * phi.sin(),
                -theta.sin() * ring,
            ]);
        }
    }
    points
}

/// Append a tessellated torus centred at `(cx, cy, 0)` with tube radius `r1`
/// and ring radius `r2`
pub fn add_torus(buffer: &mut EdgeBuffer, cx: f64, cy: f64, r1: f64, r2: f64, resolution: usize) {
    let n = resolution.max(3);
    let points = torus_points(cx, cy, r1, r2, n);
    let at = |rot: usize, circ: usize| points[(rot % n) * n + circ % n];

    for rot in 0..n {
        for circ in 0..n {
            let a = at(rot, circ);
            let b = at(rot, circ + 1);
            let c = at(rot + 1, circ + 1);
            let d = at(rot + 1, circ);
            buffer.add_polygon(a, d, c);
            buffer.add_polygon(a, c, b);
        }
    }
}
