/// Accumulation buffer of homogeneous points
use nalgebra::{Matrix4, Vector4};

/// Growable table of homogeneous columns `(x, y, z, 1)`.
///
/// Generators append to it; consecutive pairs are edges for line content and
/// consecutive triples are triangles for polygon content. `clear` drops the
/// logical contents but keeps the allocation, so one buffer is reused by
/// every command of a script.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct EdgeBuffer {
    points: Vec<Vector4<f64>>,
}

impl EdgeBuffer {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    /// Number of columns holding valid data
    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Number of columns the buffer can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.points.capacity()
    }

    /// Reset the logical length to zero, keeping storage
    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn add_point(&mut self, x: f64, y: f64, z: f64) {
        self.points.push(Vector4::new(x, y, z, 1.0));
    }

    pub fn add_edge(&mut self, x0: f64, y0: f64, z0: f64, x1: f64, y1: f64, z1: f64) {
        self.add_point(x0, y0, z0);
        self.add_point(x1, y1, z1);
    }

    /// Append a triangle; vertices are expected counter-clockwise when seen
    /// from the outside of the surface.
    pub fn add_polygon(&mut self, a: [f64; 3], b: [f64; 3], c: [f64; 3]) {
        for [x, y, z] in [a, b, c] {
            self.add_point(x, y, z);
        }
    }

    pub fn points(&self) -> &[Vector4<f64>] {
        &self.points
    }

    /// Consecutive point pairs; a trailing unpaired point is ignored
    pub fn edges(&self) -> impl Iterator<Item = (&Vector4<f64>, &Vector4<f64>)> {
        self.points.chunks_exact(2).map(|pair| (&pair[0], &pair[1]))
    }

    /// Consecutive point triples; trailing points are ignored
    pub fn polygons(&self) -> impl Iterator<Item = [&Vector4<f64>; 3]> {
        self.points
            .chunks_exact(3)
            .map(|tri| [&tri[0], &tri[1], &tri[2]])
    }

    /// Replace every column `p` with `matrix * p`
    pub fn transform(&mut self, matrix: &Matrix4<f64>) {
        for point in &mut self.points {
            *point = matrix * *point;
        }
    }
}
