//! Planar primitives shared by the quadrilateral builder and the scorer.

use crate::types::{Ring, Vertex};
use nalgebra::{Matrix2, Vector2};
use serde::Serialize;

/// Relative determinant below which two lines are treated as parallel.
const PARALLEL_EPS: f64 = 1e-9;

/// Axis-aligned bounding box in pixel coordinates.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct Bbox {
    pub min_x: f64,
    pub min_y: f64,
    pub max_x: f64,
    pub max_y: f64,
}

impl Bbox {
    pub fn union(&self, other: &Bbox) -> Bbox {
        Bbox {
            min_x: self.min_x.min(other.min_x),
            min_y: self.min_y.min(other.min_y),
            max_x: self.max_x.max(other.max_x),
            max_y: self.max_y.max(other.max_y),
        }
    }
}

/// Intersection of the infinite lines through `a0-a1` and `b0-b1`.
///
/// Returns `None` when the lines are parallel, nearly parallel (the
/// determinant is tiny relative to the direction lengths), or either input
/// segment is degenerate.
pub fn line_line_intersection(a0: Vertex, a1: Vertex, b0: Vertex, b1: Vertex) -> Option<Vertex> {
    let da = Vector2::new(a1.x - a0.x, a1.y - a0.y);
    let db = Vector2::new(b1.x - b0.x, b1.y - b0.y);
    let scale = da.norm() * db.norm();
    if scale <= 0.0 || !scale.is_finite() {
        return None;
    }
    // a0 + t*da = b0 + s*db
    let m = Matrix2::new(da.x, -db.x, da.y, -db.y);
    if m.determinant().abs() <= PARALLEL_EPS * scale {
        return None;
    }
    let rhs = Vector2::new(b0.x - a0.x, b0.y - a0.y);
    let ts = m.try_inverse()? * rhs;
    let p = Vector2::new(a0.x, a0.y) + da * ts.x;
    (p.x.is_finite() && p.y.is_finite()).then(|| Vertex::new(p.x, p.y))
}

/// Unsigned shoelace area.
pub fn polygon_area(ring: &Ring) -> f64 {
    let twice: f64 = ring
        .segments()
        .map(|(p, q)| p.x * q.y - q.x * p.y)
        .sum();
    0.5 * twice.abs()
}
