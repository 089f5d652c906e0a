use crate::geometry::Bbox;
use serde::{Deserialize, Serialize};

/// 2D point with real-valued pixel coordinates.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Vertex {
    pub x: f64,
    pub y: f64,
}

impl Vertex {
    #[inline]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Ordered, implicitly closed polygon boundary.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Ring {
    pub pts: Vec<Vertex>,
}

impl Ring {
    pub fn new(pts: Vec<Vertex>) -> Self {
        Self { pts }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.pts.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.pts.is_empty()
    }

    /// Axis-aligned extent, `None` for an empty ring.
    pub fn bbox(&self) -> Option<Bbox> {
        let first = self.pts.first()?;
        let init = Bbox {
            min_x: first.x,
            min_y: first.y,
            max_x: first.x,
            max_y: first.y,
        };
        Some(self.pts.iter().fold(init, |bb, p| Bbox {
            min_x: bb.min_x.min(p.x),
            min_y: bb.min_y.min(p.y),
            max_x: bb.max_x.max(p.x),
            max_y: bb.max_y.max(p.y),
        }))
    }

    /// Iterate the closed boundary as `(start, end)` vertex pairs.
    pub fn segments(&self) -> impl Iterator<Item = (Vertex, Vertex)> + '_ {
        let n = self.pts.len();
        (0..n).map(move |i| (self.pts[i], self.pts[(i + 1) % n]))
    }
}

/// Collection of rings filled together under the even-odd rule.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Mpoly {
    pub rings: Vec<Ring>,
}

impl Mpoly {
    pub fn from_ring(ring: Ring) -> Self {
        Self { rings: vec![ring] }
    }

    pub fn bbox(&self) -> Option<Bbox> {
        self.rings
            .iter()
            .filter_map(Ring::bbox)
            .reduce(|a, b| a.union(&b))
    }
}
