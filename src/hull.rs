//! Grid-specialised gift wrapping over a validity mask.
//!
//! Only the leftmost and rightmost valid pixel of each row can be a hull
//! vertex, so those two per row are the whole candidate set. The sweep starts
//! at the rightmost pixel of the topmost non-empty row heading right and walks
//! clockwise (in image coordinates, y down) until the direction turns from
//! upward back to non-upward, or the walk returns to the start pixel. All
//! orientation tests are integer cross products on pixel deltas.

use crate::angle::direction_deg;
use crate::diagnostics::plot::{DebugPlot, GREEN};
use crate::error::FinderError;
use crate::image::BitGrid;
use crate::types::Vertex;
use log::debug;
use serde::Serialize;

/// One hull segment.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    pub p0: Vertex,
    pub p1: Vertex,
    /// Direction from `p0` to `p1` in degrees, `atan2` range.
    pub angle: f64,
    pub length: f64,
    /// Cluster id, assigned by [`crate::cluster`].
    pub group: Option<usize>,
}

impl Edge {
    fn between(p0: (i64, i64), p1: (i64, i64)) -> Self {
        let dx = (p1.0 - p0.0) as f64;
        let dy = (p1.1 - p0.1) as f64;
        Self {
            p0: Vertex::new(p0.0 as f64, p0.1 as f64),
            p1: Vertex::new(p1.0 as f64, p1.1 as f64),
            angle: direction_deg(dx, dy),
            length: dx.hypot(dy),
            group: None,
        }
    }
}

/// Per-row `(left, right)` valid column, `None` for empty rows.
pub fn row_extents(mask: &BitGrid) -> Vec<Option<(i64, i64)>> {
    (0..mask.height())
        .map(|y| mask.row_extent(y).map(|(l, r)| (l as i64, r as i64)))
        .collect()
}

/// Trace the convex hull of all valid pixels as a closed, ordered edge loop.
pub fn trace_convex_hull(
    mask: &BitGrid,
    plot: &mut dyn DebugPlot,
) -> Result<Vec<Edge>, FinderError> {
    let extents = row_extents(mask);

    let (mut fx, mut fy) = extents
        .iter()
        .enumerate()
        .find_map(|(y, ext)| ext.map(|(_, r)| (r, y as i64)))
        .ok_or(FinderError::EmptyMask)?;
    let start = (fx, fy);
    debug!("hull: start fulcrum=({},{})", fx, fy);

    let mut edges: Vec<Edge> = Vec::new();
    let (mut chop_dx, mut chop_dy) = (1i64, 0i64);
    loop {
        plot.plot_point(Vertex::new(fx as f64, fy as f64), GREEN);

        let mut best: Option<(i64, i64)> = None;
        let (mut best_dx, mut best_dy) = (-chop_dx, -chop_dy);
        for (y, ext) in extents.iter().enumerate() {
            let Some((l, r)) = *ext else { continue };
            let pix_dy = y as i64 - fy;
            for x in [l, r] {
                let pix_dx = x - fx;
                // behind or along the current sweep direction
                if pix_dx * chop_dy >= pix_dy * chop_dx {
                    continue;
                }
                let cross = pix_dx * best_dy - pix_dy * best_dx;
                if cross < 0 {
                    continue;
                }
                if cross == 0 {
                    let pdist = pix_dx * pix_dx + pix_dy * pix_dy;
                    let bdist = best_dx * best_dx + best_dy * best_dy;
                    if pdist < bdist {
                        continue;
                    }
                }
                best_dx = pix_dx;
                best_dy = pix_dy;
                best = Some((x, y as i64));
            }
        }

        let Some((bx, by)) = best else {
            debug!("hull: no next fulcrum after {} edges", edges.len());
            return Err(FinderError::DegenerateHull { edges: edges.len() });
        };
        edges.push(Edge::between((fx, fy), (bx, by)));
        fx = bx;
        fy = by;
        // a full turn: the sweep stopped pointing up, or the loop closed on
        // a single-pixel top row
        if (chop_dy < 0 && best_dy >= 0) || (fx, fy) == start {
            break;
        }
        chop_dx = best_dx;
        chop_dy = best_dy;
    }

    if edges.len() < 3 {
        return Err(FinderError::DegenerateHull { edges: edges.len() });
    }
    debug!("hull: {} edges", edges.len());
    Ok(edges)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::plot::NoopPlot;

    fn rect_mask(w: usize, h: usize, x0: usize, y0: usize, x1: usize, y1: usize) -> BitGrid {
        BitGrid::from_fn(w, h, |x, y| (x0..=x1).contains(&x) && (y0..=y1).contains(&y))
    }

    #[test]
    fn axis_aligned_rectangle_has_four_edges() {
        let mask = rect_mask(40, 30, 5, 4, 30, 20);
        let edges = trace_convex_hull(&mask, &mut NoopPlot).expect("hull");
        assert_eq!(edges.len(), 4, "edges: {edges:?}");
        for (edge, expected) in edges.iter().zip([90.0, 180.0, -90.0, 0.0]) {
            assert!((edge.angle - expected).abs() < 1e-9, "edges: {edges:?}");
        }
        assert_eq!(edges[0].p0, Vertex::new(30.0, 4.0));
        assert_eq!(edges[0].p1, Vertex::new(30.0, 20.0));
        assert_eq!(edges[1].p1, Vertex::new(5.0, 20.0));
        assert_eq!(edges[2].p1, Vertex::new(5.0, 4.0));
        assert_eq!(edges[3].p1, Vertex::new(30.0, 4.0));
        assert!((edges[1].length - 25.0).abs() < 1e-12);
    }

    #[test]
    fn hull_is_closed_loop() {
        let mask = BitGrid::from_fn(50, 50, |x, y| {
            let (dx, dy) = (x as f64 - 25.0, y as f64 - 25.0);
            dx * dx + dy * dy <= 400.0
        });
        let edges = trace_convex_hull(&mask, &mut NoopPlot).expect("hull");
        assert!(edges.len() > 8);
        for pair in edges.windows(2) {
            assert_eq!(pair[0].p1, pair[1].p0);
        }
        assert_eq!(edges.last().map(|e| e.p1), edges.first().map(|e| e.p0));
    }

    #[test]
    fn empty_mask_is_rejected() {
        let mask = BitGrid::new(10, 10);
        assert_eq!(
            trace_convex_hull(&mask, &mut NoopPlot),
            Err(FinderError::EmptyMask)
        );
    }

    #[test]
    fn point_and_lines_are_degenerate() {
        let single = rect_mask(10, 10, 4, 4, 4, 4);
        let horizontal = rect_mask(10, 10, 1, 5, 8, 5);
        let vertical = rect_mask(10, 10, 3, 1, 3, 8);
        for mask in [single, horizontal, vertical] {
            assert!(matches!(
                trace_convex_hull(&mask, &mut NoopPlot),
                Err(FinderError::DegenerateHull { .. })
            ));
        }
    }

    #[test]
    fn single_pixel_top_row_closes_without_repeating() {
        let mask = BitGrid::from_fn(21, 21, |x, y| {
            (x as i64 - 10).abs() + (y as i64 - 10).abs() <= 5
        });
        let edges = trace_convex_hull(&mask, &mut NoopPlot).expect("hull");
        assert_eq!(edges.len(), 4, "edges: {edges:?}");
        for (edge, expected) in edges.iter().zip([45.0, 135.0, -135.0, -45.0]) {
            assert!((edge.angle - expected).abs() < 1e-9, "edges: {edges:?}");
        }
        assert_eq!(edges[0].p0, Vertex::new(10.0, 5.0));
        assert_eq!(edges[3].p1, Vertex::new(10.0, 5.0));
    }

    #[test]
    fn collinear_boundary_prefers_farthest_pixel() {
        // right side runs straight down through many collinear extreme pixels
        let mask = rect_mask(20, 20, 2, 2, 12, 17);
        let edges = trace_convex_hull(&mask, &mut NoopPlot).expect("hull");
        assert_eq!(edges[0].p1, Vertex::new(12.0, 17.0));
    }
}
