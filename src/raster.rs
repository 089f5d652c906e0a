//! Scanline polygon rasterizer.
//!
//! Polygons are sampled at pixel centres: row `y` is probed at `y + 0.5` and
//! a boundary crossing at real abscissa `x` becomes the integer column
//! `ceil(x - 0.5)`, the first pixel whose centre lies right of the boundary.
//! A pixel `x` is inside when the number of crossings `<= x` is odd
//! (even-odd rule), so each consecutive pair `[c0, c1)` of a row is one
//! filled span.
//!
//! Edges use a half-open vertical extent `[y_top, y_bottom)`, which makes
//! every row of a closed ring produce an even number of crossings.

use crate::image::BitGrid;
use crate::types::Mpoly;

/// Sorted integer crossings of one scanline.
pub type RowCrossings = Vec<i32>;

/// Entry of the edge table, oriented top to bottom.
#[derive(Clone, Copy, Debug)]
struct TableEdge {
    first_row: i64,
    end_row: i64, // exclusive
    y_top: f64,
    x_top: f64,
    dxdy: f64,
}

impl TableEdge {
    #[inline]
    fn crossing_at(&self, row: i64) -> i32 {
        let yc = row as f64 + 0.5;
        let x = self.x_top + (yc - self.y_top) * self.dxdy;
        (x - 0.5).ceil() as i32
    }
}

fn build_edge_table(mpoly: &Mpoly) -> Vec<TableEdge> {
    let mut table = Vec::new();
    for ring in &mpoly.rings {
        for (p, q) in ring.segments() {
            if p.y == q.y || !(p.x.is_finite() && p.y.is_finite() && q.x.is_finite() && q.y.is_finite()) {
                continue;
            }
            let (top, bottom) = if p.y < q.y { (p, q) } else { (q, p) };
            let first_row = (top.y - 0.5).ceil() as i64;
            let end_row = (bottom.y - 0.5).ceil() as i64;
            if first_row >= end_row {
                continue;
            }
            table.push(TableEdge {
                first_row,
                end_row,
                y_top: top.y,
                x_top: top.x,
                dxdy: (bottom.x - top.x) / (bottom.y - top.y),
            });
        }
    }
    table.sort_by_key(|e| e.first_row);
    table
}

/// Crossings for rows `min_y .. min_y + num_rows` of a (multi-)polygon.
///
/// Rows the polygon does not reach yield empty lists.
pub fn get_row_crossings(mpoly: &Mpoly, min_y: i32, num_rows: usize) -> Vec<RowCrossings> {
    let table = build_edge_table(mpoly);
    let mut rows: Vec<RowCrossings> = vec![Vec::new(); num_rows];

    let mut next = 0usize;
    let mut active: Vec<TableEdge> = Vec::new();
    for (offset, out) in rows.iter_mut().enumerate() {
        let row = min_y as i64 + offset as i64;
        while next < table.len() && table[next].first_row <= row {
            active.push(table[next]);
            next += 1;
        }
        active.retain(|e| e.end_row > row);
        if active.is_empty() {
            if next >= table.len() {
                break;
            }
            continue;
        }
        out.extend(active.iter().map(|e| e.crossing_at(row)));
        out.sort_unstable();
    }
    rows
}

/// Crossings of the intersection of two filled regions on one row.
pub fn crossings_intersection(in1: &[i32], in2: &[i32]) -> RowCrossings {
    let mut out = Vec::new();
    let (mut i, mut j) = (0usize, 0usize);
    let (mut a, mut b) = (false, false);
    loop {
        let x = match (in1.get(i), in2.get(j)) {
            (None, None) => break,
            (Some(&p), None) => p,
            (None, Some(&q)) => q,
            (Some(&p), Some(&q)) => p.min(q),
        };
        let was_inside = a && b;
        while in1.get(i) == Some(&x) {
            a = !a;
            i += 1;
        }
        while in2.get(j) == Some(&x) {
            b = !b;
            j += 1;
        }
        if (a && b) != was_inside {
            out.push(x);
        }
    }
    out
}

/// Filled `[start, end)` spans of a crossing list.
pub fn spans(row: &[i32]) -> impl Iterator<Item = (i32, i32)> + '_ {
    row.chunks_exact(2).map(|c| (c[0], c[1]))
}

/// Rasterize a polygon into a `w × h` mask.
pub fn mask_from_mpoly(mpoly: &Mpoly, w: usize, h: usize) -> BitGrid {
    let mut mask = BitGrid::new(w, h);
    let rows = get_row_crossings(mpoly, 0, h);
    for (y, row) in rows.iter().enumerate() {
        for (start, end) in spans(row) {
            let lo = start.max(0) as usize;
            let hi = (end.max(0) as usize).min(w);
            for x in lo..hi {
                mask.set(x, y, true);
            }
        }
    }
    mask
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Ring, Vertex};
    use proptest::prelude::*;

    fn square(x0: f64, y0: f64, x1: f64, y1: f64) -> Mpoly {
        Mpoly::from_ring(Ring::new(vec![
            Vertex::new(x0, y0),
            Vertex::new(x1, y0),
            Vertex::new(x1, y1),
            Vertex::new(x0, y1),
        ]))
    }

    #[test]
    fn axis_aligned_square_rows() {
        let rows = get_row_crossings(&square(2.0, 1.0, 6.0, 4.0), 0, 6);
        assert!(rows[0].is_empty());
        for row in &rows[1..4] {
            assert_eq!(row, &vec![2, 6]);
        }
        assert!(rows[4].is_empty());
        assert!(rows[5].is_empty());
    }

    #[test]
    fn rows_above_polygon_are_empty() {
        let rows = get_row_crossings(&square(0.0, 10.0, 5.0, 12.0), -3, 5);
        assert_eq!(rows.len(), 5);
        assert!(rows.iter().all(|r| r.is_empty()));
    }

    #[test]
    fn nested_ring_makes_hole() {
        let mut mp = square(0.0, 0.0, 10.0, 10.0);
        mp.rings.extend(square(3.0, 3.0, 7.0, 7.0).rings);
        let rows = get_row_crossings(&mp, 0, 10);
        assert_eq!(rows[5], vec![0, 3, 7, 10]);
        assert_eq!(rows[1], vec![0, 10]);
    }

    #[test]
    fn triangle_spans_narrow() {
        let tri = Mpoly::from_ring(Ring::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(8.0, 8.0),
            Vertex::new(0.0, 8.0),
        ]));
        let rows = get_row_crossings(&tri, 0, 8);
        for (y, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), 2, "row {y}: {row:?}");
            assert_eq!(row[0], 0);
            // hypotenuse passes through the centre of pixel y, which stays outside
            assert_eq!(row[1], y as i32);
        }
    }

    #[test]
    fn intersection_of_overlapping_spans() {
        assert_eq!(crossings_intersection(&[0, 10], &[5, 15]), vec![5, 10]);
        assert_eq!(crossings_intersection(&[0, 4], &[6, 9]), Vec::<i32>::new());
        assert_eq!(crossings_intersection(&[0, 10], &[2, 4, 6, 8]), vec![2, 4, 6, 8]);
        assert_eq!(crossings_intersection(&[0, 5], &[5, 9]), Vec::<i32>::new());
        assert_eq!(crossings_intersection(&[0, 5], &[0, 5]), vec![0, 5]);
        assert_eq!(crossings_intersection(&[], &[1, 2]), Vec::<i32>::new());
    }

    #[test]
    fn mask_from_square_matches_area() {
        let mask = mask_from_mpoly(&square(-2.0, 1.0, 4.0, 3.0), 8, 8);
        assert_eq!(mask.count_valid(), 4 * 2);
        assert!(mask.get(0, 1) && mask.get(3, 2));
        assert!(!mask.get(4, 1) && !mask.get(0, 3));
    }

    proptest! {
        #[test]
        fn convex_quad_rows_are_even_and_sorted(
            cx in 20.0..80.0f64,
            cy in 20.0..80.0f64,
            hw in 2.0..15.0f64,
            hh in 2.0..15.0f64,
            theta in 0.0..std::f64::consts::PI,
        ) {
            let (s, c) = theta.sin_cos();
            let corners = [(-hw, -hh), (hw, -hh), (hw, hh), (-hw, hh)]
                .iter()
                .map(|&(u, v)| Vertex::new(cx + u * c - v * s, cy + u * s + v * c))
                .collect();
            let mp = Mpoly::from_ring(Ring::new(corners));
            let rows = get_row_crossings(&mp, 0, 100);
            for row in &rows {
                prop_assert!(row.len() % 2 == 0);
                prop_assert!(row.windows(2).all(|w| w[0] <= w[1]));
                prop_assert!(row.len() <= 2);
            }
        }
    }
}
