//! Signed comparison of two candidate quadrilaterals against the mask.
//!
//! Both rings are rasterised over the rows of their joint bounding box and
//! the two crossing streams are merged left to right. Only columns covered
//! by exactly one ring contribute: where `trial` alone covers a pixel, a
//! valid pixel earns `gain` and an invalid one costs `penalty`; where `best`
//! alone covers a pixel the signs are reversed. Pixels outside the raster
//! count as invalid, up to a margin around it beyond which nothing is scored.

use crate::image::BitGrid;
use crate::raster::get_row_crossings;
use crate::types::{Mpoly, Ring};
use serde::{Deserialize, Serialize};

/// Per-pixel weights of the overlap score.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct ScoreWeights {
    pub gain: i64,
    pub penalty: i64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self {
            gain: 1,
            penalty: 2,
        }
    }
}

/// How much better `trial` fits `mask` than `best`. Positive favours `trial`.
///
/// Antisymmetric: `ring_diff(a, b) == -ring_diff(b, a)`.
///
/// Only pixels inside the scoring window, the raster grown by
/// `max(width, height)` on every side, are counted. Geometry beyond the
/// window is clipped to it, so far-off vertices cost bounded work; a ring
/// with a non-finite coordinate scores 0 against anything.
pub fn ring_diff(best: &Ring, trial: &Ring, mask: &BitGrid, weights: ScoreWeights) -> i64 {
    let bb = match (best.bbox(), trial.bbox()) {
        (Some(a), Some(b)) => a.union(&b),
        (Some(a), None) | (None, Some(a)) => a,
        (None, None) => return 0,
    };
    if ![bb.min_x, bb.min_y, bb.max_x, bb.max_y].iter().all(|v| v.is_finite()) {
        return 0;
    }
    let margin = mask.width().max(mask.height()).max(1) as i64;
    let (win_x0, win_x1) = (-margin, mask.width() as i64 + margin);
    let (win_y0, win_y1) = (-margin, mask.height() as i64 + margin);
    let clamp = |v: f64, lo: i64, hi: i64| v.max(lo as f64).min(hi as f64) as i64;

    let min_y = clamp(bb.min_y.floor(), win_y0, win_y1 - 1);
    let max_y = clamp(bb.max_y.ceil(), win_y0, win_y1 - 1);
    let end_x = win_x1 + 1;
    let num_rows = (max_y - min_y + 1) as usize;

    let rows_best = get_row_crossings(&Mpoly::from_ring(best.clone()), min_y as i32, num_rows);
    let rows_trial = get_row_crossings(&Mpoly::from_ring(trial.clone()), min_y as i32, num_rows);

    let mut tally = 0i64;
    for (offset, (row_b, row_t)) in rows_best.iter().zip(rows_trial.iter()).enumerate() {
        let y = min_y + offset as i64;
        // clamping keeps the toggle parity; clipped spans collapse to zero width
        let at = |row: &[i32], i: usize| {
            row.get(i)
                .map_or(end_x, |&c| (c as i64).clamp(win_x0, win_x1))
        };

        let (mut in_b, mut in_t) = (false, false);
        let (mut ib, mut it) = (0usize, 0usize);
        loop {
            let (cb, ct) = (at(row_b, ib), at(row_t, it));
            if cb >= end_x && ct >= end_x {
                break;
            }
            let x_from = cb.min(ct);
            if cb < ct {
                in_b = !in_b;
                ib += 1;
            } else {
                in_t = !in_t;
                it += 1;
            }
            if in_b == in_t {
                continue;
            }
            let x_to = at(row_b, ib).min(at(row_t, it)).min(win_x1);
            let width = (x_to - x_from).max(0);
            let valid = mask.count_valid_in_span(y, x_from, x_to) as i64;
            let invalid = width - valid;
            let delta = weights.gain * valid - weights.penalty * invalid;
            if in_t {
                tally += delta;
            } else {
                tally -= delta;
            }
        }
    }
    tally
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Vertex;
    use proptest::prelude::*;

    fn rect(x0: f64, y0: f64, x1: f64, y1: f64) -> Ring {
        Ring::new(vec![
            Vertex::new(x0, y0),
            Vertex::new(x1, y0),
            Vertex::new(x1, y1),
            Vertex::new(x0, y1),
        ])
    }

    fn block_mask() -> BitGrid {
        BitGrid::from_fn(40, 40, |x, y| (10..30).contains(&x) && (10..30).contains(&y))
    }

    #[test]
    fn identical_rings_score_zero() {
        let mask = block_mask();
        let r = rect(10.0, 10.0, 30.0, 30.0);
        assert_eq!(ring_diff(&r, &r, &mask, ScoreWeights::default()), 0);
    }

    #[test]
    fn growing_onto_valid_pixels_gains() {
        let mask = block_mask();
        let best = rect(10.0, 10.0, 20.0, 30.0);
        let trial = rect(10.0, 10.0, 25.0, 30.0);
        // 5 extra columns × 20 rows of valid pixels
        assert_eq!(ring_diff(&best, &trial, &mask, ScoreWeights::default()), 100);
    }

    #[test]
    fn growing_onto_invalid_pixels_costs_penalty() {
        let mask = block_mask();
        let best = rect(10.0, 10.0, 30.0, 30.0);
        let trial = rect(10.0, 10.0, 33.0, 30.0);
        assert_eq!(ring_diff(&best, &trial, &mask, ScoreWeights::default()), -2 * 3 * 20);
    }

    #[test]
    fn pixels_outside_raster_are_invalid() {
        let mask = BitGrid::from_fn(10, 10, |_, _| true);
        let best = rect(0.0, 0.0, 10.0, 10.0);
        let trial = rect(-2.0, 0.0, 10.0, 10.0);
        assert_eq!(ring_diff(&best, &trial, &mask, ScoreWeights::default()), -2 * 2 * 10);
    }

    #[test]
    fn shifted_ring_mixes_gain_and_penalty() {
        let mask = block_mask();
        let best = rect(5.0, 10.0, 25.0, 30.0);
        let trial = rect(10.0, 10.0, 30.0, 30.0);
        // trial gains 5 valid columns; best loses 5 invalid columns
        assert_eq!(ring_diff(&best, &trial, &mask, ScoreWeights::default()), 100 + 200);
    }

    #[test]
    fn far_off_vertex_is_clipped_to_window() {
        let mask = BitGrid::from_fn(10, 10, |_, _| true);
        let best = rect(0.0, 0.0, 5.0, 5.0);
        let far = Ring::new(vec![
            Vertex::new(0.0, 0.0),
            Vertex::new(3.0e9, 0.0),
            Vertex::new(5.0, 5.0),
            Vertex::new(0.0, 5.0),
        ]);
        let w = ScoreWeights::default();
        let d = ring_diff(&best, &far, &mask, w);
        // the sliver beyond the raster is invalid, so the far ring loses
        assert!(d < 0, "diff {d}");
        assert_eq!(ring_diff(&far, &best, &mask, w), -d);

        let tall = rect(0.0, -1.0e12, 5.0, 1.0e12);
        let d = ring_diff(&best, &tall, &mask, w);
        assert!(d < 0, "diff {d}");
        assert_eq!(ring_diff(&tall, &best, &mask, w), -d);
    }

    #[test]
    fn non_finite_vertex_scores_zero() {
        let mask = block_mask();
        let best = rect(10.0, 10.0, 30.0, 30.0);
        let bad = rect(10.0, 10.0, f64::INFINITY, 30.0);
        assert_eq!(ring_diff(&best, &bad, &mask, ScoreWeights::default()), 0);
    }

    proptest! {
        #[test]
        fn score_is_antisymmetric(
            ax in 0.0..30.0f64, ay in 0.0..30.0f64, aw in 1.0..20.0f64, ah in 1.0..20.0f64,
            bx in 0.0..30.0f64, by in 0.0..30.0f64, bw in 1.0..20.0f64, bh in 1.0..20.0f64,
            skew in -5.0..5.0f64,
        ) {
            let mask = block_mask();
            let a = rect(ax, ay, ax + aw, ay + ah);
            let mut b = rect(bx, by, bx + bw, by + bh);
            b.pts[2].x += skew;
            b.pts[3].x += skew;
            let w = ScoreWeights::default();
            prop_assert_eq!(ring_diff(&a, &b, &mask, w), -ring_diff(&b, &a, &mask, w));
        }
    }
}
