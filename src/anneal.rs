//! Decaying-step hill climb over parallelogram-shaped candidates.
//!
//! Each iteration jitters the first three corners of the current best ring
//! by up to `ceil(initial_step * exp(-i / decay))` pixels, closes the shape
//! as a parallelogram, and keeps the result only if it strictly improves the
//! overlap score. Worse moves are never accepted.
//!
//! The random source is passed in, so a seeded generator reproduces a run
//! exactly.

use crate::diagnostics::plot::{DebugPlot, GREEN, YELLOW};
use crate::image::BitGrid;
use crate::score::{ring_diff, ScoreWeights};
use crate::types::{Ring, Vertex};
use log::{debug, warn};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::{Duration, Instant};

/// Parameters of the refinement pass.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct AnnealParams {
    /// Iteration budget.
    pub iterations: usize,
    /// Perturbation radius (px) at iteration 0.
    pub initial_step: f64,
    /// e-folding length of the radius, in iterations. Must be positive;
    /// [`AnnealParams::validate`] rejects anything else and `step_size`
    /// falls back to 1.0 for values that skipped validation.
    pub decay: f64,
    pub weights: ScoreWeights,
    /// Optional wall-clock cap; `None` runs the full budget.
    pub time_limit_ms: Option<u64>,
    /// Seed for callers that build their own generator (the demo binary).
    pub seed: Option<u64>,
}

impl Default for AnnealParams {
    fn default() -> Self {
        Self {
            iterations: 10_000,
            initial_step: 200.0,
            decay: 50.0,
            weights: ScoreWeights::default(),
            time_limit_ms: None,
            seed: None,
        }
    }
}

impl AnnealParams {
    pub fn validate(&self) -> Result<(), String> {
        if !(self.decay > 0.0 && self.decay.is_finite()) {
            return Err(format!("anneal.decay must be positive, got {}", self.decay));
        }
        if !(self.initial_step >= 0.0 && self.initial_step.is_finite()) {
            return Err(format!(
                "anneal.initial_step must be non-negative, got {}",
                self.initial_step
            ));
        }
        Ok(())
    }

    /// Perturbation radius for iteration `iter`.
    pub fn step_size(&self, iter: usize) -> i64 {
        let decay = if self.decay > 0.0 { self.decay } else { 1.0 };
        (self.initial_step * (-(iter as f64) / decay).exp()).ceil() as i64
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum StopReason {
    IterationBudget,
    TimeLimit,
    /// Input was not a quadrilateral; nothing to refine.
    NotQuadrilateral,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnealStats {
    pub iterations: usize,
    pub accepted: usize,
    /// Sum of the accepted score deltas, i.e. the score of the result
    /// relative to the input.
    pub total_gain: i64,
    pub stop_reason: StopReason,
    pub elapsed_ms: f64,
}

#[derive(Clone, Debug)]
pub struct AnnealResult {
    pub best: Ring,
    pub stats: AnnealStats,
}

/// Jitter the first three corners of `ring` by up to `amt` pixels and force
/// the fourth so that the result is a parallelogram: `v3 = v0 + v2 - v1`.
pub fn perturb<R: Rng + ?Sized>(ring: &Ring, amt: i64, rng: &mut R) -> Ring {
    let amt = amt.max(0);
    let mut pts = ring.pts.clone();
    for p in pts.iter_mut().take(3) {
        p.x += rng.gen_range(-amt..=amt) as f64;
        p.y += rng.gen_range(-amt..=amt) as f64;
    }
    if pts.len() >= 4 {
        pts[3] = Vertex::new(pts[0].x + pts[2].x - pts[1].x, pts[0].y + pts[2].y - pts[1].y);
    }
    Ring::new(pts)
}

/// Hill climber bound to one mask.
pub struct Annealer<'a> {
    mask: &'a BitGrid,
    params: AnnealParams,
}

impl<'a> Annealer<'a> {
    pub fn new(mask: &'a BitGrid, params: AnnealParams) -> Self {
        Self { mask, params }
    }

    pub fn params(&self) -> &AnnealParams {
        &self.params
    }

    /// Refine `input`, returning the best ring seen.
    pub fn run<R: Rng + ?Sized>(
        &self,
        input: &Ring,
        rng: &mut R,
        plot: &mut dyn DebugPlot,
    ) -> AnnealResult {
        let start = Instant::now();
        if input.len() != 4 {
            warn!("anneal: expected 4 vertices, got {}; skipping", input.len());
            return AnnealResult {
                best: input.clone(),
                stats: AnnealStats {
                    iterations: 0,
                    accepted: 0,
                    total_gain: 0,
                    stop_reason: StopReason::NotQuadrilateral,
                    elapsed_ms: 0.0,
                },
            };
        }

        let deadline = self.params.time_limit_ms.map(Duration::from_millis);
        let mut best = input.clone();
        let mut accepted = 0usize;
        let mut total_gain = 0i64;
        let mut iterations = 0usize;
        let mut stop_reason = StopReason::IterationBudget;

        for iter in 0..self.params.iterations {
            if deadline.is_some_and(|limit| start.elapsed() >= limit) {
                stop_reason = StopReason::TimeLimit;
                break;
            }
            let amt = self.params.step_size(iter);
            let trial = perturb(&best, amt, rng);
            let diff = ring_diff(&best, &trial, self.mask, self.params.weights);
            if diff > 0 {
                best = trial;
                accepted += 1;
                total_gain += diff;
            }
            iterations = iter + 1;
        }

        let n = best.len();
        for i in 0..n {
            let j = (i + 1) % n;
            plot.plot_line(best.pts[i], best.pts[j], GREEN);
            plot.plot_point(best.pts[i], YELLOW);
        }

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "anneal: iterations={} accepted={} gain={} stop={:?} elapsed_ms={:.3}",
            iterations, accepted, total_gain, stop_reason, elapsed_ms
        );
        AnnealResult {
            best,
            stats: AnnealStats {
                iterations,
                accepted,
                total_gain,
                stop_reason,
                elapsed_ms,
            },
        }
    }
}
