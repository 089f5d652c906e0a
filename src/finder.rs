//! Rectangle finder driving the mask → quadrilateral pipeline.
//!
//! Stages: hull tracing ([`crate::hull`]), edge clustering
//! ([`crate::cluster`]), quadrilateral construction ([`crate::quad`]) and,
//! when enabled, the hill-climb refinement ([`crate::anneal`]).
//!
//! ```no_run
//! use rect_finder::{FinderParams, RectFinder};
//! use rect_finder::image::BitGrid;
//! use rand::SeedableRng;
//! use rand_chacha::ChaCha8Rng;
//!
//! # fn example(mask: BitGrid) -> Result<(), rect_finder::FinderError> {
//! let finder = RectFinder::new(FinderParams { refine: true, ..Default::default() });
//! let mut rng = ChaCha8Rng::seed_from_u64(0);
//! if let Some(ring) = finder.process(&mask, &mut rng)?.ring() {
//!     println!("corners: {:?}", ring.pts);
//! }
//! # Ok(())
//! # }
//! ```

use crate::anneal::{AnnealParams, Annealer};
use crate::cluster::{assign_groups, summarize_groups, ClusterParams, EdgeGroup};
use crate::diagnostics::{
    DebugPlot, FinderReport, GroupDescriptor, InputDescriptor, NoopPlot, TimingBreakdown,
};
use crate::error::FinderError;
use crate::hull::trace_convex_hull;
use crate::image::BitGrid;
use crate::quad::{build_quad, Rect4Outcome};
use log::debug;
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// Finder-wide parameters.
#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct FinderParams {
    pub cluster: ClusterParams,
    /// Run the hill-climb refinement on a found quadrilateral.
    pub refine: bool,
    pub anneal: AnnealParams,
}

pub struct RectFinder {
    params: FinderParams,
}

impl RectFinder {
    pub fn new(params: FinderParams) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &FinderParams {
        &self.params
    }

    /// Find the best-fit quadrilateral of `mask`.
    pub fn process<R: Rng + ?Sized>(
        &self,
        mask: &BitGrid,
        rng: &mut R,
    ) -> Result<Rect4Outcome, FinderError> {
        self.process_with_diagnostics(mask, rng, &mut NoopPlot)
            .map(|report| report.outcome)
    }

    /// Run the finder and return the outcome together with a detailed report.
    pub fn process_with_diagnostics<R: Rng + ?Sized>(
        &self,
        mask: &BitGrid,
        rng: &mut R,
        plot: &mut dyn DebugPlot,
    ) -> Result<FinderReport, FinderError> {
        let (w, h) = (mask.width(), mask.height());
        debug!("RectFinder::process start w={} h={} refine={}", w, h, self.params.refine);
        let total_start = Instant::now();
        let mut timings = TimingBreakdown::default();

        let stage = Instant::now();
        let mut edges = trace_convex_hull(mask, plot)?;
        timings.record("hull", stage);

        let stage = Instant::now();
        let num_groups = assign_groups(&mut edges, &self.params.cluster);
        let all_groups = summarize_groups(&edges, num_groups, w, h, &self.params.cluster)?;
        let mut kept: Vec<EdgeGroup> = all_groups.iter().filter(|g| g.kept).cloned().collect();
        timings.record("cluster", stage);

        let stage = Instant::now();
        let outcome = build_quad(&edges, &mut kept, plot);
        timings.record("quad", stage);

        let groups = all_groups
            .iter()
            .map(|g| {
                let chosen = kept.iter().find(|k| k.id == g.id).unwrap_or(g);
                GroupDescriptor::from_group(chosen)
            })
            .collect();

        let initial = outcome.ring().cloned();
        let (outcome, anneal) = match outcome {
            Rect4Outcome::Found(ring) if self.params.refine => {
                let stage = Instant::now();
                let annealer = Annealer::new(mask, self.params.anneal.clone());
                let result = annealer.run(&ring, rng, plot);
                timings.record("anneal", stage);
                (Rect4Outcome::Found(result.best), Some(result.stats))
            }
            other => (other, None),
        };

        timings.total_ms = total_start.elapsed().as_secs_f64() * 1000.0;
        debug!(
            "RectFinder::process done found={} total_ms={:.3}",
            outcome.is_found(),
            timings.total_ms
        );

        Ok(FinderReport {
            input: InputDescriptor {
                width: w,
                height: h,
                valid_pixels: mask.count_valid(),
            },
            outcome,
            hull_edges: edges.len(),
            groups,
            initial,
            anneal,
            timings,
        })
    }
}
