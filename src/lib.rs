#![doc = include_str!("../README.md")]

// Public modules (stable-ish surface)
pub mod config;
pub mod diagnostics;
pub mod error;
pub mod finder;
pub mod image;
pub mod ndv;
pub mod quad;
pub mod types;

// Pipeline stages; public for tools and tests, not a stable surface.
pub mod angle;
pub mod anneal;
pub mod cluster;
pub mod geometry;
pub mod hull;
pub mod raster;
pub mod score;

// --- High-level re-exports -------------------------------------------------

pub use crate::error::FinderError;
pub use crate::finder::{FinderParams, RectFinder};
pub use crate::quad::{NotFoundReason, Rect4Outcome};
pub use crate::types::{Mpoly, Ring, Vertex};

pub use crate::diagnostics::FinderReport;

// --- Prelude ---------------------------------------------------------------

/// Small prelude for quick experiments.
///
/// ```no_run
/// use rect_finder::prelude::*;
/// use rand::SeedableRng;
/// use rand_chacha::ChaCha8Rng;
///
/// # fn main() -> Result<(), FinderError> {
/// let mask = BitGrid::from_fn(200, 120, |x, y| (20..180).contains(&x) && (10..100).contains(&y));
/// let finder = RectFinder::new(FinderParams::default());
/// let outcome = finder.process(&mask, &mut ChaCha8Rng::seed_from_u64(1))?;
/// println!("found={}", outcome.is_found());
/// # Ok(())
/// # }
/// ```
pub mod prelude {
    pub use crate::image::BitGrid;
    pub use crate::{FinderError, FinderParams, Rect4Outcome, RectFinder, Ring, Vertex};
}

// --- Stage-level API (for tools & advanced users) --------------------------

pub mod stages {
    pub use crate::anneal::{perturb, AnnealParams, AnnealResult, AnnealStats, Annealer, StopReason};
    pub use crate::cluster::{assign_groups, cluster_edges, summarize_groups, ClusterParams, EdgeGroup};
    pub use crate::hull::{row_extents, trace_convex_hull, Edge};
    pub use crate::quad::{build_quad, order_groups};
    pub use crate::raster::{crossings_intersection, get_row_crossings, mask_from_mpoly};
    pub use crate::score::{ring_diff, ScoreWeights};

    pub use crate::diagnostics::{GroupDescriptor, InputDescriptor, StageTiming, TimingBreakdown};
}
