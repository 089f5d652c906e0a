//! Diagnostics exposed by the finder and the demo binary.
//!
//! `FinderReport` is what [`crate::RectFinder::process_with_diagnostics`]
//! returns: the outcome plus hull/group summaries, annealing statistics and
//! stage timings. `plot` holds the optional drawing hooks.

pub mod plot;
pub mod report;
pub mod timing;

pub use plot::{DebugPlot, NoopPlot, RgbPlot};
pub use report::{FinderReport, GroupDescriptor, InputDescriptor};
pub use timing::{StageTiming, TimingBreakdown};
