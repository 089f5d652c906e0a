use serde::Serialize;
use std::time::Instant;

/// Wall-clock cost of one finder stage.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StageTiming {
    pub label: String,
    pub elapsed_ms: f64,
}

/// Per-stage timings of a finder run.
#[derive(Clone, Debug, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TimingBreakdown {
    pub total_ms: f64,
    pub stages: Vec<StageTiming>,
}

impl TimingBreakdown {
    /// Record the time elapsed since `since` under `label`.
    pub fn record(&mut self, label: impl Into<String>, since: Instant) {
        self.stages.push(StageTiming {
            label: label.into(),
            elapsed_ms: since.elapsed().as_secs_f64() * 1000.0,
        });
    }

    pub fn stage_ms(&self, label: &str) -> Option<f64> {
        self.stages
            .iter()
            .find(|s| s.label == label)
            .map(|s| s.elapsed_ms)
    }
}
