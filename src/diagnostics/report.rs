use super::TimingBreakdown;
use crate::anneal::AnnealStats;
use crate::cluster::EdgeGroup;
use crate::quad::Rect4Outcome;
use crate::types::Ring;
use serde::Serialize;

/// Result produced by [`RectFinder::process_with_diagnostics`](crate::RectFinder).
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FinderReport {
    pub input: InputDescriptor,
    pub outcome: Rect4Outcome,
    pub hull_edges: usize,
    /// Every group handed out during clustering, kept or not.
    pub groups: Vec<GroupDescriptor>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub initial: Option<Ring>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub anneal: Option<AnnealStats>,
    pub timings: TimingBreakdown,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InputDescriptor {
    pub width: usize,
    pub height: usize,
    pub valid_pixels: usize,
}

#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupDescriptor {
    pub id: usize,
    pub arc_len: f64,
    pub avg_angle_deg: f64,
    pub kept: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_edge_angle_deg: Option<f64>,
}

impl GroupDescriptor {
    pub fn from_group(group: &EdgeGroup) -> Self {
        Self {
            id: group.id,
            arc_len: group.arc_len,
            avg_angle_deg: group.avg_angle,
            kept: group.kept,
            best_edge_angle_deg: group.best_edge.map(|e| e.angle),
        }
    }
}
