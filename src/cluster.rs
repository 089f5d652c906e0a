//! Clustering of consecutive hull edges into dominant sides.
//!
//! The hull is a closed loop, so the partition is circular: when the last
//! edge merges with the first, the trailing run is relabelled to the first
//! edge's group instead of staying a separate cluster.

use crate::angle::{angular_difference_deg, mean_direction_deg};
use crate::error::FinderError;
use crate::hull::Edge;
use log::debug;
use serde::{Deserialize, Serialize};

/// Thresholds for merging edges and discarding weak groups.
#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(default)]
pub struct ClusterParams {
    /// Two neighbours merge only if their summed length exceeds this factor
    /// times their angular difference (degrees).
    pub merge_length_ratio: f64,
    /// Neighbours further apart than this (degrees) never merge.
    pub merge_max_angle_deg: f64,
    /// Groups survive when their arc length exceeds `(w + h) / divisor`,
    /// computed in integer pixels.
    pub min_arc_divisor: usize,
}

impl Default for ClusterParams {
    fn default() -> Self {
        Self {
            merge_length_ratio: 5.0,
            merge_max_angle_deg: 15.0,
            min_arc_divisor: 10,
        }
    }
}

/// Aggregate over one cluster of near-colinear hull edges.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EdgeGroup {
    pub id: usize,
    pub arc_len: f64,
    /// Length-weighted direction vector sum.
    pub wx: f64,
    pub wy: f64,
    pub avg_angle: f64,
    pub kept: bool,
    /// Representative hull edge, chosen by [`crate::quad`].
    pub best_edge: Option<Edge>,
    pub sort_key: f64,
}

impl EdgeGroup {
    fn empty(id: usize) -> Self {
        Self {
            id,
            arc_len: 0.0,
            wx: 0.0,
            wy: 0.0,
            avg_angle: 0.0,
            kept: false,
            best_edge: None,
            sort_key: 0.0,
        }
    }
}

#[inline]
fn should_merge(l: &Edge, r: &Edge, params: &ClusterParams) -> bool {
    let adiff = angular_difference_deg(l.angle, r.angle);
    l.length + r.length > adiff * params.merge_length_ratio && adiff < params.merge_max_angle_deg
}

/// Label every edge with a group id. Returns the number of ids handed out;
/// after a wraparound merge some ids may end up with no members.
pub fn assign_groups(edges: &mut [Edge], params: &ClusterParams) -> usize {
    let n = edges.len();
    if n == 0 {
        return 0;
    }
    for e in edges.iter_mut() {
        e.group = None;
    }
    let mut num_groups = 0usize;
    edges[0].group = Some(num_groups);
    num_groups += 1;

    for i in 0..n {
        let l = edges[i];
        let merge = should_merge(&l, &edges[(i + 1) % n], params);
        if i < n - 1 {
            edges[i + 1].group = if merge {
                l.group
            } else {
                num_groups += 1;
                Some(num_groups - 1)
            };
        } else if merge {
            let tail = l.group;
            let mut start = n - 1;
            while start > 0 && edges[start - 1].group == tail {
                start -= 1;
            }
            let head = edges[0].group;
            for e in &mut edges[start..] {
                e.group = head;
            }
        }
    }
    debug!("cluster: {} edges -> {} group ids", n, num_groups);
    num_groups
}

/// Accumulate per-group arc length and direction, and flag the groups long
/// enough to count as a side of a `w × h` raster's footprint.
pub fn summarize_groups(
    edges: &[Edge],
    num_groups: usize,
    w: usize,
    h: usize,
    params: &ClusterParams,
) -> Result<Vec<EdgeGroup>, FinderError> {
    let mut groups: Vec<EdgeGroup> = (0..num_groups).map(EdgeGroup::empty).collect();
    for (index, e) in edges.iter().enumerate() {
        let group = e.group.ok_or(FinderError::UnassignedEdge { index })?;
        let g = groups.get_mut(group).ok_or(FinderError::GroupOutOfRange {
            index,
            group,
            groups: num_groups,
        })?;
        let rad = e.angle.to_radians();
        g.arc_len += e.length;
        g.wx += e.length * rad.cos();
        g.wy += e.length * rad.sin();
    }

    let min_arc = ((w + h) / params.min_arc_divisor.max(1)) as f64;
    for g in groups.iter_mut() {
        if g.arc_len > min_arc {
            g.kept = true;
            g.avg_angle = mean_direction_deg(g.wx, g.wy);
        }
    }
    debug!(
        "cluster: {} of {} groups exceed arc length {}",
        groups.iter().filter(|g| g.kept).count(),
        num_groups,
        min_arc
    );
    Ok(groups)
}

/// Assign groups and return only the surviving ones, in id order.
pub fn cluster_edges(
    edges: &mut [Edge],
    w: usize,
    h: usize,
    params: &ClusterParams,
) -> Result<Vec<EdgeGroup>, FinderError> {
    let num_groups = assign_groups(edges, params);
    let groups = summarize_groups(edges, num_groups, w, h, params)?;
    Ok(groups.into_iter().filter(|g| g.kept).collect())
}
