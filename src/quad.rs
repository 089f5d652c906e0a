//! Quadrilateral construction from the surviving edge groups.
//!
//! Each group is represented by the hull edge closest in direction to the
//! group's mean direction. Groups are ordered clockwise starting from the
//! most nearly horizontal representative, and adjacent representative lines
//! are intersected to give one vertex per group.

use crate::angle::{angular_difference_deg, clockwise_offset_deg};
use crate::cluster::EdgeGroup;
use crate::diagnostics::plot::{DebugPlot, RED, YELLOW};
use crate::geometry::line_line_intersection;
use crate::hull::Edge;
use crate::types::{Ring, Vertex};
use log::debug;
use serde::Serialize;

/// Why no four-sided polygon exists for an input. These are ordinary
/// outcomes, not failures.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase", tag = "kind")]
pub enum NotFoundReason {
    /// The number of surviving groups was not four.
    WrongSideCount { sides: usize },
    /// Two adjacent representative lines are (nearly) parallel.
    ParallelSides { group: usize },
}

impl std::fmt::Display for NotFoundReason {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::WrongSideCount { sides } => {
                write!(f, "found {} dominant sides instead of 4", sides)
            }
            Self::ParallelSides { group } => {
                write!(f, "representative edge of group {} is parallel to its neighbour", group)
            }
        }
    }
}

/// Result of a rectangle search that did not break.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase", tag = "status", content = "value")]
pub enum Rect4Outcome {
    Found(Ring),
    NotFound(NotFoundReason),
}

impl Rect4Outcome {
    pub fn ring(&self) -> Option<&Ring> {
        match self {
            Self::Found(ring) => Some(ring),
            Self::NotFound(_) => None,
        }
    }

    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// The polygon, or an empty ring when nothing was found.
    pub fn into_ring(self) -> Ring {
        match self {
            Self::Found(ring) => ring,
            Self::NotFound(_) => Ring::default(),
        }
    }
}

/// Pick the representative edge of each group and fix the clockwise order.
///
/// The representative is searched over all hull edges, not just the group's
/// own members; ties keep the earliest edge.
pub fn order_groups(edges: &[Edge], groups: &mut Vec<EdgeGroup>) {
    let Some(first) = edges.first() else {
        return;
    };
    let mut top_angle = 0.0f64;
    for (i, g) in groups.iter_mut().enumerate() {
        let mut best = *first;
        for e in edges {
            if angular_difference_deg(g.avg_angle, e.angle)
                < angular_difference_deg(g.avg_angle, best.angle)
            {
                best = *e;
            }
        }
        if i == 0 || best.angle.abs() < top_angle.abs() {
            top_angle = best.angle;
        }
        g.best_edge = Some(best);
    }
    for g in groups.iter_mut() {
        let angle = g.best_edge.map_or(0.0, |e| e.angle);
        g.sort_key = clockwise_offset_deg(angle, top_angle);
    }
    // stable: equal keys keep id order
    groups.sort_by(|a, b| a.sort_key.total_cmp(&b.sort_key));
}

/// Build the quadrilateral from ordered groups. Vertex `i` is where group
/// `i`'s line meets the previous group's line.
pub fn build_quad(
    edges: &[Edge],
    groups: &mut Vec<EdgeGroup>,
    plot: &mut dyn DebugPlot,
) -> Rect4Outcome {
    order_groups(edges, groups);
    for g in groups.iter() {
        debug!(
            "quad: group {} arc={:.3} avg={:.3} best={:.3} key={:.3}",
            g.id,
            g.arc_len,
            g.avg_angle,
            g.best_edge.map_or(f64::NAN, |e| e.angle),
            g.sort_key
        );
    }

    let n = groups.len();
    if n != 4 {
        debug!("quad: could not find a 4-sided bounding polygon ({} sides)", n);
        return Rect4Outcome::NotFound(NotFoundReason::WrongSideCount { sides: n });
    }

    let mut verts: Vec<Vertex> = Vec::with_capacity(n);
    for i in 0..n {
        let j = if i == 0 { n - 1 } else { i - 1 };
        let (Some(e1), Some(e2)) = (groups[i].best_edge, groups[j].best_edge) else {
            return Rect4Outcome::NotFound(NotFoundReason::ParallelSides { group: groups[i].id });
        };
        match line_line_intersection(e1.p0, e1.p1, e2.p0, e2.p1) {
            Some(v) => verts.push(v),
            None => {
                debug!("quad: groups {} and {} are parallel", groups[i].id, groups[j].id);
                return Rect4Outcome::NotFound(NotFoundReason::ParallelSides {
                    group: groups[i].id,
                });
            }
        }
    }

    for i in 0..n {
        let j = (i + 1) % n;
        plot.plot_line(verts[i], verts[j], RED);
        plot.plot_point(verts[i], YELLOW);
    }
    Rect4Outcome::Found(Ring::new(verts))
}
