/// Structural failures that abort a rectangle search.
///
/// These mean the input was malformed or an internal invariant broke. An
/// input that simply has no four-sided footprint is not an error; see
/// [`crate::quad::Rect4Outcome::NotFound`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FinderError {
    /// The mask has no valid pixel.
    EmptyMask,
    /// The hull is zero- or one-dimensional (single pixel or straight line).
    DegenerateHull { edges: usize },
    /// Clustering finished with an edge that belongs to no group.
    UnassignedEdge { index: usize },
    /// An edge references a group id outside `0..groups`.
    GroupOutOfRange {
        index: usize,
        group: usize,
        groups: usize,
    },
}

impl std::fmt::Display for FinderError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::EmptyMask => write!(f, "mask has no valid pixels"),
            Self::DegenerateHull { edges } => {
                write!(f, "convex hull has fewer than three sides ({} traced)", edges)
            }
            Self::UnassignedEdge { index } => {
                write!(f, "hull edge {} was not assigned to a group", index)
            }
            Self::GroupOutOfRange {
                index,
                group,
                groups,
            } => write!(
                f,
                "group out of range (edge={}, group={}, groups={})",
                index, group, groups
            ),
        }
    }
}

impl std::error::Error for FinderError {}
