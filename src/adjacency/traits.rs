//! Traits for pairwise cluster adjacency search.

use crate::errors::MergeError;
use crate::float_types::Real;
use crate::mesh::Cluster;

/// Finds every pair of clusters that share an edge.
pub trait AdjacencyOps {
    /// All pairs `(i, j)` with `i < j` for which
    /// [`super::can_join_clusters`] holds, sorted ascending.
    ///
    /// Every cluster's position indices are range-checked first, so an
    /// [`MergeError::IndexOutOfRange`] names the offending cluster by its
    /// position in `clusters`. After that, pairs whose bounding boxes, grown
    /// by the square root of `tolerance`, do not overlap are skipped without
    /// changing the result.
    fn adjacent_pairs(
        &self,
        clusters: &[Cluster],
        tolerance: Real,
    ) -> Result<Vec<(usize, usize)>, MergeError>;
}
