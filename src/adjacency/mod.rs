//! Shared-edge adjacency between clusters.
//!
//! Two clusters border each other when some triangle of one shares at least
//! two corner positions (within tolerance) with some triangle of the other.
//! The test is quadratic in triangle count and meant for small clusters.

use crate::errors::MergeError;
use crate::float_types::Real;
use crate::mesh::{Attribute, AttributeKind, Cluster, check_indices};
use nalgebra::Point3;

pub mod traits;
pub mod serial;

#[cfg(feature = "parallel")]
pub mod parallel;

pub use traits::AdjacencyOps;
pub use serial::SerialAdjacencyOps;

#[cfg(feature = "parallel")]
pub use parallel::ParallelAdjacencyOps;

/// Shared corners needed before two triangles count as sharing an edge.
pub const SHARED_CORNER_THRESHOLD: usize = 2;

/// Number of corner pairs `(a, b)`, `a` from `tri0` and `b` from `tri1`, whose
/// positions match within `tolerance`.
///
/// Every pair is counted independently, so a corner of `tri0` that matches two
/// coincident corners of `tri1` contributes twice and the result can exceed 3.
pub fn shared_corner_count(
    tri0: &[Point3<Real>; 3],
    tri1: &[Point3<Real>; 3],
    tolerance: Real,
) -> usize {
    tri0.iter()
        .map(|a| tri1.iter().filter(|b| a.matches(b, tolerance)).count())
        .sum()
}

/// `true` iff at least one triangle of cluster 0 shares two or more corner
/// positions with at least one triangle of cluster 1.
///
/// Only whole triangles are considered; a trailing partial triple is ignored.
/// Empty index streams yield `false`. Every index is range-checked before any
/// comparison is made.
pub fn can_join_clusters(
    positions0: &[Point3<Real>],
    indices0: &[u32],
    positions1: &[Point3<Real>],
    indices1: &[u32],
    tolerance: Real,
) -> Result<bool, MergeError> {
    check_indices(indices0, positions0.len(), 0, AttributeKind::Position)?;
    check_indices(indices1, positions1.len(), 1, AttributeKind::Position)?;

    let triangles1: Vec<[Point3<Real>; 3]> = triangles(positions1, indices1).collect();
    for tri0 in triangles(positions0, indices0) {
        if triangles1
            .iter()
            .any(|tri1| shared_corner_count(&tri0, tri1, tolerance) >= SHARED_CORNER_THRESHOLD)
        {
            return Ok(true);
        }
    }
    Ok(false)
}

/// All pairs `(i, j)`, `i < j`, of clusters that can be joined, in ascending
/// order. Uses [`ParallelAdjacencyOps`] when the `parallel` feature is on.
pub fn find_adjacent_pairs(
    clusters: &[Cluster],
    tolerance: Real,
) -> Result<Vec<(usize, usize)>, MergeError> {
    #[cfg(not(feature = "parallel"))]
    let ops = SerialAdjacencyOps::new();
    #[cfg(feature = "parallel")]
    let ops = ParallelAdjacencyOps::new();

    ops.adjacent_pairs(clusters, tolerance)
}

impl Cluster {
    /// Whether this cluster shares an edge with `other`.
    pub fn can_join(&self, other: &Cluster, tolerance: Real) -> Result<bool, MergeError> {
        can_join_clusters(
            &self.positions,
            &self.position_indices,
            &other.positions,
            &other.position_indices,
            tolerance,
        )
    }
}

/// Corner positions of each whole triangle. Indices must already be in range.
fn triangles<'a>(
    positions: &'a [Point3<Real>],
    indices: &'a [u32],
) -> impl Iterator<Item = [Point3<Real>; 3]> + 'a {
    indices.chunks_exact(3).map(move |tri| {
        [
            positions[tri[0] as usize],
            positions[tri[1] as usize],
            positions[tri[2] as usize],
        ]
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const TOL: Real = 1e-7;

    fn p(x: Real, y: Real, z: Real) -> Point3<Real> {
        Point3::new(x, y, z)
    }

    #[test]
    fn corner_count_threshold() {
        let base = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        let one = [p(1.0, 0.0, 0.0), p(2.0, 0.0, 0.0), p(2.0, 1.0, 0.0)];
        let two = [p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0), p(1.0, 1.0, 0.0)];

        assert_eq!(shared_corner_count(&base, &one, TOL), 1);
        assert_eq!(shared_corner_count(&base, &two, TOL), 2);
        assert_eq!(shared_corner_count(&base, &base, TOL), 3);
    }

    #[test]
    fn coincident_corners_count_more_than_once() {
        // degenerate triangle whose three corners coincide: one real shared vertex
        // is counted three times and passes the edge threshold
        let base = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        let collapsed = [p(1.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(1.0, 0.0, 0.0)];
        assert_eq!(shared_corner_count(&base, &collapsed, TOL), 3);

        let positions1 = collapsed.to_vec();
        assert_eq!(
            can_join_clusters(&base, &[0, 1, 2], &positions1, &[0, 1, 2], TOL),
            Ok(true)
        );
    }

    #[test]
    fn empty_and_partial_streams() {
        let base = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        assert_eq!(can_join_clusters(&base, &[], &base, &[0, 1, 2], TOL), Ok(false));
        assert_eq!(can_join_clusters(&base, &[0, 1, 2], &base, &[0, 1], TOL), Ok(false));
    }

    #[test]
    fn out_of_range_index_is_reported() {
        let base = [p(0.0, 0.0, 0.0), p(1.0, 0.0, 0.0), p(0.0, 1.0, 0.0)];
        assert_eq!(
            can_join_clusters(&base, &[0, 1, 2], &base, &[0, 1, 3], TOL),
            Err(MergeError::IndexOutOfRange {
                cluster: 1,
                kind: AttributeKind::Position,
                slot: 2,
                index: 3,
                len: 3
            })
        );
    }
}
