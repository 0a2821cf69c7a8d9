//! Serial implementation of `AdjacencyOps`.

use super::traits::AdjacencyOps;
use crate::aabb::Aabb;
use crate::errors::MergeError;
use crate::float_types::Real;
use crate::mesh::{AttributeKind, Cluster, check_indices};

/// Serial implementation of `AdjacencyOps`.
pub struct SerialAdjacencyOps;

impl Default for SerialAdjacencyOps {
    fn default() -> Self {
        Self::new()
    }
}

impl SerialAdjacencyOps {
    pub const fn new() -> Self {
        Self
    }
}

impl AdjacencyOps for SerialAdjacencyOps {
    fn adjacent_pairs(
        &self,
        clusters: &[Cluster],
        tolerance: Real,
    ) -> Result<Vec<(usize, usize)>, MergeError> {
        check_position_indices(clusters)?;
        let bounds = padded_bounds(clusters, tolerance);
        let mut pairs = Vec::new();

        for i in 0..clusters.len() {
            for j in i + 1..clusters.len() {
                if !may_touch(&bounds[i], &bounds[j]) {
                    continue;
                }
                if clusters[i].can_join(&clusters[j], tolerance)? {
                    pairs.push((i, j));
                }
            }
        }

        log::debug!("{} adjacent pairs among {} clusters", pairs.len(), clusters.len());
        Ok(pairs)
    }
}

/// Cluster bounds grown so that any two positions within tolerance of each
/// other fall in overlapping boxes.
pub(super) fn padded_bounds(clusters: &[Cluster], tolerance: Real) -> Vec<Option<Aabb>> {
    let margin = tolerance.sqrt();
    clusters
        .iter()
        .map(|c| c.bounding_box().map(|b| b.expanded(margin)))
        .collect()
}

/// Index ranges of every cluster, reported by position in `clusters`.
/// Runs before the bounding-box skip so disjoint pairs cannot hide them.
pub(super) fn check_position_indices(clusters: &[Cluster]) -> Result<(), MergeError> {
    clusters.iter().enumerate().try_for_each(|(ordinal, cluster)| {
        check_indices(
            &cluster.position_indices,
            cluster.positions.len(),
            ordinal,
            AttributeKind::Position,
        )
    })
}

/// A cluster without positions has no bounds; pair it with everything.
pub(super) fn may_touch(a: &Option<Aabb>, b: &Option<Aabb>) -> bool {
    match (a, b) {
        (Some(a), Some(b)) => a.intersects(b),
        _ => true,
    }
}
