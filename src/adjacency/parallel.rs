//! Parallel implementation of `AdjacencyOps`.

use super::serial::{check_position_indices, may_touch, padded_bounds};
use super::traits::AdjacencyOps;
use crate::errors::MergeError;
use crate::float_types::Real;
use crate::mesh::Cluster;
use rayon::prelude::*;

/// Parallel implementation of `AdjacencyOps`.
pub struct ParallelAdjacencyOps;

impl Default for ParallelAdjacencyOps {
    fn default() -> Self {
        Self::new()
    }
}

impl ParallelAdjacencyOps {
    pub const fn new() -> Self {
        Self
    }
}

impl AdjacencyOps for ParallelAdjacencyOps {
    fn adjacent_pairs(
        &self,
        clusters: &[Cluster],
        tolerance: Real,
    ) -> Result<Vec<(usize, usize)>, MergeError> {
        check_position_indices(clusters)?;
        let bounds = padded_bounds(clusters, tolerance);

        let per_row: Vec<Vec<(usize, usize)>> = (0..clusters.len())
            .into_par_iter()
            .map(|i| -> Result<Vec<(usize, usize)>, MergeError> {
                let mut row = Vec::new();
                for j in i + 1..clusters.len() {
                    if may_touch(&bounds[i], &bounds[j])
                        && clusters[i].can_join(&clusters[j], tolerance)?
                    {
                        row.push((i, j));
                    }
                }
                Ok(row)
            })
            .collect::<Result<_, _>>()?;

        // rows come back in index order, so the flattened list is already sorted
        let pairs: Vec<(usize, usize)> = per_row.into_iter().flatten().collect();
        log::debug!("{} adjacent pairs among {} clusters", pairs.len(), clusters.len());
        Ok(pairs)
    }
}
