//! Folding clusters into a deduplicated accumulator.
//!
//! A merge runs in two stages per attribute kind. Stage 1 walks every raw
//! attribute value of every source cluster (referenced or not) in order and
//! appends it to the accumulator unless an entry within tolerance already
//! exists, recording which accumulator slot each original index resolved to.
//! Stage 2 rewrites the sources' index streams through those tables and
//! appends them to the accumulator's index streams.
//!
//! The slot recorded for a value is always the first accumulator entry within
//! tolerance, which is what a fresh search of the final arrays would return:
//! entries appended later can only come after it.
//!
//! `&mut Cluster` makes the accumulator exclusive for the duration of a call;
//! share one across threads behind a `Mutex` or keep it on a single task.

use crate::errors::MergeError;
use crate::float_types::Real;
use crate::mesh::{Attribute, AttributeKind, Cluster};
use nalgebra::{Point3, Vector2, Vector3};

pub mod linear;
pub mod options;
pub mod traits;

#[cfg(feature = "hashmap")]
pub mod spatial_hash;

pub use linear::LinearScanIndex;
pub use options::{DedupStrategy, MergeOptions};
pub use traits::DedupIndex;

#[cfg(feature = "hashmap")]
pub use spatial_hash::SpatialHashIndex;

/// What a merge appended to the accumulator.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    pub positions_added: usize,
    pub normals_added: usize,
    pub uvs_added: usize,
    pub triangles_added: usize,
}

/// Merge two clusters into `total`, deduplicating positions, normals and UVs
/// against everything already in it.
///
/// Adjacency is not re-checked; see [`crate::adjacency::can_join_clusters`].
/// On error `total` is left exactly as it was.
pub fn join_shared_clusters(
    cluster0: &Cluster,
    cluster1: &Cluster,
    total: &mut Cluster,
    options: &MergeOptions,
) -> Result<MergeStats, MergeError> {
    join_clusters(&[cluster0, cluster1], total, options)
}

/// Merge any number of clusters into `total`, in slice order. Errors name the
/// offending cluster by its position in `sources`.
pub fn join_clusters(
    sources: &[&Cluster],
    total: &mut Cluster,
    options: &MergeOptions,
) -> Result<MergeStats, MergeError> {
    check_total(total)?;
    for (ordinal, cluster) in sources.iter().enumerate() {
        cluster.validate_as(ordinal)?;
    }

    let checkpoint = Checkpoint::of(total);
    let merged = match options.strategy {
        DedupStrategy::LinearScan => {
            merge_with::<LinearScanIndex>(sources, total, options.tolerance)
        },
        #[cfg(feature = "hashmap")]
        DedupStrategy::SpatialHash => {
            merge_with::<SpatialHashIndex>(sources, total, options.tolerance)
        },
    };

    if let Err(err) = merged {
        log::warn!("merge of {} clusters rolled back: {}", sources.len(), err);
        checkpoint.restore(total);
        return Err(err);
    }

    let stats = checkpoint.stats(total);
    log::debug!(
        "merged {} clusters: +{} positions, +{} normals, +{} uvs, +{} triangles",
        sources.len(),
        stats.positions_added,
        stats.normals_added,
        stats.uvs_added,
        stats.triangles_added
    );
    Ok(stats)
}

/// Fold `clusters` into a fresh accumulator.
pub fn merge_all(clusters: &[Cluster], options: &MergeOptions) -> Result<Cluster, MergeError> {
    let sources: Vec<&Cluster> = clusters.iter().collect();
    let mut total = Cluster::empty();
    join_clusters(&sources, &mut total, options)?;
    Ok(total)
}

fn merge_with<I>(sources: &[&Cluster], total: &mut Cluster, tolerance: Real) -> Result<(), MergeError>
where
    I: DedupIndex<Point3<Real>> + DedupIndex<Vector3<Real>> + DedupIndex<Vector2<Real>>,
{
    let position_slots = dedup_stream::<_, I>(
        &mut total.positions,
        sources.iter().map(|c| c.positions.as_slice()),
        tolerance,
    )?;
    let normal_slots = dedup_stream::<_, I>(
        &mut total.normals,
        sources.iter().map(|c| c.normals.as_slice()),
        tolerance,
    )?;
    let uv_slots = dedup_stream::<_, I>(
        &mut total.uvs,
        sources.iter().map(|c| c.uvs.as_slice()),
        tolerance,
    )?;

    for (ordinal, cluster) in sources.iter().enumerate() {
        remap(
            &cluster.position_indices,
            &position_slots[ordinal],
            ordinal,
            AttributeKind::Position,
            &mut total.position_indices,
        )?;
        remap(
            &cluster.normal_indices,
            &normal_slots[ordinal],
            ordinal,
            AttributeKind::Normal,
            &mut total.normal_indices,
        )?;
        remap(
            &cluster.uv_indices,
            &uv_slots[ordinal],
            ordinal,
            AttributeKind::Uv,
            &mut total.uv_indices,
        )?;
    }

    check_total(total)
}

/// Stage 1 for one attribute kind. Returns, per source, the accumulator slot
/// each original index resolved to. A value that does not match even itself
/// (any NaN component) resolves to `None`.
fn dedup_stream<'a, A, I>(
    entries: &mut Vec<A>,
    sources: impl Iterator<Item = &'a [A]>,
    tolerance: Real,
) -> Result<Vec<Vec<Option<u32>>>, MergeError>
where
    A: Attribute + 'a,
    I: DedupIndex<A>,
{
    let start = entries.len();
    let mut index = I::seed(entries, tolerance);
    let mut tables = Vec::new();

    for values in sources {
        let mut slots = Vec::with_capacity(values.len());
        for value in values {
            let slot = match index.find(entries, value) {
                Some(slot) => Some(slot),
                None => {
                    entries.push(*value);
                    let slot = entries.len() - 1;
                    index.insert(entries, slot);
                    value.matches(value, tolerance).then_some(slot)
                },
            };
            let slot = slot
                .map(|slot| u32::try_from(slot).map_err(|_| MergeError::IndexOverflow { kind: A::KIND }))
                .transpose()?;
            slots.push(slot);
        }
        tables.push(slots);
    }

    log::trace!(
        "{} stream: {} candidates, {} new entries",
        A::KIND,
        tables.iter().map(Vec::len).sum::<usize>(),
        entries.len() - start
    );
    Ok(tables)
}

/// Stage 2 for one index stream of one source.
fn remap(
    indices: &[u32],
    slots: &[Option<u32>],
    cluster: usize,
    kind: AttributeKind,
    out: &mut Vec<u32>,
) -> Result<(), MergeError> {
    out.reserve(indices.len());
    for &index in indices {
        let slot = slots
            .get(index as usize)
            .copied()
            .flatten()
            .ok_or(MergeError::UnresolvedIndex { cluster, kind, index })?;
        out.push(slot);
    }
    Ok(())
}

fn check_total(total: &Cluster) -> Result<(), MergeError> {
    let (positions, normals, uvs) = (
        total.position_indices.len(),
        total.normal_indices.len(),
        total.uv_indices.len(),
    );
    if positions != normals || positions != uvs {
        return Err(MergeError::TotalIndexCountMismatch {
            positions,
            normals,
            uvs,
        });
    }
    Ok(())
}

/// Array lengths of an accumulator before a merge.
struct Checkpoint {
    positions: usize,
    normals: usize,
    uvs: usize,
    position_indices: usize,
    normal_indices: usize,
    uv_indices: usize,
}

impl Checkpoint {
    fn of(total: &Cluster) -> Self {
        Checkpoint {
            positions: total.positions.len(),
            normals: total.normals.len(),
            uvs: total.uvs.len(),
            position_indices: total.position_indices.len(),
            normal_indices: total.normal_indices.len(),
            uv_indices: total.uv_indices.len(),
        }
    }

    fn restore(&self, total: &mut Cluster) {
        total.positions.truncate(self.positions);
        total.normals.truncate(self.normals);
        total.uvs.truncate(self.uvs);
        total.position_indices.truncate(self.position_indices);
        total.normal_indices.truncate(self.normal_indices);
        total.uv_indices.truncate(self.uv_indices);
    }

    fn stats(&self, total: &Cluster) -> MergeStats {
        MergeStats {
            positions_added: total.positions.len() - self.positions,
            normals_added: total.normals.len() - self.normals,
            uvs_added: total.uvs.len() - self.uvs,
            triangles_added: (total.position_indices.len() - self.position_indices) / 3,
        }
    }
}
