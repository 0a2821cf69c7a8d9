//! Trait seam between the merge driver and the attribute lookup structures.

use crate::float_types::Real;
use crate::mesh::Attribute;

/// A lookup structure answering "which merged entry is this value?".
///
/// `entries` is always the merged attribute array the index was seeded from,
/// grown only through [`DedupIndex::insert`]. Implementations must return the
/// *lowest* slot within tolerance so every strategy produces the same mesh.
pub trait DedupIndex<A: Attribute> {
    /// Index the entries already present in the merged array.
    fn seed(entries: &[A], tolerance: Real) -> Self
    where
        Self: Sized;

    /// Lowest slot of `entries` within tolerance of `value`.
    fn find(&self, entries: &[A], value: &A) -> Option<usize>;

    /// Record that `entries[slot]` was just appended.
    fn insert(&mut self, entries: &[A], slot: usize);
}
