//! Quantized spatial hash lookup.

use super::traits::DedupIndex;
use crate::float_types::Real;
use crate::mesh::Attribute;
use hashbrown::HashMap;

type CellKey = [i64; 3];

/// Buckets merged entries into cubic cells whose edge is at least the square
/// root of the tolerance, so any two values within tolerance land in the same
/// or an adjacent cell. Lookups scan the 3^DIM neighbourhood and apply the
/// exact tolerance test, which keeps results identical to a linear scan.
pub struct SpatialHashIndex {
    tolerance: Real,
    inv_cell: Real,
    cells: HashMap<CellKey, Vec<usize>>,
}

impl SpatialHashIndex {
    fn cell_of<A: Attribute>(&self, value: &A) -> CellKey {
        let mut key = [0i64; 3];
        for (axis, k) in key.iter_mut().enumerate().take(A::DIM) {
            // saturating float->int cast; NaN lands in cell 0
            *k = (value.component(axis) * self.inv_cell).floor() as i64;
        }
        key
    }
}

impl<A: Attribute> DedupIndex<A> for SpatialHashIndex {
    fn seed(entries: &[A], tolerance: Real) -> Self {
        // padded so rounding in the quantization never pushes a match two cells away
        let cell = (tolerance.sqrt() * 1.001).max(Real::MIN_POSITIVE);
        let mut index = SpatialHashIndex {
            tolerance,
            inv_cell: 1.0 / cell,
            cells: HashMap::with_capacity(entries.len()),
        };
        for slot in 0..entries.len() {
            index.insert(entries, slot);
        }
        index
    }

    fn find(&self, entries: &[A], value: &A) -> Option<usize> {
        let center = self.cell_of(value);
        let span = |axis: usize| if axis < A::DIM { -1..=1i64 } else { 0..=0 };

        let mut best: Option<usize> = None;
        for dx in span(0) {
            for dy in span(1) {
                for dz in span(2) {
                    let key = [
                        center[0].saturating_add(dx),
                        center[1].saturating_add(dy),
                        center[2].saturating_add(dz),
                    ];
                    let Some(slots) = self.cells.get(&key) else {
                        continue;
                    };
                    // slots within a cell are ascending, the first hit is that cell's lowest
                    if let Some(&slot) = slots
                        .iter()
                        .find(|&&slot| entries[slot].matches(value, self.tolerance))
                    {
                        best = Some(best.map_or(slot, |b| b.min(slot)));
                    }
                }
            }
        }
        best
    }

    fn insert(&mut self, entries: &[A], slot: usize) {
        let key = self.cell_of(&entries[slot]);
        self.cells.entry(key).or_default().push(slot);
    }
}
