//! Exhaustive linear-scan lookup.

use super::traits::DedupIndex;
use crate::float_types::Real;
use crate::mesh::Attribute;

/// Compares each candidate against every merged entry in order.
///
/// O(n) per lookup, so a merge is O(n²) in the combined attribute count.
/// Only suitable for small clusters, but it needs no auxiliary storage.
pub struct LinearScanIndex {
    tolerance: Real,
}

impl<A: Attribute> DedupIndex<A> for LinearScanIndex {
    fn seed(_entries: &[A], tolerance: Real) -> Self {
        LinearScanIndex { tolerance }
    }

    fn find(&self, entries: &[A], value: &A) -> Option<usize> {
        entries
            .iter()
            .position(|entry| entry.matches(value, self.tolerance))
    }

    fn insert(&mut self, _entries: &[A], _slot: usize) {}
}

#[cfg(test)]
mod test {
    use super::*;
    use nalgebra::Point3;

    #[test]
    fn returns_first_match() {
        let entries = vec![
            Point3::new(5.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 0.0),
            Point3::new(0.0, 0.0, 1e-4),
        ];
        let index = <LinearScanIndex as DedupIndex<Point3<Real>>>::seed(&entries, 1e-7);
        assert_eq!(index.find(&entries, &Point3::new(0.0, 0.0, 5e-5)), Some(1));
        assert_eq!(index.find(&entries, &Point3::new(1.0, 0.0, 0.0)), None);
    }
}
