use crate::float_types::{Real, tolerance};

/// How merged attribute entries are looked up during deduplication.
///
/// Both strategies produce identical meshes; they only differ in cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DedupStrategy {
    /// Exhaustive scan of the merged array, O(n) per lookup.
    LinearScan,
    /// Quantized spatial hash over neighbouring cells, O(1) amortized.
    #[cfg(feature = "hashmap")]
    SpatialHash,
}

impl Default for DedupStrategy {
    #[cfg(feature = "hashmap")]
    fn default() -> Self {
        DedupStrategy::SpatialHash
    }

    #[cfg(not(feature = "hashmap"))]
    fn default() -> Self {
        DedupStrategy::LinearScan
    }
}

/// Per-call merge configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MergeOptions {
    /// Squared-distance threshold for treating two values as identical.
    pub tolerance: Real,
    pub strategy: DedupStrategy,
}

impl Default for MergeOptions {
    fn default() -> Self {
        MergeOptions {
            tolerance: tolerance(),
            strategy: DedupStrategy::default(),
        }
    }
}

impl MergeOptions {
    pub fn with_tolerance(mut self, tolerance: Real) -> Self {
        self.tolerance = tolerance.max(0.0);
        self
    }

    pub const fn with_strategy(mut self, strategy: DedupStrategy) -> Self {
        self.strategy = strategy;
        self
    }
}
