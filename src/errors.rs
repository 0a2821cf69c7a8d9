//! Merge and camera errors

use crate::float_types::Real;
use crate::mesh::AttributeKind;

/// Everything that can go wrong while testing or merging clusters.
///
/// Each variant describes a broken precondition in the data handed over by
/// the upstream pipeline. None of them leave a merge accumulator half-written.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum MergeError {
    /// The three index streams of an input cluster differ in length
    #[error(
        "(IndexCountMismatch) cluster {cluster} has {positions} position, {normals} normal and {uvs} uv indices"
    )]
    IndexCountMismatch {
        cluster: usize,
        positions: usize,
        normals: usize,
        uvs: usize,
    },
    /// An index does not address the cluster's own attribute array
    #[error(
        "(IndexOutOfRange) cluster {cluster}: {kind} index {index} at slot {slot} exceeds {len} attributes"
    )]
    IndexOutOfRange {
        cluster: usize,
        kind: AttributeKind,
        slot: usize,
        index: u32,
        len: usize,
    },
    /// A referenced attribute has no entry within tolerance in the merged arrays
    #[error("(UnresolvedIndex) cluster {cluster}: {kind} index {index} has no merged entry")]
    UnresolvedIndex {
        cluster: usize,
        kind: AttributeKind,
        index: u32,
    },
    /// The accumulator's three index streams differ in length
    #[error(
        "(TotalIndexCountMismatch) merged mesh has {positions} position, {normals} normal and {uvs} uv indices"
    )]
    TotalIndexCountMismatch {
        positions: usize,
        normals: usize,
        uvs: usize,
    },
    /// A merged attribute array grew past what a `u32` index can address
    #[error("(IndexOverflow) too many {kind} entries for 32-bit indices")]
    IndexOverflow { kind: AttributeKind },
    /// A flat attribute array is not a whole number of elements
    #[error("(MalformedAttributes) {len} {kind} components is not a multiple of {stride}")]
    MalformedAttributes {
        kind: AttributeKind,
        len: usize,
        stride: usize,
    },
    /// An index stream is not a whole number of triangles
    #[error("(PartialTriangle) cluster {cluster}: {len} {kind} indices is not a multiple of 3")]
    PartialTriangle {
        cluster: usize,
        kind: AttributeKind,
        len: usize,
    },
}

/// Invalid camera configurations rejected by [`crate::camera::Camera::update`].
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CameraError {
    /// The far plane is not beyond the near plane
    #[error("(InvalidClipRange) far plane {far} must lie beyond near plane {near}")]
    InvalidClipRange { near: Real, far: Real },
    /// The view direction is zero or parallel to the up vector
    #[error("(DegenerateView) camera position, target and up vector do not span a view basis")]
    DegenerateView,
    /// The projection parameters cannot produce a finite matrix
    #[error("(InvalidProjection) {0}")]
    InvalidProjection(String),
}
