//! `Cluster` struct: an indexed triangle mesh fragment with independent
//! position, normal and UV index streams.

use crate::aabb::Aabb;
use crate::errors::MergeError;
use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3};

pub mod attribute;

pub use attribute::{Attribute, AttributeKind};

/// An indexed triangle mesh fragment.
///
/// Triangle `i` occupies slots `[3i, 3i + 1, 3i + 2]` of each index stream.
/// A corner may reference a position, a normal and a UV at different offsets;
/// the three streams are only required to have the same length.
///
/// The same shape doubles as the merge accumulator (the "total mesh") that
/// [`crate::merge::join_shared_clusters`] appends into.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Cluster {
    pub positions: Vec<Point3<Real>>,
    pub normals: Vec<Vector3<Real>>,
    pub uvs: Vec<Vector2<Real>>,
    pub position_indices: Vec<u32>,
    pub normal_indices: Vec<u32>,
    pub uv_indices: Vec<u32>,
}

impl Cluster {
    /// Bundle six caller-produced arrays into a cluster. Nothing is validated;
    /// see [`Cluster::validate`].
    pub const fn new(
        positions: Vec<Point3<Real>>,
        normals: Vec<Vector3<Real>>,
        uvs: Vec<Vector2<Real>>,
        position_indices: Vec<u32>,
        normal_indices: Vec<u32>,
        uv_indices: Vec<u32>,
    ) -> Self {
        Cluster {
            positions,
            normals,
            uvs,
            position_indices,
            normal_indices,
            uv_indices,
        }
    }

    /// An empty cluster, typically used as a fresh merge accumulator.
    pub const fn empty() -> Self {
        Cluster::new(Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new(), Vec::new())
    }

    /// Build a cluster from flat scalar arrays: positions and normals with a stride
    /// of 3, UVs with a stride of 2. The result is validated.
    pub fn from_flat(
        positions: &[Real],
        normals: &[Real],
        uvs: &[Real],
        position_indices: &[u32],
        normal_indices: &[u32],
        uv_indices: &[u32],
    ) -> Result<Self, MergeError> {
        let cluster = Cluster::new(
            unflatten(positions)?,
            unflatten(normals)?,
            unflatten(uvs)?,
            position_indices.to_vec(),
            normal_indices.to_vec(),
            uv_indices.to_vec(),
        );
        cluster.validate()?;
        Ok(cluster)
    }

    pub fn positions_flat(&self) -> Vec<Real> {
        flatten(&self.positions)
    }

    pub fn normals_flat(&self) -> Vec<Real> {
        flatten(&self.normals)
    }

    pub fn uvs_flat(&self) -> Vec<Real> {
        flatten(&self.uvs)
    }

    /// `true` when the cluster has no triangles.
    pub fn is_empty(&self) -> bool {
        self.position_indices.is_empty()
    }

    /// Number of whole triangles in the position index stream.
    pub fn triangle_count(&self) -> usize {
        self.position_indices.len() / 3
    }

    /// Corner positions of triangle `i`, or `None` if the triangle or one of its
    /// indices is out of range.
    pub fn position_triangle(&self, i: usize) -> Option<[Point3<Real>; 3]> {
        let corners = self.position_indices.get(3 * i..3 * i + 3)?;
        Some([
            *self.positions.get(corners[0] as usize)?,
            *self.positions.get(corners[1] as usize)?,
            *self.positions.get(corners[2] as usize)?,
        ])
    }

    /// Check the structural invariants: equal index stream lengths, whole
    /// triangles, and every index addressing its own attribute array.
    pub fn validate(&self) -> Result<(), MergeError> {
        self.validate_as(0)?;
        if self.position_indices.len() % 3 != 0 {
            return Err(MergeError::PartialTriangle {
                cluster: 0,
                kind: AttributeKind::Position,
                len: self.position_indices.len(),
            });
        }
        Ok(())
    }

    /// Index-stream checks done before a merge, reporting errors against the
    /// given cluster ordinal.
    pub(crate) fn validate_as(&self, cluster: usize) -> Result<(), MergeError> {
        let (positions, normals, uvs) = (
            self.position_indices.len(),
            self.normal_indices.len(),
            self.uv_indices.len(),
        );
        if positions != normals || positions != uvs {
            return Err(MergeError::IndexCountMismatch {
                cluster,
                positions,
                normals,
                uvs,
            });
        }
        check_indices(&self.position_indices, self.positions.len(), cluster, AttributeKind::Position)?;
        check_indices(&self.normal_indices, self.normals.len(), cluster, AttributeKind::Normal)?;
        check_indices(&self.uv_indices, self.uvs.len(), cluster, AttributeKind::Uv)
    }

    /// `true` when no two entries of any attribute array lie within `tolerance`
    /// of each other. This is the invariant a merge accumulator maintains.
    pub fn is_deduplicated(&self, tolerance: Real) -> bool {
        all_distinct(&self.positions, tolerance)
            && all_distinct(&self.normals, tolerance)
            && all_distinct(&self.uvs, tolerance)
    }

    /// Bounds of the position array (including unreferenced positions).
    pub fn bounding_box(&self) -> Option<Aabb> {
        Aabb::from_points(&self.positions)
    }
}

/// Every index must address an element of an array of length `len`.
pub(crate) fn check_indices(
    indices: &[u32],
    len: usize,
    cluster: usize,
    kind: AttributeKind,
) -> Result<(), MergeError> {
    match indices.iter().position(|&index| index as usize >= len) {
        Some(slot) => Err(MergeError::IndexOutOfRange {
            cluster,
            kind,
            slot,
            index: indices[slot],
            len,
        }),
        None => Ok(()),
    }
}

fn all_distinct<A: Attribute>(values: &[A], tolerance: Real) -> bool {
    values.iter().enumerate().all(|(i, a)| {
        values[i + 1..].iter().all(|b| !a.matches(b, tolerance))
    })
}

fn unflatten<A: Attribute>(flat: &[Real]) -> Result<Vec<A>, MergeError> {
    if flat.len() % A::DIM != 0 {
        return Err(MergeError::MalformedAttributes {
            kind: A::KIND,
            len: flat.len(),
            stride: A::DIM,
        });
    }
    Ok(flat.chunks_exact(A::DIM).map(A::from_components).collect())
}

fn flatten<A: Attribute>(values: &[A]) -> Vec<Real> {
    values
        .iter()
        .flat_map(|v| (0..A::DIM).map(move |axis| v.component(axis)))
        .collect()
}

#[cfg(test)]
mod test {
    use super::*;

    fn triangle() -> Cluster {
        Cluster::from_flat(
            &[0.0, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0],
            &[0.0, 0.0, 1.0],
            &[0.0, 0.0, 1.0, 0.0, 0.0, 1.0],
            &[0, 1, 2],
            &[0, 0, 0],
            &[0, 1, 2],
        )
        .expect("valid triangle")
    }

    #[test]
    fn flat_arrays_round_trip_through_cluster() {
        let cluster = triangle();
        assert_eq!(cluster.positions.len(), 3);
        assert_eq!(cluster.normals, vec![Vector3::z()]);
        assert_eq!(cluster.uvs[1], Vector2::new(1.0, 0.0));
        assert_eq!(cluster.triangle_count(), 1);
        assert_eq!(cluster.uvs_flat(), vec![0.0, 0.0, 1.0, 0.0, 0.0, 1.0]);
        assert_eq!(
            cluster.position_triangle(0),
            Some([
                Point3::origin(),
                Point3::new(1.0, 0.0, 0.0),
                Point3::new(0.0, 1.0, 0.0)
            ])
        );
        assert_eq!(cluster.position_triangle(1), None);
    }

    #[test]
    fn from_flat_rejects_ragged_attributes() {
        let err = Cluster::from_flat(&[0.0, 1.0], &[], &[], &[], &[], &[]).unwrap_err();
        assert_eq!(
            err,
            MergeError::MalformedAttributes {
                kind: AttributeKind::Position,
                len: 2,
                stride: 3
            }
        );
    }

    #[test]
    fn validate_reports_each_broken_invariant() {
        let mut cluster = triangle();
        cluster.uv_indices.pop();
        assert!(matches!(
            cluster.validate(),
            Err(MergeError::IndexCountMismatch { uvs: 2, .. })
        ));

        let mut cluster = triangle();
        cluster.normal_indices[2] = 4;
        assert_eq!(
            cluster.validate(),
            Err(MergeError::IndexOutOfRange {
                cluster: 0,
                kind: AttributeKind::Normal,
                slot: 2,
                index: 4,
                len: 1
            })
        );

        let mut cluster = triangle();
        for indices in [
            &mut cluster.position_indices,
            &mut cluster.normal_indices,
            &mut cluster.uv_indices,
        ] {
            indices.push(0);
        }
        assert!(matches!(
            cluster.validate(),
            Err(MergeError::PartialTriangle { len: 4, .. })
        ));
    }

    #[test]
    fn dedup_invariant_detects_near_duplicates() {
        let mut cluster = triangle();
        assert!(cluster.is_deduplicated(1e-7));
        cluster.positions.push(Point3::new(1.0, 1e-4, 0.0));
        assert!(!cluster.is_deduplicated(1e-7));
    }
}
