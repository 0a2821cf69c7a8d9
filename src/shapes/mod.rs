//! Procedural clusters.

use crate::errors::MergeError;
use crate::float_types::Real;
use crate::mesh::{AttributeKind, Cluster};
use nalgebra::{Point3, Vector2, Vector3};

impl Cluster {
    /// A flat, +Z facing grid of `cols × rows` quads (two triangles each)
    /// spanning `width × height` from `origin` along +X and +Y.
    ///
    /// Positions and UVs share one index stream; UVs run from 0 to 1 across
    /// the patch. Every corner references the single normal.
    ///
    /// Patches placed edge to edge share their boundary positions exactly,
    /// which makes them convenient neighbouring clusters.
    ///
    /// Returns [`MergeError::IndexOverflow`] when the grid has more vertices
    /// than 32-bit indices can address.
    pub fn grid_patch(
        origin: Point3<Real>,
        width: Real,
        height: Real,
        cols: u32,
        rows: u32,
    ) -> Result<Cluster, MergeError> {
        let overflow = || MergeError::IndexOverflow { kind: AttributeKind::Position };
        let stride = cols.checked_add(1).ok_or_else(overflow)?;
        // index of the top-right corner, the largest one emitted
        let last = rows
            .checked_mul(stride)
            .and_then(|row_start| row_start.checked_add(cols))
            .ok_or_else(overflow)?;
        let index_count = (cols as usize)
            .checked_mul(rows as usize)
            .and_then(|quads| quads.checked_mul(6))
            .ok_or_else(overflow)?;

        let mut positions = Vec::with_capacity((last as usize).saturating_add(1));
        let mut uvs = Vec::with_capacity(positions.capacity());

        for j in 0..=rows {
            for i in 0..=cols {
                let u = if cols == 0 { 0.0 } else { i as Real / cols as Real };
                let v = if rows == 0 { 0.0 } else { j as Real / rows as Real };
                positions.push(origin + Vector3::new(u * width, v * height, 0.0));
                uvs.push(Vector2::new(u, v));
            }
        }

        let mut indices = Vec::with_capacity(index_count);
        for j in 0..rows {
            for i in 0..cols {
                let a = j * stride + i;
                let b = a + 1;
                let c = b + stride;
                let d = a + stride;
                indices.extend_from_slice(&[a, b, c, a, c, d]);
            }
        }

        Ok(Cluster::new(
            positions,
            vec![Vector3::z()],
            uvs,
            indices.clone(),
            vec![0; indices.len()],
            indices,
        ))
    }
}
