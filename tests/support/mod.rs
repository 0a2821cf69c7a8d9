//! Test support library
//! Provides various helper functions & utilities for tests.
#![allow(dead_code)]

use meshjoin::{Cluster, float_types::Real};
use nalgebra::{Point3, Vector2, Vector3};

/// Quick helper to compare floating-point results with an acceptable tolerance.
pub fn approx_eq(a: Real, b: Real, eps: Real) -> bool {
    (a - b).abs() < eps
}

/// Single-triangle cluster with the given corner positions, one shared +Z
/// normal and UVs taken from the XY coordinates.
pub fn triangle(corners: [[Real; 3]; 3]) -> Cluster {
    let positions: Vec<Point3<Real>> = corners
        .iter()
        .map(|c| Point3::new(c[0], c[1], c[2]))
        .collect();
    let uvs = positions.iter().map(|p| Vector2::new(p.x, p.y)).collect();
    Cluster::new(
        positions,
        vec![Vector3::z()],
        uvs,
        vec![0, 1, 2],
        vec![0, 0, 0],
        vec![0, 1, 2],
    )
}

/// Cluster with several triangles over a shared position array. Each corner
/// gets its own normal and UV slot.
pub fn triangles(positions: &[[Real; 3]], tris: &[[u32; 3]]) -> Cluster {
    let indices: Vec<u32> = tris.iter().flatten().copied().collect();
    let corners = indices.len() as u32;
    Cluster::new(
        positions.iter().map(|c| Point3::new(c[0], c[1], c[2])).collect(),
        (0..corners).map(|i| Vector3::new(0.0, 0.0, 1.0 + i as Real)).collect(),
        (0..corners).map(|i| Vector2::new(i as Real, 0.0)).collect(),
        indices,
        (0..corners).collect(),
        (0..corners).collect(),
    )
}

/// Corner positions of triangle `i` in a merged cluster, via its position indices.
pub fn resolved_triangle(cluster: &Cluster, i: usize) -> [Point3<Real>; 3] {
    cluster
        .position_triangle(i)
        .expect("triangle indices should resolve")
}
