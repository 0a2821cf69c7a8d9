//! Tolerance-based **deduplication and merging of indexed triangle mesh clusters**.
//!
//! A [`Cluster`] is a mesh fragment with independent position, normal and UV
//! index streams. Two operations sit at the core:
//!
//! - [`adjacency::can_join_clusters`] decides whether two clusters share an
//!   edge (some pair of triangles with at least two coincident corners).
//! - [`merge::join_shared_clusters`] folds clusters into a running "total"
//!   cluster, unifying attribute values whose squared distance is within the
//!   tolerance and remapping every index stream onto the unified arrays.
//!
//! A small [`camera`] module provides a look-at camera with frustum culling
//! for the pipelines that consume merged clusters.
//!
//! # Features
//! #### Default
//! - **f64**: use f64 as Real
//! - **hashmap**: enables the hashbrown spatial hash dedup strategy
//!
//! #### Optional
//! - **f32**: use f32 as Real, this conflicts with f64
//! - **parallel**: use rayon for the pairwise adjacency search

#![forbid(unsafe_code)]
#![deny(unused)]
#![warn(clippy::missing_const_for_fn, clippy::approx_constant, clippy::all)]

pub mod aabb;
pub mod adjacency;
pub mod camera;
pub mod errors;
pub mod float_types;
pub mod merge;
pub mod mesh;
pub mod shapes;

#[cfg(any(all(feature = "f64", feature = "f32"), not(any(feature = "f64", feature = "f32"))))]
compile_error!("Either 'f64' or 'f32' feature must be specified, but not both");

pub use aabb::Aabb;
pub use adjacency::{can_join_clusters, find_adjacent_pairs};
pub use errors::{CameraError, MergeError};
pub use merge::{MergeOptions, MergeStats, join_shared_clusters};
pub use mesh::Cluster;
