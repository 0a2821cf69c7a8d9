//! The three vertex attribute streams a cluster carries.

use crate::float_types::Real;
use nalgebra::{Point3, Vector2, Vector3};
use std::fmt::{self, Debug, Display};

/// Which attribute stream a value or index belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AttributeKind {
    Position,
    Normal,
    Uv,
}

impl AttributeKind {
    /// Number of scalar components per element.
    pub const fn stride(self) -> usize {
        match self {
            AttributeKind::Position | AttributeKind::Normal => 3,
            AttributeKind::Uv => 2,
        }
    }
}

impl Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AttributeKind::Position => write!(f, "position"),
            AttributeKind::Normal => write!(f, "normal"),
            AttributeKind::Uv => write!(f, "uv"),
        }
    }
}

/// A single attribute value that can be compared under a squared-distance tolerance.
///
/// Positions, normals and UVs are deduplicated independently, each only
/// against values of its own kind.
pub trait Attribute: Copy + Debug + Send + Sync {
    const KIND: AttributeKind;
    /// Number of meaningful components (3 for positions/normals, 2 for UVs).
    const DIM: usize;

    fn distance_squared(&self, other: &Self) -> Real;

    /// Component along `axis`; `axis` must be below [`Self::DIM`].
    fn component(&self, axis: usize) -> Real;

    /// Build a value from exactly [`Self::DIM`] scalars.
    fn from_components(components: &[Real]) -> Self;

    /// `true` when the squared distance is at most `tolerance`.
    ///
    /// NaN components never match anything, themselves included.
    #[inline]
    fn matches(&self, other: &Self, tolerance: Real) -> bool {
        self.distance_squared(other) <= tolerance
    }
}

impl Attribute for Point3<Real> {
    const KIND: AttributeKind = AttributeKind::Position;
    const DIM: usize = 3;

    #[inline]
    fn distance_squared(&self, other: &Self) -> Real {
        nalgebra::distance_squared(self, other)
    }

    #[inline]
    fn component(&self, axis: usize) -> Real {
        self[axis]
    }

    fn from_components(components: &[Real]) -> Self {
        Point3::new(components[0], components[1], components[2])
    }
}

impl Attribute for Vector3<Real> {
    const KIND: AttributeKind = AttributeKind::Normal;
    const DIM: usize = 3;

    #[inline]
    fn distance_squared(&self, other: &Self) -> Real {
        (self - other).norm_squared()
    }

    #[inline]
    fn component(&self, axis: usize) -> Real {
        self[axis]
    }

    fn from_components(components: &[Real]) -> Self {
        Vector3::new(components[0], components[1], components[2])
    }
}

impl Attribute for Vector2<Real> {
    const KIND: AttributeKind = AttributeKind::Uv;
    const DIM: usize = 2;

    #[inline]
    fn distance_squared(&self, other: &Self) -> Real {
        (self - other).norm_squared()
    }

    #[inline]
    fn component(&self, axis: usize) -> Real {
        self[axis]
    }

    fn from_components(components: &[Real]) -> Self {
        Vector2::new(components[0], components[1])
    }
}
