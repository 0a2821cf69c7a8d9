use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// Axis-aligned bounding box over model-space positions.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Aabb {
    pub mins: Point3<Real>,
    pub maxs: Point3<Real>,
}

impl Aabb {
    #[inline]
    pub const fn new(mins: Point3<Real>, maxs: Point3<Real>) -> Self {
        Self { mins, maxs }
    }

    /// Smallest box containing every point, or `None` for an empty slice.
    pub fn from_points(points: &[Point3<Real>]) -> Option<Self> {
        let (first, rest) = points.split_first()?;
        let (mins, maxs) = rest.iter().fold((*first, *first), |(mins, maxs), p| {
            (mins.inf(p), maxs.sup(p))
        });
        Some(Self { mins, maxs })
    }

    #[inline]
    pub fn intersects(&self, other: &Self) -> bool {
        self.maxs.x >= other.mins.x
            && self.mins.x <= other.maxs.x
            && self.maxs.y >= other.mins.y
            && self.mins.y <= other.maxs.y
            && self.maxs.z >= other.mins.z
            && self.mins.z <= other.maxs.z
    }

    #[inline]
    pub fn contains(&self, p: &Point3<Real>) -> bool {
        p.x >= self.mins.x
            && p.x <= self.maxs.x
            && p.y >= self.mins.y
            && p.y <= self.maxs.y
            && p.z >= self.mins.z
            && p.z <= self.maxs.z
    }

    #[inline]
    pub fn center(&self) -> Point3<Real> {
        nalgebra::center(&self.mins, &self.maxs)
    }

    /// Edge lengths along x, y and z.
    #[inline]
    pub fn extents(&self) -> Vector3<Real> {
        self.maxs - self.mins
    }

    #[inline]
    pub fn largest_dimension(&self) -> Real {
        self.extents().max()
    }

    /// Grow the box by `margin` on every side.
    pub fn expanded(&self, margin: Real) -> Self {
        let m = Vector3::repeat(margin);
        Self {
            mins: self.mins - m,
            maxs: self.maxs + m,
        }
    }
}
