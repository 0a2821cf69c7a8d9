//! Six-plane view frustum and approximate culling tests.

use crate::aabb::Aabb;
use crate::float_types::Real;
use nalgebra::{Point3, Vector3};

/// An oriented plane: `normal · p + offset ≥ 0` on the inside.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrustumPlane {
    /// Unit normal, pointing into the frustum
    pub normal: Vector3<Real>,
    pub offset: Real,
}

impl FrustumPlane {
    /// Plane through three points, normal following the right-hand rule
    /// `(b - a) × (c - a)`. `None` if the points are collinear.
    pub fn from_points(a: Point3<Real>, b: Point3<Real>, c: Point3<Real>) -> Option<Self> {
        let normal = (b - a).cross(&(c - a));
        if normal.norm_squared() < Real::EPSILON * Real::EPSILON {
            return None;
        }
        let normal = normal.normalize();
        Some(FrustumPlane {
            normal,
            offset: -normal.dot(&a.coords),
        })
    }

    #[inline]
    pub fn signed_distance(&self, p: &Point3<Real>) -> Real {
        self.normal.dot(&p.coords) + self.offset
    }

    /// Flip the plane so that `inside` lies on its positive side.
    fn facing(self, inside: &Point3<Real>) -> Self {
        if self.signed_distance(inside) < 0.0 {
            FrustumPlane {
                normal: -self.normal,
                offset: -self.offset,
            }
        } else {
            self
        }
    }
}

/// Index of each plane within [`Frustum::planes`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrustumSide {
    Near = 0,
    Far = 1,
    Left = 2,
    Right = 3,
    Top = 4,
    Bottom = 5,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Frustum {
    /// Near, far, left, right, top, bottom
    pub planes: [FrustumPlane; 6],
}

impl Frustum {
    /// Build the frustum from the corners of its near and far rectangles, each
    /// given as `[top_left, top_right, bottom_right, bottom_left]`.
    pub fn from_corners(near: [Point3<Real>; 4], far: [Point3<Real>; 4]) -> Option<Self> {
        let [ntl, ntr, nbr, nbl] = near;
        let [ftl, ftr, fbr, fbl] = far;

        let inside = Point3::from(
            near.iter().chain(far.iter()).fold(Vector3::zeros(), |acc, p| acc + p.coords) / 8.0,
        );
        let plane = |a, b, c| FrustumPlane::from_points(a, b, c).map(|p| p.facing(&inside));

        Some(Frustum {
            planes: [
                plane(ntl, ntr, nbr)?,
                plane(ftl, ftr, fbr)?,
                plane(ntl, nbl, fbl)?,
                plane(ntr, ftr, fbr)?,
                plane(ntl, ftl, ftr)?,
                plane(nbl, nbr, fbr)?,
            ],
        })
    }

    #[inline]
    pub const fn plane(&self, side: FrustumSide) -> &FrustumPlane {
        &self.planes[side as usize]
    }

    pub fn contains_point(&self, p: &Point3<Real>) -> bool {
        self.planes.iter().all(|plane| plane.signed_distance(p) >= 0.0)
    }

    /// `false` only if the sphere lies entirely outside some plane.
    pub fn intersects_sphere(&self, center: &Point3<Real>, radius: Real) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(center) >= -radius)
    }

    /// Tests a sphere at the box center with radius half the largest edge.
    ///
    /// This is an approximation in both directions. Boxes near a frustum
    /// corner may be reported as visible, and since the sphere does not reach
    /// the box corners, a box with only a corner inside a slanted plane can
    /// be culled.
    pub fn intersects_aabb(&self, aabb: &Aabb) -> bool {
        self.intersects_sphere(&aabb.center(), aabb.largest_dimension() * 0.5)
    }
}

#[cfg(test)]
mod test {
    use super::*;

    fn unit_box_frustum() -> Frustum {
        let rect = |z: Real| {
            [
                Point3::new(-1.0, 1.0, z),
                Point3::new(1.0, 1.0, z),
                Point3::new(1.0, -1.0, z),
                Point3::new(-1.0, -1.0, z),
            ]
        };
        Frustum::from_corners(rect(-1.0), rect(-3.0)).expect("non-degenerate")
    }

    #[test]
    fn planes_face_inward() {
        let frustum = unit_box_frustum();
        let center = Point3::new(0.0, 0.0, -2.0);
        let eps = Real::EPSILON.sqrt();
        for plane in &frustum.planes {
            assert!((plane.normal.norm() - 1.0).abs() < eps);
            assert!((plane.signed_distance(&center) - 1.0).abs() < eps);
        }
        assert_eq!(frustum.plane(FrustumSide::Near).normal, Vector3::new(0.0, 0.0, -1.0));
        assert_eq!(frustum.plane(FrustumSide::Left).normal, Vector3::new(1.0, 0.0, 0.0));
    }

    #[test]
    fn sphere_and_point_tests() {
        let frustum = unit_box_frustum();
        assert!(frustum.contains_point(&Point3::new(0.5, 0.5, -2.5)));
        assert!(!frustum.contains_point(&Point3::new(0.0, 0.0, 0.0)));
        // straddles the near plane
        assert!(frustum.intersects_sphere(&Point3::new(0.0, 0.0, -0.5), 0.6));
        assert!(!frustum.intersects_sphere(&Point3::new(0.0, 0.0, -0.5), 0.4));
    }

    #[test]
    fn box_with_a_corner_inside_a_slanted_plane_can_be_culled() {
        // 90 degree pyramid, the right plane is x = -z
        let rect = |z: Real| {
            let h = -z;
            [
                Point3::new(-h, h, z),
                Point3::new(h, h, z),
                Point3::new(h, -h, z),
                Point3::new(-h, -h, z),
            ]
        };
        let frustum = Frustum::from_corners(rect(-1.0), rect(-3.0)).expect("non-degenerate");
        let aabb = Aabb::new(Point3::new(2.35, -0.5, -2.5), Point3::new(3.35, 0.5, -1.5));

        assert!(frustum.contains_point(&Point3::new(2.35, 0.0, -2.5)));
        assert!(!frustum.intersects_aabb(&aabb));
    }

    #[test]
    fn collinear_corners_are_rejected() {
        let p = Point3::origin();
        assert!(FrustumPlane::from_points(p, p, Point3::new(1.0, 0.0, 0.0)).is_none());
    }
}
