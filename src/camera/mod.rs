//! A look-at camera with perspective or orthographic projection and a derived
//! culling frustum.

use crate::aabb::Aabb;
use crate::errors::CameraError;
use crate::float_types::Real;
use nalgebra::{Isometry3, Matrix4, Orthographic3, Perspective3, Point3, Vector3};

pub mod frustum;

pub use frustum::{Frustum, FrustumPlane, FrustumSide};

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    /// `fov_y` in radians, `aspect` is width over height.
    Perspective { fov_y: Real, aspect: Real },
    /// View volume of `width` × `height` world units.
    Orthographic { width: Real, height: Real },
}

impl Projection {
    /// Half width and half height of the view rectangle at `depth`.
    fn half_extents(&self, depth: Real) -> (Real, Real) {
        match *self {
            Projection::Perspective { fov_y, aspect } => {
                let half_height = (fov_y * 0.5).tan() * depth;
                (half_height * aspect, half_height)
            },
            Projection::Orthographic { width, height } => (width * 0.5, height * 0.5),
        }
    }

    fn validate(&self, near: Real) -> Result<(), CameraError> {
        match *self {
            Projection::Perspective { fov_y, aspect } => {
                if !(fov_y > 0.0 && fov_y < crate::float_types::PI) {
                    return Err(CameraError::InvalidProjection(format!(
                        "vertical field of view {fov_y} must lie in (0, π)"
                    )));
                }
                if !(aspect > Real::EPSILON && aspect.is_finite()) {
                    return Err(CameraError::InvalidProjection(format!(
                        "aspect ratio {aspect} must be positive"
                    )));
                }
                if near <= 0.0 {
                    return Err(CameraError::InvalidProjection(format!(
                        "perspective near plane {near} must be positive"
                    )));
                }
            },
            Projection::Orthographic { width, height } => {
                if !(width > Real::EPSILON
                    && height > Real::EPSILON
                    && width.is_finite()
                    && height.is_finite())
                {
                    return Err(CameraError::InvalidProjection(format!(
                        "orthographic extent {width}×{height} must be positive"
                    )));
                }
            },
        }
        Ok(())
    }

    fn matrix(&self, near: Real, far: Real) -> Matrix4<Real> {
        match *self {
            Projection::Perspective { fov_y, aspect } => {
                Perspective3::new(aspect, fov_y, near, far).to_homogeneous()
            },
            Projection::Orthographic { width, height } => Orthographic3::new(
                -width * 0.5,
                width * 0.5,
                -height * 0.5,
                height * 0.5,
                near,
                far,
            )
            .to_homogeneous(),
        }
    }
}

/// Camera parameters plus the matrices and frustum derived from them.
///
/// The public fields may be edited freely; call [`Camera::update`] afterwards
/// to refresh the derived state.
#[derive(Debug, Clone, PartialEq)]
pub struct Camera {
    pub position: Point3<Real>,
    pub target: Point3<Real>,
    pub up: Vector3<Real>,
    pub near: Real,
    pub far: Real,
    pub projection: Projection,
    view: Matrix4<Real>,
    projection_matrix: Matrix4<Real>,
    frustum: Frustum,
}

impl Camera {
    pub fn new(
        position: Point3<Real>,
        target: Point3<Real>,
        up: Vector3<Real>,
        near: Real,
        far: Real,
        projection: Projection,
    ) -> Result<Self, CameraError> {
        let (view, projection_matrix, frustum) =
            derive(&position, &target, &up, near, far, &projection)?;
        Ok(Camera {
            position,
            target,
            up,
            near,
            far,
            projection,
            view,
            projection_matrix,
            frustum,
        })
    }

    /// Recompute the view and projection matrices and the frustum planes.
    /// On error the previously derived state is kept.
    pub fn update(&mut self) -> Result<(), CameraError> {
        let (view, projection_matrix, frustum) = derive(
            &self.position,
            &self.target,
            &self.up,
            self.near,
            self.far,
            &self.projection,
        )?;
        self.view = view;
        self.projection_matrix = projection_matrix;
        self.frustum = frustum;
        Ok(())
    }

    pub const fn view_matrix(&self) -> &Matrix4<Real> {
        &self.view
    }

    pub const fn projection_matrix(&self) -> &Matrix4<Real> {
        &self.projection_matrix
    }

    pub fn view_projection(&self) -> Matrix4<Real> {
        self.projection_matrix * self.view
    }

    pub const fn frustum(&self) -> &Frustum {
        &self.frustum
    }

    pub fn is_point_in_frustum(&self, p: &Point3<Real>) -> bool {
        self.frustum.contains_point(p)
    }

    pub fn is_sphere_in_frustum(&self, center: &Point3<Real>, radius: Real) -> bool {
        self.frustum.intersects_sphere(center, radius)
    }

    /// Approximate visibility test for an axis-aligned box. The box is
    /// replaced by a sphere at its center with radius half its largest edge,
    /// which is smaller than the box's bounding sphere: boxes near frustum
    /// corners may be reported visible, and a box whose corner crosses a
    /// plane while its sphere stays outside is culled.
    pub fn is_box_in_frustum(&self, aabb: &Aabb) -> bool {
        self.frustum.intersects_aabb(aabb)
    }
}

fn derive(
    position: &Point3<Real>,
    target: &Point3<Real>,
    up: &Vector3<Real>,
    near: Real,
    far: Real,
    projection: &Projection,
) -> Result<(Matrix4<Real>, Matrix4<Real>, Frustum), CameraError> {
    // nalgebra's projection constructors assert a clip depth above EPSILON
    if !(far > near) || far - near <= Real::EPSILON {
        return Err(CameraError::InvalidClipRange { near, far });
    }
    projection.validate(near)?;

    let forward = target - position;
    let right = forward.cross(up);
    if forward.norm_squared() < Real::EPSILON || right.norm_squared() < Real::EPSILON {
        return Err(CameraError::DegenerateView);
    }
    let forward = forward.normalize();
    let right = right.normalize();
    let true_up = right.cross(&forward);

    let rect = |depth: Real| {
        let center = position + forward * depth;
        let (half_w, half_h) = projection.half_extents(depth);
        let (dx, dy) = (right * half_w, true_up * half_h);
        [
            center - dx + dy,
            center + dx + dy,
            center + dx - dy,
            center - dx - dy,
        ]
    };
    let frustum = Frustum::from_corners(rect(near), rect(far)).ok_or(CameraError::DegenerateView)?;

    let view = Isometry3::look_at_rh(position, target, up).to_homogeneous();
    Ok((view, projection.matrix(near, far), frustum))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn perspective() -> Camera {
        Camera::new(
            Point3::new(0.0, 0.0, 5.0),
            Point3::origin(),
            Vector3::y(),
            0.1,
            100.0,
            Projection::Perspective {
                fov_y: crate::float_types::FRAC_PI_2 * 2.0 / 3.0,
                aspect: 16.0 / 9.0,
            },
        )
        .expect("valid camera")
    }

    #[test]
    fn view_matrix_moves_target_onto_negative_z() {
        let camera = perspective();
        let target = camera.view_matrix().transform_point(&Point3::origin());
        assert!((target - Point3::new(0.0, 0.0, -5.0)).norm() < Real::EPSILON.sqrt());
    }

    #[test]
    fn rejects_bad_parameters() {
        let mut camera = perspective();
        camera.far = 0.05;
        assert_eq!(
            camera.update(),
            Err(CameraError::InvalidClipRange { near: 0.1, far: 0.05 })
        );

        let mut camera = perspective();
        camera.target = camera.position;
        assert_eq!(camera.update(), Err(CameraError::DegenerateView));

        let mut camera = perspective();
        camera.up = Vector3::z();
        assert_eq!(camera.update(), Err(CameraError::DegenerateView));

        let mut camera = perspective();
        camera.projection = Projection::Orthographic { width: 0.0, height: 1.0 };
        assert!(matches!(camera.update(), Err(CameraError::InvalidProjection(_))));
    }

    #[test]
    fn clip_range_within_epsilon_is_rejected() {
        let near = 1.0;
        let far = 1.0 + Real::EPSILON;
        let result = Camera::new(
            Point3::new(0.0, 0.0, 10.0),
            Point3::origin(),
            Vector3::y(),
            near,
            far,
            Projection::Perspective { fov_y: 2.5, aspect: 8.0 },
        );
        assert_eq!(result, Err(CameraError::InvalidClipRange { near, far }));

        let result = Camera::new(
            Point3::new(0.0, 0.0, 10.0),
            Point3::origin(),
            Vector3::y(),
            near,
            far,
            Projection::Orthographic { width: 2.0, height: 2.0 },
        );
        assert_eq!(result, Err(CameraError::InvalidClipRange { near, far }));
    }

    #[test]
    fn tiny_projection_extents_are_rejected() {
        let mut camera = perspective();
        camera.projection = Projection::Orthographic { width: 2.0, height: Real::EPSILON };
        assert!(matches!(camera.update(), Err(CameraError::InvalidProjection(_))));

        let mut camera = perspective();
        camera.projection = Projection::Perspective { fov_y: 1.0, aspect: Real::EPSILON * 0.5 };
        assert!(matches!(camera.update(), Err(CameraError::InvalidProjection(_))));
    }

    #[test]
    fn failed_update_keeps_previous_frustum() {
        let mut camera = perspective();
        let before = *camera.frustum();
        camera.near = 200.0;
        assert!(camera.update().is_err());
        assert_eq!(*camera.frustum(), before);
    }

    #[test]
    fn near_plane_sits_at_near_distance() {
        let camera = perspective();
        let near = camera.frustum().plane(FrustumSide::Near);
        let far = camera.frustum().plane(FrustumSide::Far);
        let eps = Real::EPSILON.sqrt();
        assert!((near.signed_distance(&Point3::new(0.0, 0.0, 4.9))).abs() < eps);
        assert!((far.signed_distance(&Point3::new(0.0, 0.0, -95.0))).abs() < eps);
        assert!(near.signed_distance(&Point3::origin()) > 0.0);
    }
}
