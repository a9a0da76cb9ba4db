//! Camera and projection
//!
//! Provides the camera type the capture pipeline reads. The camera is
//! owned by the host scene; this core only derives matrices and frustum
//! corners from it.

use glam::{Mat4, Quat, Vec3};

/// Projection mode for a camera.
#[derive(Debug, Clone, Copy)]
pub enum Projection {
    /// Perspective projection.
    Perspective {
        /// Vertical field of view in radians.
        fov: f32,
        /// Aspect ratio (width / height).
        aspect: f32,
        /// Near clipping plane.
        near: f32,
        /// Far clipping plane.
        far: f32,
    },
    /// Orthographic projection.
    Orthographic {
        /// Width of the view.
        width: f32,
        /// Height of the view.
        height: f32,
        /// Near clipping plane.
        near: f32,
        /// Far clipping plane.
        far: f32,
    },
}

impl Projection {
    /// Create a perspective projection.
    pub fn perspective(fov_degrees: f32, aspect: f32, near: f32, far: f32) -> Self {
        Self::Perspective {
            fov: fov_degrees.to_radians(),
            aspect,
            near,
            far,
        }
    }

    /// Create an orthographic projection.
    pub fn orthographic(width: f32, height: f32, near: f32, far: f32) -> Self {
        Self::Orthographic {
            width,
            height,
            near,
            far,
        }
    }

    /// Get the projection matrix (0..1 clip-space depth).
    pub fn matrix(&self) -> Mat4 {
        match *self {
            Projection::Perspective {
                fov,
                aspect,
                near,
                far,
            } => Mat4::perspective_rh(fov, aspect, near, far),
            Projection::Orthographic {
                width,
                height,
                near,
                far,
            } => Mat4::orthographic_rh(
                -width / 2.0,
                width / 2.0,
                -height / 2.0,
                height / 2.0,
                near,
                far,
            ),
        }
    }

    /// Get the near and far clip distances.
    pub fn clip_range(&self) -> (f32, f32) {
        match *self {
            Projection::Perspective { near, far, .. } => (near, far),
            Projection::Orthographic { near, far, .. } => (near, far),
        }
    }

    /// Half-width and half-height of the clip rectangle at `distance`
    /// in front of the camera.
    fn clip_rect_half_extents(&self, distance: f32) -> (f32, f32) {
        match *self {
            Projection::Perspective { fov, aspect, .. } => {
                let half_h = (fov * 0.5).tan() * distance;
                (half_h * aspect, half_h)
            }
            Projection::Orthographic { width, height, .. } => (width / 2.0, height / 2.0),
        }
    }
}

/// A 3D camera.
#[derive(Debug, Clone)]
pub struct Camera {
    /// Camera position.
    pub position: Vec3,
    /// Point the camera is looking at.
    pub target: Vec3,
    /// Up vector.
    pub up: Vec3,
    /// Projection mode.
    pub projection: Projection,
}

impl Camera {
    /// Create a new perspective camera.
    pub fn new_perspective(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        fov_degrees: f32,
        aspect: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            projection: Projection::perspective(fov_degrees, aspect, near, far),
        }
    }

    /// Create a new orthographic camera.
    pub fn new_orthographic(
        position: Vec3,
        target: Vec3,
        up: Vec3,
        width: f32,
        height: f32,
        near: f32,
        far: f32,
    ) -> Self {
        Self {
            position,
            target,
            up,
            projection: Projection::orthographic(width, height, near, far),
        }
    }

    /// Get the forward direction (from camera to target).
    pub fn forward(&self) -> Vec3 {
        (self.target - self.position).normalize()
    }

    /// Get the right direction.
    pub fn right(&self) -> Vec3 {
        self.forward().cross(self.up).normalize()
    }

    /// Get the view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// Get the projection matrix.
    pub fn projection_matrix(&self) -> Mat4 {
        self.projection.matrix()
    }

    /// Get the combined view-projection matrix.
    pub fn view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Get the camera's world pose as position + rotation.
    pub fn pose(&self) -> (Vec3, Quat) {
        let (_, rotation, position) = self
            .view_matrix()
            .inverse()
            .to_scale_rotation_translation();
        (position, rotation)
    }

    /// Point the camera from `position` along the forward axis of
    /// `rotation` (local -Z, glam's view convention).
    pub fn set_pose(&mut self, position: Vec3, rotation: Quat) {
        self.position = position;
        self.target = position + rotation * Vec3::NEG_Z;
    }

    /// Compute the 8 world-space corners of the view frustum.
    ///
    /// Returns the 4 near-plane corners followed by the 4 far-plane
    /// corners, each set wound bottom-left, top-left, top-right,
    /// bottom-right. Corner `i` on the near plane and corner `i + 4` on
    /// the far plane are the two ends of the same lateral frustum edge;
    /// [`FRUSTUM_HULL_INDICES`](crate::geometry::FRUSTUM_HULL_INDICES)
    /// depends on this ordering.
    pub fn frustum_corners(&self) -> [Vec3; 8] {
        let forward = self.forward();
        let right = forward.cross(self.up).normalize();
        let up = right.cross(forward).normalize();

        let (near, far) = self.projection.clip_range();

        let mut corners = [Vec3::ZERO; 8];
        for (set, distance) in [near, far].into_iter().enumerate() {
            let (half_w, half_h) = self.projection.clip_rect_half_extents(distance);
            let center = self.position + forward * distance;

            corners[set * 4] = center - right * half_w - up * half_h;
            corners[set * 4 + 1] = center - right * half_w + up * half_h;
            corners[set * 4 + 2] = center + right * half_w + up * half_h;
            corners[set * 4 + 3] = center + right * half_w - up * half_h;
        }
        corners
    }
}
