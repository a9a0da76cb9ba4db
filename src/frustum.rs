//! View frustum planes and intersection tests
//!
//! Provides frustum extraction from view-projection matrices and
//! conservative intersection tests with axis-aligned bounding boxes.
//!
//! Sign convention: plane normals point into the frustum interior, so a
//! point `p` is on the interior side of a plane iff
//! `normal.dot(p) + distance >= 0`. Every test in this crate relies on
//! that convention.

use crate::camera::Camera;
use crate::geometry::Aabb;
use glam::{Mat4, Vec3, Vec4};

/// A plane in 3D space defined by the equation ax + by + cz + d = 0.
#[derive(Debug, Clone, Copy)]
pub struct Plane {
    /// Normal vector (a, b, c).
    pub normal: Vec3,
    /// Distance from origin (d).
    pub distance: f32,
}

impl Plane {
    /// Create a new plane from normal and distance.
    pub fn new(normal: Vec3, distance: f32) -> Self {
        Self { normal, distance }
    }

    /// Create a plane from a Vec4 (xyz = normal, w = distance).
    pub fn from_vec4(v: Vec4) -> Self {
        Self {
            normal: Vec3::new(v.x, v.y, v.z),
            distance: v.w,
        }
    }

    /// Create a plane through `point` with the given normal.
    pub fn from_point_normal(point: Vec3, normal: Vec3) -> Self {
        Self {
            normal,
            distance: -normal.dot(point),
        }
    }

    /// Normalize the plane equation so the normal has unit length.
    pub fn normalize(&self) -> Self {
        let len = self.normal.length();
        if len > 0.0 {
            Self {
                normal: self.normal / len,
                distance: self.distance / len,
            }
        } else {
            *self
        }
    }

    /// Get the signed distance from a point to the plane.
    /// Positive = interior side (same side as the normal).
    pub fn signed_distance(&self, point: Vec3) -> f32 {
        self.normal.dot(point) + self.distance
    }

    /// Re-express a world-space plane in the local frame of an object
    /// with the given local-to-world matrix.
    ///
    /// A plane transforms as a covector: for world plane `p` and local
    /// point `x`, `p . (M x) = (M^T p) . x`.
    pub fn to_local(&self, local_to_world: Mat4) -> Self {
        let world = Vec4::new(self.normal.x, self.normal.y, self.normal.z, self.distance);
        Self::from_vec4(local_to_world.transpose() * world).normalize()
    }
}

/// Result of a frustum intersection test.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intersection {
    /// Completely outside the frustum.
    Outside,
    /// Completely inside the frustum.
    Inside,
    /// Partially inside (intersecting a plane).
    Intersecting,
}

/// View frustum defined by 6 planes.
///
/// The planes are oriented so that their normals point inward, in the
/// order left, right, bottom, top, near, far.
#[derive(Debug, Clone, Copy)]
pub struct Frustum {
    /// Left, Right, Bottom, Top, Near, Far planes.
    pub planes: [Plane; 6],
}

impl Frustum {
    /// Extract frustum planes from a view-projection matrix.
    ///
    /// Uses the Gribb/Hartmann method on the matrix rows. The near and
    /// far rows assume glam's 0..1 clip-space depth
    /// (`Mat4::perspective_rh` / `Mat4::orthographic_rh`).
    pub fn from_view_projection(vp: Mat4) -> Self {
        let row0 = vp.row(0);
        let row1 = vp.row(1);
        let row2 = vp.row(2);
        let row3 = vp.row(3);

        let planes = [
            // Left:   w + x >= 0
            Plane::from_vec4(row3 + row0).normalize(),
            // Right:  w - x >= 0
            Plane::from_vec4(row3 - row0).normalize(),
            // Bottom: w + y >= 0
            Plane::from_vec4(row3 + row1).normalize(),
            // Top:    w - y >= 0
            Plane::from_vec4(row3 - row1).normalize(),
            // Near:   z >= 0 (0..1 depth range)
            Plane::from_vec4(row2).normalize(),
            // Far:    w - z >= 0
            Plane::from_vec4(row3 - row2).normalize(),
        ];

        Self { planes }
    }

    /// Build the frustum for a camera's current view and projection.
    pub fn from_camera(camera: &Camera) -> Self {
        Self::from_view_projection(camera.view_projection_matrix())
    }

    /// Test if a point is inside the frustum.
    pub fn contains_point(&self, point: Vec3) -> bool {
        self.planes
            .iter()
            .all(|plane| plane.signed_distance(point) >= 0.0)
    }

    /// Test if an AABB intersects or is inside the frustum.
    ///
    /// Conservative p-vertex/n-vertex test: a box is rejected only if
    /// it lies entirely on the exterior side of some plane. Boxes that
    /// merely straddle a frustum corner may be accepted even though the
    /// exact shapes do not intersect; callers rely on this being an
    /// over-approximation, never an under-approximation.
    pub fn test_aabb(&self, aabb: &Aabb) -> Intersection {
        let mut result = Intersection::Inside;

        for plane in &self.planes {
            // Find the positive and negative vertices relative to the plane normal
            let p_vertex = Vec3::new(
                if plane.normal.x >= 0.0 {
                    aabb.max.x
                } else {
                    aabb.min.x
                },
                if plane.normal.y >= 0.0 {
                    aabb.max.y
                } else {
                    aabb.min.y
                },
                if plane.normal.z >= 0.0 {
                    aabb.max.z
                } else {
                    aabb.min.z
                },
            );

            let n_vertex = Vec3::new(
                if plane.normal.x >= 0.0 {
                    aabb.min.x
                } else {
                    aabb.max.x
                },
                if plane.normal.y >= 0.0 {
                    aabb.min.y
                } else {
                    aabb.max.y
                },
                if plane.normal.z >= 0.0 {
                    aabb.min.z
                } else {
                    aabb.max.z
                },
            );

            // If the positive vertex is outside, the entire AABB is outside
            if plane.signed_distance(p_vertex) < 0.0 {
                return Intersection::Outside;
            }

            // If the negative vertex is outside, we're intersecting
            if plane.signed_distance(n_vertex) < 0.0 {
                result = Intersection::Intersecting;
            }
        }

        result
    }

    /// Test if an AABB is at least partially inside the frustum.
    pub fn contains_aabb(&self, aabb: &Aabb) -> bool {
        self.test_aabb(aabb) != Intersection::Outside
    }
}
