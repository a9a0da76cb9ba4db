//! Debug visualization builders
//!
//! Wireframe and hull geometry for showing the capture region. Purely
//! observational; capture correctness never depends on these.

use super::{Aabb, MaterialId, MeshData};
use glam::Vec3;

/// Triangle index table closing the 8 frustum corners into a hull.
///
/// Assumes the corner ordering produced by
/// [`Camera::frustum_corners`](crate::camera::Camera::frustum_corners):
/// 4 near corners then 4 far corners, each wound bottom-left, top-left,
/// top-right, bottom-right.
pub const FRUSTUM_HULL_INDICES: [u32; 36] = [
    0, 1, 2, 0, 2, 3, // near face
    0, 3, 7, 0, 7, 4, // bottom-right edge side
    1, 5, 6, 1, 6, 2, // top side
    3, 2, 6, 3, 6, 7, // right side
    0, 4, 5, 0, 5, 1, // left side
    4, 6, 5, 4, 7, 6, // far face
];

/// Build a closed mesh over the 8 frustum corners.
pub fn frustum_hull(corners: &[Vec3; 8], material: MaterialId) -> MeshData {
    MeshData::new(corners.to_vec(), FRUSTUM_HULL_INDICES.to_vec(), material)
}

/// Build the 12 wireframe edges of an AABB as line segments.
pub fn wireframe_box(aabb: &Aabb) -> Vec<[Vec3; 2]> {
    let min = aabb.min;
    let max = aabb.max;

    // 8 corners of the box
    let corners = [
        Vec3::new(min.x, min.y, min.z), // 0: ---
        Vec3::new(max.x, min.y, min.z), // 1: +--
        Vec3::new(min.x, max.y, min.z), // 2: -+-
        Vec3::new(max.x, max.y, min.z), // 3: ++-
        Vec3::new(min.x, min.y, max.z), // 4: --+
        Vec3::new(max.x, min.y, max.z), // 5: +-+
        Vec3::new(min.x, max.y, max.z), // 6: -++
        Vec3::new(max.x, max.y, max.z), // 7: +++
    ];

    // 12 edges of the box
    let edges = [
        // Bottom face
        (0, 1),
        (1, 3),
        (3, 2),
        (2, 0),
        // Top face
        (4, 5),
        (5, 7),
        (7, 6),
        (6, 4),
        // Vertical edges
        (0, 4),
        (1, 5),
        (2, 6),
        (3, 7),
    ];

    edges
        .iter()
        .map(|&(i, j)| [corners[i], corners[j]])
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wireframe_has_twelve_edges() {
        let aabb = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0));
        let edges = wireframe_box(&aabb);
        assert_eq!(edges.len(), 12);

        // Every edge endpoint must be a corner of the box.
        for [a, b] in &edges {
            for p in [a, b] {
                assert!(p.x.abs() == 1.0 && p.y.abs() == 1.0 && p.z.abs() == 1.0);
            }
            assert_ne!(a, b);
        }
    }

    #[test]
    fn test_frustum_hull_closed() {
        let corners = Aabb::new(Vec3::splat(-1.0), Vec3::splat(1.0)).corners();
        let hull = frustum_hull(&corners, MaterialId::DEFAULT);
        assert_eq!(hull.positions.len(), 8);
        assert_eq!(hull.triangle_count(), 12);

        // All indices reference valid corners.
        assert!(hull.indices.iter().all(|&i| i < 8));
    }
}
