//! CPU mesh data
//!
//! Provides the mesh representation consumed by the clipper. Meshes
//! live entirely on the CPU; uploading them to a GPU is the host
//! engine's job.

use super::Aabb;
use glam::{Mat4, Vec3};

/// Identifier of a material slot owned by the host engine.
///
/// The core never interprets materials; it only tags faces so the host
/// can render cut cross-sections differently from original surfaces.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MaterialId(pub u32);

impl MaterialId {
    pub const DEFAULT: MaterialId = MaterialId(0);
}

/// Triangle mesh with one material id per face.
#[derive(Debug, Clone)]
pub struct MeshData {
    /// Vertex positions in local space.
    pub positions: Vec<Vec3>,
    /// Triangle index list, three indices per face.
    pub indices: Vec<u32>,
    /// One material id per triangle (`indices.len() / 3` entries).
    pub materials: Vec<MaterialId>,
}

impl MeshData {
    /// Create a mesh with a uniform material on every face.
    pub fn new(positions: Vec<Vec3>, indices: Vec<u32>, material: MaterialId) -> Self {
        let materials = vec![material; indices.len() / 3];
        Self {
            positions,
            indices,
            materials,
        }
    }

    /// Create an empty mesh.
    pub fn empty() -> Self {
        Self {
            positions: Vec::new(),
            indices: Vec::new(),
            materials: Vec::new(),
        }
    }

    /// Create an axis-aligned cube centered at the origin.
    pub fn cube(size: f32, material: MaterialId) -> Self {
        let half = size / 2.0;
        let positions = vec![
            Vec3::new(-half, -half, -half),
            Vec3::new(half, -half, -half),
            Vec3::new(half, half, -half),
            Vec3::new(-half, half, -half),
            Vec3::new(-half, -half, half),
            Vec3::new(half, -half, half),
            Vec3::new(half, half, half),
            Vec3::new(-half, half, half),
        ];
        // 12 triangles, outward winding
        let indices = vec![
            0, 2, 1, 0, 3, 2, // -Z
            4, 5, 6, 4, 6, 7, // +Z
            0, 1, 5, 0, 5, 4, // -Y
            3, 6, 2, 3, 7, 6, // +Y
            1, 2, 6, 1, 6, 5, // +X
            0, 4, 7, 0, 7, 3, // -X
        ];
        Self::new(positions, indices, material)
    }

    /// Number of triangles.
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Whether the mesh carries no renderable faces.
    pub fn is_empty(&self) -> bool {
        self.indices.is_empty()
    }

    /// Local-space bounding box over all vertex positions.
    pub fn aabb(&self) -> Aabb {
        Aabb::from_points(self.positions.iter().copied())
    }

    /// Return a copy with all positions transformed by `matrix`.
    pub fn transformed(&self, matrix: Mat4) -> Self {
        Self {
            positions: self
                .positions
                .iter()
                .map(|p| matrix.transform_point3(*p))
                .collect(),
            indices: self.indices.clone(),
            materials: self.materials.clone(),
        }
    }

    /// Iterate over triangles as index triples.
    pub fn triangles(&self) -> impl Iterator<Item = [u32; 3]> + '_ {
        self.indices.chunks_exact(3).map(|t| [t[0], t[1], t[2]])
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cube_shape() {
        let cube = MeshData::cube(2.0, MaterialId::DEFAULT);
        assert_eq!(cube.positions.len(), 8);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.materials.len(), 12);

        let aabb = cube.aabb();
        assert_eq!(aabb.min, Vec3::splat(-1.0));
        assert_eq!(aabb.max, Vec3::splat(1.0));
    }

    #[test]
    fn test_empty_mesh() {
        let mesh = MeshData::empty();
        assert!(mesh.is_empty());
        assert_eq!(mesh.triangle_count(), 0);
    }

    #[test]
    fn test_transformed_moves_aabb() {
        let cube = MeshData::cube(2.0, MaterialId::DEFAULT);
        let moved = cube.transformed(Mat4::from_translation(Vec3::new(3.0, 0.0, 0.0)));
        let aabb = moved.aabb();
        assert_eq!(aabb.center(), Vec3::new(3.0, 0.0, 0.0));
        assert_eq!(aabb.size(), Vec3::splat(2.0));
    }
}
