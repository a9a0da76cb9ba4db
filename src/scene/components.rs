//! Scene components
//!
//! Component structs attached to scene entities.

use crate::geometry::MeshData;
use glam::{Mat4, Quat, Vec3};

/// Local-space transform. Stores position, rotation, and scale separately.
#[derive(Debug, Clone, Copy)]
pub struct Transform {
    pub position: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Transform {
    /// Create an identity transform.
    pub fn identity() -> Self {
        Self {
            position: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position.
    pub fn from_position(position: Vec3) -> Self {
        Self {
            position,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }

    /// Create a transform from a position and rotation.
    pub fn from_position_rotation(position: Vec3, rotation: Quat) -> Self {
        Self {
            position,
            rotation,
            scale: Vec3::ONE,
        }
    }

    /// Convert to a 4x4 matrix (translation * rotation * scale).
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.position)
    }

    /// Decompose a 4x4 matrix into a Transform.
    ///
    /// Note: This assumes the matrix represents a valid affine transform
    /// (no shear). Non-uniform scale with rotation may lose precision.
    pub fn from_matrix(mat: Mat4) -> Self {
        let (scale, rotation, position) = mat.to_scale_rotation_translation();
        Self {
            position,
            rotation,
            scale,
        }
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::identity()
    }
}

/// Reference to a parent entity.
pub struct Parent(pub hecs::Entity);

/// List of child entities.
pub struct Children(pub Vec<hecs::Entity>);

/// Display name of a scene entity.
#[derive(Debug, Clone)]
pub struct Name(pub String);

/// Scene layer an entity belongs to, as a single mask bit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layer(pub u32);

impl Layer {
    /// Ordinary capturable scenery.
    pub const DEFAULT: Layer = Layer(1 << 0);
    /// The player and its camera rig; excluded to avoid self-capture.
    pub const PLAYER: Layer = Layer(1 << 1);
    /// Debug visualization overlays; excluded to avoid recapturing them.
    pub const DEBUG: Layer = Layer(1 << 2);
}

impl Default for Layer {
    fn default() -> Self {
        Layer::DEFAULT
    }
}

/// Set of layers, used to exclude entities from spatial queries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const NONE: LayerMask = LayerMask(0);

    /// Mask containing the given layers.
    pub fn of(layers: &[Layer]) -> Self {
        Self(layers.iter().fold(0, |bits, layer| bits | layer.0))
    }

    /// Whether the mask contains the layer.
    pub fn contains(&self, layer: Layer) -> bool {
        self.0 & layer.0 != 0
    }
}

/// Mesh geometry carried by a scene entity.
#[derive(Debug, Clone)]
pub struct MeshComponent(pub MeshData);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_identity() {
        let t = Transform::identity();
        assert_eq!(t.position, Vec3::ZERO);
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::ONE);
        assert_eq!(t.to_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn test_to_matrix_roundtrip() {
        let original = Transform {
            position: Vec3::new(1.0, 2.0, 3.0),
            rotation: Quat::from_rotation_y(std::f32::consts::FRAC_PI_4),
            scale: Vec3::new(2.0, 1.5, 0.5),
        };

        let mat = original.to_matrix();
        let recovered = Transform::from_matrix(mat);

        let eps = 1e-5;
        assert!((original.position - recovered.position).length() < eps);
        // Quaternion can be negated and still represent the same rotation
        let dot = original.rotation.dot(recovered.rotation).abs();
        assert!((dot - 1.0).abs() < eps);
        assert!((original.scale - recovered.scale).length() < eps);
    }

    #[test]
    fn test_layer_mask() {
        let mask = LayerMask::of(&[Layer::PLAYER, Layer::DEBUG]);
        assert!(mask.contains(Layer::PLAYER));
        assert!(mask.contains(Layer::DEBUG));
        assert!(!mask.contains(Layer::DEFAULT));
        assert!(!LayerMask::NONE.contains(Layer::PLAYER));
    }
}
