//! Scene management
//!
//! Wraps a `hecs::World` with the scene-graph services the capture
//! pipeline relies on: spawning, a box broad-phase query with layer
//! exclusion, object duplication, and world-preserving reparenting.

pub mod components;

pub use components::{Children, Layer, LayerMask, MeshComponent, Name, Parent, Transform};

use crate::geometry::{Aabb, MeshData};
use glam::{Mat4, Quat, Vec3};

/// A scene object produced by the broad-phase query: an entity
/// reference plus its world-space bounds.
#[derive(Debug, Clone, Copy)]
pub struct Candidate {
    pub entity: hecs::Entity,
    pub bounds: Aabb,
}

/// Scene holding all entities.
#[derive(Default)]
pub struct Scene {
    pub world: hecs::World,
}

impl Scene {
    /// Create an empty scene.
    pub fn new() -> Self {
        Self {
            world: hecs::World::new(),
        }
    }

    /// Spawn a mesh-carrying object.
    pub fn spawn_object(
        &mut self,
        name: &str,
        transform: Transform,
        layer: Layer,
        mesh: MeshData,
    ) -> hecs::Entity {
        self.world.spawn((
            Name(name.to_string()),
            transform,
            layer,
            MeshComponent(mesh),
        ))
    }

    /// Spawn an empty transform node (e.g. a capture container).
    pub fn spawn_empty(&mut self, name: &str, transform: Transform) -> hecs::Entity {
        self.world.spawn((Name(name.to_string()), transform))
    }

    /// Remove an entity from the scene.
    pub fn despawn(&mut self, entity: hecs::Entity) {
        if let Ok(Parent(old)) = self.world.remove_one::<Parent>(entity) {
            self.forget_child(old, entity);
        }
        let _ = self.world.despawn(entity);
    }

    /// Whether the entity is still alive.
    pub fn contains(&self, entity: hecs::Entity) -> bool {
        self.world.contains(entity)
    }

    /// World-space transform matrix, walking the `Parent` chain.
    pub fn world_matrix(&self, entity: hecs::Entity) -> Mat4 {
        let local = self
            .world
            .get::<&Transform>(entity)
            .map(|t| t.to_matrix())
            .unwrap_or(Mat4::IDENTITY);

        match self.world.get::<&Parent>(entity) {
            Ok(parent) => self.world_matrix(parent.0) * local,
            Err(_) => local,
        }
    }

    /// World-space position and rotation.
    pub fn world_pose(&self, entity: hecs::Entity) -> (Vec3, Quat) {
        let (_, rotation, position) = self.world_matrix(entity).to_scale_rotation_translation();
        (position, rotation)
    }

    /// World-space bounding box of an entity's mesh, if it has one.
    pub fn world_aabb(&self, entity: hecs::Entity) -> Option<Aabb> {
        let mesh = self.world.get::<&MeshComponent>(entity).ok()?;
        Some(mesh.0.aabb().transformed(self.world_matrix(entity)))
    }

    /// Broad-phase query: all mesh-carrying entities whose world bounds
    /// overlap `region`, excluding entities on the given layers.
    ///
    /// This is a coarse AABB overlap pass; callers needing the exact
    /// capture region must re-test against the frustum planes.
    pub fn query_box(&self, region: &Aabb, exclude: LayerMask) -> Vec<Candidate> {
        let mut candidates = Vec::new();

        for (entity, (mesh, layer)) in self
            .world
            .query::<(&MeshComponent, Option<&Layer>)>()
            .iter()
        {
            let layer = layer.copied().unwrap_or_default();
            if exclude.contains(layer) {
                continue;
            }

            let bounds = mesh.0.aabb().transformed(self.world_matrix(entity));
            if bounds.overlaps(region) {
                candidates.push(Candidate { entity, bounds });
            }
        }

        candidates
    }

    /// Duplicate an object: independent copies of its name, layer, mesh
    /// and world pose, spawned detached from any parent.
    ///
    /// The copy's mesh owns its own vertex data; mutating it never
    /// affects the original.
    pub fn duplicate(&mut self, entity: hecs::Entity) -> Option<hecs::Entity> {
        let name = self
            .world
            .get::<&Name>(entity)
            .map(|n| n.0.clone())
            .unwrap_or_default();
        let layer = self
            .world
            .get::<&Layer>(entity)
            .map(|l| *l)
            .unwrap_or_default();
        let mesh = self.world.get::<&MeshComponent>(entity).ok()?.0.clone();
        let transform = Transform::from_matrix(self.world_matrix(entity));

        Some(self.world.spawn((
            Name(format!("{} (clone)", name)),
            transform,
            layer,
            MeshComponent(mesh),
        )))
    }

    /// Replace the mesh carried by an entity.
    pub fn set_mesh(&mut self, entity: hecs::Entity, mesh: MeshData) {
        let _ = self.world.insert_one(entity, MeshComponent(mesh));
    }

    /// Set an entity's world-space position and rotation, accounting
    /// for any parent it is attached to.
    pub fn set_world_pose(&mut self, entity: hecs::Entity, position: Vec3, rotation: Quat) {
        let desired = Mat4::from_rotation_translation(rotation, position);
        let local = match self.world.get::<&Parent>(entity).map(|p| p.0) {
            Ok(parent) => self.world_matrix(parent).inverse() * desired,
            Err(_) => desired,
        };
        let mut transform = Transform::from_matrix(local);
        if let Ok(existing) = self.world.get::<&Transform>(entity) {
            transform.scale = existing.scale;
        }
        let _ = self.world.insert_one(entity, transform);
    }

    /// Attach `child` under `parent` while keeping the child's world
    /// transform unchanged: the child's local transform is rewritten so
    /// that `parent_world * local == child_world`.
    pub fn attach_keep_world(&mut self, child: hecs::Entity, parent: hecs::Entity) {
        let child_world = self.world_matrix(child);
        let parent_world = self.world_matrix(parent);
        let local = Transform::from_matrix(parent_world.inverse() * child_world);

        if let Ok(Parent(old)) = self.world.remove_one::<Parent>(child) {
            self.forget_child(old, child);
        }

        let _ = self.world.insert(child, (local, Parent(parent)));

        let recorded = match self.world.get::<&mut Children>(parent) {
            Ok(mut children) => {
                children.0.push(child);
                true
            }
            Err(_) => false,
        };
        if !recorded {
            let _ = self.world.insert_one(parent, Children(vec![child]));
        }
    }

    fn forget_child(&mut self, parent: hecs::Entity, child: hecs::Entity) {
        if let Ok(mut children) = self.world.get::<&mut Children>(parent) {
            children.0.retain(|&c| c != child);
        }
    }
}
