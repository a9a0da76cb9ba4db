//! Frustum capture pipeline
//!
//! One capture runs synchronously, start to finish, per trigger event:
//!
//! 1. Derive the frustum corners and planes from the camera.
//! 2. Broad-phase box query over the corners' bounding box, excluding
//!    the player and debug layers.
//! 3. Exact frustum/AABB filter on the candidates.
//! 4. Duplicate each accepted object and clip the duplicate against
//!    all 6 planes in its local frame.
//! 5. Reparent surviving fragments under the capture container,
//!    preserving their world transforms.
//!
//! Originals are never modified; duplicates that clip to nothing are
//! despawned immediately.

use crate::camera::Camera;
use crate::clip::clip_to_frustum;
use crate::frustum::{Frustum, Plane};
use crate::geometry::{Aabb, MaterialId};
use crate::scene::{Layer, LayerMask, MeshComponent, Scene};
use thiserror::Error;
use tracing::{debug, warn};

/// Errors that prevent a capture from running.
#[derive(Debug, Error)]
pub enum CaptureError {
    /// The configured capture container does not exist in the scene.
    /// Captures refuse to start rather than dropping fragments on the
    /// scene root.
    #[error("capture container entity is missing from the scene")]
    MissingContainer,
}

/// Configuration for the capture pipeline.
#[derive(Debug, Clone)]
pub struct CaptureConfig {
    /// Entity the captured fragments are parented beneath. Required.
    pub container: hecs::Entity,
    /// Layers the broad-phase query skips. Default: player + debug.
    pub excluded_layers: LayerMask,
    /// Material applied to cut cross-section faces.
    pub section_material: MaterialId,
    /// Upper bound on candidates processed per capture. Candidates
    /// beyond the cap are dropped with a warning; clipping cost is
    /// otherwise unbounded. Default: 256.
    pub max_candidates: Option<usize>,
}

impl CaptureConfig {
    /// Create a configuration with defaults for the given container.
    pub fn new(container: hecs::Entity) -> Self {
        Self {
            container,
            excluded_layers: LayerMask::of(&[Layer::PLAYER, Layer::DEBUG]),
            section_material: MaterialId::DEFAULT,
            max_candidates: Some(256),
        }
    }
}

/// Outcome of one capture invocation.
#[derive(Debug, Default)]
pub struct CaptureReport {
    /// Candidates returned by the broad-phase query.
    pub examined: usize,
    /// Entities spawned under the capture container.
    pub captured: Vec<hecs::Entity>,
    /// Candidates rejected by the exact frustum test or clipped away
    /// entirely.
    pub rejected: usize,
}

/// Runs frustum captures against a scene.
pub struct Capturer {
    config: CaptureConfig,
}

impl Capturer {
    /// Create a capturer with the given configuration.
    pub fn new(config: CaptureConfig) -> Self {
        Self { config }
    }

    /// Get the configuration.
    pub fn config(&self) -> &CaptureConfig {
        &self.config
    }

    /// Capture everything inside the camera's view frustum.
    ///
    /// Fragments keep their world position and orientation across the
    /// reparent. Returns the report of what was examined and captured;
    /// zero candidates is a successful no-op.
    pub fn capture(
        &self,
        scene: &mut Scene,
        camera: &Camera,
    ) -> Result<CaptureReport, CaptureError> {
        if !scene.contains(self.config.container) {
            return Err(CaptureError::MissingContainer);
        }

        let corners = camera.frustum_corners();
        let frustum = Frustum::from_camera(camera);
        let coarse = Aabb::from_points(corners);

        let mut candidates = scene.query_box(&coarse, self.config.excluded_layers);
        if let Some(cap) = self.config.max_candidates {
            if candidates.len() > cap {
                warn!(
                    examined = candidates.len(),
                    cap, "candidate cap exceeded, truncating"
                );
                candidates.truncate(cap);
            }
        }

        // Anchor the container at the viewpoint before any fragment is
        // attached, so moving the container later moves the whole
        // capture relative to where it was taken.
        let (camera_position, camera_rotation) = camera.pose();
        scene.set_world_pose(self.config.container, camera_position, camera_rotation);

        let mut report = CaptureReport {
            examined: candidates.len(),
            ..CaptureReport::default()
        };

        for candidate in &candidates {
            if !frustum.contains_aabb(&candidate.bounds) {
                report.rejected += 1;
                continue;
            }

            let Some(duplicate) = scene.duplicate(candidate.entity) else {
                report.rejected += 1;
                continue;
            };

            // Planes are world-space; geometry is clipped in the
            // duplicate's local frame.
            let local_to_world = scene.world_matrix(duplicate);
            let local_planes: [Plane; 6] = frustum.planes.map(|p| p.to_local(local_to_world));

            let clipped = match scene.world.get::<&MeshComponent>(duplicate) {
                Ok(mesh) => clip_to_frustum(&mesh.0, &local_planes, self.config.section_material),
                Err(_) => None,
            };

            match clipped {
                Some(mesh) => {
                    scene.set_mesh(duplicate, mesh);
                    scene.attach_keep_world(duplicate, self.config.container);
                    report.captured.push(duplicate);
                }
                None => {
                    // Entirely clipped away: no orphaned partials.
                    scene.despawn(duplicate);
                    report.rejected += 1;
                }
            }
        }

        debug!(
            examined = report.examined,
            captured = report.captured.len(),
            rejected = report.rejected,
            "frustum capture finished"
        );
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geometry::MeshData;
    use crate::scene::Transform;
    use glam::{Quat, Vec3};

    const BODY: MaterialId = MaterialId(1);

    fn wide_camera() -> Camera {
        Camera::new_perspective(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            1.0,
            0.1,
            100.0,
        )
    }

    fn setup() -> (Scene, Capturer) {
        let mut scene = Scene::new();
        let container = scene.spawn_empty("captured", Transform::identity());
        let capturer = Capturer::new(CaptureConfig::new(container));
        (scene, capturer)
    }

    #[test]
    fn test_missing_container_refuses_to_start() {
        let (mut scene, capturer) = setup();
        let container = capturer.config().container;
        scene.despawn(container);

        let result = capturer.capture(&mut scene, &wide_camera());
        assert!(matches!(result, Err(CaptureError::MissingContainer)));
    }

    #[test]
    fn test_empty_scene_is_a_noop() {
        let (mut scene, capturer) = setup();
        let report = capturer.capture(&mut scene, &wide_camera()).unwrap();
        assert_eq!(report.examined, 0);
        assert!(report.captured.is_empty());
    }

    #[test]
    fn test_object_fully_inside_is_captured_whole() {
        let (mut scene, capturer) = setup();
        let original = scene.spawn_object(
            "crate",
            Transform::identity(),
            Layer::DEFAULT,
            MeshData::cube(2.0, BODY),
        );

        let report = capturer.capture(&mut scene, &wide_camera()).unwrap();
        assert_eq!(report.captured.len(), 1);

        // Original untouched, fragment has the full cube.
        assert!(scene.contains(original));
        let fragment = report.captured[0];
        let mesh = scene.world.get::<&MeshComponent>(fragment).unwrap();
        assert_eq!(mesh.0.triangle_count(), 12);
    }

    #[test]
    fn test_object_outside_is_ignored() {
        let (mut scene, capturer) = setup();
        scene.spawn_object(
            "far away",
            Transform::from_position(Vec3::new(500.0, 0.0, 0.0)),
            Layer::DEFAULT,
            MeshData::cube(2.0, BODY),
        );

        let report = capturer.capture(&mut scene, &wide_camera()).unwrap();
        assert!(report.captured.is_empty());
    }

    #[test]
    fn test_player_layer_never_self_captures() {
        let (mut scene, capturer) = setup();
        scene.spawn_object(
            "player rig",
            Transform::identity(),
            Layer::PLAYER,
            MeshData::cube(1.0, BODY),
        );

        let report = capturer.capture(&mut scene, &wide_camera()).unwrap();
        assert_eq!(report.examined, 0);
        assert!(report.captured.is_empty());
    }

    #[test]
    fn test_reparent_preserves_world_pose() {
        let (mut scene, capturer) = setup();
        let position = Vec3::new(1.5, -0.5, 2.0);
        let rotation = Quat::from_rotation_y(0.4);
        scene.spawn_object(
            "crate",
            Transform::from_position_rotation(position, rotation),
            Layer::DEFAULT,
            MeshData::cube(1.0, BODY),
        );

        let report = capturer.capture(&mut scene, &wide_camera()).unwrap();
        assert_eq!(report.captured.len(), 1);

        let (after_pos, after_rot) = scene.world_pose(report.captured[0]);
        assert!((after_pos - position).length() < 1e-4);
        assert!(after_rot.dot(rotation).abs() > 1.0 - 1e-4);
    }

    #[test]
    fn test_container_mirrors_camera_pose() {
        let (mut scene, capturer) = setup();
        let camera = wide_camera();

        capturer.capture(&mut scene, &camera).unwrap();

        let (pos, rot) = scene.world_pose(capturer.config().container);
        let (cam_pos, cam_rot) = camera.pose();
        assert!((pos - cam_pos).length() < 1e-4);
        assert!(rot.dot(cam_rot).abs() > 1.0 - 1e-4);
    }

    #[test]
    fn test_straddling_object_is_clipped() {
        let (mut scene, capturer) = setup();
        // Cube poking out past the far plane: far = 5, cube spans
        // depth 4..6 from the camera.
        let camera = Camera::new_perspective(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            1.0,
            0.1,
            5.0,
        );
        scene.spawn_object(
            "straddler",
            Transform::from_position(Vec3::new(0.0, 0.0, -5.0)),
            Layer::DEFAULT,
            MeshData::cube(2.0, BODY),
        );

        let report = capturer.capture(&mut scene, &camera).unwrap();
        assert_eq!(report.captured.len(), 1);

        // Fragment reaches the far plane (z = -5) and no further.
        let aabb = scene.world_aabb(report.captured[0]).unwrap();
        assert!((aabb.min.z + 6.0).abs() < 1e-3);
        assert!((aabb.max.z + 5.0).abs() < 1e-2);
    }

    #[test]
    fn test_end_to_end_half_cube() {
        // 2x2x2 cube at the origin, camera 10 units
        // along -Z looking at +Z, near 0.1, far 20, frustum narrow
        // enough that only about half the cube's X extent fits.
        let (mut scene, capturer) = setup();
        let fov_degrees = 2.0 * 0.15f32.atan().to_degrees();
        let camera = Camera::new_perspective(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::Y,
            fov_degrees,
            1.0 / 3.0,
            0.1,
            20.0,
        );
        scene.spawn_object(
            "cube",
            Transform::identity(),
            Layer::DEFAULT,
            MeshData::cube(2.0, BODY),
        );

        let report = capturer.capture(&mut scene, &camera).unwrap();
        assert_eq!(report.captured.len(), 1);

        let aabb = scene.world_aabb(report.captured[0]).unwrap();
        // X range halved (side planes reach +-0.55 at the cube's far
        // face), Y and Z ranges unchanged.
        assert!((aabb.min.x + 0.55).abs() < 0.02);
        assert!((aabb.max.x - 0.55).abs() < 0.02);
        assert!((aabb.min.y + 1.0).abs() < 1e-3);
        assert!((aabb.max.y - 1.0).abs() < 1e-3);
        assert!((aabb.min.z + 1.0).abs() < 1e-3);
        assert!((aabb.max.z - 1.0).abs() < 1e-3);

        // The kept region is symmetric, so its center stays at the
        // cube's center.
        assert!(aabb.center().length() < 0.02);
    }

    #[test]
    fn test_candidate_cap_truncates() {
        let (mut scene, capturer) = setup();
        let capturer = Capturer::new(CaptureConfig {
            max_candidates: Some(2),
            ..capturer.config().clone()
        });

        for i in 0..5 {
            scene.spawn_object(
                &format!("crate {}", i),
                Transform::from_position(Vec3::new(0.0, 0.0, i as f32 * 0.1)),
                Layer::DEFAULT,
                MeshData::cube(1.0, BODY),
            );
        }

        let report = capturer.capture(&mut scene, &wide_camera()).unwrap();
        assert_eq!(report.examined, 2);
        assert_eq!(report.captured.len(), 2);
    }
}
