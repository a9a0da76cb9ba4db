//! Viewfinder session
//!
//! Ties the pieces together for one player: tick the control, sync the
//! camera, and run a capture when the capture key goes down. The host
//! engine calls [`Session::frame`] once per frame with elapsed time and
//! an input snapshot.

use crate::camera::Camera;
use crate::capture::{CaptureConfig, CaptureReport, Capturer};
use crate::control::{InputState, PlayerControl};
use crate::geometry::{frustum_hull, MaterialId};
use crate::scene::{Layer, Scene, Transform};
use tracing::info;

/// Session configuration.
#[derive(Debug, Clone)]
pub struct SessionConfig {
    /// Movement speed (units per second). Default: 5.
    pub move_speed: f32,
    /// Mouse sensitivity. Default: 0.002.
    pub mouse_sensitivity: f32,
    /// Spawn a translucent hull of the frustum on the debug layer after
    /// each capture. Default: off.
    pub debug_visuals: bool,
    /// Material for the debug hull faces.
    pub debug_material: MaterialId,
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            move_speed: 5.0,
            mouse_sensitivity: 0.002,
            debug_visuals: false,
            debug_material: MaterialId::DEFAULT,
        }
    }
}

/// A player driving a camera and capturing through it.
pub struct Session {
    camera: Camera,
    control: PlayerControl,
    capturer: Capturer,
    config: SessionConfig,
}

impl Session {
    /// Create a session around an existing camera and capture config.
    pub fn new(camera: Camera, capture: CaptureConfig, config: SessionConfig) -> Self {
        let control =
            PlayerControl::from_camera(&camera, config.move_speed, config.mouse_sensitivity);
        Self {
            camera,
            control,
            capturer: Capturer::new(capture),
            config,
        }
    }

    /// The camera as of the last frame.
    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    /// Advance one frame: move/look, then capture on the key edge.
    ///
    /// Returns the capture report when a capture ran this frame.
    pub fn frame(
        &mut self,
        scene: &mut Scene,
        delta_time: f32,
        input: &InputState,
    ) -> anyhow::Result<Option<CaptureReport>> {
        self.control.tick(delta_time, input);
        self.control.sync_camera(&mut self.camera);

        if !self.control.capture_edge(input.capture) {
            return Ok(None);
        }

        let report = self.capturer.capture(scene, &self.camera)?;
        info!(captured = report.captured.len(), "capture triggered");

        if self.config.debug_visuals {
            let hull = frustum_hull(&self.camera.frustum_corners(), self.config.debug_material);
            // Hull vertices are already world-space; an identity
            // transform on the debug layer keeps it out of captures.
            scene.spawn_object("frustum hull", Transform::identity(), Layer::DEBUG, hull);
        }

        Ok(Some(report))
    }
}
