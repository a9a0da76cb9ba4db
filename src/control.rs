//! First-person player control
//!
//! WASD movement in the facing plane with mouse look. The update is an
//! explicit `tick(delta_time, input) -> Pose` over a snapshot of input
//! axes; the host engine owns the input devices and the frame loop.

use glam::{EulerRot, Quat, Vec3};

use crate::camera::Camera;

/// Snapshot of input axes for one tick.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputState {
    pub move_forward: bool,
    pub move_backward: bool,
    pub move_left: bool,
    pub move_right: bool,
    /// Mouse movement since the previous tick.
    pub mouse_delta: (f32, f32),
    /// Whether the capture key is currently held.
    pub capture: bool,
}

/// A world-space position and orientation.
#[derive(Debug, Clone, Copy)]
pub struct Pose {
    pub position: Vec3,
    pub rotation: Quat,
}

impl Pose {
    /// The facing direction (local -Z).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::NEG_Z
    }
}

/// First-person control with WASD movement and mouse look.
pub struct PlayerControl {
    /// Movement speed (units per second).
    pub move_speed: f32,
    /// Mouse sensitivity for rotation (radians per mouse unit).
    pub mouse_sensitivity: f32,

    position: Vec3,
    yaw: f32,
    pitch: f32,
    capture_held: bool,
}

impl PlayerControl {
    /// Create a control at the given position, facing -Z.
    pub fn new(position: Vec3, move_speed: f32, mouse_sensitivity: f32) -> Self {
        Self {
            move_speed,
            mouse_sensitivity,
            position,
            yaw: 0.0,
            pitch: 0.0,
            capture_held: false,
        }
    }

    /// Initialize the control from a camera's current pose.
    pub fn from_camera(camera: &Camera, move_speed: f32, mouse_sensitivity: f32) -> Self {
        let direction = camera.forward();
        let mut control = Self::new(camera.position, move_speed, mouse_sensitivity);
        control.pitch = direction.y.asin();
        control.yaw = (-direction.x).atan2(-direction.z);
        control
    }

    /// Advance the pose by one tick.
    ///
    /// Look: yaw follows mouse X, pitch follows mouse Y clamped short
    /// of straight up/down. Move: WASD in the horizontal facing plane,
    /// normalized so diagonals are no faster than a single axis.
    pub fn tick(&mut self, delta_time: f32, input: &InputState) -> Pose {
        self.yaw -= input.mouse_delta.0 * self.mouse_sensitivity;
        self.pitch = (self.pitch - input.mouse_delta.1 * self.mouse_sensitivity).clamp(
            -std::f32::consts::FRAC_PI_2 + 0.01,
            std::f32::consts::FRAC_PI_2 - 0.01,
        );

        // Movement stays in the horizontal plane regardless of pitch.
        let flat = Quat::from_rotation_y(self.yaw);
        let forward = flat * Vec3::NEG_Z;
        let right = flat * Vec3::X;

        let mut velocity = Vec3::ZERO;
        if input.move_forward {
            velocity += forward;
        }
        if input.move_backward {
            velocity -= forward;
        }
        if input.move_right {
            velocity += right;
        }
        if input.move_left {
            velocity -= right;
        }
        if velocity.length_squared() > 0.0 {
            velocity = velocity.normalize();
        }

        self.position += velocity * self.move_speed * delta_time;
        self.pose()
    }

    /// The current pose.
    pub fn pose(&self) -> Pose {
        Pose {
            position: self.position,
            rotation: Quat::from_euler(EulerRot::YXZ, self.yaw, self.pitch, 0.0),
        }
    }

    /// Edge-triggered capture: fires once per press, then not again
    /// until the key is released.
    pub fn capture_edge(&mut self, pressed: bool) -> bool {
        let fired = pressed && !self.capture_held;
        self.capture_held = pressed;
        fired
    }

    /// Point a camera along the current pose.
    pub fn sync_camera(&self, camera: &mut Camera) {
        let pose = self.pose();
        camera.set_pose(pose.position, pose.rotation);
    }

    /// Get current pitch angle in radians.
    pub fn pitch(&self) -> f32 {
        self.pitch
    }

    /// Get current yaw angle in radians.
    pub fn yaw(&self) -> f32 {
        self.yaw
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn control() -> PlayerControl {
        PlayerControl::new(Vec3::ZERO, 5.0, 0.002)
    }

    #[test]
    fn test_idle_tick_stays_put() {
        let mut control = control();
        let pose = control.tick(0.016, &InputState::default());
        assert_eq!(pose.position, Vec3::ZERO);
        assert!((pose.forward() - Vec3::NEG_Z).length() < 1e-5);
    }

    #[test]
    fn test_forward_moves_along_facing() {
        let mut control = control();
        let input = InputState {
            move_forward: true,
            ..InputState::default()
        };
        let pose = control.tick(1.0, &input);
        assert!((pose.position - Vec3::NEG_Z * 5.0).length() < 1e-4);
    }

    #[test]
    fn test_diagonal_is_not_faster() {
        let mut control = control();
        let input = InputState {
            move_forward: true,
            move_right: true,
            ..InputState::default()
        };
        let pose = control.tick(1.0, &input);
        assert!((pose.position.length() - 5.0).abs() < 1e-4);
    }

    #[test]
    fn test_mouse_x_turns_yaw() {
        let mut control = control();
        // A full half-turn to the right.
        let input = InputState {
            mouse_delta: (std::f32::consts::PI / 0.002, 0.0),
            ..InputState::default()
        };
        let pose = control.tick(0.016, &input);
        assert!((pose.forward() - Vec3::Z).length() < 1e-3);
    }

    #[test]
    fn test_pitch_clamped() {
        let mut control = control();
        let input = InputState {
            mouse_delta: (0.0, -1e6),
            ..InputState::default()
        };
        control.tick(0.016, &input);
        assert!(control.pitch() < std::f32::consts::FRAC_PI_2);
    }

    #[test]
    fn test_movement_ignores_pitch() {
        let mut control = control();
        // Pitch steeply down, then walk forward: stays at ground height.
        control.tick(
            0.016,
            &InputState {
                mouse_delta: (0.0, 1e6),
                ..InputState::default()
            },
        );
        let pose = control.tick(
            1.0,
            &InputState {
                move_forward: true,
                ..InputState::default()
            },
        );
        assert!(pose.position.y.abs() < 1e-5);
    }

    #[test]
    fn test_capture_edge_fires_once() {
        let mut control = control();
        assert!(control.capture_edge(true));
        assert!(!control.capture_edge(true));
        assert!(!control.capture_edge(false));
        assert!(control.capture_edge(true));
    }

    #[test]
    fn test_from_camera_matches_direction() {
        let camera = Camera::new_perspective(
            Vec3::new(0.0, 0.0, -10.0),
            Vec3::ZERO,
            Vec3::Y,
            60.0,
            1.0,
            0.1,
            100.0,
        );
        let control = PlayerControl::from_camera(&camera, 5.0, 0.002);
        let pose = control.pose();
        assert!((pose.forward() - camera.forward()).length() < 1e-4);
        assert!((pose.position - camera.position).length() < 1e-5);
    }
}
