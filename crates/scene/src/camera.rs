//! Look-at camera with user-applied offsets.
//!
//! The camera looks from `position` towards `target`. On top of that view a
//! [`CameraRig`] applies the user's pan (track/crane/push) and tilt
//! (pitch/yaw/roll) offsets, composed into the view-projection matrix in
//! that order.

use glam::{Mat4, Vec3};
use orrery_core::CameraConfig;

/// Distance moved by one track/crane/push step.
pub const MOVE_STEP: f32 = 100.0;
/// Camera z offset applied per wheel notch.
pub const ZOOM_STEP: f32 = 100.0;
/// Field-of-view change per zoom key press, in degrees.
pub const FOV_STEP_DEGREES: f32 = 5.0;
pub const MIN_FOV_DEGREES: f32 = 10.0;
pub const MAX_FOV_DEGREES: f32 = 160.0;
/// Pitch and yaw limit, in degrees.
pub const MAX_TILT_DEGREES: f32 = 90.0;

const DRAG_TILT_SCALE: f32 = 30.0;
const DRAG_ROLL_SCALE: f32 = 100.0;

/// User offsets layered on top of the look-at view.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct CameraRig {
    /// Left/right offset
    pub track: f32,
    /// Up/down offset
    pub crane: f32,
    /// Forward/backward offset
    pub push: f32,
    /// Degrees, clamped to +-90
    pub pitch: f32,
    /// Degrees, clamped to +-90
    pub yaw: f32,
    /// Degrees, wrapped to (-360, 360)
    pub roll: f32,
    /// Whether horizontal drags roll instead of pitch/yaw
    pub rolling: bool,
}

impl CameraRig {
    pub fn track_left(&mut self) {
        self.track -= MOVE_STEP;
    }

    pub fn track_right(&mut self) {
        self.track += MOVE_STEP;
    }

    pub fn push_in(&mut self) {
        self.push += MOVE_STEP;
    }

    pub fn pull_out(&mut self) {
        self.push -= MOVE_STEP;
    }

    pub fn crane_up(&mut self) {
        self.crane += MOVE_STEP;
    }

    pub fn crane_down(&mut self) {
        self.crane -= MOVE_STEP;
    }

    /// Switch drags between pitch/yaw and roll.
    pub fn toggle_rolling(&mut self) {
        self.rolling = !self.rolling;
    }

    /// Apply a pointer drag given as a fraction of the viewport size.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        if self.rolling {
            self.roll = (self.roll + DRAG_ROLL_SCALE * dx) % 360.0;
        } else {
            self.yaw = (self.yaw + DRAG_TILT_SCALE * dx).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES);
            self.pitch =
                (self.pitch + DRAG_TILT_SCALE * dy).clamp(-MAX_TILT_DEGREES, MAX_TILT_DEGREES);
        }
    }

    /// Offset matrix: `T(-track, 0, 0) * T(0, -crane, 0) * T(0, 0, push) * Rx * Ry * Rz`.
    pub fn matrix(&self) -> Mat4 {
        Mat4::from_translation(Vec3::new(-self.track, 0.0, 0.0))
            * Mat4::from_translation(Vec3::new(0.0, -self.crane, 0.0))
            * Mat4::from_translation(Vec3::new(0.0, 0.0, self.push))
            * Mat4::from_rotation_x(self.pitch.to_radians())
            * Mat4::from_rotation_y(self.yaw.to_radians())
            * Mat4::from_rotation_z(self.roll.to_radians())
    }
}

/// A perspective camera looking at a fixed target.
#[derive(Clone, Debug, PartialEq)]
pub struct Camera {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    /// User offsets
    pub rig: CameraRig,
}

impl Default for Camera {
    fn default() -> Self {
        Self::from_config(&CameraConfig::default())
    }
}

impl Camera {
    /// Create a camera from configuration with no user offsets.
    pub fn from_config(config: &CameraConfig) -> Self {
        Self {
            position: config.position,
            target: config.target,
            up: config.up,
            fov_degrees: config.fov_degrees.clamp(MIN_FOV_DEGREES, MAX_FOV_DEGREES),
            near: config.near,
            far: config.far,
            rig: CameraRig::default(),
        }
    }

    /// Narrow the field of view by one step.
    pub fn zoom_in(&mut self) {
        self.fov_degrees = (self.fov_degrees - FOV_STEP_DEGREES).max(MIN_FOV_DEGREES);
    }

    /// Widen the field of view by one step.
    pub fn zoom_out(&mut self) {
        self.fov_degrees = (self.fov_degrees + FOV_STEP_DEGREES).min(MAX_FOV_DEGREES);
    }

    /// Move the camera along z for a wheel event; scrolling up moves it forward.
    pub fn wheel(&mut self, delta_y: f32) {
        let direction = if delta_y < 0.0 { 1.0 } else { -1.0 };
        self.position.z += direction * ZOOM_STEP;
    }

    /// World-to-view matrix.
    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    /// OpenGL-style perspective projection.
    ///
    /// Non-positive or non-finite aspect ratios are replaced by 1.0.
    pub fn projection_matrix(&self, aspect: f32) -> Mat4 {
        let aspect = if aspect.is_finite() && aspect > 0.0 { aspect } else { 1.0 };
        Mat4::perspective_rh_gl(self.fov_degrees.to_radians(), aspect, self.near, self.far)
    }

    /// Projection, view and rig offsets combined.
    pub fn view_projection_matrix(&self, aspect: f32) -> Mat4 {
        self.projection_matrix(aspect) * self.view_matrix() * self.rig.matrix()
    }
}
