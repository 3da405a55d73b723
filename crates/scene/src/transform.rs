//! Local-space transforms for scene nodes.
//!
//! A [`Transform`] holds a translation, three Euler angles and a scale, and
//! composes them into a 4x4 matrix in one of two fixed orders selected by
//! [`TransformKind`]:
//!
//! - [`TransformKind::Trs`]: `T * Rz * Rx * Ry * S`. The node spins in place
//!   at its translated position. Used for bodies.
//! - [`TransformKind::Rts`]: `(Rz * Rx * Ry) * T * S`. The translation is
//!   rotated too, so children swing around the parent's origin. Used for
//!   orbit pivots.
//!
//! # Example
//!
//! ```
//! use orrery_scene::{Transform, TransformKind};
//! use glam::Vec3;
//!
//! let pivot = Transform::new(TransformKind::Rts)
//!     .with_translation(Vec3::new(20.0, 0.0, 0.0))
//!     .with_rotation(Vec3::new(0.0, std::f32::consts::FRAC_PI_2, 0.0));
//!
//! let position = pivot.compose().transform_point3(Vec3::ZERO);
//! assert!((position - Vec3::new(0.0, 0.0, -20.0)).length() < 1e-4);
//! ```

use glam::{Mat4, Vec3};
use serde::{Deserialize, Serialize};

/// Composition order of a [`Transform`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TransformKind {
    /// Translate, then rotate and scale in place.
    #[default]
    #[serde(rename = "TRS")]
    Trs,
    /// Rotate first, then translate outward, then scale.
    #[serde(rename = "RTS")]
    Rts,
}

/// Translation, Euler rotation and scale of a node relative to its parent.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Composition order
    pub kind: TransformKind,
    /// Offset in parent space
    pub translation: Vec3,
    /// Angles in radians about the X, Y and Z axes
    pub rotation: Vec3,
    /// Per-axis scale factor
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self::new(TransformKind::Trs)
    }
}

impl Transform {
    /// Create an identity transform with the given composition order.
    pub fn new(kind: TransformKind) -> Self {
        Self {
            kind,
            translation: Vec3::ZERO,
            rotation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }

    /// Identity transform in translate-rotate-scale order.
    pub fn trs() -> Self {
        Self::new(TransformKind::Trs)
    }

    /// Identity transform in rotate-translate-scale order.
    pub fn rts() -> Self {
        Self::new(TransformKind::Rts)
    }

    /// Set the translation.
    pub fn with_translation(mut self, translation: Vec3) -> Self {
        self.translation = translation;
        self
    }

    /// Set the Euler angles (radians).
    pub fn with_rotation(mut self, rotation: Vec3) -> Self {
        self.rotation = rotation;
        self
    }

    /// Set the scale.
    pub fn with_scale(mut self, scale: Vec3) -> Self {
        self.scale = scale;
        self
    }

    /// Rotation-only part: `Rz * Rx * Ry`.
    pub fn rotation_matrix(&self) -> Mat4 {
        Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
    }

    /// Compose the local matrix for this transform's order.
    ///
    /// Non-finite inputs are not checked and propagate into the result.
    pub fn compose(&self) -> Mat4 {
        let translation = Mat4::from_translation(self.translation);
        let scale = Mat4::from_scale(self.scale);
        match self.kind {
            TransformKind::Trs => translation * self.rotation_matrix() * scale,
            TransformKind::Rts => self.rotation_matrix() * translation * scale,
        }
    }
}
