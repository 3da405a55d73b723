//! Typed simulation configuration.
//!
//! Every section has sensible defaults and can be overridden from JSON:
//!
//! ```
//! use orrery_core::SimulationConfig;
//!
//! let config = SimulationConfig::from_json_str(r#"{ "animation": { "speedMultiplier": 2.0 } }"#)
//!     .unwrap();
//! assert_eq!(config.animation.speed_multiplier, 2.0);
//! assert_eq!(config.camera.fov_degrees, 45.0);
//! ```

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::{Error, Result};

/// Nominal orbital increment of the reference body per tick, in radians.
pub const DEFAULT_BASE_RATE: f32 = 0.001;

/// Animation speed settings.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimationConfig {
    /// Reference body orbital increment per tick (radians)
    pub base_rate: f32,
    /// User-adjustable multiplier applied to the base rate
    pub speed_multiplier: f32,
    /// Whether ticks advance the animation at all
    pub animated: bool,
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            base_rate: DEFAULT_BASE_RATE,
            speed_multiplier: 1.0,
            animated: true,
        }
    }
}

impl AnimationConfig {
    /// Set the base rate.
    pub fn with_base_rate(mut self, base_rate: f32) -> Self {
        self.base_rate = base_rate;
        self
    }

    /// Set the speed multiplier.
    pub fn with_speed_multiplier(mut self, speed_multiplier: f32) -> Self {
        self.speed_multiplier = speed_multiplier;
        self
    }

    /// Rate handed to the animation passes for one tick.
    ///
    /// A zero, negative or non-finite product falls back to
    /// [`DEFAULT_BASE_RATE`] so the animation never stalls.
    pub fn effective_rate(&self) -> f32 {
        let rate = self.base_rate * self.speed_multiplier;
        if rate.is_finite() && rate > 0.0 {
            rate
        } else {
            warn!(
                base_rate = self.base_rate,
                speed_multiplier = self.speed_multiplier,
                "Invalid animation rate, using default {}",
                DEFAULT_BASE_RATE
            );
            DEFAULT_BASE_RATE
        }
    }
}

/// Initial camera placement and projection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CameraConfig {
    /// Camera position in world space
    pub position: Vec3,
    /// Point the camera looks at
    pub target: Vec3,
    /// Up direction
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub fov_degrees: f32,
    /// Near clip plane
    pub near: f32,
    /// Far clip plane
    pub far: f32,
}

impl Default for CameraConfig {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 4000.0, -20000.0),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov_degrees: 45.0,
            near: 1.0,
            far: 300_000.0,
        }
    }
}

/// Top-level configuration for one simulation.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimulationConfig {
    pub animation: AnimationConfig,
    pub camera: CameraConfig,
}

impl SimulationConfig {
    /// Parse a configuration from a JSON string; missing fields take defaults.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read and parse a JSON configuration file.
    pub fn from_json_file(path: &Path) -> Result<Self> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    /// Reject values that would make the camera projection degenerate.
    ///
    /// Animation rates are not checked here; they are corrected per tick.
    pub fn validate(&self) -> Result<()> {
        let camera = &self.camera;
        if !(camera.near > 0.0 && camera.far > camera.near) {
            return Err(Error::Config(format!(
                "clip planes must satisfy 0 < near < far (near={}, far={})",
                camera.near, camera.far
            )));
        }
        if camera.position == camera.target {
            return Err(Error::Config(
                "camera position and target must differ".to_string(),
            ));
        }
        Ok(())
    }
}
