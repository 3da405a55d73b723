//! Core utilities for the orrery engine.
//!
//! This crate provides foundational types used across the workspace:
//! - Error types and result aliases
//! - Logging initialization
//! - Simulation configuration
//! - Frame timer

mod config;
mod error;
mod logging;
mod timer;

pub use config::{AnimationConfig, CameraConfig, DEFAULT_BASE_RATE, SimulationConfig};
pub use error::{Error, Result};
pub use logging::{DEFAULT_LOG_FILTER, init_logging};
pub use timer::Timer;
