//! Scene graph transform engine.
//!
//! This crate provides everything between animation input and per-object
//! shader matrices:
//! - Transforms with two fixed composition orders
//! - A scene graph with name lookup and world-matrix propagation
//! - Declarative scene descriptions and a built-in solar system
//! - The orbit/spin animation driver
//! - A look-at camera with user offsets
//! - Per-object uniforms and the per-frame [`Simulation`] driver

pub mod animation;
pub mod camera;
pub mod description;
mod error;
pub mod graph;
pub mod node;
pub mod presets;
pub mod simulation;
pub mod transform;
pub mod uniforms;

pub use animation::{Animator, AxialRates, BodySpec, RateTables};
pub use camera::{Camera, CameraRig};
pub use description::NodeDescription;
pub use error::{SceneError, SceneResult};
pub use graph::SceneGraph;
pub use node::{CullMode, DrawInfo, NodeId, SceneNode, Shape};
pub use simulation::Simulation;
pub use transform::{Transform, TransformKind};
pub use uniforms::ObjectUniforms;
