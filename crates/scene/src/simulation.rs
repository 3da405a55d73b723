//! Per-frame driver tying the scene, animation and camera together.

use glam::Mat4;
use orrery_core::{AnimationConfig, SimulationConfig};
use tracing::{info, trace};

use crate::animation::Animator;
use crate::camera::Camera;
use crate::error::SceneResult;
use crate::graph::SceneGraph;
use crate::node::NodeId;
use crate::presets;

/// One animated scene with its camera.
///
/// Each [`tick`](Simulation::tick) runs the frame sequence in order:
/// mutate transforms, propagate world matrices from the root, then write
/// per-object uniforms for the renderer.
#[derive(Debug)]
pub struct Simulation {
    scene: SceneGraph,
    root: NodeId,
    animator: Animator,
    camera: Camera,
    animation: AnimationConfig,
    ticks: u64,
}

impl Simulation {
    pub fn new(
        scene: SceneGraph,
        root: NodeId,
        animator: Animator,
        camera: Camera,
        animation: AnimationConfig,
    ) -> Self {
        Self {
            scene,
            root,
            animator,
            camera,
            animation,
            ticks: 0,
        }
    }

    /// Build the built-in solar system scene.
    pub fn solar_system(config: &SimulationConfig) -> SceneResult<Self> {
        let (scene, root) = SceneGraph::from_description(&presets::solar_system())?;
        let animator = Animator::new(&scene, &presets::solar_bodies(), presets::solar_rates())?;
        info!(bodies = animator.body_names().count(), "Solar system ready");
        Ok(Self::new(
            scene,
            root,
            animator,
            Camera::from_config(&config.camera),
            config.animation.clone(),
        ))
    }

    /// Advance one frame and return the view-projection matrix used.
    pub fn tick(&mut self, aspect: f32) -> SceneResult<Mat4> {
        if self.animation.animated {
            let rate = self.animation.effective_rate();
            self.animator.step(&mut self.scene, rate)?;
        }

        self.scene.update_world_matrix(self.root, None)?;

        let view_projection = self.camera.view_projection_matrix(aspect);
        self.scene.write_uniforms(&view_projection);

        self.ticks += 1;
        trace!(tick = self.ticks, "Frame complete");
        Ok(view_projection)
    }

    pub fn scene(&self) -> &SceneGraph {
        &self.scene
    }

    pub fn scene_mut(&mut self) -> &mut SceneGraph {
        &mut self.scene
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn animator(&self) -> &Animator {
        &self.animator
    }

    pub fn camera(&self) -> &Camera {
        &self.camera
    }

    pub fn camera_mut(&mut self) -> &mut Camera {
        &mut self.camera
    }

    pub fn animation(&self) -> &AnimationConfig {
        &self.animation
    }

    /// Completed ticks.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_animated(&mut self, animated: bool) {
        self.animation.animated = animated;
    }

    pub fn toggle_animated(&mut self) {
        self.animation.animated = !self.animation.animated;
    }

    /// Change the speed multiplier; invalid values are corrected per tick.
    pub fn set_speed_multiplier(&mut self, speed_multiplier: f32) {
        self.animation.speed_multiplier = speed_multiplier;
    }
}
