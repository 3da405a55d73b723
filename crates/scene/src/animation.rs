//! Per-tick orbital and spin animation.
//!
//! Each tick runs two passes over the animated bodies:
//!
//! 1. **Orbit pass**: every body's orbit pivot advances its Y rotation by
//!    `rate * orbit_factor`.
//! 2. **Spin pass**: the body's axial tilt is split into X/Z rotations from
//!    the pivot's *current* Y angle (its orbital phase), so the spin axis
//!    keeps a fixed world direction, then the body's own Y rotation advances
//!    by `rate * spin_factor`.
//!
//! The spin pass reads the phase written by the orbit pass, so the two must
//! run in this order within a tick. Bodies missing from a rate table simply
//! do not move.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{SceneError, SceneResult};
use crate::graph::SceneGraph;
use crate::node::NodeId;

/// Axial tilt and self-rotation rate of one body.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AxialRates {
    /// Angle between spin axis and orbit normal, in radians
    pub tilt: f32,
    /// Spin increment per tick, relative to the base rate
    pub spin_factor: f32,
}

/// Read-only per-body rate tables.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RateTables {
    /// Orbital rate relative to the reference body
    pub orbit_factors: HashMap<String, f32>,
    pub axial: HashMap<String, AxialRates>,
}

impl RateTables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_orbit_factor(mut self, body: impl Into<String>, factor: f32) -> Self {
        self.orbit_factors.insert(body.into(), factor);
        self
    }

    pub fn with_axial(mut self, body: impl Into<String>, tilt: f32, spin_factor: f32) -> Self {
        self.axial.insert(body.into(), AxialRates { tilt, spin_factor });
        self
    }

    /// Orbit factor for `body`, zero when absent.
    pub fn orbit_factor(&self, body: &str) -> f32 {
        self.orbit_factors.get(body).copied().unwrap_or(0.0)
    }

    /// Tilt and spin for `body`, zero when absent.
    pub fn axial(&self, body: &str) -> AxialRates {
        self.axial.get(body).copied().unwrap_or_default()
    }
}

/// Names of a body node and the pivot it orbits on.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct BodySpec {
    pub name: String,
    /// Orbit pivot node; `None` for bodies that only spin in place
    pub pivot: Option<String>,
}

impl BodySpec {
    /// A body carried around by the named pivot.
    pub fn orbiting(name: impl Into<String>, pivot: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pivot: Some(pivot.into()),
        }
    }

    /// A body without an orbit pivot.
    pub fn fixed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            pivot: None,
        }
    }
}

#[derive(Clone, Debug)]
struct BodyBinding {
    name: String,
    body: NodeId,
    pivot: Option<NodeId>,
}

/// Advances body and pivot rotations once per tick.
#[derive(Clone, Debug)]
pub struct Animator {
    bodies: Vec<BodyBinding>,
    rates: RateTables,
}

impl Animator {
    /// Resolve `bodies` against the scene's name lookup.
    ///
    /// Every body and pivot named must exist; rate table entries are
    /// optional.
    pub fn new(scene: &SceneGraph, bodies: &[BodySpec], rates: RateTables) -> SceneResult<Self> {
        let bodies = bodies
            .iter()
            .map(|spec| -> SceneResult<BodyBinding> {
                Ok(BodyBinding {
                    name: spec.name.clone(),
                    body: scene.require(&spec.name)?,
                    pivot: spec
                        .pivot
                        .as_deref()
                        .map(|pivot| scene.require(pivot))
                        .transpose()?,
                })
            })
            .collect::<SceneResult<Vec<_>>>()?;

        debug!(bodies = bodies.len(), "Animator bound to scene");
        Ok(Self { bodies, rates })
    }

    pub fn rates(&self) -> &RateTables {
        &self.rates
    }

    /// Names of the animated bodies, in pass order.
    pub fn body_names(&self) -> impl Iterator<Item = &str> {
        self.bodies.iter().map(|binding| binding.name.as_str())
    }

    /// Run one tick: orbit pass, then spin pass.
    pub fn step(&self, scene: &mut SceneGraph, rate: f32) -> SceneResult<()> {
        self.orbit_pass(scene, rate)?;
        self.spin_pass(scene, rate)?;
        trace!(rate, "Animation tick");
        Ok(())
    }

    /// Advance every pivot's Y rotation by `rate * orbit_factor`.
    pub fn orbit_pass(&self, scene: &mut SceneGraph, rate: f32) -> SceneResult<()> {
        for binding in &self.bodies {
            let Some(pivot) = binding.pivot else {
                continue;
            };
            let factor = self.rates.orbit_factor(&binding.name);
            let transform = scene.transform_mut(pivot).ok_or(SceneError::UnknownNode)?;
            transform.rotation.y += rate * factor;
        }
        Ok(())
    }

    /// Decompose each body's tilt from its orbital phase and advance its spin.
    ///
    /// Bodies without an axial entry keep their rotation untouched.
    pub fn spin_pass(&self, scene: &mut SceneGraph, rate: f32) -> SceneResult<()> {
        for binding in &self.bodies {
            let Some(&AxialRates { tilt, spin_factor }) = self.rates.axial.get(&binding.name)
            else {
                continue;
            };
            let phase = match binding.pivot {
                Some(pivot) => {
                    scene
                        .node(pivot)
                        .ok_or(SceneError::UnknownNode)?
                        .transform()
                        .rotation
                        .y
                }
                None => 0.0,
            };

            let transform = scene
                .transform_mut(binding.body)
                .ok_or(SceneError::UnknownNode)?;
            transform.rotation.x = -tilt * phase.sin();
            transform.rotation.z = tilt * phase.cos();
            transform.rotation.y += rate * spin_factor;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transform::Transform;
    use glam::Vec3;

    const EPSILON: f32 = 1e-6;

    fn approx_eq(a: f32, b: f32) -> bool {
        (a - b).abs() < EPSILON
    }

    fn orbiting_scene() -> (SceneGraph, NodeId, NodeId) {
        let mut scene = SceneGraph::new();
        let pivot = scene
            .add_node("mercuryOrbit", Transform::rts().with_translation(Vec3::X * 3948.0))
            .unwrap();
        let body = scene.add_node("mercury", Transform::trs()).unwrap();
        scene.set_parent(body, Some(pivot)).unwrap();
        (scene, pivot, body)
    }

    fn rotation(scene: &SceneGraph, id: NodeId) -> Vec3 {
        scene.node(id).unwrap().transform().rotation
    }

    #[test]
    fn test_orbit_pass_increment() {
        let (mut scene, pivot, _) = orbiting_scene();
        let rates = RateTables::new().with_orbit_factor("mercury", 4.2);
        let animator =
            Animator::new(&scene, &[BodySpec::orbiting("mercury", "mercuryOrbit")], rates).unwrap();

        animator.orbit_pass(&mut scene, 0.001).unwrap();

        assert!(approx_eq(rotation(&scene, pivot).y, 0.0042));
    }

    #[test]
    fn test_spin_pass_uses_updated_phase() {
        let (mut scene, pivot, body) = orbiting_scene();
        scene.transform_mut(pivot).unwrap().rotation.y = 1.0;
        let tilt = 0.4;
        let rates = RateTables::new()
            .with_orbit_factor("mercury", 100.0)
            .with_axial("mercury", tilt, 0.0);
        let animator =
            Animator::new(&scene, &[BodySpec::orbiting("mercury", "mercuryOrbit")], rates).unwrap();

        animator.step(&mut scene, 0.01).unwrap();

        let phase = rotation(&scene, pivot).y;
        assert!(approx_eq(phase, 2.0));
        let spin = rotation(&scene, body);
        assert_eq!(spin.x, -tilt * phase.sin());
        assert_eq!(spin.z, tilt * phase.cos());
        assert_ne!(spin.x, -tilt * 1.0_f32.sin());
    }

    #[test]
    fn test_spin_accumulates() {
        let (mut scene, _, body) = orbiting_scene();
        let rates = RateTables::new().with_axial("mercury", 0.0, 50.0);
        let animator =
            Animator::new(&scene, &[BodySpec::orbiting("mercury", "mercuryOrbit")], rates).unwrap();

        for _ in 0..10 {
            animator.step(&mut scene, 0.001).unwrap();
        }

        assert!((rotation(&scene, body).y - 0.5).abs() < 1e-5);
    }

    #[test]
    fn test_missing_rates_do_not_move() {
        let (mut scene, pivot, body) = orbiting_scene();
        let animator = Animator::new(
            &scene,
            &[BodySpec::orbiting("mercury", "mercuryOrbit")],
            RateTables::new(),
        )
        .unwrap();

        animator.step(&mut scene, 0.001).unwrap();

        assert_eq!(rotation(&scene, pivot), Vec3::ZERO);
        assert_eq!(rotation(&scene, body), Vec3::ZERO);
    }

    #[test]
    fn test_body_without_axial_keeps_rotation() {
        let (mut scene, _, body) = orbiting_scene();
        scene.transform_mut(body).unwrap().rotation = Vec3::new(0.3, 0.0, 0.2);
        let rates = RateTables::new().with_orbit_factor("mercury", 4.2);
        let animator =
            Animator::new(&scene, &[BodySpec::orbiting("mercury", "mercuryOrbit")], rates).unwrap();

        animator.step(&mut scene, 0.001).unwrap();

        assert_eq!(rotation(&scene, body), Vec3::new(0.3, 0.0, 0.2));
    }

    #[test]
    fn test_fixed_body_tilts_about_z() {
        let mut scene = SceneGraph::new();
        let sun = scene.add_node("sun", Transform::trs()).unwrap();
        let rates = RateTables::new().with_axial("sun", 0.12, 2.0);
        let animator = Animator::new(&scene, &[BodySpec::fixed("sun")], rates).unwrap();

        animator.step(&mut scene, 0.001).unwrap();

        let spin = rotation(&scene, sun);
        assert_eq!(spin.x, 0.0);
        assert_eq!(spin.z, 0.12);
        assert!(approx_eq(spin.y, 0.002));
    }

    #[test]
    fn test_missing_nodes_fail_at_construction() {
        let (scene, _, _) = orbiting_scene();

        let missing_body = Animator::new(
            &scene,
            &[BodySpec::orbiting("venus", "mercuryOrbit")],
            RateTables::new(),
        );
        assert!(matches!(missing_body, Err(SceneError::MissingNode(name)) if name == "venus"));

        let missing_pivot = Animator::new(
            &scene,
            &[BodySpec::orbiting("mercury", "venusOrbit")],
            RateTables::new(),
        );
        assert!(matches!(missing_pivot, Err(SceneError::MissingNode(name)) if name == "venusOrbit"));
    }

    #[test]
    fn test_step_on_foreign_scene_fails() {
        let (scene, _, _) = orbiting_scene();
        let animator = Animator::new(
            &scene,
            &[BodySpec::orbiting("mercury", "mercuryOrbit")],
            RateTables::new(),
        )
        .unwrap();

        let mut other = SceneGraph::new();
        assert!(matches!(
            animator.step(&mut other, 0.001),
            Err(SceneError::UnknownNode)
        ));
    }

    #[test]
    fn test_rate_tables_from_json() {
        let rates: RateTables = serde_json::from_str(
            r#"{ "orbitFactors": { "earth": 1.0 }, "axial": { "earth": { "tilt": 0.41 } } }"#,
        )
        .unwrap();

        assert_eq!(rates.orbit_factor("earth"), 1.0);
        assert_eq!(rates.axial("earth").tilt, 0.41);
        assert_eq!(rates.axial("earth").spin_factor, 0.0);
        assert_eq!(rates.orbit_factor("mars"), 0.0);
    }
}
