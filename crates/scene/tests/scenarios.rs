//! End-to-end scene scenarios.

use std::f32::consts::FRAC_PI_2;

use glam::{Mat4, Vec3};
use orrery_core::SimulationConfig;
use orrery_scene::{
    Animator, BodySpec, Camera, NodeDescription, RateTables, SceneGraph, Simulation, Transform,
    TransformKind, presets,
};

const EPSILON: f32 = 1e-4;

fn approx_eq_vec3(a: Vec3, b: Vec3) -> bool {
    (a - b).abs().max_element() < EPSILON
}

#[test]
fn test_three_node_chain() {
    let description = NodeDescription::group("root", TransformKind::Trs).with_child(
        NodeDescription::new("a")
            .with_translation(Vec3::new(10.0, 0.0, 0.0))
            .with_child(NodeDescription::new("b").with_translation(Vec3::new(0.0, 5.0, 0.0))),
    );
    let (mut graph, root) = SceneGraph::from_description(&description).unwrap();

    graph.update_world_matrix(root, None).unwrap();

    let b = graph.node_by_name("b").unwrap();
    assert_eq!(
        b.world_matrix().transform_point3(Vec3::ZERO),
        Vec3::new(10.0, 5.0, 0.0)
    );
    assert_eq!(
        b.world_matrix().transform_point3(Vec3::new(1.0, 1.0, 1.0)),
        Vec3::new(11.0, 6.0, 1.0)
    );
}

#[test]
fn test_orbit_pivot_places_child() {
    let description = NodeDescription::group("pivot", TransformKind::Rts)
        .with_translation(Vec3::new(20.0, 0.0, 0.0))
        .with_rotation(Vec3::new(0.0, FRAC_PI_2, 0.0))
        .with_child(NodeDescription::new("body"));
    let (mut graph, root) = SceneGraph::from_description(&description).unwrap();

    graph.update_world_matrix(root, None).unwrap();

    let position = graph.world_position(graph.require("body").unwrap()).unwrap();
    // Right-handed Y rotation takes +X to -Z
    let expected = Mat4::from_rotation_y(FRAC_PI_2).transform_point3(Vec3::new(20.0, 0.0, 0.0));
    assert_eq!(position, expected);
    assert!(approx_eq_vec3(position, Vec3::new(0.0, 0.0, -20.0)));
}

#[test]
fn test_orbit_tick_increment() {
    let description = NodeDescription::group("root", TransformKind::Trs).with_child(
        NodeDescription::group("cometOrbit", TransformKind::Rts)
            .with_translation(Vec3::new(500.0, 0.0, 0.0))
            .with_child(NodeDescription::new("comet")),
    );
    let (mut graph, _) = SceneGraph::from_description(&description).unwrap();
    let rates = RateTables::new().with_orbit_factor("comet", 4.2);
    let animator =
        Animator::new(&graph, &[BodySpec::orbiting("comet", "cometOrbit")], rates).unwrap();

    animator.step(&mut graph, 0.001).unwrap();

    let phase = graph
        .node_by_name("cometOrbit")
        .unwrap()
        .transform()
        .rotation
        .y;
    assert!((phase - 0.0042).abs() < 1e-7);
}

#[test]
fn test_tilt_tracks_phase_after_orbit() {
    let mut simulation = Simulation::solar_system(&SimulationConfig::default()).unwrap();
    let tilt = presets::solar_rates().axial("earth").tilt;

    for _ in 0..250 {
        simulation.tick(1.0).unwrap();
    }

    let scene = simulation.scene();
    let phase = scene.node_by_name("earthOrbit").unwrap().transform().rotation.y;
    let earth = scene.node_by_name("earth").unwrap().transform().rotation;
    assert_eq!(earth.x, -tilt * phase.sin());
    assert_eq!(earth.z, tilt * phase.cos());
}

#[test]
fn test_tilt_axis_fixed_in_world() {
    // The spin axis keeps its world direction as the body orbits
    let mut simulation = Simulation::solar_system(&SimulationConfig::default()).unwrap();
    simulation.set_speed_multiplier(200.0);

    let axis = |simulation: &Simulation| {
        let earth = simulation.scene().node_by_name("earth").unwrap();
        let rotation = earth.transform().rotation;
        // Axis before the spin about local Y is applied
        let tilt_only = Transform::trs().with_rotation(Vec3::new(rotation.x, 0.0, rotation.z));
        let orbit = simulation.scene().node_by_name("earthOrbit").unwrap();
        (orbit.transform().rotation_matrix() * tilt_only.compose())
            .transform_vector3(Vec3::Y)
            .normalize()
    };

    simulation.tick(1.0).unwrap();
    let first = axis(&simulation);
    for _ in 0..5 {
        simulation.tick(1.0).unwrap();
    }
    let later = axis(&simulation);

    assert!(first.dot(later) > 0.999, "{:?} vs {:?}", first, later);
}

#[test]
fn test_reparent_preserves_node_count() {
    let (mut graph, root) = SceneGraph::from_description(&presets::solar_system()).unwrap();
    let total = graph.len();
    let moon_orbit = graph.require("moonOrbit").unwrap();
    let mars_orbit = graph.require("marsOrbit").unwrap();
    let earth_orbit = graph.require("earthOrbit").unwrap();

    graph.set_parent(moon_orbit, Some(mars_orbit)).unwrap();

    assert_eq!(graph.len(), total);
    assert!(!graph.children(earth_orbit).contains(&moon_orbit));
    assert_eq!(
        graph
            .children(mars_orbit)
            .iter()
            .filter(|&&id| id == moon_orbit)
            .count(),
        1
    );

    graph.update_world_matrix(root, None).unwrap();
    let moon = graph.world_position(graph.require("moon").unwrap()).unwrap();
    assert_eq!(moon, Vec3::new(15125.0 + 156.0, 0.0, 0.0));
}

#[test]
fn test_scene_from_json_description() {
    let json = r#"{
        "name": "binary",
        "draw": false,
        "children": [
            { "name": "aOrbit", "nodeType": "RTS", "draw": false,
              "translation": [50.0, 0.0, 0.0],
              "children": [ { "name": "a", "scale": [3.0, 3.0, 3.0] } ] },
            { "name": "bOrbit", "nodeType": "RTS", "draw": false,
              "translation": [-50.0, 0.0, 0.0],
              "children": [ { "name": "b", "cull": "front" } ] }
        ]
    }"#;
    let description = NodeDescription::from_json_str(json).unwrap();
    let (mut graph, root) = SceneGraph::from_description(&description).unwrap();
    let rates = RateTables::new()
        .with_orbit_factor("a", 1.0)
        .with_orbit_factor("b", 1.0);
    let animator = Animator::new(
        &graph,
        &[
            BodySpec::orbiting("a", "aOrbit"),
            BodySpec::orbiting("b", "bOrbit"),
        ],
        rates,
    )
    .unwrap();

    for _ in 0..100 {
        animator.step(&mut graph, 0.01).unwrap();
    }
    graph.update_world_matrix(root, None).unwrap();

    let a = graph.world_position(graph.require("a").unwrap()).unwrap();
    let b = graph.world_position(graph.require("b").unwrap()).unwrap();
    // Both orbit the shared origin and stay opposite each other
    assert!(approx_eq_vec3(a, -b));
    assert!((a.length() - 50.0).abs() < EPSILON);
}

#[test]
fn test_demo_scene_runs_with_solar_rates() {
    let description =
        NodeDescription::from_json_str(include_str!("../../../demos/inner_planets.json")).unwrap();
    let config = SimulationConfig::from_json_str(include_str!("../../../demos/slow.json")).unwrap();
    let (scene, root) = SceneGraph::from_description(&description).unwrap();
    assert_eq!(scene.len(), 9);
    assert_eq!(scene.drawables().len(), 5);

    let bodies = [
        BodySpec::fixed("sun"),
        BodySpec::orbiting("mercury", presets::orbit_name("mercury")),
        BodySpec::orbiting("venus", presets::orbit_name("venus")),
        BodySpec::orbiting("earth", presets::orbit_name("earth")),
    ];
    let animator = Animator::new(&scene, &bodies, presets::solar_rates()).unwrap();
    let mut simulation = Simulation::new(
        scene,
        root,
        animator,
        Camera::from_config(&config.camera),
        config.animation.clone(),
    );

    for _ in 0..30 {
        simulation.tick(16.0 / 9.0).unwrap();
    }

    let scene = simulation.scene();
    let mercury = scene.world_position(scene.require("mercury").unwrap()).unwrap();
    assert!((mercury.length() - 3948.0).abs() < 0.5);
    assert!(mercury.z.abs() > 1.0);
    let pivot = scene.node_by_name("earthOrbit").unwrap().transform().rotation;
    assert!(pivot.y > 0.0);
}
