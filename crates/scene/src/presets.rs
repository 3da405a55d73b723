//! Built-in solar system scene and rate tables.
//!
//! Orbit radii and body scales are stylized, not to scale. Orbit factors are
//! relative to Earth's orbital rate; spin factors are relative to the base
//! rate, so with the default base rate Earth spins 0.05 rad per tick and the
//! Moon orbits at 0.01 rad per tick.

use glam::{Vec3, Vec4};

use crate::animation::{BodySpec, RateTables};
use crate::description::NodeDescription;
use crate::graph::SceneGraph;
use crate::transform::TransformKind;

/// Name of the scene root.
pub const ROOT_NAME: &str = "solar system";
pub const SUN_NAME: &str = "sun";

struct Planet {
    name: &'static str,
    radius: f32,
    scale: f32,
    orbit_factor: f32,
    tilt_degrees: f32,
    spin_factor: f32,
}

#[rustfmt::skip]
const PLANETS: [Planet; 9] = [
    Planet { name: "mercury", radius: 3948.0, scale: 2.0, orbit_factor: 4.15, tilt_degrees: 0.03, spin_factor: 0.85 },
    Planet { name: "venus", radius: 7208.0, scale: 5.0, orbit_factor: 1.62, tilt_degrees: 177.4, spin_factor: -0.21 },
    Planet { name: "earth", radius: 9976.0, scale: 5.2, orbit_factor: 1.0, tilt_degrees: 23.44, spin_factor: 50.0 },
    Planet { name: "mars", radius: 15125.0, scale: 5.0, orbit_factor: 0.53, tilt_degrees: 25.19, spin_factor: 48.7 },
    Planet { name: "jupiter", radius: 51874.0, scale: 5.0, orbit_factor: 0.084, tilt_degrees: 3.13, spin_factor: 121.0 },
    Planet { name: "saturn", radius: 95091.0, scale: 5.0, orbit_factor: 0.034, tilt_degrees: 26.73, spin_factor: 112.0 },
    Planet { name: "uranus", radius: 191332.0, scale: 5.0, orbit_factor: 0.012, tilt_degrees: 97.77, spin_factor: -69.4 },
    Planet { name: "neptune", radius: 299832.0, scale: 5.0, orbit_factor: 0.006, tilt_degrees: 28.32, spin_factor: 74.6 },
    Planet { name: "pluto", radius: 393679.0, scale: 1.0, orbit_factor: 0.004, tilt_degrees: 122.53, spin_factor: -7.8 },
];

const MOON: Planet = Planet {
    name: "moon",
    radius: 156.0,
    scale: 1.4,
    orbit_factor: 10.0,
    tilt_degrees: 6.68,
    spin_factor: -10.0,
};

const SUN_SCALE: f32 = 70.0;
const SUN_TILT_DEGREES: f32 = 7.25;
const SUN_SPIN_FACTOR: f32 = 1.85;
const SUN_SURFACE: &str = "Resources/2k_sun.jpg";

/// Name of the orbit pivot carrying `body`.
pub fn orbit_name(body: &str) -> String {
    format!("{body}Orbit")
}

fn body(planet: &Planet, offset: Vec4, mult: Vec4) -> NodeDescription {
    NodeDescription::new(planet.name)
        .with_scale(Vec3::splat(planet.scale))
        .with_colors(offset, mult)
}

fn orbit(planet: &Planet) -> NodeDescription {
    NodeDescription::group(orbit_name(planet.name), TransformKind::Rts)
        .with_translation(Vec3::new(planet.radius, 0.0, 0.0))
}

/// Scene description of the sun, planets and Earth's moon.
pub fn solar_system() -> NodeDescription {
    let planet_offset = Vec4::new(0.2, 0.5, 0.8, 1.0);
    let planet_mult = Vec4::new(0.8, 0.5, 0.2, 1.0);

    let sun = NodeDescription::new(SUN_NAME)
        .with_scale(Vec3::splat(SUN_SCALE))
        .with_surface(SUN_SURFACE)
        .with_colors(Vec4::new(0.6, 0.6, 0.0, 1.0), Vec4::new(0.4, 0.4, 0.0, 1.0));

    let mut root = NodeDescription::group(ROOT_NAME, TransformKind::Trs).with_child(sun);
    for planet in &PLANETS {
        let mut pivot = orbit(planet).with_child(body(planet, planet_offset, planet_mult));
        if planet.name == "earth" {
            let moon = body(
                &MOON,
                Vec4::new(0.6, 0.6, 0.6, 1.0),
                Vec4::new(0.1, 0.1, 0.1, 1.0),
            );
            pivot = pivot.with_child(orbit(&MOON).with_child(moon));
        }
        root = root.with_child(pivot);
    }
    root
}

/// Bodies animated in the solar system scene, sun first.
pub fn solar_bodies() -> Vec<BodySpec> {
    std::iter::once(BodySpec::fixed(SUN_NAME))
        .chain(
            PLANETS
                .iter()
                .chain(std::iter::once(&MOON))
                .map(|planet| BodySpec::orbiting(planet.name, orbit_name(planet.name))),
        )
        .collect()
}

/// Bodies of an arbitrary scene, bound by the `<name>Orbit` convention.
///
/// Every drawable whose direct parent is named [`orbit_name`] of it orbits on
/// that parent; all other drawables spin in place.
pub fn bodies_by_convention(scene: &SceneGraph) -> Vec<BodySpec> {
    scene
        .drawables()
        .iter()
        .filter_map(|&id| {
            let node = scene.node(id)?;
            let pivot = orbit_name(node.name());
            let parent_is_pivot = scene
                .parent(id)
                .and_then(|parent| scene.node(parent))
                .is_some_and(|parent| parent.name() == pivot);
            Some(if parent_is_pivot {
                BodySpec::orbiting(node.name(), pivot)
            } else {
                BodySpec::fixed(node.name())
            })
        })
        .collect()
}

/// Orbit, tilt and spin tables for the solar system scene.
pub fn solar_rates() -> RateTables {
    PLANETS
        .iter()
        .chain(std::iter::once(&MOON))
        .fold(
            RateTables::new().with_axial(SUN_NAME, SUN_TILT_DEGREES.to_radians(), SUN_SPIN_FACTOR),
            |rates, planet| {
                rates
                    .with_orbit_factor(planet.name, planet.orbit_factor)
                    .with_axial(planet.name, planet.tilt_degrees.to_radians(), planet.spin_factor)
            },
        )
}
