//! Orrery - headless frame driver.
//!
//! Builds a scene (the built-in solar system or a JSON description), then
//! runs the per-frame sequence at a fixed cadence and logs where the drawable
//! bodies are.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::Parser;
use tracing::{debug, info, warn};

use orrery_core::{SimulationConfig, Timer};
use orrery_scene::{Animator, AxialRates, Camera, NodeDescription, SceneGraph, Simulation, presets};

/// Animate a hierarchical scene and report per-object matrices.
#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(about = "Scene-graph transform engine driver")]
struct Cli {
    /// JSON scene description (default: built-in solar system)
    #[arg(long)]
    scene: Option<PathBuf>,

    /// JSON simulation configuration
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Number of frames to run
    #[arg(short, long, default_value_t = 600)]
    ticks: u64,

    /// Override the animation speed multiplier
    #[arg(short, long)]
    speed: Option<f32>,

    /// Viewport aspect ratio
    #[arg(long, default_value_t = 16.0 / 9.0)]
    aspect: f32,

    /// Frames per second to pace at (0 runs unpaced)
    #[arg(long, default_value_t = 60)]
    fps: u32,

    /// Log body positions every N frames
    #[arg(long, default_value_t = 60)]
    report_every: u64,
}

fn load_config(cli: &Cli) -> Result<SimulationConfig> {
    let mut config = match &cli.config {
        Some(path) => SimulationConfig::from_json_file(path)
            .with_context(|| format!("Failed to load config '{}'", path.display()))?,
        None => SimulationConfig::default(),
    };
    if let Some(speed) = cli.speed {
        config.animation.speed_multiplier = speed;
    }
    Ok(config)
}

fn build_simulation(cli: &Cli, config: &SimulationConfig) -> Result<Simulation> {
    let Some(path) = &cli.scene else {
        return Simulation::solar_system(config).context("Failed to build solar system");
    };

    let json = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read scene '{}'", path.display()))?;
    let description = NodeDescription::from_json_str(&json)
        .with_context(|| format!("Failed to parse scene '{}'", path.display()))?;
    let (scene, root) = SceneGraph::from_description(&description)?;

    let bodies = presets::bodies_by_convention(&scene);
    let rates = presets::solar_rates();
    let animated = bodies.iter().any(|body| {
        rates.orbit_factor(&body.name) != 0.0 || rates.axial(&body.name) != AxialRates::default()
    });
    if !animated {
        warn!("No body in this scene has solar system rates; it will not animate");
    }
    let animator = Animator::new(&scene, &bodies, rates)?;

    Ok(Simulation::new(
        scene,
        root,
        animator,
        Camera::from_config(&config.camera),
        config.animation.clone(),
    ))
}

fn report(simulation: &Simulation) {
    let scene = simulation.scene();
    for &id in scene.drawables() {
        if let Some(node) = scene.node(id) {
            let position = node.world_position();
            debug!(
                body = node.name(),
                x = position.x,
                y = position.y,
                z = position.z,
                "World position"
            );
        }
    }
}

fn main() -> Result<()> {
    orrery_core::init_logging();
    let cli = Cli::parse();
    if cli.report_every == 0 {
        bail!("--report-every must be at least 1");
    }

    let config = load_config(&cli)?;
    let mut simulation = build_simulation(&cli, &config)?;
    info!(
        nodes = simulation.scene().len(),
        drawables = simulation.scene().drawables().len(),
        ticks = cli.ticks,
        "Starting simulation"
    );

    let mut timer = Timer::new(cli.fps);
    for _ in 0..cli.ticks {
        simulation.tick(cli.aspect)?;
        std::thread::sleep(timer.remaining());
        timer.tick();

        if timer.ticks() % cli.report_every == 0 {
            info!(
                tick = simulation.ticks(),
                fps = timer.average_rate(),
                "Frame report"
            );
            report(&simulation);
        }
    }

    info!(
        ticks = simulation.ticks(),
        elapsed = ?timer.elapsed(),
        "Simulation finished"
    );
    Ok(())
}
