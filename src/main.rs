//! Billboard lines demo entry point.
//!
//! A headless driver for the line pipeline using:
//! - **bevy_ecs** for the entity-component-system world and schedules
//! - **glam** for vector and matrix math
//!
//! It spawns a spiral of line segments (or a JSON scene), places a camera,
//! and runs a number of ticks while logging what the lifecycle and transform
//! systems did. Nothing is drawn; the per-batch instance data a renderer
//! would submit is summarised at the end.
//!
//! # Main Loop
//!
//! 1. Load `lines.ini` (defaults when missing) and apply CLI overrides
//! 2. Spawn the lines and the camera
//! 3. For every tick: optionally orbit the camera and jitter some lines, then
//!    run [`LinePipeline::tick`]
//! 4. Report batch sizes and solver totals
//!
//! # Running
//!
//! ```sh
//! RUST_LOG=debug cargo run --release -- --ticks 120 --orbit --jitter 0.05
//! ```

use bevy_ecs::prelude::*;
use clap::Parser;
use glam::Vec3;
use std::path::PathBuf;

use billboard_lines::authoring::LineSceneData;
use billboard_lines::components::billboardcamera::{BillboardCamera, CameraTransform, Projection};
use billboard_lines::components::linetransform::LocalToWorld;
use billboard_lines::pipeline::LinePipeline;
use billboard_lines::resources::linebatches::LineBatches;
use billboard_lines::resources::lineconfig::LineRendererConfig;
use billboard_lines::resources::linestats::{LifecycleStats, SolverStats};
use billboard_lines::resources::renderassets::RenderAssets;
use billboard_lines::spawner::{SpiralSpawner, jitter_lines, register_styles};

/// Billboarded line segment pipeline demo
#[derive(Parser)]
#[command(version, about = "Runs the billboard line pipeline headless and reports what it did.")]
struct Cli {
    /// INI configuration file.
    #[arg(long, value_name = "PATH", default_value = "./lines.ini")]
    config: PathBuf,

    /// JSON scene to spawn instead of the generated spiral.
    #[arg(long, value_name = "PATH")]
    scene: Option<PathBuf>,

    /// Number of spiral segments (overrides the config file).
    #[arg(long)]
    segments: Option<usize>,

    /// Number of distinct styles (overrides the config file).
    #[arg(long)]
    styles: Option<usize>,

    /// Ticks to run.
    #[arg(long, default_value_t = 60)]
    ticks: u32,

    /// Use an orthographic camera.
    #[arg(long)]
    orthographic: bool,

    /// Orbit the camera around the origin every tick.
    #[arg(long)]
    orbit: bool,

    /// Fraction of lines to perturb every tick.
    #[arg(long, default_value_t = 0.0)]
    jitter: f32,

    /// Seed for the jitter generator.
    #[arg(long, default_value_t = 7)]
    seed: u64,
}

fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    let mut config = LineRendererConfig::with_path(&cli.config);
    if let Err(e) = config.load_from_file() {
        log::warn!("{}, using defaults", e);
    }
    if let Some(segments) = cli.segments {
        config.segments = segments;
    }
    if let Some(styles) = cli.styles {
        config.styles = styles.max(1);
    }
    if cli.orthographic {
        config.projection = Projection::Orthographic;
    }

    log::info!("Hello, world! This is the billboard line demo!");

    // --------------- ECS world + resources ---------------
    let mut world = World::new();
    world.insert_resource(config.clone());
    let mut pipeline = LinePipeline::new(&mut world);

    let entities = match &cli.scene {
        Some(path) => {
            let path = path.to_string_lossy();
            match LineSceneData::load_from_file(&path) {
                Ok(scene) => scene.spawn(&mut world),
                Err(e) => {
                    eprintln!("Error loading scene {}: {e}", path);
                    std::process::exit(1);
                }
            }
        }
        None => {
            let styles = register_styles(&mut world.resource_mut::<RenderAssets>(), config.styles);
            SpiralSpawner::from_config(&config).spawn(&mut world, &styles)
        }
    };
    log::info!("Spawned {} line records", entities.len());

    let camera_position = Vec3::new(0.0, config.camera_distance * 0.5, -config.camera_distance);
    let camera = world
        .spawn((
            BillboardCamera {
                projection: config.projection,
                active: true,
            },
            CameraTransform::looking_at(camera_position, Vec3::ZERO, Vec3::Y),
        ))
        .id();

    // --------------- Main loop ---------------
    let mut rng = fastrand::Rng::with_seed(cli.seed);
    let mut total_recomputed = 0usize;
    let mut idle_ticks = 0u32;

    for tick in 0..cli.ticks {
        if cli.orbit {
            let angle = tick as f32 * 0.02;
            let eye = Vec3::new(
                angle.sin() * config.camera_distance,
                config.camera_distance * 0.5,
                -angle.cos() * config.camera_distance,
            );
            if let Some(mut transform) = world.get_mut::<CameraTransform>(camera) {
                *transform = CameraTransform::looking_at(eye, Vec3::ZERO, Vec3::Y);
            }
        }
        if cli.jitter > 0.0 {
            jitter_lines(&mut world, &mut rng, cli.jitter, 0.05);
        }

        pipeline.tick(&mut world);

        let lifecycle = *world.resource::<LifecycleStats>();
        let solver = *world.resource::<SolverStats>();
        if lifecycle.mutations() > 0 {
            log::info!(
                "Tick {}: activated {} in {} styles, deactivated {}",
                tick,
                lifecycle.activated,
                lifecycle.activated_groups,
                lifecycle.deactivated
            );
        }
        log::debug!(
            "Tick {}: recomputed {}, skipped {}, camera changed {}",
            tick,
            solver.recomputed,
            solver.skipped_degenerate,
            solver.camera_changed
        );
        total_recomputed += solver.recomputed;
        if solver.idle {
            idle_ticks += 1;
        }
    }

    // --------------- Report ---------------
    let batches = world.resource::<LineBatches>();
    let assets = world.resource::<RenderAssets>();
    let mut non_finite = 0usize;
    for (render_mesh, members) in batches.iter() {
        let material = assets
            .material(render_mesh.material)
            .map(|m| m.name.as_str())
            .unwrap_or("?");
        log::info!(
            "Batch mesh {:?} material '{}': {} instances",
            render_mesh.mesh,
            material,
            members.len()
        );
        non_finite += members
            .iter()
            .filter_map(|entity| world.get::<LocalToWorld>(*entity))
            .filter(|ltw| !ltw.is_finite())
            .count();
    }
    log::info!(
        "{} ticks: {} transforms recomputed, {} idle ticks, {} batches, {} non-finite matrices",
        pipeline.ticks(),
        total_recomputed,
        idle_ticks,
        batches.len(),
        non_finite
    );
}
