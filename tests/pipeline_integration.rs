//! Pipeline Integration Tests
//!
//! Drive [`LinePipeline`] the way the demo binary does: configuration, an
//! authored or generated scene, a camera and a run of ticks.
//!
//! # Usage
//!
//! ```sh
//! cargo test --test pipeline_integration
//! ```

use bevy_ecs::prelude::*;
use glam::Vec3;

use billboard_lines::authoring::LineSceneData;
use billboard_lines::components::billboardcamera::{BillboardCamera, CameraTransform, Projection};
use billboard_lines::components::linesegment::LineSegment;
use billboard_lines::components::linetransform::LocalToWorld;
use billboard_lines::components::registered::Registered;
use billboard_lines::components::rendermesh::RenderMesh;
use billboard_lines::pipeline::{LinePipeline, LineRendererSet, add_line_renderer_systems, init_line_renderer_resources};
use billboard_lines::resources::linebatches::LineBatches;
use billboard_lines::resources::lineconfig::LineRendererConfig;
use billboard_lines::resources::linestats::{LifecycleStats, SolverStats};
use billboard_lines::resources::renderassets::RenderAssets;
use billboard_lines::spawner::{SpiralSpawner, jitter_lines, register_styles};

const SCENE: &str = r#"{
    "lines": [
        { "from": [0.0, 0.0, 0.0], "to": [0.0, 0.0, 5.0], "width": 0.2, "material": "red" },
        { "from": [1.0, 0.0, 0.0], "to": [1.0, 2.0, 0.0], "material": "blue" },
        { "from": [2.0, 0.0, 0.0], "to": [2.0, 0.0, 0.0], "width": -1.0, "material": "red" }
    ]
}"#;

fn all_matrices_finite(world: &mut World) -> bool {
    world
        .query::<&LocalToWorld>()
        .iter(world)
        .all(|ltw| ltw.is_finite())
}

#[test]
fn authored_scene_runs_through_pipeline() {
    let mut world = World::new();
    let mut pipeline = LinePipeline::new(&mut world);
    let scene = LineSceneData::from_json_str(SCENE).unwrap();
    let entities = scene.spawn(&mut world);
    world.spawn((
        BillboardCamera::perspective(),
        CameraTransform::looking_at(Vec3::new(0.0, 0.0, -10.0), Vec3::ZERO, Vec3::Y),
    ));

    pipeline.tick(&mut world);

    assert_eq!(pipeline.ticks(), 1);
    let lifecycle = *world.resource::<LifecycleStats>();
    assert_eq!(lifecycle.activated, 3);
    assert_eq!(lifecycle.activated_groups, 2);

    let batches = world.resource::<LineBatches>();
    assert_eq!(batches.len(), 2);
    let red = world.resource::<RenderAssets>().find_material("red").unwrap();
    let red_batch = batches.iter().find(|(rm, _)| rm.material == red).unwrap().1;
    assert_eq!(red_batch.len(), 2);
    assert!(red_batch.contains(&entities[0]));
    assert!(red_batch.contains(&entities[2]));

    assert_eq!(world.get::<LineSegment>(entities[2]).unwrap().width(), 0.0);
    assert!(all_matrices_finite(&mut world));
}

#[test]
fn config_drives_spawner_and_camera() {
    let mut config = LineRendererConfig::new();
    config
        .load_from_str(
            "[lines]\nbatch_size = 16\ndefault_width = 0.05\n\n[spawner]\nsegments = 90\nstyles = 4\nworld_scale = 5.0\n\n[camera]\nprojection = ortho\n",
        )
        .unwrap();
    assert_eq!(config.projection, Projection::Orthographic);

    let mut world = World::new();
    world.insert_resource(config.clone());
    let mut pipeline = LinePipeline::new(&mut world);
    assert_eq!(world.resource::<LineRendererConfig>().batch_size, 16);

    let styles = register_styles(&mut world.resource_mut::<RenderAssets>(), config.styles);
    let entities = SpiralSpawner::from_config(&config).spawn(&mut world, &styles);
    world.spawn((
        BillboardCamera {
            projection: config.projection,
            active: true,
        },
        CameraTransform::looking_at(Vec3::new(0.0, 10.0, -10.0), Vec3::ZERO, Vec3::Y),
    ));

    pipeline.tick(&mut world);

    assert_eq!(entities.len(), 90);
    assert_eq!(world.resource::<LineBatches>().len(), 4);
    assert!(
        entities
            .iter()
            .all(|e| world.get::<LineSegment>(*e).unwrap().width() == 0.05)
    );
    let solver = *world.resource::<SolverStats>();
    assert_eq!(solver.recomputed + solver.skipped_degenerate, 90);
}

#[test]
fn jitter_only_recomputes_touched_lines() {
    let mut world = World::new();
    let mut pipeline = LinePipeline::new(&mut world);
    let styles = register_styles(&mut world.resource_mut::<RenderAssets>(), 2);
    SpiralSpawner {
        segments: 200,
        world_scale: 10.0,
        ..SpiralSpawner::default()
    }
    .spawn(&mut world, &styles);
    world.spawn((
        BillboardCamera::perspective(),
        CameraTransform::looking_at(Vec3::new(0.0, 20.0, -20.0), Vec3::ZERO, Vec3::Y),
    ));
    pipeline.tick(&mut world);

    let mut rng = fastrand::Rng::with_seed(3);
    for _ in 0..5 {
        let touched = jitter_lines(&mut world, &mut rng, 0.1, 0.05);
        pipeline.tick(&mut world);
        let solver = *world.resource::<SolverStats>();
        assert_eq!(solver.recomputed + solver.skipped_degenerate, touched);
        assert_eq!(solver.idle, touched == 0);
        assert_eq!(world.resource::<LifecycleStats>().mutations(), 0);
    }
    assert!(all_matrices_finite(&mut world));
}

#[test]
fn records_spawned_mid_run_are_picked_up() {
    let mut world = World::new();
    let mut pipeline = LinePipeline::new(&mut world);
    let style = register_styles(&mut world.resource_mut::<RenderAssets>(), 1)[0];
    pipeline.tick(&mut world);
    pipeline.tick(&mut world);
    assert!(world.resource::<LineBatches>().is_empty());

    let late = world
        .spawn((LineSegment::new(Vec3::ZERO, Vec3::Y, 0.1), style))
        .id();
    pipeline.tick(&mut world);

    assert!(world.get::<Registered>(late).is_some());
    assert!(world.get::<RenderMesh>(late).is_some());
    assert_eq!(world.resource::<SolverStats>().recomputed, 1);
}

#[derive(Resource, Default)]
struct ObservedRegistered(usize);

fn observe_registered(query: Query<(), With<Registered>>, mut seen: ResMut<ObservedRegistered>) {
    seen.0 = query.iter().count();
}

#[test]
fn host_schedule_sees_activation_within_same_tick() {
    let mut world = World::new();
    init_line_renderer_resources(&mut world);
    world.init_resource::<ObservedRegistered>();
    bevy_tasks::ComputeTaskPool::get_or_init(bevy_tasks::TaskPool::default);

    let mut schedule = Schedule::default();
    add_line_renderer_systems(&mut schedule);
    schedule.add_systems(observe_registered.after(LineRendererSet::Register));

    let style = register_styles(&mut world.resource_mut::<RenderAssets>(), 1)[0];
    for i in 0..5 {
        world.spawn((LineSegment::new(Vec3::ZERO, Vec3::new(i as f32, 1.0, 0.0), 0.1), style));
    }

    schedule.run(&mut world);

    assert_eq!(world.resource::<ObservedRegistered>().0, 5);
}
