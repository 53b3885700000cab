//! Line renderer pipeline setup.
//!
//! Wires the line systems into a [`Schedule`] in dependency order and owns
//! the per-tick driver used by the demo and the integration tests.
//!
//! # Tick order
//!
//! 1. [`LineRendererSet::Register`]: lifecycle scan, then the lifecycle plan is
//!    applied at the sync point bevy inserts after the set
//! 2. [`LineRendererSet::Transform`]: billboard solver and bounds, running on
//!    the now consistent set of registered records
//! 3. `world.clear_trackers()`

use bevy_ecs::prelude::*;
use bevy_tasks::{ComputeTaskPool, TaskPool};

use crate::resources::linebatches::LineBatches;
use crate::resources::lineconfig::LineRendererConfig;
use crate::resources::linestats::{LifecycleStats, SolverStats};
use crate::resources::renderassets::RenderAssets;
use crate::systems::linebounds::update_line_world_bounds;
use crate::systems::lineregister::register_line_segments;
use crate::systems::linetransform::update_line_transforms;

/// Ordering sets for the line systems.
#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LineRendererSet {
    /// Lifecycle reconciliation.
    Register,
    /// Transform and bounds derivation.
    Transform,
}

/// Insert the resources the line systems read and write, keeping any the
/// host already inserted.
pub fn init_line_renderer_resources(world: &mut World) {
    world.init_resource::<RenderAssets>();
    world.init_resource::<LineBatches>();
    world.init_resource::<LifecycleStats>();
    world.init_resource::<SolverStats>();
    world.init_resource::<LineRendererConfig>();
}

/// Add the line systems to a host schedule.
pub fn add_line_renderer_systems(schedule: &mut Schedule) {
    schedule.configure_sets(LineRendererSet::Register.before(LineRendererSet::Transform));
    schedule.add_systems(register_line_segments.in_set(LineRendererSet::Register));
    schedule.add_systems(
        (update_line_transforms, update_line_world_bounds).in_set(LineRendererSet::Transform),
    );
}

/// Self-contained driver running the line systems once per tick.
pub struct LinePipeline {
    schedule: Schedule,
    ticks: u64,
}

impl LinePipeline {
    pub fn new(world: &mut World) -> Self {
        ComputeTaskPool::get_or_init(TaskPool::default);
        init_line_renderer_resources(world);

        let mut schedule = Schedule::default();
        add_line_renderer_systems(&mut schedule);
        Self { schedule, ticks: 0 }
    }

    /// Run one tick to completion.
    pub fn tick(&mut self, world: &mut World) {
        self.schedule.run(world);
        world.clear_trackers();
        self.ticks += 1;
    }

    /// Ticks run so far.
    pub fn ticks(&self) -> u64 {
        self.ticks
    }
}
