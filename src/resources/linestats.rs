//! Per-tick counters published by the line systems.
//!
//! Both resources are reset at the start of their system's run, so they always
//! describe the most recent tick. The demo logs them; tests use them to check
//! that idle ticks do no work.

use bevy_ecs::prelude::Resource;

/// What the lifecycle system changed on its last run.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LifecycleStats {
    /// Records that received lifecycle state.
    pub activated: usize,
    /// Records whose lifecycle state was stripped because inputs went away.
    pub deactivated: usize,
    /// Active records moved to another batch after a style change.
    pub restyled: usize,
    /// Despawned records dropped from the batch registry.
    pub forgotten: usize,
    /// Distinct styles among the activated records.
    pub activated_groups: usize,
}

impl LifecycleStats {
    /// Total structural mutations applied.
    pub fn mutations(&self) -> usize {
        self.activated + self.deactivated + self.restyled + self.forgotten
    }
}

/// What the transform solver did on its last run.
#[derive(Resource, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SolverStats {
    /// Records whose transform was rewritten.
    pub recomputed: usize,
    /// Records visited but left untouched because the geometry was degenerate.
    pub skipped_degenerate: usize,
    /// The camera moved, rotated, switched projection, appeared or vanished.
    pub camera_changed: bool,
    /// Nothing changed and no record was visited.
    pub idle: bool,
}
