//! World bounds update system.
//!
//! Keeps [`LineWorldBounds`] in step with [`LineSegment`] edits so a renderer
//! can cull lines without touching their transforms.

use bevy_ecs::prelude::*;

use crate::components::linesegment::LineSegment;
use crate::components::registered::Registered;
use crate::components::worldbounds::LineWorldBounds;

/// Recompute bounds of registered lines whose segment changed.
pub fn update_line_world_bounds(
    mut query: Query<(&LineSegment, &mut LineWorldBounds), (With<Registered>, Changed<LineSegment>)>,
) {
    for (segment, mut bounds) in query.iter_mut() {
        bounds.set_if_neq(LineWorldBounds::from_segment(segment));
    }
}
