//! Lifecycle marker for line records.

use bevy_ecs::prelude::Component;

/// Present while a line record is active.
///
/// Only [`register_line_segments`](crate::systems::lineregister::register_line_segments)
/// inserts or removes it. An entity with `Registered` but without a
/// [`LineSegment`](super::linesegment::LineSegment) or
/// [`LineStyle`](super::linestyle::LineStyle) is torn down on the next tick.
#[derive(Component, Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Registered;
