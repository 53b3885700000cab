//! Line segment component.
//!
//! A [`LineSegment`] is the geometric half of a line record: two world-space
//! endpoints and a thickness. Together with a
//! [`LineStyle`](super::linestyle::LineStyle) it forms the full input set the
//! [`register_line_segments`](crate::systems::lineregister::register_line_segments)
//! system looks for.
//!
//! # Width
//!
//! `width` is private so every write goes through a clamping setter. Negative
//! (and NaN) widths are stored as `0.0`.

use bevy_ecs::prelude::Component;
use glam::Vec3;

/// Width used when none is given.
pub const DEFAULT_LINE_WIDTH: f32 = 0.1;

/// A single straight, capless line segment in world space.
///
/// This is not a full polyline; a complete line is expected to be built from
/// several independent segments.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct LineSegment {
    /// Start point. The quad pivot sits here.
    pub from: Vec3,
    /// End point.
    pub to: Vec3,
    width: f32,
}

impl LineSegment {
    /// Create a segment. Negative widths are clamped to zero.
    pub fn new(from: Vec3, to: Vec3, width: f32) -> Self {
        Self {
            from,
            to,
            width: clamp_width(width),
        }
    }

    /// Create a segment with [`DEFAULT_LINE_WIDTH`].
    pub fn between(from: Vec3, to: Vec3) -> Self {
        Self::new(from, to, DEFAULT_LINE_WIDTH)
    }

    pub fn width(&self) -> f32 {
        self.width
    }

    /// Set the width, clamping negative values to zero.
    pub fn set_width(&mut self, width: f32) {
        self.width = clamp_width(width);
    }

    pub fn set_from(&mut self, from: Vec3) {
        self.from = from;
    }

    pub fn set_to(&mut self, to: Vec3) {
        self.to = to;
    }

    /// Overwrite every field at once. Width is clamped.
    pub fn set(&mut self, from: Vec3, to: Vec3, width: f32) {
        self.from = from;
        self.to = to;
        self.set_width(width);
    }

    /// Vector from `from` to `to`.
    pub fn vector(&self) -> Vec3 {
        self.to - self.from
    }

    pub fn length(&self) -> f32 {
        self.vector().length()
    }

    /// `true` when both endpoints coincide and there is no direction.
    pub fn is_degenerate(&self) -> bool {
        self.from == self.to
    }

    /// Unit direction `from -> to`, or `None` for a degenerate segment.
    pub fn direction(&self) -> Option<Vec3> {
        if self.is_degenerate() {
            return None;
        }
        self.vector().try_normalize()
    }
}

impl Default for LineSegment {
    fn default() -> Self {
        Self::new(Vec3::ZERO, Vec3::Z, DEFAULT_LINE_WIDTH)
    }
}

impl std::fmt::Display for LineSegment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} -> {} width {}", self.from, self.to, self.width)
    }
}

/// `max(0, width)`; NaN maps to zero.
#[inline]
pub fn clamp_width(width: f32) -> f32 {
    if width > 0.0 { width } else { 0.0 }
}
