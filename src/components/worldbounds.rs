//! World-space bounds of a line record, for culling by a downstream renderer.

use bevy_ecs::prelude::Component;
use glam::Vec3;

use super::linesegment::LineSegment;

/// Axis-aligned box enclosing a line quad whatever way it is billboarded.
///
/// The quad sweeps at most `width / 2` away from the segment, so the segment's
/// extent inflated by that amount on every axis is conservative.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct LineWorldBounds {
    pub min: Vec3,
    pub max: Vec3,
}

impl LineWorldBounds {
    pub fn from_segment(segment: &LineSegment) -> Self {
        let half = Vec3::splat(segment.width() * 0.5);
        Self {
            min: segment.from.min(segment.to) - half,
            max: segment.from.max(segment.to) + half,
        }
    }

    pub fn center(&self) -> Vec3 {
        (self.min + self.max) * 0.5
    }

    pub fn contains(&self, point: Vec3) -> bool {
        point.cmpge(self.min).all() && point.cmple(self.max).all()
    }

    pub fn intersects(&self, other: &LineWorldBounds) -> bool {
        self.min.cmple(other.max).all() && self.max.cmpge(other.min).all()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bounds_inflate_by_half_width() {
        let seg = LineSegment::new(Vec3::new(2.0, 0.0, 0.0), Vec3::new(0.0, 1.0, 3.0), 0.5);
        let b = LineWorldBounds::from_segment(&seg);
        assert_eq!(b.min, Vec3::new(-0.25, -0.25, -0.25));
        assert_eq!(b.max, Vec3::new(2.25, 1.25, 3.25));
        assert!(b.contains(seg.from));
        assert!(b.contains(seg.to));
    }

    #[test]
    fn test_intersects() {
        let a = LineWorldBounds::from_segment(&LineSegment::new(Vec3::ZERO, Vec3::X, 0.0));
        let b = LineWorldBounds::from_segment(&LineSegment::new(Vec3::X, Vec3::new(2.0, 0.0, 0.0), 0.0));
        let c = LineWorldBounds::from_segment(&LineSegment::new(
            Vec3::new(5.0, 5.0, 5.0),
            Vec3::new(6.0, 5.0, 5.0),
            0.0,
        ));
        assert!(a.intersects(&b));
        assert!(!a.intersects(&c));
    }
}
