//! Solver-owned transform components.
//!
//! [`LineTransform`] keeps the decomposed translation/rotation/scale of a line
//! quad and [`LocalToWorld`] the composed matrix handed to the renderer. Both
//! are written only by
//! [`update_line_transforms`](crate::systems::linetransform::update_line_transforms)
//! after activation installs their placeholder values.

use bevy_ecs::prelude::Component;
use glam::{Mat4, Quat, Vec3};

use super::linesegment::LineSegment;

/// Decomposed world transform of a line quad.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct LineTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    /// `(width, 1, length)` in the quad's local axes.
    pub scale: Vec3,
}

impl LineTransform {
    /// Un-billboarded transform: pivot at `from`, identity rotation, quad
    /// stretched to the segment's width and length.
    pub fn from_segment(segment: &LineSegment) -> Self {
        Self {
            translation: segment.from,
            rotation: Quat::IDENTITY,
            scale: segment_scale(segment),
        }
    }

    /// `translate * rotate * scale`.
    pub fn compute_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    pub fn is_finite(&self) -> bool {
        self.translation.is_finite() && self.rotation.is_finite() && self.scale.is_finite()
    }
}

impl Default for LineTransform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

/// Scale vector for a segment's quad.
#[inline]
pub fn segment_scale(segment: &LineSegment) -> Vec3 {
    Vec3::new(segment.width(), 1.0, segment.length())
}

/// World matrix of a line record, read by the renderer as instance data.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct LocalToWorld(pub Mat4);

impl LocalToWorld {
    pub fn from_transform(transform: &LineTransform) -> Self {
        Self(transform.compute_matrix())
    }

    pub fn is_finite(&self) -> bool {
        self.0.is_finite()
    }
}

impl Default for LocalToWorld {
    fn default() -> Self {
        Self(Mat4::IDENTITY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_segment_is_simple_trs() {
        let seg = LineSegment::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 7.0), 0.5);
        let t = LineTransform::from_segment(&seg);
        assert_eq!(t.translation, Vec3::new(1.0, 2.0, 3.0));
        assert_eq!(t.rotation, Quat::IDENTITY);
        assert_eq!(t.scale, Vec3::new(0.5, 1.0, 4.0));
    }

    #[test]
    fn test_matrix_maps_quad_far_edge_to_segment_end() {
        let seg = LineSegment::new(Vec3::new(1.0, 2.0, 3.0), Vec3::new(1.0, 2.0, 7.0), 0.5);
        let m = LineTransform::from_segment(&seg).compute_matrix();
        let far = m.transform_point3(Vec3::new(0.0, 0.0, 1.0));
        assert!((far - seg.to).length() < 1e-5);
    }

    #[test]
    fn test_degenerate_placeholder_is_finite() {
        let seg = LineSegment::new(Vec3::ZERO, Vec3::ZERO, 0.2);
        let t = LineTransform::from_segment(&seg);
        assert!(t.is_finite());
        assert!(LocalToWorld::from_transform(&t).is_finite());
    }
}
