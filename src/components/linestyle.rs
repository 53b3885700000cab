//! Shared line style component.
//!
//! A [`LineStyle`] is the style key of a line record: records with equal styles
//! share one rendering batch. Equality is by material handle only.

use bevy_ecs::prelude::Component;

use super::rendermesh::MaterialHandle;

/// Properties that may be shared between many line segments.
///
/// Two styles are equal when they reference the same material; the
/// lifecycle system groups new records by this value before attaching their
/// [`RenderMesh`](super::rendermesh::RenderMesh).
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct LineStyle {
    pub material: MaterialHandle,
}

impl LineStyle {
    pub fn new(material: MaterialHandle) -> Self {
        Self { material }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rustc_hash::FxHashSet;

    #[test]
    fn test_equal_materials_are_equal_styles() {
        let a = LineStyle::new(MaterialHandle(3));
        let b = LineStyle::new(MaterialHandle(3));
        let c = LineStyle::new(MaterialHandle(4));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_styles_hash_by_material() {
        let mut set = FxHashSet::default();
        set.insert(LineStyle::new(MaterialHandle(1)));
        set.insert(LineStyle::new(MaterialHandle(1)));
        set.insert(LineStyle::new(MaterialHandle(2)));
        assert_eq!(set.len(), 2);
    }
}
