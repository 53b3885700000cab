//! Rendering-batch association.
//!
//! [`RenderMesh`] pairs the shared line quad with a material. Every active
//! line record carries exactly one; a downstream renderer issues one instanced
//! draw per distinct value (see [`LineBatches`](crate::resources::linebatches::LineBatches)).

use bevy_ecs::prelude::Component;

/// Index of a mesh inside [`RenderAssets`](crate::resources::renderassets::RenderAssets).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshHandle(pub u32);

/// Index of a material inside [`RenderAssets`](crate::resources::renderassets::RenderAssets).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MaterialHandle(pub u32);

/// Mesh + material a line record is drawn with.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct RenderMesh {
    pub mesh: MeshHandle,
    pub material: MaterialHandle,
}
