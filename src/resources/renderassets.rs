//! Mesh and material registry shared by the line systems.
//!
//! [`RenderAssets`] is the single place the line quad lives. It is built
//! lazily the first time a line record is activated and referenced by handle
//! afterwards. Materials are registered by name so authoring data and the
//! demo can resolve style keys without owning any GPU state.

use bevy_ecs::prelude::Resource;
use glam::{Vec2, Vec3};
use log::info;
use rustc_hash::FxHashMap;

use crate::components::rendermesh::{MaterialHandle, MeshHandle};

/// Name given to the shared line quad.
pub const LINE_MESH_NAME: &str = "quad 1x1, pivot at bottom center";

/// CPU-side mesh description handed to the renderer.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Vec3>,
    pub triangles: Vec<u32>,
    pub normals: Vec<Vec3>,
    pub uvs: Vec<Vec2>,
}

impl MeshData {
    /// The unit quad every line record is drawn with.
    ///
    /// It spans `x` in `[-0.5, 0.5]` and `z` in `[0, 1]` on the `y = 0` plane,
    /// so scaling by `(width, 1, length)` stretches it over a segment starting
    /// at the pivot.
    pub fn line_quad() -> Self {
        Self {
            name: LINE_MESH_NAME.to_string(),
            vertices: vec![
                Vec3::new(-0.5, 0.0, 0.0),
                Vec3::new(0.5, 0.0, 0.0),
                Vec3::new(-0.5, 0.0, 1.0),
                Vec3::new(0.5, 0.0, 1.0),
            ],
            triangles: vec![0, 2, 1, 2, 3, 1],
            normals: vec![Vec3::NEG_Z; 4],
            uvs: vec![
                Vec2::new(0.0, 0.0),
                Vec2::new(1.0, 0.0),
                Vec2::new(0.0, 1.0),
                Vec2::new(1.0, 1.0),
            ],
        }
    }
}

/// A named material. Shading parameters belong to the renderer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Material {
    pub name: String,
}

/// Registry of meshes and materials.
#[derive(Resource, Debug, Default)]
pub struct RenderAssets {
    meshes: Vec<MeshData>,
    materials: Vec<Material>,
    material_names: FxHashMap<String, MaterialHandle>,
    line_mesh: Option<MeshHandle>,
}

impl RenderAssets {
    pub fn new() -> Self {
        Self::default()
    }

    /// Handle of the shared line quad, creating it on first call.
    pub fn line_mesh(&mut self) -> MeshHandle {
        if let Some(handle) = self.line_mesh {
            return handle;
        }
        let handle = self.add_mesh(MeshData::line_quad());
        info!("Created line mesh '{}' as {:?}", LINE_MESH_NAME, handle);
        self.line_mesh = Some(handle);
        handle
    }

    /// Handle of the line quad if it was already created.
    pub fn existing_line_mesh(&self) -> Option<MeshHandle> {
        self.line_mesh
    }

    pub fn add_mesh(&mut self, mesh: MeshData) -> MeshHandle {
        self.meshes.push(mesh);
        MeshHandle((self.meshes.len() - 1) as u32)
    }

    pub fn mesh(&self, handle: MeshHandle) -> Option<&MeshData> {
        self.meshes.get(handle.0 as usize)
    }

    pub fn mesh_count(&self) -> usize {
        self.meshes.len()
    }

    /// Register a material by name. Registering an existing name returns its
    /// handle unchanged.
    pub fn register_material(&mut self, name: impl Into<String>) -> MaterialHandle {
        let name = name.into();
        if let Some(handle) = self.material_names.get(&name) {
            return *handle;
        }
        let handle = MaterialHandle(self.materials.len() as u32);
        self.materials.push(Material { name: name.clone() });
        self.material_names.insert(name, handle);
        handle
    }

    /// Look up a material handle by name.
    pub fn find_material(&self, name: impl AsRef<str>) -> Option<MaterialHandle> {
        self.material_names.get(name.as_ref()).copied()
    }

    pub fn material(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle.0 as usize)
    }

    pub fn material_count(&self) -> usize {
        self.materials.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_line_mesh_created_once() {
        let mut assets = RenderAssets::new();
        assert_eq!(assets.existing_line_mesh(), None);
        let a = assets.line_mesh();
        let b = assets.line_mesh();
        assert_eq!(a, b);
        assert_eq!(assets.mesh_count(), 1);
        assert_eq!(assets.mesh(a).map(|m| m.name.as_str()), Some(LINE_MESH_NAME));
    }

    #[test]
    fn test_line_quad_layout() {
        let quad = MeshData::line_quad();
        assert_eq!(quad.vertices.len(), 4);
        assert_eq!(quad.triangles, vec![0, 2, 1, 2, 3, 1]);
        assert!(quad.vertices.iter().all(|v| v.y == 0.0));
        assert!(quad.vertices.iter().all(|v| v.z >= 0.0 && v.z <= 1.0));
    }

    #[test]
    fn test_register_material_is_idempotent() {
        let mut assets = RenderAssets::new();
        let red = assets.register_material("red");
        let blue = assets.register_material("blue");
        assert_ne!(red, blue);
        assert_eq!(assets.register_material("red"), red);
        assert_eq!(assets.material_count(), 2);
        assert_eq!(assets.find_material("blue"), Some(blue));
        assert_eq!(assets.find_material("green"), None);
        assert_eq!(assets.material(red).map(|m| m.name.as_str()), Some("red"));
    }
}
