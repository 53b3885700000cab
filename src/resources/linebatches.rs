//! Rendering batches grouped by style.
//!
//! [`LineBatches`] mirrors the [`RenderMesh`] components of active line
//! records so a renderer can issue one instanced draw per batch without
//! querying the world. Only the lifecycle system writes it.

use bevy_ecs::prelude::*;
use rustc_hash::{FxHashMap, FxHashSet};

use crate::components::rendermesh::RenderMesh;

/// Active line records keyed by their [`RenderMesh`].
#[derive(Resource, Debug, Default)]
pub struct LineBatches {
    batches: FxHashMap<RenderMesh, FxHashSet<Entity>>,
    membership: FxHashMap<Entity, RenderMesh>,
}

impl LineBatches {
    /// Add a group of entities to one batch. Entities already in another
    /// batch are moved.
    pub fn insert_many(&mut self, render_mesh: RenderMesh, entities: impl IntoIterator<Item = Entity>) {
        let mut moved = Vec::new();
        {
            let batch = self.batches.entry(render_mesh).or_default();
            for entity in entities {
                batch.insert(entity);
                if let Some(previous) = self.membership.insert(entity, render_mesh) {
                    if previous != render_mesh {
                        moved.push((previous, entity));
                    }
                }
            }
        }
        for (previous, entity) in moved {
            self.detach(previous, entity);
        }
    }

    /// Remove an entity from whatever batch holds it.
    ///
    /// Returns `true` if it was a member.
    pub fn remove(&mut self, entity: Entity) -> bool {
        match self.membership.remove(&entity) {
            Some(render_mesh) => {
                self.detach(render_mesh, entity);
                true
            }
            None => false,
        }
    }

    fn detach(&mut self, render_mesh: RenderMesh, entity: Entity) {
        if let Some(batch) = self.batches.get_mut(&render_mesh) {
            batch.remove(&entity);
            if batch.is_empty() {
                self.batches.remove(&render_mesh);
            }
        }
    }

    pub fn batch_of(&self, entity: Entity) -> Option<RenderMesh> {
        self.membership.get(&entity).copied()
    }

    pub fn contains(&self, entity: Entity) -> bool {
        self.membership.contains_key(&entity)
    }

    pub fn get(&self, render_mesh: &RenderMesh) -> Option<&FxHashSet<Entity>> {
        self.batches.get(render_mesh)
    }

    /// Iterate over non-empty batches.
    pub fn iter(&self) -> impl Iterator<Item = (&RenderMesh, &FxHashSet<Entity>)> {
        self.batches.iter()
    }

    /// Number of non-empty batches.
    pub fn len(&self) -> usize {
        self.batches.len()
    }

    pub fn is_empty(&self) -> bool {
        self.batches.is_empty()
    }

    /// Total number of entities across all batches.
    pub fn entity_count(&self) -> usize {
        self.membership.len()
    }

    pub fn clear(&mut self) {
        self.batches.clear();
        self.membership.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::components::rendermesh::{MaterialHandle, MeshHandle};

    fn rm(material: u32) -> RenderMesh {
        RenderMesh {
            mesh: MeshHandle(0),
            material: MaterialHandle(material),
        }
    }

    #[test]
    fn test_insert_and_remove() {
        let mut world = World::new();
        let a = world.spawn_empty().id();
        let b = world.spawn_empty().id();

        let mut batches = LineBatches::default();
        batches.insert_many(rm(0), [a, b]);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches.entity_count(), 2);
        assert_eq!(batches.batch_of(a), Some(rm(0)));

        assert!(batches.remove(a));
        assert!(!batches.remove(a));
        assert_eq!(batches.entity_count(), 1);

        assert!(batches.remove(b));
        assert!(batches.is_empty());
    }

    #[test]
    fn test_reinsert_moves_between_batches() {
        let mut world = World::new();
        let a = world.spawn_empty().id();

        let mut batches = LineBatches::default();
        batches.insert_many(rm(0), [a]);
        batches.insert_many(rm(1), [a]);
        assert_eq!(batches.len(), 1);
        assert_eq!(batches.batch_of(a), Some(rm(1)));
        assert!(batches.get(&rm(0)).is_none());
    }
}
