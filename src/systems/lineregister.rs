//! Line record lifecycle system.
//!
//! Keeps exactly one [`Registered`] marker (and the components the renderer
//! and solver need) on every entity that carries both a [`LineSegment`] and a
//! [`LineStyle`], and none on entities that lost either.
//!
//! # Phases
//!
//! 1. **Scan** (this system, read-only): classify records into four groups and
//!    collect them in a [`LifecyclePlan`]:
//!    - *activate*: inputs present, no `Registered`; grouped by style
//!    - *restyle*: registered, style changed to another material; grouped by style
//!    - *deactivate*: registered, `LineSegment` or `LineStyle` missing
//!    - *forget*: registered entity despawned outright
//! 2. **Apply** (deferred command, exclusive world access): the whole plan is
//!    applied in one step once the scan is over. Each style group is inserted
//!    with a single [`World::insert_batch`] call sharing one [`RenderMesh`].
//!
//! # Schedule position
//!
//! Must run before
//! [`update_line_transforms`](crate::systems::linetransform::update_line_transforms)
//! with a sync point between them, so the solver only sees fully activated
//! records. [`LineRendererSet`](crate::pipeline::LineRendererSet) sets that up.

use bevy_ecs::prelude::*;
use log::debug;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::components::linesegment::LineSegment;
use crate::components::linestyle::LineStyle;
use crate::components::linetransform::{LineTransform, LocalToWorld};
use crate::components::registered::Registered;
use crate::components::rendermesh::RenderMesh;
use crate::components::worldbounds::LineWorldBounds;
use crate::resources::linebatches::LineBatches;
use crate::resources::linestats::LifecycleStats;
use crate::resources::renderassets::RenderAssets;

/// Components attached on activation and stripped on teardown.
pub type LineRenderBundle = (
    Registered,
    RenderMesh,
    LineTransform,
    LocalToWorld,
    LineWorldBounds,
);

type EntityGroup = SmallVec<[Entity; 16]>;

/// Structural changes computed by one scan, applied together.
#[derive(Debug, Default)]
pub struct LifecyclePlan {
    activate: FxHashMap<LineStyle, Vec<(Entity, LineSegment)>>,
    restyle: FxHashMap<LineStyle, EntityGroup>,
    deactivate: Vec<Entity>,
    forget: Vec<Entity>,
}

impl LifecyclePlan {
    pub fn is_empty(&self) -> bool {
        self.activate.is_empty()
            && self.restyle.is_empty()
            && self.deactivate.is_empty()
            && self.forget.is_empty()
    }

    /// Apply every mutation with exclusive world access.
    ///
    /// Entities that vanished between the scan and this call are skipped.
    pub fn apply(self, world: &mut World) {
        let mut stats = LifecycleStats::default();

        if !self.activate.is_empty() {
            let mesh = world
                .get_resource_or_insert_with(RenderAssets::default)
                .line_mesh();

            for (style, lines) in self.activate {
                let render_mesh = RenderMesh {
                    mesh,
                    material: style.material,
                };
                let lines: Vec<(Entity, LineSegment)> = lines
                    .into_iter()
                    .filter(|(entity, _)| world.get_entity(*entity).is_ok())
                    .collect();
                if lines.is_empty() {
                    continue;
                }

                stats.activated += lines.len();
                stats.activated_groups += 1;
                world
                    .get_resource_or_insert_with(LineBatches::default)
                    .insert_many(render_mesh, lines.iter().map(|(entity, _)| *entity));

                world.insert_batch(lines.into_iter().map(move |(entity, segment)| {
                    let transform = LineTransform::from_segment(&segment);
                    (
                        entity,
                        (
                            Registered,
                            render_mesh,
                            transform,
                            LocalToWorld::from_transform(&transform),
                            LineWorldBounds::from_segment(&segment),
                        ),
                    )
                }));
            }
        }

        if !self.restyle.is_empty() {
            let mesh = world
                .get_resource_or_insert_with(RenderAssets::default)
                .line_mesh();

            for (style, entities) in self.restyle {
                let render_mesh = RenderMesh {
                    mesh,
                    material: style.material,
                };
                let entities: EntityGroup = entities
                    .into_iter()
                    .filter(|entity| world.get_entity(*entity).is_ok())
                    .collect();
                if entities.is_empty() {
                    continue;
                }

                stats.restyled += entities.len();
                world
                    .get_resource_or_insert_with(LineBatches::default)
                    .insert_many(render_mesh, entities.iter().copied());
                world.insert_batch(entities.into_iter().map(move |entity| (entity, render_mesh)));
            }
        }

        for entity in self.deactivate {
            if let Ok(mut entity_mut) = world.get_entity_mut(entity) {
                entity_mut.remove::<LineRenderBundle>();
                stats.deactivated += 1;
            }
            world
                .get_resource_or_insert_with(LineBatches::default)
                .remove(entity);
        }

        for entity in self.forget {
            // Re-activated since the removal was reported.
            if world.get::<Registered>(entity).is_some() {
                continue;
            }
            if world
                .get_resource_or_insert_with(LineBatches::default)
                .remove(entity)
            {
                stats.forgotten += 1;
            }
        }

        if stats.mutations() > 0 {
            debug!(
                "Line lifecycle: +{} ({} styles) -{} ~{} forgotten {}",
                stats.activated,
                stats.activated_groups,
                stats.deactivated,
                stats.restyled,
                stats.forgotten
            );
        }
        world.insert_resource(stats);
    }
}

/// Query filter for records that lost part of their input set.
type Orphaned = (
    With<Registered>,
    Or<(Without<LineSegment>, Without<LineStyle>)>,
);

/// Reconcile lifecycle state with the current set of line records.
///
/// Safe to run every tick; a tick where nothing changed queues no command.
pub fn register_line_segments(
    new_lines: Query<(Entity, &LineSegment, &LineStyle), Without<Registered>>,
    restyled: Query<
        (Entity, &LineStyle, &RenderMesh),
        (With<Registered>, With<LineSegment>, Changed<LineStyle>),
    >,
    orphaned: Query<Entity, Orphaned>,
    mut removed: RemovedComponents<Registered>,
    mut stats: ResMut<LifecycleStats>,
    mut commands: Commands,
) {
    *stats = LifecycleStats::default();

    let mut plan = LifecyclePlan::default();

    for (entity, segment, style) in new_lines.iter() {
        plan.activate
            .entry(*style)
            .or_default()
            .push((entity, *segment));
    }

    for (entity, style, render_mesh) in restyled.iter() {
        if render_mesh.material != style.material {
            plan.restyle.entry(*style).or_default().push(entity);
        }
    }

    plan.deactivate.extend(orphaned.iter());

    // Entities that still exist lost `Registered` through our own teardown;
    // only despawned ones need forgetting.
    plan.forget.extend(removed.read());

    if plan.is_empty() {
        return;
    }

    commands.queue(move |world: &mut World| plan.apply(world));
}
