//! Billboard transform solver.
//!
//! Computes [`LineTransform`] and [`LocalToWorld`] for every registered line
//! record so its quad spans `from -> to` and faces the active camera.
//!
//! # Change detection
//!
//! Work is driven by bevy change ticks rather than dirty flags. A record is
//! recomputed when its [`LineSegment`] was written since this system last ran,
//! when it was activated since then, or when the camera changed. With a
//! static scene and a static camera the system returns before visiting a
//! single record.
//!
//! # Billboard axis
//!
//! - Perspective: `normalize(camera_position - from)`
//! - Orthographic: `camera_rotation * -Z`, the same for every record
//!
//! The quad's long axis (`+Z`) follows the segment and its `+Y` is turned as
//! close to the billboard axis as possible. When the segment is degenerate or
//! runs parallel to the billboard axis, the record is skipped and keeps its
//! previous transform.
//!
//! # Schedule position
//!
//! Runs after
//! [`register_line_segments`](crate::systems::lineregister::register_line_segments)
//! has been applied.

use std::sync::atomic::{AtomicUsize, Ordering};

use bevy_ecs::batching::BatchingStrategy;
use bevy_ecs::prelude::*;
use glam::{Mat3, Quat, Vec3};
use log::debug;

use crate::components::billboardcamera::{BillboardCamera, CameraTransform, Projection};
use crate::components::linesegment::LineSegment;
use crate::components::linetransform::{LineTransform, LocalToWorld, segment_scale};
use crate::components::registered::Registered;
use crate::resources::lineconfig::LineRendererConfig;
use crate::resources::linestats::SolverStats;

/// Squared length under which a cross product counts as zero.
const COLLINEAR_EPSILON: f32 = 1e-12;

/// Read-only copy of the camera state, shared by every worker.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CameraSnapshot {
    /// No active camera: lines get an identity rotation.
    Missing,
    Perspective { position: Vec3 },
    Orthographic { axis: Vec3 },
}

impl CameraSnapshot {
    pub fn new(camera: &BillboardCamera, transform: &CameraTransform) -> Self {
        match camera.projection {
            Projection::Perspective => CameraSnapshot::Perspective {
                position: transform.translation,
            },
            Projection::Orthographic => CameraSnapshot::Orthographic {
                axis: transform.rotation * Vec3::NEG_Z,
            },
        }
    }

    /// Direction the quad should face for a segment starting at `from`.
    ///
    /// `None` when there is a camera but no usable axis (camera sitting on
    /// `from`). `Some(None)` when there is no camera at all.
    fn billboard_axis(&self, from: Vec3) -> Option<Option<Vec3>> {
        match *self {
            CameraSnapshot::Missing => Some(None),
            CameraSnapshot::Perspective { position } => {
                (position - from).try_normalize().map(Some)
            }
            CameraSnapshot::Orthographic { axis } => axis.try_normalize().map(Some),
        }
    }
}

/// Rotation whose `+Z` is `forward` and whose `+Y` leans toward `up`.
///
/// Both inputs must be unit length. Returns `None` if they are collinear.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let right = up.cross(forward);
    if right.length_squared() <= COLLINEAR_EPSILON || !right.is_finite() {
        return None;
    }
    let right = right.normalize();
    let up = forward.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
}

/// Billboarded transform of one segment, or `None` if it must be skipped.
pub fn solve_segment(segment: &LineSegment, camera: &CameraSnapshot) -> Option<LineTransform> {
    let forward = segment.direction()?;
    let rotation = match camera.billboard_axis(segment.from)? {
        Some(axis) => look_rotation(forward, axis)?,
        None => Quat::IDENTITY,
    };
    Some(LineTransform {
        translation: segment.from,
        rotation,
        scale: segment_scale(segment),
    })
}

/// Camera chosen on the previous run, used to notice switches and removals.
#[derive(Default)]
pub struct TrackedCamera(Option<Entity>);

/// Recompute billboard transforms for records whose inputs changed.
///
/// Records are processed in parallel in fixed-size batches
/// ([`LineRendererConfig::batch_size`]). Each worker only writes the rows of
/// its own batch; the camera is copied into a [`CameraSnapshot`] beforehand.
pub fn update_line_transforms(
    cameras: Query<(Entity, Ref<BillboardCamera>, Ref<CameraTransform>)>,
    changed_lines: Query<(), (With<Registered>, Or<(Changed<LineSegment>, Added<Registered>)>)>,
    mut lines: Query<(Ref<LineSegment>, Ref<Registered>, &mut LineTransform, &mut LocalToWorld)>,
    config: Option<Res<LineRendererConfig>>,
    mut stats: ResMut<SolverStats>,
    mut tracked: Local<TrackedCamera>,
) {
    let active = cameras
        .iter()
        .filter(|(_, camera, _)| camera.active)
        .min_by_key(|(entity, _, _)| *entity);

    let camera_changed = match (&active, tracked.0) {
        (Some((entity, camera, transform)), Some(previous)) if *entity == previous => {
            camera.is_changed() || transform.is_changed()
        }
        (None, None) => false,
        _ => true,
    };
    tracked.0 = active.as_ref().map(|(entity, _, _)| *entity);

    let snapshot = active
        .as_ref()
        .map(|(_, camera, transform)| CameraSnapshot::new(camera, transform))
        .unwrap_or(CameraSnapshot::Missing);

    *stats = SolverStats {
        camera_changed,
        ..SolverStats::default()
    };

    if !camera_changed && changed_lines.is_empty() {
        stats.idle = true;
        return;
    }

    let batch_size = config.map(|c| c.batch_size).unwrap_or(1024).max(1);
    let recomputed = AtomicUsize::new(0);
    let skipped = AtomicUsize::new(0);

    lines
        .par_iter_mut()
        .batching_strategy(BatchingStrategy::fixed(batch_size))
        .for_each(|(segment, registered, mut transform, mut local_to_world)| {
            if !camera_changed && !segment.is_changed() && !registered.is_added() {
                return;
            }
            match solve_segment(&segment, &snapshot) {
                Some(solved) => {
                    *transform = solved;
                    local_to_world.0 = solved.compute_matrix();
                    recomputed.fetch_add(1, Ordering::Relaxed);
                }
                None => {
                    skipped.fetch_add(1, Ordering::Relaxed);
                }
            }
        });

    stats.recomputed = recomputed.into_inner();
    stats.skipped_degenerate = skipped.into_inner();
    debug!(
        "Line transforms: {} recomputed, {} skipped, camera changed: {}",
        stats.recomputed, stats.skipped_degenerate, camera_changed
    );
}
