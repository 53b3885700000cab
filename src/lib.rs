//! Billboard lines library.
//!
//! Renders-ready transforms for large numbers of thin line segments, derived
//! from their endpoints and the active camera and recomputed only when
//! something changed. Built on **bevy_ecs**:
//!
//! - [`components`] – line records, lifecycle marker, solver outputs, camera
//! - [`resources`] – mesh/material registry, batches, stats, configuration
//! - [`systems`] – lifecycle reconciliation, billboard solver, bounds
//! - [`pipeline`] – schedule wiring and the per-tick driver
//! - [`authoring`] – JSON line scenes
//! - [`spawner`] – sample spiral generator

pub mod authoring;
pub mod components;
pub mod pipeline;
pub mod resources;
pub mod spawner;
pub mod systems;
