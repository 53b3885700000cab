//! ECS resources shared by the line systems.
//!
//! Overview
//! - `linebatches` – active records grouped by mesh and material
//! - `lineconfig` – INI-backed settings (batch size, default width, demo scene)
//! - `linestats` – per-tick lifecycle and solver counters
//! - `renderassets` – lazily created line quad and the material registry
pub mod linebatches;
pub mod lineconfig;
pub mod linestats;
pub mod renderassets;
