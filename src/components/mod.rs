//! ECS components for line records and cameras.
//!
//! Submodules overview:
//! - [`billboardcamera`] – camera marker, projection mode and rigid transform
//! - [`linesegment`] – endpoints and clamped width of a line record
//! - [`linestyle`] – style key shared by records drawn in one batch
//! - [`linetransform`] – solver-owned TRS and world matrix
//! - [`registered`] – lifecycle marker for activated records
//! - [`rendermesh`] – mesh/material handles and the batch association
//! - [`worldbounds`] – conservative world AABB for culling

pub mod billboardcamera;
pub mod linesegment;
pub mod linestyle;
pub mod linetransform;
pub mod registered;
pub mod rendermesh;
pub mod worldbounds;
