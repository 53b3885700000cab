//! Camera components the billboard solver aligns lines to.
//!
//! Any entity with both [`BillboardCamera`] and [`CameraTransform`] is a
//! candidate. The solver picks the active one with the lowest entity id; with
//! no active camera, lines keep an identity rotation.
//!
//! # Convention
//!
//! A camera looks along its local `+Z`. In orthographic mode the billboard
//! axis is `rotation * -Z`, which points from the scene back toward the viewer.

use bevy_ecs::prelude::Component;
use glam::{Mat3, Quat, Vec3};

/// Camera projection mode.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Projection {
    #[default]
    Perspective,
    Orthographic,
}

impl std::str::FromStr for Projection {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "perspective" => Ok(Projection::Perspective),
            "orthographic" | "ortho" => Ok(Projection::Orthographic),
            other => Err(format!("Unknown projection '{}'", other)),
        }
    }
}

/// Marks an entity as a camera lines should face.
#[derive(Component, Clone, Copy, Debug, PartialEq, Eq)]
pub struct BillboardCamera {
    pub projection: Projection,
    /// Inactive cameras are ignored by the solver.
    pub active: bool,
}

impl BillboardCamera {
    pub fn perspective() -> Self {
        Self {
            projection: Projection::Perspective,
            active: true,
        }
    }

    pub fn orthographic() -> Self {
        Self {
            projection: Projection::Orthographic,
            active: true,
        }
    }
}

impl Default for BillboardCamera {
    fn default() -> Self {
        Self::perspective()
    }
}

/// World-space rigid transform of a camera.
#[derive(Component, Clone, Copy, Debug, PartialEq)]
pub struct CameraTransform {
    pub translation: Vec3,
    pub rotation: Quat,
}

impl CameraTransform {
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            rotation: Quat::IDENTITY,
        }
    }

    /// Camera at `eye` whose `+Z` points at `target`.
    ///
    /// Falls back to the identity rotation when `eye == target` or the view
    /// direction is parallel to `up`.
    pub fn looking_at(eye: Vec3, target: Vec3, up: Vec3) -> Self {
        let rotation = (target - eye)
            .try_normalize()
            .and_then(|forward| {
                let right = up.cross(forward).try_normalize()?;
                let up = forward.cross(right);
                Some(Quat::from_mat3(&Mat3::from_cols(right, up, forward)))
            })
            .unwrap_or(Quat::IDENTITY);
        Self {
            translation: eye,
            rotation,
        }
    }

    /// Viewing direction (local `+Z`).
    pub fn forward(&self) -> Vec3 {
        self.rotation * Vec3::Z
    }
}

impl Default for CameraTransform {
    fn default() -> Self {
        Self::from_translation(Vec3::ZERO)
    }
}
