//! Data-driven line authoring.
//!
//! A scene file lists line records by endpoint and material name. Loading
//! registers the materials in [`RenderAssets`] and spawns one entity per
//! line with [`LineSegment`] and [`LineStyle`]; the lifecycle system then
//! picks them up like any other record.
//!
//! # JSON Format
//!
//! ```json
//! {
//!   "lines": [
//!     { "from": [0.0, 0.0, 0.0], "to": [0.0, 0.0, 5.0], "width": 0.2, "material": "red" },
//!     { "from": [1.0, 0.0, 0.0], "to": [1.0, 2.0, 0.0], "material": "blue" }
//!   ]
//! }
//! ```
//!
//! `width` is optional and defaults to
//! [`DEFAULT_LINE_WIDTH`](crate::components::linesegment::DEFAULT_LINE_WIDTH).
//! Negative widths are clamped to zero on load.

use bevy_ecs::prelude::*;
use glam::Vec3;
use log::warn;
use serde::{Deserialize, Serialize};

use crate::components::linesegment::{DEFAULT_LINE_WIDTH, LineSegment, clamp_width};
use crate::components::linestyle::LineStyle;
use crate::resources::renderassets::RenderAssets;

fn default_width() -> f32 {
    DEFAULT_LINE_WIDTH
}

/// One authored line.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct LineAuthoring {
    pub from: Vec3,
    pub to: Vec3,
    #[serde(default = "default_width")]
    pub width: f32,
    pub material: String,
}

impl LineAuthoring {
    /// Clamp the width in place, as an editor would on validation.
    pub fn validate(&mut self) {
        if self.width < 0.0 {
            warn!(
                "Line {} -> {} has negative width {}, clamping to 0",
                self.from, self.to, self.width
            );
        }
        self.width = clamp_width(self.width);
    }

    pub fn segment(&self) -> LineSegment {
        LineSegment::new(self.from, self.to, self.width)
    }
}

/// A whole authored scene.
#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LineSceneData {
    pub lines: Vec<LineAuthoring>,
}

impl LineSceneData {
    /// Parse scene JSON, clamping widths.
    pub fn from_json_str(text: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let mut scene: LineSceneData = serde_json::from_str(text)?;
        scene.lines.iter_mut().for_each(LineAuthoring::validate);
        Ok(scene)
    }

    /// Load scene JSON from a file.
    pub fn load_from_file(path: &str) -> Result<Self, Box<dyn std::error::Error>> {
        let file_content = std::fs::read_to_string(path)?;
        Self::from_json_str(&file_content)
    }

    pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    /// Spawn every line as a new entity, returning them in file order.
    pub fn spawn(&self, world: &mut World) -> Vec<Entity> {
        let styles: Vec<LineStyle> = {
            let mut assets = world.get_resource_or_insert_with(RenderAssets::default);
            self.lines
                .iter()
                .map(|line| LineStyle::new(assets.register_material(line.material.as_str())))
                .collect()
        };
        self.lines
            .iter()
            .zip(styles)
            .map(|(line, style)| world.spawn((line.segment(), style)).id())
            .collect()
    }
}
