//! Line renderer configuration resource.
//!
//! Settings are read from an INI file. Missing keys keep their defaults.
//!
//! # Configuration File Format
//!
//! ```ini
//! [lines]
//! batch_size = 1024
//! default_width = 0.1
//!
//! [spawner]
//! segments = 1000
//! styles = 3
//! world_scale = 10.0
//! tau_factor = 1.0
//! spherize = false
//!
//! [camera]
//! projection = perspective
//! distance = 25.0
//! ```

use bevy_ecs::prelude::*;
use configparser::ini::Ini;
use log::{info, warn};
use std::path::PathBuf;

use crate::components::billboardcamera::Projection;
use crate::components::linesegment::{DEFAULT_LINE_WIDTH, clamp_width};

const DEFAULT_BATCH_SIZE: usize = 1024;
const DEFAULT_SEGMENTS: usize = 1000;
const DEFAULT_STYLES: usize = 3;
const DEFAULT_WORLD_SCALE: f32 = 10.0;
const DEFAULT_TAU_FACTOR: f32 = 1.0;
const DEFAULT_CAMERA_DISTANCE: f32 = 25.0;
const DEFAULT_CONFIG_PATH: &str = "./lines.ini";

/// Line renderer configuration.
#[derive(Resource, Debug, Clone)]
pub struct LineRendererConfig {
    /// Records per parallel batch in the transform solver.
    pub batch_size: usize,
    /// Width given to generated or authored lines without one.
    pub default_width: f32,
    /// Number of segments the demo spiral spawns.
    pub segments: usize,
    /// Number of distinct styles the demo cycles through.
    pub styles: usize,
    /// Radius of the demo spiral.
    pub world_scale: f32,
    /// Turns of the demo spiral.
    pub tau_factor: f32,
    /// Push spiral points onto a sphere of radius `world_scale`.
    pub spherize: bool,
    /// Projection of the demo camera.
    pub projection: Projection,
    /// Distance of the demo camera from the origin.
    pub camera_distance: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for LineRendererConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl LineRendererConfig {
    pub fn new() -> Self {
        Self {
            batch_size: DEFAULT_BATCH_SIZE,
            default_width: DEFAULT_LINE_WIDTH,
            segments: DEFAULT_SEGMENTS,
            styles: DEFAULT_STYLES,
            world_scale: DEFAULT_WORLD_SCALE,
            tau_factor: DEFAULT_TAU_FACTOR,
            spherize: false,
            projection: Projection::Perspective,
            camera_distance: DEFAULT_CAMERA_DISTANCE,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file at `config_path`.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    /// Load configuration from INI text.
    pub fn load_from_str(&mut self, text: &str) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .read(text.to_string())
            .map_err(|e| format!("Failed to parse config: {}", e))?;
        self.apply_ini(&config);
        Ok(())
    }

    fn apply_ini(&mut self, config: &Ini) {
        // [lines] section
        if let Some(size) = config.getuint("lines", "batch_size").ok().flatten() {
            self.batch_size = (size as usize).max(1);
        }
        if let Some(width) = config.getfloat("lines", "default_width").ok().flatten() {
            self.default_width = clamp_width(width as f32);
        }

        // [spawner] section
        if let Some(segments) = config.getuint("spawner", "segments").ok().flatten() {
            self.segments = segments as usize;
        }
        if let Some(styles) = config.getuint("spawner", "styles").ok().flatten() {
            self.styles = (styles as usize).max(1);
        }
        if let Some(scale) = config.getfloat("spawner", "world_scale").ok().flatten() {
            self.world_scale = scale as f32;
        }
        if let Some(tau) = config.getfloat("spawner", "tau_factor").ok().flatten() {
            self.tau_factor = tau as f32;
        }
        if let Some(spherize) = config.getbool("spawner", "spherize").ok().flatten() {
            self.spherize = spherize;
        }

        // [camera] section
        if let Some(projection) = config.get("camera", "projection") {
            match projection.parse::<Projection>() {
                Ok(p) => self.projection = p,
                Err(e) => warn!("{}, keeping {:?}", e, self.projection),
            }
        }
        if let Some(distance) = config.getfloat("camera", "distance").ok().flatten() {
            self.camera_distance = distance as f32;
        }

        info!(
            "Loaded config: batch_size={}, default_width={}, segments={}, styles={}, projection={:?}",
            self.batch_size, self.default_width, self.segments, self.styles, self.projection
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = LineRendererConfig::new();
        assert_eq!(c.batch_size, 1024);
        assert_eq!(c.default_width, DEFAULT_LINE_WIDTH);
        assert_eq!(c.projection, Projection::Perspective);
    }

    #[test]
    fn test_load_from_str_overrides_and_clamps() {
        let mut c = LineRendererConfig::new();
        c.load_from_str(
            "[lines]\nbatch_size = 0\ndefault_width = -3.0\n\n[spawner]\nsegments = 12\nstyles = 2\nspherize = true\n\n[camera]\nprojection = orthographic\ndistance = 4.5\n",
        )
        .unwrap();
        assert_eq!(c.batch_size, 1);
        assert_eq!(c.default_width, 0.0);
        assert_eq!(c.segments, 12);
        assert_eq!(c.styles, 2);
        assert!(c.spherize);
        assert_eq!(c.projection, Projection::Orthographic);
        assert_eq!(c.camera_distance, 4.5);
    }

    #[test]
    fn test_unknown_projection_keeps_default() {
        let mut c = LineRendererConfig::new();
        c.load_from_str("[camera]\nprojection = fisheye\n").unwrap();
        assert_eq!(c.projection, Projection::Perspective);
    }

    #[test]
    fn test_missing_file_is_error() {
        let mut c = LineRendererConfig::with_path("./definitely/not/here.ini");
        assert!(c.load_from_file().is_err());
        assert_eq!(c.segments, 1000);
    }
}
