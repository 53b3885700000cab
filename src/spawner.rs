//! Sample line spawner.
//!
//! Generates a flat spiral of consecutive segments, the scene the demo binary
//! renders. Each segment `i` runs from angle `theta_i` at radius
//! `i / segments * world_scale` to `theta_{i+1}` at radius
//! `(i + 1) / segments * world_scale`, with
//! `theta_step = 2π / segments * tau_factor`.

use bevy_ecs::prelude::*;
use fastrand::Rng;
use glam::{Mat4, Vec3};

use crate::components::linesegment::LineSegment;
use crate::components::linestyle::LineStyle;
use crate::resources::lineconfig::LineRendererConfig;
use crate::resources::renderassets::RenderAssets;

/// Parameters of the spiral.
#[derive(Debug, Clone)]
pub struct SpiralSpawner {
    pub segments: usize,
    pub line_width: f32,
    pub world_scale: f32,
    pub tau_factor: f32,
    /// Push every point onto a sphere of radius `world_scale`.
    pub spherize: bool,
    /// Applied to every generated point.
    pub matrix: Mat4,
}

impl Default for SpiralSpawner {
    fn default() -> Self {
        Self {
            segments: 1000,
            line_width: 0.1,
            world_scale: 1.0,
            tau_factor: 1.0,
            spherize: false,
            matrix: Mat4::IDENTITY,
        }
    }
}

impl SpiralSpawner {
    pub fn from_config(config: &LineRendererConfig) -> Self {
        Self {
            segments: config.segments,
            line_width: config.default_width,
            world_scale: config.world_scale,
            tau_factor: config.tau_factor,
            spherize: config.spherize,
            matrix: Mat4::IDENTITY,
        }
    }

    /// Endpoints of every segment, in order.
    pub fn points(&self) -> Vec<(Vec3, Vec3)> {
        if self.segments == 0 {
            return Vec::new();
        }
        let segments = self.segments as f32;
        let theta_step = std::f32::consts::TAU / segments * self.tau_factor;
        let mut theta = 0.0_f32;
        (0..self.segments)
            .map(|i| {
                let theta_next = theta + theta_step;
                let mut p0 = Vec3::new(theta.cos(), 0.0, theta.sin()) * (i as f32 / segments) * self.world_scale;
                let mut p1 = Vec3::new(theta_next.cos(), 0.0, theta_next.sin())
                    * ((i as f32 + 1.0) / segments)
                    * self.world_scale;
                theta = theta_next;

                p0 = self.matrix.transform_point3(p0);
                p1 = self.matrix.transform_point3(p1);
                if self.spherize {
                    p0 = p0.normalize_or_zero() * self.world_scale;
                    p1 = p1.normalize_or_zero() * self.world_scale;
                }
                (p0, p1)
            })
            .collect()
    }

    /// Spawn the spiral, cycling through `styles`.
    ///
    /// With no styles the entities get a `"default"` material.
    pub fn spawn(&self, world: &mut World, styles: &[LineStyle]) -> Vec<Entity> {
        let fallback;
        let styles = if styles.is_empty() {
            fallback = [LineStyle::new(
                world
                    .get_resource_or_insert_with(RenderAssets::default)
                    .register_material("default"),
            )];
            &fallback[..]
        } else {
            styles
        };

        let bundles: Vec<(LineSegment, LineStyle)> = self
            .points()
            .into_iter()
            .enumerate()
            .map(|(i, (from, to))| (LineSegment::new(from, to, self.line_width), styles[i % styles.len()]))
            .collect();
        world.spawn_batch(bundles).collect()
    }
}

/// Register `count` materials named `line_0..line_{count-1}` and return their styles.
pub fn register_styles(assets: &mut RenderAssets, count: usize) -> Vec<LineStyle> {
    (0..count)
        .map(|i| LineStyle::new(assets.register_material(format!("line_{}", i))))
        .collect()
}

/// Move `fraction` of the line records' `to` points by up to `amount` on each axis.
///
/// Returns the number of records touched. Untouched records keep their
/// change ticks, which is what makes the solver skip them.
pub fn jitter_lines(
    world: &mut World,
    rng: &mut Rng,
    fraction: f32,
    amount: f32,
) -> usize {
    let mut query = world.query::<&mut LineSegment>();
    let mut touched = 0;
    for mut segment in query.iter_mut(world) {
        if rng.f32() >= fraction {
            continue;
        }
        let offset = Vec3::new(
            (rng.f32() * 2.0 - 1.0) * amount,
            (rng.f32() * 2.0 - 1.0) * amount,
            (rng.f32() * 2.0 - 1.0) * amount,
        );
        let to = segment.to + offset;
        segment.set_to(to);
        touched += 1;
    }
    touched
}
