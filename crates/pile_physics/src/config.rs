//! Scenario configuration for the pile simulation.
//!
//! The brick and pill scenes are the same container + spawner +
//! simulation loop with different constants; everything that varies
//! between them lives in [`PileConfig`]. All values are fixed at
//! startup and never reconfigured at runtime.

use bevy::prelude::*;

/// Collision and visual shape of the spawned bodies.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BodyShape {
    /// Rectangular brick, given as collider half-extents.
    Brick { half_extents: Vec3 },
    /// Vertical capsule. `half_height` is the half-length of the
    /// cylindrical segment, so the full pill height is
    /// `2 * (half_height + radius)`.
    Pill { radius: f32, half_height: f32 },
}

impl BodyShape {
    /// Half-extents of the shape's axis-aligned bounding box at
    /// identity rotation.
    pub fn aabb_half_extents(&self) -> Vec3 {
        match *self {
            BodyShape::Brick { half_extents } => half_extents,
            BodyShape::Pill {
                radius,
                half_height,
            } => Vec3::new(radius, half_height + radius, radius),
        }
    }

    /// Smallest half-extent of the shape, the dimension most at risk
    /// of tunneling through a wall.
    pub fn min_half_extent(&self) -> f32 {
        let he = self.aabb_half_extents();
        he.x.min(he.y).min(he.z)
    }
}

/// All tuning constants for one scenario.
#[derive(Resource, Debug, Clone)]
pub struct PileConfig {
    /// Vertical world extent visible through the camera.
    pub view_size: f32,
    /// Downward gravity magnitude.
    pub gravity: f32,
    /// Solid thickness of every container wall. Kept much larger than
    /// the smallest body dimension so a fast body cannot cross a wall
    /// in a single solver step.
    pub wall_thickness: f32,
    /// Nominal Z extent of the container.
    pub container_depth: f32,
    /// Inward offset of the front/back wall faces from the nominal
    /// depth limit, so their solid geometry starts before the edge.
    pub buffer_zone: f32,
    /// Bodies spawned in each of the two columns.
    pub bodies_per_side: u32,
    /// Distance from the visible edge at which a column starts, also
    /// used as the vertical clearance above the visible top.
    pub spawn_margin: f32,
    /// Per-index X shift toward the chamber center, breaking up
    /// perfectly vertical (and physically unstable) stacks.
    pub x_step: f32,
    /// Per-index vertical spacing within a column, enough to avoid
    /// overlapping initial conditions.
    pub y_spacing: f32,
    /// Fixed spawn depth shared by every body.
    pub spawn_depth: f32,
    /// Shape of every spawned body.
    pub shape: BodyShape,
    /// Linear damping applied to each body.
    pub linear_damping: f32,
    /// Angular damping applied to each body.
    pub angular_damping: f32,
    /// Collider friction.
    pub friction: f32,
    /// Collider restitution.
    pub restitution: f32,
    /// Frames to wait before settlement is evaluated at all.
    pub warmup_frames: u64,
    /// Vertical speed below which a body counts as settled.
    pub settle_speed_threshold: f32,
    /// Steady free-fall speed for this gravity/damping pairing
    /// (`gravity / linear_damping`). A body falling at this speed is
    /// treated as stable rather than unsettled.
    pub terminal_fall_speed: f32,
    /// Fraction of bodies that must count as settled before the
    /// settled flag latches.
    pub settle_fraction: f32,
    /// Z drift tolerated before the depth correction writes it back.
    pub depth_tolerance: f32,
}

impl PileConfig {
    /// The brick scene: sixty flat bricks, thirty per side.
    pub fn bricks() -> Self {
        Self {
            view_size: 10.0,
            gravity: 6.0,
            wall_thickness: 0.5,
            container_depth: 2.0,
            buffer_zone: 0.1,
            bodies_per_side: 30,
            spawn_margin: 0.5,
            x_step: 0.08,
            y_spacing: 0.15,
            spawn_depth: -0.2,
            shape: BodyShape::Brick {
                half_extents: Vec3::new(0.75, 0.234_375, 0.375),
            },
            linear_damping: 0.5,
            angular_damping: 0.98,
            friction: 1.0,
            restitution: 0.1,
            warmup_frames: 300,
            settle_speed_threshold: 0.5,
            terminal_fall_speed: 12.0,
            settle_fraction: 0.8,
            depth_tolerance: 0.01,
        }
    }

    /// The pill scene: same container and tuning, capsule bodies.
    pub fn pills() -> Self {
        Self {
            shape: BodyShape::Pill {
                radius: 0.15,
                half_height: 0.22,
            },
            ..Self::bricks()
        }
    }

    /// Total number of bodies the spawner will create.
    pub fn body_count(&self) -> usize {
        self.bodies_per_side as usize * 2
    }
}

impl Default for PileConfig {
    fn default() -> Self {
        Self::bricks()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn brick_dimensions_match_scene() {
        let config = PileConfig::bricks();
        let he = config.shape.aabb_half_extents();
        // Full brick is 1.5 x 0.469 x 0.75.
        assert!((he.x * 2.0 - 1.5).abs() < 1e-6);
        assert!((he.y * 2.0 - 0.468_75).abs() < 1e-6);
        assert!((he.z * 2.0 - 0.75).abs() < 1e-6);
        assert_eq!(config.body_count(), 60);
    }

    #[test]
    fn pill_height_comes_out_right() {
        let config = PileConfig::pills();
        let he = config.shape.aabb_half_extents();
        // Pill is 0.74 tall overall: 0.44 of cylinder plus two 0.15 caps.
        assert!((he.y * 2.0 - 0.74).abs() < 1e-6);
        assert!((config.shape.min_half_extent() - 0.15).abs() < 1e-6);
    }

    #[test]
    fn terminal_speed_matches_gravity_and_damping() {
        let config = PileConfig::bricks();
        assert!((config.terminal_fall_speed - config.gravity / config.linear_damping).abs() < 1e-6);
    }

    #[test]
    fn walls_are_thicker_than_the_thinnest_body_dimension() {
        for config in [PileConfig::bricks(), PileConfig::pills()] {
            assert!(config.wall_thickness > config.shape.min_half_extent());
        }
    }
}
