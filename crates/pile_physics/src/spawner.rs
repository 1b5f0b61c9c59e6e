//! Body spawning.
//!
//! All bodies are created in one batch at startup: two columns, one
//! hugging each side of the chamber, starting just above the visible
//! top edge. Each body in a column is shifted slightly toward the
//! center and slightly upward relative to the previous one — the X
//! shift breaks up perfectly vertical stacks (which topple chaotically
//! and look bad), the Y spacing keeps the solver from starting with
//! overlapping bodies. Depth is one shared constant so the pile stays
//! visually coplanar and depth-only collisions cannot happen.
//!
//! Nothing is ever spawned or despawned after this batch.

use bevy::prelude::*;
use pile_core::{visible_bounds, ViewportAspect};
use rapier3d::prelude as rapier;
use rapier::nalgebra::Vector3;

use crate::config::{BodyShape, PileConfig};
use crate::PhysicsState;

/// Which column a body spawned in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnSide {
    Left,
    Right,
}

/// Record of one spawned body.
#[derive(Debug, Clone)]
pub struct PileBody {
    pub body: rapier::RigidBodyHandle,
    pub side: SpawnSide,
    pub index: u32,
    /// Where the body was created; its Z is the pin target for the
    /// depth drift correction.
    pub spawn_position: Vec3,
}

/// Every body created by the startup batch. The length of `bodies` is
/// fixed for the lifetime of the session.
#[derive(Resource, Debug, Clone, Default)]
pub struct SpawnedPile {
    pub bodies: Vec<PileBody>,
}

/// Spawn position for body `index` of a column.
pub fn spawn_position(config: &PileConfig, bounds: Vec2, side: SpawnSide, index: u32) -> Vec3 {
    let i = index as f32;
    let x = match side {
        SpawnSide::Left => -bounds.x / 2.0 + config.spawn_margin + i * config.x_step,
        SpawnSide::Right => bounds.x / 2.0 - config.spawn_margin - i * config.x_step,
    };
    let y = bounds.y / 2.0 + config.spawn_margin + i * config.y_spacing;
    Vec3::new(x, y, config.spawn_depth)
}

/// Create the full batch of `2N` dynamic bodies in the physics world.
pub fn spawn_pile(physics: &mut PhysicsState, config: &PileConfig, bounds: Vec2) -> SpawnedPile {
    let mut pile = SpawnedPile::default();

    for side in [SpawnSide::Left, SpawnSide::Right] {
        for index in 0..config.bodies_per_side {
            let position = spawn_position(config, bounds, side, index);

            let mut body = rapier::RigidBodyBuilder::dynamic()
                .translation(Vector3::new(position.x, position.y, position.z))
                .linear_damping(config.linear_damping)
                .angular_damping(config.angular_damping);
            if matches!(config.shape, BodyShape::Pill { .. }) {
                // Pills may only spin in the viewing plane. Free X/Y
                // rotation lets a capsule tip out of plane and wedge
                // lengthwise against the front or back wall.
                body = body.enabled_rotations(false, false, true);
            }
            let handle = physics.rigid_body_set.insert(body);

            let collider = match config.shape {
                BodyShape::Brick { half_extents } => rapier::ColliderBuilder::cuboid(
                    half_extents.x,
                    half_extents.y,
                    half_extents.z,
                ),
                BodyShape::Pill {
                    radius,
                    half_height,
                } => rapier::ColliderBuilder::capsule_y(half_height, radius),
            }
            .friction(config.friction)
            .restitution(config.restitution);
            physics
                .collider_set
                .insert_with_parent(collider, handle, &mut physics.rigid_body_set);

            pile.bodies.push(PileBody {
                body: handle,
                side,
                index,
                spawn_position: position,
            });
        }
    }

    pile
}

/// Startup system wrapping [`spawn_pile`]. Runs after the container is
/// built so bodies never exist in an unbounded world.
pub fn setup_pile(
    mut physics: ResMut<PhysicsState>,
    mut pile: ResMut<SpawnedPile>,
    config: Res<PileConfig>,
    aspect: Res<ViewportAspect>,
) {
    debug_assert!(pile.bodies.is_empty(), "pile must be spawned once");
    let bounds = visible_bounds(config.view_size, aspect.0);
    *pile = spawn_pile(&mut physics, &config, bounds);
    info!(
        "spawned {} bodies ({} per side), columns start at x = ±{:.2}, y = {:.2}",
        pile.bodies.len(),
        config.bodies_per_side,
        bounds.x / 2.0 - config.spawn_margin,
        bounds.y / 2.0 + config.spawn_margin
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_left_body_matches_scene_constants() {
        let config = PileConfig::bricks();
        let bounds = visible_bounds(config.view_size, 1.6);
        let pos = spawn_position(&config, bounds, SpawnSide::Left, 0);
        assert!((pos.x - (-7.5)).abs() < 1e-5);
        assert!((pos.y - 5.5).abs() < 1e-5);
        assert!((pos.z - (-0.2)).abs() < 1e-5);
    }

    #[test]
    fn columns_step_toward_the_center() {
        let config = PileConfig::bricks();
        let bounds = visible_bounds(config.view_size, 1.6);
        for i in 1..5 {
            let left = spawn_position(&config, bounds, SpawnSide::Left, i);
            let prev_left = spawn_position(&config, bounds, SpawnSide::Left, i - 1);
            assert!(left.x > prev_left.x);

            let right = spawn_position(&config, bounds, SpawnSide::Right, i);
            let prev_right = spawn_position(&config, bounds, SpawnSide::Right, i - 1);
            assert!(right.x < prev_right.x);
        }
    }

    #[test]
    fn columns_are_pre_separated_vertically() {
        let config = PileConfig::bricks();
        let bounds = visible_bounds(config.view_size, 1.6);
        let a = spawn_position(&config, bounds, SpawnSide::Left, 0);
        let b = spawn_position(&config, bounds, SpawnSide::Left, 1);
        assert!((b.y - a.y - config.y_spacing).abs() < 1e-6);
        // Everything starts above the visible top edge.
        assert!(a.y > config.view_size / 2.0);
    }

    #[test]
    fn spawns_two_n_bodies_at_fixed_depth() {
        let config = PileConfig::bricks();
        let mut physics = PhysicsState::new(config.gravity);
        let bounds = visible_bounds(config.view_size, 1.6);
        let pile = spawn_pile(&mut physics, &config, bounds);

        assert_eq!(pile.bodies.len(), 60);
        assert_eq!(physics.rigid_body_set.len(), 60);
        for record in &pile.bodies {
            let body = physics.rigid_body_set.get(record.body).unwrap();
            assert!((body.translation().z - config.spawn_depth).abs() < 1e-6);
            assert!((body.linear_damping() - config.linear_damping).abs() < 1e-6);
            assert!((body.angular_damping() - config.angular_damping).abs() < 1e-6);
        }
    }

    #[test]
    fn zero_bodies_is_a_noop() {
        let mut config = PileConfig::bricks();
        config.bodies_per_side = 0;
        let mut physics = PhysicsState::new(config.gravity);
        let bounds = visible_bounds(config.view_size, 1.6);
        let pile = spawn_pile(&mut physics, &config, bounds);

        assert!(pile.bodies.is_empty());
        assert_eq!(physics.rigid_body_set.len(), 0);
    }
}
