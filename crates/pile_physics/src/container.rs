//! Container construction.
//!
//! Five fixed walls close off the bottom, sides, front, and back of an
//! invisible box sized to the visible viewport; the top stays open so
//! bodies can drop in from above the visible edge. Bottom and side
//! walls sit with their inner face flush with the visible edge and
//! their thickness extending outward. The front and back walls pull
//! their inner face *inward* by a small buffer so that solid collision
//! geometry starts before the nominal depth limit — a fast body meets
//! wall interior, not a razor-thin boundary it could cross in one
//! solver step.
//!
//! Wall positions derive from the visible bounds observed at startup
//! and are never recomputed. Resizes only touch the camera (see
//! `pile_core::flat_camera`), so a settled pile is never disturbed by
//! a window change.

use bevy::prelude::*;
use pile_core::{visible_bounds, ViewportAspect};
use rapier3d::prelude as rapier;
use rapier::nalgebra::Vector3;

use crate::config::PileConfig;
use crate::PhysicsState;

/// Which boundary a wall closes off.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WallSide {
    Bottom,
    Left,
    Right,
    Front,
    Back,
}

/// Record of one constructed wall.
#[derive(Debug, Clone)]
pub struct Wall {
    pub side: WallSide,
    pub body: rapier::RigidBodyHandle,
    /// Collider center at construction time. Walls are fixed bodies;
    /// this must never change for the lifetime of the session.
    pub position: Vec3,
    /// Collider half-extents.
    pub half_extents: Vec3,
}

/// The walls built at startup, plus the bounds they were derived from.
#[derive(Resource, Debug, Clone, Default)]
pub struct Container {
    pub walls: Vec<Wall>,
    /// Visible width/height at construction time.
    pub bounds: Vec2,
}

impl Container {
    /// Inner X/Y/Z extents of the open chamber: `x` and `y` are the
    /// half-width/half-height at the wall faces, `z` the half-depth at
    /// the front/back buffer faces.
    pub fn inner_half_extents(&self, config: &PileConfig) -> Vec3 {
        Vec3::new(
            self.bounds.x / 2.0,
            self.bounds.y / 2.0,
            config.container_depth / 2.0 - config.buffer_zone,
        )
    }
}

/// Build the five container walls into the physics world.
///
/// Called exactly once, before any body is spawned; the returned
/// record is the only handle anything keeps to the walls.
pub fn build_container(physics: &mut PhysicsState, config: &PileConfig, aspect: f32) -> Container {
    let bounds = visible_bounds(config.view_size, aspect);
    let (half_w, half_h) = (bounds.x / 2.0, bounds.y / 2.0);
    let t = config.wall_thickness;
    let half_d = config.container_depth / 2.0;
    // Front/back faces start this far inside the nominal depth limit.
    let inner_z = half_d - config.buffer_zone;

    let mut walls = Vec::with_capacity(5);
    let mut wall = |physics: &mut PhysicsState, side, position: Vec3, half_extents: Vec3| {
        let body = rapier::RigidBodyBuilder::fixed()
            .translation(Vector3::new(position.x, position.y, position.z));
        let handle = physics.rigid_body_set.insert(body);
        let collider =
            rapier::ColliderBuilder::cuboid(half_extents.x, half_extents.y, half_extents.z);
        physics
            .collider_set
            .insert_with_parent(collider, handle, &mut physics.rigid_body_set);
        walls.push(Wall {
            side,
            body: handle,
            position,
            half_extents,
        });
    };

    // Bottom slab, widened past the side walls and deepened past the
    // front/back walls so there is no gap at any corner.
    wall(
        physics,
        WallSide::Bottom,
        Vec3::new(0.0, -half_h - t / 2.0, 0.0),
        Vec3::new(half_w + t, t / 2.0, half_d + t),
    );
    wall(
        physics,
        WallSide::Left,
        Vec3::new(-half_w - t / 2.0, 0.0, 0.0),
        Vec3::new(t / 2.0, half_h, half_d),
    );
    wall(
        physics,
        WallSide::Right,
        Vec3::new(half_w + t / 2.0, 0.0, 0.0),
        Vec3::new(t / 2.0, half_h, half_d),
    );
    wall(
        physics,
        WallSide::Front,
        Vec3::new(0.0, 0.0, inner_z + t / 2.0),
        Vec3::new(half_w, half_h, t / 2.0),
    );
    wall(
        physics,
        WallSide::Back,
        Vec3::new(0.0, 0.0, -inner_z - t / 2.0),
        Vec3::new(half_w, half_h, t / 2.0),
    );

    info!(
        "container built: visible {:.2}x{:.2}, depth {:.2} (faces at ±{:.2}), wall thickness {:.2}",
        bounds.x, bounds.y, config.container_depth, inner_z, t
    );

    Container { walls, bounds }
}

/// Startup system wrapping [`build_container`].
pub fn setup_container(
    mut physics: ResMut<PhysicsState>,
    mut container: ResMut<Container>,
    config: Res<PileConfig>,
    aspect: Res<ViewportAspect>,
) {
    debug_assert!(container.walls.is_empty(), "container must be built once");
    physics.gravity = Vector3::new(0.0, -config.gravity, 0.0);
    *container = build_container(&mut physics, &config, aspect.0);
}
