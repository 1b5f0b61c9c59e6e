//! Containment and settlement simulation for the falling-pile
//! background.
//!
//! An invisible five-walled box (top open) is sized to the visible
//! viewport once at startup; a batch of identical rigid bodies drops
//! in from above and piles up under gravity. Each frame the solver
//! advances one tick, depth drift is pinned back to the spawn plane,
//! and a statistical heuristic watches vertical velocities for the
//! moment the pile has come to rest. After that the simulation is left
//! strictly alone — no more corrections, and window resizes never
//! touch physics state.
//!
//! The solver is rapier; this crate owns the full set of rapier
//! pipeline objects in [`PhysicsState`] and treats a pipeline step as
//! atomic and opaque.

use bevy::prelude::*;
use rapier3d::prelude as rapier;
use rapier::nalgebra::Vector3;

pub mod config;
pub mod container;
pub mod settlement;
pub mod simulation;
pub mod spawner;

pub use config::{BodyShape, PileConfig};
pub use container::{build_container, setup_container, Container, Wall, WallSide};
pub use settlement::{count_settled, is_vertical_speed_settled, SettlementState};
pub use simulation::{advance_frame, correct_depth, step_simulation, sync_transforms};
pub use spawner::{setup_pile, spawn_pile, spawn_position, PileBody, SpawnSide, SpawnedPile};

/// The rapier world and everything needed to step it.
#[derive(Resource)]
pub struct PhysicsState {
    pub gravity: Vector3<f32>,
    pub integration_parameters: rapier::IntegrationParameters,
    pub physics_pipeline: rapier::PhysicsPipeline,
    pub island_manager: rapier::IslandManager,
    pub broad_phase: rapier::DefaultBroadPhase,
    pub narrow_phase: rapier::NarrowPhase,
    pub rigid_body_set: rapier::RigidBodySet,
    pub collider_set: rapier::ColliderSet,
    pub impulse_joint_set: rapier::ImpulseJointSet,
    pub multibody_joint_set: rapier::MultibodyJointSet,
    pub ccd_solver: rapier::CCDSolver,
}

impl PhysicsState {
    /// Create an empty world with the given downward gravity magnitude.
    pub fn new(gravity: f32) -> Self {
        Self {
            gravity: Vector3::new(0.0, -gravity, 0.0),
            integration_parameters: rapier::IntegrationParameters::default(),
            physics_pipeline: rapier::PhysicsPipeline::new(),
            island_manager: rapier::IslandManager::new(),
            broad_phase: rapier::DefaultBroadPhase::new(),
            narrow_phase: rapier::NarrowPhase::new(),
            rigid_body_set: rapier::RigidBodySet::new(),
            collider_set: rapier::ColliderSet::new(),
            impulse_joint_set: rapier::ImpulseJointSet::new(),
            multibody_joint_set: rapier::MultibodyJointSet::new(),
            ccd_solver: rapier::CCDSolver::new(),
        }
    }

    /// Advance the world by one solver tick.
    pub fn step(&mut self) {
        self.physics_pipeline.step(
            &self.gravity,
            &self.integration_parameters,
            &mut self.island_manager,
            &mut self.broad_phase,
            &mut self.narrow_phase,
            &mut self.rigid_body_set,
            &mut self.collider_set,
            &mut self.impulse_joint_set,
            &mut self.multibody_joint_set,
            &mut self.ccd_solver,
            None,
            &(),
            &(),
        );
    }
}

impl Default for PhysicsState {
    fn default() -> Self {
        // Gravity is overwritten from the active `PileConfig` when the
        // container is built.
        Self::new(PileConfig::default().gravity)
    }
}

/// Links a render entity to its rapier rigid body.
#[derive(Component)]
pub struct PileBodyLink(pub rapier::RigidBodyHandle);

/// Plugin wiring the container build, the spawn batch, and the
/// per-frame simulation chain.
///
/// Expects a [`PileConfig`] and `pile_core`'s `ViewportAspect` to be
/// present (both have usable defaults). The host app is responsible
/// for seeding the aspect ratio from its window before
/// [`setup_container`] runs.
pub struct PilePhysicsPlugin;

impl Plugin for PilePhysicsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<PileConfig>()
            .init_resource::<pile_core::ViewportAspect>()
            .init_resource::<SettlementState>()
            .init_resource::<Container>()
            .init_resource::<SpawnedPile>()
            .insert_resource(PhysicsState::default())
            .add_systems(Startup, (setup_container, setup_pile).chain())
            .add_systems(Update, (step_simulation, sync_transforms).chain());
    }
}
