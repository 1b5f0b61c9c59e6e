//! Brickfall: a decorative pile of falling bricks (or pills) as a
//! full-window background animation.
//!
//! An invisible box the size of the viewport catches a batch of rigid
//! bodies dropped in from above; once the pile settles it is left
//! alone for good, including across window resizes.

use bevy::prelude::*;
use pile_core::FlatCameraPlugin;
use pile_physics::{PileConfig, PilePhysicsPlugin};

mod scene;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Brickfall".into(),
                ..default()
            }),
            ..default()
        }))
        .insert_resource(ClearColor(Color::BLACK))
        // Swap in `PileConfig::pills()` for the pill scene.
        .insert_resource(PileConfig::bricks())
        .add_plugins(FlatCameraPlugin)
        .add_plugins(PilePhysicsPlugin)
        // The aspect ratio must be seeded from the real window before
        // the container is sized, and visuals need the spawn batch.
        .add_systems(
            Startup,
            (
                scene::setup_scene.before(pile_physics::setup_container),
                scene::spawn_pile_visuals.after(pile_physics::setup_pile),
            ),
        )
        .run();
}
