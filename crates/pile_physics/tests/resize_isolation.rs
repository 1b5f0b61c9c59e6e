//! Resize isolation, exercised through the real system wiring: a
//! window resize between frames may only touch camera-side values,
//! never walls, bodies, or the settled flag.

use bevy::ecs::message::Messages;
use bevy::math::Vec3;
use bevy::prelude::*;
use bevy::window::WindowResized;
use pile_core::{FlatCameraPlugin, ViewportAspect};
use pile_physics::{Container, PhysicsState, PileConfig, PilePhysicsPlugin, SettlementState};

fn test_app() -> App {
    let mut app = App::new();
    app.add_plugins(MinimalPlugins);
    app.add_message::<WindowResized>();
    app.insert_resource(PileConfig::bricks());
    app.add_plugins(FlatCameraPlugin);
    app.add_plugins(PilePhysicsPlugin);
    app
}

fn wall_positions(app: &App) -> Vec<Vec3> {
    let container = app.world().resource::<Container>();
    let physics = app.world().resource::<PhysicsState>();
    container
        .walls
        .iter()
        .map(|wall| {
            let t = physics.rigid_body_set[wall.body].translation();
            Vec3::new(t.x, t.y, t.z)
        })
        .collect()
}

#[test]
fn resize_between_frames_leaves_the_simulation_alone() {
    let mut app = test_app();

    // Let the pile fall and settle.
    for _ in 0..1500 {
        app.update();
    }
    assert!(
        app.world().resource::<SettlementState>().settled,
        "pile should settle within 1500 frames"
    );

    let walls_before = wall_positions(&app);
    let frame_before = app.world().resource::<SettlementState>().frame_count;

    app.world_mut()
        .resource_mut::<Messages<WindowResized>>()
        .write(WindowResized {
            window: Entity::PLACEHOLDER,
            width: 500.0,
            height: 1000.0,
        });
    app.update();

    // Camera-side state moved...
    let aspect = app.world().resource::<ViewportAspect>();
    assert!((aspect.0 - 0.5).abs() < 1e-6);

    // ...and nothing on the simulation side did.
    let settlement = app.world().resource::<SettlementState>();
    assert!(settlement.settled);
    assert_eq!(settlement.frame_count, frame_before + 1);
    assert_eq!(wall_positions(&app), walls_before);
}
