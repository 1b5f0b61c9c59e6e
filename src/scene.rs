//! Visual presentation: camera, lights, and the meshes mirroring the
//! physics bodies. Everything here reads simulation state; nothing
//! writes it.

use bevy::prelude::*;
use bevy::window::PrimaryWindow;
use pile_core::{palette, FlatCameraBundle, ViewportAspect};
use pile_physics::{BodyShape, PileBodyLink, PileConfig, SpawnedPile};

/// Camera distance along +Z. The container sits around the origin, so
/// anything it holds is well inside the 0.1..100 clip range.
const CAMERA_DISTANCE: f32 = 10.0;

/// Spawn the flat camera and lights, and seed the shared aspect ratio
/// from the primary window so the container is sized to what is
/// actually visible.
pub fn setup_scene(
    mut commands: Commands,
    config: Res<PileConfig>,
    mut aspect: ResMut<ViewportAspect>,
    windows: Query<&Window, With<PrimaryWindow>>,
) {
    let mut window_height = 720.0;
    if let Ok(window) = windows.single() {
        if window.width() > 0.0 && window.height() > 0.0 {
            aspect.0 = window.width() / window.height();
            window_height = window.height();
        }
    }

    commands.spawn(FlatCameraBundle::new(
        config.view_size,
        CAMERA_DISTANCE,
        window_height,
    ));

    commands.insert_resource(AmbientLight {
        color: Color::WHITE,
        brightness: 400.0,
        ..default()
    });
    commands.spawn((
        DirectionalLight {
            illuminance: 8000.0,
            shadows_enabled: false,
            ..default()
        },
        Transform::from_xyz(5.0, 8.0, 5.0).looking_at(Vec3::ZERO, Vec3::Y),
    ));
}

/// Create one render entity per spawned body, linked to its rigid body
/// so `sync_transforms` can mirror the solver poses every frame.
pub fn spawn_pile_visuals(
    mut commands: Commands,
    pile: Res<SpawnedPile>,
    config: Res<PileConfig>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    match config.shape {
        BodyShape::Brick { half_extents } => {
            let mesh = meshes.add(Cuboid::from_size(half_extents * 2.0));
            let mut rng = rand::thread_rng();
            for record in &pile.bodies {
                let material = materials.add(StandardMaterial {
                    base_color: palette::random_brick_color(&mut rng),
                    perceptual_roughness: 0.7,
                    ..default()
                });
                commands.spawn((
                    Mesh3d(mesh.clone()),
                    MeshMaterial3d(material),
                    Transform::from_translation(record.spawn_position),
                    PileBodyLink(record.body),
                ));
            }
        }
        BodyShape::Pill {
            radius,
            half_height,
        } => {
            let body_mesh = meshes.add(Capsule3d::new(radius, half_height * 2.0));
            // Cap sphere is slightly inflated so it cleanly covers the
            // capsule's top hemisphere instead of z-fighting with it.
            let cap_mesh = meshes.add(Sphere::new(radius * 1.02));
            let body_material = materials.add(StandardMaterial {
                base_color: palette::pill_color(),
                perceptual_roughness: 0.8,
                ..default()
            });
            let cap_material = materials.add(StandardMaterial {
                base_color: palette::pill_cap_color(),
                perceptual_roughness: 0.5,
                ..default()
            });
            for record in &pile.bodies {
                commands
                    .spawn((
                        Mesh3d(body_mesh.clone()),
                        MeshMaterial3d(body_material.clone()),
                        Transform::from_translation(record.spawn_position),
                        PileBodyLink(record.body),
                    ))
                    .with_children(|parent| {
                        parent.spawn((
                            Mesh3d(cap_mesh.clone()),
                            MeshMaterial3d(cap_material.clone()),
                            Transform::from_xyz(0.0, half_height, 0.0),
                        ));
                    });
            }
        }
    }
}
