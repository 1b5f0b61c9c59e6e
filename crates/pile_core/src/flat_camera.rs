//! Flat orthographic camera for the background scene.
//!
//! The camera looks straight down the Z axis at the origin with a
//! parallel projection, so the pile reads as 2D with a little depth.
//! A resize handler keeps the projection and the shared aspect ratio
//! current when the window changes size. It touches nothing else: the
//! physics container is sized once from the aspect ratio observed at
//! startup and deliberately stays at those positions forever, so a
//! resized window never disturbs a pile that has already come to rest.

use bevy::prelude::*;
use bevy::window::WindowResized;

/// Marker and parameters for the flat background camera.
#[derive(Component)]
pub struct FlatCamera {
    /// Vertical world extent kept visible regardless of window size.
    pub view_size: f32,
}

/// Aspect ratio (width / height) of the viewport.
///
/// Written by [`handle_window_resize`] whenever the window changes,
/// and seeded from the primary window at startup. The container
/// builder and spawner read it exactly once, at startup; later writes
/// only affect the camera.
#[derive(Resource, Debug, Clone, Copy)]
pub struct ViewportAspect(pub f32);

impl Default for ViewportAspect {
    fn default() -> Self {
        Self(16.0 / 9.0)
    }
}

/// Bundle for spawning the flat camera.
#[derive(Bundle)]
pub struct FlatCameraBundle {
    pub camera: Camera3d,
    pub projection: Projection,
    pub flat: FlatCamera,
    pub transform: Transform,
}

impl FlatCameraBundle {
    /// Create a flat camera showing `view_size` world units vertically,
    /// positioned `distance` along +Z looking at the origin.
    ///
    /// `window_height` is the current window height in logical pixels;
    /// it sets the initial projection scale, which the resize handler
    /// keeps up to date afterwards.
    pub fn new(view_size: f32, distance: f32, window_height: f32) -> Self {
        let mut projection = OrthographicProjection::default_3d();
        projection.near = 0.1;
        projection.far = 100.0;
        projection.scale = view_size / window_height.max(1.0);
        Self {
            camera: Camera3d::default(),
            projection: Projection::Orthographic(projection),
            flat: FlatCamera { view_size },
            transform: Transform::from_xyz(0.0, 0.0, distance).looking_at(Vec3::ZERO, Vec3::Y),
        }
    }
}

/// Resize adapter: recompute the shared aspect ratio and the camera
/// projection scale when the window changes size.
///
/// This system has no access to any simulation state by construction.
/// Wall positions, body state, and the settled flag are all owned by
/// systems that never read window events.
pub fn handle_window_resize(
    mut resize_messages: MessageReader<WindowResized>,
    mut aspect: ResMut<ViewportAspect>,
    mut cameras: Query<(&FlatCamera, &mut Projection)>,
) {
    // Only the most recent size matters.
    let Some(resized) = resize_messages.read().last() else {
        return;
    };
    if resized.width <= 0.0 || resized.height <= 0.0 {
        return;
    }

    aspect.0 = resized.width / resized.height;

    for (flat, mut projection) in cameras.iter_mut() {
        if let Projection::Orthographic(ref mut ortho) = *projection {
            ortho.scale = flat.view_size / resized.height;
        }
    }
}

/// Plugin that adds the flat camera resize handling.
pub struct FlatCameraPlugin;

impl Plugin for FlatCameraPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<ViewportAspect>()
            .add_systems(Update, handle_window_resize);
    }
}
