//! Presentation-side utilities shared by the pile background app.
//!
//! This crate provides:
//! - Visible-bounds math for the flat orthographic camera
//! - The flat camera itself plus the window resize adapter
//! - The brick/pill color palette

pub mod flat_camera;
pub mod palette;
pub mod viewport;

pub use flat_camera::{
    handle_window_resize, FlatCamera, FlatCameraBundle, FlatCameraPlugin, ViewportAspect,
};
pub use palette::{brick_palette, pill_cap_color, pill_color, random_brick_color};
pub use viewport::visible_bounds;
