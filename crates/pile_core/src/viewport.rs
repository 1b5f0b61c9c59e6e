//! Visible-bounds math for the flat background camera.
//!
//! The camera shows a fixed vertical world extent (`view_size`); the
//! horizontal extent follows the window aspect ratio. Container walls
//! and spawn columns both derive their world-space edges from these
//! bounds.

use bevy::prelude::*;

/// World-space extents visible through the flat camera.
///
/// `x` is the visible width (`view_size * aspect`), `y` the visible
/// height (`view_size`). Both are positive for any valid camera setup;
/// the host window never reports a non-positive aspect ratio.
pub fn visible_bounds(view_size: f32, aspect: f32) -> Vec2 {
    Vec2::new(view_size * aspect, view_size)
}
