//! Settlement detection.
//!
//! The pile is "settled" once a configured majority of bodies report a
//! vertical speed that is either near zero (at rest in the pile) or
//! near the terminal free-fall speed (still dropping, but stably so —
//! a straggler in clean free fall is not evidence of a diverging
//! simulation). The flag latches: once set it is never cleared, and
//! the per-frame depth correction stops so nothing can nudge a
//! sleeping pile afterwards, resizes included.

use bevy::prelude::*;

use crate::config::PileConfig;
use crate::spawner::SpawnedPile;
use crate::PhysicsState;

/// Progress of the pile toward rest. One instance per scenario;
/// deliberately a plain resource rather than anything process-global,
/// so concurrent scenarios stay independent.
#[derive(Resource, Debug, Clone, Copy, Default)]
pub struct SettlementState {
    /// Frames advanced since startup.
    pub frame_count: u64,
    /// Latched true once the settlement predicate has held.
    pub settled: bool,
}

/// Whether a single vertical velocity passes the settlement predicate.
///
/// Velocity is signed, negative downward; the terminal branch checks
/// proximity to `-terminal_fall_speed`.
pub fn is_vertical_speed_settled(v_y: f32, config: &PileConfig) -> bool {
    v_y.abs() < config.settle_speed_threshold
        || (v_y + config.terminal_fall_speed).abs() < config.settle_speed_threshold
}

/// Count the spawned bodies currently passing the settlement predicate.
pub fn count_settled(physics: &PhysicsState, pile: &SpawnedPile, config: &PileConfig) -> usize {
    pile.bodies
        .iter()
        .filter_map(|record| physics.rigid_body_set.get(record.body))
        .filter(|body| is_vertical_speed_settled(body.linvel().y, config))
        .count()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn at_rest_counts_as_settled() {
        let config = PileConfig::bricks();
        assert!(is_vertical_speed_settled(0.0, &config));
        assert!(is_vertical_speed_settled(-0.3, &config));
        assert!(is_vertical_speed_settled(0.49, &config));
    }

    #[test]
    fn terminal_free_fall_counts_as_settled() {
        let config = PileConfig::bricks();
        assert!(is_vertical_speed_settled(-12.0, &config));
        assert!(is_vertical_speed_settled(-11.6, &config));
        assert!(is_vertical_speed_settled(-12.4, &config));
    }

    #[test]
    fn intermediate_fall_speeds_are_unsettled() {
        let config = PileConfig::bricks();
        assert!(!is_vertical_speed_settled(-6.0, &config));
        assert!(!is_vertical_speed_settled(-1.0, &config));
        assert!(!is_vertical_speed_settled(-11.0, &config));
    }

    #[test]
    fn upward_motion_is_unsettled() {
        let config = PileConfig::bricks();
        assert!(!is_vertical_speed_settled(2.0, &config));
        // A bounce at terminal magnitude going *up* is not stable fall.
        assert!(!is_vertical_speed_settled(12.0, &config));
    }

    #[test]
    fn default_state_is_unsettled() {
        let state = SettlementState::default();
        assert_eq!(state.frame_count, 0);
        assert!(!state.settled);
    }
}
