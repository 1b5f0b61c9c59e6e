//! The per-frame simulation step.
//!
//! Every frame, in this order and never reordered:
//! 1. advance the solver one tick;
//! 2. while unsettled, pin any body whose depth has drifted back to
//!    the spawn depth (without waking it);
//! 3. evaluate the settlement heuristic (after the warm-up period);
//! 4. advance the frame counter.
//!
//! [`sync_transforms`] then mirrors the corrected poses into the
//! render transforms. The whole sequence runs inside one `Update`
//! chain, so nothing ever observes a half-stepped frame.
//!
//! The depth correction exists because wall collisions contain bodies
//! firmly on X/Y while tiny numerical drift accumulates along the
//! unconstrained depth axis over thousands of frames. Only the depth
//! coordinate is written, the wake-up is skipped so sleeping bodies
//! stay asleep, and the correction stops entirely once the pile
//! settles.

use bevy::prelude::*;
use rapier3d::prelude as rapier;
use rapier::nalgebra::Vector3;

use crate::config::PileConfig;
use crate::settlement::{count_settled, SettlementState};
use crate::spawner::SpawnedPile;
use crate::{PhysicsState, PileBodyLink};

/// Pin drifted bodies back to the spawn depth. Returns how many bodies
/// needed correcting. Only the Z coordinate is written, and sleeping
/// bodies stay asleep.
pub fn correct_depth(physics: &mut PhysicsState, pile: &SpawnedPile, config: &PileConfig) -> usize {
    let mut corrected = 0;
    for record in &pile.bodies {
        let Some(body) = physics.rigid_body_set.get_mut(record.body) else {
            continue;
        };
        let t = *body.translation();
        if (t.z - config.spawn_depth).abs() > config.depth_tolerance {
            body.set_translation(Vector3::new(t.x, t.y, config.spawn_depth), false);
            corrected += 1;
        }
    }
    corrected
}

/// Advance the simulation by one frame: solver step, depth correction,
/// settlement evaluation, frame count.
pub fn advance_frame(
    physics: &mut PhysicsState,
    pile: &SpawnedPile,
    config: &PileConfig,
    settlement: &mut SettlementState,
) {
    physics.step();

    if !settlement.settled {
        correct_depth(physics, pile, config);
    }

    if !settlement.settled && settlement.frame_count > config.warmup_frames && !pile.bodies.is_empty()
    {
        let settled = count_settled(physics, pile, config);
        if settled as f32 >= pile.bodies.len() as f32 * config.settle_fraction {
            settlement.settled = true;
            info!(
                "pile settled after {} frames ({}/{} bodies at rest)",
                settlement.frame_count,
                settled,
                pile.bodies.len()
            );
        }
    }

    settlement.frame_count += 1;
}

/// Per-frame system wrapping [`advance_frame`].
pub fn step_simulation(
    mut physics: ResMut<PhysicsState>,
    pile: Res<SpawnedPile>,
    config: Res<PileConfig>,
    mut settlement: ResMut<SettlementState>,
) {
    advance_frame(&mut physics, &pile, &config, &mut settlement);
}

/// Copy each body's (corrected) position and orientation into its
/// paired render transform. Read-only with respect to the solver.
pub fn sync_transforms(
    physics: Res<PhysicsState>,
    mut query: Query<(&PileBodyLink, &mut Transform)>,
) {
    for (link, mut transform) in query.iter_mut() {
        if let Some(body) = physics.rigid_body_set.get(link.0) {
            let pos = body.translation();
            let rot = body.rotation();
            transform.translation = Vec3::new(pos.x, pos.y, pos.z);
            transform.rotation = Quat::from_xyzw(rot.i, rot.j, rot.k, rot.w);
        }
    }
}
