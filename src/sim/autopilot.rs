//! Demo controller that plays the agent side
//!
//! Between waves it walks to the nearest useful pickup; otherwise it tracks
//! the adversary, keeps to a preferred range and fires once lined up.

use glam::Vec2;

use super::state::{GamePhase, GameState, PickupKind};
use super::tick::TickInput;
use crate::{heading_of, wrap_angle};

/// Preferred distance band to the adversary
const PREFERRED_MIN_RANGE: f32 = 7.0;
const PREFERRED_MAX_RANGE: f32 = 14.0;
/// Sprint to close gaps larger than this
const SPRINT_RANGE: f32 = 22.0;
/// Heading error below which no turn is issued
const TURN_DEADBAND: f32 = 0.02;
/// Heading error below which the autopilot fires
const FIRE_ALIGNMENT: f32 = 0.04;
/// Heading error below which it walks toward the target
const WALK_ALIGNMENT: f32 = 0.5;

/// Intents for the current state
pub fn intents(state: &GameState) -> TickInput {
    let agent = &state.agent;
    let mut input = TickInput::default();

    if agent.ammo == 0 && !agent.is_reloading() {
        input.reload = true;
    }

    let engaging = state.phase == GamePhase::Playing && state.adversary.is_alive();
    let target = if engaging {
        Some(state.adversary.pos)
    } else {
        nearest_useful_pickup(state)
    };
    let Some(target) = target else {
        return input;
    };

    let to_target = target - agent.pos;
    let distance = to_target.length();
    let error = wrap_angle(heading_of(to_target) - agent.heading);

    // Left turns increase heading
    input.turn_left = error > TURN_DEADBAND;
    input.turn_right = error < -TURN_DEADBAND;

    let aligned = error.abs() < WALK_ALIGNMENT;
    if engaging {
        input.forward = aligned && distance > PREFERRED_MAX_RANGE;
        input.backward = distance < PREFERRED_MIN_RANGE;
        input.sprint = input.forward && distance > SPRINT_RANGE;
        input.fire = error.abs() < FIRE_ALIGNMENT && agent.ammo > 0 && !agent.is_reloading();
    } else {
        input.forward = aligned;
    }

    input
}

/// Closest pickup whose effect would apply right now
fn nearest_useful_pickup(state: &GameState) -> Option<Vec2> {
    let agent = &state.agent;
    state
        .pickups
        .iter()
        .filter(|p| match p.kind {
            PickupKind::Health => agent.health < state.tuning.max_health,
            PickupKind::Ammo => agent.ammo < state.tuning.max_ammo,
        })
        .map(|p| p.pos)
        .min_by(|a, b| {
            a.distance_squared(agent.pos)
                .total_cmp(&b.distance_squared(agent.pos))
        })
}
