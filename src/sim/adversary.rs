//! Adversary behaviour: distance-gated movement states and burst fire
//!
//! The state machine is keyed on a single signal, the distance to the agent:
//! - closer than `RETREAT_DISTANCE`: back away at an elevated speed
//! - closer than `STRAFE_DISTANCE`: circle sideways with a slight forward bias
//! - otherwise: chase straight in, stopping at `CHASE_STANDOFF`

use glam::Vec2;
use rand::Rng;

use super::state::{Behavior, Combatant, GameEvent, GamePhase, GameState};
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{approach_angle, clamp_to_arena, heading_of};

/// Behaviour for a given distance to the agent
#[inline]
pub fn select_behavior(distance: f32, retreat_below: f32, strafe_below: f32) -> Behavior {
    if distance < retreat_below {
        Behavior::Retreat
    } else if distance < strafe_below {
        Behavior::Strafe
    } else {
        Behavior::Chase
    }
}

/// Advance adversary movement, facing and weapon by one step
///
/// Inert while defeated or between waves.
pub(crate) fn update(state: &mut GameState, dt: f32, now: f64) {
    if state.phase != GamePhase::Playing || !state.adversary.is_alive() {
        return;
    }

    let to_agent = state.agent.pos - state.adversary.pos;
    let distance = to_agent.length();
    let toward = to_agent.normalize_or_zero();

    let behavior = select_behavior(distance, RETREAT_DISTANCE, STRAFE_DISTANCE);
    state.adversary.behavior = behavior;

    let speed = state.tuning.adversary_speed * state.adversary.speed_mult * dt;
    let step = match behavior {
        Behavior::Chase if distance > CHASE_STANDOFF => toward * speed,
        Behavior::Chase | Behavior::Patrol => Vec2::ZERO,
        Behavior::Strafe => {
            state.adversary.strafe_timer -= dt;
            if state.adversary.strafe_timer <= 0.0 {
                state.adversary.strafe_dir = if state.rng.random::<f32>() > 0.5 {
                    1.0
                } else {
                    -1.0
                };
                state.adversary.strafe_timer =
                    STRAFE_RETARGET_MIN + state.rng.random::<f32>() * STRAFE_RETARGET_SPAN;
            }
            let perpendicular = Vec2::new(-toward.y, toward.x);
            let speed = speed * STRAFE_SPEED_MULT;
            perpendicular * state.adversary.strafe_dir * speed + toward * speed * STRAFE_FORWARD_BIAS
        }
        Behavior::Retreat => -toward * speed * RETREAT_SPEED_MULT,
    };

    let half = state.tuning.arena_half() - ADVERSARY_WALL_INSET;
    state.adversary.pos = clamp_to_arena(state.adversary.pos + step, half);

    let smoothing = (ADVERSARY_TURN_SMOOTHING * dt).min(1.0);
    state.adversary.heading =
        approach_angle(state.adversary.heading, heading_of(to_agent), smoothing);

    update_weapon(state, to_agent, distance, now);
}

/// Burst-fire gating
///
/// Pending burst shots take priority and ignore the range window; otherwise
/// a primary shot fires once the wave-scaled cooldown has expired.
fn update_weapon(state: &mut GameState, to_agent: Vec2, distance: f32, now: f64) {
    let burst_delay = state.tuning.adversary_burst_delay_ms;
    let adversary = &mut state.adversary;

    if adversary.burst_remaining > 0 && now > adversary.burst_ready_ms {
        adversary.burst_remaining -= 1;
        adversary.burst_ready_ms = now + burst_delay;
        fire_shot(state, to_agent, distance, now);
        return;
    }

    let cooldown = state.tuning.adversary_cooldown_ms * adversary.cooldown_mult as f64;
    let in_range = distance > ADVERSARY_MIN_FIRE_RANGE && distance < ADVERSARY_MAX_FIRE_RANGE;
    let cooled_down = adversary
        .last_shot_ms
        .is_none_or(|last| now - last > cooldown);
    if in_range && cooled_down {
        adversary.last_shot_ms = Some(now);
        adversary.burst_remaining = state.tuning.adversary_burst_count.saturating_sub(1);
        adversary.burst_ready_ms = now + burst_delay;
        fire_shot(state, to_agent, distance, now);
    }
}

fn fire_shot(state: &mut GameState, to_agent: Vec2, distance: f32, now: f64) {
    let lead_velocity = state.agent.lead_velocity;
    let Some(dir) = aim_direction(
        to_agent,
        distance,
        lead_velocity,
        &state.tuning,
        &mut state.rng,
    ) else {
        return;
    };

    let origin = state.adversary.pos + dir * ADVERSARY_MUZZLE_OFFSET;
    let projectile = state.spawn_projectile(Combatant::Adversary, origin, dir);
    state.emit(
        now,
        GameEvent::ShotFired {
            by: Combatant::Adversary,
            projectile,
        },
    );
}

/// Unit aim vector toward the agent with predictive lead and spread
///
/// Lead = estimated agent velocity × time of flight × lead factor × 16.
/// Spread per axis is uniform in ±(1 − accuracy) · distance · 0.1.
/// Returns `None` if the corrections cancel to a zero vector.
pub fn aim_direction<R: Rng + ?Sized>(
    to_agent: Vec2,
    distance: f32,
    lead_velocity: Vec2,
    tuning: &Tuning,
    rng: &mut R,
) -> Option<Vec2> {
    let time_to_hit = distance / tuning.projectile_speed;
    let mut aim =
        to_agent + lead_velocity * time_to_hit * tuning.adversary_lead_factor * LEAD_SCALE;

    let spread = (1.0 - tuning.adversary_accuracy) * 2.0;
    aim.x += (rng.random::<f32>() - 0.5) * spread * distance * SPREAD_DISTANCE_SCALE;
    aim.y += (rng.random::<f32>() - 0.5) * spread * distance * SPREAD_DISTANCE_SCALE;

    aim.try_normalize()
}
