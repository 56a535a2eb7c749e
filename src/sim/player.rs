//! Agent actions: turning, movement with sprint/stamina, firing and reload

use super::state::{Agent, Combatant, GameEvent, GameState};
use super::tick::TickInput;
use crate::consts::*;
use crate::tuning::Tuning;
use crate::{approach_angle, clamp_to_arena, heading_vector};

/// Apply one step of agent intents
pub(crate) fn update(state: &mut GameState, input: &TickInput, dt: f32, now: f64) {
    if input.reload {
        start_reload(state, now);
    }

    steer(&mut state.agent, &state.tuning, input, dt);

    if input.fire {
        fire(state, now);
    }

    finish_reload(state, now);
}

/// Turn, smooth the heading, spend/regain stamina and move
pub(crate) fn steer(agent: &mut Agent, tuning: &Tuning, input: &TickInput, dt: f32) {
    // Left turns increase heading
    if input.turn_left {
        agent.heading += tuning.turn_speed * dt;
    }
    if input.turn_right {
        agent.heading -= tuning.turn_speed * dt;
    }
    let smoothing = (HEADING_SMOOTHING * dt).min(1.0);
    agent.smooth_heading = approach_angle(agent.smooth_heading, agent.heading, smoothing);

    let moving = input.forward || input.backward;
    agent.sprinting = input.sprint && agent.stamina > 0.0 && moving;
    let stamina = if agent.sprinting {
        agent.stamina - tuning.stamina_drain * dt
    } else {
        agent.stamina + tuning.stamina_regen * dt
    };
    agent.stamina = stamina.clamp(0.0, tuning.max_stamina);
    let speed = if agent.sprinting {
        tuning.sprint_speed
    } else {
        tuning.move_speed
    };

    // Motion follows the smoothed heading; forward and backward cancel out
    let facing = heading_vector(agent.smooth_heading);
    let mut dir = glam::Vec2::ZERO;
    if input.forward {
        dir += facing;
    }
    if input.backward {
        dir -= facing;
    }
    if let Some(dir) = dir.try_normalize() {
        agent.pos += dir * speed * dt;
    }
    agent.pos = clamp_to_arena(agent.pos, tuning.arena_half() - AGENT_WALL_INSET);

    // What the adversary leads against: walk speed along the raw heading
    let raw_facing = heading_vector(agent.heading);
    agent.lead_velocity = if input.forward {
        raw_facing * tuning.move_speed
    } else if input.backward {
        -raw_facing * tuning.move_speed
    } else {
        glam::Vec2::ZERO
    };
}

/// Fire along the raw heading if the weapon is ready
///
/// An empty magazine starts a reload instead of firing.
pub(crate) fn fire(state: &mut GameState, now: f64) {
    let agent = &state.agent;
    if agent
        .last_shot_ms
        .is_some_and(|last| now - last < state.tuning.fire_cooldown_ms)
    {
        return;
    }
    if agent.is_reloading() {
        return;
    }
    if agent.ammo == 0 {
        start_reload(state, now);
        return;
    }

    state.agent.last_shot_ms = Some(now);
    state.agent.ammo -= 1;
    state.director.shots_fired += 1;

    let dir = heading_vector(state.agent.heading);
    let origin = state.agent.pos + dir * AGENT_MUZZLE_OFFSET;
    let projectile = state.spawn_projectile(Combatant::Agent, origin, dir);
    state.emit(
        now,
        GameEvent::ShotFired {
            by: Combatant::Agent,
            projectile,
        },
    );
}

/// Begin a reload unless one is running or the magazine is full
pub(crate) fn start_reload(state: &mut GameState, now: f64) {
    let agent = &mut state.agent;
    if agent.is_reloading() || agent.ammo >= state.tuning.max_ammo {
        return;
    }
    agent.reload_started_ms = Some(now);
    state.emit(now, GameEvent::ReloadStarted);
    log::debug!("Reloading at {:.0} ms", now);
}

/// Refill the magazine once the reload duration has elapsed
pub(crate) fn finish_reload(state: &mut GameState, now: f64) {
    let Some(started) = state.agent.reload_started_ms else {
        return;
    };
    if now - started >= state.tuning.reload_ms {
        state.agent.ammo = state.tuning.max_ammo;
        state.agent.reload_started_ms = None;
        state.emit(now, GameEvent::ReloadFinished);
        log::debug!("Reload finished at {:.0} ms", now);
    }
}

/// Abort a reload in progress (ammo pickup)
pub(crate) fn cancel_reload(state: &mut GameState, now: f64) {
    if state.agent.reload_started_ms.take().is_some() {
        state.emit(now, GameEvent::ReloadCancelled);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Difficulty;
    use std::f32::consts::PI;

    fn state() -> GameState {
        GameState::new(Difficulty::Normal, 9)
    }

    #[test]
    fn test_turning_and_smoothing() {
        let mut state = state();
        let input = TickInput {
            turn_left: true,
            ..Default::default()
        };
        steer(&mut state.agent, &state.tuning, &input, 1.0);
        assert!((state.agent.heading - (PI + 0.045)).abs() < 1e-6);
        // Smoothed heading covers 30% of the gap
        assert!((state.agent.smooth_heading - (PI + 0.0135)).abs() < 1e-5);
    }

    #[test]
    fn test_forward_moves_along_smoothed_heading() {
        let mut state = state();
        let input = TickInput {
            forward: true,
            ..Default::default()
        };
        steer(&mut state.agent, &state.tuning, &input, 1.0);
        // Facing -z at heading π
        assert!((state.agent.pos.y - (12.0 - 0.2)).abs() < 1e-5);
        assert!(state.agent.pos.x.abs() < 1e-5);
        assert!((state.agent.lead_velocity.y + 0.2).abs() < 1e-5);
    }

    #[test]
    fn test_forward_and_backward_cancel() {
        let mut state = state();
        let input = TickInput {
            forward: true,
            backward: true,
            ..Default::default()
        };
        steer(&mut state.agent, &state.tuning, &input, 1.0);
        assert_eq!(state.agent.pos, glam::Vec2::new(0.0, 12.0));
    }

    #[test]
    fn test_sprint_needs_stamina_and_movement() {
        let mut state = state();
        let sprint_only = TickInput {
            sprint: true,
            ..Default::default()
        };
        steer(&mut state.agent, &state.tuning, &sprint_only, 1.0);
        assert!(!state.agent.sprinting);

        let sprint_forward = TickInput {
            sprint: true,
            forward: true,
            ..Default::default()
        };
        steer(&mut state.agent, &state.tuning, &sprint_forward, 1.0);
        assert!(state.agent.sprinting);
        assert!((state.agent.stamina - 99.2).abs() < 1e-4);

        state.agent.stamina = 0.0;
        steer(&mut state.agent, &state.tuning, &sprint_forward, 1.0);
        assert!(!state.agent.sprinting);
        assert!((state.agent.stamina - 0.35).abs() < 1e-6);
    }

    #[test]
    fn test_stamina_stays_in_bounds_with_unchecked_rates() {
        let mut state = state();
        state.tuning.stamina_regen = -1.0;
        steer(&mut state.agent, &state.tuning, &TickInput::default(), 4.0);
        steer(&mut state.agent, &state.tuning, &TickInput::default(), 4.0);
        assert!(state.agent.stamina <= state.tuning.max_stamina);
        for _ in 0..50 {
            steer(&mut state.agent, &state.tuning, &TickInput::default(), 4.0);
        }
        assert_eq!(state.agent.stamina, 0.0);

        state.tuning.stamina_drain = -1.0;
        state.agent.stamina = 100.0;
        let sprint_forward = TickInput {
            sprint: true,
            forward: true,
            ..Default::default()
        };
        steer(&mut state.agent, &state.tuning, &sprint_forward, 1.0);
        assert_eq!(state.agent.stamina, 100.0);
    }

    #[test]
    fn test_position_clamped_inside_walls() {
        let mut state = state();
        state.agent.pos = glam::Vec2::new(0.0, -20.9);
        let input = TickInput {
            forward: true,
            sprint: true,
            ..Default::default()
        };
        steer(&mut state.agent, &state.tuning, &input, 4.0);
        assert_eq!(state.agent.pos.y, -21.0);
    }

    #[test]
    fn test_fire_respects_cooldown() {
        let mut state = state();
        fire(&mut state, 0.0);
        fire(&mut state, 100.0);
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.agent.ammo, 29);
        fire(&mut state, 220.0);
        assert_eq!(state.projectiles.len(), 2);
        assert_eq!(state.director.shots_fired, 2);
    }

    #[test]
    fn test_fire_spawns_ahead_along_raw_heading() {
        let mut state = state();
        // Raw heading turned, smoothed heading lagging behind
        state.agent.heading = PI / 2.0;
        fire(&mut state, 0.0);
        let projectile = &state.projectiles[0];
        assert_eq!(projectile.owner, Combatant::Agent);
        assert!((projectile.pos.x - 0.5).abs() < 1e-5);
        assert!((projectile.vel.x - 1.4).abs() < 1e-5);
    }

    #[test]
    fn test_empty_magazine_starts_reload() {
        let mut state = state();
        state.agent.ammo = 0;
        fire(&mut state, 0.0);
        assert!(state.projectiles.is_empty());
        assert!(state.agent.is_reloading());
        assert_eq!(state.director.shots_fired, 0);
    }

    #[test]
    fn test_reload_guards() {
        let mut state = state();
        // Full magazine: no-op
        start_reload(&mut state, 0.0);
        assert!(!state.agent.is_reloading());

        state.agent.ammo = 10;
        start_reload(&mut state, 100.0);
        start_reload(&mut state, 200.0);
        assert_eq!(state.agent.reload_started_ms, Some(100.0));

        // Firing blocked while reloading
        fire(&mut state, 300.0);
        assert!(state.projectiles.is_empty());

        finish_reload(&mut state, 1599.0);
        assert!(state.agent.is_reloading());
        finish_reload(&mut state, 1600.0);
        assert!(!state.agent.is_reloading());
        assert_eq!(state.agent.ammo, 30);
    }
}
