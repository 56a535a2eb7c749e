//! Pickup spawning, consumption and expiry

use glam::Vec2;
use rand::Rng;

use super::player;
use super::state::{GameEvent, GameState, PickupKind, ScoreReason};
use crate::consts::*;
use crate::within_radius;

/// Spawn on the interval, then consume or expire existing pickups
pub(crate) fn update(state: &mut GameState, now: f64) {
    let interval_elapsed = now - state.last_pickup_spawn_ms > state.tuning.pickup_interval_ms;
    if interval_elapsed && state.pickups.len() < state.tuning.max_pickups {
        spawn_random(state);
        state.last_pickup_spawn_ms = now;
    }

    let mut i = 0;
    while i < state.pickups.len() {
        let pickup = &state.pickups[i];
        let (id, kind) = (pickup.id, pickup.kind);

        if within_radius(pickup.pos, state.agent.pos, PICKUP_RADIUS) && apply(state, kind, now) {
            state.pickups.remove(i);
            state.emit(now, GameEvent::PickupConsumed { id, kind });
            continue;
        }

        if now - state.pickups[i].spawned_ms > PICKUP_TTL_MS {
            state.pickups.remove(i);
            state.emit(now, GameEvent::PickupExpired { id, kind });
            log::debug!("Pickup {} expired", id);
            continue;
        }

        i += 1;
    }
}

/// Place a pickup of random kind at a random spot inside the inset region
///
/// A no-op when the arena already holds the maximum number of pickups.
pub fn spawn_random(state: &mut GameState) -> Option<u32> {
    if state.pickups.len() >= state.tuning.max_pickups {
        return None;
    }
    let half = state.tuning.arena_half() - PICKUP_WALL_INSET;
    let x = (state.rng.random::<f32>() - 0.5) * half * 2.0;
    let z = (state.rng.random::<f32>() - 0.5) * half * 2.0;
    let kind = if state.rng.random::<f32>() < 0.5 {
        PickupKind::Health
    } else {
        PickupKind::Ammo
    };
    let id = state.spawn_pickup(kind, Vec2::new(x, z));
    if let Some(id) = id {
        log::debug!("Spawned {:?} pickup {} at ({:.1}, {:.1})", kind, id, x, z);
    }
    id
}

/// Apply a pickup's effect; returns false (and changes nothing) if it would
/// have no effect
fn apply(state: &mut GameState, kind: PickupKind, now: f64) -> bool {
    match kind {
        PickupKind::Health => {
            let max = state.tuning.max_health;
            if state.agent.health >= max {
                return false;
            }
            state.agent.health = state.agent.health.saturating_add(HEALTH_PICKUP_AMOUNT).min(max);
            state
                .director
                .award(ScoreReason::Heal, SCORE_HEAL, now, &mut state.events);
        }
        PickupKind::Ammo => {
            let max = state.tuning.max_ammo;
            if state.agent.ammo >= max {
                return false;
            }
            state.agent.ammo = state.agent.ammo.saturating_add(AMMO_PICKUP_AMOUNT).min(max);
            player::cancel_reload(state, now);
            state
                .director
                .award(ScoreReason::Ammo, SCORE_AMMO, now, &mut state.events);
        }
    }
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tuning::Difficulty;

    fn state() -> GameState {
        GameState::new(Difficulty::Normal, 33)
    }

    /// Move the clock to `now_ms` and run the spawner
    fn update_at(state: &mut GameState, now_ms: f64) {
        state.clock.advance(now_ms - state.clock.now_ms());
        update(state, now_ms);
    }

    #[test]
    fn test_spawns_on_interval() {
        let mut state = state();
        state.agent.pos = Vec2::new(21.0, 21.0); // out of the way

        update_at(&mut state, 8000.0);
        assert!(state.pickups.is_empty());
        update_at(&mut state, 8001.0);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.pickups[0].spawned_ms, 8001.0);
        update_at(&mut state, 9000.0);
        assert_eq!(state.pickups.len(), 1);
    }

    #[test]
    fn test_spawns_stop_at_capacity() {
        let mut state = state();
        state.agent.pos = Vec2::new(21.0, 21.0);
        state.tuning.pickup_interval_ms = 1000.0;

        for k in 1..=8 {
            update_at(&mut state, 1001.0 * k as f64);
        }
        assert_eq!(state.pickups.len(), 4);
    }

    #[test]
    fn test_spawn_position_inside_inset() {
        let mut state = state();
        state.tuning.max_pickups = 64;
        for _ in 0..64 {
            spawn_random(&mut state);
        }
        assert_eq!(state.pickups.len(), 64);
        assert!(state
            .pickups
            .iter()
            .all(|p| p.pos.x.abs() <= 19.0 && p.pos.y.abs() <= 19.0));
        assert!(state.pickups.iter().any(|p| p.kind == PickupKind::Health));
        assert!(state.pickups.iter().any(|p| p.kind == PickupKind::Ammo));
    }

    #[test]
    fn test_health_pickup_heals_and_scores() {
        let mut state = state();
        state.agent.health = 80;
        state.spawn_pickup(PickupKind::Health, state.agent.pos + Vec2::new(1.0, 0.0));
        update(&mut state, 100.0);
        assert_eq!(state.agent.health, 100);
        assert!(state.pickups.is_empty());
        assert_eq!(state.director.score, 50);
    }

    #[test]
    fn test_health_pickup_left_at_full_health() {
        let mut state = state();
        state.spawn_pickup(PickupKind::Health, state.agent.pos);
        update(&mut state, 100.0);
        assert_eq!(state.pickups.len(), 1);
        assert_eq!(state.director.score, 0);
    }

    #[test]
    fn test_refills_saturate_at_large_maxima() {
        let mut state = state();
        state.tuning.max_health = u32::MAX;
        state.tuning.max_ammo = u32::MAX;
        state.agent.health = u32::MAX - 1;
        state.agent.ammo = u32::MAX - 5;
        state.spawn_pickup(PickupKind::Health, state.agent.pos);
        state.spawn_pickup(PickupKind::Ammo, state.agent.pos);
        update(&mut state, 100.0);
        assert_eq!(state.agent.health, u32::MAX);
        assert_eq!(state.agent.ammo, u32::MAX);
        assert!(state.pickups.is_empty());
    }

    #[test]
    fn test_ammo_pickup_cancels_reload() {
        let mut state = state();
        state.agent.ammo = 0;
        state.agent.reload_started_ms = Some(50.0);
        state.spawn_pickup(PickupKind::Ammo, state.agent.pos);
        update(&mut state, 100.0);
        assert_eq!(state.agent.ammo, 15);
        assert!(!state.agent.is_reloading());
        assert_eq!(state.director.score, 25);
    }

    #[test]
    fn test_pickup_expires_after_ttl() {
        let mut state = state();
        state.spawn_pickup(PickupKind::Ammo, Vec2::new(-15.0, -15.0));
        state.last_pickup_spawn_ms = 20_000.0;
        update(&mut state, 20_000.0);
        assert_eq!(state.pickups.len(), 1);
        update(&mut state, 20_000.5);
        assert!(state.pickups.is_empty());
        assert!(matches!(
            state.events.last().map(|e| e.event),
            Some(GameEvent::PickupExpired { .. })
        ));
    }
}
