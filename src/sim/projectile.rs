//! Projectile flight and hit resolution
//!
//! Projectiles fly in straight lines and die on the first of: leaving the
//! arena square, or entering the hit circle of the opposing combatant.
//! Agent shots resolve before adversary shots within a step.

use super::director;
use super::state::{Combatant, GameEvent, GameState, Projectile, ScoreReason};
use crate::consts::SCORE_HIT;
use crate::{outside_arena, within_radius};

/// Advance every projectile, drop strays, then resolve hits
pub(crate) fn update(state: &mut GameState, dt: f32, now: f64) {
    let half = state.tuning.arena_half();
    for projectile in &mut state.projectiles {
        projectile.advance(dt);
    }
    state
        .projectiles
        .retain(|projectile| !outside_arena(projectile.pos, half));

    resolve_agent_shots(state, now);
    resolve_adversary_shots(state, now);
}

/// Index of the first `owner` projectile inside the hit circle around `target`
fn first_hit(
    projectiles: &[Projectile],
    owner: Combatant,
    target: glam::Vec2,
    hit_radius: f32,
) -> Option<usize> {
    projectiles
        .iter()
        .position(|p| p.owner == owner && within_radius(p.pos, target, hit_radius))
}

fn resolve_agent_shots(state: &mut GameState, now: f64) {
    // Stops as soon as the adversary is down; later shots fly on
    while state.adversary.is_alive() {
        let Some(index) = first_hit(
            &state.projectiles,
            Combatant::Agent,
            state.adversary.pos,
            state.tuning.hit_radius,
        ) else {
            break;
        };
        state.projectiles.remove(index);

        let damage = state.tuning.player_damage;
        state.adversary.health = state.adversary.health.saturating_sub(damage);
        let remaining = state.adversary.health;
        state.director.register_hit(now);
        state.emit(now, GameEvent::AdversaryHit { damage, remaining });
        state
            .director
            .award(ScoreReason::Hit, SCORE_HIT, now, &mut state.events);

        if remaining == 0 {
            director::adversary_defeated(state, now);
        }
    }
}

fn resolve_adversary_shots(state: &mut GameState, now: f64) {
    while let Some(index) = first_hit(
        &state.projectiles,
        Combatant::Adversary,
        state.agent.pos,
        state.tuning.hit_radius,
    ) {
        state.projectiles.remove(index);

        let damage = state.tuning.adversary_damage;
        state.agent.health = state.agent.health.saturating_sub(damage);
        let remaining = state.agent.health;
        state.emit(now, GameEvent::AgentDamaged { damage, remaining });
        state.director.reset_combo(now, &mut state.events);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::GamePhase;
    use crate::tuning::Difficulty;
    use glam::Vec2;

    fn state() -> GameState {
        GameState::new(Difficulty::Normal, 21)
    }

    #[test]
    fn test_projectile_leaving_arena_is_removed() {
        let mut state = state();
        state.spawn_projectile(Combatant::Agent, Vec2::new(21.0, 0.0), Vec2::X);
        update(&mut state, 0.5, 0.0);
        assert_eq!(state.projectiles.len(), 1);
        update(&mut state, 0.5, 0.0);
        assert!(state.projectiles.is_empty());
        assert_eq!(state.adversary.health, 110);
    }

    #[test]
    fn test_agent_hit_damages_and_scores() {
        let mut state = state();
        state.spawn_projectile(Combatant::Agent, Vec2::new(0.0, -11.0), -Vec2::Y);
        update(&mut state, 0.5, 100.0);

        assert!(state.projectiles.is_empty());
        assert_eq!(state.adversary.health, 110 - 22);
        assert_eq!(state.director.shots_hit, 1);
        assert_eq!(state.director.combo, 1);
        // 100 points at a 1.25 multiplier
        assert_eq!(state.director.score, 125);
    }

    #[test]
    fn test_projectile_hits_at_most_once() {
        let mut state = state();
        state.adversary.pos = Vec2::ZERO;
        state.agent.pos = Vec2::new(0.3, 0.0);
        // Inside both hit circles, but owned by the agent
        state.spawn_projectile(Combatant::Agent, Vec2::new(0.1, 0.0), Vec2::Y);
        update(&mut state, 0.0, 0.0);
        assert_eq!(state.adversary.health, 88);
        assert_eq!(state.agent.health, 100);
        assert!(state.projectiles.is_empty());
    }

    #[test]
    fn test_own_shots_never_hit_shooter() {
        let mut state = state();
        state.spawn_projectile(Combatant::Adversary, Vec2::new(0.0, -12.0), Vec2::X);
        state.spawn_projectile(Combatant::Agent, Vec2::new(0.0, 12.0), Vec2::X);
        update(&mut state, 0.0, 0.0);
        assert_eq!(state.projectiles.len(), 2);
    }

    #[test]
    fn test_killing_shot_enters_intermission() {
        let mut state = state();
        state.adversary.health = 10;
        state.spawn_projectile(Combatant::Agent, Vec2::new(0.0, -12.0), Vec2::Y);
        state.spawn_projectile(Combatant::Agent, Vec2::new(0.2, -12.0), Vec2::Y);
        update(&mut state, 0.0, 500.0);

        assert_eq!(state.adversary.health, 0);
        assert_eq!(state.phase, GamePhase::Intermission);
        assert_eq!(state.director.defeated_at_ms, Some(500.0));
        // Second shot passes through the downed adversary
        assert_eq!(state.projectiles.len(), 1);
        assert_eq!(state.director.shots_hit, 1);
        // Hit 125 + kill (500 + 200) * 1.25 = 875
        assert_eq!(state.director.score, 125 + 875);
    }

    #[test]
    fn test_agent_damage_resets_combo() {
        let mut state = state();
        state.director.combo = 3;
        state.spawn_projectile(Combatant::Adversary, Vec2::new(0.0, 12.5), Vec2::X);
        update(&mut state, 0.0, 0.0);

        assert_eq!(state.agent.health, 88);
        assert_eq!(state.director.combo, 0);
        assert!(
            state
                .events
                .iter()
                .any(|e| e.event == GameEvent::ComboReset { previous: 3 })
        );
    }

    #[test]
    fn test_agent_health_saturates_at_zero() {
        let mut state = state();
        state.agent.health = 5;
        state.spawn_projectile(Combatant::Adversary, Vec2::new(0.0, 12.0), Vec2::X);
        state.spawn_projectile(Combatant::Adversary, Vec2::new(0.1, 12.0), Vec2::X);
        update(&mut state, 0.0, 0.0);
        assert_eq!(state.agent.health, 0);
        assert!(state.projectiles.is_empty());
    }
}
