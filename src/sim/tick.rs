//! Variable timestep simulation step
//!
//! Core game loop that advances the encounter by one rendered frame.

use serde::{Deserialize, Serialize};

use super::snapshot::Snapshot;
use super::state::{GamePhase, GameState};
use super::{adversary, autopilot, director, pickups, player, projectile};

/// Agent intents for a single step
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickInput {
    pub forward: bool,
    pub backward: bool,
    pub turn_left: bool,
    pub turn_right: bool,
    /// Fire (held)
    pub fire: bool,
    pub sprint: bool,
    /// Reload request
    pub reload: bool,
    /// Demo mode - the autopilot drives the agent and the other intents are ignored
    pub autopilot: bool,
}

/// Advance the encounter by `elapsed_ms` of wall-clock time
///
/// After the agent is defeated the state is frozen: further steps are ignored
/// and return the final snapshot until the next reset.
pub fn step(state: &mut GameState, input: &TickInput, elapsed_ms: f64) -> Snapshot {
    if state.phase == GamePhase::GameOver {
        log::debug!("Step ignored: encounter is over");
        return state.snapshot();
    }

    let dt = state.clock.advance(elapsed_ms);
    let now = state.clock.now_ms();

    let input = if input.autopilot {
        autopilot::intents(state)
    } else {
        *input
    };

    director::expire_combo(state, now);
    player::update(state, &input, dt, now);
    adversary::update(state, dt, now);
    projectile::update(state, dt, now);
    director::update(state, now);
    if state.phase != GamePhase::GameOver {
        pickups::update(state, now);
    }

    let snapshot = state.snapshot();
    state.events.clear();
    snapshot
}

impl GameState {
    /// See [`step`]
    pub fn step(&mut self, input: &TickInput, elapsed_ms: f64) -> Snapshot {
        step(self, input, elapsed_ms)
    }
}
