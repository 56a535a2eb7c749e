//! Wave progression and scoring
//!
//! Owns the wave counter, score, combo streak and accuracy counters, and
//! decides when an encounter ends or the next wave begins.

use glam::Vec2;
use rand::Rng;

use super::snapshot::FinalStats;
use super::state::{Behavior, GameEvent, GamePhase, GameState, ScoreReason, TimedEvent};
use crate::consts::*;

/// Wave and score bookkeeping
#[derive(Debug, Clone, PartialEq)]
pub struct Director {
    /// Current wave (1-based)
    pub wave: u32,
    pub score: u64,
    /// Consecutive agent hits without a timeout or damage taken
    pub combo: u32,
    pub last_hit_ms: f64,
    pub shots_fired: u32,
    pub shots_hit: u32,
    /// When the adversary of the current wave went down
    pub defeated_at_ms: Option<f64>,
}

impl Default for Director {
    fn default() -> Self {
        Self::new()
    }
}

impl Director {
    pub fn new() -> Self {
        Self {
            wave: 1,
            score: 0,
            combo: 0,
            last_hit_ms: 0.0,
            shots_fired: 0,
            shots_hit: 0,
            defeated_at_ms: None,
        }
    }

    /// Score multiplier for the current combo
    #[inline]
    pub fn multiplier(&self) -> f64 {
        1.0 + COMBO_STEP * self.combo as f64
    }

    /// Award `base` points scaled by the combo multiplier; returns points gained
    pub fn award(
        &mut self,
        reason: ScoreReason,
        base: u64,
        now: f64,
        events: &mut Vec<TimedEvent>,
    ) -> u64 {
        let points = (base as f64 * self.multiplier()).round() as u64;
        self.score += points;
        events.push(TimedEvent {
            at_ms: now,
            event: GameEvent::ScoreAwarded {
                reason,
                points,
                combo: self.combo,
            },
        });
        points
    }

    /// Count a successful agent hit and extend the combo
    pub fn register_hit(&mut self, now: f64) {
        self.shots_hit += 1;
        self.combo += 1;
        self.last_hit_ms = now;
    }

    pub fn reset_combo(&mut self, now: f64, events: &mut Vec<TimedEvent>) {
        if self.combo > 0 {
            events.push(TimedEvent {
                at_ms: now,
                event: GameEvent::ComboReset {
                    previous: self.combo,
                },
            });
            self.combo = 0;
        }
    }

    /// hits / shots fired, 0 when nothing was fired
    pub fn accuracy(&self) -> f32 {
        if self.shots_fired == 0 {
            0.0
        } else {
            self.shots_hit as f32 / self.shots_fired as f32
        }
    }
}

/// Adversary max health for `wave`
pub fn wave_health(base: u32, wave: u32) -> u32 {
    let scale = 1.0 + WAVE_HEALTH_STEP * wave.saturating_sub(1) as f64;
    (base as f64 * scale).round() as u32
}

/// Adversary speed multiplier for `wave`
pub fn wave_speed_mult(wave: u32) -> f32 {
    1.0 + WAVE_SPEED_STEP * wave.saturating_sub(1) as f32
}

/// Adversary cooldown multiplier for `wave`, floored so fire rate stays bounded
pub fn wave_cooldown_mult(wave: u32) -> f32 {
    (1.0 - WAVE_COOLDOWN_STEP * wave.saturating_sub(1) as f32).max(WAVE_COOLDOWN_FLOOR)
}

/// Drop the combo once the last hit is older than the timeout
pub(crate) fn expire_combo(state: &mut GameState, now: f64) {
    let director = &mut state.director;
    if director.combo > 0 && now - director.last_hit_ms > COMBO_TIMEOUT_MS {
        director.reset_combo(now, &mut state.events);
    }
}

/// Check for the end of the encounter, then for wave progression
pub(crate) fn update(state: &mut GameState, now: f64) {
    if !state.agent.is_alive() {
        end_encounter(state, now);
        return;
    }

    let grace_over = state
        .director
        .defeated_at_ms
        .is_some_and(|defeated_at| now - defeated_at > WAVE_GRACE_MS);
    if state.phase == GamePhase::Intermission && grace_over {
        start_next_wave(state, now);
    }
}

/// Mark the adversary defeated and start the grace delay
pub(crate) fn adversary_defeated(state: &mut GameState, now: f64) {
    let wave = state.director.wave;
    let bonus = SCORE_KILL_BASE + SCORE_KILL_PER_WAVE * wave as u64;
    state
        .director
        .award(ScoreReason::Kill, bonus, now, &mut state.events);
    state.emit(now, GameEvent::AdversaryKilled { wave });
    state.director.defeated_at_ms = Some(now);
    state.phase = GamePhase::Intermission;
    log::info!("Adversary eliminated - wave {} complete", wave);
}

/// Advance to the next wave with a rescaled, relocated, fully healed adversary
pub fn start_next_wave(state: &mut GameState, now: f64) {
    state.director.wave += 1;
    state.director.defeated_at_ms = None;
    let wave = state.director.wave;

    let extent = state.tuning.arena_size * WAVE_SPAWN_FRACTION;
    let x = (state.rng.random::<f32>() - 0.5) * extent;
    let z = (state.rng.random::<f32>() - 0.5) * extent;

    let max_health = wave_health(state.tuning.adversary_health, wave);
    let adversary = &mut state.adversary;
    adversary.max_health = max_health;
    adversary.health = max_health;
    adversary.pos = Vec2::new(x, z);
    adversary.last_shot_ms = Some(now);
    adversary.behavior = Behavior::Patrol;
    adversary.burst_remaining = 0;
    adversary.speed_mult = wave_speed_mult(wave);
    adversary.cooldown_mult = wave_cooldown_mult(wave);

    state.phase = GamePhase::Playing;
    state.emit(
        now,
        GameEvent::WaveStarted {
            wave,
            adversary_health: max_health,
        },
    );
    state.director.award(
        ScoreReason::WaveClear,
        SCORE_WAVE_PER_WAVE * wave as u64,
        now,
        &mut state.events,
    );
    log::info!("Wave {} - adversary health {}", wave, max_health);
}

/// Freeze the encounter and publish final stats
fn end_encounter(state: &mut GameState, now: f64) {
    let director = &state.director;
    let stats = FinalStats {
        score: director.score,
        wave: director.wave,
        hits: director.shots_hit,
        shots_fired: director.shots_fired,
        accuracy: director.accuracy(),
        elapsed_ms: now,
    };
    log::info!(
        "Defeated on wave {}: score={}, hits={}, accuracy={:.0}%",
        stats.wave,
        stats.score,
        stats.hits,
        stats.accuracy * 100.0
    );
    state.final_stats = Some(stats);
    state.phase = GamePhase::GameOver;
    state.emit(now, GameEvent::GameOver);
}
