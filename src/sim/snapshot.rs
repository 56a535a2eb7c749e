//! Per-step read-only view handed to rendering/HUD collaborators

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::state::{Behavior, GamePhase, Pickup, Projectile, TimedEvent};
use crate::tuning::Difficulty;

/// End-of-encounter statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FinalStats {
    pub score: u64,
    /// Wave active when the agent went down
    pub wave: u32,
    pub hits: u32,
    pub shots_fired: u32,
    /// hits / shots fired (0 when nothing was fired)
    pub accuracy: f32,
    pub elapsed_ms: f64,
}

/// State after a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub time_ms: f64,
    pub phase: GamePhase,
    pub difficulty: Difficulty,

    // === Agent ===
    pub agent_pos: Vec2,
    /// Smoothed heading (camera/movement)
    pub agent_heading: f32,
    pub agent_health: u32,
    pub agent_max_health: u32,
    pub ammo: u32,
    pub max_ammo: u32,
    pub reloading: bool,
    pub stamina: f32,
    pub max_stamina: f32,
    pub sprinting: bool,

    // === Adversary ===
    pub adversary_pos: Vec2,
    pub adversary_heading: f32,
    pub adversary_health: u32,
    pub adversary_max_health: u32,
    pub adversary_behavior: Behavior,

    // === Scoring ===
    pub score: u64,
    pub combo: u32,
    pub combo_multiplier: f64,
    pub wave: u32,

    pub projectiles: Vec<Projectile>,
    pub pickups: Vec<Pickup>,
    /// Events raised by the step that produced this snapshot
    pub events: Vec<TimedEvent>,

    pub game_over: bool,
    pub final_stats: Option<FinalStats>,
}
