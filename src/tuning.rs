//! Difficulty presets and data-driven game balance
//!
//! A `Tuning` is the full numeric configuration of one encounter. Presets
//! come from `Difficulty`; JSON overrides can be layered on top.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors raised while building a tuning
#[derive(Debug, Error)]
pub enum TuningError {
    #[error("unknown difficulty `{0}` (expected easy, normal, hard or nightmare)")]
    UnknownDifficulty(String),
    #[error("invalid tuning overrides: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid tuning value for `{field}`: {reason}")]
    Invalid {
        field: &'static str,
        reason: &'static str,
    },
}

/// Difficulty tiers
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
    Nightmare,
}

impl Difficulty {
    pub const ALL: [Difficulty; 4] = [
        Difficulty::Easy,
        Difficulty::Normal,
        Difficulty::Hard,
        Difficulty::Nightmare,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Normal => "Normal",
            Difficulty::Hard => "Hard",
            Difficulty::Nightmare => "Nightmare",
        }
    }

    /// Full tuning for this tier
    pub fn tuning(&self) -> Tuning {
        let base = Tuning::default();
        match self {
            Difficulty::Easy => Tuning {
                adversary_health: 80,
                adversary_speed: 0.055,
                adversary_cooldown_ms: 1200.0,
                adversary_damage: 8,
                adversary_accuracy: 0.65,
                adversary_lead_factor: 0.1,
                adversary_burst_count: 1,
                adversary_burst_delay_ms: 200.0,
                player_damage: 30,
                max_health: 120,
                ..base
            },
            Difficulty::Normal => Tuning {
                adversary_health: 110,
                adversary_speed: 0.08,
                adversary_cooldown_ms: 750.0,
                adversary_damage: 12,
                adversary_accuracy: 0.82,
                adversary_lead_factor: 0.3,
                adversary_burst_count: 2,
                adversary_burst_delay_ms: 180.0,
                player_damage: 22,
                max_health: 100,
                ..base
            },
            Difficulty::Hard => Tuning {
                adversary_health: 150,
                adversary_speed: 0.12,
                adversary_cooldown_ms: 450.0,
                adversary_damage: 16,
                adversary_accuracy: 0.93,
                adversary_lead_factor: 0.5,
                adversary_burst_count: 3,
                adversary_burst_delay_ms: 120.0,
                player_damage: 18,
                max_health: 90,
                ..base
            },
            Difficulty::Nightmare => Tuning {
                adversary_health: 200,
                adversary_speed: 0.15,
                adversary_cooldown_ms: 320.0,
                adversary_damage: 22,
                adversary_accuracy: 0.97,
                adversary_lead_factor: 0.7,
                adversary_burst_count: 4,
                adversary_burst_delay_ms: 90.0,
                player_damage: 15,
                max_health: 75,
                ..base
            },
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Difficulty {
    type Err = TuningError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "easy" => Ok(Difficulty::Easy),
            "normal" | "norm" => Ok(Difficulty::Normal),
            "hard" => Ok(Difficulty::Hard),
            "nightmare" => Ok(Difficulty::Nightmare),
            _ => Err(TuningError::UnknownDifficulty(s.to_string())),
        }
    }
}

/// Numeric configuration of one encounter
///
/// Speeds are world units per nominal frame, durations are milliseconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tuning {
    /// Full side length of the square arena
    pub arena_size: f32,

    // === Agent ===
    pub move_speed: f32,
    pub sprint_speed: f32,
    /// Radians per nominal frame
    pub turn_speed: f32,
    pub fire_cooldown_ms: f64,
    pub max_ammo: u32,
    pub reload_ms: f64,
    pub max_health: u32,
    pub max_stamina: f32,
    pub stamina_drain: f32,
    pub stamina_regen: f32,
    /// Damage the agent deals per hit
    pub player_damage: u32,

    // === Projectiles ===
    pub projectile_speed: f32,
    pub projectile_radius: f32,
    pub hit_radius: f32,

    // === Adversary ===
    pub adversary_health: u32,
    pub adversary_speed: f32,
    pub adversary_cooldown_ms: f64,
    /// Damage the adversary deals per hit
    pub adversary_damage: u32,
    /// 1.0 = no spread
    pub adversary_accuracy: f32,
    pub adversary_lead_factor: f32,
    /// Shots per burst, including the primary shot
    pub adversary_burst_count: u32,
    pub adversary_burst_delay_ms: f64,

    // === Pickups ===
    pub pickup_interval_ms: f64,
    pub max_pickups: usize,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_size: 44.0,

            move_speed: 0.20,
            sprint_speed: 0.34,
            turn_speed: 0.045,
            fire_cooldown_ms: 220.0,
            max_ammo: 30,
            reload_ms: 1500.0,
            max_health: 100,
            max_stamina: 100.0,
            stamina_drain: 0.8,
            stamina_regen: 0.35,
            player_damage: 20,

            projectile_speed: 1.4,
            projectile_radius: 0.1,
            hit_radius: 0.85,

            adversary_health: 120,
            adversary_speed: 0.10,
            adversary_cooldown_ms: 550.0,
            adversary_damage: 12,
            adversary_accuracy: 0.92,
            adversary_lead_factor: 0.4,
            adversary_burst_count: 2,
            adversary_burst_delay_ms: 150.0,

            pickup_interval_ms: 8000.0,
            max_pickups: 4,
        }
    }
}

impl Tuning {
    /// Half the arena side length (projectile kill plane)
    #[inline]
    pub fn arena_half(&self) -> f32 {
        self.arena_size / 2.0
    }

    /// Preset for `difficulty` with `json` overrides applied and validated
    pub fn from_json(difficulty: Difficulty, json: &str) -> Result<Self, TuningError> {
        let overrides: TuningOverrides = serde_json::from_str(json)?;
        let mut tuning = difficulty.tuning();
        overrides.apply(&mut tuning);
        tuning.validate()?;
        Ok(tuning)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), TuningError> {
        fn positive(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value > 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a positive finite number",
                })
            }
        }

        fn non_negative(field: &'static str, value: f64) -> Result<(), TuningError> {
            if value.is_finite() && value >= 0.0 {
                Ok(())
            } else {
                Err(TuningError::Invalid {
                    field,
                    reason: "must be a finite number >= 0",
                })
            }
        }

        // Agent must fit inside the inset region pickups spawn in
        if !(self.arena_size.is_finite() && self.arena_size > 2.0 * crate::consts::PICKUP_WALL_INSET)
        {
            return Err(TuningError::Invalid {
                field: "arena_size",
                reason: "must leave room inside the wall insets",
            });
        }
        positive("move_speed", self.move_speed as f64)?;
        positive("sprint_speed", self.sprint_speed as f64)?;
        positive("turn_speed", self.turn_speed as f64)?;
        positive("max_ammo", self.max_ammo as f64)?;
        positive("reload_ms", self.reload_ms)?;
        positive("max_health", self.max_health as f64)?;
        positive("max_stamina", self.max_stamina as f64)?;
        positive("projectile_speed", self.projectile_speed as f64)?;
        positive("hit_radius", self.hit_radius as f64)?;
        positive("adversary_health", self.adversary_health as f64)?;
        positive("adversary_speed", self.adversary_speed as f64)?;
        positive("adversary_cooldown_ms", self.adversary_cooldown_ms)?;
        positive("adversary_burst_count", self.adversary_burst_count as f64)?;
        positive("pickup_interval_ms", self.pickup_interval_ms)?;
        if !(0.0..=1.0).contains(&self.adversary_accuracy) {
            return Err(TuningError::Invalid {
                field: "adversary_accuracy",
                reason: "must be within [0, 1]",
            });
        }
        non_negative("fire_cooldown_ms", self.fire_cooldown_ms)?;
        non_negative("adversary_burst_delay_ms", self.adversary_burst_delay_ms)?;
        non_negative("stamina_drain", self.stamina_drain as f64)?;
        non_negative("stamina_regen", self.stamina_regen as f64)?;
        Ok(())
    }
}

/// Partial tuning loaded from JSON; `None` keeps the preset value
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TuningOverrides {
    pub arena_size: Option<f32>,
    pub move_speed: Option<f32>,
    pub sprint_speed: Option<f32>,
    pub turn_speed: Option<f32>,
    pub fire_cooldown_ms: Option<f64>,
    pub max_ammo: Option<u32>,
    pub reload_ms: Option<f64>,
    pub max_health: Option<u32>,
    pub max_stamina: Option<f32>,
    pub stamina_drain: Option<f32>,
    pub stamina_regen: Option<f32>,
    pub player_damage: Option<u32>,
    pub projectile_speed: Option<f32>,
    pub projectile_radius: Option<f32>,
    pub hit_radius: Option<f32>,
    pub adversary_health: Option<u32>,
    pub adversary_speed: Option<f32>,
    pub adversary_cooldown_ms: Option<f64>,
    pub adversary_damage: Option<u32>,
    pub adversary_accuracy: Option<f32>,
    pub adversary_lead_factor: Option<f32>,
    pub adversary_burst_count: Option<u32>,
    pub adversary_burst_delay_ms: Option<f64>,
    pub pickup_interval_ms: Option<f64>,
    pub max_pickups: Option<usize>,
}

impl TuningOverrides {
    /// Copy every present field onto `tuning`
    pub fn apply(&self, tuning: &mut Tuning) {
        macro_rules! apply {
            ($($field:ident),* $(,)?) => {
                $(if let Some(value) = self.$field {
                    tuning.$field = value;
                })*
            };
        }

        apply!(
            arena_size,
            move_speed,
            sprint_speed,
            turn_speed,
            fire_cooldown_ms,
            max_ammo,
            reload_ms,
            max_health,
            max_stamina,
            stamina_drain,
            stamina_regen,
            player_damage,
            projectile_speed,
            projectile_radius,
            hit_radius,
            adversary_health,
            adversary_speed,
            adversary_cooldown_ms,
            adversary_damage,
            adversary_accuracy,
            adversary_lead_factor,
            adversary_burst_count,
            adversary_burst_delay_ms,
            pickup_interval_ms,
            max_pickups,
        );
    }
}
