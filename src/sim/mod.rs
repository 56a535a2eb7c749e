//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Time only advances through `step`
//! - Seeded RNG only
//! - Stable iteration order (by entity ID)
//! - No rendering or platform dependencies

pub mod adversary;
pub mod autopilot;
pub mod clock;
pub mod director;
pub mod pickups;
pub mod player;
pub mod projectile;
pub mod snapshot;
pub mod state;
pub mod tick;

pub use adversary::{aim_direction, select_behavior};
pub use clock::{FrameClock, frame_delta};
pub use director::{Director, start_next_wave, wave_cooldown_mult, wave_health, wave_speed_mult};
pub use snapshot::{FinalStats, Snapshot};
pub use state::{
    Adversary, Agent, Behavior, Combatant, GameEvent, GamePhase, GameState, Pickup, PickupKind,
    Projectile, ScoreReason, TimedEvent,
};
pub use tick::{TickInput, step};
