//! Arena Duel - simulation core for a one-on-one arena shooter
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, AI, projectiles, waves, pickups,
//!   autopilot)
//! - `tuning`: Difficulty presets and data-driven game balance
//! - `logging`: Logger setup for the headless runner
//!
//! Plane coordinates use `Vec2` with `.x` = world x and `.y` = world z.

pub mod logging;
pub mod sim;
pub mod tuning;

pub use sim::{GameState, Snapshot, TickInput, step};
pub use tuning::{Difficulty, Tuning, TuningError, TuningOverrides};

use glam::Vec2;

/// Game rule constants that are not difficulty dependent
pub mod consts {
    /// Duration of one nominal frame in milliseconds (60 Hz)
    pub const NOMINAL_FRAME_MS: f64 = 16.667;
    /// Largest frame delta (in nominal frames) applied after a stall
    pub const MAX_FRAME_DELTA: f32 = 4.0;

    /// Agent keeps this far from the arena walls
    pub const AGENT_WALL_INSET: f32 = 1.0;
    /// Adversary keeps this far from the arena walls
    pub const ADVERSARY_WALL_INSET: f32 = 2.0;
    /// Pickups spawn this far inside the arena walls
    pub const PICKUP_WALL_INSET: f32 = 3.0;

    pub const AGENT_START_X: f32 = 0.0;
    pub const AGENT_START_Z: f32 = 12.0;
    pub const ADVERSARY_START_X: f32 = 0.0;
    pub const ADVERSARY_START_Z: f32 = -12.0;

    /// Raw heading low-pass factor per nominal frame
    pub const HEADING_SMOOTHING: f32 = 0.3;
    /// Adversary facing smoothing per nominal frame
    pub const ADVERSARY_TURN_SMOOTHING: f32 = 0.1;

    /// Below this distance the adversary retreats
    pub const RETREAT_DISTANCE: f32 = 6.0;
    /// Below this distance (and above retreat) the adversary strafes
    pub const STRAFE_DISTANCE: f32 = 18.0;
    /// Chase stops inside this stand-off distance
    pub const CHASE_STANDOFF: f32 = 3.0;
    pub const STRAFE_SPEED_MULT: f32 = 1.1;
    pub const STRAFE_FORWARD_BIAS: f32 = 0.2;
    pub const RETREAT_SPEED_MULT: f32 = 1.3;
    /// Strafe direction re-roll window (frame units)
    pub const STRAFE_RETARGET_MIN: f32 = 40.0;
    pub const STRAFE_RETARGET_SPAN: f32 = 60.0;
    /// Primary shots only inside this distance window
    pub const ADVERSARY_MIN_FIRE_RANGE: f32 = 2.0;
    pub const ADVERSARY_MAX_FIRE_RANGE: f32 = 30.0;
    /// Empirical scale on the predictive lead term
    pub const LEAD_SCALE: f32 = 16.0;
    /// Spread per unit of distance
    pub const SPREAD_DISTANCE_SCALE: f32 = 0.1;

    /// Projectile spawn offsets ahead of the shooter
    pub const AGENT_MUZZLE_OFFSET: f32 = 0.5;
    pub const ADVERSARY_MUZZLE_OFFSET: f32 = 0.9;

    pub const PICKUP_RADIUS: f32 = 1.5;
    pub const PICKUP_TTL_MS: f64 = 20_000.0;
    pub const HEALTH_PICKUP_AMOUNT: u32 = 30;
    pub const AMMO_PICKUP_AMOUNT: u32 = 15;

    /// Combo resets after this long without a hit
    pub const COMBO_TIMEOUT_MS: f64 = 2_500.0;
    /// Each combo step adds this much to the score multiplier
    pub const COMBO_STEP: f64 = 0.25;
    /// Delay between adversary defeat and the next wave
    pub const WAVE_GRACE_MS: f64 = 2_000.0;

    /// Wave scaling per wave after the first
    pub const WAVE_HEALTH_STEP: f64 = 0.2;
    pub const WAVE_SPEED_STEP: f32 = 0.08;
    pub const WAVE_COOLDOWN_STEP: f32 = 0.06;
    pub const WAVE_COOLDOWN_FLOOR: f32 = 0.4;
    /// Respawn box for a new wave, as a fraction of the arena size
    pub const WAVE_SPAWN_FRACTION: f32 = 0.6;

    pub const SCORE_HIT: u64 = 100;
    pub const SCORE_KILL_BASE: u64 = 500;
    pub const SCORE_KILL_PER_WAVE: u64 = 200;
    pub const SCORE_WAVE_PER_WAVE: u64 = 100;
    pub const SCORE_HEAL: u64 = 50;
    pub const SCORE_AMMO: u64 = 25;
}

/// Wrap an angle difference to [-π, π]
#[inline]
pub fn wrap_angle(mut angle: f32) -> f32 {
    use std::f32::consts::{PI, TAU};
    while angle > PI {
        angle -= TAU;
    }
    while angle < -PI {
        angle += TAU;
    }
    angle
}

/// Move `current` toward `target` along the shortest arc by `factor` of the gap
#[inline]
pub fn approach_angle(current: f32, target: f32, factor: f32) -> f32 {
    current + wrap_angle(target - current) * factor
}

/// Unit vector a heading points along (heading 0 faces +z)
#[inline]
pub fn heading_vector(heading: f32) -> Vec2 {
    Vec2::new(heading.sin(), heading.cos())
}

/// Heading that faces along `dir`
#[inline]
pub fn heading_of(dir: Vec2) -> f32 {
    dir.x.atan2(dir.y)
}

/// Clamp a position into the square `[-half, half]` on both axes
#[inline]
pub fn clamp_to_arena(pos: Vec2, half: f32) -> Vec2 {
    pos.clamp(Vec2::splat(-half), Vec2::splat(half))
}

/// True once a position has left the square `[-half, half]` on either axis
#[inline]
pub fn outside_arena(pos: Vec2, half: f32) -> bool {
    pos.x.abs() > half || pos.y.abs() > half
}

/// Squared-distance circle overlap test
#[inline]
pub fn within_radius(a: Vec2, b: Vec2, radius: f32) -> bool {
    a.distance_squared(b) < radius * radius
}
