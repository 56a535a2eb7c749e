//! Game state and core simulation types
//!
//! `GameState` is the whole encounter: constructed on reset, mutated by
//! `step`, replaced wholesale on the next reset.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::clock::FrameClock;
use super::director::Director;
use super::snapshot::{FinalStats, Snapshot};
use crate::consts::*;
use crate::tuning::{Difficulty, Tuning};

/// Current phase of the encounter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Adversary alive, full simulation running
    Playing,
    /// Adversary defeated, waiting out the grace delay before the next wave
    Intermission,
    /// Agent defeated; steps are ignored until reset
    GameOver,
}

/// Which side a projectile or event belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Combatant {
    Agent,
    Adversary,
}

/// Adversary behaviour state, selected purely from distance to the agent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Behavior {
    /// Idle state after reset or wave start, until the first update
    Patrol,
    Chase,
    Strafe,
    Retreat,
}

/// The controllable combatant
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Agent {
    pub pos: Vec2,
    /// Raw heading driven by turn input; shots travel along it
    pub heading: f32,
    /// Low-pass filtered heading; movement and camera follow it
    pub smooth_heading: f32,
    pub health: u32,
    pub ammo: u32,
    /// Start time of the reload in progress
    pub reload_started_ms: Option<f64>,
    pub stamina: f32,
    pub sprinting: bool,
    pub last_shot_ms: Option<f64>,
    /// Velocity estimate the adversary leads its shots with
    pub lead_velocity: Vec2,
}

impl Agent {
    pub fn new(tuning: &Tuning) -> Self {
        let heading = std::f32::consts::PI; // Facing the adversary (-z)
        Self {
            pos: Vec2::new(AGENT_START_X, AGENT_START_Z),
            heading,
            smooth_heading: heading,
            health: tuning.max_health,
            ammo: tuning.max_ammo,
            reload_started_ms: None,
            stamina: tuning.max_stamina,
            sprinting: false,
            last_shot_ms: None,
            lead_velocity: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn is_reloading(&self) -> bool {
        self.reload_started_ms.is_some()
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// The AI-controlled opponent
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Adversary {
    pub pos: Vec2,
    pub heading: f32,
    pub health: u32,
    /// Health cap for the current wave
    pub max_health: u32,
    pub behavior: Behavior,
    /// +1 or -1
    pub strafe_dir: f32,
    /// Frame units until the strafe direction is re-rolled
    pub strafe_timer: f32,
    /// `None` until the first shot after a reset, so it fires on sight
    pub last_shot_ms: Option<f64>,
    /// Follow-up shots left in the current burst
    pub burst_remaining: u32,
    /// Earliest time the next burst shot may fire
    pub burst_ready_ms: f64,
    /// Per-wave multiplier on movement speed
    pub speed_mult: f32,
    /// Per-wave multiplier on the primary cooldown
    pub cooldown_mult: f32,
}

impl Adversary {
    pub fn new(tuning: &Tuning) -> Self {
        Self {
            pos: Vec2::new(ADVERSARY_START_X, ADVERSARY_START_Z),
            heading: 0.0,
            health: tuning.adversary_health,
            max_health: tuning.adversary_health,
            behavior: Behavior::Patrol,
            strafe_dir: 1.0,
            strafe_timer: 0.0,
            last_shot_ms: None,
            burst_remaining: 0,
            burst_ready_ms: 0.0,
            speed_mult: 1.0,
            cooldown_mult: 1.0,
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.health > 0
    }
}

/// A projectile in flight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub owner: Combatant,
    pub pos: Vec2,
    /// Units per nominal frame
    pub vel: Vec2,
    pub radius: f32,
}

impl Projectile {
    /// `dir` must be a unit vector
    pub fn new(id: u32, owner: Combatant, pos: Vec2, dir: Vec2, speed: f32, radius: f32) -> Self {
        Self {
            id,
            owner,
            pos,
            vel: dir * speed,
            radius,
        }
    }

    #[inline]
    pub fn advance(&mut self, dt: f32) {
        self.pos += self.vel * dt;
    }
}

/// Pickup types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PickupKind {
    Health,
    Ammo,
}

/// A consumable world item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pickup {
    pub id: u32,
    pub kind: PickupKind,
    pub pos: Vec2,
    pub spawned_ms: f64,
}

/// Why points were awarded
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScoreReason {
    Hit,
    Kill,
    Heal,
    Ammo,
    WaveClear,
}

/// Discrete things that happened during a step
///
/// The presentation layer owns any display timing (kill feed, flashes).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    ShotFired { by: Combatant, projectile: u32 },
    AdversaryHit { damage: u32, remaining: u32 },
    AdversaryKilled { wave: u32 },
    AgentDamaged { damage: u32, remaining: u32 },
    ComboReset { previous: u32 },
    ScoreAwarded { reason: ScoreReason, points: u64, combo: u32 },
    ReloadStarted,
    ReloadFinished,
    ReloadCancelled,
    PickupSpawned { id: u32, kind: PickupKind },
    PickupConsumed { id: u32, kind: PickupKind },
    PickupExpired { id: u32, kind: PickupKind },
    WaveStarted { wave: u32, adversary_health: u32 },
    GameOver,
}

/// An event with the simulation time it happened at
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimedEvent {
    pub at_ms: f64,
    pub event: GameEvent,
}

/// Complete encounter state (deterministic for a given seed and input stream)
#[derive(Debug, Clone)]
pub struct GameState {
    /// Run seed for reproducibility
    pub seed: u64,
    /// Preset the tuning was built from
    pub difficulty: Difficulty,
    pub tuning: Tuning,
    pub clock: FrameClock,
    pub phase: GamePhase,
    pub agent: Agent,
    pub adversary: Adversary,
    /// In-flight projectiles (ascending id)
    pub projectiles: Vec<Projectile>,
    /// Live pickups (ascending id)
    pub pickups: Vec<Pickup>,
    /// Wave, score, combo and accuracy bookkeeping
    pub director: Director,
    pub last_pickup_spawn_ms: f64,
    pub final_stats: Option<FinalStats>,
    /// Seeded RNG behind strafe re-rolls, aim spread and pickup placement
    pub(crate) rng: Pcg32,
    /// Events raised by the step in progress
    pub(crate) events: Vec<TimedEvent>,
    next_id: u32,
}

impl GameState {
    /// Create a new encounter from a difficulty preset
    pub fn new(difficulty: Difficulty, seed: u64) -> Self {
        Self::with_tuning(difficulty, difficulty.tuning(), seed)
    }

    /// Create a new encounter with custom tuning
    pub fn with_tuning(difficulty: Difficulty, tuning: Tuning, seed: u64) -> Self {
        Self {
            seed,
            difficulty,
            agent: Agent::new(&tuning),
            adversary: Adversary::new(&tuning),
            tuning,
            clock: FrameClock::default(),
            phase: GamePhase::Playing,
            projectiles: Vec::new(),
            pickups: Vec::new(),
            director: Director::new(),
            last_pickup_spawn_ms: 0.0,
            final_stats: None,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Reinitialise everything from `difficulty`, keeping the run seed
    ///
    /// The new state is built before it replaces the old one, so a reset is
    /// all-or-nothing and repeated resets are identical.
    pub fn reset(&mut self, difficulty: Difficulty) {
        self.reset_with_tuning(difficulty, difficulty.tuning());
    }

    pub fn reset_with_tuning(&mut self, difficulty: Difficulty, tuning: Tuning) {
        *self = Self::with_tuning(difficulty, tuning, self.seed);
        log::info!("Encounter reset: difficulty={}, seed={}", difficulty, self.seed);
    }

    /// Reset with a new seed (new pickup placement, strafe and spread rolls)
    pub fn reseed(&mut self, seed: u64) {
        let tuning = self.tuning.clone();
        *self = Self::with_tuning(self.difficulty, tuning, seed);
        log::info!("Encounter reset: difficulty={}, seed={}", self.difficulty, seed);
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Record an event at `at_ms`
    pub(crate) fn emit(&mut self, at_ms: f64, event: GameEvent) {
        self.events.push(TimedEvent { at_ms, event });
    }

    /// Spawn a projectile travelling along unit vector `dir`
    pub fn spawn_projectile(&mut self, owner: Combatant, pos: Vec2, dir: Vec2) -> u32 {
        let id = self.next_entity_id();
        self.projectiles.push(Projectile::new(
            id,
            owner,
            pos,
            dir,
            self.tuning.projectile_speed,
            self.tuning.projectile_radius,
        ));
        id
    }

    /// Place a pickup; a no-op (returns `None`) when at capacity
    pub fn spawn_pickup(&mut self, kind: PickupKind, pos: Vec2) -> Option<u32> {
        if self.pickups.len() >= self.tuning.max_pickups {
            return None;
        }
        let id = self.next_entity_id();
        let spawned_ms = self.clock.now_ms();
        self.pickups.push(Pickup {
            id,
            kind,
            pos,
            spawned_ms,
        });
        self.emit(spawned_ms, GameEvent::PickupSpawned { id, kind });
        Some(id)
    }

    /// Read-only view for the presentation layer
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            time_ms: self.clock.now_ms(),
            phase: self.phase,
            difficulty: self.difficulty,
            agent_pos: self.agent.pos,
            agent_heading: self.agent.smooth_heading,
            agent_health: self.agent.health,
            agent_max_health: self.tuning.max_health,
            ammo: self.agent.ammo,
            max_ammo: self.tuning.max_ammo,
            reloading: self.agent.is_reloading(),
            stamina: self.agent.stamina,
            max_stamina: self.tuning.max_stamina,
            sprinting: self.agent.sprinting,
            adversary_pos: self.adversary.pos,
            adversary_heading: self.adversary.heading,
            adversary_health: self.adversary.health,
            adversary_max_health: self.adversary.max_health,
            adversary_behavior: self.adversary.behavior,
            score: self.director.score,
            combo: self.director.combo,
            combo_multiplier: self.director.multiplier(),
            wave: self.director.wave,
            projectiles: self.projectiles.clone(),
            pickups: self.pickups.clone(),
            events: self.events.clone(),
            game_over: self.phase == GamePhase::GameOver,
            final_stats: self.final_stats.clone(),
        }
    }
}
