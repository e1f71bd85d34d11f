//! All game entity types: pure data, no logic.

use crate::config::GameConfig;
use crate::scores::HighScore;

// ── Enemy archetypes ──────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Archetype {
    Basic,
    Shooter,
    Tank,
    Speedy,
    SuperSpeedy,
    Explosive,
    Regenerating,
    Splitting,
    SplitChild,
    Teleporting,
    Boss,
}

impl Archetype {
    /// Label shown under the target health bar.
    pub fn label(self) -> &'static str {
        match self {
            Archetype::Basic => "basic",
            Archetype::Shooter => "shooter",
            Archetype::Tank => "tank",
            Archetype::Speedy => "speedy",
            Archetype::SuperSpeedy => "super_speedy",
            Archetype::Explosive => "explosive",
            Archetype::Regenerating => "regenerating",
            Archetype::Splitting => "splitting",
            Archetype::SplitChild => "split_child",
            Archetype::Teleporting => "teleporting",
            Archetype::Boss => "boss",
        }
    }
}

/// 24-bit colour; the renderer decides how to show it.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Rgb(pub u8, pub u8, pub u8);

/// Hit points for archetypes that survive more than one hit.
/// `current` is fractional because regeneration heals in small steps.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Archetype-specific state carried alongside the common enemy fields.
#[derive(Clone, Debug, PartialEq)]
pub enum Behavior {
    /// Walks at the player and nothing else.
    Inert,
    /// Fires one aimed bullet every `shoot_rate` ticks.
    Shooter { shoot_rate: u32, shoot_counter: u32 },
    /// Heals `rate` per tick up to its max health.
    Regenerating { rate: f32 },
    /// Jumps to a random point every `cooldown` ticks.
    Teleporting { cooldown: u32, counter: u32 },
    /// Clears everything within `radius` when it dies.
    Explosive { radius: f32 },
    /// Fires a radial volley every `shoot_rate` ticks.
    Boss { shoot_rate: u32, shoot_counter: u32 },
}

// ── Projectiles ───────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum BulletOwner {
    Player,
    Enemy,
}

#[derive(Clone, Debug)]
pub struct Bullet {
    pub x: f32,
    pub y: f32,
    /// Velocity per tick before damping.
    pub dx: f32,
    pub dy: f32,
    pub owner: BulletOwner,
}

// ── Player & enemy ────────────────────────────────────────────────────────────

#[derive(Clone, Debug)]
pub struct Player {
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    /// 0..=100, floored at 0.
    pub health: i32,
    /// Ticks left during which damage is ignored.
    pub invulnerable: u32,
}

#[derive(Clone, Debug)]
pub struct Enemy {
    /// Unique within a round; lets passes survive removals mid-iteration.
    pub id: u64,
    pub x: f32,
    pub y: f32,
    pub radius: f32,
    pub speed: f32,
    pub color: Rgb,
    /// Contact damage.
    pub damage: i32,
    pub kind: Archetype,
    /// `None` means the first hit kills.
    pub health: Option<Health>,
    pub behavior: Behavior,
}

// ── Per-tick host input ───────────────────────────────────────────────────────

/// Directional keys currently held.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
}

/// Everything the host supplies for one tick.
#[derive(Clone, Copy, Debug)]
pub struct TickContext {
    pub input: InputState,
    /// Host wall clock, milliseconds.
    pub now_ms: u64,
    pub width: f32,
    pub height: f32,
}

// ── Round status ──────────────────────────────────────────────────────────────

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum EndReason {
    TimeUp,
    PlayerDown,
}

impl EndReason {
    pub fn message(self) -> &'static str {
        match self {
            EndReason::TimeUp => "Time's up!",
            EndReason::PlayerDown => "Game Over!",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum GameStatus {
    Playing,
    Ended(EndReason),
}

/// Snapshot of the last enemy a player bullet connected with. Cosmetic only.
#[derive(Clone, Debug, PartialEq)]
pub struct LastHit {
    pub id: u64,
    pub kind: Archetype,
    pub health: f32,
    pub max_health: f32,
}

/// End-of-round data handed to the summary presenter.
#[derive(Clone, Debug, PartialEq)]
pub struct RoundSummary {
    pub message: &'static str,
    pub time_ms: u64,
    pub score: u32,
    pub high_scores: Vec<HighScore>,
}

// ── Master game state ─────────────────────────────────────────────────────────

/// The entire round state.  Cloneable so `tick` can return a new copy
/// without mutating the caller's.
#[derive(Clone, Debug)]
pub struct GameState {
    pub player: Player,
    pub enemies: Vec<Enemy>,
    pub bullets: Vec<Bullet>,
    /// Never decreases within a round.
    pub score: u32,
    pub status: GameStatus,
    pub frame: u64,
    pub width: f32,
    pub height: f32,
    pub started_at_ms: u64,
    pub elapsed_ms: u64,
    /// Ticks since the last regular spawn attempt.
    pub spawn_counter: u32,
    pub boss_spawn_timer_ms: f64,
    pub boss_active: bool,
    /// Base angle of the next boss volley, in [0, 2π).
    pub boss_shoot_angle: f32,
    /// Wall-clock time of the last player shot; `None` until the first one.
    pub last_shot_ms: Option<u64>,
    pub last_hit: Option<LastHit>,
    /// Sorted by score, highest first.
    pub high_scores: Vec<HighScore>,
    /// Set once by `compute::finish_round`.
    pub summary: Option<RoundSummary>,
    pub next_enemy_id: u64,
    pub config: GameConfig,
}

impl GameState {
    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Ended(_))
    }
}
