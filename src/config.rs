//! Match parameters.
//!
//! `GameConfig` carries the values a host may tune (the CLI exposes them);
//! the plain constants are fixed simulation rules.

/// Nominal duration of one tick in milliseconds. Drives the boss timer only;
/// the match timer and fire cadence use the host's wall clock.
pub const TICK_MS: f64 = 1000.0 / 60.0;

pub const PLAYER_RADIUS: f32 = 20.0;
pub const PLAYER_SPEED: f32 = 3.0;
pub const PLAYER_MAX_HEALTH: i32 = 100;

/// Collision radius of every bullet, player- or enemy-owned.
pub const BULLET_RADIUS: f32 = 5.0;
/// Applied to bullet velocity on every tick.
pub const BULLET_DAMPING: f32 = 0.5;
pub const PLAYER_BULLET_SPEED: f32 = 5.0;
pub const ENEMY_BULLET_SPEED: f32 = 2.0;
pub const BOSS_BULLET_SPEED: f32 = 3.0;
pub const ENEMY_BULLET_DAMAGE: i32 = 10;

pub const INVULNERABILITY_TICKS: u32 = 60;

/// Max jitter applied per axis when a splitting enemy drops its children.
pub const SPLIT_JITTER: f32 = 10.0;

/// Seconds to milliseconds, saturating instead of overflowing.
pub fn secs_to_ms(secs: u64) -> u64 {
    secs.saturating_mul(1000)
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GameConfig {
    /// Ticks between regular spawn attempts.
    pub enemy_spawn_rate: u32,
    /// Minimum wall-clock gap between player shots.
    pub fire_rate_ms: u64,
    /// Surviving this long ends the round with "Time's up!".
    pub game_duration_ms: u64,
    /// Boss timer threshold, accumulated at `TICK_MS` per boss-free tick.
    pub boss_interval_ms: f64,
}

impl Default for GameConfig {
    fn default() -> Self {
        GameConfig {
            enemy_spawn_rate: 120,
            fire_rate_ms: 750,
            game_duration_ms: 5 * 60 * 1000,
            boss_interval_ms: 40_000.0,
        }
    }
}
