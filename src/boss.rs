//! Boss volley: eight bullets fanned evenly around the boss, with the whole
//! pattern rotated a little further on every volley.

use std::f32::consts::{PI, TAU};

use crate::config::BOSS_BULLET_SPEED;
use crate::entities::{Behavior, Bullet, BulletOwner, GameState};
use crate::geometry::unit_from_angle;

pub const VOLLEY_SIZE: usize = 8;
/// Rotation applied to the base angle before each volley.
pub const VOLLEY_STEP: f32 = PI / 16.0;
/// Spacing between bullets inside one volley.
pub const VOLLEY_SPREAD: f32 = PI / 4.0;

/// Next base angle, wrapped into [0, 2π).
pub fn advance_angle(angle: f32) -> f32 {
    let next = angle + VOLLEY_STEP;
    if next >= TAU {
        next - TAU
    } else {
        next
    }
}

/// Bullets of a single volley fired from `(x, y)` at base angle `base`.
pub fn volley(x: f32, y: f32, base: f32) -> Vec<Bullet> {
    (0..VOLLEY_SIZE)
        .map(|k| {
            let (ux, uy) = unit_from_angle(base + k as f32 * VOLLEY_SPREAD);
            Bullet {
                x,
                y,
                dx: ux * BOSS_BULLET_SPEED,
                dy: uy * BOSS_BULLET_SPEED,
                owner: BulletOwner::Enemy,
            }
        })
        .collect()
}

/// Count the boss at `idx` up to its cadence and fire when it is reached.
/// Does nothing for non-boss enemies.
pub fn update_boss(state: &mut GameState, idx: usize) {
    let enemy = &mut state.enemies[idx];
    let Behavior::Boss { shoot_rate, shoot_counter } = &mut enemy.behavior else {
        return;
    };

    *shoot_counter += 1;
    if *shoot_counter < *shoot_rate {
        return;
    }
    *shoot_counter = 0;
    let (x, y) = (enemy.x, enemy.y);

    state.boss_shoot_angle = advance_angle(state.boss_shoot_angle);
    let bullets = volley(x, y, state.boss_shoot_angle);
    state.bullets.extend(bullets);
}
