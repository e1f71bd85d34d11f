//! Damage, death effects, auto-fire and the per-archetype behaviours.
//!
//! Every function mutates the working copy of the round state that
//! `compute::tick` owns for the duration of one tick.

use rand::Rng;

use crate::boss;
use crate::config::{
    ENEMY_BULLET_DAMAGE, ENEMY_BULLET_SPEED, INVULNERABILITY_TICKS, PLAYER_BULLET_SPEED,
    SPLIT_JITTER,
};
use crate::entities::{
    Archetype, Behavior, Bullet, BulletOwner, EndReason, Enemy, GameState, GameStatus, LastHit,
    Player,
};
use crate::geometry::{distance, unit_toward};
use crate::movement::{bullet_hits_enemy, bullet_hits_player, enemy_touches_player};
use crate::spawner::{make_split_child, next_id};

// ── Score table ──────────────────────────────────────────────────────────────

/// Score awarded per enemy killed.
pub fn score_for(kind: Archetype) -> u32 {
    match kind {
        Archetype::Basic => 10,
        Archetype::Shooter => 20,
        Archetype::Tank => 30,
        Archetype::Speedy => 15,
        Archetype::SuperSpeedy => 25,
        Archetype::Explosive => 25,
        Archetype::Regenerating => 35,
        Archetype::Splitting => 30,
        Archetype::SplitChild => 15,
        Archetype::Teleporting => 40,
        Archetype::Boss => 100,
    }
}

// ── Player damage ────────────────────────────────────────────────────────────

/// Hurt the player unless invulnerable, then open a fresh invulnerability
/// window. Ends the round when health runs out. Returns whether damage landed.
pub fn damage_player(state: &mut GameState, amount: i32) -> bool {
    if state.player.invulnerable > 0 {
        return false;
    }
    state.player.health = (state.player.health - amount).max(0);
    state.player.invulnerable = INVULNERABILITY_TICKS;

    if state.player.health <= 0 {
        state.status = GameStatus::Ended(EndReason::PlayerDown);
        tracing::info!(
            frame = state.frame,
            score = state.score,
            elapsed_ms = state.elapsed_ms,
            "player down"
        );
    }
    true
}

// ── Auto-fire ────────────────────────────────────────────────────────────────

/// Closest enemy to the player. Equal distances keep the first one found.
pub fn nearest_enemy<'a>(player: &Player, enemies: &'a [Enemy]) -> Option<&'a Enemy> {
    let mut best: Option<(&Enemy, f32)> = None;
    for enemy in enemies {
        let d = distance((player.x, player.y), (enemy.x, enemy.y));
        if best.map_or(true, |(_, bd)| d < bd) {
            best = Some((enemy, d));
        }
    }
    best.map(|(e, _)| e)
}

/// Fire one bullet at the nearest enemy once `fire_rate_ms` of wall clock has
/// passed since the previous shot. No target means no shot and the cooldown is
/// left alone.
pub fn auto_fire(state: &mut GameState, now_ms: u64) -> bool {
    if let Some(last) = state.last_shot_ms {
        if now_ms.saturating_sub(last) < state.config.fire_rate_ms {
            return false;
        }
    }

    let player = &state.player;
    let Some(target) = nearest_enemy(player, &state.enemies) else {
        return false;
    };
    let Some((ux, uy)) = unit_toward((player.x, player.y), (target.x, target.y)) else {
        return false;
    };

    let bullet = Bullet {
        x: player.x,
        y: player.y,
        dx: ux * PLAYER_BULLET_SPEED,
        dy: uy * PLAYER_BULLET_SPEED,
        owner: BulletOwner::Player,
    };
    state.bullets.push(bullet);
    state.last_shot_ms = Some(now_ms);
    true
}

// ── Hits and deaths ──────────────────────────────────────────────────────────

/// Test each enemy once against the player's bullets and resolve the hits.
///
/// Only enemies present when the pass starts are tested, and each can absorb
/// at most one bullet. Enemies removed by an explosion earlier in the pass are
/// skipped; split children join next tick.
pub fn resolve_player_bullets(state: &mut GameState, rng: &mut impl Rng) {
    let ids: Vec<u64> = state.enemies.iter().map(|e| e.id).collect();

    for id in ids {
        if state.is_over() {
            return;
        }
        let Some(idx) = state.enemies.iter().position(|e| e.id == id) else {
            continue;
        };
        let enemy = &state.enemies[idx];
        let Some(hit) = state.bullets.iter().position(|b| bullet_hits_enemy(b, enemy)) else {
            continue;
        };
        state.bullets.remove(hit);
        apply_hit(state, idx, rng);
    }
}

/// One point of damage to the enemy at `idx`, or an outright kill for
/// enemies without a health stat.
pub fn apply_hit(state: &mut GameState, idx: usize, rng: &mut impl Rng) {
    let enemy = &mut state.enemies[idx];
    let dead = match enemy.health.as_mut() {
        Some(health) => {
            health.current -= 1.0;
            state.last_hit = Some(LastHit {
                id: enemy.id,
                kind: enemy.kind,
                health: health.current.max(0.0),
                max_health: health.max,
            });
            health.current <= 0.0
        }
        None => true,
    };

    if dead {
        kill_enemy(state, idx, rng);
    }
}

/// Remove the enemy at `idx` and run its on-death effects, then award score.
pub fn kill_enemy(state: &mut GameState, idx: usize, rng: &mut impl Rng) {
    let enemy = state.enemies.remove(idx);

    match enemy.kind {
        Archetype::Boss => {
            state.boss_active = false;
            state.boss_spawn_timer_ms = 0.0;
        }
        Archetype::Splitting => {
            for _ in 0..2 {
                let x = enemy.x + (rng.gen::<f32>() - 0.5) * 2.0 * SPLIT_JITTER;
                let y = enemy.y + (rng.gen::<f32>() - 0.5) * 2.0 * SPLIT_JITTER;
                let id = next_id(state);
                state.enemies.push(make_split_child(&enemy, id, x, y));
            }
        }
        _ => {}
    }

    if let Behavior::Explosive { radius } = enemy.behavior {
        explode(state, &enemy, radius);
    }

    state.score += score_for(enemy.kind);
    if enemy.health.is_none() {
        state.last_hit = Some(LastHit {
            id: enemy.id,
            kind: enemy.kind,
            health: 0.0,
            max_health: 1.0,
        });
    }
    tracing::debug!(
        frame = state.frame,
        kind = enemy.kind.label(),
        score = state.score,
        "enemy killed"
    );
}

/// Clear every enemy within `radius` of the dead enemy's position and hurt
/// the player if caught in the blast. Blast victims award no score and
/// trigger no death effects of their own.
pub fn explode(state: &mut GameState, source: &Enemy, radius: f32) {
    let centre = (source.x, source.y);
    let before = state.enemies.len();
    state
        .enemies
        .retain(|e| distance(centre, (e.x, e.y)) > radius);
    tracing::debug!(
        frame = state.frame,
        removed = before - state.enemies.len(),
        "explosion"
    );

    let player = &state.player;
    if distance(centre, (player.x, player.y)) <= radius {
        damage_player(state, source.damage);
    }
}

// ── Per-archetype behaviours ─────────────────────────────────────────────────

/// Shooter, boss, regeneration and teleport updates for every living enemy.
pub fn run_behaviors(state: &mut GameState, rng: &mut impl Rng) {
    for idx in 0..state.enemies.len() {
        let behavior = state.enemies[idx].behavior.clone();
        match behavior {
            Behavior::Shooter { .. } => shooter_update(state, idx),
            Behavior::Boss { .. } => boss::update_boss(state, idx),
            Behavior::Regenerating { rate } => regenerate(&mut state.enemies[idx], rate),
            Behavior::Teleporting { .. } => {
                let (w, h) = (state.width, state.height);
                teleport_update(&mut state.enemies[idx], rng, w, h);
            }
            Behavior::Inert | Behavior::Explosive { .. } => {}
        }
    }
}

fn shooter_update(state: &mut GameState, idx: usize) {
    let target = (state.player.x, state.player.y);
    let enemy = &mut state.enemies[idx];
    let Behavior::Shooter { shoot_rate, shoot_counter } = &mut enemy.behavior else {
        return;
    };

    *shoot_counter += 1;
    if *shoot_counter < *shoot_rate {
        return;
    }
    *shoot_counter = 0;

    if let Some((ux, uy)) = unit_toward((enemy.x, enemy.y), target) {
        let bullet = Bullet {
            x: enemy.x,
            y: enemy.y,
            dx: ux * ENEMY_BULLET_SPEED,
            dy: uy * ENEMY_BULLET_SPEED,
            owner: BulletOwner::Enemy,
        };
        state.bullets.push(bullet);
    }
}

/// Heal toward max health, never past it.
pub fn regenerate(enemy: &mut Enemy, rate: f32) {
    if let Some(health) = enemy.health.as_mut() {
        if health.current < health.max {
            health.current = (health.current + rate).min(health.max);
        }
    }
}

/// Count toward the cooldown and jump to a uniform random point when reached.
pub fn teleport_update(enemy: &mut Enemy, rng: &mut impl Rng, width: f32, height: f32) {
    let Behavior::Teleporting { cooldown, counter } = &mut enemy.behavior else {
        return;
    };
    *counter += 1;
    if *counter >= *cooldown {
        *counter = 0;
        enemy.x = rng.gen::<f32>() * width;
        enemy.y = rng.gen::<f32>() * height;
    }
}

// ── Damage to the player ─────────────────────────────────────────────────────

/// Body contact from any enemy. The first hit opens the invulnerability
/// window, so at most one enemy lands damage per tick.
pub fn resolve_contact(state: &mut GameState) {
    let hit = state
        .enemies
        .iter()
        .find(|e| enemy_touches_player(e, &state.player))
        .map(|e| e.damage);
    if let Some(damage) = hit {
        damage_player(state, damage);
    }
}

/// Enemy bullets against the player. Consumes at most one bullet per tick for
/// the same reason as contact damage.
pub fn resolve_enemy_bullets(state: &mut GameState) {
    let hit = state
        .bullets
        .iter()
        .position(|b| bullet_hits_player(b, &state.player));
    if let Some(idx) = hit {
        state.bullets.remove(idx);
        damage_player(state, ENEMY_BULLET_DAMAGE);
    }
}
