//! Enemy creation: roll bands, stat tables, edge placement and the boss timer.

use rand::Rng;

use crate::config::TICK_MS;
use crate::entities::{Archetype, Behavior, Enemy, GameState, Health, Rgb};
use crate::geometry::circles_overlap;

// ── Roll bands ───────────────────────────────────────────────────────────────

/// Upper bound (exclusive) of each regular archetype's cumulative band.
const SPAWN_BANDS: [(f32, Archetype); 9] = [
    (0.20, Archetype::Basic),
    (0.35, Archetype::Shooter),
    (0.50, Archetype::Tank),
    (0.60, Archetype::Speedy),
    (0.70, Archetype::SuperSpeedy),
    (0.77, Archetype::Explosive),
    (0.84, Archetype::Regenerating),
    (0.91, Archetype::Splitting),
    (1.00, Archetype::Teleporting),
];

/// Map a uniform roll in [0, 1) to a regular archetype.
pub fn archetype_for_roll(roll: f32) -> Archetype {
    SPAWN_BANDS
        .iter()
        .find(|(upper, _)| roll < *upper)
        .map(|(_, kind)| *kind)
        .unwrap_or(Archetype::Teleporting)
}

// ── Stat table ───────────────────────────────────────────────────────────────

const C_BASIC: Rgb = Rgb(0xF1, 0x49, 0x1D);
const C_SHOOTER: Rgb = Rgb(0xF1, 0xCA, 0x1D);
const C_TANK: Rgb = Rgb(0x56, 0x1D, 0xF1);
const C_SPEEDY: Rgb = Rgb(0xFF, 0x00, 0xFF);
const C_SUPER_SPEEDY: Rgb = Rgb(0x00, 0xFF, 0xFF);
const C_EXPLOSIVE: Rgb = Rgb(0xFF, 0xA5, 0x00);
const C_REGENERATING: Rgb = Rgb(0x00, 0xFF, 0x00);
const C_SPLITTING: Rgb = Rgb(0x8A, 0x2B, 0xE2);
const C_TELEPORTING: Rgb = Rgb(0xFF, 0x14, 0x93);
const C_BOSS: Rgb = Rgb(0xFF, 0x00, 0x00);

fn health(hp: f32) -> Option<Health> {
    Some(Health { current: hp, max: hp })
}

/// Build an enemy of `kind` from its fixed template.
///
/// `SplitChild` has no template of its own; it is derived from the parent by
/// [`make_split_child`]. Asking for one here yields a one-hit basic body with
/// the child tag.
pub fn make_enemy(kind: Archetype, id: u64, x: f32, y: f32) -> Enemy {
    let (radius, speed, damage, color, health, behavior) = match kind {
        Archetype::Basic => (15.0, 0.75, 25, C_BASIC, None, Behavior::Inert),
        Archetype::Shooter => (
            15.0,
            0.5,
            20,
            C_SHOOTER,
            None,
            Behavior::Shooter { shoot_rate: 180, shoot_counter: 0 },
        ),
        Archetype::Tank => (25.0, 0.25, 40, C_TANK, health(5.0), Behavior::Inert),
        Archetype::Speedy => (10.0, 1.5, 15, C_SPEEDY, None, Behavior::Inert),
        Archetype::SuperSpeedy => (8.0, 2.5, 20, C_SUPER_SPEEDY, None, Behavior::Inert),
        Archetype::Explosive => (
            20.0,
            0.4,
            50,
            C_EXPLOSIVE,
            None,
            Behavior::Explosive { radius: 100.0 },
        ),
        Archetype::Regenerating => (
            18.0,
            0.6,
            30,
            C_REGENERATING,
            health(3.0),
            Behavior::Regenerating { rate: 0.005 },
        ),
        Archetype::Splitting => (22.0, 0.5, 35, C_SPLITTING, health(2.0), Behavior::Inert),
        Archetype::SplitChild => (11.0, 0.75, 17, C_SPLITTING, health(1.0), Behavior::Inert),
        Archetype::Teleporting => (
            12.0,
            1.0,
            25,
            C_TELEPORTING,
            None,
            Behavior::Teleporting { cooldown: 180, counter: 0 },
        ),
        Archetype::Boss => (
            35.0,
            0.2,
            60,
            C_BOSS,
            health(20.0),
            Behavior::Boss { shoot_rate: 240, shoot_counter: 0 },
        ),
    };
    Enemy {
        id,
        x,
        y,
        radius,
        speed,
        color,
        damage,
        kind,
        health,
        behavior,
    }
}

/// Child dropped by a dying splitting enemy: half radius, 1.5× speed,
/// half (floored) damage, one hit point, parent's colour.
pub fn make_split_child(parent: &Enemy, id: u64, x: f32, y: f32) -> Enemy {
    Enemy {
        id,
        x,
        y,
        radius: parent.radius / 2.0,
        speed: parent.speed * 1.5,
        color: parent.color,
        damage: parent.damage / 2,
        kind: Archetype::SplitChild,
        health: health(1.0),
        behavior: Behavior::Inert,
    }
}

// ── Placement ────────────────────────────────────────────────────────────────

/// Uniform point on one of the four viewport edges (top, right, bottom, left).
pub fn edge_position(rng: &mut impl Rng, width: f32, height: f32) -> (f32, f32) {
    match rng.gen_range(0..4) {
        0 => (rng.gen::<f32>() * width, 0.0),
        1 => (width, rng.gen::<f32>() * height),
        2 => (rng.gen::<f32>() * width, height),
        _ => (0.0, rng.gen::<f32>() * height),
    }
}

pub(crate) fn next_id(state: &mut GameState) -> u64 {
    let id = state.next_enemy_id;
    state.next_enemy_id += 1;
    id
}

/// Roll a regular enemy on a random edge and insert it unless it overlaps an
/// existing enemy. A rejected candidate is dropped; there is no retry.
pub fn try_spawn_enemy(state: &mut GameState, rng: &mut impl Rng) -> bool {
    let (x, y) = edge_position(rng, state.width, state.height);
    let kind = archetype_for_roll(rng.gen::<f32>());
    let candidate = make_enemy(kind, state.next_enemy_id, x, y);

    let blocked = state.enemies.iter().any(|e| {
        circles_overlap((x, y), candidate.radius, (e.x, e.y), e.radius)
    });
    if blocked {
        tracing::trace!(kind = kind.label(), "spawn rejected: overlap");
        return false;
    }

    next_id(state);
    state.enemies.push(candidate);
    true
}

/// Place the boss on a random edge and mark it active.
pub fn spawn_boss(state: &mut GameState, rng: &mut impl Rng) {
    let (x, y) = edge_position(rng, state.width, state.height);
    let id = next_id(state);
    state.enemies.push(make_enemy(Archetype::Boss, id, x, y));
    state.boss_active = true;
    tracing::info!(frame = state.frame, x, y, "boss spawned");
}

/// Boss timer then regular spawning. Both pause while a boss is active.
pub fn run_spawner(state: &mut GameState, rng: &mut impl Rng) {
    if !state.boss_active {
        state.boss_spawn_timer_ms += TICK_MS;
        if state.boss_spawn_timer_ms >= state.config.boss_interval_ms {
            spawn_boss(state, rng);
            state.boss_spawn_timer_ms = 0.0;
        }
    }

    if !state.boss_active {
        state.spawn_counter += 1;
        if state.spawn_counter >= state.config.enemy_spawn_rate {
            try_spawn_enemy(state, rng);
            state.spawn_counter = 0;
        }
    }
}
