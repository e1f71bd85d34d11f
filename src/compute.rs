//! Match controller.
//!
//! `tick` takes an immutable reference to the current `GameState` plus the
//! host's per-tick context and returns a brand-new `GameState`. Randomness
//! comes only from the injected RNG so tests can seed it.

use rand::Rng;

use crate::combat;
use crate::config::{GameConfig, PLAYER_MAX_HEALTH, PLAYER_RADIUS, PLAYER_SPEED};
use crate::entities::{
    Archetype, EndReason, GameState, GameStatus, Player, RoundSummary, TickContext,
};
use crate::movement::{move_bullets, move_enemies, move_player};
use crate::scores::{record, HighScore, ScoreStore};
use crate::spawner::run_spawner;

// ── Constructors ─────────────────────────────────────────────────────────────

/// Fresh round state. The player starts in the centre of the viewport.
pub fn init_state(
    config: GameConfig,
    width: f32,
    height: f32,
    now_ms: u64,
    high_scores: Vec<HighScore>,
) -> GameState {
    GameState {
        player: Player {
            x: width / 2.0,
            y: height / 2.0,
            radius: PLAYER_RADIUS,
            speed: PLAYER_SPEED,
            health: PLAYER_MAX_HEALTH,
            invulnerable: 0,
        },
        enemies: Vec::new(),
        bullets: Vec::new(),
        score: 0,
        status: GameStatus::Playing,
        frame: 0,
        width,
        height,
        started_at_ms: now_ms,
        elapsed_ms: 0,
        spawn_counter: 0,
        boss_spawn_timer_ms: 0.0,
        boss_active: false,
        boss_shoot_angle: 0.0,
        last_shot_ms: None,
        last_hit: None,
        high_scores,
        summary: None,
        next_enemy_id: 0,
        config,
    }
}

/// Start over: everything per-round is rebuilt, the high-score list and
/// configuration carry over.
pub fn restart(state: &GameState, now_ms: u64) -> GameState {
    init_state(
        state.config,
        state.width,
        state.height,
        now_ms,
        state.high_scores.clone(),
    )
}

// ── Per-frame tick ───────────────────────────────────────────────────────────

/// Advance the simulation by one frame.
///
/// Phase order: time limit, spawner, player, auto-fire, bullets, enemy
/// movement, player hits on enemies, archetype behaviours, contact damage,
/// enemy hits on the player. The round may end at any damage point, in which
/// case the remaining phases are skipped. An ended round is frozen.
pub fn tick(state: &GameState, ctx: &TickContext, rng: &mut impl Rng) -> GameState {
    let mut next = state.clone();
    if next.is_over() {
        return next;
    }

    next.frame += 1;
    next.width = ctx.width;
    next.height = ctx.height;
    next.elapsed_ms = ctx.now_ms.saturating_sub(next.started_at_ms);

    // ── 1. Time limit ────────────────────────────────────────────────────────
    if next.elapsed_ms >= next.config.game_duration_ms {
        next.status = GameStatus::Ended(EndReason::TimeUp);
        tracing::info!(score = next.score, elapsed_ms = next.elapsed_ms, "time's up");
        return next;
    }

    // ── 2. Spawning ──────────────────────────────────────────────────────────
    run_spawner(&mut next, rng);

    // ── 3. Player ────────────────────────────────────────────────────────────
    move_player(&mut next.player, &ctx.input, next.width, next.height);
    next.player.invulnerable = next.player.invulnerable.saturating_sub(1);
    combat::auto_fire(&mut next, ctx.now_ms);

    // ── 4. Movement ──────────────────────────────────────────────────────────
    move_bullets(&mut next.bullets, next.width, next.height);
    let target = (next.player.x, next.player.y);
    move_enemies(&mut next.enemies, target);

    // ── 5. Combat ────────────────────────────────────────────────────────────
    combat::resolve_player_bullets(&mut next, rng);
    if next.is_over() {
        return next;
    }
    combat::run_behaviors(&mut next, rng);

    combat::resolve_contact(&mut next);
    if next.is_over() {
        return next;
    }
    combat::resolve_enemy_bullets(&mut next);
    if next.is_over() {
        return next;
    }

    // ── 6. Bookkeeping ───────────────────────────────────────────────────────
    next.boss_active = next.enemies.iter().any(|e| e.kind == Archetype::Boss);
    refresh_last_hit(&mut next);

    next
}

/// Keep the target health bar in step with the live enemy it tracks.
fn refresh_last_hit(state: &mut GameState) {
    let Some(last) = state.last_hit.as_mut() else {
        return;
    };
    let live = state
        .enemies
        .iter()
        .find(|e| e.id == last.id)
        .and_then(|e| e.health);
    // Tracked enemy no longer alive: hide the bar.
    last.health = live.map_or(0.0, |health| health.current.max(0.0));
}

// ── End of round ─────────────────────────────────────────────────────────────

/// Record the finished round and hand back the summary to present.
///
/// Appends `{elapsed, score}` to the high-score list, re-sorts it and saves it
/// through `store`. A failed save is logged and the round still ends. Returns
/// `None` while the round is still being played; repeated calls return the
/// same summary without recording twice.
pub fn finish_round(state: &mut GameState, store: &impl ScoreStore) -> Option<RoundSummary> {
    let GameStatus::Ended(reason) = state.status else {
        return None;
    };
    if let Some(summary) = &state.summary {
        return Some(summary.clone());
    }

    let entry = HighScore {
        time: state.elapsed_ms,
        score: state.score,
    };
    record(&mut state.high_scores, entry);
    if let Err(e) = store.save(&state.high_scores) {
        tracing::warn!("high scores not saved: {e}");
    }
    tracing::info!(
        reason = reason.message(),
        time_ms = entry.time,
        score = entry.score,
        "round finished"
    );

    let summary = RoundSummary {
        message: reason.message(),
        time_ms: entry.time,
        score: entry.score,
        high_scores: state.high_scores.clone(),
    };
    state.summary = Some(summary.clone());
    Some(summary)
}

/// `MM:SS.mmm`, as shown on the HUD and in the summary.
pub fn format_time(ms: u64) -> String {
    let minutes = ms / 60_000;
    let seconds = (ms % 60_000) / 1000;
    let millis = ms % 1000;
    format!("{minutes:02}:{seconds:02}.{millis:03}")
}
