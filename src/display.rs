//! Rendering layer: all terminal I/O lives here.
//!
//! Each function receives a mutable writer and an immutable view of the
//! game state.  No game logic is performed; this module only translates
//! world coordinates into cells and state into terminal commands.

use std::io::Write;

use crossterm::{
    cursor,
    style::{self, Attribute, Color, Print},
    terminal,
    QueueableCommand,
};
use survival_shooter::compute::format_time;
use survival_shooter::config::PLAYER_MAX_HEALTH;
use survival_shooter::entities::{Bullet, BulletOwner, GameState, Rgb, RoundSummary};
use survival_shooter::geometry::distance;

/// World units per terminal column / row.
pub const CELL_W: f32 = 8.0;
pub const CELL_H: f32 = 16.0;

/// Rows reserved outside the arena: HUD on top, controls hint at the bottom.
const RESERVED_ROWS: u16 = 2;
const BAR_WIDTH: usize = 20;

// ── Colour palette ────────────────────────────────────────────────────────────

const C_HUD: Color = Color::White;
const C_HEALTH: Color = Color::Green;
const C_TARGET: Color = Color::Rgb { r: 0xFF, g: 0xA5, b: 0x00 };
const C_PLAYER: Color = Color::White;
const C_PLAYER_HURT: Color = Color::DarkGrey;
const C_BULLET_PLAYER: Color = Color::White;
const C_BULLET_ENEMY: Color = Color::Rgb { r: 0xF1, g: 0xCA, b: 0x1D };
const C_HIGHLIGHT: Color = Color::Rgb { r: 0xF1, g: 0x49, b: 0x1D };
const C_HINT: Color = Color::DarkGrey;

fn rgb(c: Rgb) -> Color {
    Color::Rgb { r: c.0, g: c.1, b: c.2 }
}

/// World size covered by a terminal of `cols` × `rows` cells.
pub fn world_size(cols: u16, rows: u16) -> (f32, f32) {
    (
        cols as f32 * CELL_W,
        rows.saturating_sub(RESERVED_ROWS) as f32 * CELL_H,
    )
}

/// Cell holding world point `(x, y)`, if it lies inside the arena rows.
fn to_cell(x: f32, y: f32, cols: u16, rows: u16) -> Option<(u16, u16)> {
    let col = (x / CELL_W).floor();
    let row = (y / CELL_H).floor() + 1.0;
    let in_cols = col >= 0.0 && col < cols as f32;
    let in_rows = row >= 1.0 && row < rows.saturating_sub(1) as f32;
    (in_cols && in_rows).then_some((col as u16, row as u16))
}

// ── Public entry point ────────────────────────────────────────────────────────

/// Render one complete frame.
pub fn render<W: Write>(
    out: &mut W,
    state: &GameState,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(terminal::Clear(terminal::ClearType::All))?;

    for enemy in &state.enemies {
        draw_disc(out, enemy.x, enemy.y, enemy.radius, rgb(enemy.color), cols, rows)?;
    }
    for bullet in &state.bullets {
        draw_bullet(out, bullet, cols, rows)?;
    }

    let p = &state.player;
    let player_color = if p.invulnerable > 0 { C_PLAYER_HURT } else { C_PLAYER };
    draw_disc(out, p.x, p.y, p.radius, player_color, cols, rows)?;

    draw_hud(out, state, cols)?;
    draw_controls_hint(out, rows)?;

    if let Some(summary) = &state.summary {
        draw_summary(out, summary, cols, rows)?;
    }

    // Park cursor in a harmless spot and flush
    out.queue(style::ResetColor)?;
    out.queue(cursor::MoveTo(0, rows.saturating_sub(1)))?;
    out.flush()?;
    Ok(())
}

// ── Entities ──────────────────────────────────────────────────────────────────

/// Fill every cell whose centre lies inside the circle; a circle smaller
/// than a cell still shows as one block.
fn draw_disc<W: Write>(
    out: &mut W,
    x: f32,
    y: f32,
    radius: f32,
    color: Color,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    out.queue(style::SetForegroundColor(color))?;

    let first_col = ((x - radius) / CELL_W).floor() as i32;
    let last_col = ((x + radius) / CELL_W).floor() as i32;
    let first_row = ((y - radius) / CELL_H).floor() as i32;
    let last_row = ((y + radius) / CELL_H).floor() as i32;

    for r in first_row..=last_row {
        for c in first_col..=last_col {
            let centre = ((c as f32 + 0.5) * CELL_W, (r as f32 + 0.5) * CELL_H);
            if distance(centre, (x, y)) > radius {
                continue;
            }
            if let Some((col, row)) = to_cell(centre.0, centre.1, cols, rows) {
                out.queue(cursor::MoveTo(col, row))?;
                out.queue(Print("█"))?;
            }
        }
    }

    if let Some((col, row)) = to_cell(x, y, cols, rows) {
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(Print("█"))?;
    }
    Ok(())
}

fn draw_bullet<W: Write>(
    out: &mut W,
    bullet: &Bullet,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let Some((col, row)) = to_cell(bullet.x, bullet.y, cols, rows) else {
        return Ok(());
    };
    out.queue(cursor::MoveTo(col, row))?;
    match bullet.owner {
        BulletOwner::Player => {
            out.queue(style::SetForegroundColor(C_BULLET_PLAYER))?;
            out.queue(Print("•"))?;
        }
        BulletOwner::Enemy => {
            out.queue(style::SetForegroundColor(C_BULLET_ENEMY))?;
            out.queue(Print("*"))?;
        }
    }
    Ok(())
}

// ── HUD (row 0) ───────────────────────────────────────────────────────────────

fn bar(fraction: f32) -> String {
    let filled = ((fraction.clamp(0.0, 1.0)) * BAR_WIDTH as f32).round() as usize;
    format!("[{}{}]", "█".repeat(filled), "░".repeat(BAR_WIDTH - filled))
}

fn draw_hud<W: Write>(out: &mut W, state: &GameState, cols: u16) -> std::io::Result<()> {
    // Score and time — left
    out.queue(cursor::MoveTo(1, 0))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(format!(
        "Score: {:<6} Time: {}",
        state.score,
        format_time(state.elapsed_ms)
    )))?;

    // Last enemy hit — centre, only while it still has health
    if let Some(target) = state.last_hit.as_ref().filter(|t| t.health > 0.0) {
        let label = format!(
            "{} {}",
            target.kind.label(),
            bar(target.health / target.max_health)
        );
        let x = (cols / 2).saturating_sub(label.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(x, 0))?;
        out.queue(style::SetForegroundColor(C_TARGET))?;
        out.queue(Print(label))?;
    }

    // Player health — right
    let health = format!(
        "HP {}",
        bar(state.player.health as f32 / PLAYER_MAX_HEALTH as f32)
    );
    let x = cols.saturating_sub(health.chars().count() as u16 + 1);
    out.queue(cursor::MoveTo(x, 0))?;
    out.queue(style::SetForegroundColor(C_HEALTH))?;
    out.queue(Print(health))?;

    Ok(())
}

// ── Controls hint (last row) ──────────────────────────────────────────────────

fn draw_controls_hint<W: Write>(out: &mut W, rows: u16) -> std::io::Result<()> {
    out.queue(cursor::MoveTo(1, rows.saturating_sub(1)))?;
    out.queue(style::SetForegroundColor(C_HINT))?;
    out.queue(Print("← ↑ → ↓ / W A S D : Move   (firing is automatic)   Q : Quit"))?;
    Ok(())
}

// ── End-of-round summary ──────────────────────────────────────────────────────

fn draw_summary<W: Write>(
    out: &mut W,
    summary: &RoundSummary,
    cols: u16,
    rows: u16,
) -> std::io::Result<()> {
    let header = [
        format!("  {}  ", summary.message),
        format!("Your time:  {}", format_time(summary.time_ms)),
        format!("Your score: {}", summary.score),
        String::new(),
        "High Scores:".to_string(),
    ];
    // Leave room for the header, the hint and a margin
    let room = (rows as usize).saturating_sub(header.len() + 6).max(1);
    let cx = cols / 2;
    let total_rows = header.len() + room.min(summary.high_scores.len()) + 2;
    let mut row = (rows / 2).saturating_sub(total_rows as u16 / 2);

    for (i, line) in header.iter().enumerate() {
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        out.queue(style::SetForegroundColor(if i == 0 { C_HIGHLIGHT } else { C_HUD }))?;
        out.queue(Print(line))?;
        row += 1;
    }

    let mut highlighted = false;
    for (rank, entry) in summary.high_scores.iter().take(room).enumerate() {
        let line = format!(
            "{:>2}. Score: {:<6} - Time: {}",
            rank + 1,
            entry.score,
            format_time(entry.time)
        );
        let col = cx.saturating_sub(line.chars().count() as u16 / 2);
        out.queue(cursor::MoveTo(col, row))?;
        let current =
            !highlighted && entry.time == summary.time_ms && entry.score == summary.score;
        if current {
            highlighted = true;
            out.queue(style::SetAttribute(Attribute::Bold))?;
            out.queue(style::SetForegroundColor(C_HIGHLIGHT))?;
        } else {
            out.queue(style::SetForegroundColor(C_HUD))?;
        }
        out.queue(Print(&line))?;
        out.queue(style::SetAttribute(Attribute::Reset))?;
        row += 1;
    }

    let hint = "R - Play Again  Q - Quit";
    row += 1;
    let col = cx.saturating_sub(hint.chars().count() as u16 / 2);
    out.queue(cursor::MoveTo(col, row))?;
    out.queue(style::SetForegroundColor(C_HUD))?;
    out.queue(Print(hint))?;

    Ok(())
}
