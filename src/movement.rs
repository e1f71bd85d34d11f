//! Per-tick motion and the three hit tests.

use crate::config::{BULLET_DAMPING, BULLET_RADIUS};
use crate::entities::{Bullet, BulletOwner, Enemy, InputState, Player};
use crate::geometry::{circles_overlap, distance, unit_toward, Point};

/// Step the player one `speed` per held axis and keep the whole circle on screen.
pub fn move_player(player: &mut Player, input: &InputState, width: f32, height: f32) {
    if input.left {
        player.x -= player.speed;
    }
    if input.right {
        player.x += player.speed;
    }
    if input.up {
        player.y -= player.speed;
    }
    if input.down {
        player.y += player.speed;
    }

    // max/min rather than clamp: a viewport narrower than the player must not panic
    player.x = player.x.min(width - player.radius).max(player.radius);
    player.y = player.y.min(height - player.radius).max(player.radius);
}

/// Advance bullets by damped velocity and drop the ones whose centre left the
/// viewport.
pub fn move_bullets(bullets: &mut Vec<Bullet>, width: f32, height: f32) {
    bullets.retain_mut(|b| {
        b.x += b.dx * BULLET_DAMPING;
        b.y += b.dy * BULLET_DAMPING;
        b.x >= 0.0 && b.x <= width && b.y >= 0.0 && b.y <= height
    });
}

/// Walk every enemy toward `target`.
///
/// A step is skipped entirely when the new position would overlap another
/// enemy. Overlap is checked against positions from before this pass, so the
/// result does not depend on iteration order.
pub fn move_enemies(enemies: &mut [Enemy], target: Point) {
    let before: Vec<(Point, f32)> = enemies.iter().map(|e| ((e.x, e.y), e.radius)).collect();

    for (i, enemy) in enemies.iter_mut().enumerate() {
        let Some((ux, uy)) = unit_toward((enemy.x, enemy.y), target) else {
            continue;
        };
        let next = (enemy.x + ux * enemy.speed, enemy.y + uy * enemy.speed);

        let blocked = before
            .iter()
            .enumerate()
            .any(|(j, (pos, radius))| j != i && circles_overlap(next, enemy.radius, *pos, *radius));
        if !blocked {
            enemy.x = next.0;
            enemy.y = next.1;
        }
    }
}

/// Player bullet connecting with an enemy.
pub fn bullet_hits_enemy(bullet: &Bullet, enemy: &Enemy) -> bool {
    bullet.owner == BulletOwner::Player
        && distance((bullet.x, bullet.y), (enemy.x, enemy.y)) < enemy.radius + BULLET_RADIUS
}

/// Enemy bullet connecting with a vulnerable player.
pub fn bullet_hits_player(bullet: &Bullet, player: &Player) -> bool {
    bullet.owner == BulletOwner::Enemy
        && player.invulnerable == 0
        && distance((bullet.x, bullet.y), (player.x, player.y)) < player.radius + BULLET_RADIUS
}

/// Body contact between a vulnerable player and an enemy.
pub fn enemy_touches_player(enemy: &Enemy, player: &Player) -> bool {
    player.invulnerable == 0
        && circles_overlap((player.x, player.y), player.radius, (enemy.x, enemy.y), enemy.radius)
}
