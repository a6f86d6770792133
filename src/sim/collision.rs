//! Collision detection and damage resolution
//!
//! Proximity thresholds stand in for a swept-collision system: projectile
//! speed against the tick rate keeps tunneling improbable. A higher-fidelity
//! implementation can swap in continuous collision here without changing the
//! event contract (hit -> damage -> possible kill).

use glam::Vec3;

use super::state::{Enemy, GameEvent, Projectile};
use crate::consts::*;

/// True when a projectile registers a hit on an enemy
pub fn projectile_hits_enemy(projectile_pos: Vec3, enemy_pos: Vec3) -> bool {
    projectile_pos.distance(enemy_pos) < HIT_RADIUS
}

/// True once a projectile has reached the floor plane
pub fn projectile_hits_floor(pos: Vec3) -> bool {
    pos.y <= FLOOR_HEIGHT
}

/// Resolve one tick's projectile/enemy collisions against post-motion
/// positions.
///
/// A projectile lands at most one hit and never penetrates: the first enemy
/// in iteration order wins when several are in range. Damaged enemies stay in
/// the list (the caller prunes after the pass); returns the number of kills
/// so the caller can award score.
pub(super) fn resolve(
    projectiles: &mut [Projectile],
    enemies: &mut [Enemy],
    events: &mut Vec<GameEvent>,
) -> u32 {
    let mut kills = 0;
    for projectile in projectiles.iter_mut().filter(|p| p.active) {
        for enemy in enemies.iter_mut().filter(|e| e.is_alive()) {
            if !projectile_hits_enemy(projectile.pos, enemy.pos) {
                continue;
            }
            projectile.active = false;
            enemy.health = (enemy.health - HIT_DAMAGE).max(0);
            events.push(GameEvent::EnemyHit {
                enemy_id: enemy.id,
                health_left: enemy.health,
            });
            if enemy.health == 0 {
                log::debug!("enemy {} destroyed", enemy.id);
                events.push(GameEvent::EnemyKilled { enemy_id: enemy.id });
                kills += 1;
            }
            break;
        }
    }
    kills
}
