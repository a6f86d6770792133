//! Spawn director
//!
//! Formula-driven budgets for (difficulty, level), plus seeded enemy
//! generation. All randomness flows through the injected RNG so a fixed seed
//! reproduces an identical wave.

use glam::Vec3;
use rand::Rng;

use super::state::{Difficulty, Enemy, EnemyKind};
use crate::consts::*;

/// Arrows granted for a session at this difficulty
pub fn ammo_budget(difficulty: Difficulty) -> i32 {
    match difficulty {
        Difficulty::Easy => 20,
        Difficulty::Medium => 15,
        Difficulty::Hard => 10,
    }
}

/// Targets that must go down to clear the level
pub fn target_budget(difficulty: Difficulty, level: u32) -> u32 {
    let base = 3 + level;
    match difficulty {
        Difficulty::Easy => base,
        Difficulty::Medium => base + 2,
        Difficulty::Hard => base + 4,
    }
}

/// Enemies seeded into the arena at phase entry
pub fn enemy_budget(difficulty: Difficulty, level: u32) -> u32 {
    3 + level + if difficulty == Difficulty::Hard { 3 } else { 0 }
}

/// Populate a fresh wave of enemies for (difficulty, level).
///
/// Positions land in a bounded band in front of the player; speed scales
/// with difficulty; the behavior tag comes from nested threshold draws
/// (roughly 30% jumper, 42% chase, 28% patrol). Each enemy also draws its
/// fixed phase offset here, once, so replays are stable per entity.
pub fn spawn_enemies(
    difficulty: Difficulty,
    level: u32,
    rng: &mut impl Rng,
    next_id: &mut u32,
) -> Vec<Enemy> {
    let count = enemy_budget(difficulty, level);
    let speed_spread = if difficulty == Difficulty::Hard { 3.0 } else { 1.0 };

    let mut enemies = Vec::with_capacity(count as usize);
    for _ in 0..count {
        let id = *next_id;
        *next_id += 1;

        let pos = Vec3::new(
            (rng.random::<f32>() - 0.5) * (SPAWN_HALF_WIDTH * 2.0),
            SPAWN_HEIGHT,
            SPAWN_NEAR_Z - rng.random::<f32>() * SPAWN_DEPTH,
        );
        let speed = 1.0 + rng.random::<f32>() * speed_spread;
        let kind = if rng.random::<f32>() > 0.7 {
            EnemyKind::Jumper
        } else if rng.random::<f32>() > 0.4 {
            EnemyKind::Chase
        } else {
            EnemyKind::Patrol
        };
        let phase_offset = rng.random::<f32>() * 100.0;

        enemies.push(Enemy::new(id, kind, pos, speed, phase_offset));
    }

    log::debug!(
        "spawned {} enemies for level {} ({:?})",
        enemies.len(),
        level,
        difficulty
    );
    enemies
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn ammo_budget_by_difficulty() {
        assert_eq!(ammo_budget(Difficulty::Easy), 20);
        assert_eq!(ammo_budget(Difficulty::Medium), 15);
        assert_eq!(ammo_budget(Difficulty::Hard), 10);
    }

    #[test]
    fn target_budget_formula() {
        assert_eq!(target_budget(Difficulty::Easy, 1), 4);
        assert_eq!(target_budget(Difficulty::Medium, 1), 6);
        assert_eq!(target_budget(Difficulty::Hard, 1), 8);
        assert_eq!(target_budget(Difficulty::Easy, 5), 8);
        assert_eq!(target_budget(Difficulty::Hard, 5), 12);
    }

    #[test]
    fn enemy_budget_formula() {
        assert_eq!(enemy_budget(Difficulty::Easy, 1), 4);
        assert_eq!(enemy_budget(Difficulty::Medium, 1), 4);
        assert_eq!(enemy_budget(Difficulty::Hard, 1), 7);
        assert_eq!(enemy_budget(Difficulty::Medium, 3), 6);
    }

    #[test]
    fn spawn_is_deterministic_for_a_seed() {
        let mut rng_a = Pcg32::seed_from_u64(42);
        let mut rng_b = Pcg32::seed_from_u64(42);
        let mut id_a = 1;
        let mut id_b = 1;

        let wave_a = spawn_enemies(Difficulty::Hard, 2, &mut rng_a, &mut id_a);
        let wave_b = spawn_enemies(Difficulty::Hard, 2, &mut rng_b, &mut id_b);

        assert_eq!(wave_a.len(), wave_b.len());
        for (a, b) in wave_a.iter().zip(wave_b.iter()) {
            assert_eq!(a.id, b.id);
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.pos, b.pos);
            assert_eq!(a.speed, b.speed);
            assert_eq!(a.phase_offset, b.phase_offset);
        }
    }

    #[test]
    fn enemies_spawn_inside_the_arena_band() {
        let mut rng = Pcg32::seed_from_u64(1234);
        let mut next_id = 1;
        for level in 1..=20 {
            for difficulty in [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard] {
                let spread = if difficulty == Difficulty::Hard { 3.0 } else { 1.0 };
                for enemy in spawn_enemies(difficulty, level, &mut rng, &mut next_id) {
                    assert!(enemy.pos.x >= -SPAWN_HALF_WIDTH && enemy.pos.x <= SPAWN_HALF_WIDTH);
                    assert_eq!(enemy.pos.y, SPAWN_HEIGHT);
                    assert!(enemy.pos.z <= SPAWN_NEAR_Z);
                    assert!(enemy.pos.z >= SPAWN_NEAR_Z - SPAWN_DEPTH);
                    assert!(enemy.speed >= 1.0 && enemy.speed <= 1.0 + spread);
                    assert!(enemy.phase_offset >= 0.0 && enemy.phase_offset < 100.0);
                    assert_eq!(enemy.health, ENEMY_MAX_HEALTH);
                    assert_eq!(enemy.max_health, ENEMY_MAX_HEALTH);
                }
            }
        }
    }

    #[test]
    fn all_behavior_variants_show_up() {
        let mut rng = Pcg32::seed_from_u64(99);
        let mut next_id = 1;
        let wave = spawn_enemies(Difficulty::Hard, 40, &mut rng, &mut next_id);

        assert!(wave.iter().any(|e| e.kind == EnemyKind::Patrol));
        assert!(wave.iter().any(|e| e.kind == EnemyKind::Jumper));
        assert!(wave.iter().any(|e| e.kind == EnemyKind::Chase));
    }

    #[test]
    fn spawn_ids_are_unique_and_sequential() {
        let mut rng = Pcg32::seed_from_u64(5);
        let mut next_id = 10;
        let wave = spawn_enemies(Difficulty::Easy, 1, &mut rng, &mut next_id);
        let ids: Vec<u32> = wave.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![10, 11, 12, 13]);
        assert_eq!(next_id, 14);
    }
}
