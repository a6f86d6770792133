//! Per-frame simulation step
//!
//! Advances the session by one frame's elapsed time in a fixed order:
//! queued input, enemy AI, projectile physics, collision resolution against
//! post-motion positions, then pruning. The order never varies, so a replay
//! of the same inputs against the same seed produces the same session.

use glam::Vec3;
use rand::Rng;

use super::collision;
use super::state::{Difficulty, EnemyKind, GameEvent, GamePhase, Projectile, SessionState};
use crate::consts::*;

/// Input for a single tick (queued asynchronously, applied at the tick
/// boundary)
#[derive(Debug, Clone)]
pub struct TickInput {
    /// Player (camera) position in world space
    pub player_pos: Vec3,
    /// Aim direction for the fire command
    pub aim: Vec3,
    /// Fire command
    pub fire: bool,
}

impl Default for TickInput {
    fn default() -> Self {
        Self {
            player_pos: Vec3::new(0.0, 1.7, 5.0),
            aim: Vec3::NEG_Z,
            fire: false,
        }
    }
}

/// Advance the session by one tick of `dt` seconds
pub fn tick(state: &mut SessionState, input: &TickInput, dt: f32) {
    if state.phase != GamePhase::Playing {
        return;
    }
    state.time += dt;

    if input.fire {
        try_fire(state, input);
    }

    advance_enemies(state, input.player_pos);
    advance_projectiles(state, dt);

    let kills = collision::resolve(&mut state.projectiles, &mut state.enemies, &mut state.events);
    for _ in 0..kills {
        state.score_point(KILL_SCORE);
    }

    // Dead enemies and spent projectiles do not linger into the next tick
    state.enemies.retain(|e| e.is_alive());
    state.projectiles.retain(|p| p.active);
}

/// Fire an arrow if the rate limiter allows it. The ammo decrement happens
/// before the launch; a shot that empties the quiver with targets left ends
/// the run and nothing is launched.
fn try_fire(state: &mut SessionState, input: &TickInput) {
    if state.time - state.last_fire < FIRE_COOLDOWN {
        return;
    }
    state.last_fire = state.time;
    state.decrement_ammo();
    if state.phase != GamePhase::Playing {
        return;
    }

    let aim = input.aim.normalize_or_zero();
    let id = state.next_entity_id();
    state.projectiles.push(Projectile::new(
        id,
        input.player_pos + aim * PROJECTILE_MUZZLE_OFFSET,
        aim * PROJECTILE_SPEED,
        state.selected_weapon,
    ));
}

/// Move every enemy per its behavior variant and roll its attack.
///
/// Movement is a pure function of (spawn anchor, speed, phase offset, sim
/// time); the attack is a probabilistic retry gated by range and a per-enemy
/// cooldown.
fn advance_enemies(state: &mut SessionState, player_pos: Vec3) {
    let time = state.time;
    let difficulty = state.difficulty;

    let mut landed_attacks = 0;
    for enemy in state.enemies.iter_mut() {
        match enemy.kind {
            EnemyKind::Patrol => {
                enemy.pos.x = enemy.spawn_pos.x
                    + (time * enemy.speed + enemy.phase_offset).sin() * PATROL_AMPLITUDE;
            }
            EnemyKind::Jumper => {
                enemy.pos.y = enemy.spawn_pos.y
                    + (time * enemy.speed * 2.0 + enemy.phase_offset).sin().abs() * JUMP_AMPLITUDE;
            }
            // Chasers sit still on easy
            EnemyKind::Chase if difficulty != Difficulty::Easy => {
                if enemy.pos.z < CHASE_HOLD_Z {
                    enemy.pos.z += CHASE_STEP * enemy.speed;
                    enemy.pos.x = enemy.spawn_pos.x + (time * 2.0).sin() * CHASE_WIGGLE;
                }
            }
            EnemyKind::Chase => {}
        }

        if enemy.pos.distance(player_pos) < ENEMY_ATTACK_RANGE
            && time - enemy.last_attack > ENEMY_ATTACK_COOLDOWN
            && state.rng.random_bool(ENEMY_ATTACK_CHANCE)
        {
            enemy.last_attack = time;
            landed_attacks += 1;
        }
    }

    for _ in 0..landed_attacks {
        state.take_damage(ENEMY_ATTACK_DAMAGE);
    }
}

/// Integrate active projectiles: ballistic arc with reduced gravity, spent
/// on floor contact.
fn advance_projectiles(state: &mut SessionState, dt: f32) {
    for projectile in state.projectiles.iter_mut().filter(|p| p.active) {
        projectile.pos += projectile.vel * dt;
        projectile.vel.y -= PROJECTILE_GRAVITY * dt;

        if collision::projectile_hits_floor(projectile.pos) {
            projectile.active = false;
            state.events.push(GameEvent::ProjectileMissed {
                pos: projectile.pos,
            });
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::{Enemy, WeaponType};

    const DT: f32 = 1.0 / 60.0;

    fn started(difficulty: Difficulty) -> SessionState {
        let mut session = SessionState::new(7);
        session.set_difficulty(difficulty);
        session.start();
        session
    }

    /// Session with exactly one hand-placed enemy, far from the player so
    /// attack rolls never interfere
    fn with_single_enemy(kind: EnemyKind, pos: Vec3, speed: f32) -> SessionState {
        let mut session = started(Difficulty::Medium);
        let id = session.next_entity_id();
        session.enemies = vec![Enemy::new(id, kind, pos, speed, 0.0)];
        session
    }

    fn idle() -> TickInput {
        TickInput::default()
    }

    fn firing() -> TickInput {
        TickInput {
            fire: true,
            ..Default::default()
        }
    }

    #[test]
    fn tick_is_inert_outside_playing() {
        let mut session = SessionState::new(7);
        tick(&mut session, &firing(), DT);
        assert_eq!(session.time, 0.0);
        assert!(session.projectiles.is_empty());
        assert_eq!(session.phase, GamePhase::Menu);
    }

    #[test]
    fn fire_spawns_projectile_and_spends_ammo() {
        let mut session = started(Difficulty::Easy);
        session.enemies.clear();
        let ammo_before = session.ammo;

        tick(&mut session, &firing(), DT);

        assert_eq!(session.ammo, ammo_before - 1);
        assert_eq!(session.projectiles.len(), 1);
        let arrow = &session.projectiles[0];
        assert_eq!(arrow.weapon, WeaponType::Standard);
        // Launched one unit in front of the player, along the aim
        let aim = Vec3::NEG_Z;
        assert!((arrow.vel - aim * PROJECTILE_SPEED).length() < 1e-4);
    }

    #[test]
    fn fire_rate_is_limited() {
        let mut session = started(Difficulty::Easy);
        session.enemies.clear();

        tick(&mut session, &firing(), DT);
        tick(&mut session, &firing(), DT);
        assert_eq!(session.projectiles.len(), 1, "second shot inside cooldown");

        // After the cooldown elapses the next shot goes out
        tick(&mut session, &firing(), FIRE_COOLDOWN);
        assert_eq!(session.projectiles.len(), 2);
    }

    #[test]
    fn patrol_sways_around_its_anchor() {
        let anchor = Vec3::new(2.0, 1.5, -20.0);
        let mut session = with_single_enemy(EnemyKind::Patrol, anchor, 1.5);

        tick(&mut session, &idle(), 0.25);

        let expected_x = anchor.x + (0.25f32 * 1.5).sin() * PATROL_AMPLITUDE;
        let enemy = &session.enemies[0];
        assert!((enemy.pos.x - expected_x).abs() < 1e-5);
        assert_eq!(enemy.pos.y, anchor.y);
        assert_eq!(enemy.pos.z, anchor.z);
    }

    #[test]
    fn jumper_bounces_above_its_anchor() {
        let anchor = Vec3::new(0.0, 1.5, -20.0);
        let mut session = with_single_enemy(EnemyKind::Jumper, anchor, 2.0);

        tick(&mut session, &idle(), 0.25);

        let expected_y = anchor.y + (0.25f32 * 2.0 * 2.0).sin().abs() * JUMP_AMPLITUDE;
        let enemy = &session.enemies[0];
        assert!((enemy.pos.y - expected_y).abs() < 1e-5);
        assert!(enemy.pos.y >= anchor.y);
    }

    #[test]
    fn chase_advances_and_wiggles() {
        let anchor = Vec3::new(1.0, 1.5, -20.0);
        let mut session = with_single_enemy(EnemyKind::Chase, anchor, 2.0);

        tick(&mut session, &idle(), 0.25);

        let enemy = &session.enemies[0];
        assert!((enemy.pos.z - (anchor.z + CHASE_STEP * 2.0)).abs() < 1e-5);
        let expected_x = anchor.x + (0.25f32 * 2.0).sin() * CHASE_WIGGLE;
        assert!((enemy.pos.x - expected_x).abs() < 1e-5);
    }

    #[test]
    fn chase_holds_at_close_range() {
        let near = Vec3::new(0.0, 1.5, CHASE_HOLD_Z);
        let mut session = with_single_enemy(EnemyKind::Chase, near, 3.0);

        for _ in 0..10 {
            tick(&mut session, &idle(), DT);
        }

        assert_eq!(session.enemies[0].pos.z, CHASE_HOLD_Z);
    }

    #[test]
    fn chase_is_inert_on_easy() {
        let anchor = Vec3::new(0.0, 1.5, -20.0);
        let mut session = started(Difficulty::Easy);
        let id = session.next_entity_id();
        session.enemies = vec![Enemy::new(id, EnemyKind::Chase, anchor, 2.0, 0.0)];

        for _ in 0..10 {
            tick(&mut session, &idle(), DT);
        }

        assert_eq!(session.enemies[0].pos, anchor);
    }

    #[test]
    fn projectile_follows_a_ballistic_arc() {
        let mut session = started(Difficulty::Easy);
        session.enemies.clear();
        let id = session.next_entity_id();
        session.projectiles = vec![Projectile::new(
            id,
            Vec3::new(0.0, 1.7, 4.0),
            Vec3::new(0.0, 0.0, -50.0),
            WeaponType::Standard,
        )];

        tick(&mut session, &idle(), 0.1);

        let arrow = &session.projectiles[0];
        assert!((arrow.pos.z - (4.0 - 5.0)).abs() < 1e-4);
        assert!((arrow.vel.y - (-PROJECTILE_GRAVITY * 0.1)).abs() < 1e-4);
    }

    #[test]
    fn floor_contact_spends_the_projectile_with_a_miss() {
        let mut session = started(Difficulty::Easy);
        session.enemies.clear();
        session.take_events();
        let id = session.next_entity_id();
        session.projectiles = vec![Projectile::new(
            id,
            Vec3::new(0.0, -1.5, -5.0),
            Vec3::new(0.0, -10.0, 0.0),
            WeaponType::Standard,
        )];

        tick(&mut session, &idle(), 0.1);

        assert!(session.projectiles.is_empty(), "spent arrow is pruned");
        assert!(
            session
                .take_events()
                .iter()
                .any(|e| matches!(e, GameEvent::ProjectileMissed { .. }))
        );
    }

    #[test]
    fn kill_awards_score_and_prunes() {
        let pos = Vec3::new(0.0, 1.5, -20.0);
        let mut session = with_single_enemy(EnemyKind::Patrol, pos, 0.0);
        session.enemies[0].health = 50;
        session.targets_remaining = 5;
        let id = session.next_entity_id();
        // Parked on top of the enemy; zero velocity so motion keeps contact
        session.projectiles = vec![Projectile::new(id, pos, Vec3::ZERO, WeaponType::Standard)];

        tick(&mut session, &idle(), DT);

        assert_eq!(session.score, KILL_SCORE);
        assert_eq!(session.targets_remaining, 4);
        assert!(session.enemies.is_empty());
        assert!(session.projectiles.is_empty());
        assert_eq!(session.phase, GamePhase::Playing);
    }

    #[test]
    fn last_kill_completes_the_level() {
        let pos = Vec3::new(0.0, 1.5, -20.0);
        let mut session = with_single_enemy(EnemyKind::Patrol, pos, 0.0);
        session.enemies[0].health = 50;
        session.targets_remaining = 1;
        let id = session.next_entity_id();
        session.projectiles = vec![Projectile::new(id, pos, Vec3::ZERO, WeaponType::Standard)];

        tick(&mut session, &idle(), DT);

        assert_eq!(session.phase, GamePhase::LevelComplete);
        assert_eq!(session.score, KILL_SCORE);
        assert!(session.enemies.is_empty());
    }

    #[test]
    fn empty_quiver_shot_with_targets_left_ends_the_run() {
        let mut session = started(Difficulty::Easy);
        session.enemies.clear();
        session.ammo = 0;
        session.targets_remaining = 3;

        tick(&mut session, &firing(), DT);

        assert_eq!(session.ammo, -1);
        assert_eq!(session.phase, GamePhase::GameOver);
        assert!(session.projectiles.is_empty(), "no arrow past the last shot");
    }

    #[test]
    fn nearby_enemy_eventually_attacks_but_respects_cooldown() {
        // Adjacent chaser already at its hold point; movement is a no-op
        let player = TickInput::default().player_pos;
        let pos = Vec3::new(player.x, 1.5, player.z - 4.0);
        let mut session = with_single_enemy(EnemyKind::Chase, Vec3::new(0.0, 1.5, CHASE_HOLD_Z), 1.0);
        session.enemies[0].pos = pos;
        session.enemies[0].spawn_pos = pos;

        // 20 sim-seconds; attacks gated to > 3 s apart leave at most 6 windows
        for _ in 0..200 {
            tick(&mut session, &idle(), 0.1);
            if session.phase != GamePhase::Playing {
                break;
            }
        }

        assert!(session.health < 100, "an attack should have landed");
        assert!(session.health >= 100 - 6 * ENEMY_ATTACK_DAMAGE);
    }

    #[test]
    fn distant_enemy_never_attacks() {
        let mut session = with_single_enemy(
            EnemyKind::Patrol,
            Vec3::new(0.0, 1.5, -40.0),
            1.0,
        );

        for _ in 0..200 {
            tick(&mut session, &idle(), 0.1);
        }

        assert_eq!(session.health, 100);
    }

    #[test]
    fn same_seed_same_inputs_replays_identically() {
        let mut a = SessionState::new(99999);
        let mut b = SessionState::new(99999);
        for session in [&mut a, &mut b] {
            session.set_difficulty(Difficulty::Hard);
            session.start();
        }

        let inputs = [firing(), idle(), firing(), idle(), idle(), firing()];
        for input in &inputs {
            tick(&mut a, input, DT);
            tick(&mut b, input, DT);
        }

        assert_eq!(a.time, b.time);
        assert_eq!(a.ammo, b.ammo);
        assert_eq!(a.score, b.score);
        assert_eq!(a.enemies.len(), b.enemies.len());
        for (ea, eb) in a.enemies.iter().zip(b.enemies.iter()) {
            assert_eq!(ea.pos, eb.pos);
            assert_eq!(ea.health, eb.health);
        }
        assert_eq!(a.projectiles.len(), b.projectiles.len());
    }
}
