//! Neon Archer entry point
//!
//! Headless demo driver: runs one autoplayed session against the simulation
//! core and logs what happens. The real presentation layer (renderer, menus,
//! HUD) lives outside this crate and drives the same command surface.

use std::sync::Arc;
use std::time::Duration;

use glam::Vec3;

use neon_archer::consts::FIRE_COOLDOWN;
use neon_archer::lore::{LoreFetcher, NoLoreSource, fallback_briefing};
use neon_archer::sim::{Difficulty, GameEvent, GamePhase, SessionState, TickInput, tick};
use neon_archer::theme_for_level;

/// Demo runs at a fixed 60 Hz
const DEMO_DT: f32 = 1.0 / 60.0;
/// Hard cap so a stalemate session still terminates
const MAX_FRAMES: u32 = 60 * 120;

fn main() {
    env_logger::init();

    let seed = std::env::args()
        .nth(1)
        .and_then(|arg| arg.parse().ok())
        .unwrap_or(0xA7C4E2);
    let difficulty = std::env::args()
        .nth(2)
        .and_then(|arg| Difficulty::from_str(&arg))
        .unwrap_or(Difficulty::Medium);
    log::info!("Neon Archer headless demo, seed {seed}, {difficulty:?}");

    let mut session = SessionState::new(seed);
    session.set_difficulty(difficulty);

    // Briefing fetch runs detached; the sim never waits on it
    let mut lore = LoreFetcher::new();
    lore.request(
        Arc::new(NoLoreSource),
        session.stats.current_level,
        session.difficulty,
        session.last_unlocked_weapon(),
    );
    let briefing = wait_for_briefing(&mut lore)
        .unwrap_or_else(|| fallback_briefing(session.stats.current_level, session.difficulty));
    log::info!("briefing: {briefing}");

    let theme = theme_for_level(session.stats.current_level);
    log::info!("environment: {} ({})", theme.name, theme.floor_color);

    session.start();
    drain_events(&mut session);
    if let Ok(json) = serde_json::to_string(&session.snapshot()) {
        log::debug!("first frame snapshot: {json}");
    }

    let player_pos = TickInput::default().player_pos;
    let mut cooldown = 0.0f32;
    let mut frames = 0;
    while session.phase == GamePhase::Playing && frames < MAX_FRAMES {
        let aim = nearest_enemy_aim(&session, player_pos);
        let fire = aim.is_some() && cooldown <= 0.0;
        if fire {
            cooldown = FIRE_COOLDOWN;
        }
        let input = TickInput {
            player_pos,
            aim: aim.unwrap_or(Vec3::NEG_Z),
            fire,
        };

        tick(&mut session, &input, DEMO_DT);
        drain_events(&mut session);

        cooldown -= DEMO_DT;
        frames += 1;
    }

    match session.phase {
        GamePhase::LevelComplete => {
            session.complete_level();
            drain_events(&mut session);
        }
        GamePhase::GameOver => {
            session.reset();
            drain_events(&mut session);
        }
        _ => log::warn!("demo hit the frame cap while still playing"),
    }

    log::info!(
        "demo finished: score {}, coins {}, next level {}, arsenal {:?}",
        session.score,
        session.stats.coins,
        session.stats.current_level,
        session.stats.unlocked_weapons
    );
}

/// Aim from the player to the nearest live enemy
fn nearest_enemy_aim(session: &SessionState, player_pos: Vec3) -> Option<Vec3> {
    session
        .enemies
        .iter()
        .min_by(|a, b| {
            a.pos
                .distance(player_pos)
                .partial_cmp(&b.pos.distance(player_pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        })
        .map(|enemy| (enemy.pos - player_pos).normalize_or_zero())
}

/// Give the detached briefing a short grace window, then move on
fn wait_for_briefing(lore: &mut LoreFetcher) -> Option<String> {
    for _ in 0..50 {
        if let Some(text) = lore.poll() {
            return Some(text);
        }
        std::thread::sleep(Duration::from_millis(2));
    }
    None
}

fn drain_events(session: &mut SessionState) {
    for event in session.take_events() {
        match event {
            GameEvent::PhaseChanged(phase) => log::info!("phase -> {phase:?}"),
            GameEvent::EnemyKilled { enemy_id } => log::info!("enemy {enemy_id} down"),
            GameEvent::PlayerDamaged {
                damage,
                health_left,
            } => log::info!("took {damage} damage, {health_left} health left"),
            GameEvent::WeaponUnlocked(weapon) => {
                log::info!("unlocked {} arrows", weapon.as_str())
            }
            GameEvent::LevelCleared {
                coins_awarded,
                next_level,
            } => log::info!("level cleared: +{coins_awarded} coins, next level {next_level}"),
            GameEvent::EnemyHit { .. } | GameEvent::ProjectileMissed { .. } => {
                log::debug!("{event:?}")
            }
        }
    }
}
