//! Session state and core simulation types
//!
//! All state that drives the simulation lives here. The session is the single
//! source of truth; presentation reads it through [`Snapshot`] and mutates it
//! only through the named commands below.

use glam::Vec3;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::spawn;
use crate::consts::*;

/// Current phase of gameplay
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Title/loadout screen, waiting for a start command
    Menu,
    /// Active gameplay
    Playing,
    /// Run ended: player died or ran out of arrows
    GameOver,
    /// All targets down, waiting for the continue command
    LevelComplete,
}

/// Difficulty tier, selected from the menu
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "EASY",
            Difficulty::Medium => "MEDIUM",
            Difficulty::Hard => "HARD",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" => Some(Difficulty::Easy),
            "medium" | "med" => Some(Difficulty::Medium),
            "hard" => Some(Difficulty::Hard),
            _ => None,
        }
    }

    /// Coin reward for clearing a level at this tier
    pub fn coin_reward(&self) -> u32 {
        match self {
            Difficulty::Easy => 50,
            Difficulty::Medium => 100,
            Difficulty::Hard => 200,
        }
    }
}

/// Arrow loadout. Purely cosmetic: every weapon deals identical damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WeaponType {
    #[default]
    Standard,
    Fire,
    Ice,
    Electric,
}

impl WeaponType {
    pub fn as_str(&self) -> &'static str {
        match self {
            WeaponType::Standard => "Standard",
            WeaponType::Fire => "Fire",
            WeaponType::Ice => "Ice",
            WeaponType::Electric => "Electric",
        }
    }

    /// Tracer color hint for the renderer
    pub fn tracer_color(&self) -> &'static str {
        match self {
            WeaponType::Standard => "white",
            WeaponType::Fire => "orange",
            WeaponType::Ice => "cyan",
            WeaponType::Electric => "yellow",
        }
    }
}

/// Enemy behavior variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EnemyKind {
    /// Sways side to side around its spawn point
    Patrol,
    /// Bounces in place
    Jumper,
    /// Advances toward the player, holds at close range
    Chase,
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub kind: EnemyKind,
    pub pos: Vec3,
    /// Anchor for the sway/bounce formulas; never mutated after spawn
    pub spawn_pos: Vec3,
    pub speed: f32,
    /// Fixed random phase offset, drawn once at spawn and stable for the
    /// enemy's lifetime
    pub phase_offset: f32,
    pub health: i32,
    pub max_health: i32,
    /// Sim-time of this enemy's last landed attack
    pub last_attack: f32,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec3, speed: f32, phase_offset: f32) -> Self {
        Self {
            id,
            kind,
            pos,
            spawn_pos: pos,
            speed,
            phase_offset,
            health: ENEMY_MAX_HEALTH,
            max_health: ENEMY_MAX_HEALTH,
            last_attack: 0.0,
        }
    }

    pub fn is_alive(&self) -> bool {
        self.health > 0
    }

    /// Remaining health in [0, 1], for the overhead bar
    pub fn health_fraction(&self) -> f32 {
        (self.health.max(0) as f32) / (self.max_health as f32)
    }
}

/// A projectile entity (an arrow in flight)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Projectile {
    pub id: u32,
    pub pos: Vec3,
    pub vel: Vec3,
    pub weapon: WeaponType,
    /// Once false the projectile is inert and pruned at the end of the tick
    pub active: bool,
}

impl Projectile {
    pub fn new(id: u32, pos: Vec3, vel: Vec3, weapon: WeaponType) -> Self {
        Self {
            id,
            pos,
            vel,
            weapon,
            active: true,
        }
    }

    /// Unit facing vector for the renderer (arrows point along velocity)
    pub fn facing(&self) -> Vec3 {
        self.vel.normalize_or_zero()
    }
}

/// Per-run progression. Survives phase transitions; lost on process exit.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    pub coins: u32,
    pub unlocked_weapons: Vec<WeaponType>,
    pub current_level: u32,
}

impl Default for PlayerStats {
    fn default() -> Self {
        Self {
            coins: 0,
            unlocked_weapons: vec![WeaponType::Standard],
            current_level: 1,
        }
    }
}

impl PlayerStats {
    pub fn has_weapon(&self, weapon: WeaponType) -> bool {
        self.unlocked_weapons.contains(&weapon)
    }

    /// Add a weapon to the loadout. Returns false if it was already unlocked.
    pub fn unlock(&mut self, weapon: WeaponType) -> bool {
        if self.has_weapon(weapon) {
            return false;
        }
        self.unlocked_weapons.push(weapon);
        true
    }
}

/// Events emitted by the simulation, drained once per frame by presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    PhaseChanged(GamePhase),
    EnemyHit { enemy_id: u32, health_left: i32 },
    EnemyKilled { enemy_id: u32 },
    PlayerDamaged { damage: i32, health_left: i32 },
    ProjectileMissed { pos: Vec3 },
    WeaponUnlocked(WeaponType),
    LevelCleared { coins_awarded: u32, next_level: u32 },
}

/// Complete session state
///
/// Entity collections belong to the active play session: they are populated
/// on entering [`GamePhase::Playing`] and discarded wholesale when it ends.
#[derive(Debug, Clone)]
pub struct SessionState {
    /// Run seed for reproducibility
    pub seed: u64,
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub selected_weapon: WeaponType,
    /// Player health, clamped to [0, MAX_HEALTH]
    pub health: i32,
    /// Monotonically non-decreasing within a session
    pub score: u64,
    /// May go to exactly -1: the last shot is allowed to fire on empty
    pub ammo: i32,
    pub targets_remaining: u32,
    pub stats: PlayerStats,
    /// Sim clock, seconds since session start
    pub time: f32,
    pub(super) last_fire: f32,
    pub enemies: Vec<Enemy>,
    pub projectiles: Vec<Projectile>,
    pub(super) events: Vec<GameEvent>,
    pub(super) rng: Pcg32,
    next_id: u32,
}

impl SessionState {
    /// Create a fresh session in the menu phase with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            phase: GamePhase::Menu,
            difficulty: Difficulty::Easy,
            selected_weapon: WeaponType::Standard,
            health: MAX_HEALTH,
            score: 0,
            ammo: 0,
            targets_remaining: 0,
            stats: PlayerStats::default(),
            time: 0.0,
            last_fire: -FIRE_COOLDOWN,
            enemies: Vec::new(),
            projectiles: Vec::new(),
            events: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            next_id: 1,
        }
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn set_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
    }

    pub fn set_weapon(&mut self, weapon: WeaponType) {
        self.selected_weapon = weapon;
    }

    /// Menu -> Playing. Resets session scalars, computes the ammo/target
    /// budgets, and seeds the entity model for (difficulty, level).
    pub fn start(&mut self) {
        if self.phase != GamePhase::Menu {
            return;
        }
        self.score = 0;
        self.health = MAX_HEALTH;
        self.ammo = spawn::ammo_budget(self.difficulty);
        self.targets_remaining = spawn::target_budget(self.difficulty, self.stats.current_level);
        self.time = 0.0;
        self.last_fire = -FIRE_COOLDOWN;
        self.projectiles.clear();
        self.enemies = spawn::spawn_enemies(
            self.difficulty,
            self.stats.current_level,
            &mut self.rng,
            &mut self.next_id,
        );
        log::info!(
            "level {} start: {:?}, {} enemies, {} arrows, {} targets",
            self.stats.current_level,
            self.difficulty,
            self.enemies.len(),
            self.ammo,
            self.targets_remaining
        );
        self.enter_phase(GamePhase::Playing);
    }

    /// Apply damage to the player. Health is clamped to [0, MAX_HEALTH];
    /// reaching 0 ends the run. Ignored outside the playing phase, which also
    /// makes re-applied lethal damage a no-op.
    pub fn take_damage(&mut self, amount: i32) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.health = (self.health - amount).clamp(0, MAX_HEALTH);
        self.events.push(GameEvent::PlayerDamaged {
            damage: amount,
            health_left: self.health,
        });
        if self.health == 0 {
            self.enter_phase(GamePhase::GameOver);
        }
    }

    /// Award points for a downed target. Score only ever grows; the last
    /// target flips the session to LevelComplete.
    pub fn score_point(&mut self, points: u64) {
        if self.phase != GamePhase::Playing {
            return;
        }
        self.score += points;
        self.targets_remaining = self.targets_remaining.saturating_sub(1);
        if self.targets_remaining == 0 {
            self.enter_phase(GamePhase::LevelComplete);
        }
    }

    /// Spend one arrow. The shot that empties the quiver still fires (ammo
    /// rests at -1); if targets remain at that point the run is over. The
    /// exhaustion check lives only here, on the decrement path.
    pub fn decrement_ammo(&mut self) {
        if self.phase != GamePhase::Playing {
            return;
        }
        if self.ammo > -1 {
            self.ammo -= 1;
        }
        if self.ammo < 0 && self.targets_remaining > 0 {
            self.enter_phase(GamePhase::GameOver);
        }
    }

    /// LevelComplete -> Menu. Banks the coin reward, applies any weapon
    /// unlock for the cleared level, and advances progression.
    pub fn complete_level(&mut self) {
        if self.phase != GamePhase::LevelComplete {
            return;
        }
        let reward = self.difficulty.coin_reward();
        self.stats.coins += reward;

        let unlock = match self.stats.current_level {
            1 => Some(WeaponType::Fire),
            2 => Some(WeaponType::Ice),
            4 => Some(WeaponType::Electric),
            _ => None,
        };
        if let Some(weapon) = unlock {
            if self.stats.unlock(weapon) {
                log::info!("unlocked {} arrows", weapon.as_str());
                self.events.push(GameEvent::WeaponUnlocked(weapon));
            }
        }

        self.events.push(GameEvent::LevelCleared {
            coins_awarded: reward,
            next_level: self.stats.current_level + 1,
        });
        self.stats.current_level += 1;
        self.enter_phase(GamePhase::Menu);
    }

    /// GameOver -> Menu. Progression survives death; only the session
    /// scalars reset.
    pub fn reset(&mut self) {
        if self.phase != GamePhase::GameOver {
            return;
        }
        self.health = MAX_HEALTH;
        self.score = 0;
        self.enter_phase(GamePhase::Menu);
    }

    /// Most recent unlock, used to flavor the mission briefing
    pub fn last_unlocked_weapon(&self) -> Option<WeaponType> {
        self.stats.unlocked_weapons.last().copied()
    }

    /// Drain pending events (presentation calls this once per frame)
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Read-only view for rendering
    pub fn snapshot(&self) -> Snapshot<'_> {
        Snapshot {
            phase: self.phase,
            difficulty: self.difficulty,
            selected_weapon: self.selected_weapon,
            health: self.health,
            score: self.score,
            ammo: self.ammo,
            targets_remaining: self.targets_remaining,
            stats: &self.stats,
            enemies: &self.enemies,
            projectiles: &self.projectiles,
        }
    }

    fn enter_phase(&mut self, phase: GamePhase) {
        if self.phase == phase {
            return;
        }
        self.phase = phase;
        if phase != GamePhase::Playing {
            // entity collections live only as long as the play session
            self.enemies.clear();
            self.projectiles.clear();
        }
        log::debug!("phase -> {:?}", phase);
        self.events.push(GameEvent::PhaseChanged(phase));
    }
}

/// Read-only snapshot of session state, polled once per frame by the
/// presentation layer. Serializes for out-of-process renderers.
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot<'a> {
    pub phase: GamePhase,
    pub difficulty: Difficulty,
    pub selected_weapon: WeaponType,
    pub health: i32,
    pub score: u64,
    pub ammo: i32,
    pub targets_remaining: u32,
    pub stats: &'a PlayerStats,
    pub enemies: &'a [Enemy],
    pub projectiles: &'a [Projectile],
}
