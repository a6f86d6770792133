//! Neon Archer - a cyberpunk first-person archery arcade game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (enemy AI, projectile physics, collisions, session state)
//! - `level`: Level theme palettes for the presentation layer
//! - `lore`: Mission-briefing text service (detached, never gameplay-critical)
//!
//! Rendering, menus, and HUD live outside this crate: the presentation layer
//! issues commands into [`sim::SessionState`], polls [`sim::Snapshot`] once per
//! frame, and drains [`sim::GameEvent`]s.

pub mod level;
pub mod lore;
pub mod sim;

pub use level::{LevelTheme, theme_for_level};
pub use lore::{LoreFetcher, LoreSource, fallback_briefing};

/// Game configuration constants
pub mod consts {
    /// Player health at the start of every session
    pub const MAX_HEALTH: i32 = 100;

    /// Projectile launch speed (units/sec)
    pub const PROJECTILE_SPEED: f32 = 50.0;
    /// Downward acceleration on projectiles - half strength for gameplay feel
    pub const PROJECTILE_GRAVITY: f32 = 4.9;
    /// Projectiles spawn this far in front of the player
    pub const PROJECTILE_MUZZLE_OFFSET: f32 = 1.0;
    /// Floor plane height; projectiles at or below this are spent
    pub const FLOOR_HEIGHT: f32 = -1.9;

    /// Minimum interval between consecutive shots (seconds)
    pub const FIRE_COOLDOWN: f32 = 0.5;

    /// Hit registration radius for projectile vs enemy (units)
    pub const HIT_RADIUS: f32 = 2.0;
    /// Damage per projectile hit, identical for every weapon type
    pub const HIT_DAMAGE: i32 = 50;
    /// Score awarded per kill
    pub const KILL_SCORE: u64 = 100;

    /// Enemy health at spawn
    pub const ENEMY_MAX_HEALTH: i32 = 100;
    /// Enemies within this range of the player may attack
    pub const ENEMY_ATTACK_RANGE: f32 = 10.0;
    /// Per-enemy minimum interval between attacks (seconds)
    pub const ENEMY_ATTACK_COOLDOWN: f32 = 3.0;
    /// Chance an in-range, off-cooldown enemy lands an attack
    pub const ENEMY_ATTACK_CHANCE: f64 = 0.3;
    /// Damage dealt to the player per landed attack
    pub const ENEMY_ATTACK_DAMAGE: i32 = 10;

    /// Chase enemies stop advancing once their z reaches this
    pub const CHASE_HOLD_Z: f32 = -2.0;
    /// Patrol sway amplitude on x
    pub const PATROL_AMPLITUDE: f32 = 5.0;
    /// Jumper bounce height on y
    pub const JUMP_AMPLITUDE: f32 = 3.0;
    /// Chase advance per tick, scaled by enemy speed
    pub const CHASE_STEP: f32 = 0.02;
    /// Chase x-wiggle amplitude
    pub const CHASE_WIGGLE: f32 = 2.0;

    /// Spawn arena: half-width of the x band
    pub const SPAWN_HALF_WIDTH: f32 = 20.0;
    /// Spawn arena: enemy eye height
    pub const SPAWN_HEIGHT: f32 = 1.5;
    /// Spawn arena: nearest z (in front of the player, negative z)
    pub const SPAWN_NEAR_Z: f32 = -15.0;
    /// Spawn arena: depth of the z band behind SPAWN_NEAR_Z
    pub const SPAWN_DEPTH: f32 = 30.0;
}
