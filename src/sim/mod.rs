//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Frame-driven steps with explicit delta time
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod spawn;
pub mod state;
pub mod tick;

pub use collision::{projectile_hits_enemy, projectile_hits_floor};
pub use spawn::{ammo_budget, enemy_budget, spawn_enemies, target_budget};
pub use state::{
    Difficulty, Enemy, EnemyKind, GameEvent, GamePhase, PlayerStats, Projectile, SessionState,
    Snapshot, WeaponType,
};
pub use tick::{TickInput, tick};
