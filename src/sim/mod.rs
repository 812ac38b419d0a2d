//! Simulation core
//!
//! All gameplay logic lives here. The core is single-threaded and does no
//! I/O:
//! - Variable frame deltas, clamped per step
//! - Seeded RNG only
//! - Stable iteration order (registry slot order)
//! - No rendering or platform dependencies

pub mod boss;
pub mod collision;
pub mod enemy;
pub mod engine;
pub mod entity;
pub mod patterns;
pub mod player;
pub mod pool;
pub mod scoring;
pub mod spawn;
pub mod state;

pub use engine::GameEngine;
pub use entity::{
    Boss, BossKind, BossPhase, Enemy, EnemyKind, FirePattern, MovePattern, Player, PowerUp,
    PowerUpKind,
};
pub use player::{InputAction, InputState};
pub use pool::{Bullet, BulletHandle, BulletPool};
pub use spawn::{PhaseParams, SpawnDirector, phase_params};
pub use state::{BossSnapshot, GameEvent, GameResult, GameState, RunStats, World};
