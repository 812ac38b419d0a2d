//! Skyfire - vertical bullet-hell shooter core
//!
//! Core modules:
//! - `sim`: Frame-driven simulation (actors, AI, collisions, progression)
//! - `tuning`: Data-driven game balance
//! - `leaderboard`: Ranked run results
//! - `autopilot`: Scripted pilot for headless runs

pub mod autopilot;
pub mod error;
pub mod leaderboard;
pub mod sim;
pub mod tuning;

pub use autopilot::Autopilot;
pub use error::ConfigError;
pub use leaderboard::Leaderboard;
pub use tuning::Tuning;

use glam::Vec2;

/// Game configuration constants
pub mod consts {
    /// Play-field dimensions (origin top-left, +Y points down)
    pub const GAME_WIDTH: f32 = 960.0;
    pub const GAME_HEIGHT: f32 = 720.0;

    /// Player defaults
    pub const PLAYER_WIDTH: f32 = 30.0;
    pub const PLAYER_HEIGHT: f32 = 40.0;
    /// Spawn height above the bottom edge
    pub const PLAYER_SPAWN_OFFSET: f32 = 80.0;
    pub const PLAYER_SPEED: f32 = 280.0;
    pub const PLAYER_FIRE_INTERVAL: f32 = 0.12;
    /// Fraction of the player's width used for the damage hitbox
    pub const PLAYER_HITBOX_RATIO: f32 = 0.3;
    pub const PLAYER_MAX_HEALTH: u32 = 3;
    pub const PLAYER_INVULNERABLE_TIME: f32 = 2.0;
    pub const PLAYER_STARTING_BOMBS: u32 = 3;
    pub const MAX_WEAPON_LEVEL: u8 = 4;
    pub const MAX_BOMBS: u32 = 5;

    /// Bullets
    pub const BULLET_POOL_SIZE: usize = 500;
    pub const BULLET_WIDTH: f32 = 8.0;
    pub const BULLET_HEIGHT: f32 = 12.0;
    pub const BULLET_SPEED_PLAYER: f32 = 600.0;
    pub const BULLET_SPEED_ENEMY: f32 = 250.0;
    pub const BULLET_CULL_MARGIN: f32 = 20.0;

    /// Enemies and pickups
    pub const ENEMY_SPAWN_Y: f32 = -50.0;
    pub const ENEMY_SPAWN_INSET: f32 = 50.0;
    pub const ENEMY_EXIT_MARGIN: f32 = 50.0;
    pub const POWERUP_SIZE: f32 = 30.0;
    pub const POWERUP_FALL_SPEED: f32 = 100.0;
    pub const POWERUP_EXIT_MARGIN: f32 = 30.0;
    pub const POWERUP_DROP_CHANCE: f32 = 0.15;

    /// Combat
    pub const BODY_CONTACT_DAMAGE: i32 = 2;
    pub const BOMB_ENEMY_DAMAGE: i32 = 5;
    pub const BOMB_BOSS_DAMAGE: i32 = 100;
    pub const BOMB_SCORE_BONUS: u64 = 500;
    pub const SCORE_POWERUP_BONUS: u64 = 1000;
    pub const SHIELD_DURATION: f32 = 5.0;

    /// Boss encounter
    pub const BOSS_DEFEAT_BONUS: u64 = 10_000;
    pub const BOSS_WARNING_DELAY: f32 = 3.0;
    pub const BOSS_SPAWN_Y: f32 = -100.0;
    pub const BOSS_HOLD_Y: f32 = 120.0;
    pub const BOSS_ENTRY_SPEED: f32 = 120.0;
    pub const FINAL_PHASE: u32 = 3;

    /// Longest frame the simulation will integrate in one step (seconds)
    pub const MAX_FRAME_DELTA: f32 = 0.1;
}

/// Unit vector for an angle in radians (screen space, +Y down)
#[inline]
pub fn direction_from_angle(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// Unit vector from `from` toward `to`, or `None` when the points coincide
#[inline]
pub fn aim(from: Vec2, to: Vec2) -> Option<Vec2> {
    (to - from).try_normalize()
}
