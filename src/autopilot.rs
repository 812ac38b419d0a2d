//! Scripted pilot for headless runs
//!
//! Reads the engine's public view each frame and produces an [`InputState`].
//! Behaviour, in priority order:
//! - Bomb when enough enemy fire is about to land
//! - Slide away from nearby enemy bullets and ramming enemies
//! - Grab a powerup when the lane is quiet
//! - Line up under the lowest enemy (or the boss) and keep shooting

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::sim::{GameEngine, InputState};

/// Pilot weights, tweakable from JSON
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Autopilot {
    /// Bullets closer than this push the ship away
    pub danger_radius: f32,
    /// Bullets inside this radius count toward a bomb
    pub panic_radius: f32,
    /// Close bullets needed before a bomb is spent
    pub bomb_threshold: usize,
    /// Horizontal slack before the ship bothers to realign
    pub align_slack: f32,
    /// Distance from the bottom edge the ship returns to
    pub home_offset: f32,
    /// Repulsion above which dodging overrides targeting
    pub dodge_threshold: f32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self {
            danger_radius: 110.0,
            panic_radius: 45.0,
            bomb_threshold: 4,
            align_slack: 8.0,
            home_offset: 80.0,
            dodge_threshold: 0.02,
        }
    }
}

impl Autopilot {
    /// Decide this frame's input
    pub fn decide(&self, engine: &GameEngine) -> InputState {
        let mut input = InputState::default();
        let player = engine.player();
        if !player.active {
            return input;
        }
        let pos = player.pos;

        let mut push = Vec2::ZERO;
        let mut close_calls = 0;
        for bullet in engine.bullets().filter(|b| !b.is_player_bullet) {
            let away = pos - bullet.pos;
            let dist = away.length();
            // Bullets already below the ship and moving down are harmless
            if dist > self.danger_radius || (away.y < 0.0 && bullet.vel.y > 0.0) {
                continue;
            }
            if dist < self.panic_radius {
                close_calls += 1;
            }
            push += away / dist.max(1.0).powi(2);
        }
        for enemy in engine.enemies() {
            let away = pos - enemy.pos;
            let dist = away.length() - enemy.radius();
            if dist < self.danger_radius {
                push += away.normalize_or_zero() / dist.max(1.0);
            }
        }

        input.bomb = player.bombs > 0 && !player.invulnerable && close_calls >= self.bomb_threshold;

        let desired = if push.length() > self.dodge_threshold {
            pos + push.normalize() * self.danger_radius
        } else {
            let home_y = engine.tuning().field_height - self.home_offset;
            Vec2::new(self.target_x(engine, pos), home_y)
        };

        let delta = desired - pos;
        input.left = delta.x < -self.align_slack;
        input.right = delta.x > self.align_slack;
        input.up = delta.y < -self.align_slack;
        input.down = delta.y > self.align_slack;
        input
    }

    /// Powerup when the lane is clear, otherwise the most pressing target
    fn target_x(&self, engine: &GameEngine, pos: Vec2) -> f32 {
        let pickup = engine
            .powerups()
            .filter(|p| p.pos.y > pos.y - 2.0 * self.danger_radius)
            .min_by(|a, b| a.pos.distance_squared(pos).total_cmp(&b.pos.distance_squared(pos)));
        if let Some(p) = pickup {
            return p.pos.x;
        }

        let lowest = engine
            .enemies()
            .filter(|e| e.pos.y > 0.0)
            .max_by(|a, b| a.pos.y.total_cmp(&b.pos.y));
        match (lowest, engine.boss()) {
            (Some(enemy), _) => enemy.pos.x,
            (None, Some(boss)) => boss.pos.x,
            (None, None) => engine.tuning().field_width / 2.0,
        }
    }
}
