//! Enemy movement and fire AI

use glam::Vec2;

use super::entity::{Enemy, FirePattern, MovePattern};
use super::patterns;
use super::pool::BulletPool;
use super::state::World;
use crate::aim;
use crate::tuning::Tuning;

/// Straight-pattern descent speed (px/s)
const STRAIGHT_SPEED: f32 = 80.0;
const SINE_DESCENT: f32 = 60.0;
const SINE_FREQUENCY: f32 = 3.0;
const SINE_AMPLITUDE: f32 = 50.0;
const CHASE_SPEED: f32 = 120.0;
const DRIFT_SPEED: f32 = 30.0;

/// Sub-bosses stop descending here
const HOLD_LINE_Y: f32 = 150.0;
const HOLD_DESCENT: f32 = 70.0;
const STRAFE_SPEED: f32 = 90.0;
const SWAY_FREQUENCY: f32 = 0.8;
const SWAY_AMPLITUDE: f32 = 120.0;

/// Move every live enemy, fire when due, and retire those past the bottom
pub fn update_enemies(world: &mut World, tuning: &Tuning, dt: f32) {
    let target = world.player.pos;
    let exit_y = tuning.field_height + tuning.enemy_exit_margin;

    for enemy in world.enemies.iter_mut().filter(|e| e.active) {
        enemy.move_timer += dt;
        enemy.fire_timer += dt;

        steer(enemy, target, tuning, dt);

        if enemy.fire_rate > 0.0 && enemy.fire_timer >= enemy.fire_rate {
            fire(enemy, target, &mut world.bullets, tuning);
            enemy.fire_timer = 0.0;
        }

        if enemy.pos.y > exit_y {
            enemy.active = false;
        }
    }
}

/// Advance an enemy along its movement pattern
pub fn steer(enemy: &mut Enemy, target: Vec2, tuning: &Tuning, dt: f32) {
    match enemy.movement {
        MovePattern::Straight => enemy.pos.y += STRAIGHT_SPEED * dt,
        MovePattern::Sine => {
            enemy.pos.y += SINE_DESCENT * dt;
            enemy.pos.x = enemy.base_x + (enemy.move_timer * SINE_FREQUENCY).sin() * SINE_AMPLITUDE;
        }
        MovePattern::Chase => {
            if let Some(dir) = aim(enemy.pos, target) {
                enemy.pos += dir * CHASE_SPEED * dt;
            }
        }
        MovePattern::Stationary => enemy.pos.y += DRIFT_SPEED * dt,
        MovePattern::Aggressive => {
            if descend_to_hold_line(enemy, dt) {
                let dx = target.x - enemy.pos.x;
                let step = STRAFE_SPEED * dt;
                enemy.pos.x += dx.clamp(-step, step);
            }
        }
        MovePattern::Defensive => {
            if descend_to_hold_line(enemy, dt) {
                enemy.pos.x =
                    enemy.base_x + (enemy.move_timer * SWAY_FREQUENCY).sin() * SWAY_AMPLITUDE;
            }
        }
    }

    if matches!(enemy.movement, MovePattern::Aggressive | MovePattern::Defensive) {
        let half = enemy.radius();
        enemy.pos.x = enemy.pos.x.clamp(half, tuning.field_width - half);
    }
}

/// Returns true once the enemy sits on the hold line
fn descend_to_hold_line(enemy: &mut Enemy, dt: f32) -> bool {
    if enemy.pos.y < HOLD_LINE_Y {
        enemy.pos.y = (enemy.pos.y + HOLD_DESCENT * dt).min(HOLD_LINE_Y);
        false
    } else {
        true
    }
}

/// Emit the enemy's bullet pattern
pub fn fire(enemy: &Enemy, target: Vec2, pool: &mut BulletPool, tuning: &Tuning) {
    let speed = tuning.enemy_bullet_speed;
    let pos = enemy.pos;

    match enemy.fire {
        FirePattern::None => {}
        FirePattern::Single => {
            patterns::fire_single(pool, pos + Vec2::new(0.0, 20.0), Vec2::new(0.0, speed));
        }
        FirePattern::TwinSpread => {
            // Splay scales with the player's horizontal bearing
            let Some(dir) = aim(pos, target) else {
                return;
            };
            let muzzle = pos + Vec2::new(0.0, 20.0);
            let splay = dir.x * speed * 0.5;
            patterns::fire_single(pool, muzzle, Vec2::new(splay, speed));
            patterns::fire_single(pool, muzzle, Vec2::new(-splay, speed));
        }
        FirePattern::TripleSpread => {
            for i in -1..=1 {
                let i = i as f32;
                patterns::fire_single(
                    pool,
                    pos + Vec2::new(i * 20.0, 30.0),
                    Vec2::new(i * 30.0, speed),
                );
            }
        }
        FirePattern::Radial {
            count,
            speed_factor,
        } => patterns::fire_radial(pool, pos, count, speed * speed_factor, 0.0),
        FirePattern::AimedFan { count, spread } => {
            let muzzle = pos + Vec2::new(0.0, enemy.size.y / 2.0);
            patterns::fire_aimed_fan(pool, muzzle, target, count, spread, speed);
        }
    }
}
