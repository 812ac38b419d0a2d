//! Boss encounter: entry, movement, phase attacks and the optional minion wing
//!
//! The attack stage is never stored. Every read goes through
//! [`Boss::phase`], which derives it from the remaining health, so the cadence
//! and pattern can never disagree with the health bar.

use glam::Vec2;

use super::entity::{Boss, BossKind, BossPhase, MinionWing};
use super::patterns;
use super::pool::BulletPool;
use super::state::World;
use crate::consts::{BOSS_ENTRY_SPEED, BOSS_HOLD_Y, BOSS_SPAWN_Y};
use crate::tuning::Tuning;

const SWAY_FREQUENCY: f32 = 1.5;
const SWAY_SPEED: f32 = 100.0;

/// Horizontal spacing of the side cannons in the opening volley
const CANNON_SPREAD: f32 = 40.0;
const SPIRAL_SPEED_FACTOR: f32 = 0.5;
const BURST_COUNT: u32 = 16;
const BURST_SPEED_FACTOR: f32 = 0.6;
const WAVE_SPEED_FACTOR: f32 = 0.8;

/// Place the phase boss above the field, centred, ready to slide in
pub fn spawn_boss(world: &mut World, tuning: &Tuning, kind: BossKind) {
    let id = world.next_entity_id();
    let pos = Vec2::new(tuning.field_width / 2.0, BOSS_SPAWN_Y);
    world.boss = Some(Boss::new(id, kind, pos));
    log::info!("{} entering (phase {})", kind.name(), world.phase);
}

/// Advance the boss one step
pub fn update_boss(world: &mut World, tuning: &Tuning, dt: f32) {
    let target = world.player.pos;
    let Some(boss) = world.boss.as_mut().filter(|b| b.active) else {
        return;
    };

    boss.move_timer += dt;
    boss.attack_timer += dt;

    if boss.entering {
        boss.pos.y += BOSS_ENTRY_SPEED * dt;
        if boss.pos.y >= BOSS_HOLD_Y {
            boss.pos.y = BOSS_HOLD_Y;
            boss.entering = false;
        }
    }

    sway(boss, tuning, dt);

    let phase = boss.phase();
    if boss.attack_timer >= phase.attack_interval() {
        attack(boss, phase, target, &mut world.bullets, tuning);
        boss.attack_timer = 0.0;
    }

    let wing = if tuning.boss_minions {
        boss.kind.params().minions.and_then(|wing| {
            boss.minion_timer += dt;
            if boss.minion_timer >= wing.interval {
                boss.minion_timer = 0.0;
                Some((wing, boss.pos, boss.size))
            } else {
                None
            }
        })
    } else {
        None
    };

    if let Some((wing, pos, size)) = wing {
        launch_minions(world, wing, pos, size);
    }
}

fn sway(boss: &mut Boss, tuning: &Tuning, dt: f32) {
    boss.pos.x +=
        (boss.move_timer * SWAY_FREQUENCY).sin() * SWAY_SPEED * dt * boss.move_direction;

    let half = boss.size.x / 2.0;
    let (min_x, max_x) = (half, tuning.field_width - half);
    if boss.pos.x <= min_x {
        boss.pos.x = min_x;
        boss.move_direction = -boss.move_direction;
    } else if boss.pos.x >= max_x {
        boss.pos.x = max_x;
        boss.move_direction = -boss.move_direction;
    }
}

/// Fire the pattern for the current attack stage
pub fn attack(boss: &Boss, phase: BossPhase, target: Vec2, pool: &mut BulletPool, tuning: &Tuning) {
    let speed = tuning.enemy_bullet_speed;
    let muzzle = boss.muzzle();

    match phase {
        BossPhase::One => {
            for dx in [-CANNON_SPREAD, 0.0, CANNON_SPREAD] {
                patterns::fire_aimed(pool, muzzle + Vec2::new(dx, 0.0), target, speed);
            }
        }
        BossPhase::Two => {
            patterns::fire_spiral(pool, muzzle, boss.move_timer, speed * SPIRAL_SPEED_FACTOR);
        }
        BossPhase::Three => {
            patterns::fire_radial(pool, muzzle, BURST_COUNT, speed * BURST_SPEED_FACTOR, 0.0);
            patterns::fire_wave(pool, muzzle, speed * WAVE_SPEED_FACTOR);
        }
    }
}

/// Top up the escort wing to its limit, fanned out beneath the boss
fn launch_minions(world: &mut World, wing: MinionWing, pos: Vec2, size: Vec2) {
    let alive = world.count_enemies(wing.kind) as u32;
    let missing = wing.count.saturating_sub(alive);
    if missing == 0 {
        return;
    }

    let step = size.x / missing as f32;
    let left = pos.x - size.x / 2.0 + step / 2.0;
    let y = pos.y + size.y / 2.0;
    for i in 0..missing {
        let x = left + step * i as f32;
        world.spawn_enemy(wing.kind, Vec2::new(x, y), 0.0);
    }
    log::debug!("Launched {} {:?}", missing, wing.kind);
}
