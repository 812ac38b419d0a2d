//! Enemy bullet emitters shared by regular enemies, sub-bosses and bosses
//!
//! Every emitter writes straight into the pool; shots the pool cannot hold
//! are dropped.

use std::f32::consts::TAU;

use glam::Vec2;

use super::pool::BulletPool;
use crate::{aim, direction_from_angle};

const ENEMY_BULLET_DAMAGE: i32 = 1;

#[inline]
fn emit(pool: &mut BulletPool, pos: Vec2, vel: Vec2) {
    pool.spawn(false, pos, vel, ENEMY_BULLET_DAMAGE);
}

/// One bullet with a fixed velocity
pub fn fire_single(pool: &mut BulletPool, origin: Vec2, vel: Vec2) {
    emit(pool, origin, vel);
}

/// One bullet aimed at `target`; nothing is fired if they coincide
pub fn fire_aimed(pool: &mut BulletPool, origin: Vec2, target: Vec2, speed: f32) {
    if let Some(dir) = aim(origin, target) {
        emit(pool, origin, dir * speed);
    }
}

/// `count` aimed shots spread `spread` radians apart, centred on `target`
pub fn fire_aimed_fan(
    pool: &mut BulletPool,
    origin: Vec2,
    target: Vec2,
    count: u32,
    spread: f32,
    speed: f32,
) {
    let Some(dir) = aim(origin, target) else {
        return;
    };
    let centre = dir.y.atan2(dir.x);
    let half = (count.saturating_sub(1)) as f32 / 2.0;
    for i in 0..count {
        let angle = centre + (i as f32 - half) * spread;
        emit(pool, origin, direction_from_angle(angle) * speed);
    }
}

/// Evenly spaced ring starting at `angle_offset`
pub fn fire_radial(pool: &mut BulletPool, origin: Vec2, count: u32, speed: f32, angle_offset: f32) {
    for i in 0..count {
        let angle = angle_offset + TAU * i as f32 / count as f32;
        emit(pool, origin, direction_from_angle(angle) * speed);
    }
}

/// Eight-arm ring whose rotation advances with `clock` (seconds)
pub fn fire_spiral(pool: &mut BulletPool, origin: Vec2, clock: f32, speed: f32) {
    fire_radial(pool, origin, 8, speed, clock * 2.0);
}

/// Seven-bullet horizontal curtain fanning outward from the centre
pub fn fire_wave(pool: &mut BulletPool, origin: Vec2, speed: f32) {
    for i in -3..=3 {
        let i = i as f32;
        emit(
            pool,
            origin + Vec2::new(i * 30.0, 0.0),
            Vec2::new(i * 20.0, speed),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_radial_ring_is_balanced() {
        let mut pool = BulletPool::new(32);
        fire_radial(&mut pool, Vec2::new(100.0, 100.0), 8, 175.0, 0.0);
        assert_eq!(pool.live_count(), 8);

        // Velocities of a full ring cancel out
        let sum: Vec2 = pool.iter().map(|b| b.vel).sum();
        assert!(sum.length() < 1e-2);
        assert!(pool.iter().all(|b| !b.is_player_bullet));
    }

    #[test]
    fn test_aimed_shot_points_at_target() {
        let mut pool = BulletPool::new(4);
        fire_aimed(&mut pool, Vec2::ZERO, Vec2::new(0.0, 10.0), 250.0);
        let bullet = pool.iter().next().unwrap();
        assert!((bullet.vel - Vec2::new(0.0, 250.0)).length() < 1e-3);

        // Coincident target fires nothing
        fire_aimed(&mut pool, Vec2::ONE, Vec2::ONE, 250.0);
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn test_aimed_fan_centres_on_target() {
        let mut pool = BulletPool::new(8);
        fire_aimed_fan(&mut pool, Vec2::ZERO, Vec2::new(0.0, 100.0), 3, 0.25, 200.0);
        assert_eq!(pool.live_count(), 3);
        let mean_x: f32 = pool.iter().map(|b| b.vel.x).sum::<f32>() / 3.0;
        assert!(mean_x.abs() < 1e-3);
    }

    #[test]
    fn test_spiral_rotates_with_clock() {
        let mut early = BulletPool::new(8);
        let mut late = BulletPool::new(8);
        fire_spiral(&mut early, Vec2::ZERO, 0.0, 125.0);
        fire_spiral(&mut late, Vec2::ZERO, 0.1, 125.0);
        let a = early.iter().next().unwrap().vel;
        let b = late.iter().next().unwrap().vel;
        assert!((a - b).length() > 1.0);
    }

    #[test]
    fn test_wave_is_seven_wide() {
        let mut pool = BulletPool::new(16);
        fire_wave(&mut pool, Vec2::new(480.0, 200.0), 200.0);
        assert_eq!(pool.live_count(), 7);
        assert!(pool.iter().all(|b| b.vel.y > 0.0));
    }

    #[test]
    fn test_emitters_respect_capacity() {
        let mut pool = BulletPool::new(5);
        fire_radial(&mut pool, Vec2::ZERO, 16, 100.0, 0.0);
        assert_eq!(pool.live_count(), 5);
    }
}
