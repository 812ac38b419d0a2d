//! Fixed-capacity bullet arena
//!
//! Every projectile in a run lives in one of the slots allocated here at
//! construction. Slots are addressed by [`BulletHandle`] and toggled
//! live/idle; they are never created or freed individually.
//!
//! Idle slots sit on one of two free stacks keyed by their last ownership
//! tag, so `acquire` can hand back a slot already tagged for the requested
//! side (no re-tag flicker for renderers) in O(1).

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::{BULLET_HEIGHT, BULLET_WIDTH};
use crate::tuning::Tuning;

/// Index of a slot in the [`BulletPool`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BulletHandle(usize);

impl BulletHandle {
    #[inline]
    pub(crate) fn from_index(index: usize) -> Self {
        Self(index)
    }

    #[inline]
    pub fn index(self) -> usize {
        self.0
    }
}

/// A projectile slot
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Bullet {
    /// Equal to the slot index
    pub id: u32,
    pub pos: Vec2,
    pub vel: Vec2,
    pub size: Vec2,
    pub active: bool,
    /// Partitions friend/foe collision checks
    pub is_player_bullet: bool,
    pub damage: i32,
}

impl Bullet {
    fn idle(index: usize) -> Self {
        Self {
            id: index as u32,
            pos: Vec2::ZERO,
            vel: Vec2::ZERO,
            size: Vec2::new(BULLET_WIDTH, BULLET_HEIGHT),
            active: false,
            is_player_bullet: false,
            damage: 1,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }
}

#[derive(Debug, Clone)]
pub struct BulletPool {
    slots: Vec<Bullet>,
    free_player: Vec<usize>,
    free_enemy: Vec<usize>,
    live: usize,
}

impl BulletPool {
    /// Allocate `capacity` idle slots; the pool never grows afterwards
    pub fn new(capacity: usize) -> Self {
        let mut pool = Self {
            slots: (0..capacity).map(Bullet::idle).collect(),
            free_player: Vec::with_capacity(capacity),
            free_enemy: Vec::with_capacity(capacity),
            live: 0,
        };
        pool.rebuild_free_lists();
        pool
    }

    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Number of live bullets (never exceeds capacity)
    #[inline]
    pub fn live_count(&self) -> usize {
        self.live
    }

    /// Claim an idle slot, preferring one already tagged for this side.
    /// Returns `None` when every slot is live; the shot is simply lost.
    pub fn acquire(&mut self, is_player_bullet: bool) -> Option<BulletHandle> {
        let (same, other) = if is_player_bullet {
            (&mut self.free_player, &mut self.free_enemy)
        } else {
            (&mut self.free_enemy, &mut self.free_player)
        };
        let Some(index) = same.pop().or_else(|| other.pop()) else {
            log::trace!("bullet pool exhausted ({} live)", self.live);
            return None;
        };

        let slot = &mut self.slots[index];
        slot.active = true;
        slot.is_player_bullet = is_player_bullet;
        self.live += 1;
        Some(BulletHandle(index))
    }

    /// Acquire a slot and overwrite its kinematics in one go
    pub fn spawn(
        &mut self,
        is_player_bullet: bool,
        pos: Vec2,
        vel: Vec2,
        damage: i32,
    ) -> Option<BulletHandle> {
        let handle = self.acquire(is_player_bullet)?;
        let slot = &mut self.slots[handle.0];
        slot.pos = pos;
        slot.vel = vel;
        slot.damage = damage;
        Some(handle)
    }

    /// Mark a slot idle; its fields stay stale until the next acquire
    pub fn release(&mut self, handle: BulletHandle) {
        let Some(slot) = self.slots.get_mut(handle.0) else {
            debug_assert!(false, "bullet handle {} out of range", handle.0);
            return;
        };
        if !slot.active {
            return;
        }
        slot.active = false;
        self.live -= 1;
        if slot.is_player_bullet {
            self.free_player.push(handle.0);
        } else {
            self.free_enemy.push(handle.0);
        }
    }

    /// Release every live bullet matching `predicate`, returning how many
    pub fn release_where(&mut self, mut predicate: impl FnMut(&Bullet) -> bool) -> usize {
        let mut released = 0;
        for index in 0..self.slots.len() {
            let slot = &self.slots[index];
            if slot.active && predicate(slot) {
                self.release(BulletHandle(index));
                released += 1;
            }
        }
        released
    }

    /// Idle every slot, keeping the storage
    pub fn release_all(&mut self) {
        for slot in &mut self.slots {
            slot.active = false;
        }
        self.live = 0;
        self.rebuild_free_lists();
    }

    /// The live bullet behind `handle`, if any
    pub fn get(&self, handle: BulletHandle) -> Option<&Bullet> {
        self.slots.get(handle.0).filter(|b| b.active)
    }

    /// Live bullets only
    pub fn iter(&self) -> impl Iterator<Item = &Bullet> {
        self.slots.iter().filter(|b| b.active)
    }

    /// Handles of live bullets on one side, in slot order
    pub fn handles(&self, is_player_bullet: bool) -> impl Iterator<Item = BulletHandle> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter(move |(_, b)| b.active && b.is_player_bullet == is_player_bullet)
            .map(|(i, _)| BulletHandle(i))
    }

    /// Integrate every live bullet and cull the ones that left the field
    pub fn step(&mut self, dt: f32, tuning: &Tuning) {
        for index in 0..self.slots.len() {
            let slot = &mut self.slots[index];
            if !slot.active {
                continue;
            }
            slot.pos += slot.vel * dt;
            if !tuning.in_field(slot.pos, tuning.bullet_cull_margin) {
                self.release(BulletHandle(index));
            }
        }
    }

    fn rebuild_free_lists(&mut self) {
        self.free_player.clear();
        self.free_enemy.clear();
        // Reverse so the lowest index is handed out first
        for (index, slot) in self.slots.iter().enumerate().rev() {
            if slot.active {
                continue;
            }
            if slot.is_player_bullet {
                self.free_player.push(index);
            } else {
                self.free_enemy.push(index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_acquire_until_exhausted() {
        let mut pool = BulletPool::new(3);
        assert!(pool.acquire(true).is_some());
        assert!(pool.acquire(false).is_some());
        assert!(pool.acquire(true).is_some());
        assert_eq!(pool.live_count(), 3);

        // Full pool drops the request
        assert!(pool.acquire(false).is_none());
        assert_eq!(pool.live_count(), 3);
    }

    #[test]
    fn test_acquire_prefers_matching_tag() {
        let mut pool = BulletPool::new(4);
        let player_shot = pool.acquire(true).unwrap();
        let enemy_shot = pool.acquire(false).unwrap();
        pool.release(player_shot);
        pool.release(enemy_shot);

        // Both sides get back the slot they last used
        assert_eq!(pool.acquire(true), Some(player_shot));
        assert_eq!(pool.acquire(false), Some(enemy_shot));
    }

    #[test]
    fn test_acquire_retags_when_side_has_no_idle_slot() {
        let mut pool = BulletPool::new(1);
        let handle = pool.acquire(false).unwrap();
        pool.release(handle);

        let retagged = pool.acquire(true).unwrap();
        assert_eq!(retagged, handle);
        assert!(pool.get(retagged).unwrap().is_player_bullet);
    }

    #[test]
    fn test_release_is_idempotent() {
        let mut pool = BulletPool::new(2);
        let handle = pool.spawn(true, Vec2::new(10.0, 10.0), Vec2::Y, 1).unwrap();
        pool.release(handle);
        pool.release(handle);
        assert_eq!(pool.live_count(), 0);
        assert!(pool.get(handle).is_none());

        // Releasing twice must not duplicate the slot on a free stack
        assert!(pool.acquire(true).is_some());
        assert!(pool.acquire(true).is_some());
        assert!(pool.acquire(true).is_none());
    }

    #[test]
    fn test_release_where_filters_by_side() {
        let mut pool = BulletPool::new(6);
        for _ in 0..2 {
            pool.spawn(true, Vec2::ZERO, Vec2::ZERO, 1);
        }
        for _ in 0..3 {
            pool.spawn(false, Vec2::ZERO, Vec2::ZERO, 1);
        }
        let released = pool.release_where(|b| !b.is_player_bullet);
        assert_eq!(released, 3);
        assert_eq!(pool.live_count(), 2);
        assert!(pool.iter().all(|b| b.is_player_bullet));
    }

    #[test]
    fn test_step_moves_and_culls() {
        let tuning = Tuning::default();
        let mut pool = BulletPool::new(4);
        let inside = pool
            .spawn(true, Vec2::new(100.0, 100.0), Vec2::new(0.0, -600.0), 1)
            .unwrap();
        let leaving = pool
            .spawn(false, Vec2::new(100.0, tuning.field_height + 15.0), Vec2::new(0.0, 250.0), 1)
            .unwrap();

        pool.step(0.1, &tuning);

        let moved = pool.get(inside).unwrap();
        assert!((moved.pos.y - 40.0).abs() < 1e-3);
        assert!(pool.get(leaving).is_none());
        assert_eq!(pool.live_count(), 1);
    }

    #[test]
    fn test_release_all_keeps_capacity() {
        let mut pool = BulletPool::new(5);
        for _ in 0..5 {
            pool.acquire(false);
        }
        pool.release_all();
        assert_eq!(pool.live_count(), 0);
        assert_eq!(pool.capacity(), 5);
        assert_eq!(pool.iter().count(), 0);
        for _ in 0..5 {
            assert!(pool.acquire(true).is_some());
        }
    }
}
