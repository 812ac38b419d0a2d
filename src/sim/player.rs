//! Player controller: input, movement, weapons and bombs

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::entity::Player;
use super::pool::BulletPool;
use super::scoring;
use super::state::World;
use crate::tuning::Tuning;

/// Discrete input actions fed by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum InputAction {
    Up,
    Down,
    Left,
    Right,
    Bomb,
    Pause,
}

impl InputAction {
    pub const ALL: [InputAction; 6] = [
        InputAction::Up,
        InputAction::Down,
        InputAction::Left,
        InputAction::Right,
        InputAction::Bomb,
        InputAction::Pause,
    ];
}

/// Held state of every input action
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub up: bool,
    pub down: bool,
    pub left: bool,
    pub right: bool,
    pub bomb: bool,
    pub pause: bool,
}

impl InputState {
    pub fn get(&self, action: InputAction) -> bool {
        match action {
            InputAction::Up => self.up,
            InputAction::Down => self.down,
            InputAction::Left => self.left,
            InputAction::Right => self.right,
            InputAction::Bomb => self.bomb,
            InputAction::Pause => self.pause,
        }
    }

    pub fn set(&mut self, action: InputAction, pressed: bool) {
        match action {
            InputAction::Up => self.up = pressed,
            InputAction::Down => self.down = pressed,
            InputAction::Left => self.left = pressed,
            InputAction::Right => self.right = pressed,
            InputAction::Bomb => self.bomb = pressed,
            InputAction::Pause => self.pause = pressed,
        }
    }

    /// Movement direction with diagonals normalized to unit length
    pub fn direction(&self) -> Vec2 {
        let mut dir = Vec2::ZERO;
        if self.up {
            dir.y -= 1.0;
        }
        if self.down {
            dir.y += 1.0;
        }
        if self.left {
            dir.x -= 1.0;
        }
        if self.right {
            dir.x += 1.0;
        }
        dir.normalize_or_zero()
    }
}

/// One barrel of a weapon level
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Muzzle {
    /// Spawn point relative to the ship centre
    pub offset: Vec2,
    /// Horizontal velocity (px/s)
    pub vel_x: f32,
    /// Fraction of the player bullet speed used upward
    pub speed_factor: f32,
}

const fn muzzle(x: f32, y: f32, vel_x: f32, speed_factor: f32) -> Muzzle {
    Muzzle {
        offset: Vec2::new(x, y),
        vel_x,
        speed_factor,
    }
}

const LEVEL_1: [Muzzle; 1] = [muzzle(0.0, -20.0, 0.0, 1.0)];
const LEVEL_2: [Muzzle; 2] = [muzzle(-10.0, -15.0, 0.0, 1.0), muzzle(10.0, -15.0, 0.0, 1.0)];
const LEVEL_3: [Muzzle; 3] = [
    muzzle(0.0, -20.0, 0.0, 1.0),
    muzzle(-15.0, -10.0, -50.0, 0.9),
    muzzle(15.0, -10.0, 50.0, 0.9),
];
const LEVEL_4: [Muzzle; 5] = [
    muzzle(0.0, -20.0, 0.0, 1.0),
    muzzle(-12.0, -15.0, 0.0, 1.0),
    muzzle(12.0, -15.0, 0.0, 1.0),
    muzzle(-25.0, 0.0, -100.0, 0.8),
    muzzle(25.0, 0.0, 100.0, 0.8),
];

/// Fixed barrel table for a weapon level (1..=4)
pub fn weapon_pattern(level: u8) -> &'static [Muzzle] {
    debug_assert!((1..=4).contains(&level), "weapon level {level} out of range");
    match level {
        0 | 1 => &LEVEL_1,
        2 => &LEVEL_2,
        3 => &LEVEL_3,
        _ => &LEVEL_4,
    }
}

/// Move, tick timers and fire
pub fn update_player(world: &mut World, input: &InputState, tuning: &Tuning, dt: f32) {
    let player = &mut world.player;
    if !player.active {
        return;
    }

    player.pos += input.direction() * tuning.player_speed * dt;
    let half = player.size / 2.0;
    player.pos = player.pos.clamp(half, tuning.field() - half);

    if player.invulnerable {
        player.invulnerable_timer -= dt;
        if player.invulnerable_timer <= 0.0 {
            player.invulnerable = false;
            player.invulnerable_timer = 0.0;
        }
    }

    player.fire_timer -= dt;
    if player.fire_timer <= 0.0 {
        fire_player_bullets(player, &mut world.bullets, tuning);
        player.fire_timer = tuning.player_fire_interval;
    }
}

/// Emit one volley for the player's current weapon level
pub fn fire_player_bullets(player: &Player, pool: &mut BulletPool, tuning: &Tuning) {
    for barrel in weapon_pattern(player.weapon_level) {
        let vel = Vec2::new(
            barrel.vel_x,
            -tuning.player_bullet_speed * barrel.speed_factor,
        );
        pool.spawn(true, player.pos + barrel.offset, vel, 1);
    }
}

/// Spend a bomb: clear enemy fire and damage everything on screen.
/// Returns false when no bomb was available.
pub fn use_bomb(world: &mut World, tuning: &Tuning) -> bool {
    if world.player.bombs == 0 || !world.player.active {
        return false;
    }
    world.player.bombs -= 1;
    world.score += tuning.bomb_score_bonus;

    let cleared = world.bullets.release_where(|b| !b.is_player_bullet);

    for index in 0..world.enemies.len() {
        if world.enemies[index].active {
            scoring::damage_enemy(world, tuning, index, tuning.bomb_enemy_damage);
        }
    }

    if world.active_boss().is_some() {
        scoring::damage_boss(world, tuning, tuning.bomb_boss_damage);
    }

    log::debug!(
        "Bomb used: cleared {} bullets, {} bombs left",
        cleared,
        world.player.bombs
    );
    true
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagonal_speed_matches_axial() {
        let diagonal = InputState {
            up: true,
            right: true,
            ..Default::default()
        };
        let axial = InputState {
            left: true,
            ..Default::default()
        };
        assert!((diagonal.direction().length() - 1.0).abs() < 1e-5);
        assert!((axial.direction().length() - 1.0).abs() < 1e-5);

        // Opposing keys cancel
        let both = InputState {
            left: true,
            right: true,
            ..Default::default()
        };
        assert_eq!(both.direction(), Vec2::ZERO);
    }

    #[test]
    fn test_input_set_and_get() {
        let mut input = InputState::default();
        for action in InputAction::ALL {
            input.set(action, true);
            assert!(input.get(action));
            input.set(action, false);
            assert!(!input.get(action));
        }
    }

    #[test]
    fn test_weapon_levels_barrel_counts() {
        assert_eq!(weapon_pattern(1).len(), 1);
        assert_eq!(weapon_pattern(2).len(), 2);
        assert_eq!(weapon_pattern(3).len(), 3);
        assert_eq!(weapon_pattern(4).len(), 5);
    }

    #[test]
    fn test_player_clamped_to_field() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning, 1);
        let input = InputState {
            left: true,
            up: true,
            ..Default::default()
        };
        for _ in 0..100 {
            update_player(&mut world, &input, &tuning, 0.1);
        }
        let half = world.player.size / 2.0;
        assert_eq!(world.player.pos, half);
    }

    #[test]
    fn test_invulnerability_expires() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning, 1);
        world.player.grant_invulnerability(0.15);
        update_player(&mut world, &InputState::default(), &tuning, 0.1);
        assert!(world.player.invulnerable);
        update_player(&mut world, &InputState::default(), &tuning, 0.1);
        assert!(!world.player.invulnerable);
    }

    #[test]
    fn test_level_four_volley() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning, 1);
        world.player.weapon_level = 4;
        fire_player_bullets(&world.player, &mut world.bullets, &tuning);
        assert_eq!(world.bullets.live_count(), 5);
        assert!(world.bullets.iter().all(|b| b.is_player_bullet && b.vel.y < 0.0));
    }

    #[test]
    fn test_bomb_without_charges_is_noop() {
        let tuning = Tuning::default();
        let mut world = World::new(&tuning, 1);
        world.player.bombs = 0;
        world.bullets.spawn(false, Vec2::new(10.0, 10.0), Vec2::Y, 1);
        assert!(!use_bomb(&mut world, &tuning));
        assert_eq!(world.bullets.live_count(), 1);
        assert_eq!(world.score, 0);
    }
}
