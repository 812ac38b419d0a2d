//! Game engine orchestrator
//!
//! Owns the world and the tuning, turns host input into actions and runs the
//! per-frame system order:
//!
//! player → bullets → enemies → boss → powerups → collisions → spawns
//!
//! Events produced anywhere (including by a bomb fired from
//! [`GameEngine::set_input`]) are queued and handed out by the next
//! [`GameEngine::update`] or [`GameEngine::take_events`].

use rand::SeedableRng;
use rand_pcg::Pcg32;

use super::boss::update_boss;
use super::collision::resolve_collisions;
use super::enemy::update_enemies;
use super::entity::{Boss, Enemy, Player, PowerUp};
use super::player::{InputAction, InputState, update_player, use_bomb};
use super::pool::{Bullet, BulletPool};
use super::spawn::direct_spawns;
use super::state::{GameEvent, GameState, World};
use crate::error::ConfigError;
use crate::tuning::Tuning;

#[derive(Debug, Clone)]
pub struct GameEngine {
    tuning: Tuning,
    input: InputState,
    world: World,
}

impl GameEngine {
    /// Validate `tuning` and start a run seeded with `seed`
    pub fn new(tuning: Tuning, seed: u64) -> Result<Self, ConfigError> {
        tuning.validate()?;
        Ok(Self::build(tuning, seed))
    }

    /// Default tuning, explicit seed
    pub fn with_seed(seed: u64) -> Self {
        Self::build(Tuning::default(), seed)
    }

    fn build(tuning: Tuning, seed: u64) -> Self {
        let world = World::new(&tuning, seed);
        log::info!(
            "Engine ready: {}x{} field, {} bullet slots, seed {}",
            tuning.field_width,
            tuning.field_height,
            tuning.bullet_pool_capacity,
            seed
        );
        Self {
            tuning,
            input: InputState::default(),
            world,
        }
    }

    /// Run one simulation step and return every event queued since the last
    /// call. Non-positive or non-finite deltas advance nothing; long frames
    /// are clamped.
    pub fn update(&mut self, delta: f32) -> Vec<GameEvent> {
        let runnable = !self.world.is_paused && !self.world.is_over();
        if runnable && delta.is_finite() && delta > 0.0 {
            self.step(delta.min(self.tuning.max_frame_delta));
        }
        self.world.take_events()
    }

    fn step(&mut self, dt: f32) {
        let world = &mut self.world;
        let tuning = &self.tuning;

        world.elapsed += dt;

        update_player(world, &self.input, tuning, dt);
        world.bullets.step(dt, tuning);
        update_enemies(world, tuning, dt);
        update_boss(world, tuning, dt);
        update_powerups(world, tuning, dt);
        resolve_collisions(world, tuning);

        if !world.is_over() {
            direct_spawns(world, tuning, dt);
        }
    }

    /// Record a key edge. Pause toggles and bombs fire on the press only.
    pub fn set_input(&mut self, action: InputAction, pressed: bool) {
        let rising = pressed && !self.input.get(action);
        self.input.set(action, pressed);
        if !rising || self.world.is_over() {
            return;
        }

        match action {
            InputAction::Pause => {
                self.world.is_paused = !self.world.is_paused;
                log::debug!("Paused: {}", self.world.is_paused);
            }
            InputAction::Bomb if !self.world.is_paused => {
                use_bomb(&mut self.world, &self.tuning);
            }
            _ => {}
        }
    }

    /// Feed a whole input frame, issuing `set_input` for each changed action
    pub fn apply_input(&mut self, next: InputState) {
        for action in InputAction::ALL {
            let pressed = next.get(action);
            if pressed != self.input.get(action) {
                self.set_input(action, pressed);
            }
        }
    }

    pub fn input(&self) -> &InputState {
        &self.input
    }

    /// The player is always returned, including after death; check
    /// [`Player::active`] to tell a destroyed ship apart
    pub fn player(&self) -> &Player {
        &self.world.player
    }

    /// Live enemies only
    pub fn enemies(&self) -> impl Iterator<Item = &Enemy> {
        self.world.enemies.iter().filter(|e| e.active)
    }

    /// Live bullets only
    pub fn bullets(&self) -> impl Iterator<Item = &Bullet> {
        self.world.bullets.iter()
    }

    pub fn bullet_pool(&self) -> &BulletPool {
        &self.world.bullets
    }

    pub fn boss(&self) -> Option<&Boss> {
        self.world.active_boss()
    }

    /// Live powerups only
    pub fn powerups(&self) -> impl Iterator<Item = &PowerUp> {
        self.world.powerups.iter().filter(|p| p.active)
    }

    pub fn game_state(&self) -> GameState {
        self.world.snapshot()
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    /// Direct access for scripted setups and tooling
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Drain queued events without stepping
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        self.world.take_events()
    }

    /// Start a fresh run, keeping the bullet storage and the RNG stream
    pub fn restart(&mut self) {
        self.world.reset(&self.tuning);
        self.input = InputState::default();
        log::info!("Run restarted");
    }

    /// Start a fresh run with a reseeded generator
    pub fn restart_with_seed(&mut self, seed: u64) {
        self.restart();
        self.world.rng = Pcg32::seed_from_u64(seed);
    }
}

/// Powerups fall at their own speed and expire past the bottom
fn update_powerups(world: &mut World, tuning: &Tuning, dt: f32) {
    let exit_y = tuning.field_height + tuning.powerup_exit_margin;
    for powerup in world.powerups.iter_mut().filter(|p| p.active) {
        powerup.pos.y += powerup.velocity_y * dt;
        if powerup.pos.y > exit_y {
            powerup.active = false;
        }
    }
}
