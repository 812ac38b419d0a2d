//! Simulation state, run statistics and the read-only snapshot
//!
//! `World` is the single owner of every mutable actor. Systems borrow it for
//! the duration of one step; collaborators only ever see [`GameState`]
//! snapshots and [`GameEvent`]s.

use glam::Vec2;
use rand::SeedableRng;
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::entity::{Boss, BossKind, Enemy, EnemyKind, Player, PowerUp, PowerUpKind};
use super::pool::BulletPool;
use super::spawn::SpawnDirector;
use crate::tuning::Tuning;

/// Counters reported with the final result
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunStats {
    pub enemies_destroyed: u32,
    pub powerups_collected: u32,
    pub hits_received: u32,
    pub boss_damage_dealt: u64,
}

/// Final run record, also the payload handed to leaderboard submission
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameResult {
    pub score: u64,
    pub phase: u32,
    /// Whole seconds
    pub time: u32,
    pub powerups_collected: u32,
    pub hits_received: u32,
    pub enemies_destroyed: u32,
    pub boss_damage_dealt: u64,
}

/// Domain events produced by a step
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    /// The phase boss will arrive after the warning delay
    BossWarning { phase: u32, boss: BossKind },
    GameOver(GameResult),
    Victory(GameResult),
}

/// Boss view inside a [`GameState`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BossSnapshot {
    pub kind: BossKind,
    pub name: String,
    pub pos: Vec2,
    pub health: i32,
    pub max_health: i32,
    /// Derived attack stage (1..=3)
    pub phase: u32,
}

/// Read-only aggregate view of a run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub score: u64,
    pub phase: u32,
    pub player_health: u32,
    pub player_max_health: u32,
    pub weapon_level: u8,
    pub bombs: u32,
    pub boss: Option<BossSnapshot>,
    pub is_paused: bool,
    pub is_game_over: bool,
    pub is_victory: bool,
    /// Elapsed whole seconds
    pub time: u32,
    /// Waves launched in the current phase
    pub current_wave: u32,
    pub stats: RunStats,
}

impl GameState {
    /// The result record as it stands now
    pub fn result(&self) -> GameResult {
        GameResult {
            score: self.score,
            phase: self.phase,
            time: self.time,
            powerups_collected: self.stats.powerups_collected,
            hits_received: self.stats.hits_received,
            enemies_destroyed: self.stats.enemies_destroyed,
            boss_damage_dealt: self.stats.boss_damage_dealt,
        }
    }
}

/// All mutable simulation state for one run
#[derive(Debug, Clone)]
pub struct World {
    pub player: Player,
    pub bullets: BulletPool,
    /// Registry; inactive slots are reused by later spawns
    pub enemies: Vec<Enemy>,
    pub powerups: Vec<PowerUp>,
    pub boss: Option<Boss>,
    pub director: SpawnDirector,
    pub score: u64,
    /// Run phase (1-based)
    pub phase: u32,
    /// Kills made during the current phase
    pub phase_kills: u32,
    pub stats: RunStats,
    /// Seconds simulated so far
    pub elapsed: f32,
    pub is_paused: bool,
    pub is_game_over: bool,
    pub is_victory: bool,
    pub rng: Pcg32,
    /// Events not yet handed to the caller
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl World {
    pub fn new(tuning: &Tuning, seed: u64) -> Self {
        let mut world = Self {
            player: Player::new(0, tuning),
            bullets: BulletPool::new(tuning.bullet_pool_capacity),
            enemies: Vec::new(),
            powerups: Vec::new(),
            boss: None,
            director: SpawnDirector::default(),
            score: 0,
            phase: 1,
            phase_kills: 0,
            stats: RunStats::default(),
            elapsed: 0.0,
            is_paused: false,
            is_game_over: false,
            is_victory: false,
            rng: Pcg32::seed_from_u64(seed),
            events: Vec::new(),
            next_id: 1,
        };
        world.player.id = world.next_entity_id();
        world
    }

    /// Back to a fresh run, keeping the bullet storage and RNG stream
    pub fn reset(&mut self, tuning: &Tuning) {
        self.next_id = 1;
        self.player = Player::new(0, tuning);
        self.player.id = self.next_entity_id();
        self.bullets.release_all();
        self.enemies.clear();
        self.powerups.clear();
        self.boss = None;
        self.director = SpawnDirector::default();
        self.score = 0;
        self.phase = 1;
        self.phase_kills = 0;
        self.stats = RunStats::default();
        self.elapsed = 0.0;
        self.is_paused = false;
        self.is_game_over = false;
        self.is_victory = false;
        self.events.clear();
    }

    /// Allocate a new entity ID
    pub fn next_entity_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    /// Whether a terminal transition has happened
    #[inline]
    pub fn is_over(&self) -> bool {
        self.is_game_over || self.is_victory
    }

    /// The boss, if one is present and alive
    pub fn active_boss(&self) -> Option<&Boss> {
        self.boss.as_ref().filter(|b| b.active)
    }

    /// Place a new enemy, reusing an inactive registry slot when possible
    pub fn spawn_enemy(&mut self, kind: EnemyKind, pos: Vec2, fire_timer: f32) -> u32 {
        let id = self.next_entity_id();
        let bonus = if kind.scales_with_phase() {
            self.phase as i32
        } else {
            0
        };
        let enemy = Enemy::new(id, kind, pos, bonus, fire_timer);
        match self.enemies.iter_mut().find(|e| !e.active) {
            Some(slot) => *slot = enemy,
            None => self.enemies.push(enemy),
        }
        id
    }

    /// Place a falling powerup, reusing an inactive registry slot when possible
    pub fn spawn_powerup(&mut self, kind: PowerUpKind, pos: Vec2) -> u32 {
        let id = self.next_entity_id();
        let powerup = PowerUp::new(id, kind, pos);
        match self.powerups.iter_mut().find(|p| !p.active) {
            Some(slot) => *slot = powerup,
            None => self.powerups.push(powerup),
        }
        id
    }

    /// Live enemies of one kind
    pub fn count_enemies(&self, kind: EnemyKind) -> usize {
        self.enemies
            .iter()
            .filter(|e| e.active && e.kind == kind)
            .count()
    }

    /// Hand every queued event to the caller
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> GameState {
        GameState {
            score: self.score,
            phase: self.phase,
            player_health: self.player.health,
            player_max_health: self.player.max_health,
            weapon_level: self.player.weapon_level,
            bombs: self.player.bombs,
            boss: self.active_boss().map(|boss| BossSnapshot {
                kind: boss.kind,
                name: boss.name().to_string(),
                pos: boss.pos,
                health: boss.health,
                max_health: boss.max_health,
                phase: boss.phase().number(),
            }),
            is_paused: self.is_paused,
            is_game_over: self.is_game_over,
            is_victory: self.is_victory,
            time: self.elapsed.floor() as u32,
            current_wave: self.director.waves_spawned,
            stats: self.stats,
        }
    }
}
