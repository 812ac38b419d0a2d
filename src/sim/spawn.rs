//! Spawn direction: waves, scripted sub-bosses, periodic powerups and the
//! boss warning sequence
//!
//! The director runs in one of three stages per phase:
//! 1. waves, until the phase's kill threshold is met
//! 2. warning, a fixed grace period with no new enemies
//! 3. boss, no spawns until the encounter resolves and
//!    [`SpawnDirector::reset_for_phase`] is called

use glam::Vec2;
use rand::Rng;
use rand_pcg::Pcg32;

use super::boss::spawn_boss;
use super::entity::{BossKind, EnemyKind, PowerUpKind};
use super::state::{GameEvent, World};
use crate::consts::{ENEMY_SPAWN_INSET, ENEMY_SPAWN_Y, POWERUP_SIZE};
use crate::tuning::Tuning;

/// A sub-boss that replaces one scripted wave
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SubBossWave {
    pub kind: EnemyKind,
    /// Zero-based wave number within the phase
    pub wave_index: u32,
}

/// Static per-phase spawn configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PhaseParams {
    pub boss: BossKind,
    /// Kills within the phase before the boss is called in
    pub boss_trigger_kills: u32,
    /// Seconds between waves
    pub wave_interval: f32,
    /// Uniform pick; repeats weight a kind
    pub roster: &'static [EnemyKind],
    pub sub_boss: Option<SubBossWave>,
    /// Seconds between periodic powerups
    pub powerup_interval: f32,
}

static PHASES: [PhaseParams; 3] = [
    PhaseParams {
        boss: BossKind::Cruiser,
        boss_trigger_kills: 20,
        wave_interval: 1.7,
        roster: &[EnemyKind::A, EnemyKind::A, EnemyKind::B],
        sub_boss: None,
        powerup_interval: 8.0,
    },
    PhaseParams {
        boss: BossKind::Fortress,
        boss_trigger_kills: 25,
        wave_interval: 1.4,
        roster: &[
            EnemyKind::A,
            EnemyKind::B,
            EnemyKind::B,
            EnemyKind::C,
            EnemyKind::D,
        ],
        sub_boss: Some(SubBossWave {
            kind: EnemyKind::SubBossLight,
            wave_index: 2,
        }),
        powerup_interval: 7.0,
    },
    PhaseParams {
        boss: BossKind::Dreadnought,
        boss_trigger_kills: 30,
        wave_interval: 1.1,
        roster: &[
            EnemyKind::A,
            EnemyKind::B,
            EnemyKind::C,
            EnemyKind::D,
            EnemyKind::E,
        ],
        sub_boss: Some(SubBossWave {
            kind: EnemyKind::SubBossHeavy,
            wave_index: 3,
        }),
        powerup_interval: 6.0,
    },
];

/// Parameters for a run phase; phases past the table reuse the last entry
pub fn phase_params(phase: u32) -> &'static PhaseParams {
    let index = (phase.max(1) as usize - 1).min(PHASES.len() - 1);
    &PHASES[index]
}

/// Wave and boss sequencing state for the current phase
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SpawnDirector {
    /// Wave cadence, reused as the warning countdown
    pub wave_timer: f32,
    pub powerup_timer: f32,
    pub waves_spawned: u32,
    pub boss_warning_triggered: bool,
    pub boss_spawned: bool,
}

impl SpawnDirector {
    /// Clear every per-phase flag and timer after a boss is defeated
    pub fn reset_for_phase(&mut self) {
        *self = Self::default();
    }
}

/// Run the director for one step
pub fn direct_spawns(world: &mut World, tuning: &Tuning, dt: f32) {
    if world.director.boss_spawned {
        return;
    }
    let params = phase_params(world.phase);

    if tuning.periodic_powerups && world.boss.is_none() {
        world.director.powerup_timer += dt;
        if world.director.powerup_timer >= params.powerup_interval {
            world.director.powerup_timer = 0.0;
            drop_powerup(world, tuning);
        }
    }

    if world.director.boss_warning_triggered {
        world.director.wave_timer += dt;
        if world.director.wave_timer >= tuning.boss_warning_delay {
            world.director.boss_spawned = true;
            spawn_boss(world, tuning, params.boss);
        }
        return;
    }

    if world.phase_kills >= params.boss_trigger_kills {
        let director = &mut world.director;
        director.boss_warning_triggered = true;
        director.wave_timer = 0.0;
        log::info!(
            "Boss warning: {} approaching (phase {})",
            params.boss.name(),
            world.phase
        );
        world.events.push(GameEvent::BossWarning {
            phase: world.phase,
            boss: params.boss,
        });
        return;
    }

    world.director.wave_timer += dt;
    if world.director.wave_timer >= params.wave_interval {
        world.director.wave_timer = 0.0;
        spawn_wave(world, tuning, params);
    }
}

/// Launch the next wave, or the phase's sub-boss when its turn comes up
pub fn spawn_wave(world: &mut World, tuning: &Tuning, params: &PhaseParams) {
    let wave = world.director.waves_spawned;
    world.director.waves_spawned += 1;

    if let Some(sub) = params.sub_boss.filter(|s| s.wave_index == wave) {
        let pos = Vec2::new(tuning.field_width / 2.0, ENEMY_SPAWN_Y);
        spawn_with_jitter(world, sub.kind, pos);
        log::debug!("Wave {}: sub-boss {:?}", wave, sub.kind);
        return;
    }

    let count = 3 + world.rng.random_range(0..2 + world.phase);
    for _ in 0..count {
        let kind = params.roster[world.rng.random_range(0..params.roster.len())];
        let x = random_x(&mut world.rng, tuning);
        spawn_with_jitter(world, kind, Vec2::new(x, ENEMY_SPAWN_Y));
    }
    log::debug!("Wave {}: {} enemies", wave, count);
}

/// Stagger first shots so a wave does not fire in unison
fn spawn_with_jitter(world: &mut World, kind: EnemyKind, pos: Vec2) {
    let rate = kind.params().fire_rate;
    let fire_timer = if rate > 0.0 {
        world.rng.random_range(0.0..rate)
    } else {
        0.0
    };
    world.spawn_enemy(kind, pos, fire_timer);
}

fn drop_powerup(world: &mut World, tuning: &Tuning) {
    let kind = PowerUpKind::ALL[world.rng.random_range(0..PowerUpKind::ALL.len())];
    let x = random_x(&mut world.rng, tuning);
    world.spawn_powerup(kind, Vec2::new(x, -POWERUP_SIZE));
}

/// Horizontal spawn position inset from both walls
fn random_x(rng: &mut Pcg32, tuning: &Tuning) -> f32 {
    let (lo, hi) = (ENEMY_SPAWN_INSET, tuning.field_width - ENEMY_SPAWN_INSET);
    if hi > lo {
        rng.random_range(lo..hi)
    } else {
        tuning.field_width / 2.0
    }
}
