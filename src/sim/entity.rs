//! Actor types and their static configuration tables
//!
//! Each closed enum carries a `params()` record so adding an enemy or boss is
//! a table entry, not a new branch in every system.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::tuning::Tuning;

/// Movement behaviour bound to an enemy kind
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MovePattern {
    /// Constant downward velocity
    Straight,
    /// Downward drift plus horizontal oscillation around `base_x`
    Sine,
    /// Velocity re-aimed at the player every frame
    Chase,
    /// Slow downward drift, no steering
    Stationary,
    /// Descends to the hold line, then shadows the player horizontally
    Aggressive,
    /// Descends to the hold line, then sways slowly around `base_x`
    Defensive,
}

/// Bullet pattern emitted when an enemy's fire timer elapses
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum FirePattern {
    None,
    /// One bullet straight down
    Single,
    /// Two bullets splayed by the player's horizontal bearing
    TwinSpread,
    /// Three bullets fanning outward
    TripleSpread,
    /// Evenly spaced ring
    Radial { count: u32, speed_factor: f32 },
    /// Fan of shots centred on the player
    AimedFan { count: u32, spread: f32 },
}

/// Static per-kind enemy configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct EnemyParams {
    pub width: f32,
    pub height: f32,
    pub health: i32,
    /// Seconds between volleys (0 disables firing)
    pub fire_rate: f32,
    pub movement: MovePattern,
    pub fire: FirePattern,
    pub points: u64,
}

/// Enemy kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EnemyKind {
    A,
    B,
    C,
    D,
    E,
    SubBossLight,
    SubBossHeavy,
    MinionFighter,
    MinionBomber,
}

impl EnemyKind {
    pub const ALL: [EnemyKind; 9] = [
        EnemyKind::A,
        EnemyKind::B,
        EnemyKind::C,
        EnemyKind::D,
        EnemyKind::E,
        EnemyKind::SubBossLight,
        EnemyKind::SubBossHeavy,
        EnemyKind::MinionFighter,
        EnemyKind::MinionBomber,
    ];

    pub const fn params(self) -> EnemyParams {
        match self {
            EnemyKind::A => EnemyParams {
                width: 40.0,
                height: 40.0,
                health: 1,
                fire_rate: 2.0,
                movement: MovePattern::Straight,
                fire: FirePattern::Single,
                points: 100,
            },
            EnemyKind::B => EnemyParams {
                width: 45.0,
                height: 45.0,
                health: 2,
                fire_rate: 1.5,
                movement: MovePattern::Sine,
                fire: FirePattern::TwinSpread,
                points: 150,
            },
            EnemyKind::C => EnemyParams {
                width: 60.0,
                height: 60.0,
                health: 5,
                fire_rate: 2.5,
                movement: MovePattern::Straight,
                fire: FirePattern::TripleSpread,
                points: 300,
            },
            EnemyKind::D => EnemyParams {
                width: 50.0,
                height: 50.0,
                health: 3,
                fire_rate: 1.0,
                movement: MovePattern::Stationary,
                fire: FirePattern::Radial {
                    count: 8,
                    speed_factor: 0.7,
                },
                points: 200,
            },
            EnemyKind::E => EnemyParams {
                width: 35.0,
                height: 35.0,
                health: 1,
                fire_rate: 0.0,
                movement: MovePattern::Chase,
                fire: FirePattern::None,
                points: 250,
            },
            EnemyKind::SubBossLight => EnemyParams {
                width: 80.0,
                height: 80.0,
                health: 25,
                fire_rate: 0.8,
                movement: MovePattern::Aggressive,
                fire: FirePattern::AimedFan {
                    count: 3,
                    spread: 0.25,
                },
                points: 1500,
            },
            EnemyKind::SubBossHeavy => EnemyParams {
                width: 100.0,
                height: 100.0,
                health: 50,
                fire_rate: 1.2,
                movement: MovePattern::Defensive,
                fire: FirePattern::Radial {
                    count: 12,
                    speed_factor: 0.6,
                },
                points: 3000,
            },
            EnemyKind::MinionFighter => EnemyParams {
                width: 35.0,
                height: 35.0,
                health: 8,
                fire_rate: 1.0,
                movement: MovePattern::Sine,
                fire: FirePattern::TwinSpread,
                points: 200,
            },
            EnemyKind::MinionBomber => EnemyParams {
                width: 40.0,
                height: 40.0,
                health: 10,
                fire_rate: 1.5,
                movement: MovePattern::Straight,
                fire: FirePattern::TripleSpread,
                points: 250,
            },
        }
    }

    /// Regular wave kinds scale their health with the run phase
    pub fn scales_with_phase(self) -> bool {
        matches!(
            self,
            EnemyKind::A | EnemyKind::B | EnemyKind::C | EnemyKind::D | EnemyKind::E
        )
    }

    pub fn is_sub_boss(self) -> bool {
        matches!(self, EnemyKind::SubBossLight | EnemyKind::SubBossHeavy)
    }

    pub fn is_minion(self) -> bool {
        matches!(self, EnemyKind::MinionFighter | EnemyKind::MinionBomber)
    }
}

/// An enemy entity
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Enemy {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub kind: EnemyKind,
    pub health: i32,
    pub max_health: i32,
    pub fire_timer: f32,
    pub fire_rate: f32,
    pub movement: MovePattern,
    pub fire: FirePattern,
    /// Drives the movement pattern's phase
    pub move_timer: f32,
    /// Oscillation centre for sine/defensive movement
    pub base_x: f32,
    pub points: u64,
}

impl Enemy {
    pub fn new(id: u32, kind: EnemyKind, pos: Vec2, bonus_health: i32, fire_timer: f32) -> Self {
        let params = kind.params();
        let health = params.health + bonus_health;
        Self {
            id,
            pos,
            size: Vec2::new(params.width, params.height),
            active: true,
            kind,
            health,
            max_health: health,
            fire_timer,
            fire_rate: params.fire_rate,
            movement: params.movement,
            fire: params.fire,
            move_timer: 0.0,
            base_x: pos.x,
            points: params.points,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }
}

/// The player's ship
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub health: u32,
    pub max_health: u32,
    /// Selects the fire pattern (1..=4)
    pub weapon_level: u8,
    pub bombs: u32,
    pub invulnerable: bool,
    pub invulnerable_timer: f32,
    pub fire_timer: f32,
}

impl Player {
    pub fn new(id: u32, tuning: &Tuning) -> Self {
        Self {
            id,
            pos: Vec2::new(
                tuning.field_width / 2.0,
                tuning.field_height - PLAYER_SPAWN_OFFSET,
            ),
            size: Vec2::new(PLAYER_WIDTH, PLAYER_HEIGHT),
            active: true,
            health: tuning.player_max_health,
            max_health: tuning.player_max_health,
            weapon_level: 1,
            bombs: tuning.player_starting_bombs,
            invulnerable: false,
            invulnerable_timer: 0.0,
            fire_timer: 0.0,
        }
    }

    /// Damage hitbox radius, deliberately smaller than the sprite
    #[inline]
    pub fn hit_radius(&self, hitbox_ratio: f32) -> f32 {
        self.size.x * hitbox_ratio / 2.0
    }

    /// Pickups use the full sprite width
    #[inline]
    pub fn pickup_radius(&self) -> f32 {
        self.size.x / 2.0
    }

    pub fn grant_invulnerability(&mut self, duration: f32) {
        self.invulnerable = true;
        self.invulnerable_timer = duration;
    }
}

/// Boss attack intensity, derived from remaining health
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub enum BossPhase {
    One,
    Two,
    Three,
}

impl BossPhase {
    /// Above 66% health: phase 1, above 33%: phase 2, otherwise phase 3
    pub fn from_health(health: i32, max_health: i32) -> Self {
        let ratio = if max_health > 0 {
            health as f32 / max_health as f32
        } else {
            0.0
        };
        if ratio > 0.66 {
            BossPhase::One
        } else if ratio > 0.33 {
            BossPhase::Two
        } else {
            BossPhase::Three
        }
    }

    pub fn number(self) -> u32 {
        match self {
            BossPhase::One => 1,
            BossPhase::Two => 2,
            BossPhase::Three => 3,
        }
    }

    /// Seconds between attacks
    pub fn attack_interval(self) -> f32 {
        match self {
            BossPhase::One => 1.5,
            BossPhase::Two => 1.0,
            BossPhase::Three => 0.7,
        }
    }
}

/// Escorts a boss launches during its fight
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MinionWing {
    pub kind: EnemyKind,
    /// Most escorts alive at once
    pub count: u32,
    pub interval: f32,
}

/// Static per-kind boss configuration
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BossParams {
    pub name: &'static str,
    pub width: f32,
    pub height: f32,
    pub health: i32,
    pub minions: Option<MinionWing>,
}

/// Boss kinds, one per run phase
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossKind {
    Cruiser,
    Fortress,
    Dreadnought,
}

impl BossKind {
    pub const ALL: [BossKind; 3] = [BossKind::Cruiser, BossKind::Fortress, BossKind::Dreadnought];

    pub const fn params(self) -> BossParams {
        match self {
            BossKind::Cruiser => BossParams {
                name: "CRUISER",
                width: 180.0,
                height: 120.0,
                health: 500,
                minions: None,
            },
            BossKind::Fortress => BossParams {
                name: "FORTRESS",
                width: 220.0,
                height: 150.0,
                health: 1200,
                minions: Some(MinionWing {
                    kind: EnemyKind::MinionFighter,
                    count: 4,
                    interval: 4.0,
                }),
            },
            BossKind::Dreadnought => BossParams {
                name: "DREADNOUGHT",
                width: 280.0,
                height: 180.0,
                health: 3000,
                minions: Some(MinionWing {
                    kind: EnemyKind::MinionBomber,
                    count: 5,
                    interval: 5.0,
                }),
            },
        }
    }

    pub fn name(self) -> &'static str {
        self.params().name
    }
}

/// The phase boss
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Boss {
    pub id: u32,
    pub kind: BossKind,
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub health: i32,
    pub max_health: i32,
    pub attack_timer: f32,
    pub move_timer: f32,
    /// +1 or -1, flipped when the boss reaches a side of the field
    pub move_direction: f32,
    /// Still sliding down to its hold line
    pub entering: bool,
    pub minion_timer: f32,
}

impl Boss {
    pub fn new(id: u32, kind: BossKind, pos: Vec2) -> Self {
        let params = kind.params();
        Self {
            id,
            kind,
            pos,
            size: Vec2::new(params.width, params.height),
            active: true,
            health: params.health,
            max_health: params.health,
            attack_timer: 0.0,
            move_timer: 0.0,
            move_direction: 1.0,
            entering: true,
            minion_timer: 0.0,
        }
    }

    /// Always derived from health, never stored
    pub fn phase(&self) -> BossPhase {
        BossPhase::from_health(self.health, self.max_health)
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }

    /// Where the boss's cannons fire from
    pub fn muzzle(&self) -> Vec2 {
        self.pos + Vec2::new(0.0, self.size.y / 2.0)
    }
}

/// Power-up types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum PowerUpKind {
    Weapon,
    Shield,
    Bomb,
    Heal,
    Score,
}

impl PowerUpKind {
    pub const ALL: [PowerUpKind; 5] = [
        PowerUpKind::Weapon,
        PowerUpKind::Shield,
        PowerUpKind::Bomb,
        PowerUpKind::Heal,
        PowerUpKind::Score,
    ];
}

/// A falling power-up
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerUp {
    pub id: u32,
    pub pos: Vec2,
    pub size: Vec2,
    pub active: bool,
    pub kind: PowerUpKind,
    pub velocity_y: f32,
}

impl PowerUp {
    pub fn new(id: u32, kind: PowerUpKind, pos: Vec2) -> Self {
        Self {
            id,
            pos,
            size: Vec2::splat(POWERUP_SIZE),
            active: true,
            kind,
            velocity_y: POWERUP_FALL_SPEED,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.size.x / 2.0
    }
}
