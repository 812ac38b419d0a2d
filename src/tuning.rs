//! Game balance configuration
//!
//! Every value the simulation treats as "configured" lives here so a run can
//! be rebalanced from JSON without touching code. Per-type actor data (enemy
//! and boss tables) stays with the actor types in `sim::entity`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;
use crate::sim::{BossKind, EnemyKind};

/// Balance and rule configuration for one engine instance
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // === Play field ===
    pub field_width: f32,
    pub field_height: f32,

    // === Player ===
    pub player_speed: f32,
    /// Seconds between volleys
    pub player_fire_interval: f32,
    /// Fraction of the player's width used as the damage hitbox diameter
    pub player_hitbox_ratio: f32,
    pub player_max_health: u32,
    /// Invulnerability granted after taking a hit
    pub player_invulnerable_time: f32,
    pub player_starting_bombs: u32,
    pub max_weapon_level: u8,
    /// Cap on the bomb granted for a boss kill; pickups ignore it
    pub max_bombs: u32,

    // === Bullets ===
    pub bullet_pool_capacity: usize,
    pub player_bullet_speed: f32,
    pub enemy_bullet_speed: f32,
    /// Distance past the field edge before a bullet is culled
    pub bullet_cull_margin: f32,

    // === Enemies and pickups ===
    /// Distance past the bottom edge before an enemy leaves play
    pub enemy_exit_margin: f32,
    pub powerup_exit_margin: f32,
    /// Chance a destroyed enemy drops a powerup
    pub powerup_drop_chance: f32,
    /// Drop a powerup every phase interval while no boss is present
    pub periodic_powerups: bool,

    // === Combat ===
    /// Damage dealt to an enemy that rams the player
    pub body_contact_damage: i32,
    pub bomb_enemy_damage: i32,
    pub bomb_boss_damage: i32,
    pub bomb_score_bonus: u64,
    pub score_powerup_bonus: u64,
    pub shield_duration: f32,

    // === Progression ===
    /// Multiplied by the phase number on boss defeat
    pub boss_defeat_bonus: u64,
    /// Grace period between the boss warning and the boss spawn
    pub boss_warning_delay: f32,
    /// Defeating this phase's boss wins the run
    pub final_phase: u32,
    /// Bosses with a minion wing launch escorts during the fight
    pub boss_minions: bool,

    // === Frame clock ===
    /// Longest delta integrated in one update
    pub max_frame_delta: f32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            field_width: GAME_WIDTH,
            field_height: GAME_HEIGHT,

            player_speed: PLAYER_SPEED,
            player_fire_interval: PLAYER_FIRE_INTERVAL,
            player_hitbox_ratio: PLAYER_HITBOX_RATIO,
            player_max_health: PLAYER_MAX_HEALTH,
            player_invulnerable_time: PLAYER_INVULNERABLE_TIME,
            player_starting_bombs: PLAYER_STARTING_BOMBS,
            max_weapon_level: MAX_WEAPON_LEVEL,
            max_bombs: MAX_BOMBS,

            bullet_pool_capacity: BULLET_POOL_SIZE,
            player_bullet_speed: BULLET_SPEED_PLAYER,
            enemy_bullet_speed: BULLET_SPEED_ENEMY,
            bullet_cull_margin: BULLET_CULL_MARGIN,

            enemy_exit_margin: ENEMY_EXIT_MARGIN,
            powerup_exit_margin: POWERUP_EXIT_MARGIN,
            powerup_drop_chance: POWERUP_DROP_CHANCE,
            periodic_powerups: true,

            body_contact_damage: BODY_CONTACT_DAMAGE,
            bomb_enemy_damage: BOMB_ENEMY_DAMAGE,
            bomb_boss_damage: BOMB_BOSS_DAMAGE,
            bomb_score_bonus: BOMB_SCORE_BONUS,
            score_powerup_bonus: SCORE_POWERUP_BONUS,
            shield_duration: SHIELD_DURATION,

            boss_defeat_bonus: BOSS_DEFEAT_BONUS,
            boss_warning_delay: BOSS_WARNING_DELAY,
            final_phase: FINAL_PHASE,
            boss_minions: false,

            max_frame_delta: MAX_FRAME_DELTA,
        }
    }
}

impl Tuning {
    /// Parse tuning from JSON; missing fields take their defaults
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("field_width", self.field_width)?;
        positive("field_height", self.field_height)?;
        positive("player_speed", self.player_speed)?;
        positive("player_fire_interval", self.player_fire_interval)?;
        positive("player_bullet_speed", self.player_bullet_speed)?;
        positive("enemy_bullet_speed", self.enemy_bullet_speed)?;
        positive("max_frame_delta", self.max_frame_delta)?;
        non_negative("player_invulnerable_time", self.player_invulnerable_time)?;
        non_negative("shield_duration", self.shield_duration)?;
        non_negative("boss_warning_delay", self.boss_warning_delay)?;
        non_negative("bullet_cull_margin", self.bullet_cull_margin)?;
        non_negative("enemy_exit_margin", self.enemy_exit_margin)?;
        non_negative("powerup_exit_margin", self.powerup_exit_margin)?;

        let min_width = min_field_width();
        if self.field_width < min_width {
            return Err(ConfigError::invalid(
                "field_width",
                format!("{} is narrower than the widest actor ({min_width})", self.field_width),
            ));
        }
        let min_height = PLAYER_SPAWN_OFFSET + PLAYER_HEIGHT;
        if self.field_height < min_height {
            return Err(ConfigError::invalid(
                "field_height",
                format!("{} leaves no room for the player (needs {min_height})", self.field_height),
            ));
        }
        non_negative_damage("body_contact_damage", self.body_contact_damage)?;
        non_negative_damage("bomb_enemy_damage", self.bomb_enemy_damage)?;
        non_negative_damage("bomb_boss_damage", self.bomb_boss_damage)?;

        if self.player_hitbox_ratio <= 0.0 || self.player_hitbox_ratio > 1.0 {
            return Err(ConfigError::invalid(
                "player_hitbox_ratio",
                format!("{} is outside (0, 1]", self.player_hitbox_ratio),
            ));
        }
        if !(0.0..=1.0).contains(&self.powerup_drop_chance) {
            return Err(ConfigError::invalid(
                "powerup_drop_chance",
                format!("{} is outside [0, 1]", self.powerup_drop_chance),
            ));
        }
        if self.bullet_pool_capacity == 0 {
            return Err(ConfigError::invalid("bullet_pool_capacity", "must be at least 1"));
        }
        if self.player_max_health == 0 {
            return Err(ConfigError::invalid("player_max_health", "must be at least 1"));
        }
        if !(1..=MAX_WEAPON_LEVEL).contains(&self.max_weapon_level) {
            return Err(ConfigError::invalid(
                "max_weapon_level",
                format!("{} is outside 1..={MAX_WEAPON_LEVEL}", self.max_weapon_level),
            ));
        }
        if !(1..=FINAL_PHASE).contains(&self.final_phase) {
            return Err(ConfigError::invalid(
                "final_phase",
                format!("{} is outside 1..={FINAL_PHASE}", self.final_phase),
            ));
        }
        if self.player_starting_bombs > self.max_bombs {
            return Err(ConfigError::invalid(
                "player_starting_bombs",
                format!("{} exceeds max_bombs {}", self.player_starting_bombs, self.max_bombs),
            ));
        }
        Ok(())
    }

    /// Play-field size as a vector
    pub fn field(&self) -> Vec2 {
        Vec2::new(self.field_width, self.field_height)
    }

    /// Whether a point lies inside the field grown by `margin` on every side
    pub fn in_field(&self, pos: Vec2, margin: f32) -> bool {
        pos.x >= -margin
            && pos.x <= self.field_width + margin
            && pos.y >= -margin
            && pos.y <= self.field_height + margin
    }
}

/// Narrowest field that fits every actor between the side walls
fn min_field_width() -> f32 {
    BossKind::ALL
        .iter()
        .map(|kind| kind.params().width)
        .chain(EnemyKind::ALL.iter().map(|kind| kind.params().width))
        .fold(PLAYER_WIDTH, f32::max)
}

fn non_negative_damage(field: &'static str, value: i32) -> Result<(), ConfigError> {
    if value >= 0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} would heal the target")))
    }
}

fn positive(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must be positive")))
    }
}

fn non_negative(field: &'static str, value: f32) -> Result<(), ConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ConfigError::invalid(field, format!("{value} must not be negative")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_valid() {
        assert!(Tuning::default().validate().is_ok());
    }

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning = Tuning::from_json(r#"{ "bullet_pool_capacity": 64, "boss_minions": true }"#)
            .expect("partial tuning should parse");
        assert_eq!(tuning.bullet_pool_capacity, 64);
        assert!(tuning.boss_minions);
        assert_eq!(tuning.field_width, GAME_WIDTH);
        assert_eq!(tuning.player_max_health, PLAYER_MAX_HEALTH);
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = Tuning::from_json(r#"{ "final_phase": 7 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "final_phase", .. }));

        let err = Tuning::from_json(r#"{ "bullet_pool_capacity": 0 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bullet_pool_capacity", .. }));

        let err = Tuning::from_json(r#"{ "player_hitbox_ratio": 1.5 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "player_hitbox_ratio", .. }));
    }

    #[test]
    fn test_rejects_field_narrower_than_actors() {
        let err = Tuning::from_json(r#"{ "field_width": 90 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "field_width", .. }));

        // The dreadnought is the widest actor
        let width = BossKind::Dreadnought.params().width;
        assert_eq!(min_field_width(), width);
        let exact = format!(r#"{{ "field_width": {width} }}"#);
        assert!(Tuning::from_json(&exact).is_ok());

        let err = Tuning::from_json(r#"{ "field_height": 100 }"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "field_height", .. }));
    }

    #[test]
    fn test_rejects_negative_damage() {
        for field in ["body_contact_damage", "bomb_enemy_damage", "bomb_boss_damage"] {
            let json = format!(r#"{{ "{field}": -1000 }}"#);
            let err = Tuning::from_json(&json).unwrap_err();
            assert!(
                matches!(err, ConfigError::Invalid { field: f, .. } if f == field),
                "{field} accepted a negative value"
            );
        }
        assert!(Tuning::from_json(r#"{ "bomb_boss_damage": 0 }"#).is_ok());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = Tuning::from_json("{ not json").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
        assert!(err.to_string().starts_with("invalid json"));
    }

    #[test]
    fn test_json_round_trip_preserves_values() {
        let mut tuning = Tuning::default();
        tuning.final_phase = 2;
        let json = tuning.to_json().unwrap();
        assert_eq!(Tuning::from_json(&json).unwrap(), tuning);
    }

    #[test]
    fn test_in_field_margin() {
        let tuning = Tuning::default();
        assert!(tuning.in_field(Vec2::new(-10.0, 100.0), 20.0));
        assert!(!tuning.in_field(Vec2::new(-30.0, 100.0), 20.0));
        assert!(!tuning.in_field(Vec2::new(100.0, GAME_HEIGHT + 21.0), 20.0));
    }
}
