//! Scoring and progression
//!
//! Every score change and every phase or terminal transition goes through
//! this module so the rules live in one place.

use rand::Rng;

use super::entity::PowerUpKind;
use super::state::{GameEvent, GameResult, World};
use crate::tuning::Tuning;

/// Apply damage to the enemy at `index`, destroying it at zero health.
/// Returns true if the enemy was destroyed.
pub fn damage_enemy(world: &mut World, tuning: &Tuning, index: usize, damage: i32) -> bool {
    let enemy = &mut world.enemies[index];
    if !enemy.active {
        return false;
    }
    enemy.health -= damage;
    if enemy.health <= 0 {
        destroy_enemy(world, tuning, index);
        true
    } else {
        false
    }
}

/// Remove a destroyed enemy, award its points and roll for a drop
pub fn destroy_enemy(world: &mut World, tuning: &Tuning, index: usize) {
    let enemy = &mut world.enemies[index];
    if !enemy.active {
        return;
    }
    enemy.active = false;
    let (pos, points, kind) = (enemy.pos, enemy.points, enemy.kind);

    world.score += points;
    world.stats.enemies_destroyed += 1;
    world.phase_kills += 1;
    if kind.is_sub_boss() {
        log::debug!("Sub-boss {:?} destroyed (+{})", kind, points);
    }

    if world.rng.random::<f32>() < tuning.powerup_drop_chance {
        let drop = PowerUpKind::ALL[world.rng.random_range(0..PowerUpKind::ALL.len())];
        world.spawn_powerup(drop, pos);
    }
}

/// One hit against the player; zero health ends the run
pub fn damage_player(world: &mut World, tuning: &Tuning) {
    let player = &mut world.player;
    if !player.active {
        return;
    }
    player.health = player.health.saturating_sub(1);
    player.grant_invulnerability(tuning.player_invulnerable_time);
    world.stats.hits_received += 1;

    if player.health == 0 {
        game_over(world);
    }
}

/// Damage the boss, scoring one point per point of health removed
pub fn damage_boss(world: &mut World, tuning: &Tuning, damage: i32) {
    let Some(boss) = world.boss.as_mut().filter(|b| b.active) else {
        return;
    };
    let dealt = damage.clamp(0, boss.health.max(0));
    boss.health -= damage;
    let defeated = boss.health <= 0;

    world.score += dealt as u64;
    world.stats.boss_damage_dealt += dealt as u64;

    if defeated {
        defeat_boss(world, tuning);
    }
}

/// Boss destroyed: bonus, then either victory or the next phase
pub fn defeat_boss(world: &mut World, tuning: &Tuning) {
    let Some(boss) = world.boss.as_mut().filter(|b| b.active) else {
        return;
    };
    boss.active = false;
    let kind = boss.kind;

    let bonus = tuning.boss_defeat_bonus * world.phase as u64;
    world.score += bonus;
    log::info!("{} defeated in phase {} (+{})", kind.name(), world.phase, bonus);

    if world.phase >= tuning.final_phase {
        victory(world);
        return;
    }

    world.phase += 1;
    world.phase_kills = 0;
    world.boss = None;
    world.director.reset_for_phase();

    let player = &mut world.player;
    player.weapon_level = (player.weapon_level + 1).min(tuning.max_weapon_level);
    player.bombs = (player.bombs + 1).min(tuning.max_bombs);
    log::info!(
        "Advancing to phase {} (weapon {}, bombs {})",
        world.phase,
        player.weapon_level,
        player.bombs
    );
}

/// Apply a collected powerup's effect
pub fn collect_powerup(world: &mut World, tuning: &Tuning, kind: PowerUpKind) {
    let player = &mut world.player;
    match kind {
        PowerUpKind::Weapon => {
            player.weapon_level = (player.weapon_level + 1).min(tuning.max_weapon_level);
        }
        PowerUpKind::Shield => player.grant_invulnerability(tuning.shield_duration),
        PowerUpKind::Bomb => player.bombs += 1,
        PowerUpKind::Heal => player.health = (player.health + 1).min(player.max_health),
        PowerUpKind::Score => world.score += tuning.score_powerup_bonus,
    }
    world.stats.powerups_collected += 1;
    log::debug!("Collected {:?} powerup", kind);
}

fn current_result(world: &World) -> GameResult {
    GameResult {
        score: world.score,
        phase: world.phase,
        time: world.elapsed.floor() as u32,
        powerups_collected: world.stats.powerups_collected,
        hits_received: world.stats.hits_received,
        enemies_destroyed: world.stats.enemies_destroyed,
        boss_damage_dealt: world.stats.boss_damage_dealt,
    }
}

fn game_over(world: &mut World) {
    if world.is_over() {
        return;
    }
    world.player.active = false;
    world.is_game_over = true;
    let result = current_result(world);
    log::info!("Game over: score {} in phase {}", result.score, result.phase);
    world.events.push(GameEvent::GameOver(result));
}

fn victory(world: &mut World) {
    if world.is_over() {
        return;
    }
    world.is_victory = true;
    let result = current_result(world);
    log::info!("Victory: score {} in {}s", result.score, result.time);
    world.events.push(GameEvent::Victory(result));
}
