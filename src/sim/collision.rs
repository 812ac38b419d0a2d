//! Collision detection and resolution
//!
//! Every test is center distance against combined radius. The player uses a
//! hitbox narrower than its sprite for damage and the full sprite for pickups;
//! everything else uses half its width.
//!
//! Resolution order each frame:
//! 1. player body vs enemies
//! 2. player bullets vs enemies, then vs the boss
//! 3. enemy bullets vs player
//! 4. player vs powerups
//!
//! Resolution stops as soon as the run ends, so nothing scores after the
//! final result is recorded.

use glam::Vec2;

use super::pool::BulletHandle;
use super::scoring;
use super::state::World;
use crate::tuning::Tuning;

/// Whether two circles overlap (touching does not count)
#[inline]
pub fn circles_overlap(a: Vec2, radius_a: f32, b: Vec2, radius_b: f32) -> bool {
    let reach = radius_a + radius_b;
    a.distance_squared(b) < reach * reach
}

/// Run every collision pass in order
pub fn resolve_collisions(world: &mut World, tuning: &Tuning) {
    let passes: [fn(&mut World, &Tuning); 4] = [
        player_vs_enemies,
        player_bullets_vs_targets,
        enemy_bullets_vs_player,
        player_vs_powerups,
    ];
    for pass in passes {
        if world.is_over() {
            return;
        }
        pass(world, tuning);
    }
}

/// Body contact: first overlapping enemy only, skipped while invulnerable
fn player_vs_enemies(world: &mut World, tuning: &Tuning) {
    let player = &world.player;
    if !player.active || player.invulnerable {
        return;
    }
    let (pos, radius) = (player.pos, player.hit_radius(tuning.player_hitbox_ratio));

    let hit = world
        .enemies
        .iter()
        .position(|e| e.active && circles_overlap(pos, radius, e.pos, e.radius()));

    if let Some(index) = hit {
        scoring::damage_player(world, tuning);
        if world.is_over() {
            return;
        }
        scoring::damage_enemy(world, tuning, index, tuning.body_contact_damage);
    }
}

/// Each player bullet hits the first overlapping enemy, otherwise the boss
fn player_bullets_vs_targets(world: &mut World, tuning: &Tuning) {
    for index in 0..world.bullets.capacity() {
        if world.is_over() {
            return;
        }
        let handle = BulletHandle::from_index(index);
        let Some(bullet) = world.bullets.get(handle) else {
            continue;
        };
        if !bullet.is_player_bullet {
            continue;
        }
        let (pos, radius, damage) = (bullet.pos, bullet.radius(), bullet.damage);

        let hit = world
            .enemies
            .iter()
            .position(|e| e.active && circles_overlap(pos, radius, e.pos, e.radius()));
        if let Some(enemy) = hit {
            world.bullets.release(handle);
            scoring::damage_enemy(world, tuning, enemy, damage);
            continue;
        }

        let boss_hit = world
            .active_boss()
            .is_some_and(|boss| circles_overlap(pos, radius, boss.pos, boss.radius()));
        if boss_hit {
            world.bullets.release(handle);
            scoring::damage_boss(world, tuning, damage);
        }
    }
}

/// First enemy bullet touching the player lands; skipped while invulnerable
fn enemy_bullets_vs_player(world: &mut World, tuning: &Tuning) {
    let player = &world.player;
    if !player.active || player.invulnerable {
        return;
    }
    let (pos, radius) = (player.pos, player.hit_radius(tuning.player_hitbox_ratio));

    let hit = world.bullets.handles(false).find(|&handle| {
        world
            .bullets
            .get(handle)
            .is_some_and(|b| circles_overlap(pos, radius, b.pos, b.radius()))
    });

    if let Some(handle) = hit {
        world.bullets.release(handle);
        scoring::damage_player(world, tuning);
    }
}

/// Every overlapping powerup is collected
fn player_vs_powerups(world: &mut World, tuning: &Tuning) {
    if !world.player.active {
        return;
    }
    let (pos, radius) = (world.player.pos, world.player.pickup_radius());

    for index in 0..world.powerups.len() {
        let powerup = &mut world.powerups[index];
        if !powerup.active || !circles_overlap(pos, radius, powerup.pos, powerup.radius()) {
            continue;
        }
        powerup.active = false;
        let kind = powerup.kind;
        scoring::collect_powerup(world, tuning, kind);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::{Boss, BossKind, EnemyKind, PowerUpKind};
    use crate::sim::state::GameEvent;

    fn quiet_tuning() -> Tuning {
        Tuning {
            powerup_drop_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_circles_overlap() {
        assert!(circles_overlap(Vec2::ZERO, 5.0, Vec2::new(9.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(10.0, 0.0), 5.0));
        assert!(!circles_overlap(Vec2::ZERO, 5.0, Vec2::new(8.0, 8.0), 5.0));
    }

    #[test]
    fn test_player_bullet_consumed_by_first_enemy() {
        let tuning = quiet_tuning();
        let mut world = World::new(&tuning, 1);
        world.spawn_enemy(EnemyKind::C, Vec2::new(300.0, 300.0), 0.0);
        world.spawn_enemy(EnemyKind::C, Vec2::new(300.0, 300.0), 0.0);
        world.bullets.spawn(true, Vec2::new(300.0, 300.0), Vec2::ZERO, 1);

        resolve_collisions(&mut world, &tuning);
        assert_eq!(world.bullets.live_count(), 0);
        let hp: Vec<i32> = world.enemies.iter().map(|e| e.health).collect();
        assert_eq!(hp, vec![5, 6]);
    }

    #[test]
    fn test_player_bullet_hits_boss_when_no_enemy() {
        let tuning = quiet_tuning();
        let mut world = World::new(&tuning, 1);
        let id = world.next_entity_id();
        world.boss = Some(Boss::new(id, BossKind::Cruiser, Vec2::new(480.0, 120.0)));
        world.bullets.spawn(true, Vec2::new(500.0, 130.0), Vec2::ZERO, 1);

        resolve_collisions(&mut world, &tuning);
        assert_eq!(world.boss.as_ref().unwrap().health, 499);
        assert_eq!(world.score, 1);
        assert_eq!(world.bullets.live_count(), 0);
    }

    #[test]
    fn test_enemy_bullet_hits_once_then_invulnerable() {
        let tuning = quiet_tuning();
        let mut world = World::new(&tuning, 1);
        let pos = world.player.pos;
        world.bullets.spawn(false, pos, Vec2::ZERO, 1);
        world.bullets.spawn(false, pos, Vec2::ZERO, 1);

        resolve_collisions(&mut world, &tuning);
        assert_eq!(world.player.health, tuning.player_max_health - 1);
        assert!(world.player.invulnerable);
        assert_eq!(world.bullets.live_count(), 1);

        resolve_collisions(&mut world, &tuning);
        assert_eq!(world.player.health, tuning.player_max_health - 1);
    }

    #[test]
    fn test_enemy_bullets_ignored_while_invulnerable() {
        let tuning = quiet_tuning();
        let mut world = World::new(&tuning, 1);
        world.player.grant_invulnerability(1.0);
        let pos = world.player.pos;
        world.bullets.spawn(false, pos, Vec2::ZERO, 1);

        resolve_collisions(&mut world, &tuning);
        assert_eq!(world.player.health, tuning.player_max_health);
        assert_eq!(world.bullets.live_count(), 1);
    }

    #[test]
    fn test_hitbox_is_forgiving() {
        let tuning = quiet_tuning();
        let mut world = World::new(&tuning, 1);
        // Grazes the sprite edge but misses the narrow hitbox
        let graze = world.player.pos + Vec2::new(world.player.size.x / 2.0, 0.0);
        world.bullets.spawn(false, graze, Vec2::ZERO, 1);

        resolve_collisions(&mut world, &tuning);
        assert_eq!(world.player.health, tuning.player_max_health);
    }

    #[test]
    fn test_nothing_scores_after_fatal_contact() {
        let tuning = quiet_tuning();
        let mut world = World::new(&tuning, 1);
        world.player.health = 1;
        let pos = world.player.pos;
        // Rams the player, would die to the contact damage
        world.spawn_enemy(EnemyKind::A, pos, 0.0);
        world.enemies[0].health = 1;
        // Would score a kill in the bullet pass
        world.spawn_enemy(EnemyKind::A, Vec2::new(200.0, 200.0), 0.0);
        world.enemies[1].health = 1;
        world.bullets.spawn(true, Vec2::new(200.0, 200.0), Vec2::ZERO, 1);
        world.spawn_powerup(PowerUpKind::Score, pos);

        resolve_collisions(&mut world, &tuning);
        assert!(world.is_game_over);
        assert_eq!(world.score, 0);
        assert_eq!(world.stats.enemies_destroyed, 0);
        assert_eq!(world.stats.powerups_collected, 0);
        match world.events.as_slice() {
            [GameEvent::GameOver(result)] => {
                assert_eq!(result.score, world.score);
                assert_eq!(result.phase, world.phase);
            }
            other => panic!("unexpected events {other:?}"),
        }
    }

    #[test]
    fn test_powerups_collected_with_sprite_radius() {
        let tuning = quiet_tuning();
        let mut world = World::new(&tuning, 1);
        let near = world.player.pos + Vec2::new(25.0, 0.0);
        world.spawn_powerup(PowerUpKind::Score, near);
        world.spawn_powerup(PowerUpKind::Bomb, near);
        world.spawn_powerup(PowerUpKind::Heal, Vec2::new(10.0, 10.0));

        resolve_collisions(&mut world, &tuning);
        assert_eq!(world.stats.powerups_collected, 2);
        assert_eq!(world.score, tuning.score_powerup_bonus);
        assert!(world.powerups[2].active);
    }
}
