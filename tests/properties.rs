//! Property tests for the simulation invariants

use glam::Vec2;
use proptest::prelude::*;

use skyfire::sim::{BossPhase, BulletPool, GameEngine, GameState, InputAction, InputState};

fn input_from_bits(bits: u8) -> InputState {
    InputState {
        up: bits & 0x01 != 0,
        down: bits & 0x02 != 0,
        left: bits & 0x04 != 0,
        right: bits & 0x08 != 0,
        bomb: bits & 0x10 != 0,
        pause: false,
    }
}

fn script() -> impl Strategy<Value = Vec<(u8, f32)>> {
    prop::collection::vec((any::<u8>(), 0.0f32..0.05), 1..400)
}

/// Aggregate state plus every actor position
fn observe(engine: &GameEngine) -> (GameState, Vec<Vec2>) {
    let mut positions = vec![engine.player().pos];
    positions.extend(engine.enemies().map(|e| e.pos));
    positions.extend(engine.bullets().map(|b| b.pos));
    positions.extend(engine.powerups().map(|p| p.pos));
    positions.extend(engine.boss().map(|b| b.pos));
    (engine.game_state(), positions)
}

fn play(engine: &mut GameEngine, steps: &[(u8, f32)]) {
    for &(bits, dt) in steps {
        engine.apply_input(input_from_bits(bits));
        engine.update(dt);
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(48))]

    #[test]
    fn pool_never_exceeds_capacity(
        capacity in 1usize..64,
        ops in prop::collection::vec((any::<bool>(), any::<bool>(), 0usize..64), 0..300),
    ) {
        let mut pool = BulletPool::new(capacity);
        let mut handles = Vec::new();
        for (acquire, is_player, pick) in ops {
            if acquire {
                if let Some(handle) = pool.acquire(is_player) {
                    handles.push(handle);
                }
            } else if !handles.is_empty() {
                let handle = handles.swap_remove(pick % handles.len());
                pool.release(handle);
            }
            prop_assert!(pool.live_count() <= pool.capacity());
            prop_assert_eq!(pool.live_count(), pool.iter().count());
            prop_assert_eq!(pool.live_count(), handles.len());
        }
    }

    #[test]
    fn health_stays_in_bounds(seed in any::<u64>(), steps in script()) {
        let mut engine = GameEngine::with_seed(seed);
        let capacity = engine.bullet_pool().capacity();
        for (bits, dt) in steps {
            engine.apply_input(input_from_bits(bits));
            engine.update(dt);

            let state = engine.game_state();
            prop_assert!(state.player_health <= state.player_max_health);
            prop_assert!(state.player_health > 0 || state.is_game_over);
            prop_assert!(engine.bullet_pool().live_count() <= capacity);
            prop_assert!((1..=4).contains(&state.weapon_level));
        }
    }

    #[test]
    fn pause_freezes_the_world(
        seed in any::<u64>(),
        warmup in script(),
        paused in prop::collection::vec(0.0f32..0.2, 1..60),
    ) {
        let mut engine = GameEngine::with_seed(seed);
        play(&mut engine, &warmup);
        engine.apply_input(InputState::default());
        engine.set_input(InputAction::Pause, true);
        prop_assume!(engine.game_state().is_paused);

        let before = observe(&engine);
        for dt in paused {
            engine.update(dt);
        }
        prop_assert_eq!(observe(&engine), before);
    }

    #[test]
    fn zero_delta_changes_nothing(seed in any::<u64>(), warmup in script(), repeats in 1usize..20) {
        let mut engine = GameEngine::with_seed(seed);
        play(&mut engine, &warmup);
        let before = observe(&engine);
        for _ in 0..repeats {
            engine.update(0.0);
        }
        prop_assert_eq!(observe(&engine), before);
    }

    #[test]
    fn boss_phase_is_monotonic_in_health(max in 1i32..5000, a in 0.0f32..=1.0, b in 0.0f32..=1.0) {
        let (hi, lo) = if a >= b { (a, b) } else { (b, a) };
        let healthier = (max as f32 * hi) as i32;
        let weaker = (max as f32 * lo) as i32;
        prop_assert!(BossPhase::from_health(healthier, max) <= BossPhase::from_health(weaker, max));

        let ratio = healthier as f32 / max as f32;
        let expected = if ratio > 0.66 {
            BossPhase::One
        } else if ratio > 0.33 {
            BossPhase::Two
        } else {
            BossPhase::Three
        };
        prop_assert_eq!(BossPhase::from_health(healthier, max), expected);
    }

    #[test]
    fn same_seed_same_run(seed in any::<u64>(), steps in script()) {
        let mut a = GameEngine::with_seed(seed);
        let mut b = GameEngine::with_seed(seed);
        play(&mut a, &steps);
        play(&mut b, &steps);
        prop_assert_eq!(observe(&a), observe(&b));
    }
}
