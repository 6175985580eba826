use std::f64::consts::TAU;

use neon_asteroids_core::constants::{
    frames_from_millis, PROJECTILE_RANGE, SHIP_MAX_SPEED, STARTING_LIVES,
};
use neon_asteroids_core::rng::SeededRng;
use neon_asteroids_core::sim::advance_frame;
use neon_asteroids_core::{
    replay, replay_with_checkpoints, AsteroidSize, Game, GameConfig, GameMode, InputLatch,
};

fn random_inputs(seed: u32, len: usize) -> Vec<u8> {
    let mut rng = SeededRng::new(seed);
    (0..len).map(|_| rng.next_int(0x20) as u8).collect()
}

#[test]
fn identical_seed_and_inputs_replay_identically() {
    let inputs = random_inputs(0x5EED_0001, 4_000);
    let config = GameConfig::default();

    let first = replay(config, 0xABCD_1234, &inputs, 1.0);
    let second = replay(config, 0xABCD_1234, &inputs, 1.0);
    assert_eq!(first, second);

    let first = replay_with_checkpoints(config, 0xABCD_1234, &inputs, 1.0, 97);
    let second = replay_with_checkpoints(config, 0xABCD_1234, &inputs, 1.0, 97);
    assert_eq!(first, second);
}

#[test]
fn checkpoints_end_on_the_replay_result() {
    let inputs = random_inputs(77, 1_500);
    let config = GameConfig::default();
    let result = replay(config, 42, &inputs, 1.0);
    let checkpoints = replay_with_checkpoints(config, 42, &inputs, 1.0, 100);

    let first = checkpoints.first().expect("initial checkpoint");
    assert_eq!(first.frame_count, 0);
    assert_eq!(first.lives, STARTING_LIVES);
    assert_eq!(first.asteroids, 2);

    let last = checkpoints.last().expect("final checkpoint");
    assert_eq!(last.frame_count, result.frame_count);
    assert_eq!(last.score, result.final_score);
    assert_eq!(last.rng_state, result.final_rng_state);
    assert!(checkpoints
        .windows(2)
        .all(|pair| pair[0].frame_count < pair[1].frame_count));
}

#[test]
fn seeds_change_the_opening_layout() {
    let a = Game::new(GameConfig::default(), 1).snapshot();
    let b = Game::new(GameConfig::default(), 2).snapshot();
    assert_ne!(a.asteroids, b.asteroids);
}

#[test]
fn world_invariants_hold_through_a_long_session() {
    let mut game = Game::new(GameConfig::new(640.0, 480.0), 0x0BAD_F00D);
    let mut latch = InputLatch::new();
    game.start();

    let inputs = random_inputs(0x1357_9BDF, 6_000);
    let dt = frames_from_millis(20.0);
    let mut last_score = 0;

    for input in inputs {
        advance_frame(&mut game, &mut latch, input, dt);
        let snapshot = game.snapshot();

        assert!((0.0..TAU).contains(&snapshot.ship.heading));
        assert!(snapshot.ship.velocity.length() <= SHIP_MAX_SPEED);
        assert!(snapshot.lives <= STARTING_LIVES);
        assert!(snapshot.score >= last_score || snapshot.score == 0);
        assert!(snapshot
            .projectiles
            .iter()
            .all(|p| p.distance_travelled <= PROJECTILE_RANGE));
        assert!(snapshot
            .asteroids
            .iter()
            .all(|a| a.vertices.len() >= 3 && AsteroidSize::from_value(a.size.value()).is_some()));
        if snapshot.mode == GameMode::Running {
            assert!(!snapshot.asteroids.is_empty());
        }
        last_score = snapshot.score;
    }
}

#[test]
fn snapshot_serializes_for_a_renderer() -> Result<(), serde_json::Error> {
    let mut game = Game::new(GameConfig::default(), 9);
    game.start();
    game.fire_projectile();
    game.update(1.0);

    let json = serde_json::to_value(game.snapshot())?;
    assert_eq!(json["mode"], "running");
    assert_eq!(json["level"], 1);
    assert_eq!(json["lives"], STARTING_LIVES);
    assert_eq!(json["score"], 0);
    assert_eq!(json["asteroids"].as_array().map(Vec::len), Some(2));
    assert_eq!(json["asteroids"][0]["size"], "large");
    assert_eq!(json["projectiles"].as_array().map(Vec::len), Some(1));
    assert_eq!(json["ship"]["vertices"].as_array().map(Vec::len), Some(3));
    assert_eq!(json["ship"]["position"]["x"], 200.0);
    assert_eq!(json["ship"]["position"]["y"], 400.0);
    Ok(())
}

#[test]
fn restart_after_game_over_resets_the_session() {
    // Sit still at the spawn point with the grace window expiring; drifting rocks
    // eventually collide with the ship until the game ends.
    let mut game = Game::new(GameConfig::default(), 0x0000_2024);
    let mut latch = InputLatch::new();
    game.start();

    let mut frames = 0;
    while !game.is_game_over() && frames < 200_000 {
        advance_frame(&mut game, &mut latch, 0x00, 1.0);
        frames += 1;
    }
    assert!(game.is_game_over(), "idle ship survived {frames} frames");
    assert_eq!(game.lives(), 0);
    assert!(game.best_score() >= game.score());
    let best = game.best_score();

    advance_frame(&mut game, &mut latch, 0x10, 1.0);
    assert_eq!(game.mode(), GameMode::Running);
    assert_eq!(game.lives(), STARTING_LIVES);
    assert_eq!(game.level(), 1);
    assert_eq!(game.best_score(), best);
}
