use anyhow::Result;
use neon_asteroids_core::constants::STARTING_LIVES;
use neon_asteroids_core::{replay, GameConfig};
use neon_autopilot::benchmark::{run_benchmark, BenchmarkConfig};
use neon_autopilot::bots::bot_ids;
use neon_autopilot::runner::{run_bot, RunOptions};

fn short_run() -> RunOptions {
    RunOptions {
        max_frames: 900,
        ..RunOptions::default()
    }
}

#[test]
fn every_bot_completes_a_smoke_run() -> Result<()> {
    let seed = 0xDEAD_BEEF;
    for bot in bot_ids() {
        let artifact = run_bot(bot, seed, &short_run())?;
        let metrics = &artifact.metrics;
        assert_eq!(metrics.bot_id, bot);
        assert!(metrics.frame_count > 0, "bot={bot}");
        assert!(metrics.frame_count <= 900, "bot={bot}");
        assert_eq!(artifact.inputs.len() as u32, metrics.frame_count, "bot={bot}");
        assert!(metrics.final_lives <= STARTING_LIVES);
        assert_eq!(metrics.events.levels_started, metrics.final_level);
    }
    Ok(())
}

#[test]
fn runs_are_reproducible_from_their_inputs() -> Result<()> {
    let options = short_run();
    let artifact = run_bot("hunter", 1234, &options)?;
    let again = run_bot("hunter", 1234, &options)?;
    assert_eq!(artifact.inputs, again.inputs);
    assert_eq!(artifact.metrics.final_score, again.metrics.final_score);

    let replayed = replay(GameConfig::default(), 1234, &artifact.inputs, 1.0);
    assert_eq!(replayed.final_score, artifact.metrics.final_score);
    assert_eq!(replayed.final_rng_state, artifact.metrics.final_rng_state);
    assert_eq!(replayed.frame_count, artifact.metrics.frame_count);
    Ok(())
}

#[test]
fn idle_bot_never_scores_by_shooting() -> Result<()> {
    let artifact = run_bot("idle", 7, &short_run())?;
    assert_eq!(artifact.metrics.fire_frames, 0);
    assert_eq!(artifact.metrics.action_frames, 0);
    assert!(artifact.inputs.iter().all(|byte| *byte == 0));
    Ok(())
}

#[test]
fn unknown_bot_is_rejected() {
    assert!(run_bot("nobody", 1, &short_run()).is_err());
    let zero = RunOptions {
        max_frames: 0,
        ..RunOptions::default()
    };
    assert!(run_bot("idle", 1, &zero).is_err());
}

#[test]
fn benchmark_writes_a_ranked_report() -> Result<()> {
    let dir = tempfile::tempdir()?;
    let out = dir.path().join("reports/summary.json");

    let report = run_benchmark(BenchmarkConfig {
        bots: vec!["idle".to_string(), "spinner".to_string()],
        seeds: vec![1, 2, 3],
        arena: GameConfig::default(),
        max_frames: 300,
        fps: 60,
        jobs: Some(2),
        out: Some(out.clone()),
    })?;

    assert_eq!(report.run_count, 6);
    assert_eq!(report.bot_rankings.len(), 2);
    assert!(report.bot_rankings[0].avg_score >= report.bot_rankings[1].avg_score);

    let written: serde_json::Value = serde_json::from_slice(&std::fs::read(&out)?)?;
    assert_eq!(written["run_count"], 6);
    assert_eq!(written["runs"].as_array().map(Vec::len), Some(6));
    Ok(())
}

#[test]
fn benchmark_rejects_zero_jobs() {
    let result = run_benchmark(BenchmarkConfig {
        bots: vec!["idle".to_string()],
        seeds: vec![1],
        arena: GameConfig::default(),
        max_frames: 10,
        fps: 60,
        jobs: Some(0),
        out: None,
    });
    assert!(result.is_err());
}
