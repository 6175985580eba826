use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use neon_asteroids_core::constants::frames_from_millis;
use neon_asteroids_core::sim::advance_frame;
use neon_asteroids_core::{
    encode_input_byte, AsteroidSize, Game, GameConfig, GameEvents, InputLatch, MemoryScoreStore,
    ScoreStore,
};
use serde::Serialize;

use crate::bots::{create_bot, AutopilotBot};
use crate::config::{DEFAULT_FPS, DEFAULT_MAX_FRAMES};
use crate::store::JsonFileScoreStore;

/// Tallies every event hook the orchestrator raises.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct CountingEvents {
    pub asteroids_destroyed: u32,
    pub large_destroyed: u32,
    pub medium_destroyed: u32,
    pub small_destroyed: u32,
    pub points_awarded: u32,
    pub ship_hits: u32,
    pub levels_started: u32,
    pub game_overs: u32,
}

impl GameEvents for CountingEvents {
    fn asteroid_destroyed(&mut self, size: AsteroidSize, points: u32) {
        self.asteroids_destroyed += 1;
        match size {
            AsteroidSize::Large => self.large_destroyed += 1,
            AsteroidSize::Medium => self.medium_destroyed += 1,
            AsteroidSize::Small => self.small_destroyed += 1,
        }
        self.points_awarded = self.points_awarded.saturating_add(points);
    }

    fn ship_hit(&mut self, _lives_remaining: u32) {
        self.ship_hits += 1;
    }

    fn game_over(&mut self, _score: u32, _best_score: u32) {
        self.game_overs += 1;
    }

    fn level_started(&mut self, _level: u32) {
        self.levels_started += 1;
    }
}

#[derive(Clone, Debug)]
pub struct RunOptions {
    pub arena: GameConfig,
    pub max_frames: u32,
    pub fps: u32,
    /// Persist the best score here; in-memory when `None`.
    pub best_score_file: Option<PathBuf>,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            arena: GameConfig::default(),
            max_frames: DEFAULT_MAX_FRAMES,
            fps: DEFAULT_FPS,
            best_score_file: None,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
pub struct RunMetrics {
    pub bot_id: String,
    pub seed: u32,
    pub max_frames: u32,
    pub fps: u32,
    pub frame_count: u32,
    pub final_score: u32,
    pub best_score: u32,
    pub final_lives: u32,
    pub final_level: u32,
    pub final_rng_state: u32,
    pub game_over: bool,
    pub events: CountingEvents,
    pub action_frames: u32,
    pub turn_frames: u32,
    pub thrust_frames: u32,
    pub fire_frames: u32,
}

#[derive(Clone, Debug, Serialize)]
pub struct RunArtifact {
    pub metrics: RunMetrics,
    pub inputs: Vec<u8>,
}

pub fn run_bot(bot_id: &str, seed: u32, options: &RunOptions) -> Result<RunArtifact> {
    let mut bot = create_bot(bot_id).ok_or_else(|| anyhow!("unknown bot '{bot_id}'"))?;
    run_bot_instance(bot.as_mut(), seed, options)
}

/// Plays one session from `start()` until game over or `max_frames` ticks.
pub fn run_bot_instance(
    bot: &mut dyn AutopilotBot,
    seed: u32,
    options: &RunOptions,
) -> Result<RunArtifact> {
    if options.max_frames == 0 {
        return Err(anyhow!("max_frames must be > 0"));
    }
    if options.fps == 0 {
        return Err(anyhow!("fps must be > 0"));
    }

    let store: Box<dyn ScoreStore> = match &options.best_score_file {
        Some(path) => Box::new(JsonFileScoreStore::new(path)),
        None => Box::new(MemoryScoreStore::new()),
    };
    let mut game =
        Game::with_collaborators(options.arena, seed, store, CountingEvents::default());
    let mut latch = InputLatch::new();
    let dt = frames_from_millis(1000.0 / options.fps as f64);

    bot.reset(seed);
    game.start();
    tracing::debug!(bot = bot.id(), seed, dt, "run started");

    let mut inputs = Vec::with_capacity(options.max_frames as usize);
    while inputs.len() < options.max_frames as usize && !game.is_game_over() {
        let input = encode_input_byte(bot.next_input(&game.snapshot()));
        inputs.push(input);
        advance_frame(&mut game, &mut latch, input, dt);
    }

    let mut action_frames = 0u32;
    let mut turn_frames = 0u32;
    let mut thrust_frames = 0u32;
    let mut fire_frames = 0u32;
    for byte in &inputs {
        if *byte != 0 {
            action_frames += 1;
        }
        if (*byte & 0x01) != 0 || (*byte & 0x02) != 0 {
            turn_frames += 1;
        }
        if (*byte & 0x04) != 0 {
            thrust_frames += 1;
        }
        if (*byte & 0x08) != 0 {
            fire_frames += 1;
        }
    }

    let result = game.result();
    tracing::debug!(
        bot = bot.id(),
        seed,
        frames = result.frame_count,
        score = result.final_score,
        "run finished"
    );

    Ok(RunArtifact {
        metrics: RunMetrics {
            bot_id: bot.id().to_string(),
            seed,
            max_frames: options.max_frames,
            fps: options.fps,
            frame_count: result.frame_count,
            final_score: result.final_score,
            best_score: result.best_score,
            final_lives: result.final_lives,
            final_level: result.final_level,
            final_rng_state: result.final_rng_state,
            game_over: result.game_over,
            events: *game.events(),
            action_frames,
            turn_frames,
            thrust_frames,
            fire_frames,
        },
        inputs,
    })
}

pub fn write_report(path: &Path, artifact: &RunArtifact) -> Result<()> {
    if let Some(parent) = path.parent() {
        if !parent.as_os_str().is_empty() {
            fs::create_dir_all(parent)
                .with_context(|| format!("failed creating {}", parent.display()))?;
        }
    }
    let encoded = serde_json::to_vec_pretty(artifact).context("failed to serialize run report")?;
    fs::write(path, encoded).with_context(|| format!("failed writing {}", path.display()))
}
