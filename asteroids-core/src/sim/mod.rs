use serde::{Deserialize, Serialize};

use crate::constants::{
    millis_from_frames, ASTEROID_MAX_SPEED, ASTEROID_MIN_SPEED, ASTEROID_WAVE_CAP,
    ASTEROID_WAVE_CAP_LEVEL, DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH, INITIAL_ASTEROIDS,
    SCORE_LARGE_ASTEROID, SCORE_MEDIUM_ASTEROID, SCORE_SMALL_ASTEROID, SHIP_SPAWN_X, SHIP_SPAWN_Y,
};
use crate::geometry::Vec2;
use crate::input::{decode_input_byte, InputLatch};

mod asteroid;
mod game;
mod projectile;
mod ship;
mod timers;

pub use asteroid::{Asteroid, ASTEROID_TEMPLATES};
pub use game::Game;
pub use projectile::Projectile;
pub use ship::{Ship, SHIP_SHAPE};
pub use timers::{Invulnerability, LevelBanner};

/// Arena dimensions, fixed for the lifetime of a session.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    pub arena_width: f64,
    pub arena_height: f64,
}

impl GameConfig {
    pub fn new(arena_width: f64, arena_height: f64) -> Self {
        debug_assert!(arena_width > 0.0 && arena_height > 0.0);
        Self {
            arena_width,
            arena_height,
        }
    }

    pub fn center(&self) -> Vec2 {
        Vec2::new(self.arena_width / 2.0, self.arena_height / 2.0)
    }

    /// Where the ship starts a session: the lower-left spawn point, clear of
    /// the opening wave. Arenas too small to contain it fall back to the centre.
    pub fn ship_spawn(&self) -> Vec2 {
        if SHIP_SPAWN_X < self.arena_width && SHIP_SPAWN_Y < self.arena_height {
            Vec2::new(SHIP_SPAWN_X, SHIP_SPAWN_Y)
        } else {
            self.center()
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::new(DEFAULT_ARENA_WIDTH, DEFAULT_ARENA_HEIGHT)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameMode {
    WelcomeMenu,
    Running,
    Paused,
    GameOver,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AsteroidSize {
    Small,
    Medium,
    Large,
}

impl AsteroidSize {
    /// Numeric size: 3 for large down to 1 for small.
    pub fn value(self) -> u8 {
        match self {
            Self::Small => 1,
            Self::Medium => 2,
            Self::Large => 3,
        }
    }

    pub fn from_value(value: u8) -> Option<Self> {
        match value {
            1 => Some(Self::Small),
            2 => Some(Self::Medium),
            3 => Some(Self::Large),
            _ => None,
        }
    }

    #[inline]
    pub fn scale(self) -> f64 {
        self.value() as f64
    }

    /// Smaller rocks are harder to hit and worth more.
    pub fn points(self) -> u32 {
        match self {
            Self::Large => SCORE_LARGE_ASTEROID,
            Self::Medium => SCORE_MEDIUM_ASTEROID,
            Self::Small => SCORE_SMALL_ASTEROID,
        }
    }

    pub fn smaller(self) -> Option<Self> {
        match self {
            Self::Large => Some(Self::Medium),
            Self::Medium => Some(Self::Small),
            Self::Small => None,
        }
    }
}

/// Anything simulated in the arena.
pub trait Body {
    fn position(&self) -> Vec2;
    fn velocity(&self) -> Vec2;
    /// Current outline in arena coordinates.
    fn world_vertices(&self) -> Vec<Vec2>;
}

/// Bodies removed lazily at the end of a tick.
pub trait Disposable {
    fn is_marked_for_deletion(&self) -> bool;
    fn mark_for_deletion(&mut self);
}

pub(crate) fn prune_marked<T: Disposable>(bodies: &mut Vec<T>) {
    bodies.retain(|body| !body.is_marked_for_deletion());
}

/// Hooks for audio and other side channels. All methods default to no-ops.
pub trait GameEvents {
    fn asteroid_destroyed(&mut self, _size: AsteroidSize, _points: u32) {}
    fn ship_hit(&mut self, _lives_remaining: u32) {}
    fn game_over(&mut self, _score: u32, _best_score: u32) {}
    fn level_started(&mut self, _level: u32) {}
}

#[derive(Clone, Copy, Debug, Default)]
pub struct NoopEvents;

impl GameEvents for NoopEvents {}

impl<T: GameEvents + ?Sized> GameEvents for Box<T> {
    fn asteroid_destroyed(&mut self, size: AsteroidSize, points: u32) {
        (**self).asteroid_destroyed(size, points);
    }

    fn ship_hit(&mut self, lives_remaining: u32) {
        (**self).ship_hit(lives_remaining);
    }

    fn game_over(&mut self, score: u32, best_score: u32) {
        (**self).game_over(score, best_score);
    }

    fn level_started(&mut self, level: u32) {
        (**self).level_started(level);
    }
}

/// Asteroid speed bounds for `level`. The bonus grows by 0.01 every two
/// levels.
pub fn asteroid_speed_range(level: u32) -> (f64, f64) {
    let mut additional = (level / 2) as f64 / 100.0;
    if level % 2 == 0 {
        additional -= 0.01;
    }
    (
        ASTEROID_MIN_SPEED + additional,
        ASTEROID_MAX_SPEED + additional,
    )
}

/// Number of large asteroids spawned when `level` begins.
pub fn asteroid_wave_size(level: u32) -> usize {
    if level <= 1 {
        INITIAL_ASTEROIDS
    } else if level < ASTEROID_WAVE_CAP_LEVEL {
        INITIAL_ASTEROIDS + (level / 2) as usize
    } else {
        ASTEROID_WAVE_CAP
    }
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ShipSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub heading: f64,
    pub vertices: Vec<Vec2>,
    pub thrusting: bool,
    pub invulnerable: bool,
    pub visible: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AsteroidSnapshot {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: AsteroidSize,
    pub vertices: Vec<Vec2>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ProjectileSnapshot {
    pub position: Vec2,
    pub heading: f64,
    pub distance_travelled: f64,
    pub vertices: Vec<Vec2>,
}

/// Read-only view handed to a renderer once per frame.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct WorldSnapshot {
    pub frame_count: u32,
    pub mode: GameMode,
    pub arena: GameConfig,
    pub level: u32,
    pub score: u32,
    pub best_score: u32,
    pub lives: u32,
    pub level_banner_opacity: f64,
    pub ship: ShipSnapshot,
    pub asteroids: Vec<AsteroidSnapshot>,
    pub projectiles: Vec<ProjectileSnapshot>,
}

impl WorldSnapshot {
    pub fn is_game_over(&self) -> bool {
        self.mode == GameMode::GameOver
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct ReplayResult {
    pub final_score: u32,
    pub best_score: u32,
    pub final_level: u32,
    pub final_lives: u32,
    pub frame_count: u32,
    pub final_rng_state: u32,
    pub game_over: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct ReplayCheckpoint {
    pub frame_count: u32,
    pub rng_state: u32,
    pub score: u32,
    pub lives: u32,
    pub level: u32,
    pub asteroids: usize,
    pub projectiles: usize,
    pub ship_x: f64,
    pub ship_y: f64,
    pub ship_vx: f64,
    pub ship_vy: f64,
    pub ship_heading: f64,
    pub ship_invulnerable: bool,
}

/// Applies one frame of held keys, steps the simulation by `dt` reference
/// frames and advances presentation timers by the same wall-clock span.
pub fn advance_frame<S: crate::store::ScoreStore, E: GameEvents>(
    game: &mut Game<S, E>,
    latch: &mut InputLatch,
    input_byte: u8,
    dt: f64,
) {
    latch.apply(game, decode_input_byte(input_byte));
    game.update(dt);
    game.advance_timers(millis_from_frames(dt));
}

/// Plays a fresh session from `start()` with one input byte per tick.
/// Stops early once the game is over.
pub fn replay(config: GameConfig, seed: u32, inputs: &[u8], dt: f64) -> ReplayResult {
    let mut game = Game::new(config, seed);
    let mut latch = InputLatch::new();
    game.start();

    for input in inputs {
        if game.is_game_over() {
            break;
        }
        advance_frame(&mut game, &mut latch, *input, dt);
    }

    game.result()
}

pub fn replay_with_checkpoints(
    config: GameConfig,
    seed: u32,
    inputs: &[u8],
    dt: f64,
    sample_every: u32,
) -> Vec<ReplayCheckpoint> {
    let mut game = Game::new(config, seed);
    let mut latch = InputLatch::new();
    game.start();

    let stride = if sample_every == 0 { 1 } else { sample_every };
    let mut checkpoints = vec![game.checkpoint()];

    for (index, input) in inputs.iter().enumerate() {
        if game.is_game_over() {
            break;
        }
        advance_frame(&mut game, &mut latch, *input, dt);
        let frame = (index + 1) as u32;
        if frame % stride == 0 || frame as usize == inputs.len() || game.is_game_over() {
            checkpoints.push(game.checkpoint());
        }
    }

    checkpoints
}
