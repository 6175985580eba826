//! Gameplay constants.
//!
//! Distances are arena units, speeds are units per reference frame
//! (1/60 s) and timer durations are milliseconds.

// Arena
pub const DEFAULT_ARENA_WIDTH: f64 = 700.0;
pub const DEFAULT_ARENA_HEIGHT: f64 = 500.0;
pub const REFERENCE_FRAME_MS: f64 = 1000.0 / 60.0;

// Session
pub const STARTING_LIVES: u32 = 5;
pub const STARTING_LEVEL: u32 = 1;
pub const BEST_SCORE_KEY: &str = "neonAsteroidsBestScore";

// Ship
pub const SHIP_SPAWN_X: f64 = 200.0;
pub const SHIP_SPAWN_Y: f64 = 400.0;
pub const SHIP_LENGTH: f64 = 50.0;
pub const SHIP_WIDTH: f64 = 40.0;
pub const SHIP_ROTATION_SPEED: f64 = 0.08;
pub const SHIP_THRUST: f64 = 0.1;
pub const SHIP_MAX_SPEED: f64 = 8.0;
pub const SHIP_DRAG: f64 = 0.01;
pub const SHIP_INVULNERABLE_MS: f64 = 3000.0;
pub const SHIP_BLINK_INTERVAL_MS: f64 = 250.0;

// Projectiles
pub const PROJECTILE_SPEED: f64 = 8.0;
pub const PROJECTILE_RADIUS: f64 = 4.0;
pub const PROJECTILE_RANGE: f64 = 300.0;

// Asteroids
pub const ASTEROID_MIN_SPEED: f64 = 1.0;
pub const ASTEROID_MAX_SPEED: f64 = 3.0;
pub const INITIAL_ASTEROIDS: usize = 2;
pub const ASTEROID_WAVE_CAP: usize = 6;
pub const ASTEROID_WAVE_CAP_LEVEL: u32 = 8;
pub const ASTEROID_SPLIT_COUNT: usize = 2;

// Scoring
pub const SCORE_LARGE_ASTEROID: u32 = 20;
pub const SCORE_MEDIUM_ASTEROID: u32 = 50;
pub const SCORE_SMALL_ASTEROID: u32 = 100;

// Level banner fade
pub const LEVEL_BANNER_FADE_STEP: f64 = 0.01;
pub const LEVEL_BANNER_FADE_INTERVAL_MS: f64 = 50.0;

/// Converts a wall-clock frame duration into reference frames.
#[inline]
pub fn frames_from_millis(elapsed_ms: f64) -> f64 {
    elapsed_ms / REFERENCE_FRAME_MS
}

/// Converts reference frames back into milliseconds.
#[inline]
pub fn millis_from_frames(frames: f64) -> f64 {
    frames * REFERENCE_FRAME_MS
}
