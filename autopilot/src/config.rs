use std::env;
use std::path::PathBuf;

use neon_asteroids_core::constants::{DEFAULT_ARENA_HEIGHT, DEFAULT_ARENA_WIDTH};
use neon_asteroids_core::GameConfig;

pub const DEFAULT_FPS: u32 = 60;
pub const DEFAULT_MAX_FRAMES: u32 = 18_000;

/// Driver defaults taken from the environment. CLI flags override these.
#[derive(Clone, Debug, PartialEq)]
pub struct DriverConfig {
    pub arena: GameConfig,
    pub fps: u32,
    pub best_score_file: Option<PathBuf>,
}

impl DriverConfig {
    pub fn from_env() -> Self {
        let width = read_env_f64("NEON_ARENA_WIDTH", DEFAULT_ARENA_WIDTH);
        let height = read_env_f64("NEON_ARENA_HEIGHT", DEFAULT_ARENA_HEIGHT);

        Self {
            arena: GameConfig::new(width, height),
            fps: read_env_u32("NEON_FPS", DEFAULT_FPS),
            best_score_file: read_env_path("NEON_BEST_SCORE_FILE"),
        }
    }
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            arena: GameConfig::default(),
            fps: DEFAULT_FPS,
            best_score_file: None,
        }
    }
}

pub(crate) fn read_env_u32(name: &str, default: u32) -> u32 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<u32>().ok())
        .filter(|value| *value > 0)
        .unwrap_or(default)
}

pub(crate) fn read_env_f64(name: &str, default: f64) -> f64 {
    env::var(name)
        .ok()
        .and_then(|value| value.trim().parse::<f64>().ok())
        .filter(|value| value.is_finite() && *value > 0.0)
        .unwrap_or(default)
}

pub(crate) fn read_env_path(name: &str) -> Option<PathBuf> {
    env::var(name)
        .ok()
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
        .map(PathBuf::from)
}

#[cfg(test)]
mod tests {
    use super::*;

    // Each test owns a distinct variable name so parallel tests don't race.

    #[test]
    fn invalid_numbers_fall_back_to_defaults() {
        env::set_var("NEON_TEST_FPS_GARBAGE", "fast");
        assert_eq!(read_env_u32("NEON_TEST_FPS_GARBAGE", 60), 60);
        env::set_var("NEON_TEST_FPS_ZERO", "0");
        assert_eq!(read_env_u32("NEON_TEST_FPS_ZERO", 60), 60);
        env::set_var("NEON_TEST_FPS_OK", " 30 ");
        assert_eq!(read_env_u32("NEON_TEST_FPS_OK", 60), 30);
    }

    #[test]
    fn arena_dimensions_must_be_positive_and_finite() {
        env::set_var("NEON_TEST_WIDTH_NEG", "-5");
        assert_eq!(read_env_f64("NEON_TEST_WIDTH_NEG", 700.0), 700.0);
        env::set_var("NEON_TEST_WIDTH_INF", "inf");
        assert_eq!(read_env_f64("NEON_TEST_WIDTH_INF", 700.0), 700.0);
        env::set_var("NEON_TEST_WIDTH_OK", "1024.5");
        assert_eq!(read_env_f64("NEON_TEST_WIDTH_OK", 700.0), 1024.5);
    }

    #[test]
    fn blank_path_is_unset() {
        env::set_var("NEON_TEST_SCORE_FILE_BLANK", "   ");
        assert_eq!(read_env_path("NEON_TEST_SCORE_FILE_BLANK"), None);
        assert_eq!(read_env_path("NEON_TEST_SCORE_FILE_MISSING"), None);
    }
}
