use std::f64::consts::{PI, TAU};

use neon_asteroids_core::geometry::Vec2;
use neon_asteroids_core::{FrameInput, GameConfig, WorldSnapshot};

use super::AutopilotBot;

const SPINNER_FIRE_PERIOD: u32 = 12;

const HUNTER_TURN_DEADZONE: f64 = 0.06;
const HUNTER_AIM_TOLERANCE: f64 = 0.18;
const HUNTER_THRUST_CONE: f64 = 0.5;
const HUNTER_THRUST_DISTANCE: f64 = 220.0;
const HUNTER_CRUISE_SPEED: f64 = 2.5;

#[derive(Clone, Copy, Debug, Default)]
pub struct IdleBot;

impl IdleBot {
    pub const ID: &'static str = "idle";
}

impl AutopilotBot for IdleBot {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn description(&self) -> &'static str {
        "never touches the controls"
    }

    fn reset(&mut self, _seed: u32) {}

    fn next_input(&mut self, _world: &WorldSnapshot) -> FrameInput {
        FrameInput::default()
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct SpinnerBot {
    tick: u32,
}

impl SpinnerBot {
    pub const ID: &'static str = "spinner";
}

impl AutopilotBot for SpinnerBot {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn description(&self) -> &'static str {
        "turns clockwise forever and taps fire on a fixed period"
    }

    fn reset(&mut self, _seed: u32) {
        self.tick = 0;
    }

    fn next_input(&mut self, _world: &WorldSnapshot) -> FrameInput {
        let fire = self.tick % SPINNER_FIRE_PERIOD == 0;
        self.tick = self.tick.wrapping_add(1);
        FrameInput {
            right: true,
            fire,
            ..FrameInput::default()
        }
    }
}

/// Chases the nearest asteroid across the wrapped arena.
#[derive(Clone, Copy, Debug, Default)]
pub struct HunterBot {
    fired_last_frame: bool,
    saw_game_over: bool,
}

impl HunterBot {
    pub const ID: &'static str = "hunter";
}

impl AutopilotBot for HunterBot {
    fn id(&self) -> &'static str {
        Self::ID
    }

    fn description(&self) -> &'static str {
        "aims at the nearest asteroid, fires when lined up, closes distance gently"
    }

    fn reset(&mut self, _seed: u32) {
        *self = Self::default();
    }

    fn next_input(&mut self, world: &WorldSnapshot) -> FrameInput {
        if world.is_game_over() {
            // Press start on the second game-over frame so the edge is seen.
            let start = self.saw_game_over;
            self.saw_game_over = true;
            self.fired_last_frame = false;
            return FrameInput {
                start,
                ..FrameInput::default()
            };
        }
        self.saw_game_over = false;

        let ship = world.ship.position;
        let Some(offset) = world
            .asteroids
            .iter()
            .map(|asteroid| toroidal_offset(ship, asteroid.position, &world.arena))
            .min_by(|a, b| a.length().total_cmp(&b.length()))
        else {
            self.fired_last_frame = false;
            return FrameInput::default();
        };

        let error = angle_between(world.ship.heading, offset.y.atan2(offset.x));
        let aligned = error.abs() < HUNTER_AIM_TOLERANCE;
        // Fire triggers on key-down, so release every other frame.
        let fire = aligned && !self.fired_last_frame;
        self.fired_last_frame = fire;

        FrameInput {
            left: error < -HUNTER_TURN_DEADZONE,
            right: error > HUNTER_TURN_DEADZONE,
            thrust: error.abs() < HUNTER_THRUST_CONE
                && offset.length() > HUNTER_THRUST_DISTANCE
                && world.ship.velocity.length() < HUNTER_CRUISE_SPEED,
            fire,
            start: false,
        }
    }
}

/// Shortest displacement from `from` to `to` when the arena edges wrap.
pub(crate) fn toroidal_offset(from: Vec2, to: Vec2, arena: &GameConfig) -> Vec2 {
    Vec2::new(
        shortest_delta(to.x - from.x, arena.arena_width),
        shortest_delta(to.y - from.y, arena.arena_height),
    )
}

#[inline]
fn shortest_delta(delta: f64, span: f64) -> f64 {
    delta - span * (delta / span).round()
}

/// Signed turn from `heading` to `target`, in `(-PI, PI]`.
pub(crate) fn angle_between(heading: f64, target: f64) -> f64 {
    let diff = (target - heading).rem_euclid(TAU);
    if diff > PI {
        diff - TAU
    } else {
        diff
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use neon_asteroids_core::{Game, GameMode};

    #[test]
    fn offset_takes_the_short_way_round() {
        let arena = GameConfig::default();
        let offset = toroidal_offset(Vec2::new(10.0, 250.0), Vec2::new(690.0, 250.0), &arena);
        assert!((offset.x + 20.0).abs() < 1e-9);
        assert_eq!(offset.y, 0.0);

        let offset = toroidal_offset(Vec2::new(100.0, 490.0), Vec2::new(100.0, 5.0), &arena);
        assert!((offset.y - 15.0).abs() < 1e-9);
    }

    #[test]
    fn angle_between_is_signed() {
        assert!((angle_between(0.0, 0.5) - 0.5).abs() < 1e-12);
        assert!((angle_between(0.5, 0.0) + 0.5).abs() < 1e-12);
        assert!((angle_between(0.1, TAU - 0.1) + 0.2).abs() < 1e-9);
        assert!((angle_between(TAU - 0.1, 0.1) - 0.2).abs() < 1e-9);
    }

    #[test]
    fn spinner_taps_fire_periodically() {
        let game = Game::new(GameConfig::default(), 1);
        let world = game.snapshot();
        let mut bot = SpinnerBot::default();
        let fires = (0..SPINNER_FIRE_PERIOD * 3)
            .map(|_| bot.next_input(&world))
            .filter(|input| {
                assert!(input.right && !input.left);
                input.fire
            })
            .count();
        assert_eq!(fires, 3);
    }

    #[test]
    fn hunter_never_holds_fire() {
        let mut game = Game::new(GameConfig::default(), 3);
        game.start();
        let world = game.snapshot();
        let mut bot = HunterBot::default();

        let mut previous = false;
        for _ in 0..20 {
            let input = bot.next_input(&world);
            assert!(!(input.fire && previous));
            assert!(!(input.left && input.right));
            previous = input.fire;
        }
    }

    #[test]
    fn hunter_restarts_after_game_over() {
        let game = Game::new(GameConfig::default(), 5);
        let mut world = game.snapshot();
        world.mode = GameMode::GameOver;
        let mut bot = HunterBot::default();

        assert!(!bot.next_input(&world).start);
        assert!(bot.next_input(&world).start);
    }
}
