use serde::{Deserialize, Serialize};

use crate::sim::{Game, GameEvents};
use crate::store::ScoreStore;

/// Held-key state for one frame.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrameInput {
    pub left: bool,
    pub right: bool,
    pub thrust: bool,
    pub fire: bool,
    pub start: bool,
}

impl FrameInput {
    pub fn is_idle(self) -> bool {
        self == Self::default()
    }
}

#[inline]
pub fn encode_input_byte(input: FrameInput) -> u8 {
    (if input.left { 0x01 } else { 0 })
        | (if input.right { 0x02 } else { 0 })
        | (if input.thrust { 0x04 } else { 0 })
        | (if input.fire { 0x08 } else { 0 })
        | (if input.start { 0x10 } else { 0 })
}

/// Unknown high bits are ignored.
#[inline]
pub fn decode_input_byte(byte: u8) -> FrameInput {
    FrameInput {
        left: (byte & 0x01) != 0,
        right: (byte & 0x02) != 0,
        thrust: (byte & 0x04) != 0,
        fire: (byte & 0x08) != 0,
        start: (byte & 0x10) != 0,
    }
}

/// Turns per-frame held keys into the key-down / key-up calls a keyboard
/// handler would make.
#[derive(Clone, Copy, Debug, Default)]
pub struct InputLatch {
    held: FrameInput,
}

impl InputLatch {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn held(&self) -> FrameInput {
        self.held
    }

    pub fn apply<S: ScoreStore, E: GameEvents>(&mut self, game: &mut Game<S, E>, input: FrameInput) {
        let prev = self.held;
        self.held = input;

        if input.start && !prev.start {
            game.start();
        }

        let ship = game.ship_mut();

        if input.left && !prev.left {
            ship.rotate_left();
        }
        if input.right && !prev.right {
            ship.rotate_right();
        }
        // Releasing a key only cancels the rotation it started.
        if !input.left && prev.left && ship.rotation_speed() < 0.0 {
            ship.stop_rotating();
        }
        if !input.right && prev.right && ship.rotation_speed() > 0.0 {
            ship.stop_rotating();
        }

        if input.thrust && !prev.thrust {
            ship.start_thrust();
        }
        if !input.thrust && prev.thrust {
            ship.stop_thrust();
        }

        if input.fire && !prev.fire {
            game.fire_projectile();
        }
    }
}
