pub mod collision;
pub mod constants;
pub mod error;
pub mod geometry;
pub mod input;
pub mod rng;
pub mod sim;
pub mod store;
pub mod wrap;

pub use collision::intersects;
pub use error::StoreError;
pub use geometry::Vec2;
pub use input::{decode_input_byte, encode_input_byte, FrameInput, InputLatch};
pub use sim::{
    replay, replay_with_checkpoints, AsteroidSize, Game, GameConfig, GameEvents, GameMode,
    NoopEvents, ReplayCheckpoint, ReplayResult, WorldSnapshot,
};
pub use store::{MemoryScoreStore, ScoreStore};
