//! Core types: configuration, round state, intents, view-state, RNG.
//!
//! Everything here is plain data. The rules that move between states live
//! in `engine`.

pub mod config;
pub mod intent;
pub mod rng;
pub mod state;
pub mod view;

pub use config::{
    clamp_range, ConfigError, Difficulty, EngineSettings, GameConfig, ParseDifficultyError,
    Selection, DEFAULT_RANGE, DEFAULT_TIME_LIMIT_SECS, MAX_RANGE, MIN_RANGE,
    MIN_TIME_LIMIT_SECS,
};
pub use intent::Intent;
pub use rng::{GameRng, TargetSource};
pub use state::{Feedback, GameState, Phase, TimerEpoch};
pub use view::{RoundOutcome, ViewState};
