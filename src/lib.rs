//! # number-guess
//!
//! A timed number-guessing game engine.
//!
//! The player picks a difficulty (attempt budget) and a range, then guesses
//! a hidden target until they get it, run out of attempts, or run out of
//! time. Rendering is left to the host: it dispatches intents and draws the
//! `ViewState` snapshots the engine publishes.
//!
//! ## Architecture
//!
//! - **One state value**: `GameState` is mutated only through `GameEngine`
//!   operations, each of which returns a fresh `ViewState`.
//! - **Injectable collaborators**: targets come from a `TargetSource`
//!   (seeded ChaCha8 by default), time from a `Clock` (manual or interval).
//! - **Explicit cancellation**: `GameSession` keeps one tick subscription
//!   alive only while the round awaits input, and stamps every tick with a
//!   timer epoch so stale ticks are dropped.
//!
//! ## Modules
//!
//! - `core`: configuration, state, intents, view-state, RNG
//! - `engine`: the rules engine and the clock-driven session
//! - `clock`: tick sources

pub mod clock;
pub mod core;
pub mod engine;

// Re-export commonly used types
pub use crate::core::{
    Difficulty, EngineSettings, Feedback, GameConfig, GameRng, GameState, Intent, Phase,
    RoundOutcome, Selection, TargetSource, TimerEpoch, ViewState,
};

pub use crate::engine::{EngineError, GameEngine, GameSession, ValidationError};

pub use crate::clock::{CancelHandle, Clock, IntervalClock, ManualClock};
