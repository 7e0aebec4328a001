//! Round rules and the session that wires them to a clock.
//!
//! - `GameEngine`: single source of truth for the round state
//! - `GameSession`: serializes clock ticks and renderer intents, and owns
//!   the tick subscription

#[allow(clippy::module_inception)]
pub mod engine;
pub mod error;
pub mod session;

pub use engine::{parse_guess, GameEngine, Observer};
pub use error::{EngineError, InvalidGuess, ValidationError, SELECT_DIFFICULTY_MESSAGE};
pub use session::GameSession;
