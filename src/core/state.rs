//! Round state.
//!
//! ## Phase
//!
//! Drives all behavior:
//! - `NotStarted`: picking difficulty and range
//! - `AwaitingInput`: clock running, guesses accepted
//! - `Paused`: clock frozen, guesses ignored
//! - `Over`: won or lost, waiting for a restart or a new round
//!
//! ## GameState
//!
//! One consolidated value per round. Only the engine mutates it.

use serde::{Deserialize, Serialize};

use super::config::GameConfig;

/// Lifecycle state of a round.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Phase {
    #[default]
    NotStarted,
    AwaitingInput,
    Paused,
    Over,
}

impl Phase {
    /// Whether the round clock should be running.
    #[must_use]
    pub const fn is_ticking(self) -> bool {
        matches!(self, Phase::AwaitingInput)
    }
}

/// Last outcome shown to the player.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Feedback {
    #[default]
    None,
    TooHigh,
    TooLow,
    Won,
    LostByAttempts,
    LostByTime,
}

impl Feedback {
    /// Display text for this feedback. `target` is only shown once the
    /// round has concluded.
    #[must_use]
    pub fn message(self, target: u32) -> Option<String> {
        match self {
            Feedback::None => None,
            Feedback::TooHigh => Some("Too high!".to_string()),
            Feedback::TooLow => Some("Too low!".to_string()),
            Feedback::Won => Some(format!(
                "Congratulations! You guessed the correct number: {target}"
            )),
            Feedback::LostByAttempts => Some(format!("Out of attempts! The number was {target}")),
            Feedback::LostByTime => Some(format!("Time's up! The number was {target}")),
        }
    }
}

/// Identifies one uninterrupted stretch of `AwaitingInput`.
///
/// Bumped each time the phase enters `AwaitingInput`. A tick carrying an
/// older epoch was scheduled against a superseded round or a paused one.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct TimerEpoch(pub u64);

impl TimerEpoch {
    #[must_use]
    pub const fn next(self) -> Self {
        Self(self.0.wrapping_add(1))
    }
}

/// Mutable state of the current round.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,

    /// Configuration the current round started with.
    pub config: Option<GameConfig>,

    /// Hidden target, `None` until a round starts.
    pub target: Option<u32>,

    /// Wrong guesses accepted this round.
    pub attempts_used: u32,

    /// Attempt budget of the current round (0 before any round).
    pub max_attempts: u32,

    pub remaining_secs: u32,

    pub last_feedback: Feedback,

    /// Raw, unsubmitted input from the renderer.
    pub pending_guess: String,

    /// Set when a start is rejected.
    pub validation_message: Option<String>,

    pub epoch: TimerEpoch,
}

impl GameState {
    /// Create a fresh, not-yet-started state.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether the attempt budget is spent.
    #[must_use]
    pub fn attempts_exhausted(&self) -> bool {
        self.max_attempts > 0 && self.attempts_used >= self.max_attempts
    }

    /// Attempts left this round.
    #[must_use]
    pub fn attempts_remaining(&self) -> u32 {
        self.max_attempts.saturating_sub(self.attempts_used)
    }

    /// Text for the last feedback, if any.
    #[must_use]
    pub fn feedback_text(&self) -> Option<String> {
        self.last_feedback.message(self.target.unwrap_or_default())
    }
}
