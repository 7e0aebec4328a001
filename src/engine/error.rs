//! Engine error types.

use thiserror::Error;

/// Text shown to the player when a start is rejected.
pub const SELECT_DIFFICULTY_MESSAGE: &str = "Please select a difficulty mode";

/// A round could not start.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("difficulty not selected")]
    DifficultyNotSelected,
}

impl ValidationError {
    /// Message surfaced in `ViewState::validation_message`.
    #[must_use]
    pub fn player_message(self) -> &'static str {
        match self {
            ValidationError::DifficultyNotSelected => SELECT_DIFFICULTY_MESSAGE,
        }
    }
}

/// A guess that is not an integer. Dropped without penalty.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("not a number: `{0}`")]
pub struct InvalidGuess(pub String);

/// Errors at the session boundary.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum EngineError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("engine state lock poisoned")]
    Poisoned,
}
