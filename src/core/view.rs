//! Read-only view-state handed to renderers after every operation.

use serde::{Deserialize, Serialize};

use super::config::{Difficulty, Selection};
use super::state::{Feedback, GameState, Phase};

/// How a finished round ended.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoundOutcome {
    Won,
    OutOfAttempts,
    OutOfTime,
}

/// Snapshot of everything a renderer may display.
///
/// The target is only revealed once the round is over.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct ViewState {
    pub phase: Phase,
    pub difficulty: Option<Difficulty>,
    pub range: u32,
    pub attempts_used: u32,
    pub max_attempts: u32,
    pub attempts_remaining: u32,
    pub remaining_secs: u32,
    pub feedback: Feedback,
    pub feedback_text: Option<String>,
    pub validation_message: Option<String>,
    pub pending_guess: String,
    pub outcome: Option<RoundOutcome>,
    pub revealed_target: Option<u32>,
}

impl ViewState {
    /// Build a snapshot from the engine's state and pending selection.
    #[must_use]
    pub fn capture(state: &GameState, selection: &Selection) -> Self {
        let outcome = (state.phase == Phase::Over).then(|| match state.last_feedback {
            Feedback::Won => RoundOutcome::Won,
            Feedback::LostByTime => RoundOutcome::OutOfTime,
            _ => RoundOutcome::OutOfAttempts,
        });

        Self {
            phase: state.phase,
            difficulty: selection.difficulty,
            range: selection.range,
            attempts_used: state.attempts_used,
            max_attempts: state.max_attempts,
            attempts_remaining: state.attempts_remaining(),
            remaining_secs: state.remaining_secs,
            feedback: state.last_feedback,
            feedback_text: state.feedback_text(),
            validation_message: state.validation_message.clone(),
            pending_guess: state.pending_guess.clone(),
            outcome,
            revealed_target: outcome.and(state.target),
        }
    }

    /// Whether the player won the round.
    #[must_use]
    pub fn is_won(&self) -> bool {
        self.outcome == Some(RoundOutcome::Won)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn over_state(feedback: Feedback) -> GameState {
        GameState {
            phase: Phase::Over,
            target: Some(7),
            last_feedback: feedback,
            ..GameState::default()
        }
    }

    #[test]
    fn test_target_hidden_while_playing() {
        let state = GameState {
            phase: Phase::AwaitingInput,
            target: Some(7),
            max_attempts: 3,
            remaining_secs: 30,
            ..GameState::default()
        };

        let view = ViewState::capture(&state, &Selection::default());
        assert_eq!(view.revealed_target, None);
        assert_eq!(view.outcome, None);
        assert_eq!(view.max_attempts, 3);
        assert_eq!(view.attempts_remaining, 3);
    }

    #[test]
    fn test_outcomes() {
        let selection = Selection::default();

        let won = ViewState::capture(&over_state(Feedback::Won), &selection);
        assert_eq!(won.outcome, Some(RoundOutcome::Won));
        assert!(won.is_won());
        assert_eq!(won.revealed_target, Some(7));

        let timed_out = ViewState::capture(&over_state(Feedback::LostByTime), &selection);
        assert_eq!(timed_out.outcome, Some(RoundOutcome::OutOfTime));

        let last_hint = ViewState::capture(&over_state(Feedback::TooLow), &selection);
        assert_eq!(last_hint.outcome, Some(RoundOutcome::OutOfAttempts));
        assert_eq!(last_hint.feedback_text.as_deref(), Some("Too low!"));
    }

    #[test]
    fn test_selection_carried() {
        let selection = Selection::default()
            .with_difficulty(Difficulty::Easy)
            .with_range(40);
        let view = ViewState::capture(&GameState::new(), &selection);

        assert_eq!(view.difficulty, Some(Difficulty::Easy));
        assert_eq!(view.range, 40);
        assert_eq!(view.phase, Phase::NotStarted);
    }

    #[test]
    fn test_view_serializes() {
        let view = ViewState::capture(&over_state(Feedback::Won), &Selection::default());
        let json = serde_json::to_string(&view).unwrap();
        let back: ViewState = serde_json::from_str(&json).unwrap();
        assert_eq!(view, back);
    }
}
