//! The game engine: round lifecycle, attempt and timer accounting, feedback.
//!
//! All operations are synchronous and run to completion. Calls that do not
//! fit the current phase are no-ops, never errors.

use std::cmp::Ordering;
use std::fmt;

use tracing::{debug, info};

use crate::core::{
    clamp_range, Difficulty, EngineSettings, Feedback, GameConfig, GameRng, GameState, Intent,
    Phase, Selection, TargetSource, TimerEpoch, ViewState,
};

use super::error::{InvalidGuess, ValidationError};

/// Callback invoked with the new view-state after every state change.
pub type Observer = Box<dyn FnMut(&ViewState) + Send>;

/// Parse raw renderer input into a guess.
///
/// Surrounding whitespace is ignored. Negative and out-of-range numbers
/// are valid guesses.
pub fn parse_guess(raw: &str) -> Result<i64, InvalidGuess> {
    raw.trim()
        .parse::<i64>()
        .map_err(|_| InvalidGuess(raw.to_string()))
}

/// Owns the game state and enforces the round rules.
///
/// ```
/// use number_guess::core::{Difficulty, EngineSettings, Phase};
/// use number_guess::engine::GameEngine;
///
/// let mut engine = GameEngine::new(EngineSettings::default().with_seed(1));
/// engine.configure_difficulty(Difficulty::Hard);
/// let view = engine.start_round().unwrap();
///
/// assert_eq!(view.phase, Phase::AwaitingInput);
/// assert_eq!(view.max_attempts, 3);
/// assert_eq!(view.remaining_secs, 30);
/// ```
pub struct GameEngine<R = GameRng> {
    settings: EngineSettings,
    rng: R,
    selection: Selection,
    state: GameState,
    observers: Vec<Observer>,
}

impl GameEngine<GameRng> {
    /// Create an engine drawing targets from a `GameRng`.
    ///
    /// Uses `settings.seed` when set, entropy otherwise.
    #[must_use]
    pub fn new(settings: EngineSettings) -> Self {
        let rng = match settings.seed {
            Some(seed) => GameRng::new(seed),
            None => GameRng::from_entropy(),
        };
        debug!(seed = rng.seed(), "target rng seeded");
        Self::with_source(settings, rng)
    }
}

impl<R: TargetSource> GameEngine<R> {
    /// Create an engine with a custom target source.
    pub fn with_source(settings: EngineSettings, rng: R) -> Self {
        Self {
            selection: Selection::new(settings.default_range),
            settings,
            rng,
            state: GameState::new(),
            observers: Vec::new(),
        }
    }

    // === Accessors ===

    /// Current round state.
    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Pending difficulty/range selection.
    #[must_use]
    pub fn selection(&self) -> &Selection {
        &self.selection
    }

    #[must_use]
    pub fn settings(&self) -> &EngineSettings {
        &self.settings
    }

    #[must_use]
    pub fn phase(&self) -> Phase {
        self.state.phase
    }

    /// Epoch of the current `AwaitingInput` stretch.
    #[must_use]
    pub fn timer_epoch(&self) -> TimerEpoch {
        self.state.epoch
    }

    /// Snapshot for renderers.
    #[must_use]
    pub fn view(&self) -> ViewState {
        ViewState::capture(&self.state, &self.selection)
    }

    /// Register a callback for every state change.
    pub fn subscribe(&mut self, observer: impl FnMut(&ViewState) + Send + 'static) {
        self.observers.push(Box::new(observer));
    }

    // === Configuration ===

    /// Select the difficulty for the next round.
    ///
    /// Clears a pending "select a difficulty" message.
    pub fn configure_difficulty(&mut self, difficulty: Difficulty) -> ViewState {
        self.selection.difficulty = Some(difficulty);
        self.state.validation_message = None;
        debug!(%difficulty, "difficulty selected");
        self.publish()
    }

    /// Select the range for the next round, clamped to `[10, 100]`.
    pub fn configure_range(&mut self, range: u32) -> ViewState {
        self.selection.range = clamp_range(range);
        debug!(requested = range, range = self.selection.range, "range selected");
        self.publish()
    }

    /// Replace the whole pending selection.
    pub fn configure(&mut self, selection: Selection) -> ViewState {
        let range = selection.range;
        self.selection = selection.with_range(range);
        if self.selection.difficulty.is_some() {
            self.state.validation_message = None;
        }
        debug!(selection = ?self.selection, "selection replaced");
        self.publish()
    }

    /// Store the renderer's current input without submitting it.
    pub fn update_guess(&mut self, raw: impl Into<String>) -> ViewState {
        self.state.pending_guess = raw.into();
        self.publish()
    }

    // === Round Lifecycle ===

    /// Start a round from the pending selection.
    ///
    /// Replaces any round in progress. Fails without touching the round
    /// when no difficulty is selected; the rejection is surfaced through
    /// `validation_message`.
    pub fn start_round(&mut self) -> Result<ViewState, ValidationError> {
        let Some(difficulty) = self.selection.difficulty else {
            return self.reject(ValidationError::DifficultyNotSelected);
        };

        let config = GameConfig::new(
            difficulty,
            self.selection.range,
            self.settings.time_limit_secs,
        );
        let target = self.rng.next_target(config.range);
        let epoch = self.state.epoch.next();

        self.state = GameState {
            phase: Phase::AwaitingInput,
            config: Some(config),
            target: Some(target),
            attempts_used: 0,
            max_attempts: config.max_attempts(),
            remaining_secs: config.time_limit_secs,
            last_feedback: Feedback::None,
            pending_guess: String::new(),
            validation_message: None,
            epoch,
        };

        info!(
            %difficulty,
            range = config.range,
            time_limit = config.time_limit_secs,
            "round started"
        );
        Ok(self.publish())
    }

    /// Apply `selection` and start a round from it.
    ///
    /// A selection without a difficulty is rejected before anything is
    /// applied: the pending selection and the current round stay as they
    /// were.
    pub fn start_round_with(&mut self, selection: Selection) -> Result<ViewState, ValidationError> {
        if selection.difficulty.is_none() {
            return self.reject(ValidationError::DifficultyNotSelected);
        }
        let range = selection.range;
        self.selection = selection.with_range(range);
        self.start_round()
    }

    fn reject(&mut self, err: ValidationError) -> Result<ViewState, ValidationError> {
        debug!(phase = ?self.state.phase, "start rejected: {err}");
        self.state.validation_message = Some(err.player_message().to_string());
        self.publish();
        Err(err)
    }

    /// Freeze the clock and guess submission.
    pub fn pause(&mut self) -> ViewState {
        if self.state.phase != Phase::AwaitingInput {
            return self.ignored("pause");
        }
        self.state.phase = Phase::Paused;
        debug!(remaining = self.state.remaining_secs, "paused");
        self.publish()
    }

    /// Continue a paused round from the frozen clock value.
    pub fn resume(&mut self) -> ViewState {
        if self.state.phase != Phase::Paused {
            return self.ignored("resume");
        }
        self.state.phase = Phase::AwaitingInput;
        self.state.epoch = self.state.epoch.next();
        debug!(remaining = self.state.remaining_secs, "resumed");
        self.publish()
    }

    /// Back to the difficulty/range selection with everything cleared.
    pub fn restart(&mut self) -> ViewState {
        let epoch = self.state.epoch;
        self.selection = Selection::new(self.settings.default_range);
        self.state = GameState {
            epoch,
            ..GameState::new()
        };
        debug!("restarted");
        self.publish()
    }

    // === Guessing ===

    /// Submit raw input as a guess.
    ///
    /// Input that is not an integer is dropped: no attempt is consumed and
    /// the feedback is unchanged.
    pub fn submit_guess(&mut self, raw: &str) -> ViewState {
        if self.state.phase != Phase::AwaitingInput {
            return self.ignored("submit_guess");
        }
        match parse_guess(raw) {
            Ok(guess) => self.resolve_guess(guess),
            Err(err) => {
                debug!("guess dropped: {err}");
                self.view()
            }
        }
    }

    /// Submit an already-numeric guess.
    pub fn submit_number(&mut self, guess: i64) -> ViewState {
        if self.state.phase != Phase::AwaitingInput {
            return self.ignored("submit_number");
        }
        self.resolve_guess(guess)
    }

    /// Submit the input last stored with `update_guess`.
    pub fn submit_pending(&mut self) -> ViewState {
        let raw = self.state.pending_guess.clone();
        self.submit_guess(&raw)
    }

    fn resolve_guess(&mut self, guess: i64) -> ViewState {
        let Some(target) = self.state.target else {
            return self.ignored("guess without target");
        };

        match guess.cmp(&i64::from(target)) {
            Ordering::Equal => {
                self.state.last_feedback = Feedback::Won;
                self.state.phase = Phase::Over;
                info!(
                    secret = target,
                    attempts = self.state.attempts_used,
                    remaining = self.state.remaining_secs,
                    "round won"
                );
            }
            ordering => {
                self.state.attempts_used += 1;
                self.state.last_feedback = if ordering == Ordering::Greater {
                    Feedback::TooHigh
                } else {
                    Feedback::TooLow
                };
                debug!(
                    guess,
                    attempts = self.state.attempts_used,
                    feedback = ?self.state.last_feedback,
                    "wrong guess"
                );

                if self.state.attempts_exhausted() {
                    self.state.phase = Phase::Over;
                    if self.settings.surface_attempts_loss {
                        self.state.last_feedback = Feedback::LostByAttempts;
                    }
                    info!(
                        secret = target,
                        attempts = self.state.attempts_used,
                        "round lost: out of attempts"
                    );
                }
            }
        }

        self.publish()
    }

    // === Clock ===

    /// One second elapsed.
    pub fn tick(&mut self) -> ViewState {
        if self.state.phase != Phase::AwaitingInput {
            return self.view();
        }

        self.state.remaining_secs = self.state.remaining_secs.saturating_sub(1);
        if self.state.remaining_secs == 0 {
            self.state.phase = Phase::Over;
            self.state.last_feedback = Feedback::LostByTime;
            info!(
                secret = self.state.target.unwrap_or_default(),
                attempts = self.state.attempts_used,
                "round lost: out of time"
            );
        }
        self.publish()
    }

    /// One second elapsed, as scheduled during `epoch`.
    ///
    /// Ignored when `epoch` belongs to an earlier stretch of play.
    pub fn tick_for(&mut self, epoch: TimerEpoch) -> ViewState {
        if epoch != self.state.epoch {
            debug!(stale = epoch.0, current = self.state.epoch.0, "stale tick dropped");
            return self.view();
        }
        self.tick()
    }

    // === Dispatch ===

    /// Apply a renderer intent.
    pub fn apply(&mut self, intent: Intent) -> Result<ViewState, ValidationError> {
        let view = match intent {
            Intent::ConfigureDifficulty(difficulty) => self.configure_difficulty(difficulty),
            Intent::ConfigureRange(range) => self.configure_range(range),
            Intent::UpdateGuess(raw) => self.update_guess(raw),
            Intent::StartRound => return self.start_round(),
            Intent::Pause => self.pause(),
            Intent::Resume => self.resume(),
            Intent::SubmitGuess(raw) => self.submit_guess(&raw),
            Intent::SubmitPending => self.submit_pending(),
            Intent::Tick => self.tick(),
            Intent::Restart => self.restart(),
        };
        Ok(view)
    }

    fn ignored(&self, operation: &str) -> ViewState {
        debug!(operation, phase = ?self.state.phase, "ignored in current phase");
        self.view()
    }

    fn publish(&mut self) -> ViewState {
        let view = self.view();
        for observer in &mut self.observers {
            observer(&view);
        }
        view
    }
}

impl<R> fmt::Debug for GameEngine<R> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameEngine")
            .field("settings", &self.settings)
            .field("selection", &self.selection)
            .field("state", &self.state)
            .field("observers", &self.observers.len())
            .finish_non_exhaustive()
    }
}
