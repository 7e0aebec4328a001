//! Engine integration tests.
//!
//! Walk full rounds through the public API with a fixed target source.

use number_guess::core::{
    Difficulty, EngineSettings, Feedback, Intent, Phase, RoundOutcome, Selection, TargetSource,
};
use number_guess::engine::{GameEngine, ValidationError};

/// Target source that hands out a scripted sequence of targets.
struct Scripted {
    targets: Vec<u32>,
}

impl Scripted {
    fn new(targets: &[u32]) -> Self {
        Self {
            targets: targets.iter().rev().copied().collect(),
        }
    }
}

impl TargetSource for Scripted {
    fn next_target(&mut self, max: u32) -> u32 {
        self.targets.pop().unwrap_or(1).min(max)
    }
}

fn engine_with(targets: &[u32]) -> GameEngine<Scripted> {
    GameEngine::with_source(EngineSettings::default(), Scripted::new(targets))
}

// =============================================================================
// Scenarios
// =============================================================================

/// Hard, range 10, target 7: three wrong guesses lose the round.
#[test]
fn test_hard_round_lost_on_attempts() {
    let mut engine = engine_with(&[7]);
    engine.configure_difficulty(Difficulty::Hard);
    engine.configure_range(10);
    engine.start_round().unwrap();

    let view = engine.submit_guess("5");
    assert_eq!(view.feedback, Feedback::TooLow);
    assert_eq!(view.attempts_used, 1);

    let view = engine.submit_guess("9");
    assert_eq!(view.feedback, Feedback::TooHigh);
    assert_eq!(view.attempts_used, 2);

    let view = engine.submit_guess("3");
    assert_eq!(view.feedback, Feedback::TooLow);
    assert_eq!(view.attempts_used, 3);
    assert_eq!(view.phase, Phase::Over);
    assert_eq!(view.outcome, Some(RoundOutcome::OutOfAttempts));
    assert_eq!(view.revealed_target, Some(7));
}

/// Easy, range 50, target 20: junk input is free, the right number wins.
#[test]
fn test_easy_round_won_after_junk_input() {
    let mut engine = engine_with(&[20]);
    engine.configure_difficulty(Difficulty::Easy);
    engine.configure_range(50);
    engine.start_round().unwrap();

    let view = engine.submit_guess("abc");
    assert_eq!(view.attempts_used, 0);
    assert_eq!(view.feedback, Feedback::None);
    assert_eq!(view.phase, Phase::AwaitingInput);

    let view = engine.submit_guess("20");
    assert_eq!(view.feedback, Feedback::Won);
    assert_eq!(view.phase, Phase::Over);
    assert_eq!(
        view.feedback_text.as_deref(),
        Some("Congratulations! You guessed the correct number: 20")
    );
}

/// One second left: the next tick ends the round on time.
#[test]
fn test_last_second_timeout() {
    let mut engine = engine_with(&[4]);
    engine.configure_difficulty(Difficulty::Medium);
    engine.start_round().unwrap();

    for _ in 0..29 {
        engine.tick();
    }
    assert_eq!(engine.view().remaining_secs, 1);

    let view = engine.tick();
    assert_eq!(view.remaining_secs, 0);
    assert_eq!(view.phase, Phase::Over);
    assert_eq!(view.feedback, Feedback::LostByTime);
    assert_eq!(view.outcome, Some(RoundOutcome::OutOfTime));
    assert_eq!(view.feedback_text.as_deref(), Some("Time's up! The number was 4"));
}

// =============================================================================
// Lifecycle
// =============================================================================

#[test]
fn test_rejected_start_leaves_round_alone() {
    let mut engine = engine_with(&[7]);

    let err = engine.start_round().unwrap_err();
    assert_eq!(err, ValidationError::DifficultyNotSelected);

    let state = engine.state();
    assert_eq!(state.phase, Phase::NotStarted);
    assert_eq!(state.attempts_used, 0);
    assert_eq!(state.target, None);
    assert!(state.validation_message.is_some());
}

#[test]
fn test_range_change_applies_to_next_round() {
    let mut engine = engine_with(&[3, 60]);
    engine
        .start_round_with(Selection::default().with_difficulty(Difficulty::Easy))
        .unwrap();
    engine.configure_range(75);
    assert_eq!(engine.state().target, Some(3));

    engine.start_round().unwrap();
    assert_eq!(engine.view().range, 75);
    assert_eq!(engine.state().config.map(|c| c.range), Some(75));
    assert_eq!(engine.state().target, Some(60));
}

#[test]
fn test_new_round_after_win() {
    let mut engine = engine_with(&[5, 8]);
    engine.configure_difficulty(Difficulty::Hard);
    engine.start_round().unwrap();
    engine.submit_guess("5");
    assert_eq!(engine.phase(), Phase::Over);

    let view = engine.start_round().unwrap();
    assert_eq!(view.phase, Phase::AwaitingInput);
    assert_eq!(view.feedback, Feedback::None);
    assert_eq!(engine.state().target, Some(8));
}

#[test]
fn test_restart_from_every_phase() {
    let setups: [fn(&mut GameEngine<Scripted>); 4] = [
        |_| {},
        |e| {
            e.configure_difficulty(Difficulty::Easy);
            e.start_round().unwrap();
        },
        |e| {
            e.configure_difficulty(Difficulty::Easy);
            e.start_round().unwrap();
            e.pause();
        },
        |e| {
            e.configure_difficulty(Difficulty::Hard);
            e.start_round().unwrap();
            e.submit_guess("1");
            e.submit_guess("1");
            e.submit_guess("1");
        },
    ];

    for setup in setups {
        let mut engine = engine_with(&[9]);
        setup(&mut engine);

        let view = engine.restart();
        assert_eq!(view.phase, Phase::NotStarted);
        assert_eq!(view.attempts_used, 0);
        assert_eq!(view.feedback, Feedback::None);
        assert_eq!(view.difficulty, None);
        assert!(view.pending_guess.is_empty());
        assert!(view.validation_message.is_none());
    }
}

#[test]
fn test_paused_round_ignores_everything_but_resume() {
    let mut engine = engine_with(&[7]);
    engine.configure_difficulty(Difficulty::Easy);
    engine.start_round().unwrap();
    engine.pause();

    for _ in 0..10 {
        engine.tick();
    }
    engine.submit_guess("7");

    let view = engine.view();
    assert_eq!(view.phase, Phase::Paused);
    assert_eq!(view.remaining_secs, 30);
    assert_eq!(view.feedback, Feedback::None);

    engine.resume();
    let view = engine.submit_guess("7");
    assert!(view.is_won());
}

// =============================================================================
// Intents
// =============================================================================

#[test]
fn test_json_intents_drive_a_round() {
    let mut engine = engine_with(&[12]);
    let script = [
        r#"{"configure_difficulty":"medium"}"#,
        r#"{"configure_range":20}"#,
        r#""start_round""#,
        r#"{"update_guess":"15"}"#,
        r#""submit_pending""#,
        r#"{"submit_guess":"12"}"#,
    ];

    let mut last = None;
    for json in script {
        let intent: Intent = serde_json::from_str(json).unwrap();
        last = Some(engine.apply(intent).unwrap());
    }

    let view = last.unwrap();
    assert!(view.is_won());
    assert_eq!(view.attempts_used, 1);
    assert_eq!(view.max_attempts, 6);
}
