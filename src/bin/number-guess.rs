//! Line-based console front end.
//!
//! Commands: `easy`, `medium`, `hard`, `range N`, `start`, `pause`,
//! `resume`, `restart`, `quit`. Anything else is submitted as a guess.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use number_guess::{
    Difficulty, EngineError, EngineSettings, Feedback, GameSession, IntervalClock, Phase,
    RoundOutcome, Selection, ViewState,
};

#[derive(Debug, Parser)]
#[command(name = "number-guess", about = "Guess the hidden number before time runs out")]
struct Args {
    /// TOML settings file
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the target RNG
    #[arg(long)]
    seed: Option<u64>,

    /// Preselect a difficulty (easy, medium, hard)
    #[arg(long)]
    difficulty: Option<Difficulty>,

    /// Preselect the range upper bound (10-100)
    #[arg(long)]
    range: Option<u32>,
}

enum Command {
    Difficulty(Difficulty),
    Range(u32),
    Start,
    Pause,
    Resume,
    Restart,
    Quit,
    Guess(String),
}

fn parse_command(line: &str) -> Command {
    let line = line.trim();
    if let Ok(difficulty) = line.parse::<Difficulty>() {
        return Command::Difficulty(difficulty);
    }
    if let Some(rest) = line.strip_prefix("range") {
        if let Ok(range) = rest.trim().parse() {
            return Command::Range(range);
        }
    }
    match line {
        "start" => Command::Start,
        "pause" => Command::Pause,
        "resume" => Command::Resume,
        "restart" => Command::Restart,
        "quit" | "exit" => Command::Quit,
        _ => Command::Guess(line.to_string()),
    }
}

fn render(view: &ViewState) -> String {
    match view.phase {
        Phase::NotStarted => {
            let difficulty = view
                .difficulty
                .map_or_else(|| "none".to_string(), |d| d.to_string());
            let mut out = format!(
                "Difficulty: {difficulty} | Range: 1 - {}. Type `start` to play.",
                view.range
            );
            if let Some(message) = &view.validation_message {
                out.push_str(&format!("\n{message}"));
            }
            out
        }
        Phase::AwaitingInput | Phase::Paused => {
            let mut out = format!(
                "Attempts: {}/{} ({} left) | Time left: {}s",
                view.attempts_used, view.max_attempts, view.attempts_remaining, view.remaining_secs
            );
            if view.phase == Phase::Paused {
                out.push_str(" | PAUSED");
            }
            if let Some(text) = &view.feedback_text {
                out.push_str(&format!("\n{text}"));
            }
            out
        }
        Phase::Over => {
            let text = view.feedback_text.clone().unwrap_or_default();
            let hint_only = matches!(view.feedback, Feedback::TooHigh | Feedback::TooLow);
            let summary = match (view.outcome, view.revealed_target) {
                (Some(RoundOutcome::OutOfAttempts), Some(target)) if hint_only => {
                    format!("\nNo attempts left. The number was {target}.")
                }
                _ => String::new(),
            };
            format!("{text}{summary}\nType `restart` or `start` to play again.")
        }
    }
}

fn handle(
    session: &mut GameSession<IntervalClock>,
    command: Command,
) -> Result<Option<ViewState>> {
    let result = match command {
        Command::Difficulty(difficulty) => session.configure_difficulty(difficulty),
        Command::Range(range) => session.configure_range(range),
        Command::Start => session.start_round(),
        Command::Pause => session.pause(),
        Command::Resume => session.resume(),
        Command::Restart => session.restart(),
        Command::Quit => return Ok(None),
        Command::Guess(raw) => session.submit_guess(raw),
    };

    match result {
        Ok(view) => Ok(Some(view)),
        Err(EngineError::Validation(_)) => Ok(Some(session.view()?)),
        Err(err) => Err(err.into()),
    }
}

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    let args = Args::parse();

    let mut settings = match &args.config {
        Some(path) => EngineSettings::load(path)
            .with_context(|| format!("loading settings from {}", path.display()))?,
        None => EngineSettings::default(),
    };
    if let Some(seed) = args.seed {
        settings = settings.with_seed(seed);
    }

    let mut session = GameSession::new(settings, IntervalClock::new());

    // Announce a timeout the moment it happens rather than on the next command.
    let mut last_phase = Phase::NotStarted;
    session.subscribe(move |view| {
        if last_phase == Phase::AwaitingInput && view.outcome == Some(RoundOutcome::OutOfTime) {
            println!("\n{}", render(view));
        }
        last_phase = view.phase;
    })?;

    let mut selection = Selection::new(session.view()?.range);
    if let Some(difficulty) = args.difficulty {
        selection = selection.with_difficulty(difficulty);
    }
    if let Some(range) = args.range {
        selection = selection.with_range(range);
    }
    session.configure(selection)?;

    println!("Number Guessing Game");
    println!("{}", render(&session.view()?));

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    for line in stdin.lock().lines() {
        let line = line.context("reading stdin")?;
        if line.trim().is_empty() {
            continue;
        }
        match handle(&mut session, parse_command(&line))? {
            Some(view) => println!("{}", render(&view)),
            None => break,
        }
        stdout.flush()?;
    }

    Ok(())
}
