//! User intents forwarded by a renderer.
//!
//! Each intent maps to one engine operation. Intents are plain data so a
//! renderer living across a channel or process boundary can send them as
//! JSON:
//!
//! ```
//! use number_guess::core::{Difficulty, Intent};
//!
//! let intent: Intent = serde_json::from_str(r#"{"configure_difficulty":"hard"}"#).unwrap();
//! assert_eq!(intent, Intent::ConfigureDifficulty(Difficulty::Hard));
//! ```

use serde::{Deserialize, Serialize};

use super::config::Difficulty;

#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    ConfigureDifficulty(Difficulty),
    ConfigureRange(u32),
    /// Renderer input changed; not yet submitted.
    UpdateGuess(String),
    StartRound,
    Pause,
    Resume,
    SubmitGuess(String),
    /// Submit whatever `UpdateGuess` last stored.
    SubmitPending,
    Tick,
    Restart,
}

impl Intent {
    /// Short name for logging.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            Intent::ConfigureDifficulty(_) => "configure_difficulty",
            Intent::ConfigureRange(_) => "configure_range",
            Intent::UpdateGuess(_) => "update_guess",
            Intent::StartRound => "start_round",
            Intent::Pause => "pause",
            Intent::Resume => "resume",
            Intent::SubmitGuess(_) => "submit_guess",
            Intent::SubmitPending => "submit_pending",
            Intent::Tick => "tick",
            Intent::Restart => "restart",
        }
    }
}
