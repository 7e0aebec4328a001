//! Game configuration types.
//!
//! - `Difficulty`: attempt-budget tier chosen by the player
//! - `Selection`: the pending difficulty/range before a round starts
//! - `GameConfig`: the immutable configuration of one round
//! - `EngineSettings`: host-level settings (time limit, default range, seed)
//!
//! A round never reads the `Selection` directly. `start_round` resolves it
//! into a `GameConfig` once, so later selection changes only affect the
//! next round.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Smallest selectable range upper bound.
pub const MIN_RANGE: u32 = 10;

/// Largest selectable range upper bound.
pub const MAX_RANGE: u32 = 100;

/// Default range upper bound before the player picks one.
pub const DEFAULT_RANGE: u32 = 10;

/// Seconds the player has to finish a round.
pub const DEFAULT_TIME_LIMIT_SECS: u32 = 30;

/// Shortest allowed round clock. A round must start with time on it.
pub const MIN_TIME_LIMIT_SECS: u32 = 1;

/// Clamp a requested range into `[MIN_RANGE, MAX_RANGE]`.
#[must_use]
pub fn clamp_range(range: u32) -> u32 {
    range.clamp(MIN_RANGE, MAX_RANGE)
}

/// Attempt-budget tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    /// 10 attempts.
    Easy,
    /// 6 attempts.
    Medium,
    /// 3 attempts.
    Hard,
}

impl Difficulty {
    /// All difficulties, easiest first.
    #[must_use]
    pub const fn all() -> [Difficulty; 3] {
        [Difficulty::Easy, Difficulty::Medium, Difficulty::Hard]
    }

    /// Number of wrong guesses allowed before the round is lost.
    #[must_use]
    pub const fn max_attempts(self) -> u32 {
        match self {
            Difficulty::Easy => 10,
            Difficulty::Medium => 6,
            Difficulty::Hard => 3,
        }
    }

    /// Lowercase name, as accepted by `from_str`.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
        }
    }
}

impl fmt::Display for Difficulty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({} attempts)", self.name(), self.max_attempts())
    }
}

/// Error returned when a string names no difficulty.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("unknown difficulty `{0}` (expected easy, medium or hard)")]
pub struct ParseDifficultyError(pub String);

impl FromStr for Difficulty {
    type Err = ParseDifficultyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        Difficulty::all()
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(trimmed))
            .ok_or_else(|| ParseDifficultyError(trimmed.to_string()))
    }
}

/// The player's pending choices before a round starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Selection {
    /// `None` until the player picks a difficulty.
    pub difficulty: Option<Difficulty>,

    /// Upper bound of the target range, always within `[MIN_RANGE, MAX_RANGE]`.
    pub range: u32,
}

impl Default for Selection {
    fn default() -> Self {
        Self {
            difficulty: None,
            range: DEFAULT_RANGE,
        }
    }
}

impl Selection {
    /// Create an empty selection with the given default range.
    #[must_use]
    pub fn new(range: u32) -> Self {
        Self {
            difficulty: None,
            range: clamp_range(range),
        }
    }

    /// Set the difficulty.
    #[must_use]
    pub fn with_difficulty(mut self, difficulty: Difficulty) -> Self {
        self.difficulty = Some(difficulty);
        self
    }

    /// Set the range (clamped).
    #[must_use]
    pub fn with_range(mut self, range: u32) -> Self {
        self.range = clamp_range(range);
        self
    }
}

/// Configuration of a single round. Immutable once the round starts.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Attempt-budget tier.
    pub difficulty: Difficulty,

    /// The target is drawn from `[1, range]`.
    pub range: u32,

    /// Seconds on the round clock.
    pub time_limit_secs: u32,
}

impl GameConfig {
    /// Create a round configuration. `range` is clamped, and the time
    /// limit is at least `MIN_TIME_LIMIT_SECS`.
    #[must_use]
    pub fn new(difficulty: Difficulty, range: u32, time_limit_secs: u32) -> Self {
        Self {
            difficulty,
            range: clamp_range(range),
            time_limit_secs: time_limit_secs.max(MIN_TIME_LIMIT_SECS),
        }
    }

    /// Attempt budget for this round.
    #[must_use]
    pub const fn max_attempts(&self) -> u32 {
        self.difficulty.max_attempts()
    }
}

/// Errors loading `EngineSettings`.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read settings at {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse settings: {0}")]
    Parse(#[from] toml::de::Error),
}

/// Host-level engine settings.
///
/// Every field has a default, so a TOML file only needs the keys it
/// overrides:
///
/// ```
/// use number_guess::core::EngineSettings;
///
/// let settings = EngineSettings::from_toml_str("time_limit_secs = 45").unwrap();
/// assert_eq!(settings.time_limit_secs, 45);
/// assert_eq!(settings.default_range, 10);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineSettings {
    /// Seconds on the clock for each round, never below one.
    pub time_limit_secs: u32,

    /// Range selected on a fresh engine and after `restart`.
    pub default_range: u32,

    /// Seed for the target RNG. `None` seeds from entropy.
    pub seed: Option<u64>,

    /// Replace the final TooHigh/TooLow hint with `LostByAttempts` when the
    /// attempt budget runs out.
    pub surface_attempts_loss: bool,
}

impl Default for EngineSettings {
    fn default() -> Self {
        Self {
            time_limit_secs: DEFAULT_TIME_LIMIT_SECS,
            default_range: DEFAULT_RANGE,
            seed: None,
            surface_attempts_loss: false,
        }
    }
}

impl EngineSettings {
    /// Create default settings.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the round time limit (at least one second).
    #[must_use]
    pub fn with_time_limit(mut self, secs: u32) -> Self {
        self.time_limit_secs = secs.max(MIN_TIME_LIMIT_SECS);
        self
    }

    /// Set the default range (clamped).
    #[must_use]
    pub fn with_default_range(mut self, range: u32) -> Self {
        self.default_range = clamp_range(range);
        self
    }

    /// Set the RNG seed.
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Surface `LostByAttempts` on the final wrong guess.
    #[must_use]
    pub fn with_attempts_loss_feedback(mut self, enabled: bool) -> Self {
        self.surface_attempts_loss = enabled;
        self
    }

    /// Parse settings from TOML text. Out-of-range values (range, zero time
    /// limit) are clamped.
    pub fn from_toml_str(content: &str) -> Result<Self, ConfigError> {
        let settings: EngineSettings = toml::from_str(content)?;
        Ok(settings.normalized())
    }

    /// Load settings from a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content)
    }

    fn normalized(mut self) -> Self {
        self.default_range = clamp_range(self.default_range);
        self.time_limit_secs = self.time_limit_secs.max(MIN_TIME_LIMIT_SECS);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_max_attempts() {
        assert_eq!(Difficulty::Easy.max_attempts(), 10);
        assert_eq!(Difficulty::Medium.max_attempts(), 6);
        assert_eq!(Difficulty::Hard.max_attempts(), 3);
    }

    #[test]
    fn test_difficulty_from_str() {
        assert_eq!("easy".parse::<Difficulty>(), Ok(Difficulty::Easy));
        assert_eq!(" Medium ".parse::<Difficulty>(), Ok(Difficulty::Medium));
        assert_eq!("HARD".parse::<Difficulty>(), Ok(Difficulty::Hard));
        assert_eq!(
            "expert".parse::<Difficulty>(),
            Err(ParseDifficultyError("expert".to_string()))
        );
    }

    #[test]
    fn test_difficulty_display() {
        assert_eq!(format!("{}", Difficulty::Hard), "hard (3 attempts)");
    }

    #[test]
    fn test_clamp_range() {
        assert_eq!(clamp_range(0), MIN_RANGE);
        assert_eq!(clamp_range(9), 10);
        assert_eq!(clamp_range(55), 55);
        assert_eq!(clamp_range(1000), MAX_RANGE);
    }

    #[test]
    fn test_selection_builder() {
        let selection = Selection::default()
            .with_difficulty(Difficulty::Medium)
            .with_range(250);

        assert_eq!(selection.difficulty, Some(Difficulty::Medium));
        assert_eq!(selection.range, 100);
        assert_eq!(Selection::default().difficulty, None);
        assert_eq!(Selection::new(3).range, 10);
    }

    #[test]
    fn test_game_config_clamps_range() {
        let config = GameConfig::new(Difficulty::Easy, 5, 30);
        assert_eq!(config.range, 10);
        assert_eq!(config.max_attempts(), 10);
    }

    #[test]
    fn test_settings_defaults() {
        let settings = EngineSettings::default();
        assert_eq!(settings.time_limit_secs, 30);
        assert_eq!(settings.default_range, 10);
        assert_eq!(settings.seed, None);
        assert!(!settings.surface_attempts_loss);
    }

    #[test]
    fn test_settings_builder() {
        let settings = EngineSettings::new()
            .with_time_limit(60)
            .with_default_range(500)
            .with_seed(7)
            .with_attempts_loss_feedback(true);

        assert_eq!(settings.time_limit_secs, 60);
        assert_eq!(settings.default_range, 100);
        assert_eq!(settings.seed, Some(7));
        assert!(settings.surface_attempts_loss);
    }

    #[test]
    fn test_settings_from_toml() {
        let settings = EngineSettings::from_toml_str(
            r#"
            default_range = 4
            seed = 99
            surface_attempts_loss = true
            "#,
        )
        .unwrap();

        assert_eq!(settings.time_limit_secs, 30);
        assert_eq!(settings.default_range, 10);
        assert_eq!(settings.seed, Some(99));
        assert!(settings.surface_attempts_loss);
    }

    #[test]
    fn test_zero_time_limit_clamped() {
        assert_eq!(EngineSettings::new().with_time_limit(0).time_limit_secs, 1);

        let settings = EngineSettings::from_toml_str("time_limit_secs = 0").unwrap();
        assert_eq!(settings.time_limit_secs, MIN_TIME_LIMIT_SECS);

        let config = GameConfig::new(Difficulty::Hard, 10, 0);
        assert_eq!(config.time_limit_secs, 1);
    }

    #[test]
    fn test_settings_parse_error() {
        let err = EngineSettings::from_toml_str("time_limit_secs = \"soon\"").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_settings_missing_file() {
        let err = EngineSettings::load("/definitely/not/here/settings.toml").unwrap_err();
        assert!(matches!(err, ConfigError::Io { .. }));
    }

    #[test]
    fn test_difficulty_serde() {
        let json = serde_json::to_string(&Difficulty::Medium).unwrap();
        assert_eq!(json, "\"medium\"");
        let back: Difficulty = serde_json::from_str(&json).unwrap();
        assert_eq!(back, Difficulty::Medium);
    }
}
