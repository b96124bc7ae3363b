use std::fmt;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Limits and storage identity
// ---------------------------------------------------------------------------

/// Fixed key of the single persisted record.
pub const STORAGE_KEY: &str = "intuitionTrainerState";

pub const DEFAULT_MAX_ATTEMPTS: u32 = 200;
pub const MIN_MAX_ATTEMPTS: u32 = 50;
pub const MAX_MAX_ATTEMPTS: u32 = 500;

// ---------------------------------------------------------------------------
// Guess / outcome primitives
// ---------------------------------------------------------------------------

/// The side a player can bet on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Side {
    Blue,
    Red,
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Blue => write!(f, "blue"),
            Side::Red  => write!(f, "red"),
        }
    }
}

/// Card color currently shown. `Neutral` only before the first guess of a session.
///
/// The serialized names are the card color classes the stored record has
/// always used, so existing records keep loading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Outcome {
    #[default]
    #[serde(rename = "bg-gray-300")]
    Neutral,
    #[serde(rename = "bg-blue-500")]
    Blue,
    #[serde(rename = "bg-red-500")]
    Red,
}

impl Outcome {
    /// Color class a front end paints the card with.
    pub fn color_class(self) -> &'static str {
        match self {
            Outcome::Neutral => "bg-gray-300",
            Outcome::Blue    => "bg-blue-500",
            Outcome::Red     => "bg-red-500",
        }
    }
}

impl From<Side> for Outcome {
    fn from(side: Side) -> Self {
        match side {
            Side::Blue => Outcome::Blue,
            Side::Red  => Outcome::Red,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Neutral => write!(f, "neutral"),
            Outcome::Blue    => write!(f, "blue"),
            Outcome::Red     => write!(f, "red"),
        }
    }
}

// ---------------------------------------------------------------------------
// Persisted record
// ---------------------------------------------------------------------------

/// Archived summary of one finished session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub accuracy: u32,
    pub correct: u32,
    pub incorrect: u32,
    /// Completion time, already formatted for display.
    pub date: String,
}

/// Live session plus the session history: the only unit of durable storage.
///
/// Field order matches the stored JSON layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "StoredRecord")]
pub struct PersistedState {
    pub correct: u32,
    pub incorrect: u32,
    pub attempts: u32,
    #[serde(rename = "currentColor")]
    pub current_outcome: Outcome,
    #[serde(rename = "gameHistory")]
    pub history: Vec<HistoryEntry>,
    #[serde(rename = "gameCompleted")]
    pub completed: bool,
    pub max_attempts: u32,
    /// Set once the finished session has been appended to `history`.
    pub archived: bool,
}

/// On-disk shape of [`PersistedState`]. `archived` is missing from records
/// written before the flag existed.
#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredRecord {
    correct: u32,
    incorrect: u32,
    attempts: u32,
    current_color: Outcome,
    game_history: Vec<HistoryEntry>,
    game_completed: bool,
    max_attempts: u32,
    #[serde(default)]
    archived: Option<bool>,
}

impl From<StoredRecord> for PersistedState {
    fn from(raw: StoredRecord) -> Self {
        // Without the flag, a finished session counts as archived when the
        // last history entry carries its score.
        let archived = raw.archived.unwrap_or_else(|| {
            raw.game_completed
                && raw.game_history.last().map(|e| e.correct) == Some(raw.correct)
        });
        PersistedState {
            correct: raw.correct,
            incorrect: raw.incorrect,
            attempts: raw.attempts,
            current_outcome: raw.current_color,
            history: raw.game_history,
            completed: raw.game_completed,
            max_attempts: raw.max_attempts,
            archived,
        }
    }
}

impl Default for PersistedState {
    fn default() -> Self {
        PersistedState {
            correct: 0,
            incorrect: 0,
            attempts: 0,
            current_outcome: Outcome::Neutral,
            history: Vec::new(),
            completed: false,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
            archived: false,
        }
    }
}

// ---------------------------------------------------------------------------
// Controller-facing types
// ---------------------------------------------------------------------------

/// Coarse state of the game's state machine.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Phase {
    InProgress,
    Completed,
}

/// Which overlay, if any, sits over the board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResultsView {
    #[default]
    Hidden,
    /// End-of-session summary with the attempt setting and play/statistics buttons.
    Summary,
    /// Accuracy chart over all sessions.
    Statistics,
}

/// Result of one accepted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GuessResult {
    pub guess: Side,
    pub revealed: Side,
    pub is_match: bool,
    /// `true` if this guess finished the session.
    pub completed: bool,
}

/// One point handed to the charting collaborator.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub date: String,
    pub accuracy: u32,
    pub correct: u32,
    pub incorrect: u32,
}

impl From<&HistoryEntry> for ChartPoint {
    fn from(entry: &HistoryEntry) -> Self {
        ChartPoint {
            date: entry.date.clone(),
            accuracy: entry.accuracy,
            correct: entry.correct,
            incorrect: entry.incorrect,
        }
    }
}

/// Read-only view of everything a presentation layer renders from.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrainerSnapshot {
    pub correct: u32,
    pub incorrect: u32,
    pub attempts: u32,
    pub max_attempts: u32,
    pub current_outcome: Outcome,
    pub completed: bool,
    pub accuracy: u32,
    pub chart_series: Vec<ChartPoint>,
    /// Side pressed most recently, while its feedback window is open.
    pub highlight: Option<Side>,
    pub view: ResultsView,
    /// Attempt count the next session will use.
    pub attempts_setting: u32,
}
