//! # intuition_trainer
//!
//! Core of a two-color "intuition trainer" game.
//!
//! The player keeps guessing whether the next card will be blue or red. The
//! engine reveals a color at random (independent of the guess), keeps score
//! for the session, archives every finished session into a history, and
//! assembles the accuracy series a statistics chart is drawn from.
//!
//! ## How it works
//!
//! 1. Open a [`GameStateStore`] over any [`KeyValueStorage`] backend
//!    ([`FileStorage`] on disk, [`MemoryStorage`] in tests).
//! 2. Build a [`TrainerController`] with [`TrainerSettings`] (attempt count,
//!    blue bias, optional RNG seed).
//! 3. Feed it commands: [`TrainerController::handle_guess`],
//!    [`TrainerController::reset_game`], `open_statistics` / `close_statistics`,
//!    and [`TrainerController::advance`] to drive the visual timers.
//! 4. Render from [`TrainerController::snapshot`], or hand
//!    [`view_adapter::to_view_state`] output to a web front end.
//!
//! Every command writes the full record back to storage before it returns.
//!
//! ## Quick start
//!
//! ```rust
//! use intuition_trainer::{
//!     GameStateStore, MemoryStorage, Side, TrainerController, TrainerSettings,
//! };
//!
//! let store = GameStateStore::open(MemoryStorage::new()).unwrap();
//! let settings = TrainerSettings::new().with_seed(42).with_max_attempts(50);
//! let mut trainer = TrainerController::new(store, settings).unwrap();
//!
//! while let Some(result) = trainer.handle_guess(Side::Blue).unwrap() {
//!     if result.completed {
//!         break;
//!     }
//! }
//!
//! let snap = trainer.snapshot();
//! assert_eq!(snap.attempts, 50);
//! assert_eq!(snap.correct + snap.incorrect, 50);
//! assert_eq!(trainer.state().history.len(), 1);
//! ```

pub mod error;
pub mod trainer_engine;
pub mod view_adapter;

// Convenience re-exports so callers can use `intuition_trainer::TrainerController`
// directly without reaching into `trainer_engine::`.
pub use error::{Result, TrainerError};
pub use trainer_engine::{
    compute_accuracy, ChartPoint, FileStorage, GameStateStore, GuessResult, HistoryEntry,
    KeyValueStorage, MemoryStorage, Outcome, OutcomeSource, Phase, PersistedState,
    RandomReveal, ResultsView, Side, TrainerController, TrainerSettings, TrainerSnapshot,
};
pub use view_adapter::to_view_state;
