//! Core trainer engine: game state, persistence, and statistics.
//!
//! ## Module overview
//!
//! | Module       | Purpose |
//! |--------------|---------|
//! | `models`     | Shared types: sides, outcomes, the persisted record, snapshots |
//! | `stats`      | Accuracy math and chart-series assembly |
//! | `reveal`     | Sources of the revealed color (seeded / biased RNG) |
//! | `settings`   | Attempt-count and bias configuration, range clamping |
//! | `store`      | Key-value storage port, file and memory adapters, write-through store |
//! | `timers`     | Logical clock and supersedable one-shot timers for visual feedback |
//! | `controller` | The state machine: guesses, resets, results/statistics views |

pub mod controller;
pub mod models;
pub mod reveal;
pub mod settings;
pub mod stats;
pub mod store;
pub mod timers;

// Re-export the public API surface so callers can use
// `trainer_engine::TrainerController` without reaching into sub-modules.
pub use controller::{display_timestamp, TrainerController};
pub use models::{
    ChartPoint, GuessResult, HistoryEntry, Outcome, Phase, PersistedState, ResultsView, Side,
    TrainerSnapshot, DEFAULT_MAX_ATTEMPTS, MAX_MAX_ATTEMPTS, MIN_MAX_ATTEMPTS, STORAGE_KEY,
};
pub use reveal::{OutcomeSource, RandomReveal};
pub use settings::TrainerSettings;
pub use stats::compute_accuracy;
pub use store::{FileStorage, GameStateStore, KeyValueStorage, MemoryStorage};
