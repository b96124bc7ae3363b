//! Accuracy math and chart-series assembly.
//!
//! Nothing here is cached: every caller recomputes from the current counts.

use crate::trainer_engine::models::{ChartPoint, HistoryEntry, PersistedState};

/// Percentage of correct guesses, rounded half-up to an integer in `0..=100`.
///
/// Returns 0 when there are no attempts.
pub fn compute_accuracy(correct: u32, incorrect: u32) -> u32 {
    let total = correct as u64 + incorrect as u64;
    if total == 0 {
        return 0;
    }
    // round(100 * c / t) == floor((200 * c + t) / (2 * t))
    ((200 * correct as u64 + total) / (2 * total)) as u32
}

/// Build the archived summary of the live session.
pub fn history_entry(state: &PersistedState, date: String) -> HistoryEntry {
    HistoryEntry {
        accuracy: compute_accuracy(state.correct, state.incorrect),
        correct: state.correct,
        incorrect: state.incorrect,
        date,
    }
}

/// Points for the statistics chart, oldest first.
///
/// A completed session that has not reached the history yet gets a
/// synthesized trailing point stamped with `now`.
pub fn chart_series(state: &PersistedState, now: impl FnOnce() -> String) -> Vec<ChartPoint> {
    let mut series: Vec<ChartPoint> = state.history.iter().map(ChartPoint::from).collect();
    if state.completed && !state.archived {
        series.push(ChartPoint::from(&history_entry(state, now())));
    }
    series
}
