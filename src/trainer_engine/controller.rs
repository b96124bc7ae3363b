//! The trainer's state machine.
//!
//! `InProgress` while `attempts < max_attempts`, `Completed` afterwards until
//! an explicit reset. Every mutation goes through [`GameStateStore::update`],
//! so the stored record is current whenever a command returns.
//!
//! Visual sequencing (highlight clearing, delayed results overlay) runs on a
//! logical clock that the front end drives with [`TrainerController::advance`].

use std::time::Duration;

use chrono::Local;
use tracing::{debug, info};

use crate::error::Result;
use crate::trainer_engine::{
    models::{
        ChartPoint, GuessResult, Outcome, Phase, PersistedState, ResultsView, Side,
        TrainerSnapshot,
    },
    reveal::{OutcomeSource, RandomReveal},
    settings::{clamp_max_attempts, TrainerSettings},
    stats,
    store::{GameStateStore, KeyValueStorage},
    timers::{LogicalClock, TimerSlot},
};

/// Completion time as shown in the history.
pub fn display_timestamp() -> String {
    Local::now().format("%d.%m.%Y, %H:%M:%S").to_string()
}

pub struct TrainerController<S: KeyValueStorage, R: OutcomeSource = RandomReveal> {
    store: GameStateStore<S>,
    source: R,
    settings: TrainerSettings,
    timestamp: fn() -> String,

    clock: LogicalClock,
    highlight: Option<Side>,
    highlight_clear: TimerSlot,
    results_reveal: TimerSlot,
    view: ResultsView,
    attempts_setting: u32,
}

impl<S: KeyValueStorage> TrainerController<S, RandomReveal> {
    /// Controller drawing colors from an RNG configured by `settings`.
    pub fn new(store: GameStateStore<S>, settings: TrainerSettings) -> Result<Self> {
        let settings = settings.validate()?;
        let source = RandomReveal::new(settings.rng_seed, settings.blue_bias);
        Self::with_source(store, source, settings)
    }
}

impl<S: KeyValueStorage, R: OutcomeSource> TrainerController<S, R> {
    /// Controller drawing colors from an arbitrary source.
    pub fn with_source(
        mut store: GameStateStore<S>,
        source: R,
        settings: TrainerSettings,
    ) -> Result<Self> {
        let settings = settings.validate()?;

        // A requested attempt count applies right away if the stored session
        // has not started yet; otherwise it waits for the next reset.
        if let Some(requested) = settings.max_attempts {
            let fresh = store.state().attempts == 0 && !store.state().completed;
            if fresh && store.state().max_attempts != requested {
                store.update(|s| s.max_attempts = requested)?;
            }
        }

        let attempts_setting = settings.max_attempts.unwrap_or(store.state().max_attempts);
        // A session that was already finished reopens on its summary.
        let view = if store.state().completed {
            ResultsView::Summary
        } else {
            ResultsView::Hidden
        };

        Ok(TrainerController {
            store,
            source,
            settings,
            timestamp: display_timestamp,
            clock: LogicalClock::default(),
            highlight: None,
            highlight_clear: TimerSlot::default(),
            results_reveal: TimerSlot::default(),
            view,
            attempts_setting,
        })
    }

    /// Replace the clock used to stamp history entries.
    pub fn with_timestamp(mut self, timestamp: fn() -> String) -> Self {
        self.timestamp = timestamp;
        self
    }

    // -----------------------------------------------------------------------
    // Commands
    // -----------------------------------------------------------------------

    /// Guess the next color. `Ok(None)` when the session is already complete.
    pub fn handle_guess(&mut self, guess: Side) -> Result<Option<GuessResult>> {
        if self.phase() == Phase::Completed {
            debug!(%guess, "guess ignored, session complete");
            return Ok(None);
        }

        let now = self.clock.now();
        self.highlight = Some(guess);
        self.highlight_clear.schedule(now, self.settings.feedback_window);

        let revealed = self.source.reveal();
        let is_match = guess == revealed;
        let timestamp = self.timestamp;

        let completed = self.store.update(|s| {
            if is_match {
                s.correct += 1;
            } else {
                s.incorrect += 1;
            }
            s.attempts += 1;
            s.current_outcome = Outcome::from(revealed);
            if s.attempts >= s.max_attempts {
                s.completed = true;
                archive(s, timestamp);
            }
            s.completed
        })?;

        let state = self.store.state();
        debug!(
            %guess, %revealed, is_match,
            attempts = state.attempts, max_attempts = state.max_attempts,
            "guess recorded"
        );

        if completed {
            info!(
                correct = state.correct,
                incorrect = state.incorrect,
                accuracy = stats::compute_accuracy(state.correct, state.incorrect),
                "session complete"
            );
            if self.settings.results_delay.is_zero() {
                self.reveal_results();
            } else {
                self.results_reveal.schedule(now, self.settings.results_delay);
            }
        }

        Ok(Some(GuessResult { guess, revealed, is_match, completed }))
    }

    /// Start a new session with `next_max_attempts` (clamped to 50..=500).
    ///
    /// A finished session that is not in the history yet is archived first.
    pub fn reset_game(&mut self, next_max_attempts: u32) -> Result<()> {
        let next = clamp_max_attempts(next_max_attempts);
        let timestamp = self.timestamp;

        self.store.update(|s| {
            if s.completed {
                archive(s, timestamp);
            }
            s.correct = 0;
            s.incorrect = 0;
            s.attempts = 0;
            s.current_outcome = Outcome::Neutral;
            s.completed = false;
            s.archived = false;
            s.max_attempts = next;
        })?;
        info!(max_attempts = next, "session reset");

        self.attempts_setting = next;
        self.view = ResultsView::Hidden;
        self.highlight = None;
        self.highlight_clear.cancel();
        self.results_reveal.cancel();
        Ok(())
    }

    /// "Play again" with the pending attempt setting.
    pub fn replay(&mut self) -> Result<()> {
        self.reset_game(self.attempts_setting)
    }

    /// Adjust the attempt count the next session will use.
    pub fn set_attempts_setting(&mut self, attempts: u32) {
        self.attempts_setting = clamp_max_attempts(attempts);
    }

    pub fn open_statistics(&mut self) {
        self.view = ResultsView::Statistics;
    }

    /// Back to the summary if the session is over, otherwise back to the board.
    pub fn close_statistics(&mut self) {
        self.view = match self.phase() {
            Phase::Completed => ResultsView::Summary,
            Phase::InProgress => ResultsView::Hidden,
        };
    }

    /// Move the logical clock forward and fire whatever timers came due.
    pub fn advance(&mut self, elapsed: Duration) {
        let now = self.clock.advance(elapsed);
        if self.highlight_clear.fire_if_due(now) {
            self.highlight = None;
        }
        if self.results_reveal.fire_if_due(now) {
            self.reveal_results();
        }
    }

    fn reveal_results(&mut self) {
        // The statistics panel, if the player already opened it, stays on top.
        if self.view == ResultsView::Hidden {
            self.view = ResultsView::Summary;
        }
    }

    // -----------------------------------------------------------------------
    // Derived reads
    // -----------------------------------------------------------------------

    pub fn phase(&self) -> Phase {
        let s = self.store.state();
        if s.attempts >= s.max_attempts { Phase::Completed } else { Phase::InProgress }
    }

    pub fn compute_accuracy(&self) -> u32 {
        let s = self.store.state();
        stats::compute_accuracy(s.correct, s.incorrect)
    }

    pub fn chart_series(&self) -> Vec<ChartPoint> {
        stats::chart_series(self.store.state(), self.timestamp)
    }

    pub fn state(&self) -> &PersistedState {
        self.store.state()
    }

    pub fn settings(&self) -> &TrainerSettings {
        &self.settings
    }

    pub fn store(&self) -> &GameStateStore<S> {
        &self.store
    }

    pub fn view(&self) -> ResultsView {
        self.view
    }

    pub fn highlight(&self) -> Option<Side> {
        self.highlight
    }

    pub fn attempts_setting(&self) -> u32 {
        self.attempts_setting
    }

    pub fn snapshot(&self) -> TrainerSnapshot {
        let s = self.store.state();
        TrainerSnapshot {
            correct: s.correct,
            incorrect: s.incorrect,
            attempts: s.attempts,
            max_attempts: s.max_attempts,
            current_outcome: s.current_outcome,
            completed: s.completed,
            accuracy: self.compute_accuracy(),
            chart_series: self.chart_series(),
            highlight: self.highlight,
            view: self.view,
            attempts_setting: self.attempts_setting,
        }
    }
}

/// Append the live session to the history unless it is already there.
fn archive(state: &mut PersistedState, timestamp: fn() -> String) {
    if state.archived {
        return;
    }
    let entry = stats::history_entry(state, timestamp());
    info!(accuracy = entry.accuracy, sessions = state.history.len() + 1, "session archived");
    state.history.push(entry);
    state.archived = true;
}
