//! Plays one seeded session in memory and prints the results.
//!
//! Run with: `cargo run --example quick_session`
//!
//! Shows the whole command surface a front end uses:
//!
//! - `handle_guess` until the session completes (later guesses are ignored),
//! - `advance` to let the results overlay come up,
//! - `open_statistics` / `chart_series` for the chart,
//! - `reset_game` to start over, and the JSON view model from `to_view_state`.

use std::time::Duration;

use intuition_trainer::{
    to_view_state, GameStateStore, MemoryStorage, Side, TrainerController, TrainerSettings,
};

fn main() -> intuition_trainer::Result<()> {
    let store = GameStateStore::open(MemoryStorage::new())?;
    let settings = TrainerSettings::new().with_seed(2024).with_max_attempts(50);
    let mut trainer = TrainerController::new(store, settings)?;

    let mut round = 0u32;
    loop {
        let guess = if round % 2 == 0 { Side::Blue } else { Side::Red };
        let Some(result) = trainer.handle_guess(guess)? else { break };
        round += 1;
        let mark = if result.is_match { "+" } else { " " };
        println!(
            "[{mark}] #{round:<3} guessed {:<4} revealed {}",
            result.guess.to_string(),
            result.revealed
        );
        trainer.advance(Duration::from_millis(350));
    }

    let snap = trainer.snapshot();
    println!();
    println!(
        "Correct: {}  Incorrect: {}  Accuracy: {}%",
        snap.correct, snap.incorrect, snap.accuracy
    );
    println!("Overlay: {:?}", snap.view);

    trainer.open_statistics();
    for point in trainer.chart_series() {
        println!(
            "  {}  {}%  ({} / {})",
            point.date, point.accuracy, point.correct, point.incorrect
        );
    }

    trainer.reset_game(100)?;
    println!();
    let view = to_view_state(&trainer.snapshot());
    println!("{}", serde_json::to_string_pretty(&view).unwrap_or_default());
    Ok(())
}
