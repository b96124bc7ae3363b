//! intuition-trainer: terminal front end for the trainer core.

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};
use std::process;
use std::time::Instant;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use intuition_trainer::{
    to_view_state, view_adapter, FileStorage, GameStateStore, Outcome, ResultsView, Side,
    TrainerController, TrainerSettings,
};

#[derive(Parser)]
#[command(name = "intuition-trainer", version, about = "Guess the next color, track your accuracy")]
struct Cli {
    /// Directory holding the saved state
    #[arg(long, default_value = ".intuition-trainer")]
    data_dir: PathBuf,

    /// Start over if the saved state is unreadable instead of failing
    #[arg(long)]
    discard_corrupt: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play interactively: `b`/`r` guess, `s` statistics, `n` new game, `q` quit
    Play {
        /// Attempts for a session that has not started yet (50..=500)
        #[arg(long)]
        attempts: Option<u32>,

        /// Probability that blue is revealed
        #[arg(long, default_value = "0.5")]
        bias: f64,

        /// Fixed RNG seed for a reproducible color sequence
        #[arg(long)]
        seed: Option<u64>,
    },

    /// Print the statistics series
    Stats {
        /// Emit JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Print the current view model as JSON
    Show,

    /// Start a new session, archiving a finished one
    Reset {
        /// Attempts for the new session (50..=500)
        #[arg(long, default_value = "200")]
        attempts: u32,
    },
}

fn main() {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("intuition_trainer=warn".parse().expect("static directive")),
        )
        .init();

    let cli = Cli::parse();

    let result = open_store(&cli.data_dir, cli.discard_corrupt).and_then(|store| match cli.command {
        Commands::Play { attempts, bias, seed } => {
            let mut settings = TrainerSettings::new().with_blue_bias(bias);
            settings.max_attempts = attempts;
            settings.rng_seed = seed;
            play(store, settings)
        }
        Commands::Stats { json } => stats(store, json),
        Commands::Show => show(store),
        Commands::Reset { attempts } => reset(store, attempts),
    });

    if let Err(e) = result {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn open_store(dir: &Path, discard_corrupt: bool) -> Result<GameStateStore<FileStorage>> {
    let storage = FileStorage::new(dir);
    let store = if discard_corrupt {
        GameStateStore::open_or_default(storage)
    } else {
        GameStateStore::open(storage)
    };
    store.with_context(|| format!("failed to load state from {}", dir.display()))
}

fn controller(
    store: GameStateStore<FileStorage>,
    settings: TrainerSettings,
) -> Result<TrainerController<FileStorage>> {
    TrainerController::new(store, settings).context("invalid settings")
}

fn play(store: GameStateStore<FileStorage>, settings: TrainerSettings) -> Result<()> {
    let mut trainer = controller(store, settings)?;
    let stdin = io::stdin();
    let mut out = io::stdout().lock();
    let mut last = Instant::now();

    render(&trainer, &mut out)?;
    for line in stdin.lock().lines() {
        let line = line.context("failed to read input")?;
        let now = Instant::now();
        trainer.advance(now - last);
        last = now;

        match line.trim() {
            "b" => {
                trainer.handle_guess(Side::Blue)?;
            }
            "r" => {
                trainer.handle_guess(Side::Red)?;
            }
            "s" => trainer.open_statistics(),
            "x" => trainer.close_statistics(),
            "n" => trainer.replay()?,
            "q" => break,
            other => {
                if let Some(n) = other.strip_prefix("a ").and_then(|n| n.trim().parse().ok()) {
                    trainer.set_attempts_setting(n);
                } else {
                    writeln!(out, "?")?;
                    continue;
                }
            }
        }
        // Input is line-buffered, so let the results delay lapse before the next prompt.
        if trainer.state().completed && trainer.view() == ResultsView::Hidden {
            trainer.advance(trainer.settings().results_delay);
        }
        render(&trainer, &mut out)?;
    }
    Ok(())
}

fn render(trainer: &TrainerController<FileStorage>, out: &mut impl Write) -> Result<()> {
    let snap = trainer.snapshot();
    match snap.view {
        ResultsView::Hidden => {
            let card = match snap.current_outcome {
                Outcome::Neutral => "[   ]",
                Outcome::Blue => "[ B ]",
                Outcome::Red => "[ R ]",
            };
            writeln!(
                out,
                "{card} {}/{}  {}: {}  {}: {}  {}: {}%",
                snap.attempts,
                snap.max_attempts,
                view_adapter::LABEL_CORRECT,
                snap.correct,
                view_adapter::LABEL_INCORRECT,
                snap.incorrect,
                view_adapter::LABEL_ACCURACY,
                snap.accuracy,
            )?;
        }
        ResultsView::Summary => {
            writeln!(out, "{}", view_adapter::LABEL_GAME_OVER)?;
            writeln!(out, "  {}: {}", view_adapter::LABEL_CORRECT, snap.correct)?;
            writeln!(out, "  {}: {}", view_adapter::LABEL_INCORRECT, snap.incorrect)?;
            writeln!(out, "  {}: {}%", view_adapter::LABEL_ACCURACY, snap.accuracy)?;
            writeln!(
                out,
                "  next session: {} attempts (`a N` to change, `n` to play, `s` for statistics)",
                snap.attempts_setting
            )?;
        }
        ResultsView::Statistics => {
            print_series(&snap.chart_series, out)?;
            writeln!(out, "(`x` back, `n` play)")?;
        }
    }
    out.flush()?;
    Ok(())
}

fn print_series(series: &[intuition_trainer::ChartPoint], out: &mut impl Write) -> Result<()> {
    if series.is_empty() {
        writeln!(out, "{}", view_adapter::LABEL_NO_DATA)?;
        return Ok(());
    }
    for (i, p) in series.iter().enumerate() {
        writeln!(
            out,
            "{:>3}. {:<22} {:>3}%  {:>4} / {:<4}",
            i + 1,
            p.date,
            p.accuracy,
            p.correct,
            p.incorrect
        )?;
    }
    Ok(())
}

fn stats(store: GameStateStore<FileStorage>, json: bool) -> Result<()> {
    let trainer = controller(store, TrainerSettings::new())?;
    let series = trainer.chart_series();
    let mut out = io::stdout().lock();
    if json {
        writeln!(out, "{}", serde_json::to_string_pretty(&series)?)?;
    } else {
        print_series(&series, &mut out)?;
    }
    Ok(())
}

fn show(store: GameStateStore<FileStorage>) -> Result<()> {
    let trainer = controller(store, TrainerSettings::new())?;
    let view = to_view_state(&trainer.snapshot());
    println!("{}", serde_json::to_string_pretty(&view)?);
    Ok(())
}

fn reset(store: GameStateStore<FileStorage>, attempts: u32) -> Result<()> {
    let mut trainer = controller(store, TrainerSettings::new())?;
    trainer.reset_game(attempts)?;
    println!("New session: {} attempts", trainer.state().max_attempts);
    Ok(())
}
