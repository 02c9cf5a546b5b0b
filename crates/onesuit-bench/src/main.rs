use std::path::PathBuf;

use clap::Parser;

use onesuit_bench::config::{ResolvedOutputs, SimulationConfig, SimulationMode};
use onesuit_bench::logging::init_logging;
use onesuit_bench::runner::SimulationRunner;
use onesuit_bot::StrategyKind;

/// Outcome statistics for the single-suit trick game.
#[derive(Debug, Parser)]
#[command(
    name = "onesuit-bench",
    author,
    version,
    about = "Exhaustive and Monte Carlo analysis of single-suit trick play"
)]
struct Cli {
    /// Path to a YAML configuration file. Built-in defaults are used otherwise.
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Enumerate every deal or sample shuffled ones.
    #[arg(short, long, value_enum)]
    mode: Option<SimulationMode>,

    /// Number of players at the table.
    #[arg(short, long, value_name = "N")]
    players: Option<usize>,

    /// Strategy per seat, in seat order (default, lowest, highest, random).
    #[arg(short, long = "strategy", value_name = "KIND")]
    strategies: Vec<StrategyKind>,

    /// Cards dealt to each player.
    #[arg(long, value_name = "CARDS")]
    hand_size: Option<usize>,

    /// Games to sample in monte-carlo mode.
    #[arg(short, long, value_name = "GAMES")]
    iterations: Option<usize>,

    /// RNG seed for shuffles and random players.
    #[arg(long, value_name = "SEED")]
    seed: Option<u64>,

    /// Override the run identifier (substitutes {run_id} templates).
    #[arg(long, value_name = "RUN_ID")]
    run_id: Option<String>,

    /// Print the human-readable report.
    #[arg(long)]
    report: bool,

    /// Exit after validating the configuration (no games are played).
    #[arg(long)]
    validate_only: bool,
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = match cli.config.as_ref() {
        Some(path) => SimulationConfig::from_path(path)?,
        None => SimulationConfig::default(),
    };

    if let Some(run_id) = cli.run_id {
        config.run_id = run_id;
    }

    if let Some(mode) = cli.mode {
        config.mode = mode;
    }

    if let Some(players) = cli.players {
        config.set_player_count(players);
    }

    if !cli.strategies.is_empty() {
        config.set_strategies(&cli.strategies);
    }

    if let Some(hand_size) = cli.hand_size {
        config.hand_size = hand_size;
    }

    if let Some(iterations) = cli.iterations {
        config.iterations = iterations;
    }

    if let Some(seed) = cli.seed {
        config.seed = Some(seed);
    }

    config.validate()?;

    let outputs: ResolvedOutputs = config.resolved_outputs();
    let run_id = config.run_id.clone();
    let player_count = config.players.len();
    let games = match config.mode {
        SimulationMode::Exhaustive => config
            .enumerator()
            .total()
            .map(|total| total.to_string())
            .unwrap_or_else(|| "?".to_string()),
        SimulationMode::MonteCarlo => config.iterations.to_string(),
    };

    println!(
        "Loaded configuration '{run_id}': {} mode, {player_count} players, {} cards each ({games} games)",
        config.mode.as_str(),
        config.hand_size,
    );

    let logging_guard = init_logging(&config.logging, &outputs)?;
    if let Some(guard) = logging_guard.as_ref() {
        println!("Telemetry: {}", guard.telemetry_path.display());
    }
    let runner = SimulationRunner::new(config, outputs);

    if cli.validate_only {
        println!("Validation-only mode: simulation skipped.");
        return Ok(());
    }

    let summary = runner.run()?;
    println!(
        "Simulation complete for '{run_id}': {} games (seed {})",
        summary.games_played, summary.seed
    );
    if cli.report {
        print!("{}", summary.report.render_text());
    }
    if let Some(path) = summary.jsonl_path.as_ref() {
        println!("Game rows: {} at {}", summary.rows_written, path.display());
    }
    if let Some(path) = summary.summary_path.as_ref() {
        println!("Summary table: {}", path.display());
    }

    Ok(())
}
