mod rows;

use std::fs;
use std::path::PathBuf;

use onesuit_bot::{Game, GameError};
use onesuit_core::model::deal::{Deal, DealError};
use onesuit_core::model::deck::{DeckDistributor, ShuffleDistributor};
use onesuit_core::model::result::GameResult;
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use thiserror::Error;
use tracing::{Level, event};

use crate::analytics::{AnalyticsError, Report, Tally};
use crate::config::{ResolvedOutputs, SimulationConfig, SimulationMode};

use rows::RowWriter;

const PROGRESS_EVERY: u64 = 100_000;

/// Drives one configured batch of games and tallies the results.
pub struct SimulationRunner {
    config: SimulationConfig,
    outputs: ResolvedOutputs,
    seed: u64,
}

/// Seeds for the shuffler and the table, both drawn from one master stream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunSeeds {
    pub deals: u64,
    pub strategies: u64,
}

impl RunSeeds {
    pub fn derive(seed: u64) -> Self {
        let mut master = StdRng::seed_from_u64(seed);
        let deals = master.next_u64();
        let strategies = master.next_u64();
        Self { deals, strategies }
    }
}

/// Summary details returned after a run.
pub struct RunSummary {
    pub mode: SimulationMode,
    pub games_played: u64,
    pub seed: u64,
    pub report: Report,
    pub jsonl_path: Option<PathBuf>,
    pub rows_written: u64,
    pub summary_path: Option<PathBuf>,
}

impl SimulationRunner {
    /// Build a runner from a validated configuration. The seed defaults
    /// to 0.
    pub fn new(config: SimulationConfig, outputs: ResolvedOutputs) -> Self {
        let seed = config.seed.unwrap_or(0);
        Self {
            config,
            outputs,
            seed,
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn run(&self) -> Result<RunSummary, RunnerError> {
        let seeds = RunSeeds::derive(self.seed);
        let mut game = Game::with_strategies(
            &self.config.strategies(),
            self.config.hand_size,
            seeds.strategies,
        )?;
        let mut tally = Tally::new(self.config.mode, self.config.hand_size, &self.config.players);
        let mut rows = self
            .outputs
            .jsonl
            .as_deref()
            .map(RowWriter::create)
            .transpose()?;

        event!(
            target: "onesuit_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            mode = self.config.mode.as_str(),
            players = self.config.players.len(),
            hand_size = self.config.hand_size,
            seed = self.seed
        );

        let mut record = |index: u64, deal: Option<&Deal>, result: GameResult| {
            tally.record(&result)?;
            if let (Some(writer), Some(deal)) = (rows.as_mut(), deal) {
                writer.write(&self.config.run_id, index, deal, &result)?;
            }
            event!(
                target: "onesuit_bench::run",
                Level::DEBUG,
                game_index = index,
                tricks_lost = ?result.tricks_lost()
            );
            if (index + 1) % PROGRESS_EVERY == 0 {
                event!(target: "onesuit_bench::run", Level::INFO, games = index + 1);
            }
            Ok::<(), RunnerError>(())
        };

        match self.config.mode {
            SimulationMode::Exhaustive => {
                for (index, deal) in self.config.enumerator().iter().enumerate() {
                    let result = game.play_deal(&deal)?;
                    record(index as u64, Some(&deal), result)?;
                }
            }
            SimulationMode::MonteCarlo => {
                let mut distributor = ShuffleDistributor::with_seed(seeds.deals);
                let keep_deals = self.outputs.jsonl.is_some();
                for index in 0..self.config.iterations as u64 {
                    // One distribution per game either way, so row output
                    // never shifts the random sequence.
                    let deal = if keep_deals {
                        Some(distributor.distribute(
                            self.config.hand_size,
                            self.config.players.len(),
                        )?)
                    } else {
                        None
                    };
                    let result = game.play(deal.as_ref(), &mut distributor)?;
                    record(index, deal.as_ref(), result)?;
                }
            }
        }

        let report = tally.finalize();
        let (jsonl_path, rows_written) = match rows {
            Some(writer) => {
                let (path, count) = writer.finish()?;
                (Some(path), count)
            }
            None => (None, 0),
        };

        if let Some(path) = self.outputs.summary_md.as_ref() {
            if let Some(dir) = path.parent().filter(|dir| !dir.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            report.write_markdown(path)?;
        }

        event!(
            target: "onesuit_bench::run",
            Level::INFO,
            run_id = %self.config.run_id,
            games = report.games,
            wins = report.first_seat.counts.wins,
            draws = report.first_seat.counts.draws,
            losses = report.first_seat.counts.losses
        );

        Ok(RunSummary {
            mode: self.config.mode,
            games_played: report.games,
            seed: self.seed,
            report,
            jsonl_path,
            rows_written,
            summary_path: self.outputs.summary_md.clone(),
        })
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("game execution failed: {0}")]
    Game(#[from] GameError),
    #[error("dealing failed: {0}")]
    Deal(#[from] DealError),
    #[error("I/O error: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to serialize game row: {source}")]
    Serialize {
        #[from]
        source: serde_json::Error,
    },
    #[error("analytics error: {0}")]
    Analytics(#[from] AnalyticsError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use onesuit_bot::{Player, StrategyKind, seat_seeds};
    use onesuit_core::model::seat::Seat;
    use std::collections::BTreeMap;

    fn config(
        mode: SimulationMode,
        hand_size: usize,
        strategies: &[StrategyKind],
    ) -> SimulationConfig {
        let mut cfg = SimulationConfig {
            mode,
            hand_size,
            iterations: 500,
            seed: Some(3),
            ..SimulationConfig::default()
        };
        cfg.set_player_count(strategies.len());
        cfg.set_strategies(strategies);
        cfg.validate().expect("valid config");
        cfg
    }

    #[test]
    fn exhaustive_run_plays_every_deal() {
        let cfg = config(SimulationMode::Exhaustive, 2, &[StrategyKind::Default; 3]);
        let summary = SimulationRunner::new(cfg, ResolvedOutputs::default())
            .run()
            .unwrap();
        assert_eq!(summary.games_played, 90);
        assert_eq!(summary.rows_written, 0);
        assert!(summary.jsonl_path.is_none());
        let total_wins: u64 = summary.report.seats.iter().map(|seat| seat.wins).sum();
        assert!(total_wins >= 90);
    }

    #[test]
    fn monte_carlo_is_reproducible_for_a_seed() {
        let strategies = [StrategyKind::Random, StrategyKind::Lowest];
        let first = SimulationRunner::new(
            config(SimulationMode::MonteCarlo, 4, &strategies),
            ResolvedOutputs::default(),
        )
        .run()
        .unwrap();
        let second = SimulationRunner::new(
            config(SimulationMode::MonteCarlo, 4, &strategies),
            ResolvedOutputs::default(),
        )
        .run()
        .unwrap();
        assert_eq!(first.games_played, 500);
        assert_eq!(first.seed, 3);
        assert_eq!(first.report.first_seat.counts, second.report.first_seat.counts);
    }

    #[test]
    fn unseeded_runs_use_seed_zero() {
        let mut cfg = config(SimulationMode::MonteCarlo, 2, &[StrategyKind::Default; 2]);
        cfg.seed = None;
        cfg.iterations = 10;
        let runner = SimulationRunner::new(cfg, ResolvedOutputs::default());
        assert_eq!(runner.seed(), 0);
        let summary = runner.run().unwrap();
        assert_eq!(summary.seed, 0);
        assert_eq!(summary.games_played, 10);
    }

    #[test]
    fn run_seeds_split_the_master_seed() {
        let seeds = RunSeeds::derive(7);
        assert_eq!(seeds, RunSeeds::derive(7));
        assert_ne!(seeds.deals, seeds.strategies);
        assert_ne!(seeds.deals, 7);
        assert!(!seat_seeds(seeds.strategies, 4).contains(&seeds.deals));
    }

    #[test]
    fn random_lead_is_independent_of_the_dealt_hand() {
        // hand -> (low leads, high leads) for seat 0 over many seeded runs.
        let mut leads: BTreeMap<Vec<u16>, (u32, u32)> = BTreeMap::new();
        for seed in 0..4_000 {
            let seeds = RunSeeds::derive(seed);
            let deal = ShuffleDistributor::with_seed(seeds.deals)
                .distribute(2, 2)
                .unwrap();
            let hand = deal.hand(Seat::new(0)).unwrap();
            let seat_seed = seat_seeds(seeds.strategies, 2)[0];
            let mut player = Player::with_kind(Seat::new(0), StrategyKind::Random, seat_seed);
            player.reset(hand);
            let lead = player.lead().unwrap();
            let entry = leads
                .entry(hand.iter().map(|card| card.rank()).collect())
                .or_default();
            if lead == hand[0] {
                entry.0 += 1;
            } else {
                entry.1 += 1;
            }
        }
        assert_eq!(leads.len(), 6);
        for (hand, (low, high)) in leads {
            let share = f64::from(low) / f64::from(low + high);
            assert!((0.4..0.6).contains(&share), "{hand:?}: {low} low, {high} high");
        }
    }
}
