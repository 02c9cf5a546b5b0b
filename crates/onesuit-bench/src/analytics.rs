use std::fmt::Write as _;
use std::fs;
use std::path::Path;

use onesuit_bot::StrategyKind;
use onesuit_core::model::result::{GameResult, Outcome};
use onesuit_core::model::seat::Seat;
use serde::Serialize;
use statrs::distribution::{ContinuousCDF, Normal};
use thiserror::Error;

use crate::config::{PlayerConfig, SimulationMode};

const CONFIDENCE: f64 = 0.95;
const FALLBACK_Z: f64 = 1.96;

#[derive(Debug, Error)]
pub enum AnalyticsError {
    #[error("game reported {found} seats but the table has {expected}")]
    SeatCount { expected: usize, found: usize },
    #[error("{context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}

/// Running totals over a batch of games.
pub struct Tally {
    mode: SimulationMode,
    hand_size: usize,
    games: u64,
    first_seat: OutcomeCounts,
    seats: Vec<SeatAccumulator>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct OutcomeCounts {
    pub wins: u64,
    pub draws: u64,
    pub losses: u64,
}

impl OutcomeCounts {
    fn record(&mut self, outcome: Outcome) {
        match outcome {
            Outcome::Win => self.wins += 1,
            Outcome::Draw => self.draws += 1,
            Outcome::Loss => self.losses += 1,
        }
    }
}

struct SeatAccumulator {
    name: String,
    strategy: StrategyKind,
    wins: u64,
    tricks_lost: u64,
}

impl Tally {
    pub fn new(mode: SimulationMode, hand_size: usize, players: &[PlayerConfig]) -> Self {
        let seats = players
            .iter()
            .map(|player| SeatAccumulator {
                name: player.name.clone(),
                strategy: player.strategy,
                wins: 0,
                tricks_lost: 0,
            })
            .collect();
        Self {
            mode,
            hand_size,
            games: 0,
            first_seat: OutcomeCounts::default(),
            seats,
        }
    }

    pub fn games(&self) -> u64 {
        self.games
    }

    pub fn record(&mut self, result: &GameResult) -> Result<(), AnalyticsError> {
        if result.num_players() != self.seats.len() {
            return Err(AnalyticsError::SeatCount {
                expected: self.seats.len(),
                found: result.num_players(),
            });
        }

        self.games += 1;
        self.first_seat.record(result.outcome_for(Seat::new(0)));
        for (seat, lost) in self.seats.iter_mut().zip(result.tricks_lost()) {
            seat.tricks_lost += *lost as u64;
        }
        // Shared minimums credit every tied seat.
        for seat in result.winners() {
            self.seats[seat.index()].wins += 1;
        }
        Ok(())
    }

    pub fn finalize(self) -> Report {
        let games = self.games;
        let z = z_score(CONFIDENCE);
        let sampled = self.mode == SimulationMode::MonteCarlo;
        let rate = |count: u64| {
            if games == 0 {
                0.0
            } else {
                count as f64 / games as f64
            }
        };
        let margin = |p: f64| {
            if sampled && games > 0 {
                Some(z * (p * (1.0 - p) / games as f64).sqrt())
            } else {
                None
            }
        };

        let counts = self.first_seat;
        let first_seat = FirstSeatReport {
            counts,
            win_rate: rate(counts.wins),
            draw_rate: rate(counts.draws),
            loss_rate: rate(counts.losses),
            win_margin: margin(rate(counts.wins)),
        };

        let seats = self
            .seats
            .into_iter()
            .map(|seat| {
                let win_rate = rate(seat.wins);
                SeatReport {
                    avg_tricks_lost: if games == 0 {
                        0.0
                    } else {
                        seat.tricks_lost as f64 / games as f64
                    },
                    win_margin: margin(win_rate),
                    win_rate,
                    wins: seat.wins,
                    strategy: seat.strategy,
                    name: seat.name,
                }
            })
            .collect();

        Report {
            mode: self.mode,
            hand_size: self.hand_size,
            games,
            first_seat,
            seats,
        }
    }
}

/// Seat 1 against the rest of the table.
#[derive(Debug, Clone, Serialize)]
pub struct FirstSeatReport {
    #[serde(flatten)]
    pub counts: OutcomeCounts,
    pub win_rate: f64,
    pub draw_rate: f64,
    pub loss_rate: f64,
    /// 95% half-width, sampled runs only.
    pub win_margin: Option<f64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SeatReport {
    pub name: String,
    pub strategy: StrategyKind,
    pub wins: u64,
    pub win_rate: f64,
    pub win_margin: Option<f64>,
    pub avg_tricks_lost: f64,
}

#[derive(Debug, Clone, Serialize)]
pub struct Report {
    pub mode: SimulationMode,
    pub hand_size: usize,
    pub games: u64,
    pub first_seat: FirstSeatReport,
    pub seats: Vec<SeatReport>,
}

impl Report {
    /// Plain-text console report with two-decimal percentages.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        let first = &self.first_seat;
        let _ = writeln!(out, "Mode: {}", self.mode.as_str());
        let _ = writeln!(out, "Number of Cards per Player: {}", self.hand_size);
        let _ = writeln!(out, "Total Games: {}", self.games);
        let _ = writeln!(out, "Wins: {} ({})", first.counts.wins, percent(first.win_rate));
        let _ = writeln!(out, "Draws: {} ({})", first.counts.draws, percent(first.draw_rate));
        let _ = writeln!(out, "Losses: {} ({})", first.counts.losses, percent(first.loss_rate));
        for (index, seat) in self.seats.iter().enumerate() {
            let _ = write!(
                out,
                "Player {} Wins: {} ({})",
                index + 1,
                seat.wins,
                percent(seat.win_rate)
            );
            if let Some(margin) = seat.win_margin {
                let _ = write!(out, " ±{:.2}%", margin * 100.0);
            }
            let _ = writeln!(out, " [{} / {}]", seat.name, seat.strategy);
        }
        out
    }

    pub fn write_markdown(&self, path: impl AsRef<Path>) -> Result<(), AnalyticsError> {
        let mut rows = String::new();
        rows.push_str("# Simulation Summary\n\n");
        rows.push_str(&format!(
            "Mode: {} · cards per player: {} · games: {}\n\n",
            self.mode.as_str(),
            self.hand_size,
            self.games
        ));
        let first = &self.first_seat;
        rows.push_str(&format!(
            "Seat 1 vs field: {} W / {} D / {} L ({} / {} / {})\n\n",
            first.counts.wins,
            first.counts.draws,
            first.counts.losses,
            percent(first.win_rate),
            percent(first.draw_rate),
            percent(first.loss_rate),
        ));
        rows.push_str("| Seat | Player | Strategy | Wins | Win % | 95% CI | Avg tricks taken |\n");
        rows.push_str("|------|--------|----------|------|-------|--------|------------------|\n");

        for (index, seat) in self.seats.iter().enumerate() {
            let ci = match seat.win_margin {
                Some(margin) => format!(
                    "[{:.2}%, {:.2}%]",
                    (seat.win_rate - margin).max(0.0) * 100.0,
                    (seat.win_rate + margin).min(1.0) * 100.0
                ),
                None => "exact".to_string(),
            };
            rows.push_str(&format!(
                "| {seat_no} | {name} | {strategy} | {wins} | {rate:.2}% | {ci} | {avg:.3} |\n",
                seat_no = index + 1,
                name = seat.name,
                strategy = seat.strategy,
                wins = seat.wins,
                rate = seat.win_rate * 100.0,
                avg = seat.avg_tricks_lost,
            ));
        }

        fs::write(path.as_ref(), rows).map_err(|e| AnalyticsError::Io {
            context: "writing summary markdown",
            source: e,
        })?;
        Ok(())
    }
}

fn percent(rate: f64) -> String {
    format!("{:.2}%", rate * 100.0)
}

fn z_score(confidence: f64) -> f64 {
    Normal::new(0.0, 1.0)
        .map(|normal| normal.inverse_cdf(0.5 + confidence / 2.0))
        .unwrap_or(FALLBACK_Z)
}
