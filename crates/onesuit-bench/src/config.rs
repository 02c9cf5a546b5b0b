use clap::ValueEnum;
use onesuit_bot::StrategyKind;
use onesuit_core::enumerate::DealEnumerator;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

const DEFAULT_RUN_ID: &str = "onesuit";
const DEFAULT_HAND_SIZE: usize = 3;
const DEFAULT_ITERATIONS: usize = 10_000;
const DEFAULT_MAX_DEALS: u64 = 50_000_000;
const RUN_ID_ALLOWED: &str = "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789._-";

/// Root simulation configuration loaded from YAML.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct SimulationConfig {
    #[serde(default = "default_run_id")]
    pub run_id: String,
    pub mode: SimulationMode,
    #[serde(default = "default_hand_size")]
    pub hand_size: usize,
    pub players: Vec<PlayerConfig>,
    #[serde(default = "default_iterations")]
    pub iterations: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub limits: LimitsConfig,
    #[serde(default)]
    pub outputs: OutputsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for SimulationConfig {
    /// Two rank-aware players over every three-card deal.
    fn default() -> Self {
        Self {
            run_id: default_run_id(),
            mode: SimulationMode::Exhaustive,
            hand_size: DEFAULT_HAND_SIZE,
            players: vec![
                PlayerConfig::seat(0, StrategyKind::Default),
                PlayerConfig::seat(1, StrategyKind::Default),
            ],
            iterations: DEFAULT_ITERATIONS,
            seed: None,
            limits: LimitsConfig::default(),
            outputs: OutputsConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl SimulationConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: SimulationConfig =
            serde_yaml::from_reader(reader).map_err(|source| ConfigError::Parse {
                source,
                path: path_buf.clone(),
            })?;
        cfg.validate().map_err(|source| ConfigError::Invalid {
            path: path_buf,
            source,
        })?;
        Ok(cfg)
    }

    /// Validate the configuration without performing I/O.
    pub fn validate(&mut self) -> Result<(), ValidationError> {
        validate_run_id(&self.run_id)?;
        validate_players(&self.players)?;
        self.validate_table()?;
        self.limits.validate()?;
        self.outputs.validate(&self.run_id)?;
        self.logging.normalize();
        if self.mode == SimulationMode::Exhaustive {
            self.validate_deal_budget()?;
        } else if self.iterations == 0 {
            return Err(ValidationError::InvalidField {
                field: "iterations".to_string(),
                message: "monte carlo runs need at least one iteration".to_string(),
            });
        }
        Ok(())
    }

    /// Resize the table to `count` seats. New seats copy the first seat's
    /// strategy.
    pub fn set_player_count(&mut self, count: usize) {
        let strategy = self
            .players
            .first()
            .map(|player| player.strategy)
            .unwrap_or_default();
        self.players.truncate(count);
        while self.players.len() < count {
            let index = self.players.len();
            self.players.push(PlayerConfig::seat(index, strategy));
        }
    }

    /// Assign strategies seat by seat, adding seats when there are more
    /// strategies than players.
    pub fn set_strategies(&mut self, strategies: &[StrategyKind]) {
        for (index, strategy) in strategies.iter().copied().enumerate() {
            match self.players.get_mut(index) {
                Some(player) => player.strategy = strategy,
                None => self.players.push(PlayerConfig::seat(index, strategy)),
            }
        }
    }

    pub fn strategies(&self) -> Vec<StrategyKind> {
        self.players.iter().map(|player| player.strategy).collect()
    }

    pub fn enumerator(&self) -> DealEnumerator {
        DealEnumerator::new(self.hand_size, self.players.len())
    }

    /// Resolve output templates (e.g., `{run_id}` placeholders) into concrete paths.
    pub fn resolved_outputs(&self) -> ResolvedOutputs {
        ResolvedOutputs {
            jsonl: self
                .outputs
                .jsonl
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
            summary_md: self
                .outputs
                .summary_md
                .as_deref()
                .map(|template| resolve_template(&self.run_id, template)),
        }
    }

    fn validate_table(&self) -> Result<(), ValidationError> {
        if self.hand_size == 0 {
            return Err(ValidationError::InvalidField {
                field: "hand_size".to_string(),
                message: "players must hold at least one card".to_string(),
            });
        }
        let deck = self.hand_size.checked_mul(self.players.len());
        if deck.is_none_or(|cards| cards > usize::from(u16::MAX)) {
            return Err(ValidationError::InvalidField {
                field: "hand_size".to_string(),
                message: format!(
                    "{} players with {} cards each exceeds the largest deck",
                    self.players.len(),
                    self.hand_size
                ),
            });
        }
        Ok(())
    }

    fn validate_deal_budget(&self) -> Result<(), ValidationError> {
        let within_budget = self
            .enumerator()
            .total()
            .is_some_and(|total| total <= u128::from(self.limits.max_deals));
        if !within_budget {
            return Err(ValidationError::InvalidField {
                field: "hand_size".to_string(),
                message: format!(
                    "exhaustive run over {} players x {} cards exceeds limits.max_deals ({})",
                    self.players.len(),
                    self.hand_size,
                    self.limits.max_deals
                ),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize, ValueEnum)]
#[serde(rename_all = "snake_case")]
pub enum SimulationMode {
    /// Every possible deal, once.
    Exhaustive,
    /// Randomly shuffled deals.
    MonteCarlo,
}

impl SimulationMode {
    pub const fn as_str(self) -> &'static str {
        match self {
            SimulationMode::Exhaustive => "exhaustive",
            SimulationMode::MonteCarlo => "monte_carlo",
        }
    }
}

/// One seat at the table.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq)]
pub struct PlayerConfig {
    pub name: String,
    #[serde(default)]
    pub strategy: StrategyKind,
}

impl PlayerConfig {
    fn seat(index: usize, strategy: StrategyKind) -> Self {
        Self {
            name: format!("p{}", index + 1),
            strategy,
        }
    }
}

/// Guard rails for exhaustive runs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LimitsConfig {
    #[serde(default = "default_max_deals")]
    pub max_deals: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            max_deals: DEFAULT_MAX_DEALS,
        }
    }
}

impl LimitsConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.max_deals == 0 {
            return Err(ValidationError::InvalidField {
                field: "limits.max_deals".to_string(),
                message: "deal limit must be greater than zero".to_string(),
            });
        }
        Ok(())
    }
}

/// Output artifact configuration. Both files are optional.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
pub struct OutputsConfig {
    #[serde(default)]
    pub jsonl: Option<String>,
    #[serde(default)]
    pub summary_md: Option<String>,
}

impl OutputsConfig {
    fn validate(&self, run_id: &str) -> Result<(), ValidationError> {
        for (label, value) in [
            ("outputs.jsonl", &self.jsonl),
            ("outputs.summary_md", &self.summary_md),
        ] {
            let Some(value) = value else {
                continue;
            };
            if value.trim().is_empty() {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "path must not be empty".to_string(),
                });
            }

            let resolved = resolve_template(run_id, value);
            if resolved.components().count() == 0 {
                return Err(ValidationError::InvalidField {
                    field: label.to_string(),
                    message: "resolved path is invalid".to_string(),
                });
            }
        }
        Ok(())
    }
}

/// Logging configuration defaults to disabled structured logs.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_run_id() -> String {
    DEFAULT_RUN_ID.to_string()
}

fn default_hand_size() -> usize {
    DEFAULT_HAND_SIZE
}

fn default_iterations() -> usize {
    DEFAULT_ITERATIONS
}

fn default_max_deals() -> u64 {
    DEFAULT_MAX_DEALS
}

fn default_tracing_level() -> String {
    "info".to_string()
}

fn validate_run_id(run_id: &str) -> Result<(), ValidationError> {
    if run_id.trim().is_empty() {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id must not be empty".to_string(),
        });
    }

    if !run_id.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
        return Err(ValidationError::InvalidField {
            field: "run_id".to_string(),
            message: "run_id may only contain alphanumeric characters, '.', '_' or '-'".to_string(),
        });
    }

    Ok(())
}

fn validate_players(players: &[PlayerConfig]) -> Result<(), ValidationError> {
    if players.len() < 2 {
        return Err(ValidationError::InvalidField {
            field: "players".to_string(),
            message: "at least two players must be specified".to_string(),
        });
    }

    let mut seen = HashSet::new();
    for player in players {
        if player.name.trim().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "players.name".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }

        if !player.name.chars().all(|c| RUN_ID_ALLOWED.contains(c)) {
            return Err(ValidationError::InvalidField {
                field: format!("players[{}].name", player.name),
                message: "player name contains invalid characters".to_string(),
            });
        }

        if !seen.insert(player.name.as_str()) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!("player name '{}' defined more than once", player.name),
            });
        }
    }

    Ok(())
}

fn resolve_template(run_id: &str, template: &str) -> PathBuf {
    let replaced = template.replace("{run_id}", run_id);
    PathBuf::from(replaced)
}

/// Fully resolved output paths.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolvedOutputs {
    pub jsonl: Option<PathBuf>,
    pub summary_md: Option<PathBuf>,
}

impl ResolvedOutputs {
    /// Directory that receives telemetry next to the summary, `.` otherwise.
    pub fn artifact_dir(&self) -> PathBuf {
        self.summary_md
            .as_deref()
            .or(self.jsonl.as_deref())
            .and_then(Path::parent)
            .filter(|dir| !dir.as_os_str().is_empty())
            .map(Path::to_path_buf)
            .unwrap_or_else(|| PathBuf::from("."))
    }
}

/// Errors surfaced when loading configuration files.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read {
        #[source]
        source: std::io::Error,
        path: PathBuf,
    },
    #[error("failed to parse config {path:?}: {source}")]
    Parse {
        #[source]
        source: serde_yaml::Error,
        path: PathBuf,
    },
    #[error("invalid configuration in {path:?}: {source}")]
    Invalid {
        path: PathBuf,
        source: ValidationError,
    },
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}
