use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use temple_core::game::leaderboard::LEADERBOARD_MAX_ENTRIES;
use temple_core::game::match_state::{DEFAULT_AUTOMATED_PLAYERS, MAX_PLAYERS, MIN_AUTOMATED_PLAYERS};
use thiserror::Error;
use tracing::Level;

const DEFAULT_LEADERBOARD_FILE: &str = "temple_leaderboard.json";
const DEFAULT_LOG_FILE: &str = "temple_telemetry.jsonl";
const DEFAULT_CARDS_PER_ROW: usize = 5;
const MAX_CARDS_PER_ROW: usize = 12;

/// Root application configuration loaded from YAML. Every section is optional.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AppConfig {
    #[serde(default = "default_players")]
    pub players: usize,
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub leaderboard: LeaderboardConfig,
    #[serde(default)]
    pub display: DisplayConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            players: default_players(),
            seed: None,
            leaderboard: LeaderboardConfig::default(),
            display: DisplayConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

impl AppConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: AppConfig =
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
        if !(MIN_AUTOMATED_PLAYERS..MAX_PLAYERS).contains(&self.players) {
            return Err(ValidationError::InvalidField {
                field: "players".to_string(),
                message: format!(
                    "automated players must be between {MIN_AUTOMATED_PLAYERS} and {}",
                    MAX_PLAYERS - 1
                ),
            });
        }
        self.leaderboard.validate()?;
        self.display.validate()?;
        self.logging.normalize();
        self.logging.validate()?;
        Ok(())
    }
}

fn default_players() -> usize {
    DEFAULT_AUTOMATED_PLAYERS
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LeaderboardConfig {
    #[serde(default = "default_leaderboard_path")]
    pub path: PathBuf,
    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

impl Default for LeaderboardConfig {
    fn default() -> Self {
        Self {
            path: default_leaderboard_path(),
            max_entries: default_max_entries(),
        }
    }
}

impl LeaderboardConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.path.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "leaderboard.path".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        if self.max_entries == 0 || self.max_entries > LEADERBOARD_MAX_ENTRIES {
            return Err(ValidationError::InvalidField {
                field: "leaderboard.max_entries".to_string(),
                message: format!("must be between 1 and {LEADERBOARD_MAX_ENTRIES}"),
            });
        }
        Ok(())
    }
}

fn default_leaderboard_path() -> PathBuf {
    PathBuf::from(DEFAULT_LEADERBOARD_FILE)
}

fn default_max_entries() -> usize {
    LEADERBOARD_MAX_ENTRIES
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct DisplayConfig {
    #[serde(default = "default_color")]
    pub color: bool,
    #[serde(default = "default_cards_per_row")]
    pub cards_per_row: usize,
}

impl Default for DisplayConfig {
    fn default() -> Self {
        Self {
            color: default_color(),
            cards_per_row: default_cards_per_row(),
        }
    }
}

impl DisplayConfig {
    fn validate(&self) -> Result<(), ValidationError> {
        if self.cards_per_row == 0 || self.cards_per_row > MAX_CARDS_PER_ROW {
            return Err(ValidationError::InvalidField {
                field: "display.cards_per_row".to_string(),
                message: format!("must be between 1 and {MAX_CARDS_PER_ROW}"),
            });
        }
        Ok(())
    }
}

fn default_color() -> bool {
    true
}

fn default_cards_per_row() -> usize {
    DEFAULT_CARDS_PER_ROW
}

/// Logging configuration defaults to warnings on stderr and no structured file.
#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub enable_structured: bool,
    #[serde(default = "default_tracing_level")]
    pub tracing_level: String,
    #[serde(default = "default_log_file")]
    pub file: PathBuf,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            enable_structured: false,
            tracing_level: default_tracing_level(),
            file: default_log_file(),
        }
    }
}

impl LoggingConfig {
    fn normalize(&mut self) {
        if self.tracing_level.trim().is_empty() {
            self.tracing_level = default_tracing_level();
        }
    }

    fn validate(&self) -> Result<(), ValidationError> {
        if self.level().is_none() {
            return Err(ValidationError::InvalidField {
                field: "logging.tracing_level".to_string(),
                message: format!("unknown level '{}'", self.tracing_level),
            });
        }
        if self.enable_structured && self.file.as_os_str().is_empty() {
            return Err(ValidationError::InvalidField {
                field: "logging.file".to_string(),
                message: "structured logging needs a file path".to_string(),
            });
        }
        Ok(())
    }

    pub fn level(&self) -> Option<Level> {
        match self.tracing_level.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }
}

fn default_tracing_level() -> String {
    "warn".to_string()
}

fn default_log_file() -> PathBuf {
    PathBuf::from(DEFAULT_LOG_FILE)
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

impl ConfigError {
    pub fn path(&self) -> &Path {
        match self {
            ConfigError::Read { path, .. }
            | ConfigError::Parse { path, .. }
            | ConfigError::Invalid { path, .. } => path.as_path(),
        }
    }
}

/// Validation failures captured with contextual metadata.
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field}: {message}")]
    InvalidField { field: String, message: String },
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const FULL_YAML: &str = r#"
players: 5
seed: 42
leaderboard:
  path: "scores/temple.json"
  max_entries: 5
display:
  color: false
  cards_per_row: 4
logging:
  enable_structured: true
  tracing_level: "debug"
  file: "logs/run.jsonl"
"#;

    #[test]
    fn loads_full_config() {
        let mut cfg: AppConfig = serde_yaml::from_str(FULL_YAML).expect("parse yaml");
        cfg.validate().expect("validate");

        assert_eq!(cfg.players, 5);
        assert_eq!(cfg.seed, Some(42));
        assert_eq!(cfg.leaderboard.max_entries, 5);
        assert!(!cfg.display.color);
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
        assert_eq!(cfg.logging.file, PathBuf::from("logs/run.jsonl"));
    }

    #[test]
    fn empty_document_uses_defaults() {
        let mut cfg: AppConfig = serde_yaml::from_str("{}").expect("parse");
        cfg.validate().expect("defaults validate");
        assert_eq!(cfg, AppConfig::default());
        assert_eq!(cfg.players, DEFAULT_AUTOMATED_PLAYERS);
        assert_eq!(cfg.leaderboard.path, PathBuf::from(DEFAULT_LEADERBOARD_FILE));
        assert_eq!(cfg.logging.level(), Some(Level::WARN));
    }

    #[test]
    fn rejects_out_of_range_players() {
        let yaml = FULL_YAML.replace("players: 5", "players: 7");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("seven opponents is too many");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "players"
        ));
    }

    #[test]
    fn rejects_oversized_leaderboard() {
        let yaml = FULL_YAML.replace("max_entries: 5", "max_entries: 25");
        let mut cfg: AppConfig = serde_yaml::from_str(&yaml).expect("parse");
        let err = cfg.validate().expect_err("cap is fixed at ten");
        assert!(matches!(
            err,
            ValidationError::InvalidField { field, .. } if field == "leaderboard.max_entries"
        ));
    }

    #[test]
    fn blank_level_falls_back_and_unknown_level_fails() {
        let mut blank: AppConfig =
            serde_yaml::from_str("logging:\n  tracing_level: \"  \"\n").expect("parse");
        blank.validate().expect("blank level normalizes");
        assert_eq!(blank.logging.tracing_level, "warn");

        let mut loud: AppConfig =
            serde_yaml::from_str("logging:\n  tracing_level: \"shout\"\n").expect("parse");
        assert!(loud.validate().is_err());
    }

    #[test]
    fn from_path_reports_file_errors() {
        let dir = tempfile::tempdir().expect("temp dir");
        let missing = dir.path().join("missing.yaml");
        let err = AppConfig::from_path(&missing).expect_err("missing file");
        assert!(matches!(err, ConfigError::Read { .. }));
        assert_eq!(err.path(), missing.as_path());

        let broken = dir.path().join("broken.yaml");
        let mut file = File::create(&broken).expect("create");
        writeln!(file, "players: [not, a, number]").expect("write");
        let err = AppConfig::from_path(&broken).expect_err("bad yaml");
        assert!(matches!(err, ConfigError::Parse { .. }));

        let invalid = dir.path().join("invalid.yaml");
        std::fs::write(&invalid, "display:\n  cards_per_row: 0\n").expect("write");
        let err = AppConfig::from_path(&invalid).expect_err("zero cards per row");
        assert!(matches!(err, ConfigError::Invalid { .. }));
    }
}
