use serde::Deserialize;
use spades_core::game::rules::GameRules;
use spades_core::model::player::{PlayerProfile, Seat};
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::Level;

/// Default names by seat order. The human seat is always called `You`.
const BOT_NAMES: [&str; 3] = ["Alex", "Blake", "Casey"];
const HUMAN_NAME: &str = "You";

/// Table setup loaded from YAML and overridden by command-line flags.
#[derive(Debug, Clone, Deserialize, PartialEq)]
#[serde(default)]
pub struct TableConfig {
    pub rules: GameRules,
    pub human_seat: usize,
    pub spectate: bool,
    pub seed: Option<u64>,
    pub names: Option<Vec<String>>,
    pub logging: LoggingConfig,
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            rules: GameRules::default(),
            human_seat: 0,
            spectate: false,
            seed: None,
            names: None,
            logging: LoggingConfig::default(),
        }
    }
}

impl TableConfig {
    /// Load configuration from a YAML file on disk.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let path_buf = path.to_path_buf();
        let file = File::open(path).map_err(|source| ConfigError::Read {
            source,
            path: path_buf.clone(),
        })?;
        let reader = BufReader::new(file);
        let mut cfg: TableConfig =
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
        self.rules
            .validate()
            .map_err(|err| ValidationError::InvalidField {
                field: "rules.target_score".to_string(),
                message: err.to_string(),
            })?;
        if Seat::from_index(self.human_seat).is_none() {
            return Err(ValidationError::InvalidField {
                field: "human_seat".to_string(),
                message: format!("seat must be between 0 and 3, got {}", self.human_seat),
            });
        }
        if let Some(names) = self.names.as_mut() {
            validate_names(names)?;
        }
        self.logging.validate()?;
        Ok(())
    }

    /// The interactive seat, or `None` when every seat is a bot.
    pub fn human_seat(&self) -> Option<Seat> {
        if self.spectate {
            None
        } else {
            Seat::from_index(self.human_seat)
        }
    }

    pub fn names(&self) -> [String; 4] {
        if let Some(names) = &self.names {
            return Seat::LOOP.map(|seat| {
                names
                    .get(seat.index())
                    .cloned()
                    .unwrap_or_else(|| seat.to_string())
            });
        }

        let human = self.human_seat();
        if human.is_none() {
            return Seat::LOOP.map(|seat| seat.to_string());
        }
        let mut bots = BOT_NAMES.iter();
        Seat::LOOP.map(|seat| {
            if Some(seat) == human {
                HUMAN_NAME.to_string()
            } else {
                bots.next().copied().unwrap_or_default().to_string()
            }
        })
    }

    pub fn profiles(&self) -> [PlayerProfile; 4] {
        let human = self.human_seat();
        let names = self.names();
        Seat::LOOP.map(|seat| {
            let name = names[seat.index()].clone();
            if Some(seat) == human {
                PlayerProfile::human(name)
            } else {
                PlayerProfile::bot(name)
            }
        })
    }
}

fn validate_names(names: &mut [String]) -> Result<(), ValidationError> {
    if names.len() != 4 {
        return Err(ValidationError::InvalidField {
            field: "names".to_string(),
            message: format!("exactly four names are required, got {}", names.len()),
        });
    }
    for name in names.iter_mut() {
        let trimmed = name.trim();
        if trimmed.is_empty() {
            return Err(ValidationError::InvalidField {
                field: "names".to_string(),
                message: "player name must not be empty".to_string(),
            });
        }
        *name = trimmed.to_string();
    }
    Ok(())
}

/// Logging is off unless a level or a log file is given.
#[derive(Debug, Clone, Default, Deserialize, PartialEq)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: Option<String>,
    pub file: Option<PathBuf>,
}

impl LoggingConfig {
    pub fn is_enabled(&self) -> bool {
        self.level.is_some() || self.file.is_some()
    }

    pub fn level(&self) -> Option<Level> {
        let raw = self.level.as_deref()?;
        match raw.trim().to_ascii_lowercase().as_str() {
            "trace" => Some(Level::TRACE),
            "debug" => Some(Level::DEBUG),
            "info" => Some(Level::INFO),
            "warn" | "warning" => Some(Level::WARN),
            "error" => Some(Level::ERROR),
            _ => None,
        }
    }

    fn validate(&mut self) -> Result<(), ValidationError> {
        if self.level.as_deref().is_some_and(|raw| raw.trim().is_empty()) {
            self.level = None;
        }
        if let Some(raw) = &self.level {
            if self.level().is_none() {
                return Err(ValidationError::InvalidField {
                    field: "logging.level".to_string(),
                    message: format!("unknown level '{raw}'"),
                });
            }
        }
        if self
            .file
            .as_ref()
            .is_some_and(|path| path.components().count() == 0)
        {
            return Err(ValidationError::InvalidField {
                field: "logging.file".to_string(),
                message: "path must not be empty".to_string(),
            });
        }
        Ok(())
    }
}

/// Errors that can occur while loading configuration files.
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
rules:
  target_score: 300
  allow_nil: true
human_seat: 2
seed: 99
names: ["Ann", " Bo ", "Cy", "Di"]
logging:
  level: "debug"
"#;

    #[test]
    fn defaults_seat_the_human_north() {
        let mut cfg = TableConfig::default();
        cfg.validate().expect("validate");
        assert_eq!(cfg.human_seat(), Some(Seat::North));
        assert_eq!(cfg.names(), ["You", "Alex", "Blake", "Casey"].map(String::from));
        assert!(!cfg.logging.is_enabled());
        assert_eq!(cfg.rules, GameRules::default());
    }

    #[test]
    fn human_takes_the_you_name_at_any_seat() {
        let cfg = TableConfig {
            human_seat: 2,
            ..TableConfig::default()
        };
        assert_eq!(cfg.names(), ["Alex", "Blake", "You", "Casey"].map(String::from));
        let profiles = cfg.profiles();
        assert!(profiles[2].is_human());
        assert_eq!(profiles.iter().filter(|p| p.is_human()).count(), 1);
    }

    #[test]
    fn spectating_seats_four_bots() {
        let cfg = TableConfig {
            spectate: true,
            ..TableConfig::default()
        };
        assert_eq!(cfg.human_seat(), None);
        assert!(cfg.profiles().iter().all(|p| !p.is_human()));
        assert_eq!(cfg.names()[0], "North");
    }

    #[test]
    fn parses_full_yaml() {
        let mut cfg: TableConfig = serde_yaml::from_str(FULL_YAML).expect("parse yaml");
        cfg.validate().expect("validate");
        assert_eq!(cfg.rules.target_score, 300);
        assert!(cfg.rules.allow_nil);
        assert!(!cfg.rules.allow_blind_nil);
        assert_eq!(cfg.human_seat(), Some(Seat::South));
        assert_eq!(cfg.seed, Some(99));
        assert_eq!(cfg.names()[1], "Bo");
        assert_eq!(cfg.logging.level(), Some(Level::DEBUG));
    }

    #[test]
    fn rejects_out_of_range_seat() {
        let mut cfg = TableConfig {
            human_seat: 4,
            ..TableConfig::default()
        };
        let err = cfg.validate().expect_err("seat 4 is invalid");
        assert!(err.to_string().starts_with("human_seat:"));
    }

    #[test]
    fn rejects_wrong_name_count_and_blank_names() {
        let mut cfg = TableConfig {
            names: Some(vec!["A".into(), "B".into()]),
            ..TableConfig::default()
        };
        assert!(cfg.validate().is_err());

        cfg.names = Some(vec!["A".into(), "  ".into(), "C".into(), "D".into()]);
        let err = cfg.validate().expect_err("blank name");
        assert!(err.to_string().contains("must not be empty"));
    }

    #[test]
    fn rejects_bad_rules_and_log_levels() {
        let mut cfg = TableConfig::default();
        cfg.rules.target_score = 0;
        let err = cfg.validate().expect_err("zero target");
        assert!(err.to_string().starts_with("rules.target_score"));

        let mut cfg = TableConfig::default();
        cfg.logging.level = Some("loud".into());
        let err = cfg.validate().expect_err("unknown level");
        assert!(err.to_string().contains("loud"));
    }

    #[test]
    fn from_path_reports_the_file() {
        let mut file = tempfile::NamedTempFile::new().expect("temp file");
        writeln!(file, "human_seat: 7").expect("write");
        let err = TableConfig::from_path(file.path()).expect_err("invalid seat");
        assert!(matches!(err, ConfigError::Invalid { .. }));
        assert_eq!(err.path(), file.path());

        let missing = TableConfig::from_path("definitely/not/here.yaml").expect_err("missing");
        assert!(matches!(missing, ConfigError::Read { .. }));
    }
}
