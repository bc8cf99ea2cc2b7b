use crate::core::{BoardError, ExamRules, Result};
use crate::storage::DurabilityMode;
use std::env;
use std::path::{Path, PathBuf};

pub const DATA_DIR_ENV: &str = "EXAM_BOARD_DATA_DIR";
pub const DURABILITY_ENV: &str = "EXAM_BOARD_DURABILITY";

/// Record store configuration
#[derive(Debug, Clone)]
pub struct StoreConfig {
    /// Directory holding one file per partition
    pub data_dir: PathBuf,

    /// How partition writes reach the disk
    pub durability: DurabilityMode,

    /// Limits applied to new examination papers
    pub rules: ExamRules,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("."),
            durability: DurabilityMode::Sync,
            rules: ExamRules::default(),
        }
    }
}

impl StoreConfig {
    /// Create a configuration rooted at `data_dir`
    pub fn new<P: AsRef<Path>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.as_ref().to_path_buf(),
            ..Self::default()
        }
    }

    /// Configuration that never touches the disk
    pub fn in_memory() -> Self {
        Self::default().durability(DurabilityMode::None)
    }

    /// Set the data directory
    pub fn data_dir<P: AsRef<Path>>(mut self, data_dir: P) -> Self {
        self.data_dir = data_dir.as_ref().to_path_buf();
        self
    }

    /// Set the durability mode
    pub fn durability(mut self, durability: DurabilityMode) -> Self {
        self.durability = durability;
        self
    }

    /// Set the exam rules
    pub fn rules(mut self, rules: ExamRules) -> Self {
        self.rules = rules;
        self
    }

    /// Load from the environment (and a `.env` file if one exists).
    ///
    /// `EXAM_BOARD_DATA_DIR` defaults to the working directory and
    /// `EXAM_BOARD_DURABILITY` (`sync`, `async`, `none`) to `sync`.
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok();

        let data_dir = env::var(DATA_DIR_ENV).unwrap_or_else(|_| ".".to_string());
        let durability = match env::var(DURABILITY_ENV) {
            Ok(raw) => DurabilityMode::from_str(&raw).ok_or_else(|| {
                BoardError::Config(format!(
                    "{} must be one of: sync, async, none (got '{}')",
                    DURABILITY_ENV, raw
                ))
            })?,
            Err(_) => DurabilityMode::Sync,
        };

        Ok(Self::new(data_dir).durability(durability))
    }
}
