//! Game configuration

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Per-game parameters shared by the driver and the AI
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Board size n (top row length)
    pub size: usize,
    /// Marks in a line needed to win
    pub k: usize,
    /// AI thinking time per move, in seconds
    pub time_limit_secs: f64,
    /// Random seed for reproducibility (None = random)
    pub seed: Option<u64>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            size: 7,
            k: 4,
            time_limit_secs: 10.0,
            seed: None,
        }
    }
}

impl GameConfig {
    pub fn new(size: usize, k: usize) -> Self {
        Self {
            size,
            k,
            ..Default::default()
        }
    }

    /// Set AI time limit
    pub fn with_time_limit(mut self, secs: f64) -> Self {
        self.time_limit_secs = secs;
        self
    }

    /// Set random seed
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Time limit as a `Duration`, saturating for unvalidated values
    pub fn time_limit(&self) -> Duration {
        Duration::try_from_secs_f64(self.time_limit_secs.max(0.0)).unwrap_or(Duration::MAX)
    }

    /// Check the parameters describe a playable game
    pub fn validate(&self) -> Result<()> {
        if self.size < 1 {
            return Err(Error::InvalidSize(self.size));
        }
        if self.k < 1 {
            return Err(Error::Config(format!("k must be at least 1, got {}", self.k)));
        }
        if !self.time_limit_secs.is_finite()
            || self.time_limit_secs <= 0.0
            || Duration::try_from_secs_f64(self.time_limit_secs).is_err()
        {
            return Err(Error::Config(format!(
                "time limit must be a positive number of seconds, got {}",
                self.time_limit_secs
            )));
        }
        Ok(())
    }

    /// Load from a JSON file; missing fields take their defaults
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("{}: {}", path.display(), e)))?;
        let config: GameConfig =
            serde_json::from_str(&content).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }
}
