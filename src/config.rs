//! Configuration module

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use std::time::Duration;

use crate::error::BenchError;

/// Main configuration struct
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Sampling settings
    pub runner: RunnerConfig,

    /// Logging settings
    pub logging: LoggingConfig,
}

/// Runner tuning. Defaults follow the usual JS micro-benchmark conventions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunnerConfig {
    /// Untimed invocations before sampling
    pub warmup_iterations: u64,
    /// Sampling stops once this many batches are recorded
    pub min_samples: usize,
    /// Sampling also stops once this much time has passed, even short of `min_samples`
    pub max_sample_time_ms: u64,
    /// Batches are sized to take at least this long
    pub min_batch_time_ms: u64,
    /// 1.96 for a 95% confidence interval
    pub confidence_multiplier: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoggingConfig {
    pub level: String,
    pub json_output: bool,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            warmup_iterations: 10_000,
            min_samples: 5,
            max_sample_time_ms: 5_000,
            min_batch_time_ms: 50,
            confidence_multiplier: 1.96,
        }
    }
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json_output: false,
        }
    }
}

impl RunnerConfig {
    /// Reject out-of-range options before any case runs
    pub fn validate(&self) -> Result<(), BenchError> {
        if self.min_samples == 0 {
            return Err(BenchError::configuration("min_samples must be > 0"));
        }
        if self.max_sample_time_ms == 0 {
            return Err(BenchError::configuration("max_sample_time_ms must be > 0"));
        }
        if !self.confidence_multiplier.is_finite() || self.confidence_multiplier <= 0.0 {
            return Err(BenchError::configuration(format!(
                "confidence_multiplier must be a positive number, got {}",
                self.confidence_multiplier
            )));
        }
        Ok(())
    }

    pub fn max_sample_time(&self) -> Duration {
        Duration::from_millis(self.max_sample_time_ms)
    }

    pub fn min_batch_time(&self) -> Duration {
        Duration::from_millis(self.min_batch_time_ms)
    }
}

impl Config {
    /// Load config from environment
    pub fn from_env() -> anyhow::Result<Self> {
        let config_path =
            std::env::var("BENCH_CONFIG").unwrap_or_else(|_| "config/bench.json".to_string());

        if Path::new(&config_path).exists() {
            Self::load(&config_path)
        } else {
            Ok(Config::default())
        }
    }

    /// Load config from a JSON file. Missing fields take their defaults.
    pub fn load(path: impl AsRef<Path>) -> anyhow::Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("reading config {}", path.display()))?;
        let config: Config = serde_json::from_str(&content)
            .with_context(|| format!("parsing config {}", path.display()))?;
        Ok(config)
    }

    /// Save config to file
    pub fn save(&self, path: impl AsRef<Path>) -> anyhow::Result<()> {
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path.as_ref(), content)
            .with_context(|| format!("writing config {}", path.as_ref().display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = Config::default();
        assert!(config.runner.validate().is_ok());
        assert_eq!(config.runner.warmup_iterations, 10_000);
        assert!((config.runner.confidence_multiplier - 1.96).abs() < f64::EPSILON);
    }

    #[test]
    fn test_validate_rejects_out_of_range() {
        let zero_samples = RunnerConfig {
            min_samples: 0,
            ..Default::default()
        };
        let zero_time = RunnerConfig {
            max_sample_time_ms: 0,
            ..Default::default()
        };
        let bad_multiplier = RunnerConfig {
            confidence_multiplier: f64::NAN,
            ..Default::default()
        };
        let negative_multiplier = RunnerConfig {
            confidence_multiplier: -1.0,
            ..Default::default()
        };

        for config in [zero_samples, zero_time, bad_multiplier, negative_multiplier] {
            assert!(matches!(
                config.validate(),
                Err(BenchError::Configuration(_))
            ));
        }
    }

    #[test]
    fn test_zero_warmup_and_batch_time_allowed() {
        let config = RunnerConfig {
            warmup_iterations: 0,
            min_batch_time_ms: 0,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("bench.json");

        let mut config = Config::default();
        config.runner.min_samples = 12;
        config.logging.json_output = true;
        config.save(&path).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("partial.json");
        std::fs::write(&path, r#"{ "runner": { "min_samples": 20 } }"#).unwrap();

        let loaded = Config::load(&path).unwrap();
        assert_eq!(loaded.runner.min_samples, 20);
        assert_eq!(loaded.runner.warmup_iterations, 10_000);
        assert_eq!(loaded.logging.level, "info");
    }

    #[test]
    fn test_load_reports_path_on_parse_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        std::fs::write(&path, "{ not json").unwrap();

        let err = Config::load(&path).unwrap_err();
        assert!(err.to_string().contains("broken.json"));
    }
}
