//! Core types for the benchmark runner

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::BenchError;

/// Operation under measurement. Returns `Err` (or panics) when the
/// underlying library rejects its input.
pub type Operation = Box<dyn FnMut() -> anyhow::Result<()>>;

/// One named operation under comparison
pub struct BenchmarkCase {
    name: String,
    operation: Operation,
}

impl BenchmarkCase {
    pub fn new<F>(name: impl Into<String>, operation: F) -> Self
    where
        F: FnMut() -> anyhow::Result<()> + 'static,
    {
        Self {
            name: name.into(),
            operation: Box::new(operation),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Invoke the operation once
    #[inline(always)]
    pub fn call(&mut self) -> anyhow::Result<()> {
        (self.operation)()
    }
}

impl fmt::Debug for BenchmarkCase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BenchmarkCase")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Lifecycle of a case within a run. Only ever moves forward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum CasePhase {
    Registered,
    WarmingUp,
    Sampling,
    Reported,
}

impl CasePhase {
    /// Next phase, or `None` once reported
    pub fn next(self) -> Option<Self> {
        match self {
            Self::Registered => Some(Self::WarmingUp),
            Self::WarmingUp => Some(Self::Sampling),
            Self::Sampling => Some(Self::Reported),
            Self::Reported => None,
        }
    }
}

impl fmt::Display for CasePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Registered => "registered",
            Self::WarmingUp => "warming up",
            Self::Sampling => "sampling",
            Self::Reported => "reported",
        };
        f.write_str(s)
    }
}

/// Measurement summary for one case
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleStats {
    pub name: String,
    pub ops_per_sec: f64,
    /// Relative margin of error, percent of the mean batch rate
    pub rme_percent: f64,
    pub sample_count: usize,
    pub batch_size: u64,
    pub total_iterations: u64,
    pub elapsed_ms: f64,
}

impl fmt::Display for SampleStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{:<24} | {:>14.2} ops/s | ±{:>6.2}% | {:>3} samples",
            self.name, self.ops_per_sec, self.rme_percent, self.sample_count
        )
    }
}

/// Outcome of a complete suite run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    /// Stats in registration order
    pub results: Vec<SampleStats>,
    pub fastest: String,
}

impl RunReport {
    /// Assemble a report; the fastest case is the first one holding the
    /// maximum throughput.
    pub fn new(results: Vec<SampleStats>) -> Result<Self, BenchError> {
        let mut fastest: Option<&SampleStats> = None;
        for stats in &results {
            match fastest {
                Some(best) if stats.ops_per_sec <= best.ops_per_sec => {}
                _ => fastest = Some(stats),
            }
        }
        let fastest = fastest
            .map(|s| s.name.clone())
            .ok_or_else(|| BenchError::configuration("report needs at least one case"))?;

        Ok(Self { results, fastest })
    }

    pub fn fastest(&self) -> Option<&SampleStats> {
        self.results.iter().find(|s| s.name == self.fastest)
    }

    pub fn get(&self, name: &str) -> Option<&SampleStats> {
        self.results.iter().find(|s| s.name == name)
    }

    /// Stats ordered by throughput, fastest first. Ties keep registration order.
    pub fn ranked(&self) -> Vec<&SampleStats> {
        let mut ranked: Vec<&SampleStats> = self.results.iter().collect();
        ranked.sort_by(|a, b| b.ops_per_sec.total_cmp(&a.ops_per_sec));
        ranked
    }
}
