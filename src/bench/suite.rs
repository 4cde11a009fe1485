//! Owning collection of benchmark cases

use super::runner::{self, SuiteEvent};
use crate::config::RunnerConfig;
use crate::error::BenchError;
use crate::types::{BenchmarkCase, RunReport};

/// Suite of benchmark cases, run in registration order
#[derive(Debug, Default)]
pub struct BenchmarkSuite {
    pub name: String,
    cases: Vec<BenchmarkCase>,
}

impl BenchmarkSuite {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            cases: Vec::new(),
        }
    }

    /// Register a case. Names must be unique within the suite.
    pub fn add(&mut self, case: BenchmarkCase) -> Result<&mut Self, BenchError> {
        if self.cases.iter().any(|c| c.name() == case.name()) {
            return Err(BenchError::DuplicateCase(case.name().to_string()));
        }
        self.cases.push(case);
        Ok(self)
    }

    pub fn len(&self) -> usize {
        self.cases.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cases.is_empty()
    }

    pub fn names(&self) -> Vec<&str> {
        self.cases.iter().map(|c| c.name()).collect()
    }

    /// Keep only the cases whose name satisfies `keep`
    pub fn retain<F>(&mut self, mut keep: F)
    where
        F: FnMut(&str) -> bool,
    {
        self.cases.retain(|c| keep(c.name()));
    }

    pub fn run(&mut self, config: &RunnerConfig) -> Result<RunReport, BenchError> {
        runner::run_suite(&mut self.cases, config)
    }

    pub fn run_with<F>(&mut self, config: &RunnerConfig, observer: F) -> Result<RunReport, BenchError>
    where
        F: FnMut(SuiteEvent<'_>),
    {
        runner::run_suite_with(&mut self.cases, config, observer)
    }
}
