//! Error types for the benchmark runner

use thiserror::Error;

use crate::types::CasePhase;

/// Errors surfaced by the runner
#[derive(Debug, Error)]
pub enum BenchError {
    /// An operation failed or panicked while it was being exercised.
    /// Stats already reported for earlier cases remain valid.
    #[error("case '{name}' failed while {phase}: {source}")]
    InvalidCase {
        name: String,
        phase: CasePhase,
        #[source]
        source: anyhow::Error,
    },

    /// Options out of range, or a suite that cannot run. Raised before any case starts.
    #[error("invalid configuration: {0}")]
    Configuration(String),

    #[error("duplicate case name '{0}'")]
    DuplicateCase(String),
}

impl BenchError {
    pub fn configuration(msg: impl Into<String>) -> Self {
        Self::Configuration(msg.into())
    }

    /// Name of the failing case, if this error belongs to one
    pub fn case_name(&self) -> Option<&str> {
        match self {
            Self::InvalidCase { name, .. } | Self::DuplicateCase(name) => Some(name),
            Self::Configuration(_) => None,
        }
    }
}
