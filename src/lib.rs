//! Validator Bench
//!
//! Throughput comparison of Rust schema-validation stacks on one fixed sample.
//!
//! ## Architecture
//! - Bench: warm-up, adaptive batch sampling, RME statistics, ranked report
//! - Cases: the sample input and one case per validation stack
//! - Config: runner tuning and logging, loaded from JSON

pub mod bench;
pub mod cases;
pub mod config;
pub mod error;
pub mod types;

pub use bench::{format_report, format_report_json, run_case, run_suite, warm_up, BenchmarkSuite};
pub use config::{Config, RunnerConfig};
pub use error::BenchError;
pub use types::{BenchmarkCase, CasePhase, RunReport, SampleStats};
