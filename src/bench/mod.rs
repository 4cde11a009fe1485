//! Benchmark module
//! Adaptive batch sampling with warm-up, RME and a ranked report

pub mod report;
pub mod runner;
pub mod stats;
pub mod suite;

pub use report::{format_report, format_report_json};
pub use runner::{run_case, run_suite, run_suite_with, warm_up, SuiteEvent};
pub use stats::SampleSummary;
pub use suite::BenchmarkSuite;
