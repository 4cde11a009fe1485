//! Warm-up, adaptive batch sampling and suite orchestration
//!
//! Cases run strictly one after another: overlapping them would have
//! them contend for the same core and skew the comparison.

use anyhow::anyhow;
use std::any::Any;
use std::collections::HashSet;
use std::hint::black_box;
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

use super::stats::SampleSummary;
use crate::config::RunnerConfig;
use crate::error::BenchError;
use crate::types::{BenchmarkCase, CasePhase, RunReport, SampleStats};

/// Upper bound on iterations per timed batch
const MAX_BATCH_SIZE: u64 = 1 << 32;

/// Most batch rates reserved up front; the time cap bounds the rest
const MAX_RESERVED_SAMPLES: usize = 1024;

/// Calibration growth factor bounds
const MIN_GROWTH: f64 = 2.0;
const MAX_GROWTH: f64 = 1000.0;

/// Notifications emitted while a suite runs
#[derive(Debug, Clone, Copy)]
pub enum SuiteEvent<'a> {
    PhaseChanged { name: &'a str, phase: CasePhase },
    CaseReported(&'a SampleStats),
}

/// Invoke `case` `iterations` times, untimed, before sampling begins
pub fn warm_up(case: &mut BenchmarkCase, iterations: u64) -> Result<(), BenchError> {
    if iterations == 0 {
        return Ok(());
    }
    run_batch(case, iterations, CasePhase::WarmingUp).map(|_| ())
}

/// Calibrate a batch size, then sample until `min_samples` batches are
/// recorded or `max_sample_time_ms` runs out.
pub fn run_case(case: &mut BenchmarkCase, config: &RunnerConfig) -> Result<SampleStats, BenchError> {
    config.validate()?;

    let max_time = config.max_sample_time();
    let batch_size = calibrate(case, config.min_batch_time().min(max_time), max_time)?;

    let mut rates = Vec::with_capacity(config.min_samples.min(MAX_RESERVED_SAMPLES));
    let mut total_iterations = 0u64;
    let mut total_elapsed = Duration::ZERO;
    let started = Instant::now();

    loop {
        let elapsed = run_batch(case, batch_size, CasePhase::Sampling)?.max(Duration::from_nanos(1));
        total_iterations += batch_size;
        total_elapsed += elapsed;
        rates.push(batch_size as f64 / elapsed.as_secs_f64());

        if rates.len() >= config.min_samples || started.elapsed() >= max_time {
            break;
        }
    }

    if rates.len() < config.min_samples {
        warn!(
            case = case.name(),
            samples = rates.len(),
            min_samples = config.min_samples,
            "sampling time cap reached before min_samples"
        );
    }

    let summary = SampleSummary::from_rates(&rates, config.confidence_multiplier);

    Ok(SampleStats {
        name: case.name().to_string(),
        ops_per_sec: total_iterations as f64 / total_elapsed.as_secs_f64(),
        rme_percent: summary.rme_percent,
        sample_count: summary.size,
        batch_size,
        total_iterations,
        elapsed_ms: total_elapsed.as_secs_f64() * 1000.0,
    })
}

/// Warm up and sample every case in registration order
pub fn run_suite(cases: &mut [BenchmarkCase], config: &RunnerConfig) -> Result<RunReport, BenchError> {
    run_suite_with(cases, config, |_| {})
}

/// Like [`run_suite`], reporting progress to `observer` as each case moves on.
///
/// The first failing case aborts the run; events already delivered stay valid.
pub fn run_suite_with<F>(
    cases: &mut [BenchmarkCase],
    config: &RunnerConfig,
    mut observer: F,
) -> Result<RunReport, BenchError>
where
    F: FnMut(SuiteEvent<'_>),
{
    config.validate()?;
    if cases.is_empty() {
        return Err(BenchError::configuration("suite has no cases"));
    }
    {
        let mut seen = HashSet::new();
        for case in cases.iter() {
            if !seen.insert(case.name()) {
                return Err(BenchError::DuplicateCase(case.name().to_string()));
            }
        }
    }

    let mut results = Vec::with_capacity(cases.len());

    for case in cases.iter_mut() {
        let mut phase = CasePhase::Registered;

        advance(&mut phase, case.name(), &mut observer);
        warm_up(case, config.warmup_iterations)?;
        info!("Warm-up complete: {}", case.name());

        advance(&mut phase, case.name(), &mut observer);
        let stats = run_case(case, config)?;

        advance(&mut phase, case.name(), &mut observer);
        info!("{}", stats);
        observer(SuiteEvent::CaseReported(&stats));
        results.push(stats);
    }

    RunReport::new(results)
}

fn advance<F>(phase: &mut CasePhase, name: &str, observer: &mut F)
where
    F: FnMut(SuiteEvent<'_>),
{
    if let Some(next) = phase.next() {
        *phase = next;
        debug!(case = name, phase = %next, "phase change");
        observer(SuiteEvent::PhaseChanged { name, phase: next });
    }
}

/// Grow the batch size until one batch takes at least `min_batch`.
/// Gives up growing once calibration itself has used `max_time`.
fn calibrate(case: &mut BenchmarkCase, min_batch: Duration, max_time: Duration) -> Result<u64, BenchError> {
    let started = Instant::now();
    let mut count = 1u64;
    loop {
        let elapsed = run_batch(case, count, CasePhase::Sampling)?;
        if elapsed >= min_batch || count >= MAX_BATCH_SIZE || started.elapsed() >= max_time {
            debug!(case = case.name(), batch_size = count, ?elapsed, "calibrated");
            return Ok(count);
        }

        let factor = if elapsed.is_zero() {
            10.0
        } else {
            (min_batch.as_secs_f64() / elapsed.as_secs_f64()).clamp(MIN_GROWTH, MAX_GROWTH)
        };
        count = ((count as f64 * factor).ceil() as u64).min(MAX_BATCH_SIZE);
    }
}

/// Time `count` back-to-back invocations. Errors and panics become `InvalidCase`.
fn run_batch(case: &mut BenchmarkCase, count: u64, phase: CasePhase) -> Result<Duration, BenchError> {
    let outcome = panic::catch_unwind(AssertUnwindSafe(|| -> anyhow::Result<Duration> {
        let start = Instant::now();
        for _ in 0..count {
            black_box(case.call())?;
        }
        Ok(start.elapsed())
    }));

    let source = match outcome {
        Ok(Ok(elapsed)) => return Ok(elapsed),
        Ok(Err(err)) => err,
        Err(payload) => anyhow!("panicked: {}", panic_message(payload.as_ref())),
    };

    Err(BenchError::InvalidCase {
        name: case.name().to_string(),
        phase,
        source,
    })
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s
    } else {
        "non-string panic payload"
    }
}
