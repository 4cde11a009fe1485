//! Validator Bench CLI
//! Runs every validator case against the sample user and prints a ranked table

use clap::Parser;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::info;
use tracing_subscriber::EnvFilter;
use validator_bench::bench::SuiteEvent;
use validator_bench::config::LoggingConfig;
use validator_bench::{cases, format_report, format_report_json, CasePhase, Config};

#[derive(Debug, Parser)]
#[command(name = "validator-bench", version, about = "Compare schema validator throughput")]
struct Cli {
    /// JSON config file (defaults to $BENCH_CONFIG, then config/bench.json)
    #[arg(long)]
    config: Option<PathBuf>,

    /// Untimed invocations per case before sampling
    #[arg(long)]
    warmup: Option<u64>,

    #[arg(long)]
    min_samples: Option<usize>,

    #[arg(long)]
    max_time_ms: Option<u64>,

    #[arg(long)]
    min_batch_ms: Option<u64>,

    /// Confidence multiplier for the margin of error
    #[arg(long)]
    confidence: Option<f64>,

    /// Only run the named case (repeatable)
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// List case names and exit
    #[arg(long)]
    list: bool,

    /// Write the effective config to PATH and exit
    #[arg(long, value_name = "PATH")]
    save_config: Option<PathBuf>,
}

impl Cli {
    fn apply(&self, config: &mut Config) {
        let runner = &mut config.runner;
        if let Some(v) = self.warmup {
            runner.warmup_iterations = v;
        }
        if let Some(v) = self.min_samples {
            runner.min_samples = v;
        }
        if let Some(v) = self.max_time_ms {
            runner.max_sample_time_ms = v;
        }
        if let Some(v) = self.min_batch_ms {
            runner.min_batch_time_ms = v;
        }
        if let Some(v) = self.confidence {
            runner.confidence_multiplier = v;
        }
    }
}

fn init_logging(logging: &LoggingConfig) -> anyhow::Result<()> {
    // RUST_LOG wins over the config file
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&logging.level))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr);

    if logging.json_output {
        builder.json().try_init().map_err(|e| anyhow::anyhow!(e))?;
    } else {
        builder.try_init().map_err(|e| anyhow::anyhow!(e))?;
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load(path)?,
        None => Config::from_env()?,
    };
    cli.apply(&mut config);

    init_logging(&config.logging)?;

    if let Some(path) = &cli.save_config {
        config.save(path)?;
        info!("Config written to {}", path.display());
        return Ok(());
    }

    let sample = Arc::new(cases::sample_user());
    let mut suite = cases::default_suite(sample)?;

    if cli.list {
        for name in suite.names() {
            println!("{name}");
        }
        return Ok(());
    }

    if !cli.only.is_empty() {
        let unknown: Vec<&String> = cli
            .only
            .iter()
            .filter(|name| !suite.names().contains(&name.as_str()))
            .collect();
        if !unknown.is_empty() {
            anyhow::bail!("unknown case(s): {:?}; try --list", unknown);
        }
        suite.retain(|name| cli.only.iter().any(|o| o == name));
    }

    info!(
        cases = suite.len(),
        cpus = num_cpus::get(),
        os = std::env::consts::OS,
        arch = std::env::consts::ARCH,
        "Starting validator benchmark"
    );
    info!(
        warmup = config.runner.warmup_iterations,
        min_samples = config.runner.min_samples,
        max_time_ms = config.runner.max_sample_time_ms,
        min_batch_ms = config.runner.min_batch_time_ms,
        "Runner settings"
    );

    let report = suite.run_with(&config.runner, |event| {
        if let SuiteEvent::PhaseChanged {
            name,
            phase: CasePhase::Sampling,
        } = event
        {
            info!("Sampling {name}...");
        }
    })?;

    if cli.json {
        println!("{}", format_report_json(&report)?);
    } else {
        println!("\n📊 Benchmark Report Table:");
        print!("{}", format_report(&report));
    }

    Ok(())
}
