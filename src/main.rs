// src/main.rs

use std::process::ExitCode;

use log::{info, error};
use env_logger::Env;

use sievefactor::benchmark::BenchmarkRunner;
use sievefactor::config::SieveFactorConfig;
use sievefactor::output::FactorWriter;
use sievefactor::{Factoriser, ParallelFactoriser, Result, SieveError};

const USAGE: &str = "Usage: sievefactor N [SIEVE_THREADS [FACTOR_THREADS [WRITE_TO_FILE]]]";

/// Largest N whose square still fits in 64 bits.
const MAX_BOUND: u64 = u32::MAX as u64;

fn main() -> ExitCode {
    let mut config = SieveFactorConfig::load().unwrap_or_else(|e| {
        eprintln!("Ignoring unreadable configuration: {}", e);
        SieveFactorConfig::default()
    });

    let args: Vec<String> = std::env::args().skip(1).collect();
    if let Err(message) = apply_args(&mut config, &args) {
        eprintln!("{}\n{}", message, USAGE);
        return ExitCode::FAILURE;
    }

    // Initialize the logger
    let env = Env::default()
        .filter_or("SIEVEFACTOR_LOG", config.log_level.as_str())
        .write_style_or("SIEVEFACTOR_LOG_STYLE", "auto");
    env_logger::Builder::from_env(env).init();

    match run(&config) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{}", e);
            ExitCode::FAILURE
        }
    }
}

/// Positional overrides: N, sieve threads, factor threads, write flag.
/// With exactly two arguments the thread count applies to both phases.
fn apply_args(config: &mut SieveFactorConfig, args: &[String]) -> std::result::Result<(), String> {
    if args.len() > 4 {
        return Err(format!("Invalid number of arguments! Expected 0-4, got {}", args.len()));
    }
    if let Some(n) = args.first() {
        let n: u64 = n.parse().map_err(|_| "Argument 1 has to be a non-negative integer!".to_string())?;
        if n > MAX_BOUND {
            return Err(format!("N is too high. Only values up to {} are allowed.", MAX_BOUND));
        }
        config.bound = n;
    }
    if let Some(t) = args.get(1) {
        let t: isize = t.parse().map_err(|_| "Argument 2 has to be an integer!".to_string())?;
        config.sieve_threads = t;
        config.factor_threads = t;
    }
    if let Some(t) = args.get(2) {
        config.factor_threads = t.parse().map_err(|_| "Argument 3 has to be an integer!".to_string())?;
    }
    if let Some(w) = args.get(3) {
        config.write_results = w.parse().map_err(|_| "Argument 4 has to be true or false!".to_string())?;
    }
    Ok(())
}

fn run(config: &SieveFactorConfig) -> Result<()> {
    if config.bound > MAX_BOUND {
        return Err(SieveError::InvalidInput {
            value: config.bound,
            reason: "N² must fit in 64 bits".to_string(),
        });
    }
    info!("Running program with:");
    info!(" -------------------------- n: {}", config.bound);
    info!(" ---------- Threads for sieve: {}", config.sieve_threads);
    info!(" -- Threads for factorisation: {}", config.factor_threads);
    info!(" -------------- Write to file: {}", config.write_results);

    let mut runner = BenchmarkRunner::new(
        config.bound,
        config.batch_size,
        config.iterations,
        config.sieve_threads,
        config.factor_threads,
    );
    let batch = runner.batch();
    let primes = runner.run_sieves()?;
    runner.run_factorisation(&primes)?;

    let suite = runner.into_suite();
    suite.print_summary();

    if config.write_results {
        let mut writer = FactorWriter::new(config.bound);
        let mut factoriser = ParallelFactoriser::new(primes, config.factor_threads)?;
        for n in batch {
            writer.add_list(&factoriser.factorise(n)?);
        }
        factoriser.shutdown()?;
        writer.write_to(&config.output_dir)?;

        let json = std::path::Path::new(&config.output_dir)
            .join(format!("benchmark_results_{}.json", suite.timestamp.format("%Y%m%d_%H%M%S")));
        suite.save_to_file(&json.to_string_lossy())?;
        info!("Results saved to: {}", json.display());
    }
    Ok(())
}
