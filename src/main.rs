// Queueing Simulator - Main Entry Point
//
// You can run it via Cargo:
//
// ```console
// $ cargo build --release
// $ ./target/release/queueing-simulator
// ```
//
// Or with custom configuration:
//
// ```console
// $ ./target/release/queueing-simulator --num-servers 3 --service-distribution gamma --seed 7 --verbose
// ```

use anyhow::{Context, Result};
use clap::Parser;
use queueing_simulator::report::{render_csv, render_text, SimulationReport};
use queueing_simulator::simulation::{LoggingConfig, QueueSimulation, SimulationOutcome};
use queueing_simulator::types::{CliArgs, OutputFormat, SimulationConfig};
use std::fs;
use std::process;
use tracing::{error, info};

fn main() {
    // Parse CLI arguments first to check for special flags
    let args = CliArgs::parse();

    // Handle special CLI flags that don't require full initialization
    if args.print_config {
        match SimulationConfig::default().print_json() {
            Ok(json) => {
                println!("{}", json);
                return;
            }
            Err(e) => {
                eprintln!("Failed to serialize default configuration: {}", e);
                process::exit(1);
            }
        }
    }

    // Initialize logging based on CLI flags
    let logging_result = if args.debug {
        LoggingConfig::init_debug()
    } else if args.verbose {
        LoggingConfig::init_verbose()
    } else {
        LoggingConfig::new().with_level(tracing::Level::WARN).init()
    };

    let _logging_guard = match logging_result {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {}", e);
            process::exit(1);
        }
    };

    info!("Starting Queueing Simulator");

    if let Err(e) = run(args) {
        error!("Simulation failed: {:#}", e);
        eprintln!("Error: {:#}", e);
        process::exit(1);
    }

    info!("Queueing Simulator completed successfully");
}

/// Load, validate, run and render
fn run(args: CliArgs) -> Result<()> {
    let output_path = args.output.clone();
    let dry_run = args.dry_run;

    // Load configuration from CLI arguments and optional config file
    let config = SimulationConfig::from_cli_args(args).context("Failed to load configuration")?;
    config.validate().context("Configuration validation failed")?;
    let format = config
        .get_output_format()
        .map_err(anyhow::Error::msg)
        .context("Configuration validation failed")?;

    info!("Configuration loaded and validated successfully");

    if dry_run {
        eprintln!("Configuration validation successful!");
        eprintln!("Dry run mode - simulation will not be executed.");
        print_configuration_summary(&config);
        return Ok(());
    }

    let simulation =
        QueueSimulation::new(config.clone()).context("Failed to initialize simulation")?;
    let outcome = simulation.run().context("Simulation run failed")?;

    let rendered = render_outcome(&config, &outcome, format)?;
    match output_path {
        Some(path) => {
            fs::write(&path, rendered)
                .with_context(|| format!("Failed to write results to '{}'", path))?;
            info!("Results written to: {}", path);
            eprintln!("Results written to: {}", path);
        }
        None => print!("{}", rendered),
    }

    Ok(())
}

/// Render `outcome` in the requested format
fn render_outcome(
    config: &SimulationConfig,
    outcome: &SimulationOutcome,
    format: OutputFormat,
) -> Result<String> {
    Ok(match format {
        OutputFormat::Text => render_text(outcome, config.num_servers),
        OutputFormat::Json => SimulationReport::new(config, outcome)
            .to_json()
            .context("Failed to serialize report")?,
        OutputFormat::Csv => render_csv(&outcome.records),
    })
}

/// Print configuration summary
fn print_configuration_summary(config: &SimulationConfig) {
    eprintln!("Configuration:");
    eprintln!(
        "  Arrival Distribution: {} (mean {})",
        config.arrival_distribution, config.arrival_mean
    );
    eprintln!(
        "  Service Distribution: {} (mean {}, variance {})",
        config.service_distribution, config.service_mean, config.service_variance
    );
    eprintln!("  Servers: {}", config.num_servers);
    eprintln!("  Observations: {}", config.num_observations);
    eprintln!("  Lookup Table Size: {}", config.effective_table_size());
    eprintln!("  Normal Scaling: {:?}", config.normal_scaling);
    eprintln!("  Output Format: {}", config.output_format);
    if let Some(seed) = config.seed {
        eprintln!("  Random Seed: {}", seed);
    }
    eprintln!();
}
