//! Configuration structures for the queueing simulator
//!
//! This module contains the simulation configuration structure and validation logic
//! used to control the behavior and parameters of a simulation run.

use super::{DistributionFamily, NormalScaling, OutputFormat};
use clap::Parser;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Command line arguments structure
#[derive(Debug, Clone, Parser)]
#[command(
    name = "queueing-simulator",
    version = "0.1.0",
    about = "Queueing Simulator - Single-queue, multi-server discrete-event simulation",
    long_about = "Simulates a single waiting line served by one or more servers. Interarrival and service times are drawn from the chosen distributions; the run reports every customer's timing record, summary metrics, and a per-server Gantt chart.

EXAMPLES:
    # Run with default settings
    queueing-simulator

    # Use a configuration file
    queueing-simulator --config config.json

    # Two servers, gamma service times, reproducible
    queueing-simulator --num-servers 2 --service-distribution gamma --service-mean 0.5 --seed 42

    # Generate configuration template
    queueing-simulator --print-config > my-config.json

    # Validate configuration without running
    queueing-simulator --config my-config.json --dry-run

    # Full JSON report
    queueing-simulator --output-format json --output report.json

DISTRIBUTIONS:
    poisson, exponential, random, normal, uniform, gamma
    Any other name is accepted and yields a time of 0 for every draw.

CONFIGURATION:
    Configuration can be provided via:
    1. Command line arguments (highest priority)
    2. Configuration file (--config flag)
    3. Default values (lowest priority)

    Supported configuration file formats: JSON (.json)"
)]
pub struct CliArgs {
    /// Configuration file path (JSON format)
    #[arg(
        short,
        long,
        help = "Configuration file path (JSON format)",
        long_help = "Path to a JSON configuration file. CLI arguments will override file settings."
    )]
    pub config: Option<String>,

    /// Interarrival time distribution
    #[arg(
        long,
        help = "Arrival distribution (poisson, exponential, random, normal, uniform, gamma)"
    )]
    pub arrival_distribution: Option<String>,

    /// Mean of the arrival distribution
    #[arg(long, help = "Mean of the arrival distribution")]
    pub arrival_mean: Option<f64>,

    /// Service time distribution
    #[arg(
        long,
        help = "Service distribution (poisson, exponential, random, normal, uniform, gamma)"
    )]
    pub service_distribution: Option<String>,

    /// Mean of the service distribution
    #[arg(long, help = "Mean of the service distribution")]
    pub service_mean: Option<f64>,

    /// Variance of the service distribution (normal only)
    #[arg(long, help = "Variance of the service distribution (normal only)")]
    pub service_variance: Option<f64>,

    /// Number of servers
    #[arg(
        long,
        help = "Number of servers",
        long_help = "Number of parallel servers drawing from the single queue. Must be greater than 0. Default: 1"
    )]
    pub num_servers: Option<usize>,

    /// Number of customers to simulate
    #[arg(
        long,
        help = "Number of customers to simulate",
        long_help = "Number of customer observations in the trace. Must be greater than 0. Default: 10"
    )]
    pub num_observations: Option<usize>,

    /// Number of strata in the interarrival lookup table
    #[arg(
        long,
        help = "Interarrival lookup table size",
        long_help = "Number of strata in the interarrival lookup table. Defaults to the number of observations."
    )]
    pub table_size: Option<usize>,

    /// How the Normal sampler applies the variance
    #[arg(long, help = "Normal scaling (literal or std_dev)")]
    pub normal_scaling: Option<NormalScaling>,

    /// Output format for the results
    #[arg(
        long,
        help = "Output format (text, json or csv)",
        long_help = "Output format for the results. Supported formats: text, json, csv. Default: text"
    )]
    pub output_format: Option<String>,

    /// Output file path
    #[arg(short, long, help = "Write results to this file instead of stdout")]
    pub output: Option<String>,

    /// Random seed for reproducible results
    #[arg(long, help = "Random seed for reproducible results")]
    pub seed: Option<u64>,

    /// Enable verbose logging
    #[arg(short, long, help = "Enable verbose logging")]
    pub verbose: bool,

    /// Enable debug logging
    #[arg(short, long, help = "Enable debug logging")]
    pub debug: bool,

    /// Dry run mode - validate configuration without running simulation
    #[arg(long, help = "Validate configuration without running simulation")]
    pub dry_run: bool,

    /// Print default configuration and exit
    #[arg(long, help = "Print default configuration in JSON format and exit")]
    pub print_config: bool,
}

/// Configuration file structure (allows partial configuration)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct ConfigFile {
    /// Interarrival time distribution
    pub arrival_distribution: Option<DistributionFamily>,

    /// Mean of the arrival distribution
    pub arrival_mean: Option<f64>,

    /// Service time distribution
    pub service_distribution: Option<DistributionFamily>,

    /// Mean of the service distribution
    pub service_mean: Option<f64>,

    /// Variance of the service distribution
    pub service_variance: Option<f64>,

    /// Number of servers
    pub num_servers: Option<usize>,

    /// Number of customers to simulate
    pub num_observations: Option<usize>,

    /// Number of strata in the interarrival lookup table
    pub table_size: Option<usize>,

    /// How the Normal sampler applies the variance
    pub normal_scaling: Option<NormalScaling>,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for the results
    pub output_format: Option<String>,
}

/// Configuration for one simulation run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationConfig {
    /// Interarrival time distribution
    pub arrival_distribution: DistributionFamily,

    /// Mean of the arrival distribution
    pub arrival_mean: f64,

    /// Service time distribution
    pub service_distribution: DistributionFamily,

    /// Mean of the service distribution
    pub service_mean: f64,

    /// Variance of the service distribution (used only by normal)
    pub service_variance: f64,

    /// Number of servers
    pub num_servers: usize,

    /// Number of customers to simulate
    pub num_observations: usize,

    /// Number of strata in the interarrival lookup table (defaults to `num_observations`)
    pub table_size: Option<usize>,

    /// How the Normal sampler applies the variance
    pub normal_scaling: NormalScaling,

    /// Random seed for reproducible results
    pub seed: Option<u64>,

    /// Output format for the results
    pub output_format: String,
}

/// Configuration loading errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found: {0}")]
    FileNotFound(String),

    /// Configuration file read error
    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    /// JSON parsing error
    #[error("Failed to parse JSON configuration: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Unsupported configuration file format
    #[error("Unsupported configuration file format: {0} (supported: .json)")]
    UnsupportedFormat(String),
}

/// Validation errors for simulation configuration
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigValidationError {
    /// Server count is invalid
    #[error("Server count must be greater than 0, got {0}")]
    InvalidServerCount(usize),

    /// Observation count is invalid
    #[error("Observation count must be greater than 0, got {0}")]
    InvalidObservationCount(usize),

    /// Lookup table size is invalid
    #[error("Lookup table size must be greater than 0, got {0}")]
    InvalidTableSize(usize),

    /// Mean is not acceptable for the chosen distribution
    #[error("Invalid {role} mean for {family} distribution: {value}")]
    InvalidMean {
        /// Which distribution the mean belongs to ("arrival" or "service")
        role: String,
        /// Name of the distribution family
        family: String,
        /// The rejected mean
        value: f64,
    },

    /// Variance is negative or not finite
    #[error("Service variance must be a finite value >= 0, got {0}")]
    InvalidVariance(f64),

    /// Output format is not recognized
    #[error("Unknown output format: {0}")]
    InvalidOutputFormat(String),
}

impl Default for SimulationConfig {
    fn default() -> Self {
        Self {
            arrival_distribution: DistributionFamily::Exponential,
            arrival_mean: 5.0,
            service_distribution: DistributionFamily::Exponential,
            service_mean: 3.0,
            service_variance: 1.0,
            num_servers: 1,
            num_observations: 10,
            table_size: None,
            normal_scaling: NormalScaling::Literal,
            seed: None,
            output_format: "text".to_string(),
        }
    }
}

impl SimulationConfig {
    /// Create a new configuration from command line arguments and optional config file
    pub fn from_args() -> Result<Self, ConfigError> {
        let args = CliArgs::parse();
        Self::from_cli_args(args)
    }

    /// Create configuration from parsed CLI arguments
    pub fn from_cli_args(args: CliArgs) -> Result<Self, ConfigError> {
        // Start with default configuration
        let mut config = Self::default();

        // Load from config file if specified
        if let Some(config_path) = &args.config {
            config = Self::from_file(config_path)?;
        }

        // Override with command line arguments (CLI takes precedence)
        Self::apply_cli_overrides(&mut config, args);

        Ok(config)
    }

    /// Load configuration from a JSON file
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.display().to_string()));
        }

        let content = fs::read_to_string(path)?;

        match path.extension().and_then(|ext| ext.to_str()) {
            Some("json") => {
                let config_file: ConfigFile = serde_json::from_str(&content)?;
                Ok(Self::from_config_file(config_file))
            }
            Some(ext) => Err(ConfigError::UnsupportedFormat(ext.to_string())),
            None => Err(ConfigError::UnsupportedFormat("no extension".to_string())),
        }
    }

    /// Create configuration from a config file, merging with defaults
    fn from_config_file(config_file: ConfigFile) -> Self {
        let defaults = Self::default();

        Self {
            arrival_distribution: config_file
                .arrival_distribution
                .unwrap_or(defaults.arrival_distribution),
            arrival_mean: config_file.arrival_mean.unwrap_or(defaults.arrival_mean),
            service_distribution: config_file
                .service_distribution
                .unwrap_or(defaults.service_distribution),
            service_mean: config_file.service_mean.unwrap_or(defaults.service_mean),
            service_variance: config_file.service_variance.unwrap_or(defaults.service_variance),
            num_servers: config_file.num_servers.unwrap_or(defaults.num_servers),
            num_observations: config_file.num_observations.unwrap_or(defaults.num_observations),
            table_size: config_file.table_size.or(defaults.table_size),
            normal_scaling: config_file.normal_scaling.unwrap_or(defaults.normal_scaling),
            seed: config_file.seed.or(defaults.seed),
            output_format: config_file.output_format.unwrap_or(defaults.output_format),
        }
    }

    /// Apply CLI argument overrides to configuration
    fn apply_cli_overrides(config: &mut Self, args: CliArgs) {
        if let Some(value) = args.arrival_distribution {
            config.arrival_distribution = DistributionFamily::parse_lenient(&value);
        }
        if let Some(value) = args.arrival_mean {
            config.arrival_mean = value;
        }
        if let Some(value) = args.service_distribution {
            config.service_distribution = DistributionFamily::parse_lenient(&value);
        }
        if let Some(value) = args.service_mean {
            config.service_mean = value;
        }
        if let Some(value) = args.service_variance {
            config.service_variance = value;
        }
        if let Some(value) = args.num_servers {
            config.num_servers = value;
        }
        if let Some(value) = args.num_observations {
            config.num_observations = value;
        }
        if let Some(value) = args.table_size {
            config.table_size = Some(value);
        }
        if let Some(value) = args.normal_scaling {
            config.normal_scaling = value;
        }
        if let Some(value) = args.output_format {
            config.output_format = value;
        }
        if let Some(value) = args.seed {
            config.seed = Some(value);
        }
    }

    /// Save configuration to a JSON file
    pub fn save_to_file<P: AsRef<Path>>(&self, path: P) -> Result<(), ConfigError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// Print configuration as JSON
    pub fn print_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Validate the configuration parameters
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.num_servers == 0 {
            return Err(ConfigValidationError::InvalidServerCount(self.num_servers));
        }

        if self.num_observations == 0 {
            return Err(ConfigValidationError::InvalidObservationCount(self.num_observations));
        }

        if let Some(size) = self.table_size {
            if size == 0 {
                return Err(ConfigValidationError::InvalidTableSize(size));
            }
        }

        self.validate_mean("arrival", &self.arrival_distribution, self.arrival_mean)?;
        self.validate_mean("service", &self.service_distribution, self.service_mean)?;

        if self.service_distribution == DistributionFamily::Normal
            && !(self.service_variance.is_finite() && self.service_variance >= 0.0)
        {
            return Err(ConfigValidationError::InvalidVariance(self.service_variance));
        }

        self.get_output_format()
            .map_err(|_| ConfigValidationError::InvalidOutputFormat(self.output_format.clone()))?;

        Ok(())
    }

    /// Helper method to validate a distribution mean
    fn validate_mean(
        &self,
        role: &str,
        family: &DistributionFamily,
        value: f64,
    ) -> Result<(), ConfigValidationError> {
        let valid = match family {
            // Never sampled from, so the mean is irrelevant
            DistributionFamily::Unrecognized(_) => true,
            DistributionFamily::RawUniform => value.is_finite(),
            DistributionFamily::Normal => value.is_finite() && value >= 0.0,
            _ => value.is_finite() && value > 0.0,
        };

        if !valid {
            return Err(ConfigValidationError::InvalidMean {
                role: role.to_string(),
                family: family.name().to_string(),
                value,
            });
        }
        Ok(())
    }

    /// Number of strata in the interarrival lookup table
    pub fn effective_table_size(&self) -> usize {
        self.table_size.unwrap_or(self.num_observations)
    }

    /// Get the output format as an enum-like value
    pub fn get_output_format(&self) -> Result<OutputFormat, String> {
        self.output_format.parse()
    }
}
