//! Configuration file loading and CLI precedence

use clap::Parser;
use queueing_simulator::types::config::{CliArgs, ConfigError, SimulationConfig};
use queueing_simulator::types::{DistributionFamily, NormalScaling};
use std::fs;

#[test]
fn test_partial_file_merges_with_defaults() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("partial.json");
    fs::write(
        &path,
        r#"{ "service_distribution": "gamma", "service_mean": 0.5, "num_servers": 2 }"#,
    )
    .unwrap();

    let config = SimulationConfig::from_file(&path).unwrap();
    assert_eq!(config.service_distribution, DistributionFamily::Gamma);
    assert_eq!(config.service_mean, 0.5);
    assert_eq!(config.num_servers, 2);
    assert_eq!(config.arrival_mean, SimulationConfig::default().arrival_mean);
    assert_eq!(config.num_observations, 10);
}

#[test]
fn test_cli_overrides_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("config.json");
    fs::write(
        &path,
        r#"{ "num_servers": 4, "num_observations": 50, "normal_scaling": "std_dev", "seed": 1 }"#,
    )
    .unwrap();

    let path_arg = path.to_string_lossy().to_string();
    let cli_args =
        CliArgs::try_parse_from(["test", "--config", path_arg.as_str(), "--num-servers", "2"])
            .unwrap();
    let config = SimulationConfig::from_cli_args(cli_args).unwrap();

    assert_eq!(config.num_servers, 2);
    assert_eq!(config.num_observations, 50);
    assert_eq!(config.normal_scaling, NormalScaling::StdDev);
    assert_eq!(config.seed, Some(1));
}

#[test]
fn test_saved_configuration_loads_back() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("saved.json");
    let original = SimulationConfig {
        arrival_distribution: DistributionFamily::parse_lenient("xyz"),
        service_distribution: DistributionFamily::Normal,
        service_variance: 2.0,
        table_size: Some(6),
        seed: Some(17),
        ..Default::default()
    };

    original.save_to_file(&path).unwrap();
    let loaded = SimulationConfig::from_file(&path).unwrap();
    assert_eq!(loaded, original);
}

#[test]
fn test_missing_and_unsupported_files() {
    let dir = tempfile::tempdir().unwrap();

    let missing = SimulationConfig::from_file(dir.path().join("absent.json"));
    assert!(matches!(missing, Err(ConfigError::FileNotFound(_))));

    let yaml = dir.path().join("config.yaml");
    fs::write(&yaml, "num_servers: 2").unwrap();
    assert!(matches!(
        SimulationConfig::from_file(&yaml),
        Err(ConfigError::UnsupportedFormat(_))
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(SimulationConfig::from_file(&broken), Err(ConfigError::JsonError(_))));
}
