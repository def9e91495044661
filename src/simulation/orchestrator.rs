//! Main simulation orchestrator
//!
//! This module contains [`QueueSimulation`], which validates a configuration and
//! runs the full pipeline: lookup table, engine trace, summary metrics.

use serde::Serialize;
use tracing::{debug, info, instrument};

use crate::distributions::{DistributionSpec, InterArrivalTable, UniformSource, VariateGenerator};
use crate::simulation::{
    MetricsAggregator, ServerTimeline, SimulationEngine, SimulationResult, SummaryMetrics,
    TimingRecord,
};
use crate::types::{RunId, SimulationConfig};

/// Variance handed to the arrival distribution; arrivals have no variance setting
const ARRIVAL_VARIANCE: f64 = 1.0;

/// Everything one run produces
#[derive(Debug, Clone, Serialize)]
pub struct SimulationOutcome {
    /// Identifier of this run
    pub run_id: RunId,
    /// Interarrival lookup table
    pub lookup_table: InterArrivalTable,
    /// One record per customer, in sequence order
    pub records: Vec<TimingRecord>,
    /// Aggregate metrics over `records`
    pub summary: SummaryMetrics,
    /// Busy intervals per server
    pub occupancy: Vec<ServerTimeline>,
}

/// A validated simulation, ready to run
#[derive(Debug, Clone)]
pub struct QueueSimulation {
    /// Configuration for the simulation
    config: SimulationConfig,
    arrival: DistributionSpec,
    service: DistributionSpec,
}

impl QueueSimulation {
    /// Validate `config` and prepare a simulation
    ///
    /// Fails before any sampling if the configuration is invalid.
    #[instrument(skip(config), fields(servers = config.num_servers, observations = config.num_observations))]
    pub fn new(config: SimulationConfig) -> SimulationResult<Self> {
        config.validate()?;

        let arrival = DistributionSpec::new(config.arrival_distribution.clone(), config.arrival_mean)
            .with_variance(ARRIVAL_VARIANCE);
        let service = DistributionSpec::new(config.service_distribution.clone(), config.service_mean)
            .with_variance(config.service_variance);

        info!(
            arrival = %arrival.family,
            service = %service.family,
            "Simulation configured with {} servers and {} observations",
            config.num_servers,
            config.num_observations
        );

        Ok(Self { config, arrival, service })
    }

    /// The validated configuration
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Arrival distribution
    pub fn arrival_spec(&self) -> &DistributionSpec {
        &self.arrival
    }

    /// Service distribution
    pub fn service_spec(&self) -> &DistributionSpec {
        &self.service
    }

    /// Run with a generator seeded from the configuration
    #[instrument(skip(self))]
    pub fn run(&self) -> SimulationResult<SimulationOutcome> {
        let mut generator = match self.config.seed {
            Some(seed) => {
                info!("Using deterministic seed: {}", seed);
                VariateGenerator::from_seed(Some(seed))
            }
            None => {
                debug!("Using entropy-based random seed");
                VariateGenerator::from_seed(None)
            }
        }
        .with_normal_scaling(self.config.normal_scaling);

        self.run_with_generator(&mut generator)
    }

    /// Run drawing every variate from `generator`
    pub fn run_with_generator<S: UniformSource>(
        &self,
        generator: &mut VariateGenerator<S>,
    ) -> SimulationResult<SimulationOutcome> {
        let lookup_table =
            InterArrivalTable::build(&self.arrival, self.config.effective_table_size(), generator)?;

        let engine_run = SimulationEngine::new(
            generator,
            &lookup_table,
            &self.service,
            self.config.num_servers,
        )?
        .run(self.config.num_observations)?;

        let summary = MetricsAggregator::new().summarize(&engine_run.records)?;

        let outcome = SimulationOutcome {
            run_id: RunId::new(),
            lookup_table,
            records: engine_run.records,
            summary,
            occupancy: engine_run.occupancy,
        };

        info!(
            run_id = %outcome.run_id,
            avg_waiting_time = outcome.summary.avg_waiting_time,
            server_utilization = outcome.summary.server_utilization,
            "Simulation completed with {} records",
            outcome.records.len()
        );

        Ok(outcome)
    }
}

/// Validate `config` and run it once
pub fn simulate(config: SimulationConfig) -> SimulationResult<SimulationOutcome> {
    QueueSimulation::new(config)?.run()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::simulation::SimulationError;
    use crate::types::{ConfigValidationError, DistributionFamily, NormalScaling};

    #[test]
    fn test_new_rejects_invalid_config() {
        let config = SimulationConfig { num_servers: 0, ..Default::default() };
        assert!(matches!(
            QueueSimulation::new(config),
            Err(SimulationError::Configuration(ConfigValidationError::InvalidServerCount(0)))
        ));
    }

    #[test]
    fn test_specs_follow_config() {
        let config = SimulationConfig {
            service_distribution: DistributionFamily::Normal,
            service_mean: 4.0,
            service_variance: 2.5,
            ..Default::default()
        };
        let simulation = QueueSimulation::new(config).unwrap();
        assert_eq!(simulation.arrival_spec().family, DistributionFamily::Exponential);
        assert_eq!(simulation.arrival_spec().mean, 5.0);
        assert_eq!(simulation.service_spec().family, DistributionFamily::Normal);
        assert_eq!(simulation.service_spec().variance, 2.5);
    }

    #[test]
    fn test_table_size_is_independent() {
        let config = SimulationConfig {
            num_observations: 40,
            table_size: Some(8),
            seed: Some(1),
            ..Default::default()
        };
        let outcome = simulate(config).unwrap();
        assert_eq!(outcome.lookup_table.len(), 8);
        assert_eq!(outcome.records.len(), 40);
        assert_eq!(outcome.summary.observations, 40);
    }

    #[test]
    fn test_run_is_reproducible_with_seed() {
        let config = SimulationConfig {
            service_distribution: DistributionFamily::Normal,
            normal_scaling: NormalScaling::StdDev,
            num_servers: 2,
            num_observations: 30,
            seed: Some(77),
            ..Default::default()
        };
        let simulation = QueueSimulation::new(config).unwrap();
        let first = simulation.run().unwrap();
        let second = simulation.run().unwrap();

        assert_eq!(first.records, second.records);
        assert_eq!(first.lookup_table, second.lookup_table);
        assert_ne!(first.run_id, second.run_id);
    }
}
