//! Simulation orchestration and control
//!
//! This module contains the simulation engine, metrics aggregation, the
//! orchestrator that ties them together, logging setup and error handling.
//!
//! # Overview
//!
//! - **QueueSimulation**: validates a configuration and runs the whole pipeline
//! - **SimulationEngine**: assigns customers to servers and emits timing records
//! - **MetricsAggregator**: reduces timing records to summary metrics
//! - **SimulationError**: error handling for simulation operations
//!
//! # Usage Example
//!
//! ```rust
//! use queueing_simulator::simulation::*;
//! use queueing_simulator::types::*;
//!
//! let config = SimulationConfig {
//!     num_servers: 2,
//!     num_observations: 50,
//!     seed: Some(7),
//!     ..Default::default()
//! };
//!
//! let outcome = QueueSimulation::new(config)?.run()?;
//! assert_eq!(outcome.records.len(), 50);
//! assert!(outcome.summary.server_utilization <= 2.0);
//! # Ok::<(), SimulationError>(())
//! ```

pub mod engine;
pub mod error;
pub mod logging;
pub mod metrics;
pub mod orchestrator;

// Re-export all public types for convenience
pub use engine::*;
pub use error::*;
pub use logging::*;
pub use metrics::*;
pub use orchestrator::*;
