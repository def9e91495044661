//! Queueing Simulator
//!
//! A discrete-event simulation of a single waiting line served by one or more
//! identical servers, with configurable interarrival and service distributions.
//!
//! # Overview
//!
//! A run builds an interarrival lookup table from the arrival distribution,
//! walks customers through the servers in arrival order (each customer takes the
//! server that frees up first), and reduces the resulting timing records to
//! summary metrics such as average waiting time and server utilization.
//!
//! ## Key Features
//!
//! - **Distribution Sampling**: poisson, exponential, uniform, normal, gamma and raw uniform draws
//! - **Lookup Tables**: stratified interarrival tables resolved by cumulative probability
//! - **Multi-Server Engine**: earliest-available assignment with explicit simulation state
//! - **Summary Metrics**: waiting, turnaround, system and queue lengths, utilization
//! - **Reproducible Runs**: seeded random sources and replayable draw sequences
//!
//! ## Quick Start
//!
//! ```rust
//! use queueing_simulator::*;
//!
//! let config = SimulationConfig {
//!     num_servers: 2,
//!     num_observations: 25,
//!     seed: Some(42),
//!     ..Default::default()
//! };
//!
//! let outcome = simulate(config)?;
//! println!("Average waiting time: {:.3}", outcome.summary.avg_waiting_time);
//! # Ok::<(), SimulationError>(())
//! ```
//!
//! ## Module Organization
//!
//! - [`types`]: Run identifiers, enums and configuration
//! - [`distributions`]: Variate generation and the interarrival lookup table
//! - [`simulation`]: Engine, metrics, orchestration, logging and errors
//! - [`report`]: Text, CSV and JSON rendering of a run
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────┐    ┌───────────────┐    ┌─────────────┐
//! │   Types     │    │ Distributions │    │   Report    │
//! │             │    │               │    │             │
//! │ Config      │◄───┤ Variates      │    │ Text / CSV  │
//! │ Enums       │    │ Lookup table  │    │ JSON        │
//! └─────────────┘    └───────────────┘    └─────────────┘
//!        ▲                   ▲                   │
//!        │                   │                   ▼
//!        │           ┌───────────────────────────────────┐
//!        └───────────┤            Simulation             │
//!                    │                                   │
//!                    │ Orchestrator ─► Engine ─► Metrics │
//!                    └───────────────────────────────────┘
//! ```
#![warn(missing_docs, missing_debug_implementations, unreachable_pub)]

pub mod distributions;
pub mod report;
pub mod simulation;
pub mod types;

// Core types and configuration
pub use types::{
    CliArgs, ConfigError, ConfigValidationError, DistributionFamily, NormalScaling, OutputFormat,
    RunId, SimulationConfig,
};

// Sampling
pub use distributions::{
    DistributionSpec, InterArrivalTable, LookupEntry, ReplaySource, RngSource, UniformSource,
    VariateGenerator,
};

// Simulation types and functionality
pub use simulation::{
    simulate, EngineRun, LoggingConfig, MetricsAggregator, QueueSimulation, ServerTimeline,
    SimulationEngine, SimulationError, SimulationOutcome, SimulationResult, SimulationState,
    SummaryMetrics, TimingRecord,
};

// Rendering
pub use report::SimulationReport;
