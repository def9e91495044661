//! Output rendering for simulation results
//!
//! The report layer only formats what the engine produced: a JSON report that
//! carries every output record, and plain-text tables, Gantt chart and
//! interpretation for the terminal.

pub mod text;

pub use text::*;

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::Path;

use crate::distributions::InterArrivalTable;
use crate::simulation::{
    ServerTimeline, SimulationOutcome, SimulationResult, SummaryMetrics, TimingRecord,
};
use crate::types::{RunId, SimulationConfig};

/// Serializable report of one run
#[derive(Debug, Clone, Serialize)]
pub struct SimulationReport<'a> {
    /// Identifier of the run
    pub run_id: RunId,
    /// When the report was produced
    pub generated_at: DateTime<Utc>,
    /// Configuration the run used
    pub config: &'a SimulationConfig,
    /// Interarrival lookup table
    pub lookup_table: &'a InterArrivalTable,
    /// Per-customer timing records
    pub records: &'a [TimingRecord],
    /// Summary metrics
    pub summary: &'a SummaryMetrics,
    /// Utilization of an average server
    pub utilization_per_server: f64,
    /// Busy intervals per server
    pub occupancy: &'a [ServerTimeline],
}

impl<'a> SimulationReport<'a> {
    /// Build a report over `outcome`
    pub fn new(config: &'a SimulationConfig, outcome: &'a SimulationOutcome) -> Self {
        Self {
            run_id: outcome.run_id,
            generated_at: Utc::now(),
            config,
            lookup_table: &outcome.lookup_table,
            records: &outcome.records,
            summary: &outcome.summary,
            utilization_per_server: outcome.summary.utilization_per_server(config.num_servers),
            occupancy: &outcome.occupancy,
        }
    }

    /// Pretty-printed JSON
    pub fn to_json(&self) -> SimulationResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Write the pretty-printed JSON to `path`
    pub fn write_json<P: AsRef<Path>>(&self, path: P) -> SimulationResult<()> {
        fs::write(path, self.to_json()?)?;
        Ok(())
    }
}
