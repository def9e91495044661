//! Summary metrics over a completed trace
//!
//! Averages are taken per customer. Length and utilization figures are
//! normalized by the observation window, the time the last customer leaves.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::simulation::{SimulationError, SimulationResult, TimingRecord};

/// Aggregate performance figures for one run
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SummaryMetrics {
    /// Number of records summarized
    pub observations: usize,
    /// Mean interarrival time
    pub avg_inter_arrival_time: f64,
    /// Mean waiting time
    pub avg_waiting_time: f64,
    /// Mean turnaround time
    pub avg_turnaround_time: f64,
    /// `sum(start - arrival) / window`
    pub avg_system_length: f64,
    /// `sum(start - arrival - service) / window`; can be negative
    pub avg_queue_length: f64,
    /// `sum(service) / window`, between 0 and the number of servers
    pub server_utilization: f64,
    /// Completion time of the last customer to leave
    pub observation_window: f64,
    /// Time-averaged number in the system, `sum(turnaround) / window`
    pub time_avg_in_system: f64,
    /// Time-averaged number waiting, `sum(waiting) / window`
    pub time_avg_in_queue: f64,
}

impl SummaryMetrics {
    /// Utilization of an average server, in [0, 1]
    pub fn utilization_per_server(&self, num_servers: usize) -> f64 {
        if num_servers == 0 {
            0.0
        } else {
            self.server_utilization / num_servers as f64
        }
    }

    /// Server utilization as a percentage
    pub fn utilization_percentage(&self) -> f64 {
        self.server_utilization * 100.0
    }
}

impl fmt::Display for SummaryMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Average Inter Arrival Time: {:.3}", self.avg_inter_arrival_time)?;
        writeln!(f, "Average Turn Around Time: {:.3}", self.avg_turnaround_time)?;
        writeln!(f, "Average Waiting Time: {:.3}", self.avg_waiting_time)?;
        writeln!(f, "Average System Length: {:.3}", self.avg_system_length)?;
        writeln!(f, "Average Queue Length: {:.3}", self.avg_queue_length)?;
        write!(f, "Server Utilization: {:.3}%", self.utilization_percentage())
    }
}

/// Reduces timing records into [`SummaryMetrics`]
#[derive(Debug, Clone, Copy, Default)]
pub struct MetricsAggregator;

impl MetricsAggregator {
    /// Create a new aggregator
    pub fn new() -> Self {
        Self
    }

    /// Summarize a non-empty trace
    pub fn summarize(&self, records: &[TimingRecord]) -> SimulationResult<SummaryMetrics> {
        if records.is_empty() {
            return Err(SimulationError::EmptyInput);
        }

        let count = records.len() as f64;
        let window = records.iter().map(|r| r.end_time).fold(f64::NEG_INFINITY, f64::max);
        if !(window.is_finite() && window > 0.0) {
            return Err(SimulationError::DegenerateWindow(window));
        }

        let total = |field: fn(&TimingRecord) -> f64| -> f64 { records.iter().map(field).sum() };

        let inter_arrival = total(|r| r.inter_arrival_time);
        let waiting = total(|r| r.waiting_time);
        let turnaround = total(|r| r.turnaround_time);
        let service = total(|r| r.service_time);
        let system_span = total(|r| r.start_time - r.arrival_time);
        let queue_span = total(|r| r.start_time - r.arrival_time - r.service_time);

        Ok(SummaryMetrics {
            observations: records.len(),
            avg_inter_arrival_time: inter_arrival / count,
            avg_waiting_time: waiting / count,
            avg_turnaround_time: turnaround / count,
            avg_system_length: system_span / window,
            avg_queue_length: queue_span / window,
            server_utilization: service / window,
            observation_window: window,
            time_avg_in_system: turnaround / window,
            time_avg_in_queue: waiting / window,
        })
    }
}
