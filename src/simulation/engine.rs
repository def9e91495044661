//! Event-by-event simulation engine
//!
//! Each customer arrives after an interarrival time resolved from the lookup
//! table and is routed to the earliest-available server (lowest index on
//! ties). All per-run mutable state lives in a [`SimulationState`] value that
//! is threaded through [`SimulationEngine::step`].

use std::cmp::{Ordering, Reverse};
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::distributions::{DistributionSpec, InterArrivalTable, UniformSource, VariateGenerator};
use crate::simulation::SimulationResult;
use crate::types::ConfigValidationError;

/// Timing record for one simulated customer
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TimingRecord {
    /// 0-based customer index
    pub sequence: usize,
    /// Uniform draw used to pick the interarrival time
    pub arrival_drawn: f64,
    /// Time since the previous arrival
    pub inter_arrival_time: f64,
    /// Arrival time
    pub arrival_time: f64,
    /// First uniform draw of the service sample
    pub service_drawn: f64,
    /// Service duration, at least [`crate::distributions::MIN_SERVICE_TIME`]
    pub service_time: f64,
    /// Index of the server that handled the customer
    pub assigned_server: usize,
    /// Service start
    pub start_time: f64,
    /// Service end
    pub end_time: f64,
    /// `end_time - arrival_time`
    pub turnaround_time: f64,
    /// `start_time - arrival_time`
    pub waiting_time: f64,
}

/// Mutable state of one server during a run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ServerState {
    /// Time the server finishes its current work
    pub end_time: f64,
    /// Sequence numbers of the customers served, in service order
    pub served: Vec<usize>,
}

/// Server availability key: earliest end time first, then lowest index
#[derive(Debug, Clone, Copy, PartialEq)]
struct ServerSlot {
    end_time: f64,
    index: usize,
}

impl Eq for ServerSlot {}

impl Ord for ServerSlot {
    fn cmp(&self, other: &Self) -> Ordering {
        self.end_time.total_cmp(&other.end_time).then(self.index.cmp(&other.index))
    }
}

impl PartialOrd for ServerSlot {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// Per-run state: the server arena, its availability queue and the arrival clock
#[derive(Debug, Clone)]
pub struct SimulationState {
    servers: Vec<ServerState>,
    available: BinaryHeap<Reverse<ServerSlot>>,
    previous_arrival_time: f64,
}

impl SimulationState {
    /// Fresh state with `num_servers` idle servers
    pub fn new(num_servers: usize) -> Self {
        let available = (0..num_servers)
            .map(|index| Reverse(ServerSlot { end_time: 0.0, index }))
            .collect();
        Self {
            servers: vec![ServerState::default(); num_servers],
            available,
            previous_arrival_time: 0.0,
        }
    }

    /// Server arena
    pub fn servers(&self) -> &[ServerState] {
        &self.servers
    }

    /// Arrival time of the most recent customer (0 before the first)
    pub fn previous_arrival_time(&self) -> f64 {
        self.previous_arrival_time
    }

    /// Earliest-available server, removed from the availability queue until reoccupied
    fn take_next_server(&mut self) -> usize {
        // The queue always holds one slot per server between steps
        self.available.pop().map_or(0, |Reverse(slot)| slot.index)
    }

    fn occupy(&mut self, index: usize, end_time: f64, sequence: usize) {
        let server = &mut self.servers[index];
        server.end_time = end_time;
        server.served.push(sequence);
        self.available.push(Reverse(ServerSlot { end_time, index }));
    }

    /// Convert the server arena into per-server occupancy timelines
    pub fn into_timelines(self, records: &[TimingRecord]) -> Vec<ServerTimeline> {
        self.servers
            .into_iter()
            .enumerate()
            .map(|(server, state)| ServerTimeline {
                server,
                intervals: state
                    .served
                    .iter()
                    .filter_map(|&sequence| records.get(sequence))
                    .map(|record| OccupancyInterval {
                        sequence: record.sequence,
                        start_time: record.start_time,
                        end_time: record.end_time,
                    })
                    .collect(),
            })
            .collect()
    }
}

/// One busy interval on a server
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OccupancyInterval {
    /// Customer served
    pub sequence: usize,
    /// Service start
    pub start_time: f64,
    /// Service end
    pub end_time: f64,
}

/// Ordered busy intervals of one server (a Gantt chart row)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServerTimeline {
    /// Server index
    pub server: usize,
    /// Busy intervals in service order
    pub intervals: Vec<OccupancyInterval>,
}

impl ServerTimeline {
    /// Total time this server spent serving
    pub fn busy_time(&self) -> f64 {
        self.intervals.iter().map(|interval| interval.end_time - interval.start_time).sum()
    }
}

/// Records and occupancy produced by one engine run
#[derive(Debug, Clone, PartialEq)]
pub struct EngineRun {
    /// One record per customer, in sequence order
    pub records: Vec<TimingRecord>,
    /// One timeline per server
    pub occupancy: Vec<ServerTimeline>,
}

/// Advances the queue one customer at a time
#[derive(Debug)]
pub struct SimulationEngine<'a, S> {
    generator: &'a mut VariateGenerator<S>,
    table: &'a InterArrivalTable,
    service: &'a DistributionSpec,
    num_servers: usize,
}

impl<'a, S: UniformSource> SimulationEngine<'a, S> {
    /// Create an engine over `num_servers` servers
    pub fn new(
        generator: &'a mut VariateGenerator<S>,
        table: &'a InterArrivalTable,
        service: &'a DistributionSpec,
        num_servers: usize,
    ) -> SimulationResult<Self> {
        if num_servers == 0 {
            return Err(ConfigValidationError::InvalidServerCount(num_servers).into());
        }
        Ok(Self { generator, table, service, num_servers })
    }

    /// Number of servers
    pub fn num_servers(&self) -> usize {
        self.num_servers
    }

    /// Initial state for a run
    pub fn initial_state(&self) -> SimulationState {
        SimulationState::new(self.num_servers)
    }

    /// Simulate customer `sequence` and return the advanced state with its record
    pub fn step(
        &mut self,
        mut state: SimulationState,
        sequence: usize,
    ) -> (SimulationState, TimingRecord) {
        let arrival_drawn = self.generator.draw_uniform();
        let inter_arrival_time = self.table.resolve(arrival_drawn);

        let arrival_time = state.previous_arrival_time + inter_arrival_time;
        state.previous_arrival_time = arrival_time;

        let assigned_server = state.take_next_server();

        let service_drawn = self.generator.draw_uniform();
        let service_time = self.generator.sample_service(self.service, service_drawn);

        let start_time = arrival_time.max(state.servers[assigned_server].end_time);
        let end_time = start_time + service_time;
        state.occupy(assigned_server, end_time, sequence);

        let record = TimingRecord {
            sequence,
            arrival_drawn,
            inter_arrival_time,
            arrival_time,
            service_drawn,
            service_time,
            assigned_server,
            start_time,
            end_time,
            turnaround_time: end_time - arrival_time,
            waiting_time: start_time - arrival_time,
        };

        trace!(
            sequence,
            server = assigned_server,
            arrival = arrival_time,
            start = start_time,
            end = end_time,
            "Customer served"
        );

        (state, record)
    }

    /// Simulate `num_observations` customers from a fresh state
    pub fn run(&mut self, num_observations: usize) -> SimulationResult<EngineRun> {
        if num_observations == 0 {
            return Err(ConfigValidationError::InvalidObservationCount(num_observations).into());
        }

        let mut state = self.initial_state();
        let mut records = Vec::with_capacity(num_observations);
        for sequence in 0..num_observations {
            let (next, record) = self.step(state, sequence);
            state = next;
            records.push(record);
        }

        debug!(
            customers = records.len(),
            servers = self.num_servers,
            "Simulation trace complete"
        );

        let occupancy = state.into_timelines(&records);
        Ok(EngineRun { records, occupancy })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distributions::{LookupEntry, ReplaySource, MIN_SERVICE_TIME};
    use crate::types::DistributionFamily;

    fn constant_table(value: f64) -> InterArrivalTable {
        InterArrivalTable::from_entries(vec![LookupEntry {
            cumulative_probability: 1.0,
            sampled_value: value,
        }])
        .unwrap()
    }

    fn replay_generator() -> VariateGenerator<ReplaySource> {
        VariateGenerator::new(ReplaySource::new(vec![0.5]).unwrap())
    }

    /// Uniform with mean `service` and every draw 0.5 gives exactly `service`
    fn fixed_service(service: f64) -> DistributionSpec {
        DistributionSpec::new(DistributionFamily::Uniform, service)
    }

    fn run(inter_arrival: f64, service: f64, servers: usize, customers: usize) -> EngineRun {
        let mut generator = replay_generator();
        let table = constant_table(inter_arrival);
        let spec = fixed_service(service);
        let mut engine = SimulationEngine::new(&mut generator, &table, &spec, servers).unwrap();
        engine.run(customers).unwrap()
    }

    #[test]
    fn test_simultaneous_arrivals_use_distinct_servers() {
        let result = run(0.0, 0.5, 2, 2);
        let records = &result.records;

        assert_eq!(records.len(), 2);
        assert_eq!(records[0].arrival_time, 0.0);
        assert_eq!(records[1].arrival_time, 0.0);
        assert_eq!(records[0].assigned_server, 0);
        assert_eq!(records[1].assigned_server, 1);
        assert_eq!(records[0].waiting_time, 0.0);
        assert_eq!(records[1].waiting_time, 0.0);
    }

    #[test]
    fn test_single_server_queue_builds_up() {
        let result = run(1.0, 2.0, 1, 3);
        let arrivals: Vec<f64> = result.records.iter().map(|r| r.arrival_time).collect();
        let starts: Vec<f64> = result.records.iter().map(|r| r.start_time).collect();
        let waits: Vec<f64> = result.records.iter().map(|r| r.waiting_time).collect();

        assert_eq!(arrivals, vec![1.0, 2.0, 3.0]);
        assert_eq!(starts, vec![1.0, 3.0, 5.0]);
        assert_eq!(waits, vec![0.0, 1.0, 2.0]);
        assert_eq!(result.records[2].end_time, 7.0);
        assert_eq!(result.records[2].turnaround_time, 4.0);
    }

    #[test]
    fn test_earliest_available_server_is_chosen() {
        let result = run(1.0, 2.0, 2, 5);
        let servers: Vec<usize> = result.records.iter().map(|r| r.assigned_server).collect();
        assert_eq!(servers, vec![0, 1, 0, 1, 0]);
        assert!(result.records.iter().all(|r| r.waiting_time == 0.0));
    }

    #[test]
    fn test_ties_go_to_lowest_index() {
        let result = run(0.0, 1.0, 3, 5);
        let servers: Vec<usize> = result.records.iter().map(|r| r.assigned_server).collect();
        assert_eq!(servers, vec![0, 1, 2, 0, 1]);
        assert_eq!(result.records[3].start_time, 1.0);
        assert_eq!(result.records[3].waiting_time, 1.0);
    }

    #[test]
    fn test_occupancy_matches_assignments() {
        let result = run(0.0, 1.0, 3, 5);
        assert_eq!(result.occupancy.len(), 3);

        let server0: Vec<usize> = result.occupancy[0].intervals.iter().map(|i| i.sequence).collect();
        assert_eq!(server0, vec![0, 3]);
        assert_eq!(result.occupancy[0].intervals[1].start_time, 1.0);
        assert_eq!(result.occupancy[0].intervals[1].end_time, 2.0);
        assert_eq!(result.occupancy[2].intervals.len(), 1);
        assert!((result.occupancy[0].busy_time() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_service_drawn_is_recorded() {
        let mut generator =
            VariateGenerator::new(ReplaySource::new(vec![0.2, 0.5]).unwrap());
        let table = constant_table(1.0);
        let spec = DistributionSpec::new(DistributionFamily::Exponential, 3.0);
        let mut engine = SimulationEngine::new(&mut generator, &table, &spec, 1).unwrap();
        let (_, record) = engine.step(engine.initial_state(), 0);

        assert_eq!(record.arrival_drawn, 0.2);
        assert_eq!(record.service_drawn, 0.5);
        assert!((record.service_time - (-3.0 * 0.5f64.ln())).abs() < 1e-12);
    }

    #[test]
    fn test_step_threads_state() {
        let mut generator = replay_generator();
        let table = constant_table(2.0);
        let spec = fixed_service(1.0);
        let mut engine = SimulationEngine::new(&mut generator, &table, &spec, 1).unwrap();

        let state = engine.initial_state();
        assert_eq!(state.previous_arrival_time(), 0.0);
        let (state, first) = engine.step(state, 0);
        assert_eq!(state.previous_arrival_time(), 2.0);
        assert_eq!(state.servers()[0].end_time, first.end_time);
        let (state, second) = engine.step(state, 1);
        assert_eq!(second.arrival_time, 4.0);
        assert_eq!(state.servers()[0].served, vec![0, 1]);
    }

    #[test]
    fn test_unrecognized_service_distribution_is_floored() {
        let mut generator = replay_generator();
        let table = constant_table(1.0);
        let spec = DistributionSpec::new(DistributionFamily::parse_lenient("xyz"), 3.0);
        let mut engine = SimulationEngine::new(&mut generator, &table, &spec, 1).unwrap();
        let result = engine.run(4).unwrap();
        assert!(result.records.iter().all(|r| r.service_time == MIN_SERVICE_TIME));
    }

    #[test]
    fn test_invariants_hold_for_random_runs() {
        let mut generator = VariateGenerator::from_seed(Some(2024));
        let arrival = DistributionSpec::new(DistributionFamily::Exponential, 1.0);
        let table = InterArrivalTable::build(&arrival, 50, &mut generator).unwrap();
        let spec = DistributionSpec::new(DistributionFamily::Gamma, 0.3);
        let mut engine = SimulationEngine::new(&mut generator, &table, &spec, 3).unwrap();
        let result = engine.run(500).unwrap();

        assert_eq!(result.records.len(), 500);
        for (index, record) in result.records.iter().enumerate() {
            assert_eq!(record.sequence, index);
            assert!(record.assigned_server < 3);
            assert!(record.service_time >= MIN_SERVICE_TIME);
            assert!(record.waiting_time >= -1e-9);
            assert!(record.turnaround_time >= record.service_time - 1e-9);
            assert!(record.start_time >= record.arrival_time);
        }
        for pair in result.records.windows(2) {
            assert!(pair[1].arrival_time >= pair[0].arrival_time);
        }
        let served: usize = result.occupancy.iter().map(|t| t.intervals.len()).sum();
        assert_eq!(served, 500);
    }

    #[test]
    fn test_rejects_zero_servers_and_observations() {
        let mut generator = replay_generator();
        let table = constant_table(1.0);
        let spec = fixed_service(1.0);
        assert!(SimulationEngine::new(&mut generator, &table, &spec, 0).is_err());

        let mut engine = SimulationEngine::new(&mut generator, &table, &spec, 1).unwrap();
        assert!(engine.run(0).is_err());
    }
}
