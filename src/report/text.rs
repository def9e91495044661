//! Plain-text and CSV rendering

use std::fmt::Write;

use crate::distributions::InterArrivalTable;
use crate::simulation::{ServerTimeline, SimulationOutcome, SummaryMetrics, TimingRecord};

const SIMULATION_HEADERS: [&str; 10] = [
    "Random # for Arrival",
    "Inter-Arrival Time",
    "Arrival Time",
    "Random # for Service",
    "Service Time",
    "Server",
    "Start Time",
    "End Time",
    "Turnaround Time",
    "Waiting Time",
];

const CSV_HEADERS: [&str; 11] = [
    "sequence",
    "arrival_drawn",
    "inter_arrival_time",
    "arrival_time",
    "service_drawn",
    "service_time",
    "assigned_server",
    "start_time",
    "end_time",
    "turnaround_time",
    "waiting_time",
];

fn render_rows(headers: &[&str], rows: &[Vec<String>]) -> String {
    let widths: Vec<usize> = headers
        .iter()
        .enumerate()
        .map(|(column, header)| {
            rows.iter().map(|row| row[column].len()).chain([header.len()]).max().unwrap_or(0)
        })
        .collect();

    let mut out = String::new();
    let line = |cells: Vec<String>| -> String {
        cells
            .iter()
            .zip(&widths)
            .map(|(cell, width)| format!("{:>width$}", cell, width = width))
            .collect::<Vec<_>>()
            .join(" | ")
    };

    let _ = writeln!(out, "{}", line(headers.iter().map(|h| h.to_string()).collect()));
    let _ = writeln!(
        out,
        "{}",
        widths.iter().map(|w| "-".repeat(*w)).collect::<Vec<_>>().join("-+-")
    );
    for row in rows {
        let _ = writeln!(out, "{}", line(row.clone()));
    }
    out
}

/// Lookup table with two decimals
pub fn render_lookup_table(table: &InterArrivalTable) -> String {
    let rows: Vec<Vec<String>> = table
        .entries()
        .iter()
        .map(|entry| {
            vec![
                format!("{:.2}", entry.cumulative_probability),
                format!("{:.2}", entry.sampled_value),
            ]
        })
        .collect();
    render_rows(&["Cumulative Probability", "Inter-Arrival Time"], &rows)
}

/// Simulation table with two decimals
pub fn render_simulation_table(records: &[TimingRecord]) -> String {
    let rows: Vec<Vec<String>> = records
        .iter()
        .map(|r| {
            vec![
                format!("{:.2}", r.arrival_drawn),
                format!("{:.2}", r.inter_arrival_time),
                format!("{:.2}", r.arrival_time),
                format!("{:.2}", r.service_drawn),
                format!("{:.2}", r.service_time),
                r.assigned_server.to_string(),
                format!("{:.2}", r.start_time),
                format!("{:.2}", r.end_time),
                format!("{:.2}", r.turnaround_time),
                format!("{:.2}", r.waiting_time),
            ]
        })
        .collect();
    render_rows(&SIMULATION_HEADERS, &rows)
}

/// One line per server: `Server i: [start, end] ...`
pub fn render_gantt(occupancy: &[ServerTimeline]) -> String {
    let mut out = String::new();
    for timeline in occupancy {
        let _ = write!(out, "Server {}:", timeline.server);
        for interval in &timeline.intervals {
            let _ = write!(out, " [{:.2}, {:.2}]", interval.start_time, interval.end_time);
        }
        out.push('\n');
    }
    out
}

/// Interpretation block with three decimals
pub fn render_interpretation(summary: &SummaryMetrics, num_servers: usize) -> String {
    format!(
        "{}\nPer-Server Utilization: {:.3}%\nObservation Window: {:.3}\n",
        summary,
        summary.utilization_per_server(num_servers) * 100.0,
        summary.observation_window
    )
}

/// Simulation table as CSV with full precision
pub fn render_csv(records: &[TimingRecord]) -> String {
    let mut out = CSV_HEADERS.join(",");
    out.push('\n');
    for r in records {
        let _ = writeln!(
            out,
            "{},{},{},{},{},{},{},{},{},{},{}",
            r.sequence,
            r.arrival_drawn,
            r.inter_arrival_time,
            r.arrival_time,
            r.service_drawn,
            r.service_time,
            r.assigned_server,
            r.start_time,
            r.end_time,
            r.turnaround_time,
            r.waiting_time
        );
    }
    out
}

/// Every text section of a run
pub fn render_text(outcome: &SimulationOutcome, num_servers: usize) -> String {
    format!(
        "Inter-Arrival Lookup Table:\n{}\nSimulation Table:\n{}\nGantt Chart:\n{}\nResult Interpretation:\n{}",
        render_lookup_table(&outcome.lookup_table),
        render_simulation_table(&outcome.records),
        render_gantt(&outcome.occupancy),
        render_interpretation(&outcome.summary, num_servers)
    )
}
