//! Presentation helpers
//!
//! Pure string builders for the reporting surface: the per-minute CSV
//! trace line and the terminal summaries. Nothing here affects
//! simulation correctness; printing stays in the CLI.

use crate::aggregate::{AggregateReport, SampleStatistics};
use crate::models::doctor::Availability;
use crate::orchestrator::{MinuteResult, SimulationSummary};

/// One trace line: `t, <remaining busy per doctor in roster order>, <waiting>`.
///
/// A never-assigned doctor shows as `-`; a countdown that drifted below
/// zero is printed as-is.
pub fn minute_csv_line(minute: &MinuteResult) -> String {
    let mut columns = Vec::with_capacity(minute.doctor_status.len() + 2);
    columns.push(minute.time.to_string());
    for status in &minute.doctor_status {
        columns.push(match status {
            Availability::Idle => "-".to_string(),
            Availability::Busy { remaining } => remaining.to_string(),
        });
    }
    columns.push(minute.waiting.to_string());
    columns.join(", ")
}

/// Terminal report for a single finished run.
pub fn summary_report(summary: &SimulationSummary) -> String {
    let avg = match summary.avg_waiting_time {
        Some(avg) => format!("{avg:.2} minutes"),
        None => "no data (no patients were seen)".to_string(),
    };
    format!(
        "patients seen: {}\n\
         average waiting time: {}\n\
         patients who waited: {}\n\
         closed {}",
        summary.n_patients,
        avg,
        summary.n_waited,
        format_overtime(summary.closing_time_diff),
    )
}

/// Render a closing delta as `H hours, M minutes` past (or before) the
/// nominal closing time.
pub fn format_overtime(diff_minutes: i64) -> String {
    let magnitude = diff_minutes.unsigned_abs();
    let hours = magnitude / 60;
    let minutes = magnitude % 60;
    if diff_minutes >= 0 {
        format!("{hours} hours, {minutes} minutes past nominal closing")
    } else {
        format!("{hours} hours, {minutes} minutes before nominal closing")
    }
}

/// Terminal report for a Monte Carlo batch.
pub fn aggregate_report(report: &AggregateReport) -> String {
    let mut lines = vec![format!("runs: {}", report.runs)];
    lines.push(stat_line("patients seen", &report.n_patients));
    match &report.avg_waiting_time {
        Some(stats) => lines.push(stat_line("average waiting time (min)", stats)),
        None => lines.push("average waiting time (min): no data in any run".to_string()),
    }
    if report.runs_without_patients > 0 {
        lines.push(format!(
            "runs with no patients: {}",
            report.runs_without_patients
        ));
    }
    lines.push(stat_line("patients who waited", &report.n_waited));
    lines.push(stat_line("overtime minutes", &report.closing_time_diff));
    lines.join("\n")
}

fn stat_line(label: &str, stats: &SampleStatistics) -> String {
    format!(
        "{label}: median {:.2}, mean {:.2}, IQR [{:.2}, {:.2}]",
        stats.median, stats.mean, stats.q1, stats.q3
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_minute_csv_line_layout() {
        let minute = MinuteResult {
            time: 12,
            doctor_status: vec![
                Availability::Busy { remaining: 4 },
                Availability::Idle,
                Availability::Busy { remaining: -2 },
            ],
            waiting: 3,
        };
        assert_eq!(minute_csv_line(&minute), "12, 4, -, -2, 3");
    }

    #[test]
    fn test_format_overtime_past_nominal() {
        assert_eq!(
            format_overtime(95),
            "1 hours, 35 minutes past nominal closing"
        );
    }

    #[test]
    fn test_format_overtime_on_schedule() {
        assert_eq!(
            format_overtime(0),
            "0 hours, 0 minutes past nominal closing"
        );
    }

    #[test]
    fn test_format_overtime_early() {
        assert_eq!(
            format_overtime(-61),
            "1 hours, 1 minutes before nominal closing"
        );
    }

    #[test]
    fn test_summary_report_no_data_state() {
        let summary = SimulationSummary {
            n_patients: 0,
            avg_waiting_time: None,
            n_waited: 0,
            closing_time_diff: 0,
        };
        let report = summary_report(&summary);
        assert!(report.contains("no data (no patients were seen)"));
    }
}
