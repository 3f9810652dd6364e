//! Command-line front end for the clinic simulator
//!
//! Parses the configuration surface, runs a Monte Carlo batch (or a
//! single traced day), and prints the reports. All domain logic lives in
//! the core crate; this binary only translates flags and formats output.

use clap::Parser;
use clinic_simulator_core_rs::{
    report, run_batch_parallel, AggregateReport, Simulation, SimulationConfig,
};

#[derive(Debug, Parser)]
#[command(
    name = "clinic-sim",
    about = "Monte Carlo simulation of a single-day outpatient clinic"
)]
struct Args {
    /// Number of doctors on duty
    #[arg(long, default_value_t = 3)]
    ndoctors: usize,

    /// Shortest possible appointment, minutes
    #[arg(long, default_value_t = 5.0)]
    appt_min: f64,

    /// Longest possible appointment, minutes
    #[arg(long, default_value_t = 20.0)]
    appt_max: f64,

    /// Mean arrivals per minute (Poisson process)
    #[arg(long, default_value_t = 0.1)]
    arrival_rate: f64,

    /// Minutes after opening at which the clinic stops admitting
    /// (420 = a 9am-4pm day)
    #[arg(long, default_value_t = 420)]
    closing_time: usize,

    /// Number of independent runs to aggregate
    #[arg(long, default_value_t = 1000)]
    runs: usize,

    /// Base RNG seed; run i uses seed + i
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Worker threads for the batch (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Abort any run that has not closed after this many minutes
    #[arg(long)]
    max_minutes: Option<usize>,

    /// Trace a single run: print one CSV line per minute
    /// (time, busy countdown per doctor, patients waiting)
    #[arg(long)]
    trace: bool,

    /// Emit the aggregate report as JSON
    #[arg(long)]
    json: bool,
}

impl Args {
    fn config(&self) -> SimulationConfig {
        SimulationConfig {
            ndoctors: self.ndoctors,
            appt_min: self.appt_min,
            appt_max: self.appt_max,
            arrival_rate: self.arrival_rate,
            closing_time: self.closing_time,
            rng_seed: self.seed,
            max_minutes: self.max_minutes,
        }
    }
}

fn main() {
    let args = Args::parse();

    if let Err(err) = run(&args) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn run(args: &Args) -> Result<(), Box<dyn std::error::Error>> {
    let config = args.config();

    if args.trace {
        let mut simulation = Simulation::new(&config)?;
        let summary =
            simulation.run_with(|minute| println!("{}", report::minute_csv_line(minute)))?;
        println!("{}", report::summary_report(&summary));
        return Ok(());
    }

    let summaries = run_batch_parallel(&config, args.runs, args.threads, !args.json)?;

    match AggregateReport::from_summaries(&summaries) {
        Some(aggregate) if args.json => {
            println!("{}", serde_json::to_string_pretty(&aggregate)?);
        }
        Some(aggregate) => {
            println!("{}", report::aggregate_report(&aggregate));
        }
        None => {
            println!("no runs requested");
        }
    }

    Ok(())
}
