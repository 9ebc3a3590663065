//! `openslot` CLI — find free meeting windows in a calendar export.
//!
//! ## Usage
//!
//! ```sh
//! # Find free windows this week (events piped via stdin)
//! cat events.json | openslot find
//!
//! # Read events from a file, Pacific time, hour-long slots minimum
//! openslot find -e events.json -t pacific --min-minutes 60
//!
//! # Custom work hours and an explicit date range
//! openslot find -e events.json --work-start 8:30am --work-end "half past 4" \
//!     --from 2026-08-10 --to 2026-08-14
//!
//! # Machine-readable output
//! openslot find -e events.json --json
//!
//! # Inspect the merged busy blocks instead
//! openslot busy -e events.json
//! ```

use std::io::{self, Read};

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, Utc};
use clap::{Args, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use openslot_engine::{
    busy_intervals, merge, parse_events, parse_time_of_day, render_schedule, resolve_timezone,
    JsonEventSource, Planner, SchedulerConfig,
};

#[derive(Parser)]
#[command(
    name = "openslot",
    version,
    about = "Weekly meeting-availability checker"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Compute free meeting windows from a calendar export
    Find {
        #[command(flatten)]
        args: ScheduleArgs,
        /// Emit the schedule as JSON instead of display lines
        #[arg(long)]
        json: bool,
    },
    /// Show the merged, buffered busy blocks for the same inputs
    Busy {
        #[command(flatten)]
        args: ScheduleArgs,
    },
}

#[derive(Args)]
struct ScheduleArgs {
    /// Events JSON file (reads from stdin if omitted)
    #[arg(short, long)]
    events: Option<String>,

    /// Timezone alias or IANA name (est, pacific, Europe/Berlin, ...)
    #[arg(short, long, default_value = "est")]
    timezone: String,

    /// Workday start ("9", "9:00", "8:30am", "noon")
    #[arg(long, default_value = "9:00")]
    work_start: String,

    /// Workday end
    #[arg(long, default_value = "5:00pm")]
    work_end: String,

    /// Minimum meeting length in minutes
    #[arg(long, default_value_t = 30)]
    min_minutes: u32,

    /// Buffer before and after events in minutes
    #[arg(long, default_value_t = 15)]
    buffer_minutes: u32,

    /// First date to consider (YYYY-MM-DD; defaults to this week's Monday)
    #[arg(long, requires = "to")]
    from: Option<NaiveDate>,

    /// Last date to consider (YYYY-MM-DD; defaults to this week's Sunday)
    #[arg(long, requires = "from")]
    to: Option<NaiveDate>,

    /// Clock override for reproducible output (RFC 3339)
    #[arg(long)]
    now: Option<DateTime<Utc>>,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Commands::Find { args, json } => run_find(&args, json),
        Commands::Busy { args } => run_busy(&args),
    }
}

fn run_find(args: &ScheduleArgs, json: bool) -> Result<()> {
    let (config, now) = build_config(args)?;
    let payload = read_events(args.events.as_deref())?;
    let source = JsonEventSource::from_json(&payload).context("Failed to parse events JSON")?;

    let mut planner = Planner::new(source);
    let schedule = planner
        .availability("default", &config, now)
        .context("Failed to compute availability")?;

    if json {
        println!("{}", serde_json::to_string_pretty(&schedule)?);
        return Ok(());
    }
    if schedule.is_empty() {
        println!("No free time blocks found with the selected settings.");
        return Ok(());
    }
    println!(
        "Free time blocks (>= {} min, {} min buffer):",
        config.min_minutes, config.buffer_minutes
    );
    for line in render_schedule(&schedule, config.timezone) {
        println!("{line}");
    }
    Ok(())
}

fn run_busy(args: &ScheduleArgs) -> Result<()> {
    let (config, _now) = build_config(args)?;
    let payload = read_events(args.events.as_deref())?;
    let events = parse_events(&payload).context("Failed to parse events JSON")?;

    let busy = merge(busy_intervals(&events, config.buffer()));
    if busy.is_empty() {
        println!("No busy blocks.");
        return Ok(());
    }
    for block in &busy {
        let start = block.start().with_timezone(&config.timezone);
        let end = block.end().with_timezone(&config.timezone);
        println!(
            "{} -> {}  ({} min)",
            start.format("%Y-%m-%d %H:%M"),
            end.format("%Y-%m-%d %H:%M"),
            block.duration_minutes()
        );
    }
    Ok(())
}

/// Turn the raw flag strings into a validated config plus the effective
/// clock.
fn build_config(args: &ScheduleArgs) -> Result<(SchedulerConfig, DateTime<Utc>)> {
    let timezone = resolve_timezone(&args.timezone)
        .with_context(|| format!("Unknown timezone: {}", args.timezone))?;
    let work_start = parse_time_of_day(&args.work_start)
        .with_context(|| format!("Unreadable workday start: {}", args.work_start))?;
    let work_end = parse_time_of_day(&args.work_end)
        .with_context(|| format!("Unreadable workday end: {}", args.work_end))?;

    let config = SchedulerConfig {
        timezone,
        work_start,
        work_end,
        min_minutes: args.min_minutes,
        buffer_minutes: args.buffer_minutes,
        date_range: args.from.zip(args.to),
    };
    config.validate().context("Invalid configuration")?;

    let now = args.now.unwrap_or_else(Utc::now);
    Ok((config, now))
}

fn read_events(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {path}"))
        }
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
