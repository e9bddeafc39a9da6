//! `timematch` CLI — find shared meeting windows from participant availability.
//!
//! ## Usage
//!
//! ```sh
//! # Match participants (stdin → stdout, JSON)
//! cat participants.json | timematch match
//!
//! # Read from file, human-readable output
//! timematch match -i participants.json --format text
//!
//! # Cluster across UTC midnight and ignore windows under 30 minutes
//! timematch match -i participants.json --grouping sweep --min-duration 30
//!
//! # Use a config file for defaults
//! timematch match -i participants.json --config timematch.toml
//!
//! # Show which participants would be dropped and why
//! timematch validate -i participants.json
//!
//! # Convert a clock time between offsets
//! timematch convert "9:00 AM" --from -5 --to 5.5
//! ```

mod config;

use std::io::{self, Read};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use overlap_engine::{
    find_matches_with_report, offset_label, DropReason, Grouping, MatchReport, ParticipantInput,
};
use tracing_subscriber::EnvFilter;

use crate::config::{Config, OutputFormat};

#[derive(Parser)]
#[command(
    name = "timematch",
    version,
    about = "Find meeting times that work across time zones"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Log debug details to stderr (overridden by RUST_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Find shared availability windows
    Match {
        /// Participants JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output file (writes to stdout if omitted)
        #[arg(short, long)]
        output: Option<String>,
        /// How slots are clustered
        #[arg(long, value_enum)]
        grouping: Option<GroupingArg>,
        /// Drop shared windows shorter than this many minutes
        #[arg(long)]
        min_duration: Option<i64>,
        /// Output format
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,
        /// TOML config file with [matching] and [output] defaults
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// Report participants that would be left out of matching
    Validate {
        /// Participants JSON file (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Convert a 12-hour clock time from one UTC offset to another
    Convert {
        /// Clock time, e.g. "9:00 AM"
        time: String,
        /// Source offset in hours (e.g. -5, 5.5)
        #[arg(long, allow_negative_numbers = true)]
        from: f64,
        /// Target offset in hours
        #[arg(long, allow_negative_numbers = true)]
        to: f64,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum GroupingArg {
    StartDay,
    Sweep,
}

impl From<GroupingArg> for Grouping {
    fn from(arg: GroupingArg) -> Self {
        match arg {
            GroupingArg::StartDay => Grouping::StartDay,
            GroupingArg::Sweep => Grouping::Sweep,
        }
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Match {
            input,
            output,
            grouping,
            min_duration,
            format,
            config,
        } => {
            let config = Config::load_optional(config.as_deref())?;
            let options = config.match_options(grouping.map(Grouping::from), min_duration);
            let format = config.output_format(format);

            let participants = read_participants(input.as_deref())?;
            let report = find_matches_with_report(&participants, &options);
            tracing::debug!(
                matches = report.matches.len(),
                valid = report.valid_participants,
                dropped = report.dropped.len(),
                "matching finished"
            );

            let rendered = match format {
                OutputFormat::Json => serde_json::to_string_pretty(&report.matches)
                    .context("Failed to serialize matches")?,
                OutputFormat::Text => render_text(&report),
            };
            write_output(output.as_deref(), &rendered)?;
        }
        Commands::Validate { input } => {
            let participants = read_participants(input.as_deref())?;
            let report = find_matches_with_report(&participants, &Default::default());
            print!("{}", render_validation(&report));
        }
        Commands::Convert { time, from, to } => {
            println!("{}", overlap_engine::convert_time(&time, from, to));
        }
    }

    Ok(())
}

/// Log to stderr so stdout stays clean for JSON output.
fn init_tracing(verbose: bool) {
    let default_level = if verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .init();
}

fn render_text(report: &MatchReport) -> String {
    if !report.has_enough_participants() {
        return format!(
            "Not enough participants: need at least 2 valid, found {}.\n",
            report.valid_participants
        );
    }
    if report.matches.is_empty() {
        return "No matching times found.\n".to_string();
    }

    let mut out = String::new();
    for m in &report.matches {
        out.push_str(&format!(
            "{} {} - {} UTC ({}/{} available, {} min)\n",
            m.day, m.utc_start, m.utc_end, m.match_count, m.total_count, m.duration_minutes
        ));
        for a in &m.available {
            out.push_str(&format!(
                "  + {} ({}, {}): {} - {}\n",
                a.name,
                a.city,
                offset_label(a.offset),
                a.local_start_time,
                a.local_end_time
            ));
        }
        for u in &m.unavailable {
            out.push_str(&format!(
                "  - {} ({}, {})\n",
                u.name,
                u.city,
                offset_label(u.offset)
            ));
        }
    }
    out
}

fn render_validation(report: &MatchReport) -> String {
    let mut out = format!("Valid participants: {}\n", report.valid_participants);
    for dropped in &report.dropped {
        let name = if dropped.name.is_empty() {
            "<unnamed>"
        } else {
            dropped.name.as_str()
        };
        out.push_str(&format!(
            "Dropped #{} {}: {}\n",
            dropped.index,
            name,
            describe(dropped.reason)
        ));
    }
    if !report.has_enough_participants() {
        out.push_str("Warning: at least 2 valid participants are needed to find a match\n");
    }
    out
}

fn describe(reason: DropReason) -> &'static str {
    match reason {
        DropReason::MissingName => "missing name",
        DropReason::MissingCity => "missing city",
        DropReason::NoSlots => "no usable time slots",
        DropReason::DuplicateName => "name already used by another participant",
    }
}

fn read_participants(path: Option<&str>) -> Result<Vec<ParticipantInput>> {
    let json = read_input(path)?;
    serde_json::from_str(&json).context("Failed to parse participants JSON")
}

fn read_input(path: Option<&str>) -> Result<String> {
    match path {
        Some(path) => {
            std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path))
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

fn write_output(path: Option<&str>, content: &str) -> Result<()> {
    match path {
        Some(path) => {
            std::fs::write(path, content)
                .with_context(|| format!("Failed to write file: {}", path))?;
        }
        None => {
            println!("{}", content.trim_end());
        }
    }
    Ok(())
}
