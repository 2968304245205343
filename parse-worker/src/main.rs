//! revtc-parse-worker - Parse one EVTC combat log and print the result.
//!
//! Usage: revtc-parse-worker <file_path> [--config <path>] [--summary] [--european]
//!
//! Output: the parsed log as JSON on stdout, or a text table with `--summary`.
//! Diagnostics go to stderr; `RUST_LOG` controls verbosity.

use std::fs::File;
use std::path::{Path, PathBuf};

use clap::Parser as _;
use memmap2::Mmap;
use revtc_core::{Log, Parser};
use revtc_types::ParserConfig;
use revtc_types::formatting::{
    format_damage, format_dps, format_duration_ms, format_stacks, format_uptime,
};
use tracing_subscriber::filter::EnvFilter;

#[derive(clap::Parser, Debug)]
#[command(name = "revtc-parse-worker", version, about)]
struct Cli {
    /// EVTC log to parse.
    file_path: PathBuf,

    /// Parser config TOML. Defaults to the user config location.
    #[arg(long)]
    config: Option<PathBuf>,

    /// Print a text summary instead of JSON.
    #[arg(long)]
    summary: bool,

    /// Swap `.` and `,` in summary numbers.
    #[arg(long)]
    european: bool,
}

fn init_logging() {
    let filter = EnvFilter::builder()
        .with_default_directive(tracing::Level::INFO.into())
        .from_env_lossy();

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&Path>) -> ParserConfig {
    let Some(path) = path else {
        return match confy::load::<ParserConfig>("revtc", "parser") {
            Ok(config) => config,
            Err(e) => {
                tracing::warn!(error = %e, "Failed to load user config, using defaults");
                ParserConfig::default()
            }
        };
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Failed to read config");
            std::process::exit(1);
        }
    };
    match ParserConfig::from_toml_str(&text) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "Invalid config");
            std::process::exit(1);
        }
    }
}

fn print_summary(log: &Log, european: bool) {
    println!(
        "{} ({}) - {}",
        log.encounter_name,
        log.area_id,
        format_duration_ms(log.encounter_duration)
    );
    if let Some(by) = &log.recorded_by {
        println!("Recorded by {by}");
    }
    println!();
    println!(
        "{:<3} {:<24} {:<6} {:>9} {:>9} {:>9} {:>6} {:>7} {:>7} {:>7}  Note",
        "Grp", "Name", "Spec", "Damage", "DPS", "Boss DPS", "Might", "Quick", "Alac", "Fury"
    );
    for p in &log.players {
        println!(
            "{:<3} {:<24} {:<6} {:>9} {:>9} {:>9} {:>6} {:>7} {:>7} {:>7}  {}",
            p.subgroup,
            p.name,
            p.elite_spec_short,
            format_damage(p.total_damage(), european),
            format_dps(p.dps, european),
            format_dps(p.boss_dps, european),
            format_stacks(p.might, european),
            format_uptime(p.quickness, european),
            format_uptime(p.alacrity, european),
            format_uptime(p.fury, european),
            p.note.as_deref().unwrap_or(""),
        );
    }
}

fn main() {
    init_logging();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref());

    let file = match File::open(&cli.file_path) {
        Ok(f) => f,
        Err(e) => {
            tracing::error!(path = %cli.file_path.display(), error = %e, "Failed to open log");
            std::process::exit(1);
        }
    };

    // SAFETY: the log is opened read-only and not modified while mapped
    let mmap = match unsafe { Mmap::map(&file) } {
        Ok(m) => m,
        Err(e) => {
            tracing::error!(error = %e, "Failed to mmap log");
            std::process::exit(1);
        }
    };

    let timer = std::time::Instant::now();
    let log = Parser::new(config).parse(&mmap);
    tracing::info!(
        bytes = mmap.len(),
        players = log.players.len(),
        valid = log.valid,
        elapsed_ms = timer.elapsed().as_millis() as u64,
        "Parsed log"
    );

    if cli.summary {
        if let Some(error) = &log.error {
            eprintln!("Invalid log: {error}");
            std::process::exit(1);
        }
        print_summary(&log, cli.european);
        return;
    }

    match serde_json::to_string_pretty(&log) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            tracing::error!(error = %e, "Failed to serialize log");
            std::process::exit(1);
        }
    }
    if !log.valid {
        std::process::exit(1);
    }
}
