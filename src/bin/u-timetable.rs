//! Timetable generation CLI.
//!
//! Runs generations and conflict checks over a JSON dataset and prints
//! the results as JSON on stdout. Logs go to stderr.

use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use u_timetable::models::{Day, Preferences, TimeSlot};
use u_timetable::scheduler::{check_conflicts, ConflictQuery, TimetableGenerator};
use u_timetable::store::MemoryStore;
use u_timetable::GeneratorConfig;

#[derive(Parser)]
#[command(name = "u-timetable")]
#[command(about = "Greedy constraint-based academic timetable generation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Generator configuration (TOML)
    #[arg(long, short, global = true, env = "U_TIMETABLE_CONFIG")]
    config: Option<PathBuf>,

    /// Enable debug logging (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate a timetable for the given batches.
    Generate {
        /// Dataset file (JSON)
        #[arg(short, long)]
        dataset: PathBuf,
        /// Batch ids (comma-separated), processed in this order
        #[arg(short, long, value_delimiter = ',', required = true)]
        batches: Vec<String>,
        /// Time-slots (comma-separated HH:MM-HH:MM); defaults to the configured catalog
        #[arg(short, long, value_delimiter = ',')]
        slots: Vec<String>,
        /// Generate this many alternative timetables (1-10)
        #[arg(long)]
        options: Option<usize>,
        /// Do not prefer morning slots
        #[arg(long)]
        no_morning: bool,
        /// Write the result here instead of stdout
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Check whether a placement would collide with existing entries.
    Check {
        /// Dataset file (JSON)
        #[arg(short, long)]
        dataset: PathBuf,
        /// Day, e.g. MONDAY
        #[arg(long)]
        day: Day,
        /// Time-slot, e.g. 09:00-10:00
        #[arg(long)]
        slot: TimeSlot,
        #[arg(long)]
        batch: Option<String>,
        #[arg(long)]
        faculty: Option<String>,
        #[arg(long)]
        room: Option<String>,
        /// Entry id to ignore (the one being edited)
        #[arg(long)]
        exclude: Option<String>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => GeneratorConfig::from_file(path)?,
        None => GeneratorConfig::default(),
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("debug")
        } else {
            EnvFilter::new(&config.generation.log_filter)
        }
    });
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    match cli.command {
        Commands::Generate {
            dataset,
            batches,
            slots,
            options,
            no_morning,
            output,
        } => {
            let store = load_store(&dataset)?;
            let mut request = config.request_for(batches, slots);
            if no_morning {
                let preferences = Preferences::default().with_prefer_morning_slots(false);
                request = request.with_preferences(preferences);
            }

            let generator = TimetableGenerator::new(store).with_config(config);
            let json = match options {
                Some(count) => {
                    let options = generator.generate_options(&request, count)?;
                    info!(options = options.len(), "alternative timetables generated");
                    serde_json::to_string_pretty(&options)?
                }
                None => {
                    let result = generator.generate(&request);
                    if !result.success {
                        bail!(
                            "generation failed: {}",
                            result.error.as_deref().unwrap_or("unknown error")
                        );
                    }
                    info!(
                        entries = result.entry_count(),
                        warnings = result.warnings.len(),
                        elapsed_ms = result.generation_time_ms,
                        "timetable generated"
                    );
                    serde_json::to_string_pretty(&result)?
                }
            };
            emit(&json, output.as_deref())?;
        }

        Commands::Check {
            dataset,
            day,
            slot,
            batch,
            faculty,
            room,
            exclude,
        } => {
            let store = load_store(&dataset)?;
            let query = ConflictQuery {
                batch_id: batch,
                faculty_id: faculty,
                room_id: room,
                day,
                time_slot: slot,
                exclude_entry_id: exclude,
            };
            let conflicts = check_conflicts(&query, store.entries());
            info!(conflicts = conflicts.len(), %day, %slot, "conflict check done");
            emit(&serde_json::to_string_pretty(&conflicts)?, None)?;
        }
    }

    Ok(())
}

fn load_store(path: &Path) -> Result<MemoryStore> {
    MemoryStore::from_json_file(path)
        .with_context(|| format!("failed to load dataset {}", path.display()))
}

fn emit(json: &str, output: Option<&Path>) -> Result<()> {
    match output {
        Some(path) => std::fs::write(path, json)
            .with_context(|| format!("failed to write {}", path.display())),
        None => {
            println!("{json}");
            Ok(())
        }
    }
}
