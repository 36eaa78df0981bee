use bodycomp_core::*;
use clap::{Parser, Subcommand};
use std::io;
use std::path::PathBuf;

mod shell;

#[derive(Parser)]
#[command(name = "bodycomp")]
#[command(about = "Body composition tracker (BMI and U.S. Navy body fat)", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Override history log location
    #[arg(long, global = true)]
    history_file: Option<PathBuf>,

    /// Use an alternate config file
    #[arg(long, global = true)]
    config: Option<PathBuf>,
}

#[derive(Subcommand)]
enum Commands {
    /// Interactive prompt loop (default)
    Track,

    /// Compute metrics for a single measurement
    Calc {
        /// Label stored with the record
        #[arg(long, default_value = "Anonymous")]
        name: String,

        /// Age in years
        #[arg(long)]
        age: String,

        /// Gender (M/F)
        #[arg(long)]
        gender: String,

        /// Weight in kg
        #[arg(long)]
        weight: String,

        /// Height in cm
        #[arg(long)]
        height: String,

        /// Neck circumference in cm
        #[arg(long)]
        neck: String,

        /// Waist circumference in cm
        #[arg(long)]
        waist: String,

        /// Hip circumference in cm (required for F)
        #[arg(long)]
        hip: Option<String>,

        /// Append the result to the history log
        #[arg(long)]
        save: bool,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show saved records
    History {
        /// Only show the most recent N records
        #[arg(long)]
        last: Option<usize>,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Config picks the log level, so it is read before tracing is installed
    // and its source is logged afterwards.
    let config_path = cli.config.clone().unwrap_or_else(Config::default_config_path);
    let config = match &cli.config {
        Some(path) => Config::load_from(path)?,
        None => Config::load()?,
    };

    // Initialize logging
    bodycomp_core::logging::init_with_level(&config.logging.level);
    if config_path.exists() {
        tracing::info!("Using config from {:?}", config_path);
    } else {
        tracing::info!("No config file at {:?}, using defaults", config_path);
    }

    let history_file = cli
        .history_file
        .unwrap_or_else(|| config.store.history_file.clone());
    let store = CsvRecordStore::new(history_file);
    tracing::info!("History log: {:?}", store.path());

    match cli.command {
        Some(Commands::Calc {
            name,
            age,
            gender,
            weight,
            height,
            neck,
            waist,
            hip,
            save,
            json,
        }) => {
            let raw = RawMeasurement {
                name,
                age,
                gender,
                weight,
                height,
                neck,
                waist,
                hip,
            };
            cmd_calc(&raw, store, save, json)
        }
        Some(Commands::History { last }) => cmd_history(&store, last),
        Some(Commands::Track) | None => {
            let stdin = io::stdin();
            shell::Shell::new(stdin.lock(), io::stdout(), store).run()
        }
    }
}

fn cmd_calc(raw: &RawMeasurement, mut store: CsvRecordStore, save: bool, json: bool) -> Result<()> {
    let measurement = raw.parse()?;

    let result = compute_metrics(&measurement);

    if json {
        let text = serde_json::to_string_pretty(&result).map_err(io::Error::from)?;
        println!("{}", text);
    } else {
        println!("Results for {}:", measurement.name);
        println!("  > BMI Score      : {}", result.bmi);
        println!("  > Body Fat %     : {}% (U.S. Navy Method)", result.body_fat_percent);
        println!("  > Health Category: {}", result.category);
    }

    if save {
        let outcome = store.save_record(&measurement, &result);
        if outcome.success {
            println!("[Success] {}", outcome.message);
        } else {
            // Reported, not fatal
            eprintln!("[Error] {}", outcome.message);
        }
    }

    Ok(())
}

fn cmd_history(store: &CsvRecordStore, last: Option<usize>) -> Result<()> {
    let records = read_records(store.path())?;

    if records.is_empty() {
        println!("No records found in '{}'.", store.path().display());
        return Ok(());
    }

    let skip = last.map_or(0, |n| records.len().saturating_sub(n));
    for record in records.iter().skip(skip) {
        println!(
            "{}  {:<16} {:>3} {}  BMI {:>6}  Fat {:>6}%  {}",
            record.timestamp.format(TIMESTAMP_FORMAT),
            record.name,
            record.age,
            record.gender,
            record.bmi,
            record.body_fat_percent,
            record.category
        );
    }

    tracing::debug!("Listed {} of {} records", records.len() - skip, records.len());
    Ok(())
}
