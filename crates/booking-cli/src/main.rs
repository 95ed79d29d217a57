//! `booking` CLI — build equipment delivery schedules from reservation sheets.
//!
//! ## Usage
//!
//! ```sh
//! # List merged reservations with their delivery/pickup windows
//! booking schedule -i reservations.csv
//!
//! # Write tomorrow's annotated sheet (e.g. Mar-17.csv) into ./out
//! booking export -i reservations.csv -o out
//!
//! # Same, as JSON cell writes including highlight styles
//! booking export -i reservations.csv -o out --format json
//!
//! # What needs delivering or collecting at 10:31 AM
//! booking due -i reservations.csv --at "10:31 AM"
//!
//! # Live board, refreshed every minute against the local clock
//! booking watch -i reservations.csv
//! ```

use std::fs::File;
use std::io::{self, BufWriter, Read};
use std::path::{Path, PathBuf};
use std::time::Duration as StdDuration;

use anyhow::{Context, Result};
use booking_engine::due::DueRules;
use booking_engine::layout::{header_cells, output_stem, reservation_cells};
use booking_engine::sheet::{write_sheet, CsvSheet, JsonSheet, SheetSink};
use booking_engine::{format_time, parse_time, Book, Config};
use chrono::{Duration, Local, NaiveDate, NaiveTime};
use clap::{Parser, Subcommand, ValueEnum};
use tracing::Level;

#[derive(Parser)]
#[command(
    name = "booking",
    version,
    about = "Equipment delivery and pickup schedules from room reservation sheets"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file (defaults to <config dir>/booking/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log debug output to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Print merged reservations with their windows
    Schedule {
        /// Reservation sheet as CSV (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
    },
    /// Write the annotated delivery sheet for tomorrow
    Export {
        /// Reservation sheet as CSV (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Output directory
        #[arg(short, long, default_value = ".")]
        output: PathBuf,
        /// Output format
        #[arg(long, value_enum, default_value_t = SheetFormat::Csv)]
        format: SheetFormat,
        /// Day the sheet is prepared on, YYYY-MM-DD (defaults to today)
        #[arg(long)]
        date: Option<NaiveDate>,
    },
    /// Show deliveries and pickups due at a given time
    Due {
        /// Reservation sheet as CSV (reads from stdin if omitted)
        #[arg(short, long)]
        input: Option<String>,
        /// Clock time such as "10:31 AM" (defaults to now)
        #[arg(long)]
        at: Option<String>,
        /// Override the lookahead for open and ranged windows
        #[arg(long)]
        lookahead_minutes: Option<i64>,
        /// Emit JSON instead of text columns
        #[arg(long)]
        json: bool,
    },
    /// Reprint the due board periodically against the local clock
    Watch {
        /// Reservation sheet as CSV
        #[arg(short, long)]
        input: String,
        /// Seconds between refreshes
        #[arg(long, default_value_t = 60)]
        interval_secs: u64,
    },
}

#[derive(Clone, Copy, ValueEnum)]
enum SheetFormat {
    Csv,
    Json,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_max_level(if cli.verbose { Level::DEBUG } else { Level::WARN })
        .init();

    let config = load_config(cli.config.as_deref())?;

    match cli.command {
        Commands::Schedule { input } => {
            let book = load_book(input.as_deref(), &config)?;
            for event in book.reservations() {
                println!("{}", event.render_summary());
                println!(
                    "    deliver: {}    pick up: {}",
                    event.delivery_window(),
                    event.pickup_window()
                );
            }
        }
        Commands::Export {
            input,
            output,
            format,
            date,
        } => {
            let book = load_book(input.as_deref(), &config)?;
            let today = date.unwrap_or_else(|| Local::now().date_naive());
            let path = export(&book, &config, &output, format, today)?;
            println!("{}", path.display());
        }
        Commands::Due {
            input,
            at,
            lookahead_minutes,
            json,
        } => {
            let book = load_book(input.as_deref(), &config)?;
            let now = match at {
                Some(text) => parse_time(&text).with_context(|| format!("Invalid --at: {}", text))?,
                None => Local::now().time(),
            };
            let mut rules = *book.rules();
            if let Some(minutes) = lookahead_minutes {
                rules.lookahead = Duration::minutes(minutes);
            }
            if json {
                print_due_json(&book, now, &rules)?;
            } else {
                print_due(&book, &config, now, &rules);
            }
        }
        Commands::Watch {
            input,
            interval_secs,
        } => {
            let book = load_book(Some(&input), &config)?;
            loop {
                let now = Local::now().time();
                print_due(&book, &config, now, book.rules());
                std::thread::sleep(StdDuration::from_secs(interval_secs.max(1)));
            }
        }
    }

    Ok(())
}

fn load_config(path: Option<&Path>) -> Result<Config> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => match dirs::config_dir() {
            Some(dir) => dir.join("booking").join("config.toml"),
            None => return Ok(Config::default()),
        },
    };
    Config::load(&path).with_context(|| format!("Failed to load config: {}", path.display()))
}

fn load_book(path: Option<&str>, config: &Config) -> Result<Book> {
    let sheet = read_input(path)?;
    Book::load_csv(sheet.as_slice(), config).context("Failed to load reservation sheet")
}

fn export(
    book: &Book,
    config: &Config,
    dir: &Path,
    format: SheetFormat,
    today: NaiveDate,
) -> Result<PathBuf> {
    let stem = output_stem(today);
    let ext = match format {
        SheetFormat::Csv => "csv",
        SheetFormat::Json => "json",
    };
    let path = dir.join(format!("{}.{}", stem, ext));
    let file = File::create(&path)
        .with_context(|| format!("Failed to create file: {}", path.display()))?;
    let writer = BufWriter::new(file);

    let mut sink: Box<dyn SheetSink> = match format {
        SheetFormat::Csv => Box::new(CsvSheet::new(writer)),
        SheetFormat::Json => Box::new(JsonSheet::new(writer)),
    };

    let mut cells = header_cells(&config.resources);
    cells.extend(reservation_cells(book.reservations(), &config.resources));
    write_sheet(sink.as_mut(), &cells)
        .with_context(|| format!("Failed to write file: {}", path.display()))?;

    tracing::info!(path = %path.display(), rows = book.reservations().len(), "exported sheet");
    Ok(path)
}

fn print_due(book: &Book, config: &Config, now: NaiveTime, rules: &DueRules) {
    let deliveries = book.deliveries_with(now, rules);
    let pickups = book.pickups_with(now, rules);

    println!("Due at {}", format_time(now));
    println!("DELIVERIES");
    if deliveries.is_empty() {
        println!("  (none)");
    }
    for item in &deliveries {
        let mark = if item.event.is_delivery_done() { "x" } else { " " };
        println!("  [{}] {}", mark, item.delivery_line(&config.resources));
    }
    println!("PICKUPS");
    if pickups.is_empty() {
        println!("  (none)");
    }
    for item in &pickups {
        let mark = if item.event.is_pickup_done() { "x" } else { " " };
        println!("  [{}] {}", mark, item.pickup_line(&config.resources));
    }
}

fn print_due_json(book: &Book, now: NaiveTime, rules: &DueRules) -> Result<()> {
    let report = serde_json::json!({
        "at": format_time(now),
        "deliveries": book.deliveries_with(now, rules),
        "pickups": book.pickups_with(now, rules),
    });
    println!("{}", serde_json::to_string_pretty(&report)?);
    Ok(())
}

/// Raw sheet bytes; the engine decodes cells itself.
fn read_input(path: Option<&str>) -> Result<Vec<u8>> {
    match path {
        Some(path) => std::fs::read(path).with_context(|| format!("Failed to read file: {}", path)),
        None => {
            let mut buf = Vec::new();
            io::stdin()
                .read_to_end(&mut buf)
                .context("Failed to read from stdin")?;
            Ok(buf)
        }
    }
}
