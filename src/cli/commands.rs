//! Command implementations for the textload CLI
//!
//! Each command builds an [`IngestConfig`](crate::IngestConfig) from its
//! arguments, runs the library operation and prints a short summary.

use anyhow::{Context, Result};
use colored::Colorize;
use indicatif::{HumanDuration, ProgressBar, ProgressStyle};
use std::io::Write;
use std::time::{Duration, Instant};
use tracing::{debug, info};

use crate::app::services::db_loader::{LoadStats, SqliteBackend, text_to_db};
use crate::app::services::table_materializer::{MaterializeResult, text_to_table, write_parquet};
use crate::cli::args::{Args, Commands, DbArgs, TableArgs};

/// Run the command selected on the command line
pub fn run(args: Args) -> Result<()> {
    setup_logging(&args)?;
    let show_progress = args.show_progress();

    match &args.command {
        Commands::Table(table_args) => {
            let result = run_table(table_args)?;
            if show_progress {
                print_table_summary(table_args, &result);
            }
        }
        Commands::Db(db_args) => {
            let started = Instant::now();
            let stats = run_db(db_args, show_progress)?;
            if show_progress {
                print_load_summary(db_args, &stats, started.elapsed());
            }
        }
    }
    Ok(())
}

/// Set up structured logging on stderr
pub fn setup_logging(args: &Args) -> Result<()> {
    use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

    let log_level = args.get_log_level();

    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(format!("textload={}", log_level)));

    if args.quiet {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_writer(std::io::stderr)
                    .compact(),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(
                fmt::layer()
                    .with_target(false)
                    .with_level(true)
                    .with_timer(fmt::time::uptime())
                    .with_writer(std::io::stderr),
            )
            .try_init()
            .context("Failed to initialize logging")?;
    }

    debug!("Logging initialized at level: {}", log_level);
    Ok(())
}

/// Materialize the input, then export and/or print it
pub fn run_table(args: &TableArgs) -> Result<MaterializeResult> {
    let config = args.parse.to_config();
    let input = &args.parse.input;

    let result = match text_to_table(input, &config) {
        Ok(result) => result,
        Err(error) => {
            if let Some(partial) = error.partial_table() {
                eprintln!(
                    "{} stopped after {} rows",
                    "Warning:".yellow().bold(),
                    partial.rows()
                );
            }
            return Err(error).with_context(|| format!("Failed to read table from {}", input));
        }
    };

    if let Some(path) = &args.parquet {
        write_parquet(&result.table, path)
            .with_context(|| format!("Failed to write {}", path.display()))?;
        info!("Wrote {}", path.display());
    }

    if args.print {
        let mut stdout = std::io::stdout().lock();
        stdout
            .write_all(result.table.to_delimited(',').as_bytes())
            .context("Failed to print table")?;
    }

    Ok(result)
}

/// Load the input into a new SQLite table
pub fn run_db(args: &DbArgs, show_progress: bool) -> Result<LoadStats> {
    let config = args.to_config();
    let table = args.table_name()?;

    let mut backend = SqliteBackend::open_path(&args.database)
        .with_context(|| format!("Failed to open database {}", args.database.display()))?;

    let spinner = if show_progress {
        let spinner = ProgressBar::new_spinner();
        spinner.set_style(
            ProgressStyle::default_spinner()
                .template("{spinner:.green} [{elapsed_precise}] {msg}")
                .context("Invalid progress template")?,
        );
        spinner.set_message(format!("Loading {} into {}", args.parse.input, table));
        spinner.enable_steady_tick(Duration::from_millis(100));
        Some(spinner)
    } else {
        None
    };

    let result = text_to_db(&mut backend, &args.parse.input, &table, &config);

    if let Some(spinner) = spinner {
        spinner.finish_and_clear();
    }

    let stats = result.with_context(|| {
        format!(
            "Failed to load {} into table {}",
            args.parse.input, table
        )
    })?;
    backend.close().context("Failed to close database")?;
    Ok(stats)
}

fn print_table_summary(args: &TableArgs, result: &MaterializeResult) {
    let table = &result.table;
    let stats = &result.stats;

    println!("\n{}", "Table read".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Input: {}", args.parse.input);
    println!("   • Rows: {}", table.rows());
    println!("   • Columns: {}", table.column_names().join(", "));
    if table.has_row_names() {
        println!("   • Row names: yes");
    }
    println!(
        "   • Missing values: {} ({:.1}%)",
        stats.missing_values,
        stats.missing_rate(table.width())
    );
    if stats.unparseable_fields > 0 {
        println!(
            "   {} {} fields were not numbers",
            "⚠".yellow(),
            stats.unparseable_fields
        );
    }
    if let Some(path) = &args.parquet {
        println!("   • Parquet: {}", path.display());
    }
    println!();
}

fn print_load_summary(args: &DbArgs, stats: &LoadStats, elapsed: Duration) {
    println!("\n{}", "Load complete".green().bold());
    println!("━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━");
    println!("   • Database: {}", args.database.display());
    println!("   • Table: {} ({} columns)", stats.table, stats.columns);
    println!("   • Rows inserted: {}", stats.rows_inserted);
    println!("   • Batches committed: {}", stats.batches_committed);
    println!("   • Insert strategy: {}", stats.strategy);
    println!("   • Time: {}", HumanDuration(elapsed));
    if stats.rows_failed > 0 {
        println!(
            "   {} {} rows failed to insert",
            "⚠".yellow(),
            stats.rows_failed.to_string().red()
        );
    }
    println!();
}
