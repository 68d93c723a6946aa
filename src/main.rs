//! Payslip command-line tool.
//!
//! Parses payslip text extracted from PDF statements and weekly schedule
//! scrapes:
//!
//! - `print`: summary table or CSV of one or more payslips
//! - `archive`: copy payslips into the archive, named by payment date
//! - `schedule`: calendar commands for the shifts in a schedule
//! - `serve`: the HTTP API

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context};
use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use payslip_parser::api::{create_router, AppState};
use payslip_parser::config::ConfigLoader;
use payslip_parser::models::PayslipDocument;
use payslip_parser::parser::{parse_payslip_text, parse_schedule};
use payslip_parser::render::{
    archive_document, calendar_command, csv_header, shell_join, SummaryRow, SummaryTable,
};

const DEFAULT_CONFIG: &str = "config/payslip.yaml";

/// Command-line arguments for the payslip tool
#[derive(Parser, Debug)]
#[command(name = "payslip")]
#[command(about = "Parse, print and archive payslips; export scheduled shifts")]
struct Args {
    /// Configuration file [default: config/payslip.yaml when present]
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print a summary of one or more payslips
    Print {
        /// Print CSV instead of a table
        #[arg(long)]
        csv: bool,

        /// Also print each parsed payslip as JSON
        #[arg(long)]
        dump: bool,

        /// Payslip text files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Copy payslips into the archive directory, named by payment date
    Archive {
        /// Payslip text files
        #[arg(required = true)]
        files: Vec<PathBuf>,
    },

    /// Print calendar commands for the shifts in a schedule
    Schedule {
        /// Schedule file, one token per line
        file: PathBuf,

        /// A date in the month the schedule starts in (YYYY-MM-DD)
        #[arg(long)]
        anchor: NaiveDate,
    },

    /// Serve the HTTP API
    Serve,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let log_level = if args.verbose {
        Level::DEBUG
    } else {
        Level::INFO
    };

    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive(log_level.into()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let config = load_config(args.config.as_deref())?;

    match args.command {
        Command::Print { csv, dump, files } => print_payslips(&files, csv, dump),
        Command::Archive { files } => archive_payslips(&files, &config),
        Command::Schedule { file, anchor } => print_schedule(&file, anchor, &config),
        Command::Serve => serve(config).await,
    }
}

fn load_config(path: Option<&Path>) -> anyhow::Result<ConfigLoader> {
    match path {
        Some(path) => Ok(ConfigLoader::load(path)?),
        None if Path::new(DEFAULT_CONFIG).exists() => Ok(ConfigLoader::load(DEFAULT_CONFIG)?),
        None => Ok(ConfigLoader::default()),
    }
}

fn read_payslip(path: &Path, header_only: bool) -> anyhow::Result<PayslipDocument> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    Ok(parse_payslip_text(&path.display().to_string(), &text, header_only)?)
}

fn print_payslips(files: &[PathBuf], csv: bool, dump: bool) -> anyhow::Result<()> {
    let mut table = SummaryTable::new();
    let mut failed = 0;

    if csv {
        println!("{}", csv_header());
    }

    for path in files {
        let document = match read_payslip(path, false) {
            Ok(document) => document,
            Err(err) => {
                error!(file = %path.display(), error = %err, "Skipping payslip");
                failed += 1;
                continue;
            }
        };

        if dump {
            println!("{}", serde_json::to_string_pretty(&document)?);
        }

        let Some(row) = SummaryRow::from_document(&document) else {
            continue;
        };
        if csv {
            println!("{}", row.to_csv());
        } else {
            table.push(&row);
        }
    }

    if !csv {
        print!("{}", table.finish());
    }
    finish_batch("print", files.len(), failed)
}

fn archive_payslips(files: &[PathBuf], config: &ConfigLoader) -> anyhow::Result<()> {
    let mut failed = 0;

    for path in files {
        let result = read_payslip(path, true).and_then(|document| {
            Ok(archive_document(
                path,
                document.pay_period.payment_date,
                config.archive(),
            )?)
        });
        match result {
            Ok(target) => {
                info!(file = %path.display(), archived = %target.display(), "Archived payslip");
                println!("{}", target.display());
            }
            Err(err) => {
                error!(file = %path.display(), error = %err, "Skipping payslip");
                failed += 1;
            }
        }
    }

    finish_batch("archive", files.len(), failed)
}

fn print_schedule(file: &Path, anchor: NaiveDate, config: &ConfigLoader) -> anyhow::Result<()> {
    let text = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let tokens = text.lines().map(str::trim).filter(|line| !line.is_empty());
    let shifts = parse_schedule(tokens, anchor)?;

    info!(file = %file.display(), shifts = shifts.len(), "Parsed schedule");
    for shift in &shifts {
        println!("{}", shell_join(&calendar_command(shift, config.calendar())));
    }
    Ok(())
}

async fn serve(config: ConfigLoader) -> anyhow::Result<()> {
    let address = config.server().bind_address();
    let app = create_router(AppState::new(config));

    let listener = tokio::net::TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {address}"))?;
    info!("Server listening on http://{}", address);

    axum::serve(listener, app).await?;
    Ok(())
}

fn finish_batch(command: &str, total: usize, failed: usize) -> anyhow::Result<()> {
    if failed > 0 {
        bail!("{command}: {failed} of {total} payslips failed");
    }
    Ok(())
}
