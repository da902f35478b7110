use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use chrono::{DateTime, Local};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use inquiry_core::record::RecordFile;
use inquiry_core::{format_report, InquiryConfig};

/// inquiry: ASA sales inquiry intake.
///
/// Collects a customer's sales inquiry in a terminal form, then formats it
/// into a plain-text technical summary that can be copied to the clipboard
/// or saved as a text file for the technical department.
#[derive(Parser, Debug)]
#[command(name = "inquiry", version, about)]
struct Cli {
    /// Directory downloaded summaries are written to (overrides the config file).
    #[arg(long, global = true)]
    download_dir: Option<PathBuf>,

    /// Increase logging verbosity (-v, -vv, -vvv).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Format a saved inquiry record (JSON, or TOML by extension) without the TUI.
    Render {
        /// Record file with the inquiry's camelCase fields.
        file: PathBuf,

        /// Inquiry ID to stamp when the record has none.
        #[arg(long)]
        id: Option<String>,

        /// Submission date text to stamp when the record has none.
        #[arg(long)]
        submitted: Option<String>,

        /// Write the summary here instead of stdout.
        #[arg(short, long)]
        out: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };

    match &cli.command {
        // Headless: log to stderr so stdout carries only the summary.
        Some(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::io::stderr)
                .init();
        }
        None => init_file_logging(filter),
    }

    // Load config.
    let mut config = InquiryConfig::load().unwrap_or_else(|e| {
        eprintln!("Warning: Failed to load config: {}. Using defaults.", e);
        InquiryConfig::default()
    });
    if let Some(dir) = cli.download_dir.clone() {
        config.export.download_dir = dir;
    }

    tracing::info!("Starting inquiry v{}", env!("CARGO_PKG_VERSION"));

    match cli.command {
        Some(Command::Render {
            file,
            id,
            submitted,
            out,
        }) => render(&config, file, id, submitted, out)?,
        None => {
            let mut app = inquiry_tui::App::new(config);
            app.run().await?;
        }
    }

    tracing::info!("inquiry exited cleanly");
    Ok(())
}

/// Log to a file to avoid corrupting the TUI output. If the log file can't be
/// opened, silently discard logs rather than polluting the alternate screen.
fn init_file_logging(filter: &str) {
    let log_dir = dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("inquiry");
    let _ = std::fs::create_dir_all(&log_dir);
    let log_path = log_dir.join("inquiry.log");
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path);

    match log_file {
        Ok(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(
                    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)),
                )
                .with_writer(std::sync::Mutex::new(file))
                .with_ansi(false)
                .init();
        }
        Err(_) => {
            tracing_subscriber::fmt()
                .with_env_filter(EnvFilter::new("off"))
                .with_writer(std::io::sink)
                .init();
        }
    }
}

/// Stamp a record file and print or save its summary.
fn render(
    config: &InquiryConfig,
    file: PathBuf,
    id: Option<String>,
    submitted: Option<String>,
    out: Option<PathBuf>,
) -> Result<()> {
    let (inquiry_id, report) = render_file(config, &file, id, submitted, Local::now())?;

    match out {
        Some(path) => {
            std::fs::write(&path, &report)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!(path = %path.display(), inquiry_id = %inquiry_id, "Summary written");
        }
        None => println!("{report}"),
    }
    Ok(())
}

/// Load and stamp a record file, returning its inquiry ID and summary text.
fn render_file(
    config: &InquiryConfig,
    file: &Path,
    id: Option<String>,
    submitted: Option<String>,
    now: DateTime<Local>,
) -> Result<(String, String)> {
    let record = RecordFile::load(file)
        .with_context(|| format!("Failed to read record {}", file.display()))?
        .into_record(id, submitted, config, now);
    let report = format_report(&record);
    Ok((record.inquiry_id, report))
}
