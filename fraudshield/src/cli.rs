use std::fs::File;
use std::io::BufReader;
use std::io::Write;
use std::path::Path;
use std::path::PathBuf;

use clap::Parser;
use clap::Subcommand;
use tracing::info;
use tracing::warn;

use crate::analysis::AnalysisResult;
use crate::analysis::analyze;
use crate::config::Config;
use crate::config::load_config;
use crate::err_with_loc;
use crate::error::Context;
use crate::error::Error;
use crate::error::LoadError;
use crate::error::Result;
use crate::render::DashboardPage;
use crate::render::format_currency;

#[derive(Debug, Parser)]
#[command(name = "fraudshield", version, about = "Graph-based banking fraud detection")]
pub struct Cli {
    /// Engine configuration; defaults are used when the file does not exist
    #[arg(long, global = true, default_value = "Config.toml")]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Analyze a transaction CSV and report suspicious accounts
    Analyze {
        /// CSV file with sender, receiver and amount columns
        file: PathBuf,

        /// Print the full analysis as JSON instead of a text summary
        #[arg(long)]
        json: bool,

        /// Also write the dashboard page to this path
        #[arg(long, value_name = "PATH")]
        html: Option<PathBuf>,
    },
}

pub fn run(cli: Cli) -> Result<()> {
    let config = resolve_config(&cli.config)?;

    match cli.command {
        Command::Analyze { file, json, html } => {
            let reader = File::open(&file).with_context(|| format!("failed to open {}", file.display()))?;
            let result = analyze(BufReader::new(reader))?;
            info!("cli::analyzed::{}", file.display());

            let mut stdout = std::io::stdout().lock();
            if json {
                serde_json::to_writer_pretty(&mut stdout, &result)?;
                writeln!(stdout)?;
            } else {
                write_summary(&mut stdout, &result)?;
            }

            if let Some(path) = html {
                let page = DashboardPage::new(&config.render, None).analysis(&result).map_err(|e| err_with_loc!(e))?;
                std::fs::write(&path, page).with_context(|| format!("failed to write {}", path.display()))?;
                info!("cli::dashboard_written::{}", path.display());
            }
        },
    }

    Ok(())
}

/// What the user sees when `run` fails. Input problems are reported by their
/// message alone; anything else keeps its context chain.
pub fn error_message(err: &Error) -> String {
    match err.downcast_ref::<LoadError>() {
        Some(load_error) => load_error.to_string(),
        None => format!("{:#}", err),
    }
}

fn resolve_config(path: &Path) -> Result<Config> {
    if !path.exists() {
        warn!("cli::config_not_found::{}::using_defaults", path.display());
        return Ok(Config::default());
    }
    Ok(load_config(path)?)
}

pub fn write_summary(
    out: &mut impl Write,
    result: &AnalysisResult,
) -> std::io::Result<()> {
    let stats = &result.statistics;
    writeln!(out, "Total transactions: {}", stats.total_transactions)?;
    writeln!(out, "Total amount:       {}", format_currency(stats.total_amount))?;
    writeln!(out, "Unique senders:     {}", stats.unique_senders)?;
    writeln!(out, "Unique receivers:   {}", stats.unique_receivers)?;

    match result.report.threshold {
        Some(threshold) => writeln!(
            out,
            "Threshold (p95):    {} ({} of {} accounts flagged)",
            format_currency(threshold),
            result.report.flagged.len(),
            result.report.outgoing.len()
        )?,
        None => writeln!(out, "Threshold (p95):    n/a (no accounts)")?,
    }

    if result.top_suspicious.is_empty() {
        return Ok(());
    }

    writeln!(out)?;
    writeln!(out, "Top suspicious accounts:")?;
    for entry in &result.top_suspicious {
        writeln!(out, "  {:<24} {}", entry.account, format_currency(entry.total_outgoing))?;
    }
    Ok(())
}
