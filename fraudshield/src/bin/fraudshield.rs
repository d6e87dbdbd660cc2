// ─────────────────────────────────────────────────────────────────────────────
//  FraudShield: Transaction Graph Analyzer
//
//  Reads a CSV of bank transactions, builds the sender → receiver graph and
//  flags the accounts whose outgoing volume sits in the top 5%.
//
//  The web dashboard lives in `fraudshield-web`; this binary is the offline
//  counterpart for scripts and one-off reports.
// ─────────────────────────────────────────────────────────────────────────────
use std::process::ExitCode;

use clap::Parser;
use fraudshield::cli::Cli;
use fraudshield::cli::error_message;
use fraudshield::cli::run;
use fraudshield::tracing::setup_tracing_from;
use tracing::warn;

fn main() -> ExitCode {
    let cli = Cli::parse();
    let _tracing = setup_tracing_from("fraudshield", &cli.config);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            let message = error_message(&e);
            warn!("cli::failed::{}", message);
            eprintln!("Error: {}", message);
            ExitCode::FAILURE
        },
    }
}
