use std::io::{self, Write};
use std::process::ExitCode;

use airswap_lib::prelude::*;
use airswap_lib::session;
use anyhow::{Context, Result};
use clap::Parser;
use dotenv::dotenv;
use tracing::{error, info};

mod config;
mod logging;

use config::{Cli, Config};

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    dotenv().ok();
    let cli = Cli::parse();
    logging::setup_tracing(cli.verbose);
    exit_code(run(cli).await)
}

/// Findings never change the exit status; only errors that stop the report do.
fn exit_code(result: Result<()>) -> ExitCode {
    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            error!("{e:#}");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = Config::from_cli(cli).context("invalid arguments")?;
    let reasons = match &config.reasons {
        Some(path) => ReasonTable::from_path(path)?,
        None => ReasonTable::builtin()?,
    };
    info!(network = %config.request.network, reasons = reasons.len(), "starting");

    let reader = RpcChainReader::connect(&config.node_url).await?;
    let printer = ReportPrinter::new(config.verbose, Some(reasons));
    report(&config.request, &printer, &reader, &mut io::stdout().lock()).await
}

/// Nothing is written unless the session produced an outcome.
async fn report<W: Write>(
    request: &DebugRequest,
    printer: &ReportPrinter,
    reader: &dyn ChainReader,
    out: &mut W,
) -> Result<()> {
    let outcome = session::run(reader, request, unix_now()).await?;
    printer.write_report(out, &outcome)?;
    out.flush()?;
    Ok(())
}
