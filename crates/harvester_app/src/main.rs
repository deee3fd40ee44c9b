mod cli;
mod config;

use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use engine_logging::{engine_info, engine_warn, LogDestination, DEFAULT_LOG_FILE};
use harvester_core::HarvestResult;
use harvester_engine::{
    write_export, HttpPageAutomation, HttpSettings, LogProgressSink, Orchestrator,
};
use log::LevelFilter;
use tokio_util::sync::CancellationToken;

use crate::cli::Args;

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    let level = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let log_file = args
        .log_file
        .clone()
        .unwrap_or_else(|| PathBuf::from(DEFAULT_LOG_FILE));
    engine_logging::initialize(LogDestination::Both(log_file), level);

    let settings = config::load_settings(args.config.as_deref())?;
    let desired = usize::try_from(args.count)
        .ok()
        .and_then(NonZeroUsize::new)
        .context("--count must be a positive number")?;

    let automation = Arc::new(
        HttpPageAutomation::new(HttpSettings::default()).context("building HTTP client")?,
    );
    automation
        .open(&args.address)
        .await
        .with_context(|| format!("opening {}", args.address))?;

    let cancel = CancellationToken::new();
    let orchestrator = Orchestrator::new(automation, &settings)
        .context("compiling feed selectors")?
        .with_progress(Arc::new(LogProgressSink))
        .with_cancellation(cancel.clone());

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            engine_warn!("Interrupt received; finishing with what was collected");
            cancel.cancel();
        }
    });

    let result: HarvestResult = orchestrator.run(desired).await?;
    let path = write_export(&args.output, &result, &args.address)
        .with_context(|| format!("writing export to {:?}", args.output))?;

    engine_info!("Wrote {} items to {:?}", result.total_items(), path);
    println!("{}", path.display());
    Ok(())
}
