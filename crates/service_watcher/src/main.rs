//! Fleet generation report processor.
//!
//! # Commands
//!
//! - `fleet-report watch` (default) - process reports as they land in the input folder
//! - `fleet-report process --file <path>` - process a single report and exit

use std::path::PathBuf;
use std::str::FromStr;
use std::sync::Arc;

use anyhow::Context;
use clap::{Parser, Subcommand};
use infra_config::{build_config, AppConfig, CliOverrides, LogLevel};
use service_watcher::{process_with_timeout, run_workers, FolderWatcher, ReportProcessor};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Fleet generation report processor
#[derive(Parser, Debug)]
#[command(name = "fleet-report")]
#[command(version, about, long_about = None)]
struct Cli {
    /// Configuration file path (TOML format)
    #[arg(short, long, global = true, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Folder watched for generation reports
    #[arg(long, global = true, value_name = "DIR")]
    input_folder: Option<PathBuf>,

    /// Folder the output document is written to
    #[arg(long, global = true, value_name = "DIR")]
    output_folder: Option<PathBuf>,

    /// Reference factor XML file
    #[arg(long, global = true, value_name = "FILE")]
    reference_data: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    log_level: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Watch the input folder until Ctrl-C
    Watch,

    /// Process one report file and exit
    Process {
        /// Generation report to process
        #[arg(short, long)]
        file: PathBuf,
    },
}

impl Cli {
    fn overrides(&self) -> anyhow::Result<CliOverrides> {
        let log_level = self
            .log_level
            .as_deref()
            .map(LogLevel::from_str)
            .transpose()?;

        Ok(CliOverrides {
            config_file: self.config.clone(),
            input_folder: self.input_folder.clone(),
            output_folder: self.output_folder.clone(),
            reference_data_path: self.reference_data.clone(),
            log_level,
        })
    }
}

fn init_tracing(log_level: &str) {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(log_level)),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.overrides()?).context("Failed to load configuration")?;

    init_tracing(config.log_level.as_filter_str());

    info!("Fleet report processor v{}", service_watcher::VERSION);
    info!(
        input_folder = %config.input_folder.display(),
        output = %config.output_path().display(),
        reference_data = %config.reference_data_path.display(),
        file_filter = %config.file_filter,
        workers = config.worker_count,
        log_level = %config.log_level,
        "Configuration loaded"
    );

    let processor = Arc::new(
        ReportProcessor::from_config(&config).context("Failed to load reference data")?,
    );

    match cli.command.unwrap_or(Commands::Watch) {
        Commands::Watch => watch(&config, processor).await,
        Commands::Process { file } => {
            let outcome = process_with_timeout(processor, file, config.processing_timeout()).await?;
            info!(?outcome, "Report processed");
            Ok(())
        }
    }
}

async fn watch(config: &AppConfig, processor: Arc<ReportProcessor>) -> anyhow::Result<()> {
    let watcher = FolderWatcher::from_config(config)?;
    let receiver = watcher.start().await?;

    let workers = tokio::spawn(run_workers(
        receiver,
        processor,
        config.worker_count,
        config.processing_timeout(),
    ));

    info!("Waiting for reports. Press Ctrl-C to stop.");
    tokio::signal::ctrl_c().await?;
    info!("Shutdown requested");

    watcher.stop();
    let summary = workers.await?;
    info!(handled = summary.total(), "Processor stopped");
    Ok(())
}
