use std::io::{self, Write};

use anyhow::Context;
use clap::Parser;
use retail_directory::cli::Cli;
use retail_directory::config::Config;
use retail_directory::directory::render_page;
use retail_directory::logging::init_logging;
use retail_directory::shutdown::{ShutdownCoordinator, ShutdownHandle};
use retail_directory::source::{LoadError, LoadReport, RetailerSource};
use retail_directory::ui::{self, Startup};

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => Config::load_from(path)
            .with_context(|| format!("Failed to load config from {}", path.display()))?,
        None => Config::load().context("Failed to load config")?,
    };
    cli.apply_overrides(&mut config);
    config.validate().context("Invalid configuration")?;

    let log_path = init_logging(&config.logging).context("Failed to open log file")?;
    tracing::info!(
        version = env!("CARGO_PKG_VERSION"),
        log = %log_path.display(),
        source = %config.source.location,
        "Starting retail directory"
    );

    let coordinator = ShutdownCoordinator::new();
    coordinator
        .register_signals()
        .context("Failed to register signal handlers")?;
    let shutdown = coordinator.handle();

    let source = RetailerSource::from_config(&config.source);
    let Some(loaded) = fetch_retailers(&source, &shutdown)? else {
        return Ok(());
    };

    if cli.dump {
        let report = loaded.with_context(|| format!("Failed to load {}", source.location()))?;
        return dump_first_page(&report, config.directory.page_size);
    }

    let startup = match loaded {
        Ok(report) => Startup::Loaded(report.retailers),
        Err(err) => {
            tracing::error!(error = %err, source = %source.location(), "Failed to load retailers");
            Startup::Failed(err.to_string())
        }
    };
    ui::run(&config, startup, shutdown).context("Terminal UI failed")?;
    tracing::info!("Exited cleanly");
    Ok(())
}

/// Runs the one-off startup fetch. `None` when a shutdown signal abandoned it.
fn fetch_retailers(
    source: &RetailerSource,
    shutdown: &ShutdownHandle,
) -> anyhow::Result<Option<Result<LoadReport, LoadError>>> {
    let runtime = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(1)
        .enable_all()
        .build()
        .context("Failed to start async runtime")?;

    Ok(runtime.block_on(async {
        tokio::select! {
            result = source.load() => Some(result),
            _ = shutdown.wait() => {
                tracing::info!("Shutdown requested while loading retailers");
                None
            }
        }
    }))
}

fn dump_first_page(report: &LoadReport, page_size: usize) -> anyhow::Result<()> {
    let end = page_size.min(report.retailers.len());
    let fragment = render_page(&report.retailers[..end], 0);
    let mut stdout = io::stdout().lock();
    serde_json::to_writer_pretty(&mut stdout, &fragment).context("Failed to write JSON")?;
    writeln!(stdout)?;
    Ok(())
}
