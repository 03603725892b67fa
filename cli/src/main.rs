//! CLI entrypoint for ociops
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use ociops_application::ports::cloud::ClientFactoryPort;
use ociops_application::ports::confirmation::{AutoReject, ConfirmationPort};
use ociops_application::AgentSession;
use ociops_infrastructure::{
    AnthropicRuntime, ConfigLoader, ConfigOverrides, FileConfig, JsonSchemaToolConverter,
    OciClientFactory, default_registry,
};
use ociops_presentation::{Cli, ConsoleNarrator, InteractiveConfirmation};
use std::io::IsTerminal;
use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::time::Duration;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::prelude::*;

const EXIT_INTERRUPTED: u8 = 130;

fn main() -> ExitCode {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources(cli.config.as_deref());
        return ExitCode::SUCCESS;
    }

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            eprintln!("Error: failed to start async runtime: {e}");
            return ExitCode::FAILURE;
        }
    };

    let code = runtime.block_on(async {
        match run(cli).await {
            Ok(code) => code,
            Err(e) => {
                eprintln!("Error: {e:#}");
                ExitCode::FAILURE
            }
        }
    });

    // A pending confirmation prompt may still hold a blocking stdin read.
    runtime.shutdown_timeout(Duration::from_millis(200));
    code
}

async fn run(cli: Cli) -> Result<ExitCode> {
    let config = ConfigLoader::load(cli.config.as_deref())
        .context("Failed to load configuration")?
        .apply_overrides(&ConfigOverrides {
            profile: cli.profile.clone(),
            model: cli.model.clone(),
            confirm_mutations: cli.confirm_mutations,
        });

    let _guard = init_tracing(cli.verbose, &config)?;

    let Some(query) = cli.query else {
        bail!("--query is required");
    };

    info!(profile = %config.oci.profile, model = %config.model.name, "Starting ociops");

    // === Dependency Injection ===
    // Credentials are resolved before any client exists
    let factory = OciClientFactory::new(config.oci.to_settings())
        .with_context(|| format!("OCI CLI '{}' not found on PATH", config.oci.cli_path))?;
    let context = factory
        .resolve()
        .context("Failed to resolve OCI credentials")?;
    info!(profile = %context.profile, region = %context.region, "Credentials resolved");
    let clients = factory
        .clients()
        .context("Failed to construct cloud clients")?;

    let params = config.agent.to_execution_params();
    let narrator = Arc::new(ConsoleNarrator::new(!cli.no_tool_activity));

    let confirmation: Arc<dyn ConfirmationPort> = if std::io::stdin().is_terminal() {
        Arc::new(InteractiveConfirmation::new(narrator.activity()))
    } else {
        if config.agent.confirm_mutations {
            warn!("stdin is not a terminal; mutating tools will be declined");
        }
        Arc::new(AutoReject)
    };

    let registry = default_registry(&clients, &params)
        .with_confirmation(confirmation, params.confirmation)
        .build()
        .context("Failed to assemble tool registry")?;
    info!(providers = ?registry.provider_ids(), "Tool registry ready");

    let anthropic = config
        .anthropic_config(|name| std::env::var(name).ok())
        .context("Failed to configure the reasoning runtime")?;
    let runtime = AnthropicRuntime::new(anthropic).context("Failed to create Anthropic client")?;
    info!(model = runtime.model(), "Reasoning runtime ready");

    let session = AgentSession::new(
        Arc::new(runtime),
        Arc::new(registry),
        Arc::new(JsonSchemaToolConverter),
        params,
    );

    // Dropping the session closes the model stream
    let outcome = tokio::select! {
        outcome = session.run(&query, narrator.as_ref()) => outcome.context("Session failed")?,
        _ = tokio::signal::ctrl_c() => {
            eprintln!("\nInterrupted");
            return Ok(ExitCode::from(EXIT_INTERRUPTED));
        }
    };

    info!(
        turns = outcome.num_turns,
        success = outcome.is_success(),
        "Session finished"
    );

    Ok(if outcome.is_success() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    })
}

/// Stderr logging by verbosity (or `RUST_LOG`), plus the optional log file.
fn init_tracing(verbose: u8, config: &FileConfig) -> Result<Option<WorkerGuard>> {
    let filter = || {
        if std::env::var_os("RUST_LOG").is_some() {
            EnvFilter::from_default_env()
        } else {
            match verbose {
                0 => EnvFilter::new("warn"),
                1 => EnvFilter::new("info"),
                2 => EnvFilter::new("debug"),
                _ => EnvFilter::new("trace"), // -vvv or more
            }
        }
    };

    let stderr_layer = tracing_subscriber::fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(false)
        .with_filter(filter());

    let (file_layer, guard) = match config.logging.file_path() {
        Some(path) => {
            let (writer, guard) = file_writer(&path)?;
            let layer = tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_filter(filter());
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(stderr_layer)
        .with(file_layer)
        .init();

    Ok(guard)
}

fn file_writer(path: &Path) -> Result<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    let dir = path
        .parent()
        .filter(|d| !d.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    let Some(file_name) = path.file_name() else {
        bail!("Log file path has no file name: {}", path.display());
    };
    std::fs::create_dir_all(dir)
        .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

    let appender = tracing_appender::rolling::never(dir, file_name);
    Ok(tracing_appender::non_blocking(appender))
}
