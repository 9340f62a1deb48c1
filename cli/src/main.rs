//! CLI entrypoint for seismic-chat
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, anyhow, bail};
use clap::Parser;
use seismic_application::{ChatSession, ProcessTurnUseCase};
use seismic_infrastructure::{
    ConfigLoader, FigureRenderer, JsonlConversationLogger, SvgFigureRenderer, default_registry,
};
use seismic_presentation::{
    ChatRepl, Cli, ConsoleFormatter, OutputConfig, OutputFormat, ReplConfig,
};
use std::path::Path;
use std::sync::Arc;
use tracing::{info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::fmt;
use tracing_subscriber::prelude::*;

fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())
            .map_err(|e| anyhow!("Failed to load configuration: {}", e))?
    };
    if let Some(dir) = &cli.artifact_dir {
        config.artifacts.dir = dir.display().to_string();
    }
    config.validate().context("Invalid configuration")?;

    // Keep the guard alive so buffered file logs are flushed on exit
    let _log_guard = init_logging(cli.verbose, config.logging.file.as_deref())?;
    ConsoleFormatter::set_color(config.output.color);

    info!("Starting seismic-chat");

    // === Dependency Injection ===
    let renderer: Arc<dyn FigureRenderer> =
        Arc::new(SvgFigureRenderer::new(&config.artifacts.dir));
    let registry = default_registry(renderer);
    registry.validate()?;

    if cli.list_tools {
        println!("{}", ConsoleFormatter::format_tools(&registry));
        return Ok(());
    }

    let mut use_case = ProcessTurnUseCase::new(Arc::new(registry));
    if let Some(path) = &config.logging.transcript {
        match JsonlConversationLogger::new(path) {
            Some(logger) => {
                info!("Writing conversation transcript to {}", logger.path().display());
                use_case = use_case.with_conversation_logger(Arc::new(logger));
            }
            None => warn!("Conversation transcript disabled"),
        }
    }
    let mut session = ChatSession::new(Arc::new(use_case));

    let output_config = OutputConfig {
        color: config.output.color,
        format: Some(cli.output),
    };

    // Chat mode
    if cli.chat {
        let repl_config = ReplConfig {
            show_welcome: config.repl.show_welcome && !cli.quiet,
            history_file: config.repl.history_file.clone(),
        };
        ChatRepl::new(session)
            .with_repl_config(repl_config)
            .with_output_config(output_config)
            .run()?;
        return Ok(());
    }

    // Single message mode - message is required
    let message = match cli.message {
        Some(m) => m,
        None => bail!("A message is required. Use --chat for interactive mode."),
    };

    let reply = session.send(&message);
    let output = match cli.output {
        OutputFormat::Text => ConsoleFormatter::format_reply(&reply),
        OutputFormat::Json => ConsoleFormatter::format_json(&reply),
    };
    println!("{}", output);

    Ok(())
}

/// Initialize logging based on verbosity level, optionally teeing to a file
fn init_logging(verbose: u8, file: Option<&str>) -> Result<Option<WorkerGuard>> {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace", // -vvv or more
    };

    let (file_layer, guard) = match file {
        Some(path) => {
            let path = Path::new(path);
            let dir = path
                .parent()
                .filter(|p| !p.as_os_str().is_empty())
                .unwrap_or(Path::new("."));
            let name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            std::fs::create_dir_all(dir)
                .with_context(|| format!("Failed to create log directory {}", dir.display()))?;

            let (writer, guard) =
                tracing_appender::non_blocking(tracing_appender::rolling::never(dir, name));
            let layer = fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .with_target(false);
            (Some(layer), Some(guard))
        }
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(EnvFilter::new(level))
        .with(
            fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .with(file_layer)
        .init();

    Ok(guard)
}
