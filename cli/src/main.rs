//! CLI entrypoint for roundtable
//!
//! This is the main binary that wires together all layers using
//! dependency injection.

use anyhow::{Context, Result, bail};
use clap::Parser;
use roundtable_application::{
    BroadcastHub, ChannelObserver, CommandProcessor, ConferenceOrchestrator, ConferenceStore,
    ProgressionMode,
};
use roundtable_domain::{ConferenceCommand, ConferenceEvent, Stage};
use roundtable_infrastructure::{
    ConferenceFile, ConfigIssue, ConfigLoader, JsonlTranscriptLogger, SelectedGenerator,
};
use roundtable_presentation::{
    Cli, ConsoleFormatter, ConsoleObserver, JsonFormatter, OutputConfig, OutputFormat,
    OutputFormatter,
};
use std::sync::Arc;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;
use tracing::{error, info, warn};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    if cli.show_config {
        ConfigLoader::print_config_sources();
        return Ok(());
    }

    let _guard = init_tracing(&cli)?;

    info!("Starting roundtable");

    // === Configuration ===
    let mut config = if cli.no_config {
        ConfigLoader::load_defaults()
    } else {
        ConfigLoader::load(cli.config.as_ref())?
    };

    let issues = config.validate();
    for issue in &issues {
        if issue.is_error() {
            error!("{}", issue);
        } else {
            warn!("{}", issue);
        }
    }
    if ConfigIssue::has_errors(&issues) {
        bail!("Configuration has errors; fix them or run with --no-config");
    }

    if cli.manual {
        config.conference.progression = ProgressionMode::Manual.as_str().to_string();
    }
    if cli.offline {
        config.generation.provider = "offline".to_string();
    }

    let output = OutputConfig {
        json: config.output.json,
        color: config.output.color,
    };
    output.apply_color();

    let Some(conference_path) = cli.conference.as_ref() else {
        bail!("A conference file is required");
    };
    let mut conference_file = ConferenceFile::load(conference_path)?;
    if let Some(rounds) = cli.rounds {
        conference_file.rounds = Some(rounds);
    }

    // === Dependency Injection ===
    let generator = Arc::new(SelectedGenerator::from_config(&config.generation));
    info!("Using the {} generator", generator.kind());

    // Observers join before the conference starts, so creation never starts it.
    let settings = config.to_settings().with_auto_start(false);
    let progression = settings.progression;
    let orchestrator = ConferenceOrchestrator::new(
        Arc::new(ConferenceStore::new()),
        Arc::new(BroadcastHub::new()),
        generator,
        settings,
    );

    let conference_id = orchestrator
        .create(conference_file.into_config(&config.conference))
        .await
        .context("Could not create the conference")?;

    let delivery_timeout = config.observers.delivery_timeout();
    let (watcher, mut events) = ChannelObserver::new("cli-watcher", delivery_timeout);
    orchestrator
        .hub()
        .subscribe(
            &*orchestrator.store().handle(&conference_id).await?,
            Arc::new(watcher),
        )
        .await?;

    if let Some(path) = cli
        .transcript
        .clone()
        .or_else(|| config.observers.transcript_log.clone())
    {
        match JsonlTranscriptLogger::new(&path, &conference_id) {
            Some(logger) => {
                orchestrator
                    .hub()
                    .subscribe(
                        &*orchestrator.store().handle(&conference_id).await?,
                        Arc::new(logger),
                    )
                    .await?;
                info!("Writing transcript to {}", path.display());
            }
            None => warn!("Transcript logging disabled"),
        }
    }

    let formatter: Box<dyn OutputFormatter> = match output.format(cli.output) {
        OutputFormat::Text => Box::new(ConsoleFormatter),
        OutputFormat::Json => Box::new(JsonFormatter),
    };
    // The first subscriber starts a waiting conference.
    orchestrator
        .subscribe(&conference_id, Arc::new(ConsoleObserver::stdout(formatter)))
        .await?;
    orchestrator.ensure_started(&conference_id).await?;

    if progression == ProgressionMode::Manual {
        eprintln!("Manual progression: type `next` to start each round, `end` to conclude.");
    }

    let (commands, worker) = CommandProcessor::spawn(orchestrator.clone());
    let (lines_tx, mut lines) = mpsc::unbounded_channel();
    tokio::spawn(read_stdin(lines_tx));

    let mut stdin_open = true;
    loop {
        tokio::select! {
            event = events.recv() => match event {
                Some(ConferenceEvent::StageChanged { stage: Stage::Ended }) | None => break,
                Some(_) => {}
            },
            line = lines.recv(), if stdin_open => match line {
                Some(line) => handle_line(&orchestrator, &commands, &conference_id, &line).await,
                // keep running until the conference ends
                None => stdin_open = false,
            },
            _ = tokio::signal::ctrl_c() => {
                info!("Interrupted, ending the conference");
                commands.submit_command(&conference_id, ConferenceCommand::EndConference);
            }
        }
    }

    orchestrator.hub().disconnect_all(&conference_id).await;
    drop(commands);
    if let Err(e) = worker.await {
        warn!("Command worker stopped abnormally: {}", e);
    }

    Ok(())
}

/// Forward stdin lines until EOF.
async fn read_stdin(sender: mpsc::UnboundedSender<String>) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Ok(Some(line)) = lines.next_line().await {
        if sender.send(line).is_err() {
            break;
        }
    }
}

async fn handle_line(
    orchestrator: &ConferenceOrchestrator<SelectedGenerator>,
    commands: &CommandProcessor,
    conference_id: &str,
    line: &str,
) {
    let line = line.trim();
    match line {
        "" => {}
        "next" => {
            commands.submit_command(conference_id, ConferenceCommand::NextRound);
        }
        "end" => {
            commands.submit_command(conference_id, ConferenceCommand::EndConference);
        }
        "status" => match orchestrator.store().get(conference_id).await {
            Ok(snapshot) => eprintln!(
                "{} | round {}/{} | {} messages",
                snapshot.stage.display_name(),
                snapshot.current_round,
                snapshot.rounds_total,
                snapshot.transcript.len()
            ),
            Err(e) => eprintln!("{}", e),
        },
        raw if raw.starts_with('{') => {
            commands.submit(conference_id, raw);
        }
        other => eprintln!("Unknown command '{}' (try next, end, status)", other),
    }
}

/// Initialize logging based on verbosity level; `RUST_LOG` wins when set.
fn init_tracing(cli: &Cli) -> Result<Option<WorkerGuard>> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| match cli.verbose {
        0 => EnvFilter::new("warn"),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"), // -vvv or more
    });

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false);

    match &cli.log_file {
        Some(path) => {
            let file = std::fs::File::create(path)
                .with_context(|| format!("Could not create log file {}", path.display()))?;
            let (writer, guard) = tracing_appender::non_blocking(file);
            builder.with_writer(writer).with_ansi(false).init();
            Ok(Some(guard))
        }
        None => {
            builder.with_writer(std::io::stderr).init();
            Ok(None)
        }
    }
}
