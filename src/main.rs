//! Binary entrypoint for the slideshow demo.
//!
//! Delegates all logic to the library crate; no local modules here.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{ArgAction, Parser};
use photo_slideshow::catalog::Catalog;
use photo_slideshow::config::Configuration;
use photo_slideshow::events::{Command, EngineEvent};
use photo_slideshow::manifest::{self, ManifestEntry};
use photo_slideshow::render::TracingSink;
use photo_slideshow::source::FsImageSource;
use photo_slideshow::tasks::engine;
use tokio::sync::mpsc;
use tokio_util::sync::CancellationToken;
use tracing::{Level, debug, info};
use tracing_subscriber::{EnvFilter, fmt};

/// Simple CLI
#[derive(Debug, Parser)]
#[command(name = "photo-slideshow", about = "Slideshow playback engine")]
struct Cli {
    /// Path to YAML config file; built-in defaults apply when omitted
    #[arg(short, long, value_name = "FILE")]
    config: Option<PathBuf>,

    /// Path to the JSON image manifest
    #[arg(short, long, value_name = "FILE", default_value = "images.json")]
    manifest: PathBuf,

    /// Override per-image duration (seconds)
    #[arg(long, value_name = "SECS")]
    duration_secs: Option<u64>,

    /// Start with shuffled ordering
    #[arg(long)]
    randomize: bool,

    /// Increase log verbosity (repeatable)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count)]
    verbose: u8,
}

fn init_tracing(verbosity: u8) -> Result<()> {
    // map -v to log level
    let level = match verbosity {
        0 => Level::INFO,
        1 => Level::DEBUG,
        _ => Level::TRACE,
    };
    let filter = EnvFilter::from_default_env()
        .add_directive(format!("photo_slideshow={}", level).parse()?);
    fmt().with_env_filter(filter).with_target(true).init();
    Ok(())
}

/// Built-in slides shown when the manifest lists nothing.
fn fallback_listing() -> Vec<ManifestEntry> {
    (1..=3)
        .map(|n| ManifestEntry {
            name: format!("sample-{n}.svg"),
            url: format!(
                "data:image/svg+xml;utf8,<svg xmlns='http://www.w3.org/2000/svg' \
                 width='1280' height='720'><rect width='100%25' height='100%25' \
                 fill='%23334455'/><text x='50%25' y='50%25' fill='white' \
                 font-family='sans-serif' font-size='60' \
                 text-anchor='middle'>Sample slide {n}</text></svg>"
            ),
        })
        .collect()
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose)?;

    let mut cfg = match &cli.config {
        Some(path) => Configuration::from_yaml_file(path)
            .with_context(|| format!("loading config from {}", path.display()))?,
        None => Configuration::default(),
    };
    if let Some(secs) = cli.duration_secs {
        cfg.default_duration_secs = secs;
    }
    if cli.randomize {
        cfg.default_randomize = true;
    }
    let cfg = cfg.validated().context("validating configuration")?;

    let listing = manifest::from_json_file(&cli.manifest)
        .with_context(|| format!("loading manifest from {}", cli.manifest.display()))?;
    let listing = manifest::or_fallback(listing, &fallback_listing());
    let catalog = Catalog::load(listing);
    info!(count = catalog.len(), "catalog loaded");

    // Relative manifest URLs resolve next to the manifest itself.
    let root = cli
        .manifest
        .parent()
        .map(PathBuf::from)
        .unwrap_or_default();

    let (command_tx, command_rx) = mpsc::channel::<Command>(16);
    let (event_tx, mut event_rx) = mpsc::channel::<EngineEvent>(32);
    let cancel = CancellationToken::new();

    let engine = tokio::spawn(engine::run(
        catalog,
        cfg,
        Arc::new(FsImageSource::new(root)),
        Arc::new(TracingSink),
        command_rx,
        event_tx,
        cancel.clone(),
    ));

    command_tx
        .send(Command::Enter)
        .await
        .context("engine task quit before startup")?;

    // Surface engine notices until ctrl-c.
    loop {
        tokio::select! {
            _ = tokio::signal::ctrl_c() => break,
            maybe_event = event_rx.recv() => match maybe_event {
                Some(EngineEvent::Notice(message)) => info!(%message, "engine notice"),
                Some(event) => debug!(?event, "engine event"),
                None => break,
            }
        }
    }

    info!("shutting down");
    let _ = command_tx.send(Command::Exit).await;
    cancel.cancel();
    engine.await.context("joining engine task")??;
    Ok(())
}
