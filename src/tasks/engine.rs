//! Async playback loop: the single serialized path for cursor mutation.

use std::sync::Arc;

use anyhow::Result;
use tokio::select;
use tokio::sync::mpsc::{Receiver, Sender};
use tokio::time::{Instant, sleep_until};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument};

use crate::catalog::Catalog;
use crate::config::Configuration;
use crate::events::{Command, EngineEvent};
use crate::render::RenderSink;
use crate::session::Slideshow;
use crate::source::ImageSource;

/// Drive a [`Slideshow`] from a command channel and its auto-advance timer.
///
/// Manual navigation and the timer funnel through the same loop, so no two
/// advances can race: every mutation replaces the deadline, and the loop
/// re-reads it before sleeping again. A stale deadline is simply superseded.
#[instrument(skip_all)]
pub async fn run<S: ImageSource, R: RenderSink>(
    catalog: Catalog,
    cfg: Configuration,
    source: Arc<S>,
    sink: Arc<R>,
    mut commands: Receiver<Command>,
    events: Sender<EngineEvent>,
    cancel: CancellationToken,
) -> Result<()> {
    let mut show = Slideshow::new(catalog, &cfg, source, sink, events);

    loop {
        select! {
            _ = cancel.cancelled() => {
                debug!("cancel received; exiting engine task");
                show.exit();
                break;
            }

            maybe_cmd = commands.recv() => match maybe_cmd {
                Some(cmd) => {
                    debug!(?cmd, "command");
                    show.handle(cmd).await;
                }
                None => {
                    debug!("command channel closed; exiting engine task");
                    show.exit();
                    break;
                }
            },

            _ = advance_due(show.next_deadline()) => show.advance().await,
        }
    }

    Ok(())
}

/// Resolve at the auto-advance deadline; never resolves while no timer runs.
async fn advance_due(deadline: Option<Instant>) {
    match deadline {
        Some(at) => sleep_until(at).await,
        None => std::future::pending().await,
    }
}
