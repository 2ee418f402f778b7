//! The playback state machine: cursor, display order, and auto-advance timer.

use std::sync::Arc;
use std::time::Duration;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tokio::sync::mpsc::Sender;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::catalog::Catalog;
use crate::config::Configuration;
use crate::error::Error;
use crate::events::{Command, EngineEvent};
use crate::order;
use crate::placeholder::PlaceholderTemplates;
use crate::preload::Preloader;
use crate::render::RenderSink;
use crate::source::ImageSource;
use crate::transition::{Presented, TransitionPresenter};

/// Position within the display order plus the resolved selection index.
///
/// `image_index == order[position]` always holds; the two fields are only
/// ever updated together.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PlaybackCursor {
    pub position: usize,
    pub image_index: usize,
}

/// Per-session state, created on entry and discarded on exit.
struct ActiveSession {
    /// Permutation of selection indices defining the playback sequence.
    order: Vec<usize>,
    cursor: PlaybackCursor,
    /// When the next auto-advance fires; `None` while no timer runs.
    deadline: Option<Instant>,
    /// Generation guard: fades and preloads spawned by this session become
    /// no-ops once it is cancelled.
    cancel: CancellationToken,
}

/// One slideshow instance.
///
/// All mutation goes through these methods; driving them from a single task
/// (see [`crate::tasks::engine`]) serializes the timer against manual
/// navigation.
pub struct Slideshow<S, R> {
    catalog: Catalog,
    duration: Duration,
    min_duration_secs: u64,
    randomize: bool,
    preload_on_enter: usize,
    preload_ahead: usize,
    preload_behind: usize,
    rng: StdRng,
    presenter: TransitionPresenter<S, R>,
    preloader: Preloader<S>,
    sink: Arc<R>,
    events: Sender<EngineEvent>,
    active: Option<ActiveSession>,
}

impl<S: ImageSource, R: RenderSink> Slideshow<S, R> {
    pub fn new(
        catalog: Catalog,
        cfg: &Configuration,
        source: Arc<S>,
        sink: Arc<R>,
        events: Sender<EngineEvent>,
    ) -> Self {
        let rng = match cfg.shuffle_seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_os_rng(),
        };
        let templates = PlaceholderTemplates {
            error: cfg.error_placeholder.clone(),
            empty: cfg.empty_placeholder.clone(),
        };
        Self {
            presenter: TransitionPresenter::new(
                Arc::clone(&source),
                Arc::clone(&sink),
                cfg.fade(),
                cfg.placeholder_bg_color.clone(),
                templates,
            ),
            preloader: Preloader::new(source),
            sink,
            events,
            catalog,
            duration: cfg.duration(),
            min_duration_secs: cfg.min_duration_secs,
            randomize: cfg.default_randomize,
            preload_on_enter: cfg.preload_on_enter,
            preload_ahead: cfg.preload_ahead,
            preload_behind: cfg.preload_behind,
            rng,
            active: None,
        }
    }

    #[must_use]
    pub fn is_active(&self) -> bool {
        self.active.is_some()
    }

    #[must_use]
    pub fn cursor(&self) -> Option<PlaybackCursor> {
        self.active.as_ref().map(|s| s.cursor)
    }

    /// When the next auto-advance fires, if a timer is running.
    #[must_use]
    pub fn next_deadline(&self) -> Option<Instant> {
        self.active.as_ref().and_then(|s| s.deadline)
    }

    #[must_use]
    pub fn randomized(&self) -> bool {
        self.randomize
    }

    #[must_use]
    pub fn duration(&self) -> Duration {
        self.duration
    }

    /// Number of URLs currently warmed by the preloader.
    #[must_use]
    pub fn warmed(&self) -> usize {
        self.preloader.warmed()
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// Dispatch one user command, degrading failures to notices.
    pub async fn handle(&mut self, command: Command) {
        match command {
            Command::Enter => {
                if let Err(err) = self.enter().await {
                    self.notice(err.to_string());
                }
            }
            Command::Exit => self.exit(),
            Command::Next => self.advance().await,
            Command::Previous => self.retreat().await,
            Command::ToggleRandomize(randomize) => self.toggle_randomize(randomize),
            Command::SetDuration(secs) => {
                if let Err(err) = self.set_duration(secs) {
                    self.notice(err.to_string());
                }
            }
            Command::SetSelected { id, selected } => self.set_selected(&id, selected).await,
            Command::SelectAll => self.select_all().await,
            Command::DeselectAll => self.deselect_all().await,
        }
    }

    /// Start a session over the current selection.
    ///
    /// # Errors
    /// [`Error::EmptySelection`] when nothing is selected and
    /// [`Error::FullscreenUnsupported`] when the sink cannot go fullscreen;
    /// neither changes any state.
    pub async fn enter(&mut self) -> Result<(), Error> {
        if self.active.is_some() {
            debug!("enter ignored; slideshow already active");
            return Ok(());
        }
        let selected = self.catalog.selected_count();
        if selected == 0 {
            return Err(Error::EmptySelection);
        }
        if !self.sink.enter_fullscreen() {
            return Err(Error::FullscreenUnsupported);
        }

        let order = order::generate_with(selected, self.randomize, &mut self.rng);
        let cursor = PlaybackCursor {
            position: 0,
            image_index: order[0],
        };
        self.active = Some(ActiveSession {
            order,
            cursor,
            deadline: None,
            cancel: CancellationToken::new(),
        });
        info!(images = selected, randomize = self.randomize, "slideshow started");
        self.notify(EngineEvent::SessionStarted);

        self.warm_from(cursor.image_index, self.preload_on_enter);
        self.show_current().await;
        self.reset_timer();
        Ok(())
    }

    /// End the session: stop the timer, invalidate in-flight transitions and
    /// preloads, drop the cache, and return to idle. No-op when idle.
    pub fn exit(&mut self) {
        let Some(session) = self.active.take() else {
            return;
        };
        session.cancel.cancel();
        self.preloader.clear();
        self.sink.exit_fullscreen();
        info!("slideshow ended");
        self.notify(EngineEvent::SessionEnded);
    }

    /// Move to the next image, wrapping at the end of the order.
    pub async fn advance(&mut self) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        let len = session.order.len();
        session.cursor.position = (session.cursor.position + 1) % len;
        session.cursor.image_index = session.order[session.cursor.position];
        let ahead = (session.cursor.image_index + 1) % len;

        self.show_current().await;
        self.warm_from(ahead, self.preload_ahead);
        self.reset_timer();
    }

    /// Move to the previous image, wrapping at the start of the order.
    pub async fn retreat(&mut self) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        let len = session.order.len();
        session.cursor.position = (session.cursor.position + len - 1) % len;
        session.cursor.image_index = session.order[session.cursor.position];
        let behind = self.preload_behind.min(len);
        let start = (session.cursor.image_index + len - behind) % len;

        self.show_current().await;
        self.warm_from(start, self.preload_behind);
        self.reset_timer();
    }

    /// Switch between sequential and shuffled ordering.
    ///
    /// While active this regenerates the display order in place and keeps
    /// the current image on screen: the cursor is relocated to that image's
    /// new position, falling back to the start when it is gone. The timer is
    /// left untouched; only the next auto-advance follows the new order.
    pub fn toggle_randomize(&mut self, randomize: bool) {
        self.randomize = randomize;
        let Some(session) = self.active.as_mut() else {
            return;
        };
        let current = session.cursor.image_index;
        session.order = order::generate_with(session.order.len(), randomize, &mut self.rng);
        session.cursor.position = order::locate(&session.order, current).unwrap_or(0);
        session.cursor.image_index = session.order[session.cursor.position];
        debug!(
            randomize,
            position = session.cursor.position,
            "display order regenerated"
        );
    }

    /// Change the per-image dwell duration.
    ///
    /// A running timer restarts at the new period; the current image keeps
    /// displaying either way.
    ///
    /// # Errors
    /// [`Error::DurationTooShort`] below the configured minimum; the prior
    /// duration stays in effect.
    pub fn set_duration(&mut self, secs: u64) -> Result<(), Error> {
        if secs < self.min_duration_secs {
            return Err(Error::DurationTooShort {
                got: secs,
                min: self.min_duration_secs,
            });
        }
        self.duration = Duration::from_secs(secs);
        if let Some(session) = self.active.as_mut()
            && session.deadline.is_some()
        {
            session.deadline = Some(Instant::now() + self.duration);
        }
        debug!(secs, "slide duration changed");
        Ok(())
    }

    /// Toggle one image's selection flag. Unknown ids are ignored.
    pub async fn set_selected(&mut self, id: &str, selected: bool) {
        let shown = self.current_id();
        if self.catalog.set_selected(id, selected) {
            self.selection_changed(shown).await;
        }
    }

    /// Select every catalog entry in one atomic update.
    pub async fn select_all(&mut self) {
        let shown = self.current_id();
        if self.catalog.select_all() {
            self.selection_changed(shown).await;
        }
    }

    /// Deselect every catalog entry in one atomic update. Forces an exit
    /// when a session is active, since nothing remains to show.
    pub async fn deselect_all(&mut self) {
        let shown = self.current_id();
        if self.catalog.deselect_all() {
            self.selection_changed(shown).await;
        }
    }

    /// Id of the image the cursor points at, if a session is active.
    fn current_id(&self) -> Option<String> {
        let session = self.active.as_ref()?;
        self.catalog
            .selection()
            .get(session.cursor.image_index)
            .map(|e| e.id.clone())
    }

    /// Reconcile session state with a changed selection.
    ///
    /// `shown` is the id that was on screen before the change. The order is
    /// rebuilt over the new selection; playback continues from `shown` when
    /// it is still selected, otherwise from the start of the new order.
    async fn selection_changed(&mut self, shown: Option<String>) {
        let selected = self.catalog.selected_count();
        self.notify(EngineEvent::SelectionChanged { selected });
        if self.active.is_none() {
            return;
        }
        if selected == 0 {
            self.notice("all images were deselected; leaving the slideshow");
            self.exit();
            return;
        }

        let order = order::generate_with(selected, self.randomize, &mut self.rng);
        let shown_index =
            shown.and_then(|id| self.catalog.selection().iter().position(|e| e.id == id));
        let Some(session) = self.active.as_mut() else {
            return;
        };
        session.cursor.position = shown_index
            .and_then(|idx| order::locate(&order, idx))
            .unwrap_or(0);
        session.order = order;
        session.cursor.image_index = session.order[session.cursor.position];
        let still_shown = shown_index == Some(session.cursor.image_index);

        if !still_shown {
            self.show_current().await;
        }
        self.reset_timer();
    }

    /// Render the image under the cursor through the transition presenter.
    async fn show_current(&self) {
        let Some(session) = self.active.as_ref() else {
            return;
        };
        let selection = self.catalog.selection();
        let Some(entry) = selection.get(session.cursor.image_index) else {
            warn!(
                index = session.cursor.image_index,
                "cursor out of step with selection"
            );
            return;
        };
        let url = entry.url.clone();
        let label = entry.id.clone();
        let cancel = session.cancel.clone();
        drop(selection);

        if self.presenter.present(Some((&url, &label)), &cancel).await == Presented::Image {
            self.preloader.record(&url);
        }
    }

    /// Warm `count` selection entries starting at index `start`.
    fn warm_from(&self, start: usize, count: usize) {
        let Some(session) = self.active.as_ref() else {
            return;
        };
        let urls: Vec<String> = self
            .catalog
            .selection()
            .iter()
            .map(|e| e.url.clone())
            .collect();
        self.preloader.warm(&urls, start, count, &session.cancel);
    }

    /// Schedule the next auto-advance, replacing any existing schedule.
    ///
    /// A single selected image gets no timer; there is nothing to advance to.
    fn reset_timer(&mut self) {
        let Some(session) = self.active.as_mut() else {
            return;
        };
        session.deadline = if session.order.len() > 1 {
            Some(Instant::now() + self.duration)
        } else {
            None
        };
    }

    fn notify(&self, event: EngineEvent) {
        // Listeners that fall behind miss events rather than stalling playback.
        let _ = self.events.try_send(event);
    }

    fn notice(&self, message: impl Into<String>) {
        let message = message.into();
        info!(%message, "notice");
        self.notify(EngineEvent::Notice(message));
    }
}
