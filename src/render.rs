//! Commands the engine issues toward whatever displays the slideshow.

use tracing::{debug, info};

/// Abstract display target.
///
/// The engine never touches a display tree; it only tells the sink what to
/// show and when the fade state changes. Implementations are expected to be
/// cheap and non-blocking, since they are called from the playback path.
pub trait RenderSink: Send + Sync + 'static {
    /// Make `url` the visible image, captioned with `label`.
    fn show(&self, url: &str, label: &str);

    /// Toggle the faded-out state bracketing an image swap.
    fn set_fading(&self, fading: bool);

    /// Ask the platform for fullscreen presentation.
    ///
    /// Returns `false` when the capability is missing, in which case the
    /// engine rejects slideshow entry without changing state.
    fn enter_fullscreen(&self) -> bool;

    /// Leave fullscreen presentation. Must tolerate being called when not
    /// fullscreen.
    fn exit_fullscreen(&self);
}

/// Sink that narrates display commands through `tracing`.
///
/// Used by the demo binary and handy when debugging a shell integration.
#[derive(Debug, Default)]
pub struct TracingSink;

impl RenderSink for TracingSink {
    fn show(&self, url: &str, label: &str) {
        info!(label, url, "showing image");
    }

    fn set_fading(&self, fading: bool) {
        debug!(fading, "fade state");
    }

    fn enter_fullscreen(&self) -> bool {
        info!("entering fullscreen");
        true
    }

    fn exit_fullscreen(&self) {
        info!("leaving fullscreen");
    }
}
