use thiserror::Error;

/// Library error type for slideshow operations.
///
/// None of these abort a running session: the engine degrades each of them
/// to a user-visible notice and keeps playing.
#[derive(Debug, Error)]
pub enum Error {
    /// Slideshow entry was requested while no images are selected.
    #[error("no images selected")]
    EmptySelection,

    /// The render target cannot switch to fullscreen presentation.
    #[error("fullscreen is not supported on this display")]
    FullscreenUnsupported,

    /// A requested slide duration is below the configured minimum.
    #[error("slide duration {got}s is below the minimum of {min}s")]
    DurationTooShort { got: u64, min: u64 },

    /// A placeholder background color is not a six-hex-digit string.
    #[error("background color must be six hex digits, got {0:?}")]
    BadColor(String),

    /// Underlying IO error.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON manifest parse error.
    #[error(transparent)]
    Manifest(#[from] serde_json::Error),
}
