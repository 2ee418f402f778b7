/// Discrete user commands accepted by the engine.
///
/// Raw input parsing (keyboard, buttons, fullscreen-change notifications)
/// lives in whatever shell hosts the engine; the shell translates its events
/// into these commands and sends them over the command channel.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Start the slideshow over the currently selected images.
    Enter,
    /// Leave the slideshow and discard the session.
    Exit,
    /// Advance to the next image in the display order.
    Next,
    /// Step back to the previous image in the display order.
    Previous,
    /// Switch between sequential and shuffled ordering.
    ToggleRandomize(bool),
    /// Change the per-image dwell duration, in seconds.
    SetDuration(u64),
    /// Toggle one catalog entry's selection flag.
    SetSelected { id: String, selected: bool },
    SelectAll,
    DeselectAll,
}

/// Notifications emitted by the engine for observers (UI shells, tests).
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineEvent {
    SessionStarted,
    SessionEnded,
    /// The selected subset changed; carries the new selection size.
    SelectionChanged { selected: usize },
    /// A user-visible message (rejected entry, bad duration, forced exit).
    Notice(String),
}
