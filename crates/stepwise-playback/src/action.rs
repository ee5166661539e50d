//! Controller side-effects.

/// Actions produced by the playback controller.
///
/// Operations that change nothing return no actions at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackAction {
    /// Visible state changed; draw the current snapshot.
    Render,

    /// The last snapshot was reached.
    Finished,

    /// The user asked to leave.
    Quit,
}
