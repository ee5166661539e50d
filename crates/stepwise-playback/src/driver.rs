//! Driver trait for abstracting playback I/O.
//!
//! The [`Driver`] trait decouples the playback runtime from where commands
//! come from and where frames are drawn. A terminal front end reads lines and
//! prints; tests feed a script and collect views.

use std::future::Future;

use crate::{PlaybackCommand, View};

/// Abstracts input and rendering for the playback runtime.
///
/// Implementations provide the I/O while the generic
/// [`Runtime`](crate::Runtime) owns the controller, the timer channel and the
/// loop that connects them.
pub trait Driver {
    /// Platform-specific error type.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Wait for the next user command.
    ///
    /// Returns `None` once input is exhausted. The runtime keeps playing an
    /// autoplaying trace to its end before stopping.
    fn poll_command(
        &mut self,
    ) -> impl Future<Output = Result<Option<PlaybackCommand>, Self::Error>>;

    /// Draw one frame.
    ///
    /// # Errors
    ///
    /// Returns an error if the output is gone.
    fn render(&mut self, view: &View<'_>) -> Result<(), Self::Error>;

    /// Release resources. Called once when the loop ends.
    fn stop(&mut self);
}
