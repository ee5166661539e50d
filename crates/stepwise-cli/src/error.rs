//! CLI errors.

use std::io;

use stepwise_core::TraceError;
use stepwise_playback::RuntimeError;
use thiserror::Error;

/// Errors surfaced by the `stepwise` binary.
#[derive(Debug, Error)]
pub enum CliError {
    /// Writing output failed.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// A shipped dataset failed to build.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),

    /// JSON export failed.
    #[error("JSON export failed: {0}")]
    Json(#[from] serde_json::Error),

    /// CBOR export failed.
    #[error("CBOR export failed: {0}")]
    Cbor(#[from] ciborium::ser::Error<io::Error>),

    /// Interactive playback failed.
    #[error("playback error: {0}")]
    Runtime(#[from] RuntimeError),
}
