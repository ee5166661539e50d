//! Terminal front end for recorded algorithm traces.
//!
//! The `stepwise` binary lists the shipped visualizers, exports their traces
//! and plays them interactively. This library holds the pieces the binary
//! wires together so they can be tested without a terminal.
//!
//! # Components
//!
//! - [`render`]: text rendering of one playback frame
//! - [`export`]: JSON and CBOR trace export
//! - [`Terminal`]: line-based [`Driver`](stepwise_playback::Driver) over any
//!   reader and writer

#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod error;
pub mod export;
pub mod render;
mod terminal;

pub use error::CliError;
pub use export::{Format, write_listing, write_trace};
pub use terminal::{HELP, Terminal};
