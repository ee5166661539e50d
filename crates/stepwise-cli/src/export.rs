//! Trace export.
//!
//! A dumped trace is the serialized [`Trace`]: its name plus every snapshot
//! in order. JSON is pretty-printed for reading; CBOR is compact for tools.

use std::io::Write;

use clap::ValueEnum;
use stepwise_core::{Family, Trace};
use stepwise_trace::Visualizer;

use crate::CliError;

/// Output encoding for `stepwise dump`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum Format {
    /// Pretty-printed JSON, newline-terminated.
    #[default]
    Json,
    /// CBOR.
    Cbor,
}

/// Serialize `trace` to `out`.
pub fn write_trace<W: Write>(trace: &Trace, format: Format, mut out: W) -> Result<(), CliError> {
    match format {
        Format::Json => {
            serde_json::to_writer_pretty(&mut out, trace)?;
            writeln!(out)?;
        },
        Format::Cbor => ciborium::into_writer(trace, &mut out)?,
    }
    out.flush()?;
    Ok(())
}

/// One line per visualizer: name, family and snapshot count.
pub fn write_listing<W: Write>(mut out: W) -> Result<(), CliError> {
    for visualizer in Visualizer::ALL {
        let trace = visualizer.build()?;
        let family = match visualizer.family() {
            Family::Array => "array",
            Family::Graph => "graph",
        };
        writeln!(out, "{:<24} {family:<6} {:>4} steps", visualizer.name(), trace.len())?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use stepwise_core::Snapshot;

    use super::*;

    #[test]
    fn json_dump_carries_name_and_frames() {
        let trace = Visualizer::BubbleSort.build().unwrap();
        let mut out = Vec::new();
        write_trace(&trace, Format::Json, &mut out).unwrap();

        let value: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(value["name"], "bubble-sort");

        let frames: Vec<Snapshot> = serde_json::from_value(value["frames"].clone()).unwrap();
        assert_eq!(frames, trace.frames());
        assert!(out.ends_with(b"\n"));
    }

    #[test]
    fn cbor_dump_decodes_to_the_same_frames() {
        let trace = Visualizer::TopologicalSort.build().unwrap();
        let mut out = Vec::new();
        write_trace(&trace, Format::Cbor, &mut out).unwrap();

        let value: serde_json::Value = ciborium::from_reader(out.as_slice()).unwrap();
        let frames: Vec<Snapshot> = serde_json::from_value(value["frames"].clone()).unwrap();
        assert_eq!(frames, trace.frames());
    }

    #[test]
    fn listing_names_every_visualizer() {
        let mut out = Vec::new();
        write_listing(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), Visualizer::ALL.len());
        for (line, visualizer) in text.lines().zip(Visualizer::ALL) {
            assert!(line.starts_with(visualizer.name()), "{line}");
        }
        assert!(text.contains("topological-sort-cycle"));
    }
}
