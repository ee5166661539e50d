//! Line-based terminal driver.

use std::io::{self, Write};

use stepwise_playback::{Driver, PlaybackCommand, View, parse_command};
use tokio::io::{AsyncBufRead, AsyncBufReadExt, Lines};

use crate::render;

/// Key summary printed before interactive playback.
pub const HELP: &str = "keys: n step | p play/pause | s skip | r reset | 1/2/3 speed | g <step> seek | q quit";

/// Reads one command per line and prints one frame per render.
///
/// Lines that fail to parse are reported on the output and skipped.
pub struct Terminal<R, W> {
    lines: Lines<R>,
    out: W,
}

impl<R: AsyncBufRead + Unpin, W: Write> Terminal<R, W> {
    /// Wrap a line source and an output sink.
    pub fn new(input: R, out: W) -> Self {
        Self { lines: input.lines(), out }
    }

    /// Consume the driver and return its output sink.
    pub fn into_output(self) -> W {
        self.out
    }
}

impl<R: AsyncBufRead + Unpin, W: Write> Driver for Terminal<R, W> {
    type Error = io::Error;

    async fn poll_command(&mut self) -> io::Result<Option<PlaybackCommand>> {
        // `next_line` is cancel safe, so a timer firing mid-read loses nothing.
        while let Some(line) = self.lines.next_line().await? {
            match parse_command(&line) {
                Ok(Some(command)) => return Ok(Some(command)),
                Ok(None) => {},
                Err(err) => {
                    tracing::debug!(%err, "rejected input");
                    writeln!(self.out, "? {err}")?;
                    self.out.flush()?;
                },
            }
        }
        Ok(None)
    }

    fn render(&mut self, view: &View<'_>) -> io::Result<()> {
        self.out.write_all(render::frame(view).as_bytes())?;
        self.out.flush()
    }

    fn stop(&mut self) {
        if let Err(err) = self.out.flush() {
            tracing::warn!(%err, "failed to flush output");
        }
    }
}

#[cfg(test)]
mod tests {
    use stepwise_playback::{PlaybackConfig, Runtime};
    use stepwise_trace::Visualizer;

    use super::*;

    fn status_lines(out: &[u8]) -> Vec<String> {
        String::from_utf8_lossy(out)
            .lines()
            .filter(|l| l.starts_with('[') || l.starts_with('?'))
            .map(str::to_string)
            .collect()
    }

    #[tokio::test]
    async fn skips_blank_and_bad_lines() {
        let mut terminal = Terminal::new(&b"\n  \nx\ng 0\nn\n"[..], Vec::new());

        let command = terminal.poll_command().await.unwrap();
        assert_eq!(command, Some(PlaybackCommand::StepForward));
        assert_eq!(terminal.poll_command().await.unwrap(), None);

        let out = String::from_utf8(terminal.into_output()).unwrap();
        assert_eq!(out.lines().count(), 2);
        assert!(out.starts_with("? unknown command 'x'"));
    }

    #[tokio::test(start_paused = true)]
    async fn scripted_session_prints_each_frame() {
        let total = Visualizer::BubbleSort.build().unwrap().len();
        let script = format!("n\ng {total}\nr\nq\n");
        let mut out = Vec::new();
        let terminal = Terminal::new(script.as_bytes(), &mut out);

        Runtime::new(terminal, Visualizer::BubbleSort, PlaybackConfig::default())
            .unwrap()
            .run()
            .await
            .unwrap();

        let lines = status_lines(&out);
        assert_eq!(lines.len(), 4);
        assert!(lines[0].starts_with(&format!("[Step 1 of {total}] paused | ")));
        assert!(lines[1].starts_with(&format!("[Step 2 of {total}] paused | ")));
        assert!(lines[2].starts_with(&format!("[Step {total} of {total}] finished | ")));
        assert!(lines[3].starts_with(&format!("[Step 1 of {total}] paused | ")));
    }
}
