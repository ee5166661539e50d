//! Generic runtime for interactive playback.
//!
//! The Runtime drives the playback event loop, coordinating between:
//! - [`PlaybackController`]: position state machine
//! - [`TokioScheduler`]: autoplay timers, delivered over a channel
//! - [`Driver`]: user input and rendering

use stepwise_core::{TraceError, TraceSource};
use thiserror::Error;

use crate::{
    Driver, FiredTimers, PlaybackAction, PlaybackCommand, PlaybackConfig, PlaybackController,
    TokioScheduler,
};

/// Runtime errors.
#[derive(Debug, Error)]
pub enum RuntimeError {
    /// Driver I/O failed.
    #[error("driver error: {0}")]
    Driver(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Building or rebuilding the trace failed.
    #[error("trace error: {0}")]
    Trace(#[from] TraceError),
}

impl RuntimeError {
    fn driver(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Driver(Box::new(err))
    }
}

/// Async runtime that plays one trace through a [`Driver`].
pub struct Runtime<D: Driver> {
    driver: D,
    controller: PlaybackController<TokioScheduler>,
    fired: FiredTimers,
    autoplay: bool,
}

impl<D: Driver> Runtime<D> {
    /// Build the trace and bind it to a fresh controller.
    ///
    /// # Errors
    ///
    /// Returns `RuntimeError::Trace` if the source fails to build.
    pub fn new(
        driver: D,
        source: impl TraceSource + Send + 'static,
        config: PlaybackConfig,
    ) -> Result<Self, RuntimeError> {
        let (scheduler, fired) = TokioScheduler::new();
        let controller = PlaybackController::new(source, scheduler, config)?;
        Ok(Self { driver, controller, fired, autoplay: false })
    }

    /// Start autoplay as soon as the loop runs.
    #[must_use]
    pub fn with_autoplay(mut self, autoplay: bool) -> Self {
        self.autoplay = autoplay;
        self
    }

    /// Run the main event loop.
    ///
    /// The loop ends on `Quit`, or once input is exhausted and autoplay is
    /// not running. The pending timer is cancelled before returning.
    ///
    /// # Errors
    ///
    /// Returns an error if the driver fails or a reset cannot rebuild the
    /// trace.
    pub async fn run(mut self) -> Result<(), RuntimeError> {
        self.render()?;
        if self.autoplay && self.dispatch(PlaybackCommand::TogglePlay)? {
            return self.stop();
        }

        let mut input_open = true;
        loop {
            tokio::select! {
                command = self.driver.poll_command(), if input_open => {
                    match command.map_err(RuntimeError::driver)? {
                        Some(command) => {
                            if self.dispatch(command)? {
                                break;
                            }
                        },
                        None => {
                            tracing::debug!("input closed");
                            input_open = false;
                        },
                    }
                }
                Some(id) = self.fired.recv() => {
                    let actions = self.controller.on_timer(id);
                    self.execute(actions)?;
                }
                else => break,
            }

            if !input_open && !self.controller.is_playing() {
                break;
            }
        }

        self.stop()
    }

    /// Returns `true` if the loop should end.
    fn dispatch(&mut self, command: PlaybackCommand) -> Result<bool, RuntimeError> {
        tracing::debug!(?command, "command");
        let actions = self.controller.handle(command)?;
        self.execute(actions)
    }

    /// Returns `true` if the loop should end.
    fn execute(&mut self, actions: Vec<PlaybackAction>) -> Result<bool, RuntimeError> {
        for action in actions {
            match action {
                PlaybackAction::Render => self.render()?,
                PlaybackAction::Finished => {
                    tracing::info!(trace = self.controller.trace().name(), "playback finished");
                },
                PlaybackAction::Quit => return Ok(true),
            }
        }
        Ok(false)
    }

    fn render(&mut self) -> Result<(), RuntimeError> {
        let view = self.controller.view();
        self.driver.render(&view).map_err(RuntimeError::driver)
    }

    fn stop(mut self) -> Result<(), RuntimeError> {
        self.controller.shutdown();
        self.driver.stop();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::{
        collections::VecDeque,
        convert::Infallible,
        sync::{Arc, Mutex},
        time::Duration,
    };

    use stepwise_core::{ArraySnapshot, Element, ElementTag, Snapshot, Trace};
    use tokio::time::Instant;

    use super::*;
    use crate::{PlaybackState, View};

    type Frames = Arc<Mutex<Vec<(usize, PlaybackState, Instant)>>>;

    /// Feeds a fixed script, one command every `gap`.
    struct Scripted {
        script: VecDeque<PlaybackCommand>,
        gap: Duration,
        /// Deadline of the next command; survives a dropped poll.
        due: Option<Instant>,
        frames: Frames,
    }

    impl Scripted {
        fn new(script: impl IntoIterator<Item = PlaybackCommand>, gap: Duration) -> (Self, Frames) {
            let frames = Frames::default();
            let driver = Self {
                script: script.into_iter().collect(),
                gap,
                due: None,
                frames: frames.clone(),
            };
            (driver, frames)
        }
    }

    impl Driver for Scripted {
        type Error = Infallible;

        async fn poll_command(&mut self) -> Result<Option<PlaybackCommand>, Infallible> {
            if self.script.is_empty() {
                return Ok(None);
            }
            let due = *self.due.get_or_insert_with(|| Instant::now() + self.gap);
            tokio::time::sleep_until(due).await;
            self.due = None;
            Ok(self.script.pop_front())
        }

        fn render(&mut self, view: &View<'_>) -> Result<(), Infallible> {
            self.frames.lock().unwrap().push((view.progress.index, view.state, Instant::now()));
            Ok(())
        }

        fn stop(&mut self) {}
    }

    fn four_frames() -> Result<Trace, TraceError> {
        let frames = (0..4)
            .map(|i| {
                Snapshot::Array(ArraySnapshot {
                    elements: vec![Element { value: i, tag: ElementTag::Default }],
                    message: format!("frame {i}"),
                })
            })
            .collect();
        Trace::new("four", frames)
    }

    #[tokio::test(start_paused = true)]
    async fn autoplay_runs_to_the_end_after_input_closes() {
        let (driver, frames) = Scripted::new([], Duration::ZERO);
        let start = Instant::now();

        let runtime =
            Runtime::new(driver, four_frames, PlaybackConfig::default()).unwrap().with_autoplay(true);
        runtime.run().await.unwrap();

        let frames = frames.lock().unwrap();
        let indices: Vec<usize> = frames.iter().map(|(i, _, _)| *i).collect();
        assert_eq!(indices, vec![0, 0, 1, 2, 3]);
        assert_eq!(frames.last().map(|(_, s, _)| *s), Some(PlaybackState::Finished));
        assert_eq!(frames[4].2 - start, Duration::from_millis(1500));
    }

    #[tokio::test(start_paused = true)]
    async fn quit_stops_autoplay() {
        let (driver, frames) = Scripted::new([PlaybackCommand::Quit], Duration::from_millis(700));

        let runtime =
            Runtime::new(driver, four_frames, PlaybackConfig::default()).unwrap().with_autoplay(true);
        runtime.run().await.unwrap();

        let indices: Vec<usize> = frames.lock().unwrap().iter().map(|(i, _, _)| *i).collect();
        assert_eq!(indices, vec![0, 0, 1]);
    }

    #[tokio::test(start_paused = true)]
    async fn manual_steps_without_autoplay() {
        let script = [PlaybackCommand::StepForward, PlaybackCommand::Seek(3), PlaybackCommand::Reset];
        let (driver, frames) = Scripted::new(script, Duration::from_millis(10));

        Runtime::new(driver, four_frames, PlaybackConfig::default()).unwrap().run().await.unwrap();

        let frames = frames.lock().unwrap();
        let states: Vec<_> = frames.iter().map(|(i, s, _)| (*i, *s)).collect();
        assert_eq!(states, vec![
            (0, PlaybackState::Idle),
            (1, PlaybackState::Idle),
            (3, PlaybackState::Finished),
            (0, PlaybackState::Idle),
        ]);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_discards_tick_already_in_flight() {
        let (scheduler, mut fired) = TokioScheduler::new();
        let mut controller =
            PlaybackController::new(four_frames, scheduler, PlaybackConfig::default()).unwrap();
        controller.toggle_play();

        // the tick's task has sent its id, nobody has received it yet
        tokio::time::sleep(Duration::from_millis(600)).await;
        assert_eq!(controller.scheduler().live_tasks(), 0);

        controller.reset().unwrap();
        assert_eq!(fired.try_recv(), None);
        assert_eq!(controller.index(), 0);
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[tokio::test(start_paused = true)]
    async fn reset_at_tick_deadline_leaves_playback_at_start() {
        let script = [PlaybackCommand::Reset, PlaybackCommand::Quit];
        let (driver, frames) = Scripted::new(script, Duration::from_millis(500));

        let runtime =
            Runtime::new(driver, four_frames, PlaybackConfig::default()).unwrap().with_autoplay(true);
        runtime.run().await.unwrap();

        let frames = frames.lock().unwrap();
        let (index, state, at) = *frames.last().unwrap();
        assert_eq!((index, state), (0, PlaybackState::Idle));
        assert!(frames.iter().all(|&(i, _, _)| i <= 1));
        assert_eq!(at - frames[0].2, Duration::from_millis(500));
    }

    #[test]
    fn driver_errors_are_boxed() {
        let err = RuntimeError::driver(std::io::Error::other("closed"));
        assert_eq!(err.to_string(), "driver error: closed");
    }
}
