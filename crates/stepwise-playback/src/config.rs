//! Playback speeds and their intervals.

use std::{fmt, str::FromStr, time::Duration};

/// Delay between autoplay ticks at [`Speed::Slow`].
pub const DEFAULT_SLOW_INTERVAL: Duration = Duration::from_millis(1000);

/// Delay between autoplay ticks at [`Speed::Medium`].
pub const DEFAULT_MEDIUM_INTERVAL: Duration = Duration::from_millis(500);

/// Delay between autoplay ticks at [`Speed::Fast`].
pub const DEFAULT_FAST_INTERVAL: Duration = Duration::from_millis(200);

/// User-selectable autoplay speed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Speed {
    /// One step per [`PlaybackConfig::slow`].
    Slow,
    /// One step per [`PlaybackConfig::medium`].
    #[default]
    Medium,
    /// One step per [`PlaybackConfig::fast`].
    Fast,
}

impl Speed {
    /// Every speed, slowest first.
    pub const ALL: [Self; 3] = [Self::Slow, Self::Medium, Self::Fast];

    /// Lowercase name, also accepted by [`FromStr`].
    pub fn name(self) -> &'static str {
        match self {
            Self::Slow => "slow",
            Self::Medium => "medium",
            Self::Fast => "fast",
        }
    }
}

impl fmt::Display for Speed {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Speed name was not `slow`, `medium` or `fast`.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown speed '{0}' (expected slow, medium or fast)")]
pub struct ParseSpeedError(pub String);

impl FromStr for Speed {
    type Err = ParseSpeedError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|speed| speed.name() == wanted)
            .ok_or_else(|| ParseSpeedError(s.to_string()))
    }
}

/// Playback configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaybackConfig {
    /// Tick interval at [`Speed::Slow`]
    pub slow: Duration,
    /// Tick interval at [`Speed::Medium`]
    pub medium: Duration,
    /// Tick interval at [`Speed::Fast`]
    pub fast: Duration,
    /// Speed a new controller starts with
    pub initial_speed: Speed,
}

impl PlaybackConfig {
    /// Tick interval for `speed`.
    pub fn interval(&self, speed: Speed) -> Duration {
        match speed {
            Speed::Slow => self.slow,
            Speed::Medium => self.medium,
            Speed::Fast => self.fast,
        }
    }

    /// Same intervals, different starting speed.
    #[must_use]
    pub fn with_initial_speed(mut self, speed: Speed) -> Self {
        self.initial_speed = speed;
        self
    }
}

impl Default for PlaybackConfig {
    fn default() -> Self {
        Self {
            slow: DEFAULT_SLOW_INTERVAL,
            medium: DEFAULT_MEDIUM_INTERVAL,
            fast: DEFAULT_FAST_INTERVAL,
            initial_speed: Speed::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_intervals() {
        let config = PlaybackConfig::default();
        assert_eq!(config.interval(Speed::Slow), Duration::from_millis(1000));
        assert_eq!(config.interval(Speed::Medium), Duration::from_millis(500));
        assert_eq!(config.interval(Speed::Fast), Duration::from_millis(200));
        assert_eq!(config.initial_speed, Speed::Medium);
    }

    #[test]
    fn parse_speed() {
        assert_eq!(" Fast ".parse::<Speed>(), Ok(Speed::Fast));
        assert_eq!("warp".parse::<Speed>(), Err(ParseSpeedError("warp".into())));
    }
}
