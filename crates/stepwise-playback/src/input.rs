//! Line-oriented command parsing.
//!
//! Maps single-letter control-bar keys to [`PlaybackCommand`]s so any
//! line-based front end (a terminal, a test script) shares one grammar:
//!
//! | input       | command                   |
//! |-------------|---------------------------|
//! | `n`         | step forward              |
//! | `p`         | play / pause              |
//! | `r`         | reset                     |
//! | `s`         | skip forward              |
//! | `1` `2` `3` | slow / medium / fast      |
//! | `g <index>` | seek (1-based, as shown)  |
//! | `q`         | quit                      |

use crate::{PlaybackCommand, Speed};

/// Input line did not parse as a command.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseCommandError {
    /// Unrecognised key.
    #[error("unknown command '{0}' (n, p, r, s, 1-3, g <step>, q)")]
    Unknown(String),

    /// `g` without a usable step number.
    #[error("'g' needs a step number starting at 1, got '{0}'")]
    BadStep(String),
}

/// Parse one input line.
///
/// Blank lines yield `Ok(None)`.
///
/// # Errors
///
/// - `ParseCommandError::Unknown` for anything outside the grammar
/// - `ParseCommandError::BadStep` for a seek whose argument is not a positive
///   number
pub fn parse_command(line: &str) -> Result<Option<PlaybackCommand>, ParseCommandError> {
    let mut words = line.split_whitespace();
    let Some(key) = words.next() else {
        return Ok(None);
    };

    let command = match key {
        "n" => PlaybackCommand::StepForward,
        "p" => PlaybackCommand::TogglePlay,
        "r" => PlaybackCommand::Reset,
        "s" => PlaybackCommand::SkipForward,
        "1" => PlaybackCommand::SetSpeed(Speed::Slow),
        "2" => PlaybackCommand::SetSpeed(Speed::Medium),
        "3" => PlaybackCommand::SetSpeed(Speed::Fast),
        "q" => PlaybackCommand::Quit,
        "g" => {
            let arg = words.next().unwrap_or_default();
            let step = arg
                .parse::<usize>()
                .ok()
                .filter(|&step| step > 0)
                .ok_or_else(|| ParseCommandError::BadStep(arg.to_string()))?;
            PlaybackCommand::Seek(step - 1)
        },
        other => return Err(ParseCommandError::Unknown(other.to_string())),
    };

    if let Some(extra) = words.next() {
        return Err(ParseCommandError::Unknown(extra.to_string()));
    }
    Ok(Some(command))
}
