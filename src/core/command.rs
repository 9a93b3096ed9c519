//! Edit commands
//!
//! A `Command` names one cursor-facing operation so that an input loop (or
//! a script) can drive a [`Document`](super::Document) through a single
//! dispatch point.

use std::fmt;
use std::str::FromStr;

/// A single editing operation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Insert bytes before the cursor
    InsertText(Vec<u8>),
    /// Open an empty row below the cursor row
    NewLine,
    /// Delete the byte before the cursor, then drop the row if it is now an
    /// empty row the cursor sits at the start of
    Backspace,
    /// Delete the byte under the cursor
    Delete,
    /// Insert spaces up to the configured tab width
    Tab,
    MoveLeft,
    MoveRight,
    MoveUp,
    MoveDown,
    /// Drop the cursor row if it is empty
    RemoveLineIfEmpty,
}

/// Error returned when a script line is not a known command
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown command `{0}`")]
pub struct ParseCommandError(pub String);

impl Command {
    /// Parse one script line.
    ///
    /// Returns `Ok(None)` for blank lines and `#` comments. `insert` takes
    /// the rest of the line verbatim after a single separating space.
    pub fn parse(line: &str) -> Result<Option<Self>, ParseCommandError> {
        let line = line.strip_suffix('\r').unwrap_or(line);
        let trimmed = line.trim_start();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = match trimmed.split_once(' ') {
            Some((word, rest)) => (word, rest),
            None => (trimmed, ""),
        };

        let command = match word {
            "insert" => Command::InsertText(rest.as_bytes().to_vec()),
            "newline" => Command::NewLine,
            "backspace" => Command::Backspace,
            "delete" => Command::Delete,
            "tab" => Command::Tab,
            "left" => Command::MoveLeft,
            "right" => Command::MoveRight,
            "up" => Command::MoveUp,
            "down" => Command::MoveDown,
            "remove-line" => Command::RemoveLineIfEmpty,
            other => return Err(ParseCommandError(other.to_string())),
        };
        Ok(Some(command))
    }

    /// Parse a whole script, skipping blank lines and comments
    pub fn parse_script(script: &str) -> Result<Vec<Self>, ParseCommandError> {
        let mut commands = Vec::new();
        for line in script.lines() {
            if let Some(command) = Self::parse(line)? {
                commands.push(command);
            }
        }
        Ok(commands)
    }
}

impl FromStr for Command {
    type Err = ParseCommandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)?.ok_or_else(|| ParseCommandError(s.to_string()))
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::InsertText(text) => write!(f, "insert {}", String::from_utf8_lossy(text)),
            Command::NewLine => f.write_str("newline"),
            Command::Backspace => f.write_str("backspace"),
            Command::Delete => f.write_str("delete"),
            Command::Tab => f.write_str("tab"),
            Command::MoveLeft => f.write_str("left"),
            Command::MoveRight => f.write_str("right"),
            Command::MoveUp => f.write_str("up"),
            Command::MoveDown => f.write_str("down"),
            Command::RemoveLineIfEmpty => f.write_str("remove-line"),
        }
    }
}
