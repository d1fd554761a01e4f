//! Errors reported by the command interpreter.
//!
//! [`CommandError`]s are the recoverable kinds: they are written back on the
//! serial link and the interpreter keeps going. Anything else that reaches a
//! [`DispatchError`] comes from the hardware and ends the serve loop.

use packed_struct::PackingError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CommandError {
    /// The line grew past the buffer before a terminator arrived.
    #[error("command too long")]
    CommandTooLong,

    /// No command matched the line.
    #[error("command not recognized")]
    UnrecognizedCommand(String),

    /// The color token is neither a known name nor a valid `(r,g,b)` tuple.
    #[error("color not found")]
    InvalidColor(String),
}

/// Errors raised when constructing constrained values.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValueError {
    #[error("brightness {0} is out of range [0, 31]")]
    BrightnessOutOfRange(u8),
}

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error(transparent)]
    Command(#[from] CommandError),

    #[error("failed to pack LED frame: {0}")]
    Packing(#[from] PackingError),

    #[error(transparent)]
    Hardware(#[from] anyhow::Error),
}

impl DispatchError {
    /// The command-level error, if this is one the interpreter recovers from.
    pub fn as_command(&self) -> Option<&CommandError> {
        match self {
            DispatchError::Command(e) => Some(e),
            _ => None,
        }
    }
}
