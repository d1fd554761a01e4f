use heapless::Vec;

use crate::{config::MAX_COMMAND_LENGTH, error::CommandError};

/// Content bytes a line can hold. The terminator takes up the last slot of
/// [`MAX_COMMAND_LENGTH`].
pub const LINE_CAPACITY: usize = MAX_COMMAND_LENGTH - 1;

pub type LineBuffer = Vec<u8, LINE_CAPACITY>;

/// Bytes received since the last terminator.
#[derive(Debug, Default)]
pub struct CommandLine {
    buffer: LineBuffer,
}

impl CommandLine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends `byte`. A full buffer drops the partial line along with `byte`.
    pub fn push(&mut self, byte: u8) -> Result<(), CommandError> {
        if self.buffer.push(byte).is_err() {
            self.buffer.clear();
            return Err(CommandError::CommandTooLong);
        }

        Ok(())
    }

    /// Hands over the completed line and leaves the buffer empty.
    pub fn take(&mut self) -> LineBuffer {
        core::mem::take(&mut self.buffer)
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.buffer
    }

    pub fn len(&self) -> usize {
        self.buffer.len()
    }

    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }
}
