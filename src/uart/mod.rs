use std::io::{self, Read, Write};

use anyhow::Error;

#[cfg(feature = "pi")]
use rppal::uart::{Parity, Uart};

use crate::config::LINE_TERMINATOR;

/// What a single poll of the serial link produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SerialEvent {
    Byte(u8),
    /// Nothing arrived before the read timeout.
    Timeout,
    /// The other end went away; no more input will arrive.
    Closed,
}

/// Byte-oriented, half-duplex command link.
pub trait SerialLink {
    fn read_event(&mut self) -> Result<SerialEvent, Error>;
    fn send(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

#[cfg(feature = "pi")]
impl SerialLink for Uart {
    fn read_event(&mut self) -> Result<SerialEvent, Error> {
        let mut byte = [0u8; 1];
        match Uart::read(self, &mut byte)? {
            0 => Ok(SerialEvent::Timeout),
            _ => Ok(SerialEvent::Byte(byte[0])),
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        Uart::write(self, bytes)?;
        Ok(())
    }
}

/// Opens the serial device with reads that give up after the configured timeout.
#[cfg(feature = "pi")]
pub fn open_uart(config: &crate::config::Serial) -> Result<Uart, Error> {
    let mut uart = Uart::with_path(&config.path, config.baud_rate, Parity::None, 8, 1)?;
    uart.set_read_mode(0, config.timeout())?;
    uart.set_write_mode(true)?;

    Ok(uart)
}

/// Uses the process's stdin and stdout as the serial link.
///
/// Terminals end lines with `\n`, so those are handed on as the command
/// terminator.
#[derive(Debug, Default)]
pub struct StdioLink;

impl SerialLink for StdioLink {
    fn read_event(&mut self) -> Result<SerialEvent, Error> {
        let mut byte = [0u8; 1];
        match io::stdin().lock().read(&mut byte) {
            Ok(0) => Ok(SerialEvent::Closed),
            Ok(_) if byte[0] == b'\n' => Ok(SerialEvent::Byte(LINE_TERMINATOR)),
            Ok(_) => Ok(SerialEvent::Byte(byte[0])),
            Err(e) if e.kind() == io::ErrorKind::Interrupted => Ok(SerialEvent::Timeout),
            Err(e) => Err(e.into()),
        }
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        let mut stdout = io::stdout().lock();
        stdout.write_all(bytes)?;
        stdout.flush()?;
        Ok(())
    }
}
