//! Turns bytes from the serial link into relay and strip actions.
//!
//! Bytes accumulate in a [`CommandLine`] until a carriage return arrives, then
//! the line is parsed and run to completion before the next byte is looked at.
//! Relay waits and bus writes block the whole loop.

use anyhow::Error;
use log::{info, warn};

use crate::{
    color::{resolve_with, ColorTable},
    config::LINE_TERMINATOR,
    error::{CommandError, DispatchError},
    relay::{Delay, OutputLine, RelayController},
    strip::{StripBus, StripController},
    uart::{SerialEvent, SerialLink},
};

pub mod command;
pub mod line;

pub use command::{Command, Reply, HELP_TEXT};
pub use line::CommandLine;

const BANNER: &str = "dotstar-relay ready, type `help` for commands";

pub struct CommandInterpreter<L, D, B> {
    line: CommandLine,
    relay: RelayController<L, D>,
    strip: StripController<B>,
    colors: &'static ColorTable,
    echo: bool,
}

impl<L, D, B> CommandInterpreter<L, D, B>
where
    L: OutputLine,
    D: Delay,
    B: StripBus,
{
    pub fn new(relay: RelayController<L, D>, strip: StripController<B>) -> Self {
        Self {
            line: CommandLine::new(),
            relay,
            strip,
            colors: ColorTable::builtin(),
            echo: true,
        }
    }

    /// Whether received bytes are written back on the link.
    pub fn with_echo(mut self, echo: bool) -> Self {
        self.echo = echo;
        self
    }

    /// Feeds one received byte.
    ///
    /// Returns `Ok(None)` while a line is still accumulating and the outcome of
    /// the dispatched command once the terminator arrives.
    pub fn feed(&mut self, byte: u8) -> Result<Option<Reply>, DispatchError> {
        if byte != LINE_TERMINATOR {
            self.line.push(byte)?;
            return Ok(None);
        }

        let line = self.line.take();
        match std::str::from_utf8(&line) {
            Ok(line) => self.dispatch(line).map(Some),
            Err(_) => Err(CommandError::UnrecognizedCommand(
                String::from_utf8_lossy(&line).into_owned(),
            )
            .into()),
        }
    }

    /// Runs one complete command line.
    ///
    /// `on` switches the relay on before the color is resolved, so an unknown
    /// color leaves the relay on without sending anything to the strip.
    pub fn dispatch(&mut self, line: &str) -> Result<Reply, DispatchError> {
        info!("Command: {line:?}");

        match Command::parse(line)? {
            Command::On(token) => {
                self.relay.turn_on();

                let value = resolve_with(self.colors, token)?;
                self.strip.fill(value);
                self.strip.show()?;

                Ok(Reply::StripOn(value))
            }
            Command::Off => {
                self.relay.turn_off();
                Ok(Reply::Off)
            }
            Command::Help => Ok(Reply::Help),
            Command::Colors => Ok(Reply::Colors(self.colors.names().collect())),
        }
    }

    /// Polls `serial` until it closes, answering every command on it.
    ///
    /// Command errors are reported on the link and the loop carries on.
    /// Hardware errors end the loop.
    pub fn serve<S: SerialLink>(&mut self, serial: &mut S) -> Result<(), Error> {
        send_message(serial, BANNER)?;

        loop {
            let byte = match serial.read_event()? {
                SerialEvent::Byte(byte) => byte,
                SerialEvent::Timeout => continue,
                SerialEvent::Closed => {
                    info!("Serial link closed");
                    return Ok(());
                }
            };

            if self.echo {
                echo(serial, byte)?;
            }

            match self.feed(byte) {
                Ok(None) => {}
                Ok(Some(reply)) => send_message(serial, &reply.to_string())?,
                Err(DispatchError::Command(e)) => {
                    warn!("{e:?}");
                    send_message(serial, &e.to_string())?;
                }
                Err(DispatchError::Packing(e)) => return Err(e.into()),
                Err(DispatchError::Hardware(e)) => return Err(e),
            }
        }
    }

    pub fn relay(&self) -> &RelayController<L, D> {
        &self.relay
    }

    pub fn strip(&self) -> &StripController<B> {
        &self.strip
    }

    pub fn pending_line(&self) -> &[u8] {
        self.line.as_bytes()
    }
}

fn echo<S: SerialLink>(serial: &mut S, byte: u8) -> Result<(), Error> {
    if byte == LINE_TERMINATOR {
        serial.send(b"\r\n")
    } else {
        serial.send(&[byte])
    }
}

fn send_message<S: SerialLink>(serial: &mut S, message: &str) -> Result<(), Error> {
    for line in message.lines() {
        serial.send(line.as_bytes())?;
        serial.send(b"\r\n")?;
    }
    Ok(())
}
