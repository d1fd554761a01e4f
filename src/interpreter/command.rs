use std::fmt::{self, Display};

use crate::{color::LedValue, error::CommandError};

pub const HELP_TEXT: &str = "\
Commands:
  on <color>  power the strip and fill it with <color>
  off         power the strip down
  colors      list the named colors
  help        show this message
<color> is a name from `colors` or (<red>,<green>,<blue>) with each 0-255";

/// A parsed command line, borrowing its argument from the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command<'a> {
    On(&'a str),
    Off,
    Help,
    Colors,
}

impl<'a> Command<'a> {
    /// Matches the line against the command prefixes, in order. Case-sensitive.
    pub fn parse(line: &'a str) -> Result<Self, CommandError> {
        if let Some(token) = line.strip_prefix("on ") {
            Ok(Command::On(token))
        } else if line.starts_with("off") {
            Ok(Command::Off)
        } else if line.starts_with("help") {
            Ok(Command::Help)
        } else if line.starts_with("colors") {
            Ok(Command::Colors)
        } else {
            Err(CommandError::UnrecognizedCommand(line.to_string()))
        }
    }
}

/// What a successfully dispatched command reports back.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    StripOn(LedValue),
    Off,
    Help,
    Colors(Vec<&'static str>),
}

impl Display for Reply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Reply::StripOn(value) => write!(f, "on {value}"),
            Reply::Off => write!(f, "off"),
            Reply::Help => write!(f, "{HELP_TEXT}"),
            Reply::Colors(names) => {
                writeln!(f, "Colors:")?;
                for name in names {
                    writeln!(f, "  {name}")?;
                }
                write!(f, "  (<red>,<green>,<blue>)")
            }
        }
    }
}
