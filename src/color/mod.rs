use std::fmt::{self, Display};

use crate::error::{CommandError, ValueError};

pub mod table;

pub use table::{ColorEntry, ColorTable};

/// Highest value of the 5-bit global brightness field.
pub const MAX_BRIGHTNESS: u8 = 31;

/// Target state of a single LED: 5-bit global brightness plus 8-bit channels.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LedValue {
    brightness: u8,
    red: u8,
    green: u8,
    blue: u8,
}

impl LedValue {
    pub fn new(brightness: u8, red: u8, green: u8, blue: u8) -> Result<Self, ValueError> {
        if brightness > MAX_BRIGHTNESS {
            return Err(ValueError::BrightnessOutOfRange(brightness));
        }

        Ok(Self {
            brightness,
            red,
            green,
            blue,
        })
    }

    /// A color at full global brightness.
    pub const fn rgb(red: u8, green: u8, blue: u8) -> Self {
        Self {
            brightness: MAX_BRIGHTNESS,
            red,
            green,
            blue,
        }
    }

    pub const fn brightness(&self) -> u8 {
        self.brightness
    }

    pub const fn red(&self) -> u8 {
        self.red
    }

    pub const fn green(&self) -> u8 {
        self.green
    }

    pub const fn blue(&self) -> u8 {
        self.blue
    }
}

impl Display for LedValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "({},{},{}) at brightness {}",
            self.red, self.green, self.blue, self.brightness
        )
    }
}

/// Resolves a color token against the built-in [`ColorTable`].
pub fn resolve(token: &str) -> Result<LedValue, CommandError> {
    resolve_with(ColorTable::builtin(), token)
}

/// Resolves either a `(red,green,blue)` literal or a color name from `table`.
pub fn resolve_with(table: &ColorTable, token: &str) -> Result<LedValue, CommandError> {
    let value = match token
        .strip_prefix('(')
        .and_then(|rest| rest.strip_suffix(')'))
    {
        Some(channels) => parse_channels(channels),
        None => table.lookup(token),
    };

    value.ok_or_else(|| CommandError::InvalidColor(token.to_string()))
}

fn parse_channels(channels: &str) -> Option<LedValue> {
    let mut fields = channels.split(',');

    let red = parse_channel(fields.next()?)?;
    let green = parse_channel(fields.next()?)?;
    let blue = parse_channel(fields.next()?)?;

    if fields.next().is_some() {
        return None;
    }

    Some(LedValue::rgb(red, green, blue))
}

// Plain decimal digits only: no sign, no whitespace.
fn parse_channel(field: &str) -> Option<u8> {
    if field.is_empty() || !field.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }

    field.parse().ok()
}
