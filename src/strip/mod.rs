use std::fmt::{self, Display};

use anyhow::Error;
use log::debug;
use packed_struct::{PackedStruct, PackingError};

#[cfg(feature = "pi")]
use rppal::spi::{Bus, Mode, SlaveSelect, Spi};

use crate::{
    color::LedValue,
    config::CHANNEL_ORDER,
    error::DispatchError,
};

use self::pack::{ChannelOrder, LedFramePack};

pub mod pack;

/// Four zero bytes that open every transmission.
pub const START_FRAME: [u8; 4] = [0; 4];

/// A synchronous bus the strip hangs off. `write` blocks until the bytes are out.
pub trait StripBus {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error>;
}

/// Length of the trailing zero block for a strip of `led_count` LEDs.
///
/// The strip needs at least one extra clock edge per two LEDs to push the
/// data through the whole chain.
pub const fn end_frame_len(led_count: usize) -> usize {
    (led_count >> 1) + 1
}

/// The three parts of one strip update, in transmission order.
#[derive(PartialEq, Clone, Debug)]
pub struct StripFrames {
    pub start: [u8; 4],
    pub leds: Vec<u8>,
    pub end: Vec<u8>,
}

impl StripFrames {
    pub fn len(&self) -> usize {
        self.start.len() + self.leds.len() + self.end.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.len());

        bytes.extend_from_slice(&self.start);
        bytes.extend(self.leds);
        bytes.extend(self.end);

        bytes
    }
}

fn write_hex(f: &mut fmt::Formatter<'_>, label: &str, bytes: &[u8]) -> fmt::Result {
    write!(f, "{label}:")?;
    for (i, byte) in bytes.iter().enumerate() {
        if i % 16 == 0 && i != 0 {
            write!(f, "\n{:width$}", "", width = label.len() + 1)?;
        }
        write!(f, " {byte:02X}")?;
    }
    Ok(())
}

impl Display for StripFrames {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write_hex(f, "start", &self.start)?;
        writeln!(f)?;
        write_hex(f, "leds", &self.leds)?;
        writeln!(f)?;
        write_hex(f, "end", &self.end)
    }
}

/// Encodes `leds` with the channel order selected at build time.
pub fn encode(leds: &[LedValue]) -> Result<StripFrames, PackingError> {
    encode_with_order(leds, CHANNEL_ORDER)
}

pub fn encode_with_order(
    leds: &[LedValue],
    order: ChannelOrder,
) -> Result<StripFrames, PackingError> {
    let mut data = Vec::with_capacity(leds.len() * 4);
    for led in leds {
        data.extend_from_slice(&LedFramePack::new(led, order).pack()?);
    }

    Ok(StripFrames {
        start: START_FRAME,
        leds: data,
        end: vec![0; end_frame_len(leds.len())],
    })
}

/// Owns the strip's bus and the per-LED buffer that gets encoded onto it.
pub struct StripController<B> {
    bus: B,
    leds: Vec<LedValue>,
}

impl<B: StripBus> StripController<B> {
    pub fn new(bus: B, length: usize) -> Self {
        Self {
            bus,
            leds: vec![LedValue::default(); length],
        }
    }

    pub fn fill(&mut self, value: LedValue) {
        self.leds.fill(value);
    }

    /// Encodes the current buffer and sends it.
    pub fn show(&mut self) -> Result<(), DispatchError> {
        let frames = encode(&self.leds)?;
        self.send(&frames)?;
        Ok(())
    }

    /// Writes the start, LED and end frames as three separate transfers.
    pub fn send(&mut self, frames: &StripFrames) -> Result<(), Error> {
        debug!("Sending {} LED frames", frames.leds.len() / 4);

        self.bus.write(&frames.start)?;
        self.bus.write(&frames.leds)?;
        self.bus.write(&frames.end)?;

        Ok(())
    }

    pub fn leds(&self) -> &[LedValue] {
        &self.leds
    }

    pub fn bus(&self) -> &B {
        &self.bus
    }
}

#[cfg(feature = "pi")]
impl StripBus for Spi {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        Spi::write(self, bytes)?;
        Ok(())
    }
}

#[cfg(feature = "pi")]
pub fn open_spi(config: &crate::config::Spi) -> Result<Spi, Error> {
    let bus = match config.bus {
        0 => Bus::Spi0,
        1 => Bus::Spi1,
        2 => Bus::Spi2,
        other => anyhow::bail!("unsupported SPI bus {other}"),
    };
    let slave_select = match config.slave_select {
        0 => SlaveSelect::Ss0,
        1 => SlaveSelect::Ss1,
        2 => SlaveSelect::Ss2,
        other => anyhow::bail!("unsupported SPI slave select {other}"),
    };

    let spi = Spi::new(bus, slave_select, crate::config::BUS_CLOCK_HZ, Mode::Mode0)?;
    Ok(spi)
}

/// Stand-in bus for machines without the strip attached. Logs every transfer.
#[derive(Debug, Default)]
pub struct LoggedBus {
    transfers: usize,
}

impl LoggedBus {
    pub fn transfers(&self) -> usize {
        self.transfers
    }
}

impl StripBus for LoggedBus {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.transfers += 1;
        debug!("Bus transfer {}: {} bytes", self.transfers, bytes.len());
        Ok(())
    }
}
