use std::{path::Path, time::Duration};

use anyhow::Error;
use pi_pinout::{GpioPin, PhysicalPin, WiringPiPin};
use serde::{Deserialize, Serialize};

use crate::strip::pack::ChannelOrder;

/// Number of LEDs on the strip.
pub const STRIP_LENGTH: usize = 67;

/// Longest command line accepted, counting the terminating carriage return.
pub const MAX_COMMAND_LENGTH: usize = 250;

/// Character that ends a command line.
pub const LINE_TERMINATOR: u8 = b'\r';

/// SPI clock used to talk to the strip.
pub const BUS_CLOCK_HZ: u32 = 100_000;

/// Time the relay needs before the strip supply is stable.
pub const RELAY_ON_DELAY: Duration = Duration::from_millis(3000);

/// Time the relay contacts need to release.
pub const RELAY_OFF_DELAY: Duration = Duration::from_millis(50);

#[cfg(not(feature = "rgb-order"))]
pub const CHANNEL_ORDER: ChannelOrder = ChannelOrder::Bgr;

#[cfg(feature = "rgb-order")]
pub const CHANNEL_ORDER: ChannelOrder = ChannelOrder::Rgb;

const CONFIG_PATH: &str = "config.ron";

/// Deployment wiring, loaded from `config.ron` at startup.
#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Config {
    pub relay: Relay,
    pub spi: Spi,
    pub serial: Serial,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Relay {
    pub pin: Pin,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub enum Pin {
    Physical(PhysicalPin),
    Gpio(GpioPin),
    WiringPi(WiringPiPin),
}

impl Pin {
    /// BCM GPIO number of this pin, whatever numbering it was configured with.
    pub fn gpio(&self) -> GpioPin {
        match *self {
            Pin::Physical(pin) => pin.into(),
            Pin::Gpio(pin) => pin,
            Pin::WiringPi(pin) => pin.into(),
        }
    }
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Spi {
    pub bus: u8,
    pub slave_select: u8,
}

#[derive(Debug, Deserialize, Serialize, PartialEq)]
pub struct Serial {
    pub path: String,
    pub baud_rate: u32,
    pub timeout_ms: u64,
}

impl Serial {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            relay: Relay {
                pin: Pin::Gpio(GpioPin(16)),
            },
            spi: Spi {
                bus: 0,
                slave_select: 0,
            },
            serial: Serial {
                path: "/dev/ttyGS0".to_string(),
                baud_rate: 115_200,
                timeout_ms: 1000,
            },
        }
    }
}

impl Config {
    pub fn load() -> Result<Config, Error> {
        Self::load_from(CONFIG_PATH)
    }

    pub fn load_from(path: impl AsRef<Path>) -> Result<Config, Error> {
        let config = std::fs::read_to_string(path)?;
        Self::from_ron(&config)
    }

    pub fn from_ron(config: &str) -> Result<Config, Error> {
        let config: Config = ron::from_str(config)?;
        Ok(config)
    }
}
