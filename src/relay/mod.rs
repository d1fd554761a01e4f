use std::time::Duration;

use log::info;

#[cfg(feature = "pi")]
use rppal::gpio::{Gpio, OutputPin};

use crate::config::{RELAY_OFF_DELAY, RELAY_ON_DELAY};

/// A single digital output.
pub trait OutputLine {
    fn set_high(&mut self);
    fn set_low(&mut self);
}

/// Blocking wait.
pub trait Delay {
    fn delay(&mut self, duration: Duration);
}

/// Waits by parking the current thread.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadDelay;

impl Delay for ThreadDelay {
    fn delay(&mut self, duration: Duration) {
        std::thread::sleep(duration);
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayState {
    Off,
    On,
}

/// Drives the relay that gates the strip's power supply.
///
/// Switching on waits for the supply to settle before returning, so anything
/// sent to the strip afterwards lands on a stable rail. Both waits block the
/// caller and cannot be interrupted.
pub struct RelayController<L, D> {
    line: L,
    delay: D,
    state: RelayState,
}

impl<L: OutputLine, D: Delay> RelayController<L, D> {
    /// Takes over `line` and drives it low.
    pub fn new(mut line: L, delay: D) -> Self {
        line.set_low();

        Self {
            line,
            delay,
            state: RelayState::Off,
        }
    }

    pub fn turn_on(&mut self) {
        if self.state == RelayState::On {
            return;
        }

        info!("Relay: switching on, waiting {:?} for the supply", RELAY_ON_DELAY);
        self.line.set_high();
        self.state = RelayState::On;
        self.delay.delay(RELAY_ON_DELAY);
    }

    pub fn turn_off(&mut self) {
        info!("Relay: switching off");
        self.line.set_low();
        self.state = RelayState::Off;
        self.delay.delay(RELAY_OFF_DELAY);
    }

    pub fn state(&self) -> RelayState {
        self.state
    }

    pub fn line(&self) -> &L {
        &self.line
    }

    pub fn delay_source(&self) -> &D {
        &self.delay
    }
}

#[cfg(feature = "pi")]
impl OutputLine for OutputPin {
    fn set_high(&mut self) {
        OutputPin::set_high(self);
    }

    fn set_low(&mut self) {
        OutputPin::set_low(self);
    }
}

#[cfg(feature = "pi")]
pub fn open_relay_pin(config: &crate::config::Relay) -> Result<OutputPin, anyhow::Error> {
    let pin = config.pin.gpio();
    info!("Relay: initializing on GPIO {}", pin.0);

    Ok(Gpio::new()?.get(pin.0)?.into_output_low())
}

/// Stand-in output for machines without the relay attached.
#[derive(Debug, Default)]
pub struct LoggedLine {
    high: bool,
}

impl LoggedLine {
    pub fn is_high(&self) -> bool {
        self.high
    }
}

impl OutputLine for LoggedLine {
    fn set_high(&mut self) {
        self.high = true;
        info!("Relay line: high");
    }

    fn set_low(&mut self) {
        self.high = false;
        info!("Relay line: low");
    }
}
