//! Serial-controlled SK9822/APA102 LED strip behind a power relay.
//!
//! Lines such as `on red`, `on (120,45,200)` or `off` arrive over a serial
//! link. The [`interpreter`] switches the [`relay`] and fills the [`strip`]
//! with the resolved [`color`].

pub mod color;
pub mod config;
pub mod error;
pub mod interpreter;
pub mod relay;
pub mod strip;
pub mod uart;

pub mod prelude {
    pub use crate::{
        color::{resolve, ColorTable, LedValue},
        config::*,
        error::{CommandError, DispatchError},
        interpreter::{CommandInterpreter, Reply},
        relay::{Delay, OutputLine, RelayController, RelayState, ThreadDelay},
        strip::{encode, StripBus, StripController, StripFrames},
        uart::{SerialEvent, SerialLink},
    };
}
