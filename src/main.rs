use anyhow::Error;
use dotstar_relay::prelude::*;
use env_logger::Env;
use log::{info, warn};

#[cfg(feature = "pi")]
use dotstar_relay::{relay::open_relay_pin, strip::open_spi, uart::open_uart};

#[cfg(not(feature = "pi"))]
use dotstar_relay::{relay::LoggedLine, strip::LoggedBus, uart::StdioLink};

fn main() -> Result<(), Error> {
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();

    info!("Starting config...");
    let config = Config::load().unwrap_or_else(|e| {
        warn!("Could not load config.ron ({e}), using defaults");
        Config::default()
    });

    #[cfg(feature = "pi")]
    let (mut interpreter, mut serial) = {
        info!("Starting relay, strip and serial link...");
        let relay = RelayController::new(open_relay_pin(&config.relay)?, ThreadDelay);
        let strip = StripController::new(open_spi(&config.spi)?, STRIP_LENGTH);
        let serial = open_uart(&config.serial)?;

        (CommandInterpreter::new(relay, strip), serial)
    };

    #[cfg(not(feature = "pi"))]
    let (mut interpreter, mut serial) = {
        info!("No hardware support built in, running against stdin/stdout");
        info!("Serial device {} is not used", config.serial.path);
        let relay = RelayController::new(LoggedLine::default(), ThreadDelay);
        let strip = StripController::new(LoggedBus::default(), STRIP_LENGTH);

        // The terminal already echoes what is typed.
        (CommandInterpreter::new(relay, strip).with_echo(false), StdioLink)
    };

    interpreter.serve(&mut serial)
}
