//! Prints the bytes a color would put on the bus, without touching hardware.
//!
//! Usage: `frame-dump <color> [led count]`

use anyhow::{bail, Error};
use dotstar_relay::prelude::*;

fn main() -> Result<(), Error> {
    let mut args = std::env::args().skip(1);

    let Some(token) = args.next() else {
        bail!("usage: frame-dump <color> [led count]");
    };
    let count = match args.next() {
        Some(count) => count.parse()?,
        None => STRIP_LENGTH,
    };

    let value = resolve(&token)?;
    let frames = encode(&vec![value; count])?;

    println!("{token}: {value}, {count} LEDs, {} bytes", frames.len());
    println!("{frames}");

    Ok(())
}
