use std::{collections::VecDeque, time::Duration};

use anyhow::Error;
use dotstar_relay::prelude::*;

#[derive(Default)]
struct RecordingLine {
    levels: Vec<bool>,
}

impl OutputLine for RecordingLine {
    fn set_high(&mut self) {
        self.levels.push(true);
    }

    fn set_low(&mut self) {
        self.levels.push(false);
    }
}

#[derive(Default)]
struct RecordingDelay {
    waits: Vec<Duration>,
}

impl Delay for RecordingDelay {
    fn delay(&mut self, duration: Duration) {
        self.waits.push(duration);
    }
}

#[derive(Default)]
struct RecordingBus {
    writes: Vec<Vec<u8>>,
}

impl StripBus for RecordingBus {
    fn write(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.writes.push(bytes.to_vec());
        Ok(())
    }
}

/// Serial link that replays a script and collects everything sent back.
struct ScriptedLink {
    events: VecDeque<SerialEvent>,
    output: Vec<u8>,
}

impl ScriptedLink {
    fn new(input: &[u8]) -> Self {
        Self {
            events: input.iter().map(|&b| SerialEvent::Byte(b)).collect(),
            output: Vec::new(),
        }
    }

    fn output(&self) -> String {
        String::from_utf8(self.output.clone()).unwrap()
    }
}

impl SerialLink for ScriptedLink {
    fn read_event(&mut self) -> Result<SerialEvent, Error> {
        Ok(self.events.pop_front().unwrap_or(SerialEvent::Closed))
    }

    fn send(&mut self, bytes: &[u8]) -> Result<(), Error> {
        self.output.extend_from_slice(bytes);
        Ok(())
    }
}

struct FailingBus;

impl StripBus for FailingBus {
    fn write(&mut self, _bytes: &[u8]) -> Result<(), Error> {
        anyhow::bail!("bus unplugged")
    }
}

type Interpreter = CommandInterpreter<RecordingLine, RecordingDelay, RecordingBus>;

fn interpreter() -> Interpreter {
    CommandInterpreter::new(
        RelayController::new(RecordingLine::default(), RecordingDelay::default()),
        StripController::new(RecordingBus::default(), STRIP_LENGTH),
    )
}

fn run(interpreter: &mut Interpreter, input: &[u8]) -> Vec<Result<Option<Reply>, DispatchError>> {
    input.iter().map(|&byte| interpreter.feed(byte)).collect()
}

fn expected_led_block(value: LedValue) -> Vec<u8> {
    let [first, second, third] = CHANNEL_ORDER.arrange(&value);
    [0xE0 | value.brightness(), first, second, third].repeat(STRIP_LENGTH)
}

#[test]
fn on_red() {
    let mut interpreter = interpreter();

    let results = run(&mut interpreter, b"on red\r");
    assert!(matches!(
        results.last().unwrap(),
        Ok(Some(Reply::StripOn(value))) if *value == LedValue::rgb(255, 0, 0)
    ));

    let relay = interpreter.relay();
    assert_eq!(relay.state(), RelayState::On);
    // Driven low at startup, then high.
    assert_eq!(relay.line().levels, [false, true]);
    assert_eq!(relay.delay_source().waits, [Duration::from_millis(3000)]);

    let writes = &interpreter.strip().bus().writes;
    assert_eq!(writes.len(), 3);
    assert_eq!(writes[0], [0, 0, 0, 0]);
    assert_eq!(writes[1], expected_led_block(LedValue::rgb(255, 0, 0)));
    assert_eq!(writes[2], vec![0; 34]);
}

#[cfg(not(feature = "rgb-order"))]
#[test]
fn on_red_wire_bytes() {
    let mut interpreter = interpreter();

    run(&mut interpreter, b"on red\r");

    let leds = &interpreter.strip().bus().writes[1];
    assert_eq!(leds.len(), 4 * 67);
    for frame in leds.chunks(4) {
        assert_eq!(frame, [0xFF, 0x00, 0x00, 0xFF]);
    }
}

#[test]
fn on_custom_tuple() {
    let mut interpreter = interpreter();

    run(&mut interpreter, b"on (10,20,30)\r");

    let value = LedValue::new(31, 10, 20, 30).unwrap();
    assert!(interpreter.strip().leds().iter().all(|&led| led == value));
    assert_eq!(interpreter.strip().leds().len(), 67);
    assert_eq!(
        interpreter.strip().bus().writes[1],
        expected_led_block(value)
    );
}

#[test]
fn off_without_bus_write() {
    let mut interpreter = interpreter();

    let results = run(&mut interpreter, b"off\r");
    assert!(matches!(results.last().unwrap(), Ok(Some(Reply::Off))));

    assert_eq!(interpreter.relay().state(), RelayState::Off);
    assert_eq!(interpreter.relay().line().levels, [false, false]);
    assert_eq!(
        interpreter.relay().delay_source().waits,
        [Duration::from_millis(50)]
    );
    assert!(interpreter.strip().bus().writes.is_empty());
}

#[test]
fn off_after_on() {
    let mut interpreter = interpreter();

    run(&mut interpreter, b"on green\roff\r");

    assert_eq!(interpreter.relay().state(), RelayState::Off);
    assert_eq!(interpreter.relay().line().levels, [false, true, false]);
    assert_eq!(interpreter.strip().bus().writes.len(), 3);
}

#[test]
fn second_on_skips_relay_delay() {
    let mut interpreter = interpreter();

    run(&mut interpreter, b"on red\ron blue\r");

    assert_eq!(
        interpreter.relay().delay_source().waits,
        [Duration::from_millis(3000)]
    );
    assert_eq!(interpreter.strip().bus().writes.len(), 6);
    assert_eq!(
        interpreter.strip().bus().writes[4],
        expected_led_block(LedValue::rgb(0, 0, 255))
    );
}

#[test]
fn unknown_color_after_valid_one() {
    let mut interpreter = interpreter();

    let results = run(&mut interpreter, b"on purple\ron teal\r");

    let first = results.iter().position(|r| matches!(r, Ok(Some(_)))).unwrap();
    assert_eq!(first, "on purple".len());
    assert!(matches!(
        results.last().unwrap(),
        Err(DispatchError::Command(CommandError::InvalidColor(token))) if token == "teal"
    ));

    assert_eq!(interpreter.relay().state(), RelayState::On);
    assert_eq!(interpreter.strip().bus().writes.len(), 3);
    assert_eq!(
        interpreter.strip().bus().writes[1],
        expected_led_block(LedValue::rgb(200, 0, 255))
    );
}

#[test]
fn command_too_long_recovers() {
    let mut interpreter = interpreter();

    let results = run(&mut interpreter, &[b'x'; MAX_COMMAND_LENGTH]);
    assert!(matches!(
        results.last().unwrap(),
        Err(DispatchError::Command(CommandError::CommandTooLong))
    ));
    assert!(interpreter.pending_line().is_empty());

    let results = run(&mut interpreter, b"on red\r");
    assert!(matches!(results.last().unwrap(), Ok(Some(Reply::StripOn(_)))));
    assert_eq!(interpreter.strip().bus().writes.len(), 3);
}

#[test]
fn serve_echoes_and_reports() {
    let mut interpreter = interpreter();
    let mut link = ScriptedLink::new(b"on red\ron teal\rdance\r");

    interpreter.serve(&mut link).unwrap();

    let output = link.output();
    assert!(output.starts_with("dotstar-relay ready"));
    assert!(output.contains("on red\r\non (255,0,0) at brightness 31\r\n"));
    assert!(output.contains("on teal\r\ncolor not found\r\n"));
    assert!(output.contains("dance\r\ncommand not recognized\r\n"));
    assert_eq!(interpreter.relay().state(), RelayState::On);
}

#[test]
fn serve_ignores_timeouts() {
    let mut interpreter = interpreter().with_echo(false);
    let mut link = ScriptedLink::new(b"");
    link.events = [
        SerialEvent::Byte(b'o'),
        SerialEvent::Timeout,
        SerialEvent::Byte(b'f'),
        SerialEvent::Timeout,
        SerialEvent::Timeout,
        SerialEvent::Byte(b'f'),
        SerialEvent::Byte(b'\r'),
    ]
    .into();

    interpreter.serve(&mut link).unwrap();

    assert_eq!(
        link.output(),
        "dotstar-relay ready, type `help` for commands\r\noff\r\n"
    );
}

#[test]
fn serve_help_and_colors() {
    let mut interpreter = interpreter().with_echo(false);
    let mut link = ScriptedLink::new(b"help\rcolors\r");

    interpreter.serve(&mut link).unwrap();

    let output = link.output();
    assert!(output.contains("  on <color>  power the strip and fill it with <color>\r\n"));
    assert!(output.contains("Colors:\r\n  blue\r\n  full\r\n"));
    assert!(output.contains("  (<red>,<green>,<blue>)\r\n"));
    assert!(interpreter.strip().bus().writes.is_empty());
    assert_eq!(interpreter.relay().line().levels, [false]);
}

#[test]
fn serve_stops_on_bus_failure() {
    let mut interpreter = CommandInterpreter::new(
        RelayController::new(RecordingLine::default(), RecordingDelay::default()),
        StripController::new(FailingBus, STRIP_LENGTH),
    );
    let mut link = ScriptedLink::new(b"on red\roff\r");

    let err = interpreter.serve(&mut link).unwrap_err();

    assert_eq!(err.to_string(), "bus unplugged");
    assert_eq!(interpreter.relay().state(), RelayState::On);
}
