use packed_struct::{prelude::*, types::bits::Bits};

use crate::color::LedValue;

/// The three marker bits that open every LED frame.
const LED_FRAME_MARKER: u8 = 0b111;

/// Order the color channels are clocked onto the wire after the header byte.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// Blue, green, red. What SK9822 and APA102 strips expect.
    Bgr,
    /// Red, green, blue.
    Rgb,
}

impl ChannelOrder {
    pub const fn arrange(self, value: &LedValue) -> [u8; 3] {
        match self {
            ChannelOrder::Bgr => [value.blue(), value.green(), value.red()],
            ChannelOrder::Rgb => [value.red(), value.green(), value.blue()],
        }
    }
}

// byte | Bits & Definition
// 0    | 0xE0 = Marker, always 0b111
//      | 0x1F = Global brightness
// 1    | First channel in wire order
// 2    | Second channel in wire order
// 3    | Third channel in wire order
#[derive(PackedStruct, Default, Debug, PartialEq, Clone)]
#[packed_struct(bit_numbering = "msb0")]
pub struct LedFramePack {
    #[packed_field(bits = "0..=2")]
    pub marker: Integer<u8, Bits<3>>,
    #[packed_field(bits = "3..=7")]
    pub brightness: Integer<u8, Bits<5>>,
    #[packed_field(bits = "8..=15")]
    pub first: u8,
    #[packed_field(bits = "16..=23")]
    pub second: u8,
    #[packed_field(bits = "24..=31")]
    pub third: u8,
}

impl LedFramePack {
    pub fn new(value: &LedValue, order: ChannelOrder) -> Self {
        let [first, second, third] = order.arrange(value);

        LedFramePack {
            marker: LED_FRAME_MARKER.into(),
            brightness: value.brightness().into(),
            first,
            second,
            third,
        }
    }
}
