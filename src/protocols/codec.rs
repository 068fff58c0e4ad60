use std::fmt;
use std::str::FromStr;

use crate::color::RgbColor;
use crate::errors::ParseHexError;
use crate::oxi_one::{Cell, Light, LightState, Raster, GRID_WIDTH};

pub const SYSEX_START: u8 = 0xf0;
pub const SYSEX_END: u8 = 0xf7;

/// Payload of the frame that both enters and leaves remote mode
pub const REMOTE_MODE: [u8; 7] = [0x00, 0x21, 0x5b, 0x00, 0x01, 0x06, 0x55];

pub const LED_MARKER: u8 = 0x01;
pub const LIGHT_MARKER: u8 = 0x02;
pub const BITMAP_MARKER: u8 = 0x03;

/// Split a byte into its high and low nibble, both of which are valid sysex data bytes.
///
/// This is the only byte-split used on the wire.
pub fn split_nibbles(value: u8) -> [u8; 2] {
    [(value >> 4) & 0x0f, value & 0x0f]
}

/// A complete sysex frame including the `f0`/`f7` delimiters.
///
/// Its [`Display`](fmt::Display) form is the textual one MIDI hosts accept: lowercase two-digit
/// hex tokens separated by single spaces.
/// ```
/// # use oxi_one::SysexFrame;
/// let frame: SysexFrame = "f0 02 00 08 00 01 f7".parse()?;
/// assert_eq!(frame.payload(), &[0x02, 0x00, 0x08, 0x00, 0x01]);
/// assert_eq!(frame.to_string(), "f0 02 00 08 00 01 f7");
/// # Ok::<(), oxi_one::ParseHexError>(())
/// ```
#[derive(Debug, Clone, Hash, Eq, PartialEq)]
pub struct SysexFrame {
    bytes: Vec<u8>,
}

impl SysexFrame {
    pub fn new(payload: &[u8]) -> Self {
        let mut bytes = Vec::with_capacity(payload.len() + 2);
        bytes.push(SYSEX_START);
        bytes.extend_from_slice(payload);
        bytes.push(SYSEX_END);
        Self { bytes }
    }

    /// Build a frame from a marker byte and values that each get split into two nibbles
    fn split(marker: u8, values: &[u8]) -> Self {
        let mut payload = Vec::with_capacity(1 + values.len() * 2);
        payload.push(marker);
        payload.extend(values.iter().flat_map(|&v| split_nibbles(v)));
        Self::new(&payload)
    }

    pub fn from_hex(text: &str) -> Result<Self, ParseHexError> {
        let bytes = text
            .split_whitespace()
            .enumerate()
            .map(|(position, token)| {
                if token.len() > 2 {
                    return Err(ParseHexError::InvalidToken { position, token: token.to_string() });
                }
                u8::from_str_radix(token, 16)
                    .map_err(|_| ParseHexError::InvalidToken { position, token: token.to_string() })
            })
            .collect::<Result<Vec<u8>, _>>()?;

        match bytes.as_slice() {
            [SYSEX_START, .., SYSEX_END] => Ok(Self { bytes }),
            _ => Err(ParseHexError::MissingDelimiters),
        }
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Everything between the delimiters
    pub fn payload(&self) -> &[u8] {
        &self.bytes[1..self.bytes.len() - 1]
    }

    pub fn matches(&self, data: &[u8]) -> bool {
        self.bytes == data
    }
}

impl fmt::Display for SysexFrame {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, byte) in self.bytes.iter().enumerate() {
            if i > 0 {
                f.write_str(" ")?;
            }
            write!(f, "{:02x}", byte)?;
        }
        Ok(())
    }
}

impl FromStr for SysexFrame {
    type Err = ParseHexError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_hex(s)
    }
}

/// The frame used to both enter and leave remote mode
pub fn encode_remote_mode() -> SysexFrame {
    SysexFrame::new(&REMOTE_MODE)
}

/// `f0 01 x y r_hi r_lo g_hi g_lo b_hi b_lo f7`, where `x y` are the device row and column
/// taken from the cell's note.
pub fn encode_led(cell: Cell, color: RgbColor) -> SysexFrame {
    let note = cell.note();
    let mut payload = vec![LED_MARKER, note / GRID_WIDTH, note % GRID_WIDTH];
    payload.extend([color.r, color.g, color.b].iter().flat_map(|&c| split_nibbles(c)));
    SysexFrame::new(&payload)
}

/// `f0 02 id_hi id_lo value_hi value_lo f7`
pub fn encode_light(light: Light, state: LightState) -> SysexFrame {
    SysexFrame::split(LIGHT_MARKER, &[light.id(), state.value()])
}

/// `f0 03` followed by the packed OLED pages, two nibbles per byte, then `f7`
pub fn encode_bitmap(raster: &Raster) -> SysexFrame {
    SysexFrame::split(BITMAP_MARKER, &raster.to_pages())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::oxi_one::{DISPLAY_PAGES, DISPLAY_WIDTH};

    #[test]
    fn test_split_nibbles() {
        assert_eq!(split_nibbles(0x00), [0x0, 0x0]);
        assert_eq!(split_nibbles(0xff), [0xf, 0xf]);
        assert_eq!(split_nibbles(0xa5), [0xa, 0x5]);
        assert_eq!(split_nibbles(200), [0xc, 0x8]);
    }

    #[test]
    fn test_remote_mode_frame() {
        assert_eq!(encode_remote_mode().to_string(), "f0 00 21 5b 00 01 06 55 f7");
    }

    #[test]
    fn test_led_frame() {
        let cell = Cell::new(3, 0).unwrap();
        let frame = encode_led(cell, RgbColor::new(255, 0x12, 0));
        assert_eq!(frame.to_string(), "f0 01 07 03 0f 0f 01 02 00 00 f7");

        let bottom_right = Cell::new(15, 7).unwrap();
        let frame = encode_led(bottom_right, RgbColor::GREEN);
        assert_eq!(frame.to_string(), "f0 01 00 0f 00 00 0f 0f 00 00 f7");
    }

    #[test]
    fn test_light_frame() {
        let frame = encode_light(Light::Play, LightState::On);
        assert_eq!(frame.to_string(), "f0 02 00 0c 00 01 f7");
        let frame = encode_light(Light::Down, LightState::ShortOn);
        assert_eq!(frame.to_string(), "f0 02 03 04 00 06 f7");
    }

    #[test]
    fn test_blank_bitmap_frame() {
        let frame = encode_bitmap(&Raster::blank());
        let bytes = frame.as_bytes();
        assert_eq!(bytes.len(), 3 + DISPLAY_PAGES * DISPLAY_WIDTH * 2);
        assert_eq!(&bytes[..2], &[SYSEX_START, BITMAP_MARKER]);
        assert_eq!(bytes.last(), Some(&SYSEX_END));
        assert!(bytes[2..bytes.len() - 1].iter().all(|&b| b == 0));
    }

    #[test]
    fn test_bitmap_frame_data_bytes_stay_7bit() {
        let raster = Raster::from_lines(&["########", "", "", "", "status"]);
        let frame = encode_bitmap(&raster);
        assert!(frame.payload().iter().all(|&b| b < 0x80));
        assert!(frame.payload()[1..].iter().any(|&b| b == 0x0f));
    }

    #[test]
    fn test_from_hex() {
        let frame = SysexFrame::from_hex("  F0 00 21 5b 00 01 06 55 f7\n").unwrap();
        assert_eq!(frame, encode_remote_mode());
        assert!(frame.matches(&[0xf0, 0x00, 0x21, 0x5b, 0x00, 0x01, 0x06, 0x55, 0xf7]));

        assert_eq!(
            SysexFrame::from_hex("f0 zz f7"),
            Err(ParseHexError::InvalidToken { position: 1, token: "zz".to_string() })
        );
        assert_eq!(
            SysexFrame::from_hex("f0 123 f7"),
            Err(ParseHexError::InvalidToken { position: 1, token: "123".to_string() })
        );
        assert_eq!(SysexFrame::from_hex("00 01"), Err(ParseHexError::MissingDelimiters));
        assert_eq!(SysexFrame::from_hex(""), Err(ParseHexError::MissingDelimiters));
        assert_eq!(SysexFrame::from_hex("f0"), Err(ParseHexError::MissingDelimiters));
    }
}
