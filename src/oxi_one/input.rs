use super::{Cell, FunctionButton, KNOB_COUNT};

const NOTE_OFF: u8 = 0x80;
const NOTE_ON: u8 = 0x90;
const CONTROL_CHANGE: u8 = 0xb0;

const GRID_CHANNEL: u8 = 0;
const BUTTON_CHANNEL: u8 = 1;
const ENCODER_CHANNEL: u8 = 0;

#[derive(Debug, Eq, PartialEq, Hash, Clone)]
/// An OXI ONE input message
pub enum Message {
    /// A grid pad was pressed
    GridPress { cell: Cell },
    /// A grid pad was released
    GridRelease { cell: Cell },
    /// A function button was pressed
    ButtonPress { button: FunctionButton },
    /// A function button was released
    ButtonRelease { button: FunctionButton },
    /// An encoder was turned by `steps` detents, positive is clockwise
    Encoder { knob: u8, steps: i8 },
    /// Any system exclusive message, delimiters included
    Sysex(Vec<u8>),
    /// Everything else, kept verbatim
    Unknown(Vec<u8>),
}

/// Decode a 7-bit two's complement relative encoder value: `1..=63` turn clockwise, `64..=127`
/// counter-clockwise.
pub fn decode_relative(value: u8) -> i8 {
    let value = value & 0x7f;
    if value < 64 {
        value as i8
    } else {
        (value as i16 - 128) as i8
    }
}

/// The OXI ONE input connection creator.
pub struct Input;

impl crate::InputDevice for Input {
    const MIDI_DEVICE_KEYWORD: &'static str = "OXI ONE";
    const MIDI_CONNECTION_NAME: &'static str = "OXI ONE Remote Input";
    type Message = Message;

    fn decode_message(_timestamp: u64, data: &[u8]) -> Message {
        match data {
            [0xf0, .., 0xf7] => Message::Sysex(data.to_vec()),
            &[status, note, velocity] if status & 0xf0 == NOTE_ON || status & 0xf0 == NOTE_OFF => {
                let pressed = status & 0xf0 == NOTE_ON && velocity > 0;

                match status & 0x0f {
                    GRID_CHANNEL => match Cell::from_note(note) {
                        Some(cell) if pressed => Message::GridPress { cell },
                        Some(cell) => Message::GridRelease { cell },
                        None => Message::Unknown(data.to_vec()),
                    },
                    BUTTON_CHANNEL => match FunctionButton::from_id(note) {
                        Some(button) if pressed => Message::ButtonPress { button },
                        Some(button) => Message::ButtonRelease { button },
                        None => Message::Unknown(data.to_vec()),
                    },
                    _ => Message::Unknown(data.to_vec()),
                }
            }
            &[status, controller, value]
                if status == CONTROL_CHANGE | ENCODER_CHANNEL && (controller as usize) < KNOB_COUNT =>
            {
                Message::Encoder { knob: controller, steps: decode_relative(value) }
            }
            _ => Message::Unknown(data.to_vec()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::InputDevice;

    fn decode(data: &[u8]) -> Message {
        Input::decode_message(0, data)
    }

    #[test]
    fn test_grid_notes() {
        let top_left = Cell::new(0, 0).unwrap();
        assert_eq!(decode(&[0x90, 112, 100]), Message::GridPress { cell: top_left });
        assert_eq!(decode(&[0x90, 112, 0]), Message::GridRelease { cell: top_left });
        assert_eq!(decode(&[0x80, 112, 64]), Message::GridRelease { cell: top_left });
        assert_eq!(decode(&[0x90, 0, 1]), Message::GridPress { cell: Cell::new(0, 7).unwrap() });
    }

    #[test]
    fn test_function_buttons() {
        assert_eq!(decode(&[0x91, 17, 127]), Message::ButtonPress { button: FunctionButton::Shift });
        assert_eq!(decode(&[0x81, 25, 0]), Message::ButtonRelease { button: FunctionButton::Play });
        assert_eq!(decode(&[0x91, 40, 127]), Message::Unknown(vec![0x91, 40, 127]));
    }

    #[test]
    fn test_encoders() {
        assert_eq!(decode(&[0xb0, 0, 1]), Message::Encoder { knob: 0, steps: 1 });
        assert_eq!(decode(&[0xb0, 3, 127]), Message::Encoder { knob: 3, steps: -1 });
        assert_eq!(decode(&[0xb0, 2, 64]), Message::Encoder { knob: 2, steps: -64 });
        assert_eq!(decode(&[0xb0, 1, 63]), Message::Encoder { knob: 1, steps: 63 });
        assert_eq!(decode(&[0xb0, 4, 1]), Message::Unknown(vec![0xb0, 4, 1]));
        assert_eq!(decode(&[0xb1, 0, 1]), Message::Unknown(vec![0xb1, 0, 1]));
    }

    #[test]
    fn test_sysex_and_garbage() {
        let ack = vec![0xf0, 0x00, 0x21, 0x5b, 0xf7];
        assert_eq!(decode(&ack), Message::Sysex(ack.clone()));
        assert_eq!(decode(&[0x92, 1, 1]), Message::Unknown(vec![0x92, 1, 1]));
        assert_eq!(decode(&[0xf8]), Message::Unknown(vec![0xf8]));
        assert_eq!(decode(&[]), Message::Unknown(vec![]));
    }
}
