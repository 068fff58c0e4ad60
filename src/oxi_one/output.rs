use std::sync::Arc;

use midir::MidiOutputConnection;
use parking_lot::Mutex;

use super::{Cell, Light, LightState, Raster, GRID_HEIGHT};
use crate::color::RgbColor;
use crate::protocols::{encode_bitmap, encode_led, encode_light, encode_remote_mode, SysexFrame};
use crate::{MidiError, MidiSink};

/// An [`Output`] shared between the input handlers and the blink tasks
pub type SharedOutput = Arc<Mutex<Output>>;

/// The OXI ONE output connection.
///
/// Every method sends exactly one sysex frame, except where noted.
pub struct Output {
    sink: Box<dyn MidiSink>,
}

impl crate::OutputDevice for Output {
    const MIDI_DEVICE_KEYWORD: &'static str = "OXI ONE";
    const MIDI_CONNECTION_NAME: &'static str = "OXI ONE Remote Output";

    fn from_connection(connection: MidiOutputConnection) -> Result<Self, MidiError> {
        Ok(Self::new(connection))
    }
}

impl Output {
    /// Wrap any sink, e.g. a [`MockSink`](crate::MockSink) in tests
    pub fn new(sink: impl MidiSink + 'static) -> Self {
        Self { sink: Box::new(sink) }
    }

    pub fn shared(self) -> SharedOutput {
        Arc::new(Mutex::new(self))
    }

    pub fn send_frame(&mut self, frame: &SysexFrame) -> Result<(), MidiError> {
        log::trace!("-> {}", frame);
        self.sink.send(frame.as_bytes())
    }

    pub fn enter_remote_mode(&mut self) -> Result<(), MidiError> {
        self.send_frame(&encode_remote_mode())
    }

    /// The device uses the same frame for leaving and entering remote mode
    pub fn exit_remote_mode(&mut self) -> Result<(), MidiError> {
        self.send_frame(&encode_remote_mode())
    }

    /// Light a grid pad. This does not touch blink animations; go through the
    /// [`BlinkScheduler`](crate::BlinkScheduler) when the pad may be blinking.
    pub fn set_led(&mut self, cell: Cell, color: RgbColor) -> Result<(), MidiError> {
        self.send_frame(&encode_led(cell, color))
    }

    pub fn set_light(&mut self, light: Light, state: LightState) -> Result<(), MidiError> {
        self.send_frame(&encode_light(light, state))
    }

    pub fn draw(&mut self, raster: &Raster) -> Result<(), MidiError> {
        self.send_frame(&encode_bitmap(raster))
    }

    /// Render text lines onto the OLED. See [`Raster::from_lines`].
    pub fn display_lines<S: AsRef<str>>(&mut self, lines: &[S]) -> Result<(), MidiError> {
        self.draw(&Raster::from_lines(lines))
    }

    /// Show newline-separated text on the OLED
    pub fn update_screen(&mut self, text: &str) -> Result<(), MidiError> {
        let lines: Vec<&str> = text.lines().collect();
        self.display_lines(&lines)
    }

    pub fn clear_screen(&mut self) -> Result<(), MidiError> {
        self.display_lines(&["", "", "", ""])
    }

    /// Paint the whole grid with red, green and blue columns that get brighter towards the
    /// bottom. Sends one frame per pad.
    pub fn test_lights(&mut self) -> Result<(), MidiError> {
        const CYCLE: [RgbColor; 3] = [RgbColor::RED, RgbColor::GREEN, RgbColor::BLUE];

        for cell in Cell::all() {
            let base = CYCLE[cell.col() as usize % CYCLE.len()];
            let brightness = (cell.row() + 1) as f32 / GRID_HEIGHT as f32;
            self.set_led(cell, base.scale(brightness))?;
        }
        Ok(())
    }
}
