use std::sync::Arc;

use midir::{MidiInput, MidiInputConnection, MidiInputPort, MidiOutput, MidiOutputConnection};
use parking_lot::Mutex;

use crate::{ok_or_continue, MidiError};

fn guess_port<T: midir::MidiIO>(midi_io: &T, keyword: &str) -> Option<T::Port> {
    for port in midi_io.ports() {
        let name = ok_or_continue!(midi_io.port_name(&port));

        if name.contains(keyword) {
            return Some(port);
        }
    }

    None
}

/// Anything raw MIDI bytes can be written to
pub trait MidiSink: Send {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError>;
}

impl MidiSink for MidiOutputConnection {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        MidiOutputConnection::send(self, bytes)?;
        Ok(())
    }
}

/// A [`MidiSink`] that records every message instead of sending it. Clones share the same record.
#[derive(Clone, Default, Debug)]
pub struct MockSink {
    sent: Arc<Mutex<Vec<Vec<u8>>>>,
}

impl MockSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Everything sent so far, oldest first
    pub fn sent(&self) -> Vec<Vec<u8>> {
        self.sent.lock().clone()
    }

    /// Return and forget everything sent so far
    pub fn take(&self) -> Vec<Vec<u8>> {
        std::mem::take(&mut *self.sent.lock())
    }
}

impl MidiSink for MockSink {
    fn send(&mut self, bytes: &[u8]) -> Result<(), MidiError> {
        self.sent.lock().push(bytes.to_vec());
        Ok(())
    }
}

pub trait OutputDevice
where
    Self: Sized,
{
    const MIDI_CONNECTION_NAME: &'static str;
    const MIDI_DEVICE_KEYWORD: &'static str;

    /// Initiate from an existing midir connection.
    fn from_connection(connection: MidiOutputConnection) -> Result<Self, MidiError>;

    /// Connect to the first output port whose name contains the device keyword.
    fn guess() -> Result<Self, MidiError> {
        Self::guess_by_keyword(Self::MIDI_DEVICE_KEYWORD)
    }

    fn guess_by_keyword(keyword: &str) -> Result<Self, MidiError> {
        let midi_output = MidiOutput::new(crate::APPLICATION_NAME)?;

        let port = guess_port(&midi_output, keyword)
            .ok_or_else(|| MidiError::NoPortFound { keyword: keyword.to_string() })?;
        log::debug!("Using output port {:?}", midi_output.port_name(&port)?);

        let connection = midi_output.connect(&port, Self::MIDI_CONNECTION_NAME)?;
        Self::from_connection(connection)
    }
}

/// Keeps an input port open. Dropping it closes the port.
pub struct InputDeviceHandler {
    #[allow(dead_code)]
    connection: MidiInputConnection<()>,
}

pub trait InputDevice: 'static {
    const MIDI_CONNECTION_NAME: &'static str;
    const MIDI_DEVICE_KEYWORD: &'static str;
    type Message;

    fn decode_message(timestamp: u64, data: &[u8]) -> Self::Message;

    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn from_port<F>(
        midi_input: MidiInput,
        port: &MidiInputPort,
        mut user_callback: F,
    ) -> Result<InputDeviceHandler, MidiError>
    where
        F: FnMut(Self::Message) + Send + 'static,
    {
        let midir_callback = move |timestamp: u64, data: &[u8], _: &mut _| {
            let msg = Self::decode_message(timestamp, data);
            (user_callback)(msg);
        };

        let connection = midi_input.connect(port, Self::MIDI_CONNECTION_NAME, midir_callback, ())?;
        Ok(InputDeviceHandler { connection })
    }

    /// Search the midi devices and choose the first one matching the device keyword.
    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn guess<F>(user_callback: F) -> Result<InputDeviceHandler, MidiError>
    where
        F: FnMut(Self::Message) + Send + 'static,
    {
        Self::guess_by_keyword(Self::MIDI_DEVICE_KEYWORD, user_callback)
    }

    #[must_use = "If not saved, the connection will be immediately dropped"]
    fn guess_by_keyword<F>(keyword: &str, user_callback: F) -> Result<InputDeviceHandler, MidiError>
    where
        F: FnMut(Self::Message) + Send + 'static,
    {
        let mut midi_input = MidiInput::new(crate::APPLICATION_NAME)?;
        // sysex carries the remote mode acknowledgement
        midi_input.ignore(midir::Ignore::None);

        let port = guess_port(&midi_input, keyword)
            .ok_or_else(|| MidiError::NoPortFound { keyword: keyword.to_string() })?;
        log::debug!("Using input port {:?}", midi_input.port_name(&port)?);

        Self::from_port(midi_input, &port, user_callback)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mock_sink_records_in_order() {
        let sink = MockSink::new();
        let mut writer = sink.clone();
        writer.send(&[0x90, 1, 127]).unwrap();
        writer.send(&[0x80, 1, 0]).unwrap();
        assert_eq!(sink.sent(), vec![vec![0x90, 1, 127], vec![0x80, 1, 0]]);
        assert_eq!(sink.take().len(), 2);
        assert!(sink.sent().is_empty());
    }
}
