use crate::engine::Handler;
use crate::host::{HostEvent, Transport, TransportState};
use crate::oxi_one::{FunctionButton, Light, LightState, Message, SharedOutput};
use crate::MidiError;

/// PLAY, STOP and REC, with their lights following the host transport
pub struct TransportHandler {
    transport: Box<dyn Transport>,
    output: SharedOutput,
}

impl TransportHandler {
    pub fn new(transport: Box<dyn Transport>, output: SharedOutput) -> Self {
        Self { transport, output }
    }

    fn show(&self, state: TransportState) -> Result<(), MidiError> {
        let stop = if state.playing { LightState::Off } else { LightState::ShortOn };

        let mut output = self.output.lock();
        output.set_light(Light::Play, state.playing.into())?;
        output.set_light(Light::Stop, stop)?;
        output.set_light(Light::Rec, state.arranger_record.into())
    }
}

impl Handler for TransportHandler {
    fn try_handle(&mut self, msg: &Message) -> bool {
        match *msg {
            Message::ButtonPress { button: FunctionButton::Play } => self.transport.play(),
            Message::ButtonPress { button: FunctionButton::Stop } => self.transport.stop(),
            Message::ButtonPress { button: FunctionButton::Rec } => self.transport.record(),
            Message::ButtonRelease {
                button: FunctionButton::Play | FunctionButton::Stop | FunctionButton::Rec,
            } => {}
            _ => return false,
        }
        true
    }

    fn observe(&mut self, event: &HostEvent) {
        if let HostEvent::TransportChanged(state) = *event {
            if let Err(e) = self.show(state) {
                log::warn!("Updating transport lights failed: {}", e);
            }
        }
    }
}
