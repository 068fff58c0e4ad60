use std::sync::Arc;

use tokio::runtime::Handle;

use crate::blink::{BlinkScheduler, LedState};
use crate::engine::{Handler, InputRouter};
use crate::handlers::{ClipHandler, NavHandler, RemoteHandler, ShiftState, TransportHandler};
use crate::host::{Host, HostEvent};
use crate::oxi_one::{Cell, Message, Output, SharedOutput};
use crate::protocols::{HandshakeGate, HandshakeState};
use crate::settings::Settings;
use crate::MidiError;

/// Ties the device to a host session.
///
/// Input goes to [`on_midi`](Self::on_midi), session changes to [`notify`](Self::notify). Both
/// may be called from any thread, but not concurrently; wrap the controller in a mutex when the
/// input callback and the host run on different threads.
pub struct Controller {
    output: SharedOutput,
    blinks: Arc<BlinkScheduler>,
    router: InputRouter,
    gate: HandshakeGate,
}

impl Controller {
    /// Handlers are registered in priority order: clip grid, remote parameters, navigation,
    /// transport. Blink animations run on `runtime`.
    pub fn new(output: Output, host: Host, settings: &Settings, runtime: Handle) -> Result<Self, crate::ParseHexError> {
        let output = output.shared();
        let blinks = Arc::new(BlinkScheduler::new(output.clone(), settings.blink_timing(), runtime));
        let shift = ShiftState::default();

        let mut router = InputRouter::new();
        router.register(Box::new(ClipHandler::new(host.clips, blinks.clone(), shift.clone())));
        router.register(Box::new(RemoteHandler::new(host.remote_controls, output.clone(), shift)));
        router.register(Box::new(NavHandler::new(host.navigator, settings.default_navigation_mode)));
        router.register(Box::new(TransportHandler::new(host.transport, output.clone())));

        let gate = HandshakeGate::new(settings.ack_frame()?, settings.lenient_exit);

        Ok(Self { output, blinks, router, gate })
    }

    /// Add a handler behind the built-in ones
    pub fn register(&mut self, handler: Box<dyn Handler>) {
        self.router.register(handler);
    }

    /// Show `state` on a pad. A static color stops the pad's animation before it is sent.
    pub fn set_pad(&self, cell: Cell, state: LedState) -> Result<(), MidiError> {
        self.blinks.apply(cell, state)
    }

    /// Show newline-separated text on the OLED until the next parameter redraw
    pub fn update_screen(&self, text: &str) -> Result<(), MidiError> {
        self.output.lock().update_screen(text)
    }

    /// Paint the light test pattern over the whole grid, stopping every animation first
    pub fn test_lights(&self) -> Result<(), MidiError> {
        self.blinks.cancel_all();
        self.output.lock().test_lights()
    }

    pub fn handshake_state(&self) -> HandshakeState {
        self.gate.state()
    }

    /// Request remote mode and blank the display
    pub fn init(&mut self) -> Result<(), MidiError> {
        let frame = self.gate.begin();
        let mut output = self.output.lock();
        output.send_frame(&frame)?;
        output.clear_screen()
    }

    pub fn on_midi(&mut self, msg: Message) {
        match &msg {
            Message::Sysex(data) => {
                if !self.gate.acknowledge(data) {
                    log::warn!("Ignoring unexpected sysex {:02x?}", data);
                }
            }
            _ => {
                self.router.dispatch(&msg);
            }
        }
    }

    pub fn notify(&mut self, event: HostEvent) {
        self.router.broadcast(&event);
    }

    /// Stop all animations, blank the device and leave remote mode
    pub fn exit(&mut self) -> Result<(), MidiError> {
        self.blinks.cancel_all();

        let mut output = self.output.lock();
        output.clear_screen()?;
        if let Some(frame) = self.gate.finish() {
            output.send_frame(&frame)?;
        }
        Ok(())
    }
}
