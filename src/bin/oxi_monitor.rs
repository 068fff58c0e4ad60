//! Connects to an OXI ONE, puts it into remote mode and plays a small in-memory session on it:
//! pads launch and stop clips, the encoders move parameters and the transport buttons toggle
//! playback. Everything the session does is logged.

use std::path::Path;
use std::sync::Arc;

use anyhow::{anyhow, Context};
use clap::Parser;
use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::sync::mpsc::{self, UnboundedSender};

use oxi_one::engine::Handler;
use oxi_one::host::{
    ClipLauncher, ClipState, Direction, HostEvent, Navigator, Parameter, RemoteControls, Transport,
    TransportState,
};
use oxi_one::oxi_one::{GRID_HEIGHT, GRID_WIDTH};
use oxi_one::{Controller, Host, Input, InputDevice as _, Message, Output, OutputDevice as _, RgbColor, Settings};

#[derive(Parser, Debug)]
#[clap(
    name = "OXI ONE remote monitor",
    version = env!("CARGO_PKG_VERSION"),
)]
struct Args {
    #[clap(short, long, help = "Config file (TOML)")]
    config: Option<String>,

    #[clap(short, long, help = "Show this text on the OLED after connecting")]
    text: Option<String>,

    #[clap(long, help = "Paint the light test pattern before starting")]
    test_lights: bool,
}

/// A tiny stand-in for a DAW session. Changes are reported back through `events`.
#[derive(Clone)]
struct DemoSession {
    events: UnboundedSender<HostEvent>,
    clips: Arc<Mutex<Vec<ClipState>>>,
    transport: Arc<Mutex<TransportState>>,
    parameters: Arc<Mutex<Vec<Parameter>>>,
}

impl DemoSession {
    fn new(events: UnboundedSender<HostEvent>) -> Self {
        let parameters = ["Cutoff", "Resonance", "Drive", "Env Amount", "Attack", "Decay", "Sustain", "Release"]
            .iter()
            .map(|name| Parameter::new(*name, 0.5))
            .collect();

        Self {
            events,
            clips: Arc::new(Mutex::new(vec![ClipState::default(); GRID_WIDTH as usize * GRID_HEIGHT as usize])),
            transport: Arc::new(Mutex::new(TransportState::default())),
            parameters: Arc::new(Mutex::new(parameters)),
        }
    }

    fn host(&self) -> Host {
        Host {
            transport: Box::new(self.clone()),
            clips: Box::new(self.clone()),
            remote_controls: Box::new(self.clone()),
            navigator: Box::new(self.clone()),
        }
    }

    fn emit(&self, event: HostEvent) {
        if self.events.send(event).is_err() {
            log::debug!("Session event dropped during shutdown");
        }
    }

    fn set_clip(&self, track: u8, slot: u8, update: impl FnOnce(&mut ClipState)) {
        let index = slot as usize * GRID_WIDTH as usize + track as usize;
        let state = {
            let mut clips = self.clips.lock();
            update(&mut clips[index]);
            clips[index]
        };
        self.emit(HostEvent::ClipChanged { track, slot, state });
    }

    fn set_transport(&self, update: impl FnOnce(&mut TransportState)) {
        let state = {
            let mut transport = self.transport.lock();
            update(&mut transport);
            *transport
        };
        self.emit(HostEvent::TransportChanged(state));
    }

    fn initial_events(&self) -> Vec<HostEvent> {
        vec![
            HostEvent::TransportChanged(*self.transport.lock()),
            HostEvent::ParametersChanged(self.parameters.lock().clone()),
        ]
    }
}

impl Transport for DemoSession {
    fn play(&mut self) {
        log::info!("Play");
        self.set_transport(|t| t.playing = true);
    }

    fn stop(&mut self) {
        log::info!("Stop");
        self.set_transport(|t| t.playing = false);
    }

    fn record(&mut self) {
        log::info!("Record");
        self.set_transport(|t| t.arranger_record = !t.arranger_record);
    }
}

impl ClipLauncher for DemoSession {
    fn launch(&mut self, track: u8, slot: u8, alternate: bool) {
        log::info!("Launch clip {}/{} (alternate: {})", track, slot, alternate);
        let hue = track as f32 / GRID_WIDTH as f32;
        for other in (0..GRID_HEIGHT).filter(|&s| s != slot) {
            self.set_clip(track, other, |clip| clip.playing = false);
        }
        self.set_clip(track, slot, |clip| {
            clip.has_content = true;
            clip.playing = true;
            clip.color = RgbColor::from_normalized(1.0 - hue, hue, 0.5);
        });
    }

    fn release(&mut self, track: u8, slot: u8, alternate: bool) {
        log::info!("Release clip {}/{} (alternate: {})", track, slot, alternate);
    }

    fn stop_track(&mut self, track: u8) {
        log::info!("Stop track {}", track);
        for slot in 0..GRID_HEIGHT {
            self.set_clip(track, slot, |clip| clip.playing = false);
        }
    }
}

impl RemoteControls for DemoSession {
    fn set_indication(&mut self, index: usize, indicated: bool) {
        log::debug!("Parameter {} indicated: {}", index, indicated);
    }

    fn adjust(&mut self, index: usize, delta: f32) {
        let parameter = {
            let mut parameters = self.parameters.lock();
            let Some(parameter) = parameters.get_mut(index) else {
                return;
            };
            parameter.value = (parameter.value + delta).clamp(0.0, 1.0);
            parameter.clone()
        };
        self.emit(HostEvent::ParameterChanged { index, parameter });
    }
}

impl Navigator for DemoSession {
    fn scroll_tracks(&mut self, direction: Direction) {
        log::info!("Scroll tracks {:?}", direction);
    }

    fn scroll_scenes(&mut self, direction: Direction) {
        log::info!("Scroll scenes {:?}", direction);
    }

    fn select_track(&mut self, direction: Direction) {
        log::info!("Select track {:?}", direction);
    }

    fn select_device(&mut self, direction: Direction) {
        log::info!("Select device {:?}", direction);
    }

    fn select_parameter_page(&mut self, direction: Direction) {
        log::info!("Select parameter page {:?}", direction);
    }

    fn toggle_device_window(&mut self) {
        log::info!("Toggle device window");
    }

    fn toggle_device_enabled(&mut self) {
        log::info!("Toggle device enabled");
    }
}

/// Reports whatever the built-in handlers leave alone
struct MonitorHandler;

impl Handler for MonitorHandler {
    fn try_handle(&mut self, msg: &Message) -> bool {
        match msg {
            Message::ButtonPress { button } => println!("Unassigned button {:?}", button),
            Message::Unknown(data) => println!("Unknown message {:02x?}", data),
            _ => return false,
        }
        true
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = Args::parse();

    let settings = Settings::load(args.config.as_deref().map(Path::new)).context("Can't load settings")?;
    settings.validate().map_err(|e| anyhow!(e)).context("Invalid settings")?;
    log::info!("Running with settings: {:?}", settings);

    let output = Output::guess_by_keyword(&settings.port_keyword).context("Couldn't open OXI ONE output")?;

    let (events_tx, mut events_rx) = mpsc::unbounded_channel();
    let session = DemoSession::new(events_tx);

    let mut controller = Controller::new(output, session.host(), &settings, Handle::current())
        .context("Invalid handshake acknowledgement")?;
    controller.register(Box::new(MonitorHandler));

    let (midi_tx, mut midi_rx) = mpsc::unbounded_channel();
    let _input = Input::guess_by_keyword(&settings.port_keyword, move |msg| {
        let _ = midi_tx.send(msg);
    })
    .context("Couldn't open OXI ONE input")?;

    controller.init().context("Entering remote mode failed")?;
    if args.test_lights {
        controller.test_lights()?;
    }
    for event in session.initial_events() {
        controller.notify(event);
    }
    if let Some(text) = args.text {
        controller.update_screen(&text)?;
    }

    let ctrl_c = tokio::signal::ctrl_c();
    tokio::pin!(ctrl_c);

    loop {
        tokio::select! {
            Some(msg) = midi_rx.recv() => controller.on_midi(msg),
            Some(event) = events_rx.recv() => controller.notify(event),
            _ = &mut ctrl_c => break,
        }
    }

    log::info!("Shutting down");
    controller.exit().context("Leaving remote mode failed")?;
    Ok(())
}
