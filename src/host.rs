//! The slice of a DAW session the controller reads and drives.
//!
//! A host integration implements the four collaborator traits and forwards session changes
//! to the controller as [`HostEvent`]s.

use crate::color::RgbColor;

/// Step direction for everything that moves through an ordered list
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Direction {
    Previous,
    Next,
}

/// Observable state of one clip slot
#[derive(Debug, Copy, Clone, PartialEq, Default)]
pub struct ClipState {
    pub has_content: bool,
    pub playing: bool,
    pub recording: bool,
    /// Waiting for the next launch quantization point
    pub queued: bool,
    pub color: RgbColor,
}

#[derive(Debug, Copy, Clone, PartialEq, Eq, Default)]
pub struct TransportState {
    pub playing: bool,
    pub arranger_record: bool,
}

/// A remote-control parameter with its value normalized to `0.0..=1.0`
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Parameter {
    pub name: String,
    pub value: f32,
}

impl Parameter {
    pub fn new(name: impl Into<String>, value: f32) -> Self {
        Self { name: name.into(), value }
    }
}

/// Session changes pushed into the controller
#[derive(Debug, Clone, PartialEq)]
pub enum HostEvent {
    ClipChanged { track: u8, slot: u8, state: ClipState },
    TransportChanged(TransportState),
    /// The whole parameter page was replaced, e.g. because another device got selected
    ParametersChanged(Vec<Parameter>),
    ParameterChanged { index: usize, parameter: Parameter },
}

pub trait Transport: Send {
    fn play(&mut self);
    fn stop(&mut self);
    fn record(&mut self);
}

/// Launching clips in the visible 16 tracks x 8 scenes window
pub trait ClipLauncher: Send {
    /// `alternate` selects the host's alternate launch behavior
    fn launch(&mut self, track: u8, slot: u8, alternate: bool);
    fn release(&mut self, track: u8, slot: u8, alternate: bool);
    fn stop_track(&mut self, track: u8);
}

/// The parameters of the selected device's current remote-control page
pub trait RemoteControls: Send {
    /// Mark whether a parameter is currently bound to a hardware knob
    fn set_indication(&mut self, index: usize, indicated: bool);
    /// Move a parameter by `delta` of its normalized range
    fn adjust(&mut self, index: usize, delta: f32);
}

pub trait Navigator: Send {
    fn scroll_tracks(&mut self, direction: Direction);
    fn scroll_scenes(&mut self, direction: Direction);
    fn select_track(&mut self, direction: Direction);
    fn select_device(&mut self, direction: Direction);
    fn select_parameter_page(&mut self, direction: Direction);
    fn toggle_device_window(&mut self);
    fn toggle_device_enabled(&mut self);
}

/// The host collaborators a [`Controller`](crate::Controller) drives
pub struct Host {
    pub transport: Box<dyn Transport>,
    pub clips: Box<dyn ClipLauncher>,
    pub remote_controls: Box<dyn RemoteControls>,
    pub navigator: Box<dyn Navigator>,
}
