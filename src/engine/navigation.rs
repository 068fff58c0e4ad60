use std::fmt;

use serde::Deserialize;

use crate::host::{Direction, Navigator};
use crate::oxi_one::FunctionButton;

/// What the four arrow buttons currently move through
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NavigationMode {
    Scene,
    Track,
    Device,
}

impl NavigationMode {
    /// The mode the cycle button switches to
    pub fn next(self) -> Self {
        match self {
            Self::Scene => Self::Track,
            Self::Track => Self::Device,
            Self::Device => Self::Scene,
        }
    }
}

impl fmt::Display for NavigationMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scene => "Scene",
            Self::Track => "Track",
            Self::Device => "Device",
        })
    }
}

#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum Arrow {
    Up,
    Down,
    Left,
    Right,
}

impl Arrow {
    pub fn from_button(button: FunctionButton) -> Option<Self> {
        match button {
            FunctionButton::Up32 => Some(Self::Up),
            FunctionButton::Down48 => Some(Self::Down),
            FunctionButton::Left16 => Some(Self::Left),
            FunctionButton::Right64 => Some(Self::Right),
            _ => None,
        }
    }

    fn direction(self) -> Direction {
        match self {
            Self::Up | Self::Left => Direction::Previous,
            Self::Down | Self::Right => Direction::Next,
        }
    }

    fn is_vertical(self) -> bool {
        matches!(self, Self::Up | Self::Down)
    }
}

/// A single navigation step in the host
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
pub enum NavAction {
    ScrollTracks(Direction),
    ScrollScenes(Direction),
    SelectTrack(Direction),
    SelectDevice(Direction),
    SelectParameterPage(Direction),
}

impl NavAction {
    /// What an arrow button does in a given mode
    pub fn resolve(mode: NavigationMode, arrow: Arrow) -> Self {
        let direction = arrow.direction();
        match (mode, arrow.is_vertical()) {
            (NavigationMode::Scene, true) => Self::ScrollTracks(direction),
            (NavigationMode::Scene, false) => Self::ScrollScenes(direction),
            (NavigationMode::Track, true) => Self::SelectTrack(direction),
            (NavigationMode::Track, false) => Self::SelectDevice(direction),
            (NavigationMode::Device, true) => Self::SelectDevice(direction),
            (NavigationMode::Device, false) => Self::SelectParameterPage(direction),
        }
    }

    pub fn perform(self, navigator: &mut dyn Navigator) {
        match self {
            Self::ScrollTracks(direction) => navigator.scroll_tracks(direction),
            Self::ScrollScenes(direction) => navigator.scroll_scenes(direction),
            Self::SelectTrack(direction) => navigator.select_track(direction),
            Self::SelectDevice(direction) => navigator.select_device(direction),
            Self::SelectParameterPage(direction) => navigator.select_parameter_page(direction),
        }
    }
}

/// The navigation mode state machine. The only transition is [`cycle`](Self::cycle).
#[derive(Debug, Clone)]
pub struct Navigation {
    mode: NavigationMode,
}

impl Navigation {
    pub fn new(initial: NavigationMode) -> Self {
        Self { mode: initial }
    }

    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    pub fn cycle(&mut self) -> NavigationMode {
        self.mode = self.mode.next();
        log::info!("{} Mode", self.mode);
        self.mode
    }

    pub fn resolve(&self, arrow: Arrow) -> NavAction {
        NavAction::resolve(self.mode, arrow)
    }

    /// Device-only commands are ignored elsewhere
    pub fn allows_device_commands(&self) -> bool {
        self.mode == NavigationMode::Device
    }
}
