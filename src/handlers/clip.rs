use std::sync::Arc;

use super::ShiftState;
use crate::blink::{BlinkScheduler, LedState};
use crate::color::RgbColor;
use crate::engine::Handler;
use crate::host::{ClipLauncher, ClipState, HostEvent};
use crate::oxi_one::{Cell, Message, CELL_COUNT};

/// The pad color a clip slot should show
pub fn clip_led_state(state: &ClipState) -> LedState {
    if state.queued {
        LedState::Blink { first: RgbColor::GREEN, second: state.color }
    } else if state.playing {
        LedState::Static(RgbColor::GREEN)
    } else if state.recording {
        LedState::Static(RgbColor::RED)
    } else if state.has_content {
        LedState::Static(state.color)
    } else {
        LedState::Off
    }
}

/// Launches clips from the grid. Columns are tracks, rows are scenes.
pub struct ClipHandler {
    launcher: Box<dyn ClipLauncher>,
    blinks: Arc<BlinkScheduler>,
    shift: ShiftState,
    clips: Vec<ClipState>,
}

impl ClipHandler {
    pub fn new(launcher: Box<dyn ClipLauncher>, blinks: Arc<BlinkScheduler>, shift: ShiftState) -> Self {
        Self { launcher, blinks, shift, clips: vec![ClipState::default(); CELL_COUNT] }
    }

    pub fn clip(&self, cell: Cell) -> &ClipState {
        &self.clips[cell.index()]
    }

    fn press(&mut self, cell: Cell) {
        let (track, slot) = (cell.col(), cell.row());
        let clip = self.clips[cell.index()];
        if clip.playing || clip.recording {
            self.launcher.stop_track(track);
        } else {
            self.launcher.launch(track, slot, self.shift.is_held());
        }
    }

    fn release(&mut self, cell: Cell) {
        if self.clips[cell.index()].playing {
            self.launcher.release(cell.col(), cell.row(), self.shift.is_held());
        }
    }
}

impl Handler for ClipHandler {
    fn try_handle(&mut self, msg: &Message) -> bool {
        match *msg {
            Message::GridPress { cell } => self.press(cell),
            Message::GridRelease { cell } => self.release(cell),
            _ => return false,
        }
        true
    }

    fn observe(&mut self, event: &HostEvent) {
        if let HostEvent::ClipChanged { track, slot, state } = *event {
            let Some(cell) = Cell::new(track, slot) else {
                log::debug!("Clip {}/{} is outside the grid", track, slot);
                return;
            };
            self.clips[cell.index()] = state;
            if let Err(e) = self.blinks.apply(cell, clip_led_state(&state)) {
                log::warn!("Updating pad {:?} failed: {}", cell, e);
            }
        }
    }
}
