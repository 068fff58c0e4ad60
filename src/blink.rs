use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::Mutex;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

use crate::color::RgbColor;
use crate::oxi_one::{Cell, SharedOutput, CELL_COUNT};
use crate::MidiError;

/// How long each of the two blink colors is held
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct BlinkTiming {
    pub first: Duration,
    pub second: Duration,
}

impl Default for BlinkTiming {
    fn default() -> Self {
        Self {
            first: Duration::from_millis(150),
            second: Duration::from_millis(500),
        }
    }
}

/// What a grid pad should show
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LedState {
    Off,
    Static(RgbColor),
    /// Alternate between two colors, holding each for its [`BlinkTiming`] duration
    Blink { first: RgbColor, second: RgbColor },
}

struct BlinkTask {
    colors: (RgbColor, RgbColor),
    cancelled: Arc<AtomicBool>,
    handle: JoinHandle<()>,
}

/// Runs at most one blink animation per grid pad.
///
/// The per-pad table is the only shared state and [`start_blink`](Self::start_blink) and
/// [`cancel_blink`](Self::cancel_blink) are its only writers. A task is marked cancelled while
/// the output is locked, and tasks check the mark under that same lock before every frame, so
/// once `cancel_blink` returns the old task can not emit anything. Lock order is always table,
/// then output.
pub struct BlinkScheduler {
    output: SharedOutput,
    tasks: Mutex<Vec<Option<BlinkTask>>>,
    timing: BlinkTiming,
    runtime: Handle,
}

impl BlinkScheduler {
    /// Blink tasks are spawned onto `runtime`, so pads can be updated from threads that are not
    /// part of it, like MIDI input callbacks.
    pub fn new(output: SharedOutput, timing: BlinkTiming, runtime: Handle) -> Self {
        Self {
            output,
            tasks: Mutex::new((0..CELL_COUNT).map(|_| None).collect()),
            timing,
            runtime,
        }
    }

    /// Blink `cell` between two colors, replacing any running animation of that cell
    pub fn start_blink(&self, cell: Cell, first: RgbColor, second: RgbColor) {
        let mut tasks = self.tasks.lock();
        let slot = &mut tasks[cell.index()];
        if let Some(previous) = slot.take() {
            self.stop(previous);
        }

        let cancelled = Arc::new(AtomicBool::new(false));
        let handle = self.runtime.spawn(blink_loop(
            self.output.clone(),
            cell,
            (first, second),
            self.timing,
            cancelled.clone(),
        ));
        *slot = Some(BlinkTask { colors: (first, second), cancelled, handle });
    }

    /// Stop the animation of `cell`. Returns whether one was running.
    pub fn cancel_blink(&self, cell: Cell) -> bool {
        let previous = self.tasks.lock()[cell.index()].take();
        match previous {
            Some(task) => {
                self.stop(task);
                true
            }
            None => false,
        }
    }

    pub fn cancel_all(&self) {
        let mut tasks = self.tasks.lock();
        for task in tasks.iter_mut().filter_map(Option::take) {
            self.stop(task);
        }
    }

    fn stop(&self, task: BlinkTask) {
        let _output = self.output.lock();
        task.cancelled.store(true, Ordering::SeqCst);
        task.handle.abort();
    }

    pub fn is_blinking(&self, cell: Cell) -> bool {
        self.tasks.lock()[cell.index()].is_some()
    }

    pub fn active_count(&self) -> usize {
        self.tasks.lock().iter().filter(|task| task.is_some()).count()
    }

    /// Light `cell` with a fixed color, stopping its animation first
    pub fn set_color(&self, cell: Cell, color: RgbColor) -> Result<(), MidiError> {
        self.cancel_blink(cell);
        self.output.lock().set_led(cell, color)
    }

    /// Bring `cell` into `state`. An animation that already runs with the same colors is left
    /// alone so it keeps its phase.
    pub fn apply(&self, cell: Cell, state: LedState) -> Result<(), MidiError> {
        match state {
            LedState::Off => self.set_color(cell, RgbColor::BLACK),
            LedState::Static(color) => self.set_color(cell, color),
            LedState::Blink { first, second } => {
                let running = self.tasks.lock()[cell.index()]
                    .as_ref()
                    .map(|task| task.colors == (first, second))
                    .unwrap_or(false);
                if !running {
                    self.start_blink(cell, first, second);
                }
                Ok(())
            }
        }
    }
}

impl Drop for BlinkScheduler {
    fn drop(&mut self) {
        self.cancel_all();
    }
}

async fn blink_loop(
    output: SharedOutput,
    cell: Cell,
    (first, second): (RgbColor, RgbColor),
    timing: BlinkTiming,
    cancelled: Arc<AtomicBool>,
) {
    loop {
        for (color, hold) in [(first, timing.first), (second, timing.second)] {
            {
                let mut output = output.lock();
                if cancelled.load(Ordering::SeqCst) {
                    return;
                }
                if let Err(e) = output.set_led(cell, color) {
                    log::error!("Blinking {:?} failed: {}", cell, e);
                }
            }
            tokio::time::sleep(hold).await;
        }
    }
}
