/*!
# OXI ONE low-level API

The OXI ONE exposes three surfaces while in remote mode:

- a 16x8 grid of RGB pads, addressed by cell or by MIDI note,
- 55 single-color indicator lights next to the function buttons,
- a 128x64 monochrome OLED.

Grid pads arrive as notes on channel 0, the 33 function buttons as notes on channel 1 and the
four encoders as relative CCs `0..=3` on channel 0.
*/

mod display;
pub use display::*;

mod input;
pub use input::*;

mod output;
pub use output::*;

/// Number of grid columns
pub const GRID_WIDTH: u8 = 16;
/// Number of grid rows
pub const GRID_HEIGHT: u8 = 8;
/// Number of grid cells, and the size of every per-cell table
pub const CELL_COUNT: usize = GRID_WIDTH as usize * GRID_HEIGHT as usize;
/// Number of endless encoders above the display
pub const KNOB_COUNT: usize = 4;

/// A pad on the grid. Row 0 is the top row as the user sees it, column 0 the leftmost column.
///
/// The device numbers pads bottom-up, so the MIDI note of a cell is
/// `col + (7 - row) * 16`. Every note in `0..128` corresponds to exactly one cell.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
pub struct Cell {
    col: u8,
    row: u8,
}

impl Cell {
    pub fn new(col: u8, row: u8) -> Option<Self> {
        if col >= GRID_WIDTH || row >= GRID_HEIGHT {
            return None;
        }
        Some(Self { col, row })
    }

    /// Decode a grid note. Returns `None` for notes outside the grid.
    pub fn from_note(note: u8) -> Option<Self> {
        let col = note % GRID_WIDTH;
        let mapped_row = note / GRID_WIDTH;
        if mapped_row >= GRID_HEIGHT {
            return None;
        }
        Self::new(col, GRID_HEIGHT - 1 - mapped_row)
    }

    pub fn note(&self) -> u8 {
        self.col + (GRID_HEIGHT - 1 - self.row) * GRID_WIDTH
    }

    /// Dense index in `0..CELL_COUNT`, usable for per-cell tables
    pub fn index(&self) -> usize {
        self.note() as usize
    }

    pub fn col(&self) -> u8 {
        self.col
    }

    pub fn row(&self) -> u8 {
        self.row
    }

    /// All cells, row by row from the top left
    pub fn all() -> impl Iterator<Item = Cell> {
        (0..GRID_HEIGHT).flat_map(|row| (0..GRID_WIDTH).map(move |col| Cell { col, row }))
    }
}

/// The function buttons, numbered by the note they send on channel 1
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u8)]
pub enum FunctionButton {
    Arp = 0,
    Seq4,
    Left16,
    End2,
    KeyboardPreview,
    Seq3,
    Up32,
    InitX2,
    Arranger,
    Seq2,
    Down48,
    Save,
    Back,
    Seq1,
    Right64,
    Load,
    Encoder1,
    Shift,
    Mod,
    CopyDuplicate,
    Encoder2,
    Stop,
    Division,
    PasteClear,
    Encoder3,
    Play,
    Lfo,
    Undo,
    Encoder4,
    Rec,
    StepChord,
    Random,
    Mute,
}

impl FunctionButton {
    /// Every button, indexed by its note number
    pub const ALL: [FunctionButton; 33] = [
        Self::Arp,
        Self::Seq4,
        Self::Left16,
        Self::End2,
        Self::KeyboardPreview,
        Self::Seq3,
        Self::Up32,
        Self::InitX2,
        Self::Arranger,
        Self::Seq2,
        Self::Down48,
        Self::Save,
        Self::Back,
        Self::Seq1,
        Self::Right64,
        Self::Load,
        Self::Encoder1,
        Self::Shift,
        Self::Mod,
        Self::CopyDuplicate,
        Self::Encoder2,
        Self::Stop,
        Self::Division,
        Self::PasteClear,
        Self::Encoder3,
        Self::Play,
        Self::Lfo,
        Self::Undo,
        Self::Encoder4,
        Self::Rec,
        Self::StepChord,
        Self::Random,
        Self::Mute,
    ];

    pub fn from_id(id: u8) -> Option<Self> {
        Self::ALL.get(id as usize).copied()
    }

    pub fn id(&self) -> u8 {
        *self as u8
    }
}

/// The indicator lights, numbered by their wire id
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq)]
#[repr(u8)]
pub enum Light {
    Back = 0,
    Config,
    ArrangerShow,
    ArrangerState,
    Keyboard,
    Preview,
    Arp,
    ArpHold,
    Shift,
    Stop,
    Seq1,
    Rec,
    Play,
    Seq3,
    Nudge,
    Sync,
    Seq1Sel,
    Seq2,
    Seq2Sel,
    Mute,
    Load,
    Seq4,
    Seq4Sel,
    Seq3Sel,
    Save,
    Clear,
    Duplicate,
    Paste,
    Copy,
    Undo,
    Random,
    Redo,
    Random2,
    Init,
    X2,
    End,
    Two,
    Mod,
    Division,
    Follow,
    Lfo,
    Condense,
    CvOut,
    StepChord,
    Expand,
    Sixteen,
    Left,
    ThirtyTwo,
    Up,
    FortyEight,
    Right,
    SixtyFour,
    Down,
    NoLed,
    Play2,
}

impl Light {
    pub const COUNT: u8 = 55;

    pub fn id(&self) -> u8 {
        *self as u8
    }
}

/// Indicator light states. The discriminant is the value sent on the wire.
#[derive(Debug, Copy, Clone, Hash, Eq, PartialEq, Default)]
#[repr(u8)]
pub enum LightState {
    #[default]
    Off = 0,
    On = 1,
    Blink = 2,
    BlinkFast = 4,
    ShortOn = 6,
}

impl LightState {
    pub fn value(&self) -> u8 {
        *self as u8
    }
}

impl From<bool> for LightState {
    fn from(on: bool) -> Self {
        if on {
            LightState::On
        } else {
            LightState::Off
        }
    }
}
