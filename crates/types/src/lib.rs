//! Shared data structures and constants
//!
//! Everything here is plain data with no external dependencies, so the same
//! definitions serve the game core, the loop driver, and the terminal renderer.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//! - **Block size**: 30 surface units per cell (a 300x600 drawing surface)
//!
//! # Timing
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `BASE_DROP_MS` | 1000 | Drop interval at level 1 |
//! | `DROP_INTERVAL_STEP_MS` | 100 | Interval reduction per level |
//! | `DROP_INTERVAL_MIN_MS` | 100 | Interval floor |
//! | `DEFAULT_FRAME_MS` | 16 | Frame cadence of the loop (~60 FPS) |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::T.as_str(), "T");
//! assert_eq!(PieceKind::ALL.len(), 7);
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Edge length of one board cell on the drawing surface.
pub const BLOCK_SIZE: u16 = 30;

/// Largest shape matrix edge (the I piece is 4x4).
pub const MAX_SHAPE_SIZE: usize = 4;

/// Drop interval at level 1 (1000ms = 1 second per row)
pub const BASE_DROP_MS: u32 = 1000;

/// Drop interval reduction per level gained.
pub const DROP_INTERVAL_STEP_MS: u32 = 100;

/// Drop interval never goes below this.
pub const DROP_INTERVAL_MIN_MS: u32 = 100;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Points for a successful soft-drop step.
pub const SOFT_DROP_POINTS: u32 = 1;

/// Points per row travelled by a hard drop.
pub const HARD_DROP_POINTS: u32 = 2;

/// Default frame cadence of the scheduler loop (16ms ≈ 60 FPS)
pub const DEFAULT_FRAME_MS: u32 = 16;

/// Line clear scoring table, indexed by lines cleared in one lock (capped at 4).
///
/// Points are multiplied by the current level.
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// 24-bit RGB color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Scale every channel by `num / den` (used for shading).
    pub const fn scale(self, num: u16, den: u16) -> Self {
        const fn ch(v: u8, num: u16, den: u16) -> u8 {
            let scaled = (v as u16) * num / den;
            if scaled > 255 {
                255
            } else {
                scaled as u8
            }
        }
        Self {
            r: ch(self.r, num, den),
            g: ch(self.g, num, den),
            b: ch(self.b, num, den),
        }
    }

    /// Blend towards `other` by `weight / 255`.
    pub const fn blend(self, other: Rgb, weight: u8) -> Self {
        const fn ch(a: u8, b: u8, w: u8) -> u8 {
            let w = w as u16;
            (((a as u16) * (255 - w) + (b as u16) * w) / 255) as u8
        }
        Self {
            r: ch(self.r, other.r, weight),
            g: ch(self.g, other.g, weight),
            b: ch(self.b, other.b, weight),
        }
    }
}

/// Background color of an empty cell.
pub const EMPTY_COLOR: Rgb = Rgb::new(0, 0, 0);

/// The seven tetromino piece kinds
///
/// Colors are fixed:
/// - **I**: cyan `#00f0f0`
/// - **O**: yellow `#f0f000`
/// - **T**: purple `#a000f0`
/// - **S**: green `#00f000`
/// - **Z**: red `#f00000`
/// - **J**: blue `#0000f0`
/// - **L**: orange `#f0a000`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    I,
    O,
    T,
    S,
    Z,
    J,
    L,
}

impl PieceKind {
    /// All kinds, in table order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::O,
        PieceKind::T,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::J,
        PieceKind::L,
    ];

    /// Convert to uppercase letter
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "I",
            PieceKind::O => "O",
            PieceKind::T => "T",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::J => "J",
            PieceKind::L => "L",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        match self {
            PieceKind::I => 0,
            PieceKind::O => 1,
            PieceKind::T => 2,
            PieceKind::S => 3,
            PieceKind::Z => 4,
            PieceKind::J => 5,
            PieceKind::L => 6,
        }
    }

    /// Display color from the fixed color table.
    pub fn color(&self) -> Rgb {
        PIECE_COLORS[self.index()]
    }
}

/// PieceKind -> color, indexed by [`PieceKind::index`]. Never mutated.
pub const PIECE_COLORS: [Rgb; 7] = [
    Rgb::new(0x00, 0xf0, 0xf0),
    Rgb::new(0xf0, 0xf0, 0x00),
    Rgb::new(0xa0, 0x00, 0xf0),
    Rgb::new(0x00, 0xf0, 0x00),
    Rgb::new(0xf0, 0x00, 0x00),
    Rgb::new(0x00, 0x00, 0xf0),
    Rgb::new(0xf0, 0xa0, 0x00),
];

/// A cell on the game board
///
/// - `None`: Empty cell
/// - `Some(PieceKind)`: Cell filled by a locked piece of that kind
pub type Cell = Option<PieceKind>;

/// Lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RunState {
    Running,
    Paused,
    /// Terminal until an explicit restart.
    GameOver,
}

/// Commands that can be applied to a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down (+1 point when it moves)
    SoftDrop,
    /// Rotate piece 90° clockwise, with wall kicks
    Rotate,
    /// Drop piece to the floor and lock it
    HardDrop,
    /// Toggle pause state
    Pause,
    /// Reinitialize board and session
    Restart,
}

/// Notable state transitions emitted by a session.
///
/// Consumed by observers (the event log); gameplay never reads them back.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionEvent {
    Spawned { kind: PieceKind },
    Locked { kind: PieceKind },
    LinesCleared { count: u32, points: u32 },
    LevelUp { level: u32 },
    Paused,
    Resumed,
    GameOver,
    Restarted,
}

impl SessionEvent {
    pub fn name(&self) -> &'static str {
        match self {
            SessionEvent::Spawned { .. } => "spawn",
            SessionEvent::Locked { .. } => "lock",
            SessionEvent::LinesCleared { .. } => "lines_cleared",
            SessionEvent::LevelUp { .. } => "level_up",
            SessionEvent::Paused => "pause",
            SessionEvent::Resumed => "resume",
            SessionEvent::GameOver => "game_over",
            SessionEvent::Restarted => "restart",
        }
    }
}

/// Score counters captured when an event was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Totals {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
}
