//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the engine.
//! All types are plain data with no behavior beyond small lookups, making them
//! usable in any context (engine, configuration loading, presentation layers).
//!
//! # Coordinates
//!
//! Every position is a `(row, col)` pair. Row 0 is the top of the board and rows
//! grow downwards; column 0 is the leftmost column. Piece bodies are lists of
//! offsets from a piece origin in the same `(row, col)` order.
//!
//! # Default Tuning
//!
//! Timing values are in milliseconds:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `CLOCK_TICK_MS` | 10 | Logical time added by one `tick_clock` |
//! | `MIN_GRAVITY_INTERVAL_MS` | 10 | Fastest gravity allowed |
//! | `BASE_SETTLE_MS` | 600 | Ground time before an untouched piece locks |
//! | `MIN_SETTLE_MS` | 350 | Settle time floor at high levels |
//! | `BASE_MAX_GROUND_MS` | 1500 | Total ground time before a forced lock |
//! | `MIN_MAX_GROUND_MS` | 700 | Max ground time floor at high levels |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Coord, GameAction, Shape};
//!
//! let parsed = Shape::from_str("t").unwrap();
//! assert_eq!(parsed, Shape::T);
//!
//! let moved = Coord::new(0, 5) + Coord::new(1, -1);
//! assert_eq!(moved, Coord::new(1, 4));
//!
//! assert_eq!(GameAction::from_str("hardDrop"), Some(GameAction::HardDrop));
//! ```

use std::ops::Add;

use serde::{Deserialize, Serialize};

/// Board width in playable columns
pub const BOARD_WIDTH: u16 = 10;

/// Board height in visible rows
pub const BOARD_HEIGHT: u16 = 20;

/// Logical time added by one clock tick
pub const CLOCK_TICK_MS: u32 = 10;

/// Gravity interval by level (milliseconds per row).
///
/// Index 0 = level 0. Levels past the end of the table keep the last entry.
pub const GRAVITY_LEVELS_MS: [u32; 32] = [
    1000, 800, 700, 600, 525, 455, 400, 370, 345, 320, 295, 270, 250, 230, 210, 195, 180, 171,
    155, 140, 128, 110, 95, 85, 75, 65, 55, 45, 35, 25, 15, 5,
];

/// Fastest gravity interval allowed regardless of the table
pub const MIN_GRAVITY_INTERVAL_MS: u32 = 10;

/// Lines needed to advance one level
pub const LEVEL_LINES: u32 = 10;

/// Points awarded per line-clear event, indexed by rows cleared at once
pub const LINE_SCORES: [u32; 5] = [0, 100, 300, 500, 800];

/// How long an unmoved grounded piece waits before locking
pub const BASE_SETTLE_MS: u32 = 600;

/// Settle time lost per level
pub const SETTLE_STEP_MS: u32 = 25;

/// Settle time floor
pub const MIN_SETTLE_MS: u32 = 350;

/// Total ground time after which a piece locks even if it keeps moving
pub const BASE_MAX_GROUND_MS: u32 = 1500;

/// Max ground time lost per level
pub const MAX_GROUND_STEP_MS: u32 = 80;

/// Max ground time floor
pub const MIN_MAX_GROUND_MS: u32 = 700;

/// Refill the shape queue with a new bag once it holds fewer shapes than this
pub const QUEUE_WATERMARK: usize = 8;

/// Extra delay before shift auto-repeat kicks in (input layer hint)
pub const SHIFT_DEBOUNCE_MS: u32 = 120;

/// Wall cell color
pub const WALL_COLOR: Rgb = [113, 113, 113];

/// Empty cell color
pub const EMPTY_COLOR: Rgb = [0, 0, 0];

/// An RGB color triple
pub type Rgb = [u8; 3];

/// The seven block shapes
///
/// Each shape has a distinct geometry and color:
/// - **I**: Cyan, straight bar
/// - **T**: Purple, T-shaped
/// - **O**: Yellow, 2x2 square
/// - **S**: Red, S-shaped
/// - **Z**: Green, Z-shaped (mirror of S)
/// - **L**: Orange, L-shaped
/// - **J**: Blue, J-shaped (mirror of L)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Shape {
    I,
    T,
    O,
    S,
    Z,
    L,
    J,
}

impl Shape {
    /// All shapes in catalog order
    pub const ALL: [Shape; 7] = [
        Shape::I,
        Shape::T,
        Shape::O,
        Shape::S,
        Shape::Z,
        Shape::L,
        Shape::J,
    ];

    /// Parse shape from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::Shape;
    ///
    /// assert_eq!(Shape::from_str("i"), Some(Shape::I));
    /// assert_eq!(Shape::from_str("O"), Some(Shape::O));
    /// assert_eq!(Shape::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(Shape::I),
            "t" => Some(Shape::T),
            "o" => Some(Shape::O),
            "s" => Some(Shape::S),
            "z" => Some(Shape::Z),
            "l" => Some(Shape::L),
            "j" => Some(Shape::J),
            _ => None,
        }
    }

    /// Uppercase display name
    pub fn as_str(&self) -> &'static str {
        match self {
            Shape::I => "I",
            Shape::T => "T",
            Shape::O => "O",
            Shape::S => "S",
            Shape::Z => "Z",
            Shape::L => "L",
            Shape::J => "J",
        }
    }
}

/// One value per shape, addressed exhaustively by [`Shape`].
///
/// Serializes as an object keyed by shape letter (`{"I": .., "T": .., ..}`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PerShape<T> {
    #[serde(rename = "I")]
    pub i: T,
    #[serde(rename = "T")]
    pub t: T,
    #[serde(rename = "O")]
    pub o: T,
    #[serde(rename = "S")]
    pub s: T,
    #[serde(rename = "Z")]
    pub z: T,
    #[serde(rename = "L")]
    pub l: T,
    #[serde(rename = "J")]
    pub j: T,
}

impl<T> PerShape<T> {
    pub fn get(&self, shape: Shape) -> &T {
        match shape {
            Shape::I => &self.i,
            Shape::T => &self.t,
            Shape::O => &self.o,
            Shape::S => &self.s,
            Shape::Z => &self.z,
            Shape::L => &self.l,
            Shape::J => &self.j,
        }
    }

    /// Iterate `(shape, value)` pairs in catalog order
    pub fn iter(&self) -> impl Iterator<Item = (Shape, &T)> {
        Shape::ALL.into_iter().map(move |shape| (shape, self.get(shape)))
    }
}

/// A board position or a piece-body offset, as `(row, col)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(from = "(i32, i32)", into = "(i32, i32)")]
pub struct Coord {
    pub row: i32,
    pub col: i32,
}

impl Coord {
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }
}

impl Add for Coord {
    type Output = Coord;

    fn add(self, rhs: Coord) -> Coord {
        Coord::new(self.row + rhs.row, self.col + rhs.col)
    }
}

impl From<(i32, i32)> for Coord {
    fn from((row, col): (i32, i32)) -> Self {
        Coord::new(row, col)
    }
}

impl From<Coord> for (i32, i32) {
    fn from(c: Coord) -> Self {
        (c.row, c.col)
    }
}

/// What occupies a board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CellKind {
    Empty,
    Block,
    Wall,
    /// Landing preview of the falling piece (only produced by overlays)
    Shadow,
}

/// A single board cell
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Cell {
    pub color: Rgb,
    pub kind: CellKind,
}

impl Cell {
    pub const EMPTY: Cell = Cell {
        color: EMPTY_COLOR,
        kind: CellKind::Empty,
    };

    pub const fn block(color: Rgb) -> Self {
        Cell {
            color,
            kind: CellKind::Block,
        }
    }

    pub const fn wall(color: Rgb) -> Self {
        Cell {
            color,
            kind: CellKind::Wall,
        }
    }

    pub const fn shadow(color: Rgb) -> Self {
        Cell {
            color,
            kind: CellKind::Shadow,
        }
    }

    /// Block and wall cells obstruct pieces; shadows and empties do not
    pub fn is_solid(&self) -> bool {
        matches!(self.kind, CellKind::Block | CellKind::Wall)
    }

    pub fn is_wall(&self) -> bool {
        self.kind == CellKind::Wall
    }
}

impl Default for Cell {
    fn default() -> Self {
        Cell::EMPTY
    }
}

/// One-cell translation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ShiftDirection {
    Left,
    Right,
    /// Soft drop
    Down,
}

impl ShiftDirection {
    pub fn offset(&self) -> Coord {
        match self {
            ShiftDirection::Left => Coord::new(0, -1),
            ShiftDirection::Right => Coord::new(0, 1),
            ShiftDirection::Down => Coord::new(1, 0),
        }
    }
}

/// Quarter-turn rotation directions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RotateDirection {
    Cw,
    Ccw,
}

/// Input categories an external polling layer can throttle independently
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputCategory {
    Rotate,
    Shift,
    Drop,
    Hold,
}

/// Game actions that can be applied to a game
///
/// These actions are used by both human input and scripted drivers.
/// Each action maps to one engine operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameAction {
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Move piece one cell down, locking it if it cannot move
    SoftDrop,
    /// Instantly drop piece to its landing row and lock it
    HardDrop,
    /// Rotate piece 90° clockwise
    RotateCw,
    /// Rotate piece 90° counter-clockwise
    RotateCcw,
    /// Set aside the falling piece (if allowed)
    Hold,
    /// Toggle pause state
    Pause,
    /// Start the game, or restart it once over
    Start,
}

impl GameAction {
    /// Parse action from string
    ///
    /// # Examples
    ///
    /// ```
    /// use blockfall_types::GameAction;
    ///
    /// assert_eq!(GameAction::from_str("moveLeft"), Some(GameAction::MoveLeft));
    /// assert_eq!(GameAction::from_str("rotateCw"), Some(GameAction::RotateCw));
    /// assert_eq!(GameAction::from_str("unknown"), None);
    /// ```
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveleft" => Some(GameAction::MoveLeft),
            "moveright" => Some(GameAction::MoveRight),
            "softdrop" => Some(GameAction::SoftDrop),
            "harddrop" => Some(GameAction::HardDrop),
            "rotatecw" => Some(GameAction::RotateCw),
            "rotateccw" => Some(GameAction::RotateCcw),
            "hold" => Some(GameAction::Hold),
            "pause" => Some(GameAction::Pause),
            "start" => Some(GameAction::Start),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameAction::MoveLeft => "moveLeft",
            GameAction::MoveRight => "moveRight",
            GameAction::SoftDrop => "softDrop",
            GameAction::HardDrop => "hardDrop",
            GameAction::RotateCw => "rotateCw",
            GameAction::RotateCcw => "rotateCcw",
            GameAction::Hold => "hold",
            GameAction::Pause => "pause",
            GameAction::Start => "start",
        }
    }

    /// Input category used for allowance flags, if any
    pub fn category(&self) -> Option<InputCategory> {
        match self {
            GameAction::MoveLeft | GameAction::MoveRight | GameAction::SoftDrop => {
                Some(InputCategory::Shift)
            }
            GameAction::HardDrop => Some(InputCategory::Drop),
            GameAction::RotateCw | GameAction::RotateCcw => Some(InputCategory::Rotate),
            GameAction::Hold => Some(InputCategory::Hold),
            GameAction::Pause | GameAction::Start => None,
        }
    }
}
