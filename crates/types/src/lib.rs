//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the game.
//! All types are plain data with no I/O, making them usable in any context
//! (simulation core, input collaborator, terminal presentation).
//!
//! # Field Dimensions
//!
//! The play field is a fixed 3D grid chosen at creation:
//!
//! - **Width** (X): 4 cells by default
//! - **Height** (Y): 12 cells by default, Y = 0 is the floor
//! - **Depth** (Z): 4 cells by default
//! - **Spawn position**: centered in X/Z, two cells above the top layer
//!
//! # Gameplay Constants
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 16 | Frame interval of the terminal runner (~60 FPS) |
//! | `KEY_REPEAT_MS` | 150 | Auto-repeat period for held translation keys |
//! | `INITIAL_DESCENT_VELOCITY` | -1.0 | Gravity in cells per second (negative = down) |
//! | `SPEEDUP_PER_ROW` | 0.1 | Velocity magnitude added per cleared layer |
//! | `SPAWN_HEADROOM` | 2 | Cells between the top layer and the spawn pivot |
//!
//! # Examples
//!
//! ```
//! use voxtris_types::{Action, Extent, FIELD_DEPTH, FIELD_HEIGHT, FIELD_WIDTH};
//!
//! let extent = Extent::default();
//! assert_eq!(extent.width, FIELD_WIDTH);
//! assert_eq!(extent.height, FIELD_HEIGHT);
//! assert_eq!(extent.depth, FIELD_DEPTH);
//! assert_eq!(extent.volume(), 4 * 12 * 4);
//!
//! // Parse an action name (case-insensitive)
//! assert_eq!(Action::from_str("moveLeft"), Some(Action::MoveLeft));
//! assert_eq!(Action::MoveLeft.as_str(), "MoveLeft");
//! ```

use glam::IVec3;

/// Default field width in cells (X)
pub const FIELD_WIDTH: u16 = 4;

/// Default field height in cells (Y)
pub const FIELD_HEIGHT: u16 = 12;

/// Default field depth in cells (Z)
pub const FIELD_DEPTH: u16 = 4;

/// Frame interval of the terminal runner in milliseconds (16ms ≈ 60 FPS)
pub const TICK_MS: u32 = 16;

/// Auto-repeat period for held translation actions
pub const KEY_REPEAT_MS: u32 = 150;

/// Starting gravity in cells per second (negative = downward)
pub const INITIAL_DESCENT_VELOCITY: f32 = -1.0;

/// Velocity magnitude gained for each cleared layer
pub const SPEEDUP_PER_ROW: f32 = 0.1;

/// Cells between the top layer and the spawn pivot
pub const SPAWN_HEADROOM: i32 = 2;

/// Number of entries in the piece catalog
pub const SHAPE_COUNT: usize = 8;

/// Number of cells in every piece
pub const PIECE_CELLS: usize = 4;

/// Horizontal cardinal directions compared when snapping the view direction.
///
/// The order matters: ties keep the earliest entry.
pub const CARDINALS: [IVec3; 4] = [
    IVec3::new(0, 0, -1),
    IVec3::new(1, 0, 0),
    IVec3::new(0, 0, 1),
    IVec3::new(-1, 0, 0),
];


/// Extent of the play field in cells
///
/// Fixed at field creation. Every dimension must be non-zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Extent {
    pub width: u16,
    pub height: u16,
    pub depth: u16,
}

impl Extent {
    pub const fn new(width: u16, height: u16, depth: u16) -> Self {
        Self {
            width,
            height,
            depth,
        }
    }

    /// Total number of cells (W * H * D)
    pub fn volume(&self) -> usize {
        self.width as usize * self.height as usize * self.depth as usize
    }

    /// True when every dimension is non-zero
    pub fn is_valid(&self) -> bool {
        self.width > 0 && self.height > 0 && self.depth > 0
    }

    /// Check if a cell lies inside `[0,W) x [0,H) x [0,D)`
    ///
    /// # Examples
    ///
    /// ```
    /// use glam::IVec3;
    /// use voxtris_types::Extent;
    ///
    /// let e = Extent::new(4, 12, 4);
    /// assert!(e.contains(IVec3::new(3, 0, 3)));
    /// assert!(!e.contains(IVec3::new(-1, 0, 0)));
    /// ```
    pub fn contains(&self, cell: IVec3) -> bool {
        cell.x >= 0
            && cell.x < self.width as i32
            && cell.y >= 0
            && cell.y < self.height as i32
            && cell.z >= 0
            && cell.z < self.depth as i32
    }

    pub fn as_ivec3(&self) -> IVec3 {
        IVec3::new(self.width as i32, self.height as i32, self.depth as i32)
    }
}

impl Default for Extent {
    fn default() -> Self {
        Self::new(FIELD_WIDTH, FIELD_HEIGHT, FIELD_DEPTH)
    }
}

/// Player actions read from the input source every frame
///
/// The declaration order is the order in which the simulation step
/// evaluates them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Action {
    /// Move piece one cell away from the camera
    MoveForward,
    /// Move piece one cell toward the camera
    MoveBackward,
    /// Move piece one cell to the camera's left
    MoveLeft,
    /// Move piece one cell to the camera's right
    MoveRight,
    /// Pull the next gravity drop forward
    ForceDown,
    /// Roll counter-clockwise around the view axis
    RotateZCcw,
    /// Roll clockwise around the view axis
    RotateZCw,
    /// Turn counter-clockwise around the vertical axis
    RotateYCcw,
    /// Turn clockwise around the vertical axis
    RotateYCw,
}

impl Action {
    /// All actions in evaluation order
    pub const ALL: [Action; 9] = [
        Action::MoveForward,
        Action::MoveBackward,
        Action::MoveLeft,
        Action::MoveRight,
        Action::ForceDown,
        Action::RotateZCcw,
        Action::RotateZCw,
        Action::RotateYCcw,
        Action::RotateYCw,
    ];

    /// Number of actions
    pub const COUNT: usize = Self::ALL.len();

    /// Position in [`Action::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Parse action from its name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use voxtris_types::Action;
    ///
    /// assert_eq!(Action::from_str("RotateYCw"), Some(Action::RotateYCw));
    /// assert_eq!(Action::from_str("forcedown"), Some(Action::ForceDown));
    /// assert_eq!(Action::from_str("hold"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "moveforward" => Some(Action::MoveForward),
            "movebackward" | "movebackwards" => Some(Action::MoveBackward),
            "moveleft" => Some(Action::MoveLeft),
            "moveright" => Some(Action::MoveRight),
            "forcedown" => Some(Action::ForceDown),
            "rotatezccw" => Some(Action::RotateZCcw),
            "rotatezcw" => Some(Action::RotateZCw),
            "rotateyccw" => Some(Action::RotateYCcw),
            "rotateycw" => Some(Action::RotateYCw),
            _ => None,
        }
    }

    /// Action name as used in key-binding files
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::MoveForward => "MoveForward",
            Action::MoveBackward => "MoveBackward",
            Action::MoveLeft => "MoveLeft",
            Action::MoveRight => "MoveRight",
            Action::ForceDown => "ForceDown",
            Action::RotateZCcw => "RotateZCcw",
            Action::RotateZCw => "RotateZCw",
            Action::RotateYCcw => "RotateYCcw",
            Action::RotateYCw => "RotateYCw",
        }
    }

    /// Rotations fire on the press edge only; translations also auto-repeat.
    pub fn is_rotation(&self) -> bool {
        matches!(
            self,
            Action::RotateZCcw | Action::RotateZCw | Action::RotateYCcw | Action::RotateYCw
        )
    }
}

/// Per-frame state of one action
///
/// - `pressed`: went down since the previous sync (edge)
/// - `held`: currently down (level)
/// - `released`: went up since the previous sync (edge)
/// - `repeat`: the auto-repeat period elapsed while held
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ActionState {
    pub pressed: bool,
    pub held: bool,
    pub released: bool,
    pub repeat: bool,
}

impl ActionState {
    /// Pressed this frame or due for an auto-repeat
    pub fn triggered(&self) -> bool {
        self.pressed || self.repeat
    }
}

/// Tunable gameplay parameters
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GameConfig {
    pub extent: Extent,
    /// Starting gravity in cells per second (negative = downward)
    pub initial_velocity: f32,
    /// Velocity magnitude gained per cleared layer
    pub speedup_per_row: f32,
    /// Cells between the top layer and the spawn pivot
    pub spawn_headroom: i32,
    /// Seed for the default random source
    pub seed: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            extent: Extent::default(),
            initial_velocity: INITIAL_DESCENT_VELOCITY,
            speedup_per_row: SPEEDUP_PER_ROW,
            spawn_headroom: SPAWN_HEADROOM,
            seed: 1,
        }
    }
}

/// Core-side lifecycle event for the presentation sink
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoreEvent {
    /// A piece came to rest; `rows_cleared` layers were removed
    Placed { rows_cleared: u32, score: u32 },
    /// The stack reached the top; the game was reset
    GameOver { score: u32 },
    /// The game was reset explicitly
    Reset,
}
