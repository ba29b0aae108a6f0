//! Shared types and constants for the falling-block rules engine.
//!
//! Everything here is plain data with no external dependencies, so it can be
//! used by the rules core, the session runtime, and any renderer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 at the top)
//!
//! # Gravity by Level
//!
//! | Level | Interval |
//! |-------|----------|
//! | 0 | 1000ms |
//! | 1 | 900ms |
//! | 5 | 500ms |
//! | 10 | 260ms |
//! | 19+ | 75ms |
//!
//! # Examples
//!
//! ```
//! use tetris_rules_types::{GameCommand, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_str("t"), Some(PieceKind::T));
//! assert_eq!(GameCommand::from_str("hardDrop"), Some(GameCommand::HardDrop));
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Number of upcoming pieces kept in the preview queue.
pub const NEXT_QUEUE_LEN: usize = 5;

/// Lines needed per level.
pub const LINES_PER_LEVEL: u32 = 10;

/// Line clear scoring table, indexed by lines cleared in one lock.
///
/// Points are multiplied by (level + 1).
pub const SCORE_TABLE: [u32; 5] = [0, 100, 300, 500, 800];

/// Points per successful soft drop step (user or gravity).
pub const SOFT_DROP_POINTS: u32 = 1;

/// Gravity interval per level in milliseconds.
///
/// Levels past the end of the table use the last entry.
pub const LEVEL_SPEEDS_MS: [u32; 20] = [
    1000, 900, 800, 700, 600, 500, 450, 400, 350, 300, 260, 220, 200, 180, 160, 140, 120, 100, 85,
    75,
];

/// Horizontal offsets tried, in order, when a rotation does not fit in place.
pub const KICK_OFFSETS: [i8; 5] = [0, -1, 1, -2, 2];

/// LCG multiplier for the seeded bag source.
pub const LCG_MULTIPLIER: u64 = 1_103_515_245;

/// LCG increment for the seeded bag source.
pub const LCG_INCREMENT: u64 = 12_345;

/// LCG modulus (2^31) for the seeded bag source.
pub const LCG_MODULUS: u64 = 1 << 31;


/// The seven piece kinds
///
/// Declaration order is the catalog order used when a bag is refilled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum PieceKind {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceKind {
    /// All kinds in catalog order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::O,
        PieceKind::S,
        PieceKind::T,
        PieceKind::Z,
    ];

    /// Parse piece kind from string (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_str("i"), Some(PieceKind::I));
    /// assert_eq!(PieceKind::from_str("O"), Some(PieceKind::O));
    /// assert_eq!(PieceKind::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "i" => Some(PieceKind::I),
            "j" => Some(PieceKind::J),
            "l" => Some(PieceKind::L),
            "o" => Some(PieceKind::O),
            "s" => Some(PieceKind::S),
            "t" => Some(PieceKind::T),
            "z" => Some(PieceKind::Z),
            _ => None,
        }
    }

    /// Convert to lowercase string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::I => "i",
            PieceKind::J => "j",
            PieceKind::L => "l",
            PieceKind::O => "o",
            PieceKind::S => "s",
            PieceKind::T => "t",
            PieceKind::Z => "z",
        }
    }

    /// Position in [`PieceKind::ALL`].
    pub fn index(&self) -> usize {
        *self as usize
    }
}

/// A committed board cell: `None` is empty, `Some(kind)` is a locked mino.
pub type Cell = Option<PieceKind>;

/// A cell of the render projection.
///
/// Ghost cells mark where the active piece would land; they are never part
/// of the committed board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RenderCell {
    #[default]
    Empty,
    Solid(PieceKind),
    Ghost(PieceKind),
}

impl RenderCell {
    /// Renderer tag: `""`, `"t"`, or `"ghost-t"`.
    pub fn as_str(&self) -> &'static str {
        match self {
            RenderCell::Empty => "",
            RenderCell::Solid(kind) => kind.as_str(),
            RenderCell::Ghost(kind) => match kind {
                PieceKind::I => "ghost-i",
                PieceKind::J => "ghost-j",
                PieceKind::L => "ghost-l",
                PieceKind::O => "ghost-o",
                PieceKind::S => "ghost-s",
                PieceKind::T => "ghost-t",
                PieceKind::Z => "ghost-z",
            },
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, RenderCell::Empty)
    }
}

/// Horizontal movement direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    Left,
    Right,
}

impl Direction {
    /// Column delta for one step.
    pub fn dx(&self) -> i8 {
        match self {
            Direction::Left => -1,
            Direction::Right => 1,
        }
    }
}

/// Lifecycle phase of a game.
///
/// `Idle` only exists before the first start. `GameOver` is left through
/// start or reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Phase {
    #[default]
    Idle,
    Running,
    Paused,
    GameOver,
}

impl Phase {
    /// Whether a game is in progress (paused or not).
    pub fn is_running(&self) -> bool {
        matches!(self, Phase::Running | Phase::Paused)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::Idle => "idle",
            Phase::Running => "running",
            Phase::Paused => "paused",
            Phase::GameOver => "gameOver",
        }
    }
}

/// Commands accepted by the game
///
/// Every command is a silent no-op when its guard fails.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum GameCommand {
    /// Start a game unless one is already running
    Start,
    /// Toggle pause while running
    Pause,
    /// Discard the current game and start a fresh one
    Reset,
    /// Move piece one cell left
    MoveLeft,
    /// Move piece one cell right
    MoveRight,
    /// Rotate piece clockwise (with horizontal kicks)
    Rotate,
    /// Drop piece one cell down, locking it if blocked
    SoftDrop,
    /// Drop piece to its landing row and lock it
    HardDrop,
    /// Hold current piece (once per piece)
    Hold,
}

impl GameCommand {
    /// Parse command from its camelCase name (case-insensitive)
    ///
    /// # Examples
    ///
    /// ```
    /// use tetris_rules_types::GameCommand;
    ///
    /// assert_eq!(GameCommand::from_str("moveLeft"), Some(GameCommand::MoveLeft));
    /// assert_eq!(GameCommand::from_str("ROTATE"), Some(GameCommand::Rotate));
    /// assert_eq!(GameCommand::from_str("unknown"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "start" => Some(GameCommand::Start),
            "pause" => Some(GameCommand::Pause),
            "reset" => Some(GameCommand::Reset),
            "moveleft" => Some(GameCommand::MoveLeft),
            "moveright" => Some(GameCommand::MoveRight),
            "rotate" => Some(GameCommand::Rotate),
            "softdrop" => Some(GameCommand::SoftDrop),
            "harddrop" => Some(GameCommand::HardDrop),
            "hold" => Some(GameCommand::Hold),
            _ => None,
        }
    }

    /// Convert to camelCase string
    pub fn as_str(&self) -> &'static str {
        match self {
            GameCommand::Start => "start",
            GameCommand::Pause => "pause",
            GameCommand::Reset => "reset",
            GameCommand::MoveLeft => "moveLeft",
            GameCommand::MoveRight => "moveRight",
            GameCommand::Rotate => "rotate",
            GameCommand::SoftDrop => "softDrop",
            GameCommand::HardDrop => "hardDrop",
            GameCommand::Hold => "hold",
        }
    }
}
