//! Shared types - the vocabulary between the rules engine and its presentation layer
//!
//! Everything here is plain data with no dependencies, so it can be used by the
//! core, the adapter and any front end that animates the game.
//!
//! # Coordinates
//!
//! Cells are addressed by `(x, y)` with `0 <= x < width` and `0 <= y < height`.
//! `x` grows to the right and `y` grows **upwards**, so [`Direction::Up`] is `(0, 1)`.
//!
//! # Defaults
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `DEFAULT_WIDTH` | 4 | Grid columns |
//! | `DEFAULT_HEIGHT` | 4 | Grid rows |
//! | `DEFAULT_WIN_VALUE` | 2048 | Tile value that wins the session |
//! | `DEFAULT_TRAVEL_MS` | 200 | Slide animation duration (opaque to the core) |
//! | `FOUR_SPAWN_PROBABILITY` | 0.2 | Chance a spawned tile is a 4 instead of a 2 |
//!
//! # Examples
//!
//! ```
//! use tile_merge_types::{Direction, Position};
//!
//! let dir = Direction::from_str("left").unwrap();
//! assert_eq!(dir.delta(), (-1, 0));
//!
//! // Diagonals are not a legal move.
//! assert_eq!(Direction::from_vector(1, 1), None);
//!
//! let p = Position::new(2, 3);
//! assert_eq!((p.x, p.y), (2, 3));
//! ```

use std::fmt;

/// Grid width used when nothing else is configured
pub const DEFAULT_WIDTH: u16 = 4;

/// Grid height used when nothing else is configured
pub const DEFAULT_HEIGHT: u16 = 4;

/// Reaching a tile of this value wins the session
pub const DEFAULT_WIN_VALUE: u32 = 2048;

/// Slide animation duration handed through to the presentation layer
pub const DEFAULT_TRAVEL_MS: u32 = 200;

/// Probability that a spawned tile has value 4 (otherwise 2)
pub const FOUR_SPAWN_PROBABILITY: f32 = 0.2;

/// Tiles placed by the first spawn round of a session
pub const FIRST_ROUND_SPAWNS: usize = 2;

/// Tiles placed by every later spawn round
pub const ROUND_SPAWNS: usize = 1;

/// A cell address on the grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Position {
    pub x: u16,
    pub y: u16,
}

impl Position {
    pub const fn new(x: u16, y: u16) -> Self {
        Self { x, y }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Identity of a tile within one session.
///
/// Ids are handed out in creation order and never reused, so a retired id can
/// safely appear in events after the tile is gone.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TileId(pub u32);

impl TileId {
    #[inline]
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for TileId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// The four legal move directions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Direction {
    Up,
    Down,
    Left,
    Right,
}

impl Direction {
    pub const ALL: [Direction; 4] = [
        Direction::Up,
        Direction::Down,
        Direction::Left,
        Direction::Right,
    ];

    /// Unit step `(dx, dy)` for this direction (`y` grows upwards)
    pub fn delta(self) -> (i32, i32) {
        match self {
            Direction::Up => (0, 1),
            Direction::Down => (0, -1),
            Direction::Left => (-1, 0),
            Direction::Right => (1, 0),
        }
    }

    /// Map a raw input vector onto a direction.
    ///
    /// Only the four axis-aligned unit vectors are accepted; zero, diagonal and
    /// longer vectors return `None`.
    ///
    /// ```
    /// use tile_merge_types::Direction;
    ///
    /// assert_eq!(Direction::from_vector(0, 1), Some(Direction::Up));
    /// assert_eq!(Direction::from_vector(-1, 0), Some(Direction::Left));
    /// assert_eq!(Direction::from_vector(-1, -1), None);
    /// assert_eq!(Direction::from_vector(0, 2), None);
    /// assert_eq!(Direction::from_vector(0, 0), None);
    /// ```
    pub fn from_vector(dx: i32, dy: i32) -> Option<Self> {
        match (dx, dy) {
            (0, 1) => Some(Direction::Up),
            (0, -1) => Some(Direction::Down),
            (-1, 0) => Some(Direction::Left),
            (1, 0) => Some(Direction::Right),
            _ => None,
        }
    }

    /// Parse a direction (case-insensitive), accepting names and WASD keys
    ///
    /// ```
    /// use tile_merge_types::Direction;
    ///
    /// assert_eq!(Direction::from_str("UP"), Some(Direction::Up));
    /// assert_eq!(Direction::from_str("d"), Some(Direction::Right));
    /// assert_eq!(Direction::from_str("north"), None);
    /// ```
    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "up" | "w" => Some(Direction::Up),
            "down" | "s" => Some(Direction::Down),
            "left" | "a" => Some(Direction::Left),
            "right" | "d" => Some(Direction::Right),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Direction::Up => "up",
            Direction::Down => "down",
            Direction::Left => "left",
            Direction::Right => "right",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Session lifecycle.
///
/// ```text
/// GeneratingLevel -> SpawningBlocks -> WaitingInput <-> Moving -> SpawningBlocks
///                                   \-> Win | Lose (terminal)
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SessionState {
    GeneratingLevel,
    SpawningBlocks,
    WaitingInput,
    Moving,
    Win,
    Lose,
}

impl SessionState {
    /// Terminal states have no outgoing transition
    pub fn is_terminal(&self) -> bool {
        matches!(self, SessionState::Win | SessionState::Lose)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            SessionState::GeneratingLevel => "generatingLevel",
            SessionState::SpawningBlocks => "spawningBlocks",
            SessionState::WaitingInput => "waitingInput",
            SessionState::Moving => "moving",
            SessionState::Win => "win",
            SessionState::Lose => "lose",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// One tile sliding from `from` to `to` during a move.
///
/// For a tile that merges, `to` is the cell of the tile it merges into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TilePlacement {
    pub tile: TileId,
    pub from: Position,
    pub to: Position,
}

impl TilePlacement {
    pub fn moved(&self) -> bool {
        self.from != self.to
    }
}

/// A pending merge announced with the move that causes it.
///
/// `survivor` is the id reserved for the doubled tile that appears at `cell`
/// once the animations settle; both `absorbed` tiles retire at that point.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeNotice {
    pub survivor: TileId,
    /// `[moving tile, target tile]`
    pub absorbed: [TileId; 2],
    pub cell: Position,
    pub value: u32,
}

/// A tile appearing on the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TileSpawn {
    pub tile: TileId,
    pub cell: Position,
    pub value: u32,
}

/// Everything the presentation layer needs to animate one move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveBatch {
    pub direction: Direction,
    /// In processing order
    pub placements: Vec<TilePlacement>,
    pub merges: Vec<MergeNotice>,
    /// Configured animation duration, passed through untouched
    pub travel_ms: u32,
}

/// Outbound notification from the core.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GameEvent {
    StateChanged {
        from: SessionState,
        to: SessionState,
    },
    Spawned(TileSpawn),
    /// The move is resolved; the core now waits for the animations-complete signal.
    Moved(MoveBatch),
    MergeSettled(TileSpawn),
    GameWon,
    GameLost,
}
