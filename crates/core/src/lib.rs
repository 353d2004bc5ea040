//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the rules of the sliding-tile merge game: the grid, the live
//! tiles, move resolution and the session state machine. It has **no dependency**
//! on rendering, input or I/O. The presentation layer talks to it through
//! [`GameSession`] calls going in and [`GameEvent`](types::GameEvent)s coming out.
//!
//! - **Deterministic**: the same seed and inputs replay the same game
//! - **Synchronous**: every call runs to completion; the only suspension point is
//!   between a resolved move and [`GameSession::animations_complete`]
//!
//! # Module Structure
//!
//! - [`grid`]: fixed-size cell occupancy map
//! - [`tiles`]: arena of live tiles addressed by [`TileId`](types::TileId)
//! - [`session`]: spawning, move resolution, merging, win/lose
//! - [`rng`]: seedable LCG used for spawn placement and values
//! - [`config`]: grid size, win value, animation duration
//!
//! # Rules
//!
//! - The first spawn round places two tiles, every later round places one.
//!   Spawned tiles are 2 (80%) or 4 (20%).
//! - A move slides every tile as far as it goes. A tile that runs into an equal
//!   tile merges with it unless that tile already has a merge partner this move.
//! - A merge replaces both tiles with one tile of double value at the target's cell.
//! - After a spawn, a single remaining empty cell loses the game; a tile equal to the
//!   win value wins it.
//!
//! # Example
//!
//! ```
//! use tile_merge_core::{GameSession, SessionConfig};
//! use tile_merge_core::types::{Direction, Position, SessionState};
//!
//! let layout = [(Position::new(0, 0), 2), (Position::new(1, 0), 2)];
//! let mut game = GameSession::with_tiles(SessionConfig::default(), 7, &layout).unwrap();
//!
//! assert!(game.request_move(Direction::Left));
//! assert_eq!(game.state(), SessionState::Moving);
//!
//! // The presentation layer animates, then reports back.
//! assert!(game.animations_complete());
//! assert_eq!(game.tile_at(Position::new(0, 0)).unwrap().value, 4);
//! assert_eq!(game.state(), SessionState::WaitingInput);
//! ```

pub mod config;
pub mod error;
pub mod grid;
pub mod rng;
pub mod session;
pub mod tiles;

pub use tile_merge_types as types;

// Re-export commonly used types for convenience
pub use config::SessionConfig;
pub use error::ConfigError;
pub use grid::Grid;
pub use rng::SimpleRng;
pub use session::{GameSession, PendingMerge, PendingMove};
pub use tiles::{Tile, Tiles};
