//! Game session - the state machine that drives a game
//!
//! A session owns the grid, the live tiles and the RNG, and moves through
//! [`SessionState`]s in response to three external triggers:
//!
//! - [`GameSession::start`]: level generation and the first spawn
//! - [`GameSession::request_move`]: directional input, accepted only in `WaitingInput`
//! - [`GameSession::animations_complete`]: the presentation layer finished animating
//!   the last move; merges settle, a tile spawns and win/lose is evaluated
//!
//! Everything the presentation layer needs is queued as [`GameEvent`]s and
//! collected with [`GameSession::take_events`].

use arrayvec::ArrayVec;
use tracing::{debug, info, trace};

use crate::config::SessionConfig;
use crate::error::ConfigError;
use crate::grid::Grid;
use crate::rng::SimpleRng;
use crate::tiles::{Tile, Tiles};
use crate::types::*;

/// A merge computed during move resolution, waiting for the animations to finish.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PendingMerge {
    /// Id reserved for the doubled tile
    pub survivor: TileId,
    /// The tile that slid into `target`
    pub source: TileId,
    pub target: TileId,
}

/// The resolved-but-unsettled part of a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingMove {
    pub direction: Direction,
    pub merges: Vec<PendingMerge>,
}

#[derive(Debug, Clone)]
pub struct GameSession {
    config: SessionConfig,
    grid: Grid,
    tiles: Tiles,
    state: SessionState,
    /// Spawn rounds run since the level was generated
    round: u32,
    seed: u32,
    rng: SimpleRng,
    pending: Option<PendingMove>,
    events: Vec<GameEvent>,
}

impl GameSession {
    /// Create a session in `GeneratingLevel`. Nothing happens until [`start`](Self::start).
    pub fn new(config: SessionConfig, seed: u32) -> Result<Self, ConfigError> {
        config.validate()?;
        let grid = Grid::new(config.width, config.height)?;

        Ok(Self {
            config,
            grid,
            tiles: Tiles::new(),
            state: SessionState::GeneratingLevel,
            round: 0,
            seed,
            rng: SimpleRng::new(seed),
            pending: None,
            events: Vec::new(),
        })
    }

    /// Create a session waiting for input with a preset layout.
    ///
    /// The first spawn is treated as already done, so the next one places a single tile.
    pub fn with_tiles(
        config: SessionConfig,
        seed: u32,
        layout: &[(Position, u32)],
    ) -> Result<Self, ConfigError> {
        let mut session = Self::new(config, seed)?;

        for &(cell, value) in layout {
            if !session.grid.contains(cell) {
                return Err(ConfigError::InvalidLayout(format!(
                    "{cell} is outside the {}x{} grid",
                    session.grid.width(),
                    session.grid.height()
                )));
            }
            if !session.grid.is_empty_at(cell) {
                return Err(ConfigError::InvalidLayout(format!(
                    "{cell} holds more than one tile"
                )));
            }
            if value < 2 || !value.is_power_of_two() {
                return Err(ConfigError::InvalidLayout(format!(
                    "{cell} has value {value}, expected a power of two of at least 2"
                )));
            }
            session.place_tile(cell, value);
        }

        session.round = 1;
        session.state = SessionState::WaitingInput;
        Ok(session)
    }

    /// Generate the level and run the first spawn round.
    ///
    /// Calling this again restarts the game on the same grid; the RNG stream continues.
    pub fn start(&mut self) {
        self.enter(SessionState::GeneratingLevel);
    }

    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn seed(&self) -> u32 {
        self.seed
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn tiles(&self) -> &Tiles {
        &self.tiles
    }

    pub fn tile(&self, id: TileId) -> Option<&Tile> {
        self.tiles.get(id)
    }

    pub fn tile_at(&self, cell: Position) -> Option<&Tile> {
        self.grid.occupant_at(cell).map(|id| &self.tiles[id])
    }

    /// The move waiting for [`animations_complete`](Self::animations_complete), if any
    pub fn pending_move(&self) -> Option<&PendingMove> {
        self.pending.as_ref()
    }

    pub fn highest_value(&self) -> Option<u32> {
        self.tiles.iter().map(|t| t.value).max()
    }

    /// Tile values by row (`snapshot[y][x]`), 0 for an empty cell
    pub fn snapshot(&self) -> Vec<Vec<u32>> {
        (0..self.grid.height())
            .map(|y| {
                (0..self.grid.width())
                    .map(|x| self.tile_at(Position::new(x, y)).map_or(0, |t| t.value))
                    .collect()
            })
            .collect()
    }

    /// Drain queued events
    pub fn take_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    /// Move every tile in `direction`.
    ///
    /// Returns false (and does nothing) unless the session is waiting for input.
    /// On success the resolved move is queued as [`GameEvent::Moved`] and the
    /// session stays in `Moving` until [`animations_complete`](Self::animations_complete).
    pub fn request_move(&mut self, direction: Direction) -> bool {
        if self.state != SessionState::WaitingInput {
            trace!(%direction, state = %self.state, "move ignored");
            return false;
        }

        self.enter(SessionState::Moving);
        let batch = self.resolve_move(direction);
        self.events.push(GameEvent::Moved(batch));
        true
    }

    /// [`request_move`](Self::request_move) from a raw input vector; diagonals are ignored
    pub fn request_move_vector(&mut self, dx: i32, dy: i32) -> bool {
        match Direction::from_vector(dx, dy) {
            Some(direction) => self.request_move(direction),
            None => {
                trace!(dx, dy, "not a legal direction");
                false
            }
        }
    }

    /// Settle the pending move: merge, spawn, then evaluate win/lose.
    ///
    /// Returns false if no move is in flight.
    pub fn animations_complete(&mut self) -> bool {
        if self.state != SessionState::Moving {
            trace!(state = %self.state, "animations-complete ignored");
            return false;
        }
        let Some(pending) = self.pending.take() else {
            return false;
        };

        for merge in &pending.merges {
            self.settle_merge(merge);
        }
        self.tiles.clear_merge_links();
        debug_assert_eq!(self.grid.occupied_count(), self.tiles.len());

        self.enter(SessionState::SpawningBlocks);
        true
    }

    /// Switch state and run the entry action of the new state
    fn enter(&mut self, next: SessionState) {
        let prev = self.state;
        self.state = next;
        debug!(from = %prev, to = %next, "state changed");
        self.events.push(GameEvent::StateChanged {
            from: prev,
            to: next,
        });

        match next {
            SessionState::GeneratingLevel => self.generate_level(),
            SessionState::SpawningBlocks => self.spawn_blocks(),
            SessionState::WaitingInput | SessionState::Moving => {}
            SessionState::Win => {
                info!(round = self.round, "game won");
                self.events.push(GameEvent::GameWon);
            }
            SessionState::Lose => {
                info!(round = self.round, highest = ?self.highest_value(), "game lost");
                self.events.push(GameEvent::GameLost);
            }
        }
    }

    fn generate_level(&mut self) {
        self.round = 0;
        self.grid.clear();
        self.tiles.clear();
        self.pending = None;

        self.enter(SessionState::SpawningBlocks);
    }

    fn spawn_blocks(&mut self) {
        for spawn in self.spawn_round() {
            self.events.push(GameEvent::Spawned(spawn));
        }

        // Early-lose heuristic: a single free cell ends the game even if a merge exists.
        if self.grid.empty_count() == 1 {
            self.enter(SessionState::Lose);
            return;
        }

        let won = self.tiles.iter().any(|t| t.value == self.config.win_value);
        self.enter(if won {
            SessionState::Win
        } else {
            SessionState::WaitingInput
        });
    }

    /// Place two tiles on round 0 and one afterwards, on random empty cells
    fn spawn_round(&mut self) -> ArrayVec<TileSpawn, FIRST_ROUND_SPAWNS> {
        let amount = if self.round == 0 {
            FIRST_ROUND_SPAWNS
        } else {
            ROUND_SPAWNS
        };
        self.round += 1;

        let mut free = self.grid.empty_positions();
        self.rng.shuffle(&mut free);

        let mut spawned = ArrayVec::new();
        for &cell in free.iter().take(amount) {
            let value = if self.rng.next_f32() < FOUR_SPAWN_PROBABILITY {
                4
            } else {
                2
            };
            let spawn = self.place_tile(cell, value);
            trace!(tile = %spawn.tile, %cell, value, "spawned");
            spawned.push(spawn);
        }
        spawned
    }

    fn place_tile(&mut self, cell: Position, value: u32) -> TileSpawn {
        assert!(
            self.grid.is_empty_at(cell),
            "cannot place a tile on occupied cell {cell}"
        );
        let tile = self.tiles.spawn(value, cell);
        self.grid.set_occupant(cell, Some(tile));
        TileSpawn { tile, cell, value }
    }

    /// Slide all tiles and pair up merges. Merges are only recorded here.
    fn resolve_move(&mut self, direction: Direction) -> MoveBatch {
        let mut order = self.tiles.ids();
        order.sort_by_key(|&id| self.tiles[id].position);
        // Tiles nearest the destination edge go first so followers see the gaps.
        if matches!(direction, Direction::Up | Direction::Right) {
            order.reverse();
        }

        let origins: Vec<Position> = order.iter().map(|&id| self.tiles[id].position).collect();
        for &id in &order {
            self.slide(id, direction);
        }

        let mut placements = Vec::with_capacity(order.len());
        let mut merges = Vec::new();
        let mut notices = Vec::new();

        for (&id, &from) in order.iter().zip(&origins) {
            let tile = self.tiles[id];
            let to = match tile.merge_target {
                Some(target_id) => {
                    let target = self.tiles[target_id];
                    let survivor = self.tiles.reserve();
                    merges.push(PendingMerge {
                        survivor,
                        source: id,
                        target: target_id,
                    });
                    notices.push(MergeNotice {
                        survivor,
                        absorbed: [id, target_id],
                        cell: target.position,
                        value: target.value * 2,
                    });
                    target.position
                }
                None => tile.position,
            };
            placements.push(TilePlacement { tile: id, from, to });
        }

        debug!(
            %direction,
            moved = placements.iter().filter(|p| p.moved()).count(),
            merges = merges.len(),
            "move resolved"
        );

        self.pending = Some(PendingMove { direction, merges });
        MoveBatch {
            direction,
            placements,
            merges: notices,
            travel_ms: self.config.travel_ms,
        }
    }

    /// Advance one tile through empty cells until it hits the edge, a blocker,
    /// or a tile it can merge into.
    fn slide(&mut self, id: TileId, direction: Direction) {
        loop {
            let here = self.tiles[id].position;
            let Some(next) = self.grid.neighbor(here, direction) else {
                return;
            };

            match self.grid.occupant_at(next) {
                None => {
                    self.grid.set_occupant(here, None);
                    self.grid.set_occupant(next, Some(id));
                    self.tiles[id].position = next;
                }
                Some(other) => {
                    let value = self.tiles[id].value;
                    if self.tiles[other].can_accept_merge(value) {
                        self.tiles[id].merge_target = Some(other);
                        self.tiles[other].merge_source = Some(id);
                        // The merging tile leaves its cell; later tiles may slide into it.
                        self.grid.set_occupant(here, None);
                    }
                    return;
                }
            }
        }
    }

    fn settle_merge(&mut self, merge: &PendingMerge) {
        let target = self.tiles.remove(merge.target);
        let source = self.tiles.remove(merge.source);
        debug_assert_eq!(source.value, target.value);

        let value = target.value * 2;
        let cell = target.position;
        self.tiles.insert(merge.survivor, value, cell);
        self.grid.set_occupant(cell, Some(merge.survivor));

        trace!(tile = %merge.survivor, %cell, value, "merge settled");
        self.events.push(GameEvent::MergeSettled(TileSpawn {
            tile: merge.survivor,
            cell,
            value,
        }));
    }
}
