//! Grid module - spatial bookkeeping for the tiles
//!
//! A fixed `width x height` grid of cells, each either empty or holding the id of
//! the tile that occupies it. Uses a flat vector (row-major, `y * width + x`) sized
//! once at construction; cells are never added or removed, only their occupant
//! changes.
//!
//! The grid is a plain map. It does not check that a tile's own position agrees
//! with the cell it is recorded in; the session keeps those in sync. Addressing a
//! cell outside the grid is a programming error and panics.

use crate::error::ConfigError;
use crate::types::{Direction, Position, TileId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: u16,
    height: u16,
    /// Flat array of cells, row-major order (y * width + x)
    cells: Vec<Option<TileId>>,
}

impl Grid {
    /// Create an empty grid. Fails only on a zero dimension.
    pub fn new(width: u16, height: u16) -> Result<Self, ConfigError> {
        if width == 0 || height == 0 {
            return Err(ConfigError::InvalidDimensions { width, height });
        }
        Ok(Self {
            width,
            height,
            cells: vec![None; width as usize * height as usize],
        })
    }

    /// Calculate flat index from a position, panicking when it is off the grid
    #[inline(always)]
    fn index(&self, pos: Position) -> usize {
        assert!(
            self.contains(pos),
            "position {pos} is outside the {}x{} grid",
            self.width,
            self.height
        );
        pos.y as usize * self.width as usize + pos.x as usize
    }

    pub fn width(&self) -> u16 {
        self.width
    }

    pub fn height(&self) -> u16 {
        self.height
    }

    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    pub fn contains(&self, pos: Position) -> bool {
        pos.x < self.width && pos.y < self.height
    }

    /// The tile at `pos`, if any
    pub fn occupant_at(&self, pos: Position) -> Option<TileId> {
        self.cells[self.index(pos)]
    }

    pub fn is_empty_at(&self, pos: Position) -> bool {
        self.occupant_at(pos).is_none()
    }

    /// Record (or clear, with `None`) the occupant of `pos`
    pub fn set_occupant(&mut self, pos: Position, tile: Option<TileId>) {
        let idx = self.index(pos);
        self.cells[idx] = tile;
    }

    /// The neighbouring cell one step in `dir`, or `None` at the edge
    pub fn neighbor(&self, pos: Position, dir: Direction) -> Option<Position> {
        let (dx, dy) = dir.delta();
        let x = i32::from(pos.x) + dx;
        let y = i32::from(pos.y) + dy;
        if x < 0 || y < 0 || x >= i32::from(self.width) || y >= i32::from(self.height) {
            return None;
        }
        Some(Position::new(x as u16, y as u16))
    }

    /// Every cell position, column by column (x ascending, then y ascending)
    pub fn positions(&self) -> impl Iterator<Item = Position> + '_ {
        (0..self.width).flat_map(move |x| (0..self.height).map(move |y| Position::new(x, y)))
    }

    /// Positions of all unoccupied cells. Callers shuffle as needed.
    pub fn empty_positions(&self) -> Vec<Position> {
        self.positions().filter(|&p| self.is_empty_at(p)).collect()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn occupied_count(&self) -> usize {
        self.cells.len() - self.empty_count()
    }

    /// Clear every cell
    pub fn clear(&mut self) {
        self.cells.iter_mut().for_each(|c| *c = None);
    }
}
