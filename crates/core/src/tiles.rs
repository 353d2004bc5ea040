//! Live tile collection.
//!
//! Tiles live in an arena indexed by [`TileId`]. An id is the slot index, so ids
//! are assigned in creation order and a retired slot is left empty rather than
//! reused. The merge links between tiles are stored as ids into this arena.

use std::ops::{Index, IndexMut};

use crate::types::{Position, TileId};

/// One numbered tile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tile {
    pub id: TileId,
    pub value: u32,
    pub position: Position,
    /// Tile this one is merging into during the move being resolved
    pub merge_target: Option<TileId>,
    /// Tile that claimed this one as its merge target (at most one per move)
    pub merge_source: Option<TileId>,
}

impl Tile {
    fn new(id: TileId, value: u32, position: Position) -> Self {
        Self {
            id,
            value,
            position,
            merge_target: None,
            merge_source: None,
        }
    }

    /// Whether another tile of `value` may merge into this one in the current move
    pub fn can_accept_merge(&self, value: u32) -> bool {
        self.value == value && self.merge_source.is_none() && self.merge_target.is_none()
    }
}

#[derive(Debug, Clone, Default)]
pub struct Tiles {
    slots: Vec<Option<Tile>>,
    live: usize,
}

impl Tiles {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop every tile and restart id assignment
    pub fn clear(&mut self) {
        self.slots.clear();
        self.live = 0;
    }

    /// Hand out the next id without creating a tile yet.
    ///
    /// Used for merge results, whose id is announced before the tile exists.
    pub fn reserve(&mut self) -> TileId {
        let id = TileId(self.slots.len() as u32);
        self.slots.push(None);
        id
    }

    /// Create a tile in a previously reserved slot
    pub fn insert(&mut self, id: TileId, value: u32, position: Position) {
        let slot = self
            .slots
            .get_mut(id.index())
            .unwrap_or_else(|| panic!("tile id {id} was never reserved"));
        assert!(slot.is_none(), "tile id {id} is already in use");
        *slot = Some(Tile::new(id, value, position));
        self.live += 1;
    }

    /// Create a tile with a fresh id
    pub fn spawn(&mut self, value: u32, position: Position) -> TileId {
        let id = self.reserve();
        self.insert(id, value, position);
        id
    }

    /// Retire a live tile
    pub fn remove(&mut self, id: TileId) -> Tile {
        let tile = self
            .slots
            .get_mut(id.index())
            .and_then(Option::take)
            .unwrap_or_else(|| panic!("tile {id} is not live"));
        self.live -= 1;
        tile
    }

    pub fn get(&self, id: TileId) -> Option<&Tile> {
        self.slots.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: TileId) -> Option<&mut Tile> {
        self.slots.get_mut(id.index()).and_then(Option::as_mut)
    }

    pub fn contains(&self, id: TileId) -> bool {
        self.get(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.live
    }

    pub fn is_empty(&self) -> bool {
        self.live == 0
    }

    /// Live tiles in id order
    pub fn iter(&self) -> impl Iterator<Item = &Tile> {
        self.slots.iter().flatten()
    }

    pub fn ids(&self) -> Vec<TileId> {
        self.iter().map(|t| t.id).collect()
    }

    /// Forget every merge link
    pub fn clear_merge_links(&mut self) {
        for tile in self.slots.iter_mut().flatten() {
            tile.merge_target = None;
            tile.merge_source = None;
        }
    }
}

impl Index<TileId> for Tiles {
    type Output = Tile;

    fn index(&self, id: TileId) -> &Tile {
        self.get(id)
            .unwrap_or_else(|| panic!("tile {id} is not live"))
    }
}

impl IndexMut<TileId> for Tiles {
    fn index_mut(&mut self, id: TileId) -> &mut Tile {
        self.get_mut(id)
            .unwrap_or_else(|| panic!("tile {id} is not live"))
    }
}
