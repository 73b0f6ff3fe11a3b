//! Tileset membership - which tile indices currently exist

use crate::TileRef;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use uuid::Uuid;

/// The set of tiles a tileset currently provides
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tileset {
    pub id: Uuid,
    pub name: String,
    pub tiles: BTreeSet<u32>,
}

impl Tileset {
    /// Create a tileset with tiles `0..tile_count`
    pub fn new(name: String, tile_count: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            name,
            tiles: (0..tile_count).collect(),
        }
    }

    pub fn tile_count(&self) -> usize {
        self.tiles.len()
    }

    pub fn contains(&self, index: u32) -> bool {
        self.tiles.contains(&index)
    }

    /// Add tiles, returning the ones that were not present before
    pub fn add_tiles(&mut self, indices: &[u32]) -> Vec<u32> {
        indices
            .iter()
            .copied()
            .filter(|index| self.tiles.insert(*index))
            .collect()
    }

    /// Remove tiles, returning the ones that were actually present
    pub fn remove_tiles(&mut self, indices: &[u32]) -> Vec<u32> {
        indices
            .iter()
            .copied()
            .filter(|index| self.tiles.remove(index))
            .collect()
    }
}

impl TileRef {
    /// Whether this tile still exists in one of the given tilesets
    pub fn resolves_in(&self, tilesets: &[Tileset]) -> bool {
        tilesets
            .iter()
            .find(|t| t.id == self.tileset_id)
            .is_some_and(|t| t.contains(self.index))
    }
}
