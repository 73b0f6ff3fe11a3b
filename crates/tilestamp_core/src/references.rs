//! Finding and stripping references to tiles that no longer exist

use crate::pattern::for_each_layer_mut;
use crate::{LayerData, Pattern, TileRef, Tileset};

/// Whether any tile cell or tile object in the pattern references a tile
/// missing from the given tilesets
pub fn has_missing_tiles(pattern: &Pattern, tilesets: &[Tileset]) -> bool {
    pattern
        .tile_refs()
        .iter()
        .any(|tile| !tile.resolves_in(tilesets))
}

/// Clear every tile cell matching `condition` and remove every object whose
/// tile matches it. Returns the number of cells cleared plus objects removed.
pub fn remove_tile_references(
    pattern: &mut Pattern,
    condition: impl Fn(&TileRef) -> bool,
) -> usize {
    let mut removed = 0;
    for_each_layer_mut(&mut pattern.layers, &mut |data| match data {
        LayerData::Tiles { tileset_id, tiles } => {
            for cell in tiles.iter_mut() {
                if let Some(tile) = *cell {
                    if condition(&TileRef::new(*tileset_id, tile)) {
                        *cell = None;
                        removed += 1;
                    }
                }
            }
        }
        LayerData::Objects { objects } => {
            let before = objects.len();
            objects.retain(|object| !object.tile_ref().is_some_and(|tile| condition(&tile)));
            removed += before - objects.len();
        }
        LayerData::Image { .. } | LayerData::Group { .. } => {}
    });
    if removed > 0 {
        pattern.file_name = None;
    }
    removed
}

/// Strip every reference to a tile missing from the given tilesets
pub fn remove_missing_tiles(pattern: &mut Pattern, tilesets: &[Tileset]) -> usize {
    let removed = remove_tile_references(pattern, |tile| !tile.resolves_in(tilesets));
    if removed > 0 {
        tracing::warn!("Removed {} references to missing tiles", removed);
    }
    removed
}
