//! Core data structures for tile stamps
//!
//! This crate provides the pattern model that stamp variations are built from:
//! - `Pattern` - A small layered grid used as a brush shape
//! - `Layer` - A single layer (tiles, objects, image or group)
//! - `Tileset` - Which tiles of a tileset currently exist
//! - `TileRef` - A reference to one tile, without flip flags
//! - `FlipDirection` / `RotateDirection` - Geometric transforms

mod file;
mod layer;
mod pattern;
mod references;
mod tileset;
mod transform;

pub use file::PatternError;
pub use layer::{
    tile_flip_diagonal, tile_flip_x, tile_flip_y, tile_index, tile_with_flips, toggle_flip_x,
    toggle_flip_y, Layer, LayerData, LayerType, PlacedObject, TileRef, TILE_FLIP_DIAGONAL,
    TILE_FLIP_MASK, TILE_FLIP_X, TILE_FLIP_Y, TILE_INDEX_MASK,
};
pub use pattern::Pattern;
pub use references::{has_missing_tiles, remove_missing_tiles, remove_tile_references};
pub use tileset::Tileset;
pub use transform::{flip_tile, rotate_tile, FlipDirection, RotateDirection};
