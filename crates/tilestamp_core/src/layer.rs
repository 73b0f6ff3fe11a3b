//! Layer types for pattern grids

use serde::{Deserialize, Serialize};
use uuid::Uuid;

// Tile flip flags (Tiled-compatible bit positions)
/// Bit flag for horizontal flip (mirror on Y axis)
pub const TILE_FLIP_X: u32 = 0x8000_0000;
/// Bit flag for vertical flip (mirror on X axis)
pub const TILE_FLIP_Y: u32 = 0x4000_0000;
/// Bit flag for anti-diagonal flip (for 90° rotations, combined with X/Y)
pub const TILE_FLIP_DIAGONAL: u32 = 0x2000_0000;
/// Mask to extract just the tile index (without flip flags)
pub const TILE_INDEX_MASK: u32 = 0x1FFF_FFFF;
/// Mask for all flip flags
pub const TILE_FLIP_MASK: u32 = TILE_FLIP_X | TILE_FLIP_Y | TILE_FLIP_DIAGONAL;

/// Extract the tile index from a tile value (strips flip flags)
#[inline]
pub fn tile_index(tile: u32) -> u32 {
    tile & TILE_INDEX_MASK
}

/// Check if a tile has horizontal flip
#[inline]
pub fn tile_flip_x(tile: u32) -> bool {
    tile & TILE_FLIP_X != 0
}

/// Check if a tile has vertical flip
#[inline]
pub fn tile_flip_y(tile: u32) -> bool {
    tile & TILE_FLIP_Y != 0
}

/// Check if a tile has anti-diagonal flip
#[inline]
pub fn tile_flip_diagonal(tile: u32) -> bool {
    tile & TILE_FLIP_DIAGONAL != 0
}

/// Create a tile value with flip flags
#[inline]
pub fn tile_with_flips(index: u32, flip_x: bool, flip_y: bool, flip_diagonal: bool) -> u32 {
    let mut tile = index & TILE_INDEX_MASK;
    if flip_x {
        tile |= TILE_FLIP_X;
    }
    if flip_y {
        tile |= TILE_FLIP_Y;
    }
    if flip_diagonal {
        tile |= TILE_FLIP_DIAGONAL;
    }
    tile
}

/// Toggle horizontal flip on a tile value
#[inline]
pub fn toggle_flip_x(tile: u32) -> u32 {
    tile ^ TILE_FLIP_X
}

/// Toggle vertical flip on a tile value
#[inline]
pub fn toggle_flip_y(tile: u32) -> u32 {
    tile ^ TILE_FLIP_Y
}

/// A reference to a single tile of a tileset, without flip flags
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TileRef {
    pub tileset_id: Uuid,
    pub index: u32,
}

impl TileRef {
    pub fn new(tileset_id: Uuid, index: u32) -> Self {
        Self {
            tileset_id,
            index: index & TILE_INDEX_MASK,
        }
    }
}

/// An object placed on an object layer of a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacedObject {
    pub id: Uuid,
    /// Position in tile units, relative to the pattern's top-left corner
    pub position: [f32; 2],
    /// Tileset of the tile drawn for this object, if it is a tile object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tileset_id: Option<Uuid>,
    /// Tile value (with flip flags) drawn for this object
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tile: Option<u32>,
}

impl PlacedObject {
    /// Create a plain (non-tile) object
    pub fn new(position: [f32; 2]) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            tileset_id: None,
            tile: None,
        }
    }

    /// Create an object that draws a tile
    pub fn with_tile(position: [f32; 2], tileset_id: Uuid, tile: u32) -> Self {
        Self {
            id: Uuid::new_v4(),
            position,
            tileset_id: Some(tileset_id),
            tile: Some(tile),
        }
    }

    /// The tile this object draws, if any
    pub fn tile_ref(&self) -> Option<TileRef> {
        match (self.tileset_id, self.tile) {
            (Some(tileset_id), Some(tile)) => Some(TileRef::new(tileset_id, tile)),
            _ => None,
        }
    }
}

/// A layer of a pattern
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Layer {
    pub name: String,
    pub visible: bool,
    pub data: LayerData,
}

impl Layer {
    /// Create a new tile layer with the given tileset
    pub fn new_tile_layer(name: String, tileset_id: Uuid, width: u32, height: u32) -> Self {
        let size = (width * height) as usize;
        Self {
            name,
            visible: true,
            data: LayerData::Tiles {
                tileset_id,
                tiles: vec![None; size],
            },
        }
    }

    /// Create a new object layer
    pub fn new_object_layer(name: String) -> Self {
        Self {
            name,
            visible: true,
            data: LayerData::Objects {
                objects: Vec::new(),
            },
        }
    }

    /// Create a new image layer
    pub fn new_image_layer(name: String, path: String) -> Self {
        Self {
            name,
            visible: true,
            data: LayerData::Image { path },
        }
    }

    /// Create a new group layer wrapping the given layers
    pub fn new_group_layer(name: String, layers: Vec<Layer>) -> Self {
        Self {
            name,
            visible: true,
            data: LayerData::Group { layers },
        }
    }

    /// Get the type of this layer
    pub fn layer_type(&self) -> LayerType {
        match &self.data {
            LayerData::Tiles { .. } => LayerType::Tiles,
            LayerData::Objects { .. } => LayerType::Objects,
            LayerData::Image { .. } => LayerType::Image,
            LayerData::Group { .. } => LayerType::Group,
        }
    }

    /// Whether this layer can be addressed cell by cell
    pub fn is_tile_layer(&self) -> bool {
        matches!(self.data, LayerData::Tiles { .. })
    }

    /// Get the tileset ID if this is a tile layer
    pub fn tileset_id(&self) -> Option<Uuid> {
        match &self.data {
            LayerData::Tiles { tileset_id, .. } => Some(*tileset_id),
            LayerData::Objects { .. } | LayerData::Image { .. } | LayerData::Group { .. } => None,
        }
    }
}

/// The type of a layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LayerType {
    Tiles,
    Objects,
    Image,
    Group,
}

/// The data contained in a layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum LayerData {
    /// Tile layer sized to its pattern
    Tiles {
        /// The tileset used for this layer
        tileset_id: Uuid,
        /// Tile data in row-major order - None means empty, Some(value) is a
        /// tile index with flip flags in the top bits
        tiles: Vec<Option<u32>>,
    },
    /// Object layer
    Objects { objects: Vec<PlacedObject> },
    /// Image layer, drawn as-is and never transformed
    Image { path: String },
    /// Group of nested layers
    Group { layers: Vec<Layer> },
}
