//! Pattern - a small layered tile grid used as a brush shape

use crate::transform::{flip_tile, rotate_tile, FlipDirection, RotateDirection};
use crate::{Layer, LayerData, PlacedObject, TileRef};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// A small layered tile grid
///
/// Every tile layer in a pattern holds `width * height` cells; see
/// [`Pattern::validate`]. The file name is where the pattern was last loaded
/// from or saved to. It is not part of the pattern's content, is ignored by
/// equality, and is dropped by any change made through the pattern's methods.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "bevy", derive(bevy::asset::Asset, bevy::reflect::TypePath))]
pub struct Pattern {
    pub width: u32,
    pub height: u32,
    pub layers: Vec<Layer>,
    #[serde(skip)]
    pub(crate) file_name: Option<PathBuf>,
}

impl PartialEq for Pattern {
    fn eq(&self, other: &Self) -> bool {
        self.width == other.width && self.height == other.height && self.layers == other.layers
    }
}

impl Pattern {
    /// Create a new pattern without layers
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            layers: Vec::new(),
            file_name: None,
        }
    }

    /// Create a pattern with a single tile layer filled from row-major data
    ///
    /// Missing cells are left empty and extra cells are dropped.
    pub fn from_tiles(
        width: u32,
        height: u32,
        tileset_id: uuid::Uuid,
        tiles: impl IntoIterator<Item = Option<u32>>,
    ) -> Self {
        let size = width as usize * height as usize;
        let mut cells: Vec<Option<u32>> = tiles.into_iter().take(size).collect();
        cells.resize(size, None);

        let mut pattern = Self::new(width, height);
        pattern.add_layer(Layer {
            name: "Tiles".to_string(),
            visible: true,
            data: LayerData::Tiles {
                tileset_id,
                tiles: cells,
            },
        });
        pattern
    }

    /// Path this pattern was loaded from or saved to
    pub fn file_name(&self) -> Option<&Path> {
        self.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, file_name: Option<PathBuf>) {
        self.file_name = file_name;
    }

    /// Size as (width, height)
    pub fn size(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Add a new layer on top
    pub fn add_layer(&mut self, layer: Layer) {
        self.file_name = None;
        self.layers.push(layer);
    }

    /// Get layer by index
    pub fn get_layer(&self, index: usize) -> Option<&Layer> {
        self.layers.get(index)
    }

    /// Get mutable layer by index
    pub fn get_layer_mut(&mut self, index: usize) -> Option<&mut Layer> {
        self.file_name = None;
        self.layers.get_mut(index)
    }

    /// The first layer, if it is a tile layer
    pub fn first_tile_layer(&self) -> Option<&Layer> {
        self.layers.first().filter(|layer| layer.is_tile_layer())
    }

    /// Whether this pattern can be used as a stamp variation: it needs at
    /// least one layer and the first one must be a tile layer
    pub fn is_stampable(&self) -> bool {
        self.first_tile_layer().is_some()
    }

    /// Check that every tile layer, including those nested in groups, holds
    /// exactly `width * height` cells
    pub fn validate(&self) -> Result<(), String> {
        let expected = self.cell_count();
        for layer in self.all_layers() {
            if let LayerData::Tiles { tiles, .. } = &layer.data {
                if Some(tiles.len()) != expected {
                    return Err(format!(
                        "Tile layer '{}' has {} cells, expected {}x{}",
                        layer.name,
                        tiles.len(),
                        self.width,
                        self.height
                    ));
                }
            }
        }
        Ok(())
    }

    fn cell_count(&self) -> Option<usize> {
        (self.width as usize).checked_mul(self.height as usize)
    }

    fn cell_index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// All layers, with group children listed after their group
    pub fn all_layers(&self) -> Vec<&Layer> {
        fn visit<'a>(layers: &'a [Layer], out: &mut Vec<&'a Layer>) {
            for layer in layers {
                out.push(layer);
                match &layer.data {
                    LayerData::Group { layers } => visit(layers, out),
                    LayerData::Tiles { .. } | LayerData::Objects { .. } | LayerData::Image { .. } => {}
                }
            }
        }

        let mut out = Vec::new();
        visit(&self.layers, &mut out);
        out
    }

    /// Get tile at position for a specific layer
    pub fn get_tile(&self, layer_index: usize, x: u32, y: u32) -> Option<u32> {
        if x >= self.width || y >= self.height {
            return None;
        }
        if let Some(layer) = self.layers.get(layer_index) {
            if let LayerData::Tiles { tiles, .. } = &layer.data {
                let index = self.cell_index(x, y);
                return tiles.get(index).copied().flatten();
            }
        }
        None
    }

    /// Set tile at position for a specific layer
    pub fn set_tile(&mut self, layer_index: usize, x: u32, y: u32, tile: Option<u32>) {
        if x >= self.width || y >= self.height {
            return;
        }
        let index = self.cell_index(x, y);
        if let Some(layer) = self.layers.get_mut(layer_index) {
            if let LayerData::Tiles { tiles, .. } = &mut layer.data {
                if index < tiles.len() {
                    tiles[index] = tile;
                    self.file_name = None;
                }
            }
        }
    }

    /// Every tile referenced by this pattern, from tile cells and tile objects
    pub fn tile_refs(&self) -> Vec<TileRef> {
        let mut refs = Vec::new();
        for layer in self.all_layers() {
            match &layer.data {
                LayerData::Tiles { tileset_id, tiles } => {
                    refs.extend(
                        tiles
                            .iter()
                            .flatten()
                            .map(|tile| TileRef::new(*tileset_id, *tile)),
                    );
                }
                LayerData::Objects { objects } => {
                    refs.extend(objects.iter().filter_map(PlacedObject::tile_ref));
                }
                LayerData::Image { .. } | LayerData::Group { .. } => {}
            }
        }
        refs
    }

    /// A mirrored copy of this pattern
    pub fn flipped(&self, direction: FlipDirection) -> Self {
        let (width, height) = (self.width, self.height);
        let mut flipped = self.clone();
        flipped.file_name = None;
        for_each_layer_mut(&mut flipped.layers, &mut |data| match data {
            LayerData::Tiles { tiles, .. } => {
                *tiles = remap_cells(tiles, width, height, width, |x, y| match direction {
                    FlipDirection::Horizontal => (width - 1 - x, y),
                    FlipDirection::Vertical => (x, height - 1 - y),
                })
                .into_iter()
                .map(|cell| cell.map(|tile| flip_tile(tile, direction)))
                .collect();
            }
            LayerData::Objects { objects } => {
                for object in objects {
                    let [x, y] = object.position;
                    object.position = match direction {
                        FlipDirection::Horizontal => [width as f32 - x, y],
                        FlipDirection::Vertical => [x, height as f32 - y],
                    };
                    object.tile = object.tile.map(|tile| flip_tile(tile, direction));
                }
            }
            LayerData::Image { .. } | LayerData::Group { .. } => {}
        });
        flipped
    }

    /// A copy of this pattern turned a quarter turn; width and height swap
    pub fn rotated(&self, direction: RotateDirection) -> Self {
        let (width, height) = (self.width, self.height);
        let mut rotated = self.clone();
        rotated.file_name = None;
        rotated.width = height;
        rotated.height = width;
        for_each_layer_mut(&mut rotated.layers, &mut |data| match data {
            LayerData::Tiles { tiles, .. } => {
                *tiles = remap_cells(tiles, width, height, height, |x, y| match direction {
                    RotateDirection::Right => (height - 1 - y, x),
                    RotateDirection::Left => (y, width - 1 - x),
                })
                .into_iter()
                .map(|cell| cell.map(|tile| rotate_tile(tile, direction)))
                .collect();
            }
            LayerData::Objects { objects } => {
                for object in objects {
                    let [x, y] = object.position;
                    object.position = match direction {
                        RotateDirection::Right => [height as f32 - y, x],
                        RotateDirection::Left => [y, width as f32 - x],
                    };
                    object.tile = object.tile.map(|tile| rotate_tile(tile, direction));
                }
            }
            LayerData::Image { .. } | LayerData::Group { .. } => {}
        });
        rotated
    }
}

/// Visit the data of every layer, recursing into groups after visiting them
pub(crate) fn for_each_layer_mut(layers: &mut [Layer], f: &mut impl FnMut(&mut LayerData)) {
    for layer in layers {
        f(&mut layer.data);
        if let LayerData::Group { layers } = &mut layer.data {
            for_each_layer_mut(layers, f);
        }
    }
}

/// Move every cell of a `width * height` grid to `target(x, y)` in a grid that
/// is `new_width` cells wide. Cells beyond the grid are dropped.
fn remap_cells(
    tiles: &[Option<u32>],
    width: u32,
    height: u32,
    new_width: u32,
    target: impl Fn(u32, u32) -> (u32, u32),
) -> Vec<Option<u32>> {
    let mut remapped = vec![None; tiles.len()];
    if width == 0 {
        return remapped;
    }
    for (src, cell) in tiles.iter().enumerate() {
        let (x, y) = ((src % width as usize) as u32, (src / width as usize) as u32);
        if y >= height {
            break;
        }
        let (nx, ny) = target(x, y);
        let dst = ny as usize * new_width as usize + nx as usize;
        if let Some(slot) = remapped.get_mut(dst) {
            *slot = *cell;
        }
    }
    remapped
}
