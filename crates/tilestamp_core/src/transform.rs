//! Flip and rotation directions, and how they act on a single tile value

use crate::layer::{
    tile_flip_diagonal, tile_flip_x, tile_flip_y, tile_index, tile_with_flips, toggle_flip_x,
    toggle_flip_y,
};
use serde::{Deserialize, Serialize};

/// Axis of a mirror transform
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FlipDirection {
    Horizontal,
    Vertical,
}

/// Direction of a quarter-turn rotation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotateDirection {
    /// Clockwise
    Right,
    /// Counter-clockwise
    Left,
}

/// Apply a flip to the flags of a tile value
#[inline]
pub fn flip_tile(tile: u32, direction: FlipDirection) -> u32 {
    match direction {
        FlipDirection::Horizontal => toggle_flip_x(tile),
        FlipDirection::Vertical => toggle_flip_y(tile),
    }
}

/// Apply a quarter turn to the flags of a tile value.
///
/// Flags are applied anti-diagonal first, then horizontal, then vertical, so a
/// clockwise turn maps `(x, y, d)` to `(!y, x, !d)` and a counter-clockwise
/// turn maps it to `(y, !x, !d)`.
#[inline]
pub fn rotate_tile(tile: u32, direction: RotateDirection) -> u32 {
    let (x, y, d) = (tile_flip_x(tile), tile_flip_y(tile), tile_flip_diagonal(tile));
    let (x, y) = match direction {
        RotateDirection::Right => (!y, x),
        RotateDirection::Left => (y, !x),
    };
    tile_with_flips(tile_index(tile), x, y, !d)
}
