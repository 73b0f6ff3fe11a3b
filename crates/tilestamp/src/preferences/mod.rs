//! Snapping preferences
//!
//! Persisted separately from stamps, in the user's config directory.

mod file;

pub use file::*;

use serde::{Deserialize, Serialize};

/// User preferences that decide how pointer positions snap
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SnapPreferences {
    /// Snap to tile corners
    pub snap_to_grid: bool,
    /// Snap to subdivisions of a tile
    pub snap_to_fine_grid: bool,
    /// Snap to a grid the size of the selected tile
    pub snap_to_override: bool,
    /// Round to whole pixels when no grid snapping applies
    pub snap_to_pixels: bool,
    /// Number of fine grid subdivisions per tile
    pub grid_fine: u32,
}

impl Default for SnapPreferences {
    fn default() -> Self {
        Self {
            snap_to_grid: true,
            snap_to_fine_grid: false,
            snap_to_override: false,
            snap_to_pixels: false,
            grid_fine: 4,
        }
    }
}
