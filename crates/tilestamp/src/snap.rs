//! Snapping of pointer positions while placing stamps and objects

use crate::SnapPreferences;

/// Which grid, if any, pointer positions snap to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SnapMode {
    #[default]
    NoSnap,
    /// Tile corners
    Grid,
    /// Subdivisions of a tile
    FineGrid,
    /// A grid the size of the selected tile
    Override,
}

/// Keyboard modifiers held while the pointer moves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Modifiers {
    pub ctrl: bool,
    pub shift: bool,
}

/// Grid geometry needed to snap a position, in pixels
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapGrid {
    pub tile_size: [f32; 2],
    /// Size of the tile currently selected in the tileset, if any
    pub selected_tile_size: Option<[f32; 2]>,
}

/// Snaps pointer positions according to preferences and held modifiers
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SnapHelper {
    mode: SnapMode,
    snap_to_pixels: bool,
    grid_fine: u32,
}

impl SnapHelper {
    /// Ctrl toggles snapping, Ctrl+Shift toggles fine snapping
    pub fn new(preferences: &SnapPreferences, modifiers: Modifiers) -> Self {
        let mode = if preferences.snap_to_grid {
            SnapMode::Grid
        } else if preferences.snap_to_fine_grid {
            SnapMode::FineGrid
        } else if preferences.snap_to_override {
            SnapMode::Override
        } else {
            SnapMode::NoSnap
        };

        let mut helper = Self {
            mode,
            snap_to_pixels: preferences.snap_to_pixels,
            grid_fine: preferences.grid_fine.max(1),
        };

        if modifiers.ctrl {
            if modifiers.shift {
                helper.toggle_fine_snap();
            } else {
                helper.toggle_snap();
            }
        }
        helper
    }

    pub fn mode(&self) -> SnapMode {
        self.mode
    }

    pub fn snaps(&self) -> bool {
        self.mode != SnapMode::NoSnap
    }

    pub fn toggle_snap(&mut self) {
        self.mode = match self.mode {
            SnapMode::NoSnap => SnapMode::Grid,
            SnapMode::Grid | SnapMode::FineGrid | SnapMode::Override => SnapMode::NoSnap,
        };
    }

    pub fn toggle_fine_snap(&mut self) {
        self.mode = match self.mode {
            SnapMode::NoSnap | SnapMode::Grid | SnapMode::Override => SnapMode::FineGrid,
            SnapMode::FineGrid => SnapMode::Grid,
        };
    }

    pub fn toggle_override_snap(&mut self) {
        self.mode = match self.mode {
            SnapMode::NoSnap | SnapMode::Grid | SnapMode::FineGrid => SnapMode::Override,
            SnapMode::Override => SnapMode::Grid,
        };
    }

    /// Snap a pixel position
    pub fn snap(&self, pos: [f32; 2], grid: &SnapGrid) -> [f32; 2] {
        match self.mode {
            SnapMode::Grid => snap_to_unit(pos, grid.tile_size),
            SnapMode::FineGrid => {
                let fine = self.grid_fine as f32;
                snap_to_unit(pos, [grid.tile_size[0] / fine, grid.tile_size[1] / fine])
            }
            SnapMode::Override => match grid.selected_tile_size {
                Some(size) => snap_to_unit(pos, size),
                None => pos,
            },
            SnapMode::NoSnap if self.snap_to_pixels => [pos[0].round(), pos[1].round()],
            SnapMode::NoSnap => pos,
        }
    }
}

fn snap_to_unit(pos: [f32; 2], unit: [f32; 2]) -> [f32; 2] {
    let axis = |value: f32, snap_unit: f32| {
        if snap_unit > 0.0 {
            (value / snap_unit).round() * snap_unit
        } else {
            value
        }
    };
    [axis(pos[0], unit[0]), axis(pos[1], unit[1])]
}
