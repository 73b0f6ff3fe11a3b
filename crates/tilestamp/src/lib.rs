//! Tile stamps: reusable brushes made of weighted pattern variations
//!
//! - `TileStamp` - Ordered, weighted variations with copy-on-write sharing
//! - `RandomPicker` - Weighted random selection of a variation
//! - `StampRecord` - The JSON form of a stamp file
//! - `SnapHelper` - Pointer snapping driven by `SnapPreferences`
//!
//! The pattern model lives in `tilestamp_core` and is re-exported here.
//!
//! # Usage
//!
//! ```rust,ignore
//! use tilestamp::{TileStamp, Pattern};
//!
//! let mut stamp = TileStamp::from_pattern(Pattern::from_tiles(1, 1, tileset_id, [Some(0)]))?;
//! stamp.add_variation(Pattern::from_tiles(1, 1, tileset_id, [Some(1)]), 3.0)?;
//!
//! let picker = stamp.random_variations()?;
//! let mut rng = fastrand::Rng::new();
//! let pattern = picker.pick(&mut rng);
//! ```

mod error;
mod file;
mod preferences;
mod random_picker;
mod snap;
mod stamp;

pub use error::StampError;
pub use file::{StampRecord, VariationRecord};
pub use preferences::{PreferencesError, SnapPreferences};
pub use random_picker::RandomPicker;
pub use snap::{Modifiers, SnapGrid, SnapHelper, SnapMode};
pub use stamp::{TileStamp, TileStampVariation};

pub use tilestamp_core::{
    FlipDirection, Layer, LayerData, LayerType, Pattern, PatternError, PlacedObject,
    RotateDirection, TileRef, Tileset,
};
