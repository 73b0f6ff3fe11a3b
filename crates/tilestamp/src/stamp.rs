//! Tile stamps - reusable brushes made of weighted pattern variations

use crate::{RandomPicker, StampError};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tilestamp_core::{FlipDirection, Pattern, RotateDirection, TileRef, Tileset};

/// One weighted alternative pattern of a stamp
#[derive(Debug, Clone)]
pub struct TileStampVariation {
    pub pattern: Pattern,
    /// Relative weight when picking a random variation
    pub probability: f64,
    /// Tile shown for this variation in tile pickers.
    ///
    /// Stored as a value reference; it can outlive the tile it names, so use
    /// [`TileStamp::clear_missing_tiles`] after tiles are removed.
    pub tile: Option<TileRef>,
}

impl TileStampVariation {
    /// Create a variation, checking that the pattern starts with a tile layer
    /// and that every tile layer covers the pattern grid
    pub fn new(pattern: Pattern, probability: f64) -> Result<Self, StampError> {
        if pattern.layers.is_empty() {
            return Err(StampError::InvalidPattern("pattern has no layers".to_string()));
        }
        if !pattern.is_stampable() {
            return Err(StampError::InvalidPattern(
                "first layer of the pattern is not a tile layer".to_string(),
            ));
        }
        pattern.validate().map_err(StampError::InvalidPattern)?;
        check_probability(probability)?;
        Ok(Self {
            pattern,
            probability,
            tile: None,
        })
    }
}

pub(crate) fn check_probability(probability: f64) -> Result<(), StampError> {
    if probability.is_finite() && probability >= 0.0 {
        Ok(())
    } else {
        Err(StampError::InvalidProbability(probability))
    }
}

#[derive(Debug, Clone, Default)]
struct StampData {
    name: String,
    file_name: Option<PathBuf>,
    variations: Vec<TileStampVariation>,
    quick_stamp_index: Option<u32>,
}

/// A reusable brush: an ordered list of weighted pattern variations
///
/// Cloning a stamp is cheap. Clones share their data until one of them is
/// modified, at which point the modified copy gets its own storage.
#[derive(Debug, Clone, Default)]
pub struct TileStamp {
    data: Arc<StampData>,
}

impl PartialEq for TileStamp {
    fn eq(&self, other: &Self) -> bool {
        if Arc::ptr_eq(&self.data, &other.data) {
            return true;
        }
        self.data.name == other.data.name
            && self.data.variations.len() == other.data.variations.len()
            && self
                .data
                .variations
                .iter()
                .zip(&other.data.variations)
                .all(|(a, b)| a.pattern == b.pattern && a.probability == b.probability)
    }
}

impl TileStamp {
    /// Create an empty stamp
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a stamp with a single variation of probability 1.0
    pub fn from_pattern(pattern: Pattern) -> Result<Self, StampError> {
        let mut stamp = Self::new();
        stamp.add_pattern(pattern)?;
        Ok(stamp)
    }

    fn data_mut(&mut self) -> &mut StampData {
        Arc::make_mut(&mut self.data)
    }

    pub(crate) fn variations_mut(&mut self) -> &mut [TileStampVariation] {
        &mut self.data_mut().variations
    }

    /// Whether this stamp and `other` still share the same storage
    pub fn shares_storage_with(&self, other: &TileStamp) -> bool {
        Arc::ptr_eq(&self.data, &other.data)
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    pub fn set_name(&mut self, name: impl Into<String>) {
        self.data_mut().name = name.into();
    }

    /// The stamp file this stamp was loaded from or saved to
    pub fn file_name(&self) -> Option<&Path> {
        self.data.file_name.as_deref()
    }

    pub fn set_file_name(&mut self, file_name: Option<PathBuf>) {
        self.data_mut().file_name = file_name;
    }

    /// Shortcut slot this stamp is bound to, if any
    pub fn quick_stamp_index(&self) -> Option<u32> {
        self.data.quick_stamp_index
    }

    pub fn set_quick_stamp_index(&mut self, index: Option<u32>) {
        self.data_mut().quick_stamp_index = index;
    }

    pub fn variations(&self) -> &[TileStampVariation] {
        &self.data.variations
    }

    pub fn len(&self) -> usize {
        self.data.variations.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.variations.is_empty()
    }

    fn variation(&self, index: usize) -> Result<&TileStampVariation, StampError> {
        self.data
            .variations
            .get(index)
            .ok_or(StampError::IndexOutOfRange {
                index,
                len: self.len(),
            })
    }

    fn variation_mut(&mut self, index: usize) -> Result<&mut TileStampVariation, StampError> {
        let len = self.len();
        if index >= len {
            return Err(StampError::IndexOutOfRange { index, len });
        }
        Ok(&mut self.data_mut().variations[index])
    }

    /// Append a pattern with probability 1.0
    pub fn add_pattern(&mut self, pattern: Pattern) -> Result<(), StampError> {
        self.add_variation(pattern, 1.0)
    }

    /// Append a pattern with the given probability; the stamp takes ownership
    /// of the pattern
    pub fn add_variation(&mut self, pattern: Pattern, probability: f64) -> Result<(), StampError> {
        let variation = TileStampVariation::new(pattern, probability)?;
        self.data_mut().variations.push(variation);
        Ok(())
    }

    /// Append a copy of another stamp's variation (pattern and probability)
    pub fn add_variation_from(&mut self, variation: &TileStampVariation) -> Result<(), StampError> {
        self.add_variation(variation.pattern.clone(), variation.probability)
    }

    /// Remove the variation at `index` and hand back its pattern
    pub fn take_variation(&mut self, index: usize) -> Result<Pattern, StampError> {
        self.variation(index)?;
        Ok(self.data_mut().variations.remove(index).pattern)
    }

    pub fn probability(&self, index: usize) -> Result<f64, StampError> {
        Ok(self.variation(index)?.probability)
    }

    /// Set the weight of a variation. Zero is allowed: such a variation is
    /// kept but never picked.
    pub fn set_probability(&mut self, index: usize, probability: f64) -> Result<(), StampError> {
        self.variation(index)?;
        check_probability(probability)?;
        self.variation_mut(index)?.probability = probability;
        Ok(())
    }

    /// Representative tile of a variation
    pub fn variation_tile(&self, index: usize) -> Result<Option<TileRef>, StampError> {
        Ok(self.variation(index)?.tile)
    }

    pub fn set_variation_tile(
        &mut self,
        index: usize,
        tile: Option<TileRef>,
    ) -> Result<(), StampError> {
        self.variation_mut(index)?.tile = tile;
        Ok(())
    }

    /// Largest width and largest height over all variations
    pub fn max_size(&self) -> (u32, u32) {
        self.data
            .variations
            .iter()
            .fold((0, 0), |(width, height), v| {
                (width.max(v.pattern.width), height.max(v.pattern.height))
            })
    }

    /// A picker over the variation patterns, weighted by probability
    pub fn random_variations(&self) -> Result<RandomPicker<&Pattern>, StampError> {
        let mut picker = RandomPicker::new();
        for variation in &self.data.variations {
            picker.add(&variation.pattern, variation.probability);
        }
        if picker.is_empty() {
            return Err(StampError::NoSelection);
        }
        Ok(picker)
    }

    /// A copy with every pattern mirrored
    pub fn flipped(&self, direction: FlipDirection) -> TileStamp {
        self.map_patterns(|pattern| pattern.flipped(direction))
    }

    /// A copy with every pattern turned a quarter turn
    pub fn rotated(&self, direction: RotateDirection) -> TileStamp {
        self.map_patterns(|pattern| pattern.rotated(direction))
    }

    fn map_patterns(&self, transform: impl Fn(&Pattern) -> Pattern) -> TileStamp {
        let data = StampData {
            name: self.data.name.clone(),
            file_name: self.data.file_name.clone(),
            quick_stamp_index: self.data.quick_stamp_index,
            variations: self
                .data
                .variations
                .iter()
                .map(|v| TileStampVariation {
                    pattern: transform(&v.pattern),
                    probability: v.probability,
                    tile: v.tile,
                })
                .collect(),
        };
        TileStamp {
            data: Arc::new(data),
        }
    }

    /// A copy that does not share storage with this stamp
    pub fn deep_clone(&self) -> TileStamp {
        TileStamp {
            data: Arc::new(StampData::clone(&self.data)),
        }
    }

    /// Clear representative tiles that no longer exist in the given tilesets,
    /// returning how many were cleared
    pub fn clear_missing_tiles(&mut self, tilesets: &[Tileset]) -> usize {
        let missing: Vec<usize> = self
            .data
            .variations
            .iter()
            .enumerate()
            .filter(|(_, v)| v.tile.is_some_and(|tile| !tile.resolves_in(tilesets)))
            .map(|(i, _)| i)
            .collect();

        if missing.is_empty() {
            return 0;
        }

        let data = self.data_mut();
        for &index in &missing {
            data.variations[index].tile = None;
        }
        tracing::warn!(
            "Stamp '{}': cleared {} representative tiles that no longer exist",
            data.name,
            missing.len()
        );
        missing.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tilestamp_core::{Layer, LayerData, TILE_FLIP_X};
    use uuid::Uuid;

    fn pattern(width: u32, height: u32, tile: u32) -> Pattern {
        let size = (width * height) as usize;
        Pattern::from_tiles(width, height, Uuid::from_u128(1), vec![Some(tile); size])
    }

    fn three_variation_stamp() -> TileStamp {
        let mut stamp = TileStamp::new();
        stamp.set_name("Grass");
        stamp.add_variation(pattern(1, 1, 1), 1.0).unwrap();
        stamp.add_variation(pattern(2, 1, 2), 2.0).unwrap();
        stamp.add_variation(pattern(1, 3, 3), 0.5).unwrap();
        stamp
    }

    #[test]
    fn test_new_stamp() {
        let stamp = TileStamp::new();
        assert!(stamp.is_empty());
        assert_eq!(stamp.name(), "");
        assert_eq!(stamp.quick_stamp_index(), None);
        assert_eq!(stamp.max_size(), (0, 0));
    }

    #[test]
    fn test_from_pattern_defaults_probability() {
        let stamp = TileStamp::from_pattern(pattern(2, 2, 5)).unwrap();
        assert_eq!(stamp.len(), 1);
        assert_eq!(stamp.probability(0).unwrap(), 1.0);
    }

    #[test]
    fn test_rejects_pattern_without_layers() {
        let mut stamp = TileStamp::new();
        let err = stamp.add_pattern(Pattern::new(2, 2)).unwrap_err();
        assert!(matches!(err, StampError::InvalidPattern(_)));
        assert!(stamp.is_empty());
    }

    #[test]
    fn test_rejects_pattern_without_leading_tile_layer() {
        let mut object_first = Pattern::new(2, 2);
        object_first.add_layer(Layer::new_object_layer("Objects".to_string()));
        object_first.add_layer(Layer::new_tile_layer("Tiles".to_string(), Uuid::new_v4(), 2, 2));

        assert!(matches!(
            TileStamp::from_pattern(object_first),
            Err(StampError::InvalidPattern(_))
        ));
    }

    #[test]
    fn test_rejects_mismatched_grid() {
        let mut short = pattern(3, 1, 4);
        let mut group = Layer::new_tile_layer("Nested".to_string(), Uuid::from_u128(1), 3, 1);
        if let LayerData::Tiles { tiles, .. } = &mut group.data {
            tiles.pop();
        }
        short.add_layer(Layer::new_group_layer("Group".to_string(), vec![group]));

        let mut stamp = TileStamp::new();
        let err = stamp.add_pattern(short).unwrap_err();
        assert!(matches!(
            &err,
            StampError::InvalidPattern(message) if message.contains("Nested")
        ));
        assert!(stamp.is_empty());
    }

    #[test]
    fn test_take_sole_variation() {
        let original = pattern(2, 2, 9);
        let mut stamp = TileStamp::from_pattern(original.clone()).unwrap();

        let taken = stamp.take_variation(0).unwrap();
        assert_eq!(taken, original);
        assert!(stamp.is_empty());
    }

    #[test]
    fn test_take_out_of_range() {
        let mut stamp = three_variation_stamp();
        assert!(matches!(
            stamp.take_variation(3),
            Err(StampError::IndexOutOfRange { index: 3, len: 3 })
        ));
        assert_eq!(stamp.len(), 3);
    }

    #[test]
    fn test_probability_access() {
        let mut stamp = three_variation_stamp();
        assert_eq!(stamp.probability(1).unwrap(), 2.0);

        stamp.set_probability(1, 0.0).unwrap();
        assert_eq!(stamp.probability(1).unwrap(), 0.0);
        assert!(matches!(
            stamp.probability(5),
            Err(StampError::IndexOutOfRange { .. })
        ));
        assert!(stamp.set_probability(5, 1.0).is_err());
    }

    #[test]
    fn test_negative_probability_rejected() {
        let mut stamp = three_variation_stamp();
        let err = stamp.set_probability(0, -1.0).unwrap_err();
        assert!(matches!(err, StampError::InvalidProbability(p) if p == -1.0));
        assert_eq!(stamp.probability(0).unwrap(), 1.0);

        assert!(stamp.set_probability(0, f64::NAN).is_err());
        assert!(stamp.add_variation(pattern(1, 1, 1), -0.5).is_err());
        assert_eq!(stamp.len(), 3);
    }

    #[test]
    fn test_max_size() {
        assert_eq!(three_variation_stamp().max_size(), (2, 3));
    }

    #[test]
    fn test_random_variations_on_empty_stamp() {
        assert!(matches!(
            TileStamp::new().random_variations(),
            Err(StampError::NoSelection)
        ));
    }

    #[test]
    fn test_random_variations_with_zero_total_weight() {
        let mut stamp = TileStamp::from_pattern(pattern(1, 1, 1)).unwrap();
        stamp.set_probability(0, 0.0).unwrap();
        assert!(matches!(
            stamp.random_variations(),
            Err(StampError::NoSelection)
        ));
        // Still enumerable
        assert_eq!(stamp.variations().len(), 1);
    }

    #[test]
    fn test_random_variations_follow_weights() {
        let stamp = three_variation_stamp();
        let picker = stamp.random_variations().unwrap();
        let mut rng = fastrand::Rng::with_seed(42);

        let draws = 20_000;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            let picked = *picker.pick(&mut rng).unwrap();
            let index = stamp
                .variations()
                .iter()
                .position(|v| std::ptr::eq(&v.pattern, picked))
                .unwrap();
            counts[index] += 1;
        }

        let total: f64 = [1.0, 2.0, 0.5].iter().sum();
        for (i, weight) in [1.0, 2.0, 0.5].iter().enumerate() {
            let observed = counts[i] as f64 / draws as f64;
            assert!((observed - weight / total).abs() < 0.02);
        }
    }

    #[test]
    fn test_zero_weight_variation_never_picked() {
        let mut stamp = three_variation_stamp();
        stamp.set_probability(0, 0.0).unwrap();
        let picker = stamp.random_variations().unwrap();
        let first = &stamp.variations()[0].pattern;

        let mut rng = fastrand::Rng::with_seed(3);
        for _ in 0..1_000 {
            assert!(!std::ptr::eq(*picker.pick(&mut rng).unwrap(), first));
        }
    }

    #[test]
    fn test_clone_shares_until_write() {
        let original = three_variation_stamp();
        let mut copy = original.clone();
        assert!(copy.shares_storage_with(&original));

        copy.set_probability(0, 4.0).unwrap();
        copy.variations_mut()[1].pattern.set_tile(0, 1, 0, Some(7));
        copy.take_variation(2).unwrap();
        assert!(!copy.shares_storage_with(&original));

        assert_eq!(original.len(), 3);
        assert_eq!(original.probability(0).unwrap(), 1.0);
        assert_eq!(original.variations()[1].pattern.get_tile(0, 1, 0), Some(2));
        assert_eq!(original, three_variation_stamp());
        assert_ne!(copy.variations()[1].pattern, original.variations()[1].pattern);
    }

    #[test]
    fn test_deep_clone_is_independent() {
        let original = three_variation_stamp();
        let mut copy = original.deep_clone();
        assert!(!copy.shares_storage_with(&original));
        assert_eq!(copy, original);

        copy.set_name("Other");
        assert_eq!(original.name(), "Grass");
        assert_ne!(copy, original);
    }

    #[test]
    fn test_flip_twice_is_identity() {
        let mut stamp = three_variation_stamp();
        stamp.set_quick_stamp_index(Some(2));
        let flipped = stamp.flipped(FlipDirection::Horizontal);

        assert_ne!(flipped.variations()[1].pattern, stamp.variations()[1].pattern);
        assert_eq!(
            flipped.variations()[0].pattern.get_tile(0, 0, 0),
            Some(1 | TILE_FLIP_X)
        );
        assert_eq!(flipped.quick_stamp_index(), Some(2));
        assert_eq!(flipped.probability(1).unwrap(), 2.0);
        assert_eq!(flipped.flipped(FlipDirection::Horizontal), stamp);
    }

    #[test]
    fn test_rotated_swaps_dimensions() {
        let mut stamp = three_variation_stamp();
        let tile = TileRef::new(Uuid::new_v4(), 3);
        stamp.set_variation_tile(2, Some(tile)).unwrap();

        let rotated = stamp.rotated(RotateDirection::Right);
        assert_eq!(rotated.max_size(), (3, 2));
        assert_eq!(rotated.variation_tile(2).unwrap(), Some(tile));
        assert_eq!(rotated.probability(2).unwrap(), 0.5);
        assert_eq!(rotated.rotated(RotateDirection::Left), stamp);
    }

    #[test]
    fn test_equality_ignores_representative_tiles() {
        let stamp = three_variation_stamp();
        let mut other = stamp.clone();
        other
            .set_variation_tile(0, Some(TileRef::new(Uuid::new_v4(), 1)))
            .unwrap();
        assert_eq!(stamp, other);

        other.set_probability(0, 1.5).unwrap();
        assert_ne!(stamp, other);
    }

    #[test]
    fn test_clear_missing_tiles() {
        let mut tileset = Tileset::new("Ground".to_string(), 4);
        let mut stamp = three_variation_stamp();
        stamp
            .set_variation_tile(0, Some(TileRef::new(tileset.id, 1)))
            .unwrap();
        stamp
            .set_variation_tile(1, Some(TileRef::new(tileset.id, 2)))
            .unwrap();

        assert_eq!(stamp.clear_missing_tiles(std::slice::from_ref(&tileset)), 0);

        tileset.remove_tiles(&[2]);
        assert_eq!(stamp.clear_missing_tiles(std::slice::from_ref(&tileset)), 1);
        assert_eq!(stamp.variation_tile(1).unwrap(), None);
        assert_eq!(
            stamp.variation_tile(0).unwrap(),
            Some(TileRef::new(tileset.id, 1))
        );
    }
}
