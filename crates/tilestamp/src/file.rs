//! Stamp file save/load operations
//!
//! A stamp file only lists its variations; each variation pattern lives in its
//! own pattern file, referenced relative to the stamp's directory.

use crate::stamp::check_probability;
use crate::{StampError, TileStamp};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tilestamp_core::Pattern;

/// Serialized form of a stamp
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StampRecord {
    pub name: String,
    pub variations: Vec<VariationRecord>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub quick_stamp_index: Option<u32>,
}

/// Serialized form of one variation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariationRecord {
    /// Pattern file, relative to the stamp's base directory when possible
    pub file_name: String,
    pub probability: f64,
}

const PATTERN_EXTENSION: &str = "pattern.json";

impl TileStamp {
    /// Build the serialized record, with pattern paths relative to `base_dir`
    pub fn to_record(&self, base_dir: &Path) -> Result<StampRecord, StampError> {
        let variations = self
            .variations()
            .iter()
            .enumerate()
            .map(|(index, variation)| -> Result<VariationRecord, StampError> {
                let path = variation
                    .pattern
                    .file_name()
                    .ok_or(StampError::UnsavedPattern { index })?;
                let relative = path.strip_prefix(base_dir).unwrap_or(path);
                let file_name = relative.to_str().ok_or_else(|| StampError::NonUtf8Path {
                    path: path.to_path_buf(),
                })?;
                Ok(VariationRecord {
                    file_name: file_name.to_string(),
                    probability: variation.probability,
                })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(StampRecord {
            name: self.name().to_string(),
            variations,
            quick_stamp_index: self.quick_stamp_index(),
        })
    }

    /// Serialize to JSON, with pattern paths relative to `base_dir`
    pub fn to_json(&self, base_dir: &Path) -> Result<serde_json::Value, StampError> {
        serde_json::to_value(self.to_record(base_dir)?)
            .map_err(|e| StampError::Serialize(e.to_string()))
    }

    /// Rebuild a stamp from its record, loading every pattern file.
    ///
    /// Fails as a whole if any probability is invalid, or any pattern cannot be
    /// loaded or does not start with a tile layer.
    pub fn from_record(record: &StampRecord, base_dir: &Path) -> Result<Self, StampError> {
        let mut stamp = TileStamp::new();
        stamp.set_name(record.name.clone());
        stamp.set_quick_stamp_index(record.quick_stamp_index);

        for variation in &record.variations {
            let path = base_dir.join(&variation.file_name);
            check_probability(variation.probability).map_err(|_| {
                StampError::InvalidVariationProbability {
                    path: path.clone(),
                    probability: variation.probability,
                }
            })?;
            let pattern = Pattern::load(&path).map_err(|source| StampError::PatternLoad {
                path: path.clone(),
                source,
            })?;
            if !pattern.is_stampable() {
                return Err(StampError::MissingTileLayer { path });
            }
            stamp.add_variation(pattern, variation.probability)?;
            tracing::debug!(
                "Stamp '{}': loaded variation {:?} (probability {})",
                record.name,
                path,
                variation.probability
            );
        }

        Ok(stamp)
    }

    /// Deserialize from JSON, resolving pattern paths against `base_dir`
    pub fn from_json(json: &serde_json::Value, base_dir: &Path) -> Result<Self, StampError> {
        let record =
            StampRecord::deserialize(json).map_err(|e| StampError::Parse(e.to_string()))?;
        Self::from_record(&record, base_dir)
    }

    /// Write every variation pattern that has no file yet into `dir`.
    /// Returns how many patterns were written.
    pub fn save_patterns(&mut self, dir: &Path) -> Result<usize, StampError> {
        let unsaved: Vec<usize> = self
            .variations()
            .iter()
            .enumerate()
            .filter(|(_, v)| v.pattern.file_name().is_none())
            .map(|(i, _)| i)
            .collect();

        if unsaved.is_empty() {
            return Ok(0);
        }

        std::fs::create_dir_all(dir).map_err(|e| StampError::Io(e.to_string()))?;

        let stem = file_stem_for(self.name());
        let variations = self.variations_mut();
        for &index in &unsaved {
            let path = unused_pattern_path(dir, &stem, index);
            variations[index]
                .pattern
                .save(&path)
                .map_err(|source| StampError::PatternSave {
                    path: path.clone(),
                    source,
                })?;
        }

        Ok(unsaved.len())
    }

    /// Save the stamp file and any unsaved patterns next to it
    pub fn save(&mut self, path: &Path) -> Result<(), StampError> {
        let dir = base_dir_of(path);
        self.save_patterns(&dir)?;

        let content = serde_json::to_string_pretty(&self.to_record(&dir)?)
            .map_err(|e| StampError::Serialize(e.to_string()))?;
        std::fs::write(path, content).map_err(|e| StampError::Io(e.to_string()))?;

        self.set_file_name(Some(path.to_path_buf()));
        tracing::info!("Saved stamp '{}' to {:?}", self.name(), path);
        Ok(())
    }

    /// Load a stamp file and the patterns it references
    pub fn load(path: &Path) -> Result<Self, StampError> {
        let content = std::fs::read_to_string(path).map_err(|e| StampError::Io(e.to_string()))?;
        let record: StampRecord =
            serde_json::from_str(&content).map_err(|e| StampError::Parse(e.to_string()))?;

        let mut stamp = Self::from_record(&record, &base_dir_of(path))?;
        stamp.set_file_name(Some(path.to_path_buf()));
        tracing::info!(
            "Loaded stamp '{}' with {} variations from {:?}",
            stamp.name(),
            stamp.len(),
            path
        );
        Ok(stamp)
    }
}

fn base_dir_of(path: &Path) -> PathBuf {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}

/// Stamp name reduced to characters that are safe in file names
fn file_stem_for(name: &str) -> String {
    let stem: String = name
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '_'
            }
        })
        .collect();
    if stem.is_empty() {
        "stamp".to_string()
    } else {
        stem
    }
}

fn unused_pattern_path(dir: &Path, stem: &str, index: usize) -> PathBuf {
    let mut suffix = index;
    loop {
        let path = dir.join(format!("{}_{}.{}", stem, suffix, PATTERN_EXTENSION));
        if !path.exists() {
            return path;
        }
        suffix += 1;
    }
}
