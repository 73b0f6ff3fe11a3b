//! Errors raised by stamp operations

use std::path::PathBuf;
use thiserror::Error;
use tilestamp_core::PatternError;

#[derive(Debug, Error)]
pub enum StampError {
    /// The pattern has no layers, its first layer is not a tile layer, or a
    /// tile layer does not cover the pattern grid
    #[error("Invalid pattern: {0}")]
    InvalidPattern(String),

    #[error("Variation index {index} out of range (stamp has {len} variations)")]
    IndexOutOfRange { index: usize, len: usize },

    #[error("Invalid probability {0}: must be a finite, non-negative number")]
    InvalidProbability(f64),

    /// Empty stamp, or every variation has zero probability
    #[error("No selection possible: stamp has no variation with a positive probability")]
    NoSelection,

    #[error("Variation {index} has no pattern file; save its pattern first")]
    UnsavedPattern { index: usize },

    #[error("Could not load pattern {path:?}: {source}")]
    PatternLoad {
        path: PathBuf,
        #[source]
        source: PatternError,
    },

    #[error("Could not save pattern {path:?}: {source}")]
    PatternSave {
        path: PathBuf,
        #[source]
        source: PatternError,
    },

    #[error("Pattern {path:?} does not start with a tile layer")]
    MissingTileLayer { path: PathBuf },

    #[error("Variation {path:?} has invalid probability {probability}")]
    InvalidVariationProbability { path: PathBuf, probability: f64 },

    /// Pattern file names are stored as strings in the stamp file
    #[error("Pattern path {path:?} is not valid UTF-8")]
    NonUtf8Path { path: PathBuf },

    #[error("IO error: {0}")]
    Io(String),

    #[error("Parse error: {0}")]
    Parse(String),

    #[error("Serialize error: {0}")]
    Serialize(String),
}
