//! Pattern file save/load operations

use crate::Pattern;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PatternError {
    #[error("IO error for {path:?}: {message}")]
    Io { path: PathBuf, message: String },
    #[error("Parse error in {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("Serialize error: {0}")]
    Serialize(String),
}

impl Pattern {
    /// Load a pattern from a JSON file, remembering where it came from
    pub fn load(path: &Path) -> Result<Self, PatternError> {
        let content = std::fs::read_to_string(path).map_err(|e| PatternError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        let mut pattern: Pattern =
            serde_json::from_str(&content).map_err(|e| PatternError::Parse {
                path: path.to_path_buf(),
                message: e.to_string(),
            })?;
        pattern.validate().map_err(|message| PatternError::Parse {
            path: path.to_path_buf(),
            message,
        })?;

        pattern.file_name = Some(path.to_path_buf());
        tracing::debug!("Loaded pattern {:?} ({}x{})", path, pattern.width, pattern.height);
        Ok(pattern)
    }

    /// Save the pattern to a JSON file and remember the path
    pub fn save(&mut self, path: &Path) -> Result<(), PatternError> {
        let content = serde_json::to_string_pretty(self)
            .map_err(|e| PatternError::Serialize(e.to_string()))?;

        std::fs::write(path, content).map_err(|e| PatternError::Io {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        self.file_name = Some(path.to_path_buf());
        tracing::debug!("Saved pattern to {:?}", path);
        Ok(())
    }
}
