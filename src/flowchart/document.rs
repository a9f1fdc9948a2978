use super::Flowchart;
use crate::error::SynthesisError;
use std::fs;
use std::path::Path;

impl Flowchart {
    pub fn to_json(&self) -> Result<String, SynthesisError> {
        serde_json::to_string_pretty(self).map_err(|e| SynthesisError::Serialization(e.to_string()))
    }

    pub fn from_json(json: &str) -> Result<Self, SynthesisError> {
        serde_json::from_str(json).map_err(|e| SynthesisError::Serialization(e.to_string()))
    }

    /// Writes the flowchart as pretty-printed JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), SynthesisError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| SynthesisError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Loads a flowchart previously written by [`Flowchart::save`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, SynthesisError> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| SynthesisError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        Self::from_json(&content)
    }
}
