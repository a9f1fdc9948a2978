use crate::error::ExtractionError;
use crate::patterns::LogicCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

/// A single regex-matched, confidence-scored span of text tagged with a logic category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Statement {
    #[serde(rename = "element_type")]
    pub category: LogicCategory,
    /// The matched span, verbatim.
    pub description: String,
    pub confidence: f64,
    #[serde(rename = "source_text")]
    pub source_sentence: String,
    /// 1-based index of the source sentence.
    #[serde(rename = "line_number")]
    pub sentence_index: usize,
    pub context: String,
}

/// Aggregate numbers describing one extraction run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionMetadata {
    #[serde(rename = "total_elements")]
    pub total: usize,
    #[serde(rename = "element_types")]
    pub per_category: BTreeMap<LogicCategory, usize>,
    pub avg_confidence: f64,
    /// Length of the input in characters.
    pub text_length: usize,
    #[serde(rename = "sentences_analyzed")]
    pub sentence_count: usize,
}

/// Everything one call to `Extractor::extract` produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtractionResult {
    pub document_id: String,
    pub summary: String,
    pub metadata: ExtractionMetadata,
    #[serde(rename = "logic_elements")]
    pub statements: Vec<Statement>,
}

impl ExtractionResult {
    /// Statements of one category, in discovery order.
    pub fn statements_of(&self, category: LogicCategory) -> impl Iterator<Item = &Statement> {
        self.statements.iter().filter(move |s| s.category == category)
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }

    pub fn to_json(&self) -> Result<String, ExtractionError> {
        serde_json::to_string_pretty(self).map_err(|e| ExtractionError::Serialization(e.to_string()))
    }

    /// Writes the result as pretty-printed JSON, replacing any existing file.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ExtractionError> {
        let path = path.as_ref();
        let json = self.to_json()?;
        fs::write(path, json).map_err(|e| ExtractionError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })
    }

    /// Loads a result previously written by [`ExtractionResult::save`].
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ExtractionError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.display().to_string()));
        }
        let content = fs::read_to_string(path).map_err(|e| ExtractionError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        serde_json::from_str(&content).map_err(|e| ExtractionError::Serialization(e.to_string()))
    }
}
