use crate::config::ExtractorConfig;
use crate::error::ExtractionError;
use crate::patterns::PatternCatalog;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;
use tracing::{debug, info};

mod scoring;
mod statement;
mod summary;

pub use scoring::{BIOLOGICAL_TERMS, COMPUTATIONAL_TERMS, confidence, split_sentences};
pub use statement::{ExtractionMetadata, ExtractionResult, Statement};
pub use summary::{EMPTY_SUMMARY, category_counts};

/// Scans documents for sentence fragments matching the pattern catalog.
///
/// Extraction is a pure function of the input text, the document id, the catalog and
/// the configuration. The same `Extractor` can be reused for any number of documents.
#[derive(Debug, Clone, Default)]
pub struct Extractor {
    catalog: PatternCatalog,
    config: ExtractorConfig,
}

impl Extractor {
    pub fn new(config: ExtractorConfig) -> Self {
        Self {
            catalog: PatternCatalog::standard(),
            config,
        }
    }

    /// Replaces the built-in catalog.
    pub fn with_catalog(mut self, catalog: PatternCatalog) -> Self {
        self.catalog = catalog;
        self
    }

    pub fn catalog(&self) -> &PatternCatalog {
        &self.catalog
    }

    pub fn config(&self) -> &ExtractorConfig {
        &self.config
    }

    /// Extracts every statement from `text` that clears the confidence threshold.
    ///
    /// Statements are ordered by sentence, then catalog category, then pattern, then
    /// match position.
    pub fn extract(&self, text: &str, document_id: &str) -> ExtractionResult {
        let sentences = split_sentences(text);
        let mut statements = Vec::new();

        for (offset, sentence) in sentences.iter().enumerate() {
            let sentence_index = offset + 1;
            for (category, pattern) in self.catalog.iter() {
                for found in pattern.find_iter(sentence) {
                    let span = found.as_str();
                    let score = confidence(span, sentence);
                    if score <= self.config.min_confidence {
                        debug!(%category, span, score, "Dropping low-confidence match");
                        continue;
                    }
                    statements.push(Statement {
                        category,
                        description: span.to_string(),
                        confidence: score,
                        source_sentence: sentence.to_string(),
                        sentence_index,
                        context: scoring::context(
                            &sentences,
                            sentence_index,
                            self.config.context_window,
                        ),
                    });
                }
            }
        }

        let summary = summary::summarize(&statements, self.config.summary_top);
        let metadata = ExtractionMetadata {
            total: statements.len(),
            per_category: category_counts(&statements)
                .into_iter()
                .collect::<BTreeMap<_, _>>(),
            avg_confidence: average_confidence(&statements),
            text_length: text.chars().count(),
            sentence_count: sentences.len(),
        };

        info!(
            document_id,
            statements = metadata.total,
            sentences = metadata.sentence_count,
            "Extracted logic statements"
        );

        ExtractionResult {
            document_id: document_id.to_string(),
            summary,
            metadata,
            statements,
        }
    }

    /// Reads a UTF-8 text file and extracts from it, using the file name as document id.
    pub fn extract_file(&self, path: impl AsRef<Path>) -> Result<ExtractionResult, ExtractionError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(ExtractionError::NotFound(path.display().to_string()));
        }
        let text = fs::read_to_string(path).map_err(|e| ExtractionError::Io {
            path: path.display().to_string(),
            message: e.to_string(),
        })?;
        let document_id = path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Ok(self.extract(&text, &document_id))
    }

    /// Saves extraction results to a JSON file.
    pub fn save_results(
        &self,
        result: &ExtractionResult,
        output_path: impl AsRef<Path>,
    ) -> Result<(), ExtractionError> {
        let output_path = output_path.as_ref();
        result.save(output_path)?;
        debug!(path = %output_path.display(), "Saved extraction results");
        Ok(())
    }
}

fn average_confidence(statements: &[Statement]) -> f64 {
    if statements.is_empty() {
        return 0.0;
    }
    statements.iter().map(|s| s.confidence).sum::<f64>() / statements.len() as f64
}
