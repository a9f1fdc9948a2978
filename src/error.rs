use thiserror::Error;

/// Errors that can occur while extracting logic statements from a document.
///
/// Scanning text never fails on its own; every variant here comes from file I/O
/// or from reading and writing the extraction JSON.
#[derive(Error, Debug, Clone)]
pub enum ExtractionError {
    #[error("Input document '{0}' not found")]
    NotFound(String),

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Extraction result serialization failed: {0}")]
    Serialization(String),
}

/// Errors that can occur while rendering or serializing a flowchart.
#[derive(Error, Debug, Clone)]
pub enum SynthesisError {
    #[error("Could not render flowchart to '{path}': {message}")]
    Render { path: String, message: String },

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Flowchart serialization failed: {0}")]
    Serialization(String),
}

/// Errors surfaced by the workflow coordinator.
#[derive(Error, Debug, Clone)]
pub enum WorkflowError {
    #[error("Workflow '{0}' not found")]
    NotFound(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Extraction step failed: {0}")]
    Extraction(#[from] ExtractionError),

    #[error("Synthesis step failed: {0}")]
    Synthesis(#[from] SynthesisError),

    #[error("Could not access '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Workflow serialization failed: {0}")]
    Serialization(String),
}

/// Errors that can occur while loading a configuration file.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("Could not read config file '{path}': {message}")]
    Io { path: String, message: String },

    #[error("Failed to parse config JSON: {0}")]
    Parse(String),
}
