//! Prelude module for convenient imports
//!
//! Re-exports the types needed to extract, synthesize and coordinate without importing
//! each module individually.

// Pipeline stages
pub use crate::extractor::{ExtractionResult, Extractor, Statement};
pub use crate::flowchart::{FlowEdge, FlowNode, Flowchart, FlowchartBuilder, LogicStep, NodeKind};
pub use crate::patterns::{LogicCategory, PatternCatalog};
pub use crate::workflow::{
    AgentKind, Coordinator, PaperAnalysis, RunStatus, Workflow, WorkflowResults, WorkflowStatus,
};

// Configuration
pub use crate::config::{CoordinatorConfig, ExtractorConfig, RenderConfig};

// Error types
pub use crate::error::{ConfigError, ExtractionError, SynthesisError, WorkflowError};

// Map type used for workflow inputs
pub use ahash::AHashMap;
