//! Common fixtures for building documents, statements and coordinators.
use glmp::prelude::*;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Five sentences describing lac operon regulation.
#[allow(dead_code)]
pub const LAC_OPERON_TEXT: &str = "
    The lac operon is a classic example of gene regulation. When lactose is present,
    the repressor protein is inactivated, allowing transcription to proceed. If glucose
    is also present, cAMP levels are low, and the operon is only partially activated.
    This creates a feedback loop where the system responds to environmental conditions.
    The entire pathway functions as a genetic circuit that processes multiple inputs.
";

/// One conditional sentence, the smallest input that yields a decision node.
#[allow(dead_code)]
pub const LACTOSE_SENTENCE: &str = "When lactose is present, the repressor protein is inactivated.";

/// Writes `content` to `name` inside `dir` and returns the full path.
#[allow(dead_code)]
pub fn write_document(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    fs::write(&path, content).expect("Failed to write test document");
    path
}

#[allow(dead_code)]
pub fn step(category: LogicCategory, description: &str) -> LogicStep {
    LogicStep {
        category,
        description: description.to_string(),
        confidence: 0.8,
    }
}

/// A coordinator writing into `<tmp>/output`.
#[allow(dead_code)]
pub fn coordinator_in(tmp: &TempDir) -> Coordinator {
    Coordinator::new(CoordinatorConfig::default().with_output_dir(tmp.path().join("output")))
}
