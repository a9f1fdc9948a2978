use crate::extractor::ExtractionResult;
use crate::flowchart::Flowchart;
use std::path::{Path, PathBuf};

/// What a completed step handed back to the coordinator.
#[derive(Debug, Clone)]
pub enum StepOutput {
    Extraction {
        result: ExtractionResult,
        output_file: PathBuf,
    },
    Synthesis {
        flowchart: Flowchart,
        image_file: PathBuf,
        data_file: PathBuf,
    },
}

impl StepOutput {
    /// Every artifact path the step reported writing.
    pub fn artifact_paths(&self) -> Vec<&Path> {
        match self {
            StepOutput::Extraction { output_file, .. } => vec![output_file.as_path()],
            StepOutput::Synthesis {
                image_file,
                data_file,
                ..
            } => vec![image_file.as_path(), data_file.as_path()],
        }
    }

    pub fn as_extraction(&self) -> Option<&ExtractionResult> {
        match self {
            StepOutput::Extraction { result, .. } => Some(result),
            _ => None,
        }
    }

    pub fn as_flowchart(&self) -> Option<&Flowchart> {
        match self {
            StepOutput::Synthesis { flowchart, .. } => Some(flowchart),
            _ => None,
        }
    }
}

/// Step outputs keyed by step id, in execution order.
#[derive(Debug, Clone, Default)]
pub struct WorkflowResults {
    entries: Vec<(String, StepOutput)>,
}

impl WorkflowResults {
    pub fn insert(&mut self, step_id: impl Into<String>, output: StepOutput) {
        let step_id = step_id.into();
        match self.entries.iter_mut().find(|(id, _)| *id == step_id) {
            Some((_, existing)) => *existing = output,
            None => self.entries.push((step_id, output)),
        }
    }

    pub fn get(&self, step_id: &str) -> Option<&StepOutput> {
        self.entries
            .iter()
            .find(|(id, _)| id == step_id)
            .map(|(_, output)| output)
    }

    pub fn contains(&self, step_id: &str) -> bool {
        self.get(step_id).is_some()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &StepOutput)> {
        self.entries.iter().map(|(id, output)| (id.as_str(), output))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Artifact paths that exist on disk right now.
    ///
    /// Best effort: a file deleted after this call is not noticed.
    pub fn output_files(&self) -> Vec<PathBuf> {
        self.entries
            .iter()
            .flat_map(|(_, output)| output.artifact_paths())
            .filter(|path| path.exists())
            .map(Path::to_path_buf)
            .collect()
    }
}
