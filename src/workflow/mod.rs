//! Stateful two-step workflows: extract logic from a document, then synthesize a flowchart.
//!
//! A [`Workflow`] and each of its [`WorkflowStep`]s move through
//! `pending -> running -> completed | failed`. Both terminal states are final; a
//! workflow is executed at most once.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

mod agent;
mod coordinator;
mod results;

pub use agent::{Agent, AgentKind};
pub use coordinator::{Coordinator, CoordinatorBuilder, PaperAnalysis};
pub use results::{StepOutput, WorkflowResults};

pub const EXTRACT_STEP_ID: &str = "extract_logic";
pub const SYNTHESIZE_STEP_ID: &str = "synthesize_diagram";

/// Key under which `execute_workflow` expects the source document.
pub const TEXT_FILE_INPUT: &str = "text_file";

pub const EXTRACTION_ARTIFACT: &str = "extracted_logic.json";
pub const FLOWCHART_IMAGE_ARTIFACT: &str = "flowchart.png";
pub const FLOWCHART_DATA_ARTIFACT: &str = "flowchart.json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RunStatus {
    #[default]
    Pending,
    Running,
    Completed,
    Failed,
}

impl RunStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, RunStatus::Completed | RunStatus::Failed)
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            RunStatus::Pending => "pending",
            RunStatus::Running => "running",
            RunStatus::Completed => "completed",
            RunStatus::Failed => "failed",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkflowStep {
    pub step_id: String,
    pub name: String,
    pub description: String,
    #[serde(rename = "agent_type")]
    pub agent_kind: AgentKind,
    /// Step ids that must complete before this one runs.
    pub depends_on: Vec<String>,
    /// Artifact file names written into the output directory.
    pub produces: Vec<String>,
    pub status: RunStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
    pub workflow_id: String,
    pub title: String,
    pub description: String,
    pub steps: Vec<WorkflowStep>,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
    pub error: Option<String>,
}

impl Workflow {
    /// A fresh workflow with the standard extract-then-synthesize plan.
    pub(crate) fn standard(workflow_id: String, title: &str, description: &str) -> Self {
        let steps = vec![
            WorkflowStep {
                step_id: EXTRACT_STEP_ID.to_string(),
                name: "Extract Logic from Text".to_string(),
                description: "Extract computational logic elements from biological papers"
                    .to_string(),
                agent_kind: AgentKind::Extractor,
                depends_on: Vec::new(),
                produces: vec![EXTRACTION_ARTIFACT.to_string()],
                status: RunStatus::Pending,
                error: None,
            },
            WorkflowStep {
                step_id: SYNTHESIZE_STEP_ID.to_string(),
                name: "Synthesize Flowchart".to_string(),
                description: "Convert extracted logic into standardized flowcharts".to_string(),
                agent_kind: AgentKind::DiagramSynthesizer,
                depends_on: vec![EXTRACT_STEP_ID.to_string()],
                produces: vec![
                    FLOWCHART_IMAGE_ARTIFACT.to_string(),
                    FLOWCHART_DATA_ARTIFACT.to_string(),
                ],
                status: RunStatus::Pending,
                error: None,
            },
        ];

        Self {
            workflow_id,
            title: title.to_string(),
            description: description.to_string(),
            steps,
            status: RunStatus::Pending,
            created_at: Utc::now(),
            error: None,
        }
    }

    pub fn step(&self, step_id: &str) -> Option<&WorkflowStep> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }

    pub fn status_snapshot(&self) -> WorkflowStatus {
        WorkflowStatus {
            workflow_id: self.workflow_id.clone(),
            title: self.title.clone(),
            status: self.status,
            error: self.error.clone(),
            steps: self
                .steps
                .iter()
                .map(|step| StepStatus {
                    step_id: step.step_id.clone(),
                    name: step.name.clone(),
                    status: step.status,
                    error: step.error.clone(),
                })
                .collect(),
        }
    }

    pub fn summary(&self) -> WorkflowSummary {
        WorkflowSummary {
            workflow_id: self.workflow_id.clone(),
            title: self.title.clone(),
            status: self.status,
            created_at: self.created_at,
        }
    }
}

/// Point-in-time view of a workflow and its steps.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowStatus {
    pub workflow_id: String,
    pub title: String,
    pub status: RunStatus,
    pub error: Option<String>,
    pub steps: Vec<StepStatus>,
}

impl WorkflowStatus {
    pub fn step(&self, step_id: &str) -> Option<&StepStatus> {
        self.steps.iter().find(|s| s.step_id == step_id)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StepStatus {
    pub step_id: String,
    pub name: String,
    pub status: RunStatus,
    pub error: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkflowSummary {
    pub workflow_id: String,
    pub title: String,
    pub status: RunStatus,
    pub created_at: DateTime<Utc>,
}
