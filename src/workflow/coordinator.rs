use super::agent::{Agent, AgentKind};
use super::results::{StepOutput, WorkflowResults};
use super::{
    EXTRACT_STEP_ID, EXTRACTION_ARTIFACT, FLOWCHART_DATA_ARTIFACT, FLOWCHART_IMAGE_ARTIFACT,
    RunStatus, TEXT_FILE_INPUT, Workflow, WorkflowStatus, WorkflowStep, WorkflowSummary,
};
use crate::config::CoordinatorConfig;
use crate::error::WorkflowError;
use crate::extractor::Extractor;
use crate::flowchart::FlowchartBuilder;
use ahash::AHashMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{error, info};
use uuid::Uuid;

/// Outcome of [`Coordinator::process_paper`].
#[derive(Debug, Clone)]
pub struct PaperAnalysis {
    pub workflow_id: String,
    pub results: WorkflowResults,
    /// Artifacts that existed on disk when the workflow finished.
    pub output_files: Vec<PathBuf>,
}

/// Owns every workflow it creates and drives them through their steps.
///
/// All state changes go through `&mut self`, so a coordinator has exactly one writer.
pub struct Coordinator {
    config: CoordinatorConfig,
    agents: AHashMap<AgentKind, Agent>,
    workflows: Vec<Workflow>,
}

pub struct CoordinatorBuilder {
    config: CoordinatorConfig,
    agents: AHashMap<AgentKind, Agent>,
}

impl CoordinatorBuilder {
    /// Starts from the default extractor and synthesizer, configured from `config`.
    pub fn new(config: CoordinatorConfig) -> Self {
        let mut agents = AHashMap::new();
        for agent in [
            Agent::from(Extractor::new(config.extractor.clone())),
            Agent::from(FlowchartBuilder::new(config.render.clone())),
        ] {
            agents.insert(agent.kind(), agent);
        }
        Self { config, agents }
    }

    /// Registers an agent, replacing any agent of the same kind.
    pub fn with_agent(mut self, agent: impl Into<Agent>) -> Self {
        let agent = agent.into();
        self.agents.insert(agent.kind(), agent);
        self
    }

    pub fn without_agent(mut self, kind: AgentKind) -> Self {
        self.agents.remove(&kind);
        self
    }

    pub fn build(self) -> Coordinator {
        Coordinator {
            config: self.config,
            agents: self.agents,
            workflows: Vec::new(),
        }
    }
}

impl Coordinator {
    pub fn builder(config: CoordinatorConfig) -> CoordinatorBuilder {
        CoordinatorBuilder::new(config)
    }

    pub fn new(config: CoordinatorConfig) -> Self {
        Self::builder(config).build()
    }

    pub fn config(&self) -> &CoordinatorConfig {
        &self.config
    }

    pub fn output_dir(&self) -> &Path {
        &self.config.output_dir
    }

    /// Creates a pending workflow with the standard extract-then-synthesize plan.
    pub fn create_workflow(&mut self, title: &str, description: &str) -> Workflow {
        let workflow = Workflow::standard(new_workflow_id(), title, description);
        info!(workflow_id = %workflow.workflow_id, title, "Created workflow");
        self.workflows.push(workflow.clone());
        workflow
    }

    /// Runs every step of a pending workflow in declared order.
    ///
    /// The first failing step marks itself and the workflow `failed`, leaves the
    /// remaining steps `pending`, and its error is returned.
    pub fn execute_workflow(
        &mut self,
        workflow_id: &str,
        input_files: &AHashMap<String, PathBuf>,
    ) -> Result<WorkflowResults, WorkflowError> {
        let workflow = self
            .workflows
            .iter_mut()
            .find(|w| w.workflow_id == workflow_id)
            .ok_or_else(|| WorkflowError::NotFound(workflow_id.to_string()))?;

        if workflow.status != RunStatus::Pending {
            return Err(WorkflowError::InvalidInput(format!(
                "workflow '{}' has already been executed (status: {})",
                workflow_id, workflow.status
            )));
        }

        let runner = StepRunner {
            agents: &self.agents,
            output_dir: &self.config.output_dir,
        };

        workflow.status = RunStatus::Running;
        info!(
            workflow_id,
            title = %workflow.title,
            steps = workflow.steps.len(),
            "Executing workflow"
        );

        let mut results = WorkflowResults::default();
        for step in workflow.steps.iter_mut() {
            step.status = RunStatus::Running;
            info!(workflow_id, step_id = %step.step_id, "Running step: {}", step.name);

            match runner.run(step, input_files, &results) {
                Ok(output) => {
                    results.insert(step.step_id.clone(), output);
                    step.status = RunStatus::Completed;
                    info!(workflow_id, step_id = %step.step_id, "Step completed");
                }
                Err(e) => {
                    let message = e.to_string();
                    error!(workflow_id, step_id = %step.step_id, "Step failed: {}", message);
                    step.status = RunStatus::Failed;
                    step.error = Some(message.clone());
                    workflow.status = RunStatus::Failed;
                    workflow.error = Some(format!("step '{}' failed: {}", step.step_id, message));
                    return Err(e);
                }
            }
        }

        workflow.status = RunStatus::Completed;
        info!(workflow_id, "Workflow completed");
        Ok(results)
    }

    /// Creates and executes a workflow for a single text file.
    pub fn process_paper(
        &mut self,
        paper_file: impl AsRef<Path>,
        title: &str,
    ) -> Result<PaperAnalysis, WorkflowError> {
        let paper_file = paper_file.as_ref();
        let workflow = self.create_workflow(
            title,
            &format!("Analysis of paper: {}", paper_file.display()),
        );

        let mut input_files = AHashMap::new();
        input_files.insert(TEXT_FILE_INPUT.to_string(), paper_file.to_path_buf());

        let results = self.execute_workflow(&workflow.workflow_id, &input_files)?;
        let output_files = results.output_files();
        Ok(PaperAnalysis {
            workflow_id: workflow.workflow_id,
            results,
            output_files,
        })
    }

    pub fn workflow(&self, workflow_id: &str) -> Option<&Workflow> {
        self.workflows.iter().find(|w| w.workflow_id == workflow_id)
    }

    pub fn get_workflow_status(&self, workflow_id: &str) -> Result<WorkflowStatus, WorkflowError> {
        self.workflow(workflow_id)
            .map(Workflow::status_snapshot)
            .ok_or_else(|| WorkflowError::NotFound(workflow_id.to_string()))
    }

    /// Summaries of every workflow, in creation order.
    pub fn list_workflows(&self) -> Vec<WorkflowSummary> {
        self.workflows.iter().map(Workflow::summary).collect()
    }

    /// Writes the full workflow record, step states and errors included, as JSON.
    pub fn save_workflow(
        &self,
        workflow_id: &str,
        output_path: impl AsRef<Path>,
    ) -> Result<(), WorkflowError> {
        let workflow = self
            .workflow(workflow_id)
            .ok_or_else(|| WorkflowError::NotFound(workflow_id.to_string()))?;
        let output_path = output_path.as_ref();

        let document = serde_json::json!({ "workflow": workflow });
        let json = serde_json::to_string_pretty(&document)
            .map_err(|e| WorkflowError::Serialization(e.to_string()))?;
        fs::write(output_path, json).map_err(|e| WorkflowError::Io {
            path: output_path.display().to_string(),
            message: e.to_string(),
        })
    }
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(CoordinatorConfig::default())
    }
}

fn new_workflow_id() -> String {
    format!("workflow_{}", Uuid::new_v4().simple())
}

/// Executes single steps against the registered agents.
struct StepRunner<'a> {
    agents: &'a AHashMap<AgentKind, Agent>,
    output_dir: &'a Path,
}

impl StepRunner<'_> {
    fn run(
        &self,
        step: &WorkflowStep,
        input_files: &AHashMap<String, PathBuf>,
        previous: &WorkflowResults,
    ) -> Result<StepOutput, WorkflowError> {
        if let Some(missing) = step.depends_on.iter().find(|dep| !previous.contains(dep.as_str())) {
            return Err(WorkflowError::InvalidInput(format!(
                "step '{}' requires the results of step '{}'",
                step.step_id, missing
            )));
        }

        match step.agent_kind {
            AgentKind::Extractor => self.run_extraction(input_files),
            AgentKind::DiagramSynthesizer => self.run_synthesis(previous),
        }
    }

    fn run_extraction(
        &self,
        input_files: &AHashMap<String, PathBuf>,
    ) -> Result<StepOutput, WorkflowError> {
        let text_file = input_files.get(TEXT_FILE_INPUT).ok_or_else(|| {
            WorkflowError::InvalidInput(format!(
                "input file '{}' required for extractor step",
                TEXT_FILE_INPUT
            ))
        })?;
        let Some(Agent::Extractor(extractor)) = self.agents.get(&AgentKind::Extractor) else {
            return Err(unregistered(AgentKind::Extractor));
        };

        let result = extractor.extract_file(text_file)?;
        self.ensure_output_dir()?;
        let output_file = self.output_dir.join(EXTRACTION_ARTIFACT);
        extractor.save_results(&result, &output_file)?;

        Ok(StepOutput::Extraction {
            result,
            output_file,
        })
    }

    fn run_synthesis(&self, previous: &WorkflowResults) -> Result<StepOutput, WorkflowError> {
        let extraction = previous
            .get(EXTRACT_STEP_ID)
            .and_then(StepOutput::as_extraction)
            .ok_or_else(|| {
                WorkflowError::InvalidInput(
                    "extractor step results required for diagram synthesis".to_string(),
                )
            })?;
        let Some(Agent::DiagramSynthesizer(builder)) =
            self.agents.get(&AgentKind::DiagramSynthesizer)
        else {
            return Err(unregistered(AgentKind::DiagramSynthesizer));
        };

        let title = format!("Logic Flowchart - {}", extraction.document_id);
        let flowchart = builder.synthesize_extraction(extraction, &title);

        self.ensure_output_dir()?;
        let image_file = self.output_dir.join(FLOWCHART_IMAGE_ARTIFACT);
        let data_file = self.output_dir.join(FLOWCHART_DATA_ARTIFACT);
        builder.render(&flowchart, &image_file)?;
        builder.serialize(&flowchart, &data_file)?;

        Ok(StepOutput::Synthesis {
            flowchart,
            image_file,
            data_file,
        })
    }

    fn ensure_output_dir(&self) -> Result<(), WorkflowError> {
        fs::create_dir_all(self.output_dir).map_err(|e| WorkflowError::Io {
            path: self.output_dir.display().to_string(),
            message: e.to_string(),
        })
    }
}

fn unregistered(kind: AgentKind) -> WorkflowError {
    WorkflowError::InvalidInput(format!("no agent registered for kind '{}'", kind))
}
