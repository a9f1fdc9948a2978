use crate::error::WorkflowError;
use crate::extractor::Extractor;
use crate::flowchart::FlowchartBuilder;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The closed set of agents a workflow step can be routed to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentKind {
    Extractor,
    DiagramSynthesizer,
}

impl AgentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AgentKind::Extractor => "extractor",
            AgentKind::DiagramSynthesizer => "diagram_synthesizer",
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AgentKind {
    type Err = WorkflowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "extractor" => Ok(AgentKind::Extractor),
            "diagram_synthesizer" => Ok(AgentKind::DiagramSynthesizer),
            other => Err(WorkflowError::InvalidInput(format!(
                "unknown agent kind '{}'",
                other
            ))),
        }
    }
}

/// A concrete agent implementation, tagged by its kind.
#[derive(Debug, Clone)]
pub enum Agent {
    Extractor(Extractor),
    DiagramSynthesizer(FlowchartBuilder),
}

impl Agent {
    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::Extractor(_) => AgentKind::Extractor,
            Agent::DiagramSynthesizer(_) => AgentKind::DiagramSynthesizer,
        }
    }
}

impl From<Extractor> for Agent {
    fn from(extractor: Extractor) -> Self {
        Agent::Extractor(extractor)
    }
}

impl From<FlowchartBuilder> for Agent {
    fn from(builder: FlowchartBuilder) -> Self {
        Agent::DiagramSynthesizer(builder)
    }
}
