//! Flowchart model: a strictly linear chain of typed nodes between `start` and `end`.

use crate::extractor::Statement;
use crate::patterns::LogicCategory;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;

mod builder;
mod document;
mod render;
mod style;

pub use builder::{FlowchartBuilder, node_label};
pub use render::render_flowchart;
pub use style::{NodeStyle, Shape};

pub const START_NODE_ID: &str = "start";
pub const END_NODE_ID: &str = "end";
pub const GENERATION_METHOD: &str = "logic_synthesis";

/// Visual role of a node, which fixes its shape and colours.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NodeKind {
    Start,
    End,
    Decision,
    Process,
    Input,
    Output,
}

impl NodeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Start => "start",
            NodeKind::End => "end",
            NodeKind::Decision => "decision",
            NodeKind::Process => "process",
            NodeKind::Input => "input",
            NodeKind::Output => "output",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<LogicCategory> for NodeKind {
    /// Loops are not represented structurally; they become plain process nodes.
    fn from(category: LogicCategory) -> Self {
        match category {
            LogicCategory::Conditional => NodeKind::Decision,
            LogicCategory::Trigger => NodeKind::Input,
            LogicCategory::State | LogicCategory::Subroutine | LogicCategory::Loop => {
                NodeKind::Process
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EdgeStyle {
    #[default]
    Solid,
    Dashed,
    Dotted,
}

/// One input to flowchart synthesis.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LogicStep {
    #[serde(rename = "element_type")]
    pub category: LogicCategory,
    pub description: String,
    pub confidence: f64,
}

impl From<&Statement> for LogicStep {
    fn from(statement: &Statement) -> Self {
        Self {
            category: statement.category,
            description: statement.description.clone(),
            confidence: statement.confidence,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowNode {
    #[serde(rename = "element_id")]
    pub id: String,
    #[serde(rename = "element_type")]
    pub kind: NodeKind,
    pub label: String,
    pub position: (f64, f64),
    pub size: (f64, f64),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowEdge {
    #[serde(rename = "from_element")]
    pub from_id: String,
    #[serde(rename = "to_element")]
    pub to_id: String,
    pub label: String,
    pub condition: String,
    pub style: EdgeStyle,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowchartMetadata {
    #[serde(rename = "total_elements")]
    pub total_nodes: usize,
    pub logic_elements_processed: usize,
    #[serde(rename = "element_types")]
    pub per_kind: BTreeMap<NodeKind, usize>,
    pub generation_method: String,
}

/// A titled chain of nodes joined by consecutive edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flowchart {
    pub title: String,
    pub metadata: FlowchartMetadata,
    #[serde(rename = "elements")]
    pub nodes: Vec<FlowNode>,
    #[serde(rename = "connections")]
    pub edges: Vec<FlowEdge>,
}

impl Flowchart {
    pub fn node(&self, id: &str) -> Option<&FlowNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Nodes between the two sentinels.
    pub fn body(&self) -> &[FlowNode] {
        match self.nodes.len() {
            0..=2 => &[],
            n => &self.nodes[1..n - 1],
        }
    }
}
