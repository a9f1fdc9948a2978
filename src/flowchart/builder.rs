use super::{
    EdgeStyle, END_NODE_ID, FlowEdge, FlowNode, Flowchart, FlowchartMetadata, GENERATION_METHOD,
    LogicStep, NodeKind, START_NODE_ID,
};
use crate::config::RenderConfig;
use crate::error::SynthesisError;
use crate::extractor::ExtractionResult;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::{debug, info};

/// Vertical distance between consecutive nodes, in world units.
pub const NODE_SPACING: f64 = 1.5;
pub const DEFAULT_NODE_SIZE: (f64, f64) = (1.0, 0.5);
pub const MAX_LABEL_CHARS: usize = 50;
const ELLIPSIS: &str = "...";

/// Leading connectives removed from labels, checked in this order.
const CONNECTIVE_PREFIXES: [&str; 4] = ["if ", "when ", "provided that ", "conditional on "];
const QUESTION_OPENERS: [&str; 4] = ["is ", "are ", "has ", "have "];

/// Converts logic statements into flowcharts and writes them out as images or JSON.
#[derive(Debug, Clone, Default)]
pub struct FlowchartBuilder {
    render: RenderConfig,
}

impl FlowchartBuilder {
    pub fn new(render: RenderConfig) -> Self {
        Self { render }
    }

    pub fn render_config(&self) -> &RenderConfig {
        &self.render
    }

    /// Builds the chain `start -> step 1 -> ... -> step N -> end`.
    ///
    /// Decision nodes do not branch: no true/false targets exist in the input, so every
    /// node has exactly one successor.
    pub fn synthesize(&self, steps: &[LogicStep], title: &str) -> Flowchart {
        let mut nodes = Vec::with_capacity(steps.len() + 2);
        nodes.push(FlowNode {
            id: START_NODE_ID.to_string(),
            kind: NodeKind::Start,
            label: "Start".to_string(),
            position: (0.0, 0.0),
            size: DEFAULT_NODE_SIZE,
        });

        for (index, step) in steps.iter().enumerate() {
            let kind = NodeKind::from(step.category);
            nodes.push(FlowNode {
                id: format!("elem_{}", index + 1),
                kind,
                label: node_label(&step.description, kind),
                position: (0.0, -NODE_SPACING * (index + 1) as f64),
                size: DEFAULT_NODE_SIZE,
            });
        }

        nodes.push(FlowNode {
            id: END_NODE_ID.to_string(),
            kind: NodeKind::End,
            label: "End".to_string(),
            position: (0.0, -NODE_SPACING * (steps.len() + 1) as f64),
            size: DEFAULT_NODE_SIZE,
        });

        let edges = nodes
            .windows(2)
            .map(|pair| FlowEdge {
                from_id: pair[0].id.clone(),
                to_id: pair[1].id.clone(),
                label: String::new(),
                condition: String::new(),
                style: EdgeStyle::Solid,
            })
            .collect::<Vec<_>>();

        let mut per_kind = BTreeMap::new();
        for node in &nodes {
            *per_kind.entry(node.kind).or_insert(0) += 1;
        }

        info!(
            title,
            nodes = nodes.len(),
            edges = edges.len(),
            "Synthesized flowchart"
        );

        Flowchart {
            title: title.to_string(),
            metadata: FlowchartMetadata {
                total_nodes: nodes.len(),
                logic_elements_processed: steps.len(),
                per_kind,
                generation_method: GENERATION_METHOD.to_string(),
            },
            nodes,
            edges,
        }
    }

    /// Synthesizes a flowchart from every statement of an extraction run.
    pub fn synthesize_extraction(&self, result: &ExtractionResult, title: &str) -> Flowchart {
        let steps = result.statements.iter().map(LogicStep::from).collect::<Vec<_>>();
        self.synthesize(&steps, title)
    }

    /// Draws the flowchart and writes it as a raster image.
    pub fn render(
        &self,
        flowchart: &Flowchart,
        output_path: impl AsRef<Path>,
    ) -> Result<(), SynthesisError> {
        let output_path = output_path.as_ref();
        super::render_flowchart(flowchart, &self.render, output_path)?;
        debug!(path = %output_path.display(), "Rendered flowchart image");
        Ok(())
    }

    /// Writes the flowchart's JSON mirror.
    pub fn serialize(
        &self,
        flowchart: &Flowchart,
        output_path: impl AsRef<Path>,
    ) -> Result<(), SynthesisError> {
        let output_path = output_path.as_ref();
        flowchart.save(output_path)?;
        debug!(path = %output_path.display(), "Saved flowchart data");
        Ok(())
    }
}

/// Derives a node label from a statement description.
///
/// Connective prefixes are stripped, long text is cut to 47 characters plus `...`, and
/// decision labels are phrased as a yes/no question.
pub fn node_label(description: &str, kind: NodeKind) -> String {
    let mut label = description.trim();
    for prefix in CONNECTIVE_PREFIXES {
        if let Some(rest) = strip_prefix_ignore_case(label, prefix) {
            label = rest;
        }
    }

    let mut label = if label.chars().count() > MAX_LABEL_CHARS {
        let head: String = label
            .chars()
            .take(MAX_LABEL_CHARS - ELLIPSIS.len())
            .collect();
        head + ELLIPSIS
    } else {
        label.to_string()
    };

    if kind == NodeKind::Decision
        && !QUESTION_OPENERS
            .iter()
            .any(|opener| strip_prefix_ignore_case(&label, opener).is_some())
    {
        label = format!("Is {}?", label);
    }
    label
}

fn strip_prefix_ignore_case<'a>(text: &'a str, prefix: &str) -> Option<&'a str> {
    let head = text.get(..prefix.len())?;
    head.eq_ignore_ascii_case(prefix).then(|| &text[prefix.len()..])
}
