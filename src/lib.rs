//! # glmp - Logic Extraction and Flowchart Synthesis
//!
//! **glmp** scans biological prose for sentence fragments that describe computational
//! logic (conditionals, loops, subroutines, triggers and states), scores each match,
//! and turns the resulting statements into a linear flowchart that can be rendered as
//! an image or saved as JSON.
//!
//! ## Core Workflow
//!
//! 1.  **Extract**: An [`Extractor`](extractor::Extractor) splits a document into sentences and
//!     matches every sentence against the [`PatternCatalog`](patterns::PatternCatalog). Each
//!     match above the confidence threshold becomes a [`Statement`](extractor::Statement).
//! 2.  **Synthesize**: A [`FlowchartBuilder`](flowchart::FlowchartBuilder) maps statements onto
//!     a chain of typed nodes, `start -> ... -> end`.
//! 3.  **Write**: The builder renders the chain to a PNG and serializes it to JSON.
//! 4.  **Coordinate**: A [`Coordinator`](workflow::Coordinator) runs steps 1-3 as a named
//!     workflow and tracks the status of every step.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use glmp::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let text = "When lactose is present, the repressor protein is inactivated.";
//!
//!     let extractor = Extractor::default();
//!     let extraction = extractor.extract(text, "lac_operon");
//!     println!("{}", extraction.summary);
//!
//!     let builder = FlowchartBuilder::default();
//!     let flowchart = builder.synthesize_extraction(&extraction, "Lac Operon Regulation");
//!     builder.render(&flowchart, "lac_operon.png")?;
//!     builder.serialize(&flowchart, "lac_operon.json")?;
//!
//!     // Or let a coordinator run the whole pipeline on a file.
//!     let mut coordinator = Coordinator::new(CoordinatorConfig::default());
//!     let analysis = coordinator.process_paper("paper.txt", "Lac Operon Analysis")?;
//!     println!("Wrote {:?}", analysis.output_files);
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod error;
pub mod extractor;
pub mod flowchart;
pub mod patterns;
pub mod prelude;
pub mod workflow;
