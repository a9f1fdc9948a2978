//! Small unit tests for the pattern catalog, category names and error messages.
use glmp::flowchart::{NodeStyle, Shape};
use glmp::prelude::*;
use std::str::FromStr;

#[test]
fn test_standard_catalog_layout() {
    let catalog = PatternCatalog::standard();
    assert_eq!(catalog.len(), 28);
    assert_eq!(catalog.categories().collect::<Vec<_>>(), LogicCategory::ALL.to_vec());
    assert_eq!(catalog.patterns_for(LogicCategory::Conditional).len(), 6);
    assert_eq!(catalog.patterns_for(LogicCategory::Trigger).len(), 5);

    // Discovery order follows the catalog: every conditional pattern precedes any loop pattern.
    let first_loop = catalog
        .iter()
        .position(|(c, _)| c == LogicCategory::Loop)
        .unwrap();
    assert_eq!(first_loop, 6);
}

#[test]
fn test_catalog_patterns_are_case_insensitive() {
    let catalog = PatternCatalog::standard();
    let triggers = catalog.patterns_for(LogicCategory::Trigger);
    assert!(triggers.iter().any(|r| r.is_match("TRIGGERED BY heat")));
}

#[test]
fn test_custom_catalog() {
    let catalog =
        PatternCatalog::from_patterns([(LogicCategory::State, vec![r"dormant\s+\w+"])]).unwrap();
    assert_eq!(catalog.len(), 1);
    assert!(catalog.patterns_for(LogicCategory::Loop).is_empty());

    let extractor = Extractor::default().with_catalog(catalog);
    let result = extractor.extract("The spore remains dormant until rehydration.", "spore");
    assert_eq!(result.statements.len(), 1);
    assert_eq!(result.statements[0].category, LogicCategory::State);
    assert_eq!(result.statements[0].description, "dormant until");

    assert!(PatternCatalog::from_patterns([(LogicCategory::State, vec!["(unclosed"])]).is_err());
}

#[test]
fn test_category_names() {
    assert_eq!(LogicCategory::from_str("Trigger").unwrap(), LogicCategory::Trigger);
    assert_eq!(LogicCategory::from_str(" loop ").unwrap(), LogicCategory::Loop);
    assert!(LogicCategory::from_str("branch").is_err());
    assert_eq!(LogicCategory::Subroutine.to_string(), "subroutine");
}

#[test]
fn test_node_kind_from_category() {
    assert_eq!(NodeKind::from(LogicCategory::Conditional), NodeKind::Decision);
    assert_eq!(NodeKind::from(LogicCategory::Trigger), NodeKind::Input);
    assert_eq!(NodeKind::from(LogicCategory::Loop), NodeKind::Process);
    assert_eq!(NodeKind::from(LogicCategory::State), NodeKind::Process);
    assert_eq!(NodeKind::from(LogicCategory::Subroutine), NodeKind::Process);
}

#[test]
fn test_node_styles_by_kind() {
    assert_eq!(NodeStyle::for_kind(NodeKind::Start).shape, Shape::Oval);
    assert_eq!(NodeStyle::for_kind(NodeKind::End).shape, Shape::Oval);
    assert_eq!(NodeStyle::for_kind(NodeKind::Decision).shape, Shape::Diamond);
    assert_eq!(NodeStyle::for_kind(NodeKind::Process).shape, Shape::Rectangle);
    assert_eq!(NodeStyle::for_kind(NodeKind::Input).shape, Shape::Parallelogram);
    assert_eq!(NodeStyle::for_kind(NodeKind::Output).shape, Shape::Parallelogram);

    let diamond = NodeStyle::for_kind(NodeKind::Decision).outline(0.0, 0.0).unwrap();
    assert_eq!(diamond.len(), 4);
    assert!(NodeStyle::for_kind(NodeKind::Start).outline(0.0, 0.0).is_none());
}

#[test]
fn test_error_messages() {
    let err = WorkflowError::NotFound("workflow_x".to_string());
    assert_eq!(err.to_string(), "Workflow 'workflow_x' not found");

    let err: WorkflowError = ExtractionError::NotFound("paper.txt".to_string()).into();
    assert_eq!(
        err.to_string(),
        "Extraction step failed: Input document 'paper.txt' not found"
    );

    let err: WorkflowError = SynthesisError::Serialization("bad".to_string()).into();
    assert!(matches!(err, WorkflowError::Synthesis(_)));
}

#[test]
fn test_run_status() {
    assert_eq!(RunStatus::default(), RunStatus::Pending);
    assert!(!RunStatus::Running.is_terminal());
    assert!(RunStatus::Completed.is_terminal());
    assert!(RunStatus::Failed.is_terminal());
    assert_eq!(RunStatus::Failed.to_string(), "failed");
}
