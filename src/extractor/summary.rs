use super::statement::Statement;
use crate::patterns::LogicCategory;
use itertools::Itertools;

pub const EMPTY_SUMMARY: &str = "No computational logic elements found in the text.";

const DESCRIPTION_PREVIEW_CHARS: usize = 100;

/// Counts statements per category in order of first appearance.
pub fn category_counts(statements: &[Statement]) -> Vec<(LogicCategory, usize)> {
    let mut counts: Vec<(LogicCategory, usize)> = Vec::new();
    for statement in statements {
        match counts.iter_mut().find(|(c, _)| *c == statement.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((statement.category, 1)),
        }
    }
    counts
}

/// Builds the plain-text digest: totals, per-category counts and the most confident statements.
pub fn summarize(statements: &[Statement], top: usize) -> String {
    if statements.is_empty() {
        return EMPTY_SUMMARY.to_string();
    }

    let mut output = String::new();
    output.push_str(&format!("Extracted {} logic elements:", statements.len()));
    for (category, count) in category_counts(statements) {
        output.push_str(&format!("\n- {} {} elements", count, category));
    }

    // Stable sort: equal confidences keep discovery order.
    let ranked = statements
        .iter()
        .sorted_by(|a, b| b.confidence.total_cmp(&a.confidence))
        .take(top)
        .collect::<Vec<_>>();
    if !ranked.is_empty() {
        output.push_str("\n\nTop logic elements:");
        for statement in ranked {
            let preview: String = statement
                .description
                .chars()
                .take(DESCRIPTION_PREVIEW_CHARS)
                .collect();
            output.push_str(&format!("\n- {}: {}...", statement.category, preview));
        }
    }
    output
}
