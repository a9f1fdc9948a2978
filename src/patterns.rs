//! The fixed catalog of regular expressions that tie sentence fragments to logic categories.

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use std::sync::LazyLock;

/// A coarse semantic tag for a matched statement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogicCategory {
    Conditional,
    Loop,
    Subroutine,
    Trigger,
    State,
}

impl LogicCategory {
    /// All categories in catalog order.
    pub const ALL: [LogicCategory; 5] = [
        LogicCategory::Conditional,
        LogicCategory::Loop,
        LogicCategory::Subroutine,
        LogicCategory::Trigger,
        LogicCategory::State,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            LogicCategory::Conditional => "conditional",
            LogicCategory::Loop => "loop",
            LogicCategory::Subroutine => "subroutine",
            LogicCategory::Trigger => "trigger",
            LogicCategory::State => "state",
        }
    }
}

impl fmt::Display for LogicCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LogicCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        LogicCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| format!("unknown logic category '{}'", s))
    }
}

/// Declares the built-in pattern table, one block per category in catalog order.
macro_rules! define_patterns {
    ( $( $category:path => [ $( $pattern:expr ),* $(,)? ] ),* $(,)? ) => {
        const STANDARD_PATTERNS: &[(LogicCategory, &[&str])] = &[
            $( ($category, &[ $( $pattern ),* ]) ),*
        ];
    };
}

define_patterns! {
    LogicCategory::Conditional => [
        r"if\s+([^,]+)\s+then",
        r"when\s+([^,]+)",
        r"provided\s+that\s+([^,]+)",
        r"conditional\s+on\s+([^,]+)",
        r"([^,]+)\s+activates\s+([^,]+)",
        r"([^,]+)\s+inhibits\s+([^,]+)",
    ],
    LogicCategory::Loop => [
        r"cycle\s+([^,]+)",
        r"loop\s+([^,]+)",
        r"repeated\s+([^,]+)",
        r"iterative\s+([^,]+)",
        r"feedback\s+loop",
        r"circadian\s+([^,]+)",
    ],
    LogicCategory::Subroutine => [
        r"pathway\s+([^,]+)",
        r"cascade\s+([^,]+)",
        r"network\s+([^,]+)",
        r"circuit\s+([^,]+)",
        r"mechanism\s+([^,]+)",
        r"process\s+([^,]+)",
    ],
    LogicCategory::Trigger => [
        r"triggered\s+by\s+([^,]+)",
        r"activated\s+by\s+([^,]+)",
        r"initiated\s+by\s+([^,]+)",
        r"stimulated\s+by\s+([^,]+)",
        r"induced\s+by\s+([^,]+)",
    ],
    LogicCategory::State => [
        r"state\s+([^,]+)",
        r"phase\s+([^,]+)",
        r"stage\s+([^,]+)",
        r"condition\s+([^,]+)",
        r"status\s+([^,]+)",
    ],
}

static STANDARD: LazyLock<PatternCatalog> = LazyLock::new(|| {
    PatternCatalog::from_patterns(STANDARD_PATTERNS.iter().map(|(c, p)| (*c, p.iter().copied())))
        .expect("built-in logic patterns are valid regular expressions")
});

/// An immutable, ordered mapping from logic category to case-insensitive regexes.
///
/// Iteration order is significant: it defines the discovery order of statements,
/// which in turn breaks ties when ranking them.
#[derive(Debug, Clone)]
pub struct PatternCatalog {
    entries: Vec<(LogicCategory, Vec<Regex>)>,
}

impl PatternCatalog {
    /// The built-in catalog covering all five categories.
    pub fn standard() -> Self {
        STANDARD.clone()
    }

    /// Builds a catalog from raw pattern strings. Patterns are compiled case-insensitive.
    pub fn from_patterns<I, P, S>(entries: I) -> Result<Self, regex::Error>
    where
        I: IntoIterator<Item = (LogicCategory, P)>,
        P: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut compiled = Vec::new();
        for (category, patterns) in entries {
            let regexes = patterns
                .into_iter()
                .map(|p| RegexBuilder::new(p.as_ref()).case_insensitive(true).build())
                .collect::<Result<Vec<_>, _>>()?;
            compiled.push((category, regexes));
        }
        Ok(Self { entries: compiled })
    }

    /// Iterates `(category, pattern)` pairs in catalog order.
    pub fn iter(&self) -> impl Iterator<Item = (LogicCategory, &Regex)> {
        self.entries
            .iter()
            .flat_map(|(category, regexes)| regexes.iter().map(move |r| (*category, r)))
    }

    pub fn patterns_for(&self, category: LogicCategory) -> &[Regex] {
        self.entries
            .iter()
            .find(|(c, _)| *c == category)
            .map(|(_, regexes)| regexes.as_slice())
            .unwrap_or(&[])
    }

    pub fn categories(&self) -> impl Iterator<Item = LogicCategory> + '_ {
        self.entries.iter().map(|(c, _)| *c)
    }

    pub fn len(&self) -> usize {
        self.entries.iter().map(|(_, r)| r.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for PatternCatalog {
    fn default() -> Self {
        Self::standard()
    }
}
