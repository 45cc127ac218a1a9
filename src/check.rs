//! Read-only audit of prose against the rulebook.

use regex::Regex;

use crate::engine::StyleEngine;
use crate::rules::Category;
use crate::{compliance_score, StyleCheckResult, Violation};

pub const PASSIVE_VOICE_SUGGESTION: &str = "Use active voice instead of passive voice";

// ---------------------------------------------------------------------------
// Skipped regions
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Delimiter {
    Frontmatter,
    Fence,
}

impl Delimiter {
    fn matches(self, line: &str) -> bool {
        match self {
            Self::Frontmatter => line.trim() == "---",
            Self::Fence => line.trim_start().starts_with("```"),
        }
    }
}

/// Frontmatter only opens on the first non-blank line; a later `---` is a
/// setext underline or a rule and stays prose.
fn opener(line: &str, at_top: bool) -> Option<Delimiter> {
    if Delimiter::Fence.matches(line) {
        Some(Delimiter::Fence)
    } else if at_top && Delimiter::Frontmatter.matches(line) {
        Some(Delimiter::Frontmatter)
    } else {
        None
    }
}

/// Marks the frontmatter block and code fences, delimiters included.
///
/// An opener without a matching closer only hides itself; the lines after it
/// are scanned as prose.
pub(crate) fn skipped_lines(lines: &[&str]) -> Vec<bool> {
    let mut skip = vec![false; lines.len()];
    let top = lines.iter().position(|line| !line.trim().is_empty());
    let mut i = 0;
    while i < lines.len() {
        let Some(open) = opener(lines[i], top == Some(i)) else {
            i += 1;
            continue;
        };
        skip[i] = true;
        let close = (i + 1..lines.len()).find(|&j| open.matches(lines[j]));
        match close {
            Some(close) => {
                skip[i..=close].iter_mut().for_each(|s| *s = true);
                i = close + 1;
            }
            None => i += 1,
        }
    }
    skip
}

// ---------------------------------------------------------------------------
// Checker
// ---------------------------------------------------------------------------

fn push_matches(
    out: &mut Vec<Violation>,
    pattern: &Regex,
    line: &str,
    line_number: usize,
    category: Category,
    rule: &str,
    suggestion: &str,
) {
    for m in pattern.find_iter(line) {
        out.push(Violation {
            category,
            rule: rule.to_string(),
            matched_text: m.as_str().to_string(),
            suggestion: suggestion.to_string(),
            line: line_number,
            context: line.to_string(),
        });
    }
}

impl StyleEngine {
    /// Audit `text` line by line without modifying it.
    ///
    /// `source` only labels the result. Violations are ordered by line, then
    /// substitutions, passive-voice triggers and formal phrases in rulebook
    /// order.
    #[tracing::instrument(skip_all, fields(source = source))]
    pub fn check(&self, text: &str, source: Option<&str>) -> StyleCheckResult {
        let lines: Vec<&str> = text.lines().collect();
        let skip = skipped_lines(&lines);
        let mut violations = Vec::new();

        for (idx, line) in lines.iter().enumerate() {
            if skip[idx] {
                continue;
            }
            let line_number = idx + 1;

            for sub in &self.substitutions {
                push_matches(
                    &mut violations,
                    &sub.pattern,
                    line,
                    line_number,
                    sub.rule.category,
                    &sub.rule.avoid,
                    &sub.rule.suggestion(),
                );
            }
            for trigger in &self.passive_triggers {
                push_matches(
                    &mut violations,
                    &trigger.pattern,
                    line,
                    line_number,
                    Category::Voice,
                    &trigger.phrase,
                    PASSIVE_VOICE_SUGGESTION,
                );
            }
            for formal in &self.formal_phrases {
                push_matches(
                    &mut violations,
                    &formal.pattern,
                    line,
                    line_number,
                    formal.rule.category,
                    &formal.rule.phrase,
                    &formal.rule.suggestion,
                );
            }
        }

        let score = compliance_score(violations.len(), self.penalty());
        tracing::debug!(
            lines = lines.len(),
            skipped = skip.iter().filter(|s| **s).count(),
            violations = violations.len(),
            score,
            "style check complete"
        );

        StyleCheckResult {
            source: source.map(str::to_string),
            violations,
            score,
        }
    }
}
