//! Best-effort rewriting of prose into Microsoft style.
//!
//! The transformer is an ordered pipeline of pure passes. Each pass consumes
//! one rule table and sees the output of the pass before it, so a later rule
//! may match text inserted by an earlier one.

use regex::{Captures, NoExpand};

use crate::engine::StyleEngine;

/// Appended after every passive-voice trigger.
pub const PASSIVE_MARKER: &str = " [consider using active voice]";

type Pass = fn(&StyleEngine, String) -> String;

/// Pass order is part of the output contract.
const PIPELINE: &[(&str, Pass)] = &[
    ("substitutions", apply_substitutions),
    ("passive_voice", annotate_passive_voice),
    ("formal_phrases", apply_formal_phrases),
    ("gerund_bullets", number_gerund_bullets),
];

impl StyleEngine {
    /// Rewrite `text` using the rulebook. Blank input yields an empty string.
    #[tracing::instrument(skip_all, fields(len = text.len()))]
    pub fn transform(&self, text: &str) -> String {
        if text.trim().is_empty() {
            return String::new();
        }
        PIPELINE
            .iter()
            .fold(text.to_string(), |current, (name, pass)| {
                let next = pass(self, current);
                tracing::trace!(pass = *name, len = next.len(), "applied pass");
                next
            })
    }
}

// ---------------------------------------------------------------------------
// Passes
// ---------------------------------------------------------------------------

/// Substitution rules: every whole-word `avoid` becomes `use`.
fn apply_substitutions(engine: &StyleEngine, text: String) -> String {
    engine.substitutions.iter().fold(text, |acc, sub| {
        sub.pattern
            .replace_all(&acc, NoExpand(&sub.rule.replacement))
            .into_owned()
    })
}

/// Passive-voice triggers: flag in place, never rewrite.
fn annotate_passive_voice(engine: &StyleEngine, text: String) -> String {
    engine.passive_triggers.iter().fold(text, |acc, trigger| {
        trigger
            .pattern
            .replace_all(&acc, |caps: &Captures| format!("{}{PASSIVE_MARKER}", &caps[0]))
            .into_owned()
    })
}

/// Formal phrases: delete removal rules, otherwise substitute the suggestion.
fn apply_formal_phrases(engine: &StyleEngine, text: String) -> String {
    engine.formal_phrases.iter().fold(text, |acc, formal| {
        if formal.rule.is_removal() {
            formal.removal.replace_all(&acc, "").into_owned()
        } else {
            formal
                .pattern
                .replace_all(&acc, NoExpand(&formal.rule.suggestion))
                .into_owned()
        }
    })
}

/// Bullets that open with a gerund become numbered imperative steps.
fn number_gerund_bullets(_engine: &StyleEngine, text: String) -> String {
    text.split('\n')
        .map(|line| imperative_step(line).unwrap_or_else(|| line.to_string()))
        .collect::<Vec<_>>()
        .join("\n")
}

/// `- Installing the package` -> `1. Install the package`.
fn imperative_step(line: &str) -> Option<String> {
    let rest = line.strip_prefix("- ").or_else(|| line.strip_prefix("* "))?;
    let word_end = rest.find(char::is_whitespace).unwrap_or(rest.len());
    let word = rest[..word_end].trim_end_matches(|c: char| c.is_ascii_punctuation());
    let punct = &rest[word.len()..word_end];

    if word.len() <= 3 || !word.chars().all(char::is_alphabetic) {
        return None;
    }
    if !word.to_ascii_lowercase().ends_with("ing") {
        return None;
    }
    let stem = &word[..word.len() - 3];
    Some(format!("1. {stem}{punct}{}", &rest[word_end..]))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> StyleEngine {
        StyleEngine::builtin().unwrap()
    }

    #[test]
    fn blank_input_is_empty() {
        let engine = engine();
        assert_eq!(engine.transform(""), "");
        assert_eq!(engine.transform("  \n\t "), "");
    }

    #[test]
    fn substitution_then_please_removal() {
        assert_eq!(engine().transform("Please utilize the tool."), "use the tool.");
    }

    #[test]
    fn whole_word_only() {
        let text = "The utilization rate is high.";
        assert_eq!(engine().transform(text), text);
    }

    #[test]
    fn passive_trigger_is_annotated() {
        assert_eq!(
            engine().transform("The file was deleted."),
            "The file was [consider using active voice] deleted."
        );
    }

    #[test]
    fn overlapping_triggers_compound() {
        assert_eq!(
            engine().transform("It is being built."),
            "It is being [consider using active voice] [consider using active voice] built."
        );
    }

    #[test]
    fn formal_phrase_replacement_is_literal() {
        assert_eq!(
            engine().transform("It is recommended that you restart."),
            "We recommend that you restart."
        );
        assert_eq!(engine().transform("Tap on Save."), "select Save.");
    }

    #[test]
    fn please_note_removed_whole() {
        assert_eq!(
            engine().transform("Please note the limit is 10."),
            "the limit is 10."
        );
    }

    #[test]
    fn gerund_bullets_become_steps() {
        let text = "Steps:\n- Installing the package\n* Running tests\n- Reading the guide\n- ing\n-Installing";
        assert_eq!(
            engine().transform(text),
            "Steps:\n1. Install the package\n1. Runn tests\n1. Read the guide\n- ing\n-Installing"
        );
    }

    #[test]
    fn gerund_keeps_trailing_punctuation() {
        assert_eq!(
            imperative_step("- Installing: done"),
            Some("1. Install: done".to_string())
        );
        assert_eq!(imperative_step("- Testing."), Some("1. Test.".to_string()));
        assert_eq!(imperative_step("- Re-installing it"), None);
        assert_eq!(imperative_step("- ing:"), None);
        assert_eq!(imperative_step("1. Installing"), None);
        assert_eq!(
            imperative_step("- INSTALLING now"),
            Some("1. INSTALL now".to_string())
        );
    }

    #[test]
    fn trailing_newline_is_preserved() {
        assert_eq!(engine().transform("Leverage it.\n"), "use it.\n");
    }

    #[test]
    fn dollar_signs_in_replacements_are_literal() {
        let mut book = crate::RuleBook::builtin();
        book.substitutions[0].replacement = "$1 cash".to_string();
        let engine = StyleEngine::new(book).unwrap();
        assert_eq!(engine.transform("utilize"), "$1 cash");
    }
}
