//! The rule table: ordered rule collections plus the terminology and acronym
//! registries, bundled into a [`RuleBook`].
//!
//! Entry order is significant. The transformer applies rules in sequence, so a
//! later rule sees the text produced by an earlier one.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{RuleBookError, RuleBookResult};

/// Default points deducted per violation when scoring.
pub const PENALTY_PER_VIOLATION: u32 = 5;

/// Suggestion prefix that turns a formal-phrase rule into a deletion.
pub const REMOVAL_PREFIX: &str = "Remove";

// ---------------------------------------------------------------------------
// Rule records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Grammar,
    Voice,
    Verb,
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Grammar => "grammar",
            Self::Voice => "voice",
            Self::Verb => "verb",
        };
        f.write_str(name)
    }
}

/// Direct phrase replacement: `avoid` is rewritten to `use`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubstitutionRule {
    pub avoid: String,
    #[serde(rename = "use")]
    pub replacement: String,
    pub category: Category,
}

impl SubstitutionRule {
    pub fn suggestion(&self) -> String {
        format!("Use \"{}\" instead of \"{}\"", self.replacement, self.avoid)
    }
}

/// Phrase-level rule that is either replaced by its suggestion or deleted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormalPhraseRule {
    pub phrase: String,
    pub suggestion: String,
    pub category: Category,
}

impl FormalPhraseRule {
    /// A suggestion starting with `Remove` means "delete the phrase".
    pub fn is_removal(&self) -> bool {
        self.suggestion.starts_with(REMOVAL_PREFIX)
    }
}

/// One canonical term and the synonyms that should be replaced by it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TermEntry {
    pub preferred: String,
    pub discouraged: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcronymEntry {
    pub acronym: String,
    pub full_form: String,
}

// ---------------------------------------------------------------------------
// Built-in tables
// ---------------------------------------------------------------------------

const SUBSTITUTIONS: &[(&str, &str, Category)] = &[
    ("utilize", "use", Category::Grammar),
    ("functionality", "features", Category::Grammar),
    ("leverage", "use", Category::Grammar),
    ("in order to", "to", Category::Grammar),
    ("ensure", "make sure", Category::Grammar),
    ("employ", "use", Category::Grammar),
    ("assistance", "help", Category::Grammar),
    ("initiate", "start", Category::Grammar),
    ("prior to", "before", Category::Grammar),
    ("users", "you", Category::Voice),
];

const PASSIVE_TRIGGERS: &[&str] = &[
    "is being",
    "was",
    "were",
    "has been",
    "have been",
    "had been",
    "will be",
    "being",
    "is used to",
    "are required to",
    "is done",
    "are provided",
];

const FORMAL_PHRASES: &[(&str, &str, Category)] = &[
    (
        "please note",
        "Remove 'please note' and state the information directly",
        Category::Voice,
    ),
    ("it is recommended", "We recommend", Category::Voice),
    ("it is important to", "You need to", Category::Voice),
    ("it should be noted", "Note that", Category::Voice),
    ("please be advised", "Remove this phrase entirely", Category::Voice),
    ("it is necessary for users to", "You need to", Category::Voice),
    ("it is necessary for you to", "You need to", Category::Voice),
    ("it is necessary to", "You need to", Category::Voice),
    ("please", "Remove 'please' from instructions", Category::Voice),
    ("click on", "select", Category::Verb),
    ("tap on", "select", Category::Verb),
];

const TERM_BANK: &[(&str, &[&str])] = &[
    ("select", &["click", "tap", "press"]),
    ("configuration", &["config", "setup"]),
    ("documentation", &["docs", "papers"]),
    ("validate", &["check", "verify"]),
    ("style guide", &["style rules", "guidelines"]),
    ("Microsoft style", &["MS style"]),
    ("GitHub Actions", &["GH Actions", "Actions"]),
    ("Markdown", &["markup"]),
    ("frontmatter", &["YAML header", "metadata"]),
    ("CI/CD", &["pipeline"]),
    ("linting", &["checking"]),
    ("validator", &["checker"]),
];

const ACRONYMS: &[(&str, &str)] = &[
    ("CI/CD", "Continuous Integration/Continuous Deployment"),
    ("API", "Application Programming Interface"),
    ("UI", "User Interface"),
    ("CLI", "Command Line Interface"),
    ("PR", "Pull Request"),
];

fn builtin_substitutions() -> Vec<SubstitutionRule> {
    SUBSTITUTIONS
        .iter()
        .map(|&(avoid, replacement, category)| SubstitutionRule {
            avoid: avoid.to_string(),
            replacement: replacement.to_string(),
            category,
        })
        .collect()
}

fn builtin_passive_triggers() -> Vec<String> {
    PASSIVE_TRIGGERS.iter().map(|p| p.to_string()).collect()
}

fn builtin_formal_phrases() -> Vec<FormalPhraseRule> {
    FORMAL_PHRASES
        .iter()
        .map(|&(phrase, suggestion, category)| FormalPhraseRule {
            phrase: phrase.to_string(),
            suggestion: suggestion.to_string(),
            category,
        })
        .collect()
}

fn builtin_term_bank() -> Vec<TermEntry> {
    TERM_BANK
        .iter()
        .map(|&(preferred, discouraged)| TermEntry {
            preferred: preferred.to_string(),
            discouraged: discouraged.iter().map(|d| d.to_string()).collect(),
        })
        .collect()
}

fn builtin_acronyms() -> Vec<AcronymEntry> {
    ACRONYMS
        .iter()
        .map(|&(acronym, full_form)| AcronymEntry {
            acronym: acronym.to_string(),
            full_form: full_form.to_string(),
        })
        .collect()
}

fn default_penalty() -> u32 {
    PENALTY_PER_VIOLATION
}

// ---------------------------------------------------------------------------
// RuleBook
// ---------------------------------------------------------------------------

/// Immutable set of rules consumed by [`StyleEngine`](crate::StyleEngine).
///
/// Sections left out of a rulebook file fall back to the built-in tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleBook {
    #[serde(default = "builtin_substitutions")]
    pub substitutions: Vec<SubstitutionRule>,
    #[serde(default = "builtin_passive_triggers")]
    pub passive_triggers: Vec<String>,
    #[serde(default = "builtin_formal_phrases")]
    pub formal_phrases: Vec<FormalPhraseRule>,
    #[serde(default = "builtin_term_bank")]
    pub term_bank: Vec<TermEntry>,
    #[serde(default = "builtin_acronyms")]
    pub acronyms: Vec<AcronymEntry>,
    #[serde(default = "default_penalty")]
    pub penalty_per_violation: u32,
}

impl Default for RuleBook {
    fn default() -> Self {
        Self::builtin()
    }
}

impl RuleBook {
    /// The Microsoft style rulebook shipped with the crate.
    pub fn builtin() -> Self {
        Self {
            substitutions: builtin_substitutions(),
            passive_triggers: builtin_passive_triggers(),
            formal_phrases: builtin_formal_phrases(),
            term_bank: builtin_term_bank(),
            acronyms: builtin_acronyms(),
            penalty_per_violation: PENALTY_PER_VIOLATION,
        }
    }

    /// Replace the per-violation penalty.
    pub fn with_penalty(mut self, penalty: u32) -> Self {
        self.penalty_per_violation = penalty;
        self
    }

    /// Load a rulebook from a `.json`, `.yaml` or `.yml` file and validate it.
    pub fn from_path(path: impl AsRef<Path>) -> RuleBookResult<Self> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| RuleBookError::Io {
            path: path.to_path_buf(),
            source,
        })?;

        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let book = match ext.as_deref() {
            Some("json") => Self::from_json(&raw)?,
            Some("yaml" | "yml") => Self::from_yaml(&raw)?,
            _ => {
                return Err(RuleBookError::UnsupportedFormat {
                    path: path.to_path_buf(),
                })
            }
        };
        tracing::debug!(path = %path.display(), "loaded rulebook");
        Ok(book)
    }

    pub fn from_json(raw: &str) -> RuleBookResult<Self> {
        let book: Self = serde_json::from_str(raw)?;
        book.validate()?;
        Ok(book)
    }

    pub fn from_yaml(raw: &str) -> RuleBookResult<Self> {
        let book: Self = serde_yaml::from_str(raw)?;
        book.validate()?;
        Ok(book)
    }

    /// Reject rules that can never match or would match everywhere.
    pub fn validate(&self) -> RuleBookResult<()> {
        if self.penalty_per_violation == 0 {
            return Err(RuleBookError::ZeroPenalty);
        }
        for (index, rule) in self.substitutions.iter().enumerate() {
            require_text("substitutions", index, "avoid", &rule.avoid)?;
        }
        for (index, trigger) in self.passive_triggers.iter().enumerate() {
            require_text("passive_triggers", index, "trigger", trigger)?;
        }
        for (index, rule) in self.formal_phrases.iter().enumerate() {
            require_text("formal_phrases", index, "phrase", &rule.phrase)?;
        }
        for (index, entry) in self.term_bank.iter().enumerate() {
            require_text("term_bank", index, "preferred", &entry.preferred)?;
            for term in &entry.discouraged {
                require_text("term_bank", index, "discouraged", term)?;
            }
        }
        for (index, entry) in self.acronyms.iter().enumerate() {
            require_text("acronyms", index, "acronym", &entry.acronym)?;
            require_text("acronyms", index, "full_form", &entry.full_form)?;
        }
        Ok(())
    }
}

fn require_text(
    section: &'static str,
    index: usize,
    field: &str,
    value: &str,
) -> RuleBookResult<()> {
    if value.trim().is_empty() {
        return Err(RuleBookError::InvalidRule {
            section,
            index,
            reason: format!("{field} must not be empty"),
        });
    }
    Ok(())
}
