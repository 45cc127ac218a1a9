//! Rewrite or audit prose against the Microsoft style rulebook.
//!
//! The engine is a set of pure functions over an immutable [`RuleBook`]:
//!
//! - [`transform`] rewrites text on a best-effort basis.
//! - [`check`] lists located violations and a 0-100 compliance score.
//! - [`validate_terms`] and [`check_acronyms`] audit terminology.
//! - [`standardize`] swaps discouraged synonyms for preferred terms.
//! - [`review`] runs every audit at once.
//!
//! The free functions use the built-in rulebook. Build a [`StyleEngine`] to
//! inject a different one.

use once_cell::sync::Lazy;
use serde::Serialize;

pub mod check;
pub mod engine;
pub mod error;
pub mod logging;
pub mod rules;
pub mod terms;
pub mod transform;

pub use engine::StyleEngine;
pub use error::{EngineError, RuleBookError};
pub use rules::{
    AcronymEntry, Category, FormalPhraseRule, RuleBook, SubstitutionRule, TermEntry,
    PENALTY_PER_VIOLATION,
};

// ---------------------------------------------------------------------------
// Data structures
// ---------------------------------------------------------------------------

/// One located rule match found by [`check`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    pub category: Category,
    /// The rule pattern that matched.
    pub rule: String,
    #[serde(rename = "match")]
    pub matched_text: String,
    pub suggestion: String,
    /// 1-based line number.
    pub line: usize,
    /// The full line as written.
    pub context: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleCheckResult {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    pub violations: Vec<Violation>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TermReport {
    pub violations: Vec<String>,
    pub score: u8,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AcronymReport {
    pub violations: Vec<String>,
    pub score: u8,
}

/// Display tier for a score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ScoreBadge {
    Default,
    Secondary,
    Destructive,
}

impl ScoreBadge {
    pub fn for_score(score: u8) -> Self {
        if score >= 90 {
            Self::Default
        } else if score >= 70 {
            Self::Secondary
        } else {
            Self::Destructive
        }
    }
}

/// Everything the checker reports for one document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StyleReview {
    pub style: StyleCheckResult,
    pub style_badge: ScoreBadge,
    pub terms: TermReport,
    pub term_badge: ScoreBadge,
    pub acronyms: AcronymReport,
    /// The input with term standardization applied.
    pub improved_text: String,
}

// ---------------------------------------------------------------------------
// Scoring
// ---------------------------------------------------------------------------

/// `max(0, 100 - penalty * count)`.
pub fn compliance_score(violation_count: usize, penalty: u32) -> u8 {
    let deduction = (violation_count as u64).saturating_mul(u64::from(penalty));
    // Bounded by 100 after the subtraction.
    100u64.saturating_sub(deduction) as u8
}

impl StyleEngine {
    /// Run the style check, both terminology audits and standardization.
    #[tracing::instrument(skip_all, fields(source = source))]
    pub fn review(&self, text: &str, source: Option<&str>) -> StyleReview {
        let style = self.check(text, source);
        let terms = self.validate_terms(text);
        StyleReview {
            style_badge: ScoreBadge::for_score(style.score),
            term_badge: ScoreBadge::for_score(terms.score),
            style,
            terms,
            acronyms: self.check_acronyms(text),
            improved_text: self.standardize(text),
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

static DEFAULT_ENGINE: Lazy<StyleEngine> =
    Lazy::new(|| StyleEngine::builtin().expect("built-in rulebook compiles"));

/// The engine behind the free functions.
pub fn default_engine() -> &'static StyleEngine {
    &DEFAULT_ENGINE
}

pub fn transform(text: &str) -> String {
    DEFAULT_ENGINE.transform(text)
}

pub fn check(text: &str, source: Option<&str>) -> StyleCheckResult {
    DEFAULT_ENGINE.check(text, source)
}

pub fn validate_terms(text: &str) -> TermReport {
    DEFAULT_ENGINE.validate_terms(text)
}

pub fn check_acronyms(text: &str) -> AcronymReport {
    DEFAULT_ENGINE.check_acronyms(text)
}

pub fn standardize(text: &str) -> String {
    DEFAULT_ENGINE.standardize(text)
}

pub fn review(text: &str, source: Option<&str>) -> StyleReview {
    DEFAULT_ENGINE.review(text, source)
}
