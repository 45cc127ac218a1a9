//! Terminology bank and acronym validators, plus term standardization.
//!
//! Unlike the style checker these scan the whole document, code fences and
//! frontmatter included.

use std::ops::Range;

use regex::{Captures, Regex};

use crate::engine::{compile, word_pattern, StyleEngine};
use crate::error::EngineResult;
use crate::rules::TermEntry;
use crate::{compliance_score, AcronymReport, TermReport};

// ---------------------------------------------------------------------------
// Term scanner
// ---------------------------------------------------------------------------

struct DiscouragedTerm {
    preferred: String,
    term: String,
    pattern: Regex,
}

/// Per-term searches over the term bank, in table order.
///
/// A discouraged hit whose span lies wholly inside an occurrence of any
/// preferred term ("Actions" in "GitHub Actions") is ignored. Partial overlaps
/// still count, so "style rules" in "Microsoft style rules" is reported.
pub(crate) struct TermScanner {
    preferred: Vec<Regex>,
    discouraged: Vec<DiscouragedTerm>,
}

impl TermScanner {
    pub(crate) fn new(bank: &[TermEntry]) -> EngineResult<Self> {
        let preferred = bank
            .iter()
            .map(|entry| compile(&entry.preferred, &word_pattern(&entry.preferred)))
            .collect::<EngineResult<Vec<_>>>()?;
        let discouraged = bank
            .iter()
            .flat_map(|entry| entry.discouraged.iter().map(move |term| (entry, term)))
            .map(|(entry, term)| {
                Ok(DiscouragedTerm {
                    preferred: entry.preferred.clone(),
                    term: term.clone(),
                    pattern: compile(term, &word_pattern(term))?,
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;
        Ok(Self {
            preferred,
            discouraged,
        })
    }

    /// Byte spans of every preferred-term occurrence, overlaps allowed.
    fn shielded_spans(&self, text: &str) -> Vec<Range<usize>> {
        self.preferred
            .iter()
            .flat_map(|re| re.find_iter(text).map(|m| m.range()))
            .collect()
    }

    fn is_shielded(spans: &[Range<usize>], hit: &Range<usize>) -> bool {
        spans
            .iter()
            .any(|span| span.start <= hit.start && hit.end <= span.end)
    }

    /// Every unshielded discouraged occurrence as `(preferred, discouraged)`,
    /// grouped by term in table order.
    ///
    /// A hit wholly inside a longer discouraged hit ("Actions" in "GH Actions")
    /// is the same occurrence and is dropped too.
    fn discouraged_hits<'a>(&'a self, text: &str) -> Vec<(&'a str, &'a str)> {
        let spans = self.shielded_spans(text);
        let hits: Vec<(&DiscouragedTerm, Range<usize>)> = self
            .discouraged
            .iter()
            .flat_map(|d| d.pattern.find_iter(text).map(move |m| (d, m.range())))
            .collect();
        hits.iter()
            .filter(|(_, hit)| !Self::is_shielded(&spans, hit))
            .filter(|(_, hit)| {
                !hits.iter().any(|(_, other)| {
                    other.len() > hit.len() && other.start <= hit.start && hit.end <= other.end
                })
            })
            .map(|&(d, _)| (d.preferred.as_str(), d.term.as_str()))
            .collect()
    }

    /// Rewrite term by term in table order; each pass re-reads the shield
    /// from the text produced so far.
    fn replace(&self, text: &str) -> String {
        self.discouraged.iter().fold(text.to_string(), |acc, d| {
            let spans = self.shielded_spans(&acc);
            d.pattern
                .replace_all(&acc, |caps: &Captures| {
                    let hit = caps.get(0).map(|m| m.range()).unwrap_or_default();
                    if Self::is_shielded(&spans, &hit) {
                        caps[0].to_string()
                    } else {
                        d.preferred.clone()
                    }
                })
                .into_owned()
        })
    }
}

// ---------------------------------------------------------------------------
// Validators
// ---------------------------------------------------------------------------

pub(crate) fn term_message(preferred: &str, discouraged: &str) -> String {
    format!("Use \"{preferred}\" instead of \"{discouraged}\"")
}

pub(crate) fn acronym_message(acronym: &str, full_form: &str) -> String {
    format!(
        "Acronym \"{acronym}\" is used without defining its full form \"{full_form}\" on first use."
    )
}

impl StyleEngine {
    /// Report every discouraged synonym in `text`.
    ///
    /// One message per occurrence, grouped by term in table order. Repeated
    /// uses of a term repeat its message and each costs a penalty; the acronym
    /// check instead reports once per acronym.
    #[tracing::instrument(skip_all)]
    pub fn validate_terms(&self, text: &str) -> TermReport {
        let violations: Vec<String> = self
            .terms
            .discouraged_hits(text)
            .into_iter()
            .map(|(preferred, term)| term_message(preferred, term))
            .collect();
        let score = compliance_score(violations.len(), self.penalty());
        tracing::debug!(violations = violations.len(), score, "term check complete");
        TermReport { violations, score }
    }

    /// Report each acronym that appears without `<full form> (<acronym>)`
    /// anywhere in the document. Position of the expansion is not considered.
    #[tracing::instrument(skip_all)]
    pub fn check_acronyms(&self, text: &str) -> AcronymReport {
        let violations: Vec<String> = self
            .acronyms
            .iter()
            .filter(|a| a.usage.is_match(text) && !a.expansion.is_match(text))
            .map(|a| acronym_message(&a.entry.acronym, &a.entry.full_form))
            .collect();
        let score = compliance_score(violations.len(), self.penalty());
        tracing::debug!(violations = violations.len(), score, "acronym check complete");
        AcronymReport { violations, score }
    }

    /// Replace every discouraged synonym with its preferred term.
    #[tracing::instrument(skip_all)]
    pub fn standardize(&self, text: &str) -> String {
        self.terms.replace(text)
    }
}
