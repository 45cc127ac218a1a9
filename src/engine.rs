use regex::Regex;

use crate::error::{EngineError, EngineResult};
use crate::rules::{AcronymEntry, FormalPhraseRule, RuleBook, SubstitutionRule};
use crate::terms::TermScanner;

// ---------------------------------------------------------------------------
// Compiled rules
// ---------------------------------------------------------------------------

pub(crate) struct CompiledSubstitution {
    pub rule: SubstitutionRule,
    pub pattern: Regex,
}

pub(crate) struct CompiledTrigger {
    pub phrase: String,
    pub pattern: Regex,
}

pub(crate) struct CompiledFormalPhrase {
    pub rule: FormalPhraseRule,
    pub pattern: Regex,
    /// Phrase plus trailing spaces/tabs, used when the rule deletes.
    pub removal: Regex,
}

pub(crate) struct CompiledAcronym {
    pub entry: AcronymEntry,
    /// Case-sensitive, whole-word use of the acronym.
    pub usage: Regex,
    /// `<full form> (<acronym>)`, case-insensitive.
    pub expansion: Regex,
}

/// Case-insensitive, word-boundary anchored pattern for a literal phrase.
pub(crate) fn word_pattern(phrase: &str) -> String {
    format!(r"(?i)\b{}\b", regex::escape(phrase))
}

pub(crate) fn compile(rule: &str, pattern: &str) -> EngineResult<Regex> {
    Regex::new(pattern).map_err(|source| EngineError::Pattern {
        rule: rule.to_string(),
        source,
    })
}

// ---------------------------------------------------------------------------
// Engine
// ---------------------------------------------------------------------------

/// A [`RuleBook`] compiled into regexes.
///
/// Construction does all the fallible work. Every text operation on the
/// engine is a pure function of its input and never fails.
pub struct StyleEngine {
    book: RuleBook,
    pub(crate) substitutions: Vec<CompiledSubstitution>,
    pub(crate) passive_triggers: Vec<CompiledTrigger>,
    pub(crate) formal_phrases: Vec<CompiledFormalPhrase>,
    pub(crate) terms: TermScanner,
    pub(crate) acronyms: Vec<CompiledAcronym>,
}

impl std::fmt::Debug for StyleEngine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StyleEngine")
            .field("substitutions", &self.substitutions.len())
            .field("passive_triggers", &self.passive_triggers.len())
            .field("formal_phrases", &self.formal_phrases.len())
            .field("term_bank", &self.book.term_bank.len())
            .field("acronyms", &self.acronyms.len())
            .field("penalty_per_violation", &self.book.penalty_per_violation)
            .finish()
    }
}

impl StyleEngine {
    pub fn new(book: RuleBook) -> EngineResult<Self> {
        book.validate()?;

        let substitutions = book
            .substitutions
            .iter()
            .map(|rule| {
                Ok(CompiledSubstitution {
                    pattern: compile(&rule.avoid, &word_pattern(&rule.avoid))?,
                    rule: rule.clone(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let passive_triggers = book
            .passive_triggers
            .iter()
            .map(|phrase| {
                Ok(CompiledTrigger {
                    pattern: compile(phrase, &word_pattern(phrase))?,
                    phrase: phrase.clone(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let formal_phrases = book
            .formal_phrases
            .iter()
            .map(|rule| {
                let base = word_pattern(&rule.phrase);
                Ok(CompiledFormalPhrase {
                    removal: compile(&rule.phrase, &format!(r"{base}[ \t]*"))?,
                    pattern: compile(&rule.phrase, &base)?,
                    rule: rule.clone(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let acronyms = book
            .acronyms
            .iter()
            .map(|entry| {
                let acronym = regex::escape(&entry.acronym);
                let full_form = regex::escape(&entry.full_form);
                Ok(CompiledAcronym {
                    usage: compile(&entry.acronym, &format!(r"\b{acronym}\b"))?,
                    expansion: compile(
                        &entry.full_form,
                        &format!(r"(?i){full_form}\s+\({acronym}\)"),
                    )?,
                    entry: entry.clone(),
                })
            })
            .collect::<EngineResult<Vec<_>>>()?;

        let terms = TermScanner::new(&book.term_bank)?;

        tracing::debug!(
            substitutions = substitutions.len(),
            passive_triggers = passive_triggers.len(),
            formal_phrases = formal_phrases.len(),
            acronyms = acronyms.len(),
            "compiled style engine"
        );

        Ok(Self {
            book,
            substitutions,
            passive_triggers,
            formal_phrases,
            terms,
            acronyms,
        })
    }

    /// Compile the built-in Microsoft style rulebook.
    pub fn builtin() -> EngineResult<Self> {
        Self::new(RuleBook::builtin())
    }

    pub fn rulebook(&self) -> &RuleBook {
        &self.book
    }

    pub fn penalty(&self) -> u32 {
        self.book.penalty_per_violation
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RuleBookError;

    #[test]
    fn word_pattern_escapes_metacharacters() {
        let re = Regex::new(&word_pattern("CI/CD (beta)")).unwrap();
        assert_eq!(word_pattern("a.b"), r"(?i)\ba\.b\b");
        assert!(!re.is_match("CI/CD beta"));
    }

    #[test]
    fn builtin_engine_compiles_every_rule() {
        let engine = StyleEngine::builtin().unwrap();
        let book = RuleBook::builtin();
        assert_eq!(engine.substitutions.len(), book.substitutions.len());
        assert_eq!(engine.passive_triggers.len(), book.passive_triggers.len());
        assert_eq!(engine.formal_phrases.len(), book.formal_phrases.len());
        assert_eq!(engine.acronyms.len(), book.acronyms.len());
        assert_eq!(engine.penalty(), 5);
    }

    #[test]
    fn invalid_rulebook_is_rejected() {
        let mut book = RuleBook::builtin();
        book.substitutions[0].avoid = String::new();
        let err = StyleEngine::new(book).unwrap_err();
        assert!(matches!(
            err,
            EngineError::RuleBook(RuleBookError::InvalidRule { .. })
        ));
    }

    #[test]
    fn removal_pattern_eats_trailing_spaces() {
        let engine = StyleEngine::builtin().unwrap();
        let please = engine
            .formal_phrases
            .iter()
            .find(|f| f.rule.phrase == "please")
            .unwrap();
        assert_eq!(please.removal.replace_all("Please  go", ""), "go");
        assert_eq!(please.pattern.replace_all("Please  go", ""), "  go");
    }
}
