use msstyle::{check, compliance_score, standardize, transform, RuleBook, StyleEngine};
use proptest::prelude::*;

/// Prose fragments mixing rule triggers, term-bank words and plain text.
fn fragment() -> impl Strategy<Value = String> {
    prop_oneof![
        prop::sample::select(vec![
            "utilize",
            "was",
            "click on",
            "Please",
            "config",
            "GitHub Actions",
            "GH Actions",
            "Actions",
            "MS style",
            "checker",
            "---",
            "```",
            "\n",
        ])
        .prop_map(str::to_string),
        "[a-zA-Z]{1,8}",
        "[ .,]{1,2}",
    ]
}

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(fragment(), 0..24).prop_map(|parts| parts.join(" "))
}

proptest! {
    #[test]
    fn standardize_is_idempotent(text in document()) {
        let once = standardize(&text);
        prop_assert_eq!(standardize(&once), once);
    }

    #[test]
    fn check_is_deterministic(text in document()) {
        prop_assert_eq!(check(&text, None), check(&text, None));
    }

    #[test]
    fn score_stays_in_range(text in document()) {
        let result = check(&text, None);
        prop_assert!(result.score <= 100);
        prop_assert_eq!(result.score, compliance_score(result.violations.len(), 5));
    }

    #[test]
    fn adding_a_violation_never_raises_the_score(text in "[a-z ]{0,80}") {
        let base = check(&text, None).score;
        let worse = check(&format!("{text}\nIt was utilized."), None).score;
        prop_assert!(worse <= base);
    }

    #[test]
    fn transform_is_deterministic(text in document()) {
        prop_assert_eq!(transform(&text), transform(&text));
    }

    #[test]
    fn penalty_is_configurable(count in 0usize..60, penalty in 1u32..10) {
        let engine = StyleEngine::new(RuleBook::builtin().with_penalty(penalty)).unwrap();
        let text = "was\n".repeat(count);
        let result = engine.check(&text, None);
        prop_assert_eq!(result.violations.len(), count);
        prop_assert_eq!(result.score, compliance_score(count, penalty));
    }
}
