use msstyle::{check, check_acronyms, review, standardize, transform, validate_terms, Category};

const SCENARIO: &str = "It is necessary for users to install the software prior to configuration. \
                        Please click on the Save button.";

#[test]
fn empty_input() {
    assert_eq!(transform(""), "");
    let result = check("", None);
    assert!(result.violations.is_empty());
    assert_eq!(result.score, 100);
}

#[test]
fn please_utilize_becomes_use() {
    assert_eq!(transform("Please utilize the tool."), "use the tool.");
}

#[test]
fn word_boundaries_are_respected() {
    let text = "The utilization rate is high.";
    assert_eq!(transform(text), text);
    assert!(
        check(text, None).violations.is_empty(),
        "utilization must not match the utilize rule"
    );
}

#[test]
fn scenario_is_flagged() {
    let result = check(SCENARIO, Some("input.md"));
    let found: Vec<(&str, &str)> = result
        .violations
        .iter()
        .map(|v| (v.rule.as_str(), v.suggestion.as_str()))
        .collect();

    assert!(found.contains(&("users", "Use \"you\" instead of \"users\"")));
    assert!(found.contains(&("it is necessary for users to", "You need to")));
    assert!(found.contains(&("please", "Remove 'please' from instructions")));
    assert!(found.contains(&("click on", "select")));
    assert!(found.contains(&("prior to", "Use \"before\" instead of \"prior to\"")));
    assert_eq!(result.violations.len(), 5, "{found:?}");
    assert_eq!(result.score, 75);
    assert!(result.violations.iter().all(|v| v.line == 1 && v.context == SCENARIO));
}

#[test]
fn scenario_is_rewritten_in_rule_order() {
    assert_eq!(
        transform(SCENARIO),
        "You need to install the software before configuration. select the Save button."
    );
}

#[test]
fn check_does_not_touch_input_and_is_repeatable() {
    let text = String::from("Please note that the file was saved.\nClick on OK.");
    let before = text.clone();
    let first = check(&text, None);
    let second = check(&text, None);
    assert_eq!(text, before);
    assert_eq!(first, second);
}

#[test]
fn categories_follow_rule_tables() {
    let result = check("Leverage it. It was done. Tap on Save.", None);
    let categories: Vec<Category> = result.violations.iter().map(|v| v.category).collect();
    assert_eq!(
        categories,
        vec![Category::Grammar, Category::Voice, Category::Verb]
    );
}

#[test]
fn fenced_and_frontmatter_regions_are_ignored() {
    let text = "\
---
title: Utilize the API
---

Install the package.

```bash
# this was generated
npm run ensure
```

Users can initiate a build.";
    let result = check(text, None);
    let rules: Vec<&str> = result.violations.iter().map(|v| v.rule.as_str()).collect();
    assert_eq!(rules, vec!["initiate", "users"]);
    assert!(result.violations.iter().all(|v| v.line == 12));
}

#[test]
fn unterminated_fence_degrades_to_prose() {
    let text = "```\nThe job was queued.";
    let result = check(text, None);
    assert_eq!(result.violations.len(), 1);
    assert_eq!(result.violations[0].line, 2);
}

#[test]
fn acronyms_are_presence_based() {
    let missing = check_acronyms("We use the API.");
    assert_eq!(missing.violations.len(), 1);
    assert!(missing.violations[0].contains("\"API\""));

    let defined =
        check_acronyms("Application Programming Interface (API) access. Use the API daily.");
    assert!(defined.violations.is_empty());

    // Expansion after first use still counts.
    let late = check_acronyms("Use the API. It is an Application Programming Interface (API).");
    assert!(late.violations.is_empty());
}

#[test]
fn terms_scan_whole_document() {
    let text = "```\nconfig\n```\nSee the docs.";
    let report = validate_terms(text);
    assert_eq!(
        report.violations,
        vec![
            "Use \"configuration\" instead of \"config\"".to_string(),
            "Use \"documentation\" instead of \"docs\"".to_string(),
        ]
    );
    assert_eq!(report.score, 90);
}

#[test]
fn standardize_is_idempotent_on_sample() {
    let text = "Press the button in the UI, check the config, then open GH Actions and the MS style rules.";
    let once = standardize(text);
    assert_eq!(
        once,
        "select the button in the UI, validate the configuration, then open GitHub Actions and the Microsoft style guide."
    );
    assert_eq!(standardize(&once), once);
}

#[test]
fn json_output_is_valid() {
    let result = review("The CLI was installed.", Some("guide.md"));
    let json = serde_json::to_string_pretty(&result).unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed["style"]["source"], "guide.md");
    assert_eq!(parsed["style"]["violations"][0]["match"], "was");
    assert_eq!(parsed["style_badge"], "default");
    assert!(parsed.get("terms").is_some());
    assert_eq!(parsed["acronyms"]["violations"].as_array().unwrap().len(), 1);
    assert_eq!(parsed["improved_text"], "The CLI was installed.");
}
