use filterlist_dnr::builders::classifier::LineClassifier;
use filterlist_dnr::builders::patterns::{ResourceType, RuleBuilder, RulePolicy};
use filterlist_dnr::builders::serializer::JsonStyle;
use filterlist_dnr::builders::validator::{ListChecker, ListValidator, Severity};
use filterlist_dnr::core::config::{ConfigManager, ConfigProvider};
use filterlist_dnr::core::engine::ConversionEngine;
use filterlist_dnr::utils::{self, ConvertOptions};
use serde_json::Value;
use std::fs;
use std::thread;

const SAMPLE_LIST: &str = "[Adblock Plus 2.0]
! Title: Sample list
! Expires: 4 days

||ads.example.com^
||tracker.example.net^
@@||allowed.example.org^
example.com##.sponsored
||cdn.example.io^$script,third-party
||^
||metrics.example.co.uk^
";

#[test]
fn test_sample_list_conversion() {
    let engine = ConversionEngine::default();
    let conversion = engine.convert(SAMPLE_LIST);

    let filters: Vec<&str> = conversion
        .rules
        .iter()
        .map(|r| r.url_filter.as_str())
        .collect();
    assert_eq!(
        filters,
        vec![
            "||ads.example.com/",
            "||tracker.example.net/",
            "||metrics.example.co.uk/"
        ]
    );
    assert_eq!(
        conversion.rules.iter().map(|r| r.id).collect::<Vec<_>>(),
        vec![1, 2, 3]
    );
    assert_eq!(conversion.stats.comment_lines, 2);
    assert_eq!(conversion.stats.skipped_lines, 5);
}

#[test]
fn test_check_agrees_with_conversion() {
    let engine = ConversionEngine::default();
    let conversion = engine.convert(SAMPLE_LIST);
    let diagnostics =
        ListValidator::new(engine.classifier(), engine.builder()).check_list(SAMPLE_LIST);

    let skipped = diagnostics
        .iter()
        .filter(|d| d.severity == Severity::Skipped)
        .count();
    assert_eq!(skipped, conversion.stats.skipped_lines);
}

#[test]
fn test_config_driven_conversion() {
    let td = tempfile::tempdir().unwrap();
    let config_path = td.path().join("converter.yaml");

    let manager = ConfigManager::new_at(&config_path);
    manager.initialize().unwrap();
    let mut config = manager.load_config().unwrap();
    config.rules.resource_types = vec![ResourceType::Image, ResourceType::Script];
    config.output.max_rules = Some(2);
    manager.save_config(&config).unwrap();

    let input = td.path().join("list.txt");
    let output = td.path().join("rules.json");
    fs::write(&input, SAMPLE_LIST).unwrap();

    utils::convert_list(
        input.to_str().unwrap(),
        Some(output.to_str().unwrap()),
        &ConvertOptions {
            config: Some(config_path.to_str().unwrap().to_string()),
            ..ConvertOptions::default()
        },
    )
    .unwrap();

    let value: Value = serde_json::from_str(&fs::read_to_string(&output).unwrap()).unwrap();
    let rules = value.as_array().unwrap();
    assert_eq!(rules.len(), 2);
    assert_eq!(
        rules[0]["condition"]["resourceTypes"],
        serde_json::json!(["image", "script"])
    );
}

#[test]
fn test_builder_state_is_threaded_explicitly() {
    let builder = RuleBuilder::new(RulePolicy::default());
    let classifier = LineClassifier::new();

    let mut next_id = 1;
    let mut produced = Vec::new();
    for line in classifier.candidates("||a.com^\nnope\n||b.com^") {
        if let Some((rule, following)) = builder.build(line.text, next_id) {
            produced.push(rule.id);
            next_id = following;
        }
    }
    assert_eq!(produced, vec![1, 2]);
    assert_eq!(next_id, 3);
}

#[test]
fn test_concurrent_runs_are_independent() {
    let handles: Vec<_> = (0..4)
        .map(|n| {
            thread::spawn(move || {
                let list: String = (0..=n).map(|i| format!("||host{i}.example^\n")).collect();
                filterlist_dnr::transform(&list)
            })
        })
        .collect();

    for (n, handle) in handles.into_iter().enumerate() {
        let json = handle.join().unwrap();
        let value: Value = serde_json::from_str(&json).unwrap();
        let ids: Vec<u64> = value
            .as_array()
            .unwrap()
            .iter()
            .map(|r| r["id"].as_u64().unwrap())
            .collect();
        assert_eq!(ids, (1..=n as u64 + 1).collect::<Vec<_>>());
    }
}

#[test]
fn test_shared_engine_pretty_output() {
    let engine = ConversionEngine::new(RulePolicy::default(), JsonStyle::Pretty, None);
    let first = engine.transform("||a.com^").unwrap();
    let second = engine.transform("||a.com^").unwrap();
    assert_eq!(first, second);
    assert!(first.contains("\n  {"));
}
