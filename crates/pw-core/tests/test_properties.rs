use std::collections::HashMap;

use pw_core::diff::{diff, resolve};
use pw_core::document::AttributeDocument;
use pw_core::history::{HistoryEntry, HistoryLog};
use pw_core::template::render;

const SAMPLES: &[&str] = &[
    "",
    "just commentary, no attributes",
    "Name: Alice\nAge: 20",
    "A: 1\nB: 2\nA: 3",
    "world\nBio: Hello\nmore\n\n  lines  ",
    "```\n- **Name**: Bob\n* Job: smith: master\n```\nthanks!",
    "Empty:\nAlso Empty:   \n???: junk\ncontinued junk\nReal: yes",
    "姓名：小明\n爱好: 读书\n  写作",
];

#[test]
fn test_parse_serialize_is_idempotent() {
    for raw in SAMPLES {
        let parsed = AttributeDocument::parse(raw);
        let reparsed = AttributeDocument::parse(&parsed.serialize());
        assert_eq!(parsed, reparsed, "round trip changed document for {raw:?}");
    }
}

#[test]
fn test_diff_lists_every_key_once() {
    for old_raw in SAMPLES {
        for new_raw in SAMPLES {
            let old = AttributeDocument::parse(old_raw);
            let new = AttributeDocument::parse(new_raw);
            let records = diff(&old, &new);

            let mut expected: Vec<&str> = old.keys().collect();
            expected.extend(new.keys().filter(|k| !old.contains_key(k)));
            let actual: Vec<&str> = records.iter().map(|r| r.key.as_str()).collect();
            assert_eq!(actual, expected);

            for record in &records {
                assert!(record.old.is_some() || record.new.is_some());
                if record.old == record.new {
                    assert_eq!(record.options.len(), 1);
                }
            }
        }
    }
}

#[test]
fn test_resolve_without_overrides_prefers_new_and_keeps_old_only() {
    for old_raw in SAMPLES {
        for new_raw in SAMPLES {
            let old = AttributeDocument::parse(old_raw);
            let new = AttributeDocument::parse(new_raw);
            let merged = resolve(&diff(&old, &new), &HashMap::new());

            for attr in &new {
                assert_eq!(merged.get(&attr.key), Some(attr.value.as_str()));
            }
            for attr in old.iter().filter(|a| !new.contains_key(&a.key)) {
                assert_eq!(merged.get(&attr.key), Some(attr.value.as_str()));
            }
            assert_eq!(
                merged.len(),
                old.len() + new.keys().filter(|k| !old.contains_key(k)).count()
            );
        }
    }
}

#[test]
fn test_resolved_document_equals_its_reparse() {
    for old_raw in SAMPLES {
        for override_text in SAMPLES {
            let old = AttributeDocument::parse(old_raw);
            let records = diff(&old, &AttributeDocument::parse("Extra: x"));
            let overrides: HashMap<String, String> = records
                .iter()
                .map(|r| (r.key.clone(), override_text.to_string()))
                .collect();

            let merged = resolve(&records, &overrides);
            assert_eq!(
                AttributeDocument::parse(&merged.serialize()),
                merged,
                "override {override_text:?} over {old_raw:?}"
            );
        }
    }
}

#[test]
fn test_history_capacity_property() {
    let capacity = 7;
    let mut log = HistoryLog::new(capacity);
    for i in 0..(capacity + 5) {
        log.append(HistoryEntry::new(format!("e{i}"), "A: 1", None));
    }

    let titles: Vec<String> = log.iter().map(|e| e.title.clone()).collect();
    let expected: Vec<String> = (5..capacity + 5).rev().map(|i| format!("e{i}")).collect();
    assert_eq!(titles, expected);
}

#[test]
fn test_template_values_are_not_expanded() {
    let vars = HashMap::from([("name".to_string(), "{{evil}}".to_string())]);
    assert_eq!(render("Hi {{name}}", &vars), "Hi {{evil}}");
}
