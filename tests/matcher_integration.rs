//! End-to-end assertion scenarios through the public API.

use affirm::matchers::{primitives, strings};
use affirm::object::PropertyMatcher;
use affirm::{absent, all_of_boxed, assert_that, fields, list, matchers, not, verify};

#[derive(Debug)]
struct LogEntry {
    level: String,
    message: String,
    attempt: Option<u32>,
}
fields!(LogEntry { level, message, attempt: option });

fn entry(level: &str, message: &str) -> LogEntry {
    LogEntry {
        level: level.to_string(),
        message: message.to_string(),
        attempt: None,
    }
}

#[test]
fn test_asserting_on_a_string() {
    assert_that(
        &"2026-08-25T10:00:00Z".to_string(),
        &all_of_boxed(matchers![
            strings::starts_with("2026-"),
            strings::ends_with("Z"),
            strings::of_length(20),
        ]),
    );
}

#[test]
fn test_asserting_on_an_object() {
    let warn = entry("warn", "disk usage at 91%");
    assert_that(
        &warn,
        &PropertyMatcher::<LogEntry>::new()
            .with_property("level", strings::equal_to("warn"))
            .with_property("message", strings::contains("disk"))
            .with_optional_property("attempt", absent::<u32>()),
    );
}

#[test]
fn test_asserting_on_a_list_of_objects() {
    let entries = vec![entry("info", "starting up"), entry("error", "bind failed")];
    assert_that(
        &entries,
        &list::in_order_only(matchers![
            PropertyMatcher::<LogEntry>::new()
                .with_property("level", strings::equal_to("info")),
            PropertyMatcher::<LogEntry>::new()
                .with_property("level", strings::equal_to("error"))
                .with_property("message", strings::contains("bind")),
        ]),
    );
}

#[test]
fn test_failure_message_carries_the_nested_path() {
    let entries = vec![entry("info", "starting up"), entry("error", "bind failed")];
    let err = verify(
        &entries,
        &list::in_order_only(matchers![
            PropertyMatcher::<LogEntry>::new()
                .with_property("level", strings::equal_to("info")),
            PropertyMatcher::<LogEntry>::new()
                .with_property("message", strings::contains("timeout")),
        ]),
    )
    .expect_err("should mismatch");

    // the trace walks from list position to property to expectation
    assert!(err.trace.contains("[1]: Mismatch!"));
    assert!(err.trace.contains("message: Mismatch!"));
    assert!(err.trace.contains("\"timeout\""));
    assert!(err.trace.contains("\"bind failed\""));
}

#[test]
#[should_panic(expected = "assertion failed:")]
fn test_assert_that_panics_with_trace() {
    assert_that(&vec![1, 2], &list::no_items::<i32>());
}

#[test]
fn test_negation_and_counts() {
    let empty: Vec<String> = Vec::new();
    assert_that(&empty, &list::no_items::<String>());
    assert_that(
        &vec!["a".to_string(), "b".to_string()],
        &list::with_num_items::<String>(primitives::in_range(1_usize, 3_usize)),
    );
    assert_that(&"loaded 3 plugins".to_string(), &not(strings::blank()));
}

#[test]
fn test_any_order_assertions() {
    let names = vec![
        "charlie".to_string(),
        "alpha".to_string(),
        "bravo".to_string(),
    ];
    assert_that(
        &names,
        &list::in_any_order_only(matchers![
            strings::equal_to("alpha"),
            strings::equal_to("bravo"),
            strings::equal_to("charlie"),
        ]),
    );
    assert_that(
        &names,
        &list::in_any_order_at_least(matchers![strings::starts_with("al")]),
    );
}

#[cfg(feature = "json")]
mod json_scenarios {
    use affirm::matchers::json;
    use affirm::{assert_that, entries, list, matchers, verify};
    use serde_json::json as j;

    #[test]
    fn test_asserting_on_json_events() {
        let events = vec![
            j!({"kind": "open", "path": "/etc/app.toml"}),
            j!({"kind": "close", "path": "/etc/app.toml"}),
        ];
        assert_that(
            &events,
            &list::in_order_only(matchers![
                json::entries_matching(entries! { "kind" => "open" }),
                json::entries_matching(entries! { "kind" => "close" }),
            ]),
        );
    }

    #[cfg(feature = "pattern")]
    #[test]
    fn test_json_entries_with_patterns() {
        let event = j!({"path": "/var/log/app.log", "bytes": 4096});
        assert_that(
            &event,
            &json::entries_matching(entries! {
                "path" => "*.log",
                "bytes" => r"^\d+$",
            }),
        );
    }

    #[test]
    fn test_json_mismatch_names_key() {
        let err = verify(
            &j!({"status": "error"}),
            &json::entries_matching(entries! { "status" => "ok" }),
        )
        .expect_err("should mismatch");
        assert!(err.trace.contains("\"status\""));
    }
}

mod properties {
    use affirm::matcher::Matcher;
    use affirm::matchers::primitives;
    use affirm::{list, matchers};
    use proptest::prelude::*;

    proptest! {
        // A permutation of the expected values always satisfies the
        // any-order-only matcher built from equality matchers.
        #[test]
        fn any_order_only_accepts_permutations(values in proptest::collection::vec(0_i64..50, 0..8)) {
            let expected = values.clone();
            let m = list::in_any_order_only(
                expected.iter().map(|v| {
                    Box::new(primitives::equal_to(*v)) as Box<dyn Matcher<i64>>
                }).collect(),
            );
            let mut shuffled = values.clone();
            shuffled.reverse();
            prop_assert!(m.matches_quietly(&shuffled));
        }

        // Padding arbitrary noise around the expected values never breaks
        // an in-order-at-least match, as long as noise cannot collide with
        // the expected values.
        #[test]
        fn in_order_at_least_survives_noise(
            values in proptest::collection::vec(0_i64..50, 1..6),
            noise in proptest::collection::vec(100_i64..200, 0..6),
        ) {
            let m = list::in_order_at_least(
                values.iter().map(|v| {
                    Box::new(primitives::equal_to(*v)) as Box<dyn Matcher<i64>>
                }).collect(),
            );

            let mut padded = Vec::new();
            let mut noise_iter = noise.iter();
            for v in &values {
                if let Some(n) = noise_iter.next() {
                    padded.push(*n);
                }
                padded.push(*v);
            }
            padded.extend(noise_iter);
            prop_assert!(m.matches_quietly(&padded));
        }

        // in-order-only is strict about length.
        #[test]
        fn in_order_only_rejects_length_mismatch(values in proptest::collection::vec(0_i64..50, 1..8)) {
            let m = list::in_order_only(
                values.iter().map(|v| {
                    Box::new(primitives::equal_to(*v)) as Box<dyn Matcher<i64>>
                }).collect(),
            );
            let mut truncated = values.clone();
            truncated.pop();
            prop_assert!(!m.matches_quietly(&truncated));
        }

        // Null diagnostics never change a match outcome.
        #[test]
        fn null_diagnostics_preserve_outcome(value in 0_i64..100, bound in 0_i64..100) {
            let m = primitives::gt(bound);
            let mut recording = affirm::Diagnostics::new();
            let mut null = affirm::Diagnostics::null();
            prop_assert_eq!(
                recording.try_match(&value, &m),
                null.try_match(&value, &m)
            );
        }
    }

    #[test]
    fn matchers_macro_builds_boxed_vec() {
        let boxed = matchers![primitives::equal_to(1), primitives::gt(0)];
        let m = list::in_any_order_at_least(boxed);
        assert!(m.matches_quietly(&vec![1, 5]));
    }
}
