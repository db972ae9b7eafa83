//! Property-based tests - generated acyclic trees must serialize exactly
//! as serde_json would, and injecting a cycle anywhere must still give
//! terminating, decodable output.

use proptest::prelude::*;
use safe_json::{to_string, to_string_with, Map, Spacing, Value, CIRCULAR};

/// Structural conversion for acyclic graphs, the expected output model.
fn to_expected(value: &Value) -> serde_json::Value {
    match value {
        Value::Null => serde_json::Value::Null,
        Value::Bool(b) => serde_json::Value::Bool(*b),
        Value::Number(n) => match n.as_i64() {
            Some(i) => serde_json::Value::from(i),
            None => serde_json::Value::Null,
        },
        Value::String(s) => serde_json::Value::from(s.clone()),
        Value::Array(items) => {
            serde_json::Value::Array(items.borrow().iter().map(to_expected).collect())
        }
        Value::Object(map) => serde_json::Value::Object(
            map.borrow()
                .iter()
                .map(|(k, v)| (k.clone(), to_expected(v)))
                .collect(),
        ),
        other => unreachable!("strategy does not generate {:?}", other),
    }
}

fn value_strategy() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        any::<i64>().prop_map(Value::from),
        "[a-z]{0,8}".prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 32, 6, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..6).prop_map(Value::from),
            prop::collection::vec(("[a-z]{1,6}", inner), 0..6).prop_map(|members| {
                let mut map = Map::new();
                for (key, value) in members {
                    map.insert(key, value);
                }
                Value::from(map)
            }),
        ]
    })
}

proptest! {
    #[test]
    fn prop_acyclic_matches_serde_json(value in value_strategy()) {
        let ours = to_string(&value).unwrap();
        let expected = serde_json::to_string(&to_expected(&value)).unwrap();
        prop_assert_eq!(ours, expected);
    }

    #[test]
    fn prop_pretty_output_is_passthrough(value in value_strategy(), indent in 1usize..8) {
        let ours = to_string_with(&value, |_, v, _| Some(v), Spacing::Spaces(indent)).unwrap();

        let mut buffer = Vec::new();
        let indent_text = " ".repeat(indent);
        let formatter = serde_json::ser::PrettyFormatter::with_indent(indent_text.as_bytes());
        let mut serializer = serde_json::Serializer::with_formatter(&mut buffer, formatter);
        serde::Serialize::serialize(&to_expected(&value), &mut serializer).unwrap();

        prop_assert_eq!(ours, String::from_utf8(buffer).unwrap());
    }

    #[test]
    fn prop_cycle_injection_terminates(value in value_strategy()) {
        // Wrap the generated tree in an object that contains itself; the
        // serializer must terminate and produce decodable output with the
        // sentinel at the self-reference.
        let root = Value::new_object();
        root.insert("tree", value);
        root.insert("cycle", root.clone());

        let out = to_string(&root).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&out).unwrap();
        prop_assert_eq!(decoded.get("cycle"), Some(&serde_json::Value::from(CIRCULAR)));
    }

    #[test]
    fn prop_shared_subtree_serializes_twice(value in value_strategy()) {
        // The same instance at two sibling positions is emitted fully at
        // both, never as the sentinel.
        let root = Value::new_object();
        root.insert("left", value.clone());
        root.insert("right", value.clone());

        let out = to_string(&root).unwrap();
        let decoded: serde_json::Value = serde_json::from_str(&out).unwrap();
        let expected = to_expected(&value);
        prop_assert_eq!(decoded.get("left"), Some(&expected));
        prop_assert_eq!(decoded.get("right"), Some(&expected));
    }

    #[test]
    fn prop_depth_matches_ancestor_count(value in value_strategy()) {
        // Recorded depths never exceed the longest possible path, and the
        // root always reports depth 0.
        let mut max_depth = 0usize;
        let mut root_depth = None;
        to_string_with(
            &value,
            |key, v, depth| {
                max_depth = max_depth.max(depth);
                if key.is_empty() {
                    root_depth = Some(depth);
                }
                Some(v)
            },
            Spacing::None,
        )
        .unwrap();

        prop_assert_eq!(root_depth, Some(0));
        prop_assert!(max_depth <= 5); // recursion depth bound of the strategy
    }
}
