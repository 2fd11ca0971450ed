// Round-trip coverage: encode a tree, replay the command stream into a
// namespace the way a host-side interpreter would, decode, compare.
use std::collections::HashMap;

use serde_json::{Value, json};

use envjson::api::{Command, DecodeOptions, Namespace, decode, decode_with_report, encode};

/// Minimal host-side interpreter: applies a command stream to a flat
/// variable store, producing the namespace a decoder would later read.
fn materialize(commands: &[Command]) -> Namespace {
    let mut vars: HashMap<String, String> = HashMap::new();
    let mut stack: Vec<String> = Vec::new();

    let declare = |vars: &mut HashMap<String, String>, stack: &[String], key: &str, tag: &str| {
        let current = stack.last().expect("container open");
        let list = vars.entry(format!("K_{current}")).or_default();
        if !list.is_empty() {
            list.push(' ');
        }
        list.push_str(key);
        vars.insert(format!("T_{current}_{key}"), tag.to_string());
    };
    let set = |vars: &mut HashMap<String, String>, stack: &[String], key: &str, value: String| {
        let current = stack.last().expect("container open");
        vars.insert(format!("{current}_{key}"), value);
    };

    for command in commands {
        match command {
            Command::Init => {
                stack.clear();
                stack.push("J_V".to_string());
            }
            Command::OpenObject { key } => {
                declare(&mut vars, &stack, key, "object");
                let current = stack.last().expect("container open").clone();
                stack.push(format!("{current}_{key}"));
            }
            Command::OpenArray { key } => {
                declare(&mut vars, &stack, key, "array");
                let current = stack.last().expect("container open").clone();
                stack.push(format!("{current}_{key}"));
            }
            Command::PutString { key, value } => {
                declare(&mut vars, &stack, key, "string");
                set(&mut vars, &stack, key, value.clone());
            }
            Command::PutInt { key, value } => {
                declare(&mut vars, &stack, key, "int");
                set(&mut vars, &stack, key, value.to_string());
            }
            Command::PutDouble { key, value } => {
                declare(&mut vars, &stack, key, "double");
                set(&mut vars, &stack, key, format!("{value:.6}"));
            }
            Command::PutBoolean { key, value } => {
                declare(&mut vars, &stack, key, "boolean");
                set(&mut vars, &stack, key, u8::from(*value).to_string());
            }
            Command::PutNull { key } => {
                declare(&mut vars, &stack, key, "null");
            }
            Command::CloseObject | Command::CloseArray => {
                stack.pop();
            }
        }
    }

    vars.into_iter().collect()
}

fn roundtrip(tree: &Value) -> Value {
    let commands = encode(tree).expect("encode");
    let namespace = materialize(&commands);
    decode(&namespace, &DecodeOptions::default())
}

/// Structural equality plus serialized equality, so key order counts.
fn assert_roundtrip(tree: Value) {
    let decoded = roundtrip(&tree);
    assert_eq!(decoded, tree);
    assert_eq!(
        serde_json::to_string(&decoded).expect("serialize"),
        serde_json::to_string(&tree).expect("serialize")
    );
}

#[test]
fn worked_example_round_trips() {
    assert_roundtrip(json!({"a": 1, "b": [true, null]}));
}

#[test]
fn all_seven_types_survive() {
    assert_roundtrip(json!({
        "null_v": null,
        "bool_t": true,
        "bool_f": false,
        "int_v": -922337,
        "double_v": 0.25,
        "string_v": "plain text",
        "array_v": [1, "two", 3.5],
        "object_v": {"inner": null}
    }));
}

#[test]
fn object_key_order_is_preserved() {
    assert_roundtrip(json!({"zebra": 1, "apple": 2, "mango": 3}));
}

#[test]
fn array_order_is_preserved() {
    assert_roundtrip(json!({"seq": ["c", "a", "b", "a"]}));
}

#[test]
fn strings_with_quotes_and_newlines_survive() {
    assert_roundtrip(json!({
        "quoted": "it's a 'test'",
        "multiline": "line one\nline two",
        "empty": "",
        "only_quotes": "'''"
    }));
}

#[test]
fn nested_containers_survive() {
    assert_roundtrip(json!({
        "a": {"b": {"c": {"d": [[1], [2, [3]]]}}},
        "tail": "end"
    }));
}

#[test]
fn extreme_integers_survive() {
    assert_roundtrip(json!({"min": i64::MIN, "max": i64::MAX, "zero": 0}));
}

#[test]
fn doubles_round_trip_within_default_precision() {
    let tree = json!({"pi": std::f64::consts::PI});
    let decoded = roundtrip(&tree);
    let pi = decoded["pi"].as_f64().expect("double");
    assert!((pi - std::f64::consts::PI).abs() < 1e-6);
}

#[test]
fn clean_round_trip_reports_no_gaps() {
    let tree = json!({"a": [1, {"b": "c"}], "d": null});
    let commands = encode(&tree).expect("encode");
    let namespace = materialize(&commands);
    let report = decode_with_report(&namespace, &DecodeOptions::default());
    assert_eq!(report.value, tree);
    assert!(report.gaps.is_empty());
}

#[test]
fn empty_root_round_trips_to_empty_object() {
    assert_roundtrip(json!({}));
    assert_roundtrip(json!({"empty_obj": {}, "empty_arr": []}));
}
