//! Purpose: Rebuild a JSON tree from a flat namespace snapshot.
//! Exports: `DecodeOptions`, `DecodeReport`, `Gap`, `GapReason`, `decode`,
//! Exports: `decode_with_report`, `ROOT_PREFIX`.
//! Role: Decoder half of the flat-namespace codec; pure over its snapshot.
//! Invariants: Decoding never fails; undeclared or malformed children only
//! Invariants: shrink the result and are recorded as gaps for strict mode.
//! Invariants: Lookup cost tracks declared child counts, never namespace size.

use serde::Serialize;
use serde_json::{Map, Value};

use crate::core::namespace::Namespace;

/// Namespace prefix addressing the document root.
pub const ROOT_PREFIX: &str = "J_V";

// Bounded-recursion guard: deeper containers are left empty instead of
// growing the call stack without limit.
const MAX_DEPTH: usize = 128;

#[derive(Clone, Debug)]
pub struct DecodeOptions {
    /// Prefix of the root container's key-list entry.
    pub root_prefix: String,
    /// Fixed string prepended to every namespace key looked up.
    pub global_prefix: String,
}

impl Default for DecodeOptions {
    fn default() -> Self {
        Self {
            root_prefix: ROOT_PREFIX.to_string(),
            global_prefix: String::new(),
        }
    }
}

/// A declared child that was skipped or degraded while decoding.
#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct Gap {
    pub prefix: String,
    pub token: String,
    pub reason: GapReason,
}

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum GapReason {
    MissingType,
    MissingValue,
    UnknownTag,
    InvalidNumber,
    DepthExceeded,
}

#[derive(Clone, Debug)]
pub struct DecodeReport {
    pub value: Value,
    pub gaps: Vec<Gap>,
}

/// Decode the namespace into a JSON object, best-effort.
pub fn decode(namespace: &Namespace, options: &DecodeOptions) -> Value {
    decode_with_report(namespace, options).value
}

/// Decode and also report every token that could not be honored verbatim.
///
/// The returned value is identical to what [`decode`] produces; the gap list
/// only adds visibility for callers that opt into strict validation.
pub fn decode_with_report(namespace: &Namespace, options: &DecodeOptions) -> DecodeReport {
    let mut root = Value::Object(Map::new());
    let mut gaps = Vec::new();
    expand(
        namespace,
        &options.global_prefix,
        &options.root_prefix,
        &mut root,
        1,
        &mut gaps,
    );
    DecodeReport { value: root, gaps }
}

fn lookup<'a>(namespace: &'a Namespace, global_prefix: &str, key: &str) -> Option<&'a str> {
    namespace.get(&format!("{global_prefix}{key}"))
}

fn expand(
    namespace: &Namespace,
    global_prefix: &str,
    prefix: &str,
    container: &mut Value,
    depth: usize,
    gaps: &mut Vec<Gap>,
) {
    // Absent key-list: the container legitimately has no children.
    let Some(keys) = lookup(namespace, global_prefix, &format!("K_{prefix}")) else {
        return;
    };

    // Tokens are honored verbatim and in order; duplicates are not collapsed.
    for token in keys.split(' ').filter(|token| !token.is_empty()) {
        let child_prefix = format!("{prefix}_{token}");
        let gap = |reason: GapReason| Gap {
            prefix: prefix.to_string(),
            token: token.to_string(),
            reason,
        };

        let Some(type_tag) = lookup(namespace, global_prefix, &format!("T_{child_prefix}")) else {
            gaps.push(gap(GapReason::MissingType));
            continue;
        };
        let payload = lookup(namespace, global_prefix, &child_prefix);
        let name_override = lookup(namespace, global_prefix, &format!("N_{child_prefix}"));

        let decoded = match type_tag {
            "object" | "array" => {
                let mut child = if type_tag == "object" {
                    Value::Object(Map::new())
                } else {
                    Value::Array(Vec::new())
                };
                if depth >= MAX_DEPTH {
                    gaps.push(gap(GapReason::DepthExceeded));
                } else {
                    expand(
                        namespace,
                        global_prefix,
                        &child_prefix,
                        &mut child,
                        depth + 1,
                        gaps,
                    );
                }
                Some(child)
            }
            "string" => match payload {
                Some(text) => Some(Value::String(text.to_string())),
                None => {
                    gaps.push(gap(GapReason::MissingValue));
                    None
                }
            },
            "int" => match payload {
                Some(text) => Some(Value::from(parse_int(text, || gap(GapReason::InvalidNumber), gaps))),
                None => {
                    gaps.push(gap(GapReason::MissingValue));
                    None
                }
            },
            "double" => match payload {
                Some(text) => {
                    let float = match text.parse::<f64>() {
                        Ok(float) => float,
                        Err(_) => {
                            gaps.push(gap(GapReason::InvalidNumber));
                            0.0
                        }
                    };
                    // Non-finite text like "inf" has no JSON rendering; it
                    // collapses to zero like any other unusable number.
                    let number = serde_json::Number::from_f64(float)
                        .unwrap_or_else(|| serde_json::Number::from(0));
                    Some(Value::Number(number))
                }
                None => {
                    gaps.push(gap(GapReason::MissingValue));
                    None
                }
            },
            "boolean" => match payload {
                Some(text) => {
                    let truth = parse_int(text, || gap(GapReason::InvalidNumber), gaps) != 0;
                    Some(Value::Bool(truth))
                }
                None => {
                    gaps.push(gap(GapReason::MissingValue));
                    None
                }
            },
            "null" => Some(Value::Null),
            _ => {
                gaps.push(gap(GapReason::UnknownTag));
                None
            }
        };

        let Some(decoded) = decoded else {
            continue;
        };

        match container {
            Value::Object(entries) => {
                let key = name_override.unwrap_or(token);
                entries.insert(key.to_string(), decoded);
            }
            // Positional insertion; name overrides do not apply to arrays.
            Value::Array(items) => items.push(decoded),
            _ => {}
        }
    }
}

fn parse_int(text: &str, gap: impl FnOnce() -> Gap, gaps: &mut Vec<Gap>) -> i64 {
    match text.parse::<i64>() {
        Ok(value) => value,
        Err(_) => {
            gaps.push(gap());
            0
        }
    }
}
