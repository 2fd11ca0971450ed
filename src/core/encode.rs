//! Purpose: Turn a JSON tree into the ordered command script that rebuilds it.
//! Exports: `Command`, `encode`, `render_script`, `sanitize_token`.
//! Role: Encoder half of the flat-namespace codec; pure, no I/O.
//! Invariants: Traversal is depth-first pre-order; objects keep insertion
//! Invariants: order, arrays emit decimal indexes as child tokens.
//! Invariants: A failed encode yields no command stream at all.

use std::fmt;

use serde_json::{Map, Value};

use crate::core::error::{Error, ErrorKind};
use crate::core::escape::escape_single_quotes;

/// One line of the reconstruction script.
///
/// String payloads are stored raw; quoting and escaping happen at render time
/// so the in-memory stream stays comparable against source values.
#[derive(Clone, Debug, PartialEq)]
pub enum Command {
    Init,
    OpenObject { key: String },
    OpenArray { key: String },
    PutString { key: String, value: String },
    PutInt { key: String, value: i64 },
    PutDouble { key: String, value: f64 },
    PutBoolean { key: String, value: bool },
    PutNull { key: String },
    CloseObject,
    CloseArray,
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Command::Init => write!(f, "init;"),
            Command::OpenObject { key } => write!(f, "add_object '{key}';"),
            Command::OpenArray { key } => write!(f, "add_array '{key}';"),
            Command::PutString { key, value } => {
                write!(f, "add_string '{key}' '{}';", escape_single_quotes(value))
            }
            Command::PutInt { key, value } => write!(f, "add_int '{key}' {value};"),
            // Fixed six fractional digits, matching the default-precision
            // fidelity bound the decoder's float parse accepts.
            Command::PutDouble { key, value } => write!(f, "add_double '{key}' {value:.6};"),
            Command::PutBoolean { key, value } => {
                write!(f, "add_boolean '{key}' {};", u8::from(*value))
            }
            Command::PutNull { key } => write!(f, "add_null '{key}';"),
            Command::CloseObject => write!(f, "close_object;"),
            Command::CloseArray => write!(f, "close_array;"),
        }
    }
}

/// Replace every character outside `[A-Za-z0-9_]` with `_`.
///
/// One-directional on purpose: namespace producers restore the original
/// object key through a name-override entry, not by inverting this.
pub fn sanitize_token(key: &str) -> String {
    key.chars()
        .map(|ch| {
            if ch.is_ascii_alphanumeric() || ch == '_' {
                ch
            } else {
                '_'
            }
        })
        .collect()
}

enum Task<'a> {
    Visit { token: String, value: &'a Value },
    Close(Command),
}

/// Encode a JSON tree rooted at an object into its command stream.
///
/// Uses an explicit work stack instead of call recursion, so input nesting
/// depth is bounded by heap, not by the thread stack.
pub fn encode(root: &Value) -> Result<Vec<Command>, Error> {
    let Value::Object(entries) = root else {
        return Err(Error::new(ErrorKind::Structural)
            .with_message("top-level JSON value must be an object"));
    };

    let mut commands = vec![Command::Init];
    let mut stack: Vec<Task<'_>> = Vec::new();
    push_object_children(entries, &mut stack);

    while let Some(task) = stack.pop() {
        match task {
            Task::Close(command) => commands.push(command),
            Task::Visit { token, value } => visit(token, value, &mut commands, &mut stack)?,
        }
    }

    Ok(commands)
}

/// Render a command stream as the newline-terminated script text.
pub fn render_script(commands: &[Command]) -> String {
    use fmt::Write;

    let mut out = String::new();
    for command in commands {
        let _ = writeln!(out, "{command}");
    }
    out
}

fn push_object_children<'a>(entries: &'a Map<String, Value>, stack: &mut Vec<Task<'a>>) {
    for (key, value) in entries.iter().rev() {
        stack.push(Task::Visit {
            token: sanitize_token(key),
            value,
        });
    }
}

fn push_array_children<'a>(items: &'a [Value], stack: &mut Vec<Task<'a>>) {
    for (index, value) in items.iter().enumerate().rev() {
        stack.push(Task::Visit {
            token: index.to_string(),
            value,
        });
    }
}

fn visit<'a>(
    token: String,
    value: &'a Value,
    commands: &mut Vec<Command>,
    stack: &mut Vec<Task<'a>>,
) -> Result<(), Error> {
    match value {
        Value::Object(entries) => {
            commands.push(Command::OpenObject { key: token });
            stack.push(Task::Close(Command::CloseObject));
            push_object_children(entries, stack);
        }
        Value::Array(items) => {
            commands.push(Command::OpenArray { key: token });
            stack.push(Task::Close(Command::CloseArray));
            push_array_children(items, stack);
        }
        Value::String(text) => commands.push(Command::PutString {
            key: token,
            value: text.clone(),
        }),
        Value::Bool(flag) => commands.push(Command::PutBoolean {
            key: token,
            value: *flag,
        }),
        Value::Null => commands.push(Command::PutNull { key: token }),
        Value::Number(number) => {
            if let Some(int) = number.as_i64() {
                commands.push(Command::PutInt {
                    key: token,
                    value: int,
                });
            } else if number.is_u64() {
                // u64 beyond i64::MAX has no slot in the seven-kind model.
                return Err(Error::new(ErrorKind::Structural).with_message(format!(
                    "integer {number} does not fit the signed 64-bit value model"
                )));
            } else if let Some(float) = number.as_f64() {
                commands.push(Command::PutDouble {
                    key: token,
                    value: float,
                });
            } else {
                return Err(Error::new(ErrorKind::Structural)
                    .with_message(format!("unsupported numeric value {number}")));
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{Command, encode, render_script, sanitize_token};

    #[test]
    fn worked_example_emits_exact_sequence() {
        let tree = json!({"a": 1, "b": [true, null]});
        let commands = encode(&tree).expect("encode");
        let script = render_script(&commands);
        assert_eq!(
            script,
            "init;\n\
             add_int 'a' 1;\n\
             add_array 'b';\n\
             add_boolean '0' 1;\n\
             add_null '1';\n\
             close_array;\n"
        );
    }

    #[test]
    fn non_object_root_is_rejected_before_output() {
        for tree in [json!([1, 2]), json!("text"), json!(3), json!(null)] {
            let err = encode(&tree).expect_err("non-object root");
            assert_eq!(err.kind(), crate::core::error::ErrorKind::Structural);
        }
    }

    #[test]
    fn u64_overflow_is_a_structural_error() {
        let tree = json!({"big": 18446744073709551615u64});
        let err = encode(&tree).expect_err("overflow");
        assert_eq!(err.kind(), crate::core::error::ErrorKind::Structural);
    }

    #[test]
    fn object_keys_are_sanitized_in_emitted_tokens() {
        let tree = json!({"dot.ted-key": "v"});
        let commands = encode(&tree).expect("encode");
        assert_eq!(
            commands[1],
            Command::PutString {
                key: "dot_ted_key".to_string(),
                value: "v".to_string(),
            }
        );
    }

    #[test]
    fn string_payloads_are_quoted_and_escaped() {
        let tree = json!({"msg": "it's fine"});
        let commands = encode(&tree).expect("encode");
        let script = render_script(&commands);
        assert!(script.contains("add_string 'msg' 'it'\\''s fine';"));
    }

    #[test]
    fn nested_containers_close_in_reverse_open_order() {
        let tree = json!({"outer": {"inner": [1]}});
        let commands = encode(&tree).expect("encode");
        let script = render_script(&commands);
        assert_eq!(
            script,
            "init;\n\
             add_object 'outer';\n\
             add_array 'inner';\n\
             add_int '0' 1;\n\
             close_array;\n\
             close_object;\n"
        );
    }

    #[test]
    fn doubles_render_with_fixed_precision() {
        let tree = json!({"x": 1.5});
        let commands = encode(&tree).expect("encode");
        let script = render_script(&commands);
        assert!(script.contains("add_double 'x' 1.500000;"));
    }

    #[test]
    fn negative_int_and_empty_containers() {
        let tree = json!({"n": -7, "o": {}, "a": []});
        let commands = encode(&tree).expect("encode");
        let script = render_script(&commands);
        assert_eq!(
            script,
            "init;\n\
             add_int 'n' -7;\n\
             add_object 'o';\n\
             close_object;\n\
             add_array 'a';\n\
             close_array;\n"
        );
    }

    #[test]
    fn deep_nesting_does_not_recurse() {
        // Far past the JSON parser's own depth limit; a call-recursive
        // encoder would exhaust the test thread's stack here.
        let mut tree = json!({});
        for _ in 0..2048 {
            tree = json!({ "child": tree });
        }
        let commands = encode(&tree).expect("encode");
        assert_eq!(commands.len(), 1 + 2 * 2048);
    }

    #[test]
    fn sanitize_keeps_word_chars_only() {
        assert_eq!(sanitize_token("plain_Key9"), "plain_Key9");
        assert_eq!(sanitize_token("a.b c/d"), "a_b_c_d");
        assert_eq!(sanitize_token(""), "");
        assert_eq!(sanitize_token("héllo"), "h_llo");
    }
}
