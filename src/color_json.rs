//! Purpose: Render pretty JSON with optional ANSI colorization for CLI output.
//! Exports: `colorize_json`.
//! Role: Small, pure formatter used by the decode emission path.
//! Invariants: When color is disabled, output equals serde_json::to_string_pretty.
//! Invariants: ANSI escapes appear only when explicitly enabled.
use serde_json::Value;

const INDENT: &str = "  ";

// Conservative 8/16-color palette for broad terminal compatibility.
const KEY_COLOR: &str = "36";
const STRING_COLOR: &str = "32";
const NUMBER_COLOR: &str = "33";
const BOOL_COLOR: &str = "35";
const PLAIN: &str = "39";

pub fn colorize_json(value: &Value, use_color: bool) -> String {
    let mut painter = Painter {
        color: use_color,
        out: String::new(),
    };
    painter.paint(value, 0);
    painter.out
}

struct Painter {
    color: bool,
    out: String,
}

impl Painter {
    fn paint(&mut self, value: &Value, indent: usize) {
        match value {
            Value::Null => self.colored("null", PLAIN),
            Value::Bool(flag) => {
                let text = if *flag { "true" } else { "false" };
                self.colored(text, BOOL_COLOR);
            }
            Value::Number(number) => self.colored(&number.to_string(), NUMBER_COLOR),
            Value::String(text) => {
                let encoded =
                    serde_json::to_string(text).unwrap_or_else(|_| "\"\"".to_string());
                self.colored(&encoded, STRING_COLOR);
            }
            Value::Array(items) => self.paint_array(items, indent),
            Value::Object(entries) => self.paint_object(entries, indent),
        }
    }

    fn paint_array(&mut self, items: &[Value], indent: usize) {
        if items.is_empty() {
            self.colored("[]", PLAIN);
            return;
        }
        self.colored("[", PLAIN);
        for (index, item) in items.iter().enumerate() {
            self.break_line(indent + 1);
            self.paint(item, indent + 1);
            if index + 1 < items.len() {
                self.colored(",", PLAIN);
            }
        }
        self.break_line(indent);
        self.colored("]", PLAIN);
    }

    fn paint_object(&mut self, entries: &serde_json::Map<String, Value>, indent: usize) {
        if entries.is_empty() {
            self.colored("{}", PLAIN);
            return;
        }
        self.colored("{", PLAIN);
        for (index, (key, item)) in entries.iter().enumerate() {
            self.break_line(indent + 1);
            let encoded = serde_json::to_string(key).unwrap_or_else(|_| "\"\"".to_string());
            self.colored(&encoded, KEY_COLOR);
            self.colored(":", PLAIN);
            self.out.push(' ');
            self.paint(item, indent + 1);
            if index + 1 < entries.len() {
                self.colored(",", PLAIN);
            }
        }
        self.break_line(indent);
        self.colored("}", PLAIN);
    }

    fn break_line(&mut self, indent: usize) {
        self.out.push('\n');
        for _ in 0..indent {
            self.out.push_str(INDENT);
        }
    }

    fn colored(&mut self, text: &str, code: &str) {
        if self.color {
            self.out.push_str("\u{1b}[");
            self.out.push_str(code);
            self.out.push('m');
            self.out.push_str(text);
            self.out.push_str("\u{1b}[0m");
        } else {
            self.out.push_str(text);
        }
    }
}
