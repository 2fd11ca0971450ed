//! Purpose: Decode JSON text and map parser failures to stable categories.
//! Exports: `from_str`, `ParseFailureCategory`, `categorize_error`,
//! Exports: `categorize_message`, `hint_for_error`.
//! Role: Parser boundary that centralizes serde_json usage details.
//! Invariants: Category labels are stable; hints are derived, never stored.
//! Invariants: This module stays self-contained (serde/serde_json only).

use serde::de::DeserializeOwned;
use serde_json::error::Category;

pub fn from_str<T: DeserializeOwned>(input: &str) -> Result<T, serde_json::Error> {
    serde_json::from_str(input)
}

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum ParseFailureCategory {
    Syntax,
    Eof,
    Data,
    NumberRange,
    DepthLimit,
}

impl ParseFailureCategory {
    pub fn label(self) -> &'static str {
        match self {
            ParseFailureCategory::Syntax => "syntax error",
            ParseFailureCategory::Eof => "unexpected end of input",
            ParseFailureCategory::Data => "mismatched data shape",
            ParseFailureCategory::NumberRange => "number out of range",
            ParseFailureCategory::DepthLimit => "nesting too deep",
        }
    }
}

pub fn categorize_error(err: &serde_json::Error) -> ParseFailureCategory {
    match err.classify() {
        Category::Eof => ParseFailureCategory::Eof,
        Category::Data => ParseFailureCategory::Data,
        Category::Syntax | Category::Io => categorize_message(&err.to_string()),
    }
}

// serde_json folds range and depth failures into Syntax; the message text is
// the only discriminator it exposes.
pub fn categorize_message(message: &str) -> ParseFailureCategory {
    if message.contains("recursion limit") {
        ParseFailureCategory::DepthLimit
    } else if message.contains("number out of range") {
        ParseFailureCategory::NumberRange
    } else {
        ParseFailureCategory::Syntax
    }
}

pub fn hint_for_error(err: &serde_json::Error, context: &str) -> String {
    let category = categorize_error(err);
    format!(
        "JSON {} in {context} at line {}, column {}.",
        category.label(),
        err.line(),
        err.column()
    )
}

#[cfg(test)]
mod tests {
    use serde_json::Value;

    use super::{ParseFailureCategory, categorize_error, from_str};

    #[test]
    fn well_formed_document_decodes() {
        let value: Value = from_str(r#"{"a":[1,2.5,"x"]}"#).expect("valid json");
        assert_eq!(value["a"][1], 2.5);
    }

    #[test]
    fn syntax_failure_categorizes_as_syntax() {
        let err = from_str::<Value>(r#"{"a":}"#).expect_err("syntax error");
        assert_eq!(categorize_error(&err), ParseFailureCategory::Syntax);
    }

    #[test]
    fn truncated_document_categorizes_as_eof() {
        let err = from_str::<Value>(r#"{"a": "#).expect_err("eof error");
        assert_eq!(categorize_error(&err), ParseFailureCategory::Eof);
    }
}
