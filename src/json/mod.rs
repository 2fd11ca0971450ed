//! Purpose: Internal JSON parsing boundary shared by CLI and tests.
//! Exports: `parse` module with decode helpers and failure categorization.
//! Role: Single seam for the JSON text parser so callsites avoid ad hoc
//! Role: decode logic and produce uniform diagnostics.
//! Invariants: Tree construction and re-serialization stay behind serde_json;
//! Invariants: this crate never hand-parses JSON text.

pub mod parse;
