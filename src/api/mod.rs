//! Purpose: Define the stable public Rust API boundary for envjson.
//! Exports: Codec types and operations needed by the CLI and embedders.
//! Role: Public, additive-only surface; shields callers from module layout.
//! Invariants: This module is the canonical path to the codec primitives.
//! Invariants: Re-exports only; no logic lives here.

pub use crate::core::decode::{
    DecodeOptions, DecodeReport, Gap, GapReason, ROOT_PREFIX, decode, decode_with_report,
};
pub use crate::core::encode::{Command, encode, render_script, sanitize_token};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::escape::escape_single_quotes;
pub use crate::core::namespace::Namespace;
